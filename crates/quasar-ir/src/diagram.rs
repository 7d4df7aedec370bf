//! Column layout and text drawing of circuits.
//!
//! The text drawer renders each qubit as three character rows and each
//! layout column as a five character cell:
//!
//! ```text
//!       ┌───┐
//! q_0: ─┤ H ├───■───
//!       └───┘   │
//!             ┌─┴─┐
//! q_1: ───────┤ X ├─
//!             └───┘
//! ```

use std::fmt;

use crate::circuit::Circuit;
use crate::instruction::Instruction;
use crate::qubit::{QubitId, wire_label};

const EMPTY: [&str; 3] = ["     ", "─────", "     "];
const PASS_THROUGH: [&str; 3] = ["  │  ", "──┼──", "  │  "];

/// Instructions grouped into drawable columns.
///
/// An instruction occupies every wire between its lowest and highest operand,
/// so two gates share a column only when their spans do not overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLayout {
    num_qubits: usize,
    columns: Vec<Vec<Instruction>>,
}

impl DiagramLayout {
    /// Lay out the instructions of `circuit` in application order.
    pub fn of(circuit: &Circuit) -> Self {
        let num_qubits = circuit.num_qubits();
        let mut next_free = vec![0usize; num_qubits];
        let mut columns: Vec<Vec<Instruction>> = vec![];

        for instruction in circuit.instructions() {
            let Some((lo, hi)) = instruction.span() else {
                continue;
            };
            let wires = lo.index()..=hi.index().min(num_qubits.saturating_sub(1));
            let column = next_free[wires.clone()].iter().copied().max().unwrap_or(0);

            while columns.len() <= column {
                columns.push(vec![]);
            }
            columns[column].push(instruction.clone());

            for slot in &mut next_free[wires] {
                *slot = column + 1;
            }
        }

        Self {
            num_qubits,
            columns,
        }
    }

    /// Number of qubit wires.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The instructions of each column, left to right.
    pub fn columns(&self) -> &[Vec<Instruction>] {
        &self.columns
    }

    /// Three-row text cell for `wire` in `column`.
    fn cell(&self, column: usize, wire: QubitId) -> [&'static str; 3] {
        for instruction in &self.columns[column] {
            let Some((lo, hi)) = instruction.span() else {
                continue;
            };
            if wire < lo || wire > hi {
                continue;
            }

            let target = instruction.target();
            return match instruction.control() {
                None => gate_box(instruction.gate.symbol()),
                Some(control) if wire == control => {
                    if target.is_some_and(|t| t > control) {
                        ["     ", "──■──", "  │  "]
                    } else {
                        ["  │  ", "──■──", "     "]
                    }
                }
                Some(control) if Some(wire) == target => {
                    let [top, mid, bot] = gate_box(instruction.gate.symbol());
                    if control < wire {
                        ["┌─┴─┐", mid, bot]
                    } else {
                        [top, mid, "└─┬─┘"]
                    }
                }
                Some(_) => PASS_THROUGH,
            };
        }
        EMPTY
    }
}

fn gate_box(symbol: char) -> [&'static str; 3] {
    let mid = match symbol {
        'H' => "┤ H ├",
        'X' => "┤ X ├",
        'Y' => "┤ Y ├",
        'Z' => "┤ Z ├",
        _ => "┤ ? ├",
    };
    ["┌───┐", mid, "└───┘"]
}

/// Render `circuit` as a box-drawing text diagram.
pub fn draw_text(circuit: &Circuit) -> String {
    let layout = DiagramLayout::of(circuit);
    let labels: Vec<String> = (0..layout.num_qubits)
        .map(|q| wire_label(QubitId(q as u32)))
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(layout.num_qubits * 3);
    for (q, label) in labels.iter().enumerate() {
        let wire = QubitId(q as u32);
        let blank = " ".repeat(label_width + 2);
        let mut rows = [
            blank.clone(),
            format!("{label:>label_width$}: "),
            blank,
        ];

        for column in 0..layout.num_columns() {
            let cell = layout.cell(column, wire);
            for (row, (spacer, part)) in rows.iter_mut().zip([" ", "─", " "].iter().zip(cell)) {
                row.push_str(spacer);
                row.push_str(part);
            }
        }
        rows[1].push('─');

        lines.extend(rows.iter().map(|r| r.trim_end().to_string()));
    }

    lines.join("\n")
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&draw_text(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_diagram() {
        let circuit = Circuit::bell().unwrap();
        let expected = [
            "      ┌───┐",
            "q_0: ─┤ H ├───■───",
            "      └───┘   │",
            "            ┌─┴─┐",
            "q_1: ───────┤ X ├─",
            "            └───┘",
        ]
        .join("\n");
        assert_eq!(circuit.to_string(), expected);
    }

    #[test]
    fn test_empty_circuit_diagram() {
        let circuit = Circuit::with_size("empty", 2);
        assert_eq!(circuit.to_string(), "\nq_0: ─\n\n\nq_1: ─\n");
    }

    #[test]
    fn test_wraparound_cx_crosses_middle_wires() {
        let mut circuit = Circuit::with_size("wrap", 3);
        circuit.cx(QubitId(2), QubitId(0)).unwrap();
        let text = circuit.to_string();
        let lines: Vec<_> = text.split('\n').collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[1].contains("┤ X ├"));
        assert!(lines[2].contains("└─┬─┘"));
        assert!(lines[4].contains("──┼──"));
        assert!(lines[6].contains('│'));
        assert!(lines[7].contains('■'));
    }

    #[test]
    fn test_layout_packs_disjoint_gates() {
        let mut circuit = Circuit::with_size("pack", 3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .x(QubitId(2))
            .unwrap()
            .cx(QubitId(0), QubitId(2))
            .unwrap()
            .y(QubitId(1))
            .unwrap();

        let layout = DiagramLayout::of(&circuit);
        assert_eq!(layout.num_columns(), 3);
        assert_eq!(layout.columns()[0].len(), 2);
        assert_eq!(layout.columns()[1].len(), 1);
        assert_eq!(layout.columns()[2][0].gate.name(), "y");
    }

    #[test]
    fn test_labels_right_aligned() {
        let circuit = Circuit::with_size("wide", 11);
        let text = circuit.to_string();
        assert!(text.contains("\n q_9: ─"));
        assert!(text.contains("\nq_10: ─"));
    }
}
