//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit, counted from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The wire position of this qubit in diagrams.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<i64> for QubitId {
    type Error = std::num::TryFromIntError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u32::try_from(id).map(QubitId)
    }
}

/// Label of a qubit wire as shown on the left of text diagrams (`q_0`).
pub fn wire_label(qubit: QubitId) -> String {
    format!("q_{}", qubit.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(wire_label(QubitId(3)), "q_3");
    }

    #[test]
    fn test_qubit_from_signed() {
        assert_eq!(QubitId::try_from(4_i64).unwrap(), QubitId(4));
        assert!(QubitId::try_from(-1_i64).is_err());
        assert!(QubitId::try_from(i64::from(u32::MAX) + 1).is_err());
    }
}
