//! HTML fragments produced by the image and text fallback tiers.
//!
//! Both fragments share one shape: an outer bordered `<div>`, an `<h3>`
//! title, the body (image or `<pre>` block), and a metrics row with the
//! qubit count, gate count, and depth in that order.

use std::fmt::Write as _;

use super::CircuitSummary;

/// Heading of the degraded text fragment.
pub const TEXT_VIEW_TITLE: &str = "Quantum Circuit (Text View)";

/// Escape the characters that are significant inside HTML text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn metrics_row(summary: &CircuitSummary) -> String {
    let mut row = String::from(
        "  <div style=\"display: flex; justify-content: space-between; margin-top: 10px; font-size: 12px; color: #555;\">\n",
    );
    for (label, value) in [
        ("Qubits", summary.num_qubits),
        ("Gates", summary.num_ops),
        ("Depth", summary.depth),
    ] {
        let _ = writeln!(row, "    <span><strong>{label}:</strong> {value}</span>");
    }
    row.push_str("  </div>\n");
    row
}

/// Fragment embedding a base64 PNG of the circuit.
pub fn image_fragment(title: &str, png_base64: &str, summary: &CircuitSummary) -> String {
    format!(
        concat!(
            "<div style=\"border: 2px solid #4CAF50; padding: 15px; border-radius: 10px; ",
            "background: linear-gradient(135deg, #f8f9fa, #e9ecef); margin: 10px 0;\">\n",
            "  <h3 style=\"color: #2c3e50; margin-top: 0; text-align: center;\">{title}</h3>\n",
            "  <div style=\"text-align: center; background: white; padding: 10px; border-radius: 5px;\">\n",
            "    <img src=\"data:image/png;base64,{image}\" alt=\"Quantum Circuit\" ",
            "style=\"max-width: 100%; border: 1px solid #ddd;\">\n",
            "  </div>\n",
            "{metrics}",
            "</div>\n",
        ),
        title = escape(title),
        image = png_base64,
        metrics = metrics_row(summary),
    )
}

/// Fragment wrapping the text diagram, styled as a fallback rendering.
pub fn text_fragment(diagram: &str, summary: &CircuitSummary) -> String {
    format!(
        concat!(
            "<div style=\"border: 2px solid #ff9800; padding: 15px; border-radius: 10px; ",
            "background: #fff3e0; margin: 10px 0;\">\n",
            "  <h3 style=\"color: #e65100; margin-top: 0;\">{title}</h3>\n",
            "  <pre style=\"background: white; padding: 15px; border-radius: 5px; ",
            "border: 1px solid #ffcc80; overflow-x: auto; font-family: 'Courier New', monospace;\">",
            "{diagram}</pre>\n",
            "{metrics}",
            "</div>\n",
        ),
        title = TEXT_VIEW_TITLE,
        diagram = escape(diagram),
        metrics = metrics_row(summary),
    )
}
