//! Circuit visualization with tiered fallback.
//!
//! [`Visualizer::render`] always produces an [`Artifact`]. It draws the text
//! diagram first, then tries each of [`Tier::FALLIBLE`] and returns the first
//! that succeeds, ending on [`Tier::LAST_RESORT`]:
//!
//! 1. [`Tier::Text`]: the library's text diagram, always computed and logged.
//! 2. [`Tier::RichImage`]: a PNG from the [`RasterBackend`], base64-encoded
//!    into an HTML fragment.
//! 3. [`Tier::TextHtml`]: the tier-1 diagram wrapped in a degraded HTML
//!    fragment. This tier cannot fail.

pub mod html;
pub mod raster;

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use quasar_ir::{Circuit, DiagramLayout};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::error::RenderError;

pub use raster::{RasterBackend, SkiaBackend, UnavailableBackend};

/// Artifact text returned when there is nothing to draw.
pub const NO_CIRCUIT: &str = "Error: no circuit to visualize";

/// The counts shown alongside every rendered circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircuitSummary {
    /// Number of qubits.
    pub num_qubits: usize,
    /// Number of gates.
    pub num_ops: usize,
    /// Circuit depth.
    pub depth: usize,
}

impl CircuitSummary {
    /// Read the summary of `circuit`.
    pub fn of(circuit: &Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits(),
            num_ops: circuit.num_ops(),
            depth: circuit.depth(),
        }
    }
}

impl fmt::Display for CircuitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qubits={}, gates={}, depth={}",
            self.num_qubits, self.num_ops, self.depth
        )
    }
}

/// One way of rendering a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Plain text diagram.
    Text,
    /// PNG image embedded in HTML.
    RichImage,
    /// Text diagram embedded in HTML.
    TextHtml,
}

impl Tier {
    /// Tiers tried after the text diagram, in order. Each may fail.
    pub const FALLIBLE: [Tier; 1] = [Tier::RichImage];

    /// The tier used when every fallible tier has failed.
    pub const LAST_RESORT: Tier = Tier::TextHtml;

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Text => "text",
            Tier::RichImage => "rich_image",
            Tier::TextHtml => "text_html",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rendered circuit, tagged with the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Nothing could be drawn.
    Error(String),
    /// Plain text diagram.
    Text(String),
    /// HTML fragment with an embedded PNG.
    RichImage(String),
    /// HTML fragment with the text diagram.
    TextHtml(String),
}

impl Artifact {
    /// The tier that produced this artifact, or `None` for an error.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Artifact::Error(_) => None,
            Artifact::Text(_) => Some(Tier::Text),
            Artifact::RichImage(_) => Some(Tier::RichImage),
            Artifact::TextHtml(_) => Some(Tier::TextHtml),
        }
    }

    /// Borrow the artifact body.
    pub fn as_str(&self) -> &str {
        match self {
            Artifact::Error(s)
            | Artifact::Text(s)
            | Artifact::RichImage(s)
            | Artifact::TextHtml(s) => s,
        }
    }

    /// Take the artifact body.
    pub fn into_string(self) -> String {
        match self {
            Artifact::Error(s)
            | Artifact::Text(s)
            | Artifact::RichImage(s)
            | Artifact::TextHtml(s) => s,
        }
    }

    /// Whether this is [`Artifact::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Artifact::Error(_))
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the rendering tiers against a circuit.
pub struct Visualizer {
    config: RenderConfig,
    backend: Box<dyn RasterBackend>,
}

impl fmt::Debug for Visualizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visualizer")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Visualizer {
    /// Create a visualizer. When `config.rich_image` is off, the image tier
    /// is wired to a backend that always fails.
    pub fn new(config: RenderConfig) -> Self {
        let backend: Box<dyn RasterBackend> = if config.rich_image {
            Box::new(SkiaBackend)
        } else {
            Box::new(UnavailableBackend::new("rich images disabled in configuration"))
        };
        Self { config, backend }
    }

    /// Create a visualizer with a specific raster backend.
    pub fn with_backend(config: RenderConfig, backend: Box<dyn RasterBackend>) -> Self {
        Self { config, backend }
    }

    /// Name of the raster backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Render `circuit` with the first tier that succeeds.
    pub fn render(&self, circuit: Option<&Circuit>) -> Artifact {
        let Some(circuit) = circuit else {
            warn!("{NO_CIRCUIT}");
            return Artifact::Error(NO_CIRCUIT.to_string());
        };

        let diagram = circuit.to_string();
        info!(tier = %Tier::Text, "Circuit diagram:\n{diagram}");
        let summary = CircuitSummary::of(circuit);

        for tier in Tier::FALLIBLE {
            match self.attempt(tier, circuit, &diagram, &summary) {
                Ok(artifact) => {
                    info!(%tier, bytes = artifact.as_str().len(), "Circuit rendered");
                    return artifact;
                }
                Err(e) => warn!(
                    %tier,
                    backend = self.backend.name(),
                    error = %e,
                    "Render tier failed, falling back"
                ),
            }
        }

        info!(tier = %Tier::LAST_RESORT, "Rendering text diagram as HTML");
        Artifact::TextHtml(html::text_fragment(&diagram, &summary))
    }

    /// Render `circuit` with one specific tier.
    pub fn render_tier(&self, tier: Tier, circuit: &Circuit) -> Result<Artifact, RenderError> {
        let diagram = circuit.to_string();
        self.attempt(tier, circuit, &diagram, &CircuitSummary::of(circuit))
    }

    /// Run one tier, reusing the already drawn text diagram.
    fn attempt(
        &self,
        tier: Tier,
        circuit: &Circuit,
        diagram: &str,
        summary: &CircuitSummary,
    ) -> Result<Artifact, RenderError> {
        match tier {
            Tier::Text => Ok(Artifact::Text(diagram.to_string())),
            Tier::RichImage => {
                let layout = DiagramLayout::of(circuit);
                let png = self.backend.rasterize(&layout, &self.config)?;
                debug!(
                    backend = self.backend.name(),
                    png_bytes = png.len(),
                    "Rasterized circuit"
                );
                let encoded = BASE64.encode(&png);
                Ok(Artifact::RichImage(html::image_fragment(
                    &self.config.title,
                    &encoded,
                    summary,
                )))
            }
            Tier::TextHtml => Ok(Artifact::TextHtml(html::text_fragment(diagram, summary))),
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
