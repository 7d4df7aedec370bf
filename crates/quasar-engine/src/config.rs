//! Engine configuration.
//!
//! Values come from [`Default`], optionally overlaid by a YAML file, and
//! finally by `QUASAR_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Largest circuit the factory will create. `None` accepts any positive
    /// count that fits a qubit index.
    pub max_qubits: Option<u32>,
    /// Visualization settings.
    pub render: RenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_qubits: None,
            render: RenderConfig::default(),
        }
    }
}

/// Visualization pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Attempt the rich-image tier. When false the pipeline goes straight
    /// to the text-as-HTML fallback.
    pub rich_image: bool,
    /// Width of one layout column, in pixels.
    pub cell_width: u32,
    /// Height of one qubit row, in pixels.
    pub row_height: u32,
    /// Blank border around the image, in pixels.
    pub margin: u32,
    /// Heading of the rich HTML fragment.
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rich_image: true,
            cell_width: 64,
            row_height: 48,
            margin: 24,
            title: "QUASAR Quantum Circuit".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from defaults, an optional YAML file, and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(source: &str) -> EngineResult<Self> {
        serde_yaml_ng::from_str(source)
            .map_err(|e| EngineError::Config(format!("invalid YAML: {e}")))
    }

    /// Read and parse a YAML file.
    pub fn from_yaml_file(path: &Path) -> EngineResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&source)
    }

    /// Apply `QUASAR_MAX_QUBITS`, `QUASAR_RICH_IMAGE`, and `QUASAR_TITLE`
    /// overrides looked up through `lookup`.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> EngineResult<Self> {
        if let Some(raw) = lookup("QUASAR_MAX_QUBITS") {
            let limit = raw.trim().parse().map_err(|e| {
                EngineError::Config(format!("QUASAR_MAX_QUBITS='{raw}' is not a count: {e}"))
            })?;
            self.max_qubits = Some(limit);
        }
        if let Some(raw) = lookup("QUASAR_RICH_IMAGE") {
            self.render.rich_image = parse_flag(&raw).ok_or_else(|| {
                EngineError::Config(format!("QUASAR_RICH_IMAGE='{raw}' is not a boolean"))
            })?;
        }
        if let Some(title) = lookup("QUASAR_TITLE") {
            self.render.title = title;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings that would make every circuit or image invalid.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_qubits == Some(0) {
            return Err(EngineError::Config("max_qubits must be at least 1".into()));
        }
        let r = &self.render;
        if r.cell_width == 0 || r.row_height == 0 {
            return Err(EngineError::Config(
                "cell_width and row_height must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
