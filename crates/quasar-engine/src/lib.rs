//! QUASAR circuit engine
//!
//! A small convenience layer over [`quasar_ir`]: create a circuit, apply
//! named gates to it, and render it to a text or HTML artifact. The
//! [`ToolSession`] wraps the same operations as string-returning tools for
//! agent frameworks.
//!
//! # Example
//!
//! ```rust
//! use quasar_engine::{GateTag, Tier, Visualizer, apply_gate, create_circuit};
//! use quasar_ir::QubitId;
//!
//! let mut circuit = create_circuit(2).unwrap();
//! apply_gate(&mut circuit, GateTag::H, QubitId(0), None).unwrap();
//! // No control: cx on qubit 0 wires control=0, target=1.
//! apply_gate(&mut circuit, GateTag::CX, QubitId(0), None).unwrap();
//!
//! let artifact = Visualizer::default().render(Some(&circuit));
//! assert_eq!(artifact.tier(), Some(Tier::RichImage));
//! assert!(artifact.as_str().contains("<strong>Gates:</strong> 2"));
//! ```
//!
//! # Modules
//!
//! - [`factory`]: validated circuit creation
//! - [`dispatch`]: gate application and the default CNOT wiring
//! - [`render`]: the text, rich-image, and text-as-HTML tiers
//! - [`session`]: tool entry points holding the active circuit
//! - [`config`]: YAML and environment configuration

pub mod config;
pub mod dispatch;
pub mod error;
pub mod factory;
pub mod render;
pub mod session;

pub use config::{EngineConfig, RenderConfig};
pub use dispatch::{AppliedGate, GateCall, GateTag, apply_gate, apply_named_gate, resolve_cx};
pub use error::{EngineError, EngineResult, RenderError};
pub use factory::{CircuitFactory, create_circuit};
pub use render::{
    Artifact, CircuitSummary, RasterBackend, SkiaBackend, Tier, UnavailableBackend, Visualizer,
};
pub use session::{ToolSession, tool_definitions};
