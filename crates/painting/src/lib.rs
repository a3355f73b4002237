//! Stipple painting - brush tip stamping engine
//!
//! This crate turns pointer samples into brush stamps and draws them:
//! - [`tip::BrushTipMover`] - Smooths input and places evenly spaced stamps
//! - [`target`] - Collaborator traits for drawing stamps and computing flow alpha
//! - [`blend`] - Flow to per-stamp alpha conversion
//! - [`random`] - Injectable random sources for scatter and rotation
//! - [`types::Stamp`] - A single emitted stamp (GPU-compatible with bytemuck)
//! - [`surface`] - CPU RGBA surface that stamps can be drawn onto
//! - [`pipeline`] - Complete stroke pipeline from input to surface

pub mod blend;
pub mod constants;
pub mod pipeline;
pub mod random;
pub mod surface;
pub mod target;
pub mod tip;
pub mod types;

pub use blend::*;
pub use constants::*;
pub use pipeline::*;
pub use random::*;
pub use surface::*;
pub use target::*;
pub use tip::*;
pub use types::*;

pub use stipple_config::{BrushConfig, ConfigError, StrokeSettings, TipOptions};
