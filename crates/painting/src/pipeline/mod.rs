//! Painting pipeline
//!
//! Connects the brush tip mover to a CPU surface:
//! 1. Input comes in via `begin_stroke`, `stroke_to`, `end_stroke`
//! 2. The tip mover turns samples into stamps
//! 3. Stamps are blended onto the surface in the current color

mod stroke;

use rand::rngs::StdRng;
use stipple_config::{BrushConfig, ConfigError};
use thiserror::Error;
use tracing::debug;

use crate::blend::alpha_for_n_blends;
use crate::random::from_entropy;
use crate::surface::CpuSurface;
use crate::tip::{BrushTipMover, TipError};

/// Flow-alpha collaborator used by the pipeline
pub type FlowAlphaFn = fn(f32, f32) -> f32;

/// Error type for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Stroke {0} already in progress - call end_stroke() first")]
    StrokeInProgress(u64),
    #[error(transparent)]
    Tip(#[from] TipError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of a finished stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeSummary {
    pub stroke_id: u64,
    /// Stamps drawn over the whole stroke
    pub stamp_count: usize,
}

/// Painting pipeline for a single canvas
pub struct StrokePipeline<R = StdRng> {
    /// CPU surface stamps are drawn onto
    pub surface: CpuSurface,
    pub(crate) mover: BrushTipMover<FlowAlphaFn, R>,
    /// Brush applied to the next stroke
    pub(crate) config: BrushConfig,
    /// Current brush color
    pub(crate) color: [f32; 4],
    /// Current stroke ID (used during active stroke)
    pub(crate) current_stroke_id: Option<u64>,
    /// Stamps drawn in the current stroke
    pub(crate) stamp_count: usize,
}

impl StrokePipeline<StdRng> {
    /// Create a new pipeline with the given surface dimensions and the default brush
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_rng(width, height, from_entropy())
    }
}

impl<R> StrokePipeline<R> {
    /// Create a new pipeline drawing scatter and rotation from `rng`
    pub fn with_rng(width: u32, height: u32, rng: R) -> Self {
        let config = BrushConfig::default();
        Self {
            surface: CpuSurface::new(width, height),
            mover: BrushTipMover::new(config.tip, alpha_for_n_blends as FlowAlphaFn, rng),
            config,
            color: [0.0, 0.0, 0.0, 1.0], // Default to black
            current_stroke_id: None,
            stamp_count: 0,
        }
    }

    /// Get the surface width
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    /// Get the surface height
    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Set the brush used from the next stroke on
    ///
    /// Rejected while a stroke is in progress or if the settings are invalid.
    pub fn set_config(&mut self, config: BrushConfig) -> Result<(), PipelineError> {
        if let Some(stroke_id) = self.current_stroke_id {
            return Err(PipelineError::StrokeInProgress(stroke_id));
        }
        config.stroke.validate()?;
        debug!("StrokePipeline::set_config: brush '{}'", config.name);
        self.mover.set_options(config.tip);
        self.config = config;
        Ok(())
    }

    /// Get the current brush configuration
    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// Set the brush color
    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    /// Get the current brush color
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.surface.clear(color);
    }

    /// Get raw surface data as bytes (for full texture upload)
    pub fn surface_as_bytes(&self) -> &[u8] {
        self.surface.as_bytes()
    }
}
