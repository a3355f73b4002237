//! Brush tip mover
//!
//! Turns a sparse sequence of pointer samples into evenly spaced circular
//! stamps:
//! - each new sample is joined to the previous one with a quadratic curve
//!   whose control point keeps the stroke heading smooth
//! - the curve is walked in short straight pieces
//! - stamps are placed along those pieces at a fixed spacing, with leftover
//!   distance carried between calls
//!
//! The mover never draws by itself. Stamps go to a [`StampTarget`] passed to
//! every [`BrushTipMover::move_to`] call, and flow is converted into per-stamp
//! alpha by the [`FlowAlpha`] collaborator supplied at construction.
//!
//! # Example
//!
//! ```ignore
//! let mut mover = BrushTipMover::new(TipOptions::default(), alpha_for_n_blends, seeded(1));
//! mover.reset(0.0, 0.0, 1.0, &StrokeSettings::default())?;
//! let mut stamps: Vec<Stamp> = Vec::new();
//! mover.move_to(&mut stamps, 100.0, 0.0, 1.0)?;
//! ```
//!
//! [`StampTarget`]: crate::target::StampTarget

mod movement;
mod smoothing;
mod spacing;

use glam::Vec2;
use rand::rngs::StdRng;
use stipple_config::{ConfigError, StrokeSettings, TipOptions};
use thiserror::Error;
use tracing::{debug, warn};

use crate::target::FlowAlpha;

/// Error type for tip mover operations.
#[derive(Debug, Error)]
pub enum TipError {
    #[error("Stroke not started - call reset() first")]
    NotStarted,
    #[error("Invalid stroke settings: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Non-finite sample: x={x}, y={y}, pressure={pressure}")]
    NonFiniteSample { x: f32, y: f32, pressure: f32 },
}

/// Mutable state of the stroke in progress
#[derive(Debug, Clone)]
pub(crate) struct StrokeState {
    /// Last processed input sample
    pub(crate) position: Vec2,
    pub(crate) pressure: f32,
    /// Outgoing tangent of the previous curve, unit length or zero
    pub(crate) direction: Vec2,
    /// Start of the next straight piece fed to the spacing accumulator
    pub(crate) anchor: Vec2,
    pub(crate) anchor_radius: f32,
    /// Distance still owed before the next stamp is due
    pub(crate) residual: f32,
    pub(crate) settings: StrokeSettings,
    /// Tip options captured at reset
    pub(crate) options: TipOptions,
    pub(crate) continuous: bool,
    pub(crate) draw_flow_alpha: f32,
}

impl StrokeState {
    /// Settings must already be validated.
    pub(crate) fn new<A>(
        position: Vec2,
        pressure: f32,
        settings: StrokeSettings,
        options: TipOptions,
        flow_alpha: &A,
    ) -> Self
    where
        A: FlowAlpha + ?Sized,
    {
        let continuous = settings.is_continuous();
        let n_blends = blend_count(&settings, continuous);
        let draw_flow_alpha = flow_alpha.alpha_for_n_blends(settings.flow, n_blends);

        Self {
            position,
            pressure,
            direction: Vec2::ZERO,
            anchor: position,
            anchor_radius: pressure * settings.radius,
            residual: 0.0,
            settings,
            options,
            continuous,
            draw_flow_alpha,
        }
    }
}

/// Number of stamps overlapping any point across one diameter
fn blend_count(settings: &StrokeSettings, continuous: bool) -> f32 {
    let diameter = settings.radius * 2.0;
    if continuous {
        diameter
    } else {
        let blend_spacing = settings.effective_spacing(settings.radius).min(diameter);
        diameter / blend_spacing
    }
}

/// Generates stamp positions for one stroke at a time
///
/// Call [`reset`](Self::reset) at pen-down, [`move_to`](Self::move_to) for
/// every following sample and [`end`](Self::end) at pen-up.
pub struct BrushTipMover<A, R = StdRng> {
    options: TipOptions,
    flow_alpha: A,
    rng: R,
    /// None between strokes
    state: Option<StrokeState>,
}

impl<A: FlowAlpha, R> BrushTipMover<A, R> {
    /// Create a tip mover
    ///
    /// - `flow_alpha`: converts flow and blend count into per-stamp alpha
    /// - `rng`: source for scatter offsets and random rotation
    pub fn new(options: TipOptions, flow_alpha: A, rng: R) -> Self {
        Self {
            options,
            flow_alpha,
            rng,
            state: None,
        }
    }

    /// Start a new stroke at the given position
    ///
    /// No stamp is drawn until the first [`move_to`](Self::move_to). On error
    /// the previous state is left untouched.
    pub fn reset(
        &mut self,
        x: f32,
        y: f32,
        pressure: f32,
        settings: &StrokeSettings,
    ) -> Result<(), TipError> {
        if let Err(err) = settings.validate() {
            warn!("BrushTipMover::reset: rejected stroke settings: {}", err);
            return Err(err.into());
        }
        if !(x.is_finite() && y.is_finite() && pressure.is_finite()) {
            return Err(TipError::NonFiniteSample { x, y, pressure });
        }

        let state = StrokeState::new(
            Vec2::new(x, y),
            pressure.clamp(0.0, 1.0),
            *settings,
            self.options,
            &self.flow_alpha,
        );
        debug!(
            "BrushTipMover::reset: start=({:.1}, {:.1}), radius={:.1}, continuous={}, draw_flow_alpha={:.4}",
            x, y, settings.radius, state.continuous, state.draw_flow_alpha
        );
        self.state = Some(state);
        Ok(())
    }

    /// End the current stroke and discard its state
    pub fn end(&mut self) {
        if self.state.take().is_some() {
            debug!("BrushTipMover::end");
        }
    }

    /// Check if a stroke is in progress
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Options the next stroke starts with
    pub fn options(&self) -> TipOptions {
        self.options
    }

    /// Replace the tip options. A stroke in progress keeps the options it
    /// was reset with; the new ones apply from the next `reset`.
    pub fn set_options(&mut self, options: TipOptions) {
        self.options = options;
    }

    /// Last processed input position
    pub fn position(&self) -> Option<Vec2> {
        self.state.as_ref().map(|s| s.position)
    }

    /// Current travel direction (unit vector, or zero before the first move)
    pub fn direction(&self) -> Option<Vec2> {
        self.state.as_ref().map(|s| s.direction)
    }

    /// Distance still owed before the next stamp is due
    pub fn residual(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.residual)
    }

    /// Anchor the next straight piece starts from
    pub fn last_stamp_position(&self) -> Option<Vec2> {
        self.state.as_ref().map(|s| s.anchor)
    }

    pub fn last_stamp_radius(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.anchor_radius)
    }

    /// Alpha of regularly spaced stamps in this stroke
    pub fn draw_flow_alpha(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.draw_flow_alpha)
    }

    pub fn is_continuous(&self) -> Option<bool> {
        self.state.as_ref().map(|s| s.continuous)
    }
}
