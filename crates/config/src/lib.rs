//! Shared configuration for Stipple
//!
//! This crate provides the brush settings consumed by the stamping engine:
//! per-stroke geometry and flow ([`StrokeSettings`]), tip behaviour that stays
//! fixed for the lifetime of a tip mover ([`TipOptions`]), and the combined
//! [`BrushConfig`] document that tools load and persist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default base radius in pixels
pub const DEFAULT_RADIUS: f32 = 10.0;

/// Default flow (full coverage across one diameter)
pub const DEFAULT_FLOW: f32 = 1.0;

/// Default spacing (one pixel, absolute)
pub const DEFAULT_SPACING: f32 = 1.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid radius: {0} (must be finite and > 0)")]
    InvalidRadius(f32),
    #[error("Invalid flow: {0} (must be in (0, 1])")]
    InvalidFlow(f32),
    #[error("Invalid spacing: {0} (must be finite and > 0)")]
    InvalidSpacing(f32),
    #[error("Invalid scatter offset: {0} (must be finite and >= 0)")]
    InvalidScatterOffset(f32),
    #[error("Failed to parse brush config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings that shape a single stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeSettings {
    /// Base radius in pixels, scaled by pressure
    pub radius: f32,
    /// Cumulative opacity of overlapping stamps across one diameter, (0, 1]
    pub flow: f32,
    /// Random positional jitter per stamp, relative to the stamp radius
    pub scatter_offset: f32,
    /// Distance between stamp centers
    pub spacing: f32,
    /// If true, spacing is a multiple of the current radius
    pub relative_spacing: bool,
}

impl Default for StrokeSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            flow: DEFAULT_FLOW,
            scatter_offset: 0.0,
            spacing: DEFAULT_SPACING,
            relative_spacing: false,
        }
    }
}

impl StrokeSettings {
    /// Create settings with the given values
    pub fn new(
        radius: f32,
        flow: f32,
        scatter_offset: f32,
        spacing: f32,
        relative_spacing: bool,
    ) -> Self {
        Self {
            radius,
            flow,
            scatter_offset,
            spacing,
            relative_spacing,
        }
    }

    /// Reject settings that would make the blend count diverge or the
    /// stamp radius meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !self.flow.is_finite() || self.flow <= 0.0 || self.flow > 1.0 {
            return Err(ConfigError::InvalidFlow(self.flow));
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        if !self.scatter_offset.is_finite() || self.scatter_offset < 0.0 {
            return Err(ConfigError::InvalidScatterOffset(self.scatter_offset));
        }
        Ok(())
    }

    /// Continuous mode: one stamp per pixel with no jitter
    pub fn is_continuous(&self) -> bool {
        !self.relative_spacing && self.spacing == 1.0 && self.scatter_offset == 0.0
    }

    /// Spacing in pixels for a stamp of the given radius, before the
    /// one-pixel minimum is applied
    pub fn effective_spacing(&self, radius: f32) -> f32 {
        if self.relative_spacing {
            self.spacing * radius
        } else {
            self.spacing
        }
    }
}

/// Tip behaviour fixed for the lifetime of a tip mover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipOptions {
    /// Fill sub-pixel segments with a reduced-alpha stamp in continuous mode
    pub fill_short_segments: bool,
    /// Give every stamp a random rotation. Output is no longer reproducible.
    pub random_rotation: bool,
}

impl Default for TipOptions {
    fn default() -> Self {
        Self {
            fill_short_segments: true,
            random_rotation: false,
        }
    }
}

/// Complete brush configuration as loaded by tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Human-readable name
    pub name: String,
    pub tip: TipOptions,
    pub stroke: StrokeSettings,
}

impl BrushConfig {
    /// Parse a brush config from JSON and validate it.
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BrushConfig = serde_json::from_str(json)?;
        config.stroke.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
