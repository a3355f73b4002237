use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single circular stamp emitted by the tip mover
///
/// Laid out as plain old data so stamp batches can be uploaded to a GPU
/// instance buffer without conversion.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Stamp {
    /// Center x in surface coordinates
    pub x: f32,
    /// Center y in surface coordinates
    pub y: f32,
    /// Radius in pixels
    pub radius: f32,
    /// Per-stamp alpha 0.0-1.0
    pub alpha: f32,
    /// Rotation in radians
    pub rotation: f32,
}

impl Stamp {
    pub fn new(x: f32, y: f32, radius: f32, alpha: f32, rotation: f32) -> Self {
        Self {
            x,
            y,
            radius,
            alpha,
            rotation,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Distance between the centers of two stamps
    pub fn distance_to(&self, other: &Stamp) -> f32 {
        self.center().distance(other.center())
    }
}

/// View a stamp batch as raw bytes for buffer upload
pub fn stamps_as_bytes(stamps: &[Stamp]) -> &[u8] {
    bytemuck::cast_slice(stamps)
}
