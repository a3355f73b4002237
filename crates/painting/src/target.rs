//! Collaborator interfaces of the tip mover
//!
//! The tip mover only decides where stamps go. Drawing them and converting a
//! flow value into a per-stamp alpha are supplied by the caller through the
//! traits in this module.

use crate::types::Stamp;

/// Anything that can draw a filled, alpha-blended circular stamp
pub trait StampTarget {
    /// Draw one stamp. `rotation` is in radians.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, alpha: f32, rotation: f32);
}

/// Recording target: stamps are appended in emission order
impl StampTarget for Vec<Stamp> {
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, alpha: f32, rotation: f32) {
        self.push(Stamp::new(x, y, radius, alpha, rotation));
    }
}

/// Maps a cumulative flow and a blend count to the alpha each of the
/// `n_blends` overlapping stamps needs so that together they reach `flow`.
pub trait FlowAlpha {
    fn alpha_for_n_blends(&self, flow: f32, n_blends: f32) -> f32;
}

impl<F> FlowAlpha for F
where
    F: Fn(f32, f32) -> f32,
{
    fn alpha_for_n_blends(&self, flow: f32, n_blends: f32) -> f32 {
        self(flow, n_blends)
    }
}
