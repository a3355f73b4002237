//! Flow to per-stamp alpha conversion
//!
//! Blending the same color `n` times with alpha `a` using source-over
//! compositing leaves a coverage of `1 - (1 - a)^n`. These helpers solve that
//! relation in both directions and match [`crate::surface::CpuSurface::blend_pixel`].

/// Alpha each of `n_blends` overlapping stamps needs to reach `flow` coverage
///
/// Blend counts below one are treated as a single blend.
pub fn alpha_for_n_blends(flow: f32, n_blends: f32) -> f32 {
    let flow = flow.clamp(0.0, 1.0);
    if flow >= 1.0 {
        return 1.0;
    }
    if !n_blends.is_finite() || n_blends <= 1.0 {
        return flow;
    }
    1.0 - (1.0 - flow).powf(1.0 / n_blends)
}

/// Coverage left by `n_blends` stamps of the given alpha
pub fn composite_coverage(alpha: f32, n_blends: f32) -> f32 {
    let alpha = alpha.clamp(0.0, 1.0);
    1.0 - (1.0 - alpha).powf(n_blends.max(0.0))
}
