//! Spacing accumulator: places stamps at fixed distances along straight pieces

use std::f32::consts::TAU;

use glam::Vec2;

use super::StrokeState;
use crate::constants::{MIN_STAMP_SPACING, SHORT_STEP_SCALE};
use crate::random::RandomSource;
use crate::target::{FlowAlpha, StampTarget};

impl StrokeState {
    /// Distance to the next stamp after one of the given radius
    #[inline]
    pub(crate) fn stamp_spacing(&self, radius: f32) -> f32 {
        self.settings.effective_spacing(radius).max(MIN_STAMP_SPACING)
    }

    /// Stamp along the straight line from the current anchor to `center`.
    ///
    /// Position and radius are interpolated linearly from the anchor. Leftover
    /// distance is carried in `residual`, so a stamp does not necessarily land
    /// on `center`. The anchor always moves to `center`, even when nothing is
    /// drawn.
    ///
    /// `_rotation` is accepted for the end of the line but not applied yet;
    /// stamp rotation is either random or zero.
    ///
    /// Returns the number of stamps emitted.
    pub(crate) fn circle_line_to<T, R>(
        &mut self,
        target: &mut T,
        rng: &mut R,
        random_rotation: bool,
        center: Vec2,
        radius: f32,
        _rotation: f32,
    ) -> usize
    where
        T: StampTarget + ?Sized,
        R: RandomSource,
    {
        let diff = center - self.anchor;
        let length = diff.length();
        let mut emitted = 0;

        if length > 0.0 {
            let spacing = self.stamp_spacing(radius);
            while self.residual < length {
                let t = self.residual / length;
                let mut stamp_center = self.anchor + diff * t;
                let stamp_radius = self.anchor_radius + (radius - self.anchor_radius) * t;

                if self.settings.scatter_offset > 0.0 {
                    let offset = rng.next_unit() * self.settings.scatter_offset * radius;
                    let angle = rng.next_unit() * TAU;
                    stamp_center += Vec2::new(angle.sin(), angle.cos()) * offset;
                }
                let rotation = if random_rotation {
                    rng.next_unit() * TAU
                } else {
                    0.0
                };

                target.fill_circle(
                    stamp_center.x,
                    stamp_center.y,
                    stamp_radius,
                    self.draw_flow_alpha,
                    rotation,
                );
                emitted += 1;
                self.residual += spacing;
            }
            self.residual -= length;
        }

        self.anchor = center;
        self.anchor_radius = radius;
        emitted
    }

    /// Continuous mode only: leave a trace for a segment shorter than the
    /// distance still owed to the next stamp.
    ///
    /// A single stamp goes to `center` with an alpha scaled down to the share
    /// of a stamp cycle this step covers. Steps too small to matter are
    /// skipped. The residual is reset so the cycle phase is kept.
    pub(crate) fn fill_short_segment<T, A>(
        &mut self,
        target: &mut T,
        flow_alpha: &A,
        center: Vec2,
        length: f32,
        pressure: f32,
    ) -> usize
    where
        T: StampTarget + ?Sized,
        A: FlowAlpha,
    {
        let cycle = self.settings.spacing;
        // residual - cycle is how far the last stamp sat from the end of the
        // previous segment
        let step = length * 0.5 - (self.residual - cycle);
        let diameter = self.settings.radius * 2.0;

        let mut emitted = 0;
        if SHORT_STEP_SCALE * step > diameter {
            let alpha = flow_alpha.alpha_for_n_blends(self.settings.flow, (diameter / step).ceil());
            target.fill_circle(
                center.x,
                center.y,
                (pressure + self.pressure) * 0.5 * self.settings.radius,
                alpha,
                0.0,
            );
            emitted = 1;
        }
        self.residual = cycle - length * 0.5;
        emitted
    }
}
