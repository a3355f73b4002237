//! Moving the tip: smoothing, subdivision and short-segment handling

use glam::Vec2;
use tracing::trace;

use super::smoothing::{control_point, quadratic_point};
use super::{BrushTipMover, TipError};
use crate::constants::{LINE_SEGMENT_LENGTH, SUBDIVISION_EXTENT};
use crate::random::RandomSource;
use crate::target::{FlowAlpha, StampTarget};

impl<A: FlowAlpha, R: RandomSource> BrushTipMover<A, R> {
    /// Move the tip to a new sample, drawing stamps into `target`
    ///
    /// The segment from the previous sample is smoothed into a quadratic
    /// curve, split into pieces of roughly [`LINE_SEGMENT_LENGTH`] pixels and
    /// stamped along. Segments shorter than the distance still owed to the
    /// next stamp are not subdivided.
    ///
    /// Returns the number of stamps emitted.
    pub fn move_to<T>(&mut self, target: &mut T, x: f32, y: f32, pressure: f32) -> Result<usize, TipError>
    where
        T: StampTarget + ?Sized,
    {
        let state = self.state.as_mut().ok_or(TipError::NotStarted)?;
        if !(x.is_finite() && y.is_finite() && pressure.is_finite()) {
            return Err(TipError::NonFiniteSample { x, y, pressure });
        }
        let pressure = pressure.clamp(0.0, 1.0);

        let end = Vec2::new(x, y);
        let displacement = end - state.position;
        let length = displacement.length();
        let control = control_point(state.position, state.direction, displacement, length);

        let mut emitted = 0;
        if length < state.residual {
            if state.continuous && state.options.fill_short_segments {
                emitted += state.fill_short_segment(target, &self.flow_alpha, control, length, pressure);
            } else {
                state.residual -= length;
            }
            state.anchor = end;
            state.anchor_radius = pressure * state.settings.radius;
        } else {
            let steps = (length / LINE_SEGMENT_LENGTH).ceil().max(1.0);
            let t_step = SUBDIVISION_EXTENT / steps;
            let start = state.position;
            let start_pressure = state.pressure;
            let random_rotation = state.options.random_rotation;

            for i in 0..=(steps as u32) {
                let t = i as f32 * t_step;
                let point = quadratic_point(start, control, end, t);
                let radius = (start_pressure + (pressure - start_pressure) * t) * state.settings.radius;
                emitted += state.circle_line_to(
                    target,
                    &mut self.rng,
                    random_rotation,
                    point,
                    radius,
                    0.0,
                );
            }
        }

        // The curve's end tangent passes through the control point
        state.direction = (end - control).normalize_or_zero();
        state.position = end;
        state.pressure = pressure;

        trace!(
            "BrushTipMover::move_to({:.1}, {:.1}, {:.2}): length={:.2}, emitted {} stamps, residual={:.3}",
            x, y, pressure, length, emitted, state.residual
        );
        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use stipple_config::{StrokeSettings, TipOptions};

    use super::*;
    use crate::blend::alpha_for_n_blends;
    use crate::random::{SequenceRandom, seeded};
    use crate::types::Stamp;

    type TestMover = BrushTipMover<fn(f32, f32) -> f32, SequenceRandom>;

    fn mover(options: TipOptions) -> TestMover {
        BrushTipMover::new(
            options,
            alpha_for_n_blends as fn(f32, f32) -> f32,
            SequenceRandom::new(vec![0.3, 0.8, 0.55]),
        )
    }

    fn started(settings: StrokeSettings, options: TipOptions) -> TestMover {
        let mut mover = mover(options);
        mover.reset(0.0, 0.0, 1.0, &settings).unwrap();
        mover
    }

    #[test]
    fn test_move_before_reset_fails() {
        let mut mover = mover(TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        let result = mover.move_to(&mut stamps, 10.0, 10.0, 1.0);
        assert!(matches!(result, Err(TipError::NotStarted)));
        assert!(stamps.is_empty());
    }

    #[test]
    fn test_move_after_end_fails() {
        let mut mover = started(StrokeSettings::default(), TipOptions::default());
        mover.end();

        let mut stamps: Vec<Stamp> = Vec::new();
        let result = mover.move_to(&mut stamps, 10.0, 10.0, 1.0);
        assert!(matches!(result, Err(TipError::NotStarted)));
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let mut mover = started(StrokeSettings::default(), TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        let result = mover.move_to(&mut stamps, f32::INFINITY, 0.0, 1.0);
        assert!(matches!(result, Err(TipError::NonFiniteSample { .. })));
        assert_eq!(mover.position(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_straight_line_continuous() {
        let mut mover = started(StrokeSettings::default(), TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        let emitted = mover.move_to(&mut stamps, 100.0, 0.0, 1.0).unwrap();

        assert_eq!(emitted, stamps.len());
        assert!(stamps.len() >= 99 && stamps.len() <= 101);
        assert!(stamps[0].x < 1.0 + 0.001);
        assert!(stamps.last().unwrap().x > 98.5);

        let alpha = mover.draw_flow_alpha().unwrap();
        for stamp in &stamps {
            assert!(stamp.y.abs() < 0.001);
            assert!((stamp.radius - 10.0).abs() < 0.001);
            assert_eq!(stamp.rotation, 0.0);
            assert_eq!(stamp.alpha, alpha);
        }
        for pair in stamps.windows(2) {
            assert!((pair[0].distance_to(&pair[1]) - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_direction_follows_stroke() {
        let mut mover = started(StrokeSettings::default(), TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 0.0, 20.0, 1.0).unwrap();

        let direction = mover.direction().unwrap();
        assert!((direction - Vec2::Y).length() < 0.0001);
        assert_eq!(mover.position(), Some(Vec2::new(0.0, 20.0)));
    }

    #[test]
    fn test_spacing_conservation() {
        let settings = StrokeSettings::new(8.0, 1.0, 0.0, 3.0, false);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        for &x in &[37.3, 80.1, 150.0, 151.5, 210.25] {
            mover.move_to(&mut stamps, x, 0.0, 1.0).unwrap();
        }

        // Distance covered up to the current anchor: from the start to the
        // first stamp, between stamps, and from the last stamp to the anchor
        let traveled = mover.last_stamp_position().unwrap().x;
        let first_offset = stamps[0].x;
        let between: f32 = stamps.windows(2).map(|p| p[0].distance_to(&p[1])).sum();
        let after_last = 3.0 - mover.residual().unwrap();

        assert!((first_offset + between + after_last - traveled).abs() < 0.01);
        for pair in stamps.windows(2) {
            assert!((pair[0].distance_to(&pair[1]) - 3.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_deterministic_without_randomness() {
        let settings = StrokeSettings::new(5.0, 0.6, 0.0, 0.2, true);
        let samples = [
            (3.0, 1.0, 0.2),
            (12.0, 7.5, 0.5),
            (12.2, 7.6, 0.55),
            (30.0, 2.0, 0.9),
            (45.0, -10.0, 0.4),
        ];

        let run = |rng: SequenceRandom| {
            let mut mover =
                BrushTipMover::new(TipOptions::default(), alpha_for_n_blends, rng);
            mover.reset(0.0, 0.0, 0.1, &settings).unwrap();
            let mut stamps: Vec<Stamp> = Vec::new();
            for &(x, y, p) in &samples {
                mover.move_to(&mut stamps, x, y, p).unwrap();
            }
            stamps
        };

        // The random source is never consulted without scatter or rotation
        let first = run(SequenceRandom::new(vec![0.1]));
        let second = run(SequenceRandom::new(vec![0.9]));
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_residual_never_negative() {
        let settings = StrokeSettings::new(4.0, 0.7, 0.0, 0.75, true);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        let mut x = 0.0;
        for i in 0..200 {
            x += 0.05 * (i % 7) as f32;
            let y = (i as f32 * 0.3).sin() * 4.0;
            mover.move_to(&mut stamps, x, y, 0.5).unwrap();
            assert!(mover.residual().unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_short_segments_filled_in_continuous_mode() {
        let settings = StrokeSettings::new(10.0, 0.5, 0.0, 1.0, false);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        // First sub-pixel move stamps at the start and leaves 0.7 owed
        mover.move_to(&mut stamps, 0.3, 0.0, 1.0).unwrap();
        assert_eq!(stamps.len(), 1);
        assert!((mover.residual().unwrap() - 0.7).abs() < 0.001);

        let draw_alpha = mover.draw_flow_alpha().unwrap();
        for i in 2..6 {
            let emitted = mover.move_to(&mut stamps, 0.3 * i as f32, 0.0, 1.0).unwrap();
            assert_eq!(emitted, 1);
            let stamp = stamps.last().unwrap();
            // Placed at the segment midpoint with reduced alpha
            assert!((stamp.x - 0.3 * i as f32 + 0.15).abs() < 0.001);
            assert!(stamp.alpha < draw_alpha);
            assert!((mover.residual().unwrap() - 0.85).abs() < 0.001);
        }
        assert_eq!(
            mover.last_stamp_position(),
            Some(Vec2::new(0.3 * 5.0, 0.0))
        );
    }

    #[test]
    fn test_short_segments_owed_without_fill() {
        let settings = StrokeSettings::new(10.0, 0.5, 0.0, 1.0, false);
        let options = TipOptions {
            fill_short_segments: false,
            ..Default::default()
        };
        let mut mover = started(settings, options);
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 0.3, 0.0, 1.0).unwrap();
        assert_eq!(stamps.len(), 1);

        // 0.7 owed: two short moves only consume it
        assert_eq!(mover.move_to(&mut stamps, 0.6, 0.0, 1.0).unwrap(), 0);
        assert!((mover.residual().unwrap() - 0.4).abs() < 0.001);
        assert_eq!(mover.move_to(&mut stamps, 0.9, 0.0, 1.0).unwrap(), 0);
        assert!((mover.residual().unwrap() - 0.1).abs() < 0.001);
        assert_eq!(mover.last_stamp_position(), Some(Vec2::new(0.9, 0.0)));

        // The next move covers the remaining distance and stamps again
        assert_eq!(mover.move_to(&mut stamps, 1.2, 0.0, 1.0).unwrap(), 1);
        assert!((stamps[1].x - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_short_segments_not_filled_when_spaced() {
        let settings = StrokeSettings::new(10.0, 0.5, 0.0, 4.0, false);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(stamps.len(), 1);

        assert_eq!(mover.move_to(&mut stamps, 1.5, 0.0, 1.0).unwrap(), 0);
        assert_eq!(stamps.len(), 1);
    }

    #[test]
    fn test_pressure_drives_radius() {
        let settings = StrokeSettings::new(10.0, 1.0, 0.0, 2.0, false);
        let mut mover = BrushTipMover::new(
            TipOptions::default(),
            alpha_for_n_blends,
            SequenceRandom::new(vec![0.5]),
        );
        mover.reset(0.0, 0.0, 0.0, &settings).unwrap();
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 100.0, 0.0, 1.0).unwrap();

        assert!(stamps[0].radius < 0.01);
        for pair in stamps.windows(2) {
            assert!(pair[1].radius > pair[0].radius);
        }
        // Radius follows pressure linearly along the straight segment
        for stamp in &stamps {
            assert!((stamp.radius - stamp.x * 0.1).abs() < 0.01);
        }
    }

    #[test]
    fn test_relative_spacing_scales_with_radius() {
        let settings = StrokeSettings::new(10.0, 1.0, 0.0, 0.5, true);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 100.0, 0.0, 1.0).unwrap();

        assert!(stamps.len() >= 19 && stamps.len() <= 21);
        for pair in stamps.windows(2) {
            assert!((pair[0].distance_to(&pair[1]) - 5.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_scatter_stays_within_offset() {
        let settings = StrokeSettings::new(10.0, 1.0, 0.3, 0.25, true);
        let mut mover = BrushTipMover::new(TipOptions::default(), alpha_for_n_blends, seeded(5));
        mover.reset(0.0, 0.0, 1.0, &settings).unwrap();
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 200.0, 0.0, 1.0).unwrap();

        assert!(!stamps.is_empty());
        // Path runs along the x axis; jitter is bounded by scatter * radius
        assert!(stamps.iter().all(|s| s.y.abs() <= 3.0 + 0.001));
        assert!(stamps.iter().any(|s| s.y.abs() > 0.001));
    }

    #[test]
    fn test_random_rotation_range() {
        let options = TipOptions {
            random_rotation: true,
            ..Default::default()
        };
        let mut mover = BrushTipMover::new(options, alpha_for_n_blends, seeded(11));
        mover
            .reset(0.0, 0.0, 1.0, &StrokeSettings::default())
            .unwrap();
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 50.0, 50.0, 1.0).unwrap();

        assert!(
            stamps
                .iter()
                .all(|s| (0.0..std::f32::consts::TAU).contains(&s.rotation))
        );
        assert!(stamps.iter().any(|s| s.rotation > 0.0));
    }

    #[test]
    fn test_smoothing_curves_continuing_stroke() {
        let settings = StrokeSettings::new(2.0, 1.0, 0.0, 1.0, false);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        mover.move_to(&mut stamps, 40.0, 0.0, 1.0).unwrap();
        let before = stamps.len();

        // A shallow turn is smoothed: the curve leaves heading along +x, so
        // early stamps of the second segment stay below the straight chord
        mover.move_to(&mut stamps, 80.0, 20.0, 1.0).unwrap();
        let second = &stamps[before..];
        assert!(!second.is_empty());
        let below_chord = second
            .iter()
            .filter(|s| s.x > 45.0 && s.x < 75.0)
            .all(|s| s.y < (s.x - 40.0) * 0.5);
        assert!(below_chord);
    }

    #[test]
    fn test_spacing_conservation_around_corners() {
        let settings = StrokeSettings::new(8.0, 1.0, 0.0, 3.0, false);
        let mut mover = started(settings, TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();

        // Right-angle turns are too sharp to smooth, so each leg stays straight
        let path = [(40.0, 0.0), (40.0, 30.0), (0.0, 30.0), (0.0, 55.5)];
        for &(x, y) in &path {
            mover.move_to(&mut stamps, x, y, 1.0).unwrap();
        }

        // Every stamp accounts for one spacing of travel, minus what is
        // still owed; the last leg stops just short of its end point
        let traveled = 40.0 + 30.0 + 40.0 + 25.5;
        let covered = stamps.len() as f32 * 3.0 - mover.residual().unwrap();
        assert!(
            (covered - traveled).abs() < 0.01,
            "covered {} of {}",
            covered,
            traveled
        );
    }

    #[test]
    fn test_options_fixed_for_stroke() {
        let mut mover = started(StrokeSettings::default(), TipOptions::default());
        let mut stamps: Vec<Stamp> = Vec::new();
        mover.move_to(&mut stamps, 10.0, 0.0, 1.0).unwrap();

        let options = TipOptions {
            random_rotation: true,
            ..Default::default()
        };
        mover.set_options(options);
        assert!(mover.is_active());
        assert_eq!(mover.options(), options);

        mover.move_to(&mut stamps, 20.0, 0.0, 1.0).unwrap();
        assert!(stamps.len() > 10);
        assert!(stamps.iter().all(|s| s.rotation == 0.0));

        // The next stroke picks up the new options
        mover.reset(0.0, 0.0, 1.0, &StrokeSettings::default()).unwrap();
        let mut next: Vec<Stamp> = Vec::new();
        mover.move_to(&mut next, 10.0, 0.0, 1.0).unwrap();
        assert!(!next.is_empty());
        assert!(next.iter().all(|s| s.rotation > 0.0));
    }
}
