//! Stroke smoothing with a single quadratic control point per segment

use glam::Vec2;

use crate::constants::{SMOOTHING_THRESHOLD, SMOOTHING_WEIGHT};

/// Control point of the quadratic curve from `position` to `position + displacement`.
///
/// Defaults to the midpoint, which yields a straight line. When the new
/// displacement keeps heading roughly along `direction`, the control point is
/// pulled towards that heading so consecutive segments join smoothly.
pub(crate) fn control_point(position: Vec2, direction: Vec2, displacement: Vec2, length: f32) -> Vec2 {
    if displacement.dot(direction) > length * SMOOTHING_THRESHOLD {
        position + direction * (length * SMOOTHING_WEIGHT) + displacement * SMOOTHING_WEIGHT
    } else {
        position + displacement * 0.5
    }
}

/// Point on the quadratic Bezier curve (`start`, `control`, `end`) at parameter `t`
#[inline]
pub(crate) fn quadratic_point(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    start * (inv * inv) + control * (2.0 * t * inv) + end * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_point_defaults_to_midpoint() {
        let control = control_point(Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 4.0), 10.77);
        assert!((control - Vec2::new(5.0, 2.0)).length() < 0.0001);
    }

    #[test]
    fn test_control_point_continues_direction() {
        let displacement = Vec2::new(10.0, 10.0);
        let length = displacement.length();
        let control = control_point(Vec2::ZERO, Vec2::X, displacement, length);

        assert!((control.x - (length * 0.25 + 2.5)).abs() < 0.0001);
        assert!((control.y - 2.5).abs() < 0.0001);
    }

    #[test]
    fn test_sharp_turn_is_not_smoothed() {
        // Turning back on ourselves projects negatively onto the direction
        let control = control_point(Vec2::ZERO, Vec2::X, Vec2::new(-8.0, 0.0), 8.0);
        assert!((control - Vec2::new(-4.0, 0.0)).length() < 0.0001);
    }

    #[test]
    fn test_quadratic_point_endpoints() {
        let start = Vec2::new(1.0, 2.0);
        let control = Vec2::new(5.0, 9.0);
        let end = Vec2::new(10.0, 3.0);

        assert!((quadratic_point(start, control, end, 0.0) - start).length() < 0.0001);
        assert!((quadratic_point(start, control, end, 1.0) - end).length() < 0.0001);

        // At t = 0.5 the point is a quarter start, half control, quarter end
        let mid = quadratic_point(start, control, end, 0.5);
        let expected = start * 0.25 + control * 0.5 + end * 0.25;
        assert!((mid - expected).length() < 0.0001);
    }
}
