/// Approximate length of the straight pieces a smoothed stroke segment is split into.
pub const LINE_SEGMENT_LENGTH: f32 = 5.0;

/// Parameter extent walked along each smoothed segment. The end point itself is
/// reached by the first piece of the next segment.
pub const SUBDIVISION_EXTENT: f32 = 0.99999;

/// Stamps are never placed closer than one pixel apart.
pub const MIN_STAMP_SPACING: f32 = 1.0;

/// Short-segment fill steps smaller than diameter / this are ignored.
pub const SHORT_STEP_SCALE: f32 = 100_000.0;

/// Weight of the previous direction and of the raw displacement when the
/// smoothing control point continues the previous heading.
pub const SMOOTHING_WEIGHT: f32 = 0.25;

/// Fraction of the segment length the displacement must project onto the
/// previous direction before smoothing kicks in.
pub const SMOOTHING_THRESHOLD: f32 = 0.5;
