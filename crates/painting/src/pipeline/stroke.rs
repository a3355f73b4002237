//! Stroke handling for the painting pipeline

use tracing::debug;

use super::{PipelineError, StrokePipeline, StrokeSummary};
use crate::random::RandomSource;
use crate::surface::SurfaceTarget;

impl<R: RandomSource> StrokePipeline<R> {
    /// Begin a stroke at the given position
    ///
    /// Nothing is drawn until the first `stroke_to`.
    pub fn begin_stroke(
        &mut self,
        stroke_id: u64,
        x: f32,
        y: f32,
        pressure: f32,
    ) -> Result<(), PipelineError> {
        if let Some(current) = self.current_stroke_id {
            return Err(PipelineError::StrokeInProgress(current));
        }

        self.mover.reset(x, y, pressure, &self.config.stroke)?;
        self.current_stroke_id = Some(stroke_id);
        self.stamp_count = 0;

        debug!(
            "StrokePipeline::begin_stroke: stroke {} at ({:.1}, {:.1}) with '{}'",
            stroke_id, x, y, self.config.name
        );
        Ok(())
    }

    /// Continue a stroke with new input
    ///
    /// x, y are in surface pixel coordinates. Returns the number of stamps drawn.
    pub fn stroke_to(&mut self, x: f32, y: f32, pressure: f32) -> Result<usize, PipelineError> {
        let mut target = SurfaceTarget::new(&mut self.surface, self.color);
        let emitted = self.mover.move_to(&mut target, x, y, pressure)?;
        self.stamp_count += emitted;
        Ok(emitted)
    }

    /// End the current stroke
    ///
    /// Returns None if no stroke was in progress.
    pub fn end_stroke(&mut self) -> Option<StrokeSummary> {
        let stroke_id = self.current_stroke_id.take()?;
        self.mover.end();

        let summary = StrokeSummary {
            stroke_id,
            stamp_count: std::mem::take(&mut self.stamp_count),
        };
        debug!(
            "StrokePipeline::end_stroke: stroke {} drew {} stamps",
            summary.stroke_id, summary.stamp_count
        );
        Some(summary)
    }

    /// Cancel the current stroke
    ///
    /// Note: stamps already blended onto the surface are NOT reverted.
    pub fn cancel_stroke(&mut self) {
        if let Some(stroke_id) = self.current_stroke_id.take() {
            debug!("StrokePipeline::cancel_stroke: stroke {}", stroke_id);
        }
        self.mover.end();
        self.stamp_count = 0;
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.current_stroke_id.is_some()
    }
}
