use crate::geometry::SliceGeometry;
use crate::source::SourceVideoInfo;

/// Checkpoint hooks for one compositing run, injected so the core stays free
/// of printing side effects. All methods default to no-ops.
pub trait RunObserver {
    fn run_started(&mut self, _run: &str, _info: &SourceVideoInfo, _geometry: &SliceGeometry) {}

    /// Called after a frame's slice has been written and cursors advanced.
    /// `frame_index` is the 1-based index in arrival order.
    fn frame_accepted(&mut self, _run: &str, _frame_index: u64, _accepted: u64) {}

    fn run_complete(&mut self, _run: &str, _accepted: u64) {}
}

/// Forwards checkpoints to `tracing` events.
#[derive(Debug, Default)]
pub struct TraceObserver;

impl RunObserver for TraceObserver {
    fn run_started(&mut self, run: &str, info: &SourceVideoInfo, geometry: &SliceGeometry) {
        tracing::info!(
            run,
            frames = info.frame_count,
            source_w = info.width,
            source_h = info.height,
            thickness = geometry.thickness,
            slices = geometry.slices,
            stride = geometry.stride,
            canvas_w = geometry.canvas_width,
            canvas_h = geometry.canvas_height,
            "run started"
        );
    }

    fn frame_accepted(&mut self, run: &str, frame_index: u64, accepted: u64) {
        tracing::debug!(run, frame_index, accepted, "frame accepted");
    }

    fn run_complete(&mut self, run: &str, accepted: u64) {
        tracing::info!(run, accepted, "run complete");
    }
}

/// Discards all checkpoints.
#[derive(Debug, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {}
