use crate::canvas::Canvas;
use crate::config::{ScanAxis, ScanConfig};
use crate::cursor::CursorState;
use crate::error::{SlitscanError, SlitscanResult};
use crate::geometry::SliceGeometry;
use crate::observer::RunObserver;
use crate::source::{FrameRgb, SourceVideoInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Active,
    Complete,
}

/// Consumes one frame stream and assembles one canvas. Owns its canvas and
/// cursor exclusively; several compositors can share a stream without
/// observing each other.
///
/// The state machine is two-state: `Active` until the cursor reports that no
/// further slice fits, then permanently `Complete`. Frames offered while
/// `Complete` are ignored. Frames skipped by the down-sampling stride still
/// advance the 1-based arrival index but mutate nothing else.
pub struct FrameCompositor {
    name: String,
    config: ScanConfig,
    info: SourceVideoInfo,
    geometry: SliceGeometry,
    cursor: CursorState,
    canvas: Canvas,
    state: RunState,
    offered: u64,
    accepted: u64,
    rgba_scratch: Vec<u8>,
}

impl FrameCompositor {
    pub fn new(
        name: impl Into<String>,
        config: ScanConfig,
        info: SourceVideoInfo,
    ) -> SlitscanResult<Self> {
        let geometry = SliceGeometry::compute(&config, &info)?;
        let cursor = CursorState::init(&config, &info, &geometry)?;
        let canvas = Canvas::new(geometry.canvas_width, geometry.canvas_height);
        Ok(Self {
            name: name.into(),
            config,
            info,
            geometry,
            cursor,
            canvas,
            state: RunState::Active,
            offered: 0,
            accepted: 0,
            rgba_scratch: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == RunState::Complete
    }

    pub fn accepted_frames(&self) -> u64 {
        self.accepted
    }

    /// Hands the finished pixel buffer to the caller; no further writes.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Offers the next frame in arrival order.
    pub fn offer_frame(
        &mut self,
        frame: &FrameRgb,
        observer: &mut dyn RunObserver,
    ) -> SlitscanResult<RunState> {
        if self.state == RunState::Complete {
            return Ok(self.state);
        }

        self.offered += 1;
        if !self.offered.is_multiple_of(self.geometry.stride) {
            return Ok(self.state);
        }

        if !self.cursor.wants_more(&self.config, &self.info, &self.geometry) {
            self.state = RunState::Complete;
            observer.run_complete(&self.name, self.accepted);
            return Ok(self.state);
        }

        self.write_slice(frame)?;
        self.cursor.advance(&self.config, &self.geometry);
        self.accepted += 1;
        observer.frame_accepted(&self.name, self.offered, self.accepted);
        Ok(self.state)
    }

    fn write_slice(&mut self, frame: &FrameRgb) -> SlitscanResult<()> {
        if frame.width != self.info.width || frame.height != self.info.height {
            return Err(SlitscanError::source(format!(
                "frame is {}x{}, source reported {}x{}",
                frame.width, frame.height, self.info.width, self.info.height
            )));
        }
        if frame.data.len() != frame.width as usize * frame.height as usize * 3 {
            return Err(SlitscanError::source("frame byte length is not w*h*3"));
        }

        // Frame content changes every call, so the alpha augmentation is
        // per-frame into a reused scratch buffer.
        self.rgba_scratch.clear();
        self.rgba_scratch.reserve(frame.data.len() / 3 * 4);
        for px in frame.data.chunks_exact(3) {
            self.rgba_scratch.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }

        let print = self.cursor.print.to_range()?;
        let off_axis = self.cursor.off_axis.to_range()?;
        let read = self.cursor.read.to_range()?;
        let band = 0..(self.config.off_axis_dim(&self.info) as usize - 1);

        match self.config.axis {
            // Vertical: slices are horizontal strips; print indexes canvas
            // rows, the off-axis band indexes canvas columns.
            ScanAxis::Vertical => self.canvas.write_rect(
                print,
                off_axis,
                &self.rgba_scratch,
                frame.width as usize,
                read,
                band,
            ),
            // Horizontal: the roles swap.
            ScanAxis::Horizontal => self.canvas.write_rect(
                off_axis,
                print,
                &self.rgba_scratch,
                frame.width as usize,
                band,
                read,
            ),
        }
    }
}
