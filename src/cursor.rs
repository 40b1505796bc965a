use std::ops::Range;

use crate::config::{ScanConfig, ScanDirection};
use crate::error::{SlitscanError, SlitscanResult};
use crate::geometry::SliceGeometry;
use crate::source::SourceVideoInfo;

/// Half-open `[start, end)` interval on one pixel axis. Signed so a reverse
/// print window can walk off the low edge and be caught by `wants_more`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    pub fn with_len(start: i64, len: i64) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn shift(&mut self, delta: i64) {
        self.start += delta;
        self.end += delta;
    }

    /// Converts to an index range, failing if either bound is negative.
    pub fn to_range(&self) -> SlitscanResult<Range<usize>> {
        let start = usize::try_from(self.start)
            .map_err(|_| SlitscanError::geometry(format!("window start {} < 0", self.start)))?;
        let end = usize::try_from(self.end)
            .map_err(|_| SlitscanError::geometry(format!("window end {} < 0", self.end)))?;
        Ok(start..end)
    }
}

/// The per-run cursor windows: where the next slice prints on the canvas
/// (along-scan and off-axis) and where it reads from the source frame.
///
/// Initialized once before the first frame, then mutated exactly once per
/// accepted frame through [`CursorState::advance`]; never reset mid-run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorState {
    /// Print position along the scan axis; length is always the thickness.
    pub print: Window,
    /// Off-axis print position; length is fixed at source off-axis dim - 1.
    pub off_axis: Window,
    /// Read position on the source frame; length is always the thickness.
    pub read: Window,
}

impl CursorState {
    pub fn init(
        config: &ScanConfig,
        info: &SourceVideoInfo,
        geometry: &SliceGeometry,
    ) -> SlitscanResult<Self> {
        let t = i64::from(geometry.thickness);
        let scan_dim = i64::from(config.scan_axis_dim(info));
        let canvas_along = i64::from(geometry.along_scan_len(config.axis));
        let canvas_across = i64::from(geometry.off_axis_len(config.axis));

        let print = match config.direction {
            ScanDirection::Forward => Window::with_len(0, t),
            ScanDirection::Reverse => Window::with_len(canvas_along - t, t),
        };

        // Sliding band one pixel short of the source off-axis extent. Negative
        // shifts anchor at the far edge so the band stays in bounds as it
        // walks back toward zero.
        let band = i64::from(config.off_axis_dim(info)) - 1;
        let off_axis = if config.shift < 0 {
            Window::with_len(canvas_across - band, band)
        } else {
            Window::with_len(0, band)
        };

        let read_start = match config.scan_line {
            Some(line) => i64::from(line),
            None if config.traverse => 0,
            None => (scan_dim - t) / 2,
        };
        let read = Window::with_len(read_start, t);
        if read.start < 0 || read.end > scan_dim {
            return Err(SlitscanError::geometry(format!(
                "read window [{}, {}) exceeds source scan axis {scan_dim}",
                read.start, read.end
            )));
        }

        Ok(Self {
            print,
            off_axis,
            read,
        })
    }

    /// Whether another slice can still be placed. Forward runs stop when the
    /// print window would pass its far bound; reverse runs stop when the
    /// print window would pass zero. Both stop when the read window would
    /// pass the source edge, since traversal walks forward regardless of
    /// print direction.
    pub fn wants_more(
        &self,
        config: &ScanConfig,
        info: &SourceVideoInfo,
        geometry: &SliceGeometry,
    ) -> bool {
        let read_fits = self.read.end <= i64::from(config.scan_axis_dim(info));
        match config.direction {
            ScanDirection::Forward => {
                read_fits && self.print.end <= i64::from(geometry.along_scan_len(config.axis))
            }
            ScanDirection::Reverse => read_fits && self.print.start >= 0,
        }
    }

    /// One cursor step after a slice is written.
    pub fn advance(&mut self, config: &ScanConfig, geometry: &SliceGeometry) {
        let t = i64::from(geometry.thickness);
        match config.direction {
            ScanDirection::Forward => self.print.shift(t),
            ScanDirection::Reverse => self.print.shift(-t),
        }
        if config.shift != 0 {
            self.off_axis.shift(config.shift);
        }
        // Traversal always walks forward across the source, even when the
        // print direction is reversed.
        if config.traverse {
            self.read.shift(t);
        }
    }
}
