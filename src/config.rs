use crate::error::{SlitscanError, SlitscanResult};
use crate::source::SourceVideoInfo;

/// Default slice thickness in pixels when no thickness mode is requested.
pub const DEFAULT_THICKNESS: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScanAxis {
    /// Slices stack left-to-right; the scan axis is the source width.
    Horizontal,
    /// Slices stack top-to-bottom; the scan axis is the source height.
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScanDirection {
    Forward,
    Reverse,
}

/// One slit-scan run, fully enumerated.
///
/// Thickness is derived from exactly one active mode, in precedence order:
/// explicit `thickness`, then `slice_count`, then `traverse`, then
/// [`DEFAULT_THICKNESS`]. `scan_line` is not a thickness mode; it only
/// overrides the initial read position and composes with `traverse`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanConfig {
    pub axis: ScanAxis,
    pub direction: ScanDirection,
    /// Explicit slice thickness in pixels.
    pub thickness: Option<u32>,
    /// Emit exactly this many slices, down-sampling frames to match.
    pub slice_count: Option<u32>,
    /// Custom initial read position on the source scan axis.
    pub scan_line: Option<u32>,
    /// Move the read window across the source frame as slices accumulate.
    pub traverse: bool,
    /// Signed per-slice displacement of the off-axis print window.
    pub shift: i64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            axis: ScanAxis::Horizontal,
            direction: ScanDirection::Forward,
            thickness: None,
            slice_count: None,
            scan_line: None,
            traverse: false,
            shift: 0,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> SlitscanResult<()> {
        if self.thickness == Some(0) {
            return Err(SlitscanError::config("thickness must be > 0"));
        }
        if self.slice_count == Some(0) {
            return Err(SlitscanError::config("slice count must be > 0"));
        }
        Ok(())
    }

    /// Source dimension along the scan axis.
    pub fn scan_axis_dim(&self, info: &SourceVideoInfo) -> u32 {
        match self.axis {
            ScanAxis::Horizontal => info.width,
            ScanAxis::Vertical => info.height,
        }
    }

    /// Source dimension perpendicular to the scan axis.
    pub fn off_axis_dim(&self, info: &SourceVideoInfo) -> u32 {
        match self.axis {
            ScanAxis::Horizontal => info.height,
            ScanAxis::Vertical => info.width,
        }
    }
}
