use crate::config::{DEFAULT_THICKNESS, ScanAxis, ScanConfig};
use crate::error::{SlitscanError, SlitscanResult};
use crate::source::SourceVideoInfo;

/// Derived sizing for one run: slice thickness, how many slices get emitted,
/// the frame down-sampling stride, and the output canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SliceGeometry {
    /// Slice thickness in pixels along the scan axis.
    pub thickness: u32,
    /// Number of slices the canvas is sized for.
    pub slices: u64,
    /// A frame is accepted when its 1-based index is a multiple of this.
    pub stride: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl SliceGeometry {
    /// Pure sizing pass; runs once per configuration before any frame is read.
    pub fn compute(config: &ScanConfig, info: &SourceVideoInfo) -> SlitscanResult<Self> {
        config.validate()?;
        if info.frame_count == 0 {
            return Err(SlitscanError::geometry("source reports zero frames"));
        }

        let scan_dim = config.scan_axis_dim(info);
        let off_dim = config.off_axis_dim(info);
        if scan_dim == 0 || off_dim == 0 {
            return Err(SlitscanError::geometry(format!(
                "source dimensions {}x{} are degenerate",
                info.width, info.height
            )));
        }

        // Thickness mode precedence: explicit pixels, slice count, traverse,
        // fixed default. scan_line is not a mode; it only moves the read start.
        let thickness = if let Some(px) = config.thickness {
            px
        } else if let Some(n) = config.slice_count {
            scan_dim.div_ceil(n)
        } else if config.traverse {
            u32::try_from(u64::from(scan_dim).div_ceil(info.frame_count)).unwrap_or(scan_dim)
        } else {
            DEFAULT_THICKNESS
        };
        if thickness == 0 {
            return Err(SlitscanError::geometry("derived thickness is zero"));
        }

        // Down-sampling only applies when slice count picked the thickness.
        let stride = match (config.thickness, config.slice_count) {
            (None, Some(n)) => info.frame_count.div_ceil(u64::from(n)),
            _ => 1,
        };

        let mut slices = match config.slice_count {
            Some(n) => u64::from(n),
            None => info.frame_count,
        };
        // Traversing with an explicit thickness may overread the source; emit
        // fewer slices instead of letting the read window run past the edge.
        if config.traverse
            && config.thickness.is_some()
            && u64::from(thickness) * info.frame_count > u64::from(scan_dim)
        {
            slices = u64::from(scan_dim / thickness);
        }
        if slices == 0 {
            return Err(SlitscanError::geometry(format!(
                "thickness {thickness} leaves no room for a single slice"
            )));
        }

        let along = slices * u64::from(thickness);
        let across = u64::from(off_dim) + (slices - 1) * config.shift.unsigned_abs();
        let (w, h) = match config.axis {
            ScanAxis::Horizontal => (along, across),
            ScanAxis::Vertical => (across, along),
        };
        let canvas_width = u32::try_from(w)
            .map_err(|_| SlitscanError::geometry(format!("canvas width {w} overflows u32")))?;
        let canvas_height = u32::try_from(h)
            .map_err(|_| SlitscanError::geometry(format!("canvas height {h} overflows u32")))?;

        Ok(Self {
            thickness,
            slices,
            stride,
            canvas_width,
            canvas_height,
        })
    }

    /// Canvas length along the scan axis (always `slices * thickness`).
    pub fn along_scan_len(&self, axis: ScanAxis) -> u32 {
        match axis {
            ScanAxis::Horizontal => self.canvas_width,
            ScanAxis::Vertical => self.canvas_height,
        }
    }

    /// Canvas length perpendicular to the scan axis.
    pub fn off_axis_len(&self, axis: ScanAxis) -> u32 {
        match axis {
            ScanAxis::Horizontal => self.canvas_height,
            ScanAxis::Vertical => self.canvas_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanDirection;

    fn info_640x480(frames: u64) -> SourceVideoInfo {
        SourceVideoInfo {
            frame_count: frames,
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn default_mode_uses_fixed_thickness() {
        let g = SliceGeometry::compute(&ScanConfig::default(), &info_640x480(100)).unwrap();
        assert_eq!(g.thickness, DEFAULT_THICKNESS);
        assert_eq!(g.slices, 100);
        assert_eq!(g.stride, 1);
        assert_eq!(g.canvas_width, 600);
        assert_eq!(g.canvas_height, 480);
    }

    #[test]
    fn explicit_pixels_sizes_canvas_exactly() {
        let cfg = ScanConfig {
            thickness: Some(4),
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.thickness, 4);
        assert_eq!(g.canvas_width, 400);
        assert_eq!(g.canvas_height, 480);
    }

    #[test]
    fn slice_count_divides_scan_axis_and_strides_frames() {
        let cfg = ScanConfig {
            slice_count: Some(10),
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.thickness, 64);
        assert_eq!(g.slices, 10);
        assert_eq!(g.stride, 10);
        assert_eq!(g.canvas_width, 640);
    }

    #[test]
    fn explicit_pixels_wins_over_slice_count_but_count_still_limits_slices() {
        let cfg = ScanConfig {
            thickness: Some(8),
            slice_count: Some(20),
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.thickness, 8);
        assert_eq!(g.slices, 20);
        assert_eq!(g.stride, 1);
        assert_eq!(g.canvas_width, 160);
    }

    #[test]
    fn traverse_divides_scan_axis_by_frame_count() {
        let cfg = ScanConfig {
            traverse: true,
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.thickness, 7); // ceil(640 / 100)
        assert_eq!(g.slices, 100);
    }

    #[test]
    fn traverse_with_explicit_thickness_clamps_slices_to_source() {
        let cfg = ScanConfig {
            thickness: Some(8),
            traverse: true,
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.slices, 80); // floor(640 / 8), not 100
        assert_eq!(g.canvas_width, 640);
    }

    #[test]
    fn traverse_thicker_than_source_is_invalid() {
        let cfg = ScanConfig {
            thickness: Some(700),
            traverse: true,
            ..ScanConfig::default()
        };
        let err = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap_err();
        assert!(matches!(err, SlitscanError::Geometry(_)));
    }

    #[test]
    fn vertical_swaps_canvas_axes() {
        let cfg = ScanConfig {
            axis: ScanAxis::Vertical,
            thickness: Some(4),
            direction: ScanDirection::Forward,
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.canvas_height, 400);
        assert_eq!(g.canvas_width, 640);
        assert_eq!(g.along_scan_len(cfg.axis), 400);
        assert_eq!(g.off_axis_len(cfg.axis), 640);
    }

    #[test]
    fn shift_widens_off_axis_by_slices_minus_one() {
        let cfg = ScanConfig {
            thickness: Some(4),
            slice_count: Some(5),
            shift: 2,
            ..ScanConfig::default()
        };
        let g = SliceGeometry::compute(&cfg, &info_640x480(100)).unwrap();
        assert_eq!(g.slices, 5);
        assert_eq!(g.canvas_height, 480 + 4 * 2);

        let negative = ScanConfig { shift: -2, ..cfg };
        let g = SliceGeometry::compute(&negative, &info_640x480(100)).unwrap();
        assert_eq!(g.canvas_height, 480 + 4 * 2);
    }

    #[test]
    fn zero_frames_fails_fast() {
        let err = SliceGeometry::compute(&ScanConfig::default(), &info_640x480(0)).unwrap_err();
        assert!(matches!(err, SlitscanError::Geometry(_)));
    }
}
