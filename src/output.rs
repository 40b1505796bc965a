use std::path::{Path, PathBuf};

use crate::config::{ScanAxis, ScanConfig, ScanDirection};
use crate::error::{SlitscanError, SlitscanResult};
use crate::geometry::SliceGeometry;

/// Deterministic output filename: base name, axis tag, the mode tags that are
/// active, then a `(a,b)px` suffix giving thickness and shift in axis order
/// (x first, so horizontal runs lead with thickness).
pub fn output_file_name(base: &str, config: &ScanConfig, geometry: &SliceGeometry) -> String {
    let mut name = String::from(base);
    match config.axis {
        ScanAxis::Horizontal => name.push_str("-horizontal"),
        ScanAxis::Vertical => name.push_str("-vertical"),
    }
    if config.traverse {
        name.push_str("-traverse");
    }
    if config.direction == ScanDirection::Reverse {
        name.push_str("-reverse");
    }
    if config.slice_count.is_some() {
        name.push_str("-sliced");
    }
    if config.scan_line.is_some() {
        name.push_str("-line");
    }
    let px = match config.axis {
        ScanAxis::Horizontal => format!("({},{})px", geometry.thickness, config.shift),
        ScanAxis::Vertical => format!("({},{})px", config.shift, geometry.thickness),
    };
    format!("{name}-{px}.png")
}

/// Creates the output directory if needed; a pre-existing directory is fine.
pub fn ensure_output_dir(dir: &Path) -> SlitscanResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| SlitscanError::sink(format!("create output dir '{}': {e}", dir.display())))
}

/// Base name for outputs: the explicit override, or the input file stem.
pub fn base_name(custom: Option<&str>, input: &Path) -> String {
    match custom {
        Some(name) => name.to_string(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "slitscan".to_string()),
    }
}

/// Default output directory when none is given.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
