use std::path::Path;

use crate::canvas::Canvas;
use crate::error::{SlitscanError, SlitscanResult};

/// Accepts a finished canvas and writes it somewhere. Ownership of the pixel
/// buffer stays with the caller; the sink only reads it.
pub trait ImageSink {
    fn write(&self, canvas: &Canvas, path: &Path) -> SlitscanResult<()>;
}

/// PNG file sink.
#[derive(Debug, Default)]
pub struct PngSink;

impl ImageSink for PngSink {
    fn write(&self, canvas: &Canvas, path: &Path) -> SlitscanResult<()> {
        image::save_buffer_with_format(
            path,
            canvas.data(),
            canvas.width(),
            canvas.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| SlitscanError::sink(format!("write png '{}': {e}", path.display())))
    }
}
