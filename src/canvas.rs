use std::ops::Range;

use crate::error::{SlitscanError, SlitscanResult};

/// Output raster: RGBA8, row-major, zero until written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Copies a rectangle of `src` (RGBA8, `src_width` pixels per row) into a
    /// same-sized rectangle of the canvas. Row/column ranges are half-open
    /// pixel indices; mismatched shapes or out-of-bounds rects are errors,
    /// never silent clips.
    pub fn write_rect(
        &mut self,
        dst_rows: Range<usize>,
        dst_cols: Range<usize>,
        src: &[u8],
        src_width: usize,
        src_rows: Range<usize>,
        src_cols: Range<usize>,
    ) -> SlitscanResult<()> {
        if dst_rows.len() != src_rows.len() || dst_cols.len() != src_cols.len() {
            return Err(SlitscanError::geometry(format!(
                "write_rect shape mismatch: dst {}x{}, src {}x{}",
                dst_rows.len(),
                dst_cols.len(),
                src_rows.len(),
                src_cols.len()
            )));
        }
        if dst_rows.end > self.height as usize || dst_cols.end > self.width as usize {
            return Err(SlitscanError::geometry(format!(
                "write_rect rows {:?} cols {:?} exceed canvas {}x{}",
                dst_rows, dst_cols, self.width, self.height
            )));
        }
        if src_cols.end > src_width || src_rows.end * src_width * 4 > src.len() {
            return Err(SlitscanError::geometry(
                "write_rect source rect exceeds source frame",
            ));
        }

        let canvas_width = self.width as usize;
        for (dr, sr) in dst_rows.zip(src_rows) {
            let dst_off = (dr * canvas_width + dst_cols.start) * 4;
            let src_off = (sr * src_width + src_cols.start) * 4;
            let n = dst_cols.len() * 4;
            self.data[dst_off..dst_off + n].copy_from_slice(&src[src_off..src_off + n]);
        }
        Ok(())
    }
}
