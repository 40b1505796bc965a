//! Slit-scan compositing: build one still image from a video by stacking a
//! thin slice of every frame into a growing canvas.
//!
//! The pipeline is a synchronous pull loop. [`SliceGeometry`] sizes the run,
//! [`CursorState`] tracks the print/read windows frame by frame, and a
//! [`FrameCompositor`] consumes a [`FrameSource`] until the canvas is full or
//! the stream ends. [`driver::run_compositors`] shares one decode pass across
//! several compositors for batch output.

#![forbid(unsafe_code)]

pub mod canvas;
pub mod compositor;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod observer;
pub mod output;
pub mod sink;
pub mod source;

pub use canvas::Canvas;
pub use compositor::{FrameCompositor, RunState};
pub use config::{DEFAULT_THICKNESS, ScanAxis, ScanConfig, ScanDirection};
pub use cursor::{CursorState, Window};
pub use driver::run_compositors;
pub use error::{SlitscanError, SlitscanResult};
pub use geometry::SliceGeometry;
pub use observer::{NullObserver, RunObserver, TraceObserver};
pub use output::{base_name, default_output_dir, ensure_output_dir, output_file_name};
pub use sink::{ImageSink, PngSink};
pub use source::{FfmpegFrameSource, FrameRgb, FrameSource, SourceVideoInfo, SyntheticFrameSource};
