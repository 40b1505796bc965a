use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::error::{SlitscanError, SlitscanResult};

/// Fixed facts about the source, probed once before any frame is pulled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceVideoInfo {
    pub frame_count: u64,
    pub width: u32,
    pub height: u32,
}

/// One decoded frame, RGB8 row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Synchronous pull source: frames arrive one at a time, in decode order, and
/// may be dropped by the caller as soon as every consumer has seen them.
pub trait FrameSource {
    fn info(&self) -> &SourceVideoInfo;

    /// Next frame, or `None` at end of stream. A single short/failed frame
    /// read is end-of-stream, not an error.
    fn next_frame(&mut self) -> SlitscanResult<Option<FrameRgb>>;
}

/// Production source: `ffprobe` for stream facts, then one long-running
/// `ffmpeg` process piping raw RGB24 frames to stdout.
pub struct FfmpegFrameSource {
    info: SourceVideoInfo,
    child: Child,
    stdout: ChildStdout,
    source_path: PathBuf,
}

impl FfmpegFrameSource {
    pub fn open(source_path: &Path) -> SlitscanResult<Self> {
        let info = probe_video(source_path)?;
        if info.frame_count == 0 {
            return Err(SlitscanError::source(format!(
                "'{}' yields no frames",
                source_path.display()
            )));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(source_path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| {
                SlitscanError::source(format!("failed to run ffmpeg for frame decode: {e}"))
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SlitscanError::source("ffmpeg stdout pipe missing"))?;

        Ok(Self {
            info,
            child,
            stdout,
            source_path: source_path.to_path_buf(),
        })
    }
}

impl FrameSource for FfmpegFrameSource {
    fn info(&self) -> &SourceVideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> SlitscanResult<Option<FrameRgb>> {
        let len = self.info.width as usize * self.info.height as usize * 3;
        let mut data = vec![0u8; len];
        match self.stdout.read_exact(&mut data) {
            Ok(()) => Ok(Some(FrameRgb {
                width: self.info.width,
                height: self.info.height,
                data,
            })),
            // Short final frame or closed pipe: the stream is over.
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(SlitscanError::source(format!(
                "frame read from '{}' failed: {e}",
                self.source_path.display()
            ))),
        }
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn probe_video(source_path: &Path) -> SlitscanResult<SourceVideoInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        nb_frames: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| SlitscanError::source(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(SlitscanError::source(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| SlitscanError::source(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| SlitscanError::source("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| SlitscanError::source("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| SlitscanError::source("missing video height from ffprobe"))?;

    // Container-dependent: prefer the stream's own frame count, fall back to
    // duration * frame rate.
    let frame_count = match video_stream
        .nb_frames
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
    {
        Some(n) => n,
        None => {
            let fps = parse_ff_ratio(video_stream.r_frame_rate.as_deref().unwrap_or("0/1"))
                .map(|(num, den)| f64::from(num) / f64::from(den))
                .unwrap_or(0.0);
            let duration = parsed
                .format
                .as_ref()
                .and_then(|f| f.duration.as_ref())
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(0.0);
            (duration * fps).floor().max(0.0) as u64
        }
    };

    Ok(SourceVideoInfo {
        frame_count,
        width,
        height,
    })
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let a = parts.next()?.parse::<u32>().ok()?;
    let b = parts.next()?.parse::<u32>().ok()?;
    if b == 0 {
        return None;
    }
    Some((a, b))
}

/// Deterministic in-memory source for tests and debugging. Every byte is a
/// pure function of (frame, x, y, channel), so expected slices can be
/// recomputed independently by assertions.
pub struct SyntheticFrameSource {
    info: SourceVideoInfo,
    next: u64,
}

impl SyntheticFrameSource {
    pub fn new(frame_count: u64, width: u32, height: u32) -> Self {
        Self {
            info: SourceVideoInfo {
                frame_count,
                width,
                height,
            },
            next: 0,
        }
    }

    /// The pattern generator; `frame` is 0-based decode order.
    pub fn pixel(frame: u64, x: u32, y: u32, channel: u32) -> u8 {
        ((u64::from(x) * 3 + u64::from(y) * 7 + frame * 11 + u64::from(channel) * 29) % 256) as u8
    }
}

impl FrameSource for SyntheticFrameSource {
    fn info(&self) -> &SourceVideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> SlitscanResult<Option<FrameRgb>> {
        if self.next >= self.info.frame_count {
            return Ok(None);
        }
        let frame = self.next;
        self.next += 1;

        let (w, h) = (self.info.width, self.info.height);
        let mut data = Vec::with_capacity(w as usize * h as usize * 3);
        for y in 0..h {
            for x in 0..w {
                for c in 0..3 {
                    data.push(Self::pixel(frame, x, y, c));
                }
            }
        }
        Ok(Some(FrameRgb {
            width: w,
            height: h,
            data,
        }))
    }
}
