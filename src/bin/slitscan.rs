use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use slitscan::{
    FfmpegFrameSource, FrameCompositor, FrameSource as _, ImageSink as _, PngSink, RunObserver as _,
    ScanAxis, ScanConfig, ScanDirection, SliceGeometry, TraceObserver, base_name,
    default_output_dir, ensure_output_dir, output_file_name, run_compositors,
};

#[derive(Parser, Debug)]
#[command(name = "slitscan", version)]
struct Cli {
    /// Input video file (requires `ffmpeg` and `ffprobe` on PATH).
    #[arg(long)]
    input: PathBuf,

    /// Base name for output images; defaults to the input file stem.
    #[arg(long)]
    name: Option<String>,

    /// Output directory; defaults to ./output, created on demand.
    #[arg(long)]
    path: Option<PathBuf>,

    /// Slice thickness in pixels.
    #[arg(short, long)]
    pixels: Option<u32>,

    /// Signed per-slice off-axis shift in pixels.
    #[arg(short, long, default_value_t = 0)]
    offset: i64,

    /// Emit exactly this many slices, down-sampling frames to match.
    #[arg(short = 'c', long = "slicecount")]
    slice_count: Option<u32>,

    /// Fix the initial read position on the scan axis.
    #[arg(long)]
    line: Option<u32>,

    /// Scan vertically (slices stack top-to-bottom).
    #[arg(short, long)]
    vertical: bool,

    /// Traverse the read position across the frame over time.
    #[arg(short, long)]
    traverse: bool,

    /// Fill the canvas from its far end, working backward.
    #[arg(short, long)]
    reverse: bool,

    /// Verbose per-run reporting.
    #[arg(short, long)]
    info: bool,

    /// Produce the four canonical axis x traverse variants in one decode pass.
    #[arg(short, long)]
    batch: bool,
}

impl Cli {
    fn scan_config(&self, vertical: bool, traverse: bool) -> ScanConfig {
        ScanConfig {
            axis: if vertical {
                ScanAxis::Vertical
            } else {
                ScanAxis::Horizontal
            },
            direction: if self.reverse {
                ScanDirection::Reverse
            } else {
                ScanDirection::Forward
            },
            thickness: self.pixels,
            slice_count: self.slice_count,
            scan_line: self.line,
            traverse,
            shift: self.offset,
        }
    }

    fn configs(&self) -> Vec<ScanConfig> {
        if self.batch {
            [(false, false), (false, true), (true, false), (true, true)]
                .into_iter()
                .map(|(vertical, traverse)| self.scan_config(vertical, traverse))
                .collect()
        } else {
            vec![self.scan_config(self.vertical, self.traverse)]
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.info {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut source = FfmpegFrameSource::open(&cli.input)
        .with_context(|| format!("open video '{}'", cli.input.display()))?;
    let info = *source.info();
    tracing::info!(
        frames = info.frame_count,
        width = info.width,
        height = info.height,
        "opened video {}",
        cli.input.display()
    );

    let out_dir = cli.path.clone().unwrap_or_else(default_output_dir);
    ensure_output_dir(&out_dir)?;
    let base = base_name(cli.name.as_deref(), &cli.input);

    let mut observer = TraceObserver;
    let mut compositors = Vec::new();
    for config in cli.configs() {
        let geometry = SliceGeometry::compute(&config, &info)
            .with_context(|| format!("size run for {config:?}"))?;
        let file_name = output_file_name(&base, &config, &geometry);
        observer.run_started(&file_name, &info, &geometry);
        compositors.push(FrameCompositor::new(file_name, config, info)?);
    }

    let delivered = run_compositors(&mut source, &mut compositors, &mut observer)?;
    tracing::info!(delivered, "decode pass finished");
    drop(source);

    // One bad output must not stop its siblings from being written.
    let sink = PngSink;
    let total = compositors.len();
    let mut failures = 0usize;
    for compositor in compositors {
        let out_path = out_dir.join(compositor.name());
        let accepted = compositor.accepted_frames();
        let canvas = compositor.into_canvas();
        match sink.write(&canvas, &out_path) {
            Ok(()) => {
                tracing::info!(accepted, "wrote {}", out_path.display());
            }
            Err(e) => {
                failures += 1;
                tracing::error!("failed to write {}: {e}", out_path.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {total} outputs failed");
    }
    Ok(())
}
