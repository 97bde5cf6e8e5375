use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use latency_clock_rs::logger;
use latency_clock_rs::timestamp_pipeline::{
    OverlayGeometry, OverlayPainter, RgbFrame, to_ppm_bytes,
};

/// Paint a clock overlay into a black frame and write it as binary PPM.
///
/// Produces the same bit pattern a live overlay encoder stamps onto frames,
/// which makes the output a convenient fixture for exercising the decoder.
#[derive(Parser)]
#[command(name = "timeoverlay-generate", version)]
struct Args {
    /// Where to write the generated frame (binary PPM)
    output: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Frame height in pixels
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Buffer timestamp in nanoseconds
    #[arg(long, default_value_t = 0)]
    buffer_time: u64,

    /// Stream time in nanoseconds
    #[arg(long, default_value_t = 0)]
    stream_time: u64,

    /// Running time in nanoseconds
    #[arg(long, default_value_t = 0)]
    running_time: u64,

    /// Pipeline clock reading in nanoseconds
    #[arg(long, default_value_t = 0)]
    clock_time: u64,

    /// Pipeline clock reading at render time in nanoseconds
    #[arg(long, default_value_t = 0)]
    render_time: u64,

    /// Wall clock reading at render time in nanoseconds
    #[arg(long, default_value_t = 0)]
    render_realtime: u64,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    let mut frame = RgbFrame::filled(args.width, args.height, 0)?;
    let painter = OverlayPainter::new(OverlayGeometry::default())?;
    let values = [
        args.buffer_time,
        args.stream_time,
        args.running_time,
        args.clock_time,
        args.render_time,
        args.render_realtime,
    ];
    painter.paint_clocks(&mut frame, &values)?;

    let data = to_ppm_bytes(&frame)?;
    std::fs::write(&args.output, &data)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        width = args.width,
        height = args.height,
        "Frame generated"
    );

    Ok(())
}
