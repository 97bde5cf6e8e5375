use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use latency_clock_rs::logger;
use latency_clock_rs::timestamp_pipeline::{DecodeConfig, GeometryMode, TimestampDecodePipeline};

/// Decode the clock overlay embedded in a captured video frame.
#[derive(Parser)]
#[command(name = "timeoverlay-parse", version)]
struct Args {
    /// Captured frame to decode (binary PPM)
    input: PathBuf,

    /// Decode frames smaller than the clock region instead of rejecting them
    #[arg(long)]
    permissive: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    let mode = if args.permissive {
        GeometryMode::Permissive
    } else {
        GeometryMode::Strict
    };
    let config = DecodeConfig::builder().geometry_mode(mode).build();
    let pipeline = TimestampDecodePipeline::new(config);

    info!(mode = ?pipeline.config().geometry_mode, "Decode pipeline initialized");

    let mut stdout = std::io::stdout().lock();
    match pipeline.analyze_file(&args.input, &mut stdout) {
        Ok(clocks) => {
            stdout.flush()?;
            info!(latency = clocks.latency, "Capture decoded");
            Ok(())
        }
        Err(e) => {
            error!("Decode failed: {e}");
            Err(e).with_context(|| format!("failed to decode {}", args.input.display()))
        }
    }
}
