use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::timestamp_pipeline::{
    common::error::{DecodeError, Result},
    decode::types::{DecodeConfig, DecodedClocks, GeometryMode},
    frame::{FrameReader, PpmReader, types::RgbFrame},
    overlay::{ClockSampler, ClockSlot},
    report::{LatencyReporter, TextReporter},
};

/// End-to-end decode pipeline: frame ingestion behind `R`, clock extraction
/// in the middle, report rendering behind `W`.
pub struct TimestampDecodePipeline<R: FrameReader, W: LatencyReporter> {
    reader: R,
    reporter: W,
    config: DecodeConfig,
}

impl TimestampDecodePipeline<PpmReader, TextReporter> {
    pub fn new(config: DecodeConfig) -> Self {
        Self {
            reader: PpmReader,
            reporter: TextReporter,
            config,
        }
    }
}

impl<R: FrameReader, W: LatencyReporter> TimestampDecodePipeline<R, W> {
    pub fn with_custom(reader: R, reporter: W, config: DecodeConfig) -> Self {
        Self {
            reader,
            reporter,
            config,
        }
    }

    fn validate_geometry(&self, width: usize, height: usize) -> Result<()> {
        let geometry = &self.config.geometry;
        geometry.validate()?;

        if geometry.num_slots != ClockSlot::COUNT {
            return Err(DecodeError::InvalidGeometry(format!(
                "{} slots configured, the clock record holds {}",
                geometry.num_slots,
                ClockSlot::COUNT
            )));
        }

        match self.config.geometry_mode {
            GeometryMode::Strict if !geometry.fits(width, height) => {
                Err(DecodeError::InsufficientFrameSize {
                    width,
                    height,
                    required_width: geometry.region_width(),
                    required_height: geometry.region_height(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Decode the six clocks from a raw row-major pixel buffer.
    ///
    /// This is the function-shaped core contract: the buffer is borrowed
    /// read-only for the duration of the call and nothing is retained, so
    /// concurrent calls over different frames need no synchronization.
    #[instrument(skip(self, pixels), fields(len = pixels.len()))]
    pub fn decode_pixels(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
    ) -> Result<DecodedClocks> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }
        if bytes_per_pixel == 0 {
            return Err(DecodeError::InvalidGeometry(
                "bytes_per_pixel must be positive".to_string(),
            ));
        }
        self.validate_geometry(width, height)?;

        let stride = width
            .checked_mul(bytes_per_pixel)
            .ok_or(DecodeError::InvalidDimensions(width, height))?;
        let expected = stride
            .checked_mul(height)
            .ok_or(DecodeError::InvalidDimensions(width, height))?;
        if pixels.len() < expected {
            return Err(DecodeError::TruncatedPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        let origin = self.config.geometry.region_origin(width, height);
        debug!(origin_x = origin.0, origin_y = origin.1, "Located clock region");

        let sampler = ClockSampler::new(self.config.geometry)?;
        let mut values = [0u64; ClockSlot::COUNT];
        for slot in ClockSlot::ALL {
            values[slot.index()] = sampler.read_clock(pixels, stride, bytes_per_pixel, origin, slot)?;
        }

        Ok(DecodedClocks::from_slots(values))
    }

    /// Decode the six clocks from a parsed frame.
    pub fn decode_frame(&self, frame: &RgbFrame) -> Result<DecodedClocks> {
        self.decode_pixels(&frame.data, frame.width, frame.height, frame.bytes_per_pixel)
    }

    /// Parse an input image and decode its clocks.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn decode(&self, input_data: &[u8]) -> Result<DecodedClocks> {
        info!("Starting timestamp decode");

        let frame = {
            let _span = tracing::info_span!("parse_frame").entered();
            self.reader.read_frame(input_data)?
        };

        let clocks = {
            let _span = tracing::info_span!(
                "decode_clocks",
                width = frame.width,
                height = frame.height
            )
            .entered();
            self.decode_frame(&frame)?
        };

        info!(
            width = frame.width,
            height = frame.height,
            latency = clocks.latency,
            "Decode complete"
        );
        Ok(clocks)
    }

    /// Parse, decode, and write the clock report.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn analyze(&self, input_data: &[u8], output: &mut dyn Write) -> Result<DecodedClocks> {
        let clocks = self.decode(input_data)?;

        {
            let _span = tracing::info_span!("write_report").entered();
            self.reporter.report(&clocks, output)?;
        }

        Ok(clocks)
    }

    /// Decode a capture file.
    #[instrument(skip(self, input_path))]
    pub fn decode_file<P: AsRef<Path>>(&self, input_path: P) -> Result<DecodedClocks> {
        let input_data = self.read_input(input_path.as_ref())?;
        self.decode(&input_data)
    }

    /// Decode a capture file and write the clock report.
    #[instrument(skip(self, input_path, output))]
    pub fn analyze_file<P: AsRef<Path>>(
        &self,
        input_path: P,
        output: &mut dyn Write,
    ) -> Result<DecodedClocks> {
        let input_data = self.read_input(input_path.as_ref())?;
        self.analyze(&input_data, output)
    }

    fn read_input(&self, input_path: &Path) -> Result<Vec<u8>> {
        let _span = tracing::info_span!("read_input_file").entered();
        info!(input = %input_path.display(), "Reading capture");
        std::fs::read(input_path)
            .map_err(|e| DecodeError::InputReadError(format!("{}: {}", input_path.display(), e)))
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DecodeConfig) {
        self.config = config;
    }
}
