use super::*;

use std::io::Write;
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;

use crate::timestamp_pipeline::{
    common::error::{DecodeError, Result},
    frame::{FrameReader, to_ppm_bytes, types::RgbFrame},
    overlay::{ClockSlot, OverlayGeometry, OverlayPainter},
    report::LatencyReporter,
};

struct MockFrameReader {
    should_fail: bool,
    frame: RgbFrame,
}

impl FrameReader for MockFrameReader {
    fn read_frame(&self, _data: &[u8]) -> Result<RgbFrame> {
        if self.should_fail {
            return Err(DecodeError::MalformedHeader(
                "mock parse failure".to_string(),
            ));
        }
        Ok(self.frame.clone())
    }
}

struct MockReporter {
    should_fail: bool,
    reported: Arc<Mutex<Vec<DecodedClocks>>>,
}

impl LatencyReporter for MockReporter {
    fn report(&self, clocks: &DecodedClocks, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(DecodeError::OutputWriteError(
                "mock report failure".to_string(),
            ));
        }
        self.reported.lock().unwrap().push(*clocks);
        Ok(())
    }
}

/// A black frame of the given size with the six clocks painted in, as PPM
/// bytes.
fn overlay_ppm(width: usize, height: usize, values: [u64; ClockSlot::COUNT]) -> Vec<u8> {
    let mut frame = RgbFrame::filled(width, height, 0).unwrap();
    let painter = OverlayPainter::new(OverlayGeometry::default()).unwrap();
    painter.paint_clocks(&mut frame, &values).unwrap();
    to_ppm_bytes(&frame).unwrap()
}

fn overlay_frame(width: usize, height: usize, values: [u64; ClockSlot::COUNT]) -> RgbFrame {
    let mut frame = RgbFrame::filled(width, height, 0).unwrap();
    let painter = OverlayPainter::new(OverlayGeometry::default()).unwrap();
    painter.paint_clocks(&mut frame, &values).unwrap();
    frame
}

#[test]
fn test_config_builder() {
    let config = DecodeConfig::builder().build();
    assert_eq!(config.geometry, OverlayGeometry::default());
    assert_eq!(config.geometry_mode, GeometryMode::Strict);

    let custom = DecodeConfig::builder()
        .geometry(OverlayGeometry {
            pixels_per_bit: 4,
            ..OverlayGeometry::default()
        })
        .geometry_mode(GeometryMode::Permissive)
        .build();
    assert_eq!(custom.geometry.pixels_per_bit, 4);
    assert_eq!(custom.geometry_mode, GeometryMode::Permissive);
}

#[test]
fn test_decode_reports_clocks() {
    let values = [11, 22, 33, 1_000, 400, 55];
    let reported = Arc::new(Mutex::new(Vec::new()));

    let pipeline = TimestampDecodePipeline::with_custom(
        MockFrameReader {
            should_fail: false,
            frame: overlay_frame(640, 480, values),
        },
        MockReporter {
            should_fail: false,
            reported: Arc::clone(&reported),
        },
        DecodeConfig::default(),
    );

    let mut output = Vec::new();
    let clocks = pipeline.analyze(b"unused", &mut output).unwrap();

    assert_eq!(clocks.clock_time, 1_000);
    assert_eq!(clocks.render_time, 400);
    assert_eq!(clocks.latency, 600);

    let captured = reported.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0], clocks);
}

#[test]
fn test_reader_failure_short_circuits() {
    let reported = Arc::new(Mutex::new(Vec::new()));

    let pipeline = TimestampDecodePipeline::with_custom(
        MockFrameReader {
            should_fail: true,
            frame: overlay_frame(640, 480, [0; 6]),
        },
        MockReporter {
            should_fail: false,
            reported: Arc::clone(&reported),
        },
        DecodeConfig::default(),
    );

    let mut output = Vec::new();
    let result = pipeline.analyze(b"unused", &mut output);

    assert!(matches!(result, Err(DecodeError::MalformedHeader(_))));
    assert!(reported.lock().unwrap().is_empty());
}

#[test]
fn test_reporter_failure_surfaces() {
    let pipeline = TimestampDecodePipeline::with_custom(
        MockFrameReader {
            should_fail: false,
            frame: overlay_frame(640, 480, [0; 6]),
        },
        MockReporter {
            should_fail: true,
            reported: Arc::new(Mutex::new(Vec::new())),
        },
        DecodeConfig::default(),
    );

    let mut output = Vec::new();
    let result = pipeline.analyze(b"unused", &mut output);

    assert!(matches!(result, Err(DecodeError::OutputWriteError(_))));
}

#[test]
fn test_strict_mode_rejects_small_frames() {
    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());
    let frame = RgbFrame::filled(320, 240, 0).unwrap();

    let result = pipeline.decode_frame(&frame);

    assert!(matches!(
        result,
        Err(DecodeError::InsufficientFrameSize {
            width: 320,
            height: 240,
            required_width: 512,
            required_height: 48,
        })
    ));
}

#[test]
fn test_permissive_mode_decodes_clamped_region() {
    let geometry = OverlayGeometry::default();
    let mut frame = RgbFrame::filled(320, 240, 0).unwrap();

    // Clamped origin is (0, 96); bits 0 and 39 of the first slot still have
    // their sample pixels inside a 320-wide frame.
    let (origin_x, origin_y) = geometry.region_origin(320, 240);
    assert_eq!((origin_x, origin_y), (0, 96));
    for bit in [0usize, 39] {
        let offset = geometry.sample_row(origin_y, 0) * frame.stride()
            + geometry.sample_col(origin_x, bit) * frame.bytes_per_pixel;
        frame.data[offset] = 0xff;
    }

    let pipeline = TimestampDecodePipeline::new(
        DecodeConfig::builder()
            .geometry_mode(GeometryMode::Permissive)
            .build(),
    );
    let clocks = pipeline.decode_frame(&frame).unwrap();

    assert_eq!(clocks.buffer_time, (1u64 << 63) | (1u64 << 24));
    assert_eq!(clocks.stream_time, 0);
    assert_eq!(clocks.latency, 0);
}

#[test]
fn test_permissive_mode_out_of_bounds_is_an_error() {
    let pipeline = TimestampDecodePipeline::new(
        DecodeConfig::builder()
            .geometry_mode(GeometryMode::Permissive)
            .build(),
    );
    let frame = RgbFrame::filled(16, 16, 0).unwrap();

    let result = pipeline.decode_frame(&frame);

    assert!(matches!(result, Err(DecodeError::SampleOutOfBounds { .. })));
}

#[test]
fn test_latency_wraps_unsigned() {
    let forward = DecodedClocks::from_slots([0, 0, 0, 1_000, 400, 0]);
    assert_eq!(forward.latency, 600);
    assert_eq!(forward.latency_signed(), 600);

    let backward = DecodedClocks::from_slots([0, 0, 0, 400, 700, 0]);
    assert_eq!(backward.latency, 18_446_744_073_709_551_316);
    assert_eq!(backward.latency_signed(), -300);
}

#[test]
fn test_decoded_clocks_get_mapping() {
    let clocks = DecodedClocks::from_slots([1, 2, 3, 4, 5, 6]);

    assert_eq!(clocks.get(ClockSlot::BufferTime), 1);
    assert_eq!(clocks.get(ClockSlot::StreamTime), 2);
    assert_eq!(clocks.get(ClockSlot::RunningTime), 3);
    assert_eq!(clocks.get(ClockSlot::ClockTime), 4);
    assert_eq!(clocks.get(ClockSlot::RenderTime), 5);
    assert_eq!(clocks.get(ClockSlot::RenderRealtime), 6);
}

#[test]
fn test_decode_pixels_matches_decode_frame() {
    let values = [9, 8, 7, 6, 5, 4];
    let frame = overlay_frame(640, 480, values);
    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());

    let from_frame = pipeline.decode_frame(&frame).unwrap();
    let from_pixels = pipeline
        .decode_pixels(&frame.data, frame.width, frame.height, frame.bytes_per_pixel)
        .unwrap();

    assert_eq!(from_frame, from_pixels);
}

#[test]
fn test_decode_pixels_rejects_dimension_overflow() {
    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());

    // Large enough to pass the strict fit check, too large for the byte
    // count to be representable.
    let result = pipeline.decode_pixels(&[0u8; 4], usize::MAX, 48, 3);

    assert!(matches!(result, Err(DecodeError::InvalidDimensions(_, 48))));
}

#[test]
fn test_rejects_wrong_slot_count_config() {
    let pipeline = TimestampDecodePipeline::new(
        DecodeConfig::builder()
            .geometry(OverlayGeometry {
                num_slots: 4,
                ..OverlayGeometry::default()
            })
            .build(),
    );
    let frame = RgbFrame::filled(640, 480, 0).unwrap();

    let result = pipeline.decode_frame(&frame);

    assert!(matches!(result, Err(DecodeError::InvalidGeometry(_))));
}

#[test]
fn test_decode_from_ppm_bytes() {
    let values = [100, 200, 300, 5_000, 2_000, 400];
    let data = overlay_ppm(640, 480, values);

    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());
    let clocks = pipeline.decode(&data).unwrap();

    for slot in ClockSlot::ALL {
        assert_eq!(clocks.get(slot), values[slot.index()], "slot {}", slot.label());
    }
    assert_eq!(clocks.latency, 3_000);
}

#[test]
fn test_decode_file_end_to_end() {
    let render_realtime = 1_700_000_000_000_000_000;
    let data = overlay_ppm(640, 480, [0, 0, 0, 0, 0, render_realtime]);

    let mut input = NamedTempFile::new().unwrap();
    input.write_all(&data).unwrap();

    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());
    let clocks = pipeline.decode_file(input.path()).unwrap();

    assert_eq!(clocks.render_realtime, render_realtime);
    assert_eq!(clocks.clock_time, 0);
    assert_eq!(clocks.latency, 0);
}

#[test]
fn test_decode_file_missing_input() {
    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());

    let result = pipeline.decode_file("/nonexistent/capture.ppm");

    assert!(matches!(result, Err(DecodeError::InputReadError(_))));
}

#[test]
fn test_analyze_writes_report() {
    let data = overlay_ppm(640, 480, [1, 2, 3, 9_000, 1_500, 6]);

    let pipeline = TimestampDecodePipeline::new(DecodeConfig::default());
    let mut output = Vec::new();
    let clocks = pipeline.analyze(&data, &mut output).unwrap();

    assert_eq!(clocks.latency, 7_500);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("clock_time = 9000\n"));
    assert!(text.contains("render_time = 1500\n"));
    assert!(text.contains("latency = 7500\n"));
}
