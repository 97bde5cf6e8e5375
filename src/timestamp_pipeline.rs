//! Timestamp-overlay decoding pipeline
//!
//! This module provides a structured approach to recovering the encoded
//! clocks from a captured video frame, with separate modules for frame
//! ingestion, overlay geometry and sampling, decode orchestration, and
//! latency reporting.

pub mod common;
pub mod decode;
pub mod frame;
pub mod overlay;
pub mod report;

pub use common::{
    DecodeError,
    Result,
};

pub use frame::{
    FrameReader,
    PpmReader,
    RgbFrame,
    to_ppm_bytes,
};

pub use overlay::{
    ClockSampler,
    ClockSlot,
    OverlayGeometry,
    OverlayPainter,
};

pub use decode::{
    DecodeConfig,
    DecodeConfigBuilder,
    DecodedClocks,
    GeometryMode,
    TimestampDecodePipeline,
};

pub use report::{
    LatencyReporter,
    TextReporter,
};
