//! Clock decoding module
//!
//! This module contains the orchestration that turns a captured frame into
//! a set of decoded clocks plus the derived latency.

mod clock_decoder;
pub mod types;

#[cfg(test)]
mod tests;

pub use clock_decoder::TimestampDecodePipeline;
pub use types::{DecodeConfig, DecodeConfigBuilder, DecodedClocks, GeometryMode};
