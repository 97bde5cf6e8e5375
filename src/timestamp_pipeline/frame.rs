//! Frame ingestion module
//!
//! This module provides format-agnostic frame reading behind a trait, plus
//! the concrete binary-PPM reader the capture tooling produces files for.

mod ppm_reader;
mod reader;
pub mod types;


pub use ppm_reader::{PpmReader, to_ppm_bytes};
pub use reader::FrameReader;
pub use types::RgbFrame;
