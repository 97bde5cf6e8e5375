//! Decoded frame buffer types

use crate::timestamp_pipeline::common::error::{DecodeError, Result};

/// Channel bytes per pixel for interleaved 24-bit RGB.
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// A decoded video frame: row-major interleaved channel bytes with no row
/// padding, so the stride is always `width * bytes_per_pixel`.
///
/// The buffer-length invariant (`data.len() >= height * stride`) is checked
/// at construction; decoding borrows the frame read-only and never mutates
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Channel bytes per pixel (3 for RGB)
    pub bytes_per_pixel: usize,
    /// Interleaved pixel data [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}

impl RgbFrame {
    /// Wrap an RGB pixel buffer, validating dimensions and buffer length.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::with_bytes_per_pixel(width, height, RGB_BYTES_PER_PIXEL, data)
    }

    /// Wrap a pixel buffer with an explicit pixel size.
    pub fn with_bytes_per_pixel(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }
        if bytes_per_pixel == 0 {
            return Err(DecodeError::InvalidGeometry(
                "bytes_per_pixel must be positive".to_string(),
            ));
        }
        let expected = width
            .checked_mul(bytes_per_pixel)
            .and_then(|stride| stride.checked_mul(height))
            .ok_or(DecodeError::InvalidDimensions(width, height))?;
        if data.len() < expected {
            return Err(DecodeError::TruncatedPixelData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// An RGB frame with every channel byte set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(RGB_BYTES_PER_PIXEL))
            .ok_or(DecodeError::InvalidDimensions(width, height))?;
        Self::new(width, height, vec![value; len])
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.width * self.bytes_per_pixel
    }

    /// Number of payload bytes the dimensions call for.
    pub fn expected_len(&self) -> usize {
        self.stride() * self.height
    }
}
