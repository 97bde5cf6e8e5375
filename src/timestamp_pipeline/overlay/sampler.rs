//! Bit sampling: recover one 64-bit clock from a row of bit blocks.

use std::fmt::Write;

use tracing::trace;

use crate::timestamp_pipeline::common::error::{DecodeError, Result};
use crate::timestamp_pipeline::overlay::geometry::OverlayGeometry;
use crate::timestamp_pipeline::overlay::types::ClockSlot;

/// A channel byte with the high bit set reads as a 1-bit; anything from
/// 128 up counts as set.
const BIT_THRESHOLD_MASK: u8 = 0x80;

/// Reads clocks back out of a frame by sampling one pixel per bit block:
/// the red byte at the block's center. Scan order is MSB first, so the
/// leftmost block holds bit 63 of the result.
pub struct ClockSampler {
    geometry: OverlayGeometry,
}

impl ClockSampler {
    pub fn new(geometry: OverlayGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self { geometry })
    }

    /// Decode the 64-bit value in `slot` from raw row-major pixels.
    ///
    /// `origin` is the pixel origin of the encoding region (see
    /// [`OverlayGeometry::region_origin`]); `stride` is the row stride in
    /// bytes. Every access is validated against the buffer length, so a
    /// sample landing past the end of `pixels` is an error, never a read
    /// beyond the allocation.
    pub fn read_clock(
        &self,
        pixels: &[u8],
        stride: usize,
        bytes_per_pixel: usize,
        origin: (usize, usize),
        slot: ClockSlot,
    ) -> Result<u64> {
        if slot.index() >= self.geometry.num_slots {
            return Err(DecodeError::InvalidGeometry(format!(
                "slot {} outside the {} configured slots",
                slot.index(),
                self.geometry.num_slots
            )));
        }

        let (origin_x, origin_y) = origin;
        let row = self.geometry.sample_row(origin_y, slot.index());
        let mut sampled = tracing::enabled!(tracing::Level::TRACE)
            .then(|| String::with_capacity(self.geometry.bits_per_clock * 3));

        let mut value = 0u64;
        for bit in 0..self.geometry.bits_per_clock {
            let col = self.geometry.sample_col(origin_x, bit);
            let offset = row * stride + col * bytes_per_pixel;
            let channel = *pixels
                .get(offset)
                .ok_or(DecodeError::SampleOutOfBounds {
                    offset,
                    len: pixels.len(),
                })?;
            if channel & BIT_THRESHOLD_MASK != 0 {
                value |= 1u64 << (self.geometry.bits_per_clock - 1 - bit);
            }
            if let Some(text) = sampled.as_mut() {
                let _ = write!(text, "{channel:02x} ");
            }
        }

        if let Some(text) = sampled {
            trace!(slot = slot.label(), samples = text.trim_end(), "Sampled clock bytes");
        }
        Ok(value)
    }
}
