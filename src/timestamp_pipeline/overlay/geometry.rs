//! Overlay geometry: where the encoded clock region sits in a frame.

use crate::timestamp_pipeline::common::error::{DecodeError, Result};

/// Geometry of the encoded clock region.
///
/// Each bit of a clock occupies a `pixels_per_bit`-square block so the
/// pattern stays visible to a human; one clock is a horizontal run of
/// `bits_per_clock` blocks, and the `num_slots` clock rows are stacked
/// vertically. The whole region is centered in the frame, which makes it
/// easy to find and keeps it clear of broadcast overlays at the edges.
///
/// Defaults are the wire constants: 8-pixel blocks, 64 bits, 6 slots, for a
/// 512x48 pixel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    /// Side length in pixels of the square block carrying one bit
    pub pixels_per_bit: usize,
    /// Bit blocks per clock row
    pub bits_per_clock: usize,
    /// Vertically stacked clock slots
    pub num_slots: usize,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            pixels_per_bit: 8,
            bits_per_clock: 64,
            num_slots: 6,
        }
    }
}

impl OverlayGeometry {
    /// Width of the encoding region in pixels.
    pub fn region_width(&self) -> usize {
        self.bits_per_clock * self.pixels_per_bit
    }

    /// Height of the encoding region in pixels.
    pub fn region_height(&self) -> usize {
        self.num_slots * self.pixels_per_bit
    }

    /// Whether a frame is large enough to hold the whole region.
    pub fn fits(&self, width: usize, height: usize) -> bool {
        width >= self.region_width() && height >= self.region_height()
    }

    /// Pixel origin of the encoding region: centered on both axes with
    /// integer division, clamped to the top-left corner when the frame is
    /// smaller than the region.
    pub fn region_origin(&self, width: usize, height: usize) -> (usize, usize) {
        let origin_x = width.saturating_sub(self.region_width()) / 2;
        let origin_y = height.saturating_sub(self.region_height()) / 2;
        (origin_x, origin_y)
    }

    /// Pixel row sampled for a slot: the vertical center of its band.
    pub fn sample_row(&self, origin_y: usize, slot_index: usize) -> usize {
        origin_y + slot_index * self.pixels_per_bit + self.pixels_per_bit / 2
    }

    /// Pixel column sampled for a bit: the horizontal center of its block.
    pub fn sample_col(&self, origin_x: usize, bit: usize) -> usize {
        origin_x + bit * self.pixels_per_bit + self.pixels_per_bit / 2
    }

    /// Reject configurations the sampler cannot service: zero extents, or
    /// more bits than a u64 holds.
    pub fn validate(&self) -> Result<()> {
        if self.pixels_per_bit == 0 {
            return Err(DecodeError::InvalidGeometry(
                "pixels_per_bit must be positive".to_string(),
            ));
        }
        if self.bits_per_clock == 0 || self.bits_per_clock > u64::BITS as usize {
            return Err(DecodeError::InvalidGeometry(format!(
                "bits_per_clock must be within 1..={}, got {}",
                u64::BITS,
                self.bits_per_clock
            )));
        }
        if self.num_slots == 0 {
            return Err(DecodeError::InvalidGeometry(
                "num_slots must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
