//! Overlay painting: embed clock values as visible bit blocks.

use tracing::debug;

use crate::timestamp_pipeline::common::error::{DecodeError, Result};
use crate::timestamp_pipeline::frame::types::RgbFrame;
use crate::timestamp_pipeline::overlay::geometry::OverlayGeometry;
use crate::timestamp_pipeline::overlay::types::ClockSlot;

/// Channel value painted into every byte of a 1-bit block.
const BIT_SET_VALUE: u8 = 0xff;

/// Channel value painted into every byte of a 0-bit block.
const BIT_CLEAR_VALUE: u8 = 0x00;

/// Paints clocks into a frame as the decoder (and a human squinting at the
/// video) expects to find them: each bit a solid `pixels_per_bit`-square
/// block, white for 1 and black for 0, MSB leftmost, slots stacked from the
/// top of the centered encoding region.
///
/// The painter and [`ClockSampler`](super::ClockSampler) share one
/// [`OverlayGeometry`], so a painted frame always decodes back to the
/// painted values.
pub struct OverlayPainter {
    geometry: OverlayGeometry,
}

impl OverlayPainter {
    pub fn new(geometry: OverlayGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self { geometry })
    }

    /// Paint `value` into one slot. Frames smaller than the encoding
    /// region are refused; there is no clamped painting mode.
    pub fn paint_clock(&self, frame: &mut RgbFrame, slot: ClockSlot, value: u64) -> Result<()> {
        if slot.index() >= self.geometry.num_slots {
            return Err(DecodeError::InvalidGeometry(format!(
                "slot {} outside the {} configured slots",
                slot.index(),
                self.geometry.num_slots
            )));
        }
        if !self.geometry.fits(frame.width, frame.height) {
            return Err(DecodeError::InsufficientFrameSize {
                width: frame.width,
                height: frame.height,
                required_width: self.geometry.region_width(),
                required_height: self.geometry.region_height(),
            });
        }

        let (origin_x, origin_y) = self.geometry.region_origin(frame.width, frame.height);
        let stride = frame.stride();
        let bytes_per_pixel = frame.bytes_per_pixel;
        let pixels_per_bit = self.geometry.pixels_per_bit;
        let band_top = origin_y + slot.index() * pixels_per_bit;
        let len = frame.data.len();

        for line in 0..pixels_per_bit {
            let row = band_top + line;
            for bit in 0..self.geometry.bits_per_clock {
                let bit_is_set = (value >> (self.geometry.bits_per_clock - 1 - bit)) & 1 == 1;
                let color = if bit_is_set { BIT_SET_VALUE } else { BIT_CLEAR_VALUE };
                let start = row * stride + (origin_x + bit * pixels_per_bit) * bytes_per_pixel;
                let end = start + pixels_per_bit * bytes_per_pixel;
                frame
                    .data
                    .get_mut(start..end)
                    .ok_or(DecodeError::SampleOutOfBounds { offset: end, len })?
                    .fill(color);
            }
        }

        debug!(slot = slot.label(), value, "Painted clock");
        Ok(())
    }

    /// Paint all six clocks from per-slot values in slot order.
    pub fn paint_clocks(
        &self,
        frame: &mut RgbFrame,
        values: &[u64; ClockSlot::COUNT],
    ) -> Result<()> {
        for slot in ClockSlot::ALL {
            self.paint_clock(frame, slot, values[slot.index()])?;
        }
        Ok(())
    }
}
