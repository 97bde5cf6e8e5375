use crate::timestamp_pipeline::common::error::Result;
use crate::timestamp_pipeline::frame::types::RgbFrame;

pub trait FrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<RgbFrame>;
}
