//! Encoded clock overlay
//!
//! Geometry of the centered bit-block region, the per-slot bit sampler that
//! reads clocks back out of a frame, and the painter that embeds them.

mod encoder;
mod geometry;
mod sampler;
pub mod types;


pub use encoder::OverlayPainter;
pub use geometry::OverlayGeometry;
pub use sampler::ClockSampler;
pub use types::ClockSlot;
