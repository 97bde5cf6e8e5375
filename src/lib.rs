//! Decoder for the 64-bit clocks a latency-measurement overlay embeds into a
//! video feed.
//!
//! Up to six clocks (buffer_time, stream_time, running_time, clock_time,
//! render_time, render_realtime) are painted into the frame as rows of 8x8
//! bit blocks; reading them back from a captured frame and differencing two
//! of them gives the end-to-end latency of the video path.

pub mod logger;
pub mod timestamp_pipeline;
