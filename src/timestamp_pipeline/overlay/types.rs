//! Clock slot identities

/// One of the six clocks encoded in the overlay, in vertical order: slot 0
/// is the topmost 8-pixel band of the encoding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockSlot {
    /// Pipeline timestamp of the buffer the overlay was painted into
    BufferTime,
    /// Buffer timestamp mapped to stream time
    StreamTime,
    /// Buffer timestamp mapped to running time
    RunningTime,
    /// Running time plus the pipeline's base time
    ClockTime,
    /// Clock time plus the configured sink latency
    RenderTime,
    /// Wall-clock time at render
    RenderRealtime,
}

impl ClockSlot {
    /// Number of clock slots in the encoding region.
    pub const COUNT: usize = 6;

    /// All slots in vertical (and semantic) order.
    pub const ALL: [ClockSlot; ClockSlot::COUNT] = [
        ClockSlot::BufferTime,
        ClockSlot::StreamTime,
        ClockSlot::RunningTime,
        ClockSlot::ClockTime,
        ClockSlot::RenderTime,
        ClockSlot::RenderRealtime,
    ];

    /// Zero-based vertical position of this slot's band.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name used in reports.
    pub fn label(self) -> &'static str {
        match self {
            ClockSlot::BufferTime => "buffer_time",
            ClockSlot::StreamTime => "stream_time",
            ClockSlot::RunningTime => "running_time",
            ClockSlot::ClockTime => "clock_time",
            ClockSlot::RenderTime => "render_time",
            ClockSlot::RenderRealtime => "render_realtime",
        }
    }
}
