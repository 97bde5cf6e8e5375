//! Decode results and configuration types

use crate::timestamp_pipeline::overlay::{ClockSlot, OverlayGeometry};

/// The clocks recovered from one frame, in nanoseconds, plus the derived
/// latency. Plain value semantics; built once per decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedClocks {
    /// Pipeline timestamp of the buffer the overlay was painted into
    pub buffer_time: u64,
    /// Buffer timestamp mapped to stream time
    pub stream_time: u64,
    /// Buffer timestamp mapped to running time
    pub running_time: u64,
    /// Running time plus the pipeline's base time
    pub clock_time: u64,
    /// Clock time plus the configured sink latency
    pub render_time: u64,
    /// Wall-clock time at render
    pub render_realtime: u64,
    /// `clock_time - render_time` as wrapping unsigned subtraction: a
    /// render timestamp ahead of the clock wraps to a huge value instead
    /// of going negative. See [`latency_signed`](Self::latency_signed).
    pub latency: u64,
}

impl DecodedClocks {
    /// Assemble the record from per-slot values in slot order, deriving
    /// the latency field.
    pub fn from_slots(values: [u64; ClockSlot::COUNT]) -> Self {
        let clock_time = values[ClockSlot::ClockTime.index()];
        let render_time = values[ClockSlot::RenderTime.index()];
        Self {
            buffer_time: values[ClockSlot::BufferTime.index()],
            stream_time: values[ClockSlot::StreamTime.index()],
            running_time: values[ClockSlot::RunningTime.index()],
            clock_time,
            render_time,
            render_realtime: values[ClockSlot::RenderRealtime.index()],
            latency: clock_time.wrapping_sub(render_time),
        }
    }

    /// Value decoded for one slot.
    pub fn get(&self, slot: ClockSlot) -> u64 {
        match slot {
            ClockSlot::BufferTime => self.buffer_time,
            ClockSlot::StreamTime => self.stream_time,
            ClockSlot::RunningTime => self.running_time,
            ClockSlot::ClockTime => self.clock_time,
            ClockSlot::RenderTime => self.render_time,
            ClockSlot::RenderRealtime => self.render_realtime,
        }
    }

    /// The wrapped latency reinterpreted as two's-complement signed, for
    /// consumers that treat a render timestamp ahead of the clock (skewed
    /// clocks, misconfigured base time) as negative latency.
    pub fn latency_signed(&self) -> i64 {
        self.latency as i64
    }
}

/// How frames smaller than the encoding region are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryMode {
    /// Reject undersized frames with an insufficient-frame-size error.
    #[default]
    Strict,
    /// Clamp the region origin to the top-left corner and decode whatever
    /// pixel data is there.
    Permissive,
}

/// Configuration for clock decoding.
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Block/bit/slot geometry of the encoding region
    pub geometry: OverlayGeometry,
    /// Undersized-frame handling
    pub geometry_mode: GeometryMode,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            geometry: OverlayGeometry::default(),
            geometry_mode: GeometryMode::Strict,
        }
    }
}

impl DecodeConfig {
    pub fn builder() -> DecodeConfigBuilder {
        DecodeConfigBuilder::default()
    }
}

/// Builder for DecodeConfig
#[derive(Default)]
pub struct DecodeConfigBuilder {
    geometry: Option<OverlayGeometry>,
    geometry_mode: Option<GeometryMode>,
}

impl DecodeConfigBuilder {
    pub fn geometry(mut self, geometry: OverlayGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn geometry_mode(mut self, mode: GeometryMode) -> Self {
        self.geometry_mode = Some(mode);
        self
    }

    pub fn build(self) -> DecodeConfig {
        let default = DecodeConfig::default();
        DecodeConfig {
            geometry: self.geometry.unwrap_or(default.geometry),
            geometry_mode: self.geometry_mode.unwrap_or(default.geometry_mode),
        }
    }
}
