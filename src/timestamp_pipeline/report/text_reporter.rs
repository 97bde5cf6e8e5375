use std::io::Write;

use tracing::debug;

use crate::timestamp_pipeline::{
    common::error::Result, decode::DecodedClocks, overlay::ClockSlot, report::LatencyReporter,
};

/// Plain-text reporter: one `name = value` line per clock, then the latency.
pub struct TextReporter;

impl LatencyReporter for TextReporter {
    fn report(&self, clocks: &DecodedClocks, output: &mut dyn Write) -> Result<()> {
        debug!("Writing clock report");

        for slot in ClockSlot::ALL {
            writeln!(output, "{} = {}", slot.label(), clocks.get(slot))?;
        }
        writeln!(output, "latency = {}", clocks.latency)?;

        Ok(())
    }
}
