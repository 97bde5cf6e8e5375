use std::io::Write;

use crate::timestamp_pipeline::{common::error::Result, decode::DecodedClocks};

/// Renders a decoded clock record to an output stream.
pub trait LatencyReporter {
    fn report(&self, clocks: &DecodedClocks, output: &mut dyn Write) -> Result<()>;
}
