mod reporter;
mod text_reporter;


pub use reporter::LatencyReporter;
pub use text_reporter::TextReporter;
