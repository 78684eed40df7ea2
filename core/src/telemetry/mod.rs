pub mod log;
pub mod metrics;

#[cfg(test)]
pub use self::log::RecordingSink;
pub use self::log::{DiagnosticSink, LogSink};
pub use metrics::{Counters, FeedMetrics};
