use log::error;
use std::error::Error;

/// Destination for failures that have no user-facing surface.
pub trait DiagnosticSink {
    fn report(&self, context: &str, err: &dyn Error);
}

/// Sink that forwards every report to the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, context: &str, err: &dyn Error) {
        error!("{}: {}", context, err);
    }
}

/// Keeps reports in memory so tests can inspect them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn report(&self, context: &str, err: &dyn Error) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(format!("{}: {}", context, err));
        }
    }
}
