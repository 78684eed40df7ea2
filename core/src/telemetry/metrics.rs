use std::sync::Mutex;

/// Counters for the update feed, shared between the ingest worker and the HTTP surface.
pub struct FeedMetrics {
    inner: Mutex<Counters>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub ingested: u64,
    pub broadcast: u64,
    pub errors: u64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn record_ingested(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.ingested += 1;
        }
    }

    pub fn record_broadcast(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.broadcast += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.errors += 1;
        }
    }

    pub fn snapshot(&self) -> Counters {
        self.inner
            .lock()
            .map(|counters| *counters)
            .unwrap_or_default()
    }
}

impl Default for FeedMetrics {
    fn default() -> Self {
        Self::new()
    }
}
