use crate::generator::RecordGenerator;
use crate::workflow::config::AggregatorConfig;
use crate::workflow::store::PointStore;
use anyhow::anyhow;
use leaderboard_core::channel::encode_update;
use leaderboard_core::telemetry::FeedMetrics;
use leaderboard_core::{GroupTotals, Snapshot, TimeWindow};
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

const BROADCAST_CAPACITY: usize = 64;

/// The update feed: point store, record generator and the broadcast of
/// `leaderboard_update` frames to connected channels.
pub struct Feed {
    store: Mutex<PointStore>,
    generator: Mutex<RecordGenerator>,
    active: AtomicBool,
    epoch: AtomicU64,
    interval: Duration,
    tx: broadcast::Sender<String>,
    metrics: FeedMetrics,
}

impl Feed {
    pub fn new(config: &AggregatorConfig) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            store: Mutex::new(PointStore::new()),
            generator: Mutex::new(RecordGenerator::new(config.seed, config.max_points)),
            active: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            interval: config.interval(),
            tx,
            metrics: FeedMetrics::new(),
        }
    }

    /// Spawns the ingest worker unless one is already running.
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) -> bool {
        if self.active.swap(true, Ordering::SeqCst) {
            return false;
        }
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let feed = Arc::clone(self);
        tokio::spawn(async move { feed.run(epoch).await });
        info!("Data ingestion started");
        true
    }

    pub fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("Data ingestion stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn metrics(&self) -> &FeedMetrics {
        &self.metrics
    }

    pub fn snapshot(&self, now: Instant) -> anyhow::Result<Snapshot> {
        let store = self
            .store
            .lock()
            .map_err(|_| anyhow!("point store lock poisoned"))?;
        Ok(store.snapshot(now))
    }

    pub fn totals(&self, window: TimeWindow, now: Instant) -> anyhow::Result<GroupTotals> {
        let store = self
            .store
            .lock()
            .map_err(|_| anyhow!("point store lock poisoned"))?;
        Ok(store.totals(window, now))
    }

    /// Generates one record, stores it and broadcasts the resulting snapshot.
    pub fn ingest_once(&self, now: Instant) -> anyhow::Result<Snapshot> {
        let record = self
            .generator
            .lock()
            .map_err(|_| anyhow!("generator lock poisoned"))?
            .next_record(now);
        debug!("Inserted record: {:?}", record);

        let snapshot = {
            let mut store = self
                .store
                .lock()
                .map_err(|_| anyhow!("point store lock poisoned"))?;
            store.insert(record);
            store.prune(now);
            store.snapshot(now)
        };
        self.metrics.record_ingested();

        let frame = encode_update(&snapshot)?;
        match self.tx.send(frame) {
            Ok(receivers) => {
                self.metrics.record_broadcast();
                debug!("broadcast update to {} channels", receivers);
            }
            Err(_) => debug!("no channels connected, update not broadcast"),
        }
        Ok(snapshot)
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.is_active() && self.epoch.load(Ordering::SeqCst) == epoch
    }

    async fn run(self: Arc<Self>, epoch: u64) {
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !self.is_current(epoch) {
                break;
            }
            if let Err(err) = self.ingest_once(Instant::now()) {
                self.metrics.record_error();
                error!("Error processing record: {:#}", err);
            }
        }
        debug!("ingest worker {} exited", epoch);
    }
}
