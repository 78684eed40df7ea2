use crate::generator::PointRecord;
use leaderboard_core::{GroupTotals, Snapshot, TimeWindow};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// In-memory point ledger that answers windowed totals.
///
/// Records older than the longest bounded window are pruned; the all-time
/// total is kept as a running sum so nothing needs to be retained for it.
#[derive(Debug, Default)]
pub struct PointStore {
    recent: VecDeque<PointRecord>,
    all_time: GroupTotals,
}

fn retention() -> Duration {
    TimeWindow::ALL
        .into_iter()
        .filter_map(TimeWindow::horizon)
        .max()
        .unwrap_or_default()
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records are expected in arrival order.
    pub fn insert(&mut self, record: PointRecord) {
        *self.all_time.get_mut(record.group) += record.points;
        self.recent.push_back(record);
    }

    /// Sums points newer than `now - horizon`; every group is present.
    pub fn totals(&self, window: TimeWindow, now: Instant) -> GroupTotals {
        let Some(horizon) = window.horizon() else {
            return self.all_time;
        };
        let mut totals = GroupTotals::default();
        for record in self
            .recent
            .iter()
            .filter(|record| now.saturating_duration_since(record.at) < horizon)
        {
            *totals.get_mut(record.group) += record.points;
        }
        totals
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for window in TimeWindow::ALL {
            *snapshot.window_mut(window) = self.totals(window, now);
        }
        snapshot
    }

    pub fn prune(&mut self, now: Instant) -> usize {
        let keep = retention();
        let before = self.recent.len();
        while self
            .recent
            .front()
            .is_some_and(|record| now.saturating_duration_since(record.at) >= keep)
        {
            self.recent.pop_front();
        }
        before - self.recent.len()
    }

    pub fn retained(&self) -> usize {
        self.recent.len()
    }
}
