//! Leaderboard view model.
//!
//! Holds the latest snapshot and the selected window and keeps a ranked,
//! normalized projection of them ready for rendering. The projection is
//! always recomputed from scratch, so it never carries history.

use crate::model::{Group, Rgb, Snapshot, TimeWindow};
use log::debug;

/// Render-ready standing of one group in the selected window.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub group: Group,
    pub name: &'static str,
    pub color: Rgb,
    pub emblem: &'static str,
    pub points: u64,
    /// `points / max_points`, or `0.0` when every group is at zero.
    pub proportion: f32,
}

impl DisplayEntry {
    pub fn width_percent(&self) -> f32 {
        self.proportion * 100.0
    }
}

/// Ranked entries for one window plus the maximum used to normalize them.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub window: TimeWindow,
    pub entries: Vec<DisplayEntry>,
    pub max_points: u64,
}

pub fn max_points(snapshot: &Snapshot, window: TimeWindow) -> u64 {
    snapshot.window(window).max()
}

/// Ranks every group by descending points. Ties keep canonical group order.
pub fn derive_entries(snapshot: &Snapshot, window: TimeWindow) -> Ranking {
    let totals = snapshot.window(window);
    let max_points = totals.max();

    let mut entries: Vec<DisplayEntry> = totals
        .iter()
        .map(|(group, points)| {
            let meta = group.meta();
            let proportion = if max_points > 0 {
                points as f32 / max_points as f32
            } else {
                0.0
            };
            DisplayEntry {
                group,
                name: meta.name,
                color: meta.color,
                emblem: meta.emblem,
                points,
                proportion,
            }
        })
        .collect();
    // `sort_by` is stable, so equal counts stay in declaration order.
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    Ranking {
        window,
        entries,
        max_points,
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardView {
    snapshot: Snapshot,
    selected: TimeWindow,
    ranking: Ranking,
}

impl LeaderboardView {
    pub fn new() -> Self {
        let snapshot = Snapshot::default();
        let selected = TimeWindow::default();
        Self {
            ranking: derive_entries(&snapshot, selected),
            snapshot,
            selected,
        }
    }

    /// Replaces the held snapshot in full and re-ranks.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.recompute();
    }

    pub fn select_window(&mut self, window: TimeWindow) {
        self.selected = window;
        self.recompute();
    }

    pub fn selected(&self) -> TimeWindow {
        self.selected
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.ranking.entries
    }

    pub fn max_points(&self) -> u64 {
        self.ranking.max_points
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    fn recompute(&mut self) {
        self.ranking = derive_entries(&self.snapshot, self.selected);
        debug!(
            "ranking recomputed for {} (max {})",
            self.selected.key(),
            self.ranking.max_points
        );
    }
}

impl Default for LeaderboardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupTotals;

    fn totals(gryff: u64, slyth: u64, raven: u64, huff: u64) -> GroupTotals {
        GroupTotals {
            gryff,
            slyth,
            raven,
            huff,
        }
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            five_min: totals(4, 4, 9, 1),
            one_hour: totals(30, 50, 10, 0),
            all: totals(120, 80, 80, 200),
        }
    }

    fn order(entries: &[DisplayEntry]) -> Vec<Group> {
        entries.iter().map(|entry| entry.group).collect()
    }

    #[test]
    fn derive_returns_one_entry_per_group_with_window_points() {
        let snapshot = sample_snapshot();
        for window in TimeWindow::ALL {
            let ranking = derive_entries(&snapshot, window);
            assert_eq!(ranking.entries.len(), 4);
            for group in Group::ALL {
                let entry = ranking
                    .entries
                    .iter()
                    .find(|entry| entry.group == group)
                    .unwrap();
                assert_eq!(entry.points, snapshot.window(window).get(group));
            }
        }
    }

    #[test]
    fn derive_sorts_descending_and_breaks_ties_by_declaration_order() {
        let snapshot = sample_snapshot();
        for window in TimeWindow::ALL {
            let entries = derive_entries(&snapshot, window).entries;
            assert!(entries.windows(2).all(|pair| pair[0].points >= pair[1].points));
        }

        let five_min = derive_entries(&snapshot, TimeWindow::FiveMinutes);
        assert_eq!(
            order(&five_min.entries),
            vec![Group::Raven, Group::Gryff, Group::Slyth, Group::Huff]
        );
        let all = derive_entries(&snapshot, TimeWindow::AllTime);
        assert_eq!(
            order(&all.entries),
            vec![Group::Huff, Group::Gryff, Group::Slyth, Group::Raven]
        );
        assert_eq!(derive_entries(&snapshot, TimeWindow::AllTime), all);
    }

    #[test]
    fn all_zero_window_renders_zero_width() {
        let ranking = derive_entries(&Snapshot::default(), TimeWindow::OneHour);
        assert_eq!(ranking.max_points, 0);
        assert!(ranking.entries.iter().all(|entry| entry.width_percent() == 0.0));
        assert_eq!(order(&ranking.entries), Group::ALL.to_vec());
    }

    #[test]
    fn later_snapshot_replaces_earlier_one() {
        let mut view = LeaderboardView::new();
        let mut first = Snapshot::default();
        first.one_hour = totals(10, 0, 0, 0);
        let mut second = Snapshot::default();
        second.one_hour = totals(0, 5, 0, 0);

        view.apply_snapshot(first);
        view.apply_snapshot(second);

        let points = |group: Group| {
            view.entries()
                .iter()
                .find(|entry| entry.group == group)
                .map(|entry| entry.points)
                .unwrap()
        };
        assert_eq!(points(Group::Gryff), 0);
        assert_eq!(points(Group::Slyth), 5);
        assert_eq!(view.snapshot(), &second);
    }

    #[test]
    fn reselecting_a_window_yields_identical_entries() {
        let mut view = LeaderboardView::new();
        view.apply_snapshot(sample_snapshot());

        view.select_window(TimeWindow::FiveMinutes);
        let first = view.entries().to_vec();
        view.select_window(TimeWindow::AllTime);
        assert_ne!(view.entries(), first.as_slice());
        view.select_window(TimeWindow::FiveMinutes);
        assert_eq!(view.entries(), first.as_slice());
    }

    #[test]
    fn push_reorders_default_window() {
        let mut view = LeaderboardView::new();
        assert_eq!(view.selected(), TimeWindow::OneHour);
        assert_eq!(order(view.entries()), Group::ALL.to_vec());
        assert!(view.entries().iter().all(|entry| entry.width_percent() == 0.0));

        let mut update = Snapshot::default();
        update.one_hour = totals(30, 50, 10, 0);
        view.apply_snapshot(update);

        let rendered: Vec<(Group, u64, f32)> = view
            .entries()
            .iter()
            .map(|entry| (entry.group, entry.points, entry.width_percent()))
            .collect();
        let expected = [
            (Group::Slyth, 50, 100.0),
            (Group::Gryff, 30, 60.0),
            (Group::Raven, 10, 20.0),
            (Group::Huff, 0, 0.0),
        ];
        assert_eq!(view.max_points(), 50);
        for ((group, points, width), (want_group, want_points, want_width)) in
            rendered.into_iter().zip(expected)
        {
            assert_eq!(group, want_group);
            assert_eq!(points, want_points);
            assert!((width - want_width).abs() < 1e-3);
        }
    }

    #[test]
    fn max_points_tracks_selected_window() {
        let snapshot = sample_snapshot();
        assert_eq!(max_points(&snapshot, TimeWindow::FiveMinutes), 9);
        assert_eq!(max_points(&snapshot, TimeWindow::OneHour), 50);
        assert_eq!(max_points(&snapshot, TimeWindow::AllTime), 200);
    }
}
