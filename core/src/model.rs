use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// One of the four competing houses. Declaration order is the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    Gryff,
    Slyth,
    Raven,
    Huff,
}

/// Static display metadata for a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMeta {
    pub name: &'static str,
    pub color: Rgb,
    pub emblem: &'static str,
}

const GRYFF: GroupMeta = GroupMeta {
    name: "Gryffindor",
    color: Rgb::new(0xdc, 0x14, 0x3c),
    emblem: "🦁",
};
const SLYTH: GroupMeta = GroupMeta {
    name: "Slytherin",
    color: Rgb::new(0x2d, 0x5a, 0x3d),
    emblem: "🐍",
};
const RAVEN: GroupMeta = GroupMeta {
    name: "Ravenclaw",
    color: Rgb::new(0x1e, 0x3a, 0x8a),
    emblem: "🦅",
};
const HUFF: GroupMeta = GroupMeta {
    name: "Hufflepuff",
    color: Rgb::new(0xea, 0xb3, 0x08),
    emblem: "🦡",
};

impl Group {
    pub const ALL: [Group; 4] = [Group::Gryff, Group::Slyth, Group::Raven, Group::Huff];

    pub fn meta(self) -> &'static GroupMeta {
        match self {
            Group::Gryff => &GRYFF,
            Group::Slyth => &SLYTH,
            Group::Raven => &RAVEN,
            Group::Huff => &HUFF,
        }
    }

    /// Key used for this group in wire payloads.
    pub fn key(self) -> &'static str {
        match self {
            Group::Gryff => "Gryff",
            Group::Slyth => "Slyth",
            Group::Raven => "Raven",
            Group::Huff => "Huff",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.meta().name)
    }
}

/// 8-bit RGB accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Components scaled to `0.0..=1.0` for renderers that take floats.
    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Aggregation horizon over which points are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "5min")]
    FiveMinutes,
    #[default]
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "all")]
    AllTime,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [
        TimeWindow::FiveMinutes,
        TimeWindow::OneHour,
        TimeWindow::AllTime,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TimeWindow::FiveMinutes => "5min",
            TimeWindow::OneHour => "1hour",
            TimeWindow::AllTime => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::FiveMinutes => "Last 5 Minutes",
            TimeWindow::OneHour => "Last 1 Hour",
            TimeWindow::AllTime => "All Time",
        }
    }

    /// How far back the window reaches; `None` for all time.
    pub fn horizon(self) -> Option<Duration> {
        match self {
            TimeWindow::FiveMinutes => Some(Duration::from_secs(5 * 60)),
            TimeWindow::OneHour => Some(Duration::from_secs(60 * 60)),
            TimeWindow::AllTime => None,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown time window: {0}")]
pub struct UnknownWindow(pub String);

impl FromStr for TimeWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::ALL
            .into_iter()
            .find(|window| window.key() == s)
            .ok_or_else(|| UnknownWindow(s.to_string()))
    }
}

/// Point totals for every group within one window. All four keys are required on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupTotals {
    #[serde(rename = "Gryff")]
    pub gryff: u64,
    #[serde(rename = "Slyth")]
    pub slyth: u64,
    #[serde(rename = "Raven")]
    pub raven: u64,
    #[serde(rename = "Huff")]
    pub huff: u64,
}

impl GroupTotals {
    pub fn get(&self, group: Group) -> u64 {
        match group {
            Group::Gryff => self.gryff,
            Group::Slyth => self.slyth,
            Group::Raven => self.raven,
            Group::Huff => self.huff,
        }
    }

    pub fn get_mut(&mut self, group: Group) -> &mut u64 {
        match group {
            Group::Gryff => &mut self.gryff,
            Group::Slyth => &mut self.slyth,
            Group::Raven => &mut self.raven,
            Group::Huff => &mut self.huff,
        }
    }

    /// Totals in canonical group order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, u64)> + '_ {
        Group::ALL.into_iter().map(move |group| (group, self.get(group)))
    }

    pub fn max(&self) -> u64 {
        self.iter().map(|(_, points)| points).max().unwrap_or(0)
    }
}

/// Full set of totals across every window, always replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "5min")]
    pub five_min: GroupTotals,
    #[serde(rename = "1hour")]
    pub one_hour: GroupTotals,
    #[serde(rename = "all")]
    pub all: GroupTotals,
}

impl Snapshot {
    pub fn window(&self, window: TimeWindow) -> &GroupTotals {
        match window {
            TimeWindow::FiveMinutes => &self.five_min,
            TimeWindow::OneHour => &self.one_hour,
            TimeWindow::AllTime => &self.all,
        }
    }

    pub fn window_mut(&mut self, window: TimeWindow) -> &mut GroupTotals {
        match window {
            TimeWindow::FiveMinutes => &mut self.five_min,
            TimeWindow::OneHour => &mut self.one_hour,
            TimeWindow::AllTime => &mut self.all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_one_hour() {
        assert_eq!(TimeWindow::default(), TimeWindow::OneHour);
    }

    #[test]
    fn window_keys_parse_back() {
        for window in TimeWindow::ALL {
            assert_eq!(window.key().parse::<TimeWindow>().unwrap(), window);
        }
        assert!("10min".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn snapshot_uses_wire_keys() {
        let mut snapshot = Snapshot::default();
        *snapshot.window_mut(TimeWindow::FiveMinutes).get_mut(Group::Raven) = 7;
        let value = serde_json::to_value(snapshot).unwrap();
        assert_eq!(value["5min"]["Raven"], 7);
        assert_eq!(value["all"]["Gryff"], 0);
    }

    #[test]
    fn partial_snapshot_is_rejected() {
        let missing_group = r#"{"5min":{"Gryff":1,"Slyth":2,"Raven":3},
            "1hour":{"Gryff":0,"Slyth":0,"Raven":0,"Huff":0},
            "all":{"Gryff":0,"Slyth":0,"Raven":0,"Huff":0}}"#;
        assert!(serde_json::from_str::<Snapshot>(missing_group).is_err());

        let missing_window = r#"{"5min":{"Gryff":1,"Slyth":2,"Raven":3,"Huff":4},
            "all":{"Gryff":0,"Slyth":0,"Raven":0,"Huff":0}}"#;
        assert!(serde_json::from_str::<Snapshot>(missing_window).is_err());
    }

    #[test]
    fn negative_points_are_rejected() {
        let negative = r#"{"Gryff":-1,"Slyth":0,"Raven":0,"Huff":0}"#;
        assert!(serde_json::from_str::<GroupTotals>(negative).is_err());
    }

    #[test]
    fn group_metadata_is_static() {
        assert_eq!(Group::Gryff.meta().name, "Gryffindor");
        assert_eq!(Group::Huff.meta().color.hex(), "#eab308");
        assert_eq!(Group::Slyth.meta().emblem, "🐍");
    }
}
