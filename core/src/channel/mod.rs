pub mod manager;
pub mod wire;

pub use manager::{ConnectionManager, SubscriptionHandle};
pub use wire::{decode_frame, encode_update};

use crate::model::Snapshot;
use std::fmt;

/// Binary reachability of the aggregator as seen by the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    Connected,
    #[default]
    Disconnected,
}

impl Connectivity {
    pub fn label(self) -> &'static str {
        match self {
            Connectivity::Connected => "Connected",
            Connectivity::Disconnected => "Disconnected",
        }
    }

    pub fn is_connected(self) -> bool {
        self == Connectivity::Connected
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connect,
    Disconnect,
    LeaderboardUpdate,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Connect => "connect",
            EventKind::Disconnect => "disconnect",
            EventKind::LeaderboardUpdate => "leaderboard_update",
        }
    }
}

/// An event observed on the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connect,
    Disconnect,
    LeaderboardUpdate(Snapshot),
}

impl ChannelEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ChannelEvent::Connect => EventKind::Connect,
            ChannelEvent::Disconnect => EventKind::Disconnect,
            ChannelEvent::LeaderboardUpdate(_) => EventKind::LeaderboardUpdate,
        }
    }
}
