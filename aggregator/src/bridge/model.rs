use leaderboard_core::telemetry::Counters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandReply {
    pub status: String,
}

impl CommandReply {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusReply {
    pub active: bool,
    pub ingested: u64,
    pub broadcast: u64,
    pub errors: u64,
}

impl StatusReply {
    pub fn new(active: bool, counters: Counters) -> Self {
        Self {
            active,
            ingested: counters.ingested,
            broadcast: counters.broadcast,
            errors: counters.errors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorReply {
    pub error: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub window: Option<String>,
}
