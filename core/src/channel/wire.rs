use super::EventKind;
use crate::model::Snapshot;
use crate::prelude::{ChannelError, ChannelResult};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct OutboundFrame<'a> {
    event: &'static str,
    data: &'a Snapshot,
}

#[derive(Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Serializes a snapshot as a `leaderboard_update` text frame.
pub fn encode_update(snapshot: &Snapshot) -> ChannelResult<String> {
    let frame = OutboundFrame {
        event: EventKind::LeaderboardUpdate.name(),
        data: snapshot,
    };
    Ok(serde_json::to_string(&frame)?)
}

/// Parses a text frame into the snapshot it carries.
///
/// Frames with missing windows or groups are rejected rather than patched.
pub fn decode_frame(text: &str) -> ChannelResult<Snapshot> {
    let frame: InboundFrame = serde_json::from_str(text)?;
    if frame.event != EventKind::LeaderboardUpdate.name() {
        return Err(ChannelError::UnknownEvent(frame.event));
    }
    Ok(serde_json::from_value(frame.data)?)
}
