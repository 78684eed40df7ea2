//! Synchronization core for the live house points leaderboard.
//!
//! The modules keep a consistent client-side view of the aggregator's
//! time-windowed totals while push events and start/stop control calls
//! interleave. Nothing in here performs I/O; transports and HTTP executors
//! are supplied by the binaries.

pub mod channel;
pub mod control;
pub mod model;
pub mod prelude;
pub mod telemetry;
pub mod view;

pub use channel::{ChannelEvent, ConnectionManager, Connectivity, EventKind, SubscriptionHandle};
pub use control::{ControlClient, ControlCommand, ControlRequest, ControlResponse};
pub use model::{Group, GroupMeta, GroupTotals, Rgb, Snapshot, TimeWindow};
pub use prelude::{ChannelError, ControlError, Transport};
pub use view::{DisplayEntry, LeaderboardView, Ranking};
