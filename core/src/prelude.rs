/// Endpoint of the aggregator's HTTP surface.
pub const BACKEND_URL: &str = "http://localhost:5001";

/// Endpoint of the aggregator's push channel.
pub const CHANNEL_URL: &str = "ws://localhost:5001/ws";

/// Errors raised while decoding or managing the push channel.
#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors raised by start/stop control calls.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// The duplex channel underneath the connection manager.
///
/// Implementations own the actual socket; the manager only asks them to
/// open or close and learns about the outcome through lifecycle events.
pub trait Transport {
    fn is_open(&self) -> bool;
    fn open(&mut self) -> ChannelResult<()>;
    fn close(&mut self);
}
