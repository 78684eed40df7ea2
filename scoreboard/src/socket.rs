use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream, StreamExt};
use iced::stream;
use leaderboard_core::channel::decode_frame;
use leaderboard_core::prelude::{ChannelResult, CHANNEL_URL};
use leaderboard_core::{ChannelEvent, Transport};
use log::{debug, warn};
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Push channel handle. The socket worker below only runs while the link is open.
#[derive(Debug, Default)]
pub struct SocketLink {
    open: bool,
}

impl Transport for SocketLink {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> ChannelResult<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }
}

/// Socket worker: reports lifecycle events and decoded updates, and
/// reconnects after a fixed delay whenever the socket ends.
pub fn connect() -> impl Stream<Item = ChannelEvent> {
    stream::channel(100, |mut output: mpsc::Sender<ChannelEvent>| async move {
        loop {
            match tokio_tungstenite::connect_async(CHANNEL_URL).await {
                Ok((mut socket, _response)) => {
                    let _ = output.send(ChannelEvent::Connect).await;
                    while let Some(message) = socket.next().await {
                        match message {
                            Ok(Message::Text(text)) => match decode_frame(text.as_str()) {
                                Ok(snapshot) => {
                                    let _ = output
                                        .send(ChannelEvent::LeaderboardUpdate(snapshot))
                                        .await;
                                }
                                Err(err) => warn!("ignoring frame: {}", err),
                            },
                            Ok(Message::Close(_)) => break,
                            Ok(_) => {}
                            Err(err) => {
                                warn!("channel error: {}", err);
                                break;
                            }
                        }
                    }
                    let _ = output.send(ChannelEvent::Disconnect).await;
                }
                Err(err) => debug!("channel connect to {} failed: {}", CHANNEL_URL, err),
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    })
}
