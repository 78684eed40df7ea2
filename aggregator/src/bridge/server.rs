use crate::bridge::model::{CommandReply, ErrorReply, LeaderboardQuery, StatusReply};
use crate::workflow::Feed;
use futures_util::{SinkExt, StreamExt};
use leaderboard_core::channel::encode_update;
use leaderboard_core::TimeWindow;
use log::{info, warn};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;
use warp::http::StatusCode;
use warp::ws::{Message, WebSocket, Ws};
use warp::Filter;

fn with_feed(feed: Arc<Feed>) -> impl Filter<Extract = (Arc<Feed>,), Error = Infallible> + Clone {
    warp::any().map(move || feed.clone())
}

fn internal_error(err: anyhow::Error) -> warp::reply::WithStatus<warp::reply::Json> {
    warn!("request failed: {:#}", err);
    warp::reply::with_status(
        warp::reply::json(&ErrorReply {
            error: err.to_string(),
        }),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

/// HTTP control surface plus the `/ws` push channel.
pub fn routes(
    feed: Arc<Feed>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let start_route = warp::path!("api" / "start")
        .and(warp::post())
        .and(with_feed(feed.clone()))
        .map(|feed: Arc<Feed>| {
            feed.start();
            warp::reply::json(&CommandReply::new("started"))
        });

    let stop_route = warp::path!("api" / "stop")
        .and(warp::post())
        .and(with_feed(feed.clone()))
        .map(|feed: Arc<Feed>| {
            feed.stop();
            warp::reply::json(&CommandReply::new("stopped"))
        });

    let status_route = warp::path!("api" / "status")
        .and(warp::get())
        .and(with_feed(feed.clone()))
        .map(|feed: Arc<Feed>| {
            warp::reply::json(&StatusReply::new(
                feed.is_active(),
                feed.metrics().snapshot(),
            ))
        });

    let leaderboard_route = warp::path!("api" / "leaderboard")
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(with_feed(feed.clone()))
        .map(|query: LeaderboardQuery, feed: Arc<Feed>| {
            let window = match query.window.as_deref().unwrap_or("all").parse::<TimeWindow>() {
                Ok(window) => window,
                Err(err) => {
                    return warp::reply::with_status(
                        warp::reply::json(&ErrorReply {
                            error: err.to_string(),
                        }),
                        StatusCode::BAD_REQUEST,
                    )
                }
            };
            match feed.totals(window, Instant::now()) {
                Ok(totals) => {
                    warp::reply::with_status(warp::reply::json(&totals), StatusCode::OK)
                }
                Err(err) => internal_error(err),
            }
        });

    let ws_route = warp::path("ws")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_feed(feed))
        .map(|ws: Ws, feed: Arc<Feed>| ws.on_upgrade(move |socket| handle_socket(socket, feed)));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"]);

    start_route
        .or(stop_route)
        .or(status_route)
        .or(leaderboard_route)
        .or(ws_route)
        .with(cors)
}

async fn handle_socket(socket: WebSocket, feed: Arc<Feed>) {
    info!("Client connected");
    // Subscribe before the greeting so no update slips in between.
    let mut rx = feed.subscribe();
    let (mut outbound, mut inbound) = socket.split();

    let greeting = feed
        .snapshot(Instant::now())
        .and_then(|snapshot| Ok(encode_update(&snapshot)?));
    match greeting {
        Ok(frame) => {
            if outbound.send(Message::text(frame)).await.is_err() {
                return;
            }
        }
        Err(err) => warn!("could not build greeting snapshot: {:#}", err),
    }

    loop {
        tokio::select! {
            update = rx.recv() => {
                match update {
                    Ok(frame) => {
                        if outbound.send(Message::text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("channel lagged, skipped {} updates", skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            message = inbound.next() => {
                match message {
                    Some(Ok(message)) if message.is_close() => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!("ws error: {}", err);
                        break;
                    }
                    None => break,
                }
            }
        }
    }
    info!("Client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::AggregatorConfig;
    use leaderboard_core::channel::decode_frame;
    use leaderboard_core::{Group, GroupTotals, Snapshot};

    fn feed() -> Arc<Feed> {
        Arc::new(Feed::new(&AggregatorConfig {
            seed: Some(11),
            interval_ms: 5_000,
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn start_and_stop_toggle_feed() {
        let feed = feed();
        let api = routes(feed.clone());

        let response = warp::test::request()
            .method("POST")
            .path("/api/start")
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);
        let reply: CommandReply = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(reply.status, "started");
        assert!(feed.is_active());

        let response = warp::test::request()
            .method("POST")
            .path("/api/stop")
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);
        assert!(!feed.is_active());

        let response = warp::test::request()
            .method("GET")
            .path("/api/status")
            .reply(&api)
            .await;
        let status: StatusReply = serde_json::from_slice(response.body()).unwrap();
        assert!(!status.active);
    }

    #[tokio::test]
    async fn control_routes_reject_get() {
        let api = routes(feed());
        let response = warp::test::request()
            .method("GET")
            .path("/api/start")
            .reply(&api)
            .await;
        assert_eq!(response.status(), 405);
    }

    #[tokio::test]
    async fn leaderboard_reports_requested_window() {
        let feed = feed();
        let snapshot = feed.ingest_once(Instant::now()).unwrap();
        let api = routes(feed);

        let response = warp::test::request()
            .path("/api/leaderboard?window=5min")
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);
        let totals: GroupTotals = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(totals, snapshot.five_min);

        let response = warp::test::request()
            .path("/api/leaderboard")
            .reply(&api)
            .await;
        let totals: GroupTotals = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(totals, snapshot.all);

        let response = warp::test::request()
            .path("/api/leaderboard?window=fortnight")
            .reply(&api)
            .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn channel_greets_with_snapshot_then_forwards_updates() {
        let feed = feed();
        let api = routes(feed.clone());
        let mut client = warp::test::ws()
            .path("/ws")
            .handshake(api)
            .await
            .expect("handshake");

        let greeting = client.recv().await.expect("greeting");
        let snapshot = decode_frame(greeting.to_str().unwrap()).unwrap();
        assert_eq!(snapshot, Snapshot::default());

        let pushed = feed.ingest_once(Instant::now()).unwrap();
        let update = client.recv().await.expect("update");
        let received = decode_frame(update.to_str().unwrap()).unwrap();
        assert_eq!(received, pushed);
        let total: u64 = Group::ALL.iter().map(|g| received.all.get(*g)).sum();
        assert!(total > 0);
    }
}
