use anyhow::Context;
use bridge::routes;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::{AggregatorConfig, Feed};

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Demo aggregator feeding the live house points leaderboard")]
struct Args {
    /// Load aggregator settings from YAML; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Milliseconds between generated point awards
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Upper bound for a single award
    #[arg(long)]
    max_points: Option<u64>,
    /// Seed the record generator for a replayable stream
    #[arg(long)]
    seed: Option<u64>,
    /// Begin ingesting immediately instead of waiting for POST /api/start
    #[arg(long, default_value_t = false)]
    autostart: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<AggregatorConfig> {
        let mut config = match &self.config {
            Some(path) => AggregatorConfig::load(path)?,
            None => AggregatorConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(max_points) = self.max_points {
            config.max_points = max_points;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.autostart |= self.autostart;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Args::parse().into_config()?;
    let address = config.bind_address()?;

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating aggregator runtime")?;

    runtime.block_on(async move {
        let feed = Arc::new(Feed::new(&config));
        if config.autostart {
            feed.start();
        }

        let (bound, server) = warp::serve(routes(feed.clone()))
            .try_bind_with_graceful_shutdown(address, async {
                if signal::ctrl_c().await.is_ok() {
                    info!("shutdown requested");
                }
            })
            .with_context(|| format!("binding aggregator to {}", address))?;
        info!("aggregator listening on {}", bound);
        server.await;
        feed.stop();
        Ok::<(), anyhow::Error>(())
    })
}
