use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub host: String,
    pub port: u16,
    /// Delay between generated point awards while the feed is active.
    pub interval_ms: u64,
    pub max_points: u64,
    pub seed: Option<u64>,
    pub autostart: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5001,
            interval_ms: 1000,
            max_points: 10,
            seed: None,
            autostart: false,
        }
    }
}

impl AggregatorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading aggregator config {}", path_ref.display()))?;
        let config: AggregatorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing aggregator config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}
