use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "ONTHISDAY";

/// Runtime settings: built-in defaults overlaid with `ONTHISDAY_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub cache_dir: PathBuf,
    /// MediaWiki API endpoint; `{lang}` is replaced by the language code.
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub warm_concurrency: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_config(
            Config::builder().add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    fn from_config(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        builder
            .set_default("cache_dir", "data/events")?
            .set_default("endpoint", "https://{lang}.wikipedia.org/w/api.php")?
            .set_default("user_agent", concat!("onthisday/", env!("CARGO_PKG_VERSION")))?
            .set_default("timeout_secs", 10_i64)?
            .set_default("warm_concurrency", 4_i64)?
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::from_config(Config::builder()).unwrap();
        assert_eq!(s.cache_dir, PathBuf::from("data/events"));
        assert_eq!(s.timeout(), Duration::from_secs(10));
        assert_eq!(s.endpoint, "https://{lang}.wikipedia.org/w/api.php");
        assert!(s.user_agent.starts_with("onthisday/"));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let builder = Config::builder()
            .set_override("cache_dir", "/tmp/otd")
            .unwrap()
            .set_override("timeout_secs", 3_i64)
            .unwrap();
        let s = Settings::from_config(builder).unwrap();
        assert_eq!(s.cache_dir, PathBuf::from("/tmp/otd"));
        assert_eq!(s.timeout_secs, 3);
        assert_eq!(s.warm_concurrency, 4);
    }
}
