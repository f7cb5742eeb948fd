use crate::error::{PanelError, Result};
use dotenv::var;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:10000";
pub const DEFAULT_POLL_MS: u64 = 7000;

pub const SNAPSHOT_PATH: &str = "/api/snapshot";
pub const QUERY_PATH: &str = "/perguntar";

/// Runtime settings, read from the environment (and `.env`) and then
/// optionally overridden from the command line.
///
/// | variable           | default                  |
/// |--------------------|--------------------------|
/// | `SNAPDESK_URL`     | `http://127.0.0.1:10000` |
/// | `SNAPDESK_POLL_MS` | `7000`                   |
/// | `USER_AGENT`       | `snapdesk/<version>`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub base_url: Url,
    pub poll_every: Duration,
    pub user_agent: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url"),
            poll_every: Duration::from_millis(DEFAULT_POLL_MS),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("snapdesk/{}", env!("CARGO_PKG_VERSION"))
}

impl PanelConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = PanelConfig::default();

        if let Ok(url) = var("SNAPDESK_URL") {
            config.set_base_url(&url)?;
        }
        if let Ok(ms) = var("SNAPDESK_POLL_MS") {
            config.poll_every = parse_poll_ms(&ms)?;
        }
        if let Ok(agent) = var("USER_AGENT") {
            config.user_agent = agent;
        }

        log::debug!("panel configuration loaded: {config:?}");
        Ok(config)
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        self.base_url = Url::parse(url)?;
        Ok(())
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::new(&self.base_url)
    }
}

pub fn parse_poll_ms(ms: &str) -> Result<Duration> {
    match ms.trim().parse::<u64>() {
        Ok(0) => Err(PanelError::Config("poll interval must be above zero".to_string())),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(PanelError::Config(format!("invalid poll interval {ms:?}: {e}"))),
    }
}

/// The two backend routes, resolved against the base url once.
///
/// Paths are absolute, so any path on the base url is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub snapshot: Url,
    pub query: Url,
}

impl Endpoints {
    pub fn new(base: &Url) -> Result<Self> {
        Ok(Endpoints {
            snapshot: base.join(SNAPSHOT_PATH)?,
            query: base.join(QUERY_PATH)?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
