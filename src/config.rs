use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

pub const DEFAULT_QUERY: &str = "restaurants in rabat";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Pauses and timeouts, all in milliseconds so tests can zero them out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub scroll_pause_ms: u64,
    pub page_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub sidebar_timeout_ms: u64,
    pub navigation_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_pause_ms: 1_000,
            page_delay_ms: 3_000,
            retry_delay_ms: 2_000,
            sidebar_timeout_ms: 15_000,
            navigation_timeout_ms: 60_000,
        }
    }
}

impl TimingConfig {
    /// Every pause set to zero; timeouts kept.
    pub fn instant() -> Self {
        Self {
            scroll_pause_ms: 0,
            page_delay_ms: 0,
            retry_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn sidebar_timeout(&self) -> Duration {
        Duration::from_millis(self.sidebar_timeout_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub proxies_file: String,
    pub output_dir: String,
    pub webdriver_url: String,
    pub user_agent: String,
    pub headless: bool,
    pub max_pages: u32,
    pub max_attempts: u32,
    pub scroll_ticks: u32,
    pub scroll_step: i64,
    pub timing: TimingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proxies_file: "proxies.txt".to_string(),
            output_dir: "data".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: true,
            max_pages: 3,
            max_attempts: 3,
            scroll_ticks: 5,
            scroll_step: 1_000,
            timing: TimingConfig::default(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(config)
}
