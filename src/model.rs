// Core structs: Listing, error enums
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One business/place record extracted from a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub phone: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub image: Option<String>,
    pub source_page: u32,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("timed out waiting for `{0}`")]
    Timeout(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("invalid response status {0}")]
    InvalidResponse(u16),
    #[error("browser error: {0}")]
    Browser(String),
    #[error("navigation error: {0}")]
    Navigation(String),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy file not found: {path}")]
    Missing { path: String },
    #[error("failed to read proxy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no proxies loaded from {path}")]
    Empty { path: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize listings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
