use crate::model::ProxyError;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Proxy URIs loaded from a newline-separated file.
#[derive(Debug, Clone)]
pub struct ProxyPool {
    proxies: Vec<String>,
}

impl ProxyPool {
    /// Reads `path`, keeping every non-blank trimmed line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProxyError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ProxyError::Missing { path: display.clone() },
            _ => ProxyError::Io {
                path: display.clone(),
                source,
            },
        })?;

        Self::from_lines(&content).ok_or(ProxyError::Empty { path: display })
    }

    /// Builds a pool from raw file content; `None` when no usable line is present.
    pub fn from_lines(content: &str) -> Option<Self> {
        let proxies: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if proxies.is_empty() {
            None
        } else {
            Some(Self { proxies })
        }
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Uniform random pick. The pool is never empty once constructed.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.proxies
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
