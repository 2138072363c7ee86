mod maps;
mod organic;

use crate::config::AppConfig;
use crate::model::{Listing, ParserError, ScraperError, StorageError};
use crate::normalizer::ListingSet;
use crate::parser::{ListingParser, Parser, SelectorStrategy};
use crate::proxy::ProxyPool;
use crate::retry::Termination;
use crate::scraper::SessionFactory;
use crate::storage::JsonStore;
use reqwest::Url;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// File name reported when every organic attempt failed.
pub const FAILED_FILE_NAME: &str = "failed";

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
const ORGANIC_SEARCH_URL: &str = "https://www.google.com/search";
const ORGANIC_PAGE_SIZE: u32 = 10;

/// Which search surface to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    /// Maps results feed, paginated with the "Next page" control.
    Maps,
    /// General web search, paginated by offset.
    Organic,
}

impl Target {
    /// Label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            Target::Maps => "google",
            Target::Organic => "search",
        }
    }
}

/// What one query produced.
#[derive(Debug)]
pub struct ScrapeReport {
    pub listings: Vec<Listing>,
    pub file_name: String,
    /// `None` when nothing was written.
    pub path: Option<PathBuf>,
}

impl ScrapeReport {
    fn saved(listings: Vec<Listing>, path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            listings,
            file_name,
            path: Some(path),
        }
    }

    fn failed() -> Self {
        Self {
            listings: Vec::new(),
            file_name: FAILED_FILE_NAME.to_string(),
            path: None,
        }
    }
}

pub struct Pipeline {
    factory: Box<dyn SessionFactory>,
    pool: ProxyPool,
    store: JsonStore,
    config: AppConfig,
    maps_parser: ListingParser,
    organic_parser: ListingParser,
}

impl Pipeline {
    pub fn new(
        factory: Box<dyn SessionFactory>,
        pool: ProxyPool,
        store: JsonStore,
        config: AppConfig,
    ) -> Result<Self, ParserError> {
        Ok(Self {
            factory,
            pool,
            store,
            config,
            maps_parser: ListingParser::new(&SelectorStrategy::maps())?,
            organic_parser: ListingParser::new(&SelectorStrategy::organic())?,
        })
    }

    pub async fn run(
        &self,
        target: Target,
        query: &str,
    ) -> Result<ScrapeReport, StorageError> {
        match target {
            Target::Maps => self.run_maps(query).await,
            Target::Organic => self.run_organic(query).await,
        }
    }

    /// Parses one page and merges its items into `results`.
    fn collect(
        &self,
        target: Target,
        query: &str,
        html: &str,
        page: u32,
        results: &mut ListingSet,
    ) {
        let parser = match target {
            Target::Maps => &self.maps_parser,
            Target::Organic => &self.organic_parser,
        };
        let items = parser.parse(html, page);
        info!("Found {} items on page.", items.len());

        if items.is_empty() {
            warn!("Page {} produced no items; markup may have changed or there are no matches", page);
            self.store.save_debug_html(query, target.label(), page, html);
            return;
        }

        for item in items {
            let (name, phone) = (item.name.clone(), item.phone.clone());
            if results.insert(item) {
                info!("✅ {} | {}", name, phone.as_deref().unwrap_or("-"));
            }
        }
    }
}

fn log_termination(termination: Termination, query: &str) {
    match termination {
        Termination::Succeeded { attempts } => {
            info!("Finished '{}' after {} attempt(s)", query, attempts)
        }
        Termination::Exhausted { attempts } => {
            error!("All {} attempt(s) failed for '{}'", attempts, query)
        }
    }
}

fn maps_url(query: &str) -> Result<String, ScraperError> {
    let mut url = Url::parse(MAPS_SEARCH_URL).map_err(|e| ScraperError::Navigation(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ScraperError::Navigation("maps url cannot carry a path".into()))?
        .pop_if_empty()
        .push(query);
    Ok(url.into())
}

fn organic_url(query: &str, page: u32) -> Result<String, ScraperError> {
    let start = (page.saturating_sub(1) * ORGANIC_PAGE_SIZE).to_string();
    Url::parse_with_params(ORGANIC_SEARCH_URL, &[("q", query), ("start", start.as_str())])
        .map(String::from)
        .map_err(|e| ScraperError::Navigation(e.to_string()))
}
