#![allow(dead_code)]

use async_trait::async_trait;
use local_lead_scraper::config::{AppConfig, TimingConfig};
use local_lead_scraper::model::ScraperError;
use local_lead_scraper::pipeline::Pipeline;
use local_lead_scraper::proxy::ProxyPool;
use local_lead_scraper::scraper::{PageSession, SessionFactory};
use local_lead_scraper::storage::JsonStore;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MAPS_PAGE_1: &str = include_str!("../fixtures/maps_page1.html");
pub const MAPS_PAGE_2: &str = include_str!("../fixtures/maps_page2.html");
pub const MAPS_PAGE_3: &str = include_str!("../fixtures/maps_page3.html");
pub const MAPS_PAGE_4: &str = include_str!("../fixtures/maps_page4.html");
pub const ORGANIC_LOCAL_PACK: &str = include_str!("../fixtures/organic_local_pack.html");
pub const ORGANIC_GENERIC: &str = include_str!("../fixtures/organic_generic.html");
pub const ORGANIC_EMPTY: &str = include_str!("../fixtures/organic_empty.html");

/// How the next opened session behaves.
#[derive(Clone)]
pub enum Plan {
    /// Serves `pages` in order; `fail_at` makes `content()` fail on that page index.
    Serve {
        pages: Vec<&'static str>,
        fail_at: Option<usize>,
    },
    /// Serves `pages`, but the next-page control errors when clicked.
    NextFails { pages: Vec<&'static str> },
    /// Feed never shows up.
    NoFeed,
    /// The feed wait fails for a reason other than running out of time.
    BrokenWait,
    /// Opening the session itself fails.
    FailOpen,
}

impl Plan {
    pub fn serve(pages: &[&'static str]) -> Self {
        Plan::Serve {
            pages: pages.to_vec(),
            fail_at: None,
        }
    }

    pub fn serve_failing_at(pages: &[&'static str], index: usize) -> Self {
        Plan::Serve {
            pages: pages.to_vec(),
            fail_at: Some(index),
        }
    }
}

/// Hands out scripted sessions and records the proxies and URLs it saw.
#[derive(Clone, Default)]
pub struct StubFactory {
    plans: Arc<Mutex<VecDeque<Plan>>>,
    pub proxies: Arc<Mutex<Vec<String>>>,
    pub urls: Arc<Mutex<Vec<String>>>,
}

impl StubFactory {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self {
            plans: Arc::new(Mutex::new(plans.into())),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.proxies.lock().unwrap().len()
    }

    fn session(
        &self,
        pages: Vec<&'static str>,
        fail_at: Option<usize>,
        feed: Feed,
        next_fails: bool,
    ) -> Box<dyn PageSession> {
        Box::new(StubSession {
            pages,
            fail_at,
            feed,
            next_fails,
            current: 0,
            navigations: 0,
            urls: self.urls.clone(),
        })
    }
}

#[derive(Clone, Copy)]
enum Feed {
    Ready,
    Missing,
    Broken,
}

#[async_trait]
impl SessionFactory for StubFactory {
    async fn open(&self, proxy: &str) -> Result<Box<dyn PageSession>, ScraperError> {
        self.proxies.lock().unwrap().push(proxy.to_string());
        let plan = self
            .plans
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Plan::FailOpen);

        match plan {
            Plan::FailOpen => Err(ScraperError::Browser("connection refused".into())),
            Plan::NoFeed => Ok(self.session(vec![], None, Feed::Missing, false)),
            Plan::BrokenWait => Ok(self.session(vec![], None, Feed::Broken, false)),
            Plan::NextFails { pages } => Ok(self.session(pages, None, Feed::Ready, true)),
            Plan::Serve { pages, fail_at } => Ok(self.session(pages, fail_at, Feed::Ready, false)),
        }
    }
}

struct StubSession {
    pages: Vec<&'static str>,
    fail_at: Option<usize>,
    feed: Feed,
    next_fails: bool,
    current: usize,
    navigations: usize,
    urls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PageSession for StubSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.current = self.navigations;
        self.navigations += 1;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<(), ScraperError> {
        match self.feed {
            Feed::Ready => Ok(()),
            Feed::Missing => Err(ScraperError::Timeout(selector.to_string())),
            Feed::Broken => Err(ScraperError::Browser("session deleted".into())),
        }
    }

    async fn scroll(&mut self, _container: &str, _dy: i64) -> Result<(), ScraperError> {
        Ok(())
    }

    async fn content(&mut self) -> Result<String, ScraperError> {
        if self.fail_at == Some(self.current) {
            return Err(ScraperError::Browser("target crashed".into()));
        }
        self.pages
            .get(self.current)
            .map(|page| page.to_string())
            .ok_or_else(|| ScraperError::Navigation("no such page".into()))
    }

    async fn click_next(&mut self, _selector: &str) -> Result<bool, ScraperError> {
        if self.next_fails {
            return Err(ScraperError::Browser("element click intercepted".into()));
        }
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        Ok(())
    }
}

pub fn test_config(output: &Path) -> AppConfig {
    AppConfig {
        output_dir: output.display().to_string(),
        timing: TimingConfig::instant(),
        ..AppConfig::default()
    }
}

pub fn pipeline(factory: &StubFactory, output: &Path) -> Pipeline {
    pipeline_with(factory, test_config(output))
}

pub fn pipeline_with(factory: &StubFactory, config: AppConfig) -> Pipeline {
    let output = std::path::PathBuf::from(&config.output_dir);
    let pool = ProxyPool::from_lines("socks5://10.0.0.1:1080\nsocks5://10.0.0.2:1080\n").unwrap();
    Pipeline::new(
        Box::new(factory.clone()),
        pool,
        JsonStore::new(output),
        config,
    )
    .unwrap()
}

/// JSON files directly under `dir`.
pub fn json_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}
