use crate::model::ScraperError;
use crate::scraper::traits::{PageSession, SessionFactory};

use reqwest::{Client, Proxy};
use scraper::{Html, Selector};
use std::time::Duration;

/// Plain HTTP sessions: one `reqwest` client per proxy, no script execution.
pub struct HttpFactory {
    user_agent: String,
    timeout: Duration,
}

impl HttpFactory {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl SessionFactory for HttpFactory {
    async fn open(&self, proxy: &str) -> Result<Box<dyn PageSession>, ScraperError> {
        let proxy = Proxy::all(proxy).map_err(|e| ScraperError::Http(e.to_string()))?;
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .proxy(proxy)
            .timeout(self.timeout)
            .build()
            .map_err(|e| ScraperError::Http(e.to_string()))?;

        Ok(Box::new(HttpSession {
            client,
            body: String::new(),
        }))
    }
}

pub struct HttpSession {
    client: Client,
    body: String,
}

impl HttpSession {
    fn matches(&self, selector: &str) -> Result<bool, ScraperError> {
        let selector = Selector::parse(selector)
            .map_err(|e| ScraperError::Navigation(format!("bad selector `{selector}`: {e}")))?;
        let document = Html::parse_document(&self.body);
        let found = document.select(&selector).next().is_some();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl PageSession for HttpSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScraperError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScraperError::InvalidResponse(response.status().as_u16()));
        }

        self.body = response
            .text()
            .await
            .map_err(|e| ScraperError::Http(e.to_string()))?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<(), ScraperError> {
        // The body is final once fetched; there is nothing to wait for.
        if self.matches(selector)? {
            Ok(())
        } else {
            Err(ScraperError::Timeout(selector.to_string()))
        }
    }

    async fn scroll(&mut self, _container: &str, _dy: i64) -> Result<(), ScraperError> {
        Ok(())
    }

    async fn content(&mut self) -> Result<String, ScraperError> {
        Ok(self.body.clone())
    }

    async fn click_next(&mut self, _selector: &str) -> Result<bool, ScraperError> {
        Ok(false)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        Ok(())
    }
}
