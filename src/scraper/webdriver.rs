use crate::model::ScraperError;
use crate::scraper::traits::{PageSession, SessionFactory};

use serde_json::json;
use std::time::Duration;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

const SCROLL_SCRIPT: &str = r#"
    const target = document.querySelector(arguments[0]) || document.scrollingElement;
    target.scrollBy(0, arguments[1]);
"#;

impl From<WebDriverError> for ScraperError {
    fn from(e: WebDriverError) -> Self {
        ScraperError::Browser(e.to_string())
    }
}

/// Only "not found" and server-side timeouts count as the wait running out;
/// a dead session or refused connection is a browser failure.
fn wait_failure(selector: &str, e: WebDriverError) -> ScraperError {
    match e {
        WebDriverError::NoSuchElement(_) | WebDriverError::WebDriverTimeout(_) => {
            ScraperError::Timeout(selector.to_string())
        }
        other => other.into(),
    }
}

/// Chrome sessions driven through a WebDriver server (chromedriver, selenium).
pub struct WebDriverFactory {
    server_url: String,
    user_agent: String,
    headless: bool,
    page_load_timeout: Duration,
}

impl WebDriverFactory {
    pub fn new(
        server_url: impl Into<String>,
        user_agent: impl Into<String>,
        headless: bool,
        page_load_timeout: Duration,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            user_agent: user_agent.into(),
            headless,
            page_load_timeout,
        }
    }
}

#[async_trait::async_trait]
impl SessionFactory for WebDriverFactory {
    async fn open(&self, proxy: &str) -> Result<Box<dyn PageSession>, ScraperError> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.set_headless()?;
        }
        caps.add_arg(&format!("--user-agent={}", self.user_agent))?;
        caps.add_arg(&format!("--proxy-server={proxy}"))?;

        let driver = WebDriver::new(self.server_url.as_str(), caps).await?;
        if let Err(e) = driver.set_page_load_timeout(self.page_load_timeout).await {
            let _ = driver.quit().await;
            return Err(e.into());
        }

        Ok(Box::new(WebDriverSession { driver }))
    }
}

pub struct WebDriverSession {
    driver: WebDriver,
}

#[async_trait::async_trait]
impl PageSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), ScraperError> {
        self.driver
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .map(|_| ())
            .map_err(|e| wait_failure(selector, e))
    }

    async fn scroll(&mut self, container: &str, dy: i64) -> Result<(), ScraperError> {
        self.driver
            .execute(SCROLL_SCRIPT, vec![json!(container), json!(dy)])
            .await?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String, ScraperError> {
        Ok(self.driver.source().await?)
    }

    async fn click_next(&mut self, selector: &str) -> Result<bool, ScraperError> {
        let button = match self.driver.find(By::Css(selector)).await {
            Ok(button) => button,
            Err(_) => return Ok(false),
        };
        if !button.is_displayed().await? {
            return Ok(false);
        }
        button.click().await?;
        Ok(true)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        if let Err(e) = self.driver.clone().quit().await {
            warn!("Failed to quit browser session: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}
