use crate::model::ScraperError;
use std::time::Duration;

/// One browsing context bound to a single proxy.
#[async_trait::async_trait]
pub trait PageSession: Send {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError>;

    /// Resolves once `selector` matches, or fails with `ScraperError::Timeout`.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// Scrolls the element matched by `container` (or the page) down by `dy` pixels.
    async fn scroll(&mut self, container: &str, dy: i64) -> Result<(), ScraperError>;

    /// Current rendered HTML.
    async fn content(&mut self) -> Result<String, ScraperError>;

    /// Clicks the control matched by `selector` when it is visible.
    /// `Ok(false)` means there is no such control to click.
    async fn click_next(&mut self, selector: &str) -> Result<bool, ScraperError>;

    async fn close(&mut self) -> Result<(), ScraperError>;
}

#[async_trait::async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, proxy: &str) -> Result<Box<dyn PageSession>, ScraperError>;
}
