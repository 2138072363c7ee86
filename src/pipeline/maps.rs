use super::{Pipeline, ScrapeReport, Target, log_termination, maps_url};
use crate::model::{ScraperError, StorageError};
use crate::normalizer::ListingSet;
use crate::retry::{AttemptOutcome, RetryMachine, Step};
use crate::scraper::PageSession;
use tokio::time::sleep;
use tracing::{debug, info, warn};

const FEED_SELECTOR: &str = "div[role='feed']";
const NEXT_PAGE_SELECTOR: &str = "button[aria-label='Next page']";

impl Pipeline {
    /// One browser per attempt, reused across pages. Results survive failed
    /// attempts and are always saved.
    pub(super) async fn run_maps(&self, query: &str) -> Result<ScrapeReport, StorageError> {
        info!("Starting Google Maps scrape for: {}", query);

        let mut results = ListingSet::new();
        let mut machine = RetryMachine::new(self.config.max_attempts);

        loop {
            let (number, proxy) = match machine.next(&self.pool, &mut rand::rng()) {
                Step::Attempt { number, proxy } => (number, proxy),
                Step::Stop(termination) => {
                    log_termination(termination, query);
                    break;
                }
            };
            info!("Using proxy: {} (Attempt {})", proxy, number);

            let outcome = self.maps_attempt(query, &proxy, &mut results).await;
            match &outcome {
                AttemptOutcome::Succeeded => {}
                AttemptOutcome::SidebarTimeout => {
                    warn!("Sidebar did not load in time. Retrying...");
                }
                AttemptOutcome::Failed(e) => {
                    warn!("Proxy {} failed: {}", proxy, e);
                    sleep(self.config.timing.retry_delay()).await;
                }
            }
            machine.record(outcome);
        }

        let listings = results.into_vec();
        let path = self.store.save(query, Target::Maps.label(), &listings)?;
        Ok(ScrapeReport::saved(listings, path))
    }

    async fn maps_attempt(
        &self,
        query: &str,
        proxy: &str,
        results: &mut ListingSet,
    ) -> AttemptOutcome {
        let mut session = match self.factory.open(proxy).await {
            Ok(session) => session,
            Err(e) => return AttemptOutcome::Failed(e),
        };

        let outcome = self.drive_maps(session.as_mut(), query, results).await;

        if let Err(e) = session.close().await {
            debug!("Session close failed: {}", e);
        }
        outcome
    }

    async fn drive_maps(
        &self,
        session: &mut dyn PageSession,
        query: &str,
        results: &mut ListingSet,
    ) -> AttemptOutcome {
        let url = match maps_url(query) {
            Ok(url) => url,
            Err(e) => return AttemptOutcome::Failed(e),
        };
        info!("Navigating to: {}", url);
        if let Err(e) = session.goto(&url).await {
            return AttemptOutcome::Failed(e);
        }

        match session
            .wait_for(FEED_SELECTOR, self.config.timing.sidebar_timeout())
            .await
        {
            Ok(()) => {}
            Err(ScraperError::Timeout(_)) => return AttemptOutcome::SidebarTimeout,
            Err(e) => return AttemptOutcome::Failed(e),
        }

        match self.paginate_maps(session, query, results).await {
            Ok(()) => AttemptOutcome::Succeeded,
            Err(e) => AttemptOutcome::Failed(e),
        }
    }

    async fn paginate_maps(
        &self,
        session: &mut dyn PageSession,
        query: &str,
        results: &mut ListingSet,
    ) -> Result<(), ScraperError> {
        let max_pages = self.config.max_pages;

        for page in 1..=max_pages {
            info!("--- Processing Page {} ---", page);

            // Lazy feed: results load as it scrolls.
            for _ in 0..self.config.scroll_ticks {
                session.scroll(FEED_SELECTOR, self.config.scroll_step).await?;
                sleep(self.config.timing.scroll_pause()).await;
            }

            let html = session.content().await?;
            self.collect(Target::Maps, query, &html, page, results);

            if page == max_pages {
                break;
            }
            match session.click_next(NEXT_PAGE_SELECTOR).await {
                Ok(true) => {
                    info!("Clicked Next Page...");
                    sleep(self.config.timing.page_delay()).await;
                }
                Ok(false) => {
                    info!("Next button not found. End of results.");
                    break;
                }
                Err(e) => {
                    warn!("Could not click next: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }
}
