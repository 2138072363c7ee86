use super::{Pipeline, ScrapeReport, Target, log_termination, organic_url};
use crate::model::{ScraperError, StorageError};
use crate::normalizer::ListingSet;
use crate::retry::{AttemptOutcome, RetryMachine, Step};
use crate::scraper::PageSession;
use tokio::time::sleep;
use tracing::{debug, info, warn};

impl Pipeline {
    /// Fresh session per attempt; only a fully completed attempt is kept.
    pub(super) async fn run_organic(&self, query: &str) -> Result<ScrapeReport, StorageError> {
        info!("Starting organic search scrape for: {}", query);

        let mut machine = RetryMachine::new(self.config.max_attempts);
        let mut completed = None;

        loop {
            let (number, proxy) = match machine.next(&self.pool, &mut rand::rng()) {
                Step::Attempt { number, proxy } => (number, proxy),
                Step::Stop(termination) => {
                    log_termination(termination, query);
                    break;
                }
            };
            info!("Using proxy: {} (Attempt {})", proxy, number);

            match self.organic_attempt(query, &proxy).await {
                Ok(results) => {
                    completed = Some(results);
                    machine.record(AttemptOutcome::Succeeded);
                }
                Err(e) => {
                    warn!("Attempt {} with proxy {} failed: {}", number, proxy, e);
                    sleep(self.config.timing.retry_delay()).await;
                    machine.record(AttemptOutcome::Failed(e));
                }
            }
        }

        let Some(results) = completed else {
            return Ok(ScrapeReport::failed());
        };
        let listings = results.into_vec();
        let path = self.store.save(query, Target::Organic.label(), &listings)?;
        Ok(ScrapeReport::saved(listings, path))
    }

    async fn organic_attempt(&self, query: &str, proxy: &str) -> Result<ListingSet, ScraperError> {
        let mut session = self.factory.open(proxy).await?;
        let result = self.paginate_organic(session.as_mut(), query).await;
        if let Err(e) = session.close().await {
            debug!("Session close failed: {}", e);
        }
        result
    }

    async fn paginate_organic(
        &self,
        session: &mut dyn PageSession,
        query: &str,
    ) -> Result<ListingSet, ScraperError> {
        let max_pages = self.config.max_pages;
        let mut results = ListingSet::new();

        for page in 1..=max_pages {
            info!("--- Processing Page {} ---", page);
            let url = organic_url(query, page)?;
            info!("Navigating to: {}", url);
            session.goto(&url).await?;

            let html = session.content().await?;
            self.collect(Target::Organic, query, &html, page, &mut results);

            if page < max_pages {
                sleep(self.config.timing.page_delay()).await;
            }
        }

        Ok(results)
    }
}
