pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod months;
pub mod scraper;

use std::sync::Arc;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{HttpFetch, ReqwestFetcher};
use crate::scraper::ArchiveScraper;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scraper: Arc<ArchiveScraper>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_fetcher(config, Arc::new(ReqwestFetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn HttpFetch>) -> Result<Self> {
        let scraper = ArchiveScraper::new(config.site.clone(), fetcher)?;
        Ok(AppState {
            config: Arc::new(config),
            scraper: Arc::new(scraper),
        })
    }
}
