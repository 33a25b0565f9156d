//! Archive walking: pages within a month, months within a range.
//!
//! A month's archive is a chain of listing pages linked by a `rel="next"`
//! element. [`ArchiveScraper::pages`] exposes that chain as a lazy stream so
//! the caller decides when to stop; [`ArchiveScraper::scrape_pages`] caps it
//! at a page count and [`ArchiveScraper::scrape_months`] chains months.

use futures::{stream, Stream, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::SiteConfig;
use crate::error::{AppError, Result};
use crate::fetch::{browser_headers, HttpFetch};
use crate::months::{months_between, MonthCursor};

/// An article title and absolute link taken from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

/// One fetched listing page.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub headlines: Vec<Headline>,
    pub next: Option<Url>,
}

pub struct ArchiveScraper {
    fetcher: Arc<dyn HttpFetch>,
    site: SiteConfig,
    origin: String,
    headers: HeaderMap,
    article_selector: Selector,
    next_selector: Selector,
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::ConfigError(format!("Invalid selector {:?}: {:?}", css, e)))
}

impl ArchiveScraper {
    pub fn new(site: SiteConfig, fetcher: Arc<dyn HttpFetch>) -> Result<Self> {
        let article_selector = parse_selector(&site.article_selector)?;
        let next_selector = parse_selector(&site.next_selector)?;
        let headers = browser_headers(&site.user_agent)?;
        let origin = site.base_url.origin().ascii_serialization();

        Ok(ArchiveScraper {
            fetcher,
            site,
            origin,
            headers,
            article_selector,
            next_selector,
        })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Listing URL for one month: `{base}/archives/{year}/{month}`.
    pub fn archive_url(&self, month: MonthCursor) -> Result<Url> {
        let base = self.site.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}/archives/{}/{}", base, month.year, month.month))?;
        Ok(url)
    }

    /// Make `href` absolute.
    ///
    /// Site-relative paths go onto the site origin, absolute URLs are kept
    /// verbatim and anything else is joined onto the page it came from.
    pub fn resolve_link(&self, page: &Url, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            None
        } else if href.starts_with('/') {
            Some(format!("{}{}", self.origin, href))
        } else if Url::parse(href).is_ok() {
            Some(href.to_string())
        } else {
            page.join(href).ok().map(String::from)
        }
    }

    fn headline(&self, page: &Url, element: ElementRef<'_>) -> Option<Headline> {
        let title = element.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            return None;
        }
        let link = self.resolve_link(page, element.value().attr("href")?)?;
        Some(Headline { title, link })
    }

    /// Parse one listing page. Kept synchronous: `Html` must not be held
    /// across an await point.
    pub fn extract_page(&self, url: Url, body: &str) -> Page {
        let document = Html::parse_document(body);

        let headlines: Vec<Headline> = document
            .select(&self.article_selector)
            .filter_map(|element| self.headline(&url, element))
            .collect();

        let next = document
            .select(&self.next_selector)
            .next()
            .and_then(|element| element.value().attr("href"))
            .and_then(|href| self.resolve_link(&url, href))
            .and_then(|link| match Url::parse(&link) {
                Ok(next) => Some(next),
                Err(e) => {
                    warn!(%url, %link, error = %e, "Unusable next page link");
                    None
                }
            });

        debug!(%url, count = headlines.len(), has_next = next.is_some(), "Extracted page");
        if headlines.is_empty() && next.is_some() {
            warn!(%url, selector = %self.site.article_selector, "Page has a next link but no headlines");
        }

        Page { url, headlines, next }
    }

    pub async fn fetch_page(&self, url: Url) -> Result<Page> {
        info!(%url, "Scraping");
        let body = self.fetcher.get(&url, &self.headers).await?;
        Ok(self.extract_page(url, &body))
    }

    async fn step(&self, cursor: Option<Url>) -> Result<Option<(Page, Option<Url>)>> {
        let Some(url) = cursor else {
            return Ok(None);
        };
        let page = self.fetch_page(url).await?;
        if page.next.is_none() {
            info!(url = %page.url, "No next page found, stopping");
        }
        let next = page.next.clone();
        Ok(Some((page, next)))
    }

    /// Lazily walk the next-page chain from `start`.
    ///
    /// Each poll fetches one page. The stream ends when a page has no next
    /// link and stops at the first error. Chains may be cyclic, so callers
    /// must bound it.
    pub fn pages(&self, start: Url) -> impl Stream<Item = Result<Page>> + '_ {
        stream::try_unfold(Some(start), move |cursor| self.step(cursor))
    }

    /// Headlines from at most `max_pages` pages starting at `start`.
    #[instrument(level = "info", skip_all, fields(start = %start, max_pages = max_pages))]
    pub async fn scrape_pages(&self, start: Url, max_pages: usize) -> Result<Vec<Headline>> {
        let pages: Vec<Page> = self.pages(start).take(max_pages).try_collect().await?;
        let page_count = pages.len();
        let headlines: Vec<Headline> = pages.into_iter().flat_map(|page| page.headlines).collect();
        info!(pages = page_count, count = headlines.len(), "Walked archive pages");
        Ok(headlines)
    }

    /// Scrape `num_months` consecutive months from `start`, oldest first.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape_months(
        &self,
        start: MonthCursor,
        num_months: u32,
        max_pages_per_month: usize,
    ) -> Result<Vec<Headline>> {
        let mut all_headlines = Vec::new();
        let mut cursor = start;

        for _ in 0..num_months {
            info!(month = %cursor, "Scraping articles for month");
            let url = self.archive_url(cursor)?;
            let headlines = self.scrape_pages(url, max_pages_per_month).await?;
            all_headlines.extend(headlines);
            cursor = cursor.next();
        }

        Ok(all_headlines)
    }

    /// Scrape every month from `start` through `end` inclusive.
    pub async fn scrape_range(
        &self,
        start: MonthCursor,
        end: MonthCursor,
        max_pages_per_month: usize,
    ) -> Result<Vec<Headline>> {
        let num_months = months_between(start, end);
        self.scrape_months(start, num_months, max_pages_per_month).await
    }
}
