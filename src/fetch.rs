use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;
use url::Url;
use crate::error::{AppError, Result};

// Shared client so connections are reused across pages and months
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetches raw page bodies.
///
/// Implementations must request the URL verbatim with the given headers and
/// fail on transport errors as well as non-success statuses.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &Url, headers: &HeaderMap) -> Result<String>;
}

#[derive(Clone, Default)]
pub struct ReqwestFetcher;

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &Url, headers: &HeaderMap) -> Result<String> {
        let response = CLIENT
            .get(url.as_str())
            .headers(headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

/// Headers of a desktop browser. The archive site serves different markup
/// (or nothing) to clients without them.
pub fn browser_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(user_agent)
        .map_err(|e| AppError::ConfigError(format!("Invalid user agent: {}", e)))?;
    headers.insert(USER_AGENT, agent);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    Ok(headers)
}
