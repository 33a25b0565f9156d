use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use once_cell::sync::Lazy;
use url::Url;
use crate::error::{AppError, Result};
use crate::months::MonthCursor;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36";

static VERGE_BASE_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://www.theverge.com").expect("Failed to parse default base url")
});

/// Structure of the archive site being scraped.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub name: String,
    pub base_url: Url,
    pub article_selector: String,
    pub next_selector: String,
    pub user_agent: String,
}

impl SiteConfig {
    pub fn the_verge() -> Self {
        SiteConfig {
            name: "The Verge".to_string(),
            base_url: VERGE_BASE_URL.clone(),
            article_selector: "a._1lkmsmo1".to_string(),
            next_selector: r#"link[rel="next"]"#.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Same selectors and headers, pointed at another host.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(SiteConfig {
            base_url,
            ..Self::the_verge()
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub start: MonthCursor,
    pub max_pages_per_month: usize,
    pub site: SiteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            start: MonthCursor::new(2022, 1),
            max_pages_per_month: 100,
            site: SiteConfig::the_verge(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            ..Config::default()
        })
    }
}
