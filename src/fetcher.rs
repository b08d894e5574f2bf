//! Fetch star counts from public GitHub repository pages

use crate::config::NetworkConfig;
use crate::error::{GuardError, Result};
use crate::types::CanonicalRepo;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::future::Future;
use tracing::debug;

/// `id` of the element holding the star count on a repository page
pub const STAR_COUNTER_ID: &str = "repo-stars-counter-star";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Anything that can report the star count of a repository
pub trait StarSource {
    fn fetch_stars(&self, repo: &CanonicalRepo) -> impl Future<Output = Result<u64>> + Send;
}

/// Scrapes the star counter out of the repository's HTML page
pub struct GitHubPageFetcher {
    client: Client,
    base_url: Option<String>,
}

impl GitHubPageFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout())
            .build()
            .map_err(|e| GuardError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Send requests to `<base_url>/<owner>/<repo>` instead of the repository's host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn page_url(&self, repo: &CanonicalRepo) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}/{}", base, repo.owner, repo.name),
            None => repo.url(),
        }
    }

    async fn load_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GuardError::query_failed(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuardError::query_failed(url, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| GuardError::query_failed(url, format!("failed to read body: {}", e)))
    }
}

impl StarSource for GitHubPageFetcher {
    async fn fetch_stars(&self, repo: &CanonicalRepo) -> Result<u64> {
        let url = self.page_url(repo);
        debug!("Fetching star count for {} from {}", repo, url);

        let html = self.load_html(&url).await?;

        let counter = find_star_counter(&html).ok_or_else(|| {
            GuardError::metric_unavailable(&url, "could not find stars element in fetched HTML")
        })?;

        let stars =
            parse_star_count(&counter).map_err(|reason| GuardError::metric_unavailable(&url, reason))?;

        debug!("{} has {} stars", repo, stars);
        Ok(stars)
    }
}

/// Text of the first element with the star counter id, in document order
///
/// `Some("")` means the element exists but carries no text.
pub fn find_star_counter(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let counter = document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().id() == Some(STAR_COUNTER_ID))?;

    Some(counter.text().next().unwrap_or_default().to_string())
}

/// Normalize counter text such as `950` or `1.2k` to a whole number of stars
///
/// The value is truncated, never rounded: `99.9` is 99 and `1.2345k` is 1234.
pub fn parse_star_count(text: &str) -> std::result::Result<u64, String> {
    let trimmed = text.trim();

    let (number, scale) = match trimmed.strip_suffix('k') {
        Some(rest) => (rest, 3),
        None => (trimmed, 0),
    };

    if number.is_empty() {
        return Err(format!("empty star count {:?}", text));
    }

    let value: f64 = number
        .parse()
        .map_err(|e| format!("invalid star count {:?}: {}", text, e))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("invalid star count {:?}", text));
    }

    match truncate_decimal(number, scale) {
        Some(stars) => Ok(stars),
        // exponent forms such as 1e3 have no exact digit split
        None => Ok((value * 10f64.powi(scale as i32)).trunc() as u64),
    }
}

/// Shift a plain `digits[.digits]` string left by `scale` places and drop the
/// remaining fraction, without going through binary floating point
fn truncate_decimal(number: &str, scale: usize) -> Option<u64> {
    let number = number.strip_prefix('+').unwrap_or(number);
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let mut digits = String::with_capacity(whole.len() + scale);
    digits.push_str(whole);
    digits.extend(fraction.chars().chain(std::iter::repeat('0')).take(scale));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}
