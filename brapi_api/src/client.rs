//! HTTP client for the BRAPI quote API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, QuoteQuery},
    types::QuoteResponse,
    Error,
};

const DEFAULT_BASE_URL: &str = "https://brapi.dev";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("b3prices/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the BRAPI quote API.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://brapi.dev`.
    base_api_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client pointing at the production BRAPI API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_base_url_and_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL and per-request timeout.
    pub fn with_base_url_and_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment so a
    /// symbol can never escape its path position.
    fn get_url(&self, segments: &[&str], query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(segments, query)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::debug!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches the daily price history of one symbol.
    pub async fn get_quote_history(
        &self,
        symbol: &str,
        query: &QuoteQuery,
    ) -> Result<QuoteResponse, Error> {
        self.get::<QuoteResponse, QuoteQuery>(&["api", "quote", symbol], Some(query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Range;

    #[test]
    fn url_encodes_symbol_as_single_segment() {
        let client = Client::with_base_url("http://localhost:1234/").unwrap();
        let query = QuoteQuery::default().with_range(Range::OneYear);
        let url = client
            .get_url(&["api", "quote", "BAD/SYM"], Some(&query))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/api/quote/BAD%2FSYM?range=1y&interval=1d"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::with_base_url("https://brapi.dev/").unwrap();
        assert_eq!(client.base_url(), "https://brapi.dev");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn short_body_is_untouched() {
        assert_eq!(truncate_body("not found"), "not found");
    }
}
