#[cfg(test)]
mod tests;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use ureq::Agent;
use url::Url;

use super::extractor::{extract_page_text, parse_duckduckgo_results};
use super::{SearchHit, WebSearch};
use crate::config::WebConfig;

/// Appended to DuckDuckGo queries to bias results toward health sources
const DUCKDUCKGO_QUERY_SUFFIX: &str = " health medical";

/// Web search over SerpAPI with a DuckDuckGo HTML fallback
#[derive(Debug, Clone)]
pub struct WebSearchEngine {
    search_agent: Agent,
    fetch_agent: Agent,
    api_key: Option<String>,
    serpapi_url: Url,
    duckduckgo_url: Url,
    max_content_chars: usize,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl WebSearchEngine {
    #[inline]
    pub fn new(config: &WebConfig) -> Result<Self> {
        let serpapi_url = Url::parse(&config.serpapi_url)
            .with_context(|| format!("Invalid SerpAPI URL: {}", config.serpapi_url))?;
        let duckduckgo_url = Url::parse(&config.duckduckgo_url)
            .with_context(|| format!("Invalid DuckDuckGo URL: {}", config.duckduckgo_url))?;

        Ok(Self {
            search_agent: build_agent(&config.user_agent, config.search_timeout_seconds),
            fetch_agent: build_agent(&config.user_agent, config.fetch_timeout_seconds),
            api_key: config.api_key().map(str::to_string),
            serpapi_url,
            duckduckgo_url,
            max_content_chars: config.max_content_chars,
        })
    }

    #[inline]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn search_with_serpapi(
        &self,
        api_key: &str,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>> {
        debug!("Searching SerpAPI for '{}'", query);

        let num = num_results.to_string();
        let body = self
            .search_agent
            .get(self.serpapi_url.as_str())
            .query("q", query)
            .query("api_key", api_key)
            .query("num", &num)
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .context("SerpAPI request failed")?;

        let response: SerpApiResponse =
            serde_json::from_str(&body).context("Failed to parse SerpAPI response")?;

        if let Some(message) = response.error {
            return Err(anyhow!("SerpAPI returned an error: {}", message));
        }

        Ok(response
            .organic_results
            .into_iter()
            .take(num_results)
            .map(|item| SearchHit {
                title: item.title,
                snippet: item.snippet,
                url: item.link,
            })
            .collect())
    }

    fn search_with_duckduckgo(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        let full_query = format!("{}{}", query, DUCKDUCKGO_QUERY_SUFFIX);
        debug!("Searching DuckDuckGo for '{}'", full_query);

        let body = self
            .search_agent
            .get(self.duckduckgo_url.as_str())
            .query("q", &full_query)
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .context("DuckDuckGo request failed")?;

        let hits = parse_duckduckgo_results(&body, num_results);
        debug!("DuckDuckGo returned {} results", hits.len());
        Ok(hits)
    }
}

impl WebSearch for WebSearchEngine {
    #[inline]
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        if let Some(api_key) = &self.api_key {
            match self.search_with_serpapi(api_key, query, num_results) {
                Ok(hits) => {
                    info!("SerpAPI returned {} results", hits.len());
                    return Ok(hits);
                }
                Err(e) => error!("SerpAPI search failed: {:#}", e),
            }
        }

        self.search_with_duckduckgo(query, num_results)
            .inspect_err(|e| error!("DuckDuckGo search failed: {:#}", e))
    }

    #[inline]
    fn fetch_content(&self, url: &str) -> Result<String> {
        debug!("Fetching page content from {}", url);

        let html = match self.fetch_agent.get(url).call() {
            Ok(mut response) => response
                .body_mut()
                .read_to_string()
                .with_context(|| format!("Failed to read response body from {}", url))?,
            Err(ureq::Error::StatusCode(status)) => {
                warn!("Fetching {} failed with HTTP {}", url, status);
                return Err(anyhow!("HTTP error {}", status));
            }
            Err(e) => {
                warn!("Fetching {} failed: {}", url, e);
                return Err(anyhow::Error::from(e))
                    .with_context(|| format!("Failed to fetch {}", url));
            }
        };

        Ok(extract_page_text(&html, self.max_content_chars))
    }
}

fn build_agent(user_agent: &str, timeout_seconds: u64) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_seconds)))
        .user_agent(user_agent)
        .build()
        .into()
}
