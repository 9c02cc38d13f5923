// Web search module
// Search providers and page text extraction used for web augmentation

pub mod engine;
pub mod extractor;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use engine::WebSearchEngine;

/// One ranked result from a web search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// A provider of ranked web results and cleaned page text
pub trait WebSearch {
    /// Return up to `num_results` hits for `query`, best first
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>>;

    /// Fetch `url` and return its readable text
    fn fetch_content(&self, url: &str) -> Result<String>;
}

impl<T: WebSearch + ?Sized> WebSearch for &T {
    #[inline]
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        (**self).search(query, num_results)
    }

    #[inline]
    fn fetch_content(&self, url: &str) -> Result<String> {
        (**self).fetch_content(url)
    }
}
