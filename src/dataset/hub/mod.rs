
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::QaPair;
use crate::config::DatasetConfig;

/// Largest page the datasets server returns per request
pub const PAGE_SIZE: usize = 100;

const TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Deserialize)]
struct RowsResponse {
    rows: Vec<RowEntry>,
    num_rows_total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    row: QaPair,
}

/// Pages through the Hugging Face datasets-server `/rows` endpoint
#[derive(Debug, Clone)]
pub struct HubClient {
    rows_url: Url,
    dataset: String,
    subset: String,
    split: String,
    agent: ureq::Agent,
}

impl HubClient {
    #[inline]
    pub fn new(config: &DatasetConfig) -> Result<Self> {
        let base = Url::parse(&config.server_url)
            .with_context(|| format!("Invalid datasets server URL: {}", config.server_url))?;
        let rows_url = base.join("/rows").context("Failed to build rows URL")?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(TIMEOUT_SECONDS)))
            .build()
            .into();

        Ok(Self {
            rows_url,
            dataset: config.name.clone(),
            subset: config.subset.clone(),
            split: config.split.clone(),
            agent,
        })
    }

    /// Fetch rows in order until `limit` pairs are collected or the split ends
    #[inline]
    pub fn fetch_rows(&self, limit: usize) -> Result<Vec<QaPair>> {
        let mut pairs = Vec::with_capacity(limit.min(PAGE_SIZE * 10));

        while pairs.len() < limit {
            let offset = pairs.len();
            let length = (limit - offset).min(PAGE_SIZE);
            let page = self.fetch_page(offset, length)?;

            if page.rows.is_empty() {
                break;
            }
            pairs.extend(page.rows.into_iter().map(|entry| entry.row).take(length));

            if page.num_rows_total.is_some_and(|total| pairs.len() >= total) {
                break;
            }
        }

        Ok(pairs)
    }

    fn fetch_page(&self, offset: usize, length: usize) -> Result<RowsResponse> {
        debug!(
            "Fetching rows {}..{} of {}",
            offset,
            offset + length,
            self.dataset
        );

        let body = self
            .agent
            .get(self.rows_url.as_str())
            .query("dataset", &self.dataset)
            .query("config", &self.subset)
            .query("split", &self.split)
            .query("offset", offset.to_string())
            .query("length", length.to_string())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => {
                    anyhow!("Datasets server returned HTTP {} at offset {}", status, offset)
                }
                other => anyhow!("Datasets server request failed: {}", other),
            })?;

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse rows page at offset {}", offset))
    }
}
