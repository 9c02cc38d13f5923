// Dataset module
// Loads the question/answer corpus from a JSON Lines file or the Hugging Face datasets server

pub mod hub;

#[cfg(test)]
mod tests;

use anyhow::{Context, anyhow};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::config::DatasetConfig;
use crate::store::NewDocument;
use crate::{RagError, Result};

pub use hub::HubClient;

/// One question/answer pair from the corpus
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QaPair {
    #[serde(alias = "input")]
    pub question: String,
    #[serde(alias = "output")]
    pub answer: String,
}

impl From<QaPair> for NewDocument {
    #[inline]
    fn from(pair: QaPair) -> Self {
        Self::new(pair.question, pair.answer)
    }
}

/// Load the configured corpus, preferring a local file over the hub
#[inline]
pub fn load_corpus(config: &DatasetConfig) -> Result<Vec<NewDocument>> {
    let pairs = match &config.path {
        Some(path) => {
            info!("Loading corpus from {} (limit: {})", path.display(), config.limit);
            read_jsonl(path, config.limit)
        }
        None => {
            info!(
                "Loading {} [{}/{}] from {} (limit: {})",
                config.name, config.subset, config.split, config.server_url, config.limit
            );
            HubClient::new(config).and_then(|client| client.fetch_rows(config.limit))
        }
    }
    .map_err(|e| RagError::DatasetLoad(format!("{:#}", e)))?;

    info!("Processed {} documents from the corpus", pairs.len());
    Ok(pairs.into_iter().map(NewDocument::from).collect())
}

/// Read up to `limit` pairs from a JSON Lines file, skipping blank lines
#[inline]
pub fn read_jsonl(path: &Path, limit: usize) -> anyhow::Result<Vec<QaPair>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open corpus {}", path.display()))?;
    parse_jsonl(BufReader::new(file), limit)
        .with_context(|| format!("Failed to read corpus {}", path.display()))
}

/// Parse JSON Lines records with `input`/`output` or `question`/`answer` keys
#[inline]
pub fn parse_jsonl<R: BufRead>(reader: R, limit: usize) -> anyhow::Result<Vec<QaPair>> {
    let mut pairs = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        if pairs.len() >= limit {
            break;
        }
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let pair: QaPair = serde_json::from_str(&line)
            .map_err(|e| anyhow!("Invalid record on line {}: {}", index + 1, e))?;
        pairs.push(pair);
    }

    debug!("Parsed {} question/answer pairs", pairs.len());
    Ok(pairs)
}
