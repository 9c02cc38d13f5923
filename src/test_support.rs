// In-memory collaborators shared by unit tests

use std::cell::Cell;
use std::collections::HashMap;

use anyhow::{Result, anyhow};

use crate::config::GenerationConfig;
use crate::embeddings::Embedder;
use crate::generation::Generator;
use crate::web::{SearchHit, WebSearch};

/// Embeds text by the first registered key it contains, else a fallback vector
#[derive(Debug)]
pub(crate) struct ScriptedEmbedder {
    rules: Vec<(String, Vec<f32>)>,
    fallback: Vec<f32>,
    failing: Cell<bool>,
    calls: Cell<usize>,
}

impl ScriptedEmbedder {
    pub(crate) fn new(fallback: Vec<f32>) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
            failing: Cell::new(false),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn with(mut self, key: &str, vector: Vec<f32>) -> Self {
        self.rules.push((key.to_string(), vector));
        self
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Embedder for ScriptedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.get() {
            return Err(anyhow!("embedding service unavailable"));
        }
        let vector = self
            .rules
            .iter()
            .find(|(key, _)| text.contains(key.as_str()))
            .map_or_else(|| self.fallback.clone(), |(_, vector)| vector.clone());
        Ok(vector)
    }

    fn batch_size(&self) -> usize {
        2
    }
}

/// Web search provider backed by fixed hits and pages
#[derive(Debug, Default)]
pub(crate) struct StaticWeb {
    hits: Vec<SearchHit>,
    pages: HashMap<String, String>,
    unavailable: bool,
    searches: Cell<usize>,
    fetches: Cell<usize>,
}

impl StaticWeb {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_hit(mut self, title: &str, snippet: &str, url: &str, page: &str) -> Self {
        self.hits.push(SearchHit {
            title: title.to_string(),
            snippet: snippet.to_string(),
            url: url.to_string(),
        });
        self.pages.insert(url.to_string(), page.to_string());
        self
    }

    /// A hit whose page cannot be fetched
    pub(crate) fn with_broken_hit(mut self, title: &str, snippet: &str, url: &str) -> Self {
        self.hits.push(SearchHit {
            title: title.to_string(),
            snippet: snippet.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub(crate) fn searches(&self) -> usize {
        self.searches.get()
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl WebSearch for StaticWeb {
    fn search(&self, _query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        self.searches.set(self.searches.get() + 1);
        if self.unavailable {
            return Err(anyhow!("search provider unavailable"));
        }
        Ok(self.hits.iter().take(num_results).cloned().collect())
    }

    fn fetch_content(&self, url: &str) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused: {}", url))
    }
}

/// Generator that echoes a fixed reply and records the last prompt
#[derive(Debug, Default)]
pub(crate) struct EchoGenerator {
    reply: String,
    failing: bool,
    last_prompt: std::cell::RefCell<Option<String>>,
}

impl EchoGenerator {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.last_prompt.borrow().clone()
    }
}

impl Generator for EchoGenerator {
    fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String> {
        *self.last_prompt.borrow_mut() = Some(prompt.to_string());
        if self.failing {
            return Err(anyhow!("model not loaded"));
        }
        Ok(self.reply.clone())
    }
}
