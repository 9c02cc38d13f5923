// Assistant module
// One question-answering session over a built index


use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::embeddings::Embedder;
use crate::generation::Generator;
use crate::index::VectorIndex;
use crate::prompt::build_prompt;
use crate::retrieval::{Retrieval, RetrievalOrchestrator, WebOutcome};
use crate::store::RetrievedDocument;
use crate::web::WebSearch;
use crate::{RagError, Result};

/// Appended to answers that drew on web search results
pub const WEB_NOTICE: &str =
    "\n\n[Note: This response includes information retrieved from web searches.]";

const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "q"];

/// Whether `input` asks to leave the interactive loop
#[inline]
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_COMMANDS
        .iter()
        .any(|command| input.eq_ignore_ascii_case(command))
}

/// A generated answer together with the context it was grounded on
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub used_web_search: bool,
    pub documents: Vec<RetrievedDocument>,
    /// Result of the web step, when the local results were not confident enough
    pub web: Option<WebOutcome>,
}

#[derive(Debug)]
pub struct HealthAssistant<E, W, G> {
    index: VectorIndex<E>,
    orchestrator: RetrievalOrchestrator<W>,
    generator: G,
    generation: GenerationConfig,
}

impl<E: Embedder, W: WebSearch, G: Generator> HealthAssistant<E, W, G> {
    #[inline]
    pub fn new(
        index: VectorIndex<E>,
        orchestrator: RetrievalOrchestrator<W>,
        generator: G,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            index,
            orchestrator,
            generator,
            generation,
        }
    }

    #[inline]
    pub fn index(&self) -> &VectorIndex<E> {
        &self.index
    }

    #[inline]
    pub fn orchestrator(&self) -> &RetrievalOrchestrator<W> {
        &self.orchestrator
    }

    /// Answer `question` using the configured web search setting
    #[inline]
    pub fn ask(&mut self, question: &str) -> Result<Answer> {
        let retrieval = self.orchestrator.retrieve(&mut self.index, question)?;
        self.answer(question, retrieval)
    }

    /// Answer `question`, overriding whether web search may be used
    #[inline]
    pub fn ask_with(&mut self, question: &str, use_web_search: bool) -> Result<Answer> {
        let retrieval = self
            .orchestrator
            .retrieve_with(&mut self.index, question, use_web_search)?;
        self.answer(question, retrieval)
    }

    fn answer(&self, question: &str, retrieval: Retrieval) -> Result<Answer> {
        let prompt = build_prompt(question, &retrieval.documents);
        debug!(
            "Prompt built from {} documents ({} chars)",
            retrieval.documents.len(),
            prompt.len()
        );

        let reply = self
            .generator
            .generate(&prompt, &self.generation)
            .map_err(|e| RagError::Generation(format!("{:#}", e)))?;

        let mut text = reply.trim().to_string();
        if retrieval.used_web_search {
            text.push_str(WEB_NOTICE);
        }

        info!(
            "Answered with {} context documents (web search: {})",
            retrieval.documents.len(),
            retrieval.used_web_search
        );

        Ok(Answer {
            text,
            used_web_search: retrieval.used_web_search,
            documents: retrieval.documents,
            web: retrieval.web,
        })
    }
}
