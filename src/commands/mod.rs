
use console::style;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::assistant::{HealthAssistant, is_exit_command};
use crate::config::Config;
use crate::dataset::load_corpus;
use crate::embeddings::{Embedder, OllamaClient};
use crate::generation::{Generator, OllamaGenerator};
use crate::index::VectorIndex;
use crate::retrieval::RetrievalOrchestrator;
use crate::web::{WebSearch, WebSearchEngine};
use crate::{RagError, Result};

/// Assistant wired to the Ollama backends and the live web search engine
pub type OllamaAssistant = HealthAssistant<OllamaClient, WebSearchEngine, OllamaGenerator>;

const RULE_WIDTH: usize = 50;

/// Command-line overrides applied on top of the stored configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub dataset_file: Option<PathBuf>,
    pub limit: Option<usize>,
    pub top_k: Option<usize>,
    pub no_web: bool,
}

impl SessionOptions {
    #[inline]
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.dataset_file {
            config.dataset.path = Some(path.clone());
        }
        if let Some(limit) = self.limit {
            config.dataset.limit = limit;
        }
        if let Some(top_k) = self.top_k {
            config.retrieval.top_k = top_k;
        }
        if self.no_web {
            config.retrieval.use_web_search = false;
        }
    }
}

/// Load the configuration with `options` applied and validate the result
#[inline]
pub fn session_config(options: &SessionOptions) -> Result<Config> {
    let mut config = Config::load().map_err(|e| RagError::Config(e.to_string()))?;
    options.apply(&mut config);
    config
        .validate()
        .map_err(|e| RagError::Config(e.to_string()))?;
    Ok(config)
}

/// Connect to Ollama, load the corpus and build the search index
#[inline]
pub fn build_assistant(config: &Config) -> Result<OllamaAssistant> {
    let embedder = OllamaClient::new(&config.ollama)
        .map_err(|e| RagError::Initialization(format!("{:#}", e)))?;
    embedder.health_check().map_err(|e| {
        RagError::Initialization(format!(
            "Ollama is not ready at {}: {:#}",
            config.ollama_url().map_or_else(|_| "<invalid url>".to_string(), |url| url.to_string()),
            e
        ))
    })?;

    let generator = OllamaGenerator::new(&config.ollama)
        .map_err(|e| RagError::Initialization(format!("{:#}", e)))?;
    let engine = WebSearchEngine::new(&config.web)
        .map_err(|e| RagError::Initialization(format!("{:#}", e)))?;

    let documents = load_corpus(&config.dataset)?;
    let index = if documents.is_empty() {
        warn!("Corpus is empty; answers will rely on web search");
        VectorIndex::empty(embedder, config.ollama.embedding_dimension as usize)?
    } else {
        let mut index = VectorIndex::new(embedder);
        index.build(documents)?;
        index
    };

    info!(
        "Assistant ready with {} documents using {}",
        index.len(),
        generator.model()
    );

    Ok(HealthAssistant::new(
        index,
        RetrievalOrchestrator::new(engine, config.retrieval.clone()),
        generator,
        config.generation.clone(),
    ))
}

/// Start the interactive chat session on stdin/stdout
#[inline]
pub fn run_chat(options: &SessionOptions) -> Result<()> {
    let config = session_config(options)?;
    let mut assistant = build_assistant(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    chat_loop(&mut assistant, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Answer a single question and print the result
#[inline]
pub fn ask_once(question: &str, options: &SessionOptions) -> Result<()> {
    let config = session_config(options)?;
    let mut assistant = build_assistant(&config)?;

    let answer = assistant.ask(question)?;
    println!("{}", answer.text);
    Ok(())
}

/// Read questions from `input` until an exit command or end of input.
///
/// Returns the number of questions answered. Failures to answer a single
/// question are reported and the loop continues.
pub fn chat_loop<E, W, G, R, O>(
    assistant: &mut HealthAssistant<E, W, G>,
    mut input: R,
    mut output: O,
) -> Result<usize>
where
    E: Embedder,
    W: WebSearch,
    G: Generator,
    R: BufRead,
    O: Write,
{
    writeln!(
        output,
        "\n{}",
        style("Healthcare Chatbot Ready! (Type 'exit' to quit)").bold().green()
    )?;
    writeln!(
        output,
        "This system uses both a local healthcare knowledge base and web search"
    )?;
    writeln!(output, "{}", "=".repeat(RULE_WIDTH))?;

    let mut answered = 0;
    let mut line = String::new();

    loop {
        write!(output, "\n{} ", style("Your health question:").bold())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let question = line.trim();
        if is_exit_command(question) {
            break;
        }
        if question.is_empty() {
            continue;
        }

        match assistant.ask(question) {
            Ok(answer) => {
                if let Some(web) = &answer.web {
                    writeln!(
                        output,
                        "{}",
                        style("Local knowledge insufficient, performing web search...").dim()
                    )?;
                    if web.is_unavailable() {
                        writeln!(
                            output,
                            "{}",
                            style("Web search unavailable, answering from local knowledge.").dim()
                        )?;
                    }
                }
                writeln!(output, "\n{} {}", style("Chatbot:").bold().cyan(), answer.text)?;
                answered += 1;
            }
            Err(e) => {
                error!("Failed to answer question: {}", e);
                writeln!(output, "\n{} {}", style("Error:").bold().red(), e)?;
            }
        }

        writeln!(output, "\n{}", "-".repeat(RULE_WIDTH))?;
    }

    Ok(answered)
}
