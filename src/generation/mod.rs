// Generation module
// Text generation backends used to answer questions from an assembled prompt

pub mod ollama;

use anyhow::Result;

use crate::config::GenerationConfig;

pub use ollama::OllamaGenerator;

/// Produces a completion for a fully assembled prompt
pub trait Generator {
    fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}

impl<T: Generator + ?Sized> Generator for &T {
    #[inline]
    fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        (**self).generate(prompt, config)
    }
}
