// Configuration management module
// TOML-backed settings for Ollama, retrieval, web search, generation and the corpus

pub mod interactive;
pub mod settings;


pub use interactive::{run_interactive_config, show_config};
pub use settings::{
    Config, ConfigError, DatasetConfig, GenerationConfig, OllamaConfig, RetrievalConfig,
    WebConfig,
};

/// Get the configuration directory path
#[inline]
pub fn get_config_dir() -> Result<std::path::PathBuf, ConfigError> {
    Config::config_dir()
}
