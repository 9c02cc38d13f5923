use clap::{Args, Parser, Subcommand};
use health_rag::Result;
use health_rag::commands::{SessionOptions, ask_once, run_chat};
use health_rag::config::{run_interactive_config, show_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "health-rag")]
#[command(about = "A health question answering assistant with local retrieval and web fallback")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Answer a single question and exit
    Ask {
        /// The health question to answer
        question: String,
    },
    /// Configure Ollama connection and settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Args, Debug, Default)]
struct SessionArgs {
    /// Load the corpus from a JSON Lines file instead of the Hugging Face dataset
    #[arg(long, global = true)]
    dataset_file: Option<PathBuf>,
    /// Maximum number of corpus entries to index
    #[arg(long, global = true)]
    limit: Option<usize>,
    /// Number of local documents to retrieve per question
    #[arg(long, global = true)]
    top_k: Option<usize>,
    /// Never fall back to web search
    #[arg(long, global = true)]
    no_web: bool,
}

impl From<SessionArgs> for SessionOptions {
    fn from(args: SessionArgs) -> Self {
        Self {
            dataset_file: args.dataset_file,
            limit: args.limit,
            top_k: args.top_k,
            no_web: args.no_web,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = SessionOptions::from(cli.session);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&options)?,
        Commands::Ask { question } => ask_once(&question, &options)?,
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
    }

    Ok(())
}
