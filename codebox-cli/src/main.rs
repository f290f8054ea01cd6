mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codebox_common::AppConfig;

#[derive(Parser)]
#[command(name = "codebox")]
#[command(about = "Generate code with a local LLM and run it in a sandbox")]
#[command(version)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Model to use (overrides config)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate code for a task and run it in the sandbox
    Run {
        /// Task description
        #[arg(required = true)]
        task: Vec<String>,
    },
    /// List models available on the Ollama endpoint
    Models,
    /// Run a canned smoke task
    Test,
    /// Dispatch a raw toolkit API request
    Api {
        /// JSON request with an "action" field
        request: String,
    },
    /// Run a raw command inside the sandbox
    Exec {
        /// Command to run
        #[arg(required = true)]
        command: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = AppConfig::load()?;

    match cli.command {
        Commands::Run { task } => {
            commands::execute_run(&config, cli.model, &task.join(" ")).await
        }
        Commands::Models => commands::execute_models(&config).await,
        Commands::Test => {
            commands::execute_run(&config, cli.model, "print current date and time").await
        }
        Commands::Api { request } => commands::execute_api(&config, &request).await,
        Commands::Exec { command } => commands::execute_exec(&config, &command.join(" ")).await,
    }
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "codebox_llm={},codebox_sandbox={},codebox_cli={}",
                    log_level, log_level, log_level
                ))
            }),
        )
        .init();
}
