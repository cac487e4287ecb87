//! CLI entrypoint for DataWizard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wizard_application::{
    ConversationLogger, LoadDatasetUseCase, NoConversationLogger, RunCycleUseCase,
};
use wizard_infrastructure::{
    ChatCompletionGateway, ConfigLoader, CsvDatasetLoader, JsonlConversationLogger,
    LlmAnalysisAgentFactory, PngChartLoader,
};
use wizard_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Keys may live in a .env file next to the data
    if let Ok(path) = dotenv::dotenv() {
        info!("Loaded environment from {}", path.display());
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    info!("Starting DataWizard");

    // === Dependency Injection ===
    let classifier_endpoint = config.classifier_endpoint();
    if !classifier_endpoint.has_credential() {
        warn!("TOGETHER_API_KEY is not set; relevance checks will fail");
    }
    let answer_endpoint = config.answer_endpoint();
    if !answer_endpoint.has_credential() {
        warn!("GROQ_API_KEY is not set; analysis requests will fail");
    }

    let classifier = Arc::new(ChatCompletionGateway::new(
        "relevance classifier (TOGETHER_API_KEY)",
        classifier_endpoint,
    )?);
    let answer = Arc::new(ChatCompletionGateway::new(
        "analysis model (GROQ_API_KEY)",
        answer_endpoint,
    )?);

    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.logging.conversation_log.as_ref().map(Into::into));
    let conversation_logger: Arc<dyn ConversationLogger> =
        match log_path.and_then(|path| JsonlConversationLogger::new(path)) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        };

    let run_cycle = RunCycleUseCase::new(classifier, Arc::new(PngChartLoader::new()))
        .with_conversation_logger(conversation_logger);
    let load_dataset = LoadDatasetUseCase::new(
        Arc::new(CsvDatasetLoader::new()),
        Arc::new(LlmAnalysisAgentFactory::new(answer)),
        config.agent.to_settings(),
    );

    let repl_config = ReplConfig {
        show_progress: !cli.quiet && config.repl.show_progress,
        history_file: None,
        preview_rows: config.repl.preview_rows,
        full_transcript: config.repl.full_transcript,
    }
    .with_history_file(config.repl.history_file.as_deref());

    let mut repl = ChatRepl::new(run_cycle, load_dataset).with_config(repl_config);

    if let Some(path) = &cli.csv
        && let Err(e) = repl.load(path)
    {
        eprintln!("{}", ConsoleFormatter::error(&e));
    }

    repl.run().await?;
    Ok(())
}
