//! Legajo CLI entry point.
//!
//! Binary name: `legajo`
//!
//! Parses CLI arguments, sources the API key and config, then dispatches to
//! the ingest or analyze handler.

mod cli;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use legajo_core::generation::FallbackRouter;
use legajo_infra::gemini::{GeminiFileTransport, GeminiGenerator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,legajo=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need credentials or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "legajo", &mut std::io::stdout());
        return Ok(());
    }

    let api_key = legajo_infra::secret::api_key_from_env()?;
    let config = legajo_infra::config::load()?;
    let transport = GeminiFileTransport::new(api_key.clone());

    match cli.command {
        Commands::Ingest { file, mime } => {
            cli::document::ingest_document(&config, &transport, &file, mime, cli.json).await?;
        }

        Commands::Analyze {
            file,
            mime,
            kind,
            prompt,
        } => {
            let generator = GeminiGenerator::new(api_key, config.generation.clone());
            let router = FallbackRouter::new(&generator, &config.generation);
            cli::document::analyze_document(
                &config, &transport, &router, &file, mime, kind, prompt, cli.json,
            )
            .await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
