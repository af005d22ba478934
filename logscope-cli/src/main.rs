//! logscope -- access log analysis and failed-login detection CLI.

use clap::Parser;

use logscope_cli::cli::{Cli, Commands};
use logscope_cli::commands;
use logscope_cli::error::CliError;
use logscope_cli::logging::init_tracing;
use logscope_cli::output::OutputWriter;
use logscope_core::config::{GeneralConfig, LogScopeConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command.unwrap_or_default() {
        Commands::Config(args) => {
            // config commands report load failures themselves
            init_tracing(&GeneralConfig::default(), cli.log_level.as_deref())
                .map_err(|e| CliError::Command(e.to_string()))?;
            commands::config::execute(args, cli.config.as_deref(), &writer).await
        }
        Commands::Analyze(args) => {
            let config = LogScopeConfig::load_or_default(cli.config.as_deref()).await?;
            init_tracing(&config.general, cli.log_level.as_deref())
                .map_err(|e| CliError::Command(e.to_string()))?;
            commands::analyze::execute(args, &config, &writer).await?;
            Ok(())
        }
    }
}
