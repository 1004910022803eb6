//! MDC CLI - Markdown components.
//!
//! Provides commands for:
//! - `tokens`: Print the token stream of a document as JSON
//! - `render`: Render a document to HTML

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, TokensArgs};
use output::Output;

/// MDC - Markdown components.
#[derive(Parser)]
#[command(name = "mdc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream as JSON.
    Tokens(TokensArgs),
    /// Render markdown to HTML.
    Render(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Tokens(args) => args.common.verbose,
            Self::Render(args) => args.common.verbose,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tokens(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
