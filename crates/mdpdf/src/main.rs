//! mdpdf CLI - Markdown to PDF conversion.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP conversion server
//! - `render`: Convert a markdown file to PDF on disk

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// mdpdf - Markdown to PDF conversion.
#[derive(Parser)]
#[command(name = "mdpdf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the conversion server.
    Serve(ServeArgs),
    /// Render a markdown file to PDF.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Render(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Render(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["mdpdf", "render", "notes.md", "-o", "out.pdf"]).unwrap();

        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["mdpdf", "serve", "--port", "8080", "--verbose"]).unwrap();

        assert!(matches!(cli.command, Commands::Serve(args) if args.verbose));
    }
}
