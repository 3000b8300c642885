//! judge - compare two search APIs on a shared keyword list.
//!
//! Loads keywords, tests System A and System B with a single call each and
//! renders the raw response plus any value extracted with a JSON path.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{call, keywords, test};

/// Search API comparison harness
#[derive(Parser)]
#[command(name = "judge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a keyword list and show a preview
    Keywords(keywords::KeywordsArgs),

    /// Send one ad-hoc search call
    Call(call::CallArgs),

    /// Test the configured systems with the first keyword
    Test(test::TestArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Keywords(args) => keywords::execute(args, cli.format)?,
        Commands::Call(args) => call::execute(args, cli.format)?,
        Commands::Test(args) => {
            if !test::execute(args, cli.format)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
