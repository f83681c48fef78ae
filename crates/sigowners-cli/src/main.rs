//! sigowners CLI
//!
//! Reproduces approval decisions from a local checkout and inspects
//! ownership files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sigowners_cli::commands::{
    self,
    check::{self, CheckArgs},
    decode::{self, DecodeArgs},
};

#[derive(Parser)]
#[command(name = "sigowners")]
#[command(about = "Directory ownership checks for code review", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether an identity may approve a change
    Check(CheckArgs),
    /// Print the identities an ownership file authorizes
    Decode(DecodeArgs),
}

/// Exit status when no decision could be made.
const EXIT_UNDETERMINED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(EXIT_UNDETERMINED)
        }
    }
}

/// 0 when authorized, 1 when denied or the file is rejected.
async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check(args) => {
            let config = commands::load_config(cli.config.as_deref())?;
            let decision = check::run(&args, config).await?;
            println!("{decision}");
            Ok(if decision.allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Decode(args) => {
            let outcome = decode::run(&args).await?;
            for identity in &outcome.identities {
                println!("{identity}");
            }
            match outcome.diagnostic {
                Some(diagnostic) => {
                    eprintln!("{}: {diagnostic}", args.file.display());
                    Ok(ExitCode::from(1))
                }
                None => Ok(ExitCode::SUCCESS),
            }
        }
    }
}
