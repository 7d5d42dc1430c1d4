//! Lookout - Entry Point
//!
//! Downloads the daily region dump and the password/founderless lists,
//! estimates when each region updates, and writes the target sheet.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lookout::core::config::{LookoutConfig, VERSION};
use lookout::core::error::Result;
use lookout::pipeline;
use tokio::runtime::Runtime;

/// Lookout - region update times and targets for NationStates
#[derive(Parser, Debug)]
#[command(name = "lookout", version = VERSION)]
#[command(about = "Estimate region update times and build a target sheet. Inspired by Spyglass.")]
struct Args {
    /// Your nation name or email, sent in the User-Agent (required)
    #[arg(short = 'u', long)]
    user_agent: Option<String>,

    /// Output workbook path (default: today's date, e.g. 2024-01-02.xlsx)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Generate the sheet without WFE and embassies
    #[arg(short = 'm', long)]
    minified: bool,

    /// TOML config file; flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Read the region dump from a local file instead of downloading it
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Minor update length in seconds
    #[arg(long)]
    minor_length: Option<u64>,

    /// Print the world summary as JSON when finished
    #[arg(long)]
    summary_json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<LookoutConfig> {
        let mut config = match &self.config {
            Some(path) => LookoutConfig::load(path)?,
            None => LookoutConfig::new(),
        };

        if self.user_agent.is_some() {
            config.user_agent = self.user_agent;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.dump.is_some() {
            config.dump_path = self.dump;
        }
        if let Some(minor) = self.minor_length {
            config.minor_update_length = minor;
        }
        config.minified |= self.minified;

        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let directive = if args.verbose { "lookout=debug" } else { "lookout=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive)),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let summary_json = args.summary_json;
    let config = args.into_config()?;

    tracing::info!("Lookout {} starting...", VERSION);

    let rt = Runtime::new()?;
    let outcome = rt.block_on(pipeline::run(&config))?;

    tracing::info!("{}", outcome.world.summary());
    tracing::info!("Finished! Sheet written to {}", outcome.output.display());

    if summary_json {
        println!("{}", outcome.world.to_json()?);
    }

    Ok(())
}
