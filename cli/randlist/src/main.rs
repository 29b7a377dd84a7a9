//! randlist CLI — pack, inspect, and demo lists with auxiliary node references.

mod commands;
mod config;
mod description;
mod view;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use config::RandlistConfig;

#[derive(Parser)]
#[command(name = "randlist", version, about = "Binary serialization of lists with rand links")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a TOML list description into a binary file
    Pack {
        /// Input description (.toml)
        input: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decode a binary file and print its nodes
    Inspect {
        /// Input file
        input: PathBuf,
        /// Output format (text, json, toml)
        #[arg(long)]
        export: Option<String>,
    },
    /// Round-trip the five-node sample list through a file
    Demo {
        /// File to write (default: system temp dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` takes precedence; otherwise `-v` flags pick the level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Pack { input, output } => commands::pack::run(&input, &output),

        Commands::Inspect { input, export } => {
            let config = load_config_optional(&cwd)?;
            commands::inspect::run(&input, export.as_deref(), config.as_ref())
        }

        Commands::Demo { output } => commands::demo::run(output.as_deref()),
    }
}

/// Try to load `randlist.toml` from the current directory upward.
fn load_config_optional(cwd: &Path) -> anyhow::Result<Option<RandlistConfig>> {
    Ok(RandlistConfig::find_and_load(cwd)?.map(|(config, dir)| {
        tracing::debug!(dir = %dir.display(), "using randlist.toml");
        config
    }))
}
