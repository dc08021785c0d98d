use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use luagen_config::AppConfig;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "luagen")]
#[command(about = "Generate Lua annotation stubs from sol2-bound C++ sources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

/// Flags applied on top of the loaded configuration.
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Configuration file (defaults to ./luagen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the script host header and source
    #[arg(long, global = true)]
    source_dir: Option<PathBuf>,

    /// Directory the stub files are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the module stub and one stub per exposed class
    Generate,

    /// Fail when the stubs on disk differ from a fresh generation
    Check,

    /// Print the resolved symbol tables and diagnostics as JSON
    Dump,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.overrides)?;
    luagen_config::logging::initialize(&config);

    match cli.command {
        Command::Generate => commands::generate(&config),
        Command::Check => commands::check(&config),
        Command::Dump => commands::dump(&config),
    }
}

fn load_config(overrides: &Overrides) -> Result<AppConfig> {
    let mut config = AppConfig::load(overrides.config.as_deref()).context("Failed to load configuration")?;

    if let Some(dir) = &overrides.source_dir {
        config.layout.source_dir = dir.clone();
    }
    if let Some(dir) = &overrides.output_dir {
        config.output.dir = dir.clone();
    }
    Ok(config)
}
