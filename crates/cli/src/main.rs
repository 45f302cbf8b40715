mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use wareplan_lib::consts::APP_NAME;

use cmd::{cmd_filter, cmd_hash, cmd_order};
use output::OutputFormat;

/// wareplan - plan content-addressed build pipelines
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the execution order of a module's steps
  Order {
    /// Path to a module JSON file
    module: PathBuf,

    /// Flatten submodules into their own steps
    #[arg(long)]
    deep: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Print the setup hash of a formula
  Hash {
    /// Path to a formula JSON file
    formula: PathBuf,
  },

  /// Parse a fileset filter and print its canonical form
  Filter {
    /// Which side of packing the filter applies to
    #[arg(value_enum)]
    kind: FilterKind,

    /// Filter string, e.g. "uid=1000,mtime=@0"
    #[arg(default_value = "")]
    filter: String,

    /// Preset to layer the filter over
    #[arg(long)]
    preset: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterKind {
  Pack,
  Unpack,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Order { module, deep, format } => cmd_order(&module, deep, format),
    Commands::Hash { formula } => cmd_hash(&formula),
    Commands::Filter {
      kind,
      filter,
      preset,
      format,
    } => cmd_filter(kind, &filter, preset.as_deref(), format),
  }
}
