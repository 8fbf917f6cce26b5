/* src/cli/core/src/main.rs */

mod build;
mod config;
mod inspect;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{EjectaConfig, find_ejecta_config, load_ejecta_config};

#[derive(Parser)]
#[command(name = "ejecta", about = "Compile route definitions into decision trees", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Compile every route group declared in ejecta.toml
  Build {
    /// Path to ejecta.toml (searched upward from the current directory by default)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Only compile the named group
    #[arg(short, long)]
    group: Option<String>,
  },
  /// Resolve a request path against a compiled group and print the result
  Inspect {
    /// Request path, e.g. /users/42
    path: String,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    group: Option<String>,
  },
}

/// Load the config and return it with the directory group paths resolve against.
fn resolve_config(explicit: Option<&Path>) -> Result<(EjectaConfig, PathBuf)> {
  let path = match explicit {
    Some(path) => path.to_path_buf(),
    None => {
      let cwd = std::env::current_dir().context("failed to read current directory")?;
      find_ejecta_config(&cwd)?
    }
  };
  let config = load_ejecta_config(&path)?;
  let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
  Ok((config, base_dir))
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  match cli.command {
    Command::Build { config, group } => {
      ui::banner("build");
      let (config, base_dir) = resolve_config(config.as_deref())?;
      build::run_build(&config, &base_dir, group.as_deref())?;
    }
    Command::Inspect { path, config, group } => {
      let (config, base_dir) = resolve_config(config.as_deref())?;
      inspect::run_inspect(&config, &base_dir, &path, group.as_deref())?;
    }
  }
  Ok(())
}
