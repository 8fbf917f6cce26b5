/* src/cli/core/src/config/mod.rs */

mod types;

pub use types::{EjectaConfig, GroupSection};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

pub const CONFIG_FILE: &str = "ejecta.toml";

/// Walk upward from `start` to find `ejecta.toml`, like Cargo.toml discovery
pub fn find_ejecta_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_ejecta_config(path: &Path) -> Result<EjectaConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: EjectaConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate()?;
  Ok(config)
}

#[cfg(test)]
mod tests {
  use super::*;

  mod parsing;
  mod validation;
}
