/* src/cli/core/src/config/types.rs */

use std::collections::HashSet;

use anyhow::{Result, bail};
use ejecta_compiler::HooksConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EjectaConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub build: BuildSection,
  /// Hooks shared by every group unless a group sets its own.
  #[serde(default)]
  pub hooks: HooksConfig,
  #[serde(default, rename = "group")]
  pub groups: Vec<GroupSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  #[serde(default)]
  pub pretty: bool,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self { out_dir: default_out_dir(), pretty: false }
  }
}

fn default_out_dir() -> String {
  ".ejecta/output".to_string()
}

/// One independently compiled route group (a locale, a route root, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSection {
  pub name: String,
  /// Route group JSON, relative to the config file.
  pub routes: String,
  /// Extra reserved path keys, appended to the file's own list.
  #[serde(default)]
  pub reserved: Vec<String>,
  #[serde(default)]
  pub hooks: Option<HooksConfig>,
}

impl EjectaConfig {
  pub fn validate(&self) -> Result<()> {
    if self.groups.is_empty() {
      bail!("at least one [[group]] must be declared");
    }
    let mut seen = HashSet::new();
    for group in &self.groups {
      if group.name.is_empty() {
        bail!("group.name must not be empty");
      }
      if !seen.insert(group.name.as_str()) {
        bail!("duplicate group name: {}", group.name);
      }
    }
    Ok(())
  }

  /// Groups to compile: all of them, or only the named one.
  pub fn select_groups(&self, only: Option<&str>) -> Result<Vec<&GroupSection>> {
    match only {
      None => Ok(self.groups.iter().collect()),
      Some(name) => match self.groups.iter().find(|g| g.name == name) {
        Some(group) => Ok(vec![group]),
        None => {
          let available: Vec<&str> = self.groups.iter().map(|g| g.name.as_str()).collect();
          bail!("unknown group \"{name}\"\navailable groups: {}", available.join(", "))
        }
      },
    }
  }

  pub fn hooks_for(&self, group: &GroupSection) -> HooksConfig {
    group.hooks.unwrap_or(self.hooks)
  }
}
