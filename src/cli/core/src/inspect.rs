/* src/cli/core/src/inspect.rs */

// `ejecta inspect`: resolve one request path against a compiled group.

use std::path::Path;

use anyhow::{Result, bail};
use ejecta_compiler::Resolution;

use crate::build::compile_group;
use crate::config::EjectaConfig;
use crate::ui;

/// Resolve `path` in the named group, or the only group when there is one.
pub fn resolve_path(
  config: &EjectaConfig,
  base_dir: &Path,
  path: &str,
  group: Option<&str>,
) -> Result<Resolution> {
  let groups = config.select_groups(group)?;
  let [group] = groups.as_slice() else {
    bail!("multiple route groups declared, pass --group to pick one");
  };
  let compiled = compile_group(config, group, base_dir)?;
  Ok(compiled.resolve(path))
}

pub fn run_inspect(config: &EjectaConfig, base_dir: &Path, path: &str, group: Option<&str>) -> Result<()> {
  let resolution = resolve_path(config, base_dir, path, group)?;
  ui::raw(&serde_json::to_string_pretty(&resolution)?);
  Ok(())
}
