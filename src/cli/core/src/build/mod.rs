/* src/cli/core/src/build/mod.rs */

// `ejecta build`: compile every route group and write one artifact per group.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ejecta_compiler::{Compiled, RouteGroup, compile};

use crate::config::{EjectaConfig, GroupSection};
use crate::ui;

/// Read a group's route file and merge in what the config adds to it.
pub fn load_group(config: &EjectaConfig, group: &GroupSection, base_dir: &Path) -> Result<RouteGroup> {
  let path = base_dir.join(&group.routes);
  let content =
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut routes: RouteGroup =
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  routes.reserved.extend(group.reserved.iter().cloned());
  routes.hooks = config.hooks_for(group);
  Ok(routes)
}

pub fn compile_group(config: &EjectaConfig, group: &GroupSection, base_dir: &Path) -> Result<Compiled> {
  let routes = load_group(config, group, base_dir)?;
  compile(&routes).with_context(|| format!("group \"{}\" failed to compile", group.name))
}

pub fn run_build(config: &EjectaConfig, base_dir: &Path, only: Option<&str>) -> Result<Vec<PathBuf>> {
  let groups = config.select_groups(only)?;
  let out_dir = base_dir.join(&config.build.out_dir);
  std::fs::create_dir_all(&out_dir)
    .with_context(|| format!("failed to create {}", out_dir.display()))?;

  ui::arrow(&format!("compiling {} route group(s) for {}", groups.len(), config.project.name));
  let mut written = Vec::with_capacity(groups.len());
  for (i, group) in groups.iter().enumerate() {
    ui::step(i + 1, groups.len(), &format!("group {}", group.name));
    let compiled = compile_group(config, group, base_dir)?;
    for warning in &compiled.warnings {
      ui::warn(&warning.to_string());
    }
    let path = out_dir.join(format!("{}.json", group.name));
    write_artifact(&path, &compiled, config.build.pretty)?;
    ui::detail(&format!("{} nodes", compiled.tree.size()));
    let hooks = compiled.hooks.enabled();
    if !hooks.is_empty() {
      ui::detail(&format!("hooks: {}", hooks.join(", ")));
    }
    ui::detail_ok(&path.display().to_string());
    written.push(path);
  }

  ui::blank();
  ui::ok("build complete");
  Ok(written)
}

fn write_artifact(path: &Path, compiled: &Compiled, pretty: bool) -> Result<()> {
  let json = if pretty { serde_json::to_string_pretty(compiled)? } else { serde_json::to_string(compiled)? };
  std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  const ROUTES: &str = r#"{
    "routes": [
      ["/", {"externalPath": "/", "internalPath": "index", "page": true}],
      ["/blog/:/", {"externalPath": "/blog/:id/", "internalPath": "blog/[id]", "page": true}]
    ],
    "reserved": ["/favicon.ico/"]
  }"#;

  fn project(dir: &Path, groups: &str) -> EjectaConfig {
    std::fs::create_dir_all(dir.join("routes")).unwrap();
    std::fs::write(dir.join("routes/en.json"), ROUTES).unwrap();
    let config: EjectaConfig = toml::from_str(&format!(
      "[project]\nname = \"site\"\n\n[hooks]\nnotFound = true\n{groups}"
    ))
    .unwrap();
    config.validate().unwrap();
    config
  }

  #[test]
  fn load_group_merges_config_reservations_and_hooks() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(
      tmp.path(),
      "[[group]]\nname = \"en\"\nroutes = \"routes/en.json\"\nreserved = [\"/blog/*rest/\"]\n",
    );
    let group = load_group(&config, &config.groups[0], tmp.path()).unwrap();
    assert_eq!(group.routes.len(), 2);
    assert_eq!(group.reserved, vec!["/favicon.ico/", "/blog/*rest/"]);
    assert!(group.hooks.not_found);
  }

  #[test]
  fn run_build_writes_one_artifact_per_group() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(
      tmp.path(),
      r#"
[[group]]
name = "en"
routes = "routes/en.json"

[[group]]
name = "fr"
routes = "routes/en.json"
"#,
    );
    let written = run_build(&config, tmp.path(), None).unwrap();
    assert_eq!(written.len(), 2);

    let artifact: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(tmp.path().join(".ejecta/output/en.json")).unwrap())
        .unwrap();
    assert_eq!(artifact["tree"]["type"], "SWITCH");
    assert_eq!(artifact["hooks"]["notFound"], true);
    assert!(tmp.path().join(".ejecta/output/fr.json").is_file());
  }

  #[test]
  fn run_build_filters_by_group() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(
      tmp.path(),
      "[[group]]\nname = \"en\"\nroutes = \"routes/en.json\"\n\n[[group]]\nname = \"fr\"\nroutes = \"routes/en.json\"\n",
    );
    run_build(&config, tmp.path(), Some("fr")).unwrap();
    assert!(!tmp.path().join(".ejecta/output/en.json").exists());
    assert!(tmp.path().join(".ejecta/output/fr.json").is_file());
  }

  #[test]
  fn compile_errors_name_the_group() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(tmp.path(), "[[group]]\nname = \"bad\"\nroutes = \"routes/bad.json\"\n");
    std::fs::write(
      tmp.path().join("routes/bad.json"),
      r#"{"routes": [["/a/*/b/", {"externalPath": "/a/*rest/b/", "internalPath": "x"}]]}"#,
    )
    .unwrap();
    let err = run_build(&config, tmp.path(), None).unwrap_err();
    assert_eq!(err.to_string(), "group \"bad\" failed to compile");
    assert!(format!("{err:#}").contains("MALFORMED_PATTERN"));
  }

  #[test]
  fn missing_route_file_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let config = project(tmp.path(), "[[group]]\nname = \"en\"\nroutes = \"routes/missing.json\"\n");
    let err = run_build(&config, tmp.path(), None).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
  }
}
