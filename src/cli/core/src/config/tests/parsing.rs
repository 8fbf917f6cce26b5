/* src/cli/core/src/config/tests/parsing.rs */

use super::*;

#[test]
fn parse_minimal_config() {
  let config: EjectaConfig = toml::from_str(
    r#"
[project]
name = "site"

[[group]]
name = "en"
routes = "routes/en.json"
"#,
  )
  .unwrap();
  assert_eq!(config.project.name, "site");
  assert_eq!(config.build.out_dir, ".ejecta/output");
  assert!(!config.build.pretty);
  assert_eq!(config.groups.len(), 1);
  assert!(config.groups[0].reserved.is_empty());
  assert!(config.groups[0].hooks.is_none());
}

#[test]
fn parse_full_config() {
  let config: EjectaConfig = toml::from_str(
    r#"
[project]
name = "site"

[build]
out_dir = "dist/router"
pretty = true

[hooks]
notFound = true

[[group]]
name = "en"
routes = "routes/en.json"
reserved = ["/robots.txt/", "/assets/*file/"]

[[group]]
name = "fr"
routes = "routes/fr.json"

[group.hooks]
redirect = true
"#,
  )
  .unwrap();
  assert_eq!(config.build.out_dir, "dist/router");
  assert!(config.build.pretty);
  assert_eq!(config.groups[0].reserved, vec!["/robots.txt/", "/assets/*file/"]);

  let en = config.hooks_for(&config.groups[0]);
  assert!(en.not_found);
  assert!(!en.redirect);

  // A group's own table replaces the shared one entirely.
  let fr = config.hooks_for(&config.groups[1]);
  assert!(fr.redirect);
  assert!(!fr.not_found);
}

#[test]
fn find_config_walks_upward() {
  let tmp = tempfile::tempdir().unwrap();
  let nested = tmp.path().join("a/b/c");
  std::fs::create_dir_all(&nested).unwrap();
  std::fs::write(tmp.path().join(CONFIG_FILE), "[project]\nname = \"x\"\n").unwrap();

  let found = find_ejecta_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join(CONFIG_FILE));
}

#[test]
fn load_rejects_invalid_toml() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join(CONFIG_FILE);
  std::fs::write(&path, "[project\nname = 1").unwrap();
  let err = load_ejecta_config(&path).unwrap_err();
  assert!(err.to_string().contains("failed to parse"));
}
