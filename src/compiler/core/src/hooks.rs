/* src/compiler/core/src/hooks.rs */

use serde::{Deserialize, Serialize};

/// Optional router hooks a route group's hook module exports.
/// A group without a hook module gets the all-`false` default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HooksConfig {
  pub not_found: bool,
  pub redirect: bool,
  pub rewrite: bool,
  pub json: bool,
  pub params: bool,
  pub response: bool,
  pub error: bool,
  pub external: bool,
}

impl HooksConfig {
  /// Enable every hook whose export name is present; other names are ignored.
  pub fn from_exports<I, S>(exports: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut config = Self::default();
    for name in exports {
      if let Some(flag) = config.flag_mut(name.as_ref()) {
        *flag = true;
      }
    }
    config
  }

  /// Names of the enabled hooks, in declaration order.
  pub fn enabled(&self) -> Vec<&'static str> {
    let flags = [
      ("notFound", self.not_found),
      ("redirect", self.redirect),
      ("rewrite", self.rewrite),
      ("json", self.json),
      ("params", self.params),
      ("response", self.response),
      ("error", self.error),
      ("external", self.external),
    ];
    flags.into_iter().filter(|(_, on)| *on).map(|(name, _)| name).collect()
  }

  fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
    match name {
      "notFound" => Some(&mut self.not_found),
      "redirect" => Some(&mut self.redirect),
      "rewrite" => Some(&mut self.rewrite),
      "json" => Some(&mut self.json),
      "params" => Some(&mut self.params),
      "response" => Some(&mut self.response),
      "error" => Some(&mut self.error),
      "external" => Some(&mut self.external),
      _ => None,
    }
  }
}
