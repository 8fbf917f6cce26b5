/* src/compiler/core/src/lib.rs */

pub mod branch;
pub mod eject;
pub mod errors;
pub mod evaluate;
pub mod hooks;
pub mod registry;
pub mod route;
pub mod segment;


// Re-exports for ergonomic use
pub use branch::{Branch, SwitchCase};
pub use eject::{Bindings, eject, eject_page, eject_route};
pub use errors::CompileError;
pub use evaluate::{Outcome, Param, Params, Passthrough, Resolution, Runtime, evaluate};
pub use hooks::HooksConfig;
pub use registry::{MatcherNode, Overwrite, Registry, Slot};
pub use route::{Endpoint, Page, Route, RouteKind};
pub use segment::{Segment, parse_pattern, split_path};

use serde::{Deserialize, Serialize};

/// One independently compiled set of routes (e.g. one locale or route root).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteGroup {
  /// `(path_key, endpoint)` in declaration order.
  #[serde(default)]
  pub routes: Vec<(String, Endpoint)>,
  /// Path keys produced out of band; compiled to `SKIP`.
  #[serde(default)]
  pub reserved: Vec<String>,
  #[serde(default)]
  pub hooks: HooksConfig,
}

/// The artifact handed to the output generator.
#[derive(Debug, Clone, Serialize)]
pub struct Compiled {
  pub tree: Branch,
  pub hooks: HooksConfig,
  #[serde(skip)]
  pub warnings: Vec<Overwrite>,
}

impl Compiled {
  pub fn resolve(&self, path: &str) -> Resolution {
    evaluate(&self.tree, path, &mut Passthrough)
  }
}

/// Routes first, then reservations, then ejection from segment 0.
pub fn compile(group: &RouteGroup) -> Result<Compiled, CompileError> {
  let mut registry = Registry::build(group.routes.iter().map(|(k, e)| (k.as_str(), e.clone())))?;
  registry.reserve(&group.reserved)?;
  let tree = eject(&registry)?;
  Ok(Compiled { tree, hooks: group.hooks, warnings: registry.warnings().to_vec() })
}
