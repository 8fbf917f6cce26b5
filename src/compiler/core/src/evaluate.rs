/* src/compiler/core/src/evaluate.rs */

//! Reference evaluation of a compiled tree against a request path.
//!
//! Mirrors what the generated request handler does: `SWITCH` nodes pick a
//! chain by segment, the chain binds its parameters and then runs its
//! handlers until a terminal outcome is reached.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::branch::Branch;
use crate::segment::split_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
  Single(String),
  /// Catch-all: every segment from the bound index to the end.
  Rest(Vec<String>),
}

pub type Params = BTreeMap<String, Param>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Outcome {
  Next { internal_path: String, external_path: String },
  Rewrite { internal_path: String, location: Option<String> },
  Redirect { internal_path: String, location: Option<String> },
  External,
  NotFound,
  Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
  pub outcome: Outcome,
  pub params: Params,
  /// Internal paths of the middleware / forward handlers invoked, in order.
  pub handlers: Vec<String>,
}

/// Request-time decisions the tree delegates to route handlers.
pub trait Runtime {
  fn middleware(&mut self, _internal_path: &str, _params: &Params) {}

  /// Whether a forward handler takes its `forward` continuation.
  fn forward(&mut self, _internal_path: &str, _params: &Params) -> bool {
    false
  }

  /// Whether a rewrite handler produced a destination.
  fn rewrite(&mut self, _internal_path: &str, _params: &Params) -> bool {
    true
  }

  /// Whether a redirect handler produced a destination.
  fn redirect(&mut self, _internal_path: &str, _params: &Params) -> bool {
    true
  }
}

/// Never forwards, accepts every rewrite and redirect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Runtime for Passthrough {}

pub fn evaluate<R: Runtime>(tree: &Branch, path: &str, runtime: &mut R) -> Resolution {
  let segments = split_path(path);
  let mut eval = Evaluator { segments: &segments, runtime, params: Params::new(), handlers: vec![] };
  let outcome = eval.run(select(tree, &segments));
  Resolution { outcome, params: eval.params, handlers: eval.handlers }
}

static NOT_FOUND: Branch = Branch::NotFound;

/// Resolve `SWITCH` nodes down to the root of one action chain.
/// Precedence: matching case, then the dynamic default, then the catch-all.
/// Only a segment past the end of the path reads as `""`; an empty inner
/// component (`/a//b`) matches nothing.
fn select<'t>(branch: &'t Branch, segments: &[&str]) -> &'t Branch {
  let Branch::Switch { index, cases, default_case, catch_all } = branch else {
    return branch;
  };
  let Some(&segment) = segments.get(*index) else {
    return match cases.iter().find(|case| case.matches.is_empty()) {
      Some(case) => select(&case.then, segments),
      None => &NOT_FOUND,
    };
  };
  if segment.is_empty() {
    return &NOT_FOUND;
  }

  let mut selected = match cases.iter().find(|case| case.matches == segment) {
    Some(case) => select(&case.then, segments),
    None => &NOT_FOUND,
  };
  if matches!(selected, Branch::NotFound) {
    selected = select(default_case, segments);
  }
  if matches!(selected, Branch::NotFound)
    && let Some(catch_all) = catch_all
  {
    selected = select(catch_all, segments);
  }
  selected
}

struct Evaluator<'a, R> {
  segments: &'a [&'a str],
  runtime: &'a mut R,
  params: Params,
  handlers: Vec<String>,
}

impl<R: Runtime> Evaluator<'_, R> {
  fn run(&mut self, branch: &Branch) -> Outcome {
    match branch {
      Branch::Switch { .. } => {
        let selected = select(branch, self.segments);
        if matches!(selected, Branch::Switch { .. }) {
          return Outcome::NotFound;
        }
        self.run(selected)
      }
      Branch::Dynamic { name, index, then } => {
        let value = self.segments.get(*index).copied().unwrap_or_default();
        self.params.insert(name.clone(), Param::Single(value.to_string()));
        self.run(then)
      }
      Branch::CatchAll { name, index, then } => {
        let rest = self.segments.get(*index..).unwrap_or_default();
        self.params.insert(name.clone(), Param::Rest(rest.iter().map(|s| (*s).to_string()).collect()));
        self.run(then)
      }
      Branch::Middleware { internal_path, then, .. } => {
        self.handlers.push(internal_path.clone());
        self.runtime.middleware(internal_path, &self.params);
        self.run(then)
      }
      Branch::DynamicForward { internal_path, then, forward, .. }
      | Branch::StaticForward { internal_path, then, forward, .. } => {
        self.handlers.push(internal_path.clone());
        if self.runtime.forward(internal_path, &self.params) {
          self.run(forward)
        } else {
          self.run(then)
        }
      }
      Branch::Rewrite { location, internal_path, fallback } => {
        if self.runtime.rewrite(internal_path, &self.params) {
          Outcome::Rewrite { internal_path: internal_path.clone(), location: location.clone() }
        } else {
          self.run_fallback(fallback.as_deref())
        }
      }
      Branch::Redirect { location, internal_path, fallback } => {
        if self.runtime.redirect(internal_path, &self.params) {
          Outcome::Redirect { internal_path: internal_path.clone(), location: location.clone() }
        } else {
          self.run_fallback(fallback.as_deref())
        }
      }
      Branch::External => Outcome::External,
      Branch::Next { internal_path, external_path } => Outcome::Next {
        internal_path: internal_path.clone(),
        external_path: external_path.clone(),
      },
      Branch::NotFound => Outcome::NotFound,
      Branch::Skip => Outcome::Skip,
    }
  }

  fn run_fallback(&mut self, fallback: Option<&Branch>) -> Outcome {
    match fallback {
      Some(branch) => self.run(branch),
      None => Outcome::NotFound,
    }
  }
}
