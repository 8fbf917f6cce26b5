/* src/compiler/core/src/branch.rs */

//! The compiled decision tree handed to the runtime / output generator.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchCase {
  #[serde(rename = "match")]
  pub matches: String,
  pub then: Branch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Branch {
  /// Test the request segment at `index`; an absent segment reads as `""`.
  Switch {
    index: usize,
    cases: Vec<SwitchCase>,
    default_case: Box<Branch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    catch_all: Option<Box<Branch>>,
  },
  Dynamic {
    name: String,
    index: usize,
    then: Box<Branch>,
  },
  CatchAll {
    name: String,
    index: usize,
    then: Box<Branch>,
  },
  Middleware {
    internal_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    then: Box<Branch>,
  },
  DynamicForward {
    name: String,
    internal_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    then: Box<Branch>,
    forward: Box<Branch>,
  },
  StaticForward {
    internal_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    then: Box<Branch>,
    forward: Box<Branch>,
  },
  Rewrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    internal_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<Box<Branch>>,
  },
  Redirect {
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    internal_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<Box<Branch>>,
  },
  External,
  Next {
    internal_path: String,
    external_path: String,
  },
  NotFound,
  Skip,
}

impl Branch {
  /// Direct children in evaluation order.
  pub fn children(&self) -> Vec<&Branch> {
    match self {
      Self::Switch { cases, default_case, catch_all, .. } => {
        let mut out: Vec<&Branch> = cases.iter().map(|c| &c.then).collect();
        out.push(&**default_case);
        out.extend(catch_all.as_deref());
        out
      }
      Self::Dynamic { then, .. } | Self::CatchAll { then, .. } | Self::Middleware { then, .. } => {
        vec![&**then]
      }
      Self::DynamicForward { then, forward, .. } | Self::StaticForward { then, forward, .. } => {
        vec![&**then, &**forward]
      }
      Self::Rewrite { fallback, .. } | Self::Redirect { fallback, .. } => {
        fallback.as_deref().into_iter().collect()
      }
      Self::External | Self::Next { .. } | Self::NotFound | Self::Skip => vec![],
    }
  }

  /// Number of nodes in the tree rooted here.
  pub fn size(&self) -> usize {
    1 + self.children().into_iter().map(Branch::size).sum::<usize>()
  }
}
