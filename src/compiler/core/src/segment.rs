/* src/compiler/core/src/segment.rs */

//! Path segment model shared by registry path keys, route patterns and
//! request paths.

/// One `/`-delimited component of a path pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
  Static(&'a str),
  /// `:name`. Registry path keys may leave the name empty (`:`).
  Dynamic(&'a str),
  /// `*name`
  CatchAll(&'a str),
}

impl<'a> Segment<'a> {
  pub fn parse(raw: &'a str) -> Self {
    if let Some(name) = raw.strip_prefix(':') {
      Self::Dynamic(name)
    } else if let Some(name) = raw.strip_prefix('*') {
      Self::CatchAll(name)
    } else {
      Self::Static(raw)
    }
  }

  pub fn is_catch_all(&self) -> bool {
    matches!(self, Self::CatchAll(_))
  }
}

/// Split a `/`-prefixed path into its components.
/// One leading and one trailing slash are dropped, so `/users/:id/` and
/// `/users/:id` both yield `["users", ":id"]` and `/` yields nothing.
pub fn split_path(path: &str) -> Vec<&str> {
  let trimmed = path.strip_prefix('/').unwrap_or(path);
  let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
  if trimmed.is_empty() {
    return vec![];
  }
  trimmed.split('/').collect()
}

/// Classified segments of a pattern, in order.
pub fn parse_pattern(pattern: &str) -> Vec<Segment<'_>> {
  split_path(pattern).into_iter().map(Segment::parse).collect()
}

/// Index of the first catch-all that is not the final segment, if any.
pub(crate) fn misplaced_catch_all(segments: &[Segment<'_>]) -> Option<usize> {
  let last = segments.len().checked_sub(1)?;
  segments.iter().position(Segment::is_catch_all).filter(|&i| i != last)
}
