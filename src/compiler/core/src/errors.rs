/* src/compiler/core/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
  /// A pattern whose structure cannot be lowered (e.g. a catch-all that is not last).
  MalformedPattern { pattern: String, reason: String },
  /// A parameter name bound twice in one action chain at different slots.
  ParamCollision { pattern: String, name: String },
}

impl CompileError {
  pub fn malformed(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::MalformedPattern { pattern: pattern.into(), reason: reason.into() }
  }

  pub fn collision(pattern: impl Into<String>, name: impl Into<String>) -> Self {
    Self::ParamCollision { pattern: pattern.into(), name: name.into() }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::MalformedPattern { .. } => "MALFORMED_PATTERN",
      Self::ParamCollision { .. } => "PARAM_COLLISION",
    }
  }

  pub fn pattern(&self) -> &str {
    match self {
      Self::MalformedPattern { pattern, .. } | Self::ParamCollision { pattern, .. } => pattern,
    }
  }
}

impl fmt::Display for CompileError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MalformedPattern { pattern, reason } => {
        write!(f, "{}: {pattern}: {reason}", self.code())
      }
      Self::ParamCollision { pattern, name } => {
        write!(f, "{}: {pattern}: parameter \"{name}\" is already bound", self.code())
      }
    }
  }
}

impl std::error::Error for CompileError {}
