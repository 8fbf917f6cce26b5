/* src/compiler/core/src/eject/chain.rs */

//! Lowering of one route's action chain: parameter bindings first, then
//! the route's own action, then its continuations.

use std::collections::BTreeMap;

use crate::branch::Branch;
use crate::errors::CompileError;
use crate::route::{Endpoint, Page, Route, RouteKind};
use crate::segment::{Segment, misplaced_catch_all, parse_pattern};

/// Parameters bound so far along one action chain.
/// Cloned into every continuation, never shared between siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
  params: BTreeMap<String, usize>,
  catch_all_bound: bool,
}

impl Bindings {
  pub fn new() -> Self {
    Self::default()
  }

  fn with_param(&self, name: &str, index: usize) -> Self {
    let mut next = self.clone();
    next.params.insert(name.to_string(), index);
    next
  }

  fn with_catch_all(&self, name: &str, index: usize) -> Self {
    let mut next = self.with_param(name, index);
    next.catch_all_bound = true;
    next
  }
}

enum Binding<'a> {
  Dynamic { name: &'a str, index: usize },
  CatchAll { name: &'a str, index: usize },
}

/// The next parameter of `pattern` that still needs a binding branch.
fn next_binding<'a>(
  pattern: &'a str,
  bindings: &Bindings,
) -> Result<Option<Binding<'a>>, CompileError> {
  let segments = parse_pattern(pattern);
  if misplaced_catch_all(&segments).is_some() {
    return Err(CompileError::malformed(pattern, "catch-all must be the last segment"));
  }

  for (index, segment) in segments.iter().enumerate() {
    let Segment::Dynamic(name) = *segment else { continue };
    if name.is_empty() {
      return Err(CompileError::malformed(pattern, "dynamic segment without a name"));
    }
    match bindings.params.get(name) {
      Some(&at) if at == index => {}
      Some(_) => return Err(CompileError::collision(pattern, name)),
      None => return Ok(Some(Binding::Dynamic { name, index })),
    }
  }

  if let Some(&Segment::CatchAll(name)) = segments.last()
    && !bindings.catch_all_bound
  {
    let index = segments.len() - 1;
    if name.is_empty() {
      return Err(CompileError::malformed(pattern, "catch-all segment without a name"));
    }
    if bindings.params.get(name).is_some_and(|&at| at != index) {
      return Err(CompileError::collision(pattern, name));
    }
    return Ok(Some(Binding::CatchAll { name, index }));
  }

  Ok(None)
}

/// Emit the binding branch for the next unbound parameter of `pattern`,
/// continuing with `rest` under the extended bindings.
fn bind_next<F>(
  pattern: &str,
  bindings: &Bindings,
  rest: F,
) -> Result<Option<Branch>, CompileError>
where
  F: FnOnce(Bindings) -> Result<Branch, CompileError>,
{
  let branch = match next_binding(pattern, bindings)? {
    None => return Ok(None),
    Some(Binding::Dynamic { name, index }) => Branch::Dynamic {
      name: name.to_string(),
      index,
      then: Box::new(rest(bindings.with_param(name, index))?),
    },
    Some(Binding::CatchAll { name, index }) => Branch::CatchAll {
      name: name.to_string(),
      index,
      then: Box::new(rest(bindings.with_catch_all(name, index))?),
    },
  };
  Ok(Some(branch))
}

pub fn eject_route(route: &Route, bindings: Bindings) -> Result<Branch, CompileError> {
  let segment = &route.segment;
  if let Some(branch) =
    bind_next(&segment.external_path, &bindings, |next| eject_route(route, next))?
  {
    return Ok(branch);
  }

  let branch = match &route.kind {
    RouteKind::Middleware => Branch::Middleware {
      internal_path: segment.internal_path.clone(),
      location: segment.location.clone(),
      then: lower(route.then.as_ref(), &bindings)?,
    },
    RouteKind::DynamicForward { name } => Branch::DynamicForward {
      name: name.clone(),
      internal_path: segment.internal_path.clone(),
      location: segment.location.clone(),
      then: lower(route.then.as_ref(), &bindings)?,
      forward: lower(route.forward.as_ref(), &bindings)?,
    },
    RouteKind::StaticForward => Branch::StaticForward {
      internal_path: segment.internal_path.clone(),
      location: segment.location.clone(),
      then: lower(route.then.as_ref(), &bindings)?,
      forward: lower(route.forward.as_ref(), &bindings)?,
    },
    RouteKind::Next => eject_page(segment, bindings)?,
  };
  Ok(branch)
}

pub fn eject_page(page: &Page, bindings: Bindings) -> Result<Branch, CompileError> {
  if let Some(branch) = bind_next(&page.external_path, &bindings, |next| eject_page(page, next))? {
    return Ok(branch);
  }

  if page.external {
    return Ok(Branch::External);
  }
  if page.rewrite {
    let fallback = if page.redirect || page.page {
      let rest = Page { rewrite: false, ..page.clone() };
      Some(Box::new(eject_page(&rest, bindings)?))
    } else {
      None
    };
    return Ok(Branch::Rewrite {
      location: page.location.clone(),
      internal_path: page.internal_path.clone(),
      fallback,
    });
  }
  if page.redirect {
    let fallback = if page.page {
      let rest = Page { redirect: false, ..page.clone() };
      Some(Box::new(eject_page(&rest, bindings)?))
    } else {
      None
    };
    return Ok(Branch::Redirect {
      location: page.location.clone(),
      internal_path: page.internal_path.clone(),
      fallback,
    });
  }
  Ok(Branch::Next {
    internal_path: page.internal_path.clone(),
    external_path: page.external_path.clone(),
  })
}

fn lower(endpoint: Option<&Endpoint>, bindings: &Bindings) -> Result<Box<Branch>, CompileError> {
  let branch = match endpoint {
    Some(Endpoint::Route(route)) => eject_route(route, bindings.clone())?,
    Some(Endpoint::Page(page)) => eject_page(page, bindings.clone())?,
    None => Branch::NotFound,
  };
  Ok(Box::new(branch))
}
