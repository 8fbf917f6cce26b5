/* src/compiler/core/src/route.rs */

//! Route declarations as handed over by route discovery.

use serde::Deserialize;

/// A segment layout: the external pattern, the generated handler id and
/// the page-level actions declared for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
  pub external_path: String,
  pub internal_path: String,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub external: bool,
  #[serde(default)]
  pub rewrite: bool,
  #[serde(default)]
  pub redirect: bool,
  /// A renderable page exists behind the rewrite/redirect actions.
  #[serde(default)]
  pub page: bool,
}

impl Page {
  pub fn new(external_path: impl Into<String>, internal_path: impl Into<String>) -> Self {
    Self {
      external_path: external_path.into(),
      internal_path: internal_path.into(),
      location: None,
      external: false,
      rewrite: false,
      redirect: false,
      page: true,
    }
  }

  pub fn at(mut self, location: impl Into<String>) -> Self {
    self.location = Some(location.into());
    self
  }

  pub fn with_rewrite(mut self) -> Self {
    self.rewrite = true;
    self
  }

  pub fn with_redirect(mut self) -> Self {
    self.redirect = true;
    self
  }

  pub fn external(mut self) -> Self {
    self.external = true;
    self
  }

  pub fn without_page(mut self) -> Self {
    self.page = false;
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteKind {
  Next,
  Middleware,
  DynamicForward { name: String },
  StaticForward,
}

/// One level of an action chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Route {
  pub segment: Page,
  pub kind: RouteKind,
  #[serde(default)]
  pub then: Option<Endpoint>,
  #[serde(default)]
  pub forward: Option<Endpoint>,
}

impl Route {
  pub fn next(segment: Page) -> Self {
    Self { segment, kind: RouteKind::Next, then: None, forward: None }
  }

  pub fn middleware(segment: Page, then: Option<Endpoint>) -> Self {
    Self { segment, kind: RouteKind::Middleware, then, forward: None }
  }

  pub fn dynamic_forward(
    segment: Page,
    name: impl Into<String>,
    then: Option<Endpoint>,
    forward: Option<Endpoint>,
  ) -> Self {
    Self { segment, kind: RouteKind::DynamicForward { name: name.into() }, then, forward }
  }

  pub fn static_forward(segment: Page, then: Option<Endpoint>, forward: Option<Endpoint>) -> Self {
    Self { segment, kind: RouteKind::StaticForward, then, forward }
  }
}

/// Either a further chained route or a terminal page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
  Route(Box<Route>),
  Page(Page),
}

impl Endpoint {
  /// Registry normal form: a bare page becomes a `Next` route.
  pub fn into_route(self) -> Route {
    match self {
      Self::Route(route) => *route,
      Self::Page(page) => Route::next(page),
    }
  }
}

impl From<Route> for Endpoint {
  fn from(route: Route) -> Self {
    Self::Route(Box::new(route))
  }
}

impl From<Page> for Endpoint {
  fn from(page: Page) -> Self {
    Self::Page(page)
  }
}
