//! A single path binding.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::filter::auth::Authenticator;
use crate::filter::{self, Filter, Next};
use crate::handler::BoxedHandler;
use crate::method::Method;

/// Everything registered for one normalized path: a handler per method, the
/// filters shared by those methods and an optional [`Authenticator`].
///
/// Obtained from [`Router::register`](crate::Router::register) or one of the
/// verb shortcuts. Every mutator returns `&mut Self` so attachments chain:
///
/// ```rust
/// # use std::convert::Infallible;
/// # use turnstile::{Authenticator, Request, Router, filter};
/// # async fn list(_: Request) -> &'static str { "" }
/// # fn check(_: &str, _: &str) -> Result<bool, Infallible> { Ok(true) }
/// let mut router = Router::new();
/// router.get("/items", list)
///     .filter(filter::from_fn(|req, next: filter::Next| async move { next.run(req).await }))
///     .authenticator(Authenticator::basic(check));
/// ```
pub struct Route {
    path: String,
    handlers: HashMap<Method, BoxedHandler>,
    filters: Vec<Arc<dyn Filter>>,
    authenticator: Option<Authenticator>,
    chains: HashMap<Method, Next>,
}

impl Route {
    pub(crate) fn new(path: String) -> Self {
        Self {
            path,
            handlers: HashMap::new(),
            filters: Vec::new(),
            authenticator: None,
            chains: HashMap::new(),
        }
    }

    /// Appends a filter. Filters run in the order they were added, inside the
    /// authenticator and outside the handler.
    pub fn filter(&mut self, filter: impl Filter) -> &mut Self {
        self.filters.push(Arc::new(filter));
        self.recompose();
        self
    }

    /// Gates every method of this route behind `authenticator`. A route has
    /// at most one; attaching another replaces it.
    pub fn authenticator(&mut self, authenticator: Authenticator) -> &mut Self {
        if self.authenticator.replace(authenticator).is_some() {
            debug!(path = %self.path, "replacing route authenticator");
        }
        self.recompose();
        self
    }

    /// The normalized path this route is bound to.
    pub fn path(&self) -> &str { &self.path }

    pub fn filter_count(&self) -> usize { self.filters.len() }

    pub fn has_authenticator(&self) -> bool { self.authenticator.is_some() }

    /// Bound methods, sorted.
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().copied().collect();
        methods.sort();
        methods
    }

    /// Binds `handler` unless `method` already has one. Returns whether it
    /// was bound.
    pub(crate) fn bind(&mut self, method: Method, handler: BoxedHandler) -> bool {
        if self.handlers.contains_key(&method) {
            return false;
        }
        let chain = filter::compose(&handler, &self.filters, self.gate());
        self.handlers.insert(method, handler);
        self.chains.insert(method, chain);
        true
    }

    pub(crate) fn chain(&self, method: Method) -> Option<&Next> {
        self.chains.get(&method)
    }

    fn gate(&self) -> Option<&dyn Filter> {
        self.authenticator.as_ref().map(|a| a as &dyn Filter)
    }

    fn recompose(&mut self) {
        let gate = self.gate();
        let chains = self.handlers.iter()
            .map(|(&method, handler)| (method, filter::compose(handler, &self.filters, gate)))
            .collect();
        self.chains = chains;
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("methods", &self.methods())
            .field("filters", &self.filters.len())
            .field("authenticator", &self.authenticator)
            .finish()
    }
}
