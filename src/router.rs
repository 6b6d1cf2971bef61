//! Route registry and dispatcher.
//!
//! Paths are canonicalized with [`normalize`] on the way in and on every
//! lookup, then matched by exact string equality. Each path owns one
//! [`Route`]; each route owns one prebuilt chain per bound method.
//!
//! Registration takes `&mut Router` and dispatch takes `&Router`. Once the
//! router is handed to a server (or shared behind an `Arc` by the host) the
//! registry is frozen: nothing can add or replace routes while requests are
//! in flight.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Error;
use crate::handler::Handler;
use crate::method::Method;
use crate::path::normalize;
use crate::rejection::HttpError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::route::Route;

/// The application router.
///
/// ```rust
/// use turnstile::{Method, Request, Router};
///
/// async fn list(_req: Request) -> &'static str { "[]" }
/// async fn create(_req: Request) -> &'static str { "{}" }
///
/// let mut router = Router::new();
/// router.get("/items", list);
/// router.register(Method::Post, "/items", create).unwrap();
///
/// // same path, same method: refused
/// assert!(router.register(Method::Get, "items/", list).is_ok());
/// assert!(router.register(Method::Get, "/items", list).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Router {
    routes: HashMap<String, Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Binds `handler` to `method` on the normalized `path` and returns the
    /// path's [`Route`] so filters and an authenticator can be attached.
    ///
    /// A (path, method) pair can only be bound once. A second attempt returns
    /// [`Error::DuplicateRoute`] and leaves the existing handler in place.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: impl Handler,
    ) -> Result<&mut Route, Error> {
        let path = normalize(path);
        let route = self.routes
            .entry(path.clone())
            .or_insert_with(|| Route::new(path.clone()));
        if !route.bind(method, handler.into_boxed_handler()) {
            return Err(Error::DuplicateRoute { method, path });
        }
        debug!(%method, %path, "route registered");
        Ok(route)
    }

    pub fn get(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Get, path, handler)
    }

    pub fn head(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Head, path, handler)
    }

    pub fn post(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Post, path, handler)
    }

    pub fn put(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Put, path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Delete, path, handler)
    }

    pub fn options(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Options, path, handler)
    }

    pub fn trace(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Trace, path, handler)
    }

    pub fn patch(&mut self, path: &str, handler: impl Handler) -> &mut Route {
        self.add(Method::Patch, path, handler)
    }

    /// Panicking form of [`register`](Router::register) behind the verb
    /// shortcuts. A duplicate route is a setup bug; abort before serving.
    fn add(&mut self, method: Method, path: &str, handler: impl Handler) -> &mut Route {
        self.register(method, path, handler)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"))
    }

    /// Looks up the route for `path` (normalized first).
    pub fn route(&self, path: &str) -> Option<&Route> {
        self.routes.get(&normalize(path))
    }

    /// Mutable lookup, for attaching filters to a path registered elsewhere.
    pub fn route_mut(&mut self, path: &str) -> Option<&mut Route> {
        self.routes.get_mut(&normalize(path))
    }

    /// Routes one request and produces exactly one response.
    ///
    /// - unknown path → `404`
    /// - known path, method not bound → `405` with an `allow` header
    /// - otherwise the route's chain: authenticator, filters, handler
    pub async fn dispatch(&self, req: Request) -> Response {
        let key = normalize(req.path());

        let Some(route) = self.routes.get(&key) else {
            debug!(method = req.method(), path = req.path(), "no route");
            return HttpError::NotFound { path: req.path().to_owned() }.into_response();
        };

        let chain = req.method().parse::<Method>().ok().and_then(|m| route.chain(m));
        match chain {
            Some(chain) => chain.run(req).await,
            None => {
                debug!(method = req.method(), path = req.path(), "method not allowed");
                HttpError::MethodNotAllowed {
                    method: req.method().to_owned(),
                    path: req.path().to_owned(),
                    allowed: route.methods(),
                }
                .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    async fn first(_req: Request) -> &'static str { "first" }
    async fn second(_req: Request) -> &'static str { "second" }

    #[test]
    fn register_normalizes_the_path() {
        let mut router = Router::new();
        let route = router.register(Method::Get, "api//foo/./bar", first).unwrap();
        assert_eq!(route.path(), "/api/foo/bar");
        assert!(router.route("/api/foo/bar").is_some());
        assert!(router.route("/api/foo/baz/../bar").is_some());
    }

    #[test]
    fn trailing_slash_is_a_different_route() {
        let mut router = Router::new();
        router.get("/a", first);
        router.get("/a/", second);
        assert_eq!(router.route("/a").unwrap().methods(), vec![Method::Get]);
        assert_eq!(router.route("/a/").unwrap().methods(), vec![Method::Get]);
    }

    #[test]
    fn methods_share_one_route() {
        let mut router = Router::new();
        router.get("/a", first);
        router.post("/a", second);
        router.patch("a", second);
        assert_eq!(
            router.route("/a").unwrap().methods(),
            vec![Method::Get, Method::Post, Method::Patch],
        );
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_and_original_kept() {
        let mut router = Router::new();
        router.get("/a", first);

        let err = router.register(Method::Get, "//a", second).unwrap_err();
        assert!(matches!(err, Error::DuplicateRoute { method: Method::Get, ref path } if path == "/a"));

        let res = router.dispatch(Request::new("GET", "/a")).await;
        assert_eq!(res.body(), b"first");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn verb_shortcut_panics_on_duplicate() {
        let mut router = Router::new();
        router.delete("/a", first);
        router.delete("/a", second);
    }

    #[test]
    fn route_mut_allows_late_attachment() {
        let mut router = Router::new();
        router.get("/a", first);
        router.route_mut("a").unwrap().filter(crate::filter::from_fn(
            |req: Request, next: crate::filter::Next| async move { next.run(req).await },
        ));
        assert_eq!(router.route("/a").unwrap().filter_count(), 1);
        assert!(router.route_mut("/b").is_none());
    }

    #[tokio::test]
    async fn unsupported_verb_on_known_path_is_405() {
        let mut router = Router::new();
        router.get("/a", first);

        let res = router.dispatch(Request::new("PROPFIND", "/a")).await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("GET"));
    }

    #[tokio::test]
    async fn unknown_path_is_404_even_for_odd_verbs() {
        let router = Router::new();
        let res = router.dispatch(Request::new("BREW", "/pot")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), b"Endpoint Not Found : /pot");
    }
}
