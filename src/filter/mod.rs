//! Filters: request/response wrapping around a route's handler.
//!
//! A [`Filter`] receives the rest of the chain as a [`Next`] and returns a
//! new [`Next`] that wraps it. A route with filters `[F1, F2, F3]` and
//! terminal handler `H` serves requests through `F1(F2(F3(H)))`:
//!
//! ```text
//!   request ──► F1 ──► F2 ──► F3 ──► H
//!  response ◄── F1 ◄── F2 ◄── F3 ◄──┘
//! ```
//!
//! F1 sees the request first and the response last. A filter that returns
//! without running `next` short-circuits everything inside it.
//!
//! Chains are composed when a route changes during registration, not per
//! request. Dispatch only walks the prebuilt layers.
//!
//! The quickest way to write a filter is [`from_fn`]:
//!
//! ```rust
//! use turnstile::{Request, Router, filter::{self, Next}};
//!
//! async fn handler(_req: Request) -> &'static str { "hello" }
//!
//! let mut router = Router::new();
//! router.get("/hello", handler).filter(filter::from_fn(|req: Request, next: Next| async move {
//!     let mut res = next.run(req).await;
//!     res.set_header("x-served-by", "turnstile");
//!     res
//! }));
//! ```

pub mod auth;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A handler transformer: given the rest of the chain, produce the handler
/// that wraps it.
///
/// Implementations should hold only immutable configuration. `apply` may be
/// called more than once for the same filter, because a route recomposes its
/// chains whenever it gains a method, a filter or an authenticator.
pub trait Filter: Send + Sync + 'static {
    fn apply(&self, next: Next) -> Next;
}

/// The remainder of a filter chain.
///
/// Cloning is one atomic increment.
#[derive(Clone)]
pub struct Next(BoxedHandler);

impl Next {
    /// Wraps any handler so it can serve as (part of) a chain.
    pub fn new(handler: impl Handler) -> Self {
        Self(handler.into_boxed_handler())
    }

    pub(crate) fn from_boxed(handler: BoxedHandler) -> Self {
        Self(handler)
    }

    /// Runs the rest of the chain.
    pub async fn run(&self, req: Request) -> Response {
        self.0.call(req).await
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Next")
    }
}

// ── from_fn ───────────────────────────────────────────────────────────────────

/// Builds a [`Filter`] from an async function of the request and the rest of
/// the chain.
pub fn from_fn<F, Fut, R>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    FromFn { f: Arc::new(f) }
}

/// Filter returned by [`from_fn`].
pub struct FromFn<F> {
    f: Arc<F>,
}

impl<F, Fut, R> Filter for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn apply(&self, next: Next) -> Next {
        let f = Arc::clone(&self.f);
        Next::new(move |req: Request| (*f)(req, next.clone()))
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Folds `filters` right to left around `terminal`, then puts `gate` (if
/// any) outside all of them.
pub(crate) fn compose(
    terminal: &BoxedHandler,
    filters: &[Arc<dyn Filter>],
    gate: Option<&dyn Filter>,
) -> Next {
    let chain = filters.iter()
        .rev()
        .fold(Next::from_boxed(Arc::clone(terminal)), |next, filter| filter.apply(next));
    match gate {
        Some(gate) => gate.apply(chain),
        None => chain,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::StatusCode;

    use super::*;

    /// Prepends `token` to whatever the inner chain produced.
    struct Prefix(&'static str);

    impl Filter for Prefix {
        fn apply(&self, next: Next) -> Next {
            let token = self.0;
            Next::new(move |req: Request| {
                let next = next.clone();
                async move {
                    let mut res = next.run(req).await;
                    let inner = std::mem::take(res.body_mut());
                    res.body_mut().extend_from_slice(token.as_bytes());
                    res.body_mut().extend(inner);
                    res
                }
            })
        }
    }

    fn terminal() -> BoxedHandler {
        (|_req: Request| async { "testHandler" }).into_boxed_handler()
    }

    #[tokio::test]
    async fn first_filter_is_outermost() {
        let filters: Vec<Arc<dyn Filter>> =
            vec![Arc::new(Prefix("v1/")), Arc::new(Prefix("v2/")), Arc::new(Prefix("v3/"))];
        let chain = compose(&terminal(), &filters, None);

        let res = chain.run(Request::new("GET", "/")).await;
        assert_eq!(res.body(), b"v1/v2/v3/testHandler");
    }

    #[tokio::test]
    async fn no_filters_runs_terminal_directly() {
        let chain = compose(&terminal(), &[], None);
        let res = chain.run(Request::new("GET", "/")).await;
        assert_eq!(res.body(), b"testHandler");
    }

    #[tokio::test]
    async fn gate_wraps_every_filter() {
        let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(Prefix("f/"))];
        let gate = Prefix("gate/");
        let chain = compose(&terminal(), &filters, Some(&gate));

        let res = chain.run(Request::new("GET", "/")).await;
        assert_eq!(res.body(), b"gate/f/testHandler");
    }

    #[tokio::test]
    async fn short_circuit_skips_inner_layers() {
        let reached = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&reached);
        let deny = from_fn(move |_req: Request, _next: Next| {
            log.lock().unwrap().push("deny");
            async { StatusCode::FORBIDDEN }
        });
        let log = Arc::clone(&reached);
        let inner = from_fn(move |req: Request, next: Next| {
            log.lock().unwrap().push("inner");
            async move { next.run(req).await }
        });

        let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(deny), Arc::new(inner)];
        let res = compose(&terminal(), &filters, None).run(Request::new("GET", "/")).await;

        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
        assert!(res.body().is_empty());
        assert_eq!(*reached.lock().unwrap(), vec!["deny"]);
    }

    #[tokio::test]
    async fn outbound_order_is_reversed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let tag = |name: &'static str| {
            let seen = Arc::clone(&seen);
            from_fn(move |req: Request, next: Next| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(format!("{name}:in"));
                    let res = next.run(req).await;
                    seen.lock().unwrap().push(format!("{name}:out"));
                    res
                }
            })
        };

        let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(tag("a")), Arc::new(tag("b"))];
        compose(&terminal(), &filters, None).run(Request::new("GET", "/")).await;

        assert_eq!(*seen.lock().unwrap(), vec!["a:in", "b:in", "b:out", "a:out"]);
    }
}
