//! # turnstile
//!
//! An embeddable request router: resolve `(method, path)` to a handler, run
//! it through an ordered chain of filters, and optionally gate the whole
//! thing behind a credential check.
//!
//! ## The model
//!
//! - Paths are canonicalized with [`path::normalize`] and matched exactly.
//!   No pattern parameters.
//! - One [`Route`] per path holds a handler per [`Method`], a list of
//!   [`Filter`]s shared by every method and at most one [`Authenticator`].
//! - A request runs `authenticator → filters (registration order) → handler`.
//!   Chains are built at registration time.
//! - Failures the router detects itself are rendered by [`HttpError`]:
//!   `404`, `405`, `401`, `400`, `403`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::convert::Infallible;
//!
//! use turnstile::{Authenticator, Request, Response, Router, Server, filter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut router = Router::new();
//!     router.get("/health", health);
//!     router.get("/api/reports", reports)
//!         .filter(filter::from_fn(|req: Request, next: filter::Next| async move {
//!             let mut res = next.run(req).await;
//!             res.set_header("cache-control", "no-store");
//!             res
//!         }))
//!         .authenticator(Authenticator::basic(check));
//!
//!     Server::bind("0.0.0.0:3000").serve(router).await.unwrap();
//! }
//!
//! async fn health(_req: Request) -> &'static str { "ok" }
//!
//! async fn reports(_req: Request) -> Response {
//!     Response::json(br#"[]"#.to_vec())
//! }
//!
//! fn check(username: &str, password: &str) -> Result<bool, Infallible> {
//!     Ok(username == "admin" && password == "secret")
//! }
//! ```
//!
//! ## Embedding
//!
//! [`Router::dispatch`] is the whole integration surface. Hosts other than
//! the bundled [`Server`] convert their request into a [`Request`] (there is
//! a `From<http::Request<Bytes>>`), await `dispatch`, and write the returned
//! [`Response`] back (see [`Response::into_http`]).

mod error;
mod handler;
mod method;
mod rejection;
mod request;
mod response;
mod route;
mod router;
mod server;

pub mod filter;
pub mod path;

pub use error::Error;
pub use filter::auth::{Authenticator, AuthenticatorBuilder, BoxError, Validator};
pub use filter::{Filter, Next};
pub use handler::Handler;
pub use http::StatusCode;
pub use method::{Method, UnsupportedMethod};
pub use rejection::HttpError;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use route::Route;
pub use router::Router;
pub use server::Server;
