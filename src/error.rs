//! Unified error type.

use crate::method::Method;

/// The error type returned by turnstile's fallible operations.
///
/// Request-level failures (404, 405, 401, ...) are never `Error`s: they are
/// rendered straight into a [`Response`](crate::Response) by
/// [`HttpError`](crate::HttpError). This type covers setup mistakes, which
/// must stop the process before it serves traffic, and socket failures in
/// the bundled [`Server`](crate::Server).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// A handler is already bound to this method on this path.
    #[error("route `{method} {path}` is already registered")]
    DuplicateRoute { method: Method, path: String },

    /// An authenticator was built without a validator.
    #[error("authenticator requires a validator")]
    MissingValidator,

    /// The authorization scheme is empty or contains whitespace.
    #[error("invalid authorization scheme `{0}`")]
    InvalidScheme(String),
}
