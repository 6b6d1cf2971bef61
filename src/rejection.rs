//! The fixed set of responses the router produces on its own.
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | [`NotFound`](HttpError::NotFound) | 404 | `Endpoint Not Found : {path}` |
//! | [`MethodNotAllowed`](HttpError::MethodNotAllowed) | 405 | `Requested Method : {method} not supported for Endpoint : {path}` |
//! | [`Unauthorized`](HttpError::Unauthorized) | 401 | `Incoming request cannot be authorized` |
//! | [`MalformedCredential`](HttpError::MalformedCredential) | 400 | `Error decoding authorization token` |
//! | [`Forbidden`](HttpError::Forbidden) | 403 | `Invalid Token provided for the request` |

use http::StatusCode;

use crate::method::Method;
use crate::response::{IntoResponse, Response};

/// A dispatch failure, rendered as exactly one response.
///
/// The `Display` output is the response body.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum HttpError {
    #[error("Endpoint Not Found : {path}")]
    NotFound { path: String },

    /// `allowed` feeds the `allow` response header.
    #[error("Requested Method : {method} not supported for Endpoint : {path}")]
    MethodNotAllowed { method: String, path: String, allowed: Vec<Method> },

    #[error("Incoming request cannot be authorized")]
    Unauthorized,

    #[error("Error decoding authorization token")]
    MalformedCredential,

    #[error("Invalid Token provided for the request")]
    Forbidden,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. }         => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized            => StatusCode::UNAUTHORIZED,
            Self::MalformedCredential     => StatusCode::BAD_REQUEST,
            Self::Forbidden               => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut builder = Response::builder().status(self.status());
        if let Self::MethodNotAllowed { allowed, .. } = &self {
            let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
            builder = builder.header("allow", &allow);
        }
        builder.text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_path() {
        let res = HttpError::NotFound { path: "/nope".into() }.into_response();
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), b"Endpoint Not Found : /nope");
    }

    #[test]
    fn method_not_allowed_lists_allowed_methods() {
        let res = HttpError::MethodNotAllowed {
            method: "DELETE".into(),
            path: "/api/foo".into(),
            allowed: vec![Method::Get, Method::Post],
        }
        .into_response();
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("GET, POST"));
        assert_eq!(
            res.body(),
            b"Requested Method : DELETE not supported for Endpoint : /api/foo",
        );
    }

    #[test]
    fn auth_failures_map_to_distinct_statuses() {
        let cases = [
            (HttpError::Unauthorized, StatusCode::UNAUTHORIZED, "Incoming request cannot be authorized"),
            (HttpError::MalformedCredential, StatusCode::BAD_REQUEST, "Error decoding authorization token"),
            (HttpError::Forbidden, StatusCode::FORBIDDEN, "Invalid Token provided for the request"),
        ];
        for (err, status, body) in cases {
            let res = err.into_response();
            assert_eq!(res.status_code(), status);
            assert_eq!(res.body(), body.as_bytes());
        }
    }
}
