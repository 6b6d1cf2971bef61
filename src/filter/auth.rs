//! Credential gate.
//!
//! An [`Authenticator`] sits outside every other filter on its route. For
//! each request it:
//!
//! 1. reads `authorization`; missing or empty → `401`
//! 2. strips the scheme (case-insensitive, `Basic` by default) followed by a
//!    space; anything else → `401`
//! 3. base64-decodes the token; undecodable or not UTF-8 → `400`
//! 4. splits the payload at the first `:` (no `:` → `400`) and asks the
//!    [`Validator`]
//! 5. `Ok(true)` → the request continues; `Ok(false)` or `Err(_)` → `403`
//!
//! Checking whether a username/password pair is actually valid is left to
//! the application's [`Validator`].

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::error::Error;
use crate::filter::{Filter, Next};
use crate::rejection::HttpError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Boxed error a [`Validator`] may report.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Decides whether a decoded credential pair is authorized.
///
/// Implemented for every `Fn(&str, &str) -> Result<bool, E>`:
///
/// ```rust
/// use std::convert::Infallible;
///
/// fn check(username: &str, password: &str) -> Result<bool, Infallible> {
///     Ok(username == "admin" && password == "hunter2")
/// }
///
/// let gate = turnstile::Authenticator::basic(check);
/// ```
///
/// Runs synchronously on the task dispatching the request. An `Err` is
/// logged and answered like `Ok(false)`.
pub trait Validator: Send + Sync + 'static {
    fn validate(&self, username: &str, password: &str) -> Result<bool, BoxError>;
}

impl<F, E> Validator for F
where
    F: Fn(&str, &str) -> Result<bool, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn validate(&self, username: &str, password: &str) -> Result<bool, BoxError> {
        (self)(username, password).map_err(Into::into)
    }
}

// ── Authenticator ─────────────────────────────────────────────────────────────

/// The outermost gate of a route. Attach with
/// [`Route::authenticator`](crate::Route::authenticator).
#[derive(Clone)]
pub struct Authenticator {
    scheme: Arc<str>,
    realm: Option<Arc<str>>,
    validator: Arc<dyn Validator>,
}

impl Authenticator {
    pub const DEFAULT_SCHEME: &'static str = "Basic";

    /// `Basic` scheme, no realm.
    pub fn basic(validator: impl Validator) -> Self {
        Self {
            scheme: Arc::from(Self::DEFAULT_SCHEME),
            realm: None,
            validator: Arc::new(validator),
        }
    }

    pub fn builder() -> AuthenticatorBuilder {
        AuthenticatorBuilder {
            scheme: Self::DEFAULT_SCHEME.to_owned(),
            realm: None,
            validator: None,
        }
    }

    pub fn scheme(&self) -> &str { &self.scheme }
    pub fn realm(&self) -> Option<&str> { self.realm.as_deref() }

    /// Runs the credential check against `req` without touching any chain.
    pub fn verify(&self, req: &Request) -> Result<(), HttpError> {
        let header = req.header(http::header::AUTHORIZATION.as_str())
            .filter(|v| !v.is_empty())
            .ok_or(HttpError::Unauthorized)?;
        let token = strip_scheme(header, &self.scheme).ok_or(HttpError::Unauthorized)?;

        let decoded = STANDARD.decode(token).map_err(|_| HttpError::MalformedCredential)?;
        let decoded = String::from_utf8(decoded).map_err(|_| HttpError::MalformedCredential)?;
        let (username, password) = decoded.split_once(':').ok_or(HttpError::MalformedCredential)?;

        match self.validator.validate(username, password) {
            Ok(true) => Ok(()),
            Ok(false) => Err(HttpError::Forbidden),
            Err(e) => {
                warn!(error = %e, "credential validator failed");
                Err(HttpError::Forbidden)
            }
        }
    }

    fn reject(&self, req: &Request, err: HttpError) -> Response {
        match err {
            HttpError::Unauthorized => debug!(path = req.path(), "{err}"),
            _ => warn!(path = req.path(), status = %err.status(), "{err}"),
        }
        let challenge = matches!(err, HttpError::Unauthorized)
            .then(|| self.realm.as_deref())
            .flatten()
            .map(|realm| format!("{} realm=\"{realm}\"", self.scheme));

        let mut res = err.into_response();
        if let Some(challenge) = challenge {
            res.set_header("www-authenticate", challenge);
        }
        res
    }
}

impl Filter for Authenticator {
    fn apply(&self, next: Next) -> Next {
        let gate = self.clone();
        Next::new(move |req: Request| {
            let verdict = gate.verify(&req).map_err(|e| gate.reject(&req, e));
            let next = next.clone();
            async move {
                match verdict {
                    Ok(()) => next.run(req).await,
                    Err(rejection) => rejection,
                }
            }
        })
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("scheme", &self.scheme)
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}

/// Returns the token after `scheme ` when `header` starts with it.
fn strip_scheme<'a>(header: &'a str, scheme: &str) -> Option<&'a str> {
    let prefix = header.get(..scheme.len())?;
    if !prefix.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let token = header[scheme.len()..].strip_prefix(' ')?.trim();
    (!token.is_empty()).then_some(token)
}

// ── AuthenticatorBuilder ──────────────────────────────────────────────────────

/// Builder for an [`Authenticator`] with a custom scheme or a realm.
///
/// [`build`](AuthenticatorBuilder::build) fails if no validator was given.
pub struct AuthenticatorBuilder {
    scheme: String,
    realm: Option<String>,
    validator: Option<Arc<dyn Validator>>,
}

impl AuthenticatorBuilder {
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Realm advertised in the `www-authenticate` challenge on `401`.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn validator(mut self, validator: impl Validator) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn build(self) -> Result<Authenticator, Error> {
        if self.scheme.is_empty() || self.scheme.chars().any(char::is_whitespace) {
            return Err(Error::InvalidScheme(self.scheme));
        }
        let validator = self.validator.ok_or(Error::MissingValidator)?;
        Ok(Authenticator {
            scheme: Arc::from(self.scheme),
            realm: self.realm.map(Arc::from),
            validator,
        })
    }
}
