//! HTTP method as a typed enum.
//!
//! Only the eight verbs a route can be registered for are represented.
//! Requests carrying any other token (`CONNECT`, WebDAV verbs, garbage) still
//! reach the router; they match no binding and are answered with
//! `405 Method Not Allowed` when the path exists.

use std::fmt;
use std::str::FromStr;

/// A verb a handler can be bound to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// Every registrable method, in declaration order.
    pub const ALL: [Method; 8] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Options,
        Self::Trace,
        Self::Patch,
    ];

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Delete  => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace   => "TRACE",
            Self::Patch   => "PATCH",
        }
    }
}

/// Returned when a method token is not one of the registrable verbs.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unsupported method `{0}`")]
pub struct UnsupportedMethod(pub String);

/// Parses an uppercase method token. Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"     => Ok(Self::Get),
            "HEAD"    => Ok(Self::Head),
            "POST"    => Ok(Self::Post),
            "PUT"     => Ok(Self::Put),
            "DELETE"  => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "TRACE"   => Ok(Self::Trace),
            "PATCH"   => Ok(Self::Patch),
            other     => Err(UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for m in Method::ALL {
            assert_eq!(m.as_str().parse::<Method>(), Ok(m));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!(
            "get".parse::<Method>(),
            Err(UnsupportedMethod("get".to_owned())),
        );
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        assert!("CONNECT".parse::<Method>().is_err());
        assert!("PROPFIND".parse::<Method>().is_err());
        assert!("".parse::<Method>().is_err());
    }
}
