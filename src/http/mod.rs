//! HTTP method primitives shared by route declarations and dispatch.
//!
//! This module provides [`Method`] and the compact [`MethodSet`] used to record which
//! methods a compiled route accepts.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod method_set;

pub use method_set::MethodSet;

/// Error returned when a method token is not one of the nine standard HTTP methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method: {token:?}")]
pub struct UnknownMethod {
    pub token: String,
}

/// An HTTP request method.
///
/// Only the standard methods are representable: a route table can never accept an
/// extension method, so tokens outside this set are rejected at parse time rather than
/// carried through dispatch.
///
/// # Examples
///
/// ```
/// use routetree::http::Method;
///
/// let method: Method = "GET".parse().unwrap();
/// assert_eq!(method, Method::Get);
/// assert_eq!(method.as_str(), "GET");
/// assert!(method.is_safe());
/// assert!("BREW".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET — retrieve a representation of the target resource.
    Get,
    /// HEAD — identical to GET but without a response body.
    Head,
    /// POST — perform resource-specific processing on the request payload.
    Post,
    /// PUT — replace the target resource's current representation.
    Put,
    /// PATCH — apply partial modifications to a resource.
    Patch,
    /// DELETE — remove the association between the target resource and its functionality.
    Delete,
    /// CONNECT — establish a tunnel to the server identified by the target resource.
    Connect,
    /// OPTIONS — describe the communication options for the target resource.
    Options,
    /// TRACE — perform a message loop-back test along the path to the target resource.
    Trace,
}

impl Method {
    /// Every method, in the canonical order used when listing a [`MethodSet`].
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
    ];

    /// Returns the method as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Returns `true` if this method is considered "safe" (no side effects per RFC 9110 §9.2.1).
    ///
    /// Safe methods: GET, HEAD, OPTIONS, TRACE.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// Returns `true` if this method is idempotent (RFC 9110 §9.2.2).
    ///
    /// Idempotent methods: GET, HEAD, PUT, DELETE, OPTIONS, TRACE.
    pub fn is_idempotent(&self) -> bool {
        matches!(
            self,
            Self::Get | Self::Head | Self::Put | Self::Delete | Self::Options | Self::Trace
        )
    }

    // Bit position inside a `MethodSet`.
    pub(crate) const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = UnknownMethod;

    /// Parses a method token. Tokens are case-sensitive, as in RFC 9110 §9.1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "CONNECT" => Self::Connect,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            other => {
                return Err(UnknownMethod {
                    token: other.to_owned(),
                });
            }
        })
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard_methods() {
        for method in Method::ALL {
            assert_eq!(method.as_str().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "get".parse::<Method>().unwrap_err();
        assert_eq!(err.token, "get");
    }

    #[test]
    fn parse_rejects_extension_methods() {
        assert!("PROPFIND".parse::<Method>().is_err());
        assert!("".parse::<Method>().is_err());
    }

    #[test]
    fn display_matches_token() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(format!("{}", Method::Options), "OPTIONS");
    }

    #[test]
    fn safety_and_idempotence() {
        assert!(Method::Head.is_safe());
        assert!(!Method::Post.is_safe());
        assert!(Method::Put.is_idempotent());
        assert!(!Method::Patch.is_idempotent());
    }

    #[test]
    fn serializes_as_uppercase_token() {
        assert_eq!(serde_json::to_string(&Method::Patch).unwrap(), "\"PATCH\"");
        let parsed: Method = serde_json::from_str("\"TRACE\"").unwrap();
        assert_eq!(parsed, Method::Trace);
    }
}
