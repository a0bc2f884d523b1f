//! Error types.

use http::StatusCode;
use thiserror::Error;

/// The error type returned by the crate's fallible infrastructure
/// operations: parsing the bind address, binding the port, accepting.
///
/// Routing failures are not `Error`s. They are [`DispatchError`]s, and the
/// router turns each one into a response through its error handler.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a request could not be dispatched to a handler.
///
/// Every variant is an ordinary negative outcome for one request; none is
/// fatal to the process. The `Display` text is what the error handler
/// receives; the carried detail (content type, controller name) only shows
/// up in logs.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DispatchError {
    /// The request content type is not in the configured allow-list.
    #[error("unsupported content type")]
    UnsupportedContentType(String),

    /// No registered controller carries the requested name.
    #[error("controller not found")]
    ControllerNotFound(String),

    /// An action's pattern or method did not fit the request.
    #[error("pattern did not match")]
    NoPatternMatch,

    /// The controller exists but none of its actions accepted the request.
    #[error("no action matched")]
    NoActionsMatched(String),

    /// An auth gate refused a matched action and asked for the refusal to
    /// be reported.
    #[error("{message}")]
    AuthDenied { status: StatusCode, message: String },
}

impl DispatchError {
    /// The HTTP status this failure is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedContentType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ControllerNotFound(_) | Self::NoPatternMatch | Self::NoActionsMatched(_) => {
                StatusCode::NOT_FOUND
            }
            Self::AuthDenied { status, .. } => *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            DispatchError::UnsupportedContentType("text/xml".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
        assert_eq!(DispatchError::ControllerNotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(DispatchError::NoPatternMatch.status(), StatusCode::NOT_FOUND);
        assert_eq!(DispatchError::NoActionsMatched("x".into()).status(), StatusCode::NOT_FOUND);

        let denied = DispatchError::AuthDenied {
            status: StatusCode::UNAUTHORIZED,
            message: "login required".into(),
        };
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(denied.to_string(), "login required");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DispatchError::ControllerNotFound("users".into()).to_string(),
            "controller not found",
        );
        assert_eq!(DispatchError::NoPatternMatch.to_string(), "pattern did not match");
        assert_eq!(
            DispatchError::UnsupportedContentType("text/xml".into()).to_string(),
            "unsupported content type",
        );
        assert_eq!(DispatchError::NoActionsMatched("users".into()).to_string(), "no action matched");
    }
}
