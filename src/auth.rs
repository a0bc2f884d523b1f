//! Auth gate: the pluggable check between a pattern match and the handler.
//!
//! A gate answers with an [`AuthToken`]. A `status_code` of `0` means
//! "allowed, run the handler". Anything else is a denial with that status,
//! and `handle_error` says whether the router should report it through the
//! error handler or quietly move on to the next matching action.
//!
//! ```rust
//! use dirtyroute::{Action, AuthError, AuthToken, Request, Router};
//!
//! fn require_session(action: &Action, req: &Request) -> Result<AuthToken, AuthError> {
//!     if action.is_private() && req.header("x-session").is_none() {
//!         return Err(AuthError::new(AuthToken::deny(401), "login required"));
//!     }
//!     Ok(AuthToken::allow())
//! }
//!
//! let router = Router::default().auth_gate(require_session);
//! ```

use crate::action::Action;
use crate::request::Request;

/// Verdict of an auth gate for one matched action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuthToken {
    pub status_code: u16,
    pub handle_error: bool,
}

impl AuthToken {
    /// `{ status_code: 0, handle_error: true }`.
    pub const fn allow() -> Self {
        Self { status_code: 0, handle_error: true }
    }

    /// A denial the router reports through the error handler.
    pub const fn deny(status_code: u16) -> Self {
        Self { status_code, handle_error: true }
    }

    /// A denial the router skips past, trying later actions with the same
    /// pattern.
    pub const fn pass(status_code: u16) -> Self {
        Self { status_code, handle_error: false }
    }

    pub const fn is_allowed(&self) -> bool {
        self.status_code == 0
    }
}

/// A gate's refusal, carrying the message the error handler receives.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub token: AuthToken,
    pub message: String,
}

impl AuthError {
    pub fn new(token: AuthToken, message: impl Into<String>) -> Self {
        Self { token, message: message.into() }
    }
}

/// Authorizes a matched action for a request.
///
/// Implemented for any `Fn(&Action, &Request) -> Result<AuthToken, AuthError>`.
pub trait AuthGate: Send + Sync + 'static {
    fn authorize(&self, action: &Action, req: &Request) -> Result<AuthToken, AuthError>;
}

impl<F> AuthGate for F
where
    F: Fn(&Action, &Request) -> Result<AuthToken, AuthError> + Send + Sync + 'static,
{
    fn authorize(&self, action: &Action, req: &Request) -> Result<AuthToken, AuthError> {
        self(action, req)
    }
}

/// The default gate: allows every action, private or not.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AuthGate for AllowAll {
    fn authorize(&self, _action: &Action, _req: &Request) -> Result<AuthToken, AuthError> {
        Ok(AuthToken::allow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    async fn noop(_req: Request) -> &'static str { "" }

    #[test]
    fn test_allow_all_ignores_private() {
        let action = Action::new("secret", Method::GET, &["{/}"], noop).private(true);
        let token = AllowAll.authorize(&action, &Request::get("/vault")).unwrap();
        assert_eq!(token, AuthToken { status_code: 0, handle_error: true });
        assert!(token.is_allowed());
    }

    #[test]
    fn test_closure_gate() {
        let gate = |action: &Action, _req: &Request| {
            if action.is_private() {
                Err(AuthError::new(AuthToken::deny(403), "forbidden"))
            } else {
                Ok(AuthToken::allow())
            }
        };
        let open = Action::new("open", Method::GET, &["{/}"], noop);
        let closed = Action::new("closed", Method::GET, &["{/}"], noop).private(true);
        let req = Request::get("/x");

        assert!(gate.authorize(&open, &req).is_ok());
        let err = gate.authorize(&closed, &req).unwrap_err();
        assert_eq!(err.token.status_code, 403);
        assert_eq!(err.to_string(), "forbidden");
    }

    #[test]
    fn test_token_constructors() {
        assert!(!AuthToken::deny(401).is_allowed());
        assert!(AuthToken::deny(401).handle_error);
        assert!(!AuthToken::pass(401).handle_error);
    }
}
