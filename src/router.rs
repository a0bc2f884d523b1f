//! The dispatcher.
//!
//! Every request goes through the same linear pipeline, with no retries and
//! no backtracking between stages:
//!
//! ```text
//! content-type gate → path parse → controller lookup → action scan → auth gate → handler
//!        │                               │                  │            │
//!        └──────────── 422 ──────────────┴────── 404 ───────┴── gate ────┴──→ error handler
//! ```
//!
//! Exactly one handler runs for a dispatched request. A failed request runs
//! none and is reported once, through the router's [`ErrorHandler`].

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use crate::action::Action;
use crate::auth::{AllowAll, AuthGate};
use crate::controller::Controller;
use crate::error::DispatchError;
use crate::fallback::{ErrorHandler, PlainText};
use crate::options::{DEFAULT_CONTENT_TYPE, Options};
use crate::params::Params;
use crate::registry::Registry;
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and hand it to [`Server::serve`](crate::Server::serve).
/// It is read-only from then on, so concurrent requests share it without
/// locking.
///
/// ```rust
/// use dirtyroute::{Action, Controller, Options, Request, Router};
/// use http::Method;
///
/// async fn index(_req: Request) -> &'static str { "all users" }
/// async fn show(req: Request) -> String { format!("user {}", req.int(0).unwrap_or_default()) }
///
/// let router = Router::new(Options::default()).controller(
///     Controller::new("users")
///         .action(Action::new("index", Method::GET, &["{/}"], index))
///         .action(Action::new("show", Method::GET, &["{i}"], show)),
/// );
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let res = rt.block_on(router.route(Request::get("/users/42")));
/// assert_eq!(res.body_str(), Some("user 42"));
/// ```
pub struct Router {
    registry: Registry,
    options: Options,
    error_handler: Arc<dyn ErrorHandler>,
    auth_gate: Arc<dyn AuthGate>,
}

impl Router {
    /// An empty router using the default error handler ([`PlainText`]) and
    /// auth gate ([`AllowAll`]).
    pub fn new(options: Options) -> Self {
        Self {
            registry: Registry::new(),
            options,
            error_handler: Arc::new(PlainText),
            auth_gate: Arc::new(AllowAll),
        }
    }

    /// Registers a controller. Returns `self` for chaining.
    pub fn controller(mut self, controller: Controller) -> Self {
        self.register_controller(controller);
        self
    }

    pub fn register_controller(&mut self, controller: Controller) {
        self.registry.register(controller);
    }

    /// Replaces the error handler.
    pub fn error_handler(mut self, handler: impl ErrorHandler) -> Self {
        self.error_handler = Arc::new(handler);
        self
    }

    /// Replaces the auth gate.
    pub fn auth_gate(mut self, gate: impl AuthGate) -> Self {
        self.auth_gate = Arc::new(gate);
        self
    }

    pub fn options(&self) -> &Options { &self.options }
    pub fn registry(&self) -> &Registry { &self.registry }

    /// Dispatches one request and produces its response.
    ///
    /// On success the matched action's handler receives the request with
    /// [`Request::controller`] and [`Request::segments`] filled in. On failure
    /// the error handler receives the failure's status and message.
    pub async fn route(&self, mut req: Request) -> Response {
        let outcome = self.prepare(&mut req).and_then(|()| self.resolve(&req));

        match outcome {
            Ok(action) => {
                debug!(
                    controller = %req.controller,
                    action = action.name(),
                    segments = ?req.segments,
                    "dispatching",
                );
                action.handler.call(req).await
            }
            Err(e) => {
                debug!(method = %req.method, path = %req.path, error = ?e, "dispatch failed");
                self.error_handler.handle(&req, e.status(), &e.to_string())
            }
        }
    }

    /// Content-type gate, then path parsing into `req`.
    fn prepare(&self, req: &mut Request) -> Result<(), DispatchError> {
        let content_type = req.header("content-type").unwrap_or(DEFAULT_CONTENT_TYPE);
        if !self.options.accepts(content_type) {
            return Err(DispatchError::UnsupportedContentType(content_type.to_owned()));
        }

        let Params { controller, segments } = Params::parse(&req.path);
        req.controller = controller;
        req.segments = segments;
        Ok(())
    }

    /// Finds the action that serves an already parsed request.
    ///
    /// Actions are tried in registration order. The first one that matches
    /// and that the auth gate allows wins. A gate denial with `handle_error`
    /// set ends the scan with [`DispatchError::AuthDenied`]; without it the
    /// scan moves on to the next action.
    fn resolve(&self, req: &Request) -> Result<&Action, DispatchError> {
        let controller = self.registry.get(&req.controller)?;

        for action in controller.actions() {
            if action.matches(req.segments(), req.method()).is_err() {
                continue;
            }

            match self.auth_gate.authorize(action, req) {
                Ok(token) if token.is_allowed() => return Ok(action),
                Ok(token) if token.handle_error => {
                    return Err(DispatchError::AuthDenied {
                        status: denial_status(token.status_code),
                        message: "access denied".to_owned(),
                    });
                }
                Err(e) if e.token.handle_error => {
                    return Err(DispatchError::AuthDenied {
                        status: denial_status(e.token.status_code),
                        message: e.message,
                    });
                }
                _ => debug!(action = action.name(), "auth gate passed over action"),
            }
        }

        Err(DispatchError::NoActionsMatched(req.controller.clone()))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new(Options::default()) }
}

/// A gate may refuse with `0` (it returned an error) or with a number that
/// is not a status code; both are reported as `403`.
fn denial_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::FORBIDDEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthError, AuthToken};
    use http::Method;

    async fn index(_req: Request) -> &'static str { "index" }

    async fn show(req: Request) -> String {
        format!("show {}", req.segments().join(","))
    }

    fn users() -> Controller {
        Controller::new("users")
            .action(Action::new("index", Method::GET, &["{/}"], index))
            .action(Action::new("show", Method::GET, &["{i}"], show))
    }

    #[tokio::test]
    async fn test_routes_to_matching_action() {
        let router = Router::default().controller(users());

        let res = router.route(Request::get("/users/7")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body_str(), Some("show 7"));

        let res = router.route(Request::get("/users/")).await;
        assert_eq!(res.body_str(), Some("index"));
    }

    #[tokio::test]
    async fn test_unknown_controller_is_404() {
        let router = Router::default().controller(users());
        let res = router.route(Request::get("/posts/1")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body_str(), Some("Error: STATUS 404 : ERROR controller not found"));
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_422() {
        let router = Router::default().controller(users());
        let req = Request::get("/users/7").with_header("content-type", "text/xml");
        let res = router.route(req).await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_no_action_matched_is_404() {
        let router = Router::default().controller(users());
        let res = router.route(Request::get("/users/alice")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            res.body_str(),
            Some("Error: STATUS 404 : ERROR no action matched"),
        );
    }

    #[tokio::test]
    async fn test_controller_without_actions() {
        let router = Router::default().controller(Controller::new("empty"));
        let res = router.route(Request::get("/empty")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_denial_without_error_passes_over() {
        let gate = |action: &Action, _req: &Request| -> Result<AuthToken, AuthError> {
            if action.name() == "index" { Ok(AuthToken::pass(401)) } else { Ok(AuthToken::allow()) }
        };
        let router = Router::default().auth_gate(gate).controller(users());
        let res = router.route(Request::get("/users")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_denial_with_error_is_reported() {
        let gate = |_action: &Action, _req: &Request| -> Result<AuthToken, AuthError> {
            Err(AuthError::new(AuthToken::deny(401), "login required"))
        };
        let router = Router::default().auth_gate(gate).controller(users());
        let res = router.route(Request::get("/users/3")).await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.body_str(), Some("Error: STATUS 401 : ERROR login required"));
    }

    #[test]
    fn test_denial_status_fallback() {
        assert_eq!(denial_status(0), StatusCode::FORBIDDEN);
        assert_eq!(denial_status(7), StatusCode::FORBIDDEN);
        assert_eq!(denial_status(401), StatusCode::UNAUTHORIZED);
    }
}
