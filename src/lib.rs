//! # dirtyroute
//!
//! Controller/action request routing for small services that want
//! `/controller/arg/arg` URLs without a full web framework.
//!
//! A request path is split into a controller name and segments:
//! `/users/42/edit` is controller `users` with segments `["42", "edit"]`.
//! The controller's actions are then tried in registration order; an action
//! matches when its method is the request method and each of its pattern
//! tokens accepts the segment at the same position.
//!
//! | Token    | Accepts                                           |
//! |----------|---------------------------------------------------|
//! | `edit`   | exactly `edit`                                    |
//! | `{i}`    | an integer                                        |
//! | `{s}`    | anything that is not an integer                   |
//! | `{i\|\|s}` | anything                                        |
//! | `{/}`    | no segment at all (`/users`, `/users/`)           |
//!
//! Around the match sit two pluggable policies: an [`AuthGate`] that may
//! refuse a matched action, and an [`ErrorHandler`] that writes the response
//! for every request that could not be dispatched.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use dirtyroute::{Action, Controller, Options, Request, Response, Router, Server};
//! use http::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dirtyroute::Error> {
//!     let users = Controller::new("users")
//!         .action(Action::new("index", Method::GET,  &["{/}"],        index))
//!         .action(Action::new("show",  Method::GET,  &["{i}"],        show))
//!         .action(Action::new("edit",  Method::POST, &["{i}", "edit"], edit).private(true));
//!
//!     let app = Router::new(Options::default()).controller(users);
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//!
//! async fn index(_req: Request) -> &'static str { "all users" }
//!
//! async fn show(req: Request) -> String {
//!     format!("user {}", req.int(0).unwrap_or_default())
//! }
//!
//! async fn edit(req: Request) -> Response {
//!     Response::json(req.body().to_vec())
//! }
//! ```

mod action;
mod auth;
mod controller;
mod error;
mod fallback;
mod handler;
mod options;
mod params;
mod registry;
mod request;
mod response;
mod router;
mod server;
mod token;

pub use action::Action;
pub use auth::{AllowAll, AuthError, AuthGate, AuthToken};
pub use controller::Controller;
pub use error::{DispatchError, Error};
pub use fallback::{ErrorHandler, PlainText};
pub use handler::Handler;
pub use options::{DEFAULT_CONTENT_TYPE, Options};
pub use params::Params;
pub use registry::Registry;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_BODY_LIMIT, Server};
pub use token::{INDEX, PatternToken};
