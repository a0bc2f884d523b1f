//! Minimal dirtyroute example: a `users` controller behind a header gate.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users
//!   curl http://localhost:3000/users/42
//!   curl http://localhost:3000/users/alice
//!   curl -X POST http://localhost:3000/users/42/edit \
//!        -H 'content-type: application/json' \
//!        -H 'x-session: demo' \
//!        -d '{"name":"alice"}'
//!   curl http://localhost:3000/nope

use dirtyroute::{Action, AuthError, AuthToken, Controller, Options, Request, Response, Router, Server};
use http::{Method, StatusCode};

#[tokio::main]
async fn main() -> Result<(), dirtyroute::Error> {
    tracing_subscriber::fmt::init();

    let users = Controller::new("users")
        .action(Action::new("index",  Method::GET,  &["{/}"],         index))
        .action(Action::new("show",   Method::GET,  &["{i}"],         show))
        .action(Action::new("lookup", Method::GET,  &["{s}"],         lookup))
        .action(Action::new("edit",   Method::POST, &["{i}", "edit"], edit).private(true));

    let app = Router::new(Options::default())
        .auth_gate(require_session)
        .controller(users);

    Server::bind("0.0.0.0:3000")?.serve(app).await
}

// Private actions need an `x-session` header.
fn require_session(action: &Action, req: &Request) -> Result<AuthToken, AuthError> {
    if action.is_private() && req.header("x-session").is_none() {
        return Err(AuthError::new(AuthToken::deny(401), "login required"));
    }
    Ok(AuthToken::allow())
}

// GET /users
async fn index(_req: Request) -> &'static str {
    "alice, bob"
}

// GET /users/{i}
async fn show(req: Request) -> Response {
    let id = req.int(0).unwrap_or_default();
    Response::json(format!(r#"{{"id":{id},"name":"alice"}}"#).into_bytes())
}

// GET /users/{s}
async fn lookup(req: Request) -> String {
    format!("looking up {}", req.segment(0).unwrap_or_default())
}

// POST /users/{i}/edit
async fn edit(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    Response::builder()
        .status(StatusCode::ACCEPTED)
        .header("location", &format!("/users/{}", req.int(0).unwrap_or_default()))
        .text("updated")
}
