//! Error handler: turns a failed dispatch into a response.

use http::StatusCode;

use crate::request::Request;
use crate::response::Response;

/// Writes the response for a request the router could not dispatch.
///
/// Implemented for any `Fn(&Request, StatusCode, &str) -> Response`, so a
/// closure or plain `fn` can be installed with
/// [`Router::error_handler`](crate::Router::error_handler).
pub trait ErrorHandler: Send + Sync + 'static {
    fn handle(&self, req: &Request, status: StatusCode, message: &str) -> Response;
}

impl<F> ErrorHandler for F
where
    F: Fn(&Request, StatusCode, &str) -> Response + Send + Sync + 'static,
{
    fn handle(&self, req: &Request, status: StatusCode, message: &str) -> Response {
        self(req, status, message)
    }
}

/// The default policy: a plain-text body naming the status and the message,
/// sent with that status.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainText;

impl ErrorHandler for PlainText {
    fn handle(&self, _req: &Request, status: StatusCode, message: &str) -> Response {
        Response::builder()
            .status(status)
            .text(format!("Error: STATUS {} : ERROR {message}", status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_body() {
        let res = PlainText.handle(&Request::get("/nope"), StatusCode::NOT_FOUND, "controller not found");
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body_str(), Some("Error: STATUS 404 : ERROR controller not found"));
    }
}
