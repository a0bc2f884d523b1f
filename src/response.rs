//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;
use tracing::warn;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use dirtyroute::{ContentType, Response};
/// use http::StatusCode;
///
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .bytes(ContentType::Json, br#"{"id":42}"#.to_vec());
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` — `application/json`.
    pub fn json(body: Vec<u8>) -> Self {
        Self::builder().finish(ContentType::Json.as_str(), body)
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Body as UTF-8, if it is.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Converts into the hyper-facing representation. Headers that are not
    /// valid HTTP are dropped with a warning.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        for (name, value) in self.headers {
            match (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str())) {
                (Ok(n), Ok(v)) => { res.headers_mut().append(n, v); }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`]. Defaults to `200 OK`.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(ContentType::Text.as_str(), body.into().into_bytes())
    }

    pub fn bytes(self, content_type: ContentType, body: Vec<u8>) -> Response {
        self.finish(content_type.as_str(), body)
    }

    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`]. Implement it on your own types to
/// return them straight from an action handler.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_puts_content_type_first() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/42")
            .bytes(ContentType::Json, b"{}".to_vec());
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.headers()[0], ("content-type".to_owned(), "application/json".to_owned()));
        assert_eq!(res.headers()[1].0, "location");
    }

    #[test]
    fn test_into_inner_drops_invalid_headers() {
        let res = Response::builder()
            .header("bad header", "x")
            .header("x-ok", "1")
            .text("hi")
            .into_inner();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get("x-ok").is_some());
        assert_eq!(res.headers().len(), 2);
    }

    #[test]
    fn test_status_into_response() {
        let res = StatusCode::NO_CONTENT.into_response();
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert!(res.body().is_empty());
    }
}
