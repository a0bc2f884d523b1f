//! Incoming HTTP request type.

use http::Method;

/// An incoming request as seen by the router and its handlers.
///
/// The server builds one per HTTP request. Tests and embedders can build
/// them directly:
///
/// ```rust
/// use dirtyroute::Request;
///
/// let req = Request::new("POST", "/users")
///     .with_header("content-type", "application/json")
///     .with_body(br#"{"name":"alice"}"#.to_vec());
/// assert_eq!(req.method(), "POST");
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
    pub(crate) controller: String,
    pub(crate) segments: Vec<String>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
            controller: String::new(),
            segments: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET.as_str(), path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST.as_str(), path)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The controller name the path resolved to. Empty until routed.
    pub fn controller(&self) -> &str { &self.controller }

    /// The matched path segments, in order. Empty until routed.
    ///
    /// For `/users/42/edit` routed to controller `users` this is
    /// `["42", "edit"]`.
    pub fn segments(&self) -> &[String] { &self.segments }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Parses segment `index` as an integer. Handy behind an `{i}` token.
    pub fn int(&self, index: usize) -> Option<i64> {
        self.segment(index)?.parse().ok()
    }
}
