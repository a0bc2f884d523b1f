//! Actions: one routable endpoint each.

use std::fmt;

use http::Method;

use crate::error::DispatchError;
use crate::handler::{BoxedHandler, Handler};
use crate::token::PatternToken;

/// A method, a pattern and the handler that serves them.
///
/// ```rust
/// use dirtyroute::{Action, Request};
/// use http::Method;
///
/// async fn edit(req: Request) -> String {
///     format!("editing user {}", req.segment(0).unwrap_or_default())
/// }
///
/// // GET /users/{id}/edit
/// let action = Action::new("edit", Method::GET, &["{i}", "edit"], edit);
/// assert!(action.matches(&["42", "edit"], "GET").is_ok());
/// assert!(action.matches(&["alice", "edit"], "GET").is_err());
/// ```
pub struct Action {
    name: String,
    pattern: Vec<PatternToken>,
    method: Method,
    private: bool,
    pub(crate) handler: BoxedHandler,
}

impl Action {
    /// Builds an action. Each pattern element is parsed into a
    /// [`PatternToken`] here, once.
    pub fn new(name: &str, method: Method, pattern: &[&str], handler: impl Handler) -> Self {
        Self {
            name: name.to_owned(),
            pattern: pattern.iter().map(|p| PatternToken::parse(p)).collect(),
            method,
            private: false,
            handler: handler.into_boxed_handler(),
        }
    }

    /// Flags the action for custom auth gates. The default gate ignores it.
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn method(&self) -> &Method { &self.method }
    pub fn pattern(&self) -> &[PatternToken] { &self.pattern }
    pub fn is_private(&self) -> bool { self.private }

    /// All-or-nothing match against a request's segments and method.
    ///
    /// Lengths must be equal, the method must be identical, and every token
    /// must accept the segment at its position.
    pub fn matches<S: AsRef<str>>(&self, segments: &[S], method: &str) -> Result<(), DispatchError> {
        let fits = self.pattern.len() == segments.len()
            && self.method.as_str() == method
            && self.pattern.iter()
                .zip(segments)
                .all(|(token, seg)| token.matches(seg.as_ref()));

        if fits { Ok(()) } else { Err(DispatchError::NoPatternMatch) }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("private", &self.private)
            .finish_non_exhaustive()
    }
}
