//! Router configuration.

/// Content type assumed when a request carries no `content-type` header.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Router options.
///
/// `content_types` is the allow-list checked before any routing happens.
/// Entries are compared case-insensitively against the whole header value.
///
/// ```rust
/// use dirtyroute::Options;
///
/// let options = Options::new()
///     .content_type("text/plain")
///     .content_type("application/json");
/// assert!(options.accepts("Application/JSON"));
/// assert!(!options.accepts("text/html"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub content_types: Vec<String>,
}

impl Options {
    /// Options with an empty allow-list. Every request is rejected until a
    /// content type is added.
    pub fn new() -> Self {
        Self { content_types: Vec::new() }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_types.push(content_type.into());
        self
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|t| t.eq_ignore_ascii_case(content_type))
    }
}

/// Allows `text/plain` (the header-less default) and `application/json`.
impl Default for Options {
    fn default() -> Self {
        Self::new()
            .content_type(DEFAULT_CONTENT_TYPE)
            .content_type("application/json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_case_insensitively() {
        let options = Options::new().content_type("application/json");
        assert!(options.accepts("application/JSON"));
        assert!(options.accepts("APPLICATION/json"));
        assert!(!options.accepts("application/json; charset=utf-8"));
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        assert!(!Options::new().accepts(DEFAULT_CONTENT_TYPE));
    }

    #[test]
    fn test_default_accepts_missing_header_label() {
        assert!(Options::default().accepts("Text/Plain"));
    }
}
