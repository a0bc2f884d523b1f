//! Path parsing: `/controller/seg/seg` into a controller name and segments.

use crate::token::INDEX;

/// What the router extracts from a request path before matching.
///
/// `segments` is never empty: a path that stops at the controller name
/// yields a single [`INDEX`] segment, so index actions are written with a
/// single `{/}` pattern element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Params {
    pub controller: String,
    pub segments: Vec<String>,
}

impl Params {
    /// Splits `path` on `/`.
    ///
    /// The leading empty component is skipped, the next one names the
    /// controller, and the rest become segments. Empty components (from a
    /// trailing or doubled slash) become [`INDEX`], the controller position
    /// included: `/` and `//x` name controller `{/}`.
    pub fn parse(path: &str) -> Self {
        let mut parts = path.split('/')
            .skip(1)
            .map(|p| if p.is_empty() { INDEX } else { p });
        let controller = parts.next().unwrap_or_default().to_owned();
        let mut segments: Vec<String> = parts.map(str::to_owned).collect();

        // `/users/` leaves one empty component; `/users` leaves none.
        if segments.is_empty() {
            segments.push(INDEX.to_owned());
        }

        Self { controller, segments }
    }
}
