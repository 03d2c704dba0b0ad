//! Navigable locations that filter state can be mirrored into.

use url::{ParseError, Url};

/// The current location of a routed screen, as far as filters care.
///
/// Writes must replace the current history entry rather than push a new one,
/// so adding a filter chip never creates a "back" step.
pub trait Location {
    /// Current value of the query parameter `name`.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Set (`Some`) or remove (`None`) the query parameter `name` in place.
    fn replace_query_param(&mut self, name: &str, value: Option<&str>);
}

impl<L: Location + ?Sized> Location for Box<L> {
    fn query_param(&self, name: &str) -> Option<String> {
        (**self).query_param(name)
    }

    fn replace_query_param(&mut self, name: &str, value: Option<&str>) {
        (**self).replace_query_param(name, value);
    }
}

/// No location at all: filters live in memory only.
///
/// Used for embeddings without routing. Reads find nothing and writes are
/// discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detached;

impl Location for Detached {
    fn query_param(&self, _name: &str) -> Option<String> {
        None
    }

    fn replace_query_param(&mut self, _name: &str, _value: Option<&str>) {}
}

/// A URL with browser-like history.
///
/// `push`/`navigate` append history entries, `back`/`forward` walk them, and
/// [`Location::replace_query_param`] edits the current entry in place.
#[derive(Debug, Clone)]
pub struct UrlLocation {
    current: Url,
    back_stack: Vec<Url>,
    forward_stack: Vec<Url>,
    replace_count: usize,
}

impl UrlLocation {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            current: url,
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            replace_count: 0,
        }
    }

    /// Parse an absolute URL as the initial location.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `url` is not a valid absolute URL.
    pub fn parse(url: &str) -> Result<Self, ParseError> {
        Url::parse(url).map(Self::new)
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.current
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.current.as_str()
    }

    /// Navigate to `url`, appending a history entry.
    pub fn push(&mut self, url: Url) {
        let previous = std::mem::replace(&mut self.current, url);
        self.back_stack.push(previous);
        self.forward_stack.clear();
    }

    /// Navigate to `href`, resolved against the current URL (deep links,
    /// manual edits).
    ///
    /// # Errors
    ///
    /// Returns the parse error if `href` cannot be resolved; the location is
    /// left unchanged.
    pub fn navigate(&mut self, href: &str) -> Result<(), ParseError> {
        let url = self.current.join(href)?;
        self.push(url);
        Ok(())
    }

    /// Step back in history. Returns `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(url) => {
                let current = std::mem::replace(&mut self.current, url);
                self.forward_stack.push(current);
                true
            }
            None => false,
        }
    }

    /// Step forward in history. Returns `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        match self.forward_stack.pop() {
            Some(url) => {
                let current = std::mem::replace(&mut self.current, url);
                self.back_stack.push(current);
                true
            }
            None => false,
        }
    }

    /// Number of history entries, including the current one.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.back_stack.len() + 1 + self.forward_stack.len()
    }

    /// How many in-place query writes this location received.
    #[must_use]
    pub fn replace_count(&self) -> usize {
        self.replace_count
    }
}

impl Location for UrlLocation {
    fn query_param(&self, name: &str) -> Option<String> {
        self.current
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Behaves like `URLSearchParams.set`/`delete`: the first occurrence is
    /// replaced in place, later duplicates are removed, other parameters keep
    /// their order.
    fn replace_query_param(&mut self, name: &str, value: Option<&str>) {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut written = false;
        for (key, existing) in self.current.query_pairs() {
            if key != name {
                pairs.push((key.into_owned(), existing.into_owned()));
            } else if let (Some(value), false) = (value, written) {
                pairs.push((key.into_owned(), value.to_owned()));
                written = true;
            }
        }
        if let (Some(value), false) = (value, written) {
            pairs.push((name.to_owned(), value.to_owned()));
        }

        if pairs.is_empty() {
            self.current.set_query(None);
        } else {
            self.current.query_pairs_mut().clear().extend_pairs(&pairs);
        }
        self.replace_count += 1;
        tracing::trace!(url = %self.current, "replaced location query");
    }
}
