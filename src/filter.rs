use crate::config::FILTER_DELIMITER;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// An immutable, ordered set of filter tokens.
///
/// Tokens are trimmed, non-empty and unique; insertion order is kept because it
/// decides both chip order and the order of the joined query value. A token is
/// opaque here: free text and `key:value` pairs are interpreted by the server.
///
/// Every mutation returns a new snapshot and leaves `self` untouched, so a
/// snapshot handed to a renderer or a query builder never changes under it.
/// Clones share storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FilterSet {
    tokens: Arc<[String]>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw tokens: each is trimmed, empty ones are dropped and
    /// later duplicates of an earlier token are removed.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let tokens: Vec<String> = tokens
            .into_iter()
            .filter_map(|token| {
                let trimmed = token.as_ref().trim();
                (!trimmed.is_empty() && seen.insert(trimmed.to_owned())).then(|| trimmed.to_owned())
            })
            .collect();
        Self { tokens: tokens.into() }
    }

    /// Parse a comma separated query value. Malformed input yields fewer
    /// tokens, never an error.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(raw.split(FILTER_DELIMITER))
    }

    /// Join tokens into a query value, or `None` when the set is empty so the
    /// parameter can be dropped from the URL.
    #[must_use]
    pub fn serialize(&self) -> Option<String> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(self.tokens.join(FILTER_DELIMITER.to_string().as_str()))
        }
    }

    /// Snapshot with `token` appended, or `None` if that would change nothing
    /// (blank after trimming, or already present).
    #[must_use]
    pub fn with_added(&self, token: &str) -> Option<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return None;
        }
        let tokens: Vec<String> = self
            .tokens
            .iter()
            .cloned()
            .chain(std::iter::once(trimmed.to_owned()))
            .collect();
        Some(Self { tokens: tokens.into() })
    }

    /// Snapshot without the token at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn without(&self, index: usize) -> Option<Self> {
        if index >= self.tokens.len() {
            return None;
        }
        let tokens: Vec<String> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, token)| token.clone())
            .collect();
        Some(Self { tokens: tokens.into() })
    }

    /// Empty snapshot, or `None` when already empty.
    #[must_use]
    pub fn cleared(&self) -> Option<Self> {
        if self.is_empty() { None } else { Some(Self::new()) }
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<String>> for FilterSet {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<FilterSet> for Vec<String> {
    fn from(set: FilterSet) -> Self {
        set.tokens.to_vec()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
