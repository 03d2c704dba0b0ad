//! Locale-aware string ordering for table sorting.
//!
//! Comparison follows the Unicode Collation Algorithm with CLDR locale data,
//! through ICU4X. The root order places letters next to their base letter
//! whether or not they decompose (`"Élodie" < "Zoe"`, `"Øyvind" < "Zoe"`,
//! `"Łukasz" < "Maria"`). A locale tailors it, e.g. Spanish sorts `ñ` as its
//! own letter after `n`.
//!
//! Strings are compared at tertiary strength: base letters first, then
//! accents, then case (lowercase first).

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::Locale;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Locale tag of the root collation.
pub const ROOT_LOCALE: &str = "und";

/// Error building a [`Collation`] for a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollationError {
    /// The tag is not a well-formed BCP 47 locale
    InvalidLocale { tag: String },
    /// No collation data could be loaded for the locale
    Unavailable { tag: String, reason: String },
}

impl fmt::Display for CollationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale { tag } => write!(f, "'{tag}' is not a valid locale"),
            Self::Unavailable { tag, reason } => {
                write!(f, "no collation data for locale '{tag}': {reason}")
            }
        }
    }
}

impl std::error::Error for CollationError {}

/// A string collation for one locale. Cheap to clone.
#[derive(Clone)]
pub struct Collation {
    locale: String,
    // `None` only if even the root data failed to load: code point order
    collator: Option<Arc<CollatorBorrowed<'static>>>,
}

impl Collation {
    /// The CLDR root collation.
    #[must_use]
    pub fn root() -> Self {
        let root = ROOT_LOCALE
            .parse::<Locale>()
            .map_err(|err| err.to_string())
            .and_then(build);
        match root {
            Ok(collator) => Self {
                locale: ROOT_LOCALE.to_owned(),
                collator: Some(Arc::new(collator)),
            },
            Err(err) => {
                tracing::warn!(error = %err, "root collation unavailable, comparing code points");
                Self {
                    locale: ROOT_LOCALE.to_owned(),
                    collator: None,
                }
            }
        }
    }

    /// Collation tailored for a BCP 47 locale tag such as `es` or `de-AT`.
    /// Locales without their own tailoring use the root order.
    ///
    /// # Errors
    /// [`CollationError::InvalidLocale`] for a malformed tag,
    /// [`CollationError::Unavailable`] when no collation data loads.
    pub fn for_locale(tag: &str) -> Result<Self, CollationError> {
        let locale: Locale = tag
            .trim()
            .parse()
            .map_err(|_| CollationError::InvalidLocale { tag: tag.to_owned() })?;
        let collator = build(locale).map_err(|reason| CollationError::Unavailable {
            tag: tag.to_owned(),
            reason,
        })?;
        Ok(Self {
            locale: tag.trim().to_owned(),
            collator: Some(Arc::new(collator)),
        })
    }

    /// [`Collation::for_locale`], falling back to the root order with a
    /// warning when the tag cannot be used.
    #[must_use]
    pub fn for_locale_or_root(tag: &str) -> Self {
        Self::for_locale(tag).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to root collation");
            Self::root()
        })
    }

    /// Tag this collation was built for.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation").field("locale", &self.locale).finish_non_exhaustive()
    }
}

fn build(locale: Locale) -> Result<CollatorBorrowed<'static>, String> {
    Collator::try_new(locale.into(), CollatorOptions::default()).map_err(|err| err.to_string())
}

/// Compare two strings in the root locale-aware order.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    Collation::root().compare(a, b)
}
