//! # URL-synchronized filter state
//!
//! [`FilterState`] owns the active filter tokens of a screen and mirrors them
//! into the `filters` query parameter of a [`Location`], in both directions:
//!
//! - **User changes** (`add_filter`, `remove_filter`, `clear_filters`) are
//!   written to the location with an in-place replace.
//! - **Navigation** (back/forward, deep links, manual URL edits) is read back
//!   through [`FilterState::ingest_location`] and adopted when it differs.
//!
//! Adopting a value that came from the location must not write it back, or the
//! write would be observed as yet another navigation. The state machine below
//! carries that one bit of context from the adoption to the change handler:
//!
//! | phase                | committed change | location write | next phase |
//! |----------------------|------------------|----------------|------------|
//! | `Idle`               | from user        | yes            | `Idle`     |
//! | `Idle`               | from location    | no             | `Idle`     |
//! | `ExternallyAdopting` | any              | no             | `Idle`     |
//!
//! Adoption enters `ExternallyAdopting`; the change handler consumes it
//! exactly once. Mutations that change nothing are not committed at all.
//!
//! ```rust
//! use aulasegura_table::{FilterState, Location, UrlLocation};
//!
//! let location = UrlLocation::parse("https://admin.example/users?filters=juan").unwrap();
//! let mut state = FilterState::new(location);
//! assert_eq!(state.filters().as_slice(), ["juan"]);
//!
//! state.add_filter("rol:admin");
//! assert_eq!(
//!     state.location().query_param("filters").as_deref(),
//!     Some("juan,rol:admin")
//! );
//! ```

use crate::config::FilterConfig;
use crate::filter::FilterSet;
use crate::location::{Detached, Location};
use crate::models::ListQuery;

/// Where the pending change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    /// The last committed change was adopted from the location and must not
    /// be written back.
    ExternallyAdopting,
}

impl SyncPhase {
    /// Consume the phase for one committed change: returns the next phase and
    /// whether the change must be written to the location.
    #[must_use]
    pub fn on_change(self) -> (Self, bool) {
        match self {
            Self::Idle => (Self::Idle, true),
            Self::ExternallyAdopting => (Self::Idle, false),
        }
    }
}

/// Active filter tokens of one screen, kept in sync with a [`Location`].
#[derive(Debug, Clone)]
pub struct FilterState<L> {
    filters: FilterSet,
    location: L,
    phase: SyncPhase,
    config: FilterConfig,
}

impl FilterState<Detached> {
    /// In-memory filters with no location behind them.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Detached)
    }
}

impl<L: Location> FilterState<L> {
    /// Mount on `location`, adopting whatever filters it already carries.
    pub fn new(location: L) -> Self {
        Self::with_config(location, FilterConfig::default())
    }

    pub fn with_config(location: L, config: FilterConfig) -> Self {
        let mut state = Self {
            filters: FilterSet::new(),
            location,
            phase: SyncPhase::Idle,
            config,
        };
        state.ingest_location();
        state
    }

    /// Current snapshot. Cheap to clone and never mutated afterwards, so chip
    /// lists and query builders can hold it for a whole render.
    #[must_use]
    pub fn filters(&self) -> FilterSet {
        self.filters.clone()
    }

    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    #[must_use]
    pub fn location(&self) -> &L {
        &self.location
    }

    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Append a trimmed token. Blank and duplicate tokens are ignored.
    ///
    /// Tokens must not contain a comma: the query value is comma joined and a
    /// comma inside a token would split it on the next read.
    pub fn add_filter(&mut self, token: &str) {
        if let Some(next) = self.filters.with_added(token) {
            self.commit(next);
        }
    }

    /// Remove the token at `index`. Out of range indices are ignored: the list
    /// may have changed between render and click.
    pub fn remove_filter(&mut self, index: usize) {
        match self.filters.without(index) {
            Some(next) => self.commit(next),
            None => tracing::trace!(index, len = self.filters.len(), "ignoring out of range filter removal"),
        }
    }

    pub fn clear_filters(&mut self) {
        if let Some(next) = self.filters.cleared() {
            self.commit(next);
        }
    }

    /// Read the location and adopt its filters if they differ by value.
    ///
    /// Call on mount (done by the constructors) and on every navigation
    /// notification.
    pub fn ingest_location(&mut self) {
        let parsed = self
            .location
            .query_param(&self.config.param)
            .map(|raw| FilterSet::parse(&raw))
            .unwrap_or_default();

        if parsed == self.filters {
            return;
        }
        tracing::debug!(filters = ?parsed.as_slice(), "adopting filters from location");
        self.phase = SyncPhase::ExternallyAdopting;
        self.filters = parsed;
        self.on_filters_changed();
    }

    /// Apply a navigation to the location, then ingest the result.
    pub fn navigate<R>(&mut self, navigation: impl FnOnce(&mut L) -> R) -> R {
        let result = navigation(&mut self.location);
        self.ingest_location();
        result
    }

    /// Fold the current filters into a list query for the data layer.
    #[must_use]
    pub fn list_query(&self, page: Option<u64>, limit: Option<u64>) -> ListQuery {
        ListQuery {
            page,
            limit,
            filters: self.filters(),
        }
    }

    /// Release the location, e.g. when the screen unmounts.
    pub fn into_location(self) -> L {
        self.location
    }

    fn commit(&mut self, next: FilterSet) {
        tracing::debug!(filters = ?next.as_slice(), "filters changed");
        self.filters = next;
        self.on_filters_changed();
    }

    fn on_filters_changed(&mut self) {
        let (next_phase, write) = self.phase.on_change();
        self.phase = next_phase;
        if !write {
            tracing::trace!("change came from the location, not writing it back");
            return;
        }
        let value = self.filters.serialize();
        self.location.replace_query_param(&self.config.param, value.as_deref());
    }
}
