//! Footer controls of a paginated table.
//!
//! The table never fetches. Page and limit changes are relayed to the screen
//! through a [`PaginationHandler`], which refetches with the new query. The
//! controls only decide whether a request is allowed, based on the server's
//! [`PaginationMeta`].

use crate::models::PaginationMeta;

/// A page or page-size change requested from the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Page(u64),
    Limit(u64),
}

/// Receiver of footer requests, usually the screen that owns the query.
pub trait PaginationHandler {
    fn on_page_change(&mut self, page: u64);

    /// Screens without a page-size selector can ignore limit changes.
    fn on_limit_change(&mut self, _limit: u64) {}
}

impl<F: FnMut(PageRequest)> PaginationHandler for F {
    fn on_page_change(&mut self, page: u64) {
        self(PageRequest::Page(page));
    }

    fn on_limit_change(&mut self, limit: u64) {
        self(PageRequest::Limit(limit));
    }
}

/// Footer state for one rendered page.
#[derive(Debug, Clone, Copy)]
pub struct PaginationControls<'a> {
    meta: &'a PaginationMeta,
    limit_options: &'a [u64],
}

impl<'a> PaginationControls<'a> {
    #[must_use]
    pub fn new(meta: &'a PaginationMeta, limit_options: &'a [u64]) -> Self {
        Self { meta, limit_options }
    }

    #[must_use]
    pub fn meta(&self) -> &'a PaginationMeta {
        self.meta
    }

    #[must_use]
    pub fn limit_options(&self) -> &'a [u64] {
        self.limit_options
    }

    /// The server's `hasPrevious`; `page > 0` only guards the subtraction.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.meta.has_previous && self.meta.page > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.meta.has_next
    }

    /// "11-20 of 53" style label, or `None` for an empty page.
    #[must_use]
    pub fn range_label(&self) -> Option<String> {
        self.meta
            .item_range()
            .map(|(first, last)| format!("{first}-{last} of {}", self.meta.total))
    }

    /// Request the previous page. Returns whether a request was sent.
    pub fn previous_page(&self, handler: &mut impl PaginationHandler) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.emit_page(self.meta.page - 1, handler);
        true
    }

    /// Request the next page. Returns whether a request was sent.
    pub fn next_page(&self, handler: &mut impl PaginationHandler) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.emit_page(self.meta.page.saturating_add(1), handler);
        true
    }

    /// Request `page` directly. Ignored for the current page and for pages
    /// outside `1..=total_pages`.
    pub fn go_to_page(&self, page: u64, handler: &mut impl PaginationHandler) -> bool {
        if page == 0 || page > self.meta.total_pages || page == self.meta.page {
            return false;
        }
        self.emit_page(page, handler);
        true
    }

    /// Request a different page size. Ignored when zero or unchanged.
    pub fn change_limit(&self, limit: u64, handler: &mut impl PaginationHandler) -> bool {
        if limit == 0 || limit == self.meta.limit {
            return false;
        }
        tracing::debug!(from = self.meta.limit, to = limit, "page size change requested");
        handler.on_limit_change(limit);
        true
    }

    fn emit_page(&self, page: u64, handler: &mut impl PaginationHandler) {
        tracing::debug!(from = self.meta.page, to = page, "page change requested");
        handler.on_page_change(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LIMIT_OPTIONS;

    fn meta(page: u64, total_pages: u64) -> PaginationMeta {
        PaginationMeta {
            total: total_pages * 10,
            page,
            limit: 10,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }

    #[test]
    fn test_next_page_emits_once() {
        let meta = meta(2, 5);
        let controls = PaginationControls::new(&meta, &DEFAULT_LIMIT_OPTIONS);
        let mut requests = Vec::new();
        assert!(controls.next_page(&mut |r: PageRequest| requests.push(r)));
        assert_eq!(requests, vec![PageRequest::Page(3)]);
    }

    #[test]
    fn test_next_page_blocked_on_last_page() {
        let meta = meta(5, 5);
        let controls = PaginationControls::new(&meta, &DEFAULT_LIMIT_OPTIONS);
        let mut requests = Vec::new();
        assert!(!controls.next_page(&mut |r: PageRequest| requests.push(r)));
        assert!(requests.is_empty());
    }

    #[test]
    fn test_previous_page() {
        let first = meta(1, 5);
        let mut requests = Vec::new();
        assert!(!PaginationControls::new(&first, &[]).previous_page(&mut |r: PageRequest| requests.push(r)));

        let third = meta(3, 5);
        assert!(PaginationControls::new(&third, &[]).previous_page(&mut |r: PageRequest| requests.push(r)));
        assert_eq!(requests, vec![PageRequest::Page(2)]);
    }

    #[test]
    fn test_server_flags_are_trusted() {
        // Server says there is no next page even though page < total_pages
        let meta = PaginationMeta { has_next: false, ..meta(2, 5) };
        let controls = PaginationControls::new(&meta, &[]);
        assert!(!controls.can_go_next());
    }

    #[test]
    fn test_previous_flag_comes_from_server() {
        let mut requests = Vec::new();

        // Server has no previous page even though page > 1
        let blocked = PaginationMeta { has_previous: false, ..meta(3, 5) };
        assert!(!PaginationControls::new(&blocked, &[]).previous_page(&mut |r: PageRequest| requests.push(r)));
        assert!(requests.is_empty());

        // Flag set on a zero page never underflows
        let zero = PaginationMeta { page: 0, has_previous: true, ..meta(1, 5) };
        assert!(!PaginationControls::new(&zero, &[]).can_go_previous());

        let trusted = PaginationMeta { has_previous: true, ..meta(1, 5) };
        assert!(PaginationControls::new(&trusted, &[]).can_go_previous());
    }

    #[test]
    fn test_go_to_page_bounds() {
        let meta = meta(2, 5);
        let controls = PaginationControls::new(&meta, &[]);
        let mut requests = Vec::new();
        assert!(!controls.go_to_page(0, &mut |r: PageRequest| requests.push(r)));
        assert!(!controls.go_to_page(2, &mut |r: PageRequest| requests.push(r)));
        assert!(!controls.go_to_page(6, &mut |r: PageRequest| requests.push(r)));
        assert!(controls.go_to_page(5, &mut |r: PageRequest| requests.push(r)));
        assert_eq!(requests, vec![PageRequest::Page(5)]);
    }

    #[test]
    fn test_change_limit() {
        let meta = meta(1, 5);
        let controls = PaginationControls::new(&meta, &DEFAULT_LIMIT_OPTIONS);
        let mut requests = Vec::new();
        assert!(!controls.change_limit(10, &mut |r: PageRequest| requests.push(r)));
        assert!(!controls.change_limit(0, &mut |r: PageRequest| requests.push(r)));
        assert!(controls.change_limit(20, &mut |r: PageRequest| requests.push(r)));
        assert_eq!(requests, vec![PageRequest::Limit(20)]);
    }

    #[test]
    fn test_handler_without_limit_support() {
        struct PageOnly(Vec<u64>);
        impl PaginationHandler for PageOnly {
            fn on_page_change(&mut self, page: u64) {
                self.0.push(page);
            }
        }

        let meta = meta(1, 3);
        let controls = PaginationControls::new(&meta, &[]);
        let mut handler = PageOnly(Vec::new());
        assert!(controls.change_limit(50, &mut handler));
        assert!(controls.next_page(&mut handler));
        assert_eq!(handler.0, vec![2]);
    }

    #[test]
    fn test_range_label() {
        let meta = PaginationMeta { total: 53, ..meta(2, 6) };
        assert_eq!(PaginationControls::new(&meta, &[]).range_label().as_deref(), Some("11-20 of 53"));
        let empty = PaginationMeta::default();
        assert_eq!(PaginationControls::new(&empty, &[]).range_label(), None);
    }
}
