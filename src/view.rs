use crate::collation::Collation;
use crate::columns::{ColumnConfig, ColumnSet};
use crate::config::TableConfig;
use crate::errors::{TableIssue, TableIssues};
use crate::models::{Paginated, PaginationMeta};
use crate::pagination::{PaginationControls, PaginationHandler};
use crate::sort::{SortKey, SortOrder, SortSpec, sort_rows_by};
use serde::Serialize;
use std::collections::HashSet;

/// A table over one page of records: sorts rows locally and relays page and
/// limit changes to the screen.
///
/// Filtering and paging happen on the server; the only state owned here is
/// the [`SortSpec`]. Every read uses the sort committed at call time, so a page
/// that arrives after several header clicks is shown with the latest sort.
pub struct SortedPaginatedView<T> {
    columns: ColumnSet<T>,
    sort: SortSpec,
    limit_options: Vec<u64>,
    empty_message: String,
    collation: Collation,
}

/// Header cell of one column, ready to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderCell<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub flex: f32,
    pub sortable: bool,
    /// Direction shown next to the label when this column is the sort column
    pub sorted: Option<SortOrder>,
}

/// Everything a renderer needs for one frame of the table.
pub struct TableFrame<'a, T> {
    pub header: Vec<HeaderCell<'a>>,
    pub rows: Vec<&'a T>,
    /// Footer controls; `None` when the page carries no pagination metadata
    pub footer: Option<PaginationControls<'a>>,
    /// Drives the pull-to-refresh indicator
    pub is_loading: bool,
    /// Set when there are no rows to show
    pub empty_message: Option<&'a str>,
}

/// A row paired with the key the renderer identifies it by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyedRow<'a, T> {
    pub key: &'a str,
    pub row: &'a T,
}

impl<T> SortedPaginatedView<T> {
    pub fn new(columns: impl Into<ColumnSet<T>>) -> Self {
        Self::with_config(columns, TableConfig::default())
    }

    /// Build a view and log any schema issues. Issues never prevent rendering,
    /// and an unusable locale falls back to the root collation.
    pub fn with_config(columns: impl Into<ColumnSet<T>>, config: TableConfig) -> Self {
        let collation = config
            .locale
            .as_deref()
            .map_or_else(Collation::root, Collation::for_locale_or_root);
        let view = Self {
            columns: columns.into(),
            sort: SortSpec {
                field: config.default_sort_key,
                order: config.default_sort_order,
            },
            limit_options: config.limit_options,
            empty_message: config.empty_message,
            collation,
        };
        view.validate().log_all();
        view
    }

    /// Replace the initial sort.
    #[must_use]
    pub fn with_default_sort(mut self, key: &str, order: SortOrder) -> Self {
        self.sort = SortSpec::new(Some(key), order);
        self
    }

    #[must_use]
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    #[must_use]
    pub fn limit_options(&self) -> &[u64] {
        &self.limit_options
    }

    #[must_use]
    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    #[must_use]
    pub fn collation(&self) -> &Collation {
        &self.collation
    }

    /// Header activation on `column_key`.
    ///
    /// The current sort column flips direction, another column becomes the
    /// sort column in ascending order. Columns that are unknown or marked
    /// unsortable leave the state untouched.
    pub fn set_sort(&mut self, column_key: &str) {
        match self.columns.find(column_key) {
            Some(column) if column.sortable => {
                self.sort = self.sort.toggled(column_key);
                tracing::debug!(column = column_key, order = %self.sort.order, "sort changed");
            }
            Some(_) => tracing::trace!(column = column_key, "column is not sortable"),
            None => tracing::trace!(column = column_key, "no such column"),
        }
    }

    /// Column schema and current sort as header cells.
    #[must_use]
    pub fn header(&self) -> Vec<HeaderCell<'_>> {
        self.columns
            .iter()
            .map(|column| HeaderCell {
                key: &column.key,
                label: &column.label,
                flex: column.flex,
                sortable: column.sortable,
                sorted: self.sort.is_sorted_by(&column.key).then_some(self.sort.order),
            })
            .collect()
    }

    /// Footer controls for `meta`.
    #[must_use]
    pub fn controls<'a>(&'a self, meta: &'a PaginationMeta) -> PaginationControls<'a> {
        PaginationControls::new(meta, &self.limit_options)
    }

    /// Relay a page change to the screen.
    pub fn on_page_change(&self, page: u64, handler: &mut impl PaginationHandler) {
        handler.on_page_change(page);
    }

    /// Relay a page-size change to the screen.
    pub fn on_limit_change(&self, limit: u64, handler: &mut impl PaginationHandler) {
        handler.on_limit_change(limit);
    }

    /// Schema issues plus a default sort that cannot take effect.
    #[must_use]
    pub fn validate(&self) -> TableIssues {
        let mut issues = self.columns.validate();
        if let Some(key) = &self.sort.field {
            let usable = self
                .columns
                .find(key)
                .is_some_and(|column| column.active_sort_key().is_some());
            if !usable {
                issues.add(TableIssue::UnknownDefaultSort { key: key.clone() });
            }
        }
        issues
    }

    /// The column whose sort key applies right now, if any.
    fn active_sort_key(&self) -> Option<&SortKey<T>> {
        let field = self.sort.field.as_deref()?;
        self.columns.find(field)?.active_sort_key()
    }

    fn sort_column(&self) -> Option<&ColumnConfig<T>> {
        self.sort.field.as_deref().and_then(|field| self.columns.find(field))
    }
}

impl<T: Serialize> SortedPaginatedView<T> {
    /// `rows` in display order.
    ///
    /// Input order is kept when no sort is set, when the sort column is missing
    /// or unsortable, or when it has no sort key. Otherwise rows are stably
    /// sorted by the column's key in the current direction. `rows` is never
    /// modified.
    #[must_use]
    pub fn sorted_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        match self.active_sort_key() {
            Some(key) => sort_rows_by(rows, |row| key.extract(row), self.sort.order, &self.collation),
            None => {
                if let Some(column) = self.sort_column() {
                    tracing::trace!(column = %column.key, "sort column cannot sort, keeping server order");
                }
                rows.iter().collect()
            }
        }
    }

    /// Render state for a server page.
    #[must_use]
    pub fn frame<'a>(&'a self, page: &'a Paginated<T>, is_loading: bool) -> TableFrame<'a, T> {
        let mut frame = self.frame_rows(&page.data, is_loading);
        frame.footer = Some(self.controls(&page.meta));
        frame
    }

    /// Render state for rows without pagination metadata.
    #[must_use]
    pub fn frame_rows<'a>(&'a self, rows: &'a [T], is_loading: bool) -> TableFrame<'a, T> {
        let rows = self.sorted_rows(rows);
        let empty_message = rows.is_empty().then_some(self.empty_message.as_str());
        TableFrame {
            header: self.header(),
            rows,
            footer: None,
            is_loading,
            empty_message,
        }
    }
}

/// Pair rows with their renderer keys. Keys must be unique within one render;
/// duplicates are reported and logged, the rows are still returned.
pub fn keyed_rows<'a, T, F>(rows: &[&'a T], key_extractor: F) -> (Vec<KeyedRow<'a, T>>, TableIssues)
where
    F: Fn(&'a T) -> &'a str,
{
    let mut seen = HashSet::new();
    let mut issues = TableIssues::new();
    let keyed = rows
        .iter()
        .map(|&row| {
            let key = key_extractor(row);
            if !seen.insert(key) {
                issues.add(TableIssue::DuplicateRowKey { key: key.to_owned() });
            }
            KeyedRow { key, row }
        })
        .collect();
    issues.log_all();
    (keyed, issues)
}
