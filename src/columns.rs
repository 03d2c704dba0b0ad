use crate::errors::{TableIssue, TableIssues};
use crate::sort::{SortKey, SortValue};
use std::collections::HashSet;

/// One displayable, optionally sortable column of a table.
///
/// ```rust
/// use aulasegura_table::ColumnConfig;
/// # #[derive(serde::Serialize)]
/// # struct Subject { name: String, is_active: bool }
///
/// let columns = vec![
///     ColumnConfig::<Subject>::new("name", "Name").flex(1.2).sort_by_field("name"),
///     ColumnConfig::new("isActive", "Status").flex(0.4).sort_by(|s: &Subject| s.is_active),
///     ColumnConfig::new("actions", "Actions").flex(0.27).unsortable(),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct ColumnConfig<T> {
    /// Unique within one table
    pub key: String,
    pub label: String,
    /// Relative width weight, passed through to the renderer
    pub flex: f32,
    pub sortable: bool,
    pub sort_key: Option<SortKey<T>>,
}

impl<T> ColumnConfig<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            flex: 1.0,
            sortable: true,
            sort_key: None,
        }
    }

    #[must_use]
    pub fn flex(mut self, flex: f32) -> Self {
        self.flex = flex;
        self
    }

    /// Sort by a (possibly dotted) field of the serialized record.
    #[must_use]
    pub fn sort_by_field(mut self, path: impl Into<String>) -> Self {
        self.sort_key = Some(SortKey::field(path));
        self
    }

    /// Sort by a value derived from the record.
    #[must_use]
    pub fn sort_by<F, V>(mut self, f: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<SortValue>,
    {
        self.sort_key = Some(SortKey::derive(f));
        self
    }

    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// The sort key, if this column can actually sort.
    ///
    /// `None` when the column is marked unsortable (the key is never consulted)
    /// or when no key was configured.
    #[must_use]
    pub fn active_sort_key(&self) -> Option<&SortKey<T>> {
        if self.sortable { self.sort_key.as_ref() } else { None }
    }
}

/// The ordered column schema of one table.
#[derive(Debug, Clone)]
pub struct ColumnSet<T> {
    columns: Vec<ColumnConfig<T>>,
}

impl<T> ColumnSet<T> {
    #[must_use]
    pub fn new(columns: Vec<ColumnConfig<T>>) -> Self {
        Self { columns }
    }

    /// First column with this key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&ColumnConfig<T>> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnConfig<T>> {
        self.columns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check the schema for mistakes that would otherwise fail silently.
    ///
    /// Columns explicitly marked unsortable are never reported for a missing
    /// sort key.
    #[must_use]
    pub fn validate(&self) -> TableIssues {
        let mut issues = TableIssues::new();
        let mut seen = HashSet::new();

        for column in &self.columns {
            if !seen.insert(column.key.as_str()) {
                issues.add(TableIssue::DuplicateColumnKey { key: column.key.clone() });
            }
            if column.sortable && column.sort_key.is_none() {
                issues.add(TableIssue::MissingSortKey { key: column.key.clone() });
            }
            if !(column.flex.is_finite() && column.flex > 0.0) {
                issues.add(TableIssue::InvalidFlex {
                    key: column.key.clone(),
                    flex: column.flex,
                });
            }
        }

        issues
    }
}

impl<T> From<Vec<ColumnConfig<T>>> for ColumnSet<T> {
    fn from(columns: Vec<ColumnConfig<T>>) -> Self {
        Self::new(columns)
    }
}

impl<'a, T> IntoIterator for &'a ColumnSet<T> {
    type Item = &'a ColumnConfig<T>;
    type IntoIter = std::slice::Iter<'a, ColumnConfig<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
