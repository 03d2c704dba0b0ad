//! # Table diagnostics
//!
//! Nothing in this crate fails because of a bad column schema or a bad URL:
//! sorting degrades to server order, bad query values are dropped. The issues
//! that were tolerated are reported here so a screen can surface them during
//! development.
//!
//! Upstream fetch errors are not modelled here. Whatever the data-fetching
//! layer returns is handed to the screen unchanged, see
//! [`ListResult`](crate::models::ListResult).

use serde::Serialize;
use std::fmt;

/// A tolerated problem in a table's configuration or data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableIssue {
    /// Two columns share the same key; only the first is used for sorting
    DuplicateColumnKey { key: String },
    /// Column claims to be sortable but has no sort key, clicking it does nothing
    MissingSortKey { key: String },
    /// Column width weight is zero, negative or not a number
    InvalidFlex { key: String, flex: f32 },
    /// Default sort refers to a column that does not exist or cannot sort
    UnknownDefaultSort { key: String },
    /// Two rows produced the same row key
    DuplicateRowKey { key: String },
}

impl TableIssue {
    /// Log this issue through `tracing`.
    pub fn log(&self) {
        tracing::warn!(issue = %self, "table configuration issue");
    }
}

impl fmt::Display for TableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateColumnKey { key } => write!(f, "column key '{key}' is used more than once"),
            Self::MissingSortKey { key } => {
                write!(f, "column '{key}' is sortable but has no sort key")
            }
            Self::InvalidFlex { key, flex } => {
                write!(f, "column '{key}' has invalid flex {flex}")
            }
            Self::UnknownDefaultSort { key } => {
                write!(f, "default sort column '{key}' does not exist or is not sortable")
            }
            Self::DuplicateRowKey { key } => write!(f, "row key '{key}' is not unique"),
        }
    }
}

impl std::error::Error for TableIssue {}

/// Collection of table issues
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableIssues {
    issues: Vec<TableIssue>,
}

impl TableIssues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: TableIssue) {
        self.issues.push(issue);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn issues(&self) -> &[TableIssue] {
        &self.issues
    }

    /// Log every issue at `warn` level.
    pub fn log_all(&self) {
        for issue in &self.issues {
            issue.log();
        }
    }

    /// Convert to Result, for screens that want to treat issues as fatal in
    /// debug builds.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for TableIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table has {} issue(s):", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TableIssues {}

impl IntoIterator for TableIssues {
    type Item = TableIssue;
    type IntoIter = std::vec::IntoIter<TableIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
