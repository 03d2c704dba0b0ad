//! Per-table and per-screen settings.
//!
//! Both structs deserialize from camelCase JSON with every field optional, so a
//! screen can ship a partial config and inherit the rest from `Default`.

use crate::sort::SortOrder;
use serde::{Deserialize, Serialize};

/// Query parameter carrying the filter tokens.
pub const DEFAULT_FILTER_PARAM: &str = "filters";

/// Separator between filter tokens in the query string. Tokens must not
/// contain it.
pub const FILTER_DELIMITER: char = ',';

/// Page sizes offered by the footer when a table does not set its own.
pub const DEFAULT_LIMIT_OPTIONS: [u64; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Column sorted on first render; `None` keeps server order
    pub default_sort_key: Option<String>,
    pub default_sort_order: SortOrder,
    pub limit_options: Vec<u64>,
    /// Shown instead of rows when the page is empty
    pub empty_message: String,
    /// BCP 47 tag for text collation (`es`, `de-AT`); `None` uses the root order
    pub locale: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_sort_key: None,
            default_sort_order: SortOrder::Asc,
            limit_options: DEFAULT_LIMIT_OPTIONS.to_vec(),
            empty_message: "No data available".to_owned(),
            locale: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    pub param: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            param: DEFAULT_FILTER_PARAM.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table_config_inherits_defaults() {
        let config: TableConfig =
            serde_json::from_str(r#"{"defaultSortKey": "name", "defaultSortOrder": "desc"}"#).unwrap();
        assert_eq!(config.default_sort_key.as_deref(), Some("name"));
        assert_eq!(config.default_sort_order, SortOrder::Desc);
        assert_eq!(config.limit_options, vec![5, 10, 20, 50]);
        assert_eq!(config.empty_message, "No data available");
        assert_eq!(config.locale, None);
    }

    #[test]
    fn test_table_config_locale() {
        let config: TableConfig = serde_json::from_str(r#"{"locale": "es"}"#).unwrap();
        assert_eq!(config.locale.as_deref(), Some("es"));
    }

    #[test]
    fn test_filter_config_default_param() {
        let config: FilterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.param, "filters");
    }
}
