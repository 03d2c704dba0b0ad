//! # aulasegura-table
//!
//! List screens of the AulaSegura admin client (users, courses, departments,
//! subjects, credentials, spaces, permissions) share one table core. This
//! crate is that core, independent of any UI toolkit:
//!
//! - **[`SortedPaginatedView`]**: sorts one server page by a column schema
//!   (locale-aware, stable, fail-soft) and relays page/limit changes.
//! - **[`FilterState`]**: the active filter tokens, mirrored loop-free into
//!   the `filters` query parameter of a [`Location`].
//! - **[`ListQuery`]**: the `page`/`limit`/`filters` query a list endpoint
//!   receives, and [`Paginated`]/[`PaginationMeta`], the page it returns.
//!
//! ## Example
//!
//! ```rust
//! use aulasegura_table::{ColumnConfig, FilterState, Paginated, SortedPaginatedView, UrlLocation};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! let location = UrlLocation::parse("https://admin.example/users?filters=rol:admin").unwrap();
//! let mut filters = FilterState::new(location);
//! filters.add_filter("juan");
//!
//! // What the data layer fetches
//! let query = filters.list_query(Some(1), Some(10));
//! assert_eq!(
//!     query.resource_url("/users"),
//!     "/users?page=1&limit=10&filters=rol%3Aadmin%2Cjuan"
//! );
//!
//! // What it gets back
//! let page: Paginated<User> = serde_json::from_str(r#"{
//!     "data": [
//!         {"name": "Bob", "email": "bob@example.com"},
//!         {"name": "alice", "email": "alice@example.com"}
//!     ],
//!     "meta": {"total": 2, "page": 1, "limit": 10, "totalPages": 1,
//!              "hasPrevious": false, "hasNext": false}
//! }"#).unwrap();
//!
//! let mut table = SortedPaginatedView::new(vec![
//!     ColumnConfig::new("name", "Name").sort_by_field("name"),
//!     ColumnConfig::new("email", "Email").sort_by(|u: &User| u.email.clone()),
//!     ColumnConfig::new("actions", "Actions").flex(0.3).unsortable(),
//! ]);
//! table.set_sort("name");
//!
//! let frame = table.frame(&page, false);
//! let names: Vec<&str> = frame.rows.iter().map(|u| u.name.as_str()).collect();
//! assert_eq!(names, ["alice", "Bob"]);
//! ```
//!
//! ## Logging
//!
//! State transitions are traced with the `tracing` crate (`debug` for sort
//! and filter changes, `trace` for location writes, `warn` for schema issues).
//! Nothing is printed unless the application installs a subscriber.

pub mod collation;
pub mod columns;
pub mod config;
pub mod errors;
pub mod filter;
pub mod location;
pub mod models;
pub mod pagination;
pub mod sort;
pub mod sync;
pub mod view;

pub use collation::{Collation, CollationError, locale_compare};
pub use columns::{ColumnConfig, ColumnSet};
pub use config::{FilterConfig, TableConfig};
pub use errors::{TableIssue, TableIssues};
pub use filter::FilterSet;
pub use location::{Detached, Location, UrlLocation};
pub use models::{ListQuery, ListQueryParams, ListResult, Paginated, PaginationMeta};
pub use pagination::{PageRequest, PaginationControls, PaginationHandler};
pub use sort::{SortKey, SortOrder, SortSpec, SortValue};
pub use sync::{FilterState, SyncPhase};
pub use view::{HeaderCell, KeyedRow, SortedPaginatedView, TableFrame, keyed_rows};
