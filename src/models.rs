use crate::config::DEFAULT_FILTER_PARAM;
use crate::filter::FilterSet;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

/// Pagination metadata of one server page.
///
/// Computed by the server. The client reads it to render navigation controls
/// and never recomputes `total_pages`, `has_next` or `has_previous` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    /// 1-based
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationMeta {
    /// 1-based positions of the first and last item on this page, for labels
    /// like "11-20 of 53". `None` when the page holds no items.
    #[must_use]
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 || self.page == 0 || self.limit == 0 {
            return None;
        }
        let first = (self.page - 1).saturating_mul(self.limit).saturating_add(1);
        if first > self.total {
            return None;
        }
        let last = self.page.saturating_mul(self.limit).min(self.total);
        Some((first, last))
    }
}

/// One page of a list resource as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Outcome of fetching a page. `E` is the data layer's own error and reaches
/// the screen untouched.
pub type ListResult<T, E> = Result<Paginated<T>, E>;

/// The query sent to a list endpoint: page, page size and filter tokens.
///
/// Serializes as `page=2&limit=10&filters=juan%2Crol%3Aadmin`. Zero page or
/// limit values and an empty filter set are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub filters: FilterSet,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page.filter(|&p| p > 0) {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit.filter(|&l| l > 0) {
            serializer.append_pair("limit", &limit.to_string());
        }
        if let Some(filters) = self.filters.serialize() {
            serializer.append_pair(DEFAULT_FILTER_PARAM, &filters);
        }
        serializer.finish()
    }

    /// `path` with the query appended, or `path` alone when there is no query.
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Parse a query string leniently: unknown keys are ignored, values that do
    /// not parse are dropped. A leading `?` is accepted.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "page" => parsed.page = parse_positive(&value),
                "limit" => parsed.limit = parse_positive(&value),
                DEFAULT_FILTER_PARAM => parsed.filters = FilterSet::parse(&value),
                _ => {}
            }
        }
        parsed
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|&v| v > 0)
}

/// Wire form of [`ListQuery`] for backends that extract it from the request.
///
/// # Filtering
/// `filters` is a comma separated list of tokens. Free text matches any
/// searchable column; `key:value` tokens target one field, for example:
/// ```text
/// filters=juan,rol:admin,email:@gmail.com
/// ```
///
/// # Pagination
/// `page` is 1-based, `limit` is the page size:
/// ```text
/// page=2&limit=10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQueryParams {
    /// Page number (1-based).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Number of items per page.
    #[param(example = 10)]
    pub limit: Option<u64>,
    /// Comma separated filter tokens.
    #[param(example = "juan,rol:admin")]
    pub filters: Option<String>,
}

impl From<ListQueryParams> for ListQuery {
    fn from(params: ListQueryParams) -> Self {
        Self {
            page: params.page.filter(|&p| p > 0),
            limit: params.limit.filter(|&l| l > 0),
            filters: params.filters.as_deref().map(FilterSet::parse).unwrap_or_default(),
        }
    }
}

impl From<&ListQuery> for ListQueryParams {
    fn from(query: &ListQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            filters: query.filters.serialize(),
        }
    }
}
