use crate::collation::Collation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use utoipa::ToSchema;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `Asc` becomes `Desc` and vice versa.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison result for this direction.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a sort order string to `SortOrder`.
///
/// Only `desc` (any case) selects descending; anything else is ascending.
#[must_use]
pub fn parse_order(sort_order: &str) -> SortOrder {
    if sort_order.trim().eq_ignore_ascii_case("desc") {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    }
}

/// The active sort of one table: which column, and in which direction.
///
/// `field: None` means rows are shown in the order the server returned them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: Option<String>,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: Option<&str>, order: SortOrder) -> Self {
        Self {
            field: field.map(str::to_owned),
            order,
        }
    }

    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Next state after the user activates `column_key`.
    ///
    /// The active column flips direction; any other column becomes active in
    /// ascending order.
    #[must_use]
    pub fn toggled(&self, column_key: &str) -> Self {
        if self.field.as_deref() == Some(column_key) {
            Self {
                field: self.field.clone(),
                order: self.order.toggled(),
            }
        } else {
            Self {
                field: Some(column_key.to_owned()),
                order: SortOrder::Asc,
            }
        }
    }

    #[must_use]
    pub fn is_sorted_by(&self, column_key: &str) -> bool {
        self.field.as_deref() == Some(column_key)
    }
}

/// A value a column sorts by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    /// Anything else (null, booleans, objects). Compares equal to everything.
    Unsupported,
}

impl SortValue {
    /// Map a JSON value onto a sort value: strings and numbers sort, the rest
    /// does not.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(Self::Unsupported, Self::Number),
            _ => Self::Unsupported,
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for SortValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for SortValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for SortValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

/// Booleans sort as `1` (true) and `0` (false), so "active" rows come last in
/// ascending order.
impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        Self::Number(if value { 1.0 } else { 0.0 })
    }
}

impl<V: Into<SortValue>> From<Option<V>> for SortValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Unsupported, Into::into)
    }
}

type Derivation<T> = Arc<dyn Fn(&T) -> SortValue + Send + Sync>;

/// How a column obtains the value it sorts by.
pub enum SortKey<T> {
    /// Read a field of the serialized record. Dot-notation (`department.name`)
    /// walks into nested objects; numeric segments index arrays.
    Field(String),
    /// Derive the value from the record.
    Derive(Derivation<T>),
}

impl<T> SortKey<T> {
    pub fn field(path: impl Into<String>) -> Self {
        Self::Field(path.into())
    }

    pub fn derive<F, V>(f: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<SortValue>,
    {
        Self::Derive(Arc::new(move |row: &T| -> SortValue { f(row).into() }))
    }
}

impl<T: Serialize> SortKey<T> {
    /// The sort value of `row`. Any lookup failure yields `Unsupported`.
    pub fn extract(&self, row: &T) -> SortValue {
        match self {
            Self::Derive(derive) => derive(row),
            Self::Field(path) => match serde_json::to_value(row) {
                Ok(value) => lookup_path(&value, path).map_or(SortValue::Unsupported, SortValue::from_json),
                Err(err) => {
                    tracing::trace!(field = %path, error = %err, "record is not serializable, treating as unsortable");
                    SortValue::Unsupported
                }
            },
        }
    }
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(path) => Self::Field(path.clone()),
            Self::Derive(derive) => Self::Derive(Arc::clone(derive)),
        }
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Resolve a dot-notation path against a JSON value.
fn lookup_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// A sort value prepared for repeated comparison.
#[derive(Debug, Clone)]
enum ResolvedKey {
    Text(String),
    Number(f64),
    Unsupported,
}

impl From<SortValue> for ResolvedKey {
    fn from(value: SortValue) -> Self {
        match value {
            SortValue::Text(s) => Self::Text(s),
            SortValue::Number(n) => Self::Number(n),
            SortValue::Unsupported => Self::Unsupported,
        }
    }
}

/// Compare two sort values ascending. Text uses `collation`; mixed kinds
/// compare equal.
#[must_use]
pub fn compare_values(a: &SortValue, b: &SortValue, collation: &Collation) -> Ordering {
    compare_resolved(&a.clone().into(), &b.clone().into(), collation)
}

fn compare_resolved(a: &ResolvedKey, b: &ResolvedKey, collation: &Collation) -> Ordering {
    match (a, b) {
        (ResolvedKey::Text(a), ResolvedKey::Text(b)) => collation.compare(a, b),
        (ResolvedKey::Number(a), ResolvedKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Sort `rows` by the values `key` extracts, keeping equal rows in input order.
///
/// Each row's key is computed once. Missing and unsupported values compare
/// equal to everything, so they do not sink to either end and the rows around
/// them are only ordered within each merged run. The merge sort tolerates comparators that
/// are not a total order (mixed kinds, NaN): it never panics, it only yields
/// an unspecified but deterministic order for such rows.
pub fn sort_rows_by<'a, T, F>(rows: &'a [T], key: F, order: SortOrder, collation: &Collation) -> Vec<&'a T>
where
    F: Fn(&T) -> SortValue,
{
    let keys: Vec<ResolvedKey> = rows.iter().map(|row| key(row).into()).collect();
    let indices = stable_sort_indices(keys.len(), |a, b| {
        order.apply(compare_resolved(&keys[a], &keys[b], collation))
    });
    indices.into_iter().map(|i| &rows[i]).collect()
}

/// Stable permutation of `0..len` ordered by `cmp`.
pub fn stable_sort_indices<F>(len: usize, cmp: F) -> Vec<usize>
where
    F: Fn(usize, usize) -> Ordering,
{
    let mut indices: Vec<usize> = (0..len).collect();
    let mut scratch = Vec::with_capacity(len);
    merge_sort(&mut indices, &mut scratch, &cmp);
    indices
}

fn merge_sort<F>(indices: &mut [usize], scratch: &mut Vec<usize>, cmp: &F)
where
    F: Fn(usize, usize) -> Ordering,
{
    let len = indices.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort(&mut indices[..mid], scratch, cmp);
    merge_sort(&mut indices[mid..], scratch, cmp);

    scratch.clear();
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        // Take from the right run only when strictly smaller
        if cmp(indices[right], indices[left]) == Ordering::Less {
            scratch.push(indices[right]);
            right += 1;
        } else {
            scratch.push(indices[left]);
            left += 1;
        }
    }
    scratch.extend_from_slice(&indices[left..mid]);
    scratch.extend_from_slice(&indices[right..len]);
    indices.copy_from_slice(&scratch[..]);
}
