// Property tests for sorting and filter state.

use aulasegura_table::{ColumnConfig, FilterSet, FilterState, SortOrder, SortedPaginatedView, UrlLocation};
use proptest::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Row {
    id: usize,
    group: u8,
    label: String,
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u8..4, "[a-zA-Záéí]{0,6}"), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(id, (group, label))| Row { id, group, label })
            .collect()
    })
}

fn view() -> SortedPaginatedView<Row> {
    SortedPaginatedView::new(vec![
        ColumnConfig::new("group", "Group").sort_by(|r: &Row| u32::from(r.group)),
        ColumnConfig::new("label", "Label").sort_by_field("label"),
        ColumnConfig::new("mixed", "Mixed").sort_by(|r: &Row| {
            // Alternates kinds on purpose: not a total order
            if r.id % 2 == 0 {
                aulasegura_table::SortValue::from(r.label.clone())
            } else {
                aulasegura_table::SortValue::from(u32::from(r.group))
            }
        }),
        ColumnConfig::new("actions", "Actions").unsortable(),
    ])
}

proptest! {
    /// Rows with equal keys keep their relative input order, ascending and descending
    #[test]
    fn prop_sort_is_stable(rows in rows_strategy(), descending in any::<bool>()) {
        let mut view = view();
        view.set_sort("group");
        if descending {
            view.set_sort("group");
        }
        let sorted = view.sorted_rows(&rows);

        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match view.sort().order {
                SortOrder::Asc => prop_assert!(a.group <= b.group),
                SortOrder::Desc => prop_assert!(a.group >= b.group),
            }
            if a.group == b.group {
                prop_assert!(a.id < b.id, "tie broken out of input order");
            }
        }
    }

    /// Sorting permutes rows; nothing is lost or duplicated
    #[test]
    fn prop_sort_is_a_permutation(rows in rows_strategy()) {
        let mut view = view();
        view.set_sort("label");
        let mut ids: Vec<usize> = view.sorted_rows(&rows).iter().map(|r| r.id).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..rows.len()).collect::<Vec<_>>());
    }

    /// Inconsistent comparators never panic and still yield every row
    #[test]
    fn prop_mixed_kinds_never_panic(rows in rows_strategy()) {
        let mut view = view();
        view.set_sort("mixed");
        prop_assert_eq!(view.sorted_rows(&rows).len(), rows.len());
        view.set_sort("mixed");
        prop_assert_eq!(view.sorted_rows(&rows).len(), rows.len());
    }

    /// Toggling an unsortable column never changes the sort
    #[test]
    fn prop_unsortable_is_noop(clicks in prop::collection::vec(0usize..3, 0..10)) {
        let keys = ["group", "label", "mixed"];
        let mut view = view();
        for click in clicks {
            view.set_sort(keys[click]);
        }
        let before = view.sort().clone();
        view.set_sort("actions");
        prop_assert_eq!(view.sort(), &before);
    }

    /// Whatever is added, the set holds trimmed, non-empty, unique tokens in
    /// first-insertion order
    #[test]
    fn prop_filter_set_invariants(tokens in prop::collection::vec("[ a-c:]{0,4}", 0..20)) {
        let mut state = FilterState::detached();
        for token in &tokens {
            state.add_filter(token);
        }

        let mut expected: Vec<String> = Vec::new();
        for token in &tokens {
            let trimmed = token.trim();
            if !trimmed.is_empty() && !expected.iter().any(|t| t == trimmed) {
                expected.push(trimmed.to_owned());
            }
        }
        let filters = state.filters();
        prop_assert_eq!(filters.as_slice(), expected.as_slice());
    }

    /// Any comma-free token list written to a URL reads back identically
    #[test]
    fn prop_url_round_trip(tokens in prop::collection::vec("[a-zA-Z0-9:@&=+ %.]{1,8}", 0..8)) {
        let mut writer = FilterState::new(UrlLocation::parse("https://admin.example/users?page=1").unwrap());
        for token in &tokens {
            writer.add_filter(token);
        }

        let reader = FilterState::new(UrlLocation::parse(writer.location().as_str()).unwrap());
        prop_assert_eq!(reader.filters(), writer.filters());
        prop_assert_eq!(FilterSet::parse(&writer.filters().serialize().unwrap_or_default()), writer.filters());
    }
}
