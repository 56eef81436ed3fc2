//! Property tests for sort stability, the sort cycle and page coverage.

use proptest::prelude::*;

use tabview::model::Record;
use tabview::model::RowKey;
use tabview::model::Value;
use tabview::table::Column;
use tabview::table::SortDirection;
use tabview::table::TableConfig;
use tabview::table::TableView;
use tabview::table::compare_values;

fn cell_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i32>().prop_map(Value::Int),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        "[a-cA-C ]{0,4}".prop_map(Value::String),
        (2000i32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| Value::String(format!("{y:04}-{m:02}-{d:02}"))),
    ]
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![
        Just(SortDirection::None),
        Just(SortDirection::Ascending),
        Just(SortDirection::Descending),
    ]
}

fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| Record::new().set("id", i as i64).set("v", v))
        .collect()
}

fn view(rows: &[Record], page_size: usize) -> TableView<'_, Record> {
    TableView::with_config(
        rows,
        vec![Column::new("v", "V").sortable()],
        TableConfig::default().with_page_size(page_size),
    )
}

fn ids(rows: &[&Record]) -> Vec<i64> {
    rows.iter()
        .map(|r| r.get_long("id").unwrap().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn constant_key_keeps_input_order(
        value in cell_value(),
        len in 0usize..40,
        dir in direction(),
    ) {
        let rows = records(vec![value; len]);
        let mut table = view(&rows, 10);
        table.set_sort("v", dir);

        let expected: Vec<i64> = (0..len as i64).collect();
        prop_assert_eq!(ids(&table.sorted()), expected);
    }

    #[test]
    fn sort_is_a_permutation(values in prop::collection::vec(cell_value(), 0..60), dir in direction()) {
        let rows = records(values);
        let mut table = view(&rows, 10);
        table.set_sort("v", dir);

        let mut sorted = ids(&table.sorted());
        sorted.sort_unstable();
        let expected: Vec<i64> = (0..rows.len() as i64).collect();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn full_cycle_restores_input_order(values in prop::collection::vec(cell_value(), 0..40)) {
        let rows = records(values);
        let mut table = view(&rows, 10);
        let input = ids(&table.sorted());

        table.toggle_sort("v");
        table.toggle_sort("v");
        let state = table.toggle_sort("v").unwrap();

        prop_assert_eq!(state.key(), None);
        prop_assert_eq!(state.direction(), SortDirection::None);
        prop_assert_eq!(ids(&table.sorted()), input);
    }

    #[test]
    fn strings_end_up_ordered(
        values in prop::collection::vec("[a-cA-C]{0,4}", 0..40),
        dir in prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)],
    ) {
        let rows = records(values.into_iter().map(Value::String).collect());
        let mut table = view(&rows, 10);
        table.set_sort("v", dir);

        let sorted = table.sorted();
        for pair in sorted.windows(2) {
            let ordering = compare_values(pair[0].get("v"), pair[1].get("v"), dir);
            prop_assert_ne!(ordering, std::cmp::Ordering::Greater);
        }
    }

    #[test]
    fn pages_cover_sorted_rows_exactly(
        values in prop::collection::vec(cell_value(), 0..60),
        page_size in 1usize..12,
        dir in direction(),
    ) {
        let rows = records(values);
        let mut table = view(&rows, 10);
        table.set_sort("v", dir);
        table.set_page_size(page_size);

        let mut seen = Vec::new();
        for page in 1..=table.total_pages() {
            prop_assert_eq!(table.set_page(page), page);
            let page_rows = table.page_rows();
            prop_assert!(page_rows.len() <= page_size);
            if !page_rows.is_empty() {
                prop_assert_eq!(table.from_index(), (page - 1) * page_size + 1);
                prop_assert_eq!(table.to_index(), table.from_index() + page_rows.len() - 1);
            }
            seen.extend(ids(&page_rows));
        }
        prop_assert_eq!(seen, ids(&table.sorted()));
    }

    #[test]
    fn selection_survives_sort_and_paging(
        values in prop::collection::vec(cell_value(), 1..40),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
        page_size in 1usize..8,
        dir in direction(),
    ) {
        let rows = records(values);
        let mut table = view(&rows, page_size);
        for pick in &picks {
            let row = &rows[pick.index(rows.len())];
            table.toggle_row(row, true);
        }
        let before: Vec<RowKey> = table.selected_keys();

        table.set_sort("v", dir);
        table.last_page();
        table.set_page_size(page_size + 1);

        prop_assert_eq!(table.selected_keys(), before);
    }
}
