//! Drives a table over a small user list and prints each page.
//!
//! Run with: cargo run --example users
//!
//! Debug logs are written to `users.log`.

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tabview::model::Record;
use tabview::table::{
    Alignment, Cell, CellContext, ClickTarget, Column, SortDirection, TableConfig, TableEvent,
    TableView,
};

const USERS: &str = r#"[
    {"id": 1, "name": "Grace", "email": "grace@example.com", "joined": "2021-06-01", "address": {"city": "Arlington"}},
    {"id": 2, "name": "alan", "email": "alan@example.com", "joined": "2019-11-23", "address": {"city": "Wilmslow"}},
    {"id": 3, "name": "Ada", "email": null, "joined": "2023-02-14", "address": {"city": "London"}},
    {"id": 4, "name": "Edsger", "email": "edsger@example.com", "joined": "2020-08-06"},
    {"id": 5, "name": "Barbara", "email": "barbara@example.com", "joined": "2022-03-30", "address": {"city": "Boston"}}
]"#;

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("id", "ID").width("4").align(Alignment::End),
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email"),
        Column::new("joined", "Joined").sortable(),
        Column::new("address.city", "City").sortable(),
    ]
}

fn print_page(table: &TableView<'_, Record>) {
    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|c| match table.sort_direction_for(&c.key) {
            SortDirection::Ascending => format!("{} ^", c.header),
            SortDirection::Descending => format!("{} v", c.header),
            SortDirection::None => c.header.clone(),
        })
        .collect();
    println!("    {}", headers.join(" | "));

    for view in table.visible_rows() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|c| match table.render_cell(view.row, &c.key) {
                Cell::Custom(out) | Cell::Text(out) => out,
            })
            .collect();
        let mark = if view.selected { "[x]" } else { "[ ]" };
        println!("{} {}", mark, cells.join(" | "));
    }
    println!(
        "    rows {}-{} of {} (page {}/{})\n",
        table.from_index(),
        table.to_index(),
        table.total(),
        table.current_page(),
        table.total_pages()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("users.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let users: Vec<Record> = serde_json::from_str(USERS)?;
    let config = TableConfig::default()
        .with_selectable(true)
        .with_page_size(2);

    let mut table: TableView<'_, Record> = TableView::with_config(&users, columns(), config)
        .with_renderer("email", |cx: &CellContext<'_, Record>| match cx.value {
            Some(email) => format!("<{email}>"),
            None => "-".to_string(),
        });

    println!("Input order:");
    print_page(&table);

    table.toggle_sort("name");
    println!("Sorted by name:");
    print_page(&table);

    table.next_page();
    let rows = table.page_rows();
    if let Some(first) = rows.first() {
        table.on_row_click(first, ClickTarget::Row);
    }
    table.toggle_sort("joined");
    table.toggle_sort("joined");
    println!("Sorted by join date, newest first:");
    print_page(&table);

    table.set_page_size(5);
    println!("All rows:");
    print_page(&table);

    for event in table.drain_events() {
        match event {
            TableEvent::SelectionChanged(rows) => {
                let names: Vec<String> = rows
                    .iter()
                    .filter_map(|r| r.get_string("name").ok().flatten().map(str::to_string))
                    .collect();
                println!("selection -> {names:?}");
            }
            TableEvent::SortChanged(sort) => {
                println!("sort -> {:?} {:?}", sort.key(), sort.direction());
            }
            TableEvent::PageChanged(change) => {
                println!("page -> {} (size {})", change.page, change.page_size);
            }
        }
    }

    Ok(())
}
