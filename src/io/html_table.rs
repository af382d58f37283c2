use scraper::{ElementRef, Html, Selector};

use crate::model::Table;

/// Extracts the first `<table>` in `html` that carries data, or `None` when
/// there is none. Empty and blank layout tables are skipped.
///
/// Headings come from `<thead>`, falling back to the first row built only of
/// `<th>` cells, then to the first row of any kind. Every remaining row with
/// cells becomes a data row, padded or truncated to the header width.
pub fn parse_first_table(html: &str) -> Option<Table> {
    let table_selector = Selector::parse("table").ok()?;
    let row_selector = Selector::parse("tr").ok()?;
    let document = Html::parse_document(html);
    document
        .select(&table_selector)
        .filter_map(|table| parse_table(table, &row_selector))
        .find(|table| table.columns.iter().any(|heading| !heading.is_empty()))
}

fn parse_table(table: ElementRef<'_>, row_selector: &Selector) -> Option<Table> {
    let mut rows: Vec<(ElementRef<'_>, bool)> = table
        .select(row_selector)
        .filter(|row| belongs_to(row, &table))
        .map(|row| (row, in_thead(&row)))
        .collect();

    let header_position = rows
        .iter()
        .position(|(_, is_head)| *is_head)
        .or_else(|| rows.iter().position(|(row, _)| only_header_cells(row)))
        .or_else(|| rows.iter().position(|(row, _)| !row_cells(row).is_empty()))?;

    let (header_row, _) = rows.remove(header_position);
    let columns = row_cells(&header_row);
    if columns.is_empty() {
        return None;
    }

    let width = columns.len();
    let body = rows
        .into_iter()
        .filter(|(_, is_head)| !is_head)
        .map(|(row, _)| row_cells(&row))
        .filter(|cells| !cells.is_empty())
        .map(|mut cells| {
            cells.resize(width, String::new());
            cells
        })
        .collect();

    Some(Table::new(columns, body))
}

fn row_cells(row: &ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| matches!(child.value().name(), "th" | "td"))
        .map(|child| normalize_ws(&child.text().collect::<String>()))
        .collect()
}

fn only_header_cells(row: &ElementRef<'_>) -> bool {
    let mut cells = row.children().filter_map(ElementRef::wrap).peekable();
    cells.peek().is_some() && cells.all(|child| child.value().name() == "th")
}

fn in_thead(row: &ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|ancestor| ancestor.value().name() != "table")
        .any(|ancestor| ancestor.value().name() == "thead")
}

// Skips rows of tables nested inside `table`.
fn belongs_to(row: &ElementRef<'_>, table: &ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
        .is_some_and(|owner| owner == *table)
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
