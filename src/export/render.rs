use crate::export::converters::display_value;
use crate::export::types::Table;

/// Plain-text rendering with left-aligned index and right-aligned values.
pub fn render_table(table: &Table) -> String {
    let index_width = table.index.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(display_value).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(col_idx, column)| {
            cells
                .iter()
                .filter_map(|row| row.get(col_idx))
                .map(|s| s.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&" ".repeat(index_width));
    for (column, width) in table.columns.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", column, width = width));
    }
    out.push('\n');

    for (user, row) in table.index.iter().zip(&cells) {
        out.push_str(&format!("{:<width$}", user, width = index_width));
        for (value, width) in row.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", value, width = width));
        }
        out.push('\n');
    }

    out
}
