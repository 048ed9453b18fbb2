use indexmap::IndexMap;
use log::debug;

use crate::excel::Sheet;
use crate::timesheet::dates::DateColumns;
use crate::timesheet::layout::SheetLayout;
use crate::timesheet::users::is_submitted;

/// One user's row of the variance table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetEntry {
    pub user: String,
    /// Date label -> target hours minus actual hours.
    pub variances: IndexMap<String, i64>,
    pub submitted: bool,
}

// A row past usize::MAX reads like any other missing cell
fn hours_at(sheet: &Sheet, row: Option<usize>, col: usize) -> i64 {
    row.and_then(|r| sheet.cell(r, col))
        .map(|c| c.coerce_hours())
        .unwrap_or(0)
}

pub fn read_entries(
    sheet: &Sheet,
    user_rows: &IndexMap<String, usize>,
    date_columns: &DateColumns,
    layout: &SheetLayout,
) -> Vec<TimesheetEntry> {
    user_rows
        .iter()
        .map(|(user, &row_idx)| {
            let target_row = row_idx.checked_add(layout.target_row_offset);
            let actual_row = row_idx.checked_add(layout.actual_row_offset);

            let variances = date_columns
                .iter()
                .map(|(label, &col_idx)| {
                    let target = hours_at(sheet, target_row, col_idx);
                    let actual = hours_at(sheet, actual_row, col_idx);
                    (label.clone(), target - actual)
                })
                .collect();

            let submitted = is_submitted(sheet, layout, row_idx);
            debug!("entries for {}: submitted={} {:?}", user, submitted, variances);

            TimesheetEntry {
                user: user.clone(),
                variances,
                submitted,
            }
        })
        .collect()
}
