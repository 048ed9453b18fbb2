mod dates;
mod entries;
mod layout;
mod summary;
mod users;

use chrono::NaiveDate;
use log::info;

use crate::excel::Sheet;

pub use dates::{DateColumns, ReferencePeriod, locate_date_columns};
pub use entries::{TimesheetEntry, read_entries};
pub use layout::{DEFAULT_CATEGORIES, SheetLayout};
pub use summary::{CategorySummary, summarise};
pub use users::{CategoryRow, CategoryRows, UserBlock, UserBlocks, locate_user_blocks};

/// Both derived tables of one timesheet, plus the date columns they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetReport {
    pub date_columns: DateColumns,
    pub entries: Vec<TimesheetEntry>,
    pub summary: Vec<CategorySummary>,
}

/// Runs the full extraction over an already loaded sheet.
pub fn extract(sheet: &Sheet, layout: &SheetLayout, today: NaiveDate) -> TimesheetReport {
    let users = locate_user_blocks(sheet, layout);
    let date_columns = locate_date_columns(sheet, layout, today);
    info!(
        "'{}': {} users, {} date columns",
        sheet.name,
        users.len(),
        date_columns.len()
    );

    let entries = read_entries(sheet, &users.rows, &date_columns, layout);
    let summary = summarise(sheet, &users.category_rows, &date_columns, layout);

    TimesheetReport {
        date_columns,
        entries,
        summary,
    }
}
