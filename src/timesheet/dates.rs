use chrono::{Datelike, Duration, NaiveDate};
use indexmap::IndexMap;
use log::debug;

use crate::excel::Sheet;
use crate::timesheet::layout::SheetLayout;
use crate::utils::cell_reference;

/// Display label (`"Mon, Mar-03"`) -> absolute column, in ascending column order.
pub type DateColumns = IndexMap<String, usize>;

const WEEKEND: [&str; 2] = ["Sa", "Su"];

/// The month whose days are being reviewed and the date that bounds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePeriod {
    pub date: NaiveDate,
    pub previous_month: bool,
}

impl ReferencePeriod {
    pub fn for_today(today: NaiveDate, layout: &SheetLayout) -> Self {
        if today.day() <= layout.early_month_days {
            // First of the month minus one day is always a valid date.
            let last_day = today.with_day(1).unwrap_or(today) - Duration::days(1);
            ReferencePeriod {
                date: last_day,
                previous_month: true,
            }
        } else {
            ReferencePeriod {
                date: today,
                previous_month: false,
            }
        }
    }

    /// Whether `day` of the reference month has already elapsed.
    fn includes(&self, day: u32) -> bool {
        if self.previous_month {
            day <= self.date.day()
        } else {
            day < self.date.day()
        }
    }
}

/// Splits a header cell of the form `"<day>, <weekday>"`.
fn parse_header_cell(value: &str) -> Option<(u32, &str)> {
    let mut parts = value.split(", ");
    let day_str = parts.next()?;
    let weekday = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let day = day_str.trim().parse::<u32>().ok()?;
    Some((day, weekday))
}

/// Resolves the elapsed weekday columns of the date header row.
///
/// `today` decides the reference month: during its first few days the
/// previous month is reviewed in full, otherwise only the days before
/// `today` count. Cells that do not parse, weekend days and days missing
/// from the reference month are skipped.
pub fn locate_date_columns(sheet: &Sheet, layout: &SheetLayout, today: NaiveDate) -> DateColumns {
    let period = ReferencePeriod::for_today(today, layout);
    debug!(
        "reference date {} (previous month: {})",
        period.date, period.previous_month
    );

    let mut columns = DateColumns::new();
    let header = sheet.row(layout.header_row);

    for (col_idx, cell) in header.iter().enumerate().skip(layout.header_start_column) {
        if cell.is_blank() {
            continue;
        }
        let reference = cell_reference((layout.header_row, col_idx));

        let Some((day, weekday)) = parse_header_cell(&cell.value) else {
            debug!("header cell {} {:?} is not a date, skipped", reference, cell.value);
            continue;
        };
        let Some(date) = period.date.with_day(day) else {
            debug!(
                "header cell {}: day {} does not exist in {}, skipped",
                reference,
                day,
                period.date.format("%b %Y")
            );
            continue;
        };
        if WEEKEND.contains(&weekday) || !period.includes(day) {
            continue;
        }

        columns.insert(date.format("%a, %b-%d").to_string(), col_idx);
    }

    debug!("date columns: {:?}", columns);
    columns
}
