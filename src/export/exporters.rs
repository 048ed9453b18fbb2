use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::info;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use serde::Serialize;
use serde_json::Value;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::export::converters::display_value;
use crate::export::types::{ExportFormat, Table};
use crate::timesheet::{SheetLayout, TimesheetReport};

pub const ENTRIES_FILE_STEM: &str = "timesheet_entries";
pub const DISTRIBUTION_FILE_STEM: &str = "time_distribution";

const INDEX_KEY: &str = "user";

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

/// Ordered records, one object per user, index first.
pub fn table_records(table: &Table) -> Vec<IndexMap<String, Value>> {
    table
        .index
        .iter()
        .zip(&table.rows)
        .map(|(user, row)| {
            let mut record = IndexMap::with_capacity(table.columns.len() + 1);
            record.insert(INDEX_KEY.to_string(), Value::String(user.clone()));
            for (column, value) in table.columns.iter().zip(row) {
                record.insert(column.clone(), value.clone());
            }
            record
        })
        .collect()
}

/// Writes the table with a header row; the index column has an empty header.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    let mut header = vec![String::new()];
    header.extend(table.columns.iter().cloned());
    writer
        .write_record(&header)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    for (user, row) in table.index.iter().zip(&table.rows) {
        let mut record = vec![user.clone()];
        record.extend(row.iter().map(display_value));
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write to file: {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;
    Ok(())
}

pub fn write_json(table: &Table, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(&table_records(table))?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

pub fn write_xlsx(table: &Table, path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .with_context(|| format!("Invalid worksheet name: {}", sheet_name))?;

    let header_format = Format::new().set_bold();

    for (col_idx, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, (col_idx + 1) as u16, column, &header_format)?;
    }

    for (row_idx, (user, row)) in table.index.iter().zip(&table.rows).enumerate() {
        let xlsx_row = (row_idx + 1) as u32;
        worksheet.write_string_with_format(xlsx_row, 0, user, &header_format)?;

        for (col_idx, value) in row.iter().enumerate() {
            let xlsx_col = (col_idx + 1) as u16;
            match value {
                Value::Number(n) => {
                    if let Some(f) = n.as_f64() {
                        worksheet.write_number(xlsx_row, xlsx_col, f)?;
                    }
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(xlsx_row, xlsx_col, *b)?;
                }
                Value::Null => {}
                other => {
                    worksheet.write_string(xlsx_row, xlsx_col, display_value(other))?;
                }
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

pub fn write_table(table: &Table, path: &Path, format: ExportFormat, sheet_name: &str) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, path),
        ExportFormat::Json => write_json(table, path),
        ExportFormat::Xlsx => write_xlsx(table, path, sheet_name),
    }
}

/// Writes the variance and time distribution tables into `dir`, creating it
/// if needed, and returns the two paths written.
pub fn export_report(
    report: &TimesheetReport,
    layout: &SheetLayout,
    dir: &Path,
    format: ExportFormat,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let date_labels: Vec<String> = report.date_columns.keys().cloned().collect();
    let entries = Table::from_entries(&report.entries, &date_labels);
    let distribution = Table::from_summary(&report.summary, &layout.categories);

    let entries_path = dir.join(format!("{}.{}", ENTRIES_FILE_STEM, format.extension()));
    let distribution_path = dir.join(format!("{}.{}", DISTRIBUTION_FILE_STEM, format.extension()));

    write_table(&entries, &entries_path, format, "Entries")?;
    write_table(&distribution, &distribution_path, format, "Distribution")?;

    info!(
        "exported {} and {}",
        entries_path.display(),
        distribution_path.display()
    );
    Ok((entries_path, distribution_path))
}
