use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use log::{debug, info};
use std::path::Path;

use crate::excel::{Cell, CellType, DataTypeInfo, Sheet};

/// Names of every worksheet in the workbook, in file order.
pub fn sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path_str = path.as_ref().to_string_lossy().to_string();
    let workbook = open_workbook_auto(&path)
        .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Loads one worksheet into an in-memory grid.
///
/// The first `header_rows` sheet rows are dropped, so grid row 0 is sheet
/// row `header_rows + 1`. Columns keep their sheet position. Calamine ranges
/// start at the first used cell, so the range origin is added back before
/// storing.
pub fn open_sheet<P: AsRef<Path>>(path: P, sheet_name: &str, header_rows: usize) -> Result<Sheet> {
    let path_str = path.as_ref().to_string_lossy().to_string();

    let mut workbook = open_workbook_auto(&path)
        .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;

    let available = workbook.sheet_names().to_vec();
    if !available.iter().any(|name| name == sheet_name) {
        anyhow::bail!(
            "Worksheet '{}' not found in {} (available: {})",
            sheet_name,
            path_str,
            available.join(", ")
        );
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("Unable to read worksheet: {}", sheet_name))?;

    let sheet = create_sheet_from_range(sheet_name, &range, header_rows);
    info!(
        "loaded worksheet '{}' from {} ({} rows x {} columns)",
        sheet_name, path_str, sheet.max_rows, sheet.max_cols
    );
    Ok(sheet)
}

fn create_sheet_from_range(name: &str, range: &calamine::Range<Data>, header_rows: usize) -> Sheet {
    let (height, width) = range.get_size();
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    debug!(
        "worksheet '{}' range starts at ({}, {}), size {}x{}",
        name, row_offset, col_offset, height, width
    );

    let rows = if height == 0 {
        0
    } else {
        (height + row_offset).saturating_sub(header_rows)
    };
    let cols = if width == 0 { 0 } else { width + col_offset };
    let mut data = vec![vec![Cell::empty(); cols]; rows];

    for (row_idx, col_idx, cell) in range.used_cells() {
        let Some(grid_row) = (row_idx + row_offset).checked_sub(header_rows) else {
            continue;
        };
        data[grid_row][col_idx + col_offset] = cell_from_data(cell);
    }

    Sheet::from_rows(name, data)
}

fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::empty(),
        Data::String(s) => Cell::text(s.clone()),
        Data::Float(f) => Cell::float(*f),
        Data::Int(i) => Cell::int(*i),
        Data::Bool(b) => Cell::boolean(*b),
        Data::Error(e) => Cell::new_with_type(
            format!("Error: {:?}", e),
            CellType::Text,
            DataTypeInfo::Error,
        ),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            Cell::new_with_type(
                serial.to_string(),
                CellType::Date,
                DataTypeInfo::DateTime(serial),
            )
        }
        Data::DateTimeIso(s) => Cell::new_with_type(
            s.clone(),
            CellType::Date,
            DataTypeInfo::DateTimeIso(s.clone()),
        ),
        Data::DurationIso(s) => Cell::new_with_type(
            s.clone(),
            CellType::Text,
            DataTypeInfo::DurationIso(s.clone()),
        ),
    }
}
