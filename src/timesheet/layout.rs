use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use std::fs;
use std::path::Path;

use crate::utils::col_name_to_index;

pub const DEFAULT_CATEGORIES: [&str; 3] = [
    "Absenses [h]",
    "Networking and administration, personal development",
    "Operational hours",
];

/// Positions of the structural elements of the timesheet sheet.
///
/// Rows and columns are 0-based. In a layout file, columns may be given
/// either as numbers or as spreadsheet letters (`"P"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetLayout {
    /// Sheet rows above the grid. The first sheet row is a column header
    /// row and is not part of the grid.
    pub header_rows: usize,
    /// Text of the cell that precedes the first user row.
    pub user_marker: String,
    #[serde(deserialize_with = "column_index")]
    pub marker_column: usize,
    #[serde(deserialize_with = "column_index")]
    pub category_column: usize,
    #[serde(deserialize_with = "column_index")]
    pub submitted_column: usize,
    pub header_row: usize,
    #[serde(deserialize_with = "column_index")]
    pub header_start_column: usize,
    pub target_row_offset: usize,
    pub actual_row_offset: usize,
    pub category_data_row_offset: usize,
    pub categories: Vec<String>,
    /// While `today` falls on one of the first days of a month, the
    /// previous month is still under review.
    pub early_month_days: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout {
            header_rows: 1,
            user_marker: "User".to_string(),
            marker_column: 0,
            category_column: 11,
            submitted_column: 2,
            header_row: 2,
            header_start_column: 15,
            target_row_offset: 2,
            actual_row_offset: 3,
            category_data_row_offset: 1,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            early_month_days: 5,
        }
    }
}

impl SheetLayout {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse sheet layout")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid layout file: {}", path.display()))
    }

    pub fn is_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }
}

fn column_index<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .map(|x| x as usize)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid column index: {}", n))),
        Value::String(s) => col_name_to_index(&s)
            .or_else(|| s.parse::<usize>().ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid column: {:?}", s))),
        other => Err(serde::de::Error::custom(format!(
            "expected a column number or letters, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_layout_keeps_defaults() {
        let layout = SheetLayout::from_json_str(r#"{"headerRow": 4, "userMarker": "Name"}"#).unwrap();
        assert_eq!(layout.header_row, 4);
        assert_eq!(layout.user_marker, "Name");
        assert_eq!(layout.header_start_column, 15);
        assert_eq!(layout.header_rows, 1);
        assert_eq!(layout.categories.len(), 3);
    }

    #[test]
    fn columns_accept_letters() {
        let layout =
            SheetLayout::from_json_str(r#"{"categoryColumn": "L", "headerStartColumn": "p", "markerColumn": 1}"#)
                .unwrap();
        assert_eq!(layout.category_column, 11);
        assert_eq!(layout.header_start_column, 15);
        assert_eq!(layout.marker_column, 1);
    }

    #[test]
    fn bad_column_is_rejected() {
        assert!(SheetLayout::from_json_str(r#"{"categoryColumn": "L1"}"#).is_err());
        assert!(SheetLayout::from_json_str(r#"{"categoryColumn": true}"#).is_err());
    }

    #[test]
    fn category_lookup() {
        let layout = SheetLayout::default();
        assert!(layout.is_category("Operational hours"));
        assert!(!layout.is_category("Overtime"));
    }
}
