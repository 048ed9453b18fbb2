use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(()),
        }
    }
}

/// A user-indexed table: one row per user, one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}
