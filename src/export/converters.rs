use serde_json::{Value, json};

use crate::export::types::Table;
use crate::timesheet::{CategorySummary, TimesheetEntry};

pub const SUBMITTED_COLUMN: &str = "Submitted?";

// Whole hours are written without a fractional part
pub fn hours_value(hours: f64) -> Value {
    if hours.fract() == 0.0 && hours.abs() < 1e15 {
        json!(hours.trunc() as i64)
    } else {
        json!(hours)
    }
}

/// Text of a value as it appears in delimited output and on screen.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Table {
    /// The variance table: one column per date label, then `Submitted?`.
    pub fn from_entries(entries: &[TimesheetEntry], date_labels: &[String]) -> Self {
        let mut columns = date_labels.to_vec();
        columns.push(SUBMITTED_COLUMN.to_string());

        let rows = entries
            .iter()
            .map(|entry| {
                let mut row: Vec<Value> = date_labels
                    .iter()
                    .map(|label| {
                        entry
                            .variances
                            .get(label)
                            .map(|v| json!(v))
                            .unwrap_or(Value::Null)
                    })
                    .collect();
                row.push(Value::Bool(entry.submitted));
                row
            })
            .collect();

        Table {
            index: entries.iter().map(|e| e.user.clone()).collect(),
            columns,
            rows,
        }
    }

    /// The time distribution table: one column per category.
    pub fn from_summary(summary: &[CategorySummary], categories: &[String]) -> Self {
        let rows = summary
            .iter()
            .map(|s| {
                categories
                    .iter()
                    .map(|c| s.hours.get(c).map(|h| hours_value(*h)).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Table {
            index: summary.iter().map(|s| s.user.clone()).collect(),
            columns: categories.to_vec(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn hours_drop_whole_fractions() {
        assert_eq!(hours_value(10.0), json!(10));
        assert_eq!(hours_value(2.5), json!(2.5));
        assert_eq!(display_value(&hours_value(10.0)), "10");
        assert_eq!(display_value(&Value::Bool(false)), "False");
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn entries_table_appends_submitted_column() {
        let mut variances = IndexMap::new();
        variances.insert("Mon, Mar-03".to_string(), -2);
        let entries = vec![TimesheetEntry {
            user: "Alice".to_string(),
            variances,
            submitted: true,
        }];
        let table = Table::from_entries(&entries, &["Mon, Mar-03".to_string()]);
        assert_eq!(table.index, vec!["Alice"]);
        assert_eq!(table.columns, vec!["Mon, Mar-03", SUBMITTED_COLUMN]);
        assert_eq!(table.rows, vec![vec![json!(-2), Value::Bool(true)]]);
    }
}
