use crate::excel::Cell;

/// A worksheet loaded into memory. Rows and columns are 0-based sheet
/// coordinates; rows may have different lengths.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub data: Vec<Vec<Cell>>,
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Sheet {
    pub fn from_rows(name: &str, data: Vec<Vec<Cell>>) -> Self {
        let max_rows = data.len();
        let max_cols = data.iter().map(Vec::len).max().unwrap_or(0);
        Sheet {
            name: name.to_string(),
            data,
            max_rows,
            max_cols,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// The cell at `(row, col)`, or `None` when the address lies outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        self.data.get(row).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_are_missing() {
        let sheet = Sheet::from_rows("s", vec![vec![Cell::int(1)], vec![]]);
        assert_eq!(sheet.max_rows, 2);
        assert_eq!(sheet.max_cols, 1);
        assert_eq!(sheet.cell(0, 0), Some(&Cell::int(1)));
        assert_eq!(sheet.cell(0, 5), None);
        assert_eq!(sheet.cell(1, 0), None);
        assert_eq!(sheet.cell(9, 0), None);
        assert!(sheet.row(9).is_empty());
    }
}
