use indexmap::IndexMap;
use log::debug;

use crate::excel::Sheet;
use crate::timesheet::dates::DateColumns;
use crate::timesheet::layout::SheetLayout;
use crate::timesheet::users::CategoryRows;

/// One user's row of the time distribution table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub user: String,
    /// Category label -> hours booked over the date columns.
    pub hours: IndexMap<String, f64>,
}

/// Sums each user's category hours over the date columns.
///
/// Every configured category starts at zero so that categories a user
/// never booked still appear. Only numeric cells are added up.
pub fn summarise(
    sheet: &Sheet,
    category_rows: &IndexMap<String, CategoryRows>,
    date_columns: &DateColumns,
    layout: &SheetLayout,
) -> Vec<CategorySummary> {
    category_rows
        .iter()
        .map(|(user, categories)| {
            let mut hours: IndexMap<String, f64> = layout
                .categories
                .iter()
                .map(|c| (c.clone(), 0.0))
                .collect();

            for (category, &row_idx) in categories {
                let data_row = row_idx.checked_add(layout.category_data_row_offset);
                let total: f64 = date_columns
                    .values()
                    .filter_map(|&col_idx| data_row.and_then(|r| sheet.cell(r, col_idx)))
                    .filter_map(|cell| cell.as_number())
                    .sum();
                hours.insert(category.clone(), total);
            }

            debug!("time distribution for {}: {:?}", user, hours);
            CategorySummary {
                user: user.clone(),
                hours,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::Cell;

    #[test]
    fn sums_numeric_cells_only() {
        let layout = SheetLayout::default();
        let mut data = vec![Cell::empty(); 15];
        data.extend([
            Cell::float(2.5),
            Cell::text("4"),
            Cell::float(f64::NAN),
            Cell::int(3),
        ]);
        let sheet = Sheet::from_rows("s", vec![vec![], data]);

        let mut cats = CategoryRows::new();
        cats.insert("Operational hours".to_string(), 0);
        let rows: IndexMap<String, CategoryRows> =
            [("Alice".to_string(), cats)].into_iter().collect();
        let dates: DateColumns = (15..=19).map(|c| (format!("d{}", c), c)).collect();

        let summary = summarise(&sheet, &rows, &dates, &layout);
        assert_eq!(summary[0].hours["Operational hours"], 5.5);
        assert_eq!(summary[0].hours["Absenses [h]"], 0.0);
        assert_eq!(summary[0].hours.len(), 3);
    }

    #[test]
    fn huge_data_row_offset_sums_to_zero() {
        let layout = SheetLayout {
            category_data_row_offset: usize::MAX,
            ..SheetLayout::default()
        };
        let mut data = vec![Cell::empty(); 15];
        data.push(Cell::int(4));
        let sheet = Sheet::from_rows("s", vec![vec![], data]);

        let mut cats = CategoryRows::new();
        cats.insert("Operational hours".to_string(), 1);
        let rows: IndexMap<String, CategoryRows> =
            [("Alice".to_string(), cats)].into_iter().collect();
        let dates: DateColumns = [("d".to_string(), 15)].into_iter().collect();

        let summary = summarise(&sheet, &rows, &dates, &layout);
        assert_eq!(summary[0].hours["Operational hours"], 0.0);
    }

    #[test]
    fn users_without_categories_are_zero_seeded() {
        let layout = SheetLayout::default();
        let sheet = Sheet::from_rows("s", vec![]);
        let rows: IndexMap<String, CategoryRows> =
            [("Bob".to_string(), CategoryRows::new())].into_iter().collect();

        let summary = summarise(&sheet, &rows, &DateColumns::new(), &layout);
        assert_eq!(summary.len(), 1);
        assert!(summary[0].hours.values().all(|h| *h == 0.0));
        assert_eq!(
            summary[0].hours.keys().collect::<Vec<_>>(),
            layout.categories.iter().collect::<Vec<_>>()
        );
    }
}
