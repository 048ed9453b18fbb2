use indexmap::IndexMap;
use log::{debug, warn};

use crate::excel::Sheet;
use crate::timesheet::layout::SheetLayout;
use crate::utils::cell_reference;

/// Category label -> row holding that category's tag.
pub type CategoryRows = IndexMap<String, usize>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserBlocks {
    /// User name -> anchor row (the row carrying the name).
    pub rows: IndexMap<String, usize>,
    /// User name -> the category rows found in that user's block.
    pub category_rows: IndexMap<String, CategoryRows>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category_name: String,
    pub row_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBlock {
    pub name: String,
    pub anchor_row: usize,
    pub submitted: bool,
    pub categories: Vec<CategoryRow>,
}

impl UserBlocks {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Typed view of each block, with the submitted flag read from the anchor row.
    pub fn blocks(&self, sheet: &Sheet, layout: &SheetLayout) -> Vec<UserBlock> {
        self.rows
            .iter()
            .map(|(name, &anchor_row)| UserBlock {
                name: name.clone(),
                anchor_row,
                submitted: is_submitted(sheet, layout, anchor_row),
                categories: self
                    .category_rows
                    .get(name)
                    .map(|cats| {
                        cats.iter()
                            .map(|(category_name, &row_index)| CategoryRow {
                                category_name: category_name.clone(),
                                row_index,
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }
}

pub(crate) fn is_submitted(sheet: &Sheet, layout: &SheetLayout, anchor_row: usize) -> bool {
    sheet
        .cell(anchor_row, layout.submitted_column)
        .is_some_and(|c| c.equals_one())
}

#[derive(Debug, Clone, PartialEq)]
enum ScanState {
    AwaitingUser,
    InUserBlock(String),
}

/// What a single row below the marker contributes to the scan.
#[derive(Debug, Clone, PartialEq)]
enum RowKind {
    Name(String),
    Category(String),
    Other,
}

fn classify_row(sheet: &Sheet, layout: &SheetLayout, row_idx: usize) -> RowKind {
    if let Some(cell) = sheet.cell(row_idx, layout.marker_column) {
        if !cell.is_blank() {
            return RowKind::Name(cell.value.trim().to_string());
        }
    }

    match sheet.cell(row_idx, layout.category_column) {
        Some(cell) if layout.is_category(cell.value.trim()) => {
            RowKind::Category(cell.value.trim().to_string())
        }
        _ => RowKind::Other,
    }
}

impl ScanState {
    fn step(self, row_idx: usize, kind: RowKind, blocks: &mut UserBlocks) -> ScanState {
        match (self, kind) {
            (_, RowKind::Name(name)) => {
                blocks.rows.insert(name.clone(), row_idx);
                blocks.category_rows.insert(name.clone(), IndexMap::new());
                ScanState::InUserBlock(name)
            }
            (ScanState::InUserBlock(name), RowKind::Category(category)) => {
                if let Some(cats) = blocks.category_rows.get_mut(&name) {
                    cats.insert(category, row_idx);
                }
                ScanState::InUserBlock(name)
            }
            (ScanState::AwaitingUser, RowKind::Category(category)) => {
                debug!(
                    "category '{}' on row {} precedes any user, ignored",
                    category, row_idx
                );
                ScanState::AwaitingUser
            }
            (state, RowKind::Other) => state,
        }
    }
}

fn find_marker_row(sheet: &Sheet, layout: &SheetLayout) -> Option<usize> {
    (0..sheet.row_count()).find(|&row_idx| {
        sheet
            .cell(row_idx, layout.marker_column)
            .is_some_and(|c| c.value == layout.user_marker)
    })
}

/// Finds the user blocks below the marker row and the category rows in each block.
///
/// A sheet without the marker yields empty mappings.
pub fn locate_user_blocks(sheet: &Sheet, layout: &SheetLayout) -> UserBlocks {
    let mut blocks = UserBlocks::default();

    let Some(marker_row) = find_marker_row(sheet, layout) else {
        warn!(
            "marker '{}' not found in column {} of '{}', no users",
            layout.user_marker,
            crate::utils::index_to_col_name(layout.marker_column),
            sheet.name
        );
        return blocks;
    };
    debug!(
        "marker '{}' found at {}",
        layout.user_marker,
        cell_reference((marker_row, layout.marker_column))
    );

    let mut state = ScanState::AwaitingUser;
    for row_idx in (marker_row + 1)..sheet.row_count() {
        let kind = classify_row(sheet, layout, row_idx);
        state = state.step(row_idx, kind, &mut blocks);
    }

    blocks
}
