use chrono::NaiveDate;
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use tempfile::tempdir;

use timesheet_review::excel::{DataTypeInfo, open_sheet, sheet_names};
use timesheet_review::export::{ExportFormat, export_report};
use timesheet_review::timesheet::{SheetLayout, extract};

/// A timesheet as the review script expects it: a column header row on
/// sheet row 1, then the date header on sheet row 4 and the marker on row 7.
fn write_timesheet(path: &std::path::Path) {
    let mut workbook = XlsxWorkbook::new();

    let first = workbook.add_worksheet();
    first.set_name("Sheet1").unwrap();
    first.write_string(0, 0, "cover").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet2").unwrap();
    sheet.write_string(0, 0, "Timesheet").unwrap();
    sheet.write_string(3, 15, "3, Mo").unwrap();
    sheet.write_string(3, 16, "4, Tu").unwrap();
    sheet.write_string(3, 17, "8, Sa").unwrap();
    sheet.write_string(6, 0, "User").unwrap();
    sheet.write_string(7, 0, "Alice").unwrap();
    sheet.write_number(7, 2, 1).unwrap();
    sheet.write_number(9, 15, 8).unwrap();
    sheet.write_number(9, 16, 8).unwrap();
    sheet.write_number(10, 15, 4).unwrap();
    sheet.write_number(10, 16, 6).unwrap();
    sheet.write_string(9, 11, "Operational hours").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_open_sheet_without_header_rows_keeps_sheet_positions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timesheet.xlsx");
    write_timesheet(&path);

    assert_eq!(sheet_names(&path).unwrap(), vec!["Sheet1", "Sheet2"]);

    let sheet = open_sheet(&path, "Sheet2", 0).unwrap();
    assert_eq!(sheet.name, "Sheet2");
    assert_eq!(sheet.cell(0, 0).unwrap().value, "Timesheet");
    assert_eq!(sheet.cell(6, 0).unwrap().value, "User");
    assert_eq!(sheet.cell(3, 15).unwrap().value, "3, Mo");
    assert_eq!(sheet.cell(10, 16).unwrap().original_type, DataTypeInfo::Float(6.0));
}

#[test]
fn test_first_sheet_row_is_a_column_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timesheet.xlsx");
    write_timesheet(&path);

    let layout = SheetLayout::default();
    let sheet = open_sheet(&path, "Sheet2", layout.header_rows).unwrap();
    assert_eq!(sheet.cell(2, 15).unwrap().value, "3, Mo");
    assert_eq!(sheet.cell(5, 0).unwrap().value, "User");
    assert!(sheet.data.iter().flatten().all(|c| c.value != "Timesheet"));

    let report = extract(&sheet, &layout, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    assert_eq!(
        report.date_columns.into_iter().collect::<Vec<_>>(),
        vec![("Mon, Mar-03".to_string(), 15), ("Tue, Mar-04".to_string(), 16)]
    );
}

#[test]
fn test_unknown_sheet_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timesheet.xlsx");
    write_timesheet(&path);

    let err = open_sheet(&path, "Sheet9", 1).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Sheet9"));
    assert!(message.contains("Sheet1, Sheet2"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(open_sheet(dir.path().join("nope.xlsx"), "Sheet2", 1).is_err());
}

#[test]
fn test_workbook_to_xlsx_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timesheet.xlsx");
    write_timesheet(&path);

    let layout = SheetLayout::default();
    let sheet = open_sheet(&path, "Sheet2", layout.header_rows).unwrap();
    let report = extract(&sheet, &layout, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    assert_eq!(report.date_columns.len(), 2);
    assert!(report.entries[0].submitted);
    assert_eq!(report.entries[0].variances["Mon, Mar-03"], 4);
    assert_eq!(report.entries[0].variances["Tue, Mar-04"], 2);
    assert_eq!(report.summary[0].hours["Operational hours"], 10.0);

    let (entries_path, _) =
        export_report(&report, &layout, &dir.path().join("out"), ExportFormat::Xlsx).unwrap();
    let exported = open_sheet(&entries_path, "Entries", 0).unwrap();
    assert_eq!(exported.cell(0, 1).unwrap().value, "Mon, Mar-03");
    assert_eq!(exported.cell(1, 0).unwrap().value, "Alice");
    assert_eq!(exported.cell(1, 1).unwrap().value, "4");
    assert_eq!(exported.cell(1, 3).unwrap().original_type, DataTypeInfo::Bool(true));
}
