mod converters;
mod exporters;
mod render;
mod types;

pub use converters::{SUBMITTED_COLUMN, display_value, hours_value};
pub use exporters::{
    DISTRIBUTION_FILE_STEM, ENTRIES_FILE_STEM, export_report, serialize_to_json, table_records,
    write_csv, write_json, write_table, write_xlsx,
};
pub use render::render_table;
pub use types::{ExportFormat, Table};
