use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::str::FromStr;

use timesheet_review::excel;
use timesheet_review::export::{self, ExportFormat, Table};
use timesheet_review::timesheet::{self, SheetLayout};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Timesheet workbook path
    #[arg(required = true)]
    file_path: PathBuf,

    /// Worksheet holding the timesheet
    #[arg(long, short = 's', default_value = "Sheet2")]
    sheet: String,

    /// Directory the two tables are written to
    #[arg(long, short = 'o', default_value = "output")]
    output_dir: PathBuf,

    /// Export format: 'csv', 'json' or 'xlsx'
    #[arg(long, short = 'f', default_value = "csv")]
    format: String,

    /// JSON file overriding the positions of markers, headers and rows
    #[arg(long, short = 'l')]
    layout: Option<PathBuf>,

    /// Review as if run on this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<String>,

    /// Do not print the tables to stdout
    #[arg(long)]
    no_print: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let format = match ExportFormat::from_str(&cli.format) {
        Ok(format) => format,
        Err(_) => anyhow::bail!("Invalid export format: {}", cli.format),
    };

    let today = match &cli.today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date for --today: {}", s))?,
        None => Local::now().date_naive(),
    };

    let layout = match &cli.layout {
        Some(path) => SheetLayout::from_json_file(path)?,
        None => SheetLayout::default(),
    };
    debug!("layout: {:?}", layout);

    let sheet = excel::open_sheet(&cli.file_path, &cli.sheet, layout.header_rows)?;
    let report = timesheet::extract(&sheet, &layout, today);

    if report.entries.is_empty() {
        info!(
            "no users found in '{}' (marker '{}' missing?)",
            sheet.name, layout.user_marker
        );
    }

    if !cli.no_print {
        let date_labels: Vec<String> = report.date_columns.keys().cloned().collect();
        println!(
            "{}",
            export::render_table(&Table::from_entries(&report.entries, &date_labels))
        );
        println!(
            "{}",
            export::render_table(&Table::from_summary(&report.summary, &layout.categories))
        );
    }

    let (entries_path, distribution_path) =
        export::export_report(&report, &layout, &cli.output_dir, format)?;
    eprintln!(
        "Wrote {} and {}",
        entries_path.display(),
        distribution_path.display()
    );

    Ok(())
}
