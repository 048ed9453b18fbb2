pub mod excel;
pub mod export;
pub mod timesheet;
pub mod utils;
