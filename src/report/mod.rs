//! Report generation: world summary and the region spreadsheet

pub mod summary;
pub mod workbook;

pub use summary::WorldSummary;
pub use workbook::{build_rows, build_workbook, write_workbook, ReportRow, SHEET_NAME};
