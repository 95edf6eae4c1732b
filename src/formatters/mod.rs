pub mod json_report;
pub mod summary;

pub use json_report::JsonReportFormatter;
pub use summary::SummaryFormatter;
