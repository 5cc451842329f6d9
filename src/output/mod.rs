mod format;
mod json;
mod raw;
mod report;

pub(crate) use format::NumberFormat;
pub(crate) use json::{output_reports_json, output_rows_json};
pub(crate) use raw::{RawTableOptions, render_raw_rows};
pub(crate) use report::{
    ReportTableOptions, SummaryOptions, print_report_tables, render_report_tables,
    render_summary_line,
};
