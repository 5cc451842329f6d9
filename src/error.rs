use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Unknown city \"{input}\" (expected Chicago, New York City or Washington)")]
    UnknownCity { input: String },

    #[error("Invalid {field} \"{input}\" (expected {expected})")]
    InvalidSelection {
        field: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("No city selected. Pass --city or use the explore command.")]
    MissingCity,

    #[error("Data source {} unavailable: {source}", path.display())]
    DataSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name} is missing required column \"{column}\"")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
