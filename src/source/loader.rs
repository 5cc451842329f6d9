//! Dataset loader: read a city, derive fields, apply the selection

use std::time::Instant;

use crate::core::{Dataset, FilterSelection, LoadResult};
use crate::error::AppError;
use crate::source::Source;
use crate::source::parser::parse_trips;

struct DataLoader<'a> {
    source: &'a dyn Source,
    quiet: bool,
}

impl<'a> DataLoader<'a> {
    fn new(source: &'a dyn Source, quiet: bool) -> Self {
        Self { source, quiet }
    }

    fn load(&self, selection: &FilterSelection) -> Result<LoadResult, AppError> {
        let load_start = Instant::now();
        let city = selection.city;
        let source_name = self.source.describe(city);

        let reader = self.source.open(city)?;
        let parsed = parse_trips(reader, &source_name)?;
        let total = parsed.records.len();

        let dataset = Dataset::new(city, parsed.schema, parsed.records).filtered(selection);
        let elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0;

        if !self.quiet {
            if parsed.skipped > 0 {
                eprintln!(
                    "Loaded {} {} trips ({} malformed rows skipped) ({:.2}ms)",
                    total,
                    city.display_name(),
                    parsed.skipped,
                    elapsed_ms
                );
            } else {
                eprintln!(
                    "Loaded {} {} trips ({:.2}ms)",
                    total,
                    city.display_name(),
                    elapsed_ms
                );
            }
        }

        Ok(LoadResult {
            dataset,
            skipped: parsed.skipped,
            total,
            elapsed_ms,
        })
    }
}

/// Load a city's trips and keep the ones matching the selection
pub(crate) fn load(
    source: &dyn Source,
    selection: &FilterSelection,
    quiet: bool,
) -> Result<LoadResult, AppError> {
    DataLoader::new(source, quiet).load(selection)
}

/// Same as [`load`], validating raw selection strings first
pub(crate) fn load_by_name(
    source: &dyn Source,
    city: &str,
    month: &str,
    day: &str,
    quiet: bool,
) -> Result<LoadResult, AppError> {
    let selection = FilterSelection::parse(city, month, day)?;
    load(source, &selection, quiet)
}
