//! Raw trip rows as a table

use comfy_table::Cell;
use std::fmt::Write;

use crate::consts::TIMESTAMP_FORMAT;
use crate::core::{Schema, TripRecord};
use crate::output::format::{NumberFormat, create_styled_table, format_count, header_cell, right_cell};

#[derive(Debug, Clone, Copy)]
pub(crate) struct RawTableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
    pub(crate) schema: Schema,
}

/// Render `rows`, numbering them from `offset`
pub(crate) fn render_raw_rows(rows: &[TripRecord], offset: usize, opts: &RawTableOptions) -> String {
    let c = opts.use_color;
    let mut header = vec![
        header_cell("#", c),
        header_cell("Start Time", c),
        header_cell("End Time", c),
        header_cell("Trip Duration", c),
        header_cell("Start Station", c),
        header_cell("End Station", c),
        header_cell("User Type", c),
    ];
    if opts.schema.has_gender {
        header.push(header_cell("Gender", c));
    }
    if opts.schema.has_birth_year {
        header.push(header_cell("Birth Year", c));
    }

    let mut table = create_styled_table();
    table.set_header(header);

    for (i, trip) in rows.iter().enumerate() {
        let mut row = vec![
            right_cell(&format_count(offset + i, opts.number_format), None, false),
            Cell::new(trip.start_time.format(TIMESTAMP_FORMAT).to_string()),
            Cell::new(&trip.end_time),
            right_cell(&trip.trip_duration_seconds.to_string(), None, false),
            Cell::new(&trip.start_station),
            Cell::new(&trip.end_station),
            Cell::new(trip.user_type.as_ref().map(ToString::to_string).unwrap_or_default()),
        ];
        if opts.schema.has_gender {
            row.push(Cell::new(
                trip.gender.as_ref().map(ToString::to_string).unwrap_or_default(),
            ));
        }
        if opts.schema.has_birth_year {
            row.push(right_cell(
                &trip.birth_year.map(|y| y.to_string()).unwrap_or_default(),
                None,
                false,
            ));
        }
        table.add_row(row);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{table}");
    out
}
