//! Bikeshare CSV parser
//!
//! Columns are located by header name, so column order and the unnamed
//! index column some exports carry do not matter.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::io::Read;

use crate::core::{Gender, Schema, TripRecord, UserType};
use crate::error::AppError;
use crate::utils::{parse_debug_enabled, parse_timestamp};

const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];
const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

// ============================================================================
// Internal row type
// ============================================================================

#[derive(Debug, Deserialize)]
struct CsvTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Parsed city file before any filtering
#[derive(Debug, Default)]
pub(crate) struct ParsedTrips {
    pub(crate) records: Vec<TripRecord>,
    pub(crate) schema: Schema,
    /// Rows dropped as malformed
    pub(crate) skipped: u64,
}

// ============================================================================
// Parsing
// ============================================================================

fn detect_schema(headers: &StringRecord, source_name: &str) -> Result<Schema, AppError> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(column) = REQUIRED_COLUMNS.iter().find(|&&c| !has(c)) {
        return Err(AppError::MissingColumn {
            source_name: source_name.to_string(),
            column: *column,
        });
    }

    Ok(Schema {
        has_gender: has(GENDER_COLUMN),
        has_birth_year: has(BIRTH_YEAR_COLUMN),
    })
}

fn malformed(line: u64, reason: String) -> AppError {
    AppError::MalformedRecord { line, reason }
}

fn parse_duration(raw: &str, line: u64) -> Result<f64, AppError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid trip duration \"{raw}\"")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(malformed(line, format!("invalid trip duration \"{raw}\"")));
    }
    Ok(value)
}

/// Birth years are often exported as floats ("1992.0"); anything
/// non-integral or unparseable counts as a missing observation
fn parse_birth_year(raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let value: f64 = raw.parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        i32::try_from(value as i64).ok()
    } else {
        None
    }
}

fn to_record(row: CsvTrip, line: u64) -> Result<TripRecord, AppError> {
    let start_time = parse_timestamp(&row.start_time)
        .ok_or_else(|| malformed(line, format!("invalid start time \"{}\"", row.start_time)))?;
    let trip_duration_seconds = parse_duration(&row.trip_duration, line)?;

    Ok(TripRecord {
        end_time: row.end_time,
        user_type: row.user_type.as_deref().and_then(UserType::parse),
        gender: row.gender.as_deref().and_then(Gender::parse),
        birth_year: parse_birth_year(row.birth_year.as_deref()),
        ..TripRecord::new(
            start_time,
            trip_duration_seconds,
            row.start_station,
            row.end_station,
        )
    })
}

/// Parse every row of a city file. Malformed rows are skipped and counted;
/// only a broken header aborts.
pub(crate) fn parse_trips<R: Read>(reader: R, source_name: &str) -> Result<ParsedTrips, AppError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let schema = detect_schema(&headers, source_name)?;
    let mut parsed = ParsedTrips {
        schema,
        ..ParsedTrips::default()
    };

    for result in rdr.records() {
        let record = match result {
            Ok(row) => {
                let line = row.position().map_or(0, |p| p.line());
                let trip: Result<CsvTrip, csv::Error> = row.deserialize(Some(&headers));
                trip.map_err(|err| malformed(line, err.to_string()))
                    .and_then(|trip| to_record(trip, line))
            }
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                Err(malformed(line, err.to_string()))
            }
        };

        match record {
            Ok(trip) => parsed.records.push(trip),
            Err(err) => {
                if parse_debug_enabled() {
                    eprintln!("Skipping row in {source_name}: {err}");
                }
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::Weekday;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    #[test]
    fn parses_city_with_optional_columns() {
        let parsed = parse_trips(CHICAGO.as_bytes(), "chicago.csv").unwrap();
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.skipped, 0);
        assert!(parsed.schema.has_gender);
        assert!(parsed.schema.has_birth_year);

        let first = &parsed.records[0];
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.end_station, "Damen Ave & Chicago Ave");
        assert_eq!(first.trip_duration_seconds, 321.0);
        assert_eq!(first.user_type, Some(UserType::Subscriber));
        assert_eq!(first.gender, Some(Gender::Male));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.hour, 15);
        assert_eq!(first.month, 6);
        assert_eq!(first.day_of_week, Weekday::Fri);
        assert_eq!(first.end_time, "2017-06-23 15:14:53");

        let third = &parsed.records[2];
        assert_eq!(third.user_type, Some(UserType::Customer));
        assert_eq!(third.gender, None);
        assert_eq!(third.birth_year, None);
    }

    #[test]
    fn parses_city_without_optional_columns() {
        let parsed = parse_trips(WASHINGTON.as_bytes(), "washington.csv").unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.schema, Schema::default());
        assert_eq!(parsed.records[0].trip_duration_seconds, 489.066);
        assert!(parsed.records.iter().all(|r| r.gender.is_none()));
    }

    #[test]
    fn preserves_source_order() {
        let parsed = parse_trips(CHICAGO.as_bytes(), "chicago.csv").unwrap();
        let months: Vec<_> = parsed.records.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![6, 5, 1]);
    }

    #[test]
    fn skips_and_counts_malformed_rows() {
        let data = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,2017-01-01 00:20:53,776,A,B,Subscriber
not a time,2017-01-01 00:20:53,776,A,B,Subscriber
2017-01-01 00:07:57,2017-01-01 00:20:53,forever,A,B,Subscriber
2017-01-01 00:07:57,2017-01-01 00:20:53,-5,A,B,Subscriber
2017-01-02 09:00:00,2017-01-02 09:10:00,600,B,A,Customer
";
        let parsed = parse_trips(data.as_bytes(), "test.csv").unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 3);
        assert_eq!(parsed.records[1].start_station, "B");
    }

    #[test]
    fn short_rows_are_skipped_not_fatal() {
        let data = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,2017-01-01 00:20:53
2017-01-02 09:00:00,2017-01-02 09:10:00,600,B,A,Customer
";
        let parsed = parse_trips(data.as_bytes(), "test.csv").unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let data = "Start Time,End Time,Start Station,End Station,User Type\n";
        let err = parse_trips(data.as_bytes(), "broken.csv").unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingColumn {
                column: "Trip Duration",
                ..
            }
        ));
    }

    #[test]
    fn empty_file_has_no_records() {
        let data = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n";
        let parsed = parse_trips(data.as_bytes(), "empty.csv").unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn birth_year_parsing() {
        assert_eq!(parse_birth_year(Some("1992.0")), Some(1992));
        assert_eq!(parse_birth_year(Some("1985")), Some(1985));
        assert_eq!(parse_birth_year(Some(" ")), None);
        assert_eq!(parse_birth_year(Some("1992.5")), None);
        assert_eq!(parse_birth_year(Some("unknown")), None);
        assert_eq!(parse_birth_year(None), None);
    }
}
