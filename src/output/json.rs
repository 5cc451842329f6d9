use serde::Serialize;

use crate::consts::TIMESTAMP_FORMAT;
use crate::core::{FilterSelection, Reports, Schema, TripRecord};

#[derive(Serialize)]
struct ReportDocument<'a> {
    city: &'static str,
    month: &'static str,
    day: &'static str,
    trips: usize,
    skipped_rows: u64,
    #[serde(flatten)]
    reports: &'a Reports,
}

pub(crate) fn output_reports_json(
    selection: &FilterSelection,
    matched: usize,
    skipped: u64,
    reports: &Reports,
) -> String {
    let doc = ReportDocument {
        city: selection.city.key(),
        month: selection.month.label(),
        day: selection.day.label(),
        trips: matched,
        skipped_rows: skipped,
        reports,
    };
    serde_json::to_string_pretty(&doc).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}

fn trip_json(trip: &TripRecord, schema: Schema) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "start_time": trip.start_time.format(TIMESTAMP_FORMAT).to_string(),
        "end_time": trip.end_time,
        "trip_duration": trip.trip_duration_seconds,
        "start_station": trip.start_station,
        "end_station": trip.end_station,
        "user_type": trip.user_type.as_ref().map(ToString::to_string),
    });
    if schema.has_gender {
        obj["gender"] = serde_json::json!(trip.gender.as_ref().map(ToString::to_string));
    }
    if schema.has_birth_year {
        obj["birth_year"] = serde_json::json!(trip.birth_year);
    }
    obj
}

pub(crate) fn output_rows_json(rows: &[TripRecord], schema: Schema) -> String {
    let output: Vec<serde_json::Value> = rows.iter().map(|t| trip_json(t, schema)).collect();
    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "[]".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        City, DayFilter, DurationReport, Gender, MonthFilter, ReportTimings, UserType,
    };
    use chrono::NaiveDate;

    fn selection() -> FilterSelection {
        FilterSelection::new(City::NewYorkCity, MonthFilter::Month(2), DayFilter::All)
    }

    #[test]
    fn report_json_includes_selection_and_selected_reports() {
        let reports = Reports {
            time: None,
            stations: None,
            duration: Some(DurationReport {
                trip_count: 0,
                total_minutes: 0.0,
                mean_minutes: None,
            }),
            users: None,
            timings: ReportTimings {
                duration: Some(0.4),
                ..ReportTimings::default()
            },
        };
        let json = output_reports_json(&selection(), 0, 3, &reports);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["city"], "new york city");
        assert_eq!(value["month"], "february");
        assert_eq!(value["day"], "all");
        assert_eq!(value["skipped_rows"], 3);
        assert!(value["duration"]["mean_minutes"].is_null());
        assert!(value.get("time").is_none());
        assert!(value.get("timings").is_none());
    }

    #[test]
    fn rows_json_follows_schema() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 7, 57)
            .unwrap();
        let mut trip = TripRecord::new(start, 776.0, "A", "B");
        trip.user_type = Some(UserType::Customer);
        trip.gender = Some(Gender::Female);

        let without: serde_json::Value =
            serde_json::from_str(&output_rows_json(&[trip.clone()], Schema::default())).unwrap();
        assert_eq!(without[0]["start_time"], "2017-01-01 00:07:57");
        assert_eq!(without[0]["user_type"], "Customer");
        assert!(without[0].get("gender").is_none());

        let schema = Schema {
            has_gender: true,
            has_birth_year: true,
        };
        let with: serde_json::Value =
            serde_json::from_str(&output_rows_json(&[trip], schema)).unwrap();
        assert_eq!(with[0]["gender"], "Female");
        assert!(with[0]["birth_year"].is_null());
    }
}
