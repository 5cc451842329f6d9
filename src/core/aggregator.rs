//! Descriptive statistics over a (filtered) dataset
//!
//! Every report is a pure pass over the records. Modes break ties by picking
//! the smallest tied value, so results never depend on record order.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::consts::COMBO_SEPARATOR;
use crate::core::types::Dataset;
use crate::utils::weekday_name;

/// Most frequent value; ties go to the value that sorts first.
/// `None` when there are no observations.
pub(crate) fn mode<K, I>(values: I) -> Option<K>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(K, usize)> = None;
    for (value, count) in counts {
        // Ascending iteration + strict comparison keeps the smallest tied value
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Round to 2 decimals, halves away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ValueCount {
    pub(crate) value: String,
    pub(crate) count: usize,
}

/// Occurrences per distinct value, most frequent first, then by name
pub(crate) fn value_counts<I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    // Stable sort keeps the BTreeMap's name order among equal counts
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TimeReport {
    pub(crate) month: Option<u32>,
    pub(crate) day_of_week: Option<&'static str>,
    pub(crate) hour: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct StationReport {
    pub(crate) start_station: Option<String>,
    pub(crate) end_station: Option<String>,
    pub(crate) trip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DurationReport {
    pub(crate) trip_count: usize,
    pub(crate) total_minutes: f64,
    pub(crate) mean_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BirthYearReport {
    pub(crate) earliest: Option<i32>,
    pub(crate) most_recent: Option<i32>,
    pub(crate) most_common: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct UserReport {
    pub(crate) user_types: Vec<ValueCount>,
    /// `None` when the city's data has no gender column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gender: Option<Vec<ValueCount>>,
    /// `None` when the city's data has no birth year column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) birth_year: Option<BirthYearReport>,
}

pub(crate) fn time_report(dataset: &Dataset) -> TimeReport {
    let records = &dataset.records;
    TimeReport {
        month: mode(records.iter().map(|r| r.month)),
        // Ties go to the alphabetically first weekday name
        day_of_week: mode(records.iter().map(|r| weekday_name(r.day_of_week))),
        hour: mode(records.iter().map(|r| r.hour)),
    }
}

pub(crate) fn station_report(dataset: &Dataset) -> StationReport {
    let records = &dataset.records;
    // Directional key: "A + B" and "B + A" are different trips
    let combos: Vec<String> = records
        .iter()
        .map(|r| format!("{}{}{}", r.start_station, COMBO_SEPARATOR, r.end_station))
        .collect();

    StationReport {
        start_station: mode(records.iter().map(|r| r.start_station.as_str())).map(str::to_string),
        end_station: mode(records.iter().map(|r| r.end_station.as_str())).map(str::to_string),
        trip: mode(combos),
    }
}

pub(crate) fn duration_report(dataset: &Dataset) -> DurationReport {
    let count = dataset.len();
    let total_seconds: f64 = dataset.records.iter().map(|r| r.trip_duration_seconds).sum();
    let mean_minutes = if count == 0 {
        None
    } else {
        Some(round2(total_seconds / count as f64 / 60.0))
    };

    DurationReport {
        trip_count: count,
        total_minutes: round2(total_seconds / 60.0),
        mean_minutes,
    }
}

pub(crate) fn user_report(dataset: &Dataset) -> UserReport {
    let records = &dataset.records;
    let user_types = value_counts(
        records
            .iter()
            .filter_map(|r| r.user_type.as_ref().map(ToString::to_string)),
    );

    let gender = dataset.schema.has_gender.then(|| {
        value_counts(
            records
                .iter()
                .filter_map(|r| r.gender.as_ref().map(ToString::to_string)),
        )
    });

    let birth_year = dataset.schema.has_birth_year.then(|| {
        let years = records.iter().filter_map(|r| r.birth_year);
        BirthYearReport {
            earliest: years.clone().min(),
            most_recent: years.clone().max(),
            most_common: mode(years),
        }
    });

    UserReport {
        user_types,
        gender,
        birth_year,
    }
}

/// Which reports to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportSelection {
    pub(crate) time: bool,
    pub(crate) stations: bool,
    pub(crate) duration: bool,
    pub(crate) users: bool,
}

impl ReportSelection {
    pub(crate) fn all() -> Self {
        Self {
            time: true,
            stations: true,
            duration: true,
            users: true,
        }
    }

    pub(crate) fn none() -> Self {
        Self {
            time: false,
            stations: false,
            duration: false,
            users: false,
        }
    }
}

/// Milliseconds spent computing each report; `None` when it was not computed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ReportTimings {
    pub(crate) time: Option<f64>,
    pub(crate) stations: Option<f64>,
    pub(crate) duration: Option<f64>,
    pub(crate) users: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Reports {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) time: Option<TimeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) stations: Option<StationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duration: Option<DurationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) users: Option<UserReport>,
    #[serde(skip)]
    pub(crate) timings: ReportTimings,
}

fn timed<T>(enabled: bool, report: impl FnOnce() -> T) -> (Option<T>, Option<f64>) {
    if !enabled {
        return (None, None);
    }
    let start = Instant::now();
    let value = report();
    (Some(value), Some(start.elapsed().as_secs_f64() * 1000.0))
}

/// Compute the selected reports concurrently over the shared dataset
pub(crate) fn compute_reports(dataset: &Dataset, which: ReportSelection) -> Reports {
    let (((time, time_ms), (stations, stations_ms)), ((duration, duration_ms), (users, users_ms))) =
        rayon::join(
            || {
                rayon::join(
                    || timed(which.time, || time_report(dataset)),
                    || timed(which.stations, || station_report(dataset)),
                )
            },
            || {
                rayon::join(
                    || timed(which.duration, || duration_report(dataset)),
                    || timed(which.users, || user_report(dataset)),
                )
            },
        );

    Reports {
        time,
        stations,
        duration,
        users,
        timings: ReportTimings {
            time: time_ms,
            stations: stations_ms,
            duration: duration_ms,
            users: users_ms,
        },
    }
}
