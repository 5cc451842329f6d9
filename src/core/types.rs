//! Core trip data model
//!
//! Records carry their derived temporal fields, computed once at load time.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;

use crate::core::selection::{City, FilterSelection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UserType {
    Subscriber,
    Customer,
    /// Any other label found in the data (e.g. "Dependent")
    Other(String),
}

impl UserType {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            "Subscriber" => Some(UserType::Subscriber),
            "Customer" => Some(UserType::Customer),
            other => Some(UserType::Other(other.to_string())),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Subscriber => f.write_str("Subscriber"),
            UserType::Customer => f.write_str("Customer"),
            UserType::Other(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            other => Some(Gender::Other(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
            Gender::Other(label) => f.write_str(label),
        }
    }
}

/// One bikeshare trip
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TripRecord {
    pub(crate) start_time: NaiveDateTime,
    /// Kept verbatim; only shown in raw rows
    pub(crate) end_time: String,
    pub(crate) trip_duration_seconds: f64,
    pub(crate) start_station: String,
    pub(crate) end_station: String,
    pub(crate) user_type: Option<UserType>,
    pub(crate) gender: Option<Gender>,
    pub(crate) birth_year: Option<i32>,
    /// Derived from `start_time`
    pub(crate) hour: u32,
    pub(crate) month: u32,
    pub(crate) day_of_week: Weekday,
}

impl TripRecord {
    pub(crate) fn new(
        start_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        TripRecord {
            start_time,
            end_time: String::new(),
            trip_duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            hour: start_time.hour(),
            month: start_time.month(),
            day_of_week: start_time.weekday(),
        }
    }
}

/// Which optional columns a city's file carries.
/// Decided once from the header, never per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Schema {
    pub(crate) has_gender: bool,
    pub(crate) has_birth_year: bool,
}

/// Ordered trips for one city, as stored in the source
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dataset {
    pub(crate) city: City,
    pub(crate) schema: Schema,
    pub(crate) records: Vec<TripRecord>,
}

impl Dataset {
    pub(crate) fn new(city: City, schema: Schema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only the records matching the selection's month and day.
    /// Source order is preserved and re-applying the same selection is a no-op.
    pub(crate) fn filtered(self, selection: &FilterSelection) -> Self {
        let Dataset {
            city,
            schema,
            mut records,
        } = self;
        records.retain(|r| selection.month.matches(r.month) && selection.day.matches(r.day_of_week));
        Dataset {
            city,
            schema,
            records,
        }
    }

    /// Rows `[offset, offset + len)`, clamped to the dataset
    pub(crate) fn page(&self, offset: usize, len: usize) -> &[TripRecord] {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(len).min(self.records.len());
        &self.records[start..end]
    }
}

/// Loading result with statistics
#[derive(Debug)]
pub(crate) struct LoadResult {
    pub(crate) dataset: Dataset,
    /// Rows dropped because a timestamp or duration could not be parsed
    pub(crate) skipped: u64,
    /// Rows read from the source before filtering
    pub(crate) total: usize,
    pub(crate) elapsed_ms: f64,
}
