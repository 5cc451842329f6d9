//! Core module - trip data model, selection, filtering and statistics

mod aggregator;
mod pager;
mod selection;
mod types;

pub(crate) use aggregator::{
    BirthYearReport, DurationReport, ReportSelection, ReportTimings, Reports, StationReport,
    TimeReport, UserReport, ValueCount, compute_reports,
};
pub(crate) use pager::RowPager;
pub(crate) use selection::{City, DayFilter, FilterSelection, MonthFilter};
pub(crate) use types::{Dataset, Gender, LoadResult, Schema, TripRecord, UserType};
