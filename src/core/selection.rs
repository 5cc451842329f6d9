//! Validated filter selection
//!
//! Raw user input (city, month, day) only enters the pipeline through the
//! parsers here, so every later lookup works on a checked value.

use chrono::Weekday;

use crate::error::AppError;
use crate::utils::weekday_name;

/// Months covered by the source datasets, in calendar order.
/// The trip data only spans January..June, so later months are not selectable.
pub(crate) const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const ALL: &str = "all";

fn normalize(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub(crate) const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Case-insensitive lookup against the fixed city set
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let key = normalize(input);
        City::ALL
            .into_iter()
            .find(|city| city.key() == key)
            .ok_or_else(|| AppError::UnknownCity {
                input: input.trim().to_string(),
            })
    }

    pub(crate) fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MonthFilter {
    #[default]
    All,
    /// 1-based calendar month, always within `1..=MONTHS.len()`
    Month(u32),
}

impl MonthFilter {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let key = normalize(input);
        if key == ALL {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .iter()
            .position(|m| *m == key)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| AppError::InvalidSelection {
                field: "month",
                input: input.trim().to_string(),
                expected: "january, february, march, april, may, june or all",
            })
    }

    pub(crate) fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            MonthFilter::All => ALL,
            MonthFilter::Month(m) => MONTHS[(m - 1) as usize],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let key = normalize(input);
        if key == ALL {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).eq_ignore_ascii_case(&key))
            .map(DayFilter::Day)
            .ok_or_else(|| AppError::InvalidSelection {
                field: "day",
                input: input.trim().to_string(),
                expected: "a full weekday name (monday..sunday) or all",
            })
    }

    pub(crate) fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == day,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            DayFilter::All => ALL,
            DayFilter::Day(d) => weekday_name(d),
        }
    }
}

/// A city plus the two optional filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FilterSelection {
    pub(crate) city: City,
    pub(crate) month: MonthFilter,
    pub(crate) day: DayFilter,
}

impl FilterSelection {
    pub(crate) fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Validate all three raw values; the first invalid one is reported
    pub(crate) fn parse(city: &str, month: &str, day: &str) -> Result<Self, AppError> {
        Ok(Self {
            city: City::parse(city)?,
            month: MonthFilter::parse(month)?,
            day: DayFilter::parse(day)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_parse_is_case_insensitive() {
        assert_eq!(City::parse("Chicago").unwrap(), City::Chicago);
        assert_eq!(City::parse("NEW YORK CITY").unwrap(), City::NewYorkCity);
        assert_eq!(City::parse("  washington ").unwrap(), City::Washington);
        assert_eq!(City::parse("new  york   city").unwrap(), City::NewYorkCity);
    }

    #[test]
    fn city_parse_rejects_unknown() {
        let err = City::parse("Boston").unwrap_err();
        assert!(matches!(err, AppError::UnknownCity { ref input } if input == "Boston"));
    }

    #[test]
    fn month_parse_maps_to_one_based_index() {
        assert_eq!(MonthFilter::parse("january").unwrap(), MonthFilter::Month(1));
        assert_eq!(MonthFilter::parse("March").unwrap(), MonthFilter::Month(3));
        assert_eq!(MonthFilter::parse("JUNE").unwrap(), MonthFilter::Month(6));
        assert_eq!(MonthFilter::parse("all").unwrap(), MonthFilter::All);
    }

    #[test]
    fn month_parse_rejects_second_half_of_year() {
        for m in ["july", "december", "jan", ""] {
            let err = MonthFilter::parse(m).unwrap_err();
            assert!(matches!(err, AppError::InvalidSelection { field: "month", .. }));
        }
    }

    #[test]
    fn month_filter_matches_and_labels() {
        assert!(MonthFilter::All.matches(11));
        assert!(MonthFilter::Month(3).matches(3));
        assert!(!MonthFilter::Month(3).matches(4));
        assert_eq!(MonthFilter::Month(5).label(), "may");
        assert_eq!(MonthFilter::All.label(), "all");
    }

    #[test]
    fn day_parse_accepts_full_names_only() {
        assert_eq!(DayFilter::parse("monday").unwrap(), DayFilter::Day(Weekday::Mon));
        assert_eq!(DayFilter::parse("Sunday").unwrap(), DayFilter::Day(Weekday::Sun));
        assert_eq!(DayFilter::parse("ALL").unwrap(), DayFilter::All);
        assert!(DayFilter::parse("mon").is_err());
        assert!(DayFilter::parse("funday").is_err());
    }

    #[test]
    fn day_filter_label_is_title_case() {
        assert_eq!(DayFilter::Day(Weekday::Wed).label(), "Wednesday");
        assert!(DayFilter::Day(Weekday::Wed).matches(Weekday::Wed));
        assert!(!DayFilter::Day(Weekday::Wed).matches(Weekday::Thu));
    }

    #[test]
    fn selection_parse_reports_first_invalid_field() {
        let sel = FilterSelection::parse("chicago", "march", "monday").unwrap();
        assert_eq!(sel.city, City::Chicago);
        assert_eq!(sel.month, MonthFilter::Month(3));
        assert_eq!(sel.day, DayFilter::Day(Weekday::Mon));

        assert!(matches!(
            FilterSelection::parse("paris", "march", "monday"),
            Err(AppError::UnknownCity { .. })
        ));
        assert!(matches!(
            FilterSelection::parse("chicago", "march", "someday"),
            Err(AppError::InvalidSelection { field: "day", .. })
        ));
    }
}
