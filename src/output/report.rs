//! Table rendering for the four statistics reports

use comfy_table::{Cell, Color, Table};
use std::fmt::Write;

use crate::core::{
    BirthYearReport, DurationReport, ReportTimings, Reports, StationReport, TimeReport,
    UserReport, ValueCount,
};
use crate::output::format::{
    NumberFormat, create_styled_table, format_count, format_decimal, format_number, header_cell,
    or_undefined, right_cell, styled_cell,
};
use crate::utils::month_name;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportTableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions {
    pub(crate) matched: usize,
    pub(crate) skipped: u64,
    pub(crate) elapsed_ms: Option<f64>,
}

fn stat_table(opts: &ReportTableOptions) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Statistic", opts.use_color),
        header_cell("Value", opts.use_color),
    ]);
    table
}

fn stat_row(table: &mut Table, label: &str, value: String) {
    table.add_row(vec![Cell::new(label), right_cell(&value, None, false)]);
}

fn push_section(out: &mut String, title: &str, table: &Table) {
    let _ = writeln!(out, "\n  {title}\n");
    let _ = writeln!(out, "{table}");
}

fn render_time(out: &mut String, report: &TimeReport, opts: &ReportTableOptions) {
    let mut table = stat_table(opts);
    let month = report
        .month
        .map(|m| month_name(m).map_or_else(|| m.to_string(), str::to_string));
    stat_row(&mut table, "Most common month", or_undefined(month));
    stat_row(&mut table, "Most common day of week", or_undefined(report.day_of_week));
    stat_row(
        &mut table,
        "Most common start hour",
        or_undefined(report.hour.map(|h| format!("{h:02}:00"))),
    );
    push_section(out, "Most Frequent Times of Travel", &table);
}

fn render_stations(out: &mut String, report: &StationReport, opts: &ReportTableOptions) {
    let mut table = stat_table(opts);
    stat_row(
        &mut table,
        "Most common start station",
        or_undefined(report.start_station.as_deref()),
    );
    stat_row(
        &mut table,
        "Most common end station",
        or_undefined(report.end_station.as_deref()),
    );
    stat_row(&mut table, "Most common trip", or_undefined(report.trip.as_deref()));
    push_section(out, "Most Popular Stations and Trip", &table);
}

fn render_duration(out: &mut String, report: &DurationReport, opts: &ReportTableOptions) {
    let nf = opts.number_format;
    let mut table = stat_table(opts);
    stat_row(&mut table, "Trips", format_count(report.trip_count, nf));
    stat_row(
        &mut table,
        "Total travel time (min)",
        format_decimal(report.total_minutes, nf),
    );
    stat_row(
        &mut table,
        "Mean travel time (min)",
        or_undefined(report.mean_minutes.map(|m| format_decimal(m, nf))),
    );
    push_section(out, "Trip Duration", &table);
}

fn count_table(
    label: &str,
    counts: &[ValueCount],
    opts: &ReportTableOptions,
) -> Table {
    let nf = opts.number_format;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(label, opts.use_color),
        header_cell("Trips", opts.use_color),
    ]);
    for entry in counts {
        table.add_row(vec![
            Cell::new(&entry.value),
            right_cell(&format_count(entry.count, nf), None, false),
        ]);
    }

    let cyan = if opts.use_color { Some(Color::Cyan) } else { None };
    let total: usize = counts.iter().map(|c| c.count).sum();
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        right_cell(&format_count(total, nf), cyan, true),
    ]);
    table
}

fn birth_year_table(report: &BirthYearReport, opts: &ReportTableOptions) -> Table {
    let mut table = stat_table(opts);
    stat_row(&mut table, "Earliest birth year", or_undefined(report.earliest));
    stat_row(&mut table, "Most recent birth year", or_undefined(report.most_recent));
    stat_row(&mut table, "Most common birth year", or_undefined(report.most_common));
    table
}

fn render_users(out: &mut String, report: &UserReport, opts: &ReportTableOptions) {
    push_section(
        out,
        "User Types",
        &count_table("User Type", &report.user_types, opts),
    );
    // Sections for columns the city does not have are omitted entirely
    if let Some(gender) = &report.gender {
        push_section(out, "Gender", &count_table("Gender", gender, opts));
    }
    if let Some(years) = &report.birth_year {
        push_section(out, "Birth Year", &birth_year_table(years, opts));
    }
}

fn push_elapsed(out: &mut String, elapsed_ms: Option<f64>) {
    if let Some(ms) = elapsed_ms {
        let _ = writeln!(out, "  This took {ms:.2}ms");
    }
}

pub(crate) fn render_report_tables(reports: &Reports, opts: &ReportTableOptions) -> String {
    let ReportTimings {
        time: time_ms,
        stations: stations_ms,
        duration: duration_ms,
        users: users_ms,
    } = reports.timings;

    let mut out = String::new();
    if let Some(time) = &reports.time {
        render_time(&mut out, time, opts);
        push_elapsed(&mut out, time_ms);
    }
    if let Some(stations) = &reports.stations {
        render_stations(&mut out, stations, opts);
        push_elapsed(&mut out, stations_ms);
    }
    if let Some(duration) = &reports.duration {
        render_duration(&mut out, duration, opts);
        push_elapsed(&mut out, duration_ms);
    }
    if let Some(users) = &reports.users {
        render_users(&mut out, users, opts);
        push_elapsed(&mut out, users_ms);
    }
    out
}

/// Summary line with optional timing
pub(crate) fn render_summary_line(
    summary: &SummaryOptions,
    number_format: NumberFormat,
    use_color: bool,
) -> String {
    let stats_text = format!(
        "{} trips matched ({} malformed rows skipped)",
        format_count(summary.matched, number_format),
        format_number(i64::try_from(summary.skipped).unwrap_or(i64::MAX), number_format)
    );

    match summary.elapsed_ms {
        Some(ms) if use_color => format!("\n  {stats_text} | \x1b[36m{ms:.0}ms\x1b[0m\n"),
        Some(ms) => format!("\n  {stats_text} | {ms:.0}ms\n"),
        None => format!("\n  {stats_text}\n"),
    }
}

pub(crate) fn print_report_tables(
    reports: &Reports,
    summary: &SummaryOptions,
    opts: &ReportTableOptions,
) {
    print!("{}", render_report_tables(reports, opts));
    println!(
        "{}",
        render_summary_line(summary, opts.number_format, opts.use_color)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportSelection;

    fn opts() -> ReportTableOptions {
        ReportTableOptions {
            use_color: false,
            number_format: NumberFormat::default(),
        }
    }

    fn sample_reports(gender: Option<Vec<ValueCount>>) -> Reports {
        Reports {
            time: Some(TimeReport {
                month: Some(3),
                day_of_week: Some("Monday"),
                hour: Some(8),
            }),
            stations: Some(StationReport {
                start_station: Some("A".into()),
                end_station: Some("B".into()),
                trip: Some("A + B".into()),
            }),
            duration: Some(DurationReport {
                trip_count: 2,
                total_minutes: 5.0,
                mean_minutes: Some(2.5),
            }),
            users: Some(UserReport {
                user_types: vec![ValueCount {
                    value: "Subscriber".into(),
                    count: 1200,
                }],
                gender,
                birth_year: None,
            }),
            timings: ReportTimings::default(),
        }
    }

    #[test]
    fn renders_all_sections() {
        let out = render_report_tables(&sample_reports(None), &opts());
        assert!(out.contains("Most Frequent Times of Travel"));
        assert!(out.contains("March"));
        assert!(out.contains("Monday"));
        assert!(out.contains("08:00"));
        assert!(out.contains("A + B"));
        assert!(out.contains("5.00"));
        assert!(out.contains("2.50"));
        assert!(out.contains("1,200"));
    }

    #[test]
    fn renders_report_timings_under_sections() {
        let mut reports = sample_reports(None);
        reports.timings = ReportTimings {
            time: Some(1.5),
            users: Some(0.25),
            ..ReportTimings::default()
        };
        let out = render_report_tables(&reports, &opts());
        assert!(out.contains("This took 1.50ms"));
        assert!(out.contains("This took 0.25ms"));
        assert_eq!(out.matches("This took").count(), 2);

        let untimed = render_report_tables(&sample_reports(None), &opts());
        assert!(!untimed.contains("This took"));
    }

    #[test]
    fn omits_gender_section_when_absent() {
        let out = render_report_tables(&sample_reports(None), &opts());
        assert!(!out.contains("Gender"));
        assert!(!out.contains("Birth Year"));

        let with_gender = render_report_tables(&sample_reports(Some(Vec::new())), &opts());
        assert!(with_gender.contains("Gender"));
    }

    #[test]
    fn renders_undefined_for_empty_selection() {
        let reports = Reports {
            time: Some(TimeReport {
                month: None,
                day_of_week: None,
                hour: None,
            }),
            stations: None,
            duration: Some(DurationReport {
                trip_count: 0,
                total_minutes: 0.0,
                mean_minutes: None,
            }),
            users: None,
            timings: ReportTimings::default(),
        };
        let out = render_report_tables(&reports, &opts());
        assert!(out.contains("undefined"));
        assert!(out.contains("0.00"));
        assert!(!out.contains("Most Popular Stations"));
    }

    #[test]
    fn nothing_selected_renders_nothing() {
        let reports = crate::core::compute_reports(
            &crate::core::Dataset::new(
                crate::core::City::Chicago,
                crate::core::Schema::default(),
                Vec::new(),
            ),
            ReportSelection::none(),
        );
        assert!(render_report_tables(&reports, &opts()).is_empty());
    }

    #[test]
    fn summary_line_counts() {
        let line = render_summary_line(
            &SummaryOptions {
                matched: 1234,
                skipped: 2,
                elapsed_ms: None,
            },
            NumberFormat::default(),
            false,
        );
        assert_eq!(line, "\n  1,234 trips matched (2 malformed rows skipped)\n");
    }
}
