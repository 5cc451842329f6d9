//! Interactive explorer
//!
//! Prompts until each answer is valid, prints the reports, pages through raw
//! rows on request and offers to start over. Generic over its input and
//! output so it can be driven from tests.

use std::io::{BufRead, Write};

use crate::core::{
    City, DayFilter, FilterSelection, MonthFilter, ReportSelection, RowPager, compute_reports,
};
use crate::error::AppError;
use crate::output::{
    RawTableOptions, ReportTableOptions, SummaryOptions, render_raw_rows, render_report_tables,
    render_summary_line,
};
use crate::source::{Source, load};

const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ShellOptions {
    pub(crate) page_size: usize,
    pub(crate) tables: ReportTableOptions,
    pub(crate) quiet: bool,
}

pub(crate) struct Shell<'a, R, W> {
    source: &'a dyn Source,
    input: R,
    output: W,
    opts: ShellOptions,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub(crate) fn new(source: &'a dyn Source, input: R, output: W, opts: ShellOptions) -> Self {
        Self {
            source,
            input,
            output,
            opts,
        }
    }

    /// Run sessions until the user declines to restart or input ends
    pub(crate) fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        loop {
            let Some(selection) = self.prompt_selection()? else {
                return Ok(());
            };
            writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;

            match load(self.source, &selection, self.opts.quiet) {
                Ok(result) => {
                    let dataset = result.dataset;
                    let reports = compute_reports(&dataset, ReportSelection::all());
                    write!(
                        self.output,
                        "{}",
                        render_report_tables(&reports, &self.opts.tables)
                    )?;
                    write!(
                        self.output,
                        "{}",
                        render_summary_line(
                            &SummaryOptions {
                                matched: dataset.len(),
                                skipped: result.skipped,
                                elapsed_ms: Some(result.elapsed_ms),
                            },
                            self.opts.tables.number_format,
                            self.opts.tables.use_color,
                        )
                    )?;
                    writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;

                    let raw_opts = RawTableOptions {
                        use_color: self.opts.tables.use_color,
                        number_format: self.opts.tables.number_format,
                        schema: dataset.schema,
                    };
                    let mut pager = RowPager::new(self.opts.page_size);
                    loop {
                        if pager.is_exhausted(&dataset) {
                            writeln!(self.output, "\nNo more rows to show.")?;
                            break;
                        }
                        let Some(answer) =
                            self.ask("Would you like to see some of the raw data? Answer yes or no.")?
                        else {
                            return Ok(());
                        };
                        if answer.eq_ignore_ascii_case("no") {
                            break;
                        }
                        let offset = pager.offset();
                        let page = pager.next_page(&dataset);
                        write!(self.output, "{}", render_raw_rows(page, offset, &raw_opts))?;
                    }
                }
                Err(err) => {
                    writeln!(self.output, "\nCould not load {}: {err}", selection.city.display_name())?;
                }
            }

            match self.ask("Would you like to restart? Enter yes or no.")? {
                Some(answer) if answer.eq_ignore_ascii_case("yes") => continue,
                _ => return Ok(()),
            }
        }
    }

    fn prompt_selection(&mut self) -> Result<Option<FilterSelection>, AppError> {
        let Some(city) = self.ask_until(
            "Choose a city to explore! (Chicago, New York City, Washington):",
            "Please choose one of: Chicago, New York City, Washington.",
            City::parse,
        )?
        else {
            return Ok(None);
        };
        let Some(month) = self.ask_until(
            "Choose a month in the first half of the year, or choose all:",
            "Spell out the month's full name (January to June), or choose all.",
            MonthFilter::parse,
        )?
        else {
            return Ok(None);
        };
        let Some(day) = self.ask_until(
            "Choose a day of the week to focus on, or choose all:",
            "Spell out the weekday's full name, or choose all.",
            DayFilter::parse,
        )?
        else {
            return Ok(None);
        };
        Ok(Some(FilterSelection::new(city, month, day)))
    }

    /// Ask until `parse` accepts the answer; `None` on end of input
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        hint: &str,
        parse: impl Fn(&str) -> Result<T, AppError>,
    ) -> Result<Option<T>, AppError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "{err}. {hint}")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        writeln!(self.output, "\n{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
