use std::io;

use crate::cli::{Cli, Commands};
use crate::core::{FilterSelection, ReportSelection, compute_reports};
use crate::error::AppError;
use crate::output::{
    NumberFormat, RawTableOptions, ReportTableOptions, SummaryOptions, output_reports_json,
    output_rows_json, print_report_tables, render_raw_rows,
};
use crate::shell::{Shell, ShellOptions};
use crate::source::{DirSource, Source, load, load_by_name};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) source: &'a dyn Source,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn city(&self) -> Result<&str, AppError> {
        self.cli.city.as_deref().ok_or(AppError::MissingCity)
    }

    fn selection(&self) -> Result<FilterSelection, AppError> {
        FilterSelection::parse(self.city()?, &self.cli.month, &self.cli.day)
    }

    fn table_options(&self) -> ReportTableOptions {
        ReportTableOptions {
            use_color: self.cli.use_color(),
            number_format: self.number_format,
        }
    }
}

fn handle_reports(which: ReportSelection, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let selection = ctx.selection()?;
    let result = load(ctx.source, &selection, ctx.cli.quiet)?;
    let dataset = &result.dataset;
    let reports = compute_reports(dataset, which);

    if ctx.cli.json {
        println!(
            "{}",
            output_reports_json(&selection, dataset.len(), result.skipped, &reports)
        );
        return Ok(());
    }

    if dataset.is_empty() {
        println!(
            "No {} trips match month={} day={}.",
            dataset.city.display_name(),
            selection.month.label(),
            selection.day.label()
        );
    }
    print_report_tables(
        &reports,
        &SummaryOptions {
            matched: dataset.len(),
            skipped: result.skipped,
            elapsed_ms: Some(result.elapsed_ms),
        },
        &ctx.table_options(),
    );
    Ok(())
}

fn handle_raw(offset: usize, rows: Option<usize>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let result = load_by_name(
        ctx.source,
        ctx.city()?,
        &ctx.cli.month,
        &ctx.cli.day,
        ctx.cli.quiet,
    )?;
    let dataset = &result.dataset;
    let page = dataset.page(offset, rows.unwrap_or_else(|| ctx.cli.page_size()));

    if ctx.cli.json {
        println!("{}", output_rows_json(page, dataset.schema));
        return Ok(());
    }
    if page.is_empty() {
        println!(
            "No rows at offset {offset} ({} of {} trips match the selection).",
            dataset.len(),
            result.total
        );
        return Ok(());
    }
    print!(
        "{}",
        render_raw_rows(
            page,
            offset,
            &RawTableOptions {
                use_color: ctx.cli.use_color(),
                number_format: ctx.number_format,
                schema: dataset.schema,
            },
        )
    );
    Ok(())
}

fn handle_explore(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(
        ctx.source,
        stdin.lock(),
        stdout.lock(),
        ShellOptions {
            page_size: ctx.cli.page_size(),
            tables: ctx.table_options(),
            quiet: ctx.cli.quiet,
        },
    );
    shell.run()
}

/// Dispatch the parsed command line
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let source = DirSource::new(cli.data_dir());
    let ctx = CommandContext {
        cli,
        source: &source,
        number_format,
    };

    match cli.command.clone().unwrap_or(Commands::Stats) {
        Commands::Raw { offset, rows } => handle_raw(offset, rows, &ctx),
        Commands::Explore => handle_explore(&ctx),
        report => handle_reports(
            report.report_selection().unwrap_or_else(ReportSelection::all),
            &ctx,
        ),
    }
}
