//! CLI subcommand definitions

use clap::Subcommand;

use crate::core::ReportSelection;

/// Main CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Show all statistics for the selection (default)
    Stats,
    /// Most frequent month, weekday and start hour
    Time,
    /// Most popular start station, end station and trip
    Stations,
    /// Total and mean trip duration
    Duration,
    /// User type, gender and birth year breakdown
    Users,
    /// Print raw trip rows
    Raw {
        /// Index of the first row to print
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Number of rows to print (defaults to the configured page size)
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },
    /// Interactive explorer: prompts for city, month and day
    Explore,
}

impl Commands {
    /// Reports computed by this command, `None` for non-report commands
    pub(crate) fn report_selection(&self) -> Option<ReportSelection> {
        let none = ReportSelection::none();
        match self {
            Commands::Stats => Some(ReportSelection::all()),
            Commands::Time => Some(ReportSelection { time: true, ..none }),
            Commands::Stations => Some(ReportSelection {
                stations: true,
                ..none
            }),
            Commands::Duration => Some(ReportSelection {
                duration: true,
                ..none
            }),
            Commands::Users => Some(ReportSelection { users: true, ..none }),
            Commands::Raw { .. } | Commands::Explore => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_selects_everything() {
        assert_eq!(
            Commands::Stats.report_selection(),
            Some(ReportSelection::all())
        );
    }

    #[test]
    fn single_report_commands_select_one() {
        let time = Commands::Time.report_selection().unwrap();
        assert!(time.time && !time.stations && !time.duration && !time.users);
        let users = Commands::Users.report_selection().unwrap();
        assert!(users.users && !users.time);
    }

    #[test]
    fn raw_and_explore_are_not_reports() {
        assert!(
            Commands::Raw {
                offset: 0,
                rows: None
            }
            .report_selection()
            .is_none()
        );
        assert!(Commands::Explore.report_selection().is_none());
    }
}
