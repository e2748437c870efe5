//! Command-line interface of the `tabdb` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use domain::ArtistType;
use ingest::{SourceName, Sources};
use projections::stats::{DEFAULT_BINS, MAX_BINS};
use projections::{FilterCriteria, RangeInput, Selection, SortDirection};
use serde_json::json;

use crate::config::Config;
use crate::error::Result;
use crate::Session;

/// Query the tab database spreadsheets.
#[derive(Parser, Debug)]
#[command(name = "tabdb")]
#[command(about = "Filter, sort and merge the tab catalog with its play and request logs")]
#[command(version)]
pub struct Cli {
    /// Catalog CSV (tabdb)
    #[arg(long, env = "TABDB_CATALOG")]
    pub catalog: PathBuf,

    /// Play log CSV (playdb)
    #[arg(long, env = "TABDB_PLAYS")]
    pub plays: PathBuf,

    /// Request log CSV (requestdb)
    #[arg(long, env = "TABDB_REQUESTS")]
    pub requests: PathBuf,

    /// Print Prometheus metrics to stderr after the command
    #[arg(long)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter the catalog and print the enriched result
    Filter(FilterArgs),

    /// Merge the play and request logs per song
    Merge,

    /// Summary statistics of a filtered result
    Stats {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of difficulty histogram bins (1 to 1000)
        #[arg(
            long,
            default_value_t = DEFAULT_BINS as u16,
            value_parser = clap::value_parser!(u16).range(1..=MAX_BINS as i64)
        )]
        bins: u16,
    },

    /// Distinct values of a catalog column
    Options {
        /// Column name, e.g. language or tabber
        column: String,
    },
}

/// Filter flags shared by `filter` and `stats`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Year range as "start,end"
    #[arg(long)]
    pub year: Option<String>,

    /// Difficulty range as "min,max"
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Tab date range as "start,end" (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Language to keep; repeat for several
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Gender to keep; repeat for several
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Tabber to keep; repeat for several
    #[arg(long = "tabber")]
    pub tabbers: Vec<String>,

    /// Source to keep; repeat for several
    #[arg(long = "source")]
    pub sources: Vec<String>,

    /// Artist type (Group or Person)
    #[arg(long = "type")]
    pub artist_type: Option<ArtistType>,

    /// Column to sort the result by, replacing the date order
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort_by")]
    pub descending: bool,
}

impl FilterArgs {
    /// Builds the filter criteria from the flags.
    pub fn criteria(&self) -> FilterCriteria {
        let range = |text: &Option<String>| {
            text.as_deref()
                .map(RangeInput::parse_pair)
                .unwrap_or_default()
        };
        FilterCriteria {
            year: range(&self.year),
            difficulty: range(&self.difficulty),
            date: range(&self.date),
            languages: Selection::of(self.languages.iter().cloned()),
            genders: Selection::of(self.genders.iter().cloned()),
            tabbers: Selection::of(self.tabbers.iter().cloned()),
            sources: Selection::of(self.sources.iter().cloned()),
            artist_type: self.artist_type,
        }
    }

    fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

impl Cli {
    /// The three source paths as loader input.
    pub fn sources(&self) -> Sources {
        Sources::new()
            .path(SourceName::Catalog, &self.catalog)
            .path(SourceName::Plays, &self.plays)
            .path(SourceName::Requests, &self.requests)
    }
}

/// Loads the sources and runs one command, returning its JSON output.
pub fn run(cli: &Cli, config: &Config) -> Result<String> {
    let mut session = Session::new();
    session.load(cli.sources(), &config.required_columns())?;
    execute(&mut session, &cli.command)
}

/// Runs one command against a loaded session.
pub fn execute(session: &mut Session, command: &Command) -> Result<String> {
    let output = match command {
        Command::Filter(args) => {
            apply_filter(session, args)?;
            match session.current_result() {
                Some(outcome) => serde_json::to_value(outcome)?,
                None => serde_json::Value::Null,
            }
        }
        Command::Merge => {
            let table = session.merge_all()?;
            json!({ "columns": table.columns(), "rows": table.rows() })
        }
        Command::Stats { filter, bins } => {
            apply_filter(session, filter)?;
            serde_json::to_value(session.summary(usize::from(*bins))?)?
        }
        Command::Options { column } => serde_json::to_value(session.distinct_values(column)?)?,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn apply_filter(session: &mut Session, args: &FilterArgs) -> Result<()> {
    let row_count = session.filter(&args.criteria())?.row_count;
    if row_count > 0 && args.sort_by.is_some() {
        session.sort(args.sort_by.as_deref(), args.direction())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_filter_flags_into_criteria() {
        let cli = Cli::try_parse_from([
            "tabdb",
            "--catalog",
            "tabdb.csv",
            "--plays",
            "playdb.csv",
            "--requests",
            "requestdb.csv",
            "filter",
            "--year",
            "2000,2010",
            "--gender",
            "female",
            "--language",
            "spanish,english",
            "--type",
            "group",
            "--sort-by",
            "difficulty",
            "--descending",
        ])
        .unwrap();

        let Command::Filter(args) = &cli.command else {
            panic!("expected filter command, got {:?}", cli.command);
        };
        let criteria = args.criteria();
        assert_eq!(criteria.year, RangeInput::new("2000", "2010"));
        assert_eq!(criteria.genders, Selection::of(["female"]));
        assert_eq!(criteria.languages, Selection::of(["spanish,english"]));
        assert_eq!(criteria.artist_type, Some(ArtistType::Group));
        assert_eq!(args.direction(), SortDirection::Descending);
    }

    #[test]
    fn test_descending_requires_a_sort_column() {
        let result = Cli::try_parse_from([
            "tabdb",
            "--catalog",
            "a",
            "--plays",
            "b",
            "--requests",
            "c",
            "filter",
            "--descending",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_defaults_to_five_bins() {
        let cli = Cli::try_parse_from([
            "tabdb",
            "--catalog",
            "a",
            "--plays",
            "b",
            "--requests",
            "c",
            "stats",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Stats { bins: 5, .. }));
    }

    #[test]
    fn test_bins_outside_the_supported_range_are_rejected() {
        for bins in ["0", "1001", "18446744073709551615"] {
            let result = Cli::try_parse_from([
                "tabdb",
                "--catalog",
                "a",
                "--plays",
                "b",
                "--requests",
                "c",
                "stats",
                "--bins",
                bins,
            ]);
            assert!(result.is_err(), "--bins {bins} was accepted");
        }
    }

    #[test]
    fn test_empty_flags_mean_no_constraints() {
        assert_eq!(FilterArgs::default().criteria(), FilterCriteria::new());
    }
}
