//! Command-line argument definitions for the METAR processor
//!
//! Defines the CLI interface using the clap derive API.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the METAR processor
///
/// Parses raw METAR aviation weather reports into structured JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-processor",
    version,
    about = "Parse METAR aviation weather reports into structured data",
    long_about = "Parses raw METAR reports (WMO and US variants, AUTO and COR reports, CAVOK) \
                  into typed structures and prints them as JSON or as a flat key/value projection."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a JSON configuration file
    ///
    /// Defaults to <config dir>/metar-processor/config.json when that file exists.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    /// Enable verbose logging (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single report given on the command line or on stdin
    Parse(ParseArgs),
    /// Parse a file holding one report per line
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Observation time (RFC 3339); defaults to now
    #[arg(long = "time", value_name = "RFC3339", value_parser = parse_observation_time)]
    pub time: Option<DateTime<Utc>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Print the state transitions taken while parsing
    #[arg(long)]
    pub trace: bool,

    /// Report tokens; read from stdin when omitted
    #[arg(
        value_name = "REPORT",
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub report: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// File with one report per line. Lines of the form `YYYY/MM/DD HH:MM`
    /// set the observation time of the reports that follow.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Observation time (RFC 3339) used until the file sets one; defaults to now
    #[arg(long = "time", value_name = "RFC3339", value_parser = parse_observation_time)]
    pub time: Option<DateTime<Utc>>,

    /// Output format for each parsed report
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full parsed structure as JSON
    Json,
    /// Flat key/value projection as JSON
    Projection,
    /// One `key: value` line per projection entry
    Text,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl ParseArgs {
    /// Report text from the arguments, joined with single spaces
    pub fn report_text(&self) -> Option<String> {
        (!self.report.is_empty()).then(|| self.report.join(" "))
    }
}

/// clap value parser for RFC 3339 timestamps
pub fn parse_observation_time(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time '{}': {}", value, e))
}

/// NOAA station files precede each report with a `YYYY/MM/DD HH:MM` line
pub fn parse_noaa_time_line(line: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(line.trim(), "%Y/%m/%d %H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_command_with_hyphenated_tokens() {
        let args = Args::try_parse_from([
            "metar-processor",
            "parse",
            "--time",
            "2024-03-21T16:50:00Z",
            "EGLL",
            "211650Z",
            "-RA",
            "17/12",
        ])
        .unwrap();

        let Some(Commands::Parse(parse)) = args.command else {
            panic!("Expected parse command");
        };
        assert_eq!(parse.report_text().as_deref(), Some("EGLL 211650Z -RA 17/12"));
        assert_eq!(parse.time.unwrap().day(), 21);
        assert_eq!(parse.format, OutputFormat::Json);
    }

    #[test]
    fn test_log_levels() {
        let args = Args::try_parse_from(["metar-processor", "-vv"]).unwrap();
        assert_eq!(args.get_log_level(), "trace");

        let args = Args::try_parse_from(["metar-processor", "--quiet"]).unwrap();
        assert_eq!(args.get_log_level(), "error");

        let args = Args::try_parse_from(["metar-processor"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.command.is_none());
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let result = Args::try_parse_from([
            "metar-processor",
            "parse",
            "--time",
            "yesterday",
            "EGLL",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_noaa_time_line() {
        let time = parse_noaa_time_line("2010/02/06 16:10").unwrap();
        assert_eq!((time.year(), time.month(), time.day()), (2010, 2, 6));
        assert_eq!((time.hour(), time.minute()), (16, 10));
        assert!(parse_noaa_time_line("EGLL 061610Z 24010KT").is_none());
    }
}
