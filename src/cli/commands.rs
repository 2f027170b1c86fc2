//! Command implementations for the METAR processor CLI
//!
//! This module contains command execution, output formatting and logging
//! setup. Everything here is a thin layer over [`MetarParser`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::*;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::app::models::ParsedReport;
use crate::app::services::metar_parser::{MetarParser, Transition};
use crate::cli::args::{Args, BatchArgs, Commands, OutputFormat, ParseArgs, parse_noaa_time_line};
use crate::config::Config;

/// Outcome counts for reporting
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Reports parsed successfully
    pub reports_parsed: usize,
    /// Reports that failed to parse
    pub reports_failed: usize,
    /// Line number and error message for each failure
    pub failures: Vec<(usize, String)>,
}

impl ProcessingStats {
    pub fn total(&self) -> usize {
        self.reports_parsed + self.reports_failed
    }
}

/// Main command runner
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);
    let parser = MetarParser::new(config);

    match args.command {
        Some(Commands::Parse(parse_args)) => run_parse(&parser, &parse_args),
        Some(Commands::Batch(batch_args)) => run_batch(&parser, &batch_args),
        None => Ok(ProcessingStats::default()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env)
fn load_configuration(args: &Args) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file found, using defaults and environment variables"),
    }

    Config::load_layered(config_file).context("Failed to load configuration")
}

fn run_parse(parser: &MetarParser, args: &ParseArgs) -> Result<ProcessingStats> {
    let report = match args.report_text() {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read report from stdin")?;
            text
        }
    };
    let time = args.time.unwrap_or_else(Utc::now);

    let (parsed, transitions) = parser
        .parse_traced(&report, time)
        .with_context(|| format!("Failed to parse report '{}'", report.trim()))?;

    if args.trace {
        print_transitions(&transitions);
    }
    println!("{}", render(parser.config(), &parsed, args.format)?);

    Ok(ProcessingStats {
        reports_parsed: 1,
        ..Default::default()
    })
}

fn run_batch(parser: &MetarParser, args: &BatchArgs) -> Result<ProcessingStats> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    info!("Parsing reports from {}", args.file.display());
    let stats = parse_lines(parser, &content, args.time.unwrap_or_else(Utc::now), |parsed| {
        render(parser.config(), parsed, args.format).map(|output| println!("{}", output))
    })?;

    print_summary(&args.file, &stats);
    Ok(stats)
}

/// Parse every report line in `content`, handing each success to `emit`.
///
/// Blank lines and `#` comments are skipped. NOAA time lines update the
/// observation time for the reports that follow.
pub fn parse_lines(
    parser: &MetarParser,
    content: &str,
    initial_time: DateTime<Utc>,
    mut emit: impl FnMut(&ParsedReport) -> Result<()>,
) -> Result<ProcessingStats> {
    let mut stats = ProcessingStats::default();
    let mut time = initial_time;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(noaa_time) = parse_noaa_time_line(line) {
            time = noaa_time;
            continue;
        }

        match parser.parse(line, time) {
            Ok(parsed) => {
                stats.reports_parsed += 1;
                emit(&parsed)?;
            }
            Err(e) => {
                warn!("Line {}: {}", line_number, e);
                stats.reports_failed += 1;
                stats.failures.push((line_number, e.to_string()));
            }
        }
    }

    Ok(stats)
}

/// Render a parsed report in the requested format
pub fn render(config: &Config, parsed: &ParsedReport, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(parsed).context("Failed to serialise report")?
        }
        OutputFormat::Projection => {
            serde_json::to_string_pretty(&Value::Object(parsed.projection(config)))
                .context("Failed to serialise projection")?
        }
        OutputFormat::Text => parsed
            .projection(config)
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

fn print_transitions(transitions: &[Transition]) {
    for transition in transitions {
        eprintln!(
            "{} {:?} -> {:?} (consumed {})",
            "state".bright_black(),
            transition.from,
            transition.to,
            transition.tokens_consumed()
        );
    }
}

fn print_summary(file: &Path, stats: &ProcessingStats) {
    eprintln!();
    eprintln!("{}", format!("Summary for {}", file.display()).bright_green().bold());
    eprintln!(
        "  {} {}",
        "Parsed:".bright_white(),
        stats.reports_parsed.to_string().bright_cyan()
    );
    eprintln!(
        "  {} {}",
        "Failed:".bright_white(),
        if stats.reports_failed > 0 {
            stats.reports_failed.to_string().bright_red()
        } else {
            stats.reports_failed.to_string().bright_cyan()
        }
    );
    for (line, error) in &stats.failures {
        eprintln!("    {} {}", format!("line {}:", line).bright_yellow(), error);
    }
}
