use clap::Parser;
use metar_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) if stats.reports_failed > 0 => process::exit(2),
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("METAR Processor - Aviation Weather Report Parser");
    println!("================================================");
    println!();
    println!("Parse raw METAR reports into structured JSON or a flat key/value view.");
    println!();
    println!("USAGE:");
    println!("    metar-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse a single report from the command line or stdin");
    println!("    batch       Parse a file with one report per line");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    metar-processor parse EGLL 211650Z 24010KT CAVOK 17/12 Q1020");
    println!("    metar-processor parse --format projection --trace KJFK 211651Z 18010KT 10SM FEW250 24/18 A3000");
    println!("    curl -s https://tgftp.nws.noaa.gov/data/observations/metar/stations/EGLL.TXT \\");
    println!("        | tail -n 1 | metar-processor parse");
    println!("    metar-processor batch reports.txt --format text");
    println!();
    println!("For detailed help on any command, use:");
    println!("    metar-processor <COMMAND> --help");
}
