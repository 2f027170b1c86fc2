//! METAR Processor Library
//!
//! A Rust library for parsing METAR aviation weather reports into strongly
//! typed, unit-aware data structures.
//!
//! This library provides tools for:
//! - Tokenizing raw reports and walking them with an explicit state machine
//! - Parsing each group (wind, visibility, runway visible range, weather,
//!   sky condition, temperature, pressure) with its own micro-grammar
//! - Handling WMO and US format variants, AUTO/COR reports and CAVOK
//! - Projecting parsed reports into stable key/value form for rendering
//!
//! Fetching reports and rendering them for people are left to callers.

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod metar_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ParsedReport, SemanticKey};
pub use app::services::metar_parser::{MetarParser, parse_report};
pub use config::Config;
pub use error::{MetarError, Result};
