//! METAR parser service
//!
//! Turns a raw whitespace-delimited METAR into a [`ParsedReport`].
//!
//! ## Architecture
//!
//! - [`tokenizer`] - whitespace split into a front-consumed [`TokenQueue`]
//! - [`group_parsers`] - one micro-grammar per group, each answering with a
//!   three-way [`GroupOutcome`]
//! - [`state_machine`] - the automaton that walks the report sections
//! - [`report_builder`] - accumulates fields and applies display units
//! - [`projection`] - key/value view of a finished report
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use metar_processor::app::services::metar_parser::MetarParser;
//! use metar_processor::Config;
//!
//! let parser = MetarParser::new(Config::default());
//! let report = parser
//!     .parse("EGLL 211650Z 24010KT CAVOK 17/12 Q1020", Utc::now())
//!     .unwrap();
//!
//! assert_eq!(report.station_code(), "EGLL");
//! assert_eq!(report.temperature().celsius, Some(17));
//! ```
//!
//! [`ParsedReport`]: crate::app::models::ParsedReport

pub mod group_parsers;
pub mod projection;
pub mod report_builder;
pub mod state_machine;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use group_parsers::GroupOutcome;
pub use projection::project;
pub use report_builder::ReportBuilder;
pub use state_machine::{MetarParser, ParseState, Transition, parse_report};
pub use tokenizer::TokenQueue;
