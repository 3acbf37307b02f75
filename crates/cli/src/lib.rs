//! Text and JSON rendering for the `naf-stats` command-line tool.
pub mod report;
