//! Core library: document selection, NAF extraction, aggregation and queries.

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod models;
pub mod query;
pub mod scanner;
