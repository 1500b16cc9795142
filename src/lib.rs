//! Merge Cucumber JSON reports and reconcile retested scenarios.
//!
//! Reports are read in order, earliest run first. A [`reduce::ReductionStrategy`]
//! chosen through [`reduce::ReducingMethod`] decides how records sharing an
//! identity are combined, and [`engine::ReportMergeEngine`] freezes the
//! outcome into a [`report::result::ReportResult`].

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod methods;
pub mod model;
pub mod reduce;
pub mod report;
