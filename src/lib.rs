//! Lookout - region update-time estimator and target sheet generator

pub mod core;
pub mod fetch;
pub mod ingest;
pub mod pipeline;
pub mod region;
pub mod report;
pub mod schedule;
