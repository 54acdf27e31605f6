//! Normalization and merge pipeline for ZKP benchmark logs.
//!
//! Ingests per-framework CSV benchmark logs, validates them against the
//! category schema registry, collapses repeated trials of the same
//! experiment, and materializes one canonical result table per category
//! (`circuit`, `arithmetic`, `ec`) for the report consumed by the
//! visualization layer.

pub mod error;
pub mod ingest;
pub mod merge;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod schema;
pub mod table;
