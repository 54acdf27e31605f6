//! Report serialization for the external visualization layer.
//!
//! The report is one JSON document: run provenance plus the three
//! materialized tables. The visualization collaborator only sees this file,
//! never the raw logs.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::record::{ArithmeticRecord, CircuitRecord, EcRecord};
use crate::table::ResultTable;

/// Provenance header for one report run.
#[derive(Clone, Debug, Serialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub tool_version: String,
    pub timestamp_utc: String,
    pub logs_root: String,
    pub files_parsed: usize,
    pub files_skipped: usize,
}

/// The full normalized result set of one ingestion run.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub run: RunMeta,
    pub circuits: ResultTable<CircuitRecord>,
    pub arithmetics: ResultTable<ArithmeticRecord>,
    pub ec: ResultTable<EcRecord>,
}

impl BenchReport {
    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self).map_err(io::Error::other)
    }

    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_json()?)
    }
}

/// Wall-clock timestamp without a chrono dependency; unix seconds are enough
/// for report provenance.
pub fn now_utc() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}
