//! The `analyse` entry point: ingest, split by category, merge, materialize.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::TableError;
use crate::ingest::{self, IngestStats};
use crate::merge;
use crate::record::{ArithmeticRecord, CircuitRecord, EcRecord, LogRecord};
use crate::table::ResultTable;

/// Filesystem locations for one report run, constructed once at start-up and
/// passed to whoever needs them. There is deliberately no process-wide path
/// state, so tests can point the pipeline at a temp directory.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory scanned recursively for benchmark logs.
    pub logs_dir: PathBuf,
    /// Report file consumed by the visualization layer.
    pub output: PathBuf,
}

/// The normalized result tables of one ingestion run, one per category.
#[derive(Debug)]
pub struct Analysis {
    pub circuits: ResultTable<CircuitRecord>,
    pub arithmetics: ResultTable<ArithmeticRecord>,
    pub ec: ResultTable<EcRecord>,
    pub stats: IngestStats,
}

/// Run the full pipeline over the logs under `logs_dir`.
///
/// Per-file parse failures were already absorbed by the ingestor; the only
/// error that can surface here is a repetition-count consistency violation,
/// which signals inconsistent upstream benchmark runs and is not recovered.
pub fn analyse(logs_dir: &Path) -> Result<Analysis, TableError> {
    let (records, stats) = ingest::ingest_dir(logs_dir);

    let mut circuits = Vec::new();
    let mut arithmetics = Vec::new();
    let mut ec = Vec::new();
    for record in records {
        match record {
            LogRecord::Circuit(r) => circuits.push(r),
            LogRecord::Arithmetic(r) => arithmetics.push(r),
            LogRecord::Ec(r) => ec.push(r),
        }
    }

    let circuits = ResultTable::materialize(merge::collapse(circuits))?;
    let arithmetics = ResultTable::materialize(merge::collapse(arithmetics))?;
    let ec = ResultTable::materialize(merge::collapse(ec))?;

    log_circuit_stats(&circuits);
    tracing::info!(
        circuits = circuits.len(),
        arithmetics = arithmetics.len(),
        ec = ec.len(),
        "analysis complete"
    );

    Ok(Analysis {
        circuits,
        arithmetics,
        ec,
        stats,
    })
}

fn log_circuit_stats(table: &ResultTable<CircuitRecord>) {
    if table.is_empty() {
        return;
    }
    let frameworks: HashSet<&str> = table.rows().iter().map(|r| r.framework.as_str()).collect();
    let backends: HashSet<&str> = table.rows().iter().map(|r| r.backend.as_str()).collect();
    let circuits: HashSet<&str> = table.rows().iter().map(|r| r.circuit.as_str()).collect();
    tracing::info!(
        frameworks = frameworks.len(),
        backends = backends.len(),
        circuits = circuits.len(),
        "circuit benchmark coverage"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn categories_are_split_and_merged_independently() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("ec.csv"),
            "framework,category,curve,operation,input,ram,time,nbPhysicalCores,nbLogicalCores,count,cpu\n\
             blstrs,ec,bls12_381,pairing,input_1.json,100,10,1,1,1,x86\n\
             blstrs,ec,bls12_381,pairing,input_1.json,200,30,1,1,1,x86\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("arith.csv"),
            "framework,category,curve,field,operation,input,ram,time,nbPhysicalCores,nbLogicalCores,count,cpu\n\
             gnark,arithmetic,bn254,base,mul,input_2.json,500,40,1,1,1,x86\n",
        )
        .unwrap();

        let analysis = analyse(dir.path()).unwrap();
        assert!(analysis.circuits.is_empty());
        assert_eq!(analysis.arithmetics.len(), 1);
        assert_eq!(analysis.ec.len(), 1);
        assert_eq!(analysis.ec.rows()[0].time, Some(20));
        assert_eq!(analysis.ec.rows()[0].ram, Some(150));
        assert_eq!(analysis.ec.rows()[0].count, 2);
    }

    #[test]
    fn empty_directory_yields_empty_tables() {
        let dir = tempdir().unwrap();
        let analysis = analyse(dir.path()).unwrap();
        assert!(analysis.circuits.is_empty());
        assert!(analysis.arithmetics.is_empty());
        assert!(analysis.ec.is_empty());
        assert_eq!(analysis.stats.files_parsed, 0);
    }

    #[test]
    fn count_mismatch_surfaces_as_a_hard_failure() {
        let dir = tempdir().unwrap();
        // Same (field, input, operation) identity from two frameworks with
        // different repetition counts.
        fs::write(
            dir.path().join("arith.csv"),
            "framework,category,curve,field,operation,input,ram,time,nbPhysicalCores,nbLogicalCores,count,cpu\n\
             gnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,10,x86\n\
             arkworks,arithmetic,bn254,base,add,input_1.json,900,60,1,1,20,x86\n",
        )
        .unwrap();

        assert!(analyse(dir.path()).is_err());
    }
}
