//! Log discovery and parsing.
//!
//! Benchmark logs are produced by many independent framework drivers, some of
//! them broken at any given time, so one bad file must never void the run:
//! [`ingest_dir`] catches every [`IngestError`] at file granularity, logs it,
//! and moves on.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::IngestError;
use crate::record::{
    ArithmeticOp, ArithmeticRecord, CircuitOp, CircuitRecord, EcOp, EcRecord, LogRecord,
};
use crate::schema::{self, Category, FieldSpec};

/// Log file extension the directory walk matches on.
const LOG_EXTENSION: &str = ".csv";

/// Counters for one ingestion run, carried into the report metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct IngestStats {
    pub files_parsed: usize,
    pub files_skipped: usize,
}

/// Recursively collect every log file under `root`.
///
/// Directory names are informative only; they are logged, never interpreted.
/// Unreadable entries are skipped with a diagnostic.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            tracing::debug!(dir = %entry.path().display(), "process directory");
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(LOG_EXTENSION) {
            files.push(entry.into_path());
        }
    }
    files
}

/// Parse one log file into typed records.
///
/// The first row must be a header whose first column is the literal
/// `framework`. The category is read from the second column of the first data
/// row; only then can the header be checked against the registry. A file with
/// a header but no data rows yields zero records.
pub fn parse_file(path: &Path) -> Result<Vec<LogRecord>, IngestError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let header_line = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(IngestError::MalformedHeader {
                found: String::new(),
            })
        }
    };
    let raw_header = split_row(&header_line);
    if raw_header.first().map(String::as_str) != Some("framework") {
        return Err(IngestError::MalformedHeader {
            found: raw_header.first().cloned().unwrap_or_default(),
        });
    }

    let mut spec: Option<&'static FieldSpec> = None;
    let mut records = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = split_row(&line);
        let resolved = match spec {
            Some(resolved) => resolved,
            None => {
                let token = row.get(1).map(String::as_str).unwrap_or_default();
                let resolved = schema::resolve(token)?;
                schema::check_header(resolved, &raw_header)?;
                spec = Some(resolved);
                resolved
            }
        };
        records.push(build_record(resolved, &row)?);
    }
    Ok(records)
}

/// Discover and parse everything under `root`, isolating per-file failures.
pub fn ingest_dir(root: &Path) -> (Vec<LogRecord>, IngestStats) {
    let files = discover(root);
    tracing::info!(files = files.len(), "files to process");

    let mut records = Vec::new();
    let mut stats = IngestStats::default();
    for path in files {
        tracing::info!(path = %path.display(), "parse");
        match parse_file(&path) {
            Ok(parsed) => {
                stats.files_parsed += 1;
                records.extend(parsed);
            }
            Err(err) => {
                stats.files_skipped += 1;
                tracing::error!(path = %path.display(), %err, "cannot parse file");
            }
        }
    }
    (records, stats)
}

// The drivers emit plain comma-separated rows without quoting, so a field can
// never contain a comma.
fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}

fn build_record(spec: &'static FieldSpec, row: &[String]) -> Result<LogRecord, IngestError> {
    if row.len() != spec.fields.len() {
        return Err(IngestError::RowLength {
            expected: spec.fields.len(),
            found: row.len(),
        });
    }
    match spec.category {
        Category::Circuit => Ok(LogRecord::Circuit(circuit_record(row)?)),
        Category::Arithmetic => Ok(LogRecord::Arithmetic(arithmetic_record(row)?)),
        Category::Ec => Ok(LogRecord::Ec(ec_record(row)?)),
    }
}

// Column indices below follow the field order in the schema registry; the
// row length was checked against it in `build_record`.

fn circuit_record(row: &[String]) -> Result<CircuitRecord, IngestError> {
    Ok(CircuitRecord {
        framework: row[0].clone(),
        backend: row[2].clone(),
        curve: row[3].clone(),
        circuit: row[4].clone(),
        input_path: row[5].clone(),
        operation: circuit_op(&row[6])?,
        nb_constraints: int(row, 7, "nb_constraints")?,
        nb_secret: int(row, 8, "nb_secret")?,
        nb_public: int(row, 9, "nb_public")?,
        ram: opt_int(row, 10, "ram")?,
        time: opt_int(row, 11, "time")?,
        proof: opt_int(row, 12, "proof")?,
        nb_physical_cores: int(row, 13, "nb_physical_cores")?,
        nb_logical_cores: int(row, 14, "nb_logical_cores")?,
        count: int(row, 15, "count")?,
        cpu: row[16].clone(),
    })
}

fn arithmetic_record(row: &[String]) -> Result<ArithmeticRecord, IngestError> {
    Ok(ArithmeticRecord {
        framework: row[0].clone(),
        curve: row[2].clone(),
        field: row[3].clone(),
        operation: arithmetic_op(&row[4])?,
        input_path: row[5].clone(),
        ram: opt_int(row, 6, "ram")?,
        time: opt_int(row, 7, "time")?,
        nb_physical_cores: int(row, 8, "nb_physical_cores")?,
        nb_logical_cores: int(row, 9, "nb_logical_cores")?,
        count: int(row, 10, "count")?,
        cpu: row[11].clone(),
    })
}

fn ec_record(row: &[String]) -> Result<EcRecord, IngestError> {
    Ok(EcRecord {
        framework: row[0].clone(),
        curve: row[2].clone(),
        operation: ec_op(&row[3])?,
        input_path: row[4].clone(),
        ram: opt_int(row, 5, "ram")?,
        time: opt_int(row, 6, "time")?,
        nb_physical_cores: int(row, 7, "nb_physical_cores")?,
        nb_logical_cores: int(row, 8, "nb_logical_cores")?,
        count: int(row, 9, "count")?,
        cpu: row[10].clone(),
    })
}

fn circuit_op(token: &str) -> Result<CircuitOp, IngestError> {
    CircuitOp::parse(token).ok_or_else(|| IngestError::UnknownOperation {
        category: Category::Circuit.as_str(),
        token: token.to_string(),
    })
}

fn arithmetic_op(token: &str) -> Result<ArithmeticOp, IngestError> {
    ArithmeticOp::parse(token).ok_or_else(|| IngestError::UnknownOperation {
        category: Category::Arithmetic.as_str(),
        token: token.to_string(),
    })
}

fn ec_op(token: &str) -> Result<EcOp, IngestError> {
    EcOp::parse(token).ok_or_else(|| IngestError::UnknownOperation {
        category: Category::Ec.as_str(),
        token: token.to_string(),
    })
}

fn int(row: &[String], idx: usize, field: &'static str) -> Result<u64, IngestError> {
    row[idx].parse().map_err(|_| IngestError::Coercion {
        field,
        value: row[idx].clone(),
    })
}

fn opt_int(row: &[String], idx: usize, field: &'static str) -> Result<Option<u64>, IngestError> {
    if row[idx].is_empty() {
        return Ok(None);
    }
    int(row, idx, field).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ARITH_HEADER: &str = "framework,category,curve,field,operation,input,ram,time,\
                                nbPhysicalCores,nbLogicalCores,count,cpu";

    fn write_log(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn discovery_is_recursive_and_extension_filtered() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("math/machine1")).unwrap();
        write_log(&dir.path().join("math/machine1"), "gnark.csv", "x");
        write_log(dir.path(), "top.csv", "x");
        write_log(dir.path(), "notes.txt", "x");

        let files = discover(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.to_string_lossy().ends_with(".csv")));
    }

    #[test]
    fn well_formed_arithmetic_file_parses() {
        let dir = tempdir().unwrap();
        let path = write_log(
            dir.path(),
            "gnark.csv",
            &format!("{ARITH_HEADER}\ngnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,1,x86\n"),
        );

        let records = parse_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        match &records[0] {
            LogRecord::Arithmetic(r) => {
                assert_eq!(r.framework, "gnark");
                assert_eq!(r.operation, ArithmeticOp::Add);
                assert_eq!(r.ram, Some(1000));
                assert_eq!(r.time, Some(50));
            }
            other => panic!("expected arithmetic record, got {other:?}"),
        }
    }

    #[test]
    fn empty_optional_fields_parse_as_unset() {
        let dir = tempdir().unwrap();
        let path = write_log(
            dir.path(),
            "gnark.csv",
            &format!("{ARITH_HEADER}\ngnark,arithmetic,bn254,base,add,input_1.json,,50,1,1,1,x86\n"),
        );

        let records = parse_file(&path).unwrap();
        match &records[0] {
            LogRecord::Arithmetic(r) => assert_eq!(r.ram, None),
            other => panic!("expected arithmetic record, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_yields_zero_records() {
        let dir = tempdir().unwrap();
        let path = write_log(dir.path(), "empty.csv", &format!("{ARITH_HEADER}\n"));
        assert!(parse_file(&path).unwrap().is_empty());
    }

    #[test]
    fn header_not_starting_with_framework_is_malformed() {
        let dir = tempdir().unwrap();
        let path = write_log(dir.path(), "bad.csv", "curve,category\nbn254,arithmetic\n");
        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, IngestError::MalformedHeader { found } if found == "curve"));
    }

    #[test]
    fn stale_header_from_an_earlier_schema_is_a_mismatch() {
        let dir = tempdir().unwrap();
        // Old-generation arithmetic log without the count column.
        let path = write_log(
            dir.path(),
            "stale.csv",
            "framework,category,curve,field,operation,input,ram,time,nbPhysicalCores,nbLogicalCores,cpu\n\
             gnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,x86\n",
        );
        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, IngestError::SchemaMismatch { .. }));
    }

    #[test]
    fn non_numeric_count_is_a_coercion_error() {
        let dir = tempdir().unwrap();
        let path = write_log(
            dir.path(),
            "bad.csv",
            &format!("{ARITH_HEADER}\ngnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,many,x86\n"),
        );
        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, IngestError::Coercion { field: "count", .. }));
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_log(
            dir.path(),
            "bad.csv",
            &format!("{ARITH_HEADER}\ngnark,arithmetic,bn254,base,div,input_1.json,1000,50,1,1,1,x86\n"),
        );
        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, IngestError::UnknownOperation { token, .. } if token == "div"));
    }

    #[test]
    fn one_bad_file_does_not_abort_the_ingestion_run() {
        let dir = tempdir().unwrap();
        write_log(
            dir.path(),
            "good.csv",
            &format!("{ARITH_HEADER}\ngnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,1,x86\n"),
        );
        write_log(dir.path(), "bad.csv", "not,a,header\n1,2,3\n");

        let (records, stats) = ingest_dir(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(stats.files_parsed, 1);
        assert_eq!(stats.files_skipped, 1);
    }
}
