use thiserror::Error;

/// A file-granularity ingestion failure.
///
/// Every variant is recoverable: the offending log file contributes zero
/// records and the directory scan moves on to the next file. Invariant
/// violations inside the merge engine are panics, not variants here, so
/// callers can structurally decide what to catch.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("first row should contain the header and first column should be `framework`, found `{found}`")]
    MalformedHeader { found: String },

    #[error("category (column 2) should be arithmetic, ec, or circuit, found `{token}`")]
    UnknownCategory { token: String },

    #[error("wrong headers for {category}:\nexpected: {expected:?}\nfound: {found:?}")]
    SchemaMismatch {
        category: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("row has {found} columns, expected {expected}")]
    RowLength { expected: usize, found: usize },

    #[error("column `{field}`: cannot parse `{value}` as an integer")]
    Coercion { field: &'static str, value: String },

    #[error("unknown {category} operation `{token}`")]
    UnknownOperation {
        category: &'static str,
        token: String,
    },
}

/// A consistency violation detected while materializing a result table.
///
/// Not retried and not recovered per file: it signals that the upstream
/// benchmark runs themselves are inconsistent, so it propagates to the
/// top-level caller.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("experiments in group {group} ran with differing repetition counts {counts:?}")]
    CountMismatch { group: String, counts: Vec<u64> },
}
