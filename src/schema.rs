//! Record schema registry: the source of truth for what each benchmark
//! category's log header looks like on the wire.
//!
//! Historical logs spell several columns differently (`nbConstraints`,
//! `ram(mb)`, `time(ns)`, ...); [`normalize_header`] rewrites them to the
//! canonical internal names before the header is checked against the
//! expected field list for the category.

use crate::error::IngestError;

/// Benchmark category discriminant, read from the second column of the first
/// data row of a log file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Circuit,
    Arithmetic,
    Ec,
}

impl Category {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "circuit" => Some(Category::Circuit),
            "arithmetic" => Some(Category::Arithmetic),
            "ec" => Some(Category::Ec),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Circuit => "circuit",
            Category::Arithmetic => "arithmetic",
            Category::Ec => "ec",
        }
    }
}

/// Expected log layout for one category.
#[derive(Debug)]
pub struct FieldSpec {
    pub category: Category,
    /// Normalized header, in order, including the `category` discriminant.
    pub fields: &'static [&'static str],
    /// Wire column names of the materialized table: the discriminant is
    /// dropped, everything else keeps the schema order.
    pub columns: &'static [&'static str],
}

static CIRCUIT: FieldSpec = FieldSpec {
    category: Category::Circuit,
    fields: &[
        "framework",
        "category",
        "backend",
        "curve",
        "circuit",
        "input_path",
        "operation",
        "nb_constraints",
        "nb_secret",
        "nb_public",
        "ram",
        "time",
        "proof",
        "nb_physical_cores",
        "nb_logical_cores",
        "count",
        "cpu",
    ],
    columns: &[
        "framework",
        "backend",
        "curve",
        "circuit",
        "input",
        "operation",
        "nbConstraints",
        "nbSecret",
        "nbPublic",
        "ram",
        "time",
        "proofSize",
        "nbPhysicalCores",
        "nbLogicalCores",
        "count",
        "cpu",
    ],
};

static ARITHMETIC: FieldSpec = FieldSpec {
    category: Category::Arithmetic,
    fields: &[
        "framework",
        "category",
        "curve",
        "field",
        "operation",
        "input_path",
        "ram",
        "time",
        "nb_physical_cores",
        "nb_logical_cores",
        "count",
        "cpu",
    ],
    columns: &[
        "framework",
        "curve",
        "field",
        "operation",
        "input",
        "ram",
        "time",
        "nbPhysicalCores",
        "nbLogicalCores",
        "count",
        "cpu",
    ],
};

static EC: FieldSpec = FieldSpec {
    category: Category::Ec,
    fields: &[
        "framework",
        "category",
        "curve",
        "operation",
        "input_path",
        "ram",
        "time",
        "nb_physical_cores",
        "nb_logical_cores",
        "count",
        "cpu",
    ],
    columns: &[
        "framework",
        "curve",
        "operation",
        "input",
        "ram",
        "time",
        "nbPhysicalCores",
        "nbLogicalCores",
        "count",
        "cpu",
    ],
};

/// Header-name variants found in logs from earlier schema generations,
/// rewritten to the canonical internal names. Applied in order; no
/// replacement target contains another alias, so a single pass suffices.
const ALIASES: &[(&str, &str)] = &[
    ("input", "input_path"),
    ("nbConstraints", "nb_constraints"),
    ("nbSecret", "nb_secret"),
    ("nbPublic", "nb_public"),
    ("nbPhysicalCores", "nb_physical_cores"),
    ("nbLogicalCores", "nb_logical_cores"),
    ("proofSize", "proof"),
    ("ram(mb)", "ram"),
    ("time(ms)", "time"),
    ("p(bitlength)", "p"),
    ("time(ns)", "time"),
];

/// Look up the field spec for a category.
pub fn spec(category: Category) -> &'static FieldSpec {
    match category {
        Category::Circuit => &CIRCUIT,
        Category::Arithmetic => &ARITHMETIC,
        Category::Ec => &EC,
    }
}

/// Resolve a raw category token to its field spec.
pub fn resolve(token: &str) -> Result<&'static FieldSpec, IngestError> {
    Category::from_token(token)
        .map(spec)
        .ok_or_else(|| IngestError::UnknownCategory {
            token: token.to_string(),
        })
}

/// Rewrite historical header-name variants to the canonical internal names.
pub fn normalize_header(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|cell| {
            let mut name = cell.clone();
            for (variant, canonical) in ALIASES {
                name = name.replace(variant, canonical);
            }
            name
        })
        .collect()
}

/// Verify that a raw log header matches the expected field list, order
/// included, after alias normalization.
pub fn check_header(spec: &'static FieldSpec, raw: &[String]) -> Result<(), IngestError> {
    let normalized = normalize_header(raw);
    if normalized != spec.fields {
        return Err(IngestError::SchemaMismatch {
            category: spec.category.as_str(),
            expected: spec.fields.iter().map(|f| f.to_string()).collect(),
            found: normalized,
        });
    }
    Ok(())
}
