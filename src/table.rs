//! Result table materialization and post-hoc consistency checks.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::TableError;
use crate::record::Experiment;
use crate::schema;

/// The final, flat, schema-ordered collection of merged records for one
/// benchmark category. Immutable once materialized; the visualization layer
/// reads it for the rest of the process lifetime.
#[derive(Clone, Debug, Serialize)]
pub struct ResultTable<R> {
    category: &'static str,
    columns: &'static [&'static str],
    rows: Vec<R>,
}

impl<R: Experiment> ResultTable<R> {
    /// Flatten merged records into a table and run the repetition-count
    /// consistency check. An empty record set is a valid, empty table so the
    /// dashboard can render "no data" states.
    pub fn materialize(rows: Vec<R>) -> Result<Self, TableError> {
        check_count(&rows)?;
        let spec = schema::spec(R::CATEGORY);
        Ok(ResultTable {
            category: spec.category.as_str(),
            columns: spec.columns,
            rows,
        })
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Assert that every identity group (the category's count key) ran with a
/// single repetition count. Mixing counts would compare runs that repeated a
/// different number of times as if they were equal, so this fails loudly
/// instead of correcting anything. Categories with `count_key() == None`
/// opt out of the check.
fn check_count<R: Experiment>(rows: &[R]) -> Result<(), TableError> {
    let mut groups: HashMap<R::CountKey, Vec<u64>> = HashMap::new();
    for row in rows {
        if let Some(key) = row.count_key() {
            groups.entry(key).or_default().push(row.count());
        }
    }
    for (key, mut counts) in groups {
        counts.sort_unstable();
        counts.dedup();
        if counts.len() > 1 {
            return Err(TableError::CountMismatch {
                group: format!("{key:?}"),
                counts,
            });
        }
    }
    Ok(())
}
