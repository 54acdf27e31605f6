//! Grouping and merging of repeated trials.
//!
//! Multiple runs of the identical experiment are measurement noise reduction,
//! not distinct data points: they are collapsed into one record carrying the
//! integer-truncated mean of the measured quantities and the summed
//! repetition count.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::record::Experiment;

/// Partition records by static key and collapse each partition into one
/// representative record. First-seen key order is preserved so output is
/// deterministic regardless of directory-listing order quirks upstream.
pub fn collapse<R: Experiment>(records: Vec<R>) -> Vec<R> {
    let mut index: HashMap<R::Key, usize> = HashMap::new();
    let mut partitions: Vec<Vec<R>> = Vec::new();
    for record in records {
        match index.entry(record.static_key()) {
            Entry::Occupied(slot) => partitions[*slot.get()].push(record),
            Entry::Vacant(slot) => {
                slot.insert(partitions.len());
                partitions.push(vec![record]);
            }
        }
    }
    partitions.into_iter().map(merge_group).collect()
}

/// Collapse one partition. A singleton passes through untouched; larger
/// groups get the mean of present `time`/`ram` values and the summed count,
/// with every other field taken from the first record.
fn merge_group<R: Experiment>(mut group: Vec<R>) -> R {
    if group.len() == 1 {
        return group.remove(0);
    }

    // Static-key equality is what put these records in one partition; a
    // disagreement here is a key-computation bug, not a data problem.
    let key = group[0].static_key();
    for record in &group[1..] {
        assert!(
            record.static_key() == key,
            "records in one merge partition disagree on non-measured fields"
        );
    }

    let time = mean_present(group.iter().map(Experiment::time));
    let ram = mean_present(group.iter().map(Experiment::ram));
    let count = group.iter().map(Experiment::count).sum();

    let mut merged = group.remove(0);
    merged.set_measures(time, ram, count);
    merged
}

/// Integer-truncated mean over the present values; unset members are
/// excluded, and an all-unset column stays unset.
fn mean_present(values: impl Iterator<Item = Option<u64>>) -> Option<u64> {
    let mut sum: u128 = 0;
    let mut n: u128 = 0;
    for value in values.flatten() {
        sum += u128::from(value);
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some((sum / n) as u64)
    }
}
