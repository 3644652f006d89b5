//! Key-indexed reconciliation of two parsed tables

use crate::record::{ParsedTable, Record, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one key in the union of the two tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Deleted,
    Changed,
    Same,
}

impl DiffStatus {
    /// All statuses in report order
    pub const ALL: [DiffStatus; 4] = [
        DiffStatus::Added,
        DiffStatus::Deleted,
        DiffStatus::Changed,
        DiffStatus::Same,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Deleted => "deleted",
            DiffStatus::Changed => "changed",
            DiffStatus::Same => "same",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One key's classification with the records behind it.
///
/// `deleted` carries only `left`, `added` only `right`, and
/// `changed`/`same` carry both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffEntry {
    pub key: Value,
    pub status: DiffStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Record>,
}

/// Summary counts over the classified entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffCounts {
    pub total: usize,
    pub added: usize,
    pub deleted: usize,
    pub changed: usize,
    pub same: usize,
}

/// Classified row-level diff of two tables keyed on one field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    pub key_field: String,
    pub counts: DiffCounts,
    /// Records dropped per side for a missing or null key field
    pub skipped_left: usize,
    pub skipped_right: usize,
    pub entries: Vec<DiffEntry>,
}

impl DiffResult {
    pub fn entries_with_status(&self, status: DiffStatus) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }
}

/// Classify every key in the union of the two tables.
///
/// Records whose key field is absent or null are excluded entirely and
/// reported through `skipped_left`/`skipped_right`. Keys match on
/// their string rendition; each side keeps the first record seen for a
/// duplicate key. Two present records compare with shallow equality:
/// the same field-name set and strictly equal values, no coercion and
/// no recursion into nested values. Entries come out in left-table
/// order followed by right-only keys in right-table order.
pub fn diff_tables(left: &ParsedTable, right: &ParsedTable, key_field: &str) -> DiffResult {
    let (left_index, skipped_left) = build_key_index(&left.records, key_field);
    let (right_index, skipped_right) = build_key_index(&right.records, key_field);

    let mut entries = Vec::with_capacity(left_index.len() + right_index.len());
    let mut counts = DiffCounts::default();

    for (key_text, &left_record) in &left_index {
        match right_index.get(key_text) {
            None => {
                counts.deleted += 1;
                entries.push(DiffEntry {
                    key: key_value(left_record, key_field),
                    status: DiffStatus::Deleted,
                    left: Some(left_record.clone()),
                    right: None,
                });
            }
            Some(&right_record) => {
                let status = if left_record == right_record {
                    counts.same += 1;
                    DiffStatus::Same
                } else {
                    counts.changed += 1;
                    DiffStatus::Changed
                };
                entries.push(DiffEntry {
                    key: key_value(left_record, key_field),
                    status,
                    left: Some(left_record.clone()),
                    right: Some(right_record.clone()),
                });
            }
        }
    }

    for (key_text, &right_record) in &right_index {
        if left_index.contains_key(key_text) {
            continue;
        }
        counts.added += 1;
        entries.push(DiffEntry {
            key: key_value(right_record, key_field),
            status: DiffStatus::Added,
            left: None,
            right: Some(right_record.clone()),
        });
    }

    counts.total = entries.len();

    DiffResult {
        key_field: key_field.to_string(),
        counts,
        skipped_left,
        skipped_right,
        entries,
    }
}

fn build_key_index<'a>(
    records: &'a [Record],
    key_field: &str,
) -> (IndexMap<String, &'a Record>, usize) {
    let mut index: IndexMap<String, &Record> = IndexMap::new();
    let mut skipped = 0usize;
    for record in records {
        match record.get(key_field) {
            Some(value) if !value.is_null() => {
                index.entry(value.render()).or_insert(record);
            }
            _ => skipped += 1,
        }
    }
    (index, skipped)
}

fn key_value(record: &Record, key_field: &str) -> Value {
    record.get(key_field).cloned().unwrap_or(Value::Null)
}
