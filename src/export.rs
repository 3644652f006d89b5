//! Report export: multi-sheet workbook with flat-text degradation

use crate::codec::{Sheet, WorkbookCodec};
use crate::diff::{DiffEntry, DiffResult, DiffStatus};
use crate::record::{Record, Value};
use indexmap::IndexSet;
use log::warn;

/// Output shape actually produced by an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Workbook,
    FlatText,
}

/// Exported report bytes plus the filename they should be saved under
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub format: ExportFormat,
}

/// Export a classified diff as a four-sheet workbook (`added`,
/// `deleted`, `changed`, `same`), degrading to a sectioned flat-text
/// document when the codec is absent or its write fails. The flat-text
/// path is infallible, so export as a whole never fails.
pub fn export_report(
    result: &DiffResult,
    base_name: &str,
    codec: Option<&dyn WorkbookCodec>,
) -> ExportArtifact {
    let sheets = build_sheets(result);

    if let Some(codec) = codec {
        match codec.write_workbook(&sheets) {
            Ok(bytes) => {
                return ExportArtifact {
                    bytes,
                    filename: format!("{}.xlsx", base_name),
                    format: ExportFormat::Workbook,
                }
            }
            Err(e) => warn!("workbook export failed, falling back to flat text: {}", e),
        }
    }

    ExportArtifact {
        bytes: flat_text_report(result, &sheets).into_bytes(),
        filename: format!("{}.csv", base_name),
        format: ExportFormat::FlatText,
    }
}

/// One sheet per status, in report order
fn build_sheets(result: &DiffResult) -> Vec<Sheet> {
    DiffStatus::ALL
        .iter()
        .map(|&status| build_sheet(result, status))
        .collect()
}

/// Flatten one status group: every row carries `__status` and `__key`,
/// left-side fields prefixed `L.` and right-side fields prefixed `R.`.
/// An absent side contributes no prefixed columns for that row. Column
/// order is first appearance across the group's entries.
fn build_sheet(result: &DiffResult, status: DiffStatus) -> Sheet {
    let entries: Vec<&DiffEntry> = result.entries_with_status(status).collect();

    let mut columns: IndexSet<String> = IndexSet::new();
    columns.insert("__status".to_string());
    columns.insert("__key".to_string());
    for entry in &entries {
        if let Some(left) = &entry.left {
            for field in left.keys() {
                columns.insert(format!("L.{}", field));
            }
        }
        if let Some(right) = &entry.right {
            for field in right.keys() {
                columns.insert(format!("R.{}", field));
            }
        }
    }

    let mut rows = Vec::with_capacity(entries.len() + 1);
    rows.push(columns.iter().cloned().collect::<Vec<_>>());
    for entry in entries {
        rows.push(
            columns
                .iter()
                .map(|column| flattened_cell(entry, column))
                .collect(),
        );
    }

    Sheet {
        name: status.as_str().to_string(),
        rows,
    }
}

fn flattened_cell(entry: &DiffEntry, column: &str) -> String {
    if column == "__status" {
        return entry.status.to_string();
    }
    if column == "__key" {
        return entry.key.render();
    }
    prefixed_value(&entry.left, "L.", column)
        .or_else(|| prefixed_value(&entry.right, "R.", column))
        .map(Value::render)
        .unwrap_or_default()
}

fn prefixed_value<'a>(
    record: &'a Option<Record>,
    prefix: &str,
    column: &str,
) -> Option<&'a Value> {
    let field = column.strip_prefix(prefix)?;
    record.as_ref()?.get(field)
}

/// Fallback document: a comment line naming the key field, then one
/// CSV section per status group under a `##` section header.
fn flat_text_report(result: &DiffResult, sheets: &[Sheet]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# key field: {}\n", result.key_field));
    for sheet in sheets {
        out.push_str(&format!("## {}\n", sheet.name));
        for row in &sheet.rows {
            let line = row
                .iter()
                .map(|cell| csv_escape(cell))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Quote a cell containing a comma, quote, or newline; embedded quotes
/// are doubled.
pub fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
