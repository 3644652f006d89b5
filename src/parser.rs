//! Format-agnostic parsing of tabular sources into the uniform row model

use crate::codec::WorkbookCodec;
use crate::dialect::detect_delimiter;
use crate::error::{Result, RowdiffError};
use crate::record::{ParsedTable, Record, TableMeta, Value};
use crate::{DELIMITER_SAMPLE_CHARS, FIELD_SAMPLE_LIMIT};
use indexmap::IndexSet;
use log::debug;

/// Parse one source file into a [`ParsedTable`], using the default
/// workbook codec for spreadsheet formats.
pub fn parse_table(file_name: &str, content: &[u8]) -> Result<ParsedTable> {
    parse_table_with_codec(file_name, content, crate::codec::default_codec().as_deref())
}

/// Parse one source file with an explicitly injected workbook codec.
/// `None` makes spreadsheet formats fail with `CodecUnavailable`.
///
/// Dispatch is by extension: `.json` is parsed as a JSON array (or the
/// first array-valued top-level property); `.csv`/`.tsv`/`.txt` as
/// delimited text with quoted-field support; `.xlsx`/`.xls`/`.xlsb`
/// through the codec (first sheet only). Unknown or missing extensions
/// fall back to delimited parsing with delimiter detection.
pub fn parse_table_with_codec(
    file_name: &str,
    content: &[u8],
    codec: Option<&dyn WorkbookCodec>,
) -> Result<ParsedTable> {
    match file_extension(file_name).as_deref() {
        Some("json") => parse_json(file_name, content),
        Some("tsv") => parse_delimited(file_name, content, Some('\t')),
        Some("csv") | Some("txt") => parse_delimited(file_name, content, None),
        Some("xlsx") | Some("xls") | Some("xlsb") => parse_workbook(file_name, content, codec),
        _ => parse_delimited(file_name, content, None),
    }
}

fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn parse_json(file_name: &str, content: &[u8]) -> Result<ParsedTable> {
    // A syntax failure means the content cannot be structurally
    // interpreted for its declared format, so it surfaces as a format
    // error rather than a bare serialization error.
    let root: serde_json::Value = serde_json::from_slice(content)
        .map_err(|e| RowdiffError::format_error(format!("{}: invalid JSON: {}", file_name, e)))?;

    let items = match &root {
        serde_json::Value::Array(items) => items.as_slice(),
        serde_json::Value::Object(map) => map
            .values()
            .find_map(|v| v.as_array())
            .map(|items| items.as_slice())
            .ok_or_else(|| {
                RowdiffError::format_error(format!("no array found in {}", file_name))
            })?,
        _ => {
            return Err(RowdiffError::format_error(format!(
                "no array found in {}",
                file_name
            )))
        }
    };

    let records: Vec<Record> = items.iter().map(json_record).collect();
    debug!("{}: parsed {} JSON records", file_name, records.len());

    Ok(ParsedTable {
        field_names: collect_field_names(&[], &records),
        records,
        source_label: file_name.to_string(),
        meta: None,
    })
}

/// Object elements pass through field by field; scalar elements are
/// wrapped as `{ value: <scalar> }`.
fn json_record(element: &serde_json::Value) -> Record {
    match element {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(name, value)| (name.clone(), Value::from_json(value)))
            .collect(),
        scalar => {
            let mut record = Record::new();
            record.insert("value".to_string(), Value::from_json(scalar));
            record
        }
    }
}

fn parse_delimited(file_name: &str, content: &[u8], forced: Option<char>) -> Result<ParsedTable> {
    let text = String::from_utf8_lossy(content);
    let text = normalize_line_endings(&text);

    let delimiter = forced.unwrap_or_else(|| {
        let sample: String = text.chars().take(DELIMITER_SAMPLE_CHARS).collect();
        detect_delimiter(&sample)
    });

    let rows = tokenize_rows(&text, delimiter);
    build_table(
        file_name,
        rows,
        Some(TableMeta {
            delimiter: Some(delimiter),
            sheet: None,
        }),
    )
}

fn parse_workbook(
    file_name: &str,
    content: &[u8],
    codec: Option<&dyn WorkbookCodec>,
) -> Result<ParsedTable> {
    let codec = codec.ok_or_else(|| {
        RowdiffError::codec_unavailable(format!(
            "no spreadsheet codec available for {}; convert the file to CSV",
            file_name
        ))
    })?;

    let sheet = codec.read_first_sheet(content).map_err(|e| {
        RowdiffError::codec_unavailable(format!(
            "could not read {}: {}; convert the file to CSV",
            file_name, e
        ))
    })?;
    debug!(
        "{}: read sheet '{}' with {} rows",
        file_name,
        sheet.name,
        sheet.rows.len()
    );

    build_table(
        file_name,
        sheet.rows,
        Some(TableMeta {
            delimiter: None,
            sheet: Some(sheet.name),
        }),
    )
}

/// Assemble records from raw rows: the first non-blank row is the
/// header, cells are trimmed, columns beyond the header get synthetic
/// `col{N}` names (1-indexed), and missing trailing cells become empty
/// strings.
fn build_table(
    file_name: &str,
    rows: Vec<Vec<String>>,
    meta: Option<TableMeta>,
) -> Result<ParsedTable> {
    let mut rows = rows.into_iter().filter(|row| !row_is_blank(row));

    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| RowdiffError::format_error(format!("{}: no header row found", file_name)))?
        .into_iter()
        .map(|cell| cell.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for cells in rows {
        let cell_count = cells.len();
        let mut record = Record::with_capacity(header.len().max(cell_count));
        for (index, cell) in cells.into_iter().enumerate() {
            let name = match header.get(index) {
                Some(name) => name.clone(),
                None => synthetic_column_name(&header, &record, index),
            };
            record.insert(name, Value::Text(cell.trim().to_string()));
        }
        if cell_count < header.len() {
            for name in &header[cell_count..] {
                record
                    .entry(name.clone())
                    .or_insert_with(|| Value::Text(String::new()));
            }
        }
        records.push(record);
    }

    Ok(ParsedTable {
        field_names: collect_field_names(&header, &records),
        records,
        source_label: file_name.to_string(),
        meta,
    })
}

/// Name for a cell past the end of the header row. Starts at `col{N}`
/// for the 1-based position and skips names already taken by the header
/// or by earlier cells in the same record.
fn synthetic_column_name(header: &[String], record: &Record, index: usize) -> String {
    let mut n = index + 1;
    loop {
        let name = format!("col{}", n);
        if !header.contains(&name) && !record.contains_key(&name) {
            return name;
        }
        n += 1;
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn row_is_blank(row: &[String]) -> bool {
    row.len() == 1 && row[0].trim().is_empty()
}

/// Split delimited text into rows of unquoted cells. Standard CSV
/// quoting: a quoted cell may contain the delimiter or newlines, and
/// `""` inside a quoted cell is a literal quote. A quote only opens a
/// quoted cell at the start of the cell.
fn tokenize_rows(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
        } else if ch == '"' && cell.is_empty() {
            in_quotes = true;
        } else if ch == delimiter {
            row.push(std::mem::take(&mut cell));
        } else if ch == '\n' {
            row.push(std::mem::take(&mut cell));
            rows.push(std::mem::take(&mut row));
        } else {
            cell.push(ch);
        }
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

/// Union of the seed names and the field names of the first
/// `FIELD_SAMPLE_LIMIT` records, in order of first appearance.
fn collect_field_names(seed: &[String], records: &[Record]) -> Vec<String> {
    let mut names: IndexSet<String> = seed.iter().cloned().collect();
    for record in records.iter().take(FIELD_SAMPLE_LIMIT) {
        for field in record.keys() {
            if !names.contains(field.as_str()) {
                names.insert(field.clone());
            }
        }
    }
    names.into_iter().collect()
}
