//! # rowdiff
//!
//! A key-indexed tabular data comparison tool: parses heterogeneous
//! tabular sources (JSON/CSV/TSV/TXT and spreadsheet workbooks) into a
//! uniform row model, classifies every keyed row as added, deleted,
//! changed, or same, and exports the classified result as a multi-sheet
//! workbook or a sectioned flat-text report.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod export;
pub mod output;
pub mod parser;
pub mod record;

pub use diff::{DiffCounts, DiffEntry, DiffResult, DiffStatus};
pub use error::{Result, RowdiffError};
pub use record::{ParsedTable, Record, TableMeta, Value};

/// Maximum number of records sampled for field-name discovery
pub const FIELD_SAMPLE_LIMIT: usize = 1000;

/// Maximum number of characters examined for delimiter detection
pub const DELIMITER_SAMPLE_CHARS: usize = 2000;
