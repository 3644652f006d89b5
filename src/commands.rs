//! Command implementations for the rowdiff CLI

use crate::cli::{Commands, OutputFormat};
use crate::codec;
use crate::diff::diff_tables;
use crate::error::{Result, RowdiffError};
use crate::export::export_report;
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::parser::parse_table;
use crate::record::ParsedTable;
use chrono::Local;
use log::info;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Fields { input, format } => fields_command(&input, &format),
        Commands::Compare {
            left,
            right,
            key,
            format,
            include_same,
            export,
            output,
        } => compare_command(
            &left,
            &right,
            &key,
            &format,
            include_same,
            export,
            output.as_deref(),
        ),
    }
}

/// List the field-name union of one input, for key selection
fn fields_command(input: &Path, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(RowdiffError::invalid_input)?;
    let table = load_table(input)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_fields(&table),
        OutputFormat::Json => println!("{}", JsonFormatter::format_fields(&table)?),
    }
    Ok(())
}

/// Compare two inputs on a key field, print the result, optionally
/// write an exportable report
fn compare_command(
    left: &Path,
    right: &Path,
    key: &str,
    format: &str,
    include_same: bool,
    export: bool,
    output: Option<&Path>,
) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(RowdiffError::invalid_input)?;

    // Parse failures are per-file: report both sides before giving up,
    // so a problem on one side does not hide the other.
    let left_table = load_table(left);
    let right_table = load_table(right);
    if let Err(e) = &left_table {
        eprintln!("❌ {}: {}", left.display(), e);
    }
    if let Err(e) = &right_table {
        eprintln!("❌ {}: {}", right.display(), e);
    }
    let (left_table, right_table) = match (left_table, right_table) {
        (Ok(l), Ok(r)) => (l, r),
        _ => {
            return Err(RowdiffError::invalid_input(
                "comparison requires both inputs to parse",
            ))
        }
    };

    // Key choice is a caller-level precondition, checked here rather
    // than in the reconciler.
    for (table, path) in [(&left_table, left), (&right_table, right)] {
        if !table.has_field(key) {
            return Err(RowdiffError::invalid_input(format!(
                "key field '{}' not present in {}",
                key,
                path.display()
            )));
        }
    }

    let result = diff_tables(&left_table, &right_table, key);
    info!(
        "compared {} and {}: {} keys ({} skipped)",
        left.display(),
        right.display(),
        result.counts.total,
        result.skipped_left + result.skipped_right
    );

    match format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_summary(&result);
            PrettyPrinter::print_entries(&result, include_same);
        }
        OutputFormat::Json => println!("{}", JsonFormatter::format_diff(&result)?),
    }

    if export {
        let base = match output {
            Some(path) => path.to_string_lossy().into_owned(),
            None => default_report_base(left, right),
        };
        let codec = codec::default_codec();
        let artifact = export_report(&result, &base, codec.as_deref());
        std::fs::write(&artifact.filename, &artifact.bytes)?;
        println!("📄 Report written to {}", artifact.filename);
    }

    Ok(())
}

fn load_table(path: &Path) -> Result<ParsedTable> {
    let content = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    parse_table(file_name, &content)
}

/// Timestamped default report base, e.g. `old-vs-new-20260829-153000`
fn default_report_base(left: &Path, right: &Path) -> String {
    let stem = |p: &Path| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("input")
            .to_string()
    };
    format!(
        "{}-vs-{}-{}",
        stem(left),
        stem(right),
        Local::now().format("%Y%m%d-%H%M%S")
    )
}
