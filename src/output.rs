//! Output formatting utilities

use crate::diff::{DiffResult, DiffStatus};
use crate::error::Result;
use crate::record::ParsedTable;

/// Pretty printer for rowdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the field-name union of a parsed table
    pub fn print_fields(table: &ParsedTable) {
        println!(
            "📋 Fields in {} ({} records):",
            table.source_label,
            table.record_count()
        );
        if table.field_names.is_empty() {
            println!("└─ (none)");
            return;
        }
        for (i, name) in table.field_names.iter().enumerate() {
            let prefix = if i == table.field_names.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!("{} {}", prefix, name);
        }
    }

    /// Print diff summary counts
    pub fn print_summary(result: &DiffResult) {
        println!("🔍 Comparison on key '{}':", result.key_field);
        println!("├─ Added:   {}", result.counts.added);
        println!("├─ Deleted: {}", result.counts.deleted);
        println!("├─ Changed: {}", result.counts.changed);
        println!("├─ Same:    {}", result.counts.same);
        println!("└─ Total:   {}", result.counts.total);

        if result.skipped_left > 0 || result.skipped_right > 0 {
            println!(
                "⚠️  Skipped records without key value: left={}, right={}",
                result.skipped_left, result.skipped_right
            );
        }
    }

    /// Print the classified entries. Unchanged rows are a presentation
    /// concern: they are filtered out unless `include_same` is set.
    pub fn print_entries(result: &DiffResult, include_same: bool) {
        for entry in &result.entries {
            if entry.status == DiffStatus::Same && !include_same {
                continue;
            }
            let marker = match entry.status {
                DiffStatus::Added => "+",
                DiffStatus::Deleted => "-",
                DiffStatus::Changed => "~",
                DiffStatus::Same => "=",
            };
            println!("{} [{}] {}", marker, entry.status, entry.key.render());
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_diff(result: &DiffResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    pub fn format_fields(table: &ParsedTable) -> Result<String> {
        Ok(serde_json::to_string_pretty(&table.field_names)?)
    }
}
