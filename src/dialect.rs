//! Delimiter detection for delimited text sources

use log::debug;

/// Infer the field delimiter from a text sample.
///
/// Counts tabs, commas, and semicolons in the sample (the caller caps
/// it at `DELIMITER_SAMPLE_CHARS`); ties favor tab over comma over
/// semicolon. This is a heuristic, not a guarantee.
pub fn detect_delimiter(sample: &str) -> char {
    let mut tabs = 0usize;
    let mut commas = 0usize;
    let mut semicolons = 0usize;

    for ch in sample.chars() {
        match ch {
            '\t' => tabs += 1,
            ',' => commas += 1,
            ';' => semicolons += 1,
            _ => {}
        }
    }

    let delimiter = if tabs >= commas && tabs >= semicolons {
        '\t'
    } else if commas >= semicolons {
        ','
    } else {
        ';'
    };

    debug!(
        "delimiter detection: tab={} comma={} semicolon={} -> {:?}",
        tabs, commas, semicolons, delimiter
    );
    delimiter
}
