// CSV parsing for lens sheets and the compatibility matrix
// The lens sheets are exported spreadsheets: a single header row, quoted
// cells where a value contains commas, no escaped quotes.

use std::collections::BTreeMap;

use crate::constants::MATRIX_SKIP_LINES;
use super::CompatibilityRule;

/// A parsed CSV row keyed by trimmed header name
pub type CsvRow = BTreeMap<String, String>;

/// Parse a headed CSV document into rows.
/// Blank lines are skipped; rows whose cell count differs from the header are dropped.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    let mut lines = text.split('\n');
    let headers: Vec<String> = match lines.next() {
        Some(header) => header.split(',').map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values = split_quoted_line(line);
        if values.len() != headers.len() {
            log::debug!("Dropping CSV row with {} cells (expected {})", values.len(), headers.len());
            continue;
        }

        rows.push(headers.iter().cloned().zip(values).collect());
    }

    rows
}

/// Split one line on commas outside double quotes. Quote characters toggle
/// quoting and are dropped; each cell is trimmed.
pub fn split_quoted_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Parse the camera x accessory matrix.
/// Lines 0 and 1 are header and metadata. Cells are split on plain commas;
/// only the first four are read.
pub fn parse_compatibility_csv(text: &str) -> Vec<CompatibilityRule> {
    text.split('\n')
        .skip(MATRIX_SKIP_LINES)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() < 4 {
                return None;
            }
            Some(CompatibilityRule {
                camera_id: parts[0].trim().to_string(),
                accessory_id: parts[1].trim().to_string(),
                compatible: parts[2].trim().to_lowercase() == "true",
                reason: parts[3].trim().to_string(),
            })
        })
        .collect()
}
