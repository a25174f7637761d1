//! High-level pipeline API: export text in, grouped CSV text out.
//!
//! ```text
//! text ─▶ parse_records ─▶ group_records ─▶ build_rows ─▶ to_csv ─▶ text
//! ```
//!
//! # Example
//!
//! ```rust
//! use becu_convert::convert_text;
//!
//! let input = "Date,Description,Original,Amount,Type,Parent,Category\n\
//!              2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining";
//! let output = convert_text(input);
//!
//! assert!(output.starts_with("Parent Category,Food\nCategory,Dining\n"));
//! assert!(output.contains(",,Category Total,4.50"));
//! ```

use serde::Serialize;
use std::path::Path;

use super::grouper::group_records;
use super::report::build_rows;
use super::writer::to_csv;
use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::ReadResult;
use crate::models::ParentGroup;
use crate::parser::{decode_bytes, parse_records, read_file, DecodedText};

/// Result of a conversion with a few statistics for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    /// Grouped CSV text, ready to download
    pub csv: String,

    /// Encoding the input was decoded from, when it came in as bytes
    pub encoding: Option<String>,

    pub stats: ConversionStats,
}

/// Counts gathered while converting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    pub record_count: usize,
    pub parent_count: usize,
    pub category_count: usize,
    /// Records whose amount is not a number
    pub non_numeric_count: usize,
}

impl ConversionStats {
    fn from_groups(parents: &[ParentGroup]) -> Self {
        let categories = parents.iter().flat_map(|p| &p.categories);
        Self {
            record_count: parents.iter().map(|p| p.record_count()).sum(),
            parent_count: parents.len(),
            category_count: categories.clone().count(),
            non_numeric_count: categories
                .flat_map(|c| &c.records)
                .filter(|r| r.is_non_numeric())
                .count(),
        }
    }
}

/// Convert export text to grouped CSV text. Never fails.
pub fn convert_text(content: &str) -> String {
    let parents = group_records(parse_records(content));
    to_csv(&build_rows(&parents))
}

/// Convert export text, logging each stage and collecting statistics.
pub fn convert(content: &str) -> Conversion {
    log_info("📖 Parsing records...");
    let records = parse_records(content);
    log_success(format!("Read {} records", records.len()));

    log_info("📦 Grouping by parent category and category...");
    let parents = group_records(records);
    let stats = ConversionStats::from_groups(&parents);
    log_success(format!(
        "{} parent categories, {} categories",
        stats.parent_count, stats.category_count
    ));

    if stats.non_numeric_count > 0 {
        log_warning(format!(
            "{} records have a non-numeric amount; their totals will read NaN",
            stats.non_numeric_count
        ));
    }

    log_info("🧮 Computing subtotals...");
    let rows = build_rows(&parents);
    let csv = to_csv(&rows);
    log_success(format!("Wrote {} rows", rows.len()));

    Conversion {
        csv,
        encoding: None,
        stats,
    }
}

/// Decode raw bytes and convert them.
pub fn convert_bytes(bytes: &[u8]) -> ReadResult<Conversion> {
    let decoded = decode_bytes(bytes)?;
    Ok(convert_decoded(decoded))
}

/// Read a file from disk and convert it.
pub fn convert_file(path: &Path) -> ReadResult<Conversion> {
    let decoded = read_file(path)?;
    Ok(convert_decoded(decoded))
}

fn convert_decoded(decoded: DecodedText) -> Conversion {
    log_success(format!("Detected encoding: {}", decoded.encoding));
    let mut conversion = convert(&decoded.content);
    conversion.encoding = Some(decoded.encoding);
    conversion
}
