//! Bank export reading and parsing.
//!
//! Two steps live here:
//!
//! 1. Bytes → text, with encoding auto-detection ([`decode_bytes`], [`read_file`])
//! 2. Text → [`Record`]s ([`parse_records`])
//!
//! Parsing is deliberately naive: the first line is dropped as a header,
//! every other line is split on `,` and mapped by position. Quoted commas are
//! not honored. Bad rows never fail; a missing column becomes an empty string
//! and a non-numeric amount becomes NaN.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::{ReadError, ReadResult};
use crate::models::Record;

/// Longest numeric prefix accepted for an amount.
static AMOUNT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("amount regex is valid")
});

/// Decoded file content with the encoding it was read as.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub content: String,
    pub encoding: String,
}

// =============================================================================
// Bytes → text
// =============================================================================

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// UTF-8 input with invalid sequences is decoded lossily. An encoding label
/// that is unknown fails only when the bytes are not UTF-8 either.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ReadResult<String> {
    let content = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8(bytes.to_vec()).map_err(|_| ReadError::Encoding {
                encoding: encoding.to_string(),
            })?,
        },
    };

    Ok(match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    })
}

/// Decode bytes with auto-detected encoding.
pub fn decode_bytes(bytes: &[u8]) -> ReadResult<DecodedText> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    Ok(DecodedText { content, encoding })
}

/// Read a file from disk and decode it with auto-detected encoding.
pub fn read_file<P: AsRef<Path>>(path: P) -> ReadResult<DecodedText> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bytes(&bytes)
}

// =============================================================================
// Text → records
// =============================================================================

/// Parse export text into records, in input order.
///
/// # Example
/// ```
/// use becu_convert::parser::parse_records;
///
/// let csv = "Date,Description,Original,Amount,Type,Parent,Category\n\
///            2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining";
/// let records = parse_records(csv);
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].amount, 4.5);
/// assert_eq!(records[0].category, "Dining");
/// ```
pub fn parse_records(content: &str) -> Vec<Record> {
    content.split('\n').skip(1).map(parse_line).collect()
}

fn parse_line(line: &str) -> Record {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let field = |i: usize| fields.get(i).copied().unwrap_or("").to_string();

    Record {
        date: field(0),
        description: field(1),
        original: field(2),
        amount: parse_amount(fields.get(3).copied().unwrap_or("")),
        kind: field(4),
        parent: field(5),
        category: field(6),
    }
}

/// Best-effort number parse.
///
/// Reads the longest numeric prefix and ignores what follows
/// (`"4.50 USD"` → 4.5). Returns NaN when there is no numeric prefix.
pub fn parse_amount(raw: &str) -> f64 {
    AMOUNT_PREFIX
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Date,Description,Original,Amount,Type,Parent,Category";

    #[test]
    fn test_simple_export() {
        let csv = format!(
            "{}\n2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining\n2023-01-02,Groceries,Market,60.00,debit,Food,Groceries",
            HEADER
        );
        let records = parse_records(&csv);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2023-01-01");
        assert_eq!(records[0].description, "Coffee");
        assert_eq!(records[0].original, "Coffee Shop");
        assert_eq!(records[0].amount, 4.5);
        assert_eq!(records[0].kind, "debit");
        assert_eq!(records[0].parent, "Food");
        assert_eq!(records[0].category, "Dining");
        assert_eq!(records[1].amount, 60.0);
    }

    #[test]
    fn test_header_is_dropped_whatever_it_contains() {
        let csv = "2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining\n2023-01-02,Tea,Tea Shop,3,debit,Food,Dining";
        let records = parse_records(csv);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Tea");
    }

    #[test]
    fn test_empty_and_header_only() {
        assert!(parse_records("").is_empty());
        assert!(parse_records(HEADER).is_empty());
    }

    #[test]
    fn test_trailing_newline_yields_blank_record() {
        let csv = format!("{}\n2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining\n", HEADER);
        let records = parse_records(&csv);

        assert_eq!(records.len(), 2);
        let blank = &records[1];
        assert_eq!(blank.date, "");
        assert_eq!(blank.parent, "");
        assert_eq!(blank.category, "");
        assert!(blank.amount.is_nan());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let csv = format!("{}\n 2023-01-01 , Coffee ,Coffee Shop, 4.50 ,debit, Food , Dining \r", HEADER);
        let records = parse_records(&csv);

        assert_eq!(records[0].date, "2023-01-01");
        assert_eq!(records[0].description, "Coffee");
        assert_eq!(records[0].amount, 4.5);
        assert_eq!(records[0].parent, "Food");
        assert_eq!(records[0].category, "Dining");
    }

    #[test]
    fn test_missing_columns_become_empty() {
        let csv = format!("{}\n2023-01-01,Coffee,Coffee Shop,4.50", HEADER);
        let records = parse_records(&csv);

        assert_eq!(records[0].amount, 4.5);
        assert_eq!(records[0].kind, "");
        assert_eq!(records[0].parent, "");
        assert_eq!(records[0].category, "");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = format!("{}\n2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining,extra,more", HEADER);
        let records = parse_records(&csv);

        assert_eq!(records[0].category, "Dining");
    }

    #[test]
    fn test_quoted_commas_are_split() {
        let csv = format!("{}\n2023-01-01,\"Coffee, large\",Coffee Shop,4.50,debit,Food,Dining", HEADER);
        let records = parse_records(&csv);

        assert_eq!(records[0].description, "\"Coffee");
        assert_eq!(records[0].original, "large\"");
        assert!(records[0].amount.is_nan());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("4.50"), 4.5);
        assert_eq!(parse_amount("-1000.00"), -1000.0);
        assert_eq!(parse_amount("+3"), 3.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("4.50 USD"), 4.5);
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("Infinity"), f64::INFINITY);
        assert_eq!(parse_amount("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_amount_not_a_number() {
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("abc").is_nan());
        assert!(parse_amount("$4.50").is_nan());
        assert!(parse_amount("-").is_nan());
        assert!(parse_amount(".").is_nan());
    }

    #[test]
    fn test_windows_1252_decoding() {
        // "Café" in Windows-1252
        let bytes: &[u8] = &[0x43, 0x61, 0x66, 0xE9];
        let decoded = decode_content(bytes, "windows-1252").unwrap();
        assert_eq!(decoded, "Café");
    }

    #[test]
    fn test_decoding_matches_utf8_records() {
        let utf8 = format!("{}\n2023-01-01,Café,Café Rouge,4.50,debit,Food,Dining", HEADER);
        let (latin, _, _) = encoding_rs::WINDOWS_1252.encode(&utf8);
        let decoded = decode_content(&latin, "windows-1252").unwrap();

        assert_eq!(parse_records(&decoded), parse_records(&utf8));
    }

    #[test]
    fn test_detected_latin_export_matches_utf8_records() {
        let utf8 = format!("{}\n2023-01-01,Café,Café Rouge,4.50,debit,Food,Dining", HEADER);
        let (latin, _, _) = encoding_rs::WINDOWS_1252.encode(&utf8);

        let decoded = decode_bytes(&latin).unwrap();
        assert_ne!(decoded.encoding, "utf-8");
        assert_eq!(parse_records(&decoded.content), parse_records(&utf8));
    }

    #[test]
    fn test_empty_bytes() {
        let decoded = decode_bytes(b"").unwrap();
        assert_eq!(decoded.encoding, "utf-8");
        assert_eq!(decoded.content, "");
    }

    #[test]
    fn test_bom_is_removed() {
        let bytes = b"\xEF\xBB\xBFDate,Amount\n";
        let decoded = decode_bytes(bytes).unwrap();
        assert!(decoded.content.starts_with("Date"));
    }

    #[test]
    fn test_unknown_encoding_accepts_utf8() {
        assert_eq!(decode_content(b"plain", "x-unknown").unwrap(), "plain");
        assert!(decode_content(&[0xFF, 0xFE, 0x00], "x-unknown").is_err());
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}\n2023-01-01,Coffee,Coffee Shop,4.50,debit,Food,Dining", HEADER).unwrap();

        let decoded = read_file(file.path()).unwrap();
        assert_eq!(parse_records(&decoded.content).len(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");

        let err = read_file(&missing).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
