//! Join output rows into CSV text.
//!
//! Cells are joined with `,` and rows with `\n`. Nothing is quoted or
//! escaped, mirroring the naive split done by the parser.

use crate::models::Row;

/// Serialize rows into CSV text. An empty row becomes an empty line.
pub fn to_csv(rows: &[Row]) -> String {
    rows.iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}
