//! Flatten the grouped hierarchy into output rows with subtotals.
//!
//! # Output Layout
//!
//! ```text
//! Parent Category,Food
//! Category,Dining
//! 2023-01-01,Coffee,Coffee Shop,4.5,debit,Food,Dining
//! ,,Category Total,4.50
//!
//! ,,Parent Total,4.50
//!
//!
//! ```
//!
//! The parent total is the sum of its category subtotals, not a fresh sum
//! over records. A non-numeric amount makes every total above it `NaN`.

use crate::format::two_decimals;
use crate::models::{CategoryGroup, ParentGroup, Row};

pub const PARENT_LABEL: &str = "Parent Category";
pub const CATEGORY_LABEL: &str = "Category";
pub const CATEGORY_TOTAL_LABEL: &str = "Category Total";
pub const PARENT_TOTAL_LABEL: &str = "Parent Total";

/// Build the output table for the grouped records.
pub fn build_rows(parents: &[ParentGroup]) -> Vec<Row> {
    let mut rows = Vec::new();

    for parent in parents {
        rows.push(label_row(PARENT_LABEL, &parent.name));

        let mut parent_total = 0.0;
        for category in &parent.categories {
            parent_total += push_category(&mut rows, category);
        }

        rows.push(total_row(PARENT_TOTAL_LABEL, parent_total));
        rows.push(Row::new());
        rows.push(Row::new());
    }

    rows
}

/// Emit one category block and return its subtotal.
fn push_category(rows: &mut Vec<Row>, category: &CategoryGroup) -> f64 {
    rows.push(label_row(CATEGORY_LABEL, &category.name));
    rows.extend(category.records.iter().map(|r| r.cells()));

    let subtotal = category.subtotal();
    rows.push(total_row(CATEGORY_TOTAL_LABEL, subtotal));
    rows.push(Row::new());

    subtotal
}

fn label_row(label: &str, name: &str) -> Row {
    vec![label.to_string(), name.to_string()]
}

fn total_row(label: &str, total: f64) -> Row {
    vec![
        String::new(),
        String::new(),
        label.to_string(),
        two_decimals(total),
    ]
}
