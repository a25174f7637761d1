//! Domain models for the conversion pipeline.
//!
//! - [`Record`] - One transaction line from the bank export
//! - [`CategoryGroup`] - Records sharing a category within one parent
//! - [`ParentGroup`] - Categories sharing a parent category
//! - [`Row`] - One line of the output table
//!
//! Everything here lives for a single conversion only.

use serde::Serialize;

use crate::format::number_text;

/// One line of the output table, as text cells. An empty row is a separator.
pub type Row = Vec<String>;

// =============================================================================
// Record
// =============================================================================

/// A single transaction line.
///
/// Text fields are carried through untouched. `amount` is NaN when the
/// export held something that is not a number.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Record {
    pub date: String,
    pub description: String,
    /// Original (bank-side) description.
    pub original: String,
    pub amount: f64,
    /// Debit/credit label.
    #[serde(rename = "type")]
    pub kind: String,
    /// Parent category.
    pub parent: String,
    pub category: String,
}

impl Record {
    /// The seven output cells, in export column order.
    pub fn cells(&self) -> Row {
        vec![
            self.date.clone(),
            self.description.clone(),
            self.original.clone(),
            number_text(self.amount),
            self.kind.clone(),
            self.parent.clone(),
            self.category.clone(),
        ]
    }

    /// Whether the amount failed to parse.
    pub fn is_non_numeric(&self) -> bool {
        self.amount.is_nan()
    }
}

// =============================================================================
// Groups
// =============================================================================

/// Records sharing one category name under a parent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub records: Vec<Record>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Sum of amounts in record order, starting from zero. NaN propagates.
    pub fn subtotal(&self) -> f64 {
        self.records.iter().fold(0.0, |acc, r| acc + r.amount)
    }
}

/// Categories sharing one parent category name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParentGroup {
    pub name: String,
    pub categories: Vec<CategoryGroup>,
}

impl ParentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Number of records across all categories.
    pub fn record_count(&self) -> usize {
        self.categories.iter().map(|c| c.records.len()).sum()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: f64) -> Record {
        Record {
            date: "2023-01-01".into(),
            description: "Coffee".into(),
            original: "Coffee Shop".into(),
            amount,
            kind: "debit".into(),
            parent: "Food".into(),
            category: "Dining".into(),
        }
    }

    #[test]
    fn test_record_cells_order() {
        let cells = record(4.5).cells();
        assert_eq!(
            cells,
            vec!["2023-01-01", "Coffee", "Coffee Shop", "4.5", "debit", "Food", "Dining"]
        );
    }

    #[test]
    fn test_subtotal_sums_in_order() {
        let mut group = CategoryGroup::new("Dining");
        group.records.push(record(4.5));
        group.records.push(record(60.0));
        assert_eq!(group.subtotal(), 64.5);
    }

    #[test]
    fn test_empty_group_subtotal_is_zero() {
        assert_eq!(CategoryGroup::new("Empty").subtotal(), 0.0);
    }

    #[test]
    fn test_nan_poisons_subtotal() {
        let mut group = CategoryGroup::new("Dining");
        group.records.push(record(4.5));
        group.records.push(record(f64::NAN));
        assert!(group.subtotal().is_nan());
        assert!(group.records[1].is_non_numeric());
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_value(record(f64::NAN)).unwrap();
        assert_eq!(json["type"], "debit");
        assert!(json["amount"].is_null());
    }
}
