//! Group flat transaction records into a parent → category hierarchy.
//!
//! # Architecture
//!
//! ```text
//! Records (flat)                      →  Grouped
//! ┌─────────────────────────────┐       ┌──────────────────────────┐
//! │ Coffee    Food / Dining     │       │ Food                     │
//! │ Groceries Food / Groceries  │  →    │ ├── Dining    [Coffee]   │
//! │ Paycheck  Income / Salary   │       │ └── Groceries [Groceries]│
//! └─────────────────────────────┘       │ Income                   │
//!                                       │ └── Salary    [Paycheck] │
//!                                       └──────────────────────────┘
//! ```
//!
//! Groups keep the order in which their name was first seen; records keep
//! input order inside their group. Names are compared exactly (case and
//! whitespace matter). Lookup is a linear scan, which is fine for the few
//! hundred lines a monthly export holds.

use crate::models::{CategoryGroup, ParentGroup, Record};

/// Partition records by (parent, category), preserving first-seen order.
pub fn group_records(records: Vec<Record>) -> Vec<ParentGroup> {
    let mut parents: Vec<ParentGroup> = Vec::new();

    for record in records {
        let p = index_or_insert(
            &mut parents,
            |g| g.name == record.parent,
            || ParentGroup::new(record.parent.clone()),
        );
        let categories = &mut parents[p].categories;
        let c = index_or_insert(
            categories,
            |g| g.name == record.category,
            || CategoryGroup::new(record.category.clone()),
        );
        categories[c].records.push(record);
    }

    parents
}

/// Index of the first matching item, appending a new one when none matches.
fn index_or_insert<T>(
    items: &mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    create: impl FnOnce() -> T,
) -> usize {
    match items.iter().position(matches) {
        Some(i) => i,
        None => {
            items.push(create());
            items.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(description: &str, parent: &str, category: &str) -> Record {
        Record {
            date: "2023-01-01".into(),
            description: description.into(),
            original: description.into(),
            amount: 1.0,
            kind: "debit".into(),
            parent: parent.into(),
            category: category.into(),
        }
    }

    fn names(parents: &[ParentGroup]) -> Vec<(&str, Vec<&str>)> {
        parents
            .iter()
            .map(|p| {
                (
                    p.name.as_str(),
                    p.categories.iter().map(|c| c.name.as_str()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_single_parent_multiple_categories() {
        let grouped = group_records(vec![
            record("Coffee", "Food", "Dining"),
            record("Groceries", "Food", "Groceries"),
        ]);

        assert_eq!(grouped.len(), 1);
        assert_eq!(names(&grouped), vec![("Food", vec!["Dining", "Groceries"])]);
    }

    #[test]
    fn test_first_seen_order_not_sorted() {
        let grouped = group_records(vec![
            record("Paycheck", "Income", "Salary"),
            record("Coffee", "Food", "Dining"),
            record("Bonus", "Income", "Bonus"),
            record("Lunch", "Food", "Dining"),
            record("Rent", "Bills", "Housing"),
        ]);

        assert_eq!(
            names(&grouped),
            vec![
                ("Income", vec!["Salary", "Bonus"]),
                ("Food", vec!["Dining"]),
                ("Bills", vec!["Housing"]),
            ]
        );
    }

    #[test]
    fn test_records_keep_input_order() {
        let grouped = group_records(vec![
            record("First", "Food", "Dining"),
            record("Other", "Food", "Groceries"),
            record("Second", "Food", "Dining"),
            record("Third", "Food", "Dining"),
        ]);

        let dining: Vec<&str> = grouped[0].categories[0]
            .records
            .iter()
            .map(|r| r.description.as_str())
            .collect();
        assert_eq!(dining, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_same_category_under_different_parents() {
        let grouped = group_records(vec![
            record("A", "Food", "Other"),
            record("B", "Bills", "Other"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].categories[0].records.len(), 1);
        assert_eq!(grouped[1].categories[0].records.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let grouped = group_records(vec![
            record("A", "Food", "Dining"),
            record("B", "food", "dining"),
        ]);

        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn test_every_record_lands_once() {
        let records: Vec<Record> = (0..50)
            .map(|i| record(&format!("r{}", i), &format!("P{}", i % 3), &format!("C{}", i % 7)))
            .collect();
        let grouped = group_records(records);

        let total: usize = grouped.iter().map(|p| p.record_count()).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_records(Vec::new()).is_empty());
    }
}
