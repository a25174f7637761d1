//! Transformation module.
//!
//! The four pipeline stages after parsing:
//! - Grouper: records to parent → category hierarchy
//! - Report: hierarchy to rows with subtotals
//! - Writer: rows to CSV text
//! - Pipeline: the stages chained together

pub mod grouper;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use grouper::group_records;
pub use pipeline::*;
pub use report::build_rows;
pub use writer::to_csv;
