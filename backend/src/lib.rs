//! # BECU Converter - regroup bank transaction exports by category
//!
//! Reads a transaction CSV exported from the bank, regroups line items by
//! parent category and category, adds subtotals, and writes the result back
//! as CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ CSV text │──▶│  Parser  │──▶│ Grouper  │──▶│  Report  │──▶│  Writer  │──▶ CSV text
//! │          │   │ (records)│   │(parent → │   │ (rows +  │   │ (join)   │
//! │          │   │          │   │ category)│   │ totals)  │   │          │
//! └──────────┘   └──────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use becu_convert::convert_text;
//!
//! let input = "Date,Description,Original,Amount,Type,Parent,Category\n\
//!              2023-01-03,Paycheck,Employer,-1000.00,credit,Income,Salary";
//! let output = convert_text(input);
//! assert!(output.contains(",,Parent Total,-1000.00"));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types for the edges of the pipeline
//! - [`models`] - Record and group types
//! - [`format`] - Number rendering for amounts and totals
//! - [`parser`] - Byte decoding and record parsing
//! - [`transform`] - Grouping, totals, CSV writing, pipeline
//! - [`config`] - Server configuration
//! - [`api`] - HTTP upload boundary

// Core modules
pub mod error;
pub mod format;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Boundary
pub mod api;
pub mod config;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, ReadError, ServerError, UploadError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CategoryGroup, ParentGroup, Record, Row};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_bytes,
    decode_content,
    detect_encoding,
    parse_amount,
    parse_records,
    read_file,
    DecodedText,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    build_rows,
    group_records,
    to_csv,
    convert,
    convert_bytes,
    convert_file,
    convert_text,
    Conversion,
    ConversionStats,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::ServerConfig;

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
