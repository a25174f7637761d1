//! HTTP API module.
//!
//! The upload boundary: server, JSON types and the log stream.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server};
pub use types::*;
