//! v6canon Core - Canonical IPv6 text compression
//!
//! Converts fully expanded IPv6 addresses (eight colon-separated groups of
//! hex digits) into their RFC 5952 style compressed text, and provides a
//! small spreadsheet-like filter table.
//!
//! # Architecture
//!
//! ```text
//! Address text → Parser → Address (8 groups) → Normalizer → Compressed text
//!                                                 ↓
//!                              suppress leading zeros → elide longest zero run
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: Same input always produces identical output
//! - **Pure**: No I/O and no shared state, safe to call from any thread
//! - **Canonical**: One compressed form per address

pub mod conformance;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod table;

pub use error::{Error, Result};
pub use normalizer::{compress, select_run, simplify, suppress, zero_runs, ZeroRun};
pub use parser::{Address, GROUP_COUNT};
pub use table::FilterTable;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
