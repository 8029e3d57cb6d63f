//! Data models for the connectivity checker.
//!
//! - `config` - CheckConfig read once from the environment
//! - `table` - Per-run table summaries from the catalog
//! - `version` - Parsed server version string
//! - `outcome` - Overall run outcome and exit-code mapping

pub mod config;
pub mod outcome;
pub mod table;
pub mod version;

pub use config::CheckConfig;
pub use outcome::RunOutcome;
pub use table::{TableEntry, TableSummary};
pub use version::ServerVersion;
