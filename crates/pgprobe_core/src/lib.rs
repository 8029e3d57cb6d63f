//! Core services for pgprobe, an ad-hoc PostgreSQL connectivity checker.
//!
//! This crate provides everything below the console:
//!
//! - **error**: Error classification with remediation hints
//! - **models**: Configuration, table summaries, and the run outcome
//! - **services**: Connection pooling and the diagnostic queries
//! - **logging**: Structured logging setup

pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::CheckError;
pub use models::{CheckConfig, RunOutcome, ServerVersion, TableEntry, TableSummary};
pub use services::{CheckPool, Diagnostics, PooledConnection};
