//! Backend services for the connectivity checker.
//!
//! - `pool` - Database connection pooling with deadpool-postgres
//! - `diagnostics` - The diagnostic queries the checker runs

pub mod diagnostics;
pub mod pool;

pub use diagnostics::Diagnostics;
pub use pool::{CheckPool, PooledConnection};
