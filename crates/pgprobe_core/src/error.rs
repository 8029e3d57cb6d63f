//! Error types for the connectivity checker.
//!
//! Connection-level failures are classified from the PostgreSQL SQLSTATE
//! (or the underlying io error) so the report can print actionable hints.

use thiserror::Error;

/// Main error type for the connectivity checker.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Network-level refusal: nothing is listening at the configured address.
    #[error("connection refused: {message}")]
    Refused {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid credentials or insufficient privilege.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Human-readable error message.
        message: String,
    },

    /// The target database does not exist on the server.
    #[error("database not found: {message}")]
    DatabaseNotFound {
        /// Human-readable error message.
        message: String,
    },

    /// A query failed after the connection itself was established.
    #[error("query failed: {message}")]
    Query {
        /// PostgreSQL error message.
        message: String,
        /// PostgreSQL error code (e.g., "42P01").
        code: Option<String>,
    },

    /// Any other connection-level failure, reported with its raw message.
    #[error("connection error: {message}")]
    Connection {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed environment configuration.
    #[error("config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },
}

impl CheckError {
    /// Create a new unclassified connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection { message: message.into(), source: None }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Get the classification name for the report.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Refused { .. } => "connection refused",
            Self::Authentication { .. } => "authentication",
            Self::DatabaseNotFound { .. } => "database not found",
            Self::Query { .. } => "query",
            Self::Connection { .. } => "connection",
            Self::Config { .. } => "config",
        }
    }

    /// Get actionable remediation hints for the user.
    ///
    /// Unclassified errors carry no hint; the raw message is all we have.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::Refused { .. } => &[
                "check that the PostgreSQL server is running",
                "check the configured host and port",
            ],
            Self::Authentication { .. } => &[
                "check the username and password",
                "check the user's access grants",
            ],
            Self::DatabaseNotFound { .. } => &[
                "the database does not exist; create it before running the checker",
            ],
            Self::Query { .. } | Self::Connection { .. } | Self::Config { .. } => &[],
        }
    }

    /// Classify a server-reported SQLSTATE into an error variant.
    fn from_sqlstate(code: &str, message: String) -> Self {
        match code {
            // invalid_password / invalid_authorization_specification
            "28P01" | "28000" => Self::Authentication { message },
            // invalid_catalog_name
            "3D000" => Self::DatabaseNotFound { message },
            // connection exception class
            _ if code.starts_with("08") => Self::Connection { message, source: None },
            _ => Self::Query { message, code: Some(code.to_string()) },
        }
    }
}

/// Walk an error's source chain looking for an io error.
fn io_error_kind(err: &(dyn std::error::Error + 'static)) -> Option<std::io::ErrorKind> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        current = e.source();
    }
    None
}

/// Convert from tokio_postgres::Error, classifying by SQLSTATE where the
/// server reported one and by the io error kind where it did not.
impl From<tokio_postgres::Error> for CheckError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            return Self::from_sqlstate(db_err.code().code(), db_err.message().to_string());
        }

        if io_error_kind(&err) == Some(std::io::ErrorKind::ConnectionRefused) {
            return Self::Refused { message: err.to_string(), source: Some(Box::new(err)) };
        }

        Self::Connection { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Convert from a pool acquisition error.
impl From<deadpool_postgres::PoolError> for CheckError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        match err {
            deadpool_postgres::PoolError::Backend(e) => Self::from(e),
            deadpool_postgres::PoolError::Timeout(_) => {
                Self::connection("timed out waiting for a connection from the pool")
            }
            other => Self::connection(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_password_classifies_as_authentication() {
        let err = CheckError::from_sqlstate("28P01", "password authentication failed".into());
        assert!(matches!(err, CheckError::Authentication { .. }));
        assert_eq!(err.category(), "authentication");
    }

    #[test]
    fn invalid_authorization_classifies_as_authentication() {
        let err = CheckError::from_sqlstate("28000", "role does not exist".into());
        assert!(matches!(err, CheckError::Authentication { .. }));
    }

    #[test]
    fn missing_catalog_classifies_as_database_not_found() {
        let err = CheckError::from_sqlstate("3D000", "database \"nope\" does not exist".into());
        assert!(matches!(err, CheckError::DatabaseNotFound { .. }));
        assert_eq!(err.hints().len(), 1);
    }

    #[test]
    fn connection_exception_class_stays_unclassified() {
        let err = CheckError::from_sqlstate("08006", "connection failure".into());
        assert!(matches!(err, CheckError::Connection { .. }));
        assert!(err.hints().is_empty());
    }

    #[test]
    fn other_sqlstates_classify_as_query_failures() {
        let err = CheckError::from_sqlstate("42P01", "relation does not exist".into());
        match err {
            CheckError::Query { code, .. } => assert_eq!(code.as_deref(), Some("42P01")),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn refused_errors_carry_both_hints() {
        let err = CheckError::Refused { message: "refused".into(), source: None };
        assert_eq!(err.hints().len(), 2);
        assert_eq!(err.category(), "connection refused");
    }

    #[test]
    fn io_error_kind_walks_the_source_chain() {
        #[derive(Debug)]
        struct Outer(std::io::Error);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "outer")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let outer = Outer(std::io::Error::from(std::io::ErrorKind::ConnectionRefused));
        assert_eq!(io_error_kind(&outer), Some(std::io::ErrorKind::ConnectionRefused));

        let plain = CheckError::config("no io source here");
        assert_eq!(io_error_kind(&plain), None);
    }
}
