//! Server version string parsing.

use std::fmt;

/// The server's `version()` output with the version token extracted.
///
/// `version()` returns a line like `PostgreSQL 16.2 on x86_64-pc-linux-gnu,
/// compiled by gcc ...`; the token is the second word. When parsing fails
/// the display degrades to the raw string.
#[derive(Debug, Clone)]
pub struct ServerVersion {
    /// Raw `version()` output
    pub raw: String,
    /// Extracted version token (e.g., "16.2"), if the string had one
    pub token: Option<String>,
}

impl ServerVersion {
    /// Parse the raw `version()` output.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let token = raw.split_whitespace().nth(1).map(String::from);
        Self { raw, token }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{token}"),
            None => write!(f, "{}", self.raw),
        }
    }
}
