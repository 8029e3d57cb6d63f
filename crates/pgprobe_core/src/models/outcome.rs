//! Overall run outcome and its exit-code mapping.

use crate::error::CheckError;
use std::process::ExitCode;

/// The result of one checker run, produced once at the end.
///
/// Only a failure to connect flips the outcome; table listing, per-table
/// counts, and the write probe are reported but never fatal.
#[derive(Debug)]
pub struct RunOutcome {
    success: bool,
    error: Option<CheckError>,
}

impl RunOutcome {
    /// The primary diagnostic path completed.
    pub fn passed() -> Self {
        Self { success: true, error: None }
    }

    /// The primary diagnostic path failed.
    pub fn failed(error: CheckError) -> Self {
        Self { success: false, error: Some(error) }
    }

    /// Check if the run passed.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the connection-level error, if the run failed.
    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    /// Map the outcome to the process exit code: 0 on success, 1 on failure.
    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_outcome_has_no_error() {
        let outcome = RunOutcome::passed();
        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
    }

    #[test]
    fn failed_outcome_keeps_the_classified_error() {
        let outcome = RunOutcome::failed(CheckError::connection("unreachable"));
        assert!(!outcome.is_success());
        assert_eq!(outcome.error().unwrap().category(), "connection");
    }
}
