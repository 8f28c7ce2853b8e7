//! Error types for the capture pipeline

use std::time::Duration;

use thiserror::Error;

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while dispatching and capturing jobs
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to prepare the run (output directory, browser launch).
    /// These are never retried; the process terminates.
    #[error("Setup failed: {0}")]
    Setup(String),

    /// A configuration input could not be read or parsed
    #[error("Could not load configuration: {0}")]
    ConfigLoad(String),

    /// Navigation to a target failed
    #[error("Failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// Screenshot capture or artifact persistence failed
    #[error("Capture failed: {0}")]
    Capture(String),

    /// The per-attempt deadline elapsed before the renderer returned
    #[error("timed out after {0:?}")]
    AttemptTimeout(Duration),

    /// One attempt's classified failure, chained to the previous attempt's
    /// failure so the final outcome carries every attempt.
    #[error("attempt {attempt}: {kind}")]
    Attempt {
        attempt: u32,
        kind: Box<Error>,
        #[source]
        prior: Option<Box<Error>>,
    },

    /// Terminal failure once the retry ceiling is exhausted
    #[error("stopped with target {target} after {attempts} attempts")]
    RetryExhausted {
        target: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn attempt_errors_chain_through_source() {
        let first = Error::Attempt {
            attempt: 0,
            kind: Box::new(Error::AttemptTimeout(Duration::from_secs(120))),
            prior: None,
        };
        let second = Error::Attempt {
            attempt: 1,
            kind: Box::new(Error::Capture("boom".into())),
            prior: Some(Box::new(first)),
        };

        assert!(second.to_string().contains("attempt 1"));
        let prior = second.source().expect("second attempt should chain");
        assert!(prior.to_string().contains("attempt 0"));
        assert!(prior.source().is_none());
    }

    #[test]
    fn retry_exhausted_names_target_and_attempts() {
        let err = Error::RetryExhausted {
            target: "https://example.com".into(),
            attempts: 2,
            source: Box::new(Error::Capture("boom".into())),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com"));
        assert!(msg.contains("2 attempts"));
        assert!(err.source().is_some());
    }
}
