//! Job and outcome records for the dispatch engine
//!
//! A [`Job`] is one (target, attempt-count) unit of retryable work. It is
//! created by the dispatcher with `attempt = 0`, mutated only by whichever
//! worker currently holds it (ownership moves through the queue), and turns
//! into an immutable [`JobOutcome`] the moment it reaches a terminal state.

use crate::Error;

/// One unit of retryable work
#[derive(Debug)]
pub struct Job {
    /// URL-like identifier of the page to capture
    pub target: String,
    /// How many attempts have been classified so far; never decreases
    pub attempt: u32,
    /// Chain of every prior attempt's failure
    pub last_error: Option<Error>,
}

impl Job {
    pub fn new(target: String) -> Self {
        Self {
            target,
            attempt: 0,
            last_error: None,
        }
    }

    /// Classify a failed attempt: chain the error onto the previous attempt's
    /// failure and advance the attempt counter.
    pub fn record_failure(&mut self, kind: Error) {
        let prior = self.last_error.take().map(Box::new);
        self.last_error = Some(Error::Attempt {
            attempt: self.attempt,
            kind: Box::new(kind),
            prior,
        });
        self.attempt += 1;
    }

    /// Terminal success. `attempts` records the attempt the job succeeded on.
    pub fn into_succeeded(self) -> JobOutcome {
        JobOutcome {
            target: self.target,
            attempts: self.attempt,
            error: None,
        }
    }

    /// Terminal failure once the retry ceiling is exhausted; the outcome
    /// wraps the full per-attempt error chain.
    pub fn into_given_up(self) -> JobOutcome {
        let Job {
            target,
            attempt,
            last_error,
        } = self;
        let source = last_error
            .map(Box::new)
            .unwrap_or_else(|| Box::new(Error::Other("no recorded failure".into())));
        JobOutcome {
            target: target.clone(),
            attempts: attempt,
            error: Some(Error::RetryExhausted {
                target,
                attempts: attempt,
                source,
            }),
        }
    }
}

/// The terminal, immutable outcome of a job
#[derive(Debug)]
pub struct JobOutcome {
    pub target: String,
    /// Final attempt count at the moment the job resolved
    pub attempts: u32,
    /// `None` on success; on failure, the wrapped chain of every attempt
    pub error: Option<Error>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::time::Duration;

    #[test]
    fn attempts_advance_on_failure_only() {
        let mut job = Job::new("https://a.dev".into());
        assert_eq!(job.attempt, 0);
        job.record_failure(Error::Capture("boom".into()));
        assert_eq!(job.attempt, 1);

        let outcome = job.into_succeeded();
        assert!(outcome.is_success());
        assert_eq!(outcome.attempts, 1);
    }

    #[test]
    fn given_up_outcome_carries_every_attempt() {
        let mut job = Job::new("https://a.dev".into());
        job.record_failure(Error::AttemptTimeout(Duration::from_secs(120)));
        job.record_failure(Error::AttemptTimeout(Duration::from_secs(120)));

        let outcome = job.into_given_up();
        assert!(!outcome.is_success());
        assert_eq!(outcome.attempts, 2);

        let err = outcome.error.expect("given-up outcome must carry an error");
        assert!(err.to_string().contains("https://a.dev"));

        // RetryExhausted -> attempt 1 -> attempt 0
        let last = err.source().expect("should wrap the last attempt");
        assert!(last.to_string().contains("attempt 1"));
        let first = last.source().expect("should chain to the first attempt");
        assert!(first.to_string().contains("attempt 0"));
    }
}
