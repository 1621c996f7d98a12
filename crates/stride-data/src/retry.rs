//! Retry policy for gateway calls.
//!
//! Retries are immediate: there is deliberately no backoff, only a count.

use crate::error::ErrorKind;
use crate::request::RequestDescriptor;

/// Conditions that trigger a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    /// No response was received.
    NetworkUnavailable,
    /// The service answered with a server error.
    ServerError,
}

impl RetryCondition {
    /// Check if a failure kind matches this condition.
    pub fn matches(&self, kind: &ErrorKind) -> bool {
        match self {
            Self::NetworkUnavailable => *kind == ErrorKind::NetworkUnavailable,
            Self::ServerError => *kind == ErrorKind::ServerError,
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Conditions that trigger retry.
    pub retry_on: Vec<RetryCondition>,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retry_on: vec![RetryCondition::NetworkUnavailable, RetryCondition::ServerError],
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            retry_on: Vec::new(),
        }
    }

    /// Set retry conditions.
    pub fn with_conditions(mut self, conditions: Vec<RetryCondition>) -> Self {
        self.retry_on = conditions;
        self
    }

    /// Check whether a failed attempt (0-indexed) should be repeated.
    ///
    /// Only idempotent requests are ever retried.
    pub fn should_retry(&self, request: &RequestDescriptor, kind: &ErrorKind, attempt: u32) -> bool {
        if attempt >= self.max_retries || !request.is_idempotent() {
            return false;
        }
        self.retry_on.iter().any(|c| c.matches(kind))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}
