use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::PasteState;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    DecodeUnsupported,
    IoDenied,
    AllocationFailed,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::DecodeUnsupported => "decode unsupported",
            FailureKind::IoDenied => "io denied",
            FailureKind::AllocationFailed => "allocation failed",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expected failure with its kind and, when known, the underlying cause.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(kind: FailureKind, message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

/// Error half of the tri-state outcome: `Ok` is Success.
#[derive(Debug, Error)]
pub enum PasteError {
    /// The user aborted. Not an error surface.
    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Failed(#[from] Failure),
}

impl PasteError {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        PasteError::Failed(Failure::new(kind, message))
    }

    pub fn failure_with_cause(
        kind: FailureKind,
        message: impl Into<String>,
        cause: impl Into<Cause>,
    ) -> Self {
        PasteError::Failed(Failure::with_cause(kind, message, cause))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PasteError::Cancelled)
    }

    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            PasteError::Cancelled => None,
            PasteError::Failed(failure) => Some(failure.kind()),
        }
    }

    pub(crate) fn invalid_transition(operation: &'static str, state: PasteState) -> Self {
        PasteError::failure_with_cause(
            FailureKind::Unknown,
            format!("cannot {operation}"),
            LifecycleError::InvalidTransition { operation, state },
        )
    }
}

pub type PasteResult<T> = Result<T, PasteError>;

/// A lifecycle operation requested from a state that does not allow it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: PasteState,
    },
}

/// Three-way view of a [`PasteResult`] for callers that surface results to the user.
#[derive(Debug)]
pub enum Outcome<T = ()> {
    Success(T),
    Cancel,
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Outcome::Cancel)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Cancel => Outcome::Cancel,
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }
}

impl<T> From<PasteResult<T>> for Outcome<T> {
    fn from(result: PasteResult<T>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(PasteError::Cancelled) => Outcome::Cancel,
            Err(PasteError::Failed(failure)) => Outcome::Failure(failure),
        }
    }
}
