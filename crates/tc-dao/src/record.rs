//! Stored outcome records and the status vocabulary shared with replies.

use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationId;
use crate::registry::Payload;

/// Lifecycle status reported for a correlation identifier.
///
/// `Pending` only ever appears in an immediate dispatch reply. Stored records
/// are always `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// The operation was accepted; poll for the outcome.
    Pending,
    /// The handler produced a result.
    Completed,
    /// The handler rejected the request.
    Failed,
}

impl OperationStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Completed(Payload),
    Failed(String),
}

/// Outcome of one dispatched operation as held by the result store.
///
/// A record carries either a result or an error message, never both, so the
/// invariant is enforced by construction rather than checked on read.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    id: CorrelationId,
    outcome: Outcome,
}

impl OperationResponse {
    /// Creates a record for a handler that returned `result`.
    #[must_use]
    pub const fn completed(id: CorrelationId, result: Payload) -> Self {
        Self {
            id,
            outcome: Outcome::Completed(result),
        }
    }

    /// Creates a record for a handler that failed with `error`.
    pub fn failed(id: CorrelationId, error: impl Into<String>) -> Self {
        Self {
            id,
            outcome: Outcome::Failed(error.into()),
        }
    }

    /// Correlation identifier under which the record is stored.
    #[must_use]
    pub const fn id(&self) -> &CorrelationId {
        &self.id
    }

    /// Terminal status of the record.
    #[must_use]
    pub const fn status(&self) -> OperationStatus {
        match self.outcome {
            Outcome::Completed(_) => OperationStatus::Completed,
            Outcome::Failed(_) => OperationStatus::Failed,
        }
    }

    /// Handler result, present only for completed records.
    #[must_use]
    pub const fn result(&self) -> Option<&Payload> {
        match &self.outcome {
            Outcome::Completed(result) => Some(result),
            Outcome::Failed(_) => None,
        }
    }

    /// Failure message, present only for failed records.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Completed(_) => None,
            Outcome::Failed(message) => Some(message.as_str()),
        }
    }
}
