//! Reply shapes returned by [`Dispatcher::call`](super::Dispatcher::call).

use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationId;
use crate::record::{OperationResponse, OperationStatus};
use crate::registry::Payload;

/// Externally visible reply mapping.
///
/// Absent fields are omitted when serialized, giving the shapes
/// `{error}`, `{id, status: "pending"}` and `{id, status, result?, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<CorrelationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<OperationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Reply {
    /// Creates an error-only reply.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            id: None,
            status: None,
            result: None,
            error: Some(message.into()),
        }
    }

    /// Creates the `{id, status: "pending"}` handle returned for deferred
    /// operations.
    #[must_use]
    pub const fn pending(id: CorrelationId) -> Self {
        Self {
            id: Some(id),
            status: Some(OperationStatus::Pending),
            result: None,
            error: None,
        }
    }

    /// Correlation identifier, when the reply carries one.
    #[must_use]
    pub const fn id(&self) -> Option<&CorrelationId> {
        self.id.as_ref()
    }

    /// Reported status, when the reply carries one.
    #[must_use]
    pub const fn status(&self) -> Option<OperationStatus> {
        self.status
    }

    /// Handler result, present only for completed outcomes.
    #[must_use]
    pub const fn result(&self) -> Option<&Payload> {
        self.result.as_ref()
    }

    /// Error message, present for error replies and failed outcomes.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl From<&OperationResponse> for Reply {
    fn from(record: &OperationResponse) -> Self {
        Self {
            id: Some(record.id().clone()),
            status: Some(record.status()),
            result: record.result().cloned(),
            error: record.error().map(str::to_owned),
        }
    }
}
