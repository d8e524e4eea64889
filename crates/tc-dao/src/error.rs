//! Error types for routing, handler execution and polling.
//!
//! The display text of each variant is the message returned to callers in the
//! `error` field of a reply, so wording here is part of the external contract.

use thiserror::Error;

/// Failures reported by operation handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// A required parameter was absent, empty or of the wrong type.
    #[error("Missing required parameter: {name}")]
    MissingParameter {
        /// Parameter name.
        name: String,
    },

    /// A parameter was present but violated a business rule.
    #[error("{message}")]
    Rejected {
        /// Message returned verbatim to the caller.
        message: String,
    },

    /// The handler could not complete for reasons unrelated to its input.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl HandlerError {
    /// Creates a missing parameter error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates a business-rule rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Failures raised while routing an operation to its handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No handler is registered under the operation name.
    #[error("Invalid operation: {operation}")]
    UnknownOperation {
        /// The operation name that failed to resolve.
        operation: String,
    },

    /// The handler ran and rejected the request.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl RouteError {
    /// Creates an unknown operation error.
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }
}

/// Failures raised by the poll operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The `id` parameter was absent, empty or not a string.
    #[error("Missing required parameter: id")]
    MissingId,

    /// No record exists for the identifier.
    #[error("Result not found or expired: {id}")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
}

impl PollError {
    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Failures raised while building an operation registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Operation names must not be empty.
    #[error("operation name must not be empty")]
    EmptyName,

    /// The name is reserved for a dispatcher built-in.
    #[error("operation '{operation}' is reserved")]
    Reserved {
        /// The reserved name.
        operation: String,
    },

    /// A handler is already registered under the name.
    #[error("operation '{operation}' is already registered")]
    Duplicate {
        /// The duplicated name.
        operation: String,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(HandlerError::missing_parameter("text"), "Missing required parameter: text")]
    #[case(
        HandlerError::rejected("duration_ms must be non-negative"),
        "duration_ms must be non-negative"
    )]
    fn handler_errors_render_caller_messages(#[case] error: HandlerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn route_errors_render_caller_messages() {
        assert_eq!(
            RouteError::unknown_operation("/bogus/op").to_string(),
            "Invalid operation: /bogus/op"
        );
        let wrapped = RouteError::from(HandlerError::missing_parameter("name"));
        assert_eq!(wrapped.to_string(), "Missing required parameter: name");
    }

    #[test]
    fn poll_errors_render_caller_messages() {
        assert_eq!(
            PollError::MissingId.to_string(),
            "Missing required parameter: id"
        );
        assert_eq!(
            PollError::not_found("abc").to_string(),
            "Result not found or expired: abc"
        );
    }
}
