//! Request correlation and dispatch for the stand-in prompt service.
//!
//! Callers hand an operation name and a JSON parameter object to a
//! [`Dispatcher`]. The dispatcher assigns a [`CorrelationId`], routes the
//! request through an [`OperationRegistry`], records the outcome in a
//! [`ResultStore`] and answers with a [`Reply`]. Deferred operations answer
//! `pending` straight away; the caller fetches the final outcome later through
//! the reserved [`POLL_OPERATION`].
//!
//! ```
//! use serde_json::{Map, json};
//! use tc_dao::{Dispatcher, OperationStatus, POLL_OPERATION};
//!
//! let dispatcher = Dispatcher::new();
//! let mut params = Map::new();
//! params.insert("text".into(), json!("hello"));
//! let reply = dispatcher.call("/prompt/generate", &params);
//! assert_eq!(reply.status(), Some(OperationStatus::Pending));
//!
//! let mut poll = Map::new();
//! let id = reply.id().map(|id| id.as_str().to_owned()).unwrap_or_default();
//! poll.insert("id".into(), json!(id));
//! let outcome = dispatcher.call(POLL_OPERATION, &poll);
//! assert_eq!(outcome.status(), Some(OperationStatus::Completed));
//! ```
//!
//! The store lives in memory for the lifetime of the process. Records are
//! never evicted.

mod correlation;
mod dispatch;
mod error;
pub mod operations;
mod record;
mod registry;
mod store;

pub use correlation::{CorrelationId, IdSource, RandomIdSource};
pub use dispatch::{Dispatcher, Reply};
pub use error::{HandlerError, PollError, RegistryError, RouteError};
pub use record::{OperationResponse, OperationStatus};
pub use registry::{
    Completion, OperationHandler, OperationRegistry, POLL_OPERATION, Params, Payload, Routed,
};
pub use store::ResultStore;

#[cfg(test)]
mod tests;
