//! Operation dispatch and result correlation.
//!
//! The [`Dispatcher`] is the single entry point: [`Dispatcher::call`] takes an
//! operation name and its parameters and always returns a [`Reply`]. Nothing
//! escapes as a panic or an `Err`; every failure becomes an `{error}` reply.
//!
//! ## Status protocol
//!
//! Every dispatched operation receives a fresh correlation identifier and
//! exactly one record is written to the [`ResultStore`] under it:
//!
//! - handler failure: a `failed` record is stored and the caller receives only
//!   `{error}`; the identifier is not surfaced.
//! - handler success, [`Completion::Immediate`]: a `completed` record is stored
//!   and returned in full.
//! - handler success, [`Completion::Deferred`]: a `completed` record is stored
//!   but the caller receives `{id, status: "pending"}`.
//!
//! No `pending` record is ever stored. Polling an identifier yields either
//! "not found" or the final outcome.
//!
//! ## Polling
//!
//! The reserved [`POLL_OPERATION`] reads the store instead of dispatching and
//! never creates a record of its own.

mod response;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::correlation::{IdSource, RandomIdSource};
use crate::error::PollError;
use crate::record::OperationResponse;
use crate::registry::{Completion, OperationRegistry, POLL_OPERATION, Params, Routed};
use crate::store::ResultStore;

pub use self::response::Reply;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = "tc_dao::dispatch";

/// Routes operations to handlers and records their outcomes.
///
/// The dispatcher is `Send + Sync`; share it behind an [`Arc`] to serve
/// concurrent callers.
pub struct Dispatcher {
    store: ResultStore,
    registry: OperationRegistry,
    ids: Arc<dyn IdSource>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Creates a dispatcher over the built-in operations with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(OperationRegistry::builtin())
    }

    /// Creates a dispatcher over `registry` with an empty store.
    #[must_use]
    pub fn with_registry(registry: OperationRegistry) -> Self {
        Self::with_parts(ResultStore::new(), registry, Arc::new(RandomIdSource::new()))
    }

    /// Assembles a dispatcher from explicit collaborators.
    ///
    /// Passing a clone of an existing [`ResultStore`] lets several dispatchers
    /// share outcomes.
    #[must_use]
    pub fn with_parts(
        store: ResultStore,
        registry: OperationRegistry,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            store,
            registry,
            ids,
        }
    }

    /// Store holding the outcomes of dispatched operations.
    #[must_use]
    pub const fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Registry used to resolve operation names.
    #[must_use]
    pub const fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Executes `operation` with `params` and shapes the reply.
    pub fn call(&self, operation: &str, params: &Params) -> Reply {
        if operation == POLL_OPERATION {
            return self.poll(params).unwrap_or_else(|error| {
                match &error {
                    PollError::NotFound { .. } => {
                        warn!(target: DISPATCH_TARGET, %error, "poll missed");
                    }
                    PollError::MissingId => {
                        debug!(target: DISPATCH_TARGET, %error, "poll rejected");
                    }
                }
                Reply::failure(error.to_string())
            });
        }
        self.dispatch(operation, params)
    }

    fn poll(&self, params: &Params) -> Result<Reply, PollError> {
        let id = params
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(PollError::MissingId)?;

        let record = self.store.get(id).ok_or_else(|| PollError::not_found(id))?;
        debug!(
            target: DISPATCH_TARGET,
            id,
            status = record.status().as_str(),
            "poll hit"
        );
        Ok(Reply::from(&record))
    }

    fn dispatch(&self, operation: &str, params: &Params) -> Reply {
        let id = self.ids.next_id();
        debug!(target: DISPATCH_TARGET, operation, id = %id, "dispatching operation");

        match self.registry.route(operation, params) {
            Ok(Routed { completion, result }) => {
                let record = OperationResponse::completed(id, result);
                let reply = match completion {
                    Completion::Immediate => Reply::from(&record),
                    Completion::Deferred => Reply::pending(record.id().clone()),
                };
                self.store.set(record);
                reply
            }
            Err(error) => {
                let message = error.to_string();
                warn!(
                    target: DISPATCH_TARGET,
                    operation,
                    id = %id,
                    error = %message,
                    "operation failed"
                );
                self.store.set(OperationResponse::failed(id, message.as_str()));
                Reply::failure(message)
            }
        }
    }
}
