//! Operation registry mapping operation names to handlers.
//!
//! The [`OperationRegistry`] is a registration table built once at start-up
//! and read-only afterwards. Each entry pairs a handler with the
//! [`Completion`] mode the dispatcher uses to shape the immediate reply, so
//! adding an operation never requires touching the dispatcher.
//!
//! Handlers are plain functions of their parameters. They never see the
//! result store; correlation bookkeeping belongs to the dispatcher.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{HandlerError, RegistryError, RouteError};

/// Tracing target for routing decisions.
pub(crate) const ROUTER_TARGET: &str = "tc_dao::router";

/// Reserved operation name that reads the result store instead of dispatching.
pub const POLL_OPERATION: &str = "/result/poll";

/// Parameters passed to a handler.
pub type Params = Map<String, Value>;

/// Structured result produced by a handler.
pub type Payload = Map<String, Value>;

/// Business logic for one operation.
///
/// Any `Fn(&Params) -> Result<Payload, HandlerError>` that is `Send + Sync`
/// is a handler, so plain functions and closures register directly.
pub trait OperationHandler: Send + Sync {
    /// Runs the operation to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when the parameters are missing or violate
    /// the operation's rules.
    fn handle(&self, params: &Params) -> Result<Payload, HandlerError>;
}

impl<F> OperationHandler for F
where
    F: Fn(&Params) -> Result<Payload, HandlerError> + Send + Sync,
{
    fn handle(&self, params: &Params) -> Result<Payload, HandlerError> {
        self(params)
    }
}

/// How the dispatcher replies once a handler succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Completion {
    /// Reply with a pending handle; the caller polls for the stored outcome.
    #[default]
    Deferred,
    /// Reply with the full completed record straight away.
    Immediate,
}

/// Successful routing outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed {
    /// Completion mode registered for the operation.
    pub completion: Completion,
    /// Result produced by the handler.
    pub result: Payload,
}

#[derive(Clone)]
struct Registration {
    completion: Completion,
    handler: Arc<dyn OperationHandler>,
}

/// Registration table of available operations.
///
/// # Example
///
/// ```
/// use tc_dao::{Completion, OperationRegistry, Params, Payload};
///
/// let mut registry = OperationRegistry::new();
/// registry
///     .register("/echo", Completion::Deferred, |params: &Params| {
///         Ok::<Payload, tc_dao::HandlerError>(params.clone())
///     })
///     .expect("registration succeeds");
/// assert!(registry.contains("/echo"));
/// ```
#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Registration>,
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("OperationRegistry")
            .field("operations", &names)
            .finish()
    }
}

impl OperationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in stand-in operations.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::operations::install(&mut registry);
        registry
    }

    /// Registers `handler` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the name is empty, reserved for the
    /// poll operation, or already registered.
    pub fn register<H>(
        &mut self,
        name: impl Into<String>,
        completion: Completion,
        handler: H,
    ) -> Result<(), RegistryError>
    where
        H: OperationHandler + 'static,
    {
        let operation = name.into();
        if operation.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if operation == POLL_OPERATION {
            return Err(RegistryError::Reserved { operation });
        }
        if self.operations.contains_key(&operation) {
            return Err(RegistryError::Duplicate { operation });
        }
        self.insert(operation, completion, handler);
        Ok(())
    }

    /// Inserts a registration whose name is known to be valid.
    pub(crate) fn insert<H>(
        &mut self,
        operation: impl Into<String>,
        completion: Completion,
        handler: H,
    ) where
        H: OperationHandler + 'static,
    {
        self.operations.insert(
            operation.into(),
            Registration {
                completion,
                handler: Arc::new(handler),
            },
        );
    }

    /// Returns `true` when a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Returns the completion mode registered for `name`.
    #[must_use]
    pub fn completion(&self, name: &str) -> Option<Completion> {
        self.operations
            .get(name)
            .map(|registration| registration.completion)
    }

    /// Iterates over the registered operation names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Returns the number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` when no operations are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Resolves `operation` and runs its handler with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownOperation`] for unregistered names and
    /// [`RouteError::Handler`] when the handler rejects the request.
    pub fn route(&self, operation: &str, params: &Params) -> Result<Routed, RouteError> {
        let registration = self
            .operations
            .get(operation)
            .ok_or_else(|| RouteError::unknown_operation(operation))?;

        debug!(target: ROUTER_TARGET, operation, "routing operation");

        let result = registration.handler.handle(params)?;
        Ok(Routed {
            completion: registration.completion,
            result,
        })
    }
}

#[cfg(test)]
mod tests;
