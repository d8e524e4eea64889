//! One-shot process adapter around the [`tc_dao::Dispatcher`].
//!
//! The adapter reads a single JSON request from stdin, dispatches it, and
//! writes one JSON reply line to stdout:
//!
//! ```text
//! {"operation": "/prompt/generate", "params": {"text": "hello"}}
//! ```
//!
//! Replies that describe an operation failure are still a successful run.
//! Only problems with the request envelope or with writing the reply are
//! reported as [`AdapterError`]s.

pub mod telemetry;


use std::io::{self, Read, Write};

use serde::Deserialize;
use tc_dao::{Dispatcher, Params, Reply};
use thiserror::Error;
use tracing::debug;

/// Tracing target for adapter events.
pub const ADAPTER_TARGET: &str = "tc_adapter";

/// Request envelope read from stdin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdapterRequest {
    operation: String,
    #[serde(default)]
    params: Option<Params>,
}

impl AdapterRequest {
    /// Operation name to dispatch.
    #[must_use]
    pub fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Parameters to pass along; `null` or absent parameters are empty.
    #[must_use]
    pub fn params(&self) -> Params {
        self.params.clone().unwrap_or_default()
    }
}

/// Errors raised while handling the request envelope.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Stdin could not be read.
    #[error("Adapter error: Failed to read stdin - {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Stdin did not hold a valid request envelope.
    #[error("Adapter error: Invalid JSON input - {source}")]
    Decode {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The reply could not be serialised.
    #[error("Adapter error: {source}")]
    Encode {
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },
    /// The reply could not be written to stdout.
    #[error("Adapter error: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Parses a request envelope.
///
/// # Errors
///
/// Returns [`AdapterError::Decode`] when `input` is not UTF-8 encoded JSON
/// holding an object with a string `operation` and an optional object
/// `params`.
pub fn parse_request(input: &[u8]) -> Result<AdapterRequest, AdapterError> {
    serde_json::from_slice(input).map_err(|source| AdapterError::Decode { source })
}

/// Handles one request with `dispatcher`.
///
/// # Errors
///
/// Returns an error when reading stdin, decoding the request, or writing the
/// reply fails.
pub fn run(
    stdin: &mut impl Read,
    stdout: &mut impl Write,
    dispatcher: &Dispatcher,
) -> Result<(), AdapterError> {
    let mut input = Vec::new();
    stdin
        .read_to_end(&mut input)
        .map_err(|source| AdapterError::Read { source })?;

    let request = parse_request(&input)?;
    debug!(
        target: ADAPTER_TARGET,
        operation = request.operation(),
        "request decoded"
    );
    let reply = dispatcher.call(request.operation(), &request.params());
    write_reply(stdout, &reply)
}

/// Writes `error` as an `{error}` reply line.
///
/// # Errors
///
/// Returns an error when the failure reply itself cannot be written.
pub fn report_failure(stdout: &mut impl Write, error: &AdapterError) -> Result<(), AdapterError> {
    write_reply(stdout, &Reply::failure(error.to_string()))
}

fn write_reply(stdout: &mut impl Write, reply: &Reply) -> Result<(), AdapterError> {
    let payload =
        serde_json::to_string(reply).map_err(|source| AdapterError::Encode { source })?;
    stdout
        .write_all(payload.as_bytes())
        .map_err(|source| AdapterError::Write { source })?;
    stdout
        .write_all(b"\n")
        .map_err(|source| AdapterError::Write { source })?;
    stdout
        .flush()
        .map_err(|source| AdapterError::Write { source })
}
