//! Diagnostic logging for the adapter process.
//!
//! The adapter speaks on two channels: stdout carries exactly one reply line
//! and stderr carries everything else. Log events are routed through
//! [`DiagnosticWriter`], which can only ever open stderr, so enabling verbose
//! filters never corrupts the reply a caller is parsing.

use std::io::{self, IsTerminal, Stderr};

use once_cell::sync::OnceCell;
use tc_config::{Config, LogFormat};
use thiserror::Error;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};

static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Writer factory for log events. Always targets stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiagnosticWriter;

impl DiagnosticWriter {
    /// Returns `true` when stderr is attached to a terminal and colour is
    /// safe to emit.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        io::stderr().is_terminal()
    }
}

impl<'a> MakeWriter<'a> for DiagnosticWriter {
    type Writer = Stderr;

    fn make_writer(&'a self) -> Self::Writer {
        io::stderr()
    }
}

/// Proof that diagnostic logging is active for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Format chosen by the call that installed the subscriber.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring diagnostic logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter expression did not parse.
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Filter text as configured.
        filter: String,
        /// Parser diagnostics.
        message: String,
    },
    /// A foreign global subscriber was already present.
    #[error("failed to install diagnostic subscriber: {0}")]
    AlreadyInstalled(#[source] SetGlobalDefaultError),
}

/// Installs the stderr subscriber once per process.
///
/// Later calls leave the global subscriber untouched and report the format
/// that was installed first.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for an unparsable filter and
/// [`TelemetryError::AlreadyInstalled`] when something else set the global
/// subscriber first.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| {
            let subscriber = diagnostic_subscriber(config)?;
            tracing::subscriber::set_global_default(subscriber)
                .map_err(TelemetryError::AlreadyInstalled)?;
            Ok(config.log_format())
        })
        .map(|format| TelemetryHandle { format: *format })
}

/// Builds the stderr subscriber described by `config` without installing it.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `config.log_filter` is not a
/// valid `EnvFilter` directive list.
pub fn diagnostic_subscriber(
    config: &Config,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let filter =
        EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::InvalidFilter {
            filter: config.log_filter().to_owned(),
            message: error.to_string(),
        })?;

    let writer = DiagnosticWriter;
    let base = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .with_ansi(writer.is_interactive())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(base.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(base.compact().finish()),
    })
}
