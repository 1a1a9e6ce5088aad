use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single failed field check on one monitor declaration.
///
/// Every variant names the declaration it belongs to so a rejected pass can
/// be fixed without re-running in debug mode. `EmptyName` is the exception:
/// there is no usable name to report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("monitor name must not be empty")]
    EmptyName,
    #[error("monitor `{name}`: port {port} is outside 1-65535")]
    InvalidPort { name: String, port: u32 },
    #[error("monitor `{name}`: {field} must be a positive integer")]
    InvalidNumeric { name: String, field: &'static str },
    #[error("monitor `{name}`: `{value}` is not one of yes, no, true, false")]
    InvalidBoolean { name: String, value: String },
    #[error("monitor `{name}` is declared more than once")]
    DuplicateName { name: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("platform family `{family}` is not supported (expected Debian or RedHat)")]
pub struct UnsupportedPlatformError {
    pub family: String,
}

#[derive(Debug, Error)]
#[error("failed to persist {}: {source}", .path.display())]
pub struct PersistenceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
#[error("failed to signal reload of `{unit}`: {message}")]
pub struct SignalError {
    pub unit: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to run `{command}` for package `{package}`: {source}")]
    Spawn {
        package: String,
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with status {status} while installing `{package}`")]
    Failed {
        package: String,
        command: String,
        status: i32,
    },
}

/// Outcome of a failed reconciliation pass. Validation failures reject the
/// whole pass before anything touches the filesystem.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("rejected {} invalid monitor declaration(s): {}", .0.len(), join_errors(.0))]
    Rejected(Vec<ValidationError>),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Signal(#[from] SignalError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Install(#[from] InstallError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}
