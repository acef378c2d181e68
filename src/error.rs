//! Pouet Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. The member crates' errors are raised
//! into the categories below, keeping the original error as a child.

use derive_more::{Display, Error};
use pouet_database::error::{Error as DatabaseError, ErrorKind as DatabaseErrorKind};
use pouet_dump::error::Error as DumpError;
use pouet_remote::error::Error as RemoteError;
use pouet_storage::error::Error as StorageError;

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-success HTTP status, transport failure or an unusable manifest.
    #[display("network error: {message}")]
    Network { status: Option<u16>, message: String },
    /// A dump payload is empty, not gzip, or not the expected JSON.
    #[display("{_0}")]
    Data(#[error(not(source))] String),
    /// The SQLite driver failed. `errno` is SQLite's primary result code and
    /// `code` its symbolic name, when the failure came from SQLite itself.
    #[display("database error: {message}")]
    Database {
        errno: Option<i32>,
        code: Option<&'static str>,
        message: String,
    },
    /// A snapshot could not be written to the snapshot store.
    #[display("snapshot store error")]
    Snapshot,
    #[display("configuration error")]
    Config,
    #[display("CSV export failed")]
    Export,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in this crate retries; this only informs the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { status, .. } => status.is_none_or(|status| status >= 500),
            Self::Database { code, .. } => matches!(code, Some("SQLITE_BUSY" | "SQLITE_LOCKED")),
            Self::Data(_) | Self::Snapshot | Self::Config | Self::Export => false,
        }
    }

    /// Raise a retrieval error as [`ErrorKind::Network`], preserving the
    /// remote crate's `Exn` frame as a child.
    #[track_caller]
    pub fn network(err: RemoteError) -> Error {
        let kind = Self::Network {
            status: err.status(),
            message: err.to_string(),
        };
        err.raise(kind)
    }

    /// Raise a decoding error as [`ErrorKind::Data`].
    #[track_caller]
    pub fn data(err: DumpError) -> Error {
        let kind = Self::Data(err.to_string());
        err.raise(kind)
    }

    /// Raise a driver error as [`ErrorKind::Database`], carrying SQLite's
    /// result code over.
    #[track_caller]
    pub fn database(err: DatabaseError) -> Error {
        let kind = match &*err {
            DatabaseErrorKind::Sql(failure) => Self::Database {
                errno: failure.errno,
                code: failure.code,
                message: failure.message.clone(),
            },
            other => Self::Database {
                errno: None,
                code: None,
                message: other.to_string(),
            },
        };
        err.raise(kind)
    }

    #[track_caller]
    pub fn snapshot(err: StorageError) -> Error {
        err.raise(Self::Snapshot)
    }

    /// SQLite's primary result code, for database errors.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Database { errno, .. } => *errno,
            _ => None,
        }
    }

    /// SQLite's symbolic result code, for database errors.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Database { code, .. } => *code,
            _ => None,
        }
    }
}
