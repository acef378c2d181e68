//! Dump Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A dump decoding error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The fetched payload was empty; there is nothing to decompress.
    #[display("undefined gz data")]
    UndefinedData,
    /// The payload is not a valid gzip stream.
    #[display("invalid or corrupted gzip data: {_0}")]
    Decompression(#[error(not(source))] String),
    /// The decompressed payload is not a `{ "data": [...] }` document, or one
    /// of its records is malformed.
    #[display("invalid dump document: {_0}")]
    InvalidDocument(#[error(not(source))] String),
    /// The manifest is not shaped as expected.
    #[display("invalid manifest: {_0}")]
    InvalidManifest(#[error(not(source))] String),
    /// A dump date is not an 8-digit calendar date.
    #[display("invalid dump date: {_0}")]
    InvalidDate(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A dump is either well-formed or it isn't; fetching it again is the
        // caller's decision.
        false
    }
}
