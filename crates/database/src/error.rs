//! Database Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Driver failures are classified into
//! a [`SqlFailure`] so callers get SQLite's own result code back.

use derive_more::{Display, Error};
use exn::ResultExt;

/// A database error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The driver rejected a statement or the connection failed.
    #[display("database error: {_0}")]
    Sql(#[error(not(source))] SqlFailure),
    /// The database target string is unusable.
    #[display("invalid database target: {_0:?}")]
    InvalidTarget(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Sql(failure) => matches!(failure.code, Some("SQLITE_BUSY" | "SQLITE_LOCKED")),
            Self::InvalidTarget(_) => false,
        }
    }
}

/// A classified driver failure.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("{message}")]
pub struct SqlFailure {
    /// Primary SQLite result code (`1` for `SQLITE_ERROR`, `19` for
    /// `SQLITE_CONSTRAINT`, ...). `None` when the failure did not come from
    /// SQLite itself (pool, I/O, decoding).
    pub errno: Option<i32>,
    /// Symbolic name of `errno`.
    pub code: Option<&'static str>,
    pub message: String,
}
impl From<&sqlx::Error> for SqlFailure {
    fn from(err: &sqlx::Error) -> Self {
        let errno = match err {
            sqlx::Error::Database(db) => db.code().and_then(|code| code.parse::<i32>().ok()).map(|code| code & 0xff),
            _ => None,
        };
        Self {
            errno,
            code: errno.and_then(code_name),
            message: match err {
                sqlx::Error::Database(db) => db.message().to_string(),
                other => other.to_string(),
            },
        }
    }
}

/// Symbolic name of a primary SQLite result code.
pub fn code_name(errno: i32) -> Option<&'static str> {
    Some(match errno {
        1 => "SQLITE_ERROR",
        2 => "SQLITE_INTERNAL",
        3 => "SQLITE_PERM",
        4 => "SQLITE_ABORT",
        5 => "SQLITE_BUSY",
        6 => "SQLITE_LOCKED",
        7 => "SQLITE_NOMEM",
        8 => "SQLITE_READONLY",
        9 => "SQLITE_INTERRUPT",
        10 => "SQLITE_IOERR",
        11 => "SQLITE_CORRUPT",
        12 => "SQLITE_NOTFOUND",
        13 => "SQLITE_FULL",
        14 => "SQLITE_CANTOPEN",
        15 => "SQLITE_PROTOCOL",
        16 => "SQLITE_EMPTY",
        17 => "SQLITE_SCHEMA",
        18 => "SQLITE_TOOBIG",
        19 => "SQLITE_CONSTRAINT",
        20 => "SQLITE_MISMATCH",
        21 => "SQLITE_MISUSE",
        22 => "SQLITE_NOLFS",
        23 => "SQLITE_AUTH",
        24 => "SQLITE_FORMAT",
        25 => "SQLITE_RANGE",
        26 => "SQLITE_NOTADB",
        27 => "SQLITE_NOTICE",
        28 => "SQLITE_WARNING",
        _ => return None,
    })
}

/// Raise driver errors as [`ErrorKind::Sql`], keeping the driver error as
/// the child of the raised one.
pub(crate) trait SqlResultExt<T> {
    fn or_sql(self) -> Result<T>;
}
impl<T> SqlResultExt<T> for std::result::Result<T, sqlx::Error> {
    #[track_caller]
    fn or_sql(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => {
                let failure = SqlFailure::from(&err);
                Err::<T, _>(err).or_raise(|| ErrorKind::Sql(failure))
            },
        }
    }
}
