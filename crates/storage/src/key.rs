//! Snapshot key validation.

use std::path::{Component, Path};

use crate::error::{ErrorKind, Result};

/// Validates a snapshot key.
///
/// Keys are flat file names: exactly one normal path component, no
/// separators, no `.`/`..`, no null bytes. Anything else could escape the
/// snapshot directory of a [`LocalStore`](crate::LocalStore).
///
/// # Examples
///
/// ```
/// use pouet_storage::validate_key;
/// assert!(validate_key("pouetdatadump-prods-20240105.json").is_ok());
/// assert!(validate_key("../pouet.db").is_err());
/// assert!(validate_key("dir/file.json").is_err());
/// assert!(validate_key("").is_err());
/// ```
pub fn validate(key: &str) -> Result<&str> {
    let invalid = || ErrorKind::InvalidKey(key.to_string());
    if key.is_empty() || key.contains('\0') || key.contains('\\') {
        exn::bail!(invalid());
    }
    let mut components = Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == key => Ok(key),
        _ => exn::bail!(invalid()),
    }
}
