//! The HTTP seam.
//!
//! Everything in this crate talks to the network through [`Transport`], so
//! the sync pipeline can run against [`MockTransport`] in tests.

mod http;
#[cfg(feature = "mock")]
mod mock;

pub use self::http::{DEFAULT_USER_AGENT, HttpTransport};
#[cfg(feature = "mock")]
pub use self::mock::MockTransport;
use crate::error::Result;
use async_trait::async_trait;

/// Fetches the body of a URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET` the URL and return the full body. A non-success status is an
    /// [`ErrorKind::Status`](crate::error::ErrorKind::Status) error; the body
    /// of a failed response is discarded.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}
