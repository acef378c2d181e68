//! In-memory transport for testing.

use super::Transport;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`Transport`] for testing.
///
/// Each route maps a URL to a status code and a body. Unknown URLs answer
/// `404`. Every requested URL is recorded, in order, so tests can assert on
/// what was (or was not) fetched.
///
/// # Examples
///
/// ```
/// use pouet_remote::transport::{MockTransport, Transport};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = MockTransport::default().with_route("https://example.invalid/a", b"body".to_vec());
/// assert_eq!(transport.get("https://example.invalid/a").await.unwrap(), b"body");
/// assert!(transport.get("https://example.invalid/b").await.is_err());
/// assert_eq!(transport.requests().await.len(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: RwLock<HashMap<String, (u16, Vec<u8>)>>,
    requests: RwLock<Vec<String>>,
}

impl MockTransport {
    /// Answer `200` with `body` for `url`.
    pub fn with_route(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.with_status(url, 200, body)
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.get_mut().insert(url.into(), (status, body.into()));
        self
    }

    /// Replace (or add) a route after construction.
    pub async fn set_route(&self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) {
        self.routes.write().await.insert(url.into(), (status, body.into()));
    }

    /// URLs requested so far, in request order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.write().await.push(url.to_string());
        match self.routes.read().await.get(url) {
            Some((status, body)) if (200..300).contains(status) => Ok(body.clone()),
            Some((status, _)) => exn::bail!(ErrorKind::Status(*status)),
            None => exn::bail!(ErrorKind::Status(404)),
        }
    }
}
