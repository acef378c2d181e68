mod fetch;
pub mod error;
pub mod transport;

pub use crate::fetch::{fetch_dump, fetch_manifest};
pub use crate::transport::{DEFAULT_USER_AGENT, HttpTransport, Transport};
#[cfg(feature = "mock")]
pub use crate::transport::MockTransport;
use std::sync::Arc;

pub type TransportHandle = Arc<dyn Transport>;
