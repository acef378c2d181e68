//! Typed records of the pouet.net data dumps.
//!
//! The dumps are four gzip-compressed JSON documents (prods, groups, parties
//! and boards) plus a manifest pointing at them. [`decode`] turns a fetched
//! payload into records, [`DumpSet::new`](models::DumpSet::new) joins the four
//! collections and indexes the platforms and users embedded in them.

mod de;
mod decode;
pub mod error;
pub mod models;
mod normalize;
pub mod progress;

pub use crate::decode::{decode, decompress, parse};
pub use crate::normalize::index;
pub use crate::progress::{Milestone, Progress, ProgressHandle, Silent};
