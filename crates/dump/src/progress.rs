//! Caller-facing progress milestones.

use std::fmt;
use std::sync::Arc;

/// One step of the sync and query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone<'a> {
    /// A brand-new database target is being created.
    CreateDatabase(&'a str),
    /// An existing database file is being opened.
    Open(&'a str),
    CreateTables,
    InsertTables,
    GetLatest,
    StartTransaction,
    StopTransaction,
    StartQuery,
    StopQuery,
}
impl fmt::Display for Milestone<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::CreateDatabase(target) => write!(f, "Create database {target}"),
            Milestone::Open(target) => write!(f, "Open {target}"),
            Milestone::CreateTables => f.write_str("Create tables"),
            Milestone::InsertTables => f.write_str("Insert tables"),
            Milestone::GetLatest => f.write_str("Get latest"),
            Milestone::StartTransaction => f.write_str("Start transaction"),
            Milestone::StopTransaction => f.write_str("Stop transaction"),
            Milestone::StartQuery => f.write_str("Start query"),
            Milestone::StopQuery => f.write_str("Stop query"),
        }
    }
}

/// Receives milestone titles, synchronously, as the pipeline advances.
///
/// Any `Fn(&str)` closure is a sink.
pub trait Progress: Send + Sync {
    fn milestone(&self, title: &str);

    fn emit(&self, milestone: Milestone<'_>) {
        tracing::trace!(%milestone, "milestone");
        self.milestone(&milestone.to_string());
    }
}
impl<F: Fn(&str) + Send + Sync> Progress for F {
    fn milestone(&self, title: &str) {
        self(title)
    }
}

/// The default sink: ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;
impl Progress for Silent {
    fn milestone(&self, _title: &str) {}
}

pub type ProgressHandle = Arc<dyn Progress>;
