mod board;
mod dump_set;
mod group;
mod manifest;
mod party;
mod platform;
mod prod;
mod user;

pub use self::board::Board;
pub use self::dump_set::{Dump, DumpSet};
pub use self::group::Group;
pub use self::manifest::{DumpDate, DumpKind, DumpLink, Latest, Manifest};
pub use self::party::Party;
pub(crate) use self::platform::PlatformBody;
pub use self::platform::Platform;
pub use self::prod::{Credit, Placing, Prod};
pub use self::user::{User, UserRef};

/// Identifier of any pouet.net entity. The dumps mix numbers and numeric
/// strings; both are canonicalised to this one key type.
pub type Id = u32;
