use super::{Board, Group, Id, Party, Platform, Prod, User};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A decoded dump document: `{ "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dump<T> {
    pub data: Vec<T>,
}

/// The normalized result of one sync run.
///
/// `platforms` and `users` hold every full record embedded anywhere in the
/// four collections, keyed by id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DumpSet {
    pub prods: Vec<Prod>,
    pub groups: Vec<Group>,
    pub parties: Vec<Party>,
    pub boards: Vec<Board>,
    pub platforms: BTreeMap<Id, Platform>,
    pub users: BTreeMap<Id, User>,
}
impl DumpSet {
    /// Assemble a set from the four decoded collections and build the
    /// platform and user lookup maps.
    pub fn new(prods: Vec<Prod>, groups: Vec<Group>, parties: Vec<Party>, boards: Vec<Board>) -> Self {
        let mut set = Self {
            prods,
            groups,
            parties,
            boards,
            ..Self::default()
        };
        let (platforms, users) = crate::normalize::index(&set);
        set.platforms = platforms;
        set.users = users;
        set
    }
}
