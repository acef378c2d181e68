//! Platform and user lookup maps.

use crate::models::{DumpSet, Id, Platform, User};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Scan every record of `set` for embedded platforms and users and index them
/// by id. When the same id is embedded more than once, the first occurrence
/// (in prods, groups, parties, boards order) is kept.
pub fn index(set: &DumpSet) -> (BTreeMap<Id, Platform>, BTreeMap<Id, User>) {
    let mut platforms = BTreeMap::new();
    let mut users = BTreeMap::new();

    let embedded_platforms =
        set.prods.iter().flat_map(|prod| &prod.platforms).chain(set.boards.iter().flat_map(|board| &board.platforms));
    for platform in embedded_platforms {
        insert(&mut platforms, platform.id, platform);
    }

    let embedded_users = set
        .prods
        .iter()
        .flat_map(|prod| prod.users())
        .chain(set.groups.iter().flat_map(|group| group.users()))
        .chain(set.parties.iter().flat_map(|party| party.users()))
        .chain(set.boards.iter().flat_map(|board| board.users()));
    for user in embedded_users {
        insert(&mut users, user.id, user);
    }

    tracing::debug!(platforms = platforms.len(), users = users.len(), "normalized references");
    (platforms, users)
}

fn insert<T: Clone>(map: &mut BTreeMap<Id, T>, id: Id, value: &T) {
    if let Entry::Vacant(entry) = map.entry(id) {
        entry.insert(value.clone());
    }
}
