use super::{Id, Platform, User, UserRef};
use crate::de;
use serde::Deserialize;

/// A production: demo, intro, music disk, ...
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prod {
    #[serde(deserialize_with = "de::id")]
    pub id: Id,
    pub name: String,
    /// Comma-separated production types (`"demo"`, `"intro,64k"`).
    #[serde(default, rename = "type", deserialize_with = "de::opt_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub download: Option<String>,
    #[serde(default, rename = "releaseDate", deserialize_with = "de::opt_string")]
    pub release_date: Option<String>,
    #[serde(default, rename = "addedUser", deserialize_with = "de::optional")]
    pub added_user: Option<UserRef>,
    #[serde(default, rename = "addedDate", deserialize_with = "de::opt_string")]
    pub added_date: Option<String>,
    #[serde(default, deserialize_with = "de::platforms")]
    pub platforms: Vec<Platform>,
    /// Competition results, in the order the dump lists them.
    #[serde(default)]
    pub placings: Vec<Placing>,
    /// Ids of the groups that released the production.
    #[serde(default, deserialize_with = "de::references")]
    pub groups: Vec<Id>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    #[serde(default, rename = "voteup", deserialize_with = "de::count")]
    pub vote_up: u32,
    #[serde(default, rename = "votepig", deserialize_with = "de::count")]
    pub vote_pig: u32,
    #[serde(default, rename = "votedown", deserialize_with = "de::count")]
    pub vote_down: u32,
    #[serde(default, rename = "voteavg", deserialize_with = "de::float")]
    pub vote_avg: f64,
    /// Release party.
    #[serde(default, deserialize_with = "de::reference")]
    pub party: Option<Id>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub party_compo: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub party_place: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub party_year: Option<u32>,
    /// Party this production is an invitation for.
    #[serde(default, deserialize_with = "de::reference")]
    pub invitation: Option<Id>,
    #[serde(default, rename = "invitationyear", deserialize_with = "de::opt_number")]
    pub invitation_year: Option<u32>,
    #[serde(default, rename = "boardID", deserialize_with = "de::opt_id")]
    pub board: Option<Id>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub rank: Option<u32>,
    /// Number of "coup de coeur" nominations.
    #[serde(default, deserialize_with = "de::count")]
    pub cdc: u32,
}
impl Prod {
    /// Every full user record embedded in this production.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.added_user
            .iter()
            .chain(self.credits.iter().map(|credit| &credit.user))
            .filter_map(UserRef::user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Placing {
    #[serde(default, deserialize_with = "de::reference")]
    pub party: Option<Id>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub compo: Option<String>,
    #[serde(default, deserialize_with = "de::count")]
    pub ranking: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub year: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credit {
    pub user: UserRef,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub role: Option<String>,
}
