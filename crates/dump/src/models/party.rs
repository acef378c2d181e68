use super::{Id, User, UserRef};
use crate::de;
use serde::Deserialize;

/// A demoparty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Party {
    #[serde(deserialize_with = "de::id")]
    pub id: Id,
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub web: Option<String>,
    #[serde(default, rename = "addedUser", deserialize_with = "de::optional")]
    pub added_user: Option<UserRef>,
    #[serde(default, rename = "addedDate", deserialize_with = "de::opt_string")]
    pub added_date: Option<String>,
}
impl Party {
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.added_user.iter().filter_map(UserRef::user)
    }
}
