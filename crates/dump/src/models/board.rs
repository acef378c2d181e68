use super::{Id, Platform, User, UserRef};
use crate::de;
use serde::Deserialize;

/// A bulletin board system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Board {
    #[serde(deserialize_with = "de::id")]
    pub id: Id,
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub sysop: Option<String>,
    #[serde(default, rename = "phonenumber", deserialize_with = "de::opt_string")]
    pub phone_number: Option<String>,
    #[serde(default, rename = "addedUser", deserialize_with = "de::optional")]
    pub added_user: Option<UserRef>,
    #[serde(default, rename = "addedDate", deserialize_with = "de::opt_string")]
    pub added_date: Option<String>,
    #[serde(default, deserialize_with = "de::platforms")]
    pub platforms: Vec<Platform>,
}
impl Board {
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.added_user.iter().filter_map(UserRef::user)
    }
}
