use super::Id;
use crate::de;
use serde::Deserialize;

/// A pouet.net account, as embedded in the records it added or is credited on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "de::id")]
    pub id: Id,
    pub nickname: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub avatar: Option<String>,
    /// Site reputation points.
    #[serde(default, deserialize_with = "de::count")]
    pub glops: u32,
    #[serde(default, rename = "registerDate", deserialize_with = "de::opt_string")]
    pub register_date: Option<String>,
}

/// Either a full embedded user record or only its id.
///
/// A bare id is never turned into a user on its own: it only resolves if a
/// full record with the same id was embedded somewhere else in the dumps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    User(User),
    Id(#[serde(deserialize_with = "de::id")] Id),
}
impl UserRef {
    pub fn id(&self) -> Id {
        match self {
            UserRef::User(user) => user.id,
            UserRef::Id(id) => *id,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            UserRef::User(user) => Some(user),
            UserRef::Id(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_stringly_json() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "nickname": "analogue",
            "level": "administrator",
            "avatar": "",
            "glops": "850",
            "registerDate": "2000-07-26 22:44:23",
        }))
        .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.glops, 850);
        assert_eq!(user.avatar, None);
    }

    #[test]
    fn test_user_ref_variants() {
        let full: UserRef = serde_json::from_value(json!({"id": 4, "nickname": "ps"})).unwrap();
        assert_eq!(full.id(), 4);
        assert!(full.user().is_some());
        let bare: UserRef = serde_json::from_value(json!("4")).unwrap();
        assert_eq!(bare, UserRef::Id(4));
        assert!(bare.user().is_none());
    }
}
