use super::Id;
use crate::de;
use serde::Deserialize;

/// A target platform (MS-Dos, Amiga AGA, Windows, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Platform {
    #[serde(deserialize_with = "de::id")]
    pub id: Id,
    pub name: String,
    /// Icon file name on pouet.net
    #[serde(default, deserialize_with = "de::opt_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub slug: Option<String>,
}

/// Platforms are embedded keyed by id, so the body carries no id of its own.
#[derive(Deserialize)]
pub(crate) struct PlatformBody {
    name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    slug: Option<String>,
}
impl PlatformBody {
    pub(crate) fn with_id(self, id: Id) -> Platform {
        Platform {
            id,
            name: self.name,
            icon: self.icon,
            slug: self.slug,
        }
    }
}
