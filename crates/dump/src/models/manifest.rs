use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use time::{Date, Month};

/// Prefix shared by every snapshot file name.
const SNAPSHOT_PREFIX: &str = "pouetdatadump";

/// Remote descriptor of the current dumps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub latest: Latest,
    pub date: DumpDate,
}
impl Manifest {
    /// Parse a manifest body. Anything that is not the expected shape
    /// (including an empty body) is [`ErrorKind::InvalidManifest`].
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            exn::bail!(ErrorKind::InvalidManifest("empty body".to_string()));
        }
        serde_json::from_slice(body).or_raise(|| ErrorKind::InvalidManifest("unexpected shape".to_string()))
    }

    pub fn link(&self, kind: DumpKind) -> &DumpLink {
        match kind {
            DumpKind::Prods => &self.latest.prods,
            DumpKind::Groups => &self.latest.groups,
            DumpKind::Parties => &self.latest.parties,
            DumpKind::Boards => &self.latest.boards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Latest {
    pub prods: DumpLink,
    pub groups: DumpLink,
    pub parties: DumpLink,
    pub boards: DumpLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DumpLink {
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size_in_bytes: Option<u64>,
}

/// The four dump collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DumpKind {
    Prods,
    Groups,
    Parties,
    Boards,
}
impl DumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DumpKind::Prods => "prods",
            DumpKind::Groups => "groups",
            DumpKind::Parties => "parties",
            DumpKind::Boards => "boards",
        }
    }

    /// File name of the decoded snapshot of this dump at `date`.
    pub fn snapshot_key(&self, date: &DumpDate) -> String {
        format!("{SNAPSHOT_PREFIX}-{}-{date}.json", self.as_str())
    }
}
impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Freshness date of a set of dumps, always rendered as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DumpDate(Date);
impl FromStr for DumpDate {
    type Err = crate::error::Error;

    /// Accepts `YYYYMMDD` and `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ErrorKind::InvalidDate(s.to_string());
        let trimmed = s.trim();
        let digits: String = match trimmed.len() {
            8 => trimmed.to_string(),
            10 if trimmed.as_bytes()[4] == b'-' && trimmed.as_bytes()[7] == b'-' => trimmed.replace('-', ""),
            _ => exn::bail!(invalid()),
        };
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            exn::bail!(invalid());
        }
        let year = digits[0..4].parse::<i32>().or_raise(invalid)?;
        let month = digits[4..6].parse::<u8>().or_raise(invalid)?;
        let day = digits[6..8].parse::<u8>().or_raise(invalid)?;
        let month = Month::try_from(month).or_raise(invalid)?;
        let date = Date::from_calendar_date(year, month, day).or_raise(invalid)?;
        Ok(Self(date))
    }
}
impl fmt::Display for DumpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.0.year(), u8::from(self.0.month()), self.0.day())
    }
}
impl<'de> Deserialize<'de> for DumpDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => return Err(D::Error::custom(format!("invalid dump date: {other}"))),
        };
        raw.parse().map_err(|err: crate::error::Error| D::Error::custom(err.to_string()))
    }
}
impl Serialize for DumpDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
