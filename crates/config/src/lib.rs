//! Layered configuration.
//!
//! Lowest to highest precedence: built-in defaults, a TOML (or, by
//! extension, JSON) file, then `POUET_*` environment variables with nested
//! keys split on `__` (`POUET_HTTP__TIMEOUT_SECS=30`).

pub mod error;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ErrorKind, Result};

pub const DEFAULT_MANIFEST_URL: &str = "https://data.pouet.net/json.php";
pub const DEFAULT_DATABASE: &str = "pouet.db";
const ENV_PREFIX: &str = "POUET_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the manifest describing the current dumps.
    pub manifest_url: String,
    /// Reuse decoded snapshots when one exists for the manifest date.
    pub cache: bool,
    /// Directory holding the snapshots.
    pub cache_dir: PathBuf,
    /// Database file, or `:memory:`.
    pub database: String,
    pub http: HttpConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            cache: true,
            cache_dir: PathBuf::from("."),
            database: DEFAULT_DATABASE.to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Falls back to the client's own user agent when unset.
    pub user_agent: Option<String>,
}
impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 60, user_agent: None }
    }
}

impl Config {
    /// Default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("net", "pouet", "pouet").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load and validate the configuration.
    ///
    /// An explicit `path` must exist; the default path is skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(path)?)
    }

    /// The merged, not yet extracted, configuration sources.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(path) if !path.exists() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) if path.extension().is_some_and(|ext| ext == "json") => {
                figment = figment.merge(Json::file(path));
            },
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                if let Some(default) = Self::default_path().filter(|p| p.exists()) {
                    tracing::debug!(path = %default.display(), "using default config file");
                    figment = figment.merge(Toml::file(default));
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract from `figment` and validate.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = match figment.extract() {
            Ok(config) => config,
            Err(err) => {
                let reason = err.to_string();
                return Err(err).or_raise(|| ErrorKind::Unreadable(reason));
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.manifest_url.starts_with("http://") || self.manifest_url.starts_with("https://")) {
            exn::bail!(ErrorKind::Invalid {
                key: "manifest_url",
                reason: "must be an http(s) URL",
            });
        }
        if self.http.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid {
                key: "http.timeout_secs",
                reason: "must be greater than zero",
            });
        }
        if self.database.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                key: "database",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}
