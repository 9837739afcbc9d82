//! Layered configuration for apkcompare.
//!
//! Values are merged from, in increasing order of precedence:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. a TOML file (see [`ConfigFile`]),
//! 3. `APKCOMPARE_*` environment variables, and
//! 4. command-line [`Overrides`].
//!
//! The merged [`Config`] is then [resolved](Config::resolve) into concrete
//! paths and the option values consumed by analysis and export.

pub mod error;
mod resolve;

use crate::error::{ErrorKind, Result};
use apkcompare_export::Format;
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::instrument;

pub use crate::resolve::Resolved;

pub const ENV_PREFIX: &str = "APKCOMPARE_";
pub const CONFIG_FILE_NAME: &str = "apkcompare.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// An archive, or a directory of archives.
    pub path: PathBuf,
    /// Report destination. Relative paths are placed next to the input, and
    /// the format's extension is added when missing.
    pub output: PathBuf,
    pub format: Format,
    /// Report sizes in megabytes instead of bytes (tabular formats only).
    pub readable: bool,
    /// Debug logging.
    pub verbose: bool,
    /// Archive extension, without the dot.
    pub extension: String,
    /// Directory for the scratch file used to estimate download sizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch: Option<PathBuf>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./"),
            output: PathBuf::from("output"),
            format: Format::Xlsx,
            readable: true,
            verbose: false,
            extension: "apk".to_string(),
            scratch: None,
        }
    }
}

/// Values given explicitly on the command-line; anything left as `None`
/// keeps the value from the lower layers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch: Option<PathBuf>,
}

/// Which TOML file, if any, takes part in the merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfigFile {
    /// `apkcompare.toml` in the platform's config directory, when it exists.
    #[default]
    Discover,
    /// A specific file, which must exist.
    Explicit(PathBuf),
    /// No file at all.
    Skip,
}
impl ConfigFile {
    fn path(&self) -> Result<Option<PathBuf>> {
        match self {
            ConfigFile::Discover => Ok(ProjectDirs::from("", "", "apkcompare")
                .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
                .filter(|path| path.is_file())),
            ConfigFile::Explicit(path) if path.is_file() => Ok(Some(path.clone())),
            ConfigFile::Explicit(path) => exn::bail!(ErrorKind::NotFound(path.clone())),
            ConfigFile::Skip => Ok(None),
        }
    }
}

impl Config {
    /// Every layer below the command-line, merged.
    pub fn figment(file: &ConfigFile) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file.path()? {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Toml::file_exact(path));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    #[instrument(level = "debug", skip(overrides))]
    pub fn load(file: &ConfigFile, overrides: &Overrides) -> Result<Self> {
        Self::figment(file)?
            .merge(Serialized::defaults(overrides))
            .extract()
            .or_raise(|| ErrorKind::Load)
    }
}
