//! Configuration types for agenda-prep.
//!
//! [`Config::load`] layers, from lowest to highest priority: the embedded
//! defaults, `~/.config/agenda-prep/config.toml` (or an explicit path), and
//! `AGENDA_PREP__SECTION__KEY` environment variables. The default file is
//! created with the built-in defaults if it does not yet exist.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[fetch]
base_url      = "https://public.opendatasoft.com/api/explore/v2.1/catalog/datasets/evenements-publics-openagenda/records"
city          = "Paris"
limit         = 100
lookback_days = 365
timeout_secs  = 30

[paths]
raw   = "data/raw_events.json"
clean = "data/clean_events.json"
"#;

const ENV_PREFIX: &str = "AGENDA_PREP";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// `[fetch]` section: where and what to harvest.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_city")]
    pub city: String,
    /// Page size; the catalog API caps it at 100.
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://public.opendatasoft.com/api/explore/v2.1/catalog/datasets/evenements-publics-openagenda/records".to_string()
}
fn default_city() -> String { "Paris".to_string() }
fn default_limit() -> u32 { 100 }
fn default_lookback_days() -> u32 { 365 }
fn default_timeout_secs() -> u64 { 30 }

impl FetchConfig {
    /// First day of the fetch window ending on `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(i64::from(self.lookback_days))
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            city: default_city(),
            limit: default_limit(),
            lookback_days: default_lookback_days(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[paths]` section: where the raw and clean datasets live.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_path")]
    pub raw: PathBuf,
    #[serde(default = "default_clean_path")]
    pub clean: PathBuf,
}

fn default_raw_path() -> PathBuf { PathBuf::from("data/raw_events.json") }
fn default_clean_path() -> PathBuf { PathBuf::from("data/clean_events.json") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw: default_raw_path(),
            clean: default_clean_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. With `explicit` set, that file must
    /// exist; otherwise the per-user file is used and created on first run.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => {
                let path = config_path();
                ensure_default_file(&path)?;
                (path, false)
            }
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("agenda-prep")
        .join("config.toml")
}

fn ensure_default_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, DEFAULT_CONFIG.trim_start()).map_err(|e| Error::io(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
