#![forbid(unsafe_code)]

//! Run settings: the API key plus the handful of knobs that locate the channel,
//! the API and the output file.
//!
//! Values come from three layers, highest precedence first: command-line
//! overrides, the process environment, and an optional dotenv-style file.

use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::FetchError;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_CHANNEL_ID: &str = "UCPl-xKH5JwMHvQv7VrgUJ0A";
pub const DEFAULT_OUTPUT_FILE: &str = "cdanslair_videos.csv";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const CHANNEL_ID_VAR: &str = "YOUTUBE_CHANNEL_ID";
pub const OUTPUT_PATH_VAR: &str = "VIDEOS_CSV_PATH";
pub const API_BASE_VAR: &str = "YOUTUBE_API_BASE";
pub const HTTP_TIMEOUT_VAR: &str = "YOUTUBE_HTTP_TIMEOUT_SECS";

/// Default dotenv file, relative to the working directory.
pub fn default_env_path() -> PathBuf {
    PathBuf::from(DEFAULT_ENV_FILE)
}

/// Default CSV destination, relative to the working directory.
pub fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// A non-blank API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: &str) -> Option<Self> {
        non_blank(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Supplies values for keys the process environment does not define.
pub trait EnvSeeder {
    fn value(&self, key: &str) -> Option<String>;
}

/// Seeder used when no env file is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEnvFile;

impl EnvSeeder for NoEnvFile {
    fn value(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Values parsed from a dotenv-style file.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            vars: read_env_file(path)?,
        })
    }
}

impl EnvSeeder for EnvFile {
    fn value(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Picks the seeder for `path`. A missing file is expected; an unreadable one
/// only disables the file layer for this run.
pub fn load_env_seeder(path: &Path) -> Box<dyn EnvSeeder> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no env file, using process environment only");
        return Box::new(NoEnvFile);
    }
    match EnvFile::load(path) {
        Ok(file) => Box::new(file),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "ignoring unreadable env file");
            Box::new(NoEnvFile)
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_key: ApiKey,
    pub channel_id: String,
    pub output_path: PathBuf,
    pub api_base: String,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub channel_id: Option<String>,
    pub output_path: Option<PathBuf>,
    pub api_base: Option<String>,
    pub http_timeout_secs: Option<u64>,
    pub env_path: Option<PathBuf>,
}

pub fn resolve_settings(overrides: SettingsOverrides) -> Result<FetchSettings, FetchError> {
    let env_path = overrides
        .env_path
        .clone()
        .unwrap_or_else(default_env_path);
    let seeder = load_env_seeder(&env_path);
    build_settings(seeder.as_ref(), env_var_string, &env_path, overrides)
}

/// Reads the API key, treating blank values as unset.
pub fn resolve_api_key(
    seeder: &dyn EnvSeeder,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Option<ApiKey> {
    lookup_value(API_KEY_VAR, seeder, &env_lookup).and_then(|value| ApiKey::new(&value))
}

fn build_settings(
    seeder: &dyn EnvSeeder,
    env_lookup: impl Fn(&str) -> Option<String>,
    env_path: &Path,
    overrides: SettingsOverrides,
) -> Result<FetchSettings, FetchError> {
    let api_key =
        resolve_api_key(seeder, &env_lookup).ok_or_else(|| FetchError::MissingCredential {
            var: API_KEY_VAR,
            env_file: env_path.display().to_string(),
        })?;
    let channel_id = overrides
        .channel_id
        .and_then(|value| non_blank(&value))
        .or_else(|| lookup_value(CHANNEL_ID_VAR, seeder, &env_lookup))
        .unwrap_or_else(|| DEFAULT_CHANNEL_ID.to_string());
    let output_path = overrides
        .output_path
        .or_else(|| lookup_value(OUTPUT_PATH_VAR, seeder, &env_lookup).map(PathBuf::from))
        .unwrap_or_else(default_output_path);
    let api_base = overrides
        .api_base
        .and_then(|value| non_blank(&value))
        .or_else(|| lookup_value(API_BASE_VAR, seeder, &env_lookup))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let http_timeout_secs = overrides
        .http_timeout_secs
        .or_else(|| {
            lookup_value(HTTP_TIMEOUT_VAR, seeder, &env_lookup)
                .and_then(|value| value.parse::<u64>().ok())
        })
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

    Ok(FetchSettings {
        api_key,
        channel_id,
        output_path,
        api_base: api_base.trim_end_matches('/').to_string(),
        http_timeout: Duration::from_secs(http_timeout_secs),
    })
}

fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| non_blank(&value))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn lookup_value(
    key: &str,
    seeder: &dyn EnvSeeder,
    env_lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    env_lookup(key)
        .and_then(|value| non_blank(&value))
        .or_else(|| seeder.value(key).and_then(|value| non_blank(&value)))
}

pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    if !path.exists() {
        return Ok(vars);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value_raw)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value_raw.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|value| value.strip_suffix('"'))
            .or_else(|| {
                value
                    .strip_prefix('\'')
                    .and_then(|value| value.strip_suffix('\''))
            })
            .unwrap_or(value);
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}
