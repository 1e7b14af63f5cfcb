use crate::error::StartupError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Model used for every rewrite call.
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Upper bound on generated tokens per call.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// System instruction sent with every URL.
pub const SYSTEM_PROMPT: &str = "The following image url contains image dimensions, \
possibly in multiple parts of the URL. \
Rewrite the url for a 4k screen by changing the last set of dimensions:";

/// Endpoint settings loaded from `~/.config/imgup/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgupConfig {
    /// Base URL of the messages API; `/v1/messages` is appended.
    pub api_base_url: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = no timeout).
    pub request_timeout_secs: Option<u64>,
}

impl Default for ImgupConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

impl ImgupConfig {
    /// Full URL of the messages endpoint.
    pub fn messages_url(&self) -> Result<Url> {
        let mut base = Url::parse(&self.api_base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join("v1/messages")?)
    }
}

/// Fixed request parameters, built once per run and shared by every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSettings {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// API credential. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Read the key from `ANTHROPIC_API_KEY`. Only an unset variable is an error.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|var| std::env::var_os(var))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: FnOnce(&str) -> Option<std::ffi::OsString>,
    {
        match lookup(API_KEY_VAR) {
            Some(v) => Ok(Self(v.to_string_lossy().into_owned())),
            None => Err(StartupError::MissingCredential { var: API_KEY_VAR }),
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgup")?;
    Ok(xdg_dirs.get_config_home().join("imgup").join("config.toml"))
}

/// Load configuration from `path`, or defaults if the file does not exist.
pub fn load_from(path: &Path) -> Result<ImgupConfig, StartupError> {
    let invalid = |reason: String| StartupError::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    };
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(ImgupConfig::default());
    }
    let data = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let cfg: ImgupConfig = toml::from_str(&data).map_err(|e| invalid(e.to_string()))?;
    cfg.messages_url().map_err(|e| invalid(e.to_string()))?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir (defaults if absent).
pub fn load_or_default() -> Result<ImgupConfig> {
    let path = config_path()?;
    Ok(load_from(&path)?)
}
