//! SerpApi credential loading.
//!
//! The API key lives in a small TOML file, `~/.serpapi.toml` by default:
//!
//! ```toml
//! SERP_API_KEY = "92340184908390218409819aslkjfk13948"
//! ```
//!
//! The `SERP_API_KEY` environment variable takes precedence over the file.

use crate::error::{Result, SurveyError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Field name in the config file, also the environment variable name
pub const API_KEY_FIELD: &str = "SERP_API_KEY";

/// Default config file path: `~/.serpapi.toml`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(".serpapi.toml"))
        .ok_or_else(|| SurveyError::Config("Cannot determine home directory".to_string()))
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(rename = "SERP_API_KEY")]
    serp_api_key: Option<String>,
}

/// Provider credentials, loaded once at startup
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"<redacted>").finish()
    }
}

impl Credentials {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Consume the credentials, returning the key
    pub fn into_api_key(self) -> String {
        self.api_key
    }

    /// Load from the environment, falling back to `path` (or the default path).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_key = std::env::var(API_KEY_FIELD).ok();
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        Self::resolve(env_key, &path)
    }

    fn resolve(env_key: Option<String>, path: &Path) -> Result<Self> {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            debug!("Using {} from environment", API_KEY_FIELD);
            return Ok(Self::new(key.trim().to_string()));
        }
        Self::from_file(path)
    }

    /// Load from a TOML file containing `SERP_API_KEY`
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SurveyError::Config(format!(
                "{} not set and config file {:?} not found",
                API_KEY_FIELD, path
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let parsed: CredentialsFile = toml::from_str(&content)
            .map_err(|e| SurveyError::Config(format!("Invalid config file {:?}: {}", path, e)))?;

        let key = parsed
            .serp_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SurveyError::Config(format!("{} missing from {:?}", API_KEY_FIELD, path))
            })?;

        info!("Loaded {} from {:?}", API_KEY_FIELD, path);
        Ok(Self::new(key))
    }
}
