use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DemoError;

pub const SECRETS_FILE_ENV: &str = "GENAI_SECRETS_FILE";

/// Flat key/value credential store kept outside the source tree
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSecrets {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl UserSecrets {
    /// `$GENAI_SECRETS_FILE`, else `<config dir>/genai-techniques/secrets.json`
    pub fn default_path() -> Result<PathBuf, DemoError> {
        if let Ok(path) = std::env::var(SECRETS_FILE_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let config = dirs::config_dir()
            .ok_or_else(|| DemoError::Config("could not find the user configuration directory".to_string()))?;
        Ok(config.join("genai-techniques").join("secrets.json"))
    }

    pub fn load() -> Result<Self, DemoError> {
        Self::load_from(Self::default_path()?)
    }

    /// A missing file is an empty store
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let mut secrets = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                Self::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Self::default()
        };
        secrets.path = Some(path.to_path_buf());
        Ok(secrets)
    }

    pub fn save(&self) -> Result<PathBuf, DemoError> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::debug!(target: "genai::config", path = %path.display(), keys = self.values.len(), "saved user secrets");
        Ok(path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Empty values count as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `ghp_1234567890` -> `ghp_******`
pub fn mask(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    if value.chars().count() <= 4 {
        "*".repeat(value.chars().count())
    } else {
        format!("{}******", visible)
    }
}
