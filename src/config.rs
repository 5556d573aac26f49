//! GitHub repository coordinates and access token, persisted to local
//! storage under the `github_config` key.
//!
//! The store is loaded once at startup by merging whatever was persisted over
//! the defaults. Every mutation is written back synchronously. Storage
//! failures never reach the caller: they are logged and the in-memory state
//! carries on.
use log::*;
use merge::Merge;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::{
    error::{NavSyncError, Result},
    storage::LocalStorage,
};

/// Local storage key holding the JSON-serialized config.
pub const STORAGE_KEY: &str = "github_config";
/// Default repository owner.
pub const DEFAULT_OWNER: &str = "MaxCosmos2001";
/// Default repository name.
pub const DEFAULT_REPO: &str = "nav_data";
/// Default path of the navigation data file inside the repository.
pub const DEFAULT_PATH: &str = "nav.json";
/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Repository coordinates and optional access token.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Path of the data file relative to the repository root.
    pub path: String,
    /// Access token, only required for writes.
    pub token: Option<SecretString>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            path: DEFAULT_PATH.to_string(),
            token: None,
        }
    }
}

impl GitHubConfig {
    /// Returns the token when one is set and non-empty.
    pub fn token(&self) -> Option<&SecretString> {
        self.token
            .as_ref()
            .filter(|t| !t.expose_secret().is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

/// Partial update applied over the current config. `None` fields are left
/// unchanged; an empty token clears the stored one.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Merge)]
#[serde(default)]
pub struct GitHubConfigUpdate {
    #[merge(strategy = merge::option::overwrite_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[merge(strategy = merge::option::overwrite_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[merge(strategy = merge::option::overwrite_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[merge(strategy = merge::option::overwrite_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl GitHubConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
            && self.repo.is_none()
            && self.path.is_none()
            && self.token.is_none()
    }

    /// Fill every unset field from `base`, then build the resulting config.
    fn apply_over(mut self, base: &GitHubConfig) -> GitHubConfig {
        self.merge(GitHubConfigUpdate::from(base));

        GitHubConfig {
            owner: self.owner.unwrap_or_default(),
            repo: self.repo.unwrap_or_default(),
            path: self.path.unwrap_or_default(),
            token: self
                .token
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
        }
    }
}

impl From<&GitHubConfig> for GitHubConfigUpdate {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            owner: Some(config.owner.clone()),
            repo: Some(config.repo.clone()),
            path: Some(config.path.clone()),
            token: config.token().map(|t| t.expose_secret().to_string()),
        }
    }
}

/// Holds the live config and mirrors every change into local storage.
pub struct ConfigStore {
    storage: Arc<dyn LocalStorage>,
    current: GitHubConfig,
    api_base_url: String,
}

impl ConfigStore {
    /// Load the persisted config merged over defaults. Unreadable or corrupt
    /// persisted data is logged and ignored.
    pub fn load(storage: Arc<dyn LocalStorage>) -> Self {
        let current = Self::load_saved(storage.as_ref());

        Self {
            storage,
            current,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Point API calls at a different host, e.g. GitHub Enterprise.
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    fn load_saved(storage: &dyn LocalStorage) -> GitHubConfig {
        let defaults = GitHubConfig::default();

        let saved = match storage.get_item(STORAGE_KEY) {
            Ok(Some(saved)) => saved,
            Ok(None) => return defaults,
            Err(err) => {
                error!("Failed to load saved config: {err}");
                return defaults;
            }
        };

        match serde_json::from_str::<GitHubConfigUpdate>(&saved) {
            Ok(persisted) => persisted.apply_over(&defaults),
            Err(err) => {
                error!("Failed to load saved config: {err}");
                defaults
            }
        }
    }

    /// Read-only snapshot of the current config.
    pub fn get(&self) -> &GitHubConfig {
        &self.current
    }

    /// Merge `update` over the current config and persist the result.
    pub fn update(&mut self, update: GitHubConfigUpdate) {
        self.current = update.apply_over(&self.current);

        let persisted = GitHubConfigUpdate::from(&self.current);

        let saved = serde_json::to_string(&persisted)
            .map_err(NavSyncError::from)
            .and_then(|json| self.storage.set_item(STORAGE_KEY, &json));

        if let Err(err) = saved {
            error!("Failed to save config: {err}");
        }
    }

    /// Restore defaults and clear the persisted config.
    pub fn reset(&mut self) {
        self.current = GitHubConfig::default();

        if let Err(err) = self.storage.remove_item(STORAGE_KEY) {
            error!("Failed to clear saved config: {err}");
        }
    }

    /// Contents API URL of the configured file.
    pub fn api_url(&self) -> Result<Url> {
        let GitHubConfig {
            owner, repo, path, ..
        } = &self.current;

        let pieces = path
            .split('/')
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>();

        for (name, empty) in [
            ("owner", owner.trim().is_empty()),
            ("repo", repo.trim().is_empty()),
            ("path", pieces.iter().all(|piece| piece.trim().is_empty())),
        ] {
            if empty {
                return Err(NavSyncError::invalid_config(format!(
                    "{name} must not be empty"
                )));
            }
        }

        let mut url = Url::parse(&self.api_base_url)?;

        // Segments are percent-encoded, so `#` and `?` stay in the path.
        url.path_segments_mut()
            .map_err(|_| {
                NavSyncError::invalid_config(format!(
                    "{} cannot be used as an API base url",
                    self.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(["repos", owner.as_str(), repo.as_str(), "contents"])
            .extend(pieces);

        Ok(url)
    }

    /// Configured token, if any.
    pub fn token(&self) -> Option<&SecretString> {
        self.current.token()
    }
}
