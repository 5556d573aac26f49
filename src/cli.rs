//! CLI argument parsing and config store setup.
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};

use crate::{
    config::{ConfigStore, GitHubConfigUpdate},
    error::Result,
    storage::{FileStorage, LocalStorage, MemoryStorage},
};

/// Global CLI arguments for storage location and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    #[arg(long, global = true)]
    /// Directory holding the saved config. Falls back to NAVSYNC_HOME, then
    /// $HOME/.navsync.
    pub storage_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Keep config in memory only; nothing is read from or written to disk.
    pub ephemeral: bool,

    #[arg(long, global = true)]
    /// GitHub API base URL, for GitHub Enterprise.
    pub api_base_url: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Top level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show or change the saved GitHub repository settings.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print the remote navigation file.
    Pull {
        #[arg(long, short)]
        /// Write the content to this file instead of stdout.
        output: Option<PathBuf>,
    },

    /// Replace the remote navigation file with a local file.
    Push {
        /// File whose content is uploaded.
        file: PathBuf,
    },

    /// List, add or remove links in the remote navigation file.
    #[command(subcommand)]
    Links(LinksCommand),
}

/// Settings subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the current settings. The token itself is never printed.
    Show,

    /// Change one or more settings, leaving the others untouched.
    Set {
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[arg(long)]
        /// Path of the data file inside the repository.
        path: Option<String>,
        #[arg(long)]
        /// Personal access token. Pass an empty string to clear it.
        token: Option<String>,
    },

    /// Restore default settings and forget the saved ones.
    Reset,
}

impl ConfigCommand {
    /// Partial update described by a `config set` invocation.
    pub fn to_update(&self) -> Option<GitHubConfigUpdate> {
        match self {
            ConfigCommand::Set {
                owner,
                repo,
                path,
                token,
            } => Some(GitHubConfigUpdate {
                owner: owner.clone(),
                repo: repo.clone(),
                path: path.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

/// Link subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum LinksCommand {
    /// List every link grouped by category.
    List,

    /// Add a link, creating its category if needed.
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a link by url.
    Remove {
        #[arg(long)]
        category: String,
        #[arg(long)]
        url: String,
    },
}

impl Args {
    /// Storage backend selected by the CLI flags.
    pub fn storage(&self) -> Result<Arc<dyn LocalStorage>> {
        if self.ephemeral {
            return Ok(Arc::new(MemoryStorage::new()));
        }

        let root = FileStorage::resolve_root(self.storage_dir.clone())?;
        Ok(Arc::new(FileStorage::new(root)))
    }

    /// Load the config store from the selected storage backend.
    pub fn config_store(&self) -> Result<ConfigStore> {
        let store = ConfigStore::load(self.storage()?);

        match &self.api_base_url {
            Some(base_url) => Ok(store.with_api_base_url(base_url)),
            None => Ok(store),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument parsing.
    use super::*;
    use crate::storage::STORAGE_FILE_EXTENSION;
    use tempfile::TempDir;

    #[test]
    fn parses_config_set_with_partial_fields() {
        let args =
            Args::try_parse_from(["navsync", "config", "set", "--repo", "links"])
                .unwrap();

        let Command::Config(cmd) = args.command else {
            panic!("expected config command");
        };

        let update = cmd.to_update().unwrap();
        assert_eq!(update.repo.as_deref(), Some("links"));
        assert!(update.owner.is_none());
        assert!(update.path.is_none());
        assert!(update.token.is_none());
    }

    #[test]
    fn config_show_has_no_update() {
        let args = Args::try_parse_from(["navsync", "config", "show"]).unwrap();

        let Command::Config(cmd) = args.command else {
            panic!("expected config command");
        };

        assert!(cmd.to_update().is_none());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Args::try_parse_from([
            "navsync",
            "links",
            "add",
            "--category",
            "Dev",
            "--title",
            "GitHub",
            "--url",
            "https://github.com",
            "--debug",
            "--ephemeral",
        ])
        .unwrap();

        assert!(args.debug);
        assert!(args.ephemeral);
        assert!(matches!(
            args.command,
            Command::Links(LinksCommand::Add { .. })
        ));
    }

    #[test]
    fn push_requires_a_file() {
        assert!(Args::try_parse_from(["navsync", "push"]).is_err());
    }

    #[test]
    fn config_store_uses_storage_dir() {
        let tmp = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "navsync",
            "--storage-dir",
            tmp.path().to_str().unwrap(),
            "config",
            "show",
        ])
        .unwrap();

        let mut store = args.config_store().unwrap();
        store.update(GitHubConfigUpdate {
            owner: Some("me".into()),
            ..Default::default()
        });

        let saved = tmp
            .path()
            .join(format!("github_config.{STORAGE_FILE_EXTENSION}"));
        assert!(saved.exists());
        assert_eq!(args.config_store().unwrap().get().owner, "me");
    }

    #[test]
    fn config_store_applies_api_base_url() {
        let args = Args::try_parse_from([
            "navsync",
            "--ephemeral",
            "--api-base-url",
            "https://ghe.example.com/api/v3",
            "pull",
        ])
        .unwrap();

        let store = args.config_store().unwrap();
        assert!(
            store
                .api_url()
                .unwrap()
                .as_str()
                .starts_with("https://ghe.example.com/api/v3/repos/")
        );
    }
}
