pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod github;
pub mod nav;
pub mod storage;
pub mod sync;

pub use cli::{Args, Command, ConfigCommand, LinksCommand};
pub use config::{ConfigStore, GitHubConfig, GitHubConfigUpdate};
pub use error::{NavSyncError, Result};
pub use github::{ContentsApi, GithubContents};
pub use sync::{fetch_file, update_file};

#[cfg(test)]
pub mod test_helpers;
