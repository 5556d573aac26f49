//! `pull` command implementation.
use log::*;
use std::path::PathBuf;
use tokio::fs;

use crate::{
    config::ConfigStore, error::Result, github::ContentsApi, sync::fetch_file,
};

/// Fetch the remote file and print it, or write it to `output`.
pub async fn execute(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    output: Option<PathBuf>,
) -> Result<()> {
    let file = fetch_file(store, api).await?;

    match output {
        Some(path) => {
            info!(
                "writing {} (sha {}) to: {}",
                store.get().path,
                file.sha,
                path.display()
            );
            fs::write(&path, &file.content).await?;
        }
        None => print!("{}", file.content),
    }

    Ok(())
}
