//! `push` command implementation.
use log::*;
use std::path::PathBuf;
use tokio::fs;

use crate::{
    config::ConfigStore, error::Result, github::ContentsApi, nav::NavData,
    sync::update_file,
};

/// Upload the content of `file` over the remote navigation file.
///
/// The content must parse as navigation data so a typo cannot clobber the
/// remote file with something the link commands can no longer read.
pub async fn execute(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    file: PathBuf,
) -> Result<()> {
    let content = fs::read_to_string(&file).await?;

    NavData::parse(&content)?;

    info!("pushing {} to {}", file.display(), store.get().path);

    update_file(store, api, &content).await?;

    info!("navigation data saved");

    Ok(())
}
