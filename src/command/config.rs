//! `config` subcommands.
use log::*;

use crate::{cli::ConfigCommand, config::ConfigStore, error::Result};

/// Apply a config subcommand and print the resulting settings.
pub fn execute(store: &mut ConfigStore, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {}
        ConfigCommand::Reset => {
            store.reset();
            info!("restored default settings");
        }
        set @ ConfigCommand::Set { .. } => {
            let update = set.to_update().unwrap_or_default();
            if update.is_empty() {
                warn!("no settings given: nothing to change");
            } else {
                store.update(update);
                info!("settings saved");
            }
        }
    }

    println!("{}", render(store));

    Ok(())
}

/// Human readable view of the settings. The token is reported as set or not
/// set, never printed.
pub fn render(store: &ConfigStore) -> String {
    let config = store.get();
    let token = if config.has_token() { "set" } else { "not set" };

    let mut lines = vec![
        format!("owner: {}", config.owner),
        format!("repo:  {}", config.repo),
        format!("path:  {}", config.path),
        format!("token: {token}"),
    ];

    if let Ok(url) = store.api_url() {
        lines.push(format!("url:   {url}"));
    }

    lines.join("\n")
}
