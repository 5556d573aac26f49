//! `links` subcommands.
//!
//! Edits fetch the current file, change the parsed data and hand the new
//! content to the update routine, which fetches a fresh sha right before
//! writing.
use log::*;

use crate::{
    cli::LinksCommand,
    config::ConfigStore,
    error::Result,
    github::ContentsApi,
    nav::{Link, NavData},
    sync::{fetch_file, update_file},
};

pub async fn execute(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    cmd: LinksCommand,
) -> Result<()> {
    match cmd {
        LinksCommand::List => {
            let data = load(store, api).await?;
            println!("{}", render(&data));
            Ok(())
        }
        LinksCommand::Add {
            category,
            title,
            url,
            description,
        } => {
            let link = Link {
                title,
                url,
                description,
                icon: None,
            };
            add(store, api, &category, link).await
        }
        LinksCommand::Remove { category, url } => {
            remove(store, api, &category, &url).await
        }
    }
}

async fn load(store: &ConfigStore, api: &dyn ContentsApi) -> Result<NavData> {
    let file = fetch_file(store, api).await?;
    NavData::parse(&file.content)
}

/// Add `link` to `category` in the remote file.
pub async fn add(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    category: &str,
    link: Link,
) -> Result<()> {
    let mut data = load(store, api).await?;

    info!("adding {} to category '{category}'", link.url);
    data.add_link(category, link)?;

    update_file(store, api, &data.to_json()?).await?;

    Ok(())
}

/// Remove the link with `url` from `category` in the remote file.
pub async fn remove(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    category: &str,
    url: &str,
) -> Result<()> {
    let mut data = load(store, api).await?;

    let removed = data.remove_link(category, url)?;
    info!("removing '{}' from category '{category}'", removed.title);

    update_file(store, api, &data.to_json()?).await?;

    Ok(())
}

/// Categories and their links as an indented listing.
pub fn render(data: &NavData) -> String {
    let mut out = vec![];

    for category in data.categories.iter() {
        out.push(format!("{}:", category.name));

        for link in category.links.iter() {
            match &link.description {
                Some(description) => out.push(format!(
                    "  {} <{}> - {description}",
                    link.title, link.url
                )),
                None => out.push(format!("  {} <{}>", link.title, link.url)),
            }
        }
    }

    out.join("\n")
}
