//! Common test helper functions shared across test modules.
use std::sync::Arc;

use crate::{
    config::{ConfigStore, GitHubConfigUpdate},
    nav::{Category, Link, NavData},
    storage::MemoryStorage,
};

/// Creates a ConfigStore over fresh in-memory storage pointing at
/// `test/links/nav.json`, optionally with a token.
///
/// # Example
/// ```ignore
/// let store = create_test_store(Some("test-token"));
/// ```
pub fn create_test_store(token: Option<&str>) -> ConfigStore {
    let mut store = ConfigStore::load(Arc::new(MemoryStorage::new()));

    store.update(GitHubConfigUpdate {
        owner: Some("test".into()),
        repo: Some("links".into()),
        path: Some("nav.json".into()),
        token: token.map(str::to_string),
    });

    store
}

/// Creates a link with the given title and url and no description.
pub fn create_test_link(title: &str, url: &str) -> Link {
    Link {
        title: title.to_string(),
        url: url.to_string(),
        description: None,
        icon: None,
    }
}

/// Creates nav data with two categories of links.
pub fn create_test_nav_data() -> NavData {
    NavData {
        categories: vec![
            Category {
                name: "Dev".into(),
                links: vec![
                    create_test_link("GitHub", "https://github.com"),
                    create_test_link("docs.rs", "https://docs.rs"),
                ],
            },
            Category {
                name: "News".into(),
                links: vec![create_test_link(
                    "Hacker News",
                    "https://news.ycombinator.com",
                )],
            },
        ],
    }
}
