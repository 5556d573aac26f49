//! Navigation data stored in the remote JSON file: named categories, each
//! holding an ordered list of links.
use serde::{Deserialize, Serialize};

use crate::error::{NavSyncError, Result};

/// A single bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A named group of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Root document of the navigation data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavData {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl NavData {
    /// Parse the file content. An empty file is treated as empty data.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_str(content)?)
    }

    /// Pretty JSON with a trailing newline, ready to be written back.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Append `link` to `category`, creating the category if needed. A link
    /// whose url already exists in the category is rejected.
    pub fn add_link(&mut self, category: &str, link: Link) -> Result<()> {
        let index = match self.categories.iter().position(|c| c.name == category)
        {
            Some(index) => index,
            None => {
                self.categories.push(Category {
                    name: category.to_string(),
                    links: vec![],
                });
                self.categories.len() - 1
            }
        };

        let target = &mut self.categories[index];

        if target.links.iter().any(|l| l.url == link.url) {
            return Err(NavSyncError::DuplicateLink {
                category: category.to_string(),
                url: link.url,
            });
        }

        target.links.push(link);

        Ok(())
    }

    /// Remove the link with `url` from `category` and return it. The category
    /// is kept even when it becomes empty.
    pub fn remove_link(&mut self, category: &str, url: &str) -> Result<Link> {
        let not_found = || NavSyncError::LinkNotFound {
            category: category.to_string(),
            url: url.to_string(),
        };

        let target = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(not_found)?;

        let index = target
            .links
            .iter()
            .position(|l| l.url == url)
            .ok_or_else(not_found)?;

        Ok(target.links.remove(index))
    }

    /// Every link paired with the name of its category, in file order.
    pub fn links(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.categories
            .iter()
            .flat_map(|c| c.links.iter().map(move |l| (c.name.as_str(), l)))
    }
}
