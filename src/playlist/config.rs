use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// How many of the newest releases "only recent releases" keeps
pub const RECENT_RELEASE_COUNT: usize = 10;

/// Release-range options chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseOptions {
    pub earliest_release: Option<String>,
    pub exclude_newest: bool,
    pub only_recent_10: bool,
}

impl ReleaseOptions {
    /// Combine the options with the release facts of a catalog
    pub fn criteria_for(&self, catalog: &Catalog) -> FilterCriteria {
        FilterCriteria {
            earliest_release: self.earliest_release.clone(),
            exclude_newest_release: self.exclude_newest,
            only_recent_releases: self.only_recent_10,
            latest_release_id: Some(catalog.latest_release_id().to_string()),
            all_release_ids: catalog.all_release_ids().to_vec(),
        }
    }
}

/// Everything the release filter needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub earliest_release: Option<String>,
    pub exclude_newest_release: bool,
    pub only_recent_releases: bool,
    pub latest_release_id: Option<String>,
    pub all_release_ids: Vec<String>, // ascending by sort key
}

/// Tag and genre selection for themed playlists. Empty sets mean "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeCriteria {
    pub theme_tags: BTreeSet<String>,
    pub instructor_tags: BTreeSet<String>,
    pub genres: BTreeSet<String>,
}

impl ThemeCriteria {
    pub fn is_empty(&self) -> bool {
        self.theme_tags.is_empty() && self.instructor_tags.is_empty() && self.genres.is_empty()
    }

    pub fn has_tag_filter(&self) -> bool {
        !self.theme_tags.is_empty() || !self.instructor_tags.is_empty()
    }

    /// Add everything selected in `other` to this selection
    pub fn merge(&mut self, other: &ThemeCriteria) {
        self.theme_tags.extend(other.theme_tags.iter().cloned());
        self.instructor_tags.extend(other.instructor_tags.iter().cloned());
        self.genres.extend(other.genres.iter().cloned());
    }
}

/// A saved class setup: release range plus theme selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedFilters {
    pub release: ReleaseOptions,
    pub theme: ThemeCriteria,
}

impl SavedFilters {
    /// Load a saved setup from a JSON file
    pub fn load_from_file(path: &str) -> Result<SavedFilters> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filters file '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("Invalid filters file '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<SavedFilters> {
        Ok(serde_json::from_str(content)?)
    }
}
