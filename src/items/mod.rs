//! Item categories: named pools of weighted item ids.
//!
//! Defaults are embedded in the binary via `include_str!`; an `item_groups.json` in an
//! override directory replaces individual categories.

pub mod placement;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{GenError, Result};

pub use placement::ItemPlacer;

const DEFAULT_ITEM_GROUPS_JSON: &str = include_str!("../../data/defaults/item_groups.json");

/// File name looked up by [`ItemCatalog::load_from`].
pub const ITEM_GROUPS_FILE: &str = "item_groups.json";

/// Categories whose guns are placed together with their default ammunition.
pub const AMMO_BUNDLED_CATEGORIES: [&str; 2] = ["homeguns", "behindcounter"];

#[derive(Debug, Deserialize)]
struct ItemGroupsFile {
    #[serde(default)]
    groups: BTreeMap<String, Vec<(String, u32)>>,
    #[serde(default)]
    default_ammo: BTreeMap<String, String>,
}

/// One candidate of a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemEntry {
    pub item: String,
    pub weight: u32,
}

/// Read-only item catalog, loaded once and shared by every generation call.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    groups: HashMap<String, Vec<ItemEntry>>,
    /// Gun id -> ammunition id. Membership doubles as the "is a gun" test.
    default_ammo: HashMap<String, String>,
}

impl ItemCatalog {
    /// Load from the embedded defaults.
    pub fn defaults() -> Result<Self> {
        Self::from_json(DEFAULT_ITEM_GROUPS_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: ItemGroupsFile = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        catalog.merge(file);
        Ok(catalog)
    }

    /// Load the defaults, then let `dir/item_groups.json` override whole categories.
    /// A missing file means defaults only; an unreadable or malformed file is logged
    /// and skipped.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut catalog = Self::defaults()?;
        let path = dir.join(ITEM_GROUPS_FILE);
        if !path.exists() {
            return Ok(catalog);
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<ItemGroupsFile>(&contents) {
                Ok(file) => {
                    log::debug!(
                        "overriding {} item categories from {}",
                        file.groups.len(),
                        path.display()
                    );
                    catalog.merge(file);
                }
                Err(e) => log::warn!("failed to parse {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("failed to read {}: {}", path.display(), e),
        }
        Ok(catalog)
    }

    fn merge(&mut self, file: ItemGroupsFile) {
        for (name, entries) in file.groups {
            let entries = entries
                .into_iter()
                .map(|(item, weight)| ItemEntry { item, weight })
                .collect();
            self.groups.insert(name, entries);
        }
        self.default_ammo.extend(file.default_ammo);
    }

    /// Candidates of a category.
    pub fn group(&self, category: &str) -> Result<&[ItemEntry]> {
        self.groups
            .get(category)
            .map(|g| g.as_slice())
            .ok_or_else(|| GenError::UnknownCategory(category.to_string()))
    }

    pub fn insert_group(&mut self, category: impl Into<String>, entries: Vec<ItemEntry>) {
        self.groups.insert(category.into(), entries);
    }

    pub fn contains(&self, category: &str) -> bool {
        self.groups.contains_key(category)
    }

    /// Sum of the weights in a category.
    pub fn total_weight(&self, category: &str) -> Result<u32> {
        Ok(self.group(category)?.iter().map(|e| e.weight).sum())
    }

    pub fn default_ammo(&self, gun: &str) -> Option<&str> {
        self.default_ammo.get(gun).map(|a| a.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let catalog = ItemCatalog::defaults().unwrap();
        assert!(catalog.contains("fridge"));
        assert!(catalog.contains("homeguns"));
        assert!(catalog.total_weight("fridge").unwrap() > 0);
        assert!(catalog.default_ammo("pistol_glock").is_some());
        assert_eq!(catalog.default_ammo("shotgun_pump"), Some("ammo_shot"));
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let catalog = ItemCatalog::defaults().unwrap();
        assert!(matches!(
            catalog.group("no_such_group"),
            Err(GenError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_load_from_nonexistent_dir() {
        let catalog = ItemCatalog::load_from(Path::new("/nonexistent/path")).unwrap();
        assert!(catalog.contains("kitchen"));
    }

    #[test]
    fn test_override_replaces_category() {
        let dir = std::env::temp_dir().join(format!("cellgen_items_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(ITEM_GROUPS_FILE),
            r#"{ "groups": { "fridge": [["pickle", 5]] } }"#,
        )
        .unwrap();
        let catalog = ItemCatalog::load_from(&dir).unwrap();
        assert_eq!(
            catalog.group("fridge").unwrap(),
            &[ItemEntry {
                item: "pickle".to_string(),
                weight: 5
            }]
        );
        assert!(catalog.contains("kitchen"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_override_is_skipped() {
        let dir = std::env::temp_dir().join(format!("cellgen_items_bad_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ITEM_GROUPS_FILE), "{ not json").unwrap();
        let catalog = ItemCatalog::load_from(&dir).unwrap();
        assert!(catalog.total_weight("fridge").unwrap() > 5);
        std::fs::remove_dir_all(&dir).ok();
    }
}
