//! Generation tuning: retry caps, recursion limits, map-extra tables and default
//! post-processing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::extras::MapExtraKind;
use crate::items::placement::DEFAULT_RETRY_CAP;
use crate::overmap::ExtrasGroup;
use crate::postprocess::PostProcessZone;

/// How often a group of cell types gets a map extra, and which.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtrasDistribution {
    /// One cell in `chance` gets an extra; 0 disables the group.
    pub chance: i32,
    pub weights: BTreeMap<MapExtraKind, u32>,
}

impl ExtrasDistribution {
    fn new(chance: i32, weights: &[(MapExtraKind, u32)]) -> Self {
        Self {
            chance,
            weights: weights.iter().copied().collect(),
        }
    }

    pub fn total_weight(&self) -> u32 {
        self.weights.values().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Tile picks per item before item placement gives up on that item.
    pub item_retry_cap: u32,
    /// Maximum nesting of laboratory room splits.
    pub science_split_depth: u32,
    /// Maximum nesting of fractal anomalies.
    pub anomaly_depth: u32,
    /// Whether map extras are rolled at all.
    pub extras_enabled: bool,
    pub extras: BTreeMap<ExtrasGroup, ExtrasDistribution>,
    /// Zones applied to every cell before the request's own zones.
    pub post_process: Vec<PostProcessZone>,
}

impl Default for GenConfig {
    fn default() -> Self {
        use MapExtraKind::*;
        let mut extras = BTreeMap::new();
        extras.insert(
            ExtrasGroup::Field,
            ExtrasDistribution::new(
                90,
                &[
                    (Helicopter, 40),
                    (Military, 8),
                    (Science, 12),
                    (SupplyDrop, 10),
                    (Portal, 3),
                    (WolfPack, 12),
                    (Crater, 10),
                    (Fumarole, 4),
                    (PortalIn, 1),
                    (Anomaly, 3),
                ],
            ),
        );
        extras.insert(
            ExtrasGroup::Forest,
            ExtrasDistribution::new(
                50,
                &[
                    (Helicopter, 40),
                    (Military, 5),
                    (Science, 10),
                    (Stash, 6),
                    (Portal, 3),
                    (WolfPack, 20),
                    (Crater, 5),
                    (Fumarole, 2),
                    (PortalIn, 2),
                    (Anomaly, 3),
                ],
            ),
        );
        extras.insert(
            ExtrasGroup::Road,
            ExtrasDistribution::new(
                75,
                &[
                    (Helicopter, 40),
                    (Military, 25),
                    (Science, 40),
                    (Stash, 10),
                    (DrugDeal, 30),
                    (SupplyDrop, 10),
                    (Portal, 5),
                    (Minefield, 8),
                    (Crater, 10),
                    (Fumarole, 4),
                    (Anomaly, 2),
                ],
            ),
        );
        extras.insert(
            ExtrasGroup::Build,
            ExtrasDistribution::new(
                90,
                &[
                    (Military, 5),
                    (Science, 12),
                    (Stash, 12),
                    (DrugDeal, 10),
                    (Portal, 1),
                    (Crater, 3),
                    (Anomaly, 1),
                ],
            ),
        );
        extras.insert(
            ExtrasGroup::Underground,
            ExtrasDistribution::new(
                75,
                &[
                    (Science, 20),
                    (Portal, 10),
                    (Fumarole, 8),
                    (PortalIn, 3),
                    (Anomaly, 2),
                ],
            ),
        );
        extras.insert(ExtrasGroup::None, ExtrasDistribution::new(0, &[]));

        Self {
            item_retry_cap: DEFAULT_RETRY_CAP,
            science_split_depth: 4,
            anomaly_depth: 3,
            extras_enabled: true,
            extras,
            post_process: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let config: GenConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.item_retry_cap == 0 {
            return Err(GenError::InvalidConfig("item_retry_cap must be at least 1".into()));
        }
        for (group, dist) in &self.extras {
            if dist.chance < 0 {
                return Err(GenError::InvalidConfig(format!(
                    "extras chance for {:?} is negative",
                    group
                )));
            }
            if dist.chance > 0 && dist.total_weight() == 0 {
                return Err(GenError::InvalidConfig(format!(
                    "extras for {:?} are enabled but have no weights",
                    group
                )));
            }
        }
        for zone in &self.post_process {
            if zone.min_intensity > zone.max_intensity {
                return Err(GenError::InvalidConfig(format!(
                    "post-process {:?} has min_intensity above max_intensity",
                    zone.kind
                )));
            }
        }
        Ok(())
    }

    /// Defaults with map extras switched off.
    pub fn without_extras() -> Self {
        Self {
            extras_enabled: false,
            ..Self::default()
        }
    }

    pub fn extras_for(&self, group: ExtrasGroup) -> Option<&ExtrasDistribution> {
        self.extras.get(&group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::PostProcessKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = GenConfig::default();
        config.validate().unwrap();
        assert_eq!(config.item_retry_cap, 20);
        assert_eq!(config.extras_for(ExtrasGroup::None).map(|d| d.chance), Some(0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GenConfig = serde_json::from_str(r#"{ "anomaly_depth": 1 }"#).unwrap();
        assert_eq!(config.anomaly_depth, 1);
        assert_eq!(config.item_retry_cap, 20);
        assert!(config.extras_for(ExtrasGroup::Road).is_some());
    }

    #[test]
    fn test_extras_table_parses_from_json() {
        let config: GenConfig = serde_json::from_str(
            r#"{ "extras": { "field": { "chance": 2, "weights": { "crater": 1 } } } }"#,
        )
        .unwrap();
        let field = config.extras_for(ExtrasGroup::Field).unwrap();
        assert_eq!(field.chance, 2);
        assert_eq!(field.weights.get(&MapExtraKind::Crater), Some(&1));
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = GenConfig::default();
        config.item_retry_cap = 0;
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));

        let mut config = GenConfig::default();
        config
            .post_process
            .push(PostProcessZone::new(PostProcessKind::AddFire, 50, 3));
        config.post_process[0].min_intensity = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GenConfig::from_json_file(Path::new("/nonexistent/cellgen.json")).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }
}
