//! Weapon catalog: immutable weapon definitions shared by every armament.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use salvo_core::definitions::WeaponDefinition;
use salvo_core::{ConfigError, Result};
use salvo_terrain::MapGrid;

/// All weapon definitions, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    weapons: BTreeMap<String, Arc<WeaponDefinition>>,
}

impl WeaponCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON object mapping names to definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, WeaponDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (name, weapon) in raw {
            catalog.insert(name, weapon)?;
        }
        info!(weapons = catalog.len(), "weapon catalog loaded");
        Ok(catalog)
    }

    /// Validate and add a definition. The catalog key becomes the weapon name.
    pub fn insert(&mut self, name: impl Into<String>, mut weapon: WeaponDefinition) -> Result<()> {
        weapon.name = name.into();
        validate(&weapon)?;
        self.weapons
            .insert(weapon.name.clone(), Arc::new(weapon));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<WeaponDefinition>> {
        self.weapons
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownWeapon(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weapons.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Check that every map collaborator a warhead relies on exists.
    pub fn validate_against(&self, map: &MapGrid) -> Result<()> {
        for weapon in self.weapons.values() {
            for warhead in &weapon.warheads {
                if let Some(smudge) = &warhead.smudge_type {
                    if !map.has_smudge_layer(smudge) {
                        return Err(ConfigError::UnknownSmudgeType {
                            weapon: weapon.name.clone(),
                            smudge: smudge.clone(),
                        });
                    }
                }
                if warhead.destroy_resources && !map.has_resource_layer() {
                    return Err(ConfigError::MissingResourceLayer(weapon.name.clone()));
                }
            }
        }
        Ok(())
    }
}

fn validate(weapon: &WeaponDefinition) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidWeapon {
        weapon: weapon.name.clone(),
        reason: reason.to_string(),
    };
    if weapon.rof == 0 {
        return Err(invalid("rate of fire must be positive"));
    }
    if weapon.burst == 0 {
        return Err(invalid("burst must be at least one"));
    }
    if weapon.warheads.is_empty() {
        return Err(invalid("no warheads"));
    }
    if weapon.range.0 < 0 || weapon.min_range.0 < 0 {
        return Err(invalid("negative range"));
    }
    if weapon.min_range > weapon.range {
        return Err(invalid("minimum range exceeds range"));
    }
    if weapon.warheads.iter().any(|w| w.spread.0 <= 0) {
        return Err(invalid("warhead spread must be positive"));
    }
    Ok(())
}
