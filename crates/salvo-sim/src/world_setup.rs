//! Combatant spawn factory.
//!
//! Builds an entity with its component bundle from a data-driven
//! [`CombatantSpec`], resolving weapon ids through the catalog.

use std::collections::BTreeSet;

use hecs::{Entity, EntityBuilder, World};
use serde::{Deserialize, Serialize};

use salvo_attack::turret::turret_from_spec;
use salvo_attack::{AttackState, FiringMode, FiringModeSpec};
use salvo_core::components::*;
use salvo_core::definitions::{ArmamentSpec, TurretSpec};
use salvo_core::enums::ArmorClass;
use salvo_core::{ConfigError, Facing, Result, WDist, WPos};

use crate::armament::{Armament, Armaments};
use crate::catalog::WeaponCatalog;
use crate::components::Attacker;

/// Hit points and hit circle of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSpec {
    pub hp: i32,
    #[serde(default)]
    pub radius: WDist,
}

/// Everything needed to put a combatant into the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    /// `None` spawns an unowned prop that weapons will not target.
    #[serde(default)]
    pub owner: Option<u32>,
    pub position: WPos,
    #[serde(default)]
    pub facing: Facing,
    #[serde(default)]
    pub quantized_facings: u16,
    #[serde(default)]
    pub health: Option<HealthSpec>,
    #[serde(default)]
    pub armor: ArmorClass,
    #[serde(default)]
    pub target_types: BTreeSet<String>,
    #[serde(default)]
    pub water_bound: bool,
    /// `Some(build_complete)` makes the combatant a building.
    #[serde(default)]
    pub building: Option<bool>,
    #[serde(default)]
    pub ammo: Option<u32>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub turrets: Vec<TurretSpec>,
    #[serde(default)]
    pub armaments: Vec<ArmamentSpec>,
    /// Required for anything that attacks.
    #[serde(default)]
    pub firing_mode: Option<FiringModeSpec>,
}

impl CombatantSpec {
    /// A bare target at `position`.
    pub fn at(position: WPos) -> Self {
        Self {
            owner: None,
            position,
            facing: Facing::default(),
            quantized_facings: 0,
            health: None,
            armor: ArmorClass::default(),
            target_types: BTreeSet::new(),
            water_bound: false,
            building: None,
            ammo: None,
            modifiers: Modifiers::default(),
            turrets: Vec::new(),
            armaments: Vec::new(),
            firing_mode: None,
        }
    }
}

/// Spawn a combatant. Unknown weapons, turrets or armament slots are
/// configuration errors and nothing is spawned.
pub fn spawn_combatant(
    world: &mut World,
    catalog: &WeaponCatalog,
    spec: &CombatantSpec,
    default_recoil_recovery: WDist,
) -> Result<Entity> {
    let armaments = build_armaments(catalog, spec, default_recoil_recovery)?;
    let mode = spec.firing_mode.as_ref().map(FiringMode::from_spec);
    if let Some(mode) = &mode {
        for slot in mode.armament_slots() {
            if !armaments.iter().any(|a| a.name == slot) {
                return Err(ConfigError::UnknownArmament(slot.to_string()));
            }
        }
    }

    let mut builder = EntityBuilder::new();
    builder.add(spec.position).add(BodyFacing {
        facing: spec.facing,
        quantized_facings: spec.quantized_facings,
    });
    if let Some(player) = spec.owner {
        builder.add(Owner { player });
    }
    if let Some(health) = spec.health {
        builder.add(Health {
            hp: health.hp,
            max_hp: health.hp,
            radius: health.radius,
        });
    }
    builder.add(Armor { class: spec.armor });
    if !spec.target_types.is_empty() {
        builder.add(Targetable {
            target_types: spec.target_types.clone(),
        });
    }
    if spec.water_bound {
        builder.add(WaterBound);
    }
    if let Some(build_complete) = spec.building {
        builder.add(Building { build_complete });
    }
    if let Some(ammo) = spec.ammo {
        builder.add(LimitedAmmo {
            ammo,
            max_ammo: ammo,
        });
    }
    builder.add(spec.modifiers.clone());
    if !spec.turrets.is_empty() {
        builder.add(Turrets {
            turrets: spec.turrets.iter().map(turret_from_spec).collect(),
        });
    }
    if !armaments.is_empty() {
        builder.add(Armaments(armaments));
    }
    if let Some(mode) = mode {
        builder.add(Attacker::new(AttackState::new(mode)));
    }

    Ok(world.spawn(builder.build()))
}

fn build_armaments(
    catalog: &WeaponCatalog,
    spec: &CombatantSpec,
    default_recoil_recovery: WDist,
) -> Result<Vec<Armament>> {
    spec.armaments
        .iter()
        .map(|armament| {
            if let Some(turret) = armament.turret {
                if turret >= spec.turrets.len() {
                    return Err(ConfigError::UnknownTurret {
                        armament: armament.name.clone(),
                        turret,
                        count: spec.turrets.len(),
                    });
                }
            }
            let weapon = catalog.get(&armament.weapon)?;
            Ok(Armament::new(armament, weapon, default_recoil_recovery))
        })
        .collect()
}
