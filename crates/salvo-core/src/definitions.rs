//! Data-driven weapon, warhead and armament definitions.
//!
//! Definitions are parsed once at load time and never mutated afterwards.
//! Armaments share them by reference.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BURST_DELAY, DEFAULT_EFFECTIVENESS};
use crate::enums::{ArmorClass, DamageModel};
use crate::facing::Facing;
use crate::types::{WDist, WVec};

/// How a fired shot travels to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectileKind {
    /// Hits the target position on the frame the shot is released.
    #[default]
    Instant,
    /// Handed to the projectile collaborator, which reports the detonation back.
    Ballistic { speed: WDist },
}

/// Cell footprint of a warhead, in cells.
///
/// `outer == 0` means the impact cell only. With `inner` set the footprint
/// is the annulus between the two radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarheadSize {
    pub outer: i32,
    #[serde(default)]
    pub inner: Option<i32>,
}

/// One damage-application effect bundled in a weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarheadDefinition {
    /// Base damage. Negative values heal.
    pub damage: i32,
    /// Falloff scale: damage drops by a factor of e for each `spread` of distance.
    #[serde(default = "default_spread")]
    pub spread: WDist,
    #[serde(default)]
    pub damage_model: DamageModel,
    #[serde(default)]
    pub size: WarheadSize,
    /// Percentage effectiveness per armor class. Missing classes use 100%.
    #[serde(default)]
    pub effectiveness: BTreeMap<ArmorClass, i32>,
    /// Ticks between impact and this warhead being applied.
    #[serde(default)]
    pub delay: u32,
    #[serde(default)]
    pub smudge_type: Option<String>,
    /// Removes resources under the footprint.
    #[serde(default)]
    pub destroy_resources: bool,
    #[serde(default)]
    pub explosion: Option<String>,
    #[serde(default)]
    pub water_explosion: Option<String>,
    #[serde(default)]
    pub impact_sound: Option<String>,
    #[serde(default)]
    pub water_impact_sound: Option<String>,
}

impl WarheadDefinition {
    /// Effectiveness percentage against an armor class.
    pub fn effectiveness_against(&self, armor: ArmorClass) -> i32 {
        self.effectiveness
            .get(&armor)
            .copied()
            .unwrap_or(DEFAULT_EFFECTIVENESS)
    }

    /// Explosion animation key for the given surface.
    pub fn explosion_for(&self, is_water: bool) -> Option<&str> {
        if is_water {
            self.water_explosion.as_deref()
        } else {
            self.explosion.as_deref()
        }
    }

    /// Impact sound key for the given surface, falling back to the ground sound.
    pub fn impact_sound_for(&self, is_water: bool) -> Option<&str> {
        if is_water {
            if let Some(sound) = self.water_impact_sound.as_deref() {
                return Some(sound);
            }
        }
        self.impact_sound.as_deref()
    }
}

/// Immutable per-weapon definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    /// Catalog key; filled in by the catalog when loading.
    #[serde(default)]
    pub name: String,
    pub range: WDist,
    #[serde(default)]
    pub min_range: WDist,
    /// Shots per reload cycle.
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Ticks between shots inside a burst.
    #[serde(default = "default_burst_delay")]
    pub burst_delay: u32,
    /// Ticks of full reload after a burst.
    pub rof: u32,
    pub warheads: Vec<WarheadDefinition>,
    /// Target-type tags this weapon may engage.
    #[serde(default = "default_valid_targets")]
    pub valid_targets: BTreeSet<String>,
    /// Only engages water-bound targets.
    #[serde(default)]
    pub underwater: bool,
    #[serde(default)]
    pub projectile: ProjectileKind,
    /// Sound keys; one is picked per shot.
    #[serde(default)]
    pub report: Vec<String>,
}

/// A muzzle on a turret (or body).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarrelSpec {
    /// Local offset: x forward, y right, z up.
    #[serde(default)]
    pub offset: WVec,
    /// Local yaw added to the turret facing.
    #[serde(default)]
    pub yaw: Facing,
}

/// Configuration of one weapon mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmamentSpec {
    #[serde(default = "default_armament_name")]
    pub name: String,
    pub weapon: String,
    /// Index into the actor's turrets; `None` mounts on the body.
    #[serde(default)]
    pub turret: Option<usize>,
    /// Barrels cycle in order across a burst. Empty means a single centred barrel.
    #[serde(default)]
    pub barrels: Vec<BarrelSpec>,
    /// Ticks between the trigger and the shot leaving the barrel.
    #[serde(default)]
    pub fire_delay: u32,
    /// Recoil kick applied on each shot.
    #[serde(default)]
    pub recoil: WDist,
    /// Recoil recovered per tick; `None` uses the simulation default.
    #[serde(default)]
    pub recoil_recovery: Option<WDist>,
}

/// Configuration of a rotating turret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurretSpec {
    /// Turret pivot relative to the body centre (body space).
    #[serde(default)]
    pub offset: WVec,
    /// Facing steps per tick.
    pub turn_rate: u8,
    #[serde(default)]
    pub initial_facing: Facing,
    /// Idle ticks before realigning with the body; `None` uses the default.
    #[serde(default)]
    pub realign_delay: Option<u32>,
}

fn default_spread() -> WDist {
    WDist(1)
}

fn default_burst() -> u32 {
    1
}

fn default_burst_delay() -> u32 {
    DEFAULT_BURST_DELAY
}

fn default_valid_targets() -> BTreeSet<String> {
    BTreeSet::from(["Ground".to_string()])
}

fn default_armament_name() -> String {
    "primary".to_string()
}
