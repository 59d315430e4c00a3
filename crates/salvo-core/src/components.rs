//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Positions use `WPos`
//! directly as a component.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::ArmorClass;
use crate::facing::Facing;
use crate::types::{WDist, WVec};

/// Owning player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner {
    pub player: u32,
}

/// Hit points and hit shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    /// Bounding circle radius used for splash distance.
    pub radius: WDist,
}

/// Armor classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Armor {
    pub class: ArmorClass,
}

/// Target-type tags this actor can be attacked as (e.g. "Ground", "Air").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Targetable {
    pub target_types: BTreeSet<String>,
}

/// Marks an actor that lives on or under water.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaterBound;

/// Marks an actor whose weapons are disabled (EMP, low power, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Disabled;

/// Body orientation of an actor that can turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyFacing {
    pub facing: Facing,
    /// Number of rendered facings the body is quantized to for muzzle placement (0 = exact).
    pub quantized_facings: u16,
}

/// Building construction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Building {
    pub build_complete: bool,
}

/// Finite ammunition pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimitedAmmo {
    pub ammo: u32,
    pub max_ammo: u32,
}

/// Active percentage modifiers contributed by other components (veterancy, power, crates).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    /// Scales outgoing damage.
    pub firepower: Vec<u32>,
    /// Scales incoming damage.
    pub damage: Vec<u32>,
    /// Scales reload time after a burst.
    pub reload: Vec<u32>,
}

/// One rotating turret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turret {
    pub facing: Facing,
    /// Facing the turret is rotating toward, if it has been told to aim.
    pub desired_facing: Option<Facing>,
    /// Facing steps per tick.
    pub turn_rate: u8,
    /// Pivot offset in body space.
    pub offset: WVec,
    /// Idle ticks before swinging back to the body facing.
    pub realign_delay: u32,
    /// Ticks since the turret was last told to aim.
    pub idle_ticks: u32,
}

/// All turrets on an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turrets {
    pub turrets: Vec<Turret>,
}
