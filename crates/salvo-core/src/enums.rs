//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::facing::Facing;
use crate::types::{WDist, WPos};

/// Armor classification of a damageable actor.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArmorClass {
    #[default]
    None,
    Wood,
    Light,
    Heavy,
    Concrete,
}

/// How a warhead distributes its damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModel {
    /// Radial splash with exponential falloff.
    #[default]
    Normal,
    /// Flat damage to everything inside a cell footprint.
    PerCell,
}

/// Terrain classification of a map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Clear,
    Road,
    Rough,
    Rock,
    Beach,
    Water,
}

impl TerrainKind {
    pub fn is_water(self) -> bool {
        matches!(self, TerrainKind::Water)
    }
}

/// Movement or attack behaviour requested from the activity collaborator.
///
/// The combat core only asks for these; executing them is somebody else's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestedActivity {
    /// Close to within weapon range of the target, then keep firing.
    MoveIntoRange {
        target: WPos,
        min_range: WDist,
        max_range: WDist,
    },
    /// Stay put and fire at whatever comes into range.
    HoldPosition,
    /// Rotate the body to the given facing.
    TurnToFacing { facing: Facing },
    /// Play the charge-up sequence, then release the charges.
    ChargeAttack {
        initial_delay: u32,
        charge_delay: u32,
    },
    /// Fly an attack pass over a ground position.
    AttackRun { target: WPos },
    /// Fall back to idle / auto-target behaviour.
    Idle,
}
