//! Events emitted by the combat core for effects, audio and UI collaborators.
//!
//! Every payload is fully resolved so that consumers never need to look at
//! combat internals.

use serde::{Deserialize, Serialize};

use crate::enums::RequestedActivity;
use crate::facing::Facing;
use crate::types::{ActorId, WPos};

/// Something observable happened in the combat core this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A shot left a barrel.
    ShotFired {
        firer: ActorId,
        weapon: String,
        barrel: usize,
        source: WPos,
        facing: Facing,
        destination: WPos,
    },
    /// Weapon report sound.
    Report { sound: String, position: WPos },
    /// A warhead landed.
    Impact {
        weapon: String,
        warhead: usize,
        position: WPos,
        water: bool,
    },
    /// Explosion animation to play.
    Explosion {
        kind: String,
        position: WPos,
        water: bool,
    },
    /// Impact sound to play.
    ImpactSound {
        sound: String,
        position: WPos,
        water: bool,
    },
    /// Health changed. Negative amounts are heals.
    Damaged {
        victim: ActorId,
        attacker: ActorId,
        amount: i32,
        weapon: String,
        warhead: usize,
    },
    /// Health reached zero.
    Killed { victim: ActorId, attacker: ActorId },
    /// The firing mode asks the movement collaborator for a behaviour.
    ActivityRequested {
        actor: ActorId,
        activity: RequestedActivity,
    },
    /// An area attacker's payload slots came into range of the target.
    EnteredAttackRange { actor: ActorId },
    /// An area attacker's payload slots left range of the target.
    ExitedAttackRange { actor: ActorId },
    /// A charge-gated weapon started charging.
    ChargeUp { actor: ActorId, sound: Option<String> },
}
