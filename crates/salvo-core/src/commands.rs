//! Orders sent from the order/command layer to the combat core.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::{ActorId, CPos, WPos};

/// What an attack order points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderTarget {
    Actor { actor: ActorId },
    Position { position: WPos },
    Cell { cell: CPos },
}

/// All combat orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatCommand {
    /// Attack a target with the actor's firing mode.
    Attack { actor: ActorId, target: OrderTarget },
    /// Drop the current target.
    Stop { actor: ActorId },
}
