//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! passes). They own no state; everything lives in components or in the
//! engine's queues. Entities are always visited in id order.

pub mod armament;
pub mod attack;
pub mod cleanup;
pub mod hash;
pub mod recharge;
pub mod turret;

use hecs::Entity;

/// Sort entity handles into the canonical visiting order.
pub(crate) fn sorted(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by_key(|e| e.to_bits());
    entities
}
