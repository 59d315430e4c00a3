//! Attack targets.
//!
//! Targets are re-resolved every tick; an actor reference is never trusted
//! without checking that the actor still exists.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use hecs::{Entity, World};

use salvo_core::commands::OrderTarget;
use salvo_core::components::Health;
use salvo_core::enums::ArmorClass;
use salvo_core::{ActorId, CPos, WPos};

/// Snapshot of an actor as last seen under fog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrozenActor {
    /// The live actor, if it is still known to exist.
    pub actor: Option<Entity>,
    pub owner: Option<u32>,
    pub target_types: BTreeSet<String>,
    pub armor: ArmorClass,
    pub water_bound: bool,
    pub position: WPos,
}

/// What an attack is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    Actor(Entity),
    FrozenActor(FrozenActor),
    Position(WPos),
    Cell(CPos),
    #[default]
    Invalid,
}

impl Target {
    /// Resolve an order target. Unknown actors resolve to `Invalid`.
    pub fn from_order(order: OrderTarget, world: &World) -> Self {
        match order {
            OrderTarget::Actor { actor } => match entity_of(actor) {
                Some(entity) if world.contains(entity) => Target::Actor(entity),
                _ => Target::Invalid,
            },
            OrderTarget::Position { position } => Target::Position(position),
            OrderTarget::Cell { cell } => Target::Cell(cell),
        }
    }

    /// Whether the target can still be attacked at all.
    pub fn is_valid(&self, world: &World) -> bool {
        match self {
            Target::Actor(entity) => actor_alive(world, *entity),
            Target::FrozenActor(_) | Target::Position(_) | Target::Cell(_) => true,
            Target::Invalid => false,
        }
    }

    /// Current centre position of the target.
    pub fn center(&self, world: &World) -> Option<WPos> {
        match self {
            Target::Actor(entity) => world.get::<&WPos>(*entity).ok().map(|p| *p),
            Target::FrozenActor(frozen) => Some(frozen.position),
            Target::Position(pos) => Some(*pos),
            Target::Cell(cell) => Some(cell.center()),
            Target::Invalid => None,
        }
    }
}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Target::Actor(entity) => {
                state.write_u8(0);
                entity.to_bits().hash(state);
            }
            Target::FrozenActor(frozen) => {
                state.write_u8(1);
                frozen.hash(state);
            }
            Target::Position(pos) => {
                state.write_u8(2);
                pos.hash(state);
            }
            Target::Cell(cell) => {
                state.write_u8(3);
                cell.hash(state);
            }
            Target::Invalid => state.write_u8(4),
        }
    }
}

/// An actor is alive while it exists and, if it has health, has some left.
pub fn actor_alive(world: &World, entity: Entity) -> bool {
    if !world.contains(entity) {
        return false;
    }
    world.get::<&Health>(entity).map_or(true, |h| h.hp > 0)
}

/// Stable identifier of an entity for commands and events.
pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

/// Entity handle for an identifier, if the bits are well formed.
pub fn entity_of(id: ActorId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
