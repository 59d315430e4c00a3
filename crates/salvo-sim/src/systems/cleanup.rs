//! Cleanup system: removes actors whose health reached zero.

use hecs::{Entity, World};

use salvo_core::components::Health;

/// Despawn dead actors. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, health) in world.query_mut::<&Health>() {
        if health.hp <= 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
