//! Turret system: rotate every turret toward its desired facing.

use hecs::World;

use salvo_attack::turret::tick_turret;
use salvo_core::components::{BodyFacing, Turrets};

pub fn run(world: &mut World) {
    for (_entity, (body, turrets)) in world.query_mut::<(&BodyFacing, &mut Turrets)>() {
        for turret in &mut turrets.turrets {
            tick_turret(turret, body.facing);
        }
    }
}
