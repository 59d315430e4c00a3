//! Firing-mode bookkeeping that runs whether or not the actor is attacking.
//!
//! Charge-gated modes hold every armament of the actor until the charges
//! come back.

use hecs::World;

use crate::armament::Armaments;
use crate::components::Attacker;

pub fn run(world: &mut World) {
    for (_entity, (attacker, armaments)) in
        world.query_mut::<(&mut Attacker, Option<&mut Armaments>)>()
    {
        let Some(hold) = attacker.state.mode.tick() else {
            continue;
        };
        if let Some(armaments) = armaments {
            for armament in &mut armaments.0 {
                armament.hold_fire(hold);
            }
        }
    }
}
