//! Armament system: countdowns, recoil and shot release.

use hecs::{Entity, World};
use tracing::debug;

use salvo_core::definitions::ProjectileKind;
use salvo_core::events::CombatEvent;

use crate::armament::{Armaments, DeferredAction};
use crate::impact::ImpactQueue;
use crate::projectile::ProjectileArgs;
use crate::target::actor_id;

/// A shot whose launch delay has elapsed, with the actor that fired it.
pub type Launch = (Entity, DeferredAction);

/// Tick every armament and collect the shots that are due, in id order.
pub fn run(world: &mut World, launches: &mut Vec<Launch>) {
    for (entity, armaments) in world.query_mut::<&mut Armaments>() {
        for armament in &mut armaments.0 {
            armament.tick();
            launches.extend(armament.take_ready().into_iter().map(|a| (entity, a)));
        }
    }
    launches.sort_by_key(|(entity, _)| entity.to_bits());
}

/// Let due shots leave the barrel.
///
/// Instant weapons hit wherever the target is now and go straight to the
/// impact queue. Everything else is handed to the projectile collaborator.
pub fn release(
    world: &World,
    launches: &mut Vec<Launch>,
    impacts: &mut ImpactQueue,
    launched: &mut Vec<ProjectileArgs>,
    events: &mut Vec<CombatEvent>,
) {
    for (firer, action) in launches.drain(..) {
        let mut args = action.args;
        if let Some(center) = args.target.center(world) {
            args.destination = center;
        }

        debug!(
            firer = ?firer,
            weapon = %args.weapon.name,
            barrel = args.barrel,
            "shot released"
        );
        events.push(CombatEvent::ShotFired {
            firer: actor_id(firer),
            weapon: args.weapon.name.clone(),
            barrel: args.barrel,
            source: args.source,
            facing: args.facing,
            destination: args.destination,
        });
        if let Some(sound) = action.report {
            events.push(CombatEvent::Report {
                sound,
                position: args.source,
            });
        }

        match args.weapon.projectile {
            ProjectileKind::Instant => impacts.push(args),
            ProjectileKind::Ballistic { .. } => launched.push(args),
        }
    }
}
