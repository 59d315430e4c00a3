//! Impact resolver.
//!
//! Detonations are collected during the frame and resolved in the
//! end-of-frame queue: warheads without a delay apply in that same queue,
//! delayed warheads are parked and applied `delay` frames later with the
//! original shot context.

use std::hash::{Hash, Hasher};

use hecs::{Entity, World};
use tracing::{debug, warn};

use salvo_core::components::{Armor, Health, Modifiers};
use salvo_core::enums::{ArmorClass, DamageModel};
use salvo_core::events::CombatEvent;
use salvo_core::{CPos, WPos};
use salvo_terrain::MapGrid;

use crate::damage;
use crate::modifiers;
use crate::projectile::ProjectileArgs;
use crate::target::actor_id;
use crate::validity::weapon_valid_for_actor;

/// A warhead waiting for its delay to run out.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct DelayedWarhead {
    pub ticks_remaining: u32,
    /// Index into the weapon's warheads.
    pub warhead: usize,
    pub args: ProjectileArgs,
}

/// End-of-frame work queue for impacts.
#[derive(Debug, Clone, Default)]
pub struct ImpactQueue {
    detonations: Vec<ProjectileArgs>,
    delayed: Vec<DelayedWarhead>,
}

impl ImpactQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a shot that reached its destination this frame.
    pub fn push(&mut self, args: ProjectileArgs) {
        self.detonations.push(args);
    }

    /// Delayed warheads not yet applied.
    pub fn delayed(&self) -> &[DelayedWarhead] {
        &self.delayed
    }

    pub fn is_empty(&self) -> bool {
        self.detonations.is_empty() && self.delayed.is_empty()
    }

    /// Run the end-of-frame queue.
    pub fn run_frame_end(
        &mut self,
        world: &mut World,
        map: &mut MapGrid,
        events: &mut Vec<CombatEvent>,
    ) {
        // Delayed warheads scheduled in earlier frames count down first.
        for delayed in &mut self.delayed {
            delayed.ticks_remaining = delayed.ticks_remaining.saturating_sub(1);
        }
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.delayed)
            .into_iter()
            .partition(|d| d.ticks_remaining == 0);
        self.delayed = waiting;
        for delayed in due {
            resolve_warhead(world, map, &delayed.args, delayed.warhead, events);
        }

        for args in std::mem::take(&mut self.detonations) {
            for (index, warhead) in args.weapon.warheads.iter().enumerate() {
                if warhead.delay > 0 {
                    self.delayed.push(DelayedWarhead {
                        ticks_remaining: warhead.delay,
                        warhead: index,
                        args: args.clone(),
                    });
                } else {
                    resolve_warhead(world, map, &args, index, events);
                }
            }
        }
    }

    pub fn hash_state<H: Hasher>(&self, state: &mut H) {
        self.detonations.hash(state);
        self.delayed.hash(state);
    }
}

/// Apply one warhead of a shot at its destination.
pub fn resolve_warhead(
    world: &mut World,
    map: &mut MapGrid,
    args: &ProjectileArgs,
    index: usize,
    events: &mut Vec<CombatEvent>,
) {
    let Some(warhead) = args.weapon.warheads.get(index) else {
        return;
    };
    let dest = args.destination;
    let cell = dest.cell();
    if !map.contains(cell) {
        warn!(
            weapon = %args.weapon.name,
            x = dest.x(),
            y = dest.y(),
            "impact outside the map dropped"
        );
        return;
    }

    let water = dest.z() == 0 && map.is_water(cell);
    debug!(weapon = %args.weapon.name, warhead = index, water, "impact");
    events.push(CombatEvent::Impact {
        weapon: args.weapon.name.clone(),
        warhead: index,
        position: dest,
        water,
    });
    if let Some(kind) = warhead.explosion_for(water) {
        events.push(CombatEvent::Explosion {
            kind: kind.to_string(),
            position: dest,
            water,
        });
    }
    if let Some(sound) = warhead.impact_sound_for(water) {
        events.push(CombatEvent::ImpactSound {
            sound: sound.to_string(),
            position: dest,
            water,
        });
    }

    if let Some(smudge) = &warhead.smudge_type {
        if warhead.size.outer > 0 {
            let cells = match warhead.size.inner {
                Some(inner) => map.cells_in_annulus(cell, inner, warhead.size.outer),
                None => map.cells_in_circle(cell, warhead.size.outer),
            };
            for c in cells {
                map.add_smudge(smudge, c);
                if warhead.destroy_resources {
                    map.destroy_resource(c);
                }
            }
        } else {
            map.add_smudge(smudge, cell);
        }
    }
    if warhead.destroy_resources {
        map.destroy_resource(cell);
    }

    let attacker = args.firer;
    match warhead.damage_model {
        DamageModel::Normal => {
            let reach = damage::max_spread(warhead);
            for (victim, distance) in splash_victims(world, args, reach) {
                if !weapon_valid_for_actor(&args.weapon, world, victim) {
                    continue;
                }
                let armor = armor_of(world, victim);
                let amount = damage::damage_to_inflict(warhead, distance, armor, args.firepower);
                inflict(world, victim, attacker, amount, args, index, events);
            }
        }
        DamageModel::PerCell => {
            let footprint = map.cells_in_circle(cell, warhead.size.outer);
            for victim in victims_in_cells(world, &footprint) {
                let amount = damage::per_cell_damage(warhead, armor_of(world, victim));
                inflict(world, victim, attacker, amount, args, index, events);
            }
        }
    }
}

/// Living actors whose hit circle reaches within `reach` of the impact, with
/// their edge distance, sorted by id.
fn splash_victims(world: &World, args: &ProjectileArgs, reach: i32) -> Vec<(Entity, i32)> {
    let mut victims: Vec<(Entity, i32)> = world
        .query::<(&WPos, &Health)>()
        .iter()
        .filter(|(_, (_, health))| health.hp > 0)
        .filter_map(|(entity, (pos, health))| {
            let edge = (args.destination.distance_to(*pos).0 - health.radius.0).max(0);
            (edge <= reach).then_some((entity, edge))
        })
        .collect();
    victims.sort_by_key(|(entity, _)| entity.to_bits());
    victims
}

/// Living actors standing in any of `cells`, sorted by id.
fn victims_in_cells(world: &World, cells: &[CPos]) -> Vec<Entity> {
    let mut victims: Vec<Entity> = world
        .query::<(&WPos, &Health)>()
        .iter()
        .filter(|(_, (pos, health))| health.hp > 0 && cells.contains(&pos.cell()))
        .map(|(entity, _)| entity)
        .collect();
    victims.sort_by_key(|entity| entity.to_bits());
    victims
}

fn armor_of(world: &World, entity: Entity) -> ArmorClass {
    world
        .get::<&Armor>(entity)
        .map(|a| a.class)
        .unwrap_or_default()
}

/// Apply damage through the victim's damage modifiers and report the result.
///
/// Dead victims and zero damage are ignored. Negative damage heals up to
/// `max_hp`.
pub fn inflict(
    world: &mut World,
    victim: Entity,
    attacker: Entity,
    amount: i32,
    args: &ProjectileArgs,
    warhead: usize,
    events: &mut Vec<CombatEvent>,
) {
    let multiplier = {
        let mods = world.get::<&Modifiers>(victim).ok();
        modifiers::damage_taken(mods.as_deref())
    };
    let amount = multiplier.apply_i32(amount);
    if amount == 0 {
        return;
    }
    let Ok(health) = world.query_one_mut::<&mut Health>(victim) else {
        return;
    };
    if health.hp <= 0 {
        return;
    }
    health.hp = health.hp.saturating_sub(amount).clamp(0, health.max_hp);
    let killed = health.hp == 0;

    events.push(CombatEvent::Damaged {
        victim: actor_id(victim),
        attacker: actor_id(attacker),
        amount,
        weapon: args.weapon.name.clone(),
        warhead,
    });
    if killed {
        debug!(victim = ?victim, attacker = ?attacker, "killed");
        events.push(CombatEvent::Killed {
            victim: actor_id(victim),
            attacker: actor_id(attacker),
        });
    }
}
