//! Attack system: evaluate each attacker's firing mode and pull triggers.
//!
//! Two passes per attacker. The first gathers a read-only snapshot of the
//! actor and its target; the second evaluates the firing mode against it and
//! mutates the actor's own components.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use salvo_attack::{
    evaluate, ArmamentView, AttackContext, AttackDecision, FireAim, FiringMode, RangeTransition,
    TargetView,
};
use salvo_core::components::{
    BodyFacing, Building, Disabled, LimitedAmmo, Modifiers, Turret, Turrets,
};
use salvo_core::events::CombatEvent;
use salvo_core::{WDist, WPos};
use salvo_terrain::MapGrid;

use crate::armament::{AimPoint, Armaments, Shooter};
use crate::components::Attacker;
use crate::modifiers::{self, Multiplier};
use crate::systems::armament::Launch;
use crate::systems::sorted;
use crate::target::{actor_id, Target};
use crate::validity::{is_valid_against, weapon_valid_for_terrain};

/// Per-armament facts gathered before evaluation.
#[derive(Debug, Clone)]
struct ArmamentFacts {
    name: String,
    min_range: WDist,
    max_range: WDist,
    reloading: bool,
    valid: bool,
    in_range: bool,
}

/// Read-only view of one attacker for this tick.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    position: WPos,
    body: BodyFacing,
    target: Target,
    target_view: Option<TargetView>,
    disabled: bool,
    building: Option<bool>,
    firepower: Multiplier,
    reload: Multiplier,
    armaments: Vec<ArmamentFacts>,
    pub(crate) mode: FiringMode,
    pub(crate) turrets: Vec<Turret>,
}

impl Snapshot {
    /// Gather everything the firing mode needs about `entity`.
    pub(crate) fn gather(world: &World, map: &MapGrid, entity: Entity) -> Option<Self> {
        let attacker = world.get::<&Attacker>(entity).ok()?;
        let position = *world.get::<&WPos>(entity).ok()?;
        let body = world
            .get::<&BodyFacing>(entity)
            .map(|b| *b)
            .unwrap_or_default();

        let target = attacker.target.clone();
        let center = target.center(world);
        let alive = target.is_valid(world);
        let target_view = match (&target, center) {
            (Target::Invalid, _) => None,
            (_, Some(position)) => Some(TargetView { position, alive }),
            // The actor is gone entirely.
            (_, None) => Some(TargetView {
                position,
                alive: false,
            }),
        };

        let armaments = world
            .get::<&Armaments>(entity)
            .map(|armaments| {
                armaments
                    .0
                    .iter()
                    .map(|a| {
                        let valid = is_valid_against(&a.weapon, &target, world, map);
                        let in_range = center.is_some_and(|c| a.in_range(position.distance_to(c)));
                        ArmamentFacts {
                            name: a.name.clone(),
                            min_range: a.weapon.min_range,
                            max_range: a.weapon.range,
                            reloading: a.is_reloading(),
                            valid,
                            in_range,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mods = world.get::<&Modifiers>(entity).ok();
        let firepower = modifiers::firepower(mods.as_deref());
        let reload = modifiers::reload(mods.as_deref());
        drop(mods);

        let turrets = world
            .get::<&Turrets>(entity)
            .map(|t| t.turrets.clone())
            .unwrap_or_default();

        Some(Self {
            position,
            body,
            target,
            target_view,
            disabled: world.get::<&Disabled>(entity).is_ok(),
            building: world.get::<&Building>(entity).ok().map(|b| b.build_complete),
            firepower,
            reload,
            armaments,
            mode: attacker.state.mode.clone(),
            turrets,
        })
    }

    fn views(&self) -> Vec<ArmamentView<'_>> {
        self.armaments
            .iter()
            .map(|a| ArmamentView {
                name: &a.name,
                min_range: a.min_range,
                max_range: a.max_range,
                reloading: a.reloading,
                valid_against_target: a.valid,
                target_in_range: a.in_range,
            })
            .collect()
    }

    fn context<'a>(&self, views: &'a [ArmamentView<'a>]) -> AttackContext<'a> {
        AttackContext {
            position: self.position,
            body_facing: self.body.facing,
            target: self.target_view,
            disabled: self.disabled,
            building: self.building,
            armaments: views,
        }
    }

    /// Evaluate the firing mode without touching the world.
    pub(crate) fn decide(&self) -> AttackDecision {
        let mut mode = self.mode.clone();
        let mut turrets = self.turrets.clone();
        let views = self.views();
        evaluate(&mut mode, &self.context(&views), &mut turrets)
    }
}

/// Run the attack pass for every attacker, in id order.
pub fn run(
    world: &mut World,
    map: &MapGrid,
    rng: &mut ChaCha8Rng,
    launches: &mut Vec<Launch>,
    events: &mut Vec<CombatEvent>,
) {
    let attackers = sorted(
        world
            .query::<&Attacker>()
            .iter()
            .map(|(entity, _)| entity)
            .collect(),
    );

    for entity in attackers {
        let Some(snapshot) = Snapshot::gather(world, map, entity) else {
            continue;
        };
        attack(world, map, rng, entity, &snapshot, launches, events);
    }
}

#[allow(clippy::too_many_arguments)]
fn attack(
    world: &mut World,
    map: &MapGrid,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    snapshot: &Snapshot,
    launches: &mut Vec<Launch>,
    events: &mut Vec<CombatEvent>,
) {
    let Ok((attacker, armaments, turrets, ammo)) = world.query_one_mut::<(
        &mut Attacker,
        Option<&mut Armaments>,
        Option<&mut Turrets>,
        Option<&mut LimitedAmmo>,
    )>(entity) else {
        return;
    };

    let mut no_turrets = Vec::new();
    let turrets = turrets.map_or(&mut no_turrets, |t| &mut t.turrets);
    let views = snapshot.views();
    let decision = evaluate(
        &mut attacker.state.mode,
        &snapshot.context(&views),
        turrets.as_mut_slice(),
    );

    let id = actor_id(entity);
    if let Some(activity) = decision.activity {
        if attacker.state.request(activity) {
            events.push(CombatEvent::ActivityRequested {
                actor: id,
                activity,
            });
        }
    }
    match decision.transition {
        Some(RangeTransition::Entered) => {
            events.push(CombatEvent::EnteredAttackRange { actor: id });
        }
        Some(RangeTransition::Exited) => {
            events.push(CombatEvent::ExitedAttackRange { actor: id });
        }
        None => {}
    }
    if decision.charge_up {
        let sound = match &attacker.state.mode {
            FiringMode::Charge(charge) => charge.charge_sound.clone(),
            _ => None,
        };
        events.push(CombatEvent::ChargeUp { actor: id, sound });
    }
    if decision.drop_target {
        attacker.target = Target::Invalid;
    }
    if let Some(refusal) = decision.refusal {
        trace!(actor = ?entity, ?refusal, "attack declined");
        return;
    }

    let Some(armaments) = armaments else {
        return;
    };
    let mut ammo = ammo;
    let target_center = snapshot.target_view.map(|t| t.position);

    for order in &decision.fire {
        if !attacker.state.mode.can_fire_again() {
            break;
        }
        let Some(armament) = armaments.0.get_mut(order.armament) else {
            continue;
        };
        let aim = match order.aim {
            FireAim::Target => match target_center {
                Some(center) => AimPoint {
                    target: snapshot.target.clone(),
                    center,
                    valid: snapshot
                        .armaments
                        .get(order.armament)
                        .is_some_and(|a| a.valid),
                },
                None => continue,
            },
            FireAim::Ground(point) => AimPoint {
                target: Target::Position(point),
                center: point,
                valid: weapon_valid_for_terrain(&armament.weapon, map, point.cell()),
            },
        };
        let shooter = Shooter {
            entity,
            position: snapshot.position,
            body: snapshot.body,
            turrets: turrets.as_slice(),
            firepower: snapshot.firepower,
            reload: snapshot.reload,
            has_ammo: ammo.as_ref().map_or(true, |a| a.ammo > 0),
        };

        let Some(barrel) = armament.check_fire(&shooter, &aim, rng) else {
            continue;
        };
        debug!(
            firer = ?entity,
            weapon = %armament.weapon.name,
            barrel,
            "armament fired"
        );
        if let Some(ammo) = ammo.as_deref_mut() {
            ammo.ammo = ammo.ammo.saturating_sub(1);
        }
        attacker.state.mode.on_attack();
    }

    for armament in &mut armaments.0 {
        launches.extend(armament.take_ready().into_iter().map(|a| (entity, a)));
    }
}
