//! Armament: the per-mount firing state machine.
//!
//! Owns the reload countdown, the burst counter, recoil and the queue of
//! deferred launches. Firing is attempted with [`Armament::check_fire`] and
//! declined silently whenever a precondition does not hold.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use salvo_core::components::{BodyFacing, Turret};
use salvo_core::definitions::{ArmamentSpec, BarrelSpec, WeaponDefinition};
use salvo_core::{WDist, WPos};

use crate::geometry;
use crate::modifiers::Multiplier;
use crate::projectile::ProjectileArgs;
use crate::target::Target;

/// A shot waiting for its fire delay, or ready to leave the barrel.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct DeferredAction {
    pub ticks_remaining: u32,
    pub args: ProjectileArgs,
    /// Report sound picked when the shot was triggered.
    pub report: Option<String>,
}

/// The firer as seen by its armaments this tick.
#[derive(Debug, Clone, Copy)]
pub struct Shooter<'a> {
    pub entity: Entity,
    pub position: WPos,
    pub body: BodyFacing,
    pub turrets: &'a [Turret],
    pub firepower: Multiplier,
    pub reload: Multiplier,
    pub has_ammo: bool,
}

/// A target resolved for this tick.
#[derive(Debug, Clone)]
pub struct AimPoint {
    pub target: Target,
    pub center: WPos,
    /// The weapon may engage this target.
    pub valid: bool,
}

/// One weapon mount on an actor.
#[derive(Debug, Clone)]
pub struct Armament {
    pub name: String,
    pub weapon: Arc<WeaponDefinition>,
    pub turret: Option<usize>,
    pub barrels: Vec<BarrelSpec>,
    /// Ticks between trigger and launch.
    pub launch_delay: u32,
    pub recoil_kick: WDist,
    pub recoil_recovery: WDist,

    /// Ticks until the next shot may be fired.
    pub fire_delay: u32,
    /// Shots remaining in the current burst.
    pub burst: u32,
    pub recoil: WDist,
    /// Triggered shots in scheduling order.
    pub deferred: Vec<DeferredAction>,
    /// Shots whose launch delay has elapsed, drained by the simulation.
    ready: Vec<DeferredAction>,
}

impl Armament {
    pub fn new(spec: &ArmamentSpec, weapon: Arc<WeaponDefinition>, default_recovery: WDist) -> Self {
        let barrels = if spec.barrels.is_empty() {
            vec![BarrelSpec::default()]
        } else {
            spec.barrels.clone()
        };
        let burst = weapon.burst.max(1);
        Self {
            name: spec.name.clone(),
            weapon,
            turret: spec.turret,
            barrels,
            launch_delay: spec.fire_delay,
            recoil_kick: WDist(spec.recoil.0.max(0)),
            recoil_recovery: spec.recoil_recovery.unwrap_or(default_recovery),
            fire_delay: 0,
            burst,
            recoil: WDist::ZERO,
            deferred: Vec::new(),
            ready: Vec::new(),
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.fire_delay > 0
    }

    /// Whether `distance` lies within `[min_range, range]`.
    pub fn in_range(&self, distance: WDist) -> bool {
        distance >= self.weapon.min_range && distance <= self.weapon.range
    }

    /// Advance countdowns by one tick.
    pub fn tick(&mut self) {
        self.fire_delay = self.fire_delay.saturating_sub(1);
        self.recoil = WDist((self.recoil.0 - self.recoil_recovery.0).max(0));

        for action in &mut self.deferred {
            action.ticks_remaining = action.ticks_remaining.saturating_sub(1);
        }
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|a| a.ticks_remaining == 0);
        self.deferred = waiting;
        self.ready.extend(due);
    }

    /// Hold fire for at least `ticks`.
    pub fn hold_fire(&mut self, ticks: u32) {
        self.fire_delay = self.fire_delay.max(ticks);
    }

    /// Try to fire at `aim`. Returns the barrel used, or `None` if the
    /// attempt was declined.
    pub fn check_fire(
        &mut self,
        shooter: &Shooter,
        aim: &AimPoint,
        rng: &mut ChaCha8Rng,
    ) -> Option<usize> {
        if self.fire_delay > 0 || !shooter.has_ammo || !aim.valid {
            return None;
        }
        if !self.in_range(shooter.position.distance_to(aim.center)) {
            return None;
        }

        let barrel_index = self.burst as usize % self.barrels.len();
        let barrel = self.barrels[barrel_index];
        let turret = self.turret.and_then(|i| shooter.turrets.get(i));

        let source = shooter.position
            + geometry::muzzle_offset(shooter.body, turret, &barrel, self.recoil);
        let args = ProjectileArgs {
            weapon: Arc::clone(&self.weapon),
            firer: shooter.entity,
            target: aim.target.clone(),
            source,
            facing: geometry::muzzle_facing(shooter.body, turret, &barrel),
            barrel: barrel_index,
            destination: aim.center,
            firepower: shooter.firepower,
        };
        let report = if self.weapon.report.is_empty() {
            None
        } else {
            let pick = rng.gen_range(0..self.weapon.report.len());
            Some(self.weapon.report[pick].clone())
        };

        let action = DeferredAction {
            ticks_remaining: self.launch_delay,
            args,
            report,
        };
        if self.launch_delay == 0 {
            self.ready.push(action);
        } else {
            self.deferred.push(action);
        }

        self.recoil = self.recoil_kick;
        self.burst = self.burst.saturating_sub(1);
        if self.burst > 0 {
            self.fire_delay = self.weapon.burst_delay;
        } else {
            let rof = shooter.reload.apply(self.weapon.rof as i64);
            self.fire_delay = rof.clamp(0, u32::MAX as i64) as u32;
            self.burst = self.weapon.burst.max(1);
        }

        Some(barrel_index)
    }

    /// Shots whose launch delay has elapsed, in scheduling order.
    pub fn take_ready(&mut self) -> Vec<DeferredAction> {
        std::mem::take(&mut self.ready)
    }

    /// Feed every field of the firing state into a consistency hash.
    pub fn hash_state<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.weapon.name.hash(state);
        self.fire_delay.hash(state);
        self.burst.hash(state);
        self.recoil.hash(state);
        self.deferred.hash(state);
        self.ready.hash(state);
    }
}

/// All armaments of an actor, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct Armaments(pub Vec<Armament>);
