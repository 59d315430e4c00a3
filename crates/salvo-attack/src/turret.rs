//! Turret rotation.
//!
//! A turret turns toward its desired facing by at most `turn_rate` steps per
//! tick. Once nobody has asked it to aim for `realign_delay` ticks it swings
//! back to the body facing.

use salvo_core::components::Turret;
use salvo_core::constants::DEFAULT_TURRET_REALIGN_DELAY;
use salvo_core::definitions::TurretSpec;
use salvo_core::{Facing, WPos};

/// Build the runtime turret from its configuration.
pub fn turret_from_spec(spec: &TurretSpec) -> Turret {
    Turret {
        facing: spec.initial_facing,
        desired_facing: None,
        turn_rate: spec.turn_rate,
        offset: spec.offset,
        realign_delay: spec.realign_delay.unwrap_or(DEFAULT_TURRET_REALIGN_DELAY),
        idle_ticks: 0,
    }
}

/// Point the turret at `target`. Returns true once it is already facing it.
pub fn face_target(turret: &mut Turret, origin: WPos, target: WPos) -> bool {
    let desired = Facing::towards(target - origin, turret.facing);
    turret.desired_facing = Some(desired);
    turret.idle_ticks = 0;
    turret.facing == desired
}

/// Advance one tick of rotation.
pub fn tick_turret(turret: &mut Turret, body_facing: Facing) {
    if turret.desired_facing.is_some() {
        if turret.idle_ticks >= turret.realign_delay {
            turret.desired_facing = None;
        } else {
            turret.idle_ticks += 1;
        }
    }
    let desired = turret.desired_facing.unwrap_or(body_facing);
    turret.facing = turret.facing.tick_towards(desired, turret.turn_rate);
}

/// Whether the turret has reached the facing it was asked for.
pub fn is_aligned(turret: &Turret) -> bool {
    turret.desired_facing.is_none_or(|d| d == turret.facing)
}
