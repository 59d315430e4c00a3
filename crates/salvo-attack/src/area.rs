//! Area attacks (bombing runs).
//!
//! The target is a fixed ground point. Bomb slots release straight down
//! whenever the target is within their range; gun slots strafe a point half
//! their range ahead, but only while the nose points at the target.

use salvo_core::constants::TRIG_SCALE;
use salvo_core::enums::RequestedActivity;
use salvo_core::{Facing, WPos, WVec};

use crate::modes::{
    AttackContext, AttackDecision, AttackRefusal, FireAim, FireOrder, RangeTransition, TargetView,
};

/// Runtime state of an area attacker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AreaState {
    /// Armament name of the drop slots.
    pub bombs: String,
    /// Armament name of the strafing slots.
    pub guns: String,
    pub facing_tolerance: u8,
    pub in_attack_range: bool,
    pub facing_target: bool,
}

impl AreaState {
    pub fn new(bombs: &str, guns: &str, facing_tolerance: u8) -> Self {
        Self {
            bombs: bombs.to_string(),
            guns: guns.to_string(),
            facing_tolerance,
            in_attack_range: false,
            facing_target: false,
        }
    }
}

/// Evaluate one tick of an attack run against `target`.
pub fn evaluate(state: &mut AreaState, ctx: &AttackContext, target: TargetView) -> AttackDecision {
    let was_in_range = state.in_attack_range;
    let facing_to_target = Facing::towards(target.position - ctx.position, ctx.body_facing);
    state.facing_target = ctx
        .body_facing
        .within_tolerance(facing_to_target, state.facing_tolerance);

    let ground = WPos::new(ctx.position.x(), ctx.position.y(), 0);
    let mut fire = Vec::new();
    let mut in_range = false;
    let mut guns_waiting = false;

    for (armament, view) in ctx.armaments.iter().enumerate() {
        if !view.target_in_range {
            continue;
        }
        if view.name == state.bombs {
            in_range = true;
            fire.push(FireOrder {
                armament,
                aim: FireAim::Ground(ground),
            });
        } else if view.name == state.guns {
            if !state.facing_target {
                guns_waiting = true;
                continue;
            }
            in_range = true;
            let ahead = ahead_of(ctx.body_facing, view.max_range.0 / 2);
            fire.push(FireOrder {
                armament,
                aim: FireAim::Ground(ground + ahead),
            });
        }
    }

    state.in_attack_range = in_range;
    let transition = match (was_in_range, in_range) {
        (false, true) => Some(RangeTransition::Entered),
        (true, false) => Some(RangeTransition::Exited),
        _ => None,
    };

    let refusal = if ctx.disabled {
        Some(AttackRefusal::Disabled)
    } else if !fire.is_empty() {
        None
    } else if guns_waiting {
        Some(AttackRefusal::NotFacing)
    } else {
        Some(AttackRefusal::OutOfRange)
    };
    if refusal.is_some() {
        fire.clear();
    }

    AttackDecision {
        refusal,
        fire,
        activity: Some(RequestedActivity::AttackRun {
            target: target.position,
        }),
        drop_target: false,
        transition,
        charge_up: false,
    }
}

/// Horizontal offset of `distance` along `facing`.
fn ahead_of(facing: Facing, distance: i32) -> WVec {
    WVec::new(
        facing.sin() * distance / TRIG_SCALE,
        facing.cos() * distance / TRIG_SCALE,
        0,
    )
}
