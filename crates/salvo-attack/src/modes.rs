//! Firing-mode finite state machine.
//!
//! Pure functions that decide whether an actor may fire at its current
//! target and which activity it should request. No ECS dependency: the
//! simulation gathers an [`AttackContext`] and applies the returned
//! [`AttackDecision`].

use serde::{Deserialize, Serialize};

use salvo_core::components::Turret;
use salvo_core::enums::RequestedActivity;
use salvo_core::{Facing, WDist, WPos};

use crate::area::{self, AreaState};
use crate::charge::ChargeState;
use crate::turret::face_target;

/// Firing-mode configuration as loaded from data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FiringModeSpec {
    /// Fixed forward weapons: the body must face the target.
    Frontal {
        #[serde(default)]
        facing_tolerance: u8,
    },
    /// Weapons on rotating turrets.
    Turreted,
    /// Fires in any direction.
    Omni,
    /// Fires while charges remain; charges refill together after a cooldown.
    Charge {
        max_charges: u32,
        reload_time: u32,
        #[serde(default)]
        initial_charge_delay: u32,
        #[serde(default)]
        charge_delay: u32,
        #[serde(default)]
        charge_sound: Option<String>,
    },
    /// Attack runs over a fixed ground target.
    Area {
        #[serde(default = "default_bombs")]
        bombs: String,
        #[serde(default = "default_guns")]
        guns: String,
        #[serde(default)]
        facing_tolerance: u8,
    },
}

fn default_bombs() -> String {
    "bombs".to_string()
}

fn default_guns() -> String {
    "guns".to_string()
}

/// Runtime firing mode of one actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FiringMode {
    Frontal { facing_tolerance: u8 },
    Turreted,
    Omni,
    Charge(ChargeState),
    Area(AreaState),
}

impl FiringMode {
    pub fn from_spec(spec: &FiringModeSpec) -> Self {
        match spec {
            FiringModeSpec::Frontal { facing_tolerance } => FiringMode::Frontal {
                facing_tolerance: *facing_tolerance,
            },
            FiringModeSpec::Turreted => FiringMode::Turreted,
            FiringModeSpec::Omni => FiringMode::Omni,
            FiringModeSpec::Charge {
                max_charges,
                reload_time,
                initial_charge_delay,
                charge_delay,
                charge_sound,
            } => {
                let mut state = ChargeState::new(*max_charges, *reload_time);
                state.initial_charge_delay = *initial_charge_delay;
                state.charge_delay = *charge_delay;
                state.charge_sound = charge_sound.clone();
                FiringMode::Charge(state)
            }
            FiringModeSpec::Area {
                bombs,
                guns,
                facing_tolerance,
            } => FiringMode::Area(AreaState::new(bombs, guns, *facing_tolerance)),
        }
    }

    /// Armament names the mode refers to explicitly.
    pub fn armament_slots(&self) -> Vec<&str> {
        match self {
            FiringMode::Area(area) => vec![area.bombs.as_str(), area.guns.as_str()],
            _ => Vec::new(),
        }
    }

    /// Whether the actor fights from where it stands.
    pub fn holds_position(&self, is_building: bool) -> bool {
        match self {
            FiringMode::Omni | FiringMode::Charge(_) => true,
            FiringMode::Turreted => is_building,
            FiringMode::Frontal { .. } | FiringMode::Area(_) => false,
        }
    }

    /// Per-tick bookkeeping. Returns a minimum fire delay to impose on all
    /// armaments of the actor, if any.
    pub fn tick(&mut self) -> Option<u32> {
        match self {
            FiringMode::Charge(charge) => charge.tick(),
            _ => None,
        }
    }

    /// Called after any armament of the actor fired.
    pub fn on_attack(&mut self) {
        if let FiringMode::Charge(charge) = self {
            charge.on_attack();
        }
    }

    /// Whether another armament may still fire this tick. A charge mode
    /// spends one charge per shot, so it stops once the charges run out.
    pub fn can_fire_again(&self) -> bool {
        match self {
            FiringMode::Charge(charge) => charge.has_charge(),
            _ => true,
        }
    }
}

/// Why an actor may not fire right now. Never an error: callers retry next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackRefusal {
    NoTarget,
    InvalidTarget,
    Disabled,
    Reloading,
    OutOfRange,
    NotFacing,
    TurretRotating,
    UnderConstruction,
    NoCharge,
}

/// Armament facts the firing mode needs.
#[derive(Debug, Clone, Copy)]
pub struct ArmamentView<'a> {
    pub name: &'a str,
    pub min_range: WDist,
    pub max_range: WDist,
    pub reloading: bool,
    /// The weapon can engage the current target at all.
    pub valid_against_target: bool,
    /// The current target lies within `[min_range, max_range]`.
    pub target_in_range: bool,
}

/// Resolved current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetView {
    pub position: WPos,
    /// False once the target actor is gone.
    pub alive: bool,
}

/// Everything the firing mode looks at for one actor.
#[derive(Debug, Clone)]
pub struct AttackContext<'a> {
    pub position: WPos,
    pub body_facing: Facing,
    pub target: Option<TargetView>,
    pub disabled: bool,
    /// `Some(build_complete)` for buildings.
    pub building: Option<bool>,
    pub armaments: &'a [ArmamentView<'a>],
}

/// Where an armament should aim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireAim {
    /// The actor's current target.
    Target,
    /// A fixed ground point.
    Ground(WPos),
}

/// Permission for one armament to attempt a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireOrder {
    /// Index into `AttackContext::armaments`.
    pub armament: usize,
    pub aim: FireAim,
}

/// Attack range transition of an area attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeTransition {
    Entered,
    Exited,
}

/// Output from the firing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackDecision {
    pub refusal: Option<AttackRefusal>,
    pub fire: Vec<FireOrder>,
    pub activity: Option<RequestedActivity>,
    /// The target should be forgotten.
    pub drop_target: bool,
    pub transition: Option<RangeTransition>,
    /// A charge-up sequence starts this tick.
    pub charge_up: bool,
}

impl AttackDecision {
    fn refused(refusal: AttackRefusal) -> Self {
        Self {
            refusal: Some(refusal),
            ..Default::default()
        }
    }

    /// Give up on the target and go back to idle.
    fn abandon(refusal: AttackRefusal) -> Self {
        Self {
            refusal: Some(refusal),
            activity: Some(RequestedActivity::Idle),
            drop_target: true,
            ..Default::default()
        }
    }

    pub fn can_attack(&self) -> bool {
        self.refusal.is_none()
    }
}

/// Firing mode plus the last activity it asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttackState {
    pub mode: FiringMode,
    pub last_request: Option<RequestedActivity>,
}

impl AttackState {
    pub fn new(mode: FiringMode) -> Self {
        Self {
            mode,
            last_request: None,
        }
    }

    /// Record a requested activity. Returns true if it differs from the last one.
    pub fn request(&mut self, activity: RequestedActivity) -> bool {
        if self.last_request == Some(activity) {
            return false;
        }
        self.last_request = Some(activity);
        true
    }

    /// Forget the last request, e.g. after a new order.
    pub fn reset_request(&mut self) {
        self.last_request = None;
    }
}

/// Evaluate the firing mode for one actor.
///
/// Turrets are aimed as a side effect so that they keep tracking the target
/// even while the attack is refused.
pub fn evaluate(
    mode: &mut FiringMode,
    ctx: &AttackContext,
    turrets: &mut [Turret],
) -> AttackDecision {
    let Some(target) = ctx.target else {
        return AttackDecision::refused(AttackRefusal::NoTarget);
    };

    if let FiringMode::Area(state) = mode {
        return area::evaluate(state, ctx, target);
    }
    evaluate_direct(mode, ctx, target, turrets)
}

fn evaluate_direct(
    mode: &mut FiringMode,
    ctx: &AttackContext,
    target: TargetView,
    turrets: &mut [Turret],
) -> AttackDecision {
    if !target.alive || !ctx.armaments.iter().any(|a| a.valid_against_target) {
        return AttackDecision::abandon(AttackRefusal::InvalidTarget);
    }

    let in_range = ctx
        .armaments
        .iter()
        .any(|a| a.valid_against_target && a.target_in_range);
    if mode.holds_position(ctx.building.is_some()) && !in_range {
        // Static attackers cannot close the distance.
        return AttackDecision::abandon(AttackRefusal::OutOfRange);
    }

    let (min_range, max_range) = engagement_range(ctx.armaments);
    let move_into_range = RequestedActivity::MoveIntoRange {
        target: target.position,
        min_range,
        max_range,
    };

    let mut charge_up = false;
    let (activity, refusal) = match mode {
        FiringMode::Frontal { facing_tolerance } => {
            let facing = Facing::towards(target.position - ctx.position, ctx.body_facing);
            let facing_ok = ctx.body_facing.within_tolerance(facing, *facing_tolerance);
            let activity = if in_range && !facing_ok {
                RequestedActivity::TurnToFacing { facing }
            } else {
                move_into_range
            };
            let refusal = base_refusal(ctx).or((!facing_ok).then_some(AttackRefusal::NotFacing));
            (activity, refusal)
        }
        FiringMode::Turreted => {
            let aligned = aim_turrets(turrets, ctx.position, target.position);
            let activity = if ctx.building.is_some() {
                RequestedActivity::HoldPosition
            } else {
                move_into_range
            };
            let refusal = construction_refusal(ctx)
                .or((!aligned).then_some(AttackRefusal::TurretRotating))
                .or_else(|| base_refusal(ctx));
            (activity, refusal)
        }
        FiringMode::Omni => {
            let refusal = construction_refusal(ctx).or_else(|| base_refusal(ctx));
            (RequestedActivity::HoldPosition, refusal)
        }
        FiringMode::Charge(charge) => {
            let refusal = construction_refusal(ctx)
                .or_else(|| base_refusal(ctx))
                .or((!charge.has_charge()).then_some(AttackRefusal::NoCharge));
            if refusal.is_none() && !charge.charging {
                charge.charging = true;
                charge_up = true;
            }
            let activity = RequestedActivity::ChargeAttack {
                initial_delay: charge.initial_charge_delay,
                charge_delay: charge.charge_delay,
            };
            (activity, refusal)
        }
        FiringMode::Area(_) => return AttackDecision::refused(AttackRefusal::InvalidTarget),
    };

    let refusal = refusal.or((!in_range).then_some(AttackRefusal::OutOfRange));
    let fire = if refusal.is_none() {
        ctx.armaments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.valid_against_target)
            .map(|(armament, _)| FireOrder {
                armament,
                aim: FireAim::Target,
            })
            .collect()
    } else {
        Vec::new()
    };

    AttackDecision {
        refusal,
        fire,
        activity: Some(activity),
        drop_target: false,
        transition: None,
        charge_up,
    }
}

/// Disabled and reload gates shared by every mode.
fn base_refusal(ctx: &AttackContext) -> Option<AttackRefusal> {
    if ctx.disabled {
        Some(AttackRefusal::Disabled)
    } else if ctx.armaments.iter().all(|a| a.reloading) {
        Some(AttackRefusal::Reloading)
    } else {
        None
    }
}

fn construction_refusal(ctx: &AttackContext) -> Option<AttackRefusal> {
    match ctx.building {
        Some(false) => Some(AttackRefusal::UnderConstruction),
        _ => None,
    }
}

/// Aim every turret. True once all of them face the target.
fn aim_turrets(turrets: &mut [Turret], origin: WPos, target: WPos) -> bool {
    turrets
        .iter_mut()
        .fold(true, |aligned, t| face_target(t, origin, target) && aligned)
}

/// Distance band the movement collaborator should close to: the largest
/// minimum range and the longest reach over the weapons that can engage.
fn engagement_range(armaments: &[ArmamentView]) -> (WDist, WDist) {
    armaments
        .iter()
        .filter(|a| a.valid_against_target)
        .fold((WDist::ZERO, WDist::ZERO), |(min, max), a| {
            (min.max(a.min_range), max.max(a.max_range))
        })
}
