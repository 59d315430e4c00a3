//! Firing-mode variants for salvo.
//!
//! Decides, per actor and per tick, whether the actor may fire and which
//! movement or attack activity it wants from the activity collaborator.
//! Also hosts the turret and charge per-tick state machines.

pub mod area;
pub mod charge;
pub mod modes;
pub mod turret;

pub use salvo_core as core;

pub use modes::{
    evaluate, ArmamentView, AttackContext, AttackDecision, AttackRefusal, AttackState, FireAim,
    FireOrder, FiringMode, FiringModeSpec, RangeTransition, TargetView,
};
