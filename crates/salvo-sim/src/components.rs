//! Simulation-side components that hold ECS handles or shared definitions.
//!
//! Plain data components live in `salvo_core::components`.

use salvo_attack::AttackState;

use crate::target::Target;

/// Firing mode plus the actor's current target.
#[derive(Debug, Clone)]
pub struct Attacker {
    pub state: AttackState,
    pub target: Target,
}

impl Attacker {
    pub fn new(state: AttackState) -> Self {
        Self {
            state,
            target: Target::Invalid,
        }
    }
}
