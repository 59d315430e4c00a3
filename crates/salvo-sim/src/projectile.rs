//! Resolved shot descriptor handed to the projectile and effect collaborators.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use hecs::Entity;

use salvo_core::definitions::WeaponDefinition;
use salvo_core::{Facing, WPos};

use crate::modifiers::Multiplier;
use crate::target::Target;

/// Everything about a shot that leaves a barrel.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileArgs {
    pub weapon: Arc<WeaponDefinition>,
    pub firer: Entity,
    pub target: Target,
    /// Muzzle position.
    pub source: WPos,
    pub facing: Facing,
    pub barrel: usize,
    /// Target position resolved when the shot was fired. Projectile
    /// collaborators overwrite it with the actual detonation point.
    pub destination: WPos,
    /// Product of the firer's firepower modifiers at fire time.
    pub firepower: Multiplier,
}

impl Hash for ProjectileArgs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.weapon.name.hash(state);
        self.firer.to_bits().hash(state);
        self.target.hash(state);
        self.source.hash(state);
        self.facing.hash(state);
        (self.barrel as u64).hash(state);
        self.destination.hash(state);
        self.firepower.hash(state);
    }
}
