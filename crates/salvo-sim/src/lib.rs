//! Combat simulation engine for salvo.
//!
//! Owns the hecs ECS world and runs the combat systems in a fixed order.
//! Completely headless and deterministic: the same seed and the same orders
//! produce the same state hash on every peer.

pub mod armament;
pub mod catalog;
pub mod components;
pub mod damage;
pub mod engine;
pub mod geometry;
pub mod impact;
pub mod modifiers;
pub mod projectile;
pub mod systems;
pub mod target;
pub mod validity;
pub mod world_setup;

pub use salvo_core as core;

pub use armament::{Armament, Armaments};
pub use catalog::WeaponCatalog;
pub use engine::{CombatEngine, SimConfig};
pub use modifiers::Multiplier;
pub use projectile::ProjectileArgs;
pub use target::Target;
pub use world_setup::{CombatantSpec, HealthSpec};
