//! Core types and definitions for the salvo combat core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! world coordinates, facings, weapon and warhead definitions, components,
//! commands, events, configuration errors and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod definitions;
pub mod enums;
pub mod error;
pub mod events;
pub mod facing;
pub mod types;

pub use error::{ConfigError, Result};
pub use facing::Facing;
pub use types::{ActorId, CPos, SimTime, WDist, WPos, WVec};

#[cfg(test)]
mod tests;
