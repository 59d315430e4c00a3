//! Configuration errors.
//!
//! Only broken data escapes as an error. Soft conditions such as a weapon
//! reloading or a target out of range are never errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    #[error("Weapon `{weapon}` references unknown smudge type `{smudge}`")]
    UnknownSmudgeType { weapon: String, smudge: String },

    #[error("Weapon `{0}` destroys resources but the map has no resource layer")]
    MissingResourceLayer(String),

    #[error("Invalid weapon `{weapon}`: {reason}")]
    InvalidWeapon { weapon: String, reason: String },

    #[error("Firing mode references unknown armament `{0}`")]
    UnknownArmament(String),

    #[error("Armament `{armament}` references turret {turret} but the actor has {count}")]
    UnknownTurret {
        armament: String,
        turret: usize,
        count: usize,
    },

    #[error("Serialization error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
