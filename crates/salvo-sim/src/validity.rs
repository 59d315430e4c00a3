//! Weapon-versus-target validity.
//!
//! Soft checks only: an invalid pairing means "do not fire" or "deal no
//! damage", never an error.

use std::collections::BTreeSet;

use hecs::{Entity, World};

use salvo_core::components::{Armor, Owner, Targetable, WaterBound};
use salvo_core::definitions::WeaponDefinition;
use salvo_core::enums::ArmorClass;
use salvo_core::CPos;
use salvo_terrain::MapGrid;

use crate::target::Target;

/// The parts of an actor a weapon looks at.
struct TargetProfile<'a> {
    owner: Option<u32>,
    target_types: &'a BTreeSet<String>,
    armor: ArmorClass,
    water_bound: bool,
}

/// Whether `weapon` may engage `target` at all.
pub fn is_valid_against(
    weapon: &WeaponDefinition,
    target: &Target,
    world: &World,
    map: &MapGrid,
) -> bool {
    match target {
        Target::Actor(entity) => weapon_valid_for_actor(weapon, world, *entity),
        Target::FrozenActor(frozen) => accepts(
            weapon,
            &TargetProfile {
                owner: frozen.owner,
                target_types: &frozen.target_types,
                armor: frozen.armor,
                water_bound: frozen.water_bound,
            },
        ),
        Target::Position(pos) => weapon_valid_for_terrain(weapon, map, pos.cell()),
        Target::Cell(cell) => weapon_valid_for_terrain(weapon, map, *cell),
        Target::Invalid => false,
    }
}

/// Actor check, also used to keep splash off actors the weapon cannot hit.
pub fn weapon_valid_for_actor(weapon: &WeaponDefinition, world: &World, entity: Entity) -> bool {
    let Ok(targetable) = world.get::<&Targetable>(entity) else {
        return false;
    };
    let owner = world.get::<&Owner>(entity).ok().map(|o| o.player);
    let armor = world
        .get::<&Armor>(entity)
        .map(|a| a.class)
        .unwrap_or_default();
    let water_bound = world.get::<&WaterBound>(entity).is_ok();
    accepts(
        weapon,
        &TargetProfile {
            owner,
            target_types: &targetable.target_types,
            armor,
            water_bound,
        },
    )
}

/// Ground weapons hit land cells, water weapons hit water cells.
pub fn weapon_valid_for_terrain(weapon: &WeaponDefinition, map: &MapGrid, cell: CPos) -> bool {
    let Some(terrain) = map.terrain_at(cell) else {
        return false;
    };
    if terrain.is_water() {
        weapon.valid_targets.contains("Water")
    } else {
        weapon.valid_targets.contains("Ground")
    }
}

fn accepts(weapon: &WeaponDefinition, profile: &TargetProfile) -> bool {
    if profile.owner.is_none() {
        return false;
    }
    if weapon.valid_targets.is_disjoint(profile.target_types) {
        return false;
    }
    if !weapon
        .warheads
        .iter()
        .any(|w| w.effectiveness_against(profile.armor) > 0)
    {
        return false;
    }
    !weapon.underwater || profile.water_bound
}
