//! Cross-peer consistency hash.
//!
//! Folds every piece of state that can influence a future tick into one
//! value. Peers compare it every frame; any difference means a desync.
//!
//! The hasher is 64-bit FNV-1a over little-endian bytes, with `usize` and
//! `isize` widened to 64 bits, so every build of every peer agrees.

use std::hash::{Hash, Hasher};

use hecs::World;

use salvo_core::components::{BodyFacing, Health, LimitedAmmo, Turrets};
use salvo_core::{SimTime, WPos};

use crate::armament::Armaments;
use crate::components::Attacker;
use crate::impact::ImpactQueue;
use crate::systems::sorted;

pub fn state_hash(world: &World, time: SimTime, impacts: &ImpactQueue) -> u64 {
    let mut hasher = StateHasher::new();
    time.hash(&mut hasher);

    let entities = sorted(world.iter().map(|e| e.entity()).collect());
    for entity in entities {
        entity.to_bits().hash(&mut hasher);
        if let Ok(pos) = world.get::<&WPos>(entity) {
            pos.hash(&mut hasher);
        }
        if let Ok(health) = world.get::<&Health>(entity) {
            health.hash(&mut hasher);
        }
        if let Ok(body) = world.get::<&BodyFacing>(entity) {
            body.hash(&mut hasher);
        }
        if let Ok(turrets) = world.get::<&Turrets>(entity) {
            turrets.hash(&mut hasher);
        }
        if let Ok(ammo) = world.get::<&LimitedAmmo>(entity) {
            ammo.hash(&mut hasher);
        }
        if let Ok(armaments) = world.get::<&Armaments>(entity) {
            for armament in &armaments.0 {
                armament.hash_state(&mut hasher);
            }
        }
        if let Ok(attacker) = world.get::<&Attacker>(entity) {
            attacker.state.hash(&mut hasher);
            attacker.target.hash(&mut hasher);
        }
    }

    impacts.hash_state(&mut hasher);
    hasher.finish()
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a with a platform-independent integer encoding.
#[derive(Debug, Clone, Copy)]
pub struct StateHasher {
    state: u64,
}

impl StateHasher {
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Default for StateHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for StateHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= u64::from(*byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.write(&[i]);
    }

    fn write_u16(&mut self, i: u16) {
        self.write(&i.to_le_bytes());
    }

    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }

    fn write_u128(&mut self, i: u128) {
        self.write(&i.to_le_bytes());
    }

    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.write_u8(i as u8);
    }

    fn write_i16(&mut self, i: i16) {
        self.write_u16(i as u16);
    }

    fn write_i32(&mut self, i: i32) {
        self.write_u32(i as u32);
    }

    fn write_i64(&mut self, i: i64) {
        self.write_u64(i as u64);
    }

    fn write_i128(&mut self, i: i128) {
        self.write_u128(i as u128);
    }

    fn write_isize(&mut self, i: isize) {
        self.write_i64(i as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fnv(bytes: &[u8]) -> u64 {
        let mut hasher = StateHasher::new();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_integers_hash_as_little_endian() {
        let mut hasher = StateHasher::new();
        hasher.write_i32(-2);
        assert_eq!(hasher.finish(), fnv(&[0xfe, 0xff, 0xff, 0xff]));

        // Pointer-sized integers always take eight bytes.
        let mut wide = StateHasher::new();
        wide.write_usize(7);
        let mut fixed = StateHasher::new();
        fixed.write_u64(7);
        assert_eq!(wide.finish(), fixed.finish());
    }
}
