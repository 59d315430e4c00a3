//! Damage model: splash radius, falloff and armor effectiveness.
//!
//! Pure integer arithmetic; no mutable state.

use salvo_core::constants::{FALLOFF_PPM, LOG2_FRACTION_BITS, PPM};
use salvo_core::definitions::WarheadDefinition;
use salvo_core::enums::ArmorClass;

use crate::modifiers::Multiplier;

/// Falloff in parts per million at `distance` from the impact.
///
/// The table is sampled at whole multiples of `spread` and interpolated
/// linearly in between. Distances at or past the last table entry get zero.
pub fn falloff_ppm(distance: i32, spread: i32) -> i64 {
    let spread = spread.max(1) as i64;
    let distance = distance.max(0) as i64;
    let u = (distance / spread) as usize;
    if u >= FALLOFF_PPM.len() - 1 {
        return 0;
    }
    let rem = distance % spread;
    (FALLOFF_PPM[u] * (spread - rem) + FALLOFF_PPM[u + 1] * rem) / spread
}

/// Binary logarithm in fixed point with `LOG2_FRACTION_BITS` fractional bits.
/// Zero maps to zero.
pub fn log2_fixed(value: u64) -> i64 {
    if value == 0 {
        return 0;
    }
    let int_part = 63 - value.leading_zeros();
    // Mantissa in [1, 2) as Q32.
    let mut x: u128 = ((value as u128) << 32) >> int_part;
    let mut result = (int_part as i64) << LOG2_FRACTION_BITS;
    for bit in (0..LOG2_FRACTION_BITS).rev() {
        x = (x * x) >> 32;
        if x >= 2u128 << 32 {
            x >>= 1;
            result |= 1 << bit;
        }
    }
    result
}

/// Largest distance (world units) at which a Normal warhead still reaches:
/// `spread * log2(|damage|)`.
pub fn max_spread(warhead: &WarheadDefinition) -> i32 {
    let log2 = log2_fixed(warhead.damage.unsigned_abs() as u64);
    let radius = (warhead.spread.0.max(0) as i64 * log2) >> LOG2_FRACTION_BITS;
    radius.min(i32::MAX as i64) as i32
}

/// Damage a Normal warhead deals at `distance` from the victim's edge,
/// before the victim's own damage modifiers.
pub fn damage_to_inflict(
    warhead: &WarheadDefinition,
    distance: i32,
    armor: ArmorClass,
    firepower: Multiplier,
) -> i32 {
    let falloff = Multiplier::ratio(falloff_ppm(distance, warhead.spread.0), PPM);
    let effectiveness = Multiplier::percent(warhead.effectiveness_against(armor) as i64);
    (firepower * falloff * effectiveness).apply_i32(warhead.damage)
}

/// Flat PerCell damage against an armor class, before damage modifiers.
pub fn per_cell_damage(warhead: &WarheadDefinition, armor: ArmorClass) -> i32 {
    Multiplier::percent(warhead.effectiveness_against(armor) as i64).apply_i32(warhead.damage)
}
