//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 25;

// --- World geometry ---

/// World units per map cell along each horizontal axis.
pub const CELL_SIZE: i32 = 1024;

/// Number of discrete facings in a full turn.
pub const FACING_COUNT: u32 = 256;

/// Fixed-point scale of the integer sine table (1.0 == 1024).
pub const TRIG_SCALE: i32 = 1024;

// --- Damage model ---

/// Fixed-point scale used for falloff values (parts per million).
pub const PPM: i64 = 1_000_000;

/// Exponential damage falloff, sampled at whole multiples of a warhead's spread.
/// Entry `i` is `e^-i` in parts per million.
pub const FALLOFF_PPM: [i64; 8] = [
    1_000_000, 367_879, 135_335, 49_787, 18_316, 6_738, 2_479, 912,
];

/// Fractional bits of the fixed-point binary logarithm used for splash radii.
pub const LOG2_FRACTION_BITS: u32 = 16;

/// Effectiveness percentage used for armor classes a warhead does not list.
pub const DEFAULT_EFFECTIVENESS: i32 = 100;

// --- Armaments ---

/// Default burst delay (ticks between shots inside a burst).
pub const DEFAULT_BURST_DELAY: u32 = 5;

/// Default recoil recovery per tick (world units).
pub const DEFAULT_RECOIL_RECOVERY: i32 = 9;

// --- Turrets ---

/// Idle ticks before a turret swings back to the body facing.
pub const DEFAULT_TURRET_REALIGN_DELAY: u32 = 40;

// --- Terrain ---

/// Maximum number of stacked smudges on a single cell.
pub const MAX_SMUDGE_DEPTH: u8 = 2;
