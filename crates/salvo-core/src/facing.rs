//! Discrete 8-bit facings and integer trigonometry.
//!
//! A facing is one of 256 directions: 0 = North, 64 = East (clockwise).
//! Sine and cosine come from a fixed quarter-wave table so that rotation
//! results are identical on every peer.

use serde::{Deserialize, Serialize};

use crate::types::WVec;

/// `sin(i * 2π / 256) * 1024` for the first quarter turn (inclusive).
const QUARTER_SINE: [i32; 65] = [
    0, 25, 50, 75, 100, 125, 150, 175, 200, 224, 249, 273, 297, 321, 345, 369, 392, 415, 438, 460,
    483, 505, 526, 548, 569, 590, 610, 630, 650, 669, 688, 706, 724, 742, 759, 775, 792, 807, 822,
    837, 851, 865, 878, 891, 903, 915, 926, 936, 946, 955, 964, 972, 980, 987, 993, 999, 1004,
    1009, 1013, 1016, 1019, 1021, 1023, 1024, 1024,
];

/// A discrete direction in the ground plane.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Facing(pub u8);

impl Facing {
    pub const NORTH: Facing = Facing(0);
    pub const EAST: Facing = Facing(64);
    pub const SOUTH: Facing = Facing(128);
    pub const WEST: Facing = Facing(192);

    /// Sine scaled by `TRIG_SCALE`.
    pub fn sin(self) -> i32 {
        let i = self.0 as usize;
        match i / 64 {
            0 => QUARTER_SINE[i],
            1 => QUARTER_SINE[128 - i],
            2 => -QUARTER_SINE[i - 128],
            _ => -QUARTER_SINE[256 - i],
        }
    }

    /// Cosine scaled by `TRIG_SCALE`.
    pub fn cos(self) -> i32 {
        self.offset(64).sin()
    }

    /// This facing turned clockwise by `steps`.
    pub fn offset(self, steps: u8) -> Facing {
        Facing(self.0.wrapping_add(steps))
    }

    /// Shortest angular distance to another facing (0..=128).
    pub fn angle_to(self, other: Facing) -> u8 {
        let cw = other.0.wrapping_sub(self.0);
        let ccw = self.0.wrapping_sub(other.0);
        cw.min(ccw)
    }

    /// Whether `other` lies within `tolerance` steps of this facing.
    pub fn within_tolerance(self, other: Facing, tolerance: u8) -> bool {
        self.angle_to(other) <= tolerance
    }

    /// Turn toward `desired` by at most `rate` steps, taking the shorter way round.
    pub fn tick_towards(self, desired: Facing, rate: u8) -> Facing {
        let left = self.0.wrapping_sub(desired.0);
        let right = desired.0.wrapping_sub(self.0);
        if left.min(right) <= rate {
            desired
        } else if right < left {
            Facing(self.0.wrapping_add(rate))
        } else {
            Facing(self.0.wrapping_sub(rate))
        }
    }

    /// Snap to the nearest of `num_facings` evenly spaced directions.
    pub fn quantize(self, num_facings: u16) -> Facing {
        if num_facings == 0 || num_facings >= 256 {
            return self;
        }
        let step = 256 / num_facings;
        let a = (self.0 as u16 + step / 2) & 0xff;
        Facing(((a / step) * step) as u8)
    }

    /// Facing that best points along `delta`. A zero horizontal offset keeps `current`.
    pub fn towards(delta: WVec, current: Facing) -> Facing {
        if delta.horizontal_length_squared() == 0 {
            return current;
        }

        let (dx, dy) = (delta.x() as i64, delta.y() as i64);
        let mut best = current;
        let mut best_dot = i64::MIN;
        let mut best_cross = i64::MAX;
        for f in 0..=255u8 {
            let facing = Facing(f);
            let (sin, cos) = (facing.sin() as i64, facing.cos() as i64);
            let dot = dx * sin + dy * cos;
            // The table saturates near the axes, so break ties on the perpendicular component.
            let cross = (dx * cos - dy * sin).abs();
            if dot > best_dot || (dot == best_dot && cross < best_cross) {
                best_dot = dot;
                best_cross = cross;
                best = facing;
            }
        }
        best
    }
}
