//! Fundamental geometric and simulation types.
//!
//! All coordinates are integers so that every peer computes identical
//! results. x = East, y = North, z = Up. One cell is `CELL_SIZE` units wide.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, Sub};

use glam::{IVec2, IVec3};
use serde::{Deserialize, Serialize};

use crate::constants::CELL_SIZE;

/// A distance in world units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WDist(pub i32);

/// An offset between two world positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WVec(pub IVec3);

/// A position in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WPos(pub IVec3);

/// A map cell coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CPos(pub IVec2);

/// Stable identifier of an actor, used in commands and events.
///
/// Wraps the bit representation of the ECS entity handle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActorId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl WDist {
    pub const ZERO: WDist = WDist(0);

    pub fn length(self) -> i32 {
        self.0
    }

    pub fn length_squared(self) -> i64 {
        self.0 as i64 * self.0 as i64
    }
}

impl WVec {
    pub const ZERO: WVec = WVec(IVec3::ZERO);

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    pub fn z(self) -> i32 {
        self.0.z
    }

    pub fn length_squared(self) -> i64 {
        let v = self.0.as_i64vec3();
        v.dot(v)
    }

    pub fn horizontal_length_squared(self) -> i64 {
        let v = self.0.truncate().as_i64vec2();
        v.dot(v)
    }

    /// Euclidean length, rounded down.
    pub fn length(self) -> i32 {
        isqrt(self.length_squared())
    }
}

impl WPos {
    pub const ZERO: WPos = WPos(IVec3::ZERO);

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    pub fn z(self) -> i32 {
        self.0.z
    }

    /// The cell containing this position.
    pub fn cell(self) -> CPos {
        CPos::new(self.0.x.div_euclid(CELL_SIZE), self.0.y.div_euclid(CELL_SIZE))
    }

    /// Straight-line distance to another position.
    pub fn distance_to(self, other: WPos) -> WDist {
        WDist((other - self).length())
    }
}

impl CPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    /// Ground-level position at the middle of the cell.
    pub fn center(self) -> WPos {
        WPos::new(
            self.0.x * CELL_SIZE + CELL_SIZE / 2,
            self.0.y * CELL_SIZE + CELL_SIZE / 2,
            0,
        )
    }
}

/// Row-major order: south to north, then west to east.
impl Ord for CPos {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0.y, self.0.x).cmp(&(other.0.y, other.0.x))
    }
}

impl PartialOrd for CPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

impl Add for WVec {
    type Output = WVec;

    fn add(self, rhs: WVec) -> WVec {
        WVec(self.0 + rhs.0)
    }
}

impl AddAssign for WVec {
    fn add_assign(&mut self, rhs: WVec) {
        self.0 += rhs.0;
    }
}

impl Sub for WVec {
    type Output = WVec;

    fn sub(self, rhs: WVec) -> WVec {
        WVec(self.0 - rhs.0)
    }
}

impl Neg for WVec {
    type Output = WVec;

    fn neg(self) -> WVec {
        WVec(-self.0)
    }
}

impl Add<WVec> for WPos {
    type Output = WPos;

    fn add(self, rhs: WVec) -> WPos {
        WPos(self.0 + rhs.0)
    }
}

impl Sub for WPos {
    type Output = WVec;

    fn sub(self, rhs: WPos) -> WVec {
        WVec(self.0 - rhs.0)
    }
}

impl Sub<WVec> for WPos {
    type Output = WPos;

    fn sub(self, rhs: WVec) -> WPos {
        WPos(self.0 - rhs.0)
    }
}

impl Add<IVec2> for CPos {
    type Output = CPos;

    fn add(self, rhs: IVec2) -> CPos {
        CPos(self.0 + rhs)
    }
}

/// Integer square root, rounded down. Negative input yields 0.
pub fn isqrt(value: i64) -> i32 {
    if value <= 0 {
        return 0;
    }
    (value as u64).isqrt().min(i32::MAX as u64) as i32
}
