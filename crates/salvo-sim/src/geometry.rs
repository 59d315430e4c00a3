//! Barrel and turret geometry.
//!
//! Local offsets use x = forward, y = right, z = up. World space uses
//! x = east, y = north, z = up.

use salvo_core::components::{BodyFacing, Turret};
use salvo_core::constants::TRIG_SCALE;
use salvo_core::definitions::BarrelSpec;
use salvo_core::{Facing, WDist, WVec};

/// Rotate a local offset into world space for an actor facing `facing`.
pub fn rotate_by_facing(local: WVec, facing: Facing) -> WVec {
    let (sin, cos) = (facing.sin() as i64, facing.cos() as i64);
    let (fx, ry) = (local.x() as i64, local.y() as i64);
    let scale = TRIG_SCALE as i64;
    WVec::new(
        ((fx * sin + ry * cos) / scale) as i32,
        ((fx * cos - ry * sin) / scale) as i32,
        local.z(),
    )
}

/// World-space offset from the actor centre to a barrel's muzzle.
///
/// The body facing is quantized to the actor's rendered facings. Recoil
/// pulls the barrel back along its own axis.
pub fn muzzle_offset(
    body: BodyFacing,
    turret: Option<&Turret>,
    barrel: &BarrelSpec,
    recoil: WDist,
) -> WVec {
    let body_facing = body.facing.quantize(body.quantized_facings);
    let local = barrel.offset - WVec::new(recoil.0, 0, 0);
    match turret {
        Some(turret) => {
            rotate_by_facing(turret.offset, body_facing) + rotate_by_facing(local, turret.facing)
        }
        None => rotate_by_facing(local, body_facing),
    }
}

/// Direction the shot leaves the barrel in.
pub fn muzzle_facing(body: BodyFacing, turret: Option<&Turret>, barrel: &BarrelSpec) -> Facing {
    let base = turret.map_or(body.facing, |t| t.facing);
    base.offset(barrel.yaw.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(facing: Facing) -> BodyFacing {
        BodyFacing {
            facing,
            quantized_facings: 0,
        }
    }

    #[test]
    fn test_rotate_cardinals() {
        let forward = WVec::new(100, 0, 7);
        assert_eq!(rotate_by_facing(forward, Facing::NORTH), WVec::new(0, 100, 7));
        assert_eq!(rotate_by_facing(forward, Facing::EAST), WVec::new(100, 0, 7));
        assert_eq!(rotate_by_facing(forward, Facing::SOUTH), WVec::new(0, -100, 7));
        let right = WVec::new(0, 100, 0);
        assert_eq!(rotate_by_facing(right, Facing::NORTH), WVec::new(100, 0, 0));
        assert_eq!(rotate_by_facing(right, Facing::EAST), WVec::new(0, -100, 0));
    }

    #[test]
    fn test_muzzle_without_turret_applies_recoil() {
        let barrel = BarrelSpec {
            offset: WVec::new(400, 0, 0),
            yaw: Facing(0),
        };
        let offset = muzzle_offset(body(Facing::NORTH), None, &barrel, WDist(100));
        assert_eq!(offset, WVec::new(0, 300, 0));
    }

    #[test]
    fn test_muzzle_on_turret() {
        let turret = Turret {
            facing: Facing::EAST,
            desired_facing: None,
            turn_rate: 8,
            offset: WVec::new(-100, 0, 50),
            realign_delay: 40,
            idle_ticks: 0,
        };
        let barrel = BarrelSpec {
            offset: WVec::new(500, 40, 0),
            yaw: Facing(4),
        };
        // Body faces north: the pivot sits 100 behind the centre (south).
        // The turret faces east: the barrel points east, 40 to its right is south.
        let offset = muzzle_offset(body(Facing::NORTH), Some(&turret), &barrel, WDist::ZERO);
        assert_eq!(offset, WVec::new(500, -140, 50));
        assert_eq!(
            muzzle_facing(body(Facing::NORTH), Some(&turret), &barrel),
            Facing(68)
        );
    }

    #[test]
    fn test_body_facing_is_quantized() {
        let barrel = BarrelSpec {
            offset: WVec::new(1000, 0, 0),
            yaw: Facing(0),
        };
        let quantized = BodyFacing {
            facing: Facing(3),
            quantized_facings: 8,
        };
        let offset = muzzle_offset(quantized, None, &barrel, WDist::ZERO);
        assert_eq!(offset, WVec::new(0, 1000, 0));
        // The shot direction is not quantized.
        assert_eq!(muzzle_facing(quantized, None, &barrel), Facing(3));
    }
}
