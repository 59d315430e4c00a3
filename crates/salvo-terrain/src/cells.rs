//! Cell footprints.
//!
//! Footprints are returned in row-major order (south to north, west to east)
//! so that every peer visits cells in the same sequence.

use glam::IVec2;
use salvo_core::CPos;

/// Every cell whose centre lies within `radius` cells of `center`.
///
/// A radius of zero yields just `center`. Negative radii yield nothing.
pub fn cells_in_circle(center: CPos, radius: i32) -> Vec<CPos> {
    if radius < 0 {
        return Vec::new();
    }
    let r2 = radius * radius;
    let mut cells = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                cells.push(center + IVec2::new(dx, dy));
            }
        }
    }
    cells
}

/// Cells within `outer` of `center` but not within `inner`.
///
/// Same as the outer circle with the inner circle removed, so an `inner`
/// of zero only drops the centre cell.
pub fn cells_in_annulus(center: CPos, inner: i32, outer: i32) -> Vec<CPos> {
    let inner2 = if inner < 0 { -1 } else { inner * inner };
    cells_in_circle(center, outer)
        .into_iter()
        .filter(|c| {
            let d = c.0 - center.0;
            d.x * d.x + d.y * d.y > inner2
        })
        .collect()
}
