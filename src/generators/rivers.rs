//! River cells. Shallow water runs along the bank sides, deep water elsewhere.

use super::{from_fn, Registry};
use crate::builder::CellBuilder;
use crate::grid::EDGE;
use crate::overmap::CellType;
use crate::terrain::Terrain;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register(RiverCenter, from_fn(|b| b.fill(Terrain::WaterDeep)));
    r.register_rotations(&[RiverCNotNe, RiverCNotSe, RiverCNotSw, RiverCNotNw], inner_corner);
    r.register_rotations(&[RiverNorth, RiverEast, RiverSouth, RiverWest], bank);
    r.register_rotations(&[RiverNe, RiverSe, RiverSw, RiverNw], outer_corner);
}

fn water(b: &mut CellBuilder, shallow: impl Fn(i32, i32) -> bool) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if shallow(i, j) { Terrain::WaterShallow } else { Terrain::WaterDeep };
            b.set(i, j, t);
        }
    }
}

/// Open water except for a shallow patch in the north-east corner.
fn inner_corner(b: &mut CellBuilder) {
    water(b, |i, j| j < 4 && i > EDGE - 4);
}

/// Bank to the north.
fn bank(b: &mut CellBuilder) {
    water(b, |_, j| j < 4);
}

/// Banks to the north and east.
fn outer_corner(b: &mut CellBuilder) {
    water(b, |i, j| i > EDGE - 4 || j < 4);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    #[test]
    fn test_rotated_banks_face_their_side() {
        let registry = {
            let mut r = Registry::new();
            register(&mut r);
            r
        };
        with_builder(CellType::RiverSouth, Neighbors::default(), 1, |b| {
            registry.generate(b);
            assert_eq!(b.ter(5, EDGE), Terrain::WaterShallow);
            assert_eq!(b.ter(5, 0), Terrain::WaterDeep);
        });
        with_builder(CellType::RiverSw, Neighbors::default(), 1, |b| {
            registry.generate(b);
            assert_eq!(b.ter(0, 10), Terrain::WaterShallow);
            assert_eq!(b.ter(10, EDGE), Terrain::WaterShallow);
            assert_eq!(b.ter(EDGE, 0), Terrain::WaterDeep);
        });
    }

    #[test]
    fn test_inner_corner_has_small_shallow_patch() {
        with_builder(CellType::RiverCenter, Neighbors::default(), 1, |b| {
            inner_corner(b);
            assert_eq!(b.grid.count_terrain(Terrain::WaterShallow), 16);
        });
    }
}
