//! Surface roads, bridges and highways. Each shape is laid out once with its openings in
//! the canonical frame and turned into the other orientations.

use super::{grass_or_dirt, Registry};
use crate::builder::CellBuilder;
use crate::grid::{EDGE, SEE};
use crate::overmap::CellType;
use crate::terrain::Terrain;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register_rotations(&[RoadNs, RoadEw], road_straight);
    r.register_rotations(&[RoadNe, RoadEs, RoadSw, RoadWn], road_corner);
    r.register_rotations(&[RoadNes, RoadEsw, RoadNsw, RoadNew], road_tee);
    r.register(RoadNesw, road_four_way);
    r.register(RoadNeswManhole, road_four_way);
    r.register_rotations(&[BridgeNs, BridgeEw], bridge);
    r.register_rotations(&[HiwayNs, HiwayEw], hiway);
}

/// The two center columns carry a dashed yellow line.
fn on_center_line(i: i32) -> bool {
    i == SEE - 1 || i == SEE
}

fn has_sidewalks(b: &CellBuilder) -> bool {
    b.ctx.neighbors.all().iter().any(|n| n.is_town_building())
}

/// Lay a road surface. `verge(i, j)` marks the shoulder, `yellow(i, j)` the painted line.
fn pave(b: &mut CellBuilder, sidewalks: bool, verge: impl Fn(i32, i32) -> bool, yellow: impl Fn(i32, i32) -> bool) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if verge(i, j) {
                if sidewalks {
                    Terrain::Sidewalk
                } else {
                    grass_or_dirt(&mut b.rng)
                }
            } else if yellow(i, j) {
                Terrain::PavementYellow
            } else {
                Terrain::Pavement
            };
            b.set(i, j, t);
        }
    }
}

fn road_straight(b: &mut CellBuilder) {
    let sidewalks = has_sidewalks(b);
    pave(b, sidewalks, |i, _| i < 4 || i > EDGE - 4, |i, j| on_center_line(i) && j % 4 != 0);
    b.place_items("road", 5, 0, 0, EDGE, EDGE, false);
}

/// Opens north and east.
fn road_corner(b: &mut CellBuilder) {
    let sidewalks = has_sidewalks(b);
    pave(
        b,
        sidewalks,
        |i, j| (i > EDGE - 4 && j < 4) || i < 4 || j > EDGE - 4,
        |i, j| (on_center_line(i) && j % 4 != 0 && j < SEE - 1) || (on_center_line(j) && i % 4 != 0 && i > SEE),
    );
    b.place_items("road", 5, 0, 0, EDGE, EDGE, false);
}

/// Opens north, east and south.
fn road_tee(b: &mut CellBuilder) {
    let sidewalks = has_sidewalks(b);
    pave(
        b,
        sidewalks,
        |i, j| i < 4 || (i > EDGE - 4 && (j < 4 || j > EDGE - 4)),
        |i, j| (on_center_line(i) && j % 4 != 0) || (on_center_line(j) && i % 4 != 0 && i > SEE),
    );
    b.place_items("road", 5, 0, 0, EDGE, EDGE, false);
}

fn is_crossing(t: CellType) -> bool {
    matches!(t, CellType::RoadNesw | CellType::RoadNeswManhole)
}

/// A crossing surrounded by crossings on every side is paved over as a plaza.
fn road_four_way(b: &mut CellBuilder) {
    let plaza = b.ctx.neighbors.all().into_iter().all(is_crossing);
    if plaza {
        b.fill(Terrain::Sidewalk);
        plaza_features(b);
        b.place_items("trash", 5, 0, 0, EDGE, EDGE, true);
    } else {
        pave(
            b,
            true,
            |i, j| (i < 4 || i > EDGE - 4) && (j < 4 || j > EDGE - 4),
            |i, j| (on_center_line(i) && j % 4 != 0) || (on_center_line(j) && i % 4 != 0),
        );
        b.place_items("road", 5, 0, 0, EDGE, EDGE, false);
    }
    if b.cell() == CellType::RoadNeswManhole {
        let (x, y) = (b.rng(6, EDGE + 1 - 6), b.rng(6, EDGE + 1 - 6));
        b.set(x, y, Terrain::ManholeCover);
    }
}

fn plaza_features(b: &mut CellBuilder) {
    if b.one_in(10) {
        // Fountain
        for i in SEE - 2..=SEE + 2 {
            b.set(i, i, Terrain::WaterShallow);
            b.set(i, 2 * SEE - i, Terrain::WaterShallow);
        }
    }
    if b.one_in(10) {
        // Small trees in the center
        for (x, y) in [
            (SEE - 1, SEE - 2),
            (SEE, SEE - 2),
            (SEE - 1, SEE + 2),
            (SEE, SEE + 2),
            (SEE - 2, SEE - 1),
            (SEE - 2, SEE),
            (SEE + 2, SEE - 1),
            (SEE + 2, SEE),
        ] {
            b.set(x, y, Terrain::TreeYoung);
        }
    }
    if b.one_in(14) {
        // Rows of small trees
        let gap = b.rng(2, 4) as usize;
        let start = b.rng(0, 4);
        for i in (2..EDGE + 1 - start).step_by(gap) {
            b.set(i, start, Terrain::TreeYoung);
            b.set(EDGE - i, start, Terrain::TreeYoung);
            b.set(start, i, Terrain::TreeYoung);
            b.set(start, EDGE - i, Terrain::TreeYoung);
        }
    }
}

fn bridge(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < 4 || i > EDGE - 4 {
                Terrain::WaterDeep
            } else if i == 4 || i == EDGE - 4 {
                Terrain::RailingV
            } else if on_center_line(i) && j % 4 != 0 {
                Terrain::PavementYellow
            } else {
                Terrain::Pavement
            };
            b.set(i, j, t);
        }
    }
    b.place_items("road", 5, 0, 0, EDGE, EDGE, false);
}

fn hiway(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < 3 || i > EDGE - 3 {
                grass_or_dirt(&mut b.rng)
            } else if i == 3 || i == EDGE - 3 {
                Terrain::RailingV
            } else if on_center_line(i) && j % 4 != 0 {
                Terrain::PavementYellow
            } else {
                Terrain::Pavement
            };
            b.set(i, j, t);
        }
    }
    b.place_items("road", 8, 0, 0, EDGE, EDGE, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    #[test]
    fn test_crossing_among_crossings_is_a_plaza() {
        for seed in 0..20 {
            with_builder(CellType::RoadNesw, Neighbors::uniform(CellType::RoadNesw), seed, |b| {
                road_four_way(b);
                assert_eq!(b.grid.count_terrain(Terrain::Pavement), 0);
                assert_eq!(b.grid.count_terrain(Terrain::PavementYellow), 0);
                assert!(b.grid.count_terrain(Terrain::Sidewalk) > 400);
            });
        }
    }

    #[test]
    fn test_plain_crossing_has_sidewalk_corners() {
        let neighbors = Neighbors::new(CellType::RoadNs, CellType::RoadEw, CellType::RoadNs, CellType::RoadEw);
        with_builder(CellType::RoadNesw, neighbors, 1, |b| {
            road_four_way(b);
            assert_eq!(b.ter(0, 0), Terrain::Sidewalk);
            assert_eq!(b.ter(EDGE, EDGE), Terrain::Sidewalk);
            assert_eq!(b.ter(0, SEE), Terrain::Pavement);
            assert_eq!(b.ter(SEE, 1), Terrain::PavementYellow);
        });
    }

    #[test]
    fn test_sidewalks_only_in_town() {
        with_builder(CellType::RoadNs, Neighbors::uniform(CellType::Field), 2, |b| {
            road_straight(b);
            assert_eq!(b.grid.count_terrain(Terrain::Sidewalk), 0);
        });
        let town = Neighbors::new(CellType::RoadNs, CellType::HouseWest, CellType::RoadNs, CellType::Field);
        with_builder(CellType::RoadNs, town, 2, |b| {
            road_straight(b);
            assert_eq!(b.grid.count_terrain(Terrain::Sidewalk), 8 * 24);
        });
    }

    #[test]
    fn test_corner_leaves_south_and_west_closed() {
        let town = Neighbors::uniform(CellType::HouseNorth);
        with_builder(CellType::RoadNe, town, 3, |b| {
            road_corner(b);
            assert_eq!(b.ter(SEE, 0), Terrain::Pavement);
            assert_eq!(b.ter(EDGE, SEE), Terrain::Pavement);
            assert_eq!(b.ter(SEE, EDGE), Terrain::Sidewalk);
            assert_eq!(b.ter(0, SEE), Terrain::Sidewalk);
        });
    }

    #[test]
    fn test_manhole_cover_is_placed() {
        with_builder(CellType::RoadNeswManhole, Neighbors::default(), 4, |b| {
            road_four_way(b);
            assert_eq!(b.grid.count_terrain(Terrain::ManholeCover), 1);
        });
    }

    #[test]
    fn test_bridge_rails_and_water() {
        with_builder(CellType::BridgeNs, Neighbors::default(), 5, |b| {
            bridge(b);
            assert_eq!(b.ter(0, 5), Terrain::WaterDeep);
            assert_eq!(b.ter(4, 5), Terrain::RailingV);
            assert_eq!(b.ter(EDGE - 4, 5), Terrain::RailingV);
        });
    }
}
