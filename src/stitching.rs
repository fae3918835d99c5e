//! Reconciles network tunnels that meet a different network at a cell boundary.
//!
//! Runs after the cell's own generator, in the final (unrotated) frame.

use crate::builder::CellBuilder;
use crate::connectivity::connects_to;
use crate::generators::pick_tile;
use crate::geometry::Direction;
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::{CellType, Network};
use crate::terrain::Terrain;

const SPAN: i32 = GRID_SIZE as i32;

pub fn stitch(b: &mut CellBuilder) {
    let cell = b.cell();
    if cell.is_network(Network::Subway) {
        subway_boundaries(b);
    } else if cell.is_sewer() {
        sewer_boundaries(b);
    } else if cell.is_ants() {
        ant_boundaries(b);
    } else if cell == CellType::Rock {
        rift_bands(b);
    }
}

/// Tiles of a two-wide passage running from the `dir` edge to `depth` tiles in, centred
/// on the cell's middle.
fn passage(dir: Direction, depth: i32) -> Vec<(i32, i32)> {
    let mut tiles = Vec::new();
    for k in 0..depth {
        for w in [SEE - 1, SEE] {
            tiles.push(match dir {
                Direction::North => (w, k),
                Direction::East => (EDGE - k, w),
                Direction::South => (w, EDGE - k),
                Direction::West => (k, w),
            });
        }
    }
    tiles
}

fn paint_tiles(b: &mut CellBuilder, tiles: &[(i32, i32)], t: Terrain) {
    for &(x, y) in tiles {
        b.set(x, y, t);
    }
}

/// A closed pair of metal doors across the passage, `depth` tiles in from `dir`.
fn door_pair(b: &mut CellBuilder, dir: Direction, depth: i32) {
    for (x, y) in passage(dir, depth + 1).into_iter().skip(2 * depth as usize) {
        b.set(x, y, Terrain::DoorMetalClosed);
    }
}

/// The four-wide strip from the `dir` edge to the center.
fn channel_to_center(dir: Direction) -> (i32, i32, i32, i32) {
    match dir {
        Direction::North => (SEE - 2, 0, SEE + 1, SEE - 1),
        Direction::East => (SEE, SEE - 2, EDGE, SEE + 1),
        Direction::South => (SEE - 2, SEE, SEE + 1, EDGE),
        Direction::West => (0, SEE - 2, SEE - 1, SEE + 1),
    }
}

/// A sewer that runs into a subway's wall floods it with a channel to the tracks; one that
/// passes by gets a maintenance passage behind metal doors. Ant tunnels are barred out.
fn subway_boundaries(b: &mut CellBuilder) {
    let cell = b.cell();
    for dir in Direction::ALL {
        if connects_to(cell, dir) {
            continue;
        }
        let there = b.neighbor(dir);
        if there.is_sewer() {
            if connects_to(there, dir.opposite()) {
                let (x1, y1, x2, y2) = channel_to_center(dir);
                b.square(Terrain::Sewage, x1, y1, x2, y2);
            } else {
                paint_tiles(b, &passage(dir, 3), Terrain::RockFloor);
                door_pair(b, dir, 3);
            }
        } else if there.is_ants() && connects_to(there, dir.opposite()) {
            let (x1, y1, x2, y2) = channel_to_center(dir);
            match dir {
                Direction::North => b.line(Terrain::Bars, x1, 0, x2, 0),
                Direction::South => b.line(Terrain::Bars, x1, EDGE, x2, EDGE),
                Direction::East => b.line(Terrain::Bars, EDGE, y1, EDGE, y2),
                Direction::West => b.line(Terrain::Bars, 0, y1, 0, y2),
            }
        }
    }
}

fn sewer_boundaries(b: &mut CellBuilder) {
    if b.above() == CellType::RoadNeswManhole {
        let x = b.rng(SEE - 2, SEE + 1);
        let y = b.rng(SEE - 2, SEE + 1);
        b.set(x, y, Terrain::LadderUp);
    }
    let cell = b.cell();
    for dir in Direction::ALL {
        if connects_to(cell, dir) || !b.neighbor(dir).is_network(Network::Subway) {
            continue;
        }
        paint_tiles(b, &passage(dir, SEE - 3), Terrain::RockFloor);
        door_pair(b, dir, SEE - 3);
    }
}

/// Colonies under an anthill climb out; colonies beside a lab or sewer have chewed through
/// the shared wall.
fn ant_boundaries(b: &mut CellBuilder) {
    if b.above() == CellType::Anthill {
        match pick_tile(b, 0, 0, EDGE, EDGE, |t| t == Terrain::RockFloor) {
            Some((x, y)) => b.set(x, y, Terrain::SlopeUp),
            None => log::warn!("ant tunnel below an anthill has no floor for a slope up"),
        }
    }
    for dir in Direction::ALL {
        let there = b.neighbor(dir);
        if !(there.is_lab() || there.is_sewer()) {
            continue;
        }
        for k in 0..2 {
            for w in SEE - 3..=SEE + 3 {
                let (x, y) = match dir {
                    Direction::North => (w, k),
                    Direction::East => (EDGE - k, w),
                    Direction::South => (w, EDGE - k),
                    Direction::West => (k, w),
                };
                if b.ter(x, y) == Terrain::Rock {
                    b.set(x, y, Terrain::Rubble);
                }
            }
        }
    }
}

/// Solid rock grades into lava over the four rows nearest a rift.
fn rift_bands(b: &mut CellBuilder) {
    for dir in Direction::ALL {
        if b.neighbor(dir) != CellType::Rift {
            continue;
        }
        for depth in 0..4 {
            for w in 0..SPAN {
                let (x, y) = match dir {
                    Direction::North => (w, depth),
                    Direction::East => (EDGE - depth, w),
                    Direction::South => (w, EDGE - depth),
                    Direction::West => (depth, w),
                };
                if b.one_in(2 * depth + 2) {
                    b.set(x, y, Terrain::Lava);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::generators::Registry;
    use crate::overmap::Neighbors;

    fn build(b: &mut CellBuilder) {
        Registry::standard().generate(b);
        stitch(b);
    }

    #[test]
    fn test_connecting_sewer_floods_subway() {
        let neighbors = Neighbors::new(CellType::SewerNs, CellType::Rock, CellType::Rock, CellType::Rock);
        with_builder(CellType::SubwayEw, neighbors, 1, |b| {
            b.ctx.above = CellType::Field;
            build(b);
            assert_eq!(b.ter(SEE, 0), Terrain::Sewage);
            assert_eq!(b.ter(SEE - 2, SEE - 1), Terrain::Sewage);
        });
    }

    #[test]
    fn test_passing_sewer_gets_doors() {
        let neighbors = Neighbors::new(CellType::SewerEw, CellType::Rock, CellType::Rock, CellType::Rock);
        with_builder(CellType::SubwayEw, neighbors, 1, |b| {
            b.ctx.above = CellType::Field;
            build(b);
            assert_eq!(b.ter(SEE, 0), Terrain::RockFloor);
            assert_eq!(b.ter(SEE - 1, 3), Terrain::DoorMetalClosed);
            assert_eq!(b.ter(SEE, 3), Terrain::DoorMetalClosed);
        });
    }

    #[test]
    fn test_ants_are_barred_from_subway() {
        let neighbors = Neighbors::new(CellType::AntsNs, CellType::Rock, CellType::Rock, CellType::Rock);
        with_builder(CellType::SubwayEw, neighbors, 2, |b| {
            b.ctx.above = CellType::Field;
            build(b);
            assert_eq!(b.ter(SEE, 0), Terrain::Bars);
        });
    }

    #[test]
    fn test_sewer_reaches_subway_and_manhole() {
        let neighbors = Neighbors::new(CellType::Rock, CellType::SubwayNs, CellType::Rock, CellType::Rock);
        with_builder(CellType::SewerNs, neighbors, 3, |b| {
            b.ctx.above = CellType::RoadNeswManhole;
            build(b);
            assert_eq!(b.ter(EDGE, SEE), Terrain::RockFloor);
            assert_eq!(b.ter(SEE + 2, SEE - 1), Terrain::DoorMetalClosed);
            assert_eq!(b.grid.count_terrain(Terrain::LadderUp), 1);
        });
    }

    #[test]
    fn test_anthill_slope() {
        with_builder(CellType::AntsNs, Neighbors::uniform(CellType::Rock), 4, |b| {
            b.ctx.above = CellType::Anthill;
            build(b);
            assert_eq!(b.grid.count_terrain(Terrain::SlopeUp), 1);
        });
    }

    #[test]
    fn test_rift_band() {
        let neighbors = Neighbors::new(CellType::Rift, CellType::Rock, CellType::Rock, CellType::Rock);
        with_builder(CellType::Rock, neighbors, 5, |b| {
            b.ctx.above = CellType::Field;
            build(b);
            let lava_top = (0..SPAN).filter(|&x| b.ter(x, 0) == Terrain::Lava).count();
            let lava_bottom = (0..SPAN).filter(|&x| b.ter(x, EDGE) == Terrain::Lava).count();
            assert!(lava_top > 0);
            assert_eq!(lava_bottom, 0);
        });
    }
}
