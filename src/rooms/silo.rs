//! Storage rooms carved out of the rock around a missile silo, joined by corridors.

use crate::builder::CellBuilder;
use crate::geometry::{trig_dist, Point};
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::terrain::Terrain;

/// Stop carving rooms after this many even if rock is still free.
const MAX_ROOMS: usize = 24;

/// Rooms dug by [`silo_rooms`], as (corner, size) pairs, plus the stairs they hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiloLayout {
    pub rooms: Vec<(Point, Point)>,
    pub up: Point,
    pub down: Point,
}

/// Item pools for a storage room, chosen by a 1..=14 roll.
fn room_loot(roll: i32) -> (&'static str, Option<&'static str>) {
    match roll {
        1 | 2 => ("cannedfood", Some("fridge")),
        3 | 4 => ("tools", None),
        5 | 6 => ("allguns", Some("ammo")),
        7 => ("allclothes", None),
        8 => ("manuals", None),
        9..=11 => ("electronics", None),
        12 => ("survival_tools", None),
        _ => ("radio", None),
    }
}

/// Dig storage rooms along the edges of a rock-filled cell until a new room would
/// overlap dug ground, place the stairs, then link every room and the central shaft
/// with corridors. Corridors only convert rock, so they never cut through the shaft.
pub fn silo_rooms(b: &mut CellBuilder) -> SiloLayout {
    let span = GRID_SIZE as i32;
    let mut rooms: Vec<(Point, Point)> = Vec::new();

    while rooms.len() < MAX_ROOMS {
        let (x, y, width, height);
        if b.one_in(2) {
            // Top or bottom
            x = b.rng(0, span - 6);
            let near = b.rng(0, 4);
            y = if b.one_in(2) { span - 2 - near } else { near };
            let w = b.rng(2, 5);
            width = if x + w >= span - 1 { span - 2 - x } else { w };
            height = 2.min(EDGE - y);
        } else {
            let near = b.rng(0, 4);
            x = if b.one_in(2) { span - 2 - near } else { near };
            y = b.rng(0, span - 6);
            width = 2.min(EDGE - x);
            let h = b.rng(2, 5);
            height = if y + h >= span - 1 { span - 2 - y } else { h };
        }

        let corner_free = b.ter(x, y) == Terrain::Rock && b.ter(x + width, y + height) == Terrain::Rock;
        if !rooms.is_empty() && !corner_free {
            break;
        }
        rooms.push((Point::new(x, y), Point::new(width, height)));
        for j in y..=y + height {
            for i in x..=x + width {
                if b.ter(i, j) == Terrain::Rock {
                    b.set(i, j, Terrain::Floor);
                }
            }
        }
        let (main, extra) = room_loot(b.rng(1, 14));
        b.place_items(main, 78, x, y, x + width, y + height, false);
        if let Some(extra) = extra {
            b.place_items(extra, 64, x, y, x + width, y + height, false);
        }
    }
    log::debug!("silo dug {} storage rooms", rooms.len());

    let up = rooms[0].0;
    b.set(up.x, up.y, Terrain::StairsUp);
    let (dp, ds) = rooms[b.rng(0, rooms.len() as i32 - 1) as usize];
    let down = Point::new(dp.x + ds.x, dp.y + ds.y);
    b.set(down.x, down.y, Terrain::StairsDown);

    let layout = SiloLayout {
        rooms: rooms.clone(),
        up,
        down,
    };

    // The shaft joins the queue last so the final corridor reaches the central ring.
    let mut queue = rooms;
    queue.push((Point::new(SEE, SEE), Point::new(5, 5)));
    while queue.len() > 1 {
        let (origin, size) = queue[0];
        let closest = (1..queue.len())
            .min_by_key(|&i| trig_dist(origin, queue[i].0))
            .unwrap_or(1);
        let dest = queue[closest].0;
        dig_corridor(b, Point::new(origin.x + size.x, origin.y + size.y), dest);
        queue.remove(0);
    }
    layout
}

/// Step from `from` to `to`, along the longer axis first, turning rock into floor.
fn dig_corridor(b: &mut CellBuilder, from: Point, to: Point) {
    let x_first = (from.x - to.x).abs() > (from.y - to.y).abs();
    let (mut x, mut y) = (from.x, from.y);
    while x != to.x || y != to.y {
        if b.ter(x, y) == Terrain::Rock {
            b.set(x, y, Terrain::Floor);
        }
        if (x_first && x != to.x) || (!x_first && y == to.y) {
            x += (to.x - x).signum();
        } else {
            y += (to.y - y).signum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::{CellType, Neighbors};
    use std::collections::{HashSet, VecDeque};

    /// Solid rock with a floor ring around the shaft, as the silo generator lays it out.
    fn silo_floor(b: &mut CellBuilder) {
        b.fill(Terrain::Rock);
        let center = Point::new(SEE, SEE);
        for p in b.grid.tiles().points().collect::<Vec<_>>() {
            let d = trig_dist(p, center);
            if d <= 5 {
                b.set(p.x, p.y, Terrain::Missile);
            } else if d <= 7 {
                b.set(p.x, p.y, Terrain::MetalFloor);
            }
        }
    }

    fn reachable(b: &CellBuilder, from: Point) -> HashSet<Point> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(p) = queue.pop_front() {
            for n in b.grid.tiles().neighbors(p) {
                if b.grid.ter(n).is_passable() && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn test_silo_rooms_connect_up_and_down_stairs() {
        for seed in 0..40 {
            with_builder(CellType::Silo, Neighbors::default(), seed, |b| {
                silo_floor(b);
                let layout = silo_rooms(b);
                assert!(!layout.rooms.is_empty());
                assert_eq!(b.grid.ter(layout.up), Terrain::StairsUp);
                let seen = reachable(b, layout.up);
                assert!(seen.contains(&layout.down), "seed {}", seed);
                assert!(seen.contains(&Point::new(SEE, SEE - 6)), "seed {}", seed);
            });
        }
    }

    #[test]
    fn test_silo_rooms_stay_in_bounds() {
        for seed in 0..40 {
            with_builder(CellType::Silo, Neighbors::default(), seed, |b| {
                silo_floor(b);
                let layout = silo_rooms(b);
                assert!(layout.rooms.len() <= MAX_ROOMS);
                for (corner, size) in &layout.rooms {
                    assert!(b.grid.in_bounds(*corner));
                    assert!(b.grid.in_bounds(Point::new(corner.x + size.x, corner.y + size.y)));
                }
            });
        }
    }
}
