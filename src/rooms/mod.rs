//! Room and structure builders shared by the cell generators.
//!
//! Every builder works on an inclusive rectangle of the cell and leaves each tile it owns
//! with concrete terrain. Furniture only goes on interior tiles.

pub mod bunker;
pub mod domestic;
pub mod mansion;
pub mod science;
pub mod silo;

pub use bunker::{bunker_room, BunkerRoom};
pub use domestic::{house_room, HouseRoom};
pub use mansion::{mansion_room, MansionRoom};
pub use science::{science_room, set_science_room, SetScienceRoom};
pub use silo::{silo_rooms, SiloLayout};

use std::collections::VecDeque;

use crate::builder::CellBuilder;
use crate::geometry::{Direction, Point};
use crate::grid::{TileGrid, EDGE, GRID_SIZE, SEE};
use crate::terrain::Terrain;
use crate::tilemap::Tilemap;

/// Inclusive rectangle in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Corners may be given in any order.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Distance between the west and east walls (the C-style `x2 - x1`).
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Tiles strictly inside the walls.
    pub fn interior_area(&self) -> i32 {
        (self.width() - 1).max(0) * (self.height() - 1).max(0)
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Rectangle shrunk by one tile on every side.
    pub fn inner(&self) -> Rect {
        Rect::new(self.x1 + 1, self.y1 + 1, self.x2 - 1, self.y2 - 1)
    }

    /// Whether the wall on `side` lies on the outer edge of the cell.
    pub fn on_cell_edge(&self, side: Direction) -> bool {
        match side {
            Direction::North => self.y1 <= 0,
            Direction::South => self.y2 >= EDGE,
            Direction::West => self.x1 <= 0,
            Direction::East => self.x2 >= EDGE,
        }
    }

    /// Wall tiles on `side`, corners excluded.
    pub fn wall_tiles(&self, side: Direction) -> Vec<Point> {
        match side {
            Direction::North => (self.x1 + 1..self.x2).map(|x| Point::new(x, self.y1)).collect(),
            Direction::South => (self.x1 + 1..self.x2).map(|x| Point::new(x, self.y2)).collect(),
            Direction::West => (self.y1 + 1..self.y2).map(|y| Point::new(self.x1, y)).collect(),
            Direction::East => (self.y1 + 1..self.y2).map(|y| Point::new(self.x2, y)).collect(),
        }
    }

    pub fn is_corner(&self, p: Point) -> bool {
        (p.x == self.x1 || p.x == self.x2) && (p.y == self.y1 || p.y == self.y2)
    }
}

/// Side whose wall looks toward the middle of the cell, ties broken north/south first.
fn inward_side(r: Rect) -> Direction {
    let c = r.center();
    let (dx, dy) = (SEE - c.x, SEE - c.y);
    if dy.abs() >= dx.abs() {
        if dy >= 0 {
            Direction::South
        } else {
            Direction::North
        }
    } else if dx >= 0 {
        Direction::East
    } else {
        Direction::West
    }
}

/// Pick the wall that gets the entrance. The inward side wins two times in three;
/// otherwise any side not on the cell's outer edge may be used.
pub fn door_side(b: &mut CellBuilder, r: Rect) -> Direction {
    let inward = inward_side(r);
    let open: Vec<Direction> = Direction::ALL
        .iter()
        .copied()
        .filter(|&side| !r.on_cell_edge(side) && !r.wall_tiles(side).is_empty())
        .collect();
    if open.is_empty() || (open.contains(&inward) && !b.one_in(3)) {
        return inward;
    }
    b.choose(&open).unwrap_or(inward)
}

/// Doors cut by [`open_sealed_rooms`] before it gives up on a cell.
const MAX_CUT_DOORS: usize = 8;

/// Tiles a walker can stand on or get through: doors open and furniture can be climbed.
pub fn walkable(t: Terrain) -> bool {
    t.is_passable() || t.is_door() || t.is_furniture() || t.is_container()
}

fn flood(grid: &TileGrid, seen: &mut Tilemap<bool>, mut queue: VecDeque<Point>) {
    while let Some(p) = queue.pop_front() {
        for n in seen.neighbors(p) {
            if seen.get(n) == Some(&false) && walkable(grid.ter(n)) {
                seen.set(n, true);
                queue.push_back(n);
            }
        }
    }
}

/// Tiles reachable from the walkable tiles on the edge of the cell.
pub fn reachable_from_edge(grid: &TileGrid) -> Tilemap<bool> {
    let mut seen = Tilemap::new_with(GRID_SIZE, GRID_SIZE, false);
    let edge: VecDeque<Point> = seen
        .points()
        .filter(|p| (p.x == 0 || p.y == 0 || p.x == EDGE || p.y == EDGE) && walkable(grid.ter(*p)))
        .collect();
    for &p in &edge {
        seen.set(p, true);
    }
    flood(grid, &mut seen, edge);
    seen
}

/// Floor tiles nobody coming in from the edge of the cell can reach.
pub fn sealed_floor(grid: &TileGrid) -> Vec<Point> {
    let seen = reachable_from_edge(grid);
    seen.points()
        .filter(|&p| grid.ter(p) == Terrain::Floor && seen.get(p) == Some(&false))
        .collect()
}

/// Cut `door` through single blocking tiles until every floor tile can be reached from the
/// edge of the cell. Walls are cut before windows or anything else.
pub fn open_sealed_rooms(b: &mut CellBuilder, door: Terrain) {
    for _ in 0..MAX_CUT_DOORS {
        let Some(&start) = sealed_floor(&b.grid).first() else {
            return;
        };
        let reached = reachable_from_edge(&b.grid);
        let mut region = Tilemap::new_with(GRID_SIZE, GRID_SIZE, false);
        region.set(start, true);
        flood(&b.grid, &mut region, VecDeque::from([start]));

        let mut walls = Vec::new();
        let mut others = Vec::new();
        for p in reached.points() {
            if p.x <= 0 || p.y <= 0 || p.x >= EDGE || p.y >= EDGE || walkable(b.grid.ter(p)) {
                continue;
            }
            let joins = [(1, 0), (0, 1)].iter().any(|&(dx, dy)| {
                let (a, c) = (p.offset(-dx, -dy), p.offset(dx, dy));
                (reached.get(a) == Some(&true) && region.get(c) == Some(&true))
                    || (reached.get(c) == Some(&true) && region.get(a) == Some(&true))
            });
            if joins {
                if b.grid.ter(p).is_wall() {
                    walls.push(p);
                } else {
                    others.push(p);
                }
            }
        }
        let pool = if walls.is_empty() { others } else { walls };
        match b.choose(&pool) {
            Some(p) => {
                log::debug!("{} cut a door at {} into a sealed room", b.cell(), p);
                b.set(p.x, p.y, door);
            }
            None => {
                log::warn!("{} has floor at {} that no single door can reach", b.cell(), start);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes_and_measures() {
        let r = Rect::new(8, 9, 2, 3);
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (2, 3, 8, 9));
        assert_eq!(r.width(), 6);
        assert_eq!(r.interior_area(), 25);
        assert_eq!(r.center(), Point::new(5, 6));
    }

    #[test]
    fn test_wall_tiles_skip_corners() {
        let r = Rect::new(0, 0, 4, 3);
        let north = r.wall_tiles(Direction::North);
        assert_eq!(north.len(), 3);
        assert!(north.iter().all(|p| !r.is_corner(*p)));
        assert!(r.on_cell_edge(Direction::North));
        assert!(!r.on_cell_edge(Direction::East));
    }
}
