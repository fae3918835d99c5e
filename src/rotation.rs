//! Whole-cell rotation: tiles, entities and orientation-paired terrain move together.

use crate::geometry::Point;
use crate::grid::{TileGrid, EDGE};

/// Where a point ends up after `turns` clockwise quarter turns of the cell.
pub fn rotate_point(p: Point, turns: u8) -> Point {
    match turns % 4 {
        1 => Point::new(EDGE - p.y, p.x),
        2 => Point::new(EDGE - p.x, EDGE - p.y),
        3 => Point::new(p.y, EDGE - p.x),
        _ => p,
    }
}

/// Inverse of [`rotate_point`]: which point lands on `p`.
fn source_of(p: Point, turns: u8) -> Point {
    rotate_point(p, (4 - turns % 4) % 4)
}

impl TileGrid {
    /// Rotate the whole cell clockwise by `turns` quarter turns.
    ///
    /// Terrain, traps, fields, radiation and items move with their tile. On odd turns
    /// horizontal and vertical wall-like terrain swap to their counterpart. Spawns,
    /// computers and vehicles keep their identity; only positions change (their submap
    /// follows from the position) and vehicles turn with the cell.
    pub fn rotate(&mut self, turns: u8) {
        let turns = turns % 4;
        if turns == 0 {
            return;
        }
        let rotated = self.tiles().remap(|dst| source_of(dst, turns));
        let tiles = self.tiles_mut();
        *tiles = rotated;
        if turns % 2 == 1 {
            for (_, tile) in tiles.iter_mut() {
                if let Some(pair) = tile.terrain.orientation_pair() {
                    tile.terrain = pair;
                }
            }
        }

        let (spawns, computers, vehicles) = self.entities_mut();
        for s in spawns.iter_mut() {
            s.pos = rotate_point(s.pos, turns);
        }
        for c in computers.iter_mut() {
            c.pos = rotate_point(c.pos, turns);
        }
        for v in vehicles.iter_mut() {
            v.pos = rotate_point(v.pos, turns);
            v.facing = (v.facing + 90 * turns as i32).rem_euclid(360);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{SpawnRecord, VehiclePlacement};
    use crate::terrain::{FieldKind, Terrain, Trap};

    fn sample() -> TileGrid {
        let mut grid = TileGrid::new(5);
        grid.fill(Terrain::Grass);
        grid.set_ter(Point::new(2, 3), Terrain::WallH);
        grid.set_ter(Point::new(20, 1), Terrain::Fridge);
        grid.set_trap(Point::new(7, 19), Trap::Beartrap);
        grid.add_field(Point::new(11, 12), FieldKind::Blood, 2);
        grid.set_radiation(Point::new(0, 23), 14);
        grid.add_item(Point::new(20, 1), "milk", 5);
        grid.add_spawn(SpawnRecord::new("mon_zombie", 2, Point::new(3, 4)));
        grid.add_spawn(SpawnRecord::new("mon_dog", 1, Point::new(22, 13)));
        grid.add_computer(Point::new(14, 2), "Log Console", 2);
        grid.add_vehicle(VehiclePlacement::new("car", Point::new(6, 18), 0));
        grid
    }

    #[test]
    fn test_rotate_point_clockwise() {
        assert_eq!(rotate_point(Point::new(0, 0), 1), Point::new(23, 0));
        assert_eq!(rotate_point(Point::new(23, 0), 1), Point::new(23, 23));
        assert_eq!(rotate_point(Point::new(5, 2), 2), Point::new(18, 21));
        assert_eq!(rotate_point(Point::new(5, 2), 3), Point::new(2, 18));
        for turns in 0..4 {
            let p = Point::new(9, 4);
            assert_eq!(source_of(rotate_point(p, turns), turns), p);
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let original = sample();
        let mut grid = original.clone();
        for _ in 0..4 {
            grid.rotate(1);
        }
        assert_eq!(grid, original);

        let mut grid = original.clone();
        grid.rotate(3);
        grid.rotate(1);
        assert_eq!(grid, original);
    }

    #[test]
    fn test_rotation_moves_everything_together() {
        let mut grid = sample();
        grid.rotate(1);
        assert_eq!(grid.ter(Point::new(20, 2)), Terrain::WallV);
        assert_eq!(grid.ter(Point::new(22, 20)), Terrain::Fridge);
        assert_eq!(grid.items_at(Point::new(22, 20)).len(), 1);
        assert_eq!(grid.trap(Point::new(4, 7)), Trap::Beartrap);
        assert_eq!(grid.radiation(Point::new(0, 0)), 14);
        assert_eq!(grid.vehicles()[0].facing, 90);
        assert_eq!(grid.computers()[0].pos, Point::new(21, 14));
        assert!(grid.submap(3).computer().is_some());
    }

    #[test]
    fn test_rotation_conserves_entities() {
        let original = sample();
        for turns in 1..4 {
            let mut grid = original.clone();
            grid.rotate(turns);
            assert_eq!(grid.spawns().len(), original.spawns().len());
            assert_eq!(grid.vehicles().len(), original.vehicles().len());
            assert_eq!(grid.computers().len(), original.computers().len());
            assert_eq!(grid.total_items(), original.total_items());
            let per_submap: usize = grid.submaps().map(|s| s.spawns().count()).sum();
            assert_eq!(per_submap, original.spawns().len());
        }
    }

    #[test]
    fn test_half_turn_keeps_orientation() {
        let mut grid = sample();
        grid.rotate(2);
        assert_eq!(grid.ter(Point::new(21, 20)), Terrain::WallH);
    }
}
