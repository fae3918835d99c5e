//! Concrete rooms for military bunkers and mine shaft entrances.

use super::{door_side, walkable, Rect};
use crate::builder::CellBuilder;
use crate::entities::{ComputerAction, ComputerFailure};
use crate::geometry::{Direction, Point};
use crate::terrain::Terrain;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BunkerRoom {
    /// Elevator with the main control terminal.
    Command,
    /// Bare elevator shaft with a call terminal.
    Shaft,
    Office,
    Storage,
    FuelDepot,
    Housing,
}

/// Wall `r` in concrete, floor it, cut an entrance and furnish it as `kind`.
/// Returns the entrance tile.
pub fn bunker_room(b: &mut CellBuilder, kind: BunkerRoom, r: Rect) -> Point {
    b.square(Terrain::Floor, r.x1, r.y1, r.x2, r.y2);
    b.walled_box(Terrain::ConcreteWallH, Terrain::ConcreteWallV, r.x1, r.y1, r.x2, r.y2);

    let (side, door) = entrance(b, r);
    let door_ter = if kind == BunkerRoom::Storage {
        Terrain::DoorMetalLocked
    } else {
        Terrain::DoorMetalClosed
    };
    b.set(door.x, door.y, door_ter);

    let inner = r.inner();
    match kind {
        BunkerRoom::Command | BunkerRoom::Shaft => {
            let c = inner.center();
            b.set(c.x, c.y, Terrain::Elevator);
            let console = if inner.contains(c.offset(1, 0)) { c.offset(1, 0) } else { c.offset(0, 1) };
            let (name, security) = if kind == BunkerRoom::Command {
                ("Bunker Command Terminal", 3)
            } else {
                ("Elevator Control", 0)
            };
            if let Some(comp) = b.add_computer(console.x, console.y, name, security) {
                comp.add_option("Call Elevator", ComputerAction::ElevatorOn, 0);
                if kind == BunkerRoom::Command {
                    comp.add_option("Download Map Data", ComputerAction::Maps, 2)
                        .add_option("Personnel Records", ComputerAction::Records, 3)
                        .add_failure(ComputerFailure::Alarm)
                        .add_failure(ComputerFailure::Secubots);
                }
            }
        }
        BunkerRoom::Office => {
            let c = inner.center();
            b.line(Terrain::Desk, c.x - 1, c.y, c.x + 1, c.y);
            b.set(c.x, c.y + 1, Terrain::Chair);
            b.place_items("bunker_office", 70, c.x - 1, c.y, c.x + 1, c.y, false);
            for window_side in Direction::ALL {
                if window_side == side || r.on_cell_edge(window_side) {
                    continue;
                }
                for p in r.wall_tiles(window_side).into_iter().skip(1).step_by(3) {
                    b.set(p.x, p.y, Terrain::Window);
                }
            }
        }
        BunkerRoom::Storage => {
            // Racks on alternate rows, kept clear of the entrance.
            for y in (inner.y1..=inner.y2).step_by(2) {
                for x in inner.x1 + 1..inner.x2 {
                    if !next_to(Point::new(x, y), door) {
                        b.set(x, y, Terrain::Rack);
                    }
                }
            }
            b.place_items("bunker_storage", 85, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        BunkerRoom::FuelDepot => {
            for p in r.wall_tiles(side) {
                b.set(p.x, p.y, Terrain::Pavement);
            }
            let pumps: Vec<Point> = match side {
                Direction::North | Direction::South => {
                    let y = if side == Direction::North { inner.y2 } else { inner.y1 };
                    (inner.x1..=inner.x2).step_by(3).map(|x| Point::new(x, y)).collect()
                }
                Direction::East | Direction::West => {
                    let x = if side == Direction::West { inner.x2 } else { inner.x1 };
                    (inner.y1..=inner.y2).step_by(3).map(|y| Point::new(x, y)).collect()
                }
            };
            for p in pumps {
                b.set(p.x, p.y, Terrain::GasPump);
            }
        }
        BunkerRoom::Housing => {
            for y in (inner.y1..inner.y2).step_by(3) {
                b.set(inner.x1, y, Terrain::Bed);
                b.set(inner.x1, y + 1, Terrain::Dresser);
                b.place_items("dresser", 70, inner.x1, y + 1, inner.x1, y + 1, false);
                if inner.x2 > inner.x1 + 2 {
                    b.set(inner.x2, y, Terrain::Bed);
                    b.set(inner.x2, y + 1, Terrain::Dresser);
                    b.place_items("dresser", 70, inner.x2, y + 1, inner.x2, y + 1, false);
                }
            }
        }
    }
    door
}

/// Door side and tile. Only wall tiles with open ground outside them qualify; the preferred
/// side is tried first, then the other inner sides.
fn entrance(b: &mut CellBuilder, r: Rect) -> (Direction, Point) {
    let preferred = door_side(b, r);
    let sides = std::iter::once(preferred).chain(
        Direction::ALL
            .iter()
            .copied()
            .filter(|&side| side != preferred && !r.on_cell_edge(side)),
    );
    for side in sides {
        let (dx, dy) = side.delta();
        let open: Vec<Point> = r
            .wall_tiles(side)
            .into_iter()
            .filter(|p| walkable(b.grid.ter(p.offset(dx, dy))))
            .collect();
        if let Some(door) = b.choose(&open) {
            return (side, door);
        }
    }
    let wall = r.wall_tiles(preferred);
    let door = b.choose(&wall).unwrap_or_else(|| r.center());
    (preferred, door)
}

fn next_to(p: Point, door: Point) -> bool {
    (p.x - door.x).abs() <= 1 && (p.y - door.y).abs() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::grid::EDGE;
    use crate::overmap::{CellType, Neighbors};

    const KINDS: [BunkerRoom; 6] = [
        BunkerRoom::Command,
        BunkerRoom::Shaft,
        BunkerRoom::Office,
        BunkerRoom::Storage,
        BunkerRoom::FuelDepot,
        BunkerRoom::Housing,
    ];

    #[test]
    fn test_door_never_on_outer_edge() {
        for seed in 0..50 {
            with_builder(CellType::Bunker, Neighbors::default(), seed, |b| {
                b.fill(Terrain::Rock);
                let r = Rect::new(0, 0, 9, 7);
                let door = bunker_room(b, KINDS[seed as usize % KINDS.len()], r);
                assert!(door.x > 0 && door.y > 0, "door at {}", door);
                assert!(!r.is_corner(door));
                assert!(door.x == r.x2 || door.y == r.y2);
            });
        }
    }

    #[test]
    fn test_door_never_faces_a_wall() {
        for seed in 0..40 {
            with_builder(CellType::MineEntrance, Neighbors::default(), seed, |b| {
                b.fill(Terrain::Dirt);
                b.line(Terrain::ConcreteWallH, 0, 16, EDGE, 16);
                let door = bunker_room(b, BunkerRoom::Shaft, Rect::new(8, 8, 15, 15));
                assert_ne!(door.y, 15, "seed {} door on the blocked south wall", seed);
                let outside = [(0, -1), (1, 0), (0, 1), (-1, 0)]
                    .iter()
                    .map(|&(dx, dy)| b.grid.ter(door.offset(dx, dy)))
                    .filter(|t| *t == Terrain::Dirt)
                    .count();
                assert_eq!(outside, 1);
            });
        }
    }

    #[test]
    fn test_storage_door_is_locked() {
        with_builder(CellType::Bunker, Neighbors::default(), 7, |b| {
            b.fill(Terrain::Rock);
            let door = bunker_room(b, BunkerRoom::Storage, Rect::new(12, 12, 20, 20));
            assert_eq!(b.grid.ter(door), Terrain::DoorMetalLocked);
            assert!(b.grid.count_terrain(Terrain::Rack) > 0);
        });
    }

    #[test]
    fn test_command_room_has_elevator_terminal() {
        with_builder(CellType::Bunker, Neighbors::default(), 8, |b| {
            b.fill(Terrain::Rock);
            bunker_room(b, BunkerRoom::Command, Rect::new(6, 6, 14, 12));
            assert_eq!(b.grid.count_terrain(Terrain::Elevator), 1);
            let comp = &b.grid.computers()[0];
            assert!(comp.options.iter().any(|o| o.action == ComputerAction::ElevatorOn));
        });
    }

    #[test]
    fn test_fuel_depot_opens_one_wall() {
        with_builder(CellType::Bunker, Neighbors::default(), 9, |b| {
            b.fill(Terrain::Rock);
            bunker_room(b, BunkerRoom::FuelDepot, Rect::new(4, 4, 16, 12));
            assert!(b.grid.count_terrain(Terrain::GasPump) >= 3);
            assert!(b.grid.count_terrain(Terrain::Pavement) >= 7);
        });
    }
}
