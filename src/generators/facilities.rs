//! Missile silos, military bunkers, mine shafts and private basements.

use super::{grass_or_dirt, pick_tile, Registry};
use crate::builder::CellBuilder;
use crate::entities::{ComputerAction, ComputerFailure};
use crate::geometry::{trig_dist, Direction, Point};
use crate::grid::{EDGE, SEE};
use crate::overmap::CellType;
use crate::rooms::{bunker_room, open_sealed_rooms, silo_rooms, BunkerRoom, Rect};
use crate::terrain::{FieldKind, Terrain, Trap};

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register(Silo, silo);
    r.register(SiloFinale, silo_finale);
    r.register(Bunker, bunker);
    r.register(MineEntrance, mine_entrance);
    r.register(MineShaft, mine_shaft);
    r.register(Basement, basement);
}

fn silo(b: &mut CellBuilder) {
    let center = Point::new(SEE, SEE);
    if b.above() == CellType::Null {
        for i in 0..=EDGE {
            for j in 0..=EDGE {
                let t = if trig_dist(Point::new(i, j), center) <= 6 {
                    Terrain::MetalFloor
                } else {
                    grass_or_dirt(&mut b.rng)
                };
                b.set(i, j, t);
            }
        }
        // Stair hut in one of the four corners, door on the side facing the silo.
        let (lw, mw, tw) = match b.rng(1, 4) {
            1 => (3, 5, 3),
            2 => (3, 5, EDGE - 3),
            3 => (EDGE - 6, EDGE - 6, 3),
            _ => (EDGE - 6, EDGE - 6, EDGE - 3),
        };
        b.line(Terrain::WallH, lw, tw, lw + 2, tw);
        b.line(Terrain::WallH, lw, tw + 2, lw + 2, tw + 2);
        b.set(lw, tw + 1, Terrain::WallV);
        b.set(lw + 1, tw + 1, Terrain::StairsDown);
        b.set(lw + 2, tw + 1, Terrain::WallV);
        b.set(mw, tw + 1, Terrain::DoorMetalLocked);
        b.set(mw, tw + 2, Terrain::CardReaderMilitary);
        return;
    }

    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let d = trig_dist(Point::new(i, j), center);
            if d > 7 {
                b.set(i, j, Terrain::Rock);
            } else if d > 5 {
                b.set(i, j, Terrain::MetalFloor);
                if b.one_in(30) {
                    b.add_field(i, j, FieldKind::NukeGas, 2);
                }
            } else if d == 5 {
                b.set(i, j, Terrain::Hole);
                b.set_trap(i, j, Trap::Ledge);
            } else {
                b.set(i, j, Terrain::Missile);
            }
        }
    }
    silo_rooms(b);
}

/// Launch control: a rock chamber overlooking the missile through a glass wall.
fn silo_finale(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i == 5 {
                if j > 4 && j < SEE {
                    Terrain::ReinforcedGlassV
                } else if j == EDGE - 3 {
                    Terrain::DoorMetalClosed
                } else {
                    Terrain::Rock
                }
            } else {
                Terrain::RockFloor
            };
            b.set(i, j, t);
        }
    }
    b.set(0, 0, Terrain::StairsUp);
    if let Some(c) = b.add_computer(4, 5, "Missile Controls", 3) {
        c.add_option("Launch Missile", ComputerAction::MissileLaunch, 10)
            .add_option("Disarm Missile", ComputerAction::MissileDisarm, 8)
            .add_failure(ComputerFailure::Secubots)
            .add_failure(ComputerFailure::Damage);
    }
}

/// Fenced compound of concrete rooms around a paved yard.
fn compound(b: &mut CellBuilder, yard: Terrain) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if j == 0 || j == EDGE {
                Terrain::FenceH
            } else if i == 0 || i == EDGE {
                Terrain::FenceV
            } else {
                yard
            };
            b.set(i, j, t);
        }
    }
    b.line(yard, SEE - 1, EDGE, SEE, EDGE);
}

fn bunker(b: &mut CellBuilder) {
    compound(b, Terrain::Pavement);
    bunker_room(b, BunkerRoom::Storage, Rect::new(2, 2, 7, 8));
    bunker_room(b, BunkerRoom::Command, Rect::new(9, 2, 14, 8));
    bunker_room(b, BunkerRoom::Housing, Rect::new(16, 2, 21, 10));
    bunker_room(b, BunkerRoom::Office, Rect::new(2, 10, 7, 15));
    bunker_room(b, BunkerRoom::FuelDepot, Rect::new(13, 14, 21, 20));
    for x in [SEE - 3, SEE + 2] {
        b.add_spawn("mon_turret", 1, x, EDGE - 2);
    }
    b.place_items("mil_surplus", 20, 1, 1, EDGE - 1, EDGE - 1, false);
    open_sealed_rooms(b, Terrain::DoorMetalClosed);
}

fn mine_entrance(b: &mut CellBuilder) {
    compound(b, Terrain::Dirt);
    bunker_room(b, BunkerRoom::Office, Rect::new(2, 2, 7, 7));
    let store = Rect::new(16, 2, 21, 7).inner();
    bunker_room(b, BunkerRoom::Storage, Rect::new(16, 2, 21, 7));
    b.place_items("mine_equipment", 70, store.x1, store.y1, store.x2, store.y2, false);
    // Rooms never share a wall.
    bunker_room(b, BunkerRoom::Housing, Rect::new(2, 17, 9, 21));
    bunker_room(b, BunkerRoom::FuelDepot, Rect::new(14, 17, 21, 21));
    bunker_room(b, BunkerRoom::Shaft, Rect::new(8, 8, 15, 15));
    open_sealed_rooms(b, Terrain::DoorMetalClosed);
}

/// The bottom of the elevator: a chamber in the rock with drifts towards neighboring mines.
fn mine_shaft(b: &mut CellBuilder) {
    b.fill(Terrain::Rock);
    b.square(Terrain::RockFloor, SEE - 5, SEE - 5, SEE + 4, SEE + 4);
    bunker_room(b, BunkerRoom::Shaft, Rect::new(SEE - 3, SEE - 3, SEE + 2, SEE + 2));
    for dir in Direction::ALL {
        if !b.neighbor(dir).is_mine() {
            continue;
        }
        match dir {
            Direction::North => b.square(Terrain::RockFloor, SEE - 1, 0, SEE, SEE - 5),
            Direction::South => b.square(Terrain::RockFloor, SEE - 1, SEE + 4, SEE, EDGE),
            Direction::West => b.square(Terrain::RockFloor, 0, SEE - 1, SEE - 5, SEE),
            Direction::East => b.square(Terrain::RockFloor, SEE + 4, SEE - 1, EDGE, SEE),
        }
    }
    b.place_items("mine_equipment", 60, SEE - 5, SEE - 5, SEE + 4, SEE + 4, false);
    if b.one_in(3) {
        if let Some((x, y)) = pick_tile(b, SEE - 5, SEE - 5, SEE + 4, SEE + 4, |t| t == Terrain::RockFloor) {
            b.add_item(x, y, "corpse");
            b.place_items("mine_equipment", 80, x, y, x, y, false);
        }
    }
}

/// Rock cellar under a house, reached by the stairs along its south wall.
fn basement(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i == 0 || j == 0 || i == EDGE || j == EDGE {
                Terrain::Rock
            } else {
                Terrain::RockFloor
            };
            b.set(i, j, t);
        }
    }
    match b.rng(1, 4) {
        // Weapons cache
        1 => {
            for y in [1, 5, 9] {
                b.line(Terrain::Rack, 2, y, EDGE - 2, y);
            }
            b.place_items("allguns", 92, 2, 1, EDGE - 2, 1, false);
            b.place_items("ammo", 94, 2, 5, EDGE - 2, 5, false);
            b.place_items("weapons", 88, 2, 9, EDGE - 2, 9, false);
        }
        // Survival bunker
        2 => {
            b.line(Terrain::Bed, 1, 1, 1, 2);
            b.line(Terrain::Bed, EDGE - 1, 1, EDGE - 1, 2);
            b.square(Terrain::Rack, SEE - 1, 1, SEE, SEE - 1);
            b.place_items("softdrugs", 86, SEE - 1, 1, SEE, 2, false);
            b.place_items("cannedfood", 92, SEE - 1, 3, SEE, 6, false);
            b.place_items("homeguns", 72, SEE - 1, 7, SEE, 7, false);
            b.place_items("survival_tools", 83, SEE - 1, 8, SEE, 10, false);
            b.place_items("manuals", 60, SEE - 1, 11, SEE, 11, false);
        }
        // Chem lab
        3 => {
            b.line(Terrain::Counter, 1, 1, 1, SEE + 3);
            b.line(Terrain::Counter, EDGE - 1, 1, EDGE - 1, SEE + 3);
            b.place_items("chemistry", 90, 1, 1, 1, SEE + 3, false);
            let other = if b.one_in(3) { "chemistry" } else { "electronics" };
            b.place_items(other, 90, EDGE - 1, 1, EDGE - 1, SEE + 3, false);
        }
        _ => {}
    }
    b.line(Terrain::StairsUp, SEE - 1, EDGE - 1, SEE, EDGE - 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    #[test]
    fn test_surface_silo_has_locked_stair_hut() {
        for seed in 0..8 {
            with_builder(CellType::Silo, Neighbors::default(), seed, |b| {
                silo(b);
                assert_eq!(b.grid.count_terrain(Terrain::StairsDown), 1);
                assert_eq!(b.grid.count_terrain(Terrain::DoorMetalLocked), 1);
                assert_eq!(b.grid.count_terrain(Terrain::CardReaderMilitary), 1);
                assert_eq!(b.ter(SEE, SEE), Terrain::MetalFloor);
            });
        }
    }

    #[test]
    fn test_underground_silo_ring() {
        with_builder(CellType::Silo, Neighbors::default(), 4, |b| {
            b.ctx.above = CellType::Silo;
            silo(b);
            assert_eq!(b.ter(SEE, SEE), Terrain::Missile);
            assert_eq!(b.ter(SEE + 5, SEE), Terrain::Hole);
            assert_eq!(b.grid.trap(Point::new(SEE + 5, SEE)), Trap::Ledge);
            assert_eq!(b.grid.count_terrain(Terrain::StairsUp), 1);
            assert_eq!(b.grid.count_terrain(Terrain::StairsDown), 1);
        });
    }

    #[test]
    fn test_silo_finale_controls() {
        with_builder(CellType::SiloFinale, Neighbors::default(), 1, |b| {
            silo_finale(b);
            let comp = &b.grid.computers()[0];
            assert_eq!(comp.name, "Missile Controls");
            assert!(comp.options.iter().any(|o| o.action == ComputerAction::MissileLaunch));
            assert_eq!(b.ter(5, 6), Terrain::ReinforcedGlassV);
        });
    }

    #[test]
    fn test_bunker_compound() {
        for seed in 0..6 {
            with_builder(CellType::Bunker, Neighbors::default(), seed, |b| {
                bunker(b);
                assert!(b.grid.unset_tiles().is_empty());
                assert_eq!(b.grid.count_terrain(Terrain::Elevator), 1);
                assert_eq!(b.ter(SEE, EDGE), Terrain::Pavement);
                assert_eq!(b.grid.spawns().len(), 2);
            });
        }
    }

    #[test]
    fn test_mine_shaft_drifts_toward_mines() {
        let east_mine = Neighbors::new(CellType::Rock, CellType::Mine, CellType::Rock, CellType::Rock);
        with_builder(CellType::MineShaft, east_mine, 2, |b| {
            mine_shaft(b);
            assert_eq!(b.ter(EDGE, SEE), Terrain::RockFloor);
            assert_eq!(b.ter(0, SEE), Terrain::Rock);
            assert_eq!(b.grid.count_terrain(Terrain::Elevator), 1);
        });
    }

    #[test]
    fn test_basement_always_has_stairs() {
        for seed in 0..12 {
            with_builder(CellType::Basement, Neighbors::default(), seed, |b| {
                basement(b);
                assert_eq!(b.grid.count_terrain(Terrain::StairsUp), 2);
                assert_eq!(b.ter(0, 0), Terrain::Rock);
            });
        }
    }
}
