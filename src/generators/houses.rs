//! Family houses (with and without a basement stairwell) and parking lots.

use super::{grass_or_dirt, Registry};
use crate::builder::CellBuilder;
use crate::geometry::Direction;
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::{CellType, Network};
use crate::rooms::{house_room, open_sealed_rooms, HouseRoom, Rect};
use crate::terrain::Terrain;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register_rotations(&[HouseNorth, HouseEast, HouseSouth, HouseWest], house);
    r.register_rotations(&[HouseBaseNorth, HouseBaseEast, HouseBaseSouth, HouseBaseWest], house);
    r.register(ParkingLot, parking_lot);
}

/// Front doors are usually locked.
fn front_door(b: &mut CellBuilder) -> Terrain {
    if b.one_in(6) {
        Terrain::DoorClosed
    } else {
        Terrain::DoorLocked
    }
}

/// Outer walls of a house, as drawn by [`house`].
#[derive(Clone, Copy, Debug)]
struct Walls {
    /// West
    lw: i32,
    /// East
    rw: i32,
    /// North, the street side
    tw: i32,
    /// South
    bw: i32,
}

/// A house facing north, onto the street. One of three floor plans; the basement
/// variant adds a stairwell along the back wall.
pub fn house(b: &mut CellBuilder) {
    let span = GRID_SIZE as i32;
    let lw = b.rng(0, 4);
    let rw = span - b.rng(1, 5);
    let tw = b.rng(1, 6);
    let bw = span - b.rng(2, 5);

    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i > lw && i < rw && j > tw && j < bw {
                Terrain::Floor
            } else {
                grass_or_dirt(&mut b.rng)
            };
            b.set(i, j, t);
            if i >= lw && i <= rw && (j == tw || j == bw) {
                b.set(i, j, Terrain::WallH);
            }
            if (i == lw || i == rw) && j > tw && j < bw {
                b.set(i, j, Terrain::WallV);
            }
        }
    }
    let walls = Walls { lw, rw, tw, bw };

    let back_wall = match b.rng(1, 3) {
        1 => {
            quadrant_plan(b, walls);
            bw
        }
        2 => {
            // A fenced backyard may take the back of the lot, moving the back wall forward.
            let back = bw - b.rng(4, 6);
            let cw = tw + b.rng(3, 6);
            let mw = b.rng(lw + 7, rw - 4);
            let back = if tw <= 3 && ((back - 3) - cw).abs() >= 3 {
                house_room(b, HouseRoom::Backyard, Rect::new(lw, back + 1, rw, span - 2));
                b.set((lw + mw) / 2, back, Terrain::DoorClosed);
                back
            } else {
                bw
            };
            simple_plan(b, Walls { bw: back, ..walls }, mw, cw);
            back
        }
        _ => {
            hallway_plan(b, walls);
            bw
        }
    };

    if b.rng(2, 7) < tw {
        // Big front yard has a chance for a fence
        b.line(Terrain::FenceH, lw, 0, rw, 0);
        for i in 1..tw {
            b.set(lw, i, Terrain::FenceV);
            b.set(rw, i, Terrain::FenceV);
        }
        let hole = b.rng(SEE - 3, SEE + 2);
        b.set(hole, 0, Terrain::Dirt);
        b.set(hole + 1, 0, Terrain::Dirt);
        if b.one_in(tw) {
            b.set(hole - 1, 1, Terrain::TreeYoung);
            b.set(hole + 2, 1, Terrain::TreeYoung);
        }
    }

    open_sealed_rooms(b, Terrain::DoorClosed);

    if matches!(b.cell(), CellType::HouseBaseNorth) {
        basement_stairs(b, lw, rw, back_wall);
    }
}

/// Living room and kitchen up front, bedroom and bathroom behind.
fn quadrant_plan(b: &mut CellBuilder, w: Walls) {
    let Walls { lw, rw, tw, bw } = w;
    let mut mw = b.rng(lw + 5, rw - 5);
    let cw = tw + b.rng(4, 7);
    house_room(b, HouseRoom::Living, Rect::new(mw, tw, rw, cw));
    house_room(b, HouseRoom::Kitchen, Rect::new(lw, tw, mw, cw));
    let y = b.rng(tw + 2, cw - 2);
    let between = if b.one_in(3) { Terrain::DoorClosed } else { Terrain::Floor };
    b.set(mw, y, between);
    let mut rn = b.rng(lw + 1, cw - 2);
    b.set(rn, tw, Terrain::Window);
    b.set(rn + 1, tw, Terrain::Window);
    rn = b.rng(cw + 1, rw - 2);
    b.set(rn, tw, Terrain::Window);
    b.set(rn + 1, tw, Terrain::Window);

    mw = b.rng(lw + 3, rw - 3);
    if mw <= lw + 5 {
        // Bedroom on the right, bathroom on the left
        rn = b.rng(cw + 2, rw - 2);
        if bw - cw >= 10 && mw - lw >= 6 {
            house_room(b, HouseRoom::Bathroom, Rect::new(lw, bw - 5, mw, bw));
            house_room(b, HouseRoom::Bedroom, Rect::new(lw, cw, mw, bw - 5));
            b.set(mw - 1, cw, Terrain::DoorClosed);
        } else if bw - cw > 4 {
            // Too big for a bathroom, not big enough for a second bedroom
            house_room(b, HouseRoom::Bathroom, Rect::new(lw, bw - 4, mw, bw));
            b.line(Terrain::Floor, lw + 1, cw, mw - 1, cw);
        } else {
            house_room(b, HouseRoom::Bathroom, Rect::new(lw, cw, mw, bw));
        }
        house_room(b, HouseRoom::Bedroom, Rect::new(mw, cw, rw, bw));
    } else {
        // Bedroom on the left, bathroom on the right
        rn = b.rng(lw + 2, cw - 2);
        if bw - cw >= 10 && rw - mw >= 6 {
            house_room(b, HouseRoom::Bathroom, Rect::new(mw, bw - 5, rw, bw));
            house_room(b, HouseRoom::Bedroom, Rect::new(mw, cw, rw, bw - 5));
            b.set(rw - 1, cw, Terrain::DoorClosed);
        } else if bw - cw > 4 {
            house_room(b, HouseRoom::Bathroom, Rect::new(mw, bw - 4, rw, bw));
            b.line(Terrain::Floor, mw + 1, cw, rw - 1, cw);
        } else {
            house_room(b, HouseRoom::Bathroom, Rect::new(mw, cw, rw, bw));
        }
        house_room(b, HouseRoom::Bedroom, Rect::new(lw, cw, mw, bw));
    }
    let y = b.rng(bw - 4, bw - 1);
    b.set(mw, y, Terrain::DoorClosed);
    b.set(rn, bw, Terrain::Window);
    b.set(rn + 1, bw, Terrain::Window);
    for side in [rw, lw] {
        // Potential side windows
        if !b.one_in(3) {
            rn = b.rng(tw + 2, bw - 5);
            b.set(side, rn, Terrain::Window);
            b.set(side, rn + 4, Terrain::Window);
        }
    }
    let x = b.rng(lw + 1, lw + 2);
    b.set(x, cw, Terrain::DoorClosed);
    if b.one_in(4) {
        b.set(rw - 2, cw, Terrain::DoorClosed);
    } else {
        let y = b.rng(cw + 1, bw - 1);
        b.set(mw, y, Terrain::DoorClosed);
    }
    // Main door, sometimes a side door too
    let (door_lo, door_hi, side) = if b.one_in(2) { (lw + 2, cw - 1, rw) } else { (cw + 1, rw - 2, lw) };
    let x = b.rng(door_lo, door_hi);
    let door = front_door(b);
    b.set(x, tw, door);
    if b.one_in(5) {
        let y = b.rng(tw + 2, cw - 2);
        let door = front_door(b);
        b.set(side, y, door);
    }
}

/// Long living room across the front, bedroom and kitchen behind it, bathroom in the
/// back corner. `w.bw` is the back wall of the living space.
fn simple_plan(b: &mut CellBuilder, w: Walls, mw: i32, cw: i32) {
    let Walls { lw, rw, tw, bw } = w;
    house_room(b, HouseRoom::Living, Rect::new(lw, tw, rw, cw));
    house_room(b, HouseRoom::Kitchen, Rect::new(mw, cw, rw, bw - 3));
    house_room(b, HouseRoom::Bedroom, Rect::new(lw, cw, mw, bw));
    house_room(b, HouseRoom::Bathroom, Rect::new(mw, bw - 3, rw, bw));

    // Opening between kitchen and living room
    let mut rn = b.rng(mw + 1, rw - 3);
    b.set(rn, cw, Terrain::Floor);
    b.set(rn + 1, cw, Terrain::Floor);
    rn = b.rng(2, 5);
    for x in [lw + rn, lw + rn + 1, rw - rn, rw - rn + 1] {
        b.set(x, tw, Terrain::Window);
    }
    let x = b.rng(lw + 4, rw - 4);
    let door = front_door(b);
    b.set(x, tw, door);
    if b.one_in(3) {
        // Kitchen windows
        rn = b.rng(cw + 1, bw - 5);
        b.set(rw, rn, Terrain::Window);
        b.set(rw, rn + 1, Terrain::Window);
    }
    if b.one_in(3) {
        // Bedroom windows
        rn = b.rng(cw + 1, bw - 2);
        b.set(lw, rn, Terrain::Window);
        b.set(lw, rn + 1, Terrain::Window);
    }
    if b.one_in(4) {
        let x = b.rng(lw + 1, mw - 1);
        b.set(x, cw, Terrain::DoorClosed);
    } else {
        let y = b.rng(cw + 3, bw - 4);
        b.set(mw, y, Terrain::DoorClosed);
    }
    if b.one_in(4) {
        b.set(mw, bw - 1, Terrain::DoorClosed);
    } else {
        let x = b.rng(mw + 2, rw - 2);
        b.set(x, bw - 3, Terrain::DoorClosed);
    }
    // Back windows
    rn = b.rng(lw + 1, mw - 2);
    b.set(rn, bw, Terrain::Window);
    b.set(rn + 1, bw, Terrain::Window);
    rn = b.rng(mw + 1, rw - 1);
    b.set(rn, bw, Terrain::Window);
}

/// A hallway runs from the front door between the two front rooms.
fn hallway_plan(b: &mut CellBuilder, w: Walls) {
    let Walls { lw, rw, tw, bw } = w;
    let mw = (lw + rw) / 2;
    let cw = bw - b.rng(5, 7);
    let door = front_door(b);
    b.set(mw, tw, door);
    if b.one_in(4) {
        b.set(mw - 1, tw, Terrain::Window);
        b.set(mw + 1, tw, Terrain::Window);
    }
    for i in tw + 1..cw {
        b.set(mw - 2, i, Terrain::WallV);
        b.set(mw + 2, i, Terrain::WallV);
    }
    let (west, east) = if b.one_in(2) {
        (HouseRoom::Living, HouseRoom::Kitchen)
    } else {
        (HouseRoom::Kitchen, HouseRoom::Living)
    };
    house_room(b, west, Rect::new(lw, tw, mw - 2, cw));
    house_room(b, east, Rect::new(mw + 2, tw, rw, cw));

    let mut rn = b.rng(lw + 1, mw - 4);
    b.set(rn, tw, Terrain::Window);
    b.set(rn + 1, tw, Terrain::Window);
    rn = b.rng(mw + 3, rw - 2);
    b.set(rn, tw, Terrain::Window);
    b.set(rn + 1, tw, Terrain::Window);
    for side in [lw, rw] {
        if b.one_in(4) {
            rn = b.rng(tw + 1, cw - 2);
            b.set(side, rn, Terrain::Window);
            b.set(side, rn + 1, Terrain::Window);
        }
    }

    if b.one_in(2) {
        house_room(b, HouseRoom::Bedroom, Rect::new(lw, cw, rw - 3, bw));
        house_room(b, HouseRoom::Bathroom, Rect::new(rw - 3, cw, rw, bw));
        let x = b.rng(lw + 2, mw - 3);
        b.set(x, cw, Terrain::DoorClosed);
        if b.one_in(4) {
            let x = b.rng(rw - 2, rw - 1);
            b.set(x, cw, Terrain::DoorClosed);
        } else {
            let y = b.rng(cw + 2, bw - 2);
            b.set(rw - 3, y, Terrain::DoorClosed);
        }
        rn = b.rng(lw + 1, rw - 5);
        b.set(rn, bw, Terrain::Window);
        b.set(rn + 1, bw, Terrain::Window);
        if b.one_in(4) {
            let x = b.rng(rw - 2, rw - 1);
            b.set(x, bw, Terrain::Window);
        } else {
            // The side window row is rolled but never placed.
            let _ = b.rng(cw + 1, bw - 1);
        }
    } else {
        house_room(b, HouseRoom::Bathroom, Rect::new(lw, cw, lw + 3, bw));
        house_room(b, HouseRoom::Bedroom, Rect::new(lw + 3, cw, rw, bw));
        if b.one_in(4) {
            let x = b.rng(lw + 1, lw + 2);
            b.set(x, cw, Terrain::DoorClosed);
        } else {
            let y = b.rng(cw + 2, bw - 2);
            b.set(lw + 3, y, Terrain::DoorClosed);
        }
        rn = b.rng(lw + 4, rw - 2);
        b.set(rn, bw, Terrain::Window);
        b.set(rn + 1, bw, Terrain::Window);
        if b.one_in(4) {
            let x = b.rng(lw + 1, lw + 2);
            b.set(x, bw, Terrain::Window);
        } else {
            let _ = b.rng(cw + 1, bw - 1);
        }
    }
    // Doors off the sides of the hallway
    let y = b.rng(tw + 3, cw - 3);
    b.set(mw - 2, y, Terrain::DoorClosed);
    let y = b.rng(tw + 3, cw - 3);
    b.set(mw + 2, y, Terrain::DoorClosed);
    b.set(mw, cw, Terrain::DoorClosed);
}

/// Stairs down on a floor tile just inside the back wall.
fn basement_stairs(b: &mut CellBuilder, lw: i32, rw: i32, bw: i32) {
    let y = bw - 1;
    let floors: Vec<i32> = (lw + 1..rw).filter(|&x| b.ter(x, y) == Terrain::Floor).collect();
    match b.choose(&floors) {
        Some(x) => b.set(x, y, Terrain::StairsDown),
        None => {
            log::warn!("house basement found no floor along row {}, forcing stairs", y);
            b.set((lw + rw) / 2, y, Terrain::StairsDown);
        }
    }
}

/// Striped parking spaces, turned so the entrance faces an adjacent road.
fn parking_lot(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if matches!(j, 5 | 9 | 13 | 17 | 21) && ((i > 1 && i < 8) || (i > 14 && i < EDGE - 1)) {
                Terrain::PavementYellow
            } else if (j < 2 && i > 7 && i < 17) || (j >= 2 && j < EDGE - 1 && i > 1 && i < EDGE - 1) {
                Terrain::Pavement
            } else {
                grass_or_dirt(&mut b.rng)
            };
            b.set(i, j, t);
        }
    }
    b.place_items("road", 8, 0, 0, EDGE, EDGE, false);
    let facing = [(Direction::East, 1), (Direction::South, 2), (Direction::West, 3)]
        .into_iter()
        .find(|&(dir, _)| b.neighbor(dir).is_network(Network::Road));
    if let Some((_, turns)) = facing {
        b.rotate(turns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    fn registry() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        r
    }

    #[test]
    fn test_house_is_enclosed_with_a_front_door() {
        for seed in 0..30 {
            with_builder(CellType::HouseNorth, Neighbors::default(), seed, |b| {
                house(b);
                assert!(b.grid.unset_tiles().is_empty());
                let doors = b.grid.count_terrain(Terrain::DoorClosed) + b.grid.count_terrain(Terrain::DoorLocked);
                assert!(doors >= 2, "seed {}", seed);
                assert!(b.grid.count_terrain(Terrain::Bed) > 0);
                assert!(b.grid.count_terrain(Terrain::Toilet) > 0);
            });
        }
    }

    #[test]
    fn test_east_house_is_north_house_rotated() {
        let registry = registry();
        for seed in 0..10 {
            let expected = with_builder(CellType::HouseNorth, Neighbors::default(), seed, |b| {
                registry.generate(b);
                b.rotate(1);
                b.grid.clone()
            });
            let actual = with_builder(CellType::HouseEast, Neighbors::default(), seed, |b| {
                registry.generate(b);
                b.grid.clone()
            });
            assert_eq!(expected, actual, "seed {}", seed);
        }
    }

    #[test]
    fn test_basement_variant_has_stairs() {
        let registry = registry();
        for seed in 0..20 {
            with_builder(CellType::HouseBaseSouth, Neighbors::default(), seed, |b| {
                registry.generate(b);
                assert_eq!(b.grid.count_terrain(Terrain::StairsDown), 1);
            });
        }
        with_builder(CellType::HouseNorth, Neighbors::default(), 3, |b| {
            registry.generate(b);
            assert_eq!(b.grid.count_terrain(Terrain::StairsDown), 0);
        });
    }

    #[test]
    fn test_parking_lot_turns_towards_road() {
        let west_road = Neighbors::new(CellType::Field, CellType::Field, CellType::Field, CellType::RoadNs);
        with_builder(CellType::ParkingLot, west_road, 1, |b| {
            parking_lot(b);
            // The entrance gap at the top edge ends up on the west edge.
            assert_eq!(b.ter(0, SEE), Terrain::Pavement);
        });
        with_builder(CellType::ParkingLot, Neighbors::default(), 1, |b| {
            parking_lot(b);
            assert_eq!(b.ter(SEE, 0), Terrain::Pavement);
            assert_eq!(b.ter(5, 5), Terrain::PavementYellow);
        });
    }
}
