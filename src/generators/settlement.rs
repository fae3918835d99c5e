//! Buildings of a survivor settlement. Most of them are laid out once and then turned to a
//! random orientation, so neighboring settlement cells do not all face the same way.

use super::{paint, Registry};
use crate::builder::CellBuilder;
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::CellType;
use crate::rooms::set_science_room;
use crate::terrain::Terrain;

const SPAN: i32 = GRID_SIZE as i32;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register(SetCenter, set_center);
    r.register(SetHouse, set_house);
    r.register(SetFood, set_food);
    r.register(SetWeapons, set_weapons);
    r.register(SetGuns, set_guns);
    r.register(SetClinic, set_clinic);
    r.register(SetClothing, set_clothing);
    r.register(SetGeneral, set_general);
    r.register(SetCasino, set_casino);
    r.register(SetLibrary, set_library);
    r.register(SetLab, set_lab);
    r.register(SetBionics, set_bionics);
}

/// Turn the finished layout by `rng(0, max_turns)` quarter turns.
fn random_facing(b: &mut CellBuilder, max_turns: i32) {
    let turns = b.rng(0, max_turns) % 4;
    b.rotate(turns as u8);
}

/// Village green with a notice board.
fn set_center(b: &mut CellBuilder) {
    let tw = b.rng(4, SPAN - 5);
    let lw = b.rng(4, SPAN - 5);
    b.fill(Terrain::Grass);
    b.square(Terrain::Bulletin, lw, tw, lw + 2, tw + 2);
    if b.one_in(4) {
        for (x, y) in [(lw - 1, tw - 1), (lw - 1, tw + 3), (lw + 3, tw - 1), (lw + 3, tw + 3)] {
            b.set(x, y, Terrain::TreeYoung);
        }
    }
    if b.one_in(6) {
        for (x, y) in [
            (0, 1),
            (1, 0),
            (0, EDGE - 1),
            (1, EDGE),
            (EDGE - 1, 0),
            (EDGE, 1),
            (EDGE - 1, EDGE),
            (EDGE, EDGE - 1),
        ] {
            b.set(x, y, Terrain::Tree);
        }
    }
}

/// Bunk house: six small bedrooms off a central hall, kitchen and living room to the south.
fn set_house(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if (i > 2 && i < SPAN - 3 && (j == 2 || j == SPAN - 3))
            || (((i > 3 && i < 11) || (i > 12 && i < 20)) && (j == 6 || j == 10 || j == 14))
        {
            Terrain::WallH
        } else if j > 2 && j < SPAN - 3 && (i == 3 || i == SPAN - 4) {
            if matches!(j, 4 | 8 | 12 | 17 | 18) {
                Terrain::Window
            } else {
                Terrain::WallV
            }
        } else if j > 2 && j < 14 && (i == 10 || i == 13) {
            if matches!(j, 4 | 8 | 12) {
                Terrain::DoorClosed
            } else {
                Terrain::WallV
            }
        } else if i > 2 && i < SPAN - 3 && j > 1 && j < SPAN - 2 {
            Terrain::Floor
        } else {
            Terrain::Grass
        };
        Some(t)
    });
    b.line(Terrain::DoorClosed, 11, SPAN - 3, 12, SPAN - 3);
    for x in [5, 6, 17, 18] {
        b.set(x, SPAN - 3, Terrain::Window);
    }
    // Rear wall
    match b.rng(0, 3) {
        1 | 2 => b.line(Terrain::Window, 11, 2, 12, 2),
        3 => b.line(Terrain::DoorClosed, 11, 2, 12, 2),
        _ => {}
    }
    let (fx, fy) = (4 + 15 * b.rng(0, 1), 15 + 5 * b.rng(0, 1));
    b.set(fx, fy, Terrain::Fridge);

    for j in 4..=11 {
        for i in [4, 19] {
            // Right-hand rooms are mirrored so beds never block the door.
            let e = if i == 19 { -1 } else { 1 };
            let pieces: &[(i32, i32, Terrain)] = match b.rng(1, 10) {
                1 => &[(0, 0, Terrain::Bed), (0, 1, Terrain::Bed), (0, 2, Terrain::Dresser)],
                2 => &[(0, 0, Terrain::Dresser), (0, 1, Terrain::Bed), (0, 2, Terrain::Bed)],
                3 => &[(0, 0, Terrain::Bed), (1, 0, Terrain::Bed), (2, 0, Terrain::Dresser)],
                4 => &[(0, 0, Terrain::Bed), (0, 1, Terrain::Bed), (1, 0, Terrain::Bed)],
                5 => &[(0, 0, Terrain::Bed), (1, 0, Terrain::Bed), (0, 2, Terrain::Dresser)],
                _ => &[],
            };
            for &(dx, dy, t) in pieces {
                b.set(i + e * dx, j + dy, t);
            }
        }
        b.place_items("bedroom", 80, 4, j, 9, j + 2, false);
        b.place_items("bedroom", 80, 14, j, 19, j + 2, false);
    }
    b.place_items("livingroom", 40, 5, 15, 10, 16, false);
    b.place_items("kitchen", 40, 14, 15, 18, 15, false);
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            match b.ter(i, j) {
                Terrain::Dresser => {
                    b.place_items("dresser", 75, i, j, i, j, false);
                }
                Terrain::Fridge => {
                    b.place_items("fridge", 80, i, j, i, j, false);
                }
                _ => {}
            }
        }
    }
    random_facing(b, 3);
}

/// Open-air market stalls.
fn set_food(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let stall = ((j == 3 || j == SPAN - 4) && ((i > 2 && i < 10) || (i > 13 && i < SPAN - 3)))
            || ((i == 3 || i == SPAN - 4) && ((j > 2 && j < 10) || (j > 13 && j < SPAN - 3)));
        Some(if stall { Terrain::Counter } else { Terrain::Dirt })
    });
    for i in [3, 14] {
        for j in [3, 14] {
            match b.rng(0, 4) {
                1 | 2 => {
                    b.place_items("fridge", 88, i, j, i + 6, j + 6, false);
                }
                3 | 4 => {
                    b.place_items("produce", 88, i, j, i + 6, j + 6, false);
                }
                _ => {}
            }
        }
    }
}

fn set_weapons(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if j == 5 && i > 2 && i < SPAN - 3 {
            Terrain::WallH
        } else if j == 13 && i > 2 && i < SPAN - 3 {
            if matches!(i, 6 | 7 | 16 | 17) {
                Terrain::Window
            } else if i == SEE - 1 {
                Terrain::DoorClosed
            } else {
                Terrain::WallH
            }
        } else if j == 9 && i > 3 && i < SPAN - 4 {
            // Service hatch
            if i == SEE - 1 {
                Terrain::Counter
            } else if i == SEE {
                Terrain::Window
            } else {
                Terrain::WallH
            }
        } else if (i == 3 || i == SPAN - 4) && j > 5 && j < 13 {
            Terrain::WallV
        } else if j == 6 && i > 3 && i < SPAN - 4 {
            Terrain::Rack
        } else if j > 6 && j < 13 && i > 2 && i < SPAN - 3 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    b.place_items("weapons", 90, 4, 6, SPAN - 5, 6, false);
    let x = if b.one_in(2) { SPAN - 5 } else { 4 };
    b.set(x, 9, Terrain::DoorClosed);
    random_facing(b, 4);
}

fn set_guns(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if (j == 1 && i > 15 && i < SPAN - 4) || (j == 8 && i > 3 && i < 16) || (j == 16 && i > 3 && i < SPAN - 4) {
            Terrain::WallH
        } else if j == 13 && i > 4 && i < 16 {
            match i {
                5 => Terrain::DoorLocked,
                10 => Terrain::Counter,
                11 => Terrain::Window,
                _ => Terrain::WallH,
            }
        } else if (i == 4 && j > 8 && j < 16) || (i == SPAN - 5 && j > 1 && j < 16) || (i == 16 && j > 1 && j < 14) {
            Terrain::WallV
        } else if (j == 9 && i > 4 && i < 16) || (i == 15 && j > 9 && j < 13) {
            Terrain::Rack
        } else if j == 13 && (i == 17 || i == 18) {
            Terrain::Counter
        } else if (j > 8 && j < 16 && i > 4 && i < 16) || (j > 1 && j < 16 && i > 16 && i < 19) {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    b.set(15, 16, Terrain::DoorClosed);
    b.set(16, 14, Terrain::GlassWallV);
    b.place_items("allguns", 88, 5, 9, 14, 9, false);
    b.place_items("ammo", 92, 15, 9, 15, 12, false);
    b.place_items("gunxtras", 80, 15, 9, 15, 12, false);
    random_facing(b, 4);
}

fn set_clinic(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if ((j == 6 || j == 17) && i > 4 && i < SPAN - 5) || (j == 9 && i > 4 && i < 11) {
            Terrain::WallH
        } else if ((i == 5 || i == SPAN - 6) && j > 6 && j < 17) || (i == 10 && j == 8) {
            Terrain::WallV
        } else if matches!(j, 10 | 12 | 14) && matches!(i, 6 | 7 | 16 | 17) {
            Terrain::Bed
        } else if j == 7 && i > 13 && i < SPAN - 6 {
            Terrain::Counter
        } else if (j == 8 && i > 5 && i < 10) || (i == 6 && j == 7) {
            Terrain::Rack
        } else if i > 5 && i < SPAN - 6 && j > 6 && j < 17 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    // Drug store room
    let door = if b.one_in(5) { Terrain::DoorClosed } else { Terrain::DoorLocked };
    b.set(10, 7, door);
    let x = b.rng(6, 11);
    b.line(Terrain::Window, x, 17, x + 1, 17);
    let x = b.rng(13, 16);
    b.set(x, 17, Terrain::DoorClosed);
    b.place_items("harddrugs", 80, 6, 7, 6, 8, false);
    b.place_items("softdrugs", 86, 7, 8, 9, 8, false);
    b.place_items("dissection", 60, 14, 7, 17, 7, false);
    random_facing(b, 4);
}

fn set_clothing(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if (i == 5 || i == SPAN - 6) && j > 7 && j < 19 {
            Terrain::WallV
        } else if (j == 7 || j == 13) && i > 4 && i < SPAN - 5 {
            Terrain::WallH
        } else if j == 19 && i > 4 && i < SPAN - 5 {
            if (i > 5 && i < 9) || (i > 14 && i < 18) {
                Terrain::Window
            } else {
                Terrain::WallH
            }
        } else if j == 16 && i > 4 && i < SPAN - 5 {
            Terrain::Counter
        } else if i < 18 && ((j == 8 && i > 5) || (j == 10 && i > 7) || (j == 12 && i > 9)) {
            Terrain::Rack
        } else if j > 7 && j < 19 && i > 5 && i < SPAN - 6 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    let x = b.rng(10, 13);
    b.set(x, 19, Terrain::DoorClosed);
    let x = b.rng(6, 9);
    b.set(x, 13, Terrain::DoorClosed);
    // Gap in the counter
    let x = 8 + b.dice(3, 3);
    b.set(x, 16, Terrain::Floor);
    b.place_items("shoes", 75, 12, 14, 17, 14, false);
    b.place_items("allclothes", 90, 6, 8, 17, 8, false);
    b.place_items("allclothes", 90, 8, 10, 17, 10, false);
    b.place_items("allclothes", 90, 10, 12, 17, 12, false);
    random_facing(b, 3);
}

fn set_general(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if j == 4 && i > 1 && i < SPAN - 2 {
            Terrain::WallH
        } else if j == 17 && i > 1 && i < SPAN - 2 {
            if (i > 4 && i < 9) || (i > 14 && i < 19) {
                Terrain::Window
            } else if i == SEE - 1 || i == SEE {
                Terrain::DoorClosed
            } else {
                Terrain::WallH
            }
        } else if (i == 2 || i == SPAN - 3) && j > 4 && j < 17 {
            Terrain::WallV
        } else if (j == 13 && i > 3 && i < 10) || (i == 9 && j > 13 && j < 17) {
            Terrain::Counter
        } else if j == 5 && i > 11 && i < SPAN - 3 {
            Terrain::Fridge
        } else if (matches!(i, 4 | 5 | 8 | 9) && j > 5 && j < 11) || (matches!(i, 13 | 14 | 17 | 18) && j > 7 && j < 15) {
            Terrain::Rack
        } else if i > 2 && i < SPAN - 3 && j > 4 && j < 17 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    b.place_items("fridge", 92, 12, 5, 20, 5, false);
    b.place_items("softdrugs", 88, 4, 9, 5, 10, false);
    b.place_items("behindcounter", 86, 4, 6, 5, 8, false);
    b.place_items("cleaning", 88, 8, 6, 9, 7, false);
    b.place_items("alcohol", 86, 8, 8, 9, 9, false);
    b.place_items("manuals", 65, 8, 10, 9, 10, false);
    b.place_items("tools", 84, 13, 8, 13, 14, false);
    b.place_items("survival_armor", 80, 14, 8, 14, 14, false);
    b.place_items("survival_tools", 80, 17, 8, 17, 14, false);
    b.place_items("cannedfood", 86, 18, 8, 18, 14, false);
    random_facing(b, 4);
}

/// Gaming floor of slot machines with a cashier's cage and back offices behind a wall.
fn set_casino(b: &mut CellBuilder) {
    let tw = b.rng(5, 6);
    paint(b, |i, j| {
        let t = if j == SEE - 3 && ((i > 3 && i < 8) || (i > 15 && i < 20)) {
            Terrain::Window
        } else if j == SEE - 3 && i > 9 && i < 14 {
            Terrain::DoorClosed
        } else if ((j == 2 || j == SPAN - 3) && i > 1 && i < SPAN - 2) || (j == tw && i > 2 && i < SPAN - 3) {
            Terrain::WallH
        } else if ((i == 2 || i == SPAN - 3) && j > 2 && j < SPAN - 3)
            || (i == 13 && j > 2 && j < 6)
            || ((i == 7 || i == 12) && j > 8 && j < 17)
        {
            Terrain::WallV
        } else if (matches!(i, 3 | 6 | 8 | 11 | 13) && j > 8 && j < 17) || (j == 7 && i > 4 && i < 14) {
            Terrain::SlotMachine
        } else if (matches!(j, 9 | 11 | 13 | 15) && i < SPAN - 3 && i > SPAN - 6)
            || (i == SPAN - 5 && (j == 8 || j == 14))
        {
            Terrain::Counter
        } else if i > 2 && i < SPAN - 3 && j > 2 && j < SPAN - 3 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    let y = b.rng(3, 5);
    b.set(14, y, Terrain::DoorClosed);
    let x = b.rng(15, 20);
    b.set(x, 6, Terrain::DoorLocked);
    b.place_items("casino", 60, 3, 3, SPAN - 4, tw - 1, false);
}

fn set_library(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if ((j == 2 || j == SPAN - 3) && i > 1 && i < SPAN - 2) || (j == 17 && i > 2 && i < SPAN - 3) {
            Terrain::WallH
        } else if (i == 2 || i == SPAN - 3) && j > 2 && j < SPAN - 3 {
            Terrain::WallV
        } else if j > 2 && j < 17 && j % 3 != 0 && i > 2 && i < SPAN - 3 && (i < 10 || i > 12) {
            Terrain::Bookcase
        } else if i > 2 && i < SPAN - 3 && j > 2 && j < SPAN - 3 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    for j in [3, 6] {
        b.set(2, j, Terrain::Window);
        b.set(SPAN - 3, j, Terrain::Window);
    }
    let x = b.rng(10, 12);
    b.set(x, 2, Terrain::Window);
    let x = b.rng(10, 12);
    b.set(x, 17, Terrain::DoorClosed);
    let x = b.rng(8, 13);
    b.set(x, SPAN - 3, Terrain::DoorClosed);
    let x = b.rng(3, 7);
    b.set(x, SPAN - 3, Terrain::Window);
    let x = b.rng(14, 18);
    b.set(x, SPAN - 3, Terrain::Window);
    b.line(Terrain::Counter, 15, 19, 15, 20);

    for (category, chance, rows) in [
        ("magazines", 80, &[16][..]),
        ("novels", 85, &[13, 14, 10, 11][..]),
        ("manuals", 80, &[7, 8][..]),
        ("textbooks", 75, &[4, 5][..]),
    ] {
        for &y in rows {
            b.place_items(category, chance, 4, y, 9, y, false);
            b.place_items(category, chance, 13, y, 20, y, false);
        }
    }
    random_facing(b, 4);
}

/// Six compact science rooms either side of a central corridor.
fn set_lab(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if ((i == 1 || i == SPAN - 2) && j > 0 && j < SPAN - 2) || ((i == 10 || i == 13) && j > 0 && j < 18) {
            Terrain::WallV
        } else if ((j == 0 || j == SPAN - 2) && i > 0 && i < EDGE)
            || (matches!(j, 6 | 12 | 18) && i > 1 && i < SPAN - 2 && i != SEE - 1 && i != SEE)
        {
            Terrain::WallH
        } else if i > 0 && i < EDGE && j < SPAN - 2 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    for j in [3, 9, 15] {
        b.set(10, j, Terrain::DoorClosed);
        b.set(13, j, Terrain::DoorClosed);
    }
    b.line(Terrain::Counter, 14, 19, 15, 19);
    for y in [1, 7, 13] {
        set_science_room(b, 2, y, true);
        set_science_room(b, 14, y, false);
    }
}

fn set_bionics(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if (j == 8 && i > 1 && i < SPAN - 2) || (j == 13 && i > 2 && i < SPAN - 3) {
            Terrain::WallH
        } else if j == 19 {
            if !(2..=SPAN - 3).contains(&i) {
                return None;
            } else if (i > 4 && i < 8) || (i > 15 && i < 19) {
                Terrain::Window
            } else if i == SEE - 1 || i == SEE {
                Terrain::DoorClosed
            } else {
                Terrain::WallH
            }
        } else if j == 14 && i > 2 && i < 15 {
            Terrain::Rack
        } else if (j == 16 || j == 9) && i > 2 && i < 19 {
            Terrain::Counter
        } else if (i == 2 || i == SPAN - 3) && j > 8 && j < 19 {
            Terrain::WallV
        } else if i > 2 && i < SPAN - 3 && j > 8 && j < 19 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    b.line(Terrain::Bed, 3, 12, 4, 12);
    b.place_items("dissection", 70, 3, 9, 18, 9, false);
    b.place_items("electronics", 50, 3, 9, 18, 9, false);
    b.place_items("bionics_common", 20, 3, 14, 14, 14, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    fn settlement() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        r
    }

    #[test]
    fn test_settlement_cells_fill_the_cell() {
        let registry = settlement();
        assert_eq!(registry.len(), 12);
        for cell in registry.cell_types() {
            for seed in 0..5 {
                with_builder(cell, Neighbors::default(), seed, |b| {
                    registry.generate(b);
                    assert!(b.grid.unset_tiles().is_empty(), "{} seed {}", cell, seed);
                });
            }
        }
    }

    #[test]
    fn test_center_notice_board() {
        with_builder(CellType::SetCenter, Neighbors::default(), 1, |b| {
            set_center(b);
            assert_eq!(b.grid.count_terrain(Terrain::Bulletin), 9);
        });
    }

    #[test]
    fn test_house_keeps_front_doors_under_rotation() {
        for seed in 0..8 {
            with_builder(CellType::SetHouse, Neighbors::default(), seed, |b| {
                set_house(b);
                assert!(b.grid.count_terrain(Terrain::DoorClosed) >= 8);
                assert_eq!(b.grid.count_terrain(Terrain::Fridge), 1);
            });
        }
    }

    #[test]
    fn test_food_market_is_fixed() {
        with_builder(CellType::SetFood, Neighbors::default(), 2, |b| {
            set_food(b);
            assert_eq!(b.ter(5, 3), Terrain::Counter);
            assert_eq!(b.ter(SEE, SEE), Terrain::Dirt);
        });
    }

    #[test]
    fn test_lab_corridor_and_doors() {
        with_builder(CellType::SetLab, Neighbors::default(), 5, |b| {
            set_lab(b);
            assert_eq!(b.ter(SEE, 6), Terrain::Floor);
            assert_eq!(b.ter(10, 3), Terrain::DoorClosed);
            assert_eq!(b.ter(13, 15), Terrain::DoorClosed);
        });
    }

    #[test]
    fn test_casino_has_slots() {
        with_builder(CellType::SetCasino, Neighbors::default(), 5, |b| {
            set_casino(b);
            assert!(b.grid.count_terrain(Terrain::SlotMachine) > 20);
        });
    }
}
