//! Natural and hostile underground cells, the city wall and the tutorial room.

use super::{grass_or_dirt, pick_tile, Registry};
use crate::builder::CellBuilder;
use crate::connectivity::connects_to;
use crate::geometry::Direction;
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::CellType;
use crate::terrain::Terrain;

const SPAN: i32 = GRID_SIZE as i32;

const CANNED_FOOD: [&str; 7] = [
    "can_beans",
    "can_corn",
    "can_spam",
    "can_pineapple",
    "can_coconut",
    "can_sardine",
    "can_tuna",
];

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register(Rock, rock);
    r.register(Cavern, cavern);
    r.register(Rift, rift);
    r.register(Hellmouth, hellmouth);
    r.register(Slimepit, slimepit);
    r.register(SlimepitDown, slimepit);
    r.register(Anthill, anthill);
    r.register(Wall, city_wall);
    r.register(Gate, city_wall);
    r.register(Tutorial, tutorial);
}

/// Per-side values, indexed by `Direction::index`.
fn per_side(b: &CellBuilder, f: impl Fn(CellType, Direction) -> i32) -> [i32; 4] {
    let mut fac = [0; 4];
    for dir in Direction::ALL {
        fac[dir.index()] = f(b.neighbor(dir), dir);
    }
    fac
}

fn is_slimepit(t: CellType) -> bool {
    matches!(t, CellType::Slimepit | CellType::SlimepitDown)
}

/// Solid rock, worn into floor along edges shared with caverns and slime pits.
fn rock(b: &mut CellBuilder) {
    let [n, e, s, w] = per_side(b, |t, _| if t == CellType::Cavern || is_slimepit(t) { 6 } else { 0 });
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let worn =
                b.rng(0, n) > j || b.rng(0, e) > EDGE - i || b.rng(0, w) > i || b.rng(0, s) > EDGE - j;
            b.set(i, j, if worn { Terrain::RockFloor } else { Terrain::Rock });
        }
    }
}

fn opens_cavern(t: CellType) -> bool {
    matches!(t, CellType::Cavern | CellType::SubwayNs | CellType::SubwayEw)
}

/// Open cave with ragged rock margins, a few pillars and tunnels towards connecting neighbors.
fn cavern(b: &mut CellBuilder) {
    let n = if opens_cavern(b.neighbor(Direction::North)) { 0 } else { 3 };
    let e = if opens_cavern(b.neighbor(Direction::East)) { EDGE } else { EDGE - 3 };
    let s = if opens_cavern(b.neighbor(Direction::South)) { EDGE } else { EDGE - 3 };
    let w = if opens_cavern(b.neighbor(Direction::West)) { 0 } else { 3 };
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let margin = j < n || j > s || i < w || i > e;
            let on_edge = j == 0 || j == EDGE || i == 0 || i == EDGE;
            let t = if margin && (on_edge || !b.one_in(3)) { Terrain::Rock } else { Terrain::RockFloor };
            b.set(i, j, t);
        }
    }

    let pillars = b.rng(0, 2) * b.rng(0, 3) + b.rng(0, 1);
    for _ in 0..pillars {
        let (px, py) = (b.rng(5, SPAN - 6), b.rng(5, SPAN - 6));
        b.square(Terrain::Rock, px - 1, py - 1, px + 1, py + 1);
    }

    for dir in Direction::ALL {
        if !connects_to(b.neighbor(dir), dir.opposite()) {
            continue;
        }
        match dir {
            Direction::North => b.square(Terrain::RockFloor, SEE - 2, 0, SEE + 3, SEE),
            Direction::East => b.square(Terrain::RockFloor, SEE, SEE - 2, EDGE, SEE + 3),
            Direction::South => b.square(Terrain::RockFloor, SEE - 2, SEE, SEE + 3, EDGE),
            Direction::West => b.square(Terrain::RockFloor, 0, SEE - 2, SEE, SEE + 3),
        }
    }
    b.place_items("cavern", 60, 0, 0, EDGE, EDGE, false);

    // Miner remains
    if b.one_in(6) {
        if let Some((x, y)) = pick_tile(b, 0, 0, EDGE, EDGE, |t| t.move_cost() > 0) {
            if !b.one_in(3) {
                b.add_item(x, y, "jackhammer");
            }
            if b.one_in(3) {
                b.add_item(x, y, "mask_dust");
            }
            if b.one_in(2) {
                b.add_item(x, y, "hat_hard");
            }
            while !b.one_in(3) {
                if let Some(food) = b.choose(&CANNED_FOOD) {
                    b.add_item(x, y, food);
                }
            }
        }
    }
}

fn is_rift(t: CellType) -> bool {
    matches!(t, CellType::Rift | CellType::Hellmouth)
}

/// River of lava. Borders with other rifts stay open, borders with tunnels become rock
/// floor landings and anything else is walled off with rock.
fn rift(b: &mut CellBuilder) {
    let mut fac = [0; 4];
    for dir in Direction::ALL {
        let n = b.neighbor(dir);
        if is_rift(n) {
            continue;
        }
        // Negative means a rock floor landing, positive a rock bank.
        fac[dir.index()] = if connects_to(n, dir.opposite()) { b.rng(-6, -2) } else { b.rng(2, 6) };
    }
    let [n, e, s, w] = fac;
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if (n < 0 && j < -n) || (s < 0 && j >= SPAN + s) || (w < 0 && i < -w) || (e < 0 && i >= SPAN + e) {
                Terrain::RockFloor
            } else if j < n || j >= SPAN - s || i < w || i >= SPAN - e {
                Terrain::Rock
            } else {
                Terrain::Lava
            };
            b.set(i, j, t);
        }
    }
}

/// A lava ring around a central descent, decorated with one of several altar patterns.
fn hellmouth(b: &mut CellBuilder) {
    let [n, e, s, w] = per_side(b, |t, _| if is_rift(t) { 0 } else { 6 });
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if (i >= SEE - 1 && i <= SEE) && (j >= SEE - 1 && j <= SEE) {
                Terrain::SlopeDown
            } else if j < n || j >= SPAN - s || i < w || i >= SPAN - e || (i >= 6 && i < SPAN - 6 && j >= 6 && j < SPAN - 6) {
                Terrain::RockFloor
            } else {
                Terrain::Lava
            };
            b.set(i, j, t);
        }
    }
    match b.rng(0, 4) {
        0 => {
            for i in (7..=16).step_by(3) {
                b.set(i, 6, Terrain::Rock);
                b.set(i, 17, Terrain::Rock);
                b.set(6, i, Terrain::Rock);
                b.set(17, i, Terrain::Rock);
                if i > 7 && i < 16 {
                    b.set(i, 10, Terrain::Rock);
                    b.set(i, 13, Terrain::Rock);
                } else {
                    for y in [6, 10, 13, 17] {
                        b.set(i - 1, y, Terrain::Rock);
                    }
                }
            }
        }
        1 => {
            // Lava diagonals fenced with rock
            let mirror = |x: i32, y: i32| [(x, y), (EDGE - x, y), (x, EDGE - y), (EDGE - x, EDGE - y)];
            for i in 6..11 {
                for (x, y) in mirror(i, i) {
                    b.set(x, y, Terrain::Lava);
                }
                if i < 10 {
                    for (x, y) in mirror(i + 1, i).into_iter().chain(mirror(i, i + 1)) {
                        b.set(x, y, Terrain::Lava);
                    }
                }
                if i < 9 {
                    for (x, y) in mirror(i + 2, i).into_iter().chain(mirror(i, i + 2)) {
                        b.set(x, y, Terrain::Rock);
                    }
                }
            }
        }
        2 => {
            for i in 7..17 {
                b.set(i, 6, Terrain::Rock);
                b.set(6, i, Terrain::Rock);
                b.set(i, 17, Terrain::Rock);
                b.set(17, i, Terrain::Rock);
                if i != 7 && i != 16 && i != 11 && i != 12 {
                    b.set(i, 8, Terrain::Rock);
                    b.set(8, i, Terrain::Rock);
                    b.set(i, 15, Terrain::Rock);
                    b.set(15, i, Terrain::Rock);
                }
                if i == 11 || i == 12 {
                    b.set(i, 10, Terrain::Rock);
                    b.set(10, i, Terrain::Rock);
                    b.set(i, 13, Terrain::Rock);
                    b.set(13, i, Terrain::Rock);
                }
            }
        }
        3 => {
            b.square(Terrain::Lava, 6, 6, 10, 10);
            b.square(Terrain::Lava, EDGE - 10, 6, EDGE - 6, 10);
            b.square(Terrain::Lava, 6, EDGE - 10, 10, EDGE - 6);
            b.square(Terrain::Lava, EDGE - 10, EDGE - 10, EDGE - 6, EDGE - 6);
        }
        _ => {}
    }
}

fn slimepit(b: &mut CellBuilder) {
    let [n, e, s, w] = per_side(b, |t, _| i32::from(is_slimepit(t)));
    let surface = b.above() == CellType::Null;
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let toward_pit = j < n * SEE || i < w * SEE || j > SPAN - s * SEE || i > SPAN - e * SEE;
            let t = if toward_pit && !b.one_in(10) {
                if b.one_in(10) {
                    Terrain::RockFloor
                } else {
                    Terrain::Slime
                }
            } else if b.rng(0, SEE) > (i - SEE).abs() && b.rng(0, SEE) > (j - SEE).abs() {
                Terrain::Slime
            } else if surface {
                Terrain::Dirt
            } else {
                Terrain::RockFloor
            };
            b.set(i, j, t);
        }
    }
    if b.cell() == CellType::SlimepitDown {
        let (x, y) = (b.rng(3, SPAN - 4), b.rng(3, SPAN - 4));
        b.set(x, y, Terrain::SlopeDown);
    }
    if b.above() == CellType::SlimepitDown {
        let (x, y) = match b.rng(1, 4) {
            1 => (b.rng(0, 2), b.rng(0, 2)),
            2 => (b.rng(0, 2), SPAN - b.rng(1, 3)),
            3 => (SPAN - b.rng(1, 3), b.rng(0, 2)),
            _ => (SPAN - b.rng(1, 3), SPAN - b.rng(1, 3)),
        };
        b.set(x, y, Terrain::SlopeUp);
    }
    b.add_spawn("mon_blob", 8, SEE, SEE);
    b.place_items("sewer", 40, 0, 0, EDGE, EDGE, true);
}

/// Dirt mound with the colony entrance in the middle.
fn anthill(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < 8 || j < 8 || i > SPAN - 9 || j > SPAN - 9 {
                grass_or_dirt(&mut b.rng)
            } else if (i == SEE - 1 || i == SEE) && (j == SEE - 1 || j == SEE) {
                Terrain::SlopeDown
            } else {
                Terrain::DirtMound
            };
            b.set(i, j, t);
        }
    }
}

fn is_wall(t: CellType) -> bool {
    matches!(t, CellType::Wall | CellType::Gate)
}

/// A rock band running towards neighboring wall cells; gates close the band with a
/// portcullis across the passage.
fn city_wall(b: &mut CellBuilder) {
    let w_fac = if is_wall(b.neighbor(Direction::West)) { 0 } else { 9 };
    let e_fac = if is_wall(b.neighbor(Direction::East)) { SPAN } else { 15 };
    let n_fac = if is_wall(b.neighbor(Direction::North)) { 0 } else { 9 };
    let s_fac = if is_wall(b.neighbor(Direction::South)) { SPAN } else { 15 };
    b.fill_with(grass_or_dirt);
    b.square(Terrain::Rock, w_fac, 9, e_fac - 1, 14);
    b.square(Terrain::Rock, 9, n_fac, 14, s_fac - 1);
    if b.cell() != CellType::Gate {
        return;
    }
    // An east-west wall is crossed north to south, so the portcullis runs along a row.
    let runs_east_west = w_fac == 0 || e_fac == SPAN;
    for i in 9..15 {
        for j in 9..15 {
            let bar = if runs_east_west { j == 11 } else { i == 11 };
            let t = if bar { Terrain::Portcullis } else { grass_or_dirt(&mut b.rng) };
            b.set(i, j, t);
        }
    }
}

fn tutorial(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if j == 0 || j == EDGE {
                Terrain::WallH
            } else if i == 0 || i == EDGE {
                Terrain::WallV
            } else if j == SEE {
                if i % 4 == 2 {
                    Terrain::DoorClosed
                } else if i % 5 == 3 {
                    Terrain::Window
                } else {
                    Terrain::WallH
                }
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
    b.set(7, SPAN - 4, Terrain::Rack);
    b.set(SPAN - 2, SPAN - 4, Terrain::GasPump);
    if b.above() != CellType::Null {
        b.set(SEE - 2, SEE + 2, Terrain::StairsUp);
        b.square(Terrain::WaterShallow, 2, 2, 3, 3);
    } else {
        b.set(SEE - 2, SEE + 2, Terrain::StairsDown);
    }
}
