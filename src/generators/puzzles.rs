//! Temples, abandoned mines and spiral mazes: cells built around a small puzzle or a
//! hazard rather than a floor plan.

use super::{pick_tile, Registry};
use crate::builder::CellBuilder;
use crate::entities::{ComputerAction, ComputerFailure};
use crate::geometry::Direction;
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::CellType;
use crate::terrain::{FieldKind, Terrain, Trap};

const SPAN: i32 = GRID_SIZE as i32;

pub(crate) fn register(r: &mut Registry) {
    r.register(CellType::Temple, temple);
    r.register(CellType::TempleStairs, temple);
    r.register(CellType::TempleFinale, temple_finale);
    r.register(CellType::Mine, mine);
    r.register(CellType::MineDown, mine);
    r.register(CellType::MineFinale, mine_finale);
    r.register(CellType::SpiralHub, spiral_hub);
    r.register(CellType::Spiral, spiral);
}

fn temple(b: &mut CellBuilder) {
    if b.above() == CellType::Null {
        b.fill(Terrain::Dirt);
        b.square(Terrain::Grate, SEE - 1, SEE - 1, SEE, SEE);
        b.set(SEE + 1, SEE + 1, Terrain::PedestalTemple);
        return;
    }
    b.fill(Terrain::RockFloor);
    // Depth picks the chamber so consecutive levels never repeat one.
    match 1 + (b.ctx.z + 4).abs() % 4 {
        1 => flame_bursts(b),
        2 => spreading_water(b),
        3 => flipping_walls(b),
        _ => toggling_maze(b),
    }
    if b.cell() == CellType::TempleStairs {
        b.line(Terrain::StairsDown, SEE, 0, SEE + 1, 0);
    }
    if b.above() == CellType::TempleStairs {
        b.line(Terrain::StairsUp, SEE, EDGE, SEE + 1, EDGE);
    }
}

fn flame_bursts(b: &mut CellBuilder) {
    b.square(Terrain::Rock, 0, 0, SEE - 1, EDGE);
    b.square(Terrain::Rock, SEE + 2, 0, EDGE, EDGE);
    for j in 2..SPAN - 4 {
        for i in [SEE, SEE + 1] {
            let intensity = b.rng(1, 3);
            b.add_field(i, j, FieldKind::FireVent, intensity);
        }
    }
}

/// Four pools that flood the hall once a flood trap is tripped; the grates drain it.
fn spreading_water(b: &mut CellBuilder) {
    b.square(Terrain::WaterDeep, 4, 4, 5, 5);
    b.add_spawn("mon_sewer_snake", 1, 4, 4);
    b.square(Terrain::WaterDeep, SPAN - 5, 4, SPAN - 4, 6);
    b.add_spawn("mon_sewer_snake", 1, 1, SPAN - 5);
    b.square(Terrain::WaterDeep, 4, SPAN - 5, 6, SPAN - 4);
    b.square(Terrain::WaterDeep, SPAN - 5, SPAN - 5, SPAN - 4, SPAN - 4);
    b.square(Terrain::Rock, 0, SPAN - 2, SEE - 1, EDGE);
    b.square(Terrain::Rock, SEE + 2, SPAN - 2, EDGE, EDGE);
    b.line(Terrain::Grate, SEE, 1, SEE + 1, 1);
    b.set_trap(SEE, SPAN - 2, Trap::TempleFlood);
    b.set_trap(SEE + 1, SPAN - 2, Trap::TempleFlood);
    for y in 2..SPAN - 2 {
        for x in 2..SPAN - 2 {
            if b.ter(x, y) == Terrain::RockFloor && b.one_in(4) {
                b.set_trap(x, y, Trap::TempleFlood);
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Colour {
    Red,
    Green,
    Blue,
}

fn colour_of(t: Terrain) -> Option<(Colour, bool)> {
    match t {
        Terrain::FloorRed => Some((Colour::Red, false)),
        Terrain::FloorGreen => Some((Colour::Green, false)),
        Terrain::FloorBlue => Some((Colour::Blue, false)),
        Terrain::RockRed => Some((Colour::Red, true)),
        Terrain::RockGreen => Some((Colour::Green, true)),
        Terrain::RockBlue => Some((Colour::Blue, true)),
        _ => None,
    }
}

fn coloured(colour: Colour, solid: bool) -> Terrain {
    match (colour, solid) {
        (Colour::Red, false) => Terrain::FloorRed,
        (Colour::Green, false) => Terrain::FloorGreen,
        (Colour::Blue, false) => Terrain::FloorBlue,
        (Colour::Red, true) => Terrain::RockRed,
        (Colour::Green, true) => Terrain::RockGreen,
        (Colour::Blue, true) => Terrain::RockBlue,
    }
}

/// Raise a coloured floor to a wall of the same colour, or sink the wall, when its colour
/// is one of `colours`.
fn flip(t: Terrain, colours: &[Colour]) -> Terrain {
    match colour_of(t) {
        Some((c, solid)) if colours.contains(&c) => coloured(c, !solid),
        _ => t,
    }
}

/// A corridor of coloured tiles closed off by switches. The solved state is an open
/// corridor; a random sequence of switch presses is applied to scramble it.
fn flipping_walls(b: &mut CellBuilder) {
    b.line(Terrain::Rock, 0, 0, SEE - 1, 0);
    b.line(Terrain::Rock, SEE + 2, 0, EDGE, 0);
    b.line(Terrain::Rock, SEE - 1, 1, SEE - 1, 6);
    b.line(Terrain::Bars, SEE + 2, 1, SEE + 2, 6);
    b.set(SEE + 2, 1, Terrain::SwitchRg);
    b.set(SEE + 3, 1, Terrain::SwitchGb);
    b.set(SEE + 4, 1, Terrain::SwitchRb);
    b.set(SEE + 5, 1, Terrain::SwitchEven);
    let rows = [
        Terrain::FloorRed,
        Terrain::FloorGreen,
        Terrain::FloorBlue,
        Terrain::FloorRed,
        Terrain::FloorGreen,
        Terrain::FloorBlue,
    ];
    for (y, t) in (1..).zip(rows) {
        b.line(t, SEE, y, SEE + 1, y);
    }
    let extra = b.rng(1, 3);
    let mut presses = vec![1, 2, 3, 4, extra];
    while !presses.is_empty() {
        let pick = b.rng(0, presses.len() as i32 - 1) as usize;
        let press = presses.swap_remove(pick);
        for y in 1..7 {
            for x in SEE..=SEE + 1 {
                let t = b.ter(x, y);
                let flipped = match press {
                    1 => flip(t, &[Colour::Red, Colour::Green]),
                    2 => flip(t, &[Colour::Green, Colour::Blue]),
                    3 => flip(t, &[Colour::Red, Colour::Blue]),
                    _ if y % 2 == 0 => flip(t, &[Colour::Red, Colour::Green, Colour::Blue]),
                    _ => t,
                };
                b.set(x, y, flipped);
            }
        }
    }
}

/// Stepping on a coloured tile toggles the walls of another colour. A walk from the north
/// entry to the south exit is laid first and its tiles raised so that walking it in
/// order always opens the way.
fn toggling_maze(b: &mut CellBuilder) {
    b.square(Terrain::Rock, 0, 0, SEE - 1, 1);
    b.square(Terrain::Rock, 0, SPAN - 2, SEE - 1, EDGE);
    b.square(Terrain::Rock, 0, 2, SEE - 4, SPAN - 3);
    b.square(Terrain::Rock, SEE + 2, 0, EDGE, 1);
    b.square(Terrain::Rock, SEE + 2, SPAN - 2, EDGE, EDGE);
    b.square(Terrain::Rock, SEE + 5, 2, EDGE, SPAN - 3);
    let floors = [Terrain::FloorRed, Terrain::FloorGreen, Terrain::FloorBlue];
    let mut x = b.rng(SEE - 1, SEE + 2);
    let mut y = 2;
    let mut path = Vec::new();
    while x < SEE - 1 || x > SEE + 2 || y < SPAN - 2 {
        path.push((x, y));
        let t = b.choose(&floors).unwrap_or(Terrain::FloorRed);
        b.set(x, y, t);
        if y == SPAN - 2 {
            x += if x < SEE - 1 { 1 } else { -1 };
            continue;
        }
        let mut next = Vec::new();
        for nx in x - 1..=x + 1 {
            for ny in y..=y + 1 {
                if b.ter(nx, ny) == Terrain::RockFloor {
                    next.push((nx, ny));
                }
            }
        }
        match b.choose(&next) {
            Some(p) => (x, y) = p,
            None => break,
        }
    }
    // Walk the path from the entry and raise any tile that would be a wall by then.
    let (mut red, mut green, mut blue) = (false, false, false);
    for &(x, y) in &path {
        match b.ter(x, y) {
            Terrain::FloorRed => {
                green = !green;
                if red {
                    b.set(x, y, Terrain::RockRed);
                }
            }
            Terrain::FloorGreen => {
                blue = !blue;
                if green {
                    b.set(x, y, Terrain::RockGreen);
                }
            }
            Terrain::FloorBlue => {
                red = !red;
                if blue {
                    b.set(x, y, Terrain::RockBlue);
                }
            }
            _ => {}
        }
    }
    let filler = [
        Terrain::RockRed,
        Terrain::RockGreen,
        Terrain::RockBlue,
        Terrain::FloorRed,
        Terrain::FloorGreen,
        Terrain::FloorBlue,
    ];
    for i in SEE - 3..=SEE + 4 {
        for j in 2..=SPAN - 2 {
            b.set_trap(i, j, Trap::TempleToggle);
            if b.ter(i, j) == Terrain::RockFloor {
                let t = b.choose(&filler).unwrap_or(Terrain::FloorRed);
                b.set(i, j, t);
            }
        }
    }
}

fn temple_finale(b: &mut CellBuilder) {
    b.fill(Terrain::Rock);
    b.square(Terrain::RockFloor, SEE - 1, 1, SEE + 2, 4);
    b.square(Terrain::RockFloor, SEE, 5, SEE + 1, EDGE);
    b.line(Terrain::StairsUp, SEE, EDGE, SEE + 1, EDGE);
    for _ in 0..2 {
        let x = b.rng(SEE, SEE + 1);
        let y = b.rng(2, 3);
        b.add_item(x, y, "artifact_relic");
    }
}

fn mine_like(c: CellType) -> bool {
    c.is_mine() || matches!(c, CellType::MineShaft | CellType::MineEntrance)
}

/// How far the cave wall stands off each side: 4 against solid rock, nothing (or past
/// the edge) towards another mine cell.
fn wall_offsets(b: &mut CellBuilder) -> [i32; 4] {
    let mut fac = [4; 4];
    for dir in Direction::ALL {
        if mine_like(b.neighbor(dir)) {
            fac[dir.index()] = if b.one_in(10) { 0 } else { -2 };
        }
    }
    fac
}

/// 6x6 of rock floor near the center for a slope, cleared by force after ten misses.
fn central_slope(b: &mut CellBuilder, slope: Terrain) {
    let mut corner = (SEE, SEE);
    let mut clear = false;
    for _ in 0..10 {
        corner = (b.rng(SEE - 6, SEE + 1), b.rng(SEE - 6, SEE + 1));
        let (px, py) = corner;
        clear = (px..=px + 5).all(|i| (py..=py + 5).all(|j| b.ter(i, j) == Terrain::RockFloor));
        if clear {
            break;
        }
    }
    let (px, py) = corner;
    if !clear {
        b.square(Terrain::RockFloor, px, py, px + 5, py + 5);
    }
    b.square(slope, px + 1, py + 1, px + 2, py + 2);
}

/// The tiles a slope takes against a solid wall.
fn wall_slope(dir: Direction) -> (i32, i32, i32, i32) {
    match dir {
        Direction::North => (SEE - 2, 6, SEE + 1, 6),
        Direction::East => (SPAN - 7, SEE - 2, SPAN - 7, SEE + 1),
        Direction::South => (SEE - 2, SPAN - 7, SEE + 1, SPAN - 7),
        Direction::West => (6, SEE - 2, 6, SEE + 1),
    }
}

fn mine(b: &mut CellBuilder) {
    let fac = wall_offsets(b);
    let [n, e, s, w] = fac;
    for i in 0..SPAN {
        for j in 0..SPAN {
            let west = w + b.rng(0, 2);
            let east = EDGE - e - b.rng(0, 2);
            let north = n + b.rng(0, 2);
            let south = EDGE - s - b.rng(0, 2);
            let open = i >= west
                && i <= east
                && j >= north
                && j <= south
                && i + j >= 4
                && (SPAN - i) + (SPAN - j) >= 6;
            b.set(i, j, if open { Terrain::RockFloor } else { Terrain::Rock });
        }
    }
    mine_hazard(b);

    let solid: Vec<Direction> = Direction::ALL.into_iter().filter(|d| fac[d.index()] == 4).collect();
    if b.cell() == CellType::MineDown {
        match b.choose(&solid) {
            Some(dir) => {
                let clearing = match dir {
                    Direction::North => (SEE - 3, 6, SEE + 2, SEE),
                    Direction::East => (SEE + 1, SEE - 3, SPAN - 7, SEE + 2),
                    Direction::South => (SEE - 3, SEE + 1, SEE + 2, SPAN - 7),
                    Direction::West => (6, SEE - 3, SEE, SEE + 2),
                };
                b.square(Terrain::RockFloor, clearing.0, clearing.1, clearing.2, clearing.3);
                let (x1, y1, x2, y2) = wall_slope(dir);
                b.line(Terrain::SlopeDown, x1, y1, x2, y2);
            }
            None => central_slope(b, Terrain::SlopeDown),
        }
    }
    if b.above() == CellType::MineDown {
        let free: Vec<Direction> = solid
            .into_iter()
            .filter(|&d| {
                let (x1, y1, x2, y2) = wall_slope(d);
                b.ter(x1, y1) != Terrain::SlopeDown && b.ter(x2, y2) != Terrain::SlopeDown
            })
            .collect();
        match b.choose(&free) {
            Some(dir) => {
                let (x1, y1, x2, y2) = wall_slope(dir);
                b.line(Terrain::SlopeUp, x1, y1, x2, y2);
            }
            None => central_slope(b, Terrain::SlopeUp),
        }
    }
}

fn miner_remains(b: &mut CellBuilder, x: i32, y: i32) {
    b.add_item(x, y, "corpse");
    b.place_items("mine_equipment", 60, x, y, x, y, false);
}

fn mine_hazard(b: &mut CellBuilder) {
    match b.rng(0, 6) {
        1 => {
            let (x, y) = (b.rng(9, 14), b.rng(9, 14));
            b.set(x, y, Terrain::Rock);
            b.add_field(x, y, FieldKind::GasVent, 2);
        }
        2 => {
            let (sx, sy) = (b.rng(6, SEE), b.rng(6, SEE));
            let (ex, ey) = (b.rng(SEE + 1, SPAN - 7), b.rng(SEE + 1, SPAN - 7));
            let flows = b.rng(2, 4);
            for _ in 0..flows {
                let (x1, y1) = (sx + b.rng(-1, 1), sy + b.rng(-1, 1));
                let (x2, y2) = (ex + b.rng(-1, 1), ey + b.rng(-1, 1));
                b.line(Terrain::Lava, x1, y1, x2, y2);
            }
        }
        3 => {
            let (wx, wy) = (b.rng(9, 14), b.rng(9, 14));
            for i in wx - 3..wx + 3 {
                for j in wy - 3..wy + 3 {
                    if !b.one_in(4) {
                        b.set(i, j, Terrain::Rubble);
                    }
                }
            }
            b.place_items("wreckage", 70, wx - 3, wy - 3, wx + 2, wy + 2, false);
        }
        4 => {
            let bodies = b.rng(4, 8);
            for _ in 0..bodies {
                if let Some((x, y)) = pick_tile(b, 0, 0, EDGE, EDGE, |t| t == Terrain::RockFloor) {
                    miner_remains(b, x, y);
                }
            }
        }
        5 => b.add_spawn("mon_dark_wyrm", 1, SEE, SEE),
        6 => {
            let (ox, oy) = (b.rng(SEE - 4, SEE), b.rng(SEE - 4, SEE));
            small_spiral(b, ox, oy);
            b.set(ox + 2, oy + 3, Terrain::RockFloor);
            miner_remains(b, ox + 2, oy + 3);
        }
        _ => {}
    }
}

/// A 6x6 rock curl with its hollow heart at `(ox + 2, oy + 3)`.
fn small_spiral(b: &mut CellBuilder, ox: i32, oy: i32) {
    b.line(Terrain::Rock, ox, oy, ox + 5, oy);
    b.line(Terrain::Rock, ox + 5, oy, ox + 5, oy + 5);
    b.line(Terrain::Rock, ox + 1, oy + 5, ox + 5, oy + 5);
    b.line(Terrain::Rock, ox + 1, oy + 2, ox + 1, oy + 4);
    b.line(Terrain::Rock, ox + 1, oy + 2, ox + 3, oy + 2);
    b.set(ox + 3, oy + 3, Terrain::Rock);
}

fn mine_finale(b: &mut CellBuilder) {
    for i in 0..SPAN {
        for j in 0..SPAN {
            let open = i > b.rng(1, 3) && i < SPAN - b.rng(2, 4) && j > b.rng(1, 3) && j < SPAN - b.rng(2, 4);
            b.set(i, j, if open { Terrain::RockFloor } else { Terrain::Rock });
        }
    }
    let mut faces = Vec::new();
    for dir in Direction::ALL {
        if b.neighbor(dir) != CellType::Mine {
            faces.push(dir);
            continue;
        }
        match dir {
            Direction::North => b.square(Terrain::RockFloor, SEE, 0, SEE + 1, 3),
            Direction::East => b.square(Terrain::RockFloor, SPAN - 4, SEE, EDGE, SEE + 1),
            Direction::South => b.square(Terrain::RockFloor, SEE, SPAN - 4, SEE + 1, EDGE),
            Direction::West => b.square(Terrain::RockFloor, 0, SEE, 3, SEE + 1),
        }
    }
    // The fault needs a solid wall to open in.
    let kinds = if faces.is_empty() { 3 } else { 4 };
    match b.rng(1, kinds) {
        1 => {
            let (x, y) = (b.rng(SEE, SEE + 1), b.rng(SEE, SEE + 1));
            b.set(x, y, Terrain::PedestalWyrm);
            b.add_item(x, y, "petrified_eye");
        }
        2 => {
            let bodies = b.rng(4, 8);
            for _ in 0..bodies {
                let (x, y) = (b.rng(4, SPAN - 5), b.rng(4, SPAN - 5));
                miner_remains(b, x, y);
            }
            b.add_spawn("mon_dog_thing", 1, SEE, SEE);
            let (x, y) = (b.rng(SEE, SEE + 1), b.rng(SEE, SEE + 1));
            b.add_item(x, y, "artifact_relic");
        }
        3 => {
            b.line(Terrain::Rock, 5, 5, 5, 18);
            b.line(Terrain::Rock, 5, 5, 18, 5);
            b.line(Terrain::Rock, 18, 5, 18, 18);
            b.line(Terrain::Rock, 8, 18, 18, 18);
            b.line(Terrain::Rock, 8, 8, 8, 18);
            b.line(Terrain::Rock, 8, 8, 15, 8);
            b.line(Terrain::Rock, 15, 8, 15, 15);
            b.line(Terrain::Rock, 10, 15, 15, 15);
            b.line(Terrain::Rock, 10, 10, 10, 15);
            b.line(Terrain::Rock, 10, 10, 13, 10);
            b.line(Terrain::Rock, 13, 10, 13, 13);
            b.set(12, 13, Terrain::Rock);
            b.set(12, 12, Terrain::SlopeDown);
            b.set(12, 11, Terrain::SlopeDown);
        }
        _ => {
            let Some(face) = b.choose(&faces) else {
                return;
            };
            match face {
                Direction::North => {
                    b.square(Terrain::Rock, 0, 0, EDGE, 4);
                    b.line(Terrain::Fault, 4, 4, SPAN - 5, 4);
                }
                Direction::East => {
                    b.square(Terrain::Rock, SPAN - 5, 0, EDGE, EDGE);
                    b.line(Terrain::Fault, SPAN - 5, 4, SPAN - 5, SPAN - 5);
                }
                Direction::South => {
                    b.square(Terrain::Rock, 0, SPAN - 5, EDGE, EDGE);
                    b.line(Terrain::Fault, 4, SPAN - 5, SPAN - 5, SPAN - 5);
                }
                Direction::West => {
                    b.square(Terrain::Rock, 0, 0, 4, EDGE);
                    b.line(Terrain::Fault, 4, 4, 4, SPAN - 5);
                }
            }
            if let Some(c) = b.add_computer(SEE, SEE, "NEPowerOS", 0) {
                c.add_option("Read Logs", ComputerAction::AmigaraLog, 0)
                    .add_option("Initiate Tremors", ComputerAction::AmigaraStart, 4)
                    .add_failure(ComputerFailure::Amigara);
            }
        }
    }
}

/// Nested rock walls winding into a slope up at the center.
fn spiral_hub(b: &mut CellBuilder) {
    b.fill(Terrain::RockFloor);
    let walls = [
        (23, 0, 23, 23),
        (2, 23, 23, 23),
        (2, 4, 2, 23),
        (2, 4, 18, 4),
        (18, 4, 18, 18),
        (6, 18, 18, 18),
        (6, 7, 6, 18),
        (6, 7, 15, 7),
        (15, 7, 15, 15),
        (8, 15, 15, 15),
        (8, 9, 8, 15),
        (8, 9, 13, 9),
        (13, 9, 13, 13),
        (10, 13, 13, 13),
        (10, 11, 10, 13),
    ];
    for (x1, y1, x2, y2) in walls {
        b.line(Terrain::Rock, x1, y1, x2, y2);
    }
    b.square(Terrain::SlopeUp, 11, 11, 12, 12);
    let turns = b.rng(0, 3) as u8;
    b.rotate(turns);
}

/// One to four small spirals, at most one per quadrant, each hiding a stone.
fn spiral(b: &mut CellBuilder) {
    const WIDTH: i32 = 8;
    b.fill(Terrain::RockFloor);
    let count = b.rng(1, 4);
    let mut origins = Vec::with_capacity(4);
    for qx in 0..2 {
        for qy in 0..2 {
            let jx = b.rng(0, SEE - WIDTH);
            let jy = b.rng(0, SEE - WIDTH);
            origins.push((qx * SEE + jx, qy * SEE + jy));
        }
    }
    for _ in 0..count {
        let pick = b.rng(0, origins.len() as i32 - 1) as usize;
        let (ox, oy) = origins.swap_remove(pick);
        small_spiral(b, ox, oy);
        b.set(ox + 2, oy + 3, Terrain::RockFloor);
        b.place_items("spiral", 60, ox + 2, oy + 3, ox + 2, oy + 3, false);
    }
}
