//! Subway, sewer and ant tunnel networks. Every shape is built once in its canonical
//! orientation and registered in all four turns.

use super::{pick_tile, Registry};
use crate::builder::CellBuilder;
use crate::connectivity::connects_to;
use crate::geometry::{trig_dist, Direction, Point};
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::CellType;
use crate::terrain::Terrain;

const SPAN: i32 = GRID_SIZE as i32;

/// Upper bound on the steps of the wandering corner tunnel.
const MAX_DIG_STEPS: usize = 400;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register(SubwayStation, subway_station);
    r.register_rotations(&[SubwayNs, SubwayEw], subway_straight);
    r.register_rotations(&[SubwayNe, SubwayEs, SubwaySw, SubwayWn], subway_corner);
    r.register_rotations(&[SubwayNes, SubwayEsw, SubwayNsw, SubwayNew], subway_tee);
    r.register(SubwayNesw, subway_four_way);

    r.register_rotations(&[SewerNs, SewerEw], sewer_straight);
    r.register_rotations(&[SewerNe, SewerEs, SewerSw, SewerWn], sewer_corner);
    r.register_rotations(&[SewerNes, SewerEsw, SewerNsw, SewerNew], sewer_tee);
    r.register(SewerNesw, sewer_four_way);

    r.register_rotations(&[AntsNs, AntsEw], ants_straight);
    r.register_rotations(&[AntsNe, AntsEs, AntsSw, AntsWn], ants_corner);
    r.register_rotations(&[AntsNes, AntsEsw, AntsNsw, AntsNew], ants_tee);
    r.register(AntsNesw, ants_four_way);
    r.register(AntsFood, ants_chamber);
    r.register(AntsLarvae, ants_chamber);
    r.register(AntsQueen, ants_chamber);
}

fn below_station(b: &CellBuilder) -> bool {
    matches!(
        b.above(),
        CellType::SubStationNorth | CellType::SubStationEast | CellType::SubStationSouth | CellType::SubStationWest
    )
}

/// Rock where `solid` says so, otherwise tunnel floor with one tile in `rubble` collapsed.
fn dig(b: &mut CellBuilder, rubble: i32, solid: impl Fn(i32, i32) -> bool) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if solid(i, j) {
                Terrain::Rock
            } else if b.one_in(rubble) {
                Terrain::Rubble
            } else {
                Terrain::RockFloor
            };
            b.set(i, j, t);
        }
    }
}

/// Platform ring around the tracks; exits open towards connecting subway tunnels.
fn subway_station(b: &mut CellBuilder) {
    let mut open = [false; 4];
    for dir in Direction::ALL {
        let n = b.neighbor(dir);
        open[dir.index()] = n.is_subway() && connects_to(n, dir.opposite());
    }
    let [n, e, s, w] = open;
    let far = SPAN - 5;
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let platform = (i < 4 && (!w || j < 4 || j > far))
                || (j < 4 && (!n || i < 4 || i > far))
                || (i > far && (!e || j < 4 || j > far))
                || (j > far && (!s || i < 4 || i > far));
            b.set(i, j, if platform { Terrain::Floor } else { Terrain::RockFloor });
        }
    }
    for (x, y) in [(2, 2), (EDGE - 2, 2), (2, EDGE - 2), (EDGE - 2, EDGE - 2)] {
        b.set(x, y, Terrain::StairsUp);
    }
    for (x, y) in [(2, SEE), (EDGE - 2, SEE), (SEE, 2), (SEE, EDGE - 2)] {
        if b.ter(x, y) == Terrain::Floor {
            b.set(x, y, Terrain::StairsUp);
        }
    }
}

fn subway_straight(b: &mut CellBuilder) {
    let w_fac = if b.neighbor(Direction::West) == CellType::Cavern { 0 } else { 4 };
    let e_fac = if b.neighbor(Direction::East) == CellType::Cavern { SPAN } else { SPAN - 5 };
    dig(b, 90, |i, _| i < w_fac || i > e_fac);
    if below_station(b) {
        let y = b.rng(SEE - 5, SEE + 4);
        b.set(SPAN - 5, y, Terrain::StairsUp);
    }
    b.place_items("subway", 30, 4, 0, SPAN - 5, EDGE, true);
}

/// Opens north and east.
fn subway_corner(b: &mut CellBuilder) {
    dig(b, 30, |i, j| (i >= SPAN - 4 && j < 4) || i < 4 || j >= SPAN - 4);
    if below_station(b) {
        let y = b.rng(SEE - 5, SEE + 4);
        b.set(SPAN - 5, y, Terrain::StairsUp);
    }
    b.place_items("subway", 30, 0, 0, EDGE, EDGE, true);
}

/// Opens north, east and south.
fn subway_tee(b: &mut CellBuilder) {
    dig(b, 30, |i, j| i < 4 || (i >= SPAN - 4 && (j < 4 || j >= SPAN - 4)));
    if below_station(b) {
        let y = b.rng(SEE - 5, SEE + 4);
        b.set(4, y, Terrain::StairsUp);
    }
    b.place_items("subway", 35, 0, 0, EDGE, EDGE, true);
}

fn subway_four_way(b: &mut CellBuilder) {
    dig(b, 30, |i, j| (i < 4 || i >= SPAN - 4) && (j < 4 || j >= SPAN - 4));
    if below_station(b) {
        let x = 4 + b.rng(0, 1) * (SPAN - 9);
        let y = 4 + b.rng(0, 1) * (SPAN - 9);
        b.set(x, y, Terrain::StairsUp);
    }
    b.place_items("subway", 40, 0, 0, EDGE, EDGE, true);
}

/// Rock everywhere `solid` holds, sewage elsewhere.
fn channel(b: &mut CellBuilder, solid: impl Fn(i32, i32) -> bool) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            b.set(i, j, if solid(i, j) { Terrain::Rock } else { Terrain::Sewage });
        }
    }
}

fn outside_channel(v: i32) -> bool {
    v < SEE - 2 || v > SEE + 1
}

fn sewer_straight(b: &mut CellBuilder) {
    channel(b, |i, _| outside_channel(i));
    b.place_items("sewer", 10, 0, 0, EDGE, EDGE, true);
}

/// Opens north and east.
fn sewer_corner(b: &mut CellBuilder) {
    channel(b, |i, j| (i > SEE + 1 && j < SEE - 2) || i < SEE - 2 || j > SEE + 1);
    b.place_items("sewer", 18, 0, 0, EDGE, EDGE, true);
}

/// Opens north, east and south.
fn sewer_tee(b: &mut CellBuilder) {
    channel(b, |i, j| i < SEE - 2 || (i > SEE + 1 && outside_channel(j)));
    b.place_items("sewer", 23, 0, 0, EDGE, EDGE, true);
}

/// Crossing of two channels; one in four is a round cistern under a grate.
fn sewer_four_way(b: &mut CellBuilder) {
    let cistern = b.rng(0, 3) == 0;
    let centers = [
        Point::new(SEE - 1, SEE - 1),
        Point::new(SEE - 1, SEE),
        Point::new(SEE, SEE - 1),
        Point::new(SEE, SEE),
    ];
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let p = Point::new(i, j);
            let t = if cistern && centers.contains(&p) {
                Terrain::Grate
            } else if cistern && centers.iter().any(|&c| trig_dist(p, c) <= 6) {
                Terrain::Sewage
            } else if outside_channel(i) && outside_channel(j) {
                Terrain::Rock
            } else {
                Terrain::Sewage
            };
            b.set(i, j, t);
        }
    }
    b.place_items("sewer", 28, 0, 0, EDGE, EDGE, true);
}

/// Carve a tunnel six tiles wide starting at `x - 2`, staying clear of the side edges.
fn carve_row(b: &mut CellBuilder, x: i32, j: i32) {
    for i in x - 2..=x + 3 {
        if i >= 1 && i < EDGE {
            b.set(i, j, Terrain::RockFloor);
        }
    }
}

fn carve_column(b: &mut CellBuilder, i: i32, y: i32) {
    for j in y - 2..=y + 3 {
        if j >= 1 && j < EDGE {
            b.set(i, j, Terrain::RockFloor);
        }
    }
}

/// Step `v` by -1..=1 but keep it close enough to the center to arrive there by `remaining`.
fn drift(b: &mut CellBuilder, v: i32, remaining: i32) -> i32 {
    let mut v = v + b.rng(-1, 1);
    while (SEE - v).abs() > remaining {
        v += (SEE - v).signum();
    }
    v
}

/// A tunnel wandering from the north edge to the south edge.
fn wander_south(b: &mut CellBuilder) {
    let mut x = SEE;
    for j in 0..=EDGE {
        carve_row(b, x, j);
        x = drift(b, x, EDGE - j);
    }
}

/// A tunnel wandering east from column `from` to the east edge.
fn wander_east(b: &mut CellBuilder, from: i32) {
    let mut y = SEE;
    for i in from..=EDGE {
        carve_column(b, i, y);
        y = drift(b, y, EDGE - i);
    }
}

fn ants_straight(b: &mut CellBuilder) {
    b.fill(Terrain::Rock);
    wander_south(b);
}

/// Opens north and east. A blob digs its way from the north mouth over to the east one.
fn ants_corner(b: &mut CellBuilder) {
    b.fill(Terrain::Rock);
    b.square(Terrain::RockFloor, SEE - 2, 0, SEE + 3, 2);
    b.square(Terrain::RockFloor, EDGE - 2, SEE - 2, EDGE, SEE + 3);
    let (mut x, mut y) = (SEE, 1);
    let mut wander = b.rng(80, 100);
    for _ in 0..MAX_DIG_STEPS {
        dig_blob(b, x, y);
        if x >= EDGE && y == SEE {
            break;
        }
        if !b.one_in(3) {
            x += 1;
        }
        if !b.one_in(x - SEE) {
            y += b.rng(-1, 1);
        }
        if wander <= 0 {
            y += (SEE - y).signum();
        } else {
            wander -= 1;
        }
    }
    dig_blob(b, EDGE, SEE);
}

fn dig_blob(b: &mut CellBuilder, x: i32, y: i32) {
    for i in x - 2..=x + 3 {
        for j in y - 2..=y + 3 {
            if i > 0 && i < EDGE && j > 0 && j < EDGE {
                b.set(i, j, Terrain::RockFloor);
            }
        }
    }
}

/// Opens north, east and south.
fn ants_tee(b: &mut CellBuilder) {
    b.fill(Terrain::Rock);
    wander_south(b);
    wander_east(b, SEE);
}

fn ants_four_way(b: &mut CellBuilder) {
    b.fill(Terrain::Rock);
    wander_south(b);
    wander_east(b, 0);
}

/// Round chambers around a central hall: food stores, the nursery or the queen's chamber.
fn ants_chamber(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let outside = i < SEE - 4 || i > SEE + 5 || j < SEE - 4 || j > SEE + 5;
            b.set(i, j, if outside { Terrain::Rock } else { Terrain::RockFloor });
        }
    }
    let rooms = b.rng(10, 20);
    for _ in 0..rooms {
        let radius = b.rng(1, 8);
        let Some((x, y)) = pick_tile(b, 1 + radius, 1 + radius, SPAN - 2 - radius, SPAN - 2 - radius, |t| {
            t != Terrain::Rock
        }) else {
            continue;
        };
        for i in x - radius..=x + radius {
            for j in y - radius..=y + radius {
                if trig_dist(Point::new(x, y), Point::new(i, j)) <= radius {
                    b.set(i, j, Terrain::RockFloor);
                }
            }
        }
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
    match b.cell() {
        CellType::AntsFood => {
            b.place_items("ant_food", 92, 0, 0, EDGE, EDGE, true);
        }
        CellType::AntsQueen => {
            b.place_items("ant_egg", 98, 0, 0, EDGE, EDGE, true);
            b.add_spawn("mon_ant_queen", 1, SEE, SEE);
        }
        _ => {
            b.place_items("ant_egg", 98, 0, 0, EDGE, EDGE, true);
            b.add_spawn("mon_ant_larva", 10, SEE, SEE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    fn tunnels() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        r
    }

    fn open(t: Terrain) -> bool {
        t != Terrain::Rock
    }

    #[test]
    fn test_sewer_shapes_open_where_named() {
        let registry = tunnels();
        for cell in registry.cell_types().into_iter().filter(|c| c.is_sewer()) {
            with_builder(cell, Neighbors::default(), 1, |b| {
                registry.generate(b);
                let Some((_, sides)) = cell.network() else {
                    panic!("{} is not a network shape", cell);
                };
                let mouths = [(SEE, 0), (EDGE, SEE), (SEE, EDGE), (0, SEE)];
                for dir in Direction::ALL {
                    let (x, y) = mouths[dir.index()];
                    assert_eq!(b.ter(x, y) == Terrain::Sewage, sides[dir.index()], "{} {:?}", cell, dir);
                }
            });
        }
    }

    #[test]
    fn test_subway_and_ant_shapes_open_where_named() {
        let registry = tunnels();
        let shapes = registry
            .cell_types()
            .into_iter()
            .filter(|c| (c.is_subway() || c.is_ants()) && c.network().is_some());
        for cell in shapes {
            for seed in 0..4 {
                with_builder(cell, Neighbors::default(), seed, |b| {
                    registry.generate(b);
                    let Some((_, sides)) = cell.network() else {
                        panic!("{} is not a network shape", cell);
                    };
                    let mouths = [(SEE, 0), (EDGE, SEE), (SEE, EDGE), (0, SEE)];
                    for dir in Direction::ALL {
                        let (x, y) = mouths[dir.index()];
                        assert_eq!(open(b.ter(x, y)), sides[dir.index()], "{} {:?} seed {}", cell, dir, seed);
                    }
                });
            }
        }
    }

    #[test]
    fn test_subway_below_station_has_stairs() {
        with_builder(CellType::SubwayNs, Neighbors::default(), 2, |b| {
            b.ctx.above = CellType::SubStationNorth;
            subway_straight(b);
            assert_eq!(b.grid.count_terrain(Terrain::StairsUp), 1);
        });
    }

    #[test]
    fn test_station_stairs() {
        let tracks = Neighbors::new(CellType::SubwayNs, CellType::Rock, CellType::SubwayNs, CellType::Rock);
        with_builder(CellType::SubwayStation, tracks, 1, |b| {
            subway_station(b);
            // Corners plus the two platform sides without tracks.
            assert_eq!(b.grid.count_terrain(Terrain::StairsUp), 6);
            assert_eq!(b.ter(SEE, 0), Terrain::RockFloor);
        });
    }

    #[test]
    fn test_queen_chamber() {
        with_builder(CellType::AntsQueen, Neighbors::default(), 5, |b| {
            ants_chamber(b);
            assert_eq!(b.grid.spawns().len(), 1);
            assert_eq!(b.grid.spawns()[0].monster, "mon_ant_queen");
            assert_eq!(b.ter(SEE, SEE), Terrain::RockFloor);
        });
    }
}
