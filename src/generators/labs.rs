//! Science laboratories: the fenced surface entrance, underground floors in three layouts,
//! sewer-flooded floors and the finale chamber.
//!
//! Adjacent lab cells share walls: each cell draws its own east and south boundary and
//! leaves north and west open when a lab lies that way.

use super::{pick_tile, Registry};
use crate::builder::CellBuilder;
use crate::connectivity::connects_to;
use crate::entities::{ComputerAction, ComputerFailure};
use crate::geometry::Direction;
use crate::grid::{EDGE, SEE};
use crate::overmap::{CellType, Network};
use crate::rooms::{science_room, Rect};
use crate::terrain::{Terrain, Trap};

const NETHER_MONSTERS: [&str; 8] = [
    "mon_flying_polyp",
    "mon_hunting_horror",
    "mon_mi_go",
    "mon_yugg",
    "mon_gelatin",
    "mon_flaming_eye",
    "mon_kreck",
    "mon_blank",
];

pub(crate) fn register(r: &mut Registry) {
    r.register(CellType::Lab, lab);
    r.register(CellType::LabStairs, lab);
    r.register(CellType::LabCore, lab);
    r.register(CellType::LabFinale, lab_finale);
}

/// Wall thickness on each side: 0 or 1 where another lab continues, 2 where the lab ends.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    tw: i32,
    rw: i32,
    bw: i32,
    lw: i32,
}

impl Bounds {
    fn of(b: &CellBuilder) -> Self {
        let lab = |dir| b.neighbor(dir).is_lab();
        Self {
            tw: if lab(Direction::North) { 0 } else { 2 },
            rw: if lab(Direction::East) { 1 } else { 2 },
            bw: if lab(Direction::South) { 1 } else { 2 },
            lw: if lab(Direction::West) { 0 } else { 2 },
        }
    }

    fn right(&self) -> i32 {
        EDGE - self.rw
    }

    fn bottom(&self) -> i32 {
        EDGE - self.bw
    }
}

/// Doors through the east and south walls shared with a neighboring lab.
fn shared_doors(b: &mut CellBuilder, w: Bounds) {
    if w.rw == 1 {
        b.line(Terrain::DoorMetalClosed, EDGE, SEE - 1, EDGE, SEE);
    }
    if w.bw == 1 {
        b.line(Terrain::DoorMetalClosed, SEE - 1, EDGE, SEE, EDGE);
    }
}

fn stairs_or_center(b: &mut CellBuilder, w: Bounds, stairs: Terrain) {
    match pick_tile(b, w.lw, w.tw, w.right(), w.bottom(), |t| t == Terrain::Floor) {
        Some((x, y)) => b.set(x, y, stairs),
        None => {
            log::warn!("lab has no free floor for {:?}, forcing it at the center", stairs);
            b.set(SEE, SEE, stairs);
        }
    }
}

fn lab(b: &mut CellBuilder) {
    if b.above() == CellType::Null {
        lab_surface(b);
    } else if sewer_sides(b).iter().any(|&s| s) {
        lab_flooded(b);
    } else {
        let w = Bounds::of(b);
        match b.rng(1, 3) {
            1 => lab_cross(b, w),
            2 => lab_tic_tac_toe(b, w),
            _ => lab_big_room(b, w),
        }
    }
    ant_damage(b);
    if b.above() == CellType::Null {
        slime_damage(b);
    }
}

/// Fenced entrance building with a card reader and stairs leading down.
fn lab_surface(b: &mut CellBuilder) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i <= 1 || i >= EDGE - 1 || (j > 1 && j < EDGE - 1 && (i == SEE - 2 || i == SEE + 1)) {
                Terrain::MetalWallV
            } else if j <= 1 || j >= EDGE - 1 {
                Terrain::MetalWallH
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
    b.line(Terrain::Dirt, SEE - 1, 0, SEE, 0);
    b.line(Terrain::DoorMetalLocked, SEE - 1, 1, SEE, 1);
    let reader = SEE - 2 + b.rng(0, 1) * 4;
    b.set(reader, 0, Terrain::CardReaderScience);
    for x in [SEE - 2, SEE + 1] {
        b.line(Terrain::DoorMetalClosed, x, SEE - 1, x, SEE);
    }
    b.line(Terrain::StairsDown, SEE - 1, EDGE - 2, SEE, EDGE - 2);
    science_room(b, Rect::new(2, 2, SEE - 3, EDGE - 2), 1, 0);
    science_room(b, Rect::new(SEE + 2, 2, EDGE - 2, EDGE - 2), 3, 0);
    b.add_spawn("mon_turret", 1, SEE, 5);

    let facing = [(Direction::East, 1), (Direction::South, 2), (Direction::West, 3)]
        .into_iter()
        .find(|&(dir, _)| b.neighbor(dir).is_road());
    if let Some((_, turns)) = facing {
        b.rotate(turns);
    }
}

/// Sides whose neighbor is a sewer tunnel opening onto this cell.
fn sewer_sides(b: &CellBuilder) -> [bool; 4] {
    let mut open = [false; 4];
    for dir in Direction::ALL {
        let n = b.neighbor(dir);
        open[dir.index()] = n.is_network(Network::Sewer) && connects_to(n, dir.opposite());
    }
    open
}

/// A floor the sewers broke into: sewage channels cross it and run under barred walls.
fn lab_flooded(b: &mut CellBuilder) {
    let open = sewer_sides(b);
    let vertical = open[Direction::North.index()] || open[Direction::South.index()];
    let horizontal = open[Direction::East.index()] || open[Direction::West.index()];
    let west_wall = !b.neighbor(Direction::West).is_lab();
    let north_wall = !b.neighbor(Direction::North).is_lab();
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let sewage = (horizontal && j > SEE - 3 && j < SEE + 2) || (vertical && i > SEE - 3 && i < SEE + 2);
            let t = if (i == 0 && west_wall) || i == EDGE {
                if sewage {
                    Terrain::Bars
                } else if j == SEE - 1 || j == SEE {
                    Terrain::DoorMetalClosed
                } else {
                    Terrain::WallV
                }
            } else if (j == 0 && north_wall) || j == EDGE {
                if sewage {
                    Terrain::Bars
                } else if i == SEE - 1 || i == SEE {
                    Terrain::DoorMetalClosed
                } else {
                    Terrain::WallH
                }
            } else if sewage {
                Terrain::Sewage
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
}

/// Four rooms around a cross-shaped corridor.
fn lab_cross(b: &mut CellBuilder, w: Bounds) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < w.lw || i > w.right() || ((j < SEE - 1 || j > SEE) && (i == SEE - 2 || i == SEE + 1)) {
                Terrain::WallV
            } else if j < w.tw || j > w.bottom() || ((i < SEE - 1 || i > SEE) && (j == SEE - 2 || j == SEE + 1)) {
                Terrain::WallH
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
    if b.above() == CellType::LabStairs {
        let (x, y) = (b.rng(SEE - 1, SEE), b.rng(SEE - 1, SEE));
        b.set(x, y, Terrain::StairsUp);
    }
    let half = SEE / 2;
    // Each quadrant opens either onto the vertical or the horizontal corridor.
    if b.one_in(2) {
        b.set(SEE - 2, half, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(w.lw, w.tw, SEE - 3, SEE - 3), 1, 0);
    } else {
        b.set(half, SEE - 2, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(w.lw, w.tw, SEE - 3, SEE - 3), 2, 0);
    }
    if b.one_in(2) {
        b.set(SEE + 1, half, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(SEE + 2, w.tw, w.right(), SEE - 3), 3, 0);
    } else {
        b.set(SEE + half, SEE - 2, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(SEE + 2, w.tw, w.right(), SEE - 3), 2, 0);
    }
    if b.one_in(2) {
        b.set(half, SEE + 1, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(w.lw, SEE + 2, SEE - 3, w.bottom()), 0, 0);
    } else {
        b.set(SEE - 2, SEE + half, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(w.lw, SEE + 2, SEE - 3, w.bottom()), 1, 0);
    }
    if b.one_in(2) {
        b.set(SEE + half, SEE + 1, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(SEE + 2, SEE + 2, w.right(), w.bottom()), 0, 0);
    } else {
        b.set(SEE + 1, SEE + half, Terrain::DoorMetalClosed);
        science_room(b, Rect::new(SEE + 2, SEE + 2, w.right(), w.bottom()), 3, 0);
    }
    shared_doors(b, w);

    if b.cell() == CellType::LabStairs {
        // Repeated entries weight the stairs towards the outer walls.
        let mut spots = Vec::new();
        if w.tw != 0 {
            spots.extend([(SEE - 1, 2), (SEE - 1, 2), (SEE, 2), (SEE, 2)]);
        }
        if w.rw != 1 {
            spots.extend([(EDGE - 2, SEE - 1), (EDGE - 2, SEE - 1), (EDGE - 2, SEE), (EDGE - 2, SEE)]);
        }
        if w.bw != 1 {
            spots.extend([(SEE - 1, EDGE - 2), (SEE - 1, EDGE - 2), (SEE, EDGE - 2), (SEE, EDGE - 2)]);
        }
        if w.lw != 0 {
            spots.extend([(2, SEE - 1), (2, SEE - 1), (2, SEE), (2, SEE)]);
        }
        spots.extend([
            (half, SEE),
            (half, SEE - 1),
            (half + SEE, SEE),
            (half + SEE, SEE - 1),
            (SEE, half),
            (SEE + 2, half),
            (SEE, half + SEE),
            (SEE + 2, half + SEE),
        ]);
        if let Some((x, y)) = b.choose(&spots) {
            b.set(x, y, Terrain::StairsDown);
        }
    }
}

/// A 3x3 grid of rooms; the middle one is a bare hall.
fn lab_tic_tac_toe(b: &mut CellBuilder, w: Bounds) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < w.lw || i > w.right() || i == SEE - 4 || i == SEE + 3 {
                Terrain::WallV
            } else if j < w.tw || j > w.bottom() || j == SEE - 4 || j == SEE + 3 {
                Terrain::WallH
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
    if b.above() == CellType::LabStairs {
        b.square(Terrain::StairsUp, SEE - 1, SEE - 1, SEE, SEE);
    }
    let half = SEE / 2;
    let doors = [
        (SEE - b.rng(0, 1), SEE - 4),
        (SEE - b.rng(0, 1), SEE + 3),
        (SEE - 4, SEE + b.rng(0, 1)),
        (SEE + 3, SEE + b.rng(0, 1)),
        (SEE - 4, half),
        (SEE + 3, half),
        (half, SEE - 4),
        (half, SEE + 3),
        (SEE + half, SEE - 4),
        (SEE + half, SEE + 3),
        (SEE - 4, SEE + half),
        (SEE + 3, SEE + half),
    ];
    for (x, y) in doors {
        b.set(x, y, Terrain::DoorMetalClosed);
    }
    let top_left = b.rng(1, 2) as u8;
    science_room(b, Rect::new(w.lw, w.tw, SEE - 5, SEE - 5), top_left, 0);
    science_room(b, Rect::new(SEE - 3, w.tw, SEE + 2, SEE - 5), 2, 0);
    let top_right = b.rng(2, 3) as u8;
    science_room(b, Rect::new(SEE + 4, w.tw, w.right(), SEE - 5), top_right, 0);
    science_room(b, Rect::new(w.lw, SEE - 3, SEE - 5, SEE + 2), 1, 0);
    science_room(b, Rect::new(SEE + 4, SEE - 3, w.right(), SEE + 2), 3, 0);
    let bottom_left = b.rng(0, 1) as u8;
    science_room(b, Rect::new(w.lw, SEE + 4, SEE - 5, w.bottom()), bottom_left, 0);
    science_room(b, Rect::new(SEE - 3, SEE + 4, SEE + 2, w.bottom()), 0, 0);
    let bottom_right = 3 * b.rng(0, 1) as u8;
    science_room(b, Rect::new(SEE + 4, SEE + 4, w.right(), w.bottom()), bottom_right, 0);
    shared_doors(b, w);
    if b.cell() == CellType::LabStairs {
        let (x, y) = (SEE - 3 + 5 * b.rng(0, 1), SEE - 3 + 5 * b.rng(0, 1));
        b.set(x, y, Terrain::StairsDown);
    }
}

/// One large room, possibly split further by the room builder.
fn lab_big_room(b: &mut CellBuilder, w: Bounds) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < w.lw || i >= w.right() {
                Terrain::WallV
            } else if j < w.tw || j >= w.bottom() {
                Terrain::WallH
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
    let rotate = b.rng(0, 3) as u8;
    science_room(b, Rect::new(w.lw, w.tw, w.right(), w.bottom()), rotate, 0);
    if b.above() == CellType::LabStairs {
        stairs_or_center(b, w, Terrain::StairsUp);
    }
    shared_doors(b, w);
    if b.cell() == CellType::LabStairs {
        stairs_or_center(b, w, Terrain::StairsDown);
    }
}

/// Ant tunnels opening onto the cell tear up the half of the floor facing them.
fn ant_damage(b: &mut CellBuilder) {
    let mut open = [false; 4];
    for dir in Direction::ALL {
        let n = b.neighbor(dir);
        open[dir.index()] = n.is_ants() && connects_to(n, dir.opposite());
    }
    if !open.iter().any(|&o| o) {
        return;
    }
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let mut wreck = false;
            for dir in Direction::ALL {
                if !open[dir.index()] {
                    continue;
                }
                let (toward, across) = match dir {
                    Direction::North => (j < SEE, i),
                    Direction::South => (j >= SEE, i),
                    Direction::East => (i >= SEE, j),
                    Direction::West => (i < SEE, j),
                };
                if toward && ((SEE - 5..SEE + 5).contains(&across) || !b.one_in(3)) {
                    wreck = true;
                }
            }
            if wreck {
                let t = if b.one_in(5) { Terrain::Rubble } else { Terrain::RockFloor };
                b.set(i, j, t);
            }
        }
    }
}

/// A neighboring slime pit oozes into the triangle of the cell facing it.
fn slime_damage(b: &mut CellBuilder) {
    let pits: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&dir| b.neighbor(dir) == CellType::Slimepit)
        .collect();
    if pits.is_empty() {
        return;
    }
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let slimed = pits.iter().any(|dir| match dir {
                Direction::North => j <= i && j <= EDGE - i,
                Direction::South => j >= i && j >= EDGE - i,
                Direction::East => i >= j && i >= EDGE - j,
                Direction::West => i <= j && i <= EDGE - j,
            });
            if !slimed {
                continue;
            }
            if b.one_in(5) {
                b.set(i, j, Terrain::Rubble);
            } else if !b.one_in(5) {
                b.set(i, j, Terrain::Slime);
            }
        }
    }
}

fn lab_finale(b: &mut CellBuilder) {
    let w = Bounds::of(b);
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = if i < w.lw || i > w.right() {
                Terrain::WallV
            } else if j < w.tw || j > w.bottom() {
                Terrain::WallH
            } else {
                Terrain::Floor
            };
            b.set(i, j, t);
        }
    }
    shared_doors(b, w);
    match b.rng(1, 3) {
        1 => weapons_test(b),
        2 => nether_access(b),
        _ => bionics_vault(b),
    }
}

fn secubot_corners(b: &mut CellBuilder) {
    for (x, y) in [(6, 6), (EDGE - 6, 6), (6, EDGE - 6), (EDGE - 6, EDGE - 6)] {
        b.add_spawn("mon_secubot", 1, x, y);
    }
}

fn dissector_ring(b: &mut CellBuilder) {
    for (x, y) in [(SEE - 2, SEE - 2), (SEE + 1, SEE - 2), (SEE - 2, SEE + 1), (SEE + 1, SEE + 1)] {
        b.set_trap(x, y, Trap::Dissector);
    }
}

fn weapons_test(b: &mut CellBuilder) {
    secubot_corners(b);
    dissector_ring(b);
    b.add_item(SEE - 4, SEE - 2, "id_science");
    if !b.one_in(3) {
        let packs = b.dice(4, 3) as usize;
        b.add_items(SEE - 1, SEE - 1, "laser_pack", packs);
        b.add_items(SEE + 1, SEE - 1, "laser_pack", packs);
        b.add_item(SEE - 1, SEE, "v29");
        b.add_item(SEE + 1, SEE, "ftk93");
    } else if !b.one_in(3) {
        let nukes = b.dice(3, 6) as usize;
        for (x, y) in [(SEE - 1, SEE - 1), (SEE, SEE - 1), (SEE - 1, SEE), (SEE, SEE)] {
            b.add_items(x, y, "mininuke", nukes);
        }
    } else {
        b.square(Terrain::Rack, SEE - 2, SEE - 1, SEE + 1, SEE);
        b.place_items("ammo", 96, SEE - 2, SEE - 1, SEE + 1, SEE - 1, false);
        b.place_items("allguns", 96, SEE - 2, SEE, SEE + 1, SEE, false);
    }
}

/// Contact console with captured specimens caged in glass to the south.
fn nether_access(b: &mut CellBuilder) {
    let caged = !b.one_in(4);
    if caged {
        let tw = b.rng(SEE + 3, SEE + 5);
        let bw = tw + 4;
        let lw = b.rng(SEE - 6, SEE - 2);
        let rw = lw + 6;
        for i in lw..=rw {
            for j in tw..=bw {
                if j == tw || j == bw {
                    let t = if (i - lw) % 2 == 0 { Terrain::WallH } else { Terrain::ReinforcedGlassH };
                    b.set(i, j, t);
                } else if (i - lw) % 2 == 0 {
                    b.set(i, j, Terrain::WallV);
                } else if j == tw + 2 {
                    b.set(i, j, Terrain::WallH);
                } else if let Some(monster) = b.choose(&NETHER_MONSTERS) {
                    b.add_spawn(monster, 1, i, j);
                }
            }
        }
    }
    b.add_item(SEE - 1, 8, "id_science");
    if let Some(c) = b.add_computer(SEE, 8, "Sub-prime contact console", 7) {
        if caged {
            c.add_option("Terminate Specimens", ComputerAction::Terminate, 2)
                .add_option("Release Specimens", ComputerAction::ReleaseSpecimens, 3);
        }
        c.add_option("Toggle Portal", ComputerAction::Portal, 8)
            .add_option("Activate Resonance Cascade", ComputerAction::Cascade, 10)
            .add_failure(ComputerFailure::Manhacks)
            .add_failure(ComputerFailure::Secubots);
    }
    for (x, y) in [(SEE - 2, 4), (SEE + 1, 4), (SEE - 2, 7), (SEE + 1, 7)] {
        b.set(x, y, Terrain::RadioTower);
    }
}

/// Implants on a counter inside a glass box, released from a terminal.
fn bionics_vault(b: &mut CellBuilder) {
    secubot_corners(b);
    dissector_ring(b);
    b.square(Terrain::Counter, SEE - 1, SEE - 1, SEE, SEE);
    let mut placed = 0;
    for _ in 0..20 {
        if placed >= 5 {
            break;
        }
        placed += b.place_items("bionics", 75, SEE - 1, SEE - 1, SEE, SEE, false);
    }
    b.line(Terrain::ReinforcedGlassH, SEE - 2, SEE - 2, SEE + 1, SEE - 2);
    b.line(Terrain::ReinforcedGlassH, SEE - 2, SEE + 1, SEE + 1, SEE + 1);
    b.line(Terrain::ReinforcedGlassV, SEE - 2, SEE - 1, SEE - 2, SEE);
    b.line(Terrain::ReinforcedGlassV, SEE + 1, SEE - 1, SEE + 1, SEE);
    b.add_item(SEE - 4, SEE - 3, "id_science");
    if let Some(c) = b.add_computer(SEE - 3, SEE - 3, "Bionic access", 3) {
        c.add_option("Manifest", ComputerAction::ListBionics, 0)
            .add_option("Open Chambers", ComputerAction::ReleaseBionics, 5)
            .add_failure(ComputerFailure::Manhacks)
            .add_failure(ComputerFailure::Secubots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::geometry::Point;
    use crate::overmap::Neighbors;
    use crate::rotation::rotate_point;

    #[test]
    fn test_surface_lab_entrance() {
        with_builder(CellType::Lab, Neighbors::default(), 3, |b| {
            lab(b);
            assert_eq!(b.ter(SEE - 1, 1), Terrain::DoorMetalLocked);
            assert_eq!(b.grid.count_terrain(Terrain::StairsDown), 2);
            assert_eq!(b.grid.count_terrain(Terrain::CardReaderScience), 1);
            assert_eq!(b.grid.spawns().len(), 1);
        });
    }

    #[test]
    fn test_surface_lab_faces_road() {
        let east_road = Neighbors::new(CellType::Field, CellType::RoadNs, CellType::Field, CellType::Field);
        with_builder(CellType::Lab, east_road, 3, |b| {
            lab(b);
            let door = rotate_point(Point::new(SEE - 1, 1), 1);
            assert_eq!(b.grid.ter(door), Terrain::DoorMetalLocked);
        });
    }

    #[test]
    fn test_underground_stairs_lab_has_one_way_down() {
        for seed in 0..12 {
            with_builder(CellType::LabStairs, Neighbors::uniform(CellType::Lab), seed, |b| {
                b.ctx.above = CellType::Field;
                lab(b);
                assert_eq!(b.grid.count_terrain(Terrain::StairsDown), 1, "seed {}", seed);
                assert_eq!(b.ter(EDGE, SEE), Terrain::DoorMetalClosed);
                assert!(b.grid.unset_tiles().is_empty());
            });
        }
    }

    #[test]
    fn test_sewer_floods_lab() {
        let north_sewer = Neighbors::new(CellType::SewerNs, CellType::Lab, CellType::Lab, CellType::Lab);
        with_builder(CellType::Lab, north_sewer, 1, |b| {
            b.ctx.above = CellType::Field;
            lab(b);
            assert_eq!(b.ter(SEE, 5), Terrain::Sewage);
            assert_eq!(b.ter(SEE - 1, EDGE), Terrain::Bars);
            assert_eq!(b.ter(SEE - 1, 0), Terrain::Bars);
            assert_eq!(b.ter(3, SEE), Terrain::Floor);
        });
    }

    #[test]
    fn test_ants_wreck_facing_half() {
        let west_ants = Neighbors::new(CellType::Lab, CellType::Lab, CellType::Lab, CellType::AntsEw);
        with_builder(CellType::Lab, west_ants, 2, |b| {
            b.ctx.above = CellType::Field;
            lab(b);
            for i in 0..SEE {
                let t = b.ter(i, SEE);
                assert!(t == Terrain::Rubble || t == Terrain::RockFloor, "({}, {}) is {:?}", i, SEE, t);
            }
        });
    }

    #[test]
    fn test_finale_is_guarded() {
        for seed in 0..12 {
            with_builder(CellType::LabFinale, Neighbors::uniform(CellType::Lab), seed, |b| {
                b.ctx.above = CellType::Field;
                lab_finale(b);
                let traps = (0..=EDGE)
                    .flat_map(|x| (0..=EDGE).map(move |y| Point::new(x, y)))
                    .filter(|&p| b.grid.trap(p) == Trap::Dissector)
                    .count();
                assert!(traps == 4 || b.grid.computers().len() == 1, "seed {}", seed);
                assert!(b.grid.unset_tiles().is_empty());
            });
        }
    }
}
