//! Public buildings: police station, bank, doctor's office, subway sub station, radio tower
//! and the mansion.

use super::{entered, grass_or_dirt, paint, Registry};
use crate::builder::CellBuilder;
use crate::entities::{ComputerAction, ComputerFailure};
use crate::geometry::Direction;
use crate::grid::{EDGE, SEE};
use crate::overmap::CellType;
use crate::rooms::{mansion_room, Rect};
use crate::terrain::Terrain;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register_rotations(&[PoliceNorth, PoliceEast, PoliceSouth, PoliceWest], entered(police));
    r.register_rotations(&[BankNorth, BankEast, BankSouth, BankWest], entered(bank));
    r.register_rotations(
        &[OfficeDoctorNorth, OfficeDoctorEast, OfficeDoctorSouth, OfficeDoctorWest],
        entered(office_doctor),
    );
    r.register_rotations(&[SubStationNorth, SubStationEast, SubStationSouth, SubStationWest], sub_station);
    r.register(RadioTower, radio_tower);
    r.register(MansionEntrance, entered(mansion_entrance));
    r.register(Mansion, mansion);
}

fn police(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if (j == 7 && i != 17 && i != 18)
            || (j == 12 && i != 0 && i != 17 && i != 18 && i != EDGE)
            || (j == 14 && ((i > 0 && i < 6) || i == 9 || i == 13 || i == 17))
            || (j == 15 && i > 17 && i < EDGE)
            || (j == 17 && i > 0 && i < 17)
            || j == 20
        {
            Terrain::WallH
        } else if ((i == 0 || i == EDGE) && j > 7 && j < 20)
            || (matches!(i, 5 | 10 | 16 | 19) && j > 7 && j < 12)
            || (matches!(i, 5 | 9 | 13) && j > 14 && j < 17)
            || (i == 17 && j > 14 && j < 20)
        {
            Terrain::WallV
        } else if j == 14 && i > 5 && i < 17 && i % 2 == 0 {
            Terrain::Bars
        } else if (i > 1 && i < 4 && j > 8 && j < 11) || (j == 17 && i > 17 && i < 21) {
            Terrain::Counter
        } else if (i == 20 && j > 7 && j < 12) || (j == 8 && i > 19 && i < 23) || (j == 15 && i > 0 && i < 5) {
            Terrain::Locker
        } else if j < 7 {
            Terrain::Pavement
        } else if j > 20 {
            Terrain::Sidewalk
        } else {
            Terrain::Floor
        };
        Some(t)
    });
    b.set(17, 7, Terrain::DoorLocked);
    b.set(18, 7, Terrain::DoorLocked);
    for (lo, hi) in [(1, 4), (6, 9), (11, 15)] {
        let x = b.rng(lo, hi);
        b.set(x, 12, Terrain::DoorClosed);
    }
    b.set(21, 12, Terrain::DoorMetalLocked);
    if let Some(c) = b.add_computer(22, 13, "PolCom OS v1.47", 3) {
        c.add_option("Open Supply Room", ComputerAction::Open, 3)
            .add_failure(ComputerFailure::Shutdown)
            .add_failure(ComputerFailure::Alarm)
            .add_failure(ComputerFailure::Manhacks);
    }
    // Cells
    for x in [7, 11, 15] {
        b.set(x, 14, Terrain::DoorClosed);
    }
    let x = b.rng(20, 22);
    b.set(x, 15, Terrain::DoorClosed);
    b.set(2, 17, Terrain::DoorMetalLocked);
    if let Some(c) = b.add_computer(4, 19, "PolCom OS v1.47", 3) {
        c.add_option("Open Evidence Locker", ComputerAction::Open, 3)
            .add_failure(ComputerFailure::Shutdown)
            .add_failure(ComputerFailure::Alarm)
            .add_failure(ComputerFailure::Manhacks);
    }
    b.set(17, 18, Terrain::DoorClosed);
    b.line(Terrain::Window, 18, 20, EDGE - 1, 20);
    if b.one_in(3) {
        b.line(Terrain::Window, EDGE, 16, EDGE, 19);
    }
    let rn = b.rng(18, 21);
    let front = if b.one_in(4) { Terrain::DoorClosed } else { Terrain::DoorLocked };
    b.line(front, rn, 20, rn + 1, 20);
    for (lo, hi) in [(1, 5), (10, 14)] {
        let rn = b.rng(lo, hi);
        b.line(Terrain::Window, rn, 20, rn + 1, 20);
    }
    // Break room
    if b.one_in(2) {
        b.line(Terrain::Counter, 6, 8, 9, 8);
    }
    if b.one_in(3) {
        b.line(Terrain::Counter, 6, 8, 6, 11);
    }
    if b.one_in(3) {
        b.line(Terrain::Counter, 9, 8, 9, 11);
    }

    b.place_items("kitchen", 40, 6, 8, 9, 11, false);
    b.place_items("cop_armory", 70, 20, 8, 22, 8, false);
    b.place_items("cop_armory", 40, 20, 8, 20, 11, false);
    b.place_items("cop_evidence", 60, 1, 15, 4, 15, false);
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            if b.ter(i, j) == Terrain::Floor && b.one_in(80) {
                b.add_item(i, j, "badge_deputy");
            }
        }
    }
    let (x, y) = (b.rng(11, 15), b.rng(8, 11));
    b.add_spawn("mon_zombie_cop", 2, x, y);
}

fn bank(b: &mut CellBuilder) {
    b.fill_with(grass_or_dirt);
    b.square(Terrain::Floor, 1, 1, 22, 22);
    for (x1, y1, x2, y2) in [
        (1, 1, 22, 1),
        (2, 5, 5, 5),
        (16, 5, 19, 5),
        (2, 9, 19, 9),
        (12, 12, 21, 12),
        (2, 14, 6, 14),
        (13, 16, 21, 16),
        (1, 22, 22, 22),
    ] {
        b.line(Terrain::WallH, x1, y1, x2, y2);
    }
    for (x1, y1, x2, y2) in [
        (1, 2, 1, 21),
        (22, 2, 22, 21),
        (7, 10, 7, 21),
        (12, 12, 12, 21),
        (19, 13, 19, 15),
        (16, 6, 16, 8),
        (19, 6, 19, 8),
    ] {
        b.line(Terrain::WallV, x1, y1, x2, y2);
    }
    b.walled_box(Terrain::MetalWallH, Terrain::MetalWallV, 2, 15, 6, 21);

    b.line(Terrain::DoorGlassClosed, 9, 1, 10, 1);
    b.set(19, 6, Terrain::DoorClosed);
    b.set(12, 17, Terrain::DoorClosed);
    b.set(17, 12, Terrain::DoorClosed);
    b.square(Terrain::DoorMetalLocked, 6, 19, 7, 20);
    let door = if b.one_in(3) { Terrain::DoorLocked } else { Terrain::DoorClosed };
    b.line(door, 20, 9, 21, 9);
    let door = if b.one_in(4) { Terrain::DoorLocked } else { Terrain::DoorClosed };
    b.set(7, 10, door);

    // Lobby
    if b.one_in(2) {
        b.line(Terrain::Chair, 13, 2, 15, 2);
        b.set(14, 2, Terrain::Table);
    }
    if b.one_in(2) {
        b.line(Terrain::Chair, 17, 2, 19, 2);
        b.set(18, 2, Terrain::Table);
    }
    let windowed_front = b.one_in(3);
    if windowed_front {
        for (lo, hi) in [(4, 7), (12, 16), (17, 20)] {
            let x = b.rng(lo, hi);
            b.set(x, 1, Terrain::Window);
        }
    } else {
        b.line(Terrain::GlassWallH, 1, 1, 8, 1);
        b.line(Terrain::GlassWallH, 11, 1, 22, 1);
    }
    if !windowed_front && b.one_in(3) {
        let bottom = if b.one_in(2) { 11 } else { 8 };
        b.line(Terrain::GlassWallV, 22, 2, 22, bottom);
    } else {
        for (lo, hi) in [(3, 5), (6, 8)] {
            let y = b.rng(lo, hi);
            b.set(22, y, Terrain::Window);
        }
    }

    // Tellers
    if b.one_in(2) {
        for x in 7..=15 {
            let t = if x % 2 == 1 { Terrain::Counter } else { Terrain::Window };
            b.set(x, 5, t);
        }
    } else {
        b.line(Terrain::Counter, 7, 5, 15, 5);
    }
    let end = b.rng(9, 11);
    let start = b.rng(2, 4);
    b.line(Terrain::Counter, start, 8, end, 8);
    let x = b.rng(2, 4);
    b.set(x, 5, Terrain::DoorLocked);
    let x = b.rng(13, 15);
    b.set(x, 9, Terrain::DoorClosed);

    b.set(17, 6, Terrain::Sink);
    b.set(17, 8, Terrain::Toilet);

    // Storage
    let (door_x, counter_x) = if b.one_in(2) { (20, 21) } else { (21, 20) };
    let door = if b.one_in(4) { Terrain::DoorLocked } else { Terrain::DoorClosed };
    b.set(door_x, 12, door);
    b.line(Terrain::Counter, counter_x, 13, counter_x, 15);
    b.set(door_x, 15, Terrain::Counter);

    // Interview and executive offices
    let x = if b.one_in(2) { 13 } else { 14 };
    b.set(x, 12, Terrain::DoorClosed);
    b.line(Terrain::Desk, 16, 14, 16, 15);
    b.line(Terrain::Chair, 15, 14, 15, 15);
    b.set(17, 15, Terrain::Chair);
    b.line(Terrain::Desk, 3, 12, 5, 12);
    b.set(4, 13, Terrain::Chair);
    if b.one_in(2) {
        b.set(1, 11, Terrain::Window);
    } else {
        b.set(1, 10, Terrain::Window);
        b.set(1, 12, Terrain::Window);
    }

    // Conference room
    for x in [15, 17, 19] {
        b.line(Terrain::Chair, x, 18, x, 20);
    }
    b.line(Terrain::Table, 15, 19, 19, 19);
    b.set(20, 19, Terrain::Chair);
    if b.one_in(4) {
        b.line(Terrain::GlassWallH, 13, 22, 22, 22);
        b.line(Terrain::GlassWallV, 22, 17, 22, 21);
    } else {
        let x = b.rng(13, 17);
        b.set(x, 22, Terrain::Window);
        let x = b.rng(17, 21);
        b.set(x, 22, Terrain::Window);
        let y = b.rng(18, 20);
        b.set(22, y, Terrain::Window);
    }

    // Vault
    b.line(Terrain::Locker, 3, 16, 5, 16);
    b.line(Terrain::Table, 3, 19, 3, 20);
    if b.one_in(3) {
        b.line(Terrain::Bars, 8, 18, 11, 18);
        b.line(Terrain::DoorMetalLocked, 9, 18, 10, 18);
    }
    if let Some(c) = b.add_computer(8, 21, "Consolidated Computerized Bank of the Treasury", 3) {
        c.add_option("Open Vault", ComputerAction::Open, 3)
            .add_failure(ComputerFailure::Shutdown)
            .add_failure(ComputerFailure::Alarm);
    }

    b.place_items("office", 30, 4, 8, 9, 8, false);
    b.place_items("office", 30, 3, 12, 5, 12, false);
    b.place_items("office", 70, 16, 14, 16, 15, false);
    b.place_items("bank_vault", 50, 3, 19, 3, 20, false);
    b.place_items("bank_vault", 90, 3, 16, 5, 16, false);
}

const DOCTOR_OFFICE: [&str; 24] = [
    "                        ",
    "   |---|----|--------|  ",
    "   |..l|.T.S|..eccScc|  ",
    "   |...+....+........D  ",
    "   |--------|.......6|r ",
    "   |o.......|..|--X--|r ",
    "   |d.hd.h..+..|l...6|  ",
    "   |o.......|..|l...l|  ",
    "   |--------|..|l...l|  ",
    "   |l....ccS|..|lllll|  ",
    "   |l..t....+..|-----|  ",
    "   |l.......|..|....l|  ",
    "   |--|-----|..|.t..l|  ",
    "   |T.|d.......+....l|  ",
    "   |S.|d.h..|..|Scc..|  ",
    "   |-+|-ccc-|++|-----|  ",
    "   |.................|  ",
    "   w....####....####.w  ",
    "   w.................w  ",
    "   |....####....####.|  ",
    "   |.................|  ",
    "   |-++--wwww-wwww---|  ",
    "     ss                 ",
    "     ss                 ",
];

fn doctor_legend(c: char) -> Option<Terrain> {
    let t = match c {
        '.' | 'r' => Terrain::Floor,
        '-' => Terrain::WallH,
        '|' => Terrain::WallV,
        '6' => Terrain::Console,
        'X' => Terrain::DoorMetalLocked,
        '#' => Terrain::Bench,
        't' => Terrain::Table,
        '+' => Terrain::DoorClosed,
        'D' => Terrain::DoorLocked,
        'w' => Terrain::Window,
        'T' => Terrain::Toilet,
        'S' => Terrain::Sink,
        'e' => Terrain::Fridge,
        'o' => Terrain::Bookcase,
        'h' => Terrain::Chair,
        'c' => Terrain::Counter,
        'd' => Terrain::Desk,
        'l' => Terrain::Locker,
        's' => Terrain::Sidewalk,
        _ => return None,
    };
    Some(t)
}

/// Doctor's office: waiting room to the south, exam rooms and a locked supply room.
fn office_doctor(b: &mut CellBuilder) {
    b.fill_with(grass_or_dirt);
    b.stamp(0, 0, &DOCTOR_OFFICE, doctor_legend);
    if let Some(c) = b.add_computer(20, 4, "Medical Supply Access", 2) {
        c.add_option("Unlock Door", ComputerAction::Unlock, 2)
            .add_failure(ComputerFailure::Shutdown)
            .add_failure(ComputerFailure::Alarm);
    }
    // The inner panel shares a submap with the front terminal.
    b.set(20, 6, Terrain::ConsoleBroken);
    if b.one_in(2) {
        b.add_item(7, 6, "record_patient");
    }
    b.place_items("dissection", 60, 4, 9, 4, 11, false);
    b.place_items("dissection", 60, 9, 9, 10, 9, false);
    b.place_items("dissection", 60, 20, 11, 20, 13, false);
    b.place_items("dissection", 60, 17, 14, 18, 14, false);
    b.place_items("fridge", 50, 15, 2, 15, 2, false);
    b.place_items("doctor", 30, 4, 9, 11, 11, false);
    b.place_items("doctor", 30, 16, 4, 20, 11, false);
    b.place_items("harddrugs", 60, 16, 6, 16, 9, false);
    b.place_items("harddrugs", 60, 17, 9, 19, 9, false);
    b.place_items("softdrugs", 60, 20, 7, 20, 9, false);
    b.place_items("cleaning", 50, 4, 2, 6, 3, false);
}

/// Vending slots along the inner walls of the sub station, numbered west, south, east.
fn vending_slot(n: i32) -> (i32, i32) {
    if n < 3 {
        (5, n + 9)
    } else if n < 15 {
        (5 + (n - 3), 11)
    } else {
        (18, 11 - (n - 15))
    }
}

/// Street-level entrance to the subway.
fn sub_station(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if !(9..=12).contains(&j) || !(4..=19).contains(&i) {
            Terrain::Pavement
        } else if j < 12 && (i == 4 || i == 19) {
            Terrain::WallV
        } else if j == 12 {
            Terrain::WallH
        } else {
            Terrain::Floor
        };
        Some(t)
    });
    let drinks_first = b.one_in(2);
    let first = b.rng(0, 17);
    let mut machines = vec![(first, drinks_first)];
    if b.one_in(3) {
        let mut second = b.rng(0, 16);
        if second >= first {
            second += 1;
        }
        machines.push((second, !drinks_first));
    }
    for (slot, drinks) in machines {
        let (x, y) = vending_slot(slot);
        if drinks {
            b.set(x, y, Terrain::GlassFridge);
            b.place_items("fridgesnacks", 90, x, y, x, y, false);
        } else {
            b.set(x, y, Terrain::Rack);
            b.place_items("snacks", 90, x, y, x, y, false);
        }
    }
    b.set(16, 10, Terrain::StairsDown);
    b.place_items("sub_station", 30, 5, 9, 18, 11, false);
}

fn radio_tower(b: &mut CellBuilder) {
    b.fill_with(grass_or_dirt);
    let lw = b.rng(1, EDGE - 1);
    let tw = b.rng(1, EDGE - 1);
    b.square(Terrain::RadioTower, lw, tw, lw + 3, tw + 3);
    let rw = if lw <= 4 {
        Some(b.rng(lw + 5, 10))
    } else if lw >= 16 {
        Some(b.rng(3, lw - 13))
    } else {
        None
    };
    let bw = if tw <= 3 {
        Some(b.rng(tw + 5, 10))
    } else if tw >= 16 {
        Some(b.rng(3, tw - 7))
    } else {
        None
    };
    match (rw, bw) {
        (Some(rw), Some(bw)) => {
            // Control room
            b.square(Terrain::Floor, rw, bw, rw + 11, bw + 5);
            b.walled_box(Terrain::WallH, Terrain::WallV, rw, bw, rw + 11, bw + 5);
            b.line(Terrain::Counter, rw + 1, bw + 1, rw + 10, bw + 1);
            let cw = b.rng(rw + 2, rw + 8);
            b.line(Terrain::Window, cw, bw + 5, cw + 1, bw + 5);
            let x = b.rng(rw + 2, rw + 8);
            b.set(x, bw + 5, Terrain::DoorClosed);
            let x = b.rng(rw + 2, rw + 8);
            b.set(x, bw + 1, Terrain::RadioControls);
            b.place_items("radio", 60, rw + 1, bw + 2, rw + 10, bw + 4, true);
        }
        _ => {
            let x = b.rng(lw, lw + 3);
            b.set(x, tw + 4, Terrain::RadioControls);
        }
    }
}

/// Axis the mansion splits its quadrants on. Split walls avoid the two center rows so doors
/// into neighboring mansion cells always land mid-wall.
const MANSION_SPLITS: [i32; 4] = [8, 9, 14, 15];

/// Connect to neighboring mansion cells through the middle of the shared edge.
fn mansion_passages(b: &mut CellBuilder) {
    for dir in Direction::ALL {
        if !b.neighbor(dir).is_mansion() {
            continue;
        }
        for k in [SEE - 1, SEE] {
            let (x, y) = match dir {
                Direction::North => (k, 0),
                Direction::South => (k, EDGE),
                Direction::West => (0, k),
                Direction::East => (EDGE, k),
            };
            b.set(x, y, Terrain::DoorClosed);
        }
    }
}

/// Front lawn, a foyer lined with armor and two rooms in each wing.
fn mansion_entrance(b: &mut CellBuilder) {
    b.fill_with(grass_or_dirt);
    b.square(Terrain::Sidewalk, SEE - 1, 0, SEE, 3);
    for x in (1..EDGE).filter(|x| !(SEE - 2..=SEE + 1).contains(x)) {
        b.set(x, 2, Terrain::Shrub);
    }
    for r in [Rect::new(0, 4, 8, 13), Rect::new(0, 13, 8, EDGE), Rect::new(15, 4, EDGE, 13), Rect::new(15, 13, EDGE, EDGE)] {
        mansion_room(b, r);
    }
    // Foyer
    b.square(Terrain::FloorWax, 8, 4, 15, EDGE);
    b.walled_box(Terrain::WallH, Terrain::WallV, 8, 4, 15, EDGE);
    for y in (7..EDGE - 1).step_by(4) {
        b.set(9, y, Terrain::SuitOfArmor);
        b.set(14, y, Terrain::SuitOfArmor);
    }
    let front = if b.one_in(3) { Terrain::DoorLocked } else { Terrain::DoorClosed };
    b.line(front, SEE - 1, 4, SEE, 4);
    for x in [3, 5, EDGE - 5, EDGE - 3] {
        b.set(x, 4, Terrain::Window);
    }
    for x in [8, 15] {
        let y = b.rng(5, 12);
        b.set(x, y, Terrain::DoorClosed);
        let y = b.rng(14, EDGE - 1);
        b.set(x, y, Terrain::DoorClosed);
    }
    mansion_passages(b);
}

/// Four rooms around a randomly placed pair of split walls.
fn mansion(b: &mut CellBuilder) {
    let sx = b.choose(&MANSION_SPLITS).unwrap_or(8);
    let sy = b.choose(&MANSION_SPLITS).unwrap_or(8);
    for r in [
        Rect::new(0, 0, sx, sy),
        Rect::new(sx, 0, EDGE, sy),
        Rect::new(0, sy, sx, EDGE),
        Rect::new(sx, sy, EDGE, EDGE),
    ] {
        mansion_room(b, r);
    }
    // Every quadrant opens onto its neighbors.
    let doors = [
        (sx, b.rng(1, sy - 1)),
        (sx, b.rng(sy + 1, EDGE - 1)),
        (b.rng(1, sx - 1), sy),
        (b.rng(sx + 1, EDGE - 1), sy),
    ];
    for (x, y) in doors {
        b.set(x, y, Terrain::DoorClosed);
    }
    mansion_passages(b);
    if b.one_in(3) {
        let (x, y) = (b.rng(1, EDGE - 1), b.rng(1, EDGE - 1));
        let count = b.rng(1, 3) as u32;
        if b.ter(x, y) == Terrain::FloorWax {
            b.add_spawn("mon_zombie", count, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::geometry::Point;
    use crate::overmap::Neighbors;

    fn civic() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        r
    }

    #[test]
    fn test_civic_buildings_fill_the_cell() {
        let registry = civic();
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
    fn test_police_station_has_two_terminals() {
        with_builder(CellType::PoliceNorth, Neighbors::default(), 3, |b| {
            police(b);
            assert_eq!(b.grid.computers().len(), 2);
            assert_eq!(b.ter(17, 7), Terrain::DoorLocked);
            assert_eq!(b.grid.spawns().len(), 1);
        });
    }

    #[test]
    fn test_bank_vault_terminal() {
        with_builder(CellType::BankNorth, Neighbors::default(), 9, |b| {
            bank(b);
            let vault = &b.grid.computers()[0];
            assert_eq!(vault.pos, Point::new(8, 21));
            assert_eq!(vault.options[0].action, ComputerAction::Open);
            assert_eq!(b.ter(9, 1), Terrain::DoorGlassClosed);
        });
    }

    #[test]
    fn test_doctor_office_layout_is_stamped() {
        with_builder(CellType::OfficeDoctorNorth, Neighbors::default(), 2, |b| {
            office_doctor(b);
            assert_eq!(b.ter(18, 5), Terrain::DoorMetalLocked);
            assert_eq!(b.ter(20, 4), Terrain::Console);
            assert_eq!(b.ter(5, 22), Terrain::Sidewalk);
            assert_eq!(b.grid.computers().len(), 1);
        });
    }

    #[test]
    fn test_sub_station_stairs() {
        with_builder(CellType::SubStationNorth, Neighbors::default(), 4, |b| {
            sub_station(b);
            assert_eq!(b.ter(16, 10), Terrain::StairsDown);
            assert_eq!(b.ter(0, 0), Terrain::Pavement);
        });
    }

    #[test]
    fn test_radio_tower_has_controls() {
        for seed in 0..20 {
            with_builder(CellType::RadioTower, Neighbors::default(), seed, |b| {
                radio_tower(b);
                assert_eq!(b.grid.count_terrain(Terrain::RadioControls), 1, "seed {}", seed);
                assert!(b.grid.count_terrain(Terrain::RadioTower) > 0);
            });
        }
    }

    #[test]
    fn test_mansion_opens_only_toward_mansion_neighbors() {
        let closed = Neighbors::uniform(CellType::Field);
        let open_north = Neighbors::new(CellType::MansionEntrance, CellType::Field, CellType::Field, CellType::Field);
        for seed in 0..10 {
            with_builder(CellType::Mansion, closed, seed, |b| {
                mansion(b);
                for k in 0..=EDGE {
                    for (x, y) in [(k, 0), (k, EDGE), (0, k), (EDGE, k)] {
                        assert!(!b.ter(x, y).is_door(), "door on the edge at {},{}", x, y);
                    }
                }
            });
            with_builder(CellType::Mansion, open_north, seed, |b| {
                mansion(b);
                assert!(b.ter(SEE - 1, 0).is_door());
                assert!(b.ter(SEE, 0).is_door());
            });
        }
    }

    #[test]
    fn test_mansion_entrance_front_door() {
        with_builder(CellType::MansionEntrance, Neighbors::default(), 6, |b| {
            mansion_entrance(b);
            assert!(b.ter(SEE, 4).is_door());
            assert_eq!(b.ter(SEE, 0), Terrain::Sidewalk);
            assert!(b.grid.count_terrain(Terrain::SuitOfArmor) >= 8);
        });
    }
}
