//! Storefronts. Every shop is laid out facing north with its entrance on the street side
//! and registered for all four orientations.

use super::{entered, paint, Registry};
use crate::builder::CellBuilder;
use crate::grid::{EDGE, GRID_SIZE, SEE};
use crate::overmap::CellType;
use crate::terrain::Terrain;

const SPAN: i32 = GRID_SIZE as i32;

pub(crate) fn register(r: &mut Registry) {
    use CellType::*;
    r.register_rotations(&[GasNorth, GasEast, GasSouth, GasWest], entered(gas_station));
    r.register_rotations(&[PharmNorth, PharmEast, PharmSouth, PharmWest], entered(pharmacy));
    r.register_rotations(&[GroceryNorth, GroceryEast, GrocerySouth, GroceryWest], entered(grocery));
    r.register_rotations(&[HardwareNorth, HardwareEast, HardwareSouth, HardwareWest], entered(hardware));
    r.register_rotations(&[SportsNorth, SportsEast, SportsSouth, SportsWest], entered(sports));
    r.register_rotations(&[LiquorNorth, LiquorEast, LiquorSouth, LiquorWest], entered(liquor));
    r.register_rotations(&[GunNorth, GunEast, GunSouth, GunWest], entered(gun_store));
    r.register_rotations(&[ClothesNorth, ClothesEast, ClothesSouth, ClothesWest], entered(clothes));
    r.register_rotations(&[LibraryNorth, LibraryEast, LibrarySouth, LibraryWest], entered(library));
}

/// Pumps on the forecourt, a shop floor with racks and a back office with a toilet.
fn gas_station(b: &mut CellBuilder) {
    let tw = b.rng(5, 14);
    let bw = SPAN - b.rng(1, 2);
    let mw = b.rng(tw + 5, bw - 3).max(bw - 5);
    let lw = b.rng(0, 3);
    let rw = SPAN - b.rng(1, 4);
    let cw = b.rng(lw + 4, rw - 5);
    // Pump spacing
    let rn = b.rng(3, 6);
    paint(b, |i, j| {
        let t = if j < tw && (tw - j) % 4 == 0 && i > lw && i < rw && (i - (1 + lw)) % rn == 0 {
            Terrain::GasPump
        } else if (j < 2 && i > 7 && i < 16) || (j < tw && i > lw && i < rw) {
            Terrain::Pavement
        } else if j == tw && (i == lw + 6 || i == lw + 7 || i == rw - 7 || i == rw - 6) {
            Terrain::Window
        } else if ((j == tw || j == bw) && i >= lw && i <= rw) || (j == mw && i >= cw && i < rw) {
            Terrain::WallH
        } else if ((i == lw || i == rw) && j > tw && j < bw) || (j > mw && j < bw && (i == cw || i == rw - 2)) {
            Terrain::WallV
        } else if i == lw + 1 && j > tw && j < bw {
            Terrain::Fridge
        } else if i > lw + 2 && i < lw + 12 && i < cw && i % 2 == 1 && j > tw + 1 && j < mw - 1 {
            Terrain::Rack
        } else if (i == rw - 5 && j > tw + 1 && j < tw + 4) || (j == tw + 3 && i > rw - 5 && i < rw) {
            Terrain::Counter
        } else if i > lw && i < rw && j > tw && j < bw {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    let y = b.rng(mw + 1, bw - 1);
    b.set(cw, y, Terrain::DoorClosed);
    b.set(rw - 1, mw, Terrain::DoorClosed);
    b.set(rw - 1, bw - 1, Terrain::Toilet);
    let x = b.rng(10, 13);
    b.set(x, tw, Terrain::DoorClosed);
    if b.one_in(5) {
        let x = b.rng(lw + 1, cw - 1);
        let door = if b.one_in(4) { Terrain::DoorClosed } else { Terrain::DoorLocked };
        b.set(x, bw, door);
    }
    let first = lw + if lw % 2 == 0 { 3 } else { 4 };
    let mut i = first;
    while i < cw && i < lw + 12 {
        let category = if b.one_in(2) { "snacks" } else { "magazines" };
        b.place_items(category, 74, i, tw + 2, i, mw - 2, false);
        i += 2;
    }
    b.place_items("fridgesnacks", 82, lw + 1, tw + 1, lw + 1, bw - 1, false);
    b.place_items("road", 12, 0, 0, EDGE, tw - 1, false);
    b.place_items("behindcounter", 70, rw - 4, tw + 1, rw - 1, tw + 2, false);
    b.place_items("softdrugs", 12, rw - 1, bw - 2, rw - 1, bw - 2, false);
}

fn pharmacy(b: &mut CellBuilder) {
    let tw = b.rng(0, 4);
    let bw = SPAN - b.rng(1, 5);
    // Top and left side of the storage room
    let mw = bw - b.rng(3, 4);
    let lw = b.rng(0, 4);
    let rw = SPAN - b.rng(1, 5);
    let cw = b.rng(13, rw - 5);
    paint(b, |i, j| {
        let t = if j == tw && ((i > lw + 2 && i < lw + 6) || (i > rw - 6 && i < rw - 2)) {
            Terrain::Window
        } else if (j == tw && (i == lw + 8 || i == lw + 9)) || (i == cw && j == mw + 1) {
            Terrain::DoorClosed
        } else if ((j == tw || j == bw) && i >= lw && i <= rw) || (j == mw && i >= cw && i < rw) {
            Terrain::WallH
        } else if ((i == lw || i == rw) && j > tw && j < bw) || (i == cw && j > mw && j < bw) {
            Terrain::WallV
        } else if ((i == lw + 8 || i == lw + 9 || i == rw - 4 || i == rw - 3) && j > tw + 3 && j < mw - 2)
            || (j == bw - 1 && i > lw + 1 && i < cw - 1)
        {
            Terrain::Rack
        } else if (i == lw + 1 && j > tw + 8 && j < mw - 1) || (j == mw - 1 && i > cw + 1 && i < rw) {
            Terrain::Fridge
        } else if (j == mw && i > lw + 1 && i < cw)
            || (j == tw + 6 && i > lw + 1 && i < lw + 6)
            || (i == lw + 5 && j > tw && j < tw + 7)
        {
            Terrain::Counter
        } else if i > lw && i < rw && j > tw && j < bw {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });

    let aisle = if b.one_in(3) {
        "snacks"
    } else if b.one_in(4) {
        "cleaning"
    } else {
        "magazines"
    };
    b.place_items(aisle, 74, lw + 8, tw + 4, lw + 8, mw - 3, false);
    let aisle = if b.one_in(5) {
        "softdrugs"
    } else if b.one_in(4) {
        "cleaning"
    } else {
        "snacks"
    };
    b.place_items(aisle, 74, lw + 9, tw + 4, lw + 9, mw - 3, false);
    let aisle = if b.one_in(5) { "softdrugs" } else { "snacks" };
    b.place_items(aisle, 74, rw - 4, tw + 4, rw - 4, mw - 3, false);
    let aisle = if b.one_in(3) { "snacks" } else { "softdrugs" };
    b.place_items(aisle, 70, rw - 3, tw + 4, rw - 3, mw - 3, false);
    b.place_items("fridgesnacks", 74, lw + 1, tw + 9, lw + 1, mw - 2, false);
    b.place_items("fridgesnacks", 74, cw + 2, mw - 1, rw - 1, mw - 1, false);
    b.place_items("harddrugs", 65, lw + 2, bw - 1, cw - 2, bw - 1, false);
    b.place_items("behindcounter", 78, lw + 1, tw + 1, lw + 4, tw + 5, false);
}

fn grocery(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if j == 2 && ((i > 4 && i < 8) || (i > 15 && i < 19)) {
            Terrain::Window
        } else if (j == 2 && (i == 11 || i == 12)) || (i == 6 && j == 20) {
            Terrain::DoorClosed
        } else if ((j == 2 || j == SPAN - 3) && i > 1 && i < SPAN - 2) || (j == 18 && i > 2 && i < 7) {
            Terrain::WallH
        } else if ((i == 2 || i == SPAN - 3) && j > 2 && j < SPAN - 3) || (i == 6 && j == 19) {
            Terrain::WallV
        } else if j > 4 && j < 8 {
            // Checkout lanes
            if matches!(i, 5 | 9 | 13 | 17) {
                Terrain::Counter
            } else if matches!(i, 8 | 12 | 16 | 20) {
                Terrain::Rack
            } else if i > 2 && i < SPAN - 3 {
                Terrain::Floor
            } else {
                return None;
            }
        } else if (j == 7 && (i == 3 || i == 4))
            || ((j == 11 || j == 14) && (i == 18 || i == 19))
            || (j > 9 && j < 16 && matches!(i, 6 | 7 | 10 | 11 | 14 | 15 | 20))
        {
            Terrain::Rack
        } else if (j == 18 && i > 15 && i < 21) || (j == 19 && i == 16) {
            Terrain::Counter
        } else if (i == 3 && j > 9 && j < 16) || (j == 20 && ((i > 7 && i < 15) || (i > 18 && i < 21))) {
            Terrain::Fridge
        } else if i > 2 && i < SPAN - 3 && j > 2 && j < SPAN - 3 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    b.place_items("fridgesnacks", 60, 3, 10, 3, 15, false);
    b.place_items("fridge", 70, 8, 20, 14, 20, false);
    b.place_items("fridge", 50, 19, 20, 20, 20, false);
    b.place_items("softdrugs", 45, 6, 10, 6, 15, false);
    b.place_items("cleaning", 68, 7, 10, 7, 15, false);
    b.place_items("kitchen", 55, 10, 10, 10, 15, false);
    b.place_items("snacks", 75, 11, 10, 11, 15, false);
    b.place_items("cannedfood", 70, 14, 10, 14, 15, false);
    b.place_items("pasta", 74, 15, 10, 15, 15, false);
    b.place_items("produce", 60, 20, 10, 20, 15, false);
    b.place_items("produce", 50, 18, 11, 19, 11, false);
    b.place_items("produce", 50, 18, 10, 20, 15, false);
    for i in (8..21).step_by(4) {
        b.place_items("snacks", 50, i, 5, i, 6, false);
        b.place_items("magazines", 70, i, 7, i, 7, false);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BackArea {
    Closed,
    Door,
    Paved,
}

fn hardware(b: &mut CellBuilder) {
    let back = if !b.one_in(3) {
        BackArea::Door
    } else if b.one_in(3) {
        BackArea::Paved
    } else {
        BackArea::Closed
    };
    paint(b, |i, j| {
        let t = if j == 3 && ((i > 5 && i < 9) || (i > 14 && i < 18)) {
            Terrain::Window
        } else if (j == 3 && i > 1 && i < SPAN - 2)
            || (j == 15 && i > 1 && i < 14)
            || (j == SPAN - 3 && i > 12 && i < SPAN - 2)
        {
            Terrain::WallH
        } else if (i == 2 && j > 3 && j < 15)
            || (i == SPAN - 3 && j > 3 && j < SPAN - 3)
            || (i == 13 && j > 15 && j < SPAN - 3)
        {
            Terrain::WallV
        } else if (i > 3 && i < 10 && j == 6) || (i == 9 && j > 3 && j < 7) {
            Terrain::Counter
        } else if (matches!(i, 3 | 6 | 7 | 10 | 11) && j > 8 && j < 15)
            || (i == SPAN - 4 && j > 3 && j < SPAN - 4)
            || (i > 14 && i < 18 && matches!(j, 8 | 9 | 12 | 13))
            || (j == SPAN - 4 && i > 13 && i < SPAN - 4)
            || (i > 15 && i < 18 && j > 15 && j < 18)
            || (i == 9 && j == 7)
        {
            Terrain::Rack
        } else if (i > 2 && i < SPAN - 3 && j > 3 && j < 15) || (i > 13 && i < SPAN - 3 && j > 14 && j < SPAN - 3) {
            Terrain::Floor
        } else if back == BackArea::Paved && i > 1 && i < 13 && j > 15 && j < SPAN - 3 {
            Terrain::Pavement
        } else {
            return None;
        };
        Some(t)
    });
    let x = b.rng(10, 13);
    b.set(x, 3, Terrain::DoorClosed);
    if back != BackArea::Closed {
        let y = b.rng(16, 19);
        let door = if b.one_in(3) { Terrain::DoorClosed } else { Terrain::DoorLocked };
        b.set(13, y, door);
    }
    if back == BackArea::Paved {
        if b.one_in(5) {
            let x = b.rng(4, 10);
            b.set(x, 16, Terrain::GasPump);
        }
        if b.one_in(3) {
            let startx = b.rng(2, 11);
            let starty = if startx == 11 { 18 } else { b.rng(18, 19) };
            let horizontal = starty != 18;
            let (w, h) = if horizontal { (3, 2) } else { (2, 3) };
            b.square(Terrain::Dumpster, startx, starty, startx + w, starty + h);
            b.place_items("trash", 30, startx, starty, startx + w, starty + h, false);
        }
        b.place_items("road", 30, 2, 16, 12, SPAN - 3, false);
    }

    b.place_items("magazines", 70, 9, 7, 9, 7, false);
    if b.one_in(4) {
        b.place_items("snacks", 70, 9, 7, 9, 7, false);
    }
    for x in [3, 6] {
        let category = if !b.one_in(3) {
            "hardware"
        } else if !b.one_in(3) {
            "tools"
        } else {
            "bigtools"
        };
        b.place_items(category, 80, x, 9, x, 14, false);
    }
    for x in [7, 10] {
        let category = if !b.one_in(4) {
            "tools"
        } else if b.one_in(4) {
            "mischw"
        } else {
            "hardware"
        };
        b.place_items(category, 80, x, 9, x, 14, false);
    }
    let category = if !b.one_in(3) {
        "bigtools"
    } else if b.one_in(2) {
        "cleaning"
    } else {
        "tools"
    };
    b.place_items(category, 75, 11, 9, 11, 14, false);
    let category = if b.one_in(2) { "cleaning" } else { "snacks" };
    b.place_items(category, 65, 15, 8, 17, 8, false);
    for y in [9, 12] {
        let category = if b.one_in(4) { "hardware" } else { "cleaning" };
        b.place_items(category, 74, 15, y, 17, y, false);
    }
    b.place_items("mischw", 90, 20, 4, 20, 19, false);
}

/// Sporting goods with an optional striped lot out front.
fn sports(b: &mut CellBuilder) {
    let lw = b.rng(0, 3);
    let rw = EDGE - b.rng(0, 3);
    let tw = b.rng(3, 10);
    let bw = EDGE - b.rng(0, 3);
    let cw = bw - b.rng(3, 5);
    paint(b, |i, j| {
        let t = if ((j == tw || j == bw) && i >= lw && i <= rw) || (j == cw && i > lw && i < rw) {
            Terrain::WallH
        } else if (i == lw || i == rw) && j > tw && j < bw {
            Terrain::WallV
        } else if (j == cw - 1 && i > lw && i < rw - 4) || (j < cw - 3 && j > tw && (i == lw + 1 || i == rw - 1)) {
            Terrain::Rack
        } else if j == cw - 3 && i > lw && i < rw - 4 {
            Terrain::Counter
        } else if j > tw && j < bw && i > lw && i < rw {
            Terrain::Floor
        } else if tw >= 6 && j >= tw - 6 && j < tw && i >= lw && i <= rw {
            if (i - lw) % 4 == 0 {
                Terrain::PavementYellow
            } else {
                Terrain::Pavement
            }
        } else {
            return None;
        };
        Some(t)
    });
    let rn = b.rng(tw + 2, cw - 6);
    let mut i = lw + 3;
    while i <= rw - 5 {
        if cw - 6 > tw + 1 {
            b.square(Terrain::Rack, i, rn, i + 1, rn + 1);
            b.place_items("camping", 86, i, rn, i + 1, rn + 1, false);
        } else if cw - 5 > tw + 1 {
            b.line(Terrain::Rack, i, cw - 5, i + 1, cw - 5);
            b.place_items("camping", 80, i, cw - 5, i + 1, cw - 5, false);
        }
        i += 4;
    }
    let x = rw - b.rng(2, 3);
    b.set(x, cw, Terrain::DoorClosed);
    let rn = b.rng(2, 4);
    for i in lw + 2..=lw + 2 + rn {
        b.set(i, tw, Terrain::Window);
    }
    for i in rw - 2 - rn..=rw - 2 {
        b.set(i, tw, Terrain::Window);
    }
    let x = b.rng(lw + 3 + rn, rw - 3 - rn);
    b.set(x, tw, Terrain::DoorClosed);
    if b.one_in(4) {
        let x = b.rng(lw + 2, rw - 2);
        b.set(x, bw, Terrain::DoorLocked);
    }
    b.place_items("allsporting", 90, lw + 1, cw - 1, rw - 5, cw - 1, false);
    b.place_items("sports", 82, lw + 1, tw + 1, lw + 1, cw - 4, false);
    b.place_items("sports", 82, rw - 1, tw + 1, rw - 1, cw - 4, false);
    if !b.one_in(4) {
        b.place_items("allsporting", 92, lw + 1, cw + 1, rw - 1, bw - 1, false);
    }
}

fn liquor(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if j == 2 && (i == 5 || i == 18) {
            Terrain::Window
        } else if ((j == 2 || j == 12) && i > 2 && i < SPAN - 3) || (j == 9 && i > 3 && i < 8) {
            Terrain::WallH
        } else if ((i == 3 || i == SPAN - 4) && j > 2 && j < 12) || (i == 7 && j > 9 && j < 12) {
            Terrain::WallV
        } else if (i == 19 && j > 6 && j < 12) || (j == 11 && i > 16 && i < 19) {
            Terrain::Fridge
        } else if (matches!(i, 4 | 7 | 8) && j > 2 && j < 8)
            || (j == 3 && i > 8 && i < 12)
            || (i > 10 && i < 13 && j > 4 && j < 7)
            || (i > 10 && i < 16 && j > 7 && j < 10)
        {
            Terrain::Rack
        } else if (i == 16 && j > 2 && j < 6) || (j == 5 && i > 16 && i < 19) {
            Terrain::Counter
        } else if (i > 4 && i < 8 && j > 12 && j < 15) || (i > 17 && i < 20 && j > 14 && j < 18) {
            Terrain::Dumpster
        } else if i > 2 && i < SPAN - 3 && j > 2 && j < 12 {
            Terrain::Floor
        } else if i > 2 && i < SPAN - 3 && j > 12 && j < EDGE {
            Terrain::Pavement
        } else {
            return None;
        };
        Some(t)
    });
    let x = b.rng(13, 15);
    b.set(x, 2, Terrain::DoorClosed);
    let x = b.rng(4, 6);
    b.set(x, 9, Terrain::DoorClosed);
    let x = b.rng(9, 16);
    b.set(x, 12, Terrain::DoorClosed);

    b.place_items("alcohol", 96, 4, 3, 4, 7, false);
    b.place_items("alcohol", 96, 7, 3, 11, 3, false);
    b.place_items("alcohol", 96, 7, 4, 8, 7, false);
    b.place_items("alcohol", 96, 11, 8, 15, 9, false);
    b.place_items("snacks", 85, 11, 5, 12, 6, false);
    b.place_items("fridgesnacks", 90, 19, 7, 19, 10, false);
    b.place_items("fridgesnacks", 90, 17, 11, 19, 11, false);
    b.place_items("behindcounter", 80, 17, 3, 19, 4, false);
    b.place_items("trash", 30, 5, 14, 7, 14, false);
    b.place_items("trash", 30, 18, 15, 18, 17, false);
}

/// Gun store: a parking strip in front and a glass-walled display behind the counter.
fn gun_store(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if (i == 2 || i == SPAN - 3) && j > 6 && j < EDGE {
            Terrain::WallV
        } else if (i == 8 && j > 6 && j < 13) || (j == 16 && matches!(i, 5 | 8 | 11 | 14 | 17)) {
            Terrain::Counter
        } else if j == 6 && ((i > 4 && i < 8) || (i > 15 && i < 19)) {
            Terrain::Window
        } else if j == 14 && i > 3 && i < 15 {
            Terrain::GlassWallH
        } else if j == 16 && i == SPAN - 4 {
            Terrain::DoorClosed
        } else if ((j == 6 || j == EDGE) && i > 1 && i < SPAN - 2) || ((j == 16 || j == 14) && i > 2 && i < SPAN - 3) {
            Terrain::WallH
        } else if ((i == 3 || i == SPAN - 4) && j > 6 && j < 14)
            || (j > 8 && j < 12 && matches!(i, 12 | 13 | 16))
            || (j == 13 && i > 15 && i < SPAN - 4)
        {
            Terrain::Rack
        } else if i > 2 && i < SPAN - 3 && j > 6 && j < EDGE {
            Terrain::Floor
        } else if j > 0 && j < 6 && (matches!(i, 2 | 6 | 10 | 17) || i == SPAN - 3) {
            Terrain::PavementYellow
        } else if j < 6 && i > 1 && i < SPAN - 2 {
            Terrain::Pavement
        } else {
            return None;
        };
        Some(t)
    });
    let x = b.rng(11, 14);
    b.set(x, 6, Terrain::DoorClosed);
    let x = b.rng(5, 14);
    b.set(x, 14, Terrain::DoorClosed);
    b.place_items("pistols", 70, 12, 9, 13, 11, false);
    b.place_items("shotguns", 60, 16, 9, 16, 11, false);
    b.place_items("rifles", 80, 20, 7, 20, 12, false);
    b.place_items("smg", 25, 3, 7, 3, 8, false);
    b.place_items("assault", 18, 3, 9, 3, 10, false);
    b.place_items("ammo", 93, 3, 11, 3, 13, false);
    b.place_items("allguns", 12, 5, 16, 17, 16, false);
    b.place_items("gunxtras", 67, 16, 13, 19, 13, false);
}

fn clothes(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if j == 2 && (i == 11 || i == 12) {
            Terrain::DoorClosed
        } else if j == 2 && i > 3 && i < SPAN - 4 {
            Terrain::GlassWallH
        } else if ((j == 2 || j == SPAN - 2) && i > 1 && i < SPAN - 2)
            || (j == 4 && i > 12 && i < SPAN - 3)
            || (j == 17 && i > 2 && i < 12)
            || (j == 20 && i > 2 && i < 11)
        {
            Terrain::WallH
        } else if ((i == 2 || i == SPAN - 3) && j > 1 && j < EDGE)
            || (i == 11 && matches!(j, 18 | 20 | 21))
            || (j == 21 && (i == 5 || i == 8))
        {
            Terrain::WallV
        } else if (i == 16 && j > 4 && j < 9) || (j == 8 && (i == 17 || i == 18)) || (j == 18 && i > 2 && i < 11) {
            Terrain::Counter
        } else if (i == 3 && j > 4 && j < 13)
            || (i == SPAN - 4 && j > 9 && j < 20)
            || ((j == 10 || j == 11) && i > 6 && i < 13)
            || ((j == 14 || j == 15) && i > 4 && i < 13)
            || ((i == 15 || i == 16) && j > 10 && j < 18)
            || (j == SPAN - 3 && i > 11 && i < 18)
        {
            Terrain::Rack
        } else if i > 2 && i < SPAN - 3 && j > 2 && j < SPAN - 2 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });

    // Changing room doors
    for i in [3, 6, 9] {
        let x = if b.one_in(2) { i } else { i + 1 };
        b.set(x, SPAN - 4, Terrain::DoorClosed);
    }

    b.place_items("shoes", 70, 7, 10, 12, 10, false);
    b.place_items("pants", 88, 5, 14, 12, 14, false);
    b.place_items("shirts", 88, 7, 11, 12, 11, false);
    b.place_items("jackets", 80, 3, 5, 3, 12, false);
    b.place_items("winter", 60, 5, 15, 12, 15, false);
    b.place_items("bags", 70, 15, 11, 15, 17, false);
    b.place_items("dresser", 50, 12, 21, 17, 21, false);
    b.place_items("allclothes", 20, 3, 21, 10, 21, false);
    b.place_items("allclothes", 20, 3, 18, 10, 18, false);
    let category = ["pants", "shirts", "bags"][b.rng(0, 2) as usize];
    b.place_items(category, 70, 16, 11, 16, 17, false);
    let category = ["pants", "shirts", "jackets"][b.rng(0, 2) as usize];
    b.place_items(category, 75, 20, 10, 20, 19, false);
}

fn library(b: &mut CellBuilder) {
    paint(b, |i, j| {
        let t = if j == 2 {
            if matches!(i, 5 | 6 | 17 | 18) {
                Terrain::Window
            } else if i == SEE - 1 || i == SEE {
                Terrain::DoorClosed
            } else if i > 1 && i < SPAN - 2 {
                Terrain::WallH
            } else {
                return None;
            }
        } else if j == 17 && i > 1 && i < SPAN - 2 {
            Terrain::WallH
        } else if i == 2 {
            if matches!(j, 6 | 7 | 10 | 11 | 14 | 15) {
                Terrain::Window
            } else if j > 1 && j < 17 {
                Terrain::WallV
            } else {
                return None;
            }
        } else if i == SPAN - 3 {
            if j == 6 || j == 7 {
                Terrain::Window
            } else if j > 1 && j < 17 {
                Terrain::WallV
            } else {
                return None;
            }
        } else if ((j == 4 || j == 5) && i > 2 && i < 10)
            || (matches!(j, 8 | 9 | 12 | 13 | 16) && i > 2 && i < 16)
            || (i == 20 && j > 7 && j < 17)
        {
            Terrain::Bookcase
        } else if (i == 14 && j < 6 && j > 2) || (j == 5 && i > 14 && i < 19) {
            Terrain::Counter
        } else if i > 2 && i < SPAN - 3 && j > 2 && j < 17 {
            Terrain::Floor
        } else {
            return None;
        };
        Some(t)
    });
    if !b.one_in(3) {
        b.set(18, 17, Terrain::DoorClosed);
    }
    b.place_items("magazines", 70, 3, 4, 9, 4, false);
    b.place_items("magazines", 70, 20, 8, 20, 16, false);
    b.place_items("novels", 96, 3, 5, 9, 5, false);
    b.place_items("novels", 96, 3, 8, 15, 9, false);
    b.place_items("manuals", 92, 3, 12, 15, 13, false);
    b.place_items("textbooks", 88, 3, 16, 15, 16, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::geometry::Point;
    use crate::overmap::Neighbors;
    use crate::rotation::rotate_point;

    fn shops() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        r
    }

    #[test]
    fn test_every_shop_leaves_no_unset_tiles() {
        let registry = shops();
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
    fn test_gas_station_has_pumps_and_a_toilet() {
        for seed in 0..10 {
            with_builder(CellType::GasNorth, Neighbors::default(), seed, |b| {
                gas_station(b);
                assert!(b.grid.count_terrain(Terrain::GasPump) > 0);
                assert_eq!(b.grid.count_terrain(Terrain::Toilet), 1);
            });
        }
    }

    #[test]
    fn test_library_front_door_faces_the_street() {
        let registry = shops();
        with_builder(CellType::LibrarySouth, Neighbors::default(), 3, |b| {
            registry.generate(b);
            let door = rotate_point(Point::new(SEE, 2), 2);
            assert_eq!(b.grid.ter(door), Terrain::DoorClosed);
            assert_eq!(door.y, EDGE - 2);
        });
    }

    #[test]
    fn test_library_and_liquor_stock_their_shelves() {
        with_builder(CellType::LibraryNorth, Neighbors::default(), 7, |b| {
            library(b);
            assert!(b.grid.total_items() > 0);
            assert!(b.grid.count_terrain(Terrain::Bookcase) > 50);
        });
        with_builder(CellType::LiquorNorth, Neighbors::default(), 7, |b| {
            liquor(b);
            assert_eq!(b.grid.count_terrain(Terrain::DoorClosed), 3);
        });
    }

    #[test]
    fn test_grocery_is_fixed_layout() {
        with_builder(CellType::GroceryNorth, Neighbors::default(), 1, |b| {
            grocery(b);
            assert_eq!(b.ter(SEE, 2), Terrain::DoorClosed);
            assert_eq!(b.ter(5, 6), Terrain::Counter);
            assert_eq!(b.ter(3, 12), Terrain::Fridge);
        });
    }
}
