//! Laboratory rooms. `science_room` picks a room kind by size and may split the room
//! in two, recursing into each half until the configured depth.

use super::Rect;
use crate::builder::CellBuilder;
use crate::entities::{ComputerAction, ComputerFailure};
use crate::geometry::Point;
use crate::terrain::{Terrain, Trap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum LabRoom {
    Closet,
    Lobby,
    Chemistry,
    Teleport,
    Goo,
    Cloning,
    Vivisect,
    Bionics,
    Dorm,
    Split,
}

/// Room kinds that fit a room of the given (already rotation-swapped) size.
fn eligible_rooms(b: &mut CellBuilder, height: i32, width: i32, can_split: bool) -> Vec<LabRoom> {
    let area = height * width;
    let mut rooms = Vec::new();
    if height < 5 && width < 5 {
        rooms.push(LabRoom::Closet);
    }
    if height > 6 && width > 3 {
        rooms.push(LabRoom::Lobby);
    }
    if height > 4 || width > 4 {
        rooms.push(LabRoom::Chemistry);
        rooms.push(LabRoom::Goo);
    }
    if (height > 7 || width > 7) && height > 2 && width > 2 {
        rooms.push(LabRoom::Teleport);
    }
    if height > 7 && width > 7 {
        rooms.push(LabRoom::Bionics);
        rooms.push(LabRoom::Cloning);
    }
    if area >= 9 {
        rooms.push(LabRoom::Vivisect);
    }
    if height > 5 && width > 4 {
        rooms.push(LabRoom::Dorm);
    }
    // Wide rooms get several split tickets, so splitting gets likelier with width.
    if can_split && width > 8 {
        let mut i = 8;
        while i < width {
            rooms.push(LabRoom::Split);
            i += b.rng(1, 2);
        }
    }
    rooms
}

/// Fill `r` with lab floor and furnish it as one randomly chosen lab room.
///
/// `rotate` (0..=3) tells which wall the room's entrance faces; odd values swap the
/// room's notion of height and width. Splits recurse with `depth + 1` and stop once
/// `science_split_depth` is reached.
pub fn science_room(b: &mut CellBuilder, r: Rect, rotate: u8, depth: u32) {
    let Rect { x1, y1, x2, y2 } = r;
    let (mut height, mut width) = (y2 - y1, x2 - x1);
    if rotate % 2 == 1 {
        std::mem::swap(&mut height, &mut width);
    }
    b.square(Terrain::Floor, x1, y1, x2, y2);

    let can_split = depth < b.config().science_split_depth;
    let rooms = eligible_rooms(b, height, width, can_split);
    let chosen = b.choose(&rooms).unwrap_or(LabRoom::Closet);
    let trap = Point::new(b.rng(x1 + 1, x2 - 1), b.rng(y1 + 1, y2 - 1));
    let mid = r.center();

    match chosen {
        LabRoom::Closet => {
            b.place_items("cleaning", 80, x1, y1, x2, y2, false);
        }
        LabRoom::Lobby => {
            let desk = b.rng(height / 2 - height / 4, height / 2 + 1);
            let console = if rotate % 2 == 0 {
                let desk = y1 + desk;
                for x in x1 + width / 4..x2 - width / 4 {
                    b.set(x, desk, Terrain::Counter);
                }
                b.add_spawn("mon_turret", 1, mid.x, desk);
                Point::new(x2 - width / 4, desk)
            } else {
                let desk = x1 + desk;
                for y in y1 + width / 4..y2 - width / 4 {
                    b.set(desk, y, Terrain::Counter);
                }
                b.add_spawn("mon_turret", 1, desk, mid.y);
                Point::new(desk, y2 - width / 4)
            };
            if let Some(c) = b.add_computer(console.x, console.y, "Log Console", 3) {
                c.add_option("View Research Logs", ComputerAction::Research, 0)
                    .add_option("Download Map Data", ComputerAction::Maps, 0)
                    .add_failure(ComputerFailure::Shutdown)
                    .add_failure(ComputerFailure::Alarm)
                    .add_failure(ComputerFailure::Damage);
            }
        }
        LabRoom::Chemistry => {
            if rotate % 2 == 0 {
                for x in (x1..=x2).filter(|x| x % 3 == 0) {
                    b.line(Terrain::Counter, x, y1 + 1, x, y2 - 1);
                    b.place_items("chemistry", 70, x, y1 + 1, x, y2 - 1, false);
                }
            } else {
                for y in (y1..=y2).filter(|y| y % 3 == 0) {
                    b.line(Terrain::Counter, x1 + 1, y, x2 - 1, y);
                    b.place_items("chemistry", 70, x1 + 1, y, x2 - 1, y, false);
                }
            }
        }
        LabRoom::Teleport => {
            b.square(Terrain::Counter, mid.x, mid.y, mid.x + 1, mid.y + 1);
            b.set_trap(trap.x, trap.y, Trap::Telepad);
            b.place_items("teleport", 70, mid.x, mid.y, mid.x + 1, mid.y + 1, false);
        }
        LabRoom::Goo => {
            let mut trap = trap;
            loop {
                b.set_trap(trap.x, trap.y, Trap::Goo);
                trap = Point::new(b.rng(x1 + 1, x2 - 1), b.rng(y1 + 1, y2 - 1));
                if b.one_in(5) {
                    break;
                }
            }
            let fridge = match rotate {
                0 => Point::new(x1, y2),
                1 => Point::new(x1, y1),
                2 => Point::new(x2, y1),
                _ => Point::new(x2, y2),
            };
            b.set_trap(fridge.x, fridge.y, Trap::None);
            b.set(fridge.x, fridge.y, Terrain::Fridge);
            b.place_items("goo", 60, fridge.x, fridge.y, fridge.x, fridge.y, false);
        }
        LabRoom::Cloning => {
            for y in y1 + 1..y2 {
                for x in x1 + 1..x2 {
                    if x % 3 == 0 && y % 3 == 0 {
                        b.set(x, y, Terrain::Vat);
                        b.place_items("cloning_vat", 20, x, y, x, y, false);
                    }
                }
            }
        }
        LabRoom::Vivisect => {
            let (from, to) = match rotate {
                0 => (Point::new(x1, y2 - 1), Point::new(x2, y2 - 1)),
                1 => (Point::new(x1 + 1, y1), Point::new(x1 + 1, y2)),
                2 => (Point::new(x1, y1 + 1), Point::new(x2, y1 + 1)),
                _ => (Point::new(x2 - 1, y1), Point::new(x2 - 1, y2)),
            };
            b.line(Terrain::Counter, from.x, from.y, to.x, to.y);
            b.place_items("dissection", 80, from.x, from.y, to.x, to.y, false);
            b.set_trap(mid.x, mid.y, Trap::Dissector);
        }
        LabRoom::Bionics => bionics_room(b, r, rotate),
        LabRoom::Dorm => {
            if rotate % 2 == 0 {
                for y in (y1 + 1..y2).step_by(3) {
                    b.line(Terrain::Bed, x1, y, x1 + 1, y);
                    b.line(Terrain::Bed, x2 - 1, y, x2, y);
                    b.set(x1, y + 1, Terrain::Dresser);
                    b.set(x2, y + 1, Terrain::Dresser);
                    b.place_items("dresser", 70, x1, y + 1, x1, y + 1, false);
                    b.place_items("dresser", 70, x2, y + 1, x2, y + 1, false);
                }
            } else {
                for x in (x1 + 1..x2).step_by(3) {
                    b.line(Terrain::Bed, x, y1, x, y1 + 1);
                    b.line(Terrain::Bed, x, y2 - 1, x, y2);
                    b.set(x + 1, y1, Terrain::Dresser);
                    b.set(x + 1, y2, Terrain::Dresser);
                    b.place_items("dresser", 70, x + 1, y1, x + 1, y1, false);
                    b.place_items("dresser", 70, x + 1, y2, x + 1, y2, false);
                }
            }
            b.place_items("lab_dorm", 84, x1, y1, x2, y2, false);
        }
        LabRoom::Split => {
            if rotate % 2 == 0 {
                let (w1, w2) = (mid.x - 2, mid.x + 2);
                b.line(Terrain::ConcreteWallV, w1, y1, w1, y2);
                b.line(Terrain::ConcreteWallV, w2, y1, w2, y2);
                b.set(w1, mid.y, Terrain::DoorGlassClosed);
                b.set(w2, mid.y, Terrain::DoorGlassClosed);
                science_room(b, Rect::new(x1, y1, w1 - 1, y2), 1, depth + 1);
                science_room(b, Rect::new(w2 + 1, y1, x2, y2), 3, depth + 1);
            } else {
                let (w1, w2) = (mid.y - 2, mid.y + 2);
                b.line(Terrain::ConcreteWallH, x1, w1, x2, w1);
                b.line(Terrain::ConcreteWallH, x1, w2, x2, w2);
                b.set(mid.x, w1, Terrain::DoorGlassClosed);
                b.set(mid.x, w2, Terrain::DoorGlassClosed);
                science_room(b, Rect::new(x1, y1, x2, w1 - 1), 2, depth + 1);
                science_room(b, Rect::new(x1, w2 + 1, x2, y2), 0, depth + 1);
            }
        }
    }
}

/// Two sealed specimen chambers facing each other, each read by its own console.
fn bionics_room(b: &mut CellBuilder, r: Rect, rotate: u8) {
    let chambers: [(Point, [&str; 3], Point); 2] = if rotate % 2 == 0 {
        let bioy = r.center().y;
        [
            (Point::new(r.x1 + 2, bioy), ["---", "|c|", "-=-"], Point::new(r.x1 + 2, bioy + 2)),
            (Point::new(r.x2 - 2, bioy), ["-=-", "|c|", "---"], Point::new(r.x2 - 2, bioy - 2)),
        ]
    } else {
        let biox = r.center().x;
        [
            (Point::new(biox, r.y1 + 2), ["|-|", "|c=", "|-|"], Point::new(biox + 2, r.y1 + 2)),
            (Point::new(biox, r.y2 - 2), ["|-|", "=c|", "|-|"], Point::new(biox - 2, r.y2 - 2)),
        ]
    };
    let glass = if rotate % 2 == 0 { Terrain::ReinforcedGlassH } else { Terrain::ReinforcedGlassV };
    for (chamber, rows, console) in chambers {
        b.stamp(chamber.x - 1, chamber.y - 1, &rows, |c| match c {
            '-' => Some(Terrain::ConcreteWallH),
            '|' => Some(Terrain::ConcreteWallV),
            '=' => Some(glass),
            'c' => Some(Terrain::Counter),
            _ => None,
        });
        b.place_items("bionics_common", 70, chamber.x, chamber.y, chamber.x, chamber.y, false);
        if let Some(c) = b.add_computer(console.x, console.y, "Bionic access", 2) {
            c.add_option("Manifest", ComputerAction::ListBionics, 0)
                .add_option("Open Chambers", ComputerAction::ReleaseBionics, 3)
                .add_failure(ComputerFailure::Manhacks)
                .add_failure(ComputerFailure::Secubots);
        }
    }
}

/// Furnishing of a settlement lab's side room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetScienceRoom {
    Empty,
    Chemistry,
    Hydroponics,
    Electronics,
    MonsterResearch,
}

impl SetScienceRoom {
    fn from_roll(roll: i32) -> Self {
        match roll {
            1 => SetScienceRoom::Chemistry,
            2 => SetScienceRoom::Hydroponics,
            3 => SetScienceRoom::Electronics,
            4 => SetScienceRoom::MonsterResearch,
            _ => SetScienceRoom::Empty,
        }
    }
}

/// Furnish the 8x5 block whose top-left corner is `(x1, y1)`. Layouts open to the east;
/// with `faces_right == false` the finished block is mirrored, items included.
pub fn set_science_room(b: &mut CellBuilder, x1: i32, y1: i32, faces_right: bool) -> SetScienceRoom {
    let kind = SetScienceRoom::from_roll(b.rng(0, 4));
    let (x2, y2) = (x1 + 7, y1 + 4);

    match kind {
        SetScienceRoom::Empty => return kind,
        SetScienceRoom::Chemistry | SetScienceRoom::Electronics => {
            // #######.
            // #.......
            // #######.
            b.line(Terrain::Counter, x1, y1, x1, y2);
            b.line(Terrain::Counter, x1 + 1, y1, x2, y1);
            b.line(Terrain::Counter, x1 + 1, y2, x2, y2);
            let category = if kind == SetScienceRoom::Chemistry { "chemistry" } else { "electronics" };
            b.place_items(category, 85, x1 + 1, y1, x2 - 1, y1, false);
            b.place_items(category, 85, x1 + 1, y2, x2 - 1, y2, false);
            b.place_items(category, 85, x1, y1 + 1, x1, y2 - 1, false);
        }
        SetScienceRoom::Hydroponics => {
            // #.......
            // #.~~~~~.
            // #.......
            // #.~~~~~.
            // #.......
            b.line(Terrain::Counter, x1, y1, x1, y2);
            b.line(Terrain::WaterShallow, x1 + 2, y1 + 1, x2 - 1, y1 + 1);
            b.line(Terrain::WaterShallow, x1 + 2, y2 - 1, x2 - 1, y2 - 1);
            b.place_items("chemistry", 80, x1, y1, x1, y2, false);
            b.place_items("hydro", 92, x1 + 1, y1 + 1, x2 - 1, y1 + 1, false);
            b.place_items("hydro", 92, x1 + 1, y2 - 1, x2 - 1, y2 - 1, false);
        }
        SetScienceRoom::MonsterResearch => {
            // .|.####.
            // -|......
            // .|......
            // -|......
            // .|.####.
            b.line(Terrain::GlassWallV, x1 + 1, y1, x1 + 1, y2);
            b.set(x1, y1 + 1, Terrain::GlassWallH);
            b.set(x1, y2 - 1, Terrain::GlassWallH);
            b.line(Terrain::Counter, x1 + 3, y1, x2 - 1, y1);
            b.line(Terrain::Counter, x1 + 3, y2, x2 - 1, y2);
            b.place_items("monparts", 70, x1 + 3, y1, x2 - 1, y1, false);
            b.place_items("monparts", 70, x1 + 3, y2, x2 - 1, y2, false);
        }
    }

    if !faces_right {
        mirror_horizontally(b, Rect::new(x1, y1, x2, y2));
    }
    kind
}

/// Swap every tile of `r` with its mirror image across the vertical center line.
fn mirror_horizontally(b: &mut CellBuilder, r: Rect) {
    let tiles = b.grid.tiles_mut();
    for y in r.y1..=r.y2 {
        for i in 0..=(r.width() / 2) {
            let (left, right) = (Point::new(r.x1 + i, y), Point::new(r.x2 - i, y));
            if left == right {
                continue;
            }
            let (Some(a), Some(c)) = (tiles.get(left).cloned(), tiles.get(right).cloned()) else {
                continue;
            };
            tiles.set(left, c);
            tiles.set(right, a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::{CellType, Neighbors};

    #[test]
    fn test_science_room_stays_inside_its_rect() {
        for seed in 0..40 {
            with_builder(CellType::Lab, Neighbors::default(), seed, |b| {
                b.fill(Terrain::Rock);
                let r = Rect::new(2, 2, 21, 21);
                science_room(b, r, (seed % 4) as u8, 0);
                for (p, tile) in b.grid.tiles().iter() {
                    if !r.contains(p) {
                        assert_eq!(tile.terrain, Terrain::Rock);
                        assert!(tile.items.is_empty());
                        assert!(tile.trap.is_none());
                    }
                }
                assert!(b.grid.unset_tiles().is_empty());
            });
        }
    }

    #[test]
    fn test_split_depth_zero_never_splits() {
        let catalog = crate::items::ItemCatalog::defaults().unwrap();
        let mut config = crate::config::GenConfig::without_extras();
        config.science_split_depth = 0;
        for seed in 0..30 {
            let ctx = crate::overmap::CellContext::new(CellType::Lab, Neighbors::default(), CellType::Null, 0);
            let mut b = CellBuilder::new(ctx, rand::SeedableRng::seed_from_u64(seed), &catalog, &config);
            b.fill(Terrain::Rock);
            science_room(&mut b, Rect::new(0, 0, 23, 23), 0, 0);
            assert_eq!(b.grid.count_terrain(Terrain::ConcreteWallV), 0);
            assert_eq!(b.grid.count_terrain(Terrain::ConcreteWallH), 0);
        }
    }

    #[test]
    fn test_small_room_is_a_closet() {
        with_builder(CellType::Lab, Neighbors::default(), 5, |b| {
            b.fill(Terrain::Rock);
            science_room(b, Rect::new(0, 0, 3, 3), 0, 0);
            assert_eq!(b.grid.count_terrain(Terrain::Floor), 16);
        });
    }

    #[test]
    fn test_set_science_room_mirrors_when_facing_left() {
        for seed in 0..30 {
            let (right, left) = (
                with_builder(CellType::SetLab, Neighbors::default(), seed, |b| {
                    b.fill(Terrain::Floor);
                    let kind = set_science_room(b, 4, 4, true);
                    (kind, b.grid.clone())
                }),
                with_builder(CellType::SetLab, Neighbors::default(), seed, |b| {
                    b.fill(Terrain::Floor);
                    let kind = set_science_room(b, 4, 4, false);
                    (kind, b.grid.clone())
                }),
            );
            assert_eq!(right.0, left.0);
            for y in 4..=8 {
                for x in 4..=11 {
                    let mirrored = Point::new(11 - (x - 4), y);
                    assert_eq!(right.1.ter(Point::new(x, y)), left.1.ter(mirrored));
                    assert_eq!(right.1.items_at(Point::new(x, y)), left.1.items_at(mirrored));
                }
            }
        }
    }

    #[test]
    fn test_monster_research_items_stay_on_counters() {
        for seed in 0..60 {
            with_builder(CellType::SetLab, Neighbors::default(), seed, |b| {
                b.fill(Terrain::Floor);
                if set_science_room(b, 2, 2, true) == SetScienceRoom::MonsterResearch {
                    for (p, tile) in b.grid.tiles().iter() {
                        if !tile.items.is_empty() {
                            assert_eq!(tile.terrain, Terrain::Counter, "{}", p);
                        }
                    }
                }
            });
        }
    }
}
