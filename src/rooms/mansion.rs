//! Mansion rooms: a room kind is classified from the rectangle's proportions, then
//! furnished symmetrically along its longer axis.

use super::{door_side, Rect};
use crate::builder::CellBuilder;
use crate::geometry::Point;
use crate::terrain::Terrain;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MansionRoom {
    Courtyard,
    Bedroom,
    Bathroom,
    Library,
    GameRoom,
    DiningRoom,
    Gallery,
    Kitchen,
    Study,
}

impl MansionRoom {
    /// Kinds that fit an interior of `short` x `long` tiles.
    pub fn eligible(short: i32, long: i32) -> Vec<MansionRoom> {
        let area = short * long;
        let mut kinds = Vec::new();
        if short >= 7 {
            kinds.push(MansionRoom::Courtyard);
        }
        if (12..=48).contains(&area) && short >= 3 && long >= 5 {
            kinds.push(MansionRoom::Bedroom);
        }
        if area <= 12 {
            kinds.push(MansionRoom::Bathroom);
        }
        if long >= 6 && short >= 3 {
            kinds.push(MansionRoom::Library);
        }
        if short >= 5 && long >= 6 {
            kinds.push(MansionRoom::GameRoom);
        }
        if short >= 4 && long >= 7 {
            kinds.push(MansionRoom::DiningRoom);
        }
        if long >= 8 && short >= 3 {
            kinds.push(MansionRoom::Gallery);
        }
        if area >= 12 && short >= 3 {
            kinds.push(MansionRoom::Kitchen);
        }
        if (6..=30).contains(&area) && short >= 3 {
            kinds.push(MansionRoom::Study);
        }
        kinds
    }
}

/// Interior coordinates measured along the room's long axis (`a`) and across it (`c`).
struct Axes {
    inner: Rect,
    horizontal: bool,
}

impl Axes {
    fn new(r: Rect) -> Self {
        let inner = r.inner();
        Self {
            inner,
            horizontal: inner.width() >= inner.height(),
        }
    }

    /// Tiles along the long axis.
    fn long(&self) -> i32 {
        if self.horizontal {
            self.inner.width() + 1
        } else {
            self.inner.height() + 1
        }
    }

    fn short(&self) -> i32 {
        if self.horizontal {
            self.inner.height() + 1
        } else {
            self.inner.width() + 1
        }
    }

    fn at(&self, a: i32, c: i32) -> Point {
        if self.horizontal {
            Point::new(self.inner.x1 + a, self.inner.y1 + c)
        } else {
            Point::new(self.inner.x1 + c, self.inner.y1 + a)
        }
    }

    /// `p` and its mirror across the long axis.
    fn pair(&self, a: i32, c: i32) -> [Point; 2] {
        [self.at(a, c), self.at(a, self.short() - 1 - c)]
    }
}

/// Classify `r`, wall it, cut a door and furnish it. Returns the chosen kind.
pub fn mansion_room(b: &mut CellBuilder, r: Rect) -> MansionRoom {
    let axes = Axes::new(r);
    let kinds = MansionRoom::eligible(axes.short(), axes.long());
    let kind = b.choose(&kinds).unwrap_or(MansionRoom::Bathroom);
    build_mansion_room(b, kind, r);
    kind
}

/// Build a room of a known kind into `r`.
pub fn build_mansion_room(b: &mut CellBuilder, kind: MansionRoom, r: Rect) {
    let axes = Axes::new(r);
    let inner = axes.inner;
    let floor = if kind == MansionRoom::Courtyard { Terrain::Grass } else { Terrain::FloorWax };
    b.square(floor, r.x1, r.y1, r.x2, r.y2);
    b.walled_box(Terrain::WallH, Terrain::WallV, r.x1, r.y1, r.x2, r.y2);
    let side = door_side(b, r);
    let wall = r.wall_tiles(side);
    if let Some(door) = b.choose(&wall) {
        b.set(door.x, door.y, Terrain::DoorClosed);
    }

    let (long, short) = (axes.long(), axes.short());
    let mid = long / 2;
    let set_pair = |b: &mut CellBuilder, a: i32, c: i32, t: Terrain| {
        for p in axes.pair(a, c) {
            b.set(p.x, p.y, t);
        }
    };

    match kind {
        MansionRoom::Courtyard => {
            let c = inner.center();
            b.set(c.x, c.y, Terrain::Fountain);
            set_pair(b, mid, 1, Terrain::Bench);
            for a in [0, long - 1] {
                set_pair(b, a, 0, Terrain::Shrub);
            }
            for a in (2..long - 2).step_by(4) {
                set_pair(b, a, 0, Terrain::TreeYoung);
            }
        }
        MansionRoom::Bedroom => {
            let head = axes.at(mid, 0);
            let foot = axes.at(mid, 1);
            b.set(head.x, head.y, Terrain::Bed);
            b.set(foot.x, foot.y, Terrain::Bed);
            for a in [mid - 2, mid + 2] {
                let p = axes.at(a, 0);
                b.set(p.x, p.y, Terrain::Dresser);
                b.place_items("dresser", 80, p.x, p.y, p.x, p.y, false);
            }
            b.place_items("bedroom", 65, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::Bathroom => {
            let toilet = axes.at(0, 0);
            let sink = axes.at(long - 1, 0);
            b.set(toilet.x, toilet.y, Terrain::Toilet);
            b.set(sink.x, sink.y, Terrain::Sink);
            if short >= 3 && long >= 3 {
                let tub = axes.at(long - 1, short - 1);
                b.set(tub.x, tub.y, Terrain::Bathtub);
            }
            b.place_items("softdrugs", 50, inner.x1, inner.y1, inner.x2, inner.y2, false);
            b.place_items("cleaning", 40, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::Library => {
            // Shelves against both long walls, plus a center row in wide rooms.
            for a in 1..long - 1 {
                set_pair(b, a, 0, Terrain::Bookcase);
                if short >= 7 && a != mid {
                    let p = axes.at(a, short / 2);
                    b.set(p.x, p.y, Terrain::Bookcase);
                }
            }
            b.place_items("mansion_library", 85, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::GameRoom => {
            let c = short / 2;
            for a in [mid - 1, mid] {
                let p = axes.at(a, c);
                b.set(p.x, p.y, Terrain::PoolTable);
            }
            set_pair(b, 0, 0, Terrain::Piano);
            set_pair(b, long - 1, 0, Terrain::Bookcase);
            for a in (1..long - 1).step_by(3) {
                set_pair(b, a, 0, Terrain::Chair);
            }
            b.place_items("livingroom", 60, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::DiningRoom => {
            // One table row in odd-width rooms, two in even ones.
            let (lo, hi) = ((short - 1) / 2, short / 2);
            for a in 2..long - 2 {
                for c in lo..=hi {
                    let table = axes.at(a, c);
                    b.set(table.x, table.y, Terrain::Table);
                }
                set_pair(b, a, lo - 1, Terrain::Chair);
            }
            b.place_items("mansion_kitchen", 40, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::Gallery => {
            for a in (1..long - 1).step_by(2) {
                set_pair(b, a, 0, Terrain::SuitOfArmor);
            }
            b.place_items("mansion_art", 70, inner.x1, inner.y1, inner.x2, inner.y2, false);
            b.place_items("mansion_armory", 30, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::Kitchen => {
            for a in 1..long - 1 {
                let p = axes.at(a, 0);
                b.set(p.x, p.y, Terrain::Counter);
            }
            let (fridge, stove) = (axes.at(0, 0), axes.at(long - 1, 0));
            b.set(fridge.x, fridge.y, Terrain::Fridge);
            b.set(stove.x, stove.y, Terrain::Stove);
            b.place_items("fridge", 80, fridge.x, fridge.y, fridge.x, fridge.y, false);
            b.place_items("mansion_kitchen", 70, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
        MansionRoom::Study => {
            let desk = axes.at(mid, short / 2);
            b.set(desk.x, desk.y, Terrain::Desk);
            let chair = axes.at(mid, short / 2 + 1);
            b.set(chair.x, chair.y, Terrain::Chair);
            for a in 0..long {
                if a != mid {
                    let p = axes.at(a, 0);
                    b.set(p.x, p.y, Terrain::Bookcase);
                }
            }
            let hearth = axes.at(mid, 0);
            b.set(hearth.x, hearth.y, Terrain::Fireplace);
            b.place_items("mansion_library", 50, inner.x1, inner.y1, inner.x2, inner.y2, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::{CellType, Neighbors};

    #[test]
    fn test_classifier_respects_size_limits() {
        let small = MansionRoom::eligible(3, 4);
        assert!(small.contains(&MansionRoom::Bathroom));
        assert!(!small.contains(&MansionRoom::Courtyard));
        let huge = MansionRoom::eligible(10, 12);
        assert!(huge.contains(&MansionRoom::Courtyard));
        assert!(!huge.contains(&MansionRoom::Bathroom));
        assert!(!huge.contains(&MansionRoom::Bedroom));
    }

    #[test]
    fn test_gallery_is_mirrored_across_long_axis() {
        with_builder(CellType::Mansion, Neighbors::default(), 2, |b| {
            b.fill(Terrain::Grass);
            let r = Rect::new(1, 3, 20, 9);
            build_mansion_room(b, MansionRoom::Gallery, r);
            let inner = r.inner();
            for x in inner.x1..=inner.x2 {
                for dy in 0..=inner.height() {
                    let top = b.ter(x, inner.y1 + dy);
                    let bottom = b.ter(x, inner.y2 - dy);
                    assert_eq!(top, bottom, "column {}", x);
                }
            }
            assert!(b.grid.count_terrain(Terrain::SuitOfArmor) >= 8);
        });
    }

    #[test]
    fn test_vertical_rooms_use_columns() {
        with_builder(CellType::Mansion, Neighbors::default(), 3, |b| {
            b.fill(Terrain::Grass);
            build_mansion_room(b, MansionRoom::Library, Rect::new(4, 1, 10, 20));
            // Shelves run down the west and east inner columns.
            assert_eq!(b.ter(5, 10), Terrain::Bookcase);
            assert_eq!(b.ter(9, 10), Terrain::Bookcase);
        });
    }

    #[test]
    fn test_every_room_gets_one_door() {
        for seed in 0..40 {
            with_builder(CellType::Mansion, Neighbors::default(), seed, |b| {
                b.fill(Terrain::Grass);
                let r = Rect::new(2, 2, 12 + (seed as i32 % 8), 8 + (seed as i32 % 5));
                mansion_room(b, r);
                assert_eq!(b.grid.count_terrain(Terrain::DoorClosed), 1);
            });
        }
    }
}
