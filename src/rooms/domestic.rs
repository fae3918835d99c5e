//! Rooms of a family house.

use super::Rect;
use crate::builder::CellBuilder;
use crate::terrain::Terrain;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HouseRoom {
    Living,
    Kitchen,
    Bedroom,
    Bathroom,
    /// Fenced yard behind the house.
    Backyard,
}

/// Wall in `r` where the ground is still open, floor the inside and furnish it.
pub fn house_room(b: &mut CellBuilder, kind: HouseRoom, r: Rect) {
    if kind == HouseRoom::Backyard {
        backyard(b, r);
        return;
    }

    for y in r.y1..=r.y2 {
        for x in r.x1..=r.x2 {
            let open = matches!(b.ter(x, y), Terrain::Grass | Terrain::Dirt | Terrain::Floor);
            if !open {
                continue;
            }
            if y == r.y1 || y == r.y2 {
                b.set(x, y, Terrain::WallH);
            } else if x == r.x1 || x == r.x2 {
                b.set(x, y, Terrain::WallV);
            } else {
                b.set(x, y, Terrain::Floor);
            }
        }
    }
    for y in r.y1 + 1..r.y2 {
        b.set(r.x1, y, Terrain::WallV);
        b.set(r.x2, y, Terrain::WallV);
    }

    let (x1, y1, x2, y2) = (r.x1, r.y1, r.x2, r.y2);
    let (category, chance) = match kind {
        HouseRoom::Living => ("livingroom", 83),
        HouseRoom::Kitchen => {
            b.place_items("cleaning", 58, x1 + 1, y1 + 1, x2 - 1, y2 - 2, false);
            let fridge = match b.rng(1, 4) {
                1 => (x1 + 2, y1 + 1),
                2 => (x2 - 2, y1 + 1),
                3 => (x1 + 2, y2 - 1),
                _ => (x2 - 2, y2 - 1),
            };
            b.set(fridge.0, fridge.1, Terrain::Fridge);
            b.place_items("fridge", 82, fridge.0, fridge.1, fridge.0, fridge.1, false);
            ("kitchen", 75)
        }
        HouseRoom::Bedroom => {
            if b.one_in(10) {
                b.place_items("homeguns", 58, x1 + 1, y1 + 1, x2 - 1, y2 - 1, false);
            }
            let mid = (x1 + x2) / 2;
            let beds: &[(i32, i32)] = match b.rng(1, 5) {
                1 => &[(x1 + 1, y1 + 2), (x1 + 1, y1 + 3)],
                2 => &[(x1 + 2, y2 - 1), (x1 + 3, y2 - 1)],
                3 => &[(x2 - 1, y2 - 3), (x2 - 1, y2 - 2)],
                4 => &[(x2 - 3, y1 + 1), (x2 - 2, y1 + 1)],
                _ => &[(mid, y2 - 1), (mid + 1, y2 - 1), (mid, y2 - 2), (mid + 1, y2 - 2)],
            };
            for &(x, y) in beds {
                b.set(x, y, Terrain::Bed);
            }
            let dresser = match b.rng(1, 4) {
                1 => (x1 + 2, y1 + 1),
                2 => (x2 - 2, y2 - 1),
                3 => (mid, y1 + 1),
                _ => (x1 + 1, (y1 + y2) / 2),
            };
            b.set(dresser.0, dresser.1, Terrain::Dresser);
            b.place_items("dresser", 80, dresser.0, dresser.1, dresser.0, dresser.1, false);
            ("bedroom", 78)
        }
        HouseRoom::Bathroom => {
            b.set(x2 - 1, y2 - 1, Terrain::Toilet);
            b.place_items("harddrugs", 18, x1 + 1, y1 + 1, x2 - 1, y2 - 2, false);
            b.place_items("cleaning", 48, x1 + 1, y1 + 1, x2 - 1, y2 - 2, false);
            ("softdrugs", 72)
        }
        HouseRoom::Backyard => return,
    };
    b.place_items(category, chance, x1 + 1, y1 + 1, x2 - 1, y2 - 1, false);
}

fn backyard(b: &mut CellBuilder, r: Rect) {
    for y in r.y1..=r.y2 {
        for x in r.x1..=r.x2 {
            if x == r.x1 || x == r.x2 {
                b.set(x, y, Terrain::FenceV);
            } else if y == r.y2 {
                b.set(x, y, Terrain::FenceH);
            } else if b.one_in(35) {
                b.set(x, y, Terrain::TreeYoung);
            } else if b.one_in(35) {
                b.set(x, y, Terrain::Tree);
            } else if b.one_in(25) {
                b.set(x, y, Terrain::Dirt);
            } else {
                b.set(x, y, Terrain::Grass);
            }
        }
    }
    b.set(r.x1 + 2, r.y1, Terrain::Chair);
    b.set(r.x1 + 2, r.y1 + 1, Terrain::Table);
    b.set((r.x1 + r.x2) / 2, r.y2, Terrain::Grass);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::geometry::Point;
    use crate::overmap::{CellType, Neighbors};

    #[test]
    fn test_rooms_are_walled_and_furnished_inside() {
        for (seed, kind) in [HouseRoom::Living, HouseRoom::Kitchen, HouseRoom::Bedroom, HouseRoom::Bathroom]
            .into_iter()
            .enumerate()
        {
            with_builder(CellType::HouseNorth, Neighbors::default(), seed as u64, |b| {
                b.fill(Terrain::Grass);
                let r = Rect::new(3, 3, 10, 9);
                house_room(b, kind, r);
                for y in r.y1..=r.y2 {
                    for x in r.x1..=r.x2 {
                        let t = b.ter(x, y);
                        let on_wall = x == r.x1 || x == r.x2 || y == r.y1 || y == r.y2;
                        if on_wall {
                            assert!(t.is_wall(), "{:?} at ({}, {})", t, x, y);
                        } else {
                            assert!(!t.is_wall());
                        }
                    }
                }
                for (p, tile) in b.grid.tiles().iter() {
                    if !tile.items.is_empty() {
                        assert!(r.inner().contains(p));
                    }
                }
            });
        }
    }

    #[test]
    fn test_kitchen_always_has_fridge() {
        for seed in 0..20 {
            with_builder(CellType::HouseNorth, Neighbors::default(), seed, |b| {
                b.fill(Terrain::Grass);
                house_room(b, HouseRoom::Kitchen, Rect::new(2, 2, 9, 8));
                assert_eq!(b.grid.count_terrain(Terrain::Fridge), 1);
            });
        }
    }

    #[test]
    fn test_existing_walls_are_kept() {
        with_builder(CellType::HouseNorth, Neighbors::default(), 3, |b| {
            b.fill(Terrain::Grass);
            b.set(5, 2, Terrain::Window);
            house_room(b, HouseRoom::Living, Rect::new(2, 2, 9, 8));
            assert_eq!(b.grid.ter(Point::new(5, 2)), Terrain::Window);
        });
    }

    #[test]
    fn test_backyard_is_fenced_with_gate() {
        with_builder(CellType::HouseNorth, Neighbors::default(), 4, |b| {
            b.fill(Terrain::Floor);
            house_room(b, HouseRoom::Backyard, Rect::new(0, 15, 23, 23));
            assert_eq!(b.ter(0, 20), Terrain::FenceV);
            assert_eq!(b.ter(5, 23), Terrain::FenceH);
            assert_eq!(b.ter(11, 23), Terrain::Grass);
        });
    }
}
