//! Weighted item selection and the bounded search for a tile to drop it on.

use rand::Rng;

use super::{ItemCatalog, AMMO_BUNDLED_CATEGORIES};
use crate::error::{GenError, Result};
use crate::geometry::Point;
use crate::grid::TileGrid;
use crate::seeds::rng;
use crate::shapes::normalize;

/// Default number of tile picks tried per item before the item is dropped.
pub const DEFAULT_RETRY_CAP: u32 = 20;

/// Places items from an [`ItemCatalog`] onto a grid.
#[derive(Clone, Copy, Debug)]
pub struct ItemPlacer<'a> {
    catalog: &'a ItemCatalog,
    retry_cap: u32,
}

impl<'a> ItemPlacer<'a> {
    pub fn new(catalog: &'a ItemCatalog, retry_cap: u32) -> Self {
        Self {
            catalog,
            retry_cap: retry_cap.max(1),
        }
    }

    pub fn catalog(&self) -> &'a ItemCatalog {
        self.catalog
    }

    /// Roulette draw: a roll in `1..=total` walks the cumulative weights.
    pub fn pick<R: Rng + ?Sized>(&self, r: &mut R, category: &str) -> Result<&'a str> {
        let group = self.catalog.group(category)?;
        let total: u32 = group.iter().map(|e| e.weight).sum();
        if total == 0 {
            return Err(GenError::EmptyCategory(category.to_string()));
        }
        let mut roll = rng(r, 1, total as i32);
        for entry in group {
            roll -= entry.weight as i32;
            if roll <= 0 {
                return Ok(entry.item.as_str());
            }
        }
        Err(GenError::EmptyCategory(category.to_string()))
    }

    /// Can an item be dropped at `p`?
    pub fn valid_spot(grid: &TileGrid, p: Point, allow_grass: bool) -> bool {
        let ter = grid.ter(p);
        (ter.is_passable() || ter.is_container()) && (allow_grass || !ter.is_bare_ground())
    }

    /// While a `chance`% roll succeeds, draw an item and drop it on a valid tile inside the
    /// rectangle. Each item gets at most `retry_cap` tile picks; when none is valid the item
    /// is silently skipped. Returns the number of items placed, bundled ammo included.
    #[allow(clippy::too_many_arguments)]
    pub fn try_place_items<R: Rng + ?Sized>(
        &self,
        grid: &mut TileGrid,
        r: &mut R,
        category: &str,
        chance: i32,
        p1: Point,
        p2: Point,
        allow_grass: bool,
    ) -> Result<usize> {
        if chance <= 0 || chance >= 100 {
            return Err(GenError::InvalidChance {
                category: category.to_string(),
                chance,
            });
        }
        if self.catalog.total_weight(category)? == 0 {
            return Err(GenError::EmptyCategory(category.to_string()));
        }
        let (lo, hi) = normalize(p1, p2);
        let turn = grid.created();
        let bundles_ammo = AMMO_BUNDLED_CATEGORIES.contains(&category);
        let mut placed = 0;

        while rng(r, 0, 99) < chance {
            let item = self.pick(r, category)?;
            let spot = (0..self.retry_cap)
                .map(|_| Point::new(rng(r, lo.x, hi.x), rng(r, lo.y, hi.y)))
                .find(|p| Self::valid_spot(grid, *p, allow_grass));
            let Some(p) = spot else {
                continue;
            };
            if grid.add_item(p, item, turn) {
                placed += 1;
            }
            if bundles_ammo {
                if let Some(ammo) = self.catalog.default_ammo(item) {
                    if grid.add_item(p, ammo, turn) {
                        placed += 1;
                    }
                }
            }
        }
        Ok(placed)
    }

    /// [`Self::try_place_items`] with invalid requests logged and treated as no-ops.
    #[allow(clippy::too_many_arguments)]
    pub fn place_items<R: Rng + ?Sized>(
        &self,
        grid: &mut TileGrid,
        r: &mut R,
        category: &str,
        chance: i32,
        p1: Point,
        p2: Point,
        allow_grass: bool,
    ) -> usize {
        match self.try_place_items(grid, r, category, chance, p1, p2, allow_grass) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("place_items skipped: {}", e);
                0
            }
        }
    }

    /// Drop exactly `count` draws from `category` on one tile the caller already knows
    /// is valid.
    pub fn place_exact_items<R: Rng + ?Sized>(
        &self,
        grid: &mut TileGrid,
        r: &mut R,
        category: &str,
        count: usize,
        p: Point,
    ) -> usize {
        let turn = grid.created();
        let mut placed = 0;
        for _ in 0..count {
            match self.pick(r, category) {
                Ok(item) => {
                    if grid.add_item(p, item, turn) {
                        placed += 1;
                    }
                }
                Err(e) => {
                    log::warn!("place_exact_items skipped: {}", e);
                    break;
                }
            }
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemEntry;
    use crate::terrain::Terrain;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> ItemCatalog {
        let mut c = ItemCatalog::defaults().unwrap();
        c.insert_group(
            "weighted",
            vec![
                ItemEntry { item: "a".into(), weight: 1 },
                ItemEntry { item: "b".into(), weight: 3 },
                ItemEntry { item: "c".into(), weight: 6 },
            ],
        );
        c.insert_group("empty", Vec::new());
        c
    }

    fn floor_grid() -> TileGrid {
        let mut grid = TileGrid::new(100);
        grid.fill(Terrain::Floor);
        grid
    }

    #[test]
    fn test_boundary_chances_place_nothing() {
        let c = catalog();
        let placer = ItemPlacer::new(&c, DEFAULT_RETRY_CAP);
        let mut r = ChaCha8Rng::seed_from_u64(1);
        let mut grid = floor_grid();
        for chance in [-5, 0, 100, 250] {
            let res = placer.try_place_items(
                &mut grid,
                &mut r,
                "fridge",
                chance,
                Point::new(0, 0),
                Point::new(23, 23),
                true,
            );
            assert!(matches!(res, Err(GenError::InvalidChance { .. })));
            assert_eq!(
                placer.place_items(&mut grid, &mut r, "fridge", chance, Point::new(0, 0), Point::new(23, 23), true),
                0
            );
        }
        assert_eq!(grid.total_items(), 0);
    }

    #[test]
    fn test_empty_and_unknown_categories_are_noops() {
        let c = catalog();
        let placer = ItemPlacer::new(&c, DEFAULT_RETRY_CAP);
        let mut r = ChaCha8Rng::seed_from_u64(2);
        let mut grid = floor_grid();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(5, 5);
        assert!(matches!(
            placer.try_place_items(&mut grid, &mut r, "empty", 50, p1, p2, true),
            Err(GenError::EmptyCategory(_))
        ));
        assert!(matches!(
            placer.try_place_items(&mut grid, &mut r, "nope", 50, p1, p2, true),
            Err(GenError::UnknownCategory(_))
        ));
        assert_eq!(grid.total_items(), 0);
    }

    #[test]
    fn test_frequency_converges_to_weights() {
        let c = catalog();
        let placer = ItemPlacer::new(&c, DEFAULT_RETRY_CAP);
        let mut r = ChaCha8Rng::seed_from_u64(3);
        let n = 60_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match placer.pick(&mut r, "weighted").unwrap() {
                "a" => counts[0] += 1,
                "b" => counts[1] += 1,
                _ => counts[2] += 1,
            }
        }
        for (count, weight) in counts.iter().zip([1.0, 3.0, 6.0]) {
            let freq = *count as f64 / n as f64;
            assert!((freq - weight / 10.0).abs() < 0.01, "{} vs {}", freq, weight / 10.0);
        }
    }

    #[test]
    fn test_items_land_only_on_valid_tiles() {
        let c = catalog();
        let placer = ItemPlacer::new(&c, DEFAULT_RETRY_CAP);
        let mut r = ChaCha8Rng::seed_from_u64(4);
        let mut grid = TileGrid::new(7);
        grid.fill(Terrain::Grass);
        grid.set_ter(Point::new(3, 3), Terrain::Floor);
        grid.set_ter(Point::new(4, 3), Terrain::Fridge);
        grid.set_ter(Point::new(5, 3), Terrain::WallV);
        for _ in 0..50 {
            placer.place_items(&mut grid, &mut r, "fridge", 90, Point::new(3, 3), Point::new(5, 3), false);
        }
        assert!(grid.total_items() > 0);
        assert!(grid.items_at(Point::new(5, 3)).is_empty());
        for (p, tile) in grid.tiles().iter() {
            if !tile.items.is_empty() {
                assert!(p == Point::new(3, 3) || p == Point::new(4, 3));
                assert!(tile.items.iter().all(|i| i.created == 7));
            }
        }
    }

    #[test]
    fn test_no_valid_tile_terminates() {
        let c = catalog();
        let placer = ItemPlacer::new(&c, 5);
        let mut r = ChaCha8Rng::seed_from_u64(5);
        let mut grid = TileGrid::new(0);
        grid.fill(Terrain::Rock);
        let placed = placer.place_items(&mut grid, &mut r, "fridge", 99, Point::new(0, 0), Point::new(23, 23), true);
        assert_eq!(placed, 0);
    }

    #[test]
    fn test_home_guns_bring_ammo() {
        let mut c = catalog();
        c.insert_group("homeguns", vec![ItemEntry { item: "pistol_glock".into(), weight: 1 }]);
        let placer = ItemPlacer::new(&c, DEFAULT_RETRY_CAP);
        let mut r = ChaCha8Rng::seed_from_u64(6);
        let mut grid = floor_grid();
        let p = Point::new(2, 2);
        let mut placed = 0;
        while placed == 0 {
            placed = placer.place_items(&mut grid, &mut r, "homeguns", 50, p, p, true);
        }
        let items: Vec<&str> = grid.items_at(p).iter().map(|i| i.item.as_str()).collect();
        assert_eq!(items.iter().filter(|i| **i == "pistol_glock").count() * 2, items.len());
        assert!(items.contains(&"ammo_9mm"));
    }

    #[test]
    fn test_exact_items_count() {
        let c = catalog();
        let placer = ItemPlacer::new(&c, DEFAULT_RETRY_CAP);
        let mut r = ChaCha8Rng::seed_from_u64(7);
        let mut grid = floor_grid();
        assert_eq!(placer.place_exact_items(&mut grid, &mut r, "weighted", 4, Point::new(1, 1)), 4);
        assert_eq!(grid.items_at(Point::new(1, 1)).len(), 4);
    }
}
