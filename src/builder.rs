//! The mutable state one cell generation threads through every generator: the grid,
//! the cell's own random stream, its neighborhood and the item placer.

use rand_chacha::ChaCha8Rng;

use crate::config::GenConfig;
use crate::entities::{Computer, SpawnRecord, VehiclePlacement};
use crate::geometry::{Direction, Point};
use crate::grid::TileGrid;
use crate::items::{ItemCatalog, ItemPlacer};
use crate::overmap::{CellContext, CellType};
use crate::seeds;
use crate::shapes;
use crate::terrain::{FieldKind, Terrain, Trap};

pub struct CellBuilder<'a> {
    pub grid: TileGrid,
    pub rng: ChaCha8Rng,
    pub ctx: CellContext,
    items: ItemPlacer<'a>,
    config: &'a GenConfig,
}

impl<'a> CellBuilder<'a> {
    pub fn new(ctx: CellContext, rng: ChaCha8Rng, catalog: &'a ItemCatalog, config: &'a GenConfig) -> Self {
        Self {
            grid: TileGrid::new(ctx.turn),
            rng,
            ctx,
            items: ItemPlacer::new(catalog, config.item_retry_cap),
            config,
        }
    }

    pub fn config(&self) -> &'a GenConfig {
        self.config
    }

    pub fn items(&self) -> ItemPlacer<'a> {
        self.items
    }

    pub fn finish(self) -> TileGrid {
        self.grid
    }

    // Context

    pub fn cell(&self) -> CellType {
        self.ctx.cell
    }

    pub fn neighbor(&self, dir: Direction) -> CellType {
        self.ctx.neighbor(dir)
    }

    pub fn above(&self) -> CellType {
        self.ctx.above
    }

    pub fn turn(&self) -> i64 {
        self.ctx.turn
    }

    // Random draws

    pub fn rng(&mut self, lo: i32, hi: i32) -> i32 {
        seeds::rng(&mut self.rng, lo, hi)
    }

    pub fn one_in(&mut self, n: i32) -> bool {
        seeds::one_in(&mut self.rng, n)
    }

    pub fn x_in_y(&mut self, x: i32, y: i32) -> bool {
        seeds::x_in_y(&mut self.rng, x, y)
    }

    pub fn dice(&mut self, count: i32, sides: i32) -> i32 {
        seeds::dice(&mut self.rng, count, sides)
    }

    /// Uniform pick from a non-empty list of options.
    pub fn choose<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        seeds::random_entry(&mut self.rng, options).copied()
    }

    // Terrain

    pub fn ter(&self, x: i32, y: i32) -> Terrain {
        self.grid.ter(Point::new(x, y))
    }

    pub fn set(&mut self, x: i32, y: i32, terrain: Terrain) {
        self.grid.set_ter(Point::new(x, y), terrain);
    }

    pub fn fill(&mut self, terrain: Terrain) {
        shapes::fill_background(&mut self.grid, terrain);
    }

    /// Fill the grid tile by tile from `pick`.
    pub fn fill_with(&mut self, pick: impl Fn(&mut ChaCha8Rng) -> Terrain) {
        shapes::fill_background_with(&mut self.grid, &mut self.rng, pick);
    }

    pub fn line(&mut self, terrain: Terrain, x1: i32, y1: i32, x2: i32, y2: i32) {
        shapes::line(&mut self.grid, terrain, Point::new(x1, y1), Point::new(x2, y2));
    }

    pub fn square(&mut self, terrain: Terrain, x1: i32, y1: i32, x2: i32, y2: i32) {
        shapes::square(&mut self.grid, terrain, Point::new(x1, y1), Point::new(x2, y2));
    }

    pub fn square_with(&mut self, pick: impl Fn(&mut ChaCha8Rng) -> Terrain, x1: i32, y1: i32, x2: i32, y2: i32) {
        shapes::square_with(&mut self.grid, &mut self.rng, pick, Point::new(x1, y1), Point::new(x2, y2));
    }

    pub fn rough_circle(&mut self, terrain: Terrain, x: i32, y: i32, radius: i32) {
        shapes::rough_circle(&mut self.grid, &mut self.rng, terrain, Point::new(x, y), radius);
    }

    pub fn circle(&mut self, terrain: Terrain, x: i32, y: i32, radius: i32) {
        shapes::circle(&mut self.grid, terrain, Point::new(x, y), radius);
    }

    /// Horizontal walls along the top and bottom rows, vertical walls on the sides.
    pub fn walled_box(&mut self, horizontal: Terrain, vertical: Terrain, x1: i32, y1: i32, x2: i32, y2: i32) {
        shapes::walled_box(&mut self.grid, horizontal, vertical, Point::new(x1, y1), Point::new(x2, y2));
    }

    pub fn stamp(&mut self, x: i32, y: i32, rows: &[&str], legend: impl Fn(char) -> Option<Terrain>) {
        shapes::stamp(&mut self.grid, Point::new(x, y), rows, legend);
    }

    pub fn rotate(&mut self, turns: u8) {
        self.grid.rotate(turns);
    }

    // Traps, fields, radiation

    pub fn set_trap(&mut self, x: i32, y: i32, trap: Trap) {
        self.grid.set_trap(Point::new(x, y), trap);
    }

    pub fn add_field(&mut self, x: i32, y: i32, kind: FieldKind, intensity: i32) {
        self.grid.add_field(Point::new(x, y), kind, intensity);
    }

    pub fn set_radiation(&mut self, x: i32, y: i32, value: i32) {
        self.grid.set_radiation(Point::new(x, y), value);
    }

    // Items

    #[allow(clippy::too_many_arguments)]
    pub fn place_items(&mut self, category: &str, chance: i32, x1: i32, y1: i32, x2: i32, y2: i32, allow_grass: bool) -> usize {
        self.items.place_items(
            &mut self.grid,
            &mut self.rng,
            category,
            chance,
            Point::new(x1, y1),
            Point::new(x2, y2),
            allow_grass,
        )
    }

    pub fn place_exact_items(&mut self, category: &str, count: usize, x: i32, y: i32) -> usize {
        self.items
            .place_exact_items(&mut self.grid, &mut self.rng, category, count, Point::new(x, y))
    }

    pub fn add_item(&mut self, x: i32, y: i32, item: &str) -> bool {
        let turn = self.grid.created();
        self.grid.add_item(Point::new(x, y), item, turn)
    }

    pub fn add_items(&mut self, x: i32, y: i32, item: &str, count: usize) {
        for _ in 0..count {
            self.add_item(x, y, item);
        }
    }

    // Entities

    pub fn add_spawn(&mut self, monster: &str, count: u32, x: i32, y: i32) {
        self.grid.add_spawn(SpawnRecord::new(monster, count, Point::new(x, y)));
    }

    pub fn add_spawn_record(&mut self, spawn: SpawnRecord) {
        self.grid.add_spawn(spawn);
    }

    pub fn add_computer(&mut self, x: i32, y: i32, name: &str, security: u8) -> Option<&mut Computer> {
        self.grid.set_ter(Point::new(x, y), Terrain::Console);
        self.grid.add_computer(Point::new(x, y), name, security)
    }

    pub fn add_vehicle(&mut self, vehicle: &str, x: i32, y: i32, facing: i32) {
        self.grid
            .add_vehicle(VehiclePlacement::new(vehicle, Point::new(x, y), facing));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::overmap::Neighbors;
    use rand::SeedableRng;

    /// Run `f` against a fresh builder for `cell` with uniform neighbors.
    pub fn with_builder<T>(cell: CellType, neighbors: Neighbors, seed: u64, f: impl FnOnce(&mut CellBuilder) -> T) -> T {
        let catalog = ItemCatalog::defaults().unwrap();
        let config = GenConfig::without_extras();
        let ctx = CellContext::new(cell, neighbors, CellType::Null, 0);
        let mut b = CellBuilder::new(ctx, ChaCha8Rng::seed_from_u64(seed), &catalog, &config);
        f(&mut b)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::with_builder;
    use super::*;
    use crate::entities::ComputerAction;
    use crate::overmap::Neighbors;

    #[test]
    fn test_builder_draws_and_draws_shapes() {
        with_builder(CellType::Field, Neighbors::default(), 1, |b| {
            b.fill(Terrain::Grass);
            b.square(Terrain::Floor, 2, 2, 4, 4);
            b.line(Terrain::WallH, 2, 1, 4, 1);
            assert_eq!(b.ter(3, 3), Terrain::Floor);
            assert_eq!(b.ter(3, 1), Terrain::WallH);
            let v = b.rng(3, 5);
            assert!((3..=5).contains(&v));
            assert_eq!(b.choose::<i32>(&[]), None);
            assert_eq!(b.choose(&[7]), Some(7));
        });
    }

    #[test]
    fn test_builder_computer_sets_console() {
        with_builder(CellType::Lab, Neighbors::default(), 2, |b| {
            b.fill(Terrain::Floor);
            if let Some(c) = b.add_computer(5, 5, "Log Console", 3) {
                c.add_option("View Research Logs", ComputerAction::Research, 0);
            }
            assert_eq!(b.ter(5, 5), Terrain::Console);
            assert_eq!(b.grid.computers()[0].options.len(), 1);
        });
    }

    #[test]
    fn test_builder_items_use_cell_turn() {
        let catalog = ItemCatalog::defaults().unwrap();
        let config = GenConfig::default();
        let ctx = CellContext::new(CellType::Field, Neighbors::default(), CellType::Null, 42);
        let mut b = CellBuilder::new(ctx, rand::SeedableRng::seed_from_u64(3), &catalog, &config);
        b.fill(Terrain::Floor);
        b.add_item(1, 1, "rock");
        b.place_exact_items("fridge", 3, 2, 2);
        let grid = b.finish();
        assert_eq!(grid.items_at(Point::new(2, 2)).len(), 3);
        assert!(grid.items_at(Point::new(1, 1)).iter().all(|i| i.created == 42));
    }
}
