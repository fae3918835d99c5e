//! Cell generators and the registry that dispatches a cell type to one of them.
//!
//! Orientation variants are registered through [`Rotated`]: the canonical layout is built
//! against neighbors seen from the canonical frame, then the whole grid is turned.

pub mod civic;
pub mod facilities;
pub mod houses;
pub mod labs;
pub mod nature;
pub mod puzzles;
pub mod rivers;
pub mod roads;
pub mod settlement;
pub mod shops;
pub mod tunnels;
pub mod underground;

use std::collections::HashMap;
use std::sync::Arc;

use rand_chacha::ChaCha8Rng;

use crate::builder::CellBuilder;
use crate::grid::EDGE;
use crate::overmap::CellType;
use crate::rooms::open_sealed_rooms;
use crate::seeds;
use crate::terrain::Terrain;

/// Produces the contents of one cell into the builder.
pub trait CellGenerator: Send + Sync {
    fn generate(&self, b: &mut CellBuilder);
}

impl<F> CellGenerator for F
where
    F: Fn(&mut CellBuilder) + Send + Sync,
{
    fn generate(&self, b: &mut CellBuilder) {
        self(b)
    }
}

/// Pin a closure's signature so it is accepted as a generator.
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&mut CellBuilder) + Send + Sync,
{
    f
}

/// Wrap a building generator so floor it leaves sealed off from the street gets a door.
pub fn entered<F>(f: F) -> impl Fn(&mut CellBuilder) + Send + Sync
where
    F: Fn(&mut CellBuilder) + Send + Sync,
{
    move |b: &mut CellBuilder| {
        f(b);
        open_sealed_rooms(b, Terrain::DoorClosed);
    }
}

/// Runs `inner` in the canonical frame, then rotates the result `turns` times clockwise.
pub struct Rotated {
    canonical: CellType,
    turns: u8,
    inner: Arc<dyn CellGenerator>,
}

impl Rotated {
    pub fn new(canonical: CellType, turns: u8, inner: Arc<dyn CellGenerator>) -> Self {
        Self {
            canonical,
            turns: turns % 4,
            inner,
        }
    }
}

impl CellGenerator for Rotated {
    fn generate(&self, b: &mut CellBuilder) {
        let saved = b.ctx;
        b.ctx.cell = self.canonical;
        b.ctx.neighbors = saved.neighbors.unrotated(self.turns);
        self.inner.generate(b);
        b.rotate(self.turns);
        b.ctx = saved;
    }
}

/// Cell type to generator lookup.
#[derive(Default, Clone)]
pub struct Registry {
    generators: HashMap<CellType, Arc<dyn CellGenerator>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cell type this crate knows how to build.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        nature::register(&mut registry);
        roads::register(&mut registry);
        rivers::register(&mut registry);
        houses::register(&mut registry);
        shops::register(&mut registry);
        civic::register(&mut registry);
        settlement::register(&mut registry);
        labs::register(&mut registry);
        facilities::register(&mut registry);
        underground::register(&mut registry);
        tunnels::register(&mut registry);
        puzzles::register(&mut registry);
        log::debug!("registered {} cell generators", registry.len());
        registry
    }

    pub fn register(&mut self, cell: CellType, generator: impl CellGenerator + 'static) {
        self.generators.insert(cell, Arc::new(generator));
    }

    /// Register `variants[0]` as the canonical layout and every later entry as that layout
    /// turned clockwise by its index.
    pub fn register_rotations(&mut self, variants: &[CellType], generator: impl CellGenerator + 'static) {
        let inner: Arc<dyn CellGenerator> = Arc::new(generator);
        let Some(&canonical) = variants.first() else {
            return;
        };
        for (turns, &cell) in variants.iter().enumerate() {
            if turns == 0 {
                self.generators.insert(cell, inner.clone());
            } else {
                let rotated = Rotated::new(canonical, turns as u8, inner.clone());
                self.generators.insert(cell, Arc::new(rotated));
            }
        }
    }

    pub fn get(&self, cell: CellType) -> Option<&Arc<dyn CellGenerator>> {
        self.generators.get(&cell)
    }

    pub fn contains(&self, cell: CellType) -> bool {
        self.generators.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Registered cell types in declaration order.
    pub fn cell_types(&self) -> Vec<CellType> {
        let mut types: Vec<CellType> = self.generators.keys().copied().collect();
        types.sort();
        types
    }

    /// Build the builder's cell. Unregistered types are logged and floored.
    pub fn generate(&self, b: &mut CellBuilder) {
        match self.generators.get(&b.cell()) {
            Some(generator) => generator.generate(b),
            None => {
                log::warn!("no generator registered for cell type '{}', filling with floor", b.cell());
                b.fill(Terrain::Floor);
            }
        }
    }
}

/// Grass one time in four, dirt otherwise.
pub fn grass_or_dirt(r: &mut ChaCha8Rng) -> Terrain {
    if seeds::one_in(r, 4) {
        Terrain::Grass
    } else {
        Terrain::Dirt
    }
}

/// Paint every tile from `pick`; tiles it leaves as `None` become grass or dirt.
pub fn paint(b: &mut CellBuilder, pick: impl Fn(i32, i32) -> Option<Terrain>) {
    for i in 0..=EDGE {
        for j in 0..=EDGE {
            let t = match pick(i, j) {
                Some(t) => t,
                None => grass_or_dirt(&mut b.rng),
            };
            b.set(i, j, t);
        }
    }
}

/// A random tile in the inclusive rectangle whose terrain satisfies `want`.
pub fn pick_tile(b: &mut CellBuilder, x1: i32, y1: i32, x2: i32, y2: i32, want: impl Fn(Terrain) -> bool) -> Option<(i32, i32)> {
    let mut found = Vec::new();
    for x in x1.min(x2)..=x1.max(x2) {
        for y in y1.min(y2)..=y1.max(y2) {
            if want(b.ter(x, y)) {
                found.push((x, y));
            }
        }
    }
    b.choose(&found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;
    use crate::geometry::{Direction, Point};
    use crate::rooms::sealed_floor;
    use crate::rotation::rotate_point;

    #[test]
    fn test_every_cell_type_is_registered() {
        let registry = Registry::standard();
        for &cell in CellType::ALL {
            if cell == CellType::Null {
                continue;
            }
            assert!(registry.contains(cell), "{} has no generator", cell);
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_floor() {
        let registry = Registry::new();
        with_builder(CellType::Field, Neighbors::default(), 1, |b| {
            registry.generate(b);
            assert_eq!(b.grid.count_terrain(Terrain::Floor), 24 * 24);
        });
    }

    #[test]
    fn test_buildings_can_be_entered_from_the_street() {
        use CellType::*;
        let registry = Registry::standard();
        let buildings = [
            HouseNorth,
            HouseBaseNorth,
            HouseSouth,
            MineEntrance,
            Bunker,
            MansionEntrance,
            PoliceNorth,
            BankNorth,
            OfficeDoctorNorth,
            GasNorth,
            PharmNorth,
            GroceryNorth,
            HardwareNorth,
            SportsNorth,
            LiquorNorth,
            GunEast,
            ClothesNorth,
            LibraryWest,
        ];
        for cell in buildings {
            for seed in 0..100 {
                with_builder(cell, Neighbors::default(), seed, |b| {
                    registry.generate(b);
                    let sealed = sealed_floor(&b.grid);
                    assert!(
                        sealed.is_empty(),
                        "{} seed {} sealed floor at {}\n{}",
                        cell,
                        seed,
                        sealed[0],
                        b.grid.to_ascii()
                    );
                });
            }
        }
    }

    #[test]
    fn test_sealed_room_gets_a_door() {
        with_builder(CellType::HouseNorth, Neighbors::default(), 3, |b| {
            b.fill(Terrain::Grass);
            b.walled_box(Terrain::WallH, Terrain::WallV, 5, 5, 12, 10);
            b.square(Terrain::Floor, 6, 6, 11, 9);
            assert_eq!(sealed_floor(&b.grid).len(), 24);
            open_sealed_rooms(b, Terrain::DoorClosed);
            assert!(sealed_floor(&b.grid).is_empty());
            assert_eq!(b.grid.count_terrain(Terrain::DoorClosed), 1);
        });
    }

    #[test]
    fn test_rotated_sees_canonical_cell_and_neighbors() {
        let mut registry = Registry::new();
        registry.register_rotations(&[CellType::HouseNorth, CellType::HouseEast], from_fn(|b| {
            b.fill(Terrain::Grass);
            assert_eq!(b.cell(), CellType::HouseNorth);
            // The east neighbor of an east-facing cell is seen on the canonical north side.
            if b.neighbor(Direction::North) == CellType::RoadNs {
                b.set(0, 0, Terrain::Pavement);
            }
        }));
        let neighbors = Neighbors::new(CellType::Field, CellType::RoadNs, CellType::Field, CellType::Field);
        with_builder(CellType::HouseEast, neighbors, 1, |b| {
            registry.generate(b);
            assert_eq!(b.cell(), CellType::HouseEast);
            let p = rotate_point(Point::new(0, 0), 1);
            assert_eq!(b.grid.ter(p), Terrain::Pavement);
        });
    }
}
