//! The tile grid for one cell and its submap (quadrant) views.
//!
//! Tiles live in one bounds-checked `Tilemap`; entities are stored once in grid
//! coordinates. A submap is a derived view over both, so there is nothing to keep in
//! sync when the grid is rotated.

use serde::{Deserialize, Serialize};

use crate::entities::{Computer, SpawnRecord, VehiclePlacement};
use crate::geometry::Point;
use crate::terrain::{Field, FieldKind, Terrain, Trap};
use crate::tilemap::Tilemap;

/// Side of one submap in tiles
pub const SUBMAP_SIZE: usize = 12;
/// Side of a whole cell in tiles
pub const GRID_SIZE: usize = SUBMAP_SIZE * 2;
/// Last valid coordinate on either axis
pub const EDGE: i32 = GRID_SIZE as i32 - 1;
/// Half the cell: the first coordinate of the second submap
pub const SEE: i32 = SUBMAP_SIZE as i32;

/// Game time in turns.
pub type Turn = i64;

/// One item lying on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub item: String,
    pub created: Turn,
}

/// A single tile of a cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub trap: Trap,
    pub field: Option<Field>,
    pub radiation: i32,
    pub items: Vec<ItemInstance>,
}

/// A fully populated (or in-progress) cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Tilemap<Tile>,
    spawns: Vec<SpawnRecord>,
    computers: Vec<Computer>,
    vehicles: Vec<VehiclePlacement>,
    created: Turn,
}

impl TileGrid {
    pub fn new(created: Turn) -> Self {
        Self {
            tiles: Tilemap::new(GRID_SIZE, GRID_SIZE),
            spawns: Vec::new(),
            computers: Vec::new(),
            vehicles: Vec::new(),
            created,
        }
    }

    pub fn created(&self) -> Turn {
        self.created
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.tiles.in_bounds(p)
    }

    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.tiles.get(p)
    }

    pub fn tiles(&self) -> &Tilemap<Tile> {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Tilemap<Tile> {
        &mut self.tiles
    }

    /// Terrain at `p`; `Terrain::Null` outside the grid.
    pub fn ter(&self, p: Point) -> Terrain {
        self.tiles.get(p).map(|t| t.terrain).unwrap_or(Terrain::Null)
    }

    pub fn set_ter(&mut self, p: Point, terrain: Terrain) {
        if let Some(tile) = self.tiles.get_mut(p) {
            tile.terrain = terrain;
        }
    }

    pub fn fill(&mut self, terrain: Terrain) {
        for (_, tile) in self.tiles.iter_mut() {
            tile.terrain = terrain;
        }
    }

    pub fn trap(&self, p: Point) -> Trap {
        self.tiles.get(p).map(|t| t.trap).unwrap_or_default()
    }

    pub fn set_trap(&mut self, p: Point, trap: Trap) {
        if let Some(tile) = self.tiles.get_mut(p) {
            tile.trap = trap;
        }
    }

    pub fn remove_trap(&mut self, p: Point) {
        self.set_trap(p, Trap::None);
    }

    pub fn field(&self, p: Point) -> Option<Field> {
        self.tiles.get(p).and_then(|t| t.field)
    }

    /// Add a field; a stronger existing field of the same kind is kept.
    pub fn add_field(&mut self, p: Point, kind: FieldKind, intensity: i32) {
        if let Some(tile) = self.tiles.get_mut(p) {
            let new = Field::new(kind, intensity);
            match tile.field {
                Some(existing) if existing.kind == kind && existing.intensity >= new.intensity => {}
                _ => tile.field = Some(new),
            }
        }
    }

    pub fn remove_field(&mut self, p: Point) {
        if let Some(tile) = self.tiles.get_mut(p) {
            tile.field = None;
        }
    }

    pub fn radiation(&self, p: Point) -> i32 {
        self.tiles.get(p).map(|t| t.radiation).unwrap_or(0)
    }

    pub fn set_radiation(&mut self, p: Point, value: i32) {
        if let Some(tile) = self.tiles.get_mut(p) {
            tile.radiation = value.max(0);
        }
    }

    pub fn adjust_radiation(&mut self, p: Point, delta: i32) {
        let current = self.radiation(p);
        self.set_radiation(p, current + delta);
    }

    pub fn items_at(&self, p: Point) -> &[ItemInstance] {
        self.tiles.get(p).map(|t| t.items.as_slice()).unwrap_or(&[])
    }

    pub fn add_item(&mut self, p: Point, item: impl Into<String>, created: Turn) -> bool {
        match self.tiles.get_mut(p) {
            Some(tile) => {
                tile.items.push(ItemInstance {
                    item: item.into(),
                    created,
                });
                true
            }
            None => false,
        }
    }

    pub fn take_items(&mut self, p: Point) -> Vec<ItemInstance> {
        self.tiles
            .get_mut(p)
            .map(|t| std::mem::take(&mut t.items))
            .unwrap_or_default()
    }

    pub fn spawns(&self) -> &[SpawnRecord] {
        &self.spawns
    }

    /// Record a spawn; out-of-bounds positions are dropped.
    pub fn add_spawn(&mut self, spawn: SpawnRecord) {
        if self.in_bounds(spawn.pos) {
            self.spawns.push(spawn);
        }
    }

    pub fn computers(&self) -> &[Computer] {
        &self.computers
    }

    /// Install a terminal at `p`, replacing any terminal already in that submap.
    pub fn add_computer(&mut self, p: Point, name: &str, security: u8) -> Option<&mut Computer> {
        if !self.in_bounds(p) {
            return None;
        }
        let quadrant = p.submap_index();
        self.computers.retain(|c| c.pos.submap_index() != quadrant);
        self.computers.push(Computer::new(name, security, p));
        self.computers.last_mut()
    }

    pub fn vehicles(&self) -> &[VehiclePlacement] {
        &self.vehicles
    }

    pub fn add_vehicle(&mut self, vehicle: VehiclePlacement) {
        if self.in_bounds(vehicle.pos) {
            self.vehicles.push(vehicle);
        }
    }

    pub(crate) fn entities_mut(
        &mut self,
    ) -> (&mut Vec<SpawnRecord>, &mut Vec<Computer>, &mut Vec<VehiclePlacement>) {
        (&mut self.spawns, &mut self.computers, &mut self.vehicles)
    }

    /// Submap view for quadrant `index` (`qx + 2 * qy`).
    pub fn submap(&self, index: usize) -> SubmapView<'_> {
        SubmapView {
            grid: self,
            index: index.min(3),
        }
    }

    pub fn submaps(&self) -> impl Iterator<Item = SubmapView<'_>> {
        (0..4).map(move |i| self.submap(i))
    }

    /// Positions that still carry the sentinel terrain.
    pub fn unset_tiles(&self) -> Vec<Point> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.terrain == Terrain::Null)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn count_terrain(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|(_, t)| t.terrain == terrain).count()
    }

    pub fn total_items(&self) -> usize {
        self.tiles.iter().map(|(_, t)| t.items.len()).sum()
    }

    /// Render one glyph per tile, rows separated by newlines.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(GRID_SIZE * (GRID_SIZE + 1));
        for y in 0..GRID_SIZE as i32 {
            for x in 0..GRID_SIZE as i32 {
                out.push(self.ter(Point::new(x, y)).glyph());
            }
            out.push('\n');
        }
        out
    }
}

/// Read-only view of one quadrant of a cell.
pub struct SubmapView<'a> {
    grid: &'a TileGrid,
    index: usize,
}

impl<'a> SubmapView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Grid coordinates of this submap's north-west corner.
    pub fn origin(&self) -> Point {
        let s = SUBMAP_SIZE as i32;
        Point::new((self.index % 2) as i32 * s, (self.index / 2) as i32 * s)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.grid.in_bounds(p) && p.submap_index() == self.index
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let o = self.origin();
        let s = SUBMAP_SIZE as i32;
        (0..s).flat_map(move |y| (0..s).map(move |x| o.offset(x, y)))
    }

    /// Number of items lying in this submap.
    pub fn active_item_count(&self) -> usize {
        self.points().map(|p| self.grid.items_at(p).len()).sum()
    }

    /// Number of tiles in this submap carrying a field.
    pub fn field_count(&self) -> usize {
        self.points().filter(|p| self.grid.field(*p).is_some()).count()
    }

    pub fn last_touched(&self) -> Turn {
        self.grid.created
    }

    pub fn computer(&self) -> Option<&'a Computer> {
        self.grid.computers.iter().find(|c| c.pos.submap_index() == self.index)
    }

    pub fn spawns(&self) -> impl Iterator<Item = &'a SpawnRecord> + 'a {
        let index = self.index;
        self.grid.spawns.iter().filter(move |s| s.pos.submap_index() == index)
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &'a VehiclePlacement> + 'a {
        let index = self.index;
        self.grid.vehicles.iter().filter(move |v| v.pos.submap_index() == index)
    }
}
