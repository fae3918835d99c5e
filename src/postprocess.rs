//! Zone-driven bulk effects applied once a cell is fully generated.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Direction, Point};
use crate::grid::{TileGrid, EDGE, GRID_SIZE};
use crate::seeds::{one_in, rng, x_in_y};
use crate::terrain::{FieldKind, Terrain};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostProcessKind {
    /// Walls, doors and furniture knocked down to rubble.
    BashDamage,
    /// Items drift to nearby tiles.
    MoveItems,
    /// Fire fields on flammable tiles.
    AddFire,
    /// Blood spots, streaks and pools.
    PlaceBlood,
    /// Corpses with blood around them.
    ScatterCorpses,
}

/// One configured effect. `chance` is a percentage per attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostProcessZone {
    pub kind: PostProcessKind,
    #[serde(default = "default_chance")]
    pub chance: i32,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_intensity")]
    pub min_intensity: i32,
    #[serde(default = "default_intensity")]
    pub max_intensity: i32,
}

fn default_chance() -> i32 {
    100
}

fn default_attempts() -> u32 {
    1
}

fn default_intensity() -> i32 {
    1
}

impl PostProcessZone {
    pub fn new(kind: PostProcessKind, chance: i32, attempts: u32) -> Self {
        Self {
            kind,
            chance,
            attempts,
            min_intensity: 1,
            max_intensity: 1,
        }
    }

    pub fn with_intensity(mut self, min: i32, max: i32) -> Self {
        self.min_intensity = min.min(max);
        self.max_intensity = min.max(max);
        self
    }
}

/// Apply zones in order.
pub fn apply_zones<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, zones: &[PostProcessZone]) {
    for zone in zones {
        log::debug!("post-process {:?} x{}", zone.kind, zone.attempts);
        match zone.kind {
            PostProcessKind::BashDamage => bash_damage(grid, r, zone),
            PostProcessKind::MoveItems => move_items(grid, r, zone),
            PostProcessKind::AddFire => add_fire(grid, r, zone),
            PostProcessKind::PlaceBlood => place_blood(grid, r, zone),
            PostProcessKind::ScatterCorpses => scatter_corpses(grid, r, zone),
        }
    }
}

fn random_tile<R: Rng + ?Sized>(r: &mut R) -> Point {
    Point::new(rng(r, 0, EDGE), rng(r, 0, EDGE))
}

/// How hard a tile is to knock down.
fn bash_resistance(t: Terrain) -> i32 {
    use Terrain::*;
    match t {
        Window | GlassWallV | GlassWallH | DoorGlassClosed => 1,
        t if t.is_furniture() => 2,
        DoorClosed | DoorLocked | FenceV | FenceH => 3,
        WallV | WallH | Wax => 4,
        ReinforcedGlassV | ReinforcedGlassH | Bars => 5,
        _ => 6,
    }
}

/// Hit a tile with `strength`; bashable tiles that give way become rubble. Returns
/// whether the tile broke.
pub fn bash(grid: &mut TileGrid, p: Point, strength: i32) -> bool {
    let ter = grid.ter(p);
    if !ter.is_bashable() || strength < bash_resistance(ter) {
        return false;
    }
    grid.set_ter(p, Terrain::Rubble);
    true
}

fn bash_damage<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, zone: &PostProcessZone) {
    for _ in 0..zone.attempts {
        if !x_in_y(r, zone.chance, 100) {
            continue;
        }
        let p = random_tile(r);
        if grid.ter(p).is_natural_underground() {
            continue;
        }
        let strength = rng(r, zone.min_intensity, zone.max_intensity);
        bash(grid, p, strength);
    }
}

fn move_items<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, zone: &PostProcessZone) {
    let reach = zone.max_intensity.max(0);
    for _ in 0..zone.attempts {
        let p = random_tile(r);
        if grid.ter(p).is_natural_underground() || grid.items_at(p).is_empty() {
            continue;
        }
        let mut stay = Vec::new();
        for item in grid.take_items(p) {
            if !x_in_y(r, zone.chance, 100) {
                stay.push(item);
                continue;
            }
            let dest = p.offset(rng(r, -reach, reach), rng(r, -reach, reach));
            let ter = grid.ter(dest);
            if !grid.in_bounds(dest) || !(ter.is_passable() || ter.is_container()) {
                stay.push(item);
                continue;
            }
            grid.add_item(dest, item.item, item.created);
        }
        for item in stay {
            grid.add_item(p, item.item, item.created);
        }
    }
}

fn add_fire<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, zone: &PostProcessZone) {
    for _ in 0..zone.attempts {
        let p = random_tile(r);
        if grid.ter(p).is_natural_underground() {
            continue;
        }
        if x_in_y(r, zone.chance, 100) && grid.ter(p).is_flammable() {
            let intensity = rng(r, zone.min_intensity, zone.max_intensity);
            grid.add_field(p, FieldKind::Fire, intensity);
        }
    }
}

/// Floor blood stays off walls, doors, windows and furniture; wall streaks stay on walls.
fn can_bleed(grid: &TileGrid, p: Point, on_wall: bool) -> bool {
    let ter = grid.ter(p);
    if !grid.in_bounds(p) {
        return false;
    }
    if on_wall {
        ter.is_wall() && !ter.is_natural_underground()
    } else {
        !ter.is_wall() && !ter.is_door() && !ter.is_furniture() && ter != Terrain::Window
    }
}

fn step(p: Point, dir: Direction) -> Point {
    let (dx, dy) = dir.delta();
    p.offset(dx, dy)
}

fn bleed_adjacent<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, p: Point, chance: i32) {
    for dir in Direction::ALL {
        let n = step(p, dir);
        if can_bleed(grid, n, false) && rng(r, 1, 100) < chance {
            grid.add_field(n, FieldKind::Blood, 1);
        }
    }
}

/// A central splash with two rings of decreasing chance.
pub fn blood_pool<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, p: Point) {
    if !can_bleed(grid, p, false) {
        return;
    }
    grid.add_field(p, FieldKind::Blood, 1);
    bleed_adjacent(grid, r, p, 60);
    for dir in Direction::ALL {
        let n = step(p, dir);
        if can_bleed(grid, n, false) {
            bleed_adjacent(grid, r, n, 30);
        }
    }
}

/// A trail of 3 to 12 tiles that skips, stops early and (on floors) meanders more the
/// longer it runs.
pub fn blood_streak<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, p: Point) {
    let on_wall = grid.ter(p).is_wall();
    if !can_bleed(grid, p, on_wall) {
        return;
    }
    let length = rng(r, 3, 12);
    let mut dir = Direction::from_index(rng(r, 0, 3) as usize);
    grid.add_field(p, FieldKind::Blood, 1);
    let mut last = p;

    for i in 0..length {
        let mut dest = step(last, dir);
        if !can_bleed(grid, dest, on_wall) {
            let turn = Direction::ALL
                .into_iter()
                .filter(|d| *d != dir)
                .find(|d| can_bleed(grid, step(last, *d), on_wall));
            match turn {
                Some(d) => {
                    dir = d;
                    dest = step(last, d);
                }
                None => break,
            }
        }
        if rng(r, 1, 100) < 5 + i * 3 {
            last = dest;
            continue;
        }
        if rng(r, 1, 100) < 10 + i * 5 {
            break;
        }
        grid.add_field(dest, FieldKind::Blood, 1);
        last = dest;

        if !on_wall && rng(r, 1, 100) < 30 + i * 3 {
            let side = match dir {
                Direction::North | Direction::South => {
                    if one_in(r, 2) {
                        Direction::East
                    } else {
                        Direction::West
                    }
                }
                Direction::East | Direction::West => {
                    if one_in(r, 2) {
                        Direction::North
                    } else {
                        Direction::South
                    }
                }
            };
            let n = step(last, side);
            if can_bleed(grid, n, on_wall) {
                grid.add_field(n, FieldKind::Blood, 1);
                last = n;
            }
        }
    }
}

fn place_blood<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, zone: &PostProcessZone) {
    for _ in 0..GRID_SIZE * GRID_SIZE {
        let p = random_tile(r);
        if x_in_y(r, 10, 100) || grid.ter(p).is_natural_underground() {
            continue;
        }
        if !x_in_y(r, zone.chance, 100) {
            continue;
        }
        let roll = rng(r, 1, 100);
        if roll <= 20 {
            let on_wall = grid.ter(p).is_wall();
            if can_bleed(grid, p, on_wall) {
                grid.add_field(p, FieldKind::Blood, 1);
            }
        } else if roll <= 60 {
            blood_streak(grid, r, p);
        } else {
            blood_pool(grid, r, p);
        }
    }
}

fn scatter_corpses<R: Rng + ?Sized>(grid: &mut TileGrid, r: &mut R, zone: &PostProcessZone) {
    let turn = grid.created();
    for _ in 0..zone.attempts {
        if !x_in_y(r, zone.chance, 100) {
            continue;
        }
        let p = random_tile(r);
        if !grid.ter(p).is_passable() || grid.ter(p).is_natural_underground() {
            continue;
        }
        grid.add_item(p, "corpse_human", turn);
        blood_pool(grid, r, p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn house_like() -> TileGrid {
        let mut grid = TileGrid::new(0);
        grid.fill(Terrain::Floor);
        for i in 0..24 {
            grid.set_ter(Point::new(i, 0), Terrain::WallH);
            grid.set_ter(Point::new(0, i), Terrain::WallV);
        }
        grid.set_ter(Point::new(5, 5), Terrain::Table);
        grid
    }

    #[test]
    fn test_bash_turns_walls_to_rubble() {
        let mut grid = house_like();
        assert!(!bash(&mut grid, Point::new(3, 0), 1));
        assert!(bash(&mut grid, Point::new(3, 0), 9));
        assert_eq!(grid.ter(Point::new(3, 0)), Terrain::Rubble);
        assert!(bash(&mut grid, Point::new(5, 5), 2));
        assert!(!bash(&mut grid, Point::new(6, 6), 9));
    }

    #[test]
    fn test_natural_rock_is_never_bashed() {
        let mut grid = TileGrid::new(0);
        grid.fill(Terrain::Rock);
        let mut r = ChaCha8Rng::seed_from_u64(1);
        let zone = PostProcessZone::new(PostProcessKind::BashDamage, 99, 500).with_intensity(10, 20);
        apply_zones(&mut grid, &mut r, &[zone]);
        assert_eq!(grid.count_terrain(Terrain::Rock), 24 * 24);
    }

    #[test]
    fn test_moved_items_stay_in_bounds_and_conserved() {
        let mut grid = house_like();
        for _ in 0..10 {
            grid.add_item(Point::new(1, 1), "rock", 0);
            grid.add_item(Point::new(22, 22), "rock", 0);
        }
        let mut r = ChaCha8Rng::seed_from_u64(2);
        let zone = PostProcessZone::new(PostProcessKind::MoveItems, 80, 2000).with_intensity(1, 4);
        apply_zones(&mut grid, &mut r, &[zone]);
        assert_eq!(grid.total_items(), 20);
        for (p, tile) in grid.tiles().iter() {
            if !tile.items.is_empty() {
                assert!(tile.terrain.is_passable() || tile.terrain.is_container(), "{}", p);
            }
        }
    }

    #[test]
    fn test_fire_only_on_flammable() {
        let mut grid = TileGrid::new(0);
        grid.fill(Terrain::Pavement);
        grid.set_ter(Point::new(4, 4), Terrain::Grass);
        let mut r = ChaCha8Rng::seed_from_u64(3);
        let zone = PostProcessZone::new(PostProcessKind::AddFire, 100, 5000).with_intensity(1, 3);
        apply_zones(&mut grid, &mut r, &[zone]);
        for (p, tile) in grid.tiles().iter() {
            if tile.field.is_some() {
                assert_eq!(p, Point::new(4, 4));
            }
        }
        assert!(grid.field(Point::new(4, 4)).is_some());
    }

    #[test]
    fn test_blood_avoids_furniture_on_floor() {
        let mut grid = house_like();
        let mut r = ChaCha8Rng::seed_from_u64(4);
        let zone = PostProcessZone::new(PostProcessKind::PlaceBlood, 50, 1);
        apply_zones(&mut grid, &mut r, &[zone]);
        assert!(grid.field(Point::new(5, 5)).is_none());
        let bloody = grid.tiles().iter().filter(|(_, t)| t.field.is_some()).count();
        assert!(bloody > 0);
    }

    #[test]
    fn test_corpses_land_on_passable_tiles() {
        let mut grid = house_like();
        let mut r = ChaCha8Rng::seed_from_u64(5);
        let zone = PostProcessZone::new(PostProcessKind::ScatterCorpses, 100, 30);
        apply_zones(&mut grid, &mut r, &[zone]);
        assert!(grid.total_items() > 0);
        for (_, tile) in grid.tiles().iter() {
            if !tile.items.is_empty() {
                assert!(tile.terrain.is_passable());
            }
        }
    }
}
