//! Open ground and vegetation: fields, dirt lots, the forest family, hives, spider pits,
//! fungal blooms and craters.

use super::{grass_or_dirt, Registry};
use crate::builder::CellBuilder;
use crate::geometry::{rl_dist, Direction, Point};
use crate::grid::{EDGE, SEE};
use crate::overmap::CellType;
use crate::terrain::{FieldKind, Terrain, Trap};

pub(crate) fn register(r: &mut Registry) {
    r.register(CellType::Field, field);
    r.register(CellType::Dirtlot, dirtlot);
    r.register(CellType::Forest, forest);
    r.register(CellType::ForestThick, forest);
    r.register(CellType::ForestWater, forest);
    r.register(CellType::Hive, hive);
    r.register(CellType::HiveCenter, hive);
    r.register(CellType::SpiderPit, spider_pit);
    r.register(CellType::FungalBloom, fungal_bloom);
    r.register(CellType::Crater, crater);
}

fn is_groundcover(t: Terrain) -> bool {
    matches!(t, Terrain::Dirt | Terrain::Grass)
}

pub fn field(b: &mut CellBuilder) {
    b.fill_with(grass_or_dirt);
    b.place_items("field", 60, 0, 0, EDGE, EDGE - 1, true);
}

fn dirtlot(b: &mut CellBuilder) {
    for y in 0..=EDGE {
        for x in 0..=EDGE {
            let t = if b.one_in(120) {
                Terrain::Pit
            } else if b.one_in(50) {
                Terrain::Grass
            } else {
                Terrain::Dirt
            };
            b.set(x, y, t);
        }
    }
    let vehicles = b.rng(0, 1) * b.rng(0, 2);
    for _ in 0..vehicles {
        let (x, y) = (b.rng(0, 16) + 4, b.rng(0, 16) + 4);
        let facing = b.rng(0, 3) * 180 + i32::from(b.one_in(3)) * b.rng(0, 89);
        if b.grid.vehicles().iter().all(|v| v.pos != Point::new(x, y)) {
            b.add_vehicle("dirtlot", x, y, facing);
        }
    }
}

/// Tree density bleeding in from each edge, indexed by `Direction::index`.
fn forest_factors(b: &CellBuilder, base: i32) -> [i32; 4] {
    let mut fac = [base; 4];
    for dir in Direction::ALL {
        match b.neighbor(dir) {
            CellType::Forest | CellType::ForestWater => fac[dir.index()] += 14,
            CellType::ForestThick => fac[dir.index()] += 18,
            _ => {}
        }
    }
    fac
}

/// Average of the edge factors that still reach tile `(x, y)`.
fn forest_chance(fac: [i32; 4], x: i32, y: i32) -> i32 {
    let [n, e, s, w] = fac;
    let (mut chance, mut num) = (0, 0);
    if y < n {
        chance += n - y;
        num += 1;
    }
    if EDGE - x < e {
        chance += e - (EDGE - x);
        num += 1;
    }
    if EDGE - y < s {
        chance += s - (EDGE - y);
        num += 1;
    }
    if x < w {
        chance += w - x;
        num += 1;
    }
    if num > 0 {
        chance /= num;
    }
    chance
}

/// One density roll per tile picks tree, young tree, underbrush or bare dirt.
fn grow_forest(b: &mut CellBuilder, fac: [i32; 4]) {
    for x in 0..=EDGE {
        for y in 0..=EDGE {
            let chance = forest_chance(fac, x, y);
            let rn = b.rng(0, chance);
            let t = if (chance > 0 && rn > 13) || b.one_in(100 - chance) {
                Terrain::Tree
            } else if (chance > 0 && rn > 10) || b.one_in(100 - chance) {
                Terrain::TreeYoung
            } else if (chance > 0 && rn > 9) || b.one_in(100 - chance) {
                Terrain::Underbrush
            } else {
                Terrain::Dirt
            };
            b.set(x, y, t);
        }
    }
    b.place_items("forest", 60, 0, 0, EDGE, EDGE, true);
}

fn forest(b: &mut CellBuilder) {
    let base = match b.cell() {
        CellType::ForestThick => 8,
        CellType::ForestWater => 4,
        _ => 0,
    };
    let fac = forest_factors(b, base);
    grow_forest(b, fac);

    if b.cell() == CellType::ForestWater {
        swamp_water(b);
    }

    if b.one_in(10000) {
        b.add_spawn("mon_jabberwock", 1, SEE, SEE);
    }
    if b.one_in(100) {
        spider_nest(b);
    }
}

/// Weight of a neighbor when spreading swamp water towards it.
fn water_factor(t: CellType) -> i32 {
    match t {
        CellType::ForestWater => 2,
        t if t.is_river() => 3,
        CellType::Forest | CellType::ForestThick => 1,
        _ => 0,
    }
}

fn flood(b: &mut CellBuilder, x: i32, y: i32) {
    let t = b.ter(x, y);
    if is_groundcover(t) || t == Terrain::Underbrush {
        b.set(x, y, Terrain::WaterShallow);
    }
}

/// A short random walk deepens water, with extra puddles thrown towards wet neighbors,
/// then a few sinkholes.
fn swamp_water(b: &mut CellBuilder) {
    let fac = Direction::ALL.map(|d| water_factor(b.neighbor(d)));
    let [n, e, s, w] = fac;
    let half = SEE / 2;
    let (mut x, mut y) = (half + b.rng(0, SEE), half + b.rng(0, SEE));
    for _ in 0..20 {
        if b.grid.in_bounds(Point::new(x, y)) {
            if b.ter(x, y) == Terrain::WaterShallow {
                b.set(x, y, Terrain::WaterDeep);
            } else {
                flood(b, x, y);
            }
        } else {
            break;
        }
        x += b.rng(-2, 2);
        y += b.rng(-2, 2);
        if !(0..=EDGE).contains(&x) {
            x = half + b.rng(0, SEE);
        }
        if !(0..=EDGE).contains(&y) {
            y = half + b.rng(0, SEE);
        }
        for _ in 0..n {
            let (wx, wy) = (b.rng(0, EDGE), b.rng(0, SEE - 1));
            flood(b, wx, wy);
        }
        for _ in 0..e {
            let (wx, wy) = (b.rng(SEE, EDGE), b.rng(0, EDGE));
            flood(b, wx, wy);
        }
        for _ in 0..s {
            let (wx, wy) = (b.rng(0, EDGE), b.rng(SEE, EDGE));
            flood(b, wx, wy);
        }
        for _ in 0..w {
            let (wx, wy) = (b.rng(0, SEE - 1), b.rng(0, EDGE));
            flood(b, wx, wy);
        }
    }

    // Good chance of none
    let sinkholes = b.rng(0, 2) * b.rng(0, 1) + b.rng(0, 1);
    for _ in 0..sinkholes {
        let (sx, sy) = (b.rng(0, EDGE), b.rng(0, EDGE));
        b.set_trap(sx, sy, Trap::Sinkhole);
        if b.ter(sx, sy) != Terrain::WaterShallow {
            let ground = grass_or_dirt(&mut b.rng);
            b.set(sx, sy, ground);
        }
    }
}

/// Webs over most open ground with an egg sack clearing in the middle.
fn spider_nest(b: &mut CellBuilder) {
    for x in 0..=EDGE {
        for y in 0..=EDGE {
            let t = b.ter(x, y);
            if (is_groundcover(t) || t == Terrain::Underbrush) && !b.one_in(3) {
                let intensity = b.rng(1, 3);
                b.add_field(x, y, FieldKind::Web, intensity);
            }
        }
    }
    b.set(SEE, SEE, Terrain::Dirt);
    b.grid.remove_field(Point::new(SEE, SEE));
    let count = b.rng(1, 2) as u32;
    b.add_spawn("mon_spider_web", count, SEE, SEE);
}

/// Offsets of the wax wall around a hive cell, in the order the entrance roll indexes them.
const HIVE_RING: [(i32, i32); 24] = [
    (-1, -4),
    (0, -4),
    (1, -4),
    (-2, -3),
    (-1, -3),
    (1, -3),
    (2, -3),
    (-3, -2),
    (-2, -2),
    (2, -2),
    (3, -2),
    (-3, -1),
    (-3, 0),
    (3, -1),
    (-3, 1),
    (3, 0),
    (3, 1),
    (-2, 3),
    (-1, 3),
    (1, 3),
    (2, 3),
    (-1, 4),
    (0, 4),
    (1, 4),
];

fn hive(b: &mut CellBuilder) {
    for x in 0..=EDGE {
        for y in 0..=EDGE {
            let rn = b.rng(0, 14);
            let t = if rn > 13 {
                Terrain::Tree
            } else if rn > 11 {
                Terrain::TreeYoung
            } else if rn > 10 {
                Terrain::Underbrush
            } else {
                Terrain::Dirt
            };
            b.set(x, y, t);
        }
    }

    let is_center = b.ctx.neighbors.all().iter().all(|&n| n == CellType::Hive);
    for j in (5..EDGE - 4).step_by(6) {
        let start = if j == 5 || j == 17 { 3 } else { 6 };
        for i in (start..EDGE - 4).step_by(6) {
            if b.one_in(8) {
                continue;
            }
            hive_cell(b, i, j);
            if is_center {
                b.place_items("hive_center", 90, i - 2, j - 2, i + 2, j + 2, false);
            } else {
                b.place_items("hive", 80, i - 2, j - 2, i + 2, j + 2, false);
            }
        }
    }
}

/// One hexagonal wax cell centered on `(i, j)` with up to two gaps in its wall.
fn hive_cell(b: &mut CellBuilder, i: i32, j: i32) {
    // Caps are always there
    b.set(i, j - 5, Terrain::Wax);
    b.set(i, j + 5, Terrain::Wax);
    b.square(Terrain::FloorWax, i - 2, j - 1, i + 2, j + 1);
    b.add_spawn("mon_bee", 2, i, j);
    b.add_spawn("mon_beekeeper", 1, i, j);
    b.set(i, j - 3, Terrain::FloorWax);
    b.set(i, j + 3, Terrain::FloorWax);
    b.line(Terrain::FloorWax, i - 1, j - 2, i + 1, j - 2);
    b.line(Terrain::FloorWax, i - 1, j + 2, i + 1, j + 2);

    let skip1 = b.rng(0, 23) as usize;
    let skip2 = b.rng(0, 23) as usize;
    for (k, &(dx, dy)) in HIVE_RING.iter().enumerate() {
        let t = if k == skip1 || k == skip2 {
            Terrain::FloorWax
        } else {
            Terrain::Wax
        };
        b.set(i + dx, j + dy, t);
    }
}

fn spider_pit(b: &mut CellBuilder) {
    let fac = forest_factors(b, 4);
    grow_forest(b, fac);
    for n in 0..4 {
        let (x, y) = (b.rng(3, EDGE - 3), b.rng(3, EDGE - 3));
        if n == 0 {
            b.set(x, y, Terrain::SlopeDown);
        } else {
            let ground = grass_or_dirt(&mut b.rng);
            b.set(x, y, ground);
            b.set_trap(x, y, Trap::Sinkhole);
        }
        for x1 in x - 3..=x + 3 {
            for y1 in y - 3..=y + 3 {
                let intensity = b.rng(2, 3);
                b.add_field(x1, y1, FieldKind::Web, intensity);
                if b.ter(x1, y1) != Terrain::SlopeDown {
                    b.set(x1, y1, Terrain::Dirt);
                }
            }
        }
    }
}

fn fungal_bloom(b: &mut CellBuilder) {
    let center = Point::new(SEE, SEE);
    for x in 0..=EDGE {
        for y in 0..=EDGE {
            let t = if b.one_in(rl_dist(Point::new(x, y), center) * 4) {
                Terrain::Marloss
            } else if b.one_in(10) {
                if b.one_in(3) {
                    Terrain::TreeFungal
                } else {
                    Terrain::TreeFungalYoung
                }
            } else if b.one_in(5) {
                Terrain::ShrubFungal
            } else if b.one_in(10) {
                Terrain::FungusMound
            } else {
                Terrain::Fungus
            };
            b.set(x, y, t);
        }
    }
    b.square(Terrain::Fungus, SEE - 2, SEE - 2, SEE + 2, SEE + 2);
    b.add_spawn("mon_fungaloid_queen", 1, SEE, SEE);
}

/// Blast area that fades out towards non-crater neighbors.
fn crater(b: &mut CellBuilder) {
    let mut fac = [0; 4];
    for dir in Direction::ALL {
        if b.neighbor(dir) != CellType::Crater {
            fac[dir.index()] = 6;
        }
    }
    let [n, e, s, w] = fac;
    for x in 0..=EDGE {
        for y in 0..=EDGE {
            let blasted = b.rng(0, w) <= x && b.rng(0, e) <= EDGE - x && b.rng(0, n) <= y && b.rng(0, s) <= EDGE - y;
            if blasted {
                b.set(x, y, Terrain::Rubble);
                let rad = b.rng(0, 4) * b.rng(0, 2);
                b.set_radiation(x, y, rad);
            } else {
                let ground = grass_or_dirt(&mut b.rng);
                b.set(x, y, ground);
                let rad = b.rng(0, 2) * b.rng(0, 2) * b.rng(0, 2);
                b.set_radiation(x, y, rad);
            }
        }
    }
    b.place_items("wreckage", 83, 0, 0, EDGE, EDGE, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::overmap::Neighbors;

    #[test]
    fn test_forest_among_forests_is_only_vegetation() {
        for seed in 0..10 {
            with_builder(CellType::Forest, Neighbors::uniform(CellType::Forest), seed, |b| {
                forest(b);
                for (_, tile) in b.grid.tiles().iter() {
                    assert!(
                        matches!(
                            tile.terrain,
                            Terrain::Tree | Terrain::TreeYoung | Terrain::Underbrush | Terrain::Dirt | Terrain::Grass
                        ),
                        "unexpected {:?}",
                        tile.terrain
                    );
                }
            });
        }
    }

    #[test]
    fn test_forest_chance_bleeds_from_edges() {
        let fac = [18, 0, 0, 0];
        assert_eq!(forest_chance(fac, 10, 0), 18);
        assert_eq!(forest_chance(fac, 10, 17), 1);
        assert_eq!(forest_chance(fac, 10, 18), 0);
        // Two contributing edges are averaged.
        assert_eq!(forest_chance([14, 0, 0, 14], 0, 0), 14);
        assert_eq!(forest_chance([14, 14, 14, 14], 12, 12), 2);
    }

    #[test]
    fn test_thick_forest_is_denser_than_plain() {
        let trees = |cell| {
            (0..5)
                .map(|seed| {
                    with_builder(cell, Neighbors::uniform(CellType::ForestThick), seed, |b| {
                        forest(b);
                        b.grid.count_terrain(Terrain::Tree)
                    })
                })
                .sum::<usize>()
        };
        assert!(trees(CellType::ForestThick) > trees(CellType::Field));
    }

    #[test]
    fn test_swamp_next_to_river_holds_water() {
        let neighbors = Neighbors::uniform(CellType::RiverCenter);
        let wet = (0..10)
            .map(|seed| {
                with_builder(CellType::ForestWater, neighbors, seed, |b| {
                    forest(b);
                    b.grid.count_terrain(Terrain::WaterShallow) + b.grid.count_terrain(Terrain::WaterDeep)
                })
            })
            .sum::<usize>();
        assert!(wet > 0);
    }

    #[test]
    fn test_hive_cells_are_wax() {
        with_builder(CellType::Hive, Neighbors::default(), 4, |b| {
            hive(b);
            assert!(b.grid.count_terrain(Terrain::Wax) > 0);
            assert!(b.grid.count_terrain(Terrain::FloorWax) > 0);
            assert!(b.grid.spawns().iter().any(|s| s.monster == "mon_bee"));
        });
    }

    #[test]
    fn test_spider_pit_has_one_way_down() {
        with_builder(CellType::SpiderPit, Neighbors::default(), 5, |b| {
            spider_pit(b);
            assert!(b.grid.count_terrain(Terrain::SlopeDown) >= 1);
            let webs = b
                .grid
                .tiles()
                .iter()
                .filter(|(_, t)| t.field.map(|f| f.kind) == Some(FieldKind::Web))
                .count();
            assert!(webs >= 49);
        });
    }

    #[test]
    fn test_fungal_bloom_center() {
        with_builder(CellType::FungalBloom, Neighbors::default(), 6, |b| {
            fungal_bloom(b);
            assert_eq!(b.ter(SEE, SEE), Terrain::Fungus);
            assert_eq!(b.grid.spawns()[0].monster, "mon_fungaloid_queen");
        });
    }

    #[test]
    fn test_crater_core_is_irradiated_rubble() {
        with_builder(CellType::Crater, Neighbors::uniform(CellType::Crater), 7, |b| {
            crater(b);
            assert_eq!(b.grid.count_terrain(Terrain::Rubble), 24 * 24);
        });
    }
}
