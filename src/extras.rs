//! Map extras: one-shot embellishments rolled onto a finished cell.
//!
//! A [`MapExtra`] is drawn with all the parameters it needs by [`MapExtra::roll`] and then
//! written onto the grid by [`MapExtra::apply`]. Which extra a cell gets, if any, comes
//! from the cell type's [`ExtrasGroup`](crate::overmap::ExtrasGroup) table in
//! [`GenConfig`](crate::config::GenConfig).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::builder::CellBuilder;
use crate::config::ExtrasDistribution;
use crate::geometry::{line_to, rl_dist, trig_dist, Point};
use crate::grid::{EDGE, SEE};
use crate::postprocess;
use crate::seeds;
use crate::shapes::rect_points;
use crate::terrain::{FieldKind, Terrain, Trap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapExtraKind {
    Helicopter,
    Military,
    Science,
    Stash,
    DrugDeal,
    SupplyDrop,
    Portal,
    Minefield,
    WolfPack,
    Crater,
    Fumarole,
    PortalIn,
    Anomaly,
}

impl MapExtraKind {
    pub const ALL: [MapExtraKind; 13] = [
        MapExtraKind::Helicopter,
        MapExtraKind::Military,
        MapExtraKind::Science,
        MapExtraKind::Stash,
        MapExtraKind::DrugDeal,
        MapExtraKind::SupplyDrop,
        MapExtraKind::Portal,
        MapExtraKind::Minefield,
        MapExtraKind::WolfPack,
        MapExtraKind::Crater,
        MapExtraKind::Fumarole,
        MapExtraKind::PortalIn,
        MapExtraKind::Anomaly,
    ];
}

/// Natural property of an anomaly; decides its local effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyProperty {
    Wriggling,
    Glowing,
    Humming,
    Moving,
    Whispering,
    Breathing,
    Dead,
    Itchy,
    Glittering,
    Electric,
    Slimy,
    Engraved,
    Crackling,
    Warm,
    Rattling,
    Scaled,
    Fractal,
}

impl AnomalyProperty {
    pub const ALL: [AnomalyProperty; 17] = [
        AnomalyProperty::Wriggling,
        AnomalyProperty::Glowing,
        AnomalyProperty::Humming,
        AnomalyProperty::Moving,
        AnomalyProperty::Whispering,
        AnomalyProperty::Breathing,
        AnomalyProperty::Dead,
        AnomalyProperty::Itchy,
        AnomalyProperty::Glittering,
        AnomalyProperty::Electric,
        AnomalyProperty::Slimy,
        AnomalyProperty::Engraved,
        AnomalyProperty::Crackling,
        AnomalyProperty::Warm,
        AnomalyProperty::Rattling,
        AnomalyProperty::Scaled,
        AnomalyProperty::Fractal,
    ];

    pub fn random<R: Rng + ?Sized>(r: &mut R) -> Self {
        Self::ALL[r.gen_range(0..Self::ALL.len())]
    }

    fn artifact(&self) -> &'static str {
        use AnomalyProperty::*;
        match self {
            Wriggling => "artifact_wriggling",
            Glowing => "artifact_glowing",
            Humming => "artifact_humming",
            Moving => "artifact_moving",
            Whispering => "artifact_whispering",
            Breathing => "artifact_breathing",
            Dead => "artifact_dead",
            Itchy => "artifact_itchy",
            Glittering => "artifact_glittering",
            Electric => "artifact_electric",
            Slimy => "artifact_slimy",
            Engraved => "artifact_engraved",
            Crackling => "artifact_crackling",
            Warm => "artifact_warm",
            Rattling => "artifact_rattling",
            Scaled => "artifact_scaled",
            Fractal => "artifact_fractal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drug {
    Weed,
    Coke,
    Meth,
    Heroin,
}

impl Drug {
    pub fn item(&self) -> &'static str {
        match self {
            Drug::Weed => "weed",
            Drug::Coke => "coke",
            Drug::Meth => "meth",
            Drug::Heroin => "heroin",
        }
    }
}

const EXTRA_MONSTERS: [&str; 4] = ["mon_gelatin", "mon_mi_go", "mon_kreck", "mon_gracke"];
const PORTAL_MONSTERS: [&str; 5] = [
    "mon_gelatin",
    "mon_flaming_eye",
    "mon_kreck",
    "mon_gracke",
    "mon_blank",
];

/// A rolled embellishment with every parameter it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum MapExtra {
    Helicopter { center: Point, facing: i32 },
    Military { bodies: i32 },
    Science { bodies: i32 },
    Stash { center: Point, traps: i32 },
    DrugDeal { drug: Drug, amount: i32, north_south: bool, a_has_drugs: bool, bodies_a: i32, bodies_b: i32 },
    SupplyDrop { crates: i32 },
    Portal { center: Point, monsters: i32 },
    Minefield { mines: i32 },
    WolfPack { center: Point, wolves: u32 },
    Crater { center: Point, size: i32 },
    Fumarole { from: Point, to: Point },
    PortalIn { center: Point },
    Anomaly { center: Point, property: AnomalyProperty },
}

impl MapExtra {
    pub fn roll<R: Rng + ?Sized>(kind: MapExtraKind, r: &mut R) -> Self {
        use seeds::{dice, one_in, rng};
        match kind {
            MapExtraKind::Helicopter => MapExtra::Helicopter {
                center: Point::new(rng(r, 6, EDGE - 6), rng(r, 6, EDGE - 6)),
                facing: rng(r, 0, 359),
            },
            MapExtraKind::Military => MapExtra::Military { bodies: dice(r, 2, 6) },
            MapExtraKind::Science => MapExtra::Science { bodies: dice(r, 2, 5) },
            MapExtraKind::Stash => MapExtra::Stash {
                center: Point::new(rng(r, 4, EDGE - 4), rng(r, 4, EDGE - 4)),
                traps: rng(r, 3, 8),
            },
            MapExtraKind::DrugDeal => {
                let (drug, amount) = match rng(r, 1, 10) {
                    1 => (Drug::Weed, rng(r, 20, 30)),
                    2..=5 => (Drug::Coke, rng(r, 10, 20)),
                    6..=8 => (Drug::Meth, rng(r, 8, 14)),
                    _ => (Drug::Heroin, rng(r, 6, 12)),
                };
                let bodies_a = dice(r, 3, 3);
                let bodies_b = dice(r, 3, 3);
                MapExtra::DrugDeal {
                    drug,
                    amount,
                    north_south: one_in(r, 2),
                    a_has_drugs: one_in(r, 2),
                    bodies_a,
                    bodies_b,
                }
            }
            MapExtraKind::SupplyDrop => MapExtra::SupplyDrop { crates: rng(r, 1, 5) },
            MapExtraKind::Portal => MapExtra::Portal {
                center: Point::new(rng(r, 1, EDGE - 1), rng(r, 1, EDGE - 1)),
                monsters: rng(r, 0, 4),
            },
            MapExtraKind::Minefield => MapExtra::Minefield { mines: rng(r, 6, 20) },
            MapExtraKind::WolfPack => MapExtra::WolfPack {
                center: Point::new(rng(r, 4, EDGE - 4), rng(r, 4, EDGE - 4)),
                wolves: rng(r, 3, 7) as u32,
            },
            MapExtraKind::Crater => {
                let size = rng(r, 2, 6);
                MapExtra::Crater {
                    center: Point::new(rng(r, size, EDGE - size), rng(r, size, EDGE - size)),
                    size,
                }
            }
            MapExtraKind::Fumarole => MapExtra::Fumarole {
                from: Point::new(rng(r, 0, SEE - 1), rng(r, 0, SEE - 1)),
                to: Point::new(rng(r, SEE, EDGE), rng(r, SEE, EDGE)),
            },
            MapExtraKind::PortalIn => MapExtra::PortalIn {
                center: Point::new(rng(r, 5, EDGE - 5), rng(r, 5, EDGE - 5)),
            },
            MapExtraKind::Anomaly => MapExtra::Anomaly {
                center: Point::new(rng(r, 6, EDGE - 6), rng(r, 6, EDGE - 6)),
                property: AnomalyProperty::random(r),
            },
        }
    }

    pub fn kind(&self) -> MapExtraKind {
        match self {
            MapExtra::Helicopter { .. } => MapExtraKind::Helicopter,
            MapExtra::Military { .. } => MapExtraKind::Military,
            MapExtra::Science { .. } => MapExtraKind::Science,
            MapExtra::Stash { .. } => MapExtraKind::Stash,
            MapExtra::DrugDeal { .. } => MapExtraKind::DrugDeal,
            MapExtra::SupplyDrop { .. } => MapExtraKind::SupplyDrop,
            MapExtra::Portal { .. } => MapExtraKind::Portal,
            MapExtra::Minefield { .. } => MapExtraKind::Minefield,
            MapExtra::WolfPack { .. } => MapExtraKind::WolfPack,
            MapExtra::Crater { .. } => MapExtraKind::Crater,
            MapExtra::Fumarole { .. } => MapExtraKind::Fumarole,
            MapExtra::PortalIn { .. } => MapExtraKind::PortalIn,
            MapExtra::Anomaly { .. } => MapExtraKind::Anomaly,
        }
    }

    pub fn apply(&self, b: &mut CellBuilder) {
        match *self {
            MapExtra::Helicopter { center, facing } => helicopter(b, center, facing),
            MapExtra::Military { bodies } => military(b, bodies),
            MapExtra::Science { bodies } => science(b, bodies),
            MapExtra::Stash { center, traps } => stash(b, center, traps),
            MapExtra::DrugDeal {
                drug,
                amount,
                north_south,
                a_has_drugs,
                bodies_a,
                bodies_b,
            } => drug_deal(b, drug, amount, north_south, a_has_drugs, bodies_a, bodies_b),
            MapExtra::SupplyDrop { crates } => supply_drop(b, crates),
            MapExtra::Portal { center, monsters } => portal(b, center, monsters),
            MapExtra::Minefield { mines } => minefield(b, mines),
            MapExtra::WolfPack { center, wolves } => wolf_pack(b, center, wolves),
            MapExtra::Crater { center, size } => crater(b, center, size),
            MapExtra::Fumarole { from, to } => fumarole(b, from, to),
            MapExtra::PortalIn { center } => portal_in(b, center),
            MapExtra::Anomaly { center, property } => {
                create_anomaly(b, center, property, 0);
                let artifact = property.artifact();
                b.add_item(center.x, center.y, artifact);
            }
        }
    }
}

/// Weighted pick of an extra kind from a distribution; `None` when it has no weight.
pub fn pick_kind<R: Rng + ?Sized>(r: &mut R, dist: &ExtrasDistribution) -> Option<MapExtraKind> {
    let total = dist.total_weight();
    if total == 0 {
        return None;
    }
    let mut roll = seeds::rng(r, 1, total as i32);
    for (kind, weight) in &dist.weights {
        roll -= *weight as i32;
        if roll <= 0 {
            return Some(*kind);
        }
    }
    None
}

/// Roll the cell's extras table and apply the result. Returns the applied kind.
pub fn maybe_apply_extra(b: &mut CellBuilder) -> Option<MapExtraKind> {
    let config = b.config();
    if !config.extras_enabled {
        return None;
    }
    let dist = config.extras_for(b.cell().extras_group())?;
    if dist.chance <= 0 || !b.one_in(dist.chance) {
        return None;
    }
    let kind = pick_kind(&mut b.rng, dist)?;
    let extra = MapExtra::roll(kind, &mut b.rng);
    log::debug!("applying map extra {:?} to {}", kind, b.cell());
    extra.apply(b);
    Some(kind)
}

fn random_passable(b: &mut CellBuilder) -> Option<Point> {
    let candidates: Vec<Point> = b
        .grid
        .tiles()
        .iter()
        .filter(|(_, t)| t.terrain.is_passable())
        .map(|(p, _)| p)
        .collect();
    b.choose(&candidates)
}

fn lurking_monsters(b: &mut CellBuilder) {
    let count = b.rng(0, 3);
    for _ in 0..count {
        if let Some(monster) = b.choose(&EXTRA_MONSTERS) {
            let (x, y) = (b.rng(1, EDGE - 1), b.rng(1, EDGE - 1));
            b.add_spawn(monster, 1, x, y);
        }
    }
}

fn wreck_tile(b: &mut CellBuilder, p: Point) {
    if !b.grid.ter(p).is_natural_underground() {
        b.grid.set_ter(p, Terrain::Rubble);
    }
}

fn helicopter(b: &mut CellBuilder, center: Point, facing: i32) {
    for p in rect_points(Point::new(0, 0), Point::new(EDGE, EDGE)) {
        let (dx, dy) = ((p.x - center.x).abs(), (p.y - center.y).abs());
        let mound = b.dice(1, 5);
        if dx <= mound && dy <= mound && b.one_in(7) && b.grid.ter(p).is_diggable() {
            b.grid.set_ter(p, Terrain::DirtMound);
        }
        let debris = b.dice(1, 6);
        if dx <= debris && dy <= debris {
            if !b.one_in(5) {
                wreck_tile(b, p);
            } else if b.grid.ter(p).is_bashable() {
                postprocess::bash(&mut b.grid, p, 10);
            }
        } else if b.one_in(4 + dx + dy) {
            wreck_tile(b, p);
        }
    }

    let pos = Point::new(center.x.clamp(2, EDGE - 2), center.y.clamp(2, EDGE - 2));
    b.add_vehicle("military_helicopter_wreck", pos.x, pos.y, facing);

    let seats = [pos.offset(-1, 0), pos.offset(1, 0), pos.offset(0, 1), pos.offset(0, -1)];
    match b.dice(1, 8) {
        1..=3 => {
            b.add_spawn("mon_zombie_military_pilot", 1, pos.x, pos.y);
            for seat in seats {
                let monster = if b.one_in(5) {
                    "mon_zombie_bio_op"
                } else if b.one_in(5) {
                    "mon_zombie_scientist"
                } else {
                    "mon_zombie_soldier"
                };
                b.add_spawn(monster, 1, seat.x, seat.y);
            }
        }
        4 | 5 => {
            b.add_spawn("mon_zombie_military_pilot", 1, pos.x, pos.y);
            for seat in seats {
                if !b.one_in(3) {
                    b.add_spawn("mon_zombie_soldier", 1, seat.x, seat.y);
                }
            }
        }
        6 => b.add_spawn("mon_zombie_military_pilot", 1, pos.x, pos.y),
        _ => {}
    }
}

fn military(b: &mut CellBuilder, bodies: i32) {
    for _ in 0..bodies {
        let Some(p) = random_passable(b) else { break };
        if b.one_in(10) {
            b.add_spawn("mon_zombie_soldier", 1, p.x, p.y);
        } else if b.one_in(25) {
            let monster = if b.one_in(2) { "mon_zombie_bio_op" } else { "mon_zombie_grenadier" };
            b.add_spawn(monster, 1, p.x, p.y);
        } else {
            b.place_exact_items("military_corpse", 1, p.x, p.y);
        }
    }
    lurking_monsters(b);
    b.place_items("rare", 25, 0, 0, EDGE, EDGE, true);
}

fn science(b: &mut CellBuilder, bodies: i32) {
    for _ in 0..bodies {
        let Some(p) = random_passable(b) else { break };
        if b.one_in(10) {
            b.add_spawn("mon_zombie_scientist", 1, p.x, p.y);
        } else {
            b.place_exact_items("science_corpse", 1, p.x, p.y);
        }
    }
    lurking_monsters(b);
    b.place_items("rare", 45, 0, 0, EDGE, EDGE, true);
}

/// A buried cache ringed by traps.
fn stash(b: &mut CellBuilder, center: Point, traps: i32) {
    b.set(center.x, center.y, Terrain::Crate);
    let loot = b.rng(3, 6) as usize;
    b.place_exact_items("stash_loot", loot, center.x, center.y);
    const STASH_TRAPS: [Trap; 4] = [Trap::Beartrap, Trap::Tripwire, Trap::Crossbow, Trap::LandmineBuried];
    for _ in 0..traps {
        let p = Point::new(b.rng(center.x - 3, center.x + 3), b.rng(center.y - 3, center.y + 3));
        if p == center || !b.grid.in_bounds(p) || !b.grid.ter(p).is_passable() {
            continue;
        }
        if let Some(trap) = b.choose(&STASH_TRAPS) {
            b.grid.set_trap(p, trap);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn drug_deal(
    b: &mut CellBuilder,
    drug: Drug,
    mut amount: i32,
    north_south: bool,
    a_has_drugs: bool,
    bodies_a: i32,
    bodies_b: i32,
) {
    for group_a in [true, false] {
        let bodies = if group_a { bodies_a } else { bodies_b };
        for _ in 0..bodies {
            let mut spot = None;
            for _ in 0..10 {
                let (p, step) = match (north_south, group_a) {
                    (true, true) => (Point::new(b.rng(0, EDGE), b.rng(0, SEE - 4)), (0, -1)),
                    (true, false) => (Point::new(b.rng(0, EDGE), b.rng(SEE + 3, EDGE)), (0, 1)),
                    (false, true) => (Point::new(b.rng(0, SEE - 4), b.rng(0, EDGE)), (-1, 0)),
                    (false, false) => (Point::new(b.rng(SEE + 3, EDGE), b.rng(0, EDGE)), (1, 0)),
                };
                if b.grid.ter(p).is_passable() {
                    spot = Some((p, step));
                    break;
                }
            }
            let Some((p, (sx, sy))) = spot else { continue };

            let turned = if group_a { b.one_in(10) } else { b.one_in(20) };
            if turned {
                let monster = if group_a { "mon_zombie_spitter" } else { "mon_zombie_smoker" };
                b.add_spawn(monster, 1, p.x, p.y);
            } else {
                b.place_exact_items("drugdealer", 1, p.x, p.y);
                let splatter = b.rng(1, 3);
                for j in 0..=splatter {
                    b.add_field(p.x + j * sx, p.y + j * sy, FieldKind::Blood, 1);
                }
            }
            if group_a == a_has_drugs && amount > 0 && (group_a || !turned) {
                let placed = b.rng(2, 6).min(amount);
                amount -= placed;
                b.add_items(p.x, p.y, drug.item(), placed as usize);
            }
        }
    }
    lurking_monsters(b);
}

fn supply_drop(b: &mut CellBuilder, crates: i32) {
    for _ in 0..crates {
        let Some(p) = random_passable(b) else { break };
        b.set(p.x, p.y, Terrain::Crate);
        let group = match b.rng(1, 10) {
            1..=4 => "mil_food",
            5..=7 => "grenades",
            8 | 9 => "mil_armor",
            _ => "guns_rifle_milspec",
        };
        let mut created = 0;
        for _ in 0..10 {
            if created >= 2 {
                break;
            }
            created += b.place_items(group, 80, p.x, p.y, p.x, p.y, true);
        }
        if b.grid.items_at(p).is_empty() {
            b.set(p.x, p.y, Terrain::Rubble);
        }
    }
}

fn portal(b: &mut CellBuilder, center: Point, monsters: i32) {
    for p in rect_points(center.offset(-1, -1), center.offset(1, 1)) {
        wreck_tile(b, p);
    }
    b.set_trap(center.x, center.y, Trap::Portal);
    for _ in 0..monsters {
        if let Some(monster) = b.choose(&PORTAL_MONSTERS) {
            let p = Point::new(b.rng(1, EDGE - 1), b.rng(1, EDGE - 1));
            wreck_tile(b, p);
            b.add_spawn(monster, 1, p.x, p.y);
        }
    }
}

fn minefield(b: &mut CellBuilder, mines: i32) {
    for p in rect_points(Point::new(0, 0), Point::new(EDGE, EDGE)) {
        if b.one_in(3) {
            b.grid.set_ter(p, Terrain::Dirt);
        }
    }
    for _ in 0..mines {
        let (x, y) = (b.rng(1, EDGE - 1), b.rng(1, EDGE - 1));
        if !b.ter(x, y).is_diggable() || b.one_in(8) {
            b.set(x, y, Terrain::DirtMound);
        }
        b.set_trap(x, y, Trap::LandmineBuried);
    }
    for (x, y) in [(0, 0), (0, EDGE), (EDGE, 0), (EDGE, EDGE)] {
        b.set(x, y, Terrain::Sign);
    }
}

/// Wolves gathered around a fresh kill.
fn wolf_pack(b: &mut CellBuilder, center: Point, wolves: u32) {
    b.add_item(center.x, center.y, "corpse_deer");
    postprocess::blood_pool(&mut b.grid, &mut b.rng, center);
    for _ in 0..wolves {
        let p = Point::new(b.rng(center.x - 3, center.x + 3), b.rng(center.y - 3, center.y + 3));
        b.add_spawn("mon_wolf", 1, p.x, p.y);
    }
}

fn crater(b: &mut CellBuilder, center: Point, size: i32) {
    for p in rect_points(center.offset(-size, -size), center.offset(size, size)) {
        let (dx, dy) = (p.x - center.x, p.y - center.y);
        if dx * dx + dy * dy <= size * size {
            wreck_tile(b, p);
            let rad = b.rng(20, 40);
            b.grid.adjust_radiation(p, rad);
        }
    }
}

fn fumarole(b: &mut CellBuilder, from: Point, to: Point) {
    for p in line_to(from, to) {
        b.grid.set_ter(p, Terrain::Lava);
        if b.one_in(6) {
            b.add_item(p.x - 1, p.y - 1, "chunk_sulfur");
        }
    }
}

/// A rift bleeding fatigue: slime spreads from the tear and things come through.
fn portal_in(b: &mut CellBuilder, center: Point) {
    b.add_field(center.x, center.y, FieldKind::Fatigue, 3);
    for p in rect_points(center.offset(-5, -5), center.offset(5, 5)) {
        if b.rng(1, 9) >= trig_dist(center, p) {
            if b.grid.ter(p).is_passable() {
                b.grid.set_ter(p, Terrain::Slime);
            }
            if b.one_in(15) {
                if let Some(monster) = b.choose(&PORTAL_MONSTERS) {
                    b.add_spawn(monster, 1, p.x, p.y);
                }
            }
        }
    }
}

/// Offsets of the four sub-anomalies a fractal anomaly spawns.
pub const FRACTAL_OFFSETS: [(i32, i32); 4] = [(-4, -4), (4, -4), (-4, 4), (4, -4)];

/// Rubble crater around `center` plus the property's local effect. A fractal recurses
/// into four sub-anomalies until `depth` reaches the configured limit.
pub fn create_anomaly(b: &mut CellBuilder, center: Point, property: AnomalyProperty, depth: u32) {
    b.rough_circle(Terrain::Dirt, center.x, center.y, 11);
    b.rough_circle(Terrain::Rubble, center.x, center.y, 5);
    b.set(center.x, center.y, Terrain::Dirt);

    let area: Vec<Point> = rect_points(center.offset(-5, -5), center.offset(5, 5))
        .filter(|p| b.grid.in_bounds(*p))
        .collect();
    let rubble: Vec<Point> = area
        .iter()
        .copied()
        .filter(|p| b.grid.ter(*p) == Terrain::Rubble)
        .collect();

    use AnomalyProperty::*;
    match property {
        Wriggling | Moving => {
            for p in rubble {
                b.grid.add_field(p, FieldKind::PushItems, 1);
                if b.one_in(3) {
                    b.add_item(p.x, p.y, "rock");
                }
            }
        }
        Glowing | Glittering => traps_on(b, &rubble, Trap::Glow, 2),
        Humming | Rattling => traps_on(b, &rubble, Trap::Hum, 2),
        Whispering | Engraved => traps_on(b, &rubble, Trap::Shadow, 3),
        Breathing => {
            for p in rect_points(center.offset(-1, -1), center.offset(1, 1)) {
                let monster = if p == center { "mon_breather_hub" } else { "mon_breather" };
                b.add_spawn(monster, 1, p.x, p.y);
            }
        }
        Dead => traps_on(b, &rubble, Trap::Drain, 1),
        Itchy => {
            for p in area {
                let rad = b.rng(0, 10);
                b.grid.set_radiation(p, rad);
            }
        }
        Electric | Crackling => b.add_field(center.x, center.y, FieldKind::ShockVent, 3),
        Slimy => b.add_field(center.x, center.y, FieldKind::AcidVent, 3),
        Warm => {
            for p in rubble {
                b.grid.add_field(p, FieldKind::FireVent, 1 + rl_dist(center, p) % 3);
            }
        }
        Scaled => traps_on(b, &rubble, Trap::Snake, 1),
        Fractal => {
            let limit = b.config().anomaly_depth;
            if depth + 1 >= limit {
                log::warn!("fractal anomaly at {:?} hit depth limit {}; rubble only", center, limit);
                return;
            }
            for (dx, dy) in FRACTAL_OFFSETS {
                let sub = AnomalyProperty::random(&mut b.rng);
                create_anomaly(b, center.offset(dx, dy), sub, depth + 1);
            }
        }
    }
}

fn traps_on(b: &mut CellBuilder, tiles: &[Point], trap: Trap, one_in: i32) {
    for p in tiles {
        if b.one_in(one_in) {
            b.grid.set_trap(*p, trap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::with_builder;
    use crate::config::GenConfig;
    use crate::items::ItemCatalog;
    use crate::overmap::{CellContext, CellType, Neighbors};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grass(b: &mut CellBuilder) {
        b.fill(Terrain::Grass);
    }

    #[test]
    fn test_every_extra_applies_in_bounds() {
        for (i, kind) in MapExtraKind::ALL.iter().enumerate() {
            for seed in 0..8 {
                with_builder(CellType::Field, Neighbors::default(), seed * 31 + i as u64, |b| {
                    grass(b);
                    let extra = MapExtra::roll(*kind, &mut b.rng);
                    assert_eq!(extra.kind(), *kind);
                    extra.apply(b);
                    assert!(b.grid.unset_tiles().is_empty());
                    assert!(b.grid.spawns().iter().all(|s| b.grid.in_bounds(s.pos)));
                });
            }
        }
    }

    #[test]
    fn test_minefield_signs_and_mines() {
        with_builder(CellType::RoadNs, Neighbors::default(), 4, |b| {
            grass(b);
            MapExtra::Minefield { mines: 10 }.apply(b);
            for (x, y) in [(0, 0), (0, EDGE), (EDGE, 0), (EDGE, EDGE)] {
                assert_eq!(b.ter(x, y), Terrain::Sign);
            }
            let mines = b
                .grid
                .tiles()
                .iter()
                .filter(|(_, t)| t.trap == Trap::LandmineBuried)
                .count();
            assert!((1..=10).contains(&mines));
        });
    }

    #[test]
    fn test_crater_irradiates() {
        with_builder(CellType::Field, Neighbors::default(), 5, |b| {
            grass(b);
            let center = Point::new(12, 12);
            MapExtra::Crater { center, size: 3 }.apply(b);
            assert_eq!(b.ter(12, 12), Terrain::Rubble);
            assert!(b.grid.radiation(center) >= 20);
            assert_eq!(b.grid.radiation(Point::new(0, 0)), 0);
        });
    }

    #[test]
    fn test_fractal_anomaly_is_depth_bounded() {
        let catalog = ItemCatalog::defaults().unwrap();
        for limit in [1, 2, 3] {
            let config = GenConfig {
                anomaly_depth: limit,
                ..GenConfig::default()
            };
            let ctx = CellContext::new(CellType::Field, Neighbors::default(), CellType::Null, 0);
            let mut b = CellBuilder::new(ctx, ChaCha8Rng::seed_from_u64(9), &catalog, &config);
            b.fill(Terrain::Grass);
            create_anomaly(&mut b, Point::new(12, 12), AnomalyProperty::Fractal, 0);
            assert!(b.grid.count_terrain(Terrain::Rubble) > 0);
        }
    }

    #[test]
    fn test_breathing_anomaly_spawns_hub() {
        with_builder(CellType::Field, Neighbors::default(), 6, |b| {
            grass(b);
            create_anomaly(b, Point::new(10, 10), AnomalyProperty::Breathing, 0);
            let spawns = b.grid.spawns();
            assert_eq!(spawns.len(), 9);
            assert_eq!(
                spawns.iter().filter(|s| s.monster == "mon_breather_hub").count(),
                1
            );
        });
    }

    #[test]
    fn test_pick_kind_respects_weights() {
        let mut dist = ExtrasDistribution {
            chance: 1,
            weights: Default::default(),
        };
        let mut r = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick_kind(&mut r, &dist), None);
        dist.weights.insert(MapExtraKind::Crater, 5);
        for _ in 0..20 {
            assert_eq!(pick_kind(&mut r, &dist), Some(MapExtraKind::Crater));
        }
    }

    #[test]
    fn test_disabled_extras_never_apply() {
        with_builder(CellType::Field, Neighbors::default(), 7, |b| {
            grass(b);
            for _ in 0..200 {
                assert_eq!(maybe_apply_extra(b), None);
            }
        });
    }
}
