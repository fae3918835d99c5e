//! Cell type identities and the neighborhood a cell is generated in.

use std::fmt;

use crate::geometry::Direction;
use crate::grid::Turn;

macro_rules! cell_types {
    ($($variant:ident => $id:literal),* $(,)?) => {
        /// World-map cell type. Ids are the stable strings used on the command line and in
        /// requests.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CellType {
            $($variant),*
        }

        impl CellType {
            pub const ALL: &'static [CellType] = &[$(CellType::$variant),*];

            pub fn id(&self) -> &'static str {
                match self {
                    $(CellType::$variant => $id),*
                }
            }

            pub fn parse(id: &str) -> Option<CellType> {
                match id {
                    $($id => Some(CellType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

cell_types! {
    Null => "null",

    // Nature
    Field => "field",
    Dirtlot => "dirtlot",
    Forest => "forest",
    ForestThick => "forest_thick",
    ForestWater => "forest_water",
    Hive => "hive",
    HiveCenter => "hive_center",
    SpiderPit => "spider_pit",
    FungalBloom => "fungal_bloom",
    Crater => "crater",

    // Roads
    RoadNs => "road_ns",
    RoadEw => "road_ew",
    RoadNe => "road_ne",
    RoadEs => "road_es",
    RoadSw => "road_sw",
    RoadWn => "road_wn",
    RoadNes => "road_nes",
    RoadNew => "road_new",
    RoadNsw => "road_nsw",
    RoadEsw => "road_esw",
    RoadNesw => "road_nesw",
    RoadNeswManhole => "road_nesw_manhole",
    BridgeNs => "bridge_ns",
    BridgeEw => "bridge_ew",
    HiwayNs => "hiway_ns",
    HiwayEw => "hiway_ew",

    // Rivers
    RiverCenter => "river_center",
    RiverCNotNe => "river_c_not_ne",
    RiverCNotSe => "river_c_not_se",
    RiverCNotSw => "river_c_not_sw",
    RiverCNotNw => "river_c_not_nw",
    RiverNorth => "river_north",
    RiverEast => "river_east",
    RiverSouth => "river_south",
    RiverWest => "river_west",
    RiverNe => "river_ne",
    RiverSe => "river_se",
    RiverSw => "river_sw",
    RiverNw => "river_nw",

    // Town
    HouseNorth => "house_north",
    HouseEast => "house_east",
    HouseSouth => "house_south",
    HouseWest => "house_west",
    HouseBaseNorth => "house_base_north",
    HouseBaseEast => "house_base_east",
    HouseBaseSouth => "house_base_south",
    HouseBaseWest => "house_base_west",
    ParkingLot => "s_lot",
    GasNorth => "s_gas_north",
    GasEast => "s_gas_east",
    GasSouth => "s_gas_south",
    GasWest => "s_gas_west",
    PharmNorth => "s_pharm_north",
    PharmEast => "s_pharm_east",
    PharmSouth => "s_pharm_south",
    PharmWest => "s_pharm_west",
    GroceryNorth => "s_grocery_north",
    GroceryEast => "s_grocery_east",
    GrocerySouth => "s_grocery_south",
    GroceryWest => "s_grocery_west",
    HardwareNorth => "s_hardware_north",
    HardwareEast => "s_hardware_east",
    HardwareSouth => "s_hardware_south",
    HardwareWest => "s_hardware_west",
    SportsNorth => "s_sports_north",
    SportsEast => "s_sports_east",
    SportsSouth => "s_sports_south",
    SportsWest => "s_sports_west",
    LiquorNorth => "s_liquor_north",
    LiquorEast => "s_liquor_east",
    LiquorSouth => "s_liquor_south",
    LiquorWest => "s_liquor_west",
    GunNorth => "s_gun_north",
    GunEast => "s_gun_east",
    GunSouth => "s_gun_south",
    GunWest => "s_gun_west",
    ClothesNorth => "s_clothes_north",
    ClothesEast => "s_clothes_east",
    ClothesSouth => "s_clothes_south",
    ClothesWest => "s_clothes_west",
    LibraryNorth => "s_library_north",
    LibraryEast => "s_library_east",
    LibrarySouth => "s_library_south",
    LibraryWest => "s_library_west",
    PoliceNorth => "police_north",
    PoliceEast => "police_east",
    PoliceSouth => "police_south",
    PoliceWest => "police_west",
    BankNorth => "bank_north",
    BankEast => "bank_east",
    BankSouth => "bank_south",
    BankWest => "bank_west",
    OfficeDoctorNorth => "office_doctor_north",
    OfficeDoctorEast => "office_doctor_east",
    OfficeDoctorSouth => "office_doctor_south",
    OfficeDoctorWest => "office_doctor_west",
    SubStationNorth => "sub_station_north",
    SubStationEast => "sub_station_east",
    SubStationSouth => "sub_station_south",
    SubStationWest => "sub_station_west",
    RadioTower => "radio_tower",
    MansionEntrance => "mansion_entrance",
    Mansion => "mansion",

    // Settlement
    SetCenter => "set_center",
    SetHouse => "set_house",
    SetFood => "set_food",
    SetWeapons => "set_weapons",
    SetGuns => "set_guns",
    SetClinic => "set_clinic",
    SetClothing => "set_clothing",
    SetGeneral => "set_general",
    SetCasino => "set_casino",
    SetLibrary => "set_library",
    SetLab => "set_lab",
    SetBionics => "set_bionics",

    // Facilities
    Lab => "lab",
    LabStairs => "lab_stairs",
    LabCore => "lab_core",
    LabFinale => "lab_finale",
    Silo => "silo",
    SiloFinale => "silo_finale",
    Bunker => "bunker",
    MineEntrance => "mine_entrance",
    MineShaft => "mine_shaft",
    Basement => "basement",

    // Underground and hazards
    Rock => "rock",
    Cavern => "cavern",
    Rift => "rift",
    Hellmouth => "hellmouth",
    Slimepit => "slimepit",
    SlimepitDown => "slimepit_down",
    Anthill => "anthill",
    Wall => "wall",
    Gate => "gate",
    Tutorial => "tutorial",

    // Underground networks
    SubwayStation => "subway_station",
    SubwayNs => "subway_ns",
    SubwayEw => "subway_ew",
    SubwayNe => "subway_ne",
    SubwayEs => "subway_es",
    SubwaySw => "subway_sw",
    SubwayWn => "subway_wn",
    SubwayNes => "subway_nes",
    SubwayNew => "subway_new",
    SubwayNsw => "subway_nsw",
    SubwayEsw => "subway_esw",
    SubwayNesw => "subway_nesw",
    SewerNs => "sewer_ns",
    SewerEw => "sewer_ew",
    SewerNe => "sewer_ne",
    SewerEs => "sewer_es",
    SewerSw => "sewer_sw",
    SewerWn => "sewer_wn",
    SewerNes => "sewer_nes",
    SewerNew => "sewer_new",
    SewerNsw => "sewer_nsw",
    SewerEsw => "sewer_esw",
    SewerNesw => "sewer_nesw",
    AntsNs => "ants_ns",
    AntsEw => "ants_ew",
    AntsNe => "ants_ne",
    AntsEs => "ants_es",
    AntsSw => "ants_sw",
    AntsWn => "ants_wn",
    AntsNes => "ants_nes",
    AntsNew => "ants_new",
    AntsNsw => "ants_nsw",
    AntsEsw => "ants_esw",
    AntsNesw => "ants_nesw",
    AntsFood => "ants_food",
    AntsLarvae => "ants_larvae",
    AntsQueen => "ants_queen",

    // Puzzles
    Temple => "temple",
    TempleStairs => "temple_stairs",
    TempleFinale => "temple_finale",
    Mine => "mine",
    MineDown => "mine_down",
    MineFinale => "mine_finale",
    SpiralHub => "spiral_hub",
    Spiral => "spiral",
}

/// Tunnel and road families whose shapes are named by their open sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    Road,
    Subway,
    Sewer,
    Ants,
}

/// Which embellishment table a cell type rolls map extras from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrasGroup {
    Field,
    Forest,
    Road,
    Build,
    Underground,
    None,
}

impl CellType {
    /// The network family and open sides (indexed by `Direction::index`) of a network
    /// shape such as `sewer_nes`; `None` for every other type.
    pub fn network(&self) -> Option<(Network, [bool; 4])> {
        let id = self.id();
        let (family, rest) = if let Some(rest) = id.strip_prefix("road_") {
            (Network::Road, rest)
        } else if let Some(rest) = id.strip_prefix("subway_") {
            (Network::Subway, rest)
        } else if let Some(rest) = id.strip_prefix("sewer_") {
            (Network::Sewer, rest)
        } else if let Some(rest) = id.strip_prefix("ants_") {
            (Network::Ants, rest)
        } else {
            return None;
        };
        let suffix = rest.strip_suffix("_manhole").unwrap_or(rest);
        if suffix.is_empty() || !suffix.chars().all(|c| "nesw".contains(c)) {
            return None;
        }
        let mut open = [false; 4];
        for d in Direction::ALL {
            open[d.index()] = suffix.contains(d.letter());
        }
        Some((family, open))
    }

    pub fn is_network(&self, family: Network) -> bool {
        matches!(self.network(), Some((f, _)) if f == family)
    }

    pub fn is_road(&self) -> bool {
        self.is_network(Network::Road)
            || matches!(
                self,
                CellType::BridgeNs | CellType::BridgeEw | CellType::HiwayNs | CellType::HiwayEw
            )
    }

    pub fn is_sewer(&self) -> bool {
        self.is_network(Network::Sewer)
    }

    pub fn is_subway(&self) -> bool {
        self.is_network(Network::Subway) || *self == CellType::SubwayStation
    }

    pub fn is_ants(&self) -> bool {
        self.is_network(Network::Ants)
            || matches!(self, CellType::AntsFood | CellType::AntsLarvae | CellType::AntsQueen)
    }

    pub fn is_river(&self) -> bool {
        self.id().starts_with("river_")
    }

    pub fn is_water(&self) -> bool {
        self.is_river() || *self == CellType::ForestWater
    }

    pub fn is_forest(&self) -> bool {
        matches!(self, CellType::Forest | CellType::ForestThick | CellType::ForestWater)
    }

    pub fn is_lab(&self) -> bool {
        matches!(
            self,
            CellType::Lab | CellType::LabStairs | CellType::LabCore | CellType::LabFinale
        )
    }

    pub fn is_mine(&self) -> bool {
        matches!(self, CellType::Mine | CellType::MineDown | CellType::MineFinale)
    }

    pub fn is_temple(&self) -> bool {
        matches!(self, CellType::Temple | CellType::TempleStairs | CellType::TempleFinale)
    }

    pub fn is_spiral(&self) -> bool {
        matches!(self, CellType::Spiral | CellType::SpiralHub)
    }

    pub fn is_mansion(&self) -> bool {
        matches!(self, CellType::Mansion | CellType::MansionEntrance)
    }

    pub fn is_hive(&self) -> bool {
        matches!(self, CellType::Hive | CellType::HiveCenter)
    }

    /// Street-facing town buildings, from houses through sub stations. Roads next to one
    /// get sidewalks.
    pub fn is_town_building(&self) -> bool {
        (CellType::HouseNorth..=CellType::SubStationWest).contains(self)
    }

    /// Facing encoded in an orientation-variant id (`house_east` faces east).
    pub fn facing(&self) -> Option<Direction> {
        let id = self.id();
        Direction::ALL
            .into_iter()
            .find(|d| id.ends_with(&format!("_{}", d.name())))
    }

    pub fn extras_group(&self) -> ExtrasGroup {
        use CellType::*;
        if self.is_road() {
            return ExtrasGroup::Road;
        }
        if self.is_forest() || self.is_hive() || *self == SpiderPit || *self == FungalBloom {
            return ExtrasGroup::Forest;
        }
        if self.is_subway()
            || self.is_sewer()
            || self.is_ants()
            || self.is_lab()
            || self.is_mine()
            || self.is_temple()
            || self.is_spiral()
            || matches!(self, Rock | Cavern | Rift | Hellmouth | Slimepit | SlimepitDown | MineShaft)
        {
            return ExtrasGroup::Underground;
        }
        match self {
            Field | Dirtlot | Crater => ExtrasGroup::Field,
            Null | Tutorial | Wall | Gate | Silo | SiloFinale | Bunker => ExtrasGroup::None,
            t if t.is_river() => ExtrasGroup::None,
            _ => ExtrasGroup::Build,
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Types of the four cardinal neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    pub north: CellType,
    pub east: CellType,
    pub south: CellType,
    pub west: CellType,
}

impl Neighbors {
    pub fn new(north: CellType, east: CellType, south: CellType, west: CellType) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    pub fn uniform(t: CellType) -> Self {
        Self::new(t, t, t, t)
    }

    pub fn get(&self, dir: Direction) -> CellType {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn all(&self) -> [CellType; 4] {
        [self.north, self.east, self.south, self.west]
    }

    /// Neighbors as seen from a layout that will be rotated `turns` clockwise afterwards:
    /// what ends up on the north side after rotation starts out on the side `turns` steps
    /// counter-clockwise.
    pub fn unrotated(&self, turns: u8) -> Self {
        let pick = |d: Direction| self.get(d.rotated(turns));
        Self::new(
            pick(Direction::North),
            pick(Direction::East),
            pick(Direction::South),
            pick(Direction::West),
        )
    }
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::uniform(CellType::Null)
    }
}

/// Everything a generator may look at besides the random stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellContext {
    pub cell: CellType,
    pub neighbors: Neighbors,
    pub above: CellType,
    pub turn: Turn,
    /// Depth of the cell; 0 is ground level, negative is underground.
    pub z: i32,
}

impl CellContext {
    pub fn new(cell: CellType, neighbors: Neighbors, above: CellType, turn: Turn) -> Self {
        Self {
            cell,
            neighbors,
            above,
            turn,
            z: 0,
        }
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn neighbor(&self, dir: Direction) -> CellType {
        self.neighbors.get(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in CellType::ALL {
            assert!(seen.insert(t.id()), "duplicate id {}", t.id());
            assert_eq!(CellType::parse(t.id()), Some(*t));
        }
        assert!(CellType::ALL.len() > 150);
        assert_eq!(CellType::parse("no_such_cell"), None);
    }

    #[test]
    fn test_network_suffix_parsing() {
        assert_eq!(
            CellType::SewerNes.network(),
            Some((Network::Sewer, [true, true, true, false]))
        );
        assert_eq!(
            CellType::RoadNeswManhole.network(),
            Some((Network::Road, [true; 4]))
        );
        assert_eq!(CellType::AntsQueen.network(), None);
        assert_eq!(CellType::SubwayStation.network(), None);
        assert!(CellType::SubwayStation.is_subway());
    }

    #[test]
    fn test_facing_from_suffix() {
        assert_eq!(CellType::HouseEast.facing(), Some(Direction::East));
        assert_eq!(CellType::HouseBaseWest.facing(), Some(Direction::West));
        assert_eq!(CellType::Forest.facing(), None);
    }

    #[test]
    fn test_unrotated_neighbors() {
        let n = Neighbors::new(CellType::RoadNs, CellType::Field, CellType::Forest, CellType::Rock);
        // A layout authored facing north and turned once ends up facing east, so its
        // authored east side is the final south side.
        let u = n.unrotated(1);
        assert_eq!(u.north, CellType::Field);
        assert_eq!(u.east, CellType::Forest);
        assert_eq!(u.west, CellType::RoadNs);
    }

    #[test]
    fn test_extras_groups() {
        assert_eq!(CellType::RoadNs.extras_group(), ExtrasGroup::Road);
        assert_eq!(CellType::ForestThick.extras_group(), ExtrasGroup::Forest);
        assert_eq!(CellType::HouseNorth.extras_group(), ExtrasGroup::Build);
        assert_eq!(CellType::SewerNs.extras_group(), ExtrasGroup::Underground);
        assert_eq!(CellType::RiverNorth.extras_group(), ExtrasGroup::None);
    }
}
