//! Terrain, trap and field identities for cell tiles.
//!
//! Furniture is expressed as terrain (a counter or a bed occupies the tile), which keeps
//! each tile to exactly one terrain id.

use serde::{Deserialize, Serialize};

/// What a tile is made of (~120 types)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Sentinel for "not generated yet". Never survives a finished generation.
    #[default]
    Null,

    // Ground
    Dirt,
    DirtMound,
    Grass,
    Floor,
    FloorWax,
    MetalFloor,
    RockFloor,
    Pavement,
    PavementYellow,
    Sidewalk,
    Rubble,
    Ash,
    Pit,
    Hole,
    Slime,
    FloorRed,
    FloorGreen,
    FloorBlue,

    // Vegetation
    Tree,
    TreeYoung,
    Underbrush,
    Shrub,
    Fungus,
    FungusMound,
    ShrubFungal,
    TreeFungal,
    TreeFungalYoung,
    Marloss,

    // Walls and barriers
    WallV,
    WallH,
    ConcreteWallV,
    ConcreteWallH,
    MetalWallV,
    MetalWallH,
    GlassWallV,
    GlassWallH,
    ReinforcedGlassV,
    ReinforcedGlassH,
    Rock,
    RockRed,
    RockGreen,
    RockBlue,
    Wax,
    Bars,
    FenceV,
    FenceH,
    RailingV,
    RailingH,
    Window,
    Portcullis,
    Fault,

    // Doors and access
    DoorClosed,
    DoorLocked,
    DoorMetalClosed,
    DoorMetalLocked,
    DoorGlassClosed,
    CardReaderScience,
    CardReaderMilitary,

    // Vertical transitions
    StairsUp,
    StairsDown,
    SlopeUp,
    SlopeDown,
    LadderUp,
    LadderDown,
    ManholeCover,
    Manhole,
    Grate,

    // Liquids
    WaterShallow,
    WaterDeep,
    Sewage,
    Lava,

    // Furniture
    Counter,
    Table,
    Chair,
    Bench,
    Bed,
    Dresser,
    Fridge,
    GlassFridge,
    Rack,
    Bookcase,
    Locker,
    Crate,
    Toilet,
    Bathtub,
    Sink,
    Stove,
    Desk,
    Dumpster,
    GasPump,
    Fountain,
    SlotMachine,
    Bulletin,
    Vat,
    Centrifuge,
    PoolTable,
    SuitOfArmor,
    Piano,
    Fireplace,
    Altar,
    PedestalWyrm,
    PedestalTemple,
    Sign,

    // Machinery
    Console,
    ConsoleBroken,
    Elevator,
    Missile,
    RadioTower,
    RadioControls,
    SwitchRg,
    SwitchGb,
    SwitchRb,
    SwitchEven,
}

impl Terrain {
    /// Movement cost; 0 means impassable.
    pub fn move_cost(&self) -> u8 {
        use Terrain::*;
        match self {
            Null => 0,
            Dirt | Grass | Floor | FloorWax | MetalFloor | RockFloor | Pavement | PavementYellow
            | Sidewalk | FloorRed | FloorGreen | FloorBlue | StairsUp | StairsDown | SlopeUp
            | SlopeDown | LadderUp | LadderDown | ManholeCover | Manhole | Grate | Hole
            | CardReaderScience | CardReaderMilitary => 2,
            DirtMound | Ash | TreeYoung | Slime | Sign | Chair | Bench | Fungus => 3,
            Rubble | Underbrush | Shrub | WaterShallow | Counter | Table | Bed | Desk | Altar
            | Fireplace | FungusMound | ShrubFungal | TreeFungalYoung | Marloss => 4,
            Pit | Sewage => 10,
            WaterDeep => 8,
            Tree | TreeFungal | WallV | WallH | ConcreteWallV | ConcreteWallH | MetalWallV | MetalWallH
            | GlassWallV | GlassWallH | ReinforcedGlassV | ReinforcedGlassH | Rock | RockRed
            | RockGreen | RockBlue | Wax | Bars | FenceV | FenceH | RailingV | RailingH | Window
            | Portcullis | Fault | DoorClosed | DoorLocked | DoorMetalClosed | DoorMetalLocked
            | DoorGlassClosed | Lava => 0,
            Dresser | Fridge | GlassFridge | Rack | Bookcase | Locker | Crate | Toilet | Bathtub
            | Sink | Stove | Dumpster | GasPump | Fountain | SlotMachine | Bulletin | Vat
            | Centrifuge | PoolTable | SuitOfArmor | Piano | PedestalWyrm | PedestalTemple
            | Console | ConsoleBroken | Elevator | Missile | RadioTower | RadioControls
            | SwitchRg | SwitchGb | SwitchRb | SwitchEven => 0,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.move_cost() != 0
    }

    /// Tiles that hold items even though they cannot be walked through.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Terrain::Dresser
                | Terrain::Fridge
                | Terrain::GlassFridge
                | Terrain::Rack
                | Terrain::Bookcase
                | Terrain::Locker
                | Terrain::Crate
                | Terrain::Dumpster
                | Terrain::Vat
                | Terrain::Centrifuge
                | Terrain::Toilet
                | Terrain::Bathtub
                | Terrain::Sink
                | Terrain::Stove
                | Terrain::Missile
        )
    }

    /// Dirt and grass: where `allow_grass = false` placement refuses to drop items.
    pub fn is_bare_ground(&self) -> bool {
        matches!(self, Terrain::Dirt | Terrain::Grass)
    }

    pub fn is_furniture(&self) -> bool {
        use Terrain::*;
        matches!(
            self,
            Counter
                | Table
                | Chair
                | Bench
                | Bed
                | Dresser
                | Fridge
                | GlassFridge
                | Rack
                | Bookcase
                | Locker
                | Crate
                | Toilet
                | Bathtub
                | Sink
                | Stove
                | Desk
                | Dumpster
                | GasPump
                | Fountain
                | SlotMachine
                | Bulletin
                | Vat
                | Centrifuge
                | PoolTable
                | SuitOfArmor
                | Piano
                | Fireplace
                | Altar
                | PedestalWyrm
                | PedestalTemple
                | Sign
                | Console
                | ConsoleBroken
                | RadioControls
        )
    }

    pub fn is_wall(&self) -> bool {
        use Terrain::*;
        matches!(
            self,
            WallV
                | WallH
                | ConcreteWallV
                | ConcreteWallH
                | MetalWallV
                | MetalWallH
                | GlassWallV
                | GlassWallH
                | ReinforcedGlassV
                | ReinforcedGlassH
                | Wax
                | Rock
        )
    }

    pub fn is_door(&self) -> bool {
        matches!(
            self,
            Terrain::DoorClosed
                | Terrain::DoorLocked
                | Terrain::DoorMetalClosed
                | Terrain::DoorMetalLocked
                | Terrain::DoorGlassClosed
        )
    }

    /// Counterpart used when a rotation swaps the horizontal and vertical axes.
    pub fn orientation_pair(&self) -> Option<Terrain> {
        use Terrain::*;
        let pair = match self {
            WallV => WallH,
            WallH => WallV,
            ConcreteWallV => ConcreteWallH,
            ConcreteWallH => ConcreteWallV,
            MetalWallV => MetalWallH,
            MetalWallH => MetalWallV,
            GlassWallV => GlassWallH,
            GlassWallH => GlassWallV,
            ReinforcedGlassV => ReinforcedGlassH,
            ReinforcedGlassH => ReinforcedGlassV,
            FenceV => FenceH,
            FenceH => FenceV,
            RailingV => RailingH,
            RailingH => RailingV,
            _ => return None,
        };
        Some(pair)
    }

    pub fn is_diggable(&self) -> bool {
        matches!(
            self,
            Terrain::Dirt | Terrain::Grass | Terrain::DirtMound | Terrain::Ash | Terrain::Underbrush
        )
    }

    pub fn is_flammable(&self) -> bool {
        use Terrain::*;
        matches!(
            self,
            Floor
                | Grass
                | Tree
                | TreeYoung
                | Underbrush
                | Shrub
                | Fungus
                | ShrubFungal
                | TreeFungal
                | TreeFungalYoung
                | WallV
                | WallH
                | FenceV
                | FenceH
                | DoorClosed
                | DoorLocked
                | Counter
                | Table
                | Chair
                | Bench
                | Bed
                | Dresser
                | Bookcase
                | Crate
                | Desk
                | Bulletin
                | PoolTable
                | Piano
                | Wax
                | FloorWax
        )
    }

    /// Rock left in place by nature; post-processing leaves it alone.
    pub fn is_natural_underground(&self) -> bool {
        matches!(self, Terrain::Rock | Terrain::RockFloor)
    }

    /// Whether bashing can knock this tile down to rubble.
    pub fn is_bashable(&self) -> bool {
        (self.is_wall() && *self != Terrain::Rock)
            || self.is_door()
            || self.is_furniture()
            || matches!(self, Terrain::Window | Terrain::FenceV | Terrain::FenceH | Terrain::Bars)
    }

    /// Get ASCII character for display
    pub fn glyph(&self) -> char {
        use Terrain::*;
        match self {
            Null => ' ',
            Dirt | Floor | MetalFloor | RockFloor | Pavement | Sidewalk => '.',
            FloorWax => ',',
            Grass => '"',
            DirtMound => '^',
            PavementYellow => ':',
            Rubble => '^',
            Ash => '.',
            Pit | Hole => 'O',
            Slime => '~',
            FloorRed | FloorGreen | FloorBlue => '.',
            Tree => '7',
            TreeYoung => '1',
            Underbrush | Shrub | ShrubFungal | Marloss => '#',
            Fungus => '.',
            FungusMound => '#',
            TreeFungal => '7',
            TreeFungalYoung => '1',
            WallV | ConcreteWallV | MetalWallV | GlassWallV | ReinforcedGlassV => '|',
            WallH | ConcreteWallH | MetalWallH | GlassWallH | ReinforcedGlassH => '-',
            Rock | RockRed | RockGreen | RockBlue => '#',
            Wax => '#',
            Bars => '"',
            FenceV | FenceH | RailingV | RailingH => '=',
            Window => '"',
            Portcullis => '&',
            Fault => '*',
            DoorClosed | DoorMetalClosed | DoorGlassClosed => '+',
            DoorLocked | DoorMetalLocked => '+',
            CardReaderScience | CardReaderMilitary => '6',
            StairsUp | SlopeUp | LadderUp => '<',
            StairsDown | SlopeDown | LadderDown => '>',
            ManholeCover | Manhole => '0',
            Grate => '#',
            WaterShallow => '~',
            WaterDeep => '~',
            Sewage => '~',
            Lava => '~',
            Counter | Table | Desk => '#',
            Chair | Bench => 'h',
            Bed => '#',
            Dresser | Rack | Locker | Crate => '{',
            Fridge | GlassFridge => '{',
            Bookcase => '{',
            Toilet | Bathtub | Sink => '&',
            Stove => '#',
            Dumpster => '{',
            GasPump => '&',
            Fountain => '{',
            SlotMachine => '%',
            Bulletin => '6',
            Vat => '0',
            Centrifuge => '{',
            PoolTable => '#',
            SuitOfArmor => '@',
            Piano => 'P',
            Fireplace => '#',
            Altar => 'A',
            PedestalWyrm | PedestalTemple => '|',
            Sign => 'S',
            Console | ConsoleBroken | RadioControls => '6',
            Elevator => 'E',
            Missile => '#',
            RadioTower => '#',
            SwitchRg | SwitchGb | SwitchRb | SwitchEven => '6',
        }
    }
}

/// Hidden or visible hazards attached to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trap {
    #[default]
    None,
    Sinkhole,
    Ledge,
    Telepad,
    Goo,
    Dissector,
    Glow,
    Hum,
    Shadow,
    Drain,
    Snake,
    LandmineBuried,
    Portal,
    TempleFlood,
    TempleToggle,
    Beartrap,
    Tripwire,
    Crossbow,
    NukeGas,
}

impl Trap {
    pub fn is_none(&self) -> bool {
        *self == Trap::None
    }
}

/// Ambient effects that occupy a tile alongside its terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Blood,
    Fire,
    FireVent,
    GasVent,
    NukeGas,
    Web,
    Slime,
    Acid,
    AcidVent,
    ShockVent,
    PushItems,
    Fatigue,
    Smoke,
}

/// A field instance: kind, intensity (1-3) and age in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub kind: FieldKind,
    pub intensity: u8,
    pub age: i64,
}

impl Field {
    pub fn new(kind: FieldKind, intensity: i32) -> Self {
        Self {
            kind,
            intensity: intensity.clamp(1, 3) as u8,
            age: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_pairs_are_involutions() {
        for t in [
            Terrain::WallV,
            Terrain::MetalWallH,
            Terrain::RailingV,
            Terrain::FenceH,
            Terrain::GlassWallV,
            Terrain::ReinforcedGlassH,
            Terrain::ConcreteWallV,
        ] {
            let pair = t.orientation_pair().unwrap();
            assert_ne!(pair, t);
            assert_eq!(pair.orientation_pair(), Some(t));
        }
        assert_eq!(Terrain::Floor.orientation_pair(), None);
    }

    #[test]
    fn test_containers_accept_items_while_impassable() {
        assert!(!Terrain::Fridge.is_passable());
        assert!(Terrain::Fridge.is_container());
        assert!(Terrain::Counter.is_passable());
        assert!(!Terrain::WallV.is_container());
    }

    #[test]
    fn test_field_intensity_clamped() {
        assert_eq!(Field::new(FieldKind::Fire, 9).intensity, 3);
        assert_eq!(Field::new(FieldKind::Blood, 0).intensity, 1);
    }
}
