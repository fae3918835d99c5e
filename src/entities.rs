//! Entities a cell carries besides its tiles: terminals, spawn records and vehicles.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// What selecting a terminal option does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputerAction {
    Open,
    OpenDisarm,
    Unlock,
    Research,
    Maps,
    Sample,
    ReleaseSpecimens,
    Terminate,
    Portal,
    Cascade,
    ListBionics,
    ReleaseBionics,
    MissileLaunch,
    MissileDisarm,
    AmigaraLog,
    AmigaraStart,
    ElevatorOn,
    Records,
    EmergencyMessage,
}

/// What happens when a hack of the terminal fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputerFailure {
    Shutdown,
    Alarm,
    Manhacks,
    Secubots,
    Damage,
    PumpExplode,
    PumpLeak,
    Amigara,
    DestroyData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerOption {
    pub label: String,
    pub action: ComputerAction,
    pub difficulty: u8,
}

/// An interactive terminal. A submap holds at most one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computer {
    pub name: String,
    pub security: u8,
    pub pos: Point,
    pub options: Vec<ComputerOption>,
    pub failures: Vec<ComputerFailure>,
}

impl Computer {
    pub fn new(name: impl Into<String>, security: u8, pos: Point) -> Self {
        Self {
            name: name.into(),
            security,
            pos,
            options: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn add_option(&mut self, label: impl Into<String>, action: ComputerAction, difficulty: u8) -> &mut Self {
        self.options.push(ComputerOption {
            label: label.into(),
            action,
            difficulty,
        });
        self
    }

    pub fn add_failure(&mut self, failure: ComputerFailure) -> &mut Self {
        self.failures.push(failure);
        self
    }
}

/// A request to place monsters when the cell is first loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRecord {
    pub monster: String,
    pub count: u32,
    pub pos: Point,
    pub faction: Option<String>,
    pub mission: Option<u32>,
    pub friendly: bool,
    pub name: Option<String>,
}

impl SpawnRecord {
    pub fn new(monster: impl Into<String>, count: u32, pos: Point) -> Self {
        Self {
            monster: monster.into(),
            count,
            pos,
            faction: None,
            mission: None,
            friendly: false,
            name: None,
        }
    }

    pub fn friendly(mut self) -> Self {
        self.friendly = true;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn in_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = Some(faction.into());
        self
    }
}

/// A vehicle dropped into the cell, facing `facing` degrees clockwise from east.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePlacement {
    pub vehicle: String,
    pub pos: Point,
    pub facing: i32,
}

impl VehiclePlacement {
    pub fn new(vehicle: impl Into<String>, pos: Point, facing: i32) -> Self {
        Self {
            vehicle: vehicle.into(),
            pos,
            facing: facing.rem_euclid(360),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_builder_chains() {
        let mut c = Computer::new("Log Console", 3, Point::new(1, 1));
        c.add_option("View Research Logs", ComputerAction::Research, 0)
            .add_option("Download Map Data", ComputerAction::Maps, 0)
            .add_failure(ComputerFailure::Alarm);
        assert_eq!(c.options.len(), 2);
        assert_eq!(c.failures, vec![ComputerFailure::Alarm]);
    }

    #[test]
    fn test_vehicle_facing_normalized() {
        assert_eq!(VehiclePlacement::new("car", Point::new(0, 0), 450).facing, 90);
        assert_eq!(VehiclePlacement::new("car", Point::new(0, 0), -90).facing, 270);
    }
}
