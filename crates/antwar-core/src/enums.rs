//! Enumeration types used throughout the simulation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;

/// Faction / ownership tag. Numeric ids match the scenario format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum House {
    Spain,
    #[default]
    Greece,
    USSR,
    England,
    Ukraine,
    Germany,
    France,
    Turkey,
    GoodGuy,
    BadGuy,
    Neutral,
    Special,
    Multi1,
    Multi2,
    Multi3,
    Multi4,
    Multi5,
    Multi6,
    Multi7,
    Multi8,
}

impl House {
    const ALL: [House; 20] = [
        House::Spain,
        House::Greece,
        House::USSR,
        House::England,
        House::Ukraine,
        House::Germany,
        House::France,
        House::Turkey,
        House::GoodGuy,
        House::BadGuy,
        House::Neutral,
        House::Special,
        House::Multi1,
        House::Multi2,
        House::Multi3,
        House::Multi4,
        House::Multi5,
        House::Multi6,
        House::Multi7,
        House::Multi8,
    ];

    /// House from its numeric scenario id.
    pub fn from_id(id: i64) -> Option<House> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// House from its scenario name (case-insensitive).
    pub fn from_name(name: &str) -> Option<House> {
        Self::ALL
            .iter()
            .copied()
            .find(|h| h.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            House::Spain => "Spain",
            House::Greece => "Greece",
            House::USSR => "USSR",
            House::England => "England",
            House::Ukraine => "Ukraine",
            House::Germany => "Germany",
            House::France => "France",
            House::Turkey => "Turkey",
            House::GoodGuy => "GoodGuy",
            House::BadGuy => "BadGuy",
            House::Neutral => "Neutral",
            House::Special => "Special",
            House::Multi1 => "Multi1",
            House::Multi2 => "Multi2",
            House::Multi3 => "Multi3",
            House::Multi4 => "Multi4",
            House::Multi5 => "Multi5",
            House::Multi6 => "Multi6",
            House::Multi7 => "Multi7",
            House::Multi8 => "Multi8",
        }
    }

    /// Whether units of `self` fight units of `player`.
    pub fn is_hostile_to(self, player: House) -> bool {
        self != player && self != House::Neutral && player != House::Neutral
    }

    /// Whether units of `self` and `other` fight each other. Every non-player,
    /// non-neutral house is on the same side.
    pub fn is_enemy_of(self, other: House, player: House) -> bool {
        self != House::Neutral
            && other != House::Neutral
            && self.is_hostile_to(player) != other.is_hostile_to(player)
    }
}

/// Terrain class of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Clear,
    Water,
    Rock,
    Tree,
    Wall,
}

impl Terrain {
    /// Blocks line of sight.
    pub fn is_opaque(self) -> bool {
        matches!(self, Terrain::Rock | Terrain::Wall)
    }
}

/// Per-cell visibility. Stored as its byte value in the visibility buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Visibility {
    #[default]
    Shroud = 0,
    Fog = 1,
    Visible = 2,
}

/// Armor class used by the warhead matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorClass {
    #[default]
    None,
    Wood,
    Light,
    Heavy,
    Concrete,
}

impl ArmorClass {
    pub fn index(self) -> usize {
        match self {
            ArmorClass::None => 0,
            ArmorClass::Wood => 1,
            ArmorClass::Light => 2,
            ArmorClass::Heavy => 3,
            ArmorClass::Concrete => 4,
        }
    }
}

/// Locomotion class; decides terrain passability and speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedClass {
    #[default]
    Foot,
    Wheel,
    Winged,
    Float,
}

/// Damage type carried by a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Warhead {
    SmallArms,
    HighExplosive,
    ArmorPiercing,
    Fire,
    HollowPoint,
    Organic,
}

/// Broad unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Infantry,
    Vehicle,
    Vessel,
    Ant,
    Structure,
}

/// Unit mission state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mission {
    #[default]
    Guard,
    AreaGuard,
    Move,
    Attack,
    Hunt,
    Sleep,
    Die,
}

impl Mission {
    /// Mission from a scenario placement name; unknown names default to guard.
    pub fn from_name(name: &str) -> Mission {
        match name.trim().to_ascii_lowercase().as_str() {
            "area guard" => Mission::AreaGuard,
            "hunt" => Mission::Hunt,
            "sleep" | "sticky" => Mission::Sleep,
            "attack" => Mission::Attack,
            _ => Mission::Guard,
        }
    }
}

/// Vessel stealth state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloakState {
    #[default]
    Uncloaked,
    Cloaking,
    Cloaked,
    Uncloaking,
}

/// Top-level engine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Loading,
    Playing,
    Paused,
    Won,
    Lost,
}

impl EngineState {
    pub fn is_finished(self) -> bool {
        matches!(self, EngineState::Won | EngineState::Lost)
    }
}

/// Unit type codes understood by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    // Infantry
    E1,
    E2,
    E3,
    // Vehicles
    LightTank,
    MediumTank,
    HeavyTank,
    Jeep,
    Apc,
    Artillery,
    // Vessels
    Submarine,
    MissileSub,
    Destroyer,
    Cruiser,
    Gunboat,
    Transport,
    // Ants
    WarriorAnt,
    FireAnt,
    ScoutAnt,
    // Defensive structures
    Pillbox,
    CamoPillbox,
    Turret,
    FlameTower,
    // Unarmed structures
    Building,
}

impl UnitKind {
    /// Kind from a scenario type code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<UnitKind> {
        let kind = match code.trim().to_ascii_uppercase().as_str() {
            "E1" => UnitKind::E1,
            "E2" => UnitKind::E2,
            "E3" => UnitKind::E3,
            "1TNK" => UnitKind::LightTank,
            "2TNK" => UnitKind::MediumTank,
            "3TNK" => UnitKind::HeavyTank,
            "JEEP" => UnitKind::Jeep,
            "APC" => UnitKind::Apc,
            "ARTY" => UnitKind::Artillery,
            "SS" => UnitKind::Submarine,
            "MSUB" => UnitKind::MissileSub,
            "DD" => UnitKind::Destroyer,
            "CA" => UnitKind::Cruiser,
            "PT" => UnitKind::Gunboat,
            "LST" => UnitKind::Transport,
            "ANT1" => UnitKind::WarriorAnt,
            "ANT2" => UnitKind::FireAnt,
            "ANT3" => UnitKind::ScoutAnt,
            "PBOX" => UnitKind::Pillbox,
            "HBOX" => UnitKind::CamoPillbox,
            "GUN" => UnitKind::Turret,
            "FTUR" => UnitKind::FlameTower,
            "FACT" | "POWR" | "APWR" | "BARR" | "TENT" | "WEAP" | "PROC" | "SILO" | "FIX"
            | "DOME" | "HPAD" | "SYRD" | "SPEN" | "BLDG" => UnitKind::Building,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> &'static str {
        match self {
            UnitKind::E1 => "E1",
            UnitKind::E2 => "E2",
            UnitKind::E3 => "E3",
            UnitKind::LightTank => "1TNK",
            UnitKind::MediumTank => "2TNK",
            UnitKind::HeavyTank => "3TNK",
            UnitKind::Jeep => "JEEP",
            UnitKind::Apc => "APC",
            UnitKind::Artillery => "ARTY",
            UnitKind::Submarine => "SS",
            UnitKind::MissileSub => "MSUB",
            UnitKind::Destroyer => "DD",
            UnitKind::Cruiser => "CA",
            UnitKind::Gunboat => "PT",
            UnitKind::Transport => "LST",
            UnitKind::WarriorAnt => "ANT1",
            UnitKind::FireAnt => "ANT2",
            UnitKind::ScoutAnt => "ANT3",
            UnitKind::Pillbox => "PBOX",
            UnitKind::CamoPillbox => "HBOX",
            UnitKind::Turret => "GUN",
            UnitKind::FlameTower => "FTUR",
            UnitKind::Building => "BLDG",
        }
    }
}

/// Weapon identifiers referenced by unit profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    M1Carbine,
    Grenade,
    Dragon,
    M60mg,
    Gun75mm,
    Gun90mm,
    Gun105mm,
    Howitzer155mm,
    TorpTube,
    SubScud,
    DepthCharge,
    Stinger,
    Gun8Inch,
    Gun2Inch,
    Mandible,
    FireSpit,
    Sting,
    Vulcan,
    TurretGun,
    FireballLauncher,
}

impl FromStr for House {
    type Err = VocabularyError;

    /// Accepts either the numeric id or the house name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        token
            .parse::<i64>()
            .ok()
            .and_then(House::from_id)
            .or_else(|| House::from_name(token))
            .ok_or_else(|| VocabularyError::UnknownHouse(token.to_string()))
    }
}

impl FromStr for UnitKind {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::from_code(s).ok_or_else(|| VocabularyError::UnknownUnitType(s.trim().to_string()))
    }
}
