//! Per-kind unit stats and weapon tables.
//!
//! Immutable data looked up by kind; callers hold the returned values by copy.

use antwar_core::enums::*;

/// Static stats for a unit kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitProfile {
    pub category: UnitCategory,
    pub max_hp: u32,
    pub armor: ArmorClass,
    /// Movement speed in world units per tick on clear terrain. 0 for structures.
    pub speed: f32,
    pub speed_class: SpeedClass,
    /// Sight radius in cells.
    pub sight: i32,
    pub primary: Option<WeaponKind>,
    pub secondary: Option<WeaponKind>,
    /// Only the turret turns to aim.
    pub turreted: bool,
    /// Must finish turning before it may fire.
    pub no_moving_fire: bool,
    /// Destroys crushable units by driving over them.
    pub crusher: bool,
    pub crushable: bool,
    pub can_cloak: bool,
}

impl UnitProfile {
    pub fn is_mobile(&self) -> bool {
        self.speed > 0.0
    }

    pub fn is_naval(&self) -> bool {
        self.speed_class == SpeedClass::Float
    }

    pub fn is_infantry(&self) -> bool {
        self.category == UnitCategory::Infantry
    }

    /// Longest reach of any mounted weapon, in cells.
    pub fn max_range(&self) -> f32 {
        [self.primary, self.secondary]
            .into_iter()
            .flatten()
            .map(|w| get_weapon(w).range)
            .fold(0.0, f32::max)
    }
}

/// Static stats for a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    pub damage: u32,
    /// Range in cells.
    pub range: f32,
    /// Ticks between shots.
    pub rate_of_fire: u32,
    pub warhead: Warhead,
    /// Can acquire and damage cloaked vessels.
    pub anti_sub: bool,
    /// Engages vessels only.
    pub naval_only: bool,
}

const fn weapon(damage: u32, range: f32, rate_of_fire: u32, warhead: Warhead) -> WeaponProfile {
    WeaponProfile {
        damage,
        range,
        rate_of_fire,
        warhead,
        anti_sub: false,
        naval_only: false,
    }
}

/// Get the stats for a weapon.
pub fn get_weapon(kind: WeaponKind) -> WeaponProfile {
    use Warhead::*;

    match kind {
        WeaponKind::M1Carbine => weapon(15, 3.0, 20, SmallArms),
        WeaponKind::Grenade => weapon(50, 4.0, 60, HighExplosive),
        WeaponKind::Dragon => weapon(35, 5.0, 50, ArmorPiercing),
        WeaponKind::M60mg => weapon(15, 4.0, 20, SmallArms),
        WeaponKind::Gun75mm => weapon(25, 4.0, 40, ArmorPiercing),
        WeaponKind::Gun90mm => weapon(30, 4.75, 50, ArmorPiercing),
        WeaponKind::Gun105mm => weapon(40, 4.75, 70, ArmorPiercing),
        WeaponKind::Howitzer155mm => weapon(150, 6.0, 65, HighExplosive),
        WeaponKind::TorpTube => WeaponProfile {
            naval_only: true,
            ..weapon(90, 9.0, 60, ArmorPiercing)
        },
        WeaponKind::SubScud => weapon(400, 14.0, 120, HighExplosive),
        WeaponKind::DepthCharge => WeaponProfile {
            anti_sub: true,
            naval_only: true,
            ..weapon(80, 5.0, 60, ArmorPiercing)
        },
        WeaponKind::Stinger => weapon(30, 9.0, 60, ArmorPiercing),
        WeaponKind::Gun8Inch => weapon(500, 22.0, 160, HighExplosive),
        WeaponKind::Gun2Inch => weapon(25, 5.5, 30, ArmorPiercing),
        WeaponKind::Mandible => weapon(50, 1.5, 15, Organic),
        WeaponKind::FireSpit => weapon(70, 2.5, 30, Fire),
        WeaponKind::Sting => weapon(30, 1.5, 12, Organic),
        WeaponKind::Vulcan => weapon(40, 5.0, 30, SmallArms),
        WeaponKind::TurretGun => weapon(40, 6.0, 40, ArmorPiercing),
        WeaponKind::FireballLauncher => weapon(125, 4.0, 50, Fire),
    }
}

const BASE: UnitProfile = UnitProfile {
    category: UnitCategory::Vehicle,
    max_hp: 100,
    armor: ArmorClass::None,
    speed: 0.0,
    speed_class: SpeedClass::Wheel,
    sight: 4,
    primary: None,
    secondary: None,
    turreted: false,
    no_moving_fire: false,
    crusher: false,
    crushable: false,
    can_cloak: false,
};

const INFANTRY: UnitProfile = UnitProfile {
    category: UnitCategory::Infantry,
    max_hp: 50,
    speed: 0.8,
    speed_class: SpeedClass::Foot,
    crushable: true,
    ..BASE
};

const VESSEL: UnitProfile = UnitProfile {
    category: UnitCategory::Vessel,
    armor: ArmorClass::Heavy,
    speed_class: SpeedClass::Float,
    sight: 6,
    turreted: true,
    ..BASE
};

const ANT: UnitProfile = UnitProfile {
    category: UnitCategory::Ant,
    armor: ArmorClass::Light,
    speed: 1.2,
    speed_class: SpeedClass::Foot,
    sight: 3,
    ..BASE
};

const STRUCTURE: UnitProfile = UnitProfile {
    category: UnitCategory::Structure,
    max_hp: 400,
    armor: ArmorClass::Concrete,
    sight: 5,
    ..BASE
};

/// Get the stats for a unit kind.
pub fn get_profile(kind: UnitKind) -> UnitProfile {
    use WeaponKind::*;

    match kind {
        UnitKind::E1 => UnitProfile {
            primary: Some(M1Carbine),
            ..INFANTRY
        },
        UnitKind::E2 => UnitProfile {
            primary: Some(Grenade),
            ..INFANTRY
        },
        UnitKind::E3 => UnitProfile {
            max_hp: 45,
            primary: Some(Dragon),
            ..INFANTRY
        },
        UnitKind::LightTank => UnitProfile {
            max_hp: 300,
            armor: ArmorClass::Heavy,
            speed: 1.5,
            primary: Some(Gun75mm),
            turreted: true,
            crusher: true,
            ..BASE
        },
        UnitKind::MediumTank => UnitProfile {
            max_hp: 400,
            armor: ArmorClass::Heavy,
            speed: 1.3,
            sight: 5,
            primary: Some(Gun90mm),
            turreted: true,
            crusher: true,
            ..BASE
        },
        UnitKind::HeavyTank => UnitProfile {
            max_hp: 600,
            armor: ArmorClass::Heavy,
            speed: 1.0,
            sight: 5,
            primary: Some(Gun105mm),
            secondary: Some(Gun105mm),
            turreted: true,
            crusher: true,
            ..BASE
        },
        UnitKind::Jeep => UnitProfile {
            max_hp: 150,
            armor: ArmorClass::Light,
            speed: 2.0,
            sight: 6,
            primary: Some(M60mg),
            turreted: true,
            ..BASE
        },
        UnitKind::Apc => UnitProfile {
            max_hp: 200,
            armor: ArmorClass::Heavy,
            speed: 1.6,
            sight: 5,
            primary: Some(M60mg),
            crusher: true,
            ..BASE
        },
        UnitKind::Artillery => UnitProfile {
            max_hp: 75,
            armor: ArmorClass::Light,
            speed: 0.9,
            sight: 5,
            primary: Some(Howitzer155mm),
            no_moving_fire: true,
            ..BASE
        },
        UnitKind::Submarine => UnitProfile {
            max_hp: 120,
            armor: ArmorClass::Light,
            speed: 1.0,
            primary: Some(TorpTube),
            turreted: false,
            can_cloak: true,
            ..VESSEL
        },
        UnitKind::MissileSub => UnitProfile {
            max_hp: 150,
            armor: ArmorClass::Light,
            speed: 0.9,
            primary: Some(SubScud),
            turreted: false,
            can_cloak: true,
            ..VESSEL
        },
        UnitKind::Destroyer => UnitProfile {
            max_hp: 400,
            speed: 1.6,
            primary: Some(Stinger),
            secondary: Some(DepthCharge),
            ..VESSEL
        },
        UnitKind::Cruiser => UnitProfile {
            max_hp: 700,
            speed: 0.8,
            sight: 7,
            primary: Some(Gun8Inch),
            ..VESSEL
        },
        UnitKind::Gunboat => UnitProfile {
            max_hp: 200,
            speed: 2.0,
            sight: 7,
            primary: Some(Gun2Inch),
            secondary: Some(DepthCharge),
            ..VESSEL
        },
        UnitKind::Transport => UnitProfile {
            max_hp: 350,
            speed: 1.4,
            turreted: false,
            ..VESSEL
        },
        UnitKind::WarriorAnt => UnitProfile {
            max_hp: 150,
            primary: Some(Mandible),
            ..ANT
        },
        UnitKind::FireAnt => UnitProfile {
            max_hp: 125,
            primary: Some(FireSpit),
            ..ANT
        },
        UnitKind::ScoutAnt => UnitProfile {
            max_hp: 85,
            speed: 1.6,
            sight: 4,
            primary: Some(Sting),
            ..ANT
        },
        UnitKind::Pillbox => UnitProfile {
            primary: Some(Vulcan),
            ..STRUCTURE
        },
        UnitKind::CamoPillbox => UnitProfile {
            max_hp: 600,
            primary: Some(Vulcan),
            ..STRUCTURE
        },
        UnitKind::Turret => UnitProfile {
            armor: ArmorClass::Heavy,
            sight: 6,
            primary: Some(TurretGun),
            turreted: true,
            ..STRUCTURE
        },
        UnitKind::FlameTower => UnitProfile {
            armor: ArmorClass::Heavy,
            primary: Some(FireballLauncher),
            ..STRUCTURE
        },
        UnitKind::Building => UnitProfile {
            max_hp: 500,
            armor: ArmorClass::Wood,
            sight: 3,
            ..STRUCTURE
        },
    }
}
