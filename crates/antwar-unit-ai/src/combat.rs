//! Damage resolution and weapon selection.

use antwar_core::enums::{ArmorClass, UnitCategory, Warhead, WeaponKind};

use crate::profiles::{get_weapon, UnitProfile, WeaponProfile};

/// Warhead effectiveness against each armor class, in percent.
/// Columns: none, wood, light, heavy, concrete.
const WARHEAD_VS_ARMOR: [[u32; 5]; 6] = [
    [100, 50, 60, 25, 25],  // SmallArms
    [90, 75, 60, 25, 100],  // HighExplosive
    [30, 75, 75, 100, 50],  // ArmorPiercing
    [90, 100, 60, 25, 50],  // Fire
    [100, 5, 5, 5, 5],      // HollowPoint
    [100, 60, 40, 25, 25],  // Organic
];

fn warhead_row(warhead: Warhead) -> usize {
    match warhead {
        Warhead::SmallArms => 0,
        Warhead::HighExplosive => 1,
        Warhead::ArmorPiercing => 2,
        Warhead::Fire => 3,
        Warhead::HollowPoint => 4,
        Warhead::Organic => 5,
    }
}

/// Damage multiplier in percent.
pub fn warhead_multiplier(warhead: Warhead, armor: ArmorClass) -> u32 {
    WARHEAD_VS_ARMOR[warhead_row(warhead)][armor.index()]
}

/// Hit points actually removed by one hit: `clamp(round(base × multiplier), 1, current_hp)`.
///
/// Returns 0 only when the target already has no hit points left.
pub fn compute_damage(base: u32, warhead: Warhead, armor: ArmorClass, current_hp: u32) -> u32 {
    if current_hp == 0 {
        return 0;
    }
    let scaled = (base as f64 * warhead_multiplier(warhead, armor) as f64 / 100.0).round() as u32;
    scaled.clamp(1, current_hp)
}

/// What the shooter knows about a prospective target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTraits {
    pub category: UnitCategory,
    /// Cloaked, cloaking or still uncloaking.
    pub hidden: bool,
}

/// Whether a weapon may acquire and damage a target.
pub fn can_engage(weapon: &WeaponProfile, target: TargetTraits) -> bool {
    let vessel = target.category == UnitCategory::Vessel;
    if weapon.naval_only && !vessel {
        return false;
    }
    if target.hidden && !weapon.anti_sub {
        return false;
    }
    true
}

/// First mounted weapon (primary, then secondary) able to engage the target.
pub fn select_weapon(profile: &UnitProfile, target: TargetTraits) -> Option<WeaponKind> {
    [profile.primary, profile.secondary]
        .into_iter()
        .flatten()
        .find(|&w| can_engage(&get_weapon(w), target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::get_profile;
    use antwar_core::enums::UnitKind;

    #[test]
    fn test_matrix_rows() {
        assert_eq!(warhead_multiplier(Warhead::ArmorPiercing, ArmorClass::Heavy), 100);
        assert_eq!(warhead_multiplier(Warhead::HollowPoint, ArmorClass::Wood), 5);
        assert_eq!(warhead_multiplier(Warhead::HighExplosive, ArmorClass::Concrete), 100);
        assert_eq!(warhead_multiplier(Warhead::Organic, ArmorClass::Light), 40);
    }

    #[test]
    fn test_damage_rounds_and_clamps() {
        // 15 × 25% = 3.75 -> 4
        assert_eq!(compute_damage(15, Warhead::SmallArms, ArmorClass::Heavy, 100), 4);
        // 1 × 5% rounds to 0 but the floor is 1
        assert_eq!(compute_damage(1, Warhead::HollowPoint, ArmorClass::Light, 100), 1);
        // never more than remaining hp
        assert_eq!(compute_damage(500, Warhead::HighExplosive, ArmorClass::None, 7), 7);
        assert_eq!(compute_damage(500, Warhead::HighExplosive, ArmorClass::None, 0), 0);
    }

    #[test]
    fn test_hidden_vessel_needs_anti_sub() {
        let sub = TargetTraits {
            category: UnitCategory::Vessel,
            hidden: true,
        };
        let dd = get_profile(UnitKind::Destroyer);
        assert_eq!(select_weapon(&dd, sub), Some(WeaponKind::DepthCharge));

        let cruiser = get_profile(UnitKind::Cruiser);
        assert_eq!(select_weapon(&cruiser, sub), None);

        let surfaced = TargetTraits { hidden: false, ..sub };
        assert_eq!(select_weapon(&dd, surfaced), Some(WeaponKind::Stinger));
    }

    #[test]
    fn test_naval_only_weapons_skip_land_targets() {
        let ant = TargetTraits {
            category: UnitCategory::Ant,
            hidden: false,
        };
        assert_eq!(select_weapon(&get_profile(UnitKind::Submarine), ant), None);
        assert_eq!(select_weapon(&get_profile(UnitKind::Gunboat), ant), Some(WeaponKind::Gun2Inch));
    }
}
