#[cfg(test)]
mod tests {
    use antwar_core::components::Cloak;
    use antwar_core::constants::*;
    use antwar_core::enums::{CloakState, Mission, UnitCategory, UnitKind};

    use crate::cloak;
    use crate::fsm::{scans_for_hostiles, transition, MissionEvent, Order};
    use crate::profiles::{get_profile, get_weapon};

    const ALL_KINDS: [UnitKind; 23] = [
        UnitKind::E1,
        UnitKind::E2,
        UnitKind::E3,
        UnitKind::LightTank,
        UnitKind::MediumTank,
        UnitKind::HeavyTank,
        UnitKind::Jeep,
        UnitKind::Apc,
        UnitKind::Artillery,
        UnitKind::Submarine,
        UnitKind::MissileSub,
        UnitKind::Destroyer,
        UnitKind::Cruiser,
        UnitKind::Gunboat,
        UnitKind::Transport,
        UnitKind::WarriorAnt,
        UnitKind::FireAnt,
        UnitKind::ScoutAnt,
        UnitKind::Pillbox,
        UnitKind::CamoPillbox,
        UnitKind::Turret,
        UnitKind::FlameTower,
        UnitKind::Building,
    ];

    // ---- Profiles ----

    #[test]
    fn test_profiles_are_consistent() {
        for kind in ALL_KINDS {
            let p = get_profile(kind);
            assert!(p.max_hp > 0, "{kind:?}");
            assert!(p.sight > 0, "{kind:?}");
            if p.category == UnitCategory::Structure {
                assert!(!p.is_mobile(), "{kind:?} must not move");
            } else {
                assert!(p.is_mobile(), "{kind:?} must move");
            }
            assert_eq!(p.can_cloak, matches!(kind, UnitKind::Submarine | UnitKind::MissileSub));
            assert_eq!(p.is_naval(), p.category == UnitCategory::Vessel);
            if p.secondary.is_some() {
                assert!(p.primary.is_some(), "{kind:?} has a secondary without a primary");
            }
        }
    }

    #[test]
    fn test_only_infantry_is_crushable() {
        for kind in ALL_KINDS {
            let p = get_profile(kind);
            assert_eq!(p.crushable, p.is_infantry(), "{kind:?}");
        }
        assert!(get_profile(UnitKind::HeavyTank).crusher);
        assert!(!get_profile(UnitKind::Jeep).crusher);
    }

    #[test]
    fn test_max_range_uses_longest_weapon() {
        let dd = get_profile(UnitKind::Destroyer);
        assert_eq!(dd.max_range(), get_weapon(antwar_core::enums::WeaponKind::Stinger).range);
        assert_eq!(get_profile(UnitKind::Building).max_range(), 0.0);
    }

    // ---- Mission FSM ----

    #[test]
    fn test_guard_acquires() {
        assert_eq!(transition(Mission::Guard, MissionEvent::HostileSighted), Some(Mission::Attack));
        assert_eq!(transition(Mission::AreaGuard, MissionEvent::HostileSighted), Some(Mission::Attack));
        assert_eq!(transition(Mission::Guard, MissionEvent::Arrived), None);
    }

    #[test]
    fn test_move_completes() {
        assert_eq!(transition(Mission::Move, MissionEvent::Arrived), Some(Mission::Guard));
        assert_eq!(transition(Mission::Move, MissionEvent::PathFailed), Some(Mission::Guard));
        assert_eq!(transition(Mission::Move, MissionEvent::HostileSighted), None, "moving units do not divert");
    }

    #[test]
    fn test_attack_transitions() {
        assert_eq!(transition(Mission::Attack, MissionEvent::TargetLost), Some(Mission::Guard));
        assert_eq!(
            transition(Mission::Attack, MissionEvent::TargetOutOfRange { mobile: true }),
            Some(Mission::Hunt)
        );
        assert_eq!(
            transition(Mission::Attack, MissionEvent::TargetOutOfRange { mobile: false }),
            Some(Mission::Guard)
        );
        assert_eq!(transition(Mission::Attack, MissionEvent::TargetInRange), None);
    }

    #[test]
    fn test_hunt_transitions() {
        assert_eq!(transition(Mission::Hunt, MissionEvent::TargetInRange), Some(Mission::Attack));
        assert_eq!(transition(Mission::Hunt, MissionEvent::TargetLost), Some(Mission::Guard));
        assert_eq!(transition(Mission::Hunt, MissionEvent::PathFailed), None);
    }

    #[test]
    fn test_sleep_ignores_everything_but_orders_and_death() {
        for event in [
            MissionEvent::HostileSighted,
            MissionEvent::TargetInRange,
            MissionEvent::Arrived,
            MissionEvent::TargetLost,
        ] {
            assert_eq!(transition(Mission::Sleep, event), None);
        }
        assert_eq!(transition(Mission::Sleep, MissionEvent::Ordered(Order::Hunt)), Some(Mission::Hunt));
        assert_eq!(transition(Mission::Sleep, MissionEvent::Killed), Some(Mission::Die));
        assert!(!scans_for_hostiles(Mission::Sleep));
    }

    #[test]
    fn test_die_is_terminal() {
        for mission in [
            Mission::Guard,
            Mission::AreaGuard,
            Mission::Move,
            Mission::Attack,
            Mission::Hunt,
            Mission::Sleep,
        ] {
            assert_eq!(transition(mission, MissionEvent::Killed), Some(Mission::Die));
        }
        assert_eq!(transition(Mission::Die, MissionEvent::Ordered(Order::Move)), None);
        assert_eq!(transition(Mission::Die, MissionEvent::Killed), None);
    }

    #[test]
    fn test_orders() {
        assert_eq!(transition(Mission::Attack, MissionEvent::Ordered(Order::Stop)), Some(Mission::Guard));
        assert_eq!(transition(Mission::Guard, MissionEvent::Ordered(Order::Move)), Some(Mission::Move));
        assert_eq!(transition(Mission::Move, MissionEvent::Ordered(Order::Move)), None);
    }

    // ---- Cloak ----

    fn cloaked() -> Cloak {
        Cloak {
            state: CloakState::Cloaked,
            ..Default::default()
        }
    }

    #[test]
    fn test_cloak_cycle() {
        let mut c = Cloak::default();
        for _ in 0..CLOAK_REARM_TICKS - 1 {
            assert_eq!(cloak::tick(&mut c, false), None);
        }
        assert_eq!(cloak::tick(&mut c, false), Some(CloakState::Cloaking));
        for _ in 0..CLOAK_TRANSITION_TICKS - 1 {
            assert_eq!(cloak::tick(&mut c, false), None);
        }
        assert_eq!(cloak::tick(&mut c, false), Some(CloakState::Cloaked));
        assert!(cloak::is_hidden(&c));
        assert!(!cloak::can_fire(&c));

        assert_eq!(cloak::tick(&mut c, true), Some(CloakState::Uncloaking));
        for _ in 0..CLOAK_TRANSITION_TICKS - 1 {
            assert_eq!(cloak::tick(&mut c, true), None);
        }
        assert_eq!(cloak::tick(&mut c, true), Some(CloakState::Uncloaked));
        assert!(cloak::can_fire(&c));
    }

    #[test]
    fn test_damage_forces_full_uncloak() {
        let mut c = cloaked();
        assert!(cloak::on_damage(&mut c));
        assert_eq!(c.state, CloakState::Uncloaking);
        assert_eq!(c.timer, CLOAK_TRANSITION_TICKS);

        // Nearly done cloaking: damage still restarts the full uncloak.
        let mut c = Cloak {
            state: CloakState::Cloaking,
            timer: 1,
            ..Default::default()
        };
        assert!(cloak::on_damage(&mut c));
        assert_eq!(c.timer, CLOAK_TRANSITION_TICKS);

        let mut c = Cloak::default();
        assert!(!cloak::on_damage(&mut c));
        assert_eq!(c.state, CloakState::Uncloaked);
    }

    #[test]
    fn test_sonar_blocks_recloak() {
        let mut c = Cloak::default();
        cloak::on_sonar_pulse(&mut c);
        for _ in 0..SONAR_PULSE_TICKS - 1 {
            assert_eq!(cloak::tick(&mut c, false), None, "sonar pulse must hold the cloak");
        }
        assert_eq!(cloak::tick(&mut c, false), Some(CloakState::Cloaking));
    }
}
