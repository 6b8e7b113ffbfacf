#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::InputEvent;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{EffectKind, EffectRecord};
    use crate::state::EngineSnapshot;
    use crate::types::*;

    // ---- CellCoord ----

    #[test]
    fn test_cell_index_round_trip_corners() {
        for cell in [
            CellCoord::new(0, 0),
            CellCoord::new(MAP_CELLS - 1, 0),
            CellCoord::new(0, MAP_CELLS - 1),
            CellCoord::new(37, 91),
        ] {
            let idx = cell.index().unwrap();
            assert_eq!(CellCoord::from_index(idx), cell);
        }
    }

    #[test]
    fn test_cell_index_off_grid() {
        assert_eq!(CellCoord::new(-1, 0).index(), None);
        assert_eq!(CellCoord::new(0, MAP_CELLS).index(), None);
    }

    #[test]
    fn test_cell_center_and_from_world() {
        let cell = CellCoord::new(3, 5);
        let center = cell.center();
        assert_eq!(center, Vec2::new(3.5 * CELL_SIZE, 5.5 * CELL_SIZE));
        assert_eq!(CellCoord::from_world(center), cell);
        // Cell edges belong to the lower-right cell.
        assert_eq!(
            CellCoord::from_world(Vec2::new(4.0 * CELL_SIZE, 5.0 * CELL_SIZE)),
            CellCoord::new(4, 5)
        );
    }

    #[test]
    fn test_adjacency_is_eight_connected() {
        let c = CellCoord::new(10, 10);
        let mut count = 0;
        for dy in -2..=2 {
            for dx in -2..=2 {
                if c.is_adjacent(c.offset(dx, dy)) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 8);
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn test_bounds_contains() {
        let b = MapBounds {
            x: 10,
            y: 20,
            width: 5,
            height: 4,
        };
        assert!(b.contains(CellCoord::new(10, 20)));
        assert!(b.contains(CellCoord::new(14, 23)));
        assert!(!b.contains(CellCoord::new(15, 23)));
        assert!(!b.contains(CellCoord::new(9, 21)));
    }

    // ---- Facing ----

    #[test]
    fn test_facing_toward_compass_points() {
        let o = Vec2::ZERO;
        assert_eq!(Facing::toward(o, Vec2::new(0.0, -1.0)), Some(Facing(0)));
        assert_eq!(Facing::toward(o, Vec2::new(1.0, -1.0)), Some(Facing(1)));
        assert_eq!(Facing::toward(o, Vec2::new(1.0, 0.0)), Some(Facing(2)));
        assert_eq!(Facing::toward(o, Vec2::new(0.0, 1.0)), Some(Facing(4)));
        assert_eq!(Facing::toward(o, Vec2::new(-1.0, 0.0)), Some(Facing(6)));
        assert_eq!(Facing::toward(o, o), None);
    }

    #[test]
    fn test_facing_rotates_shortest_way() {
        let mut f = Facing(7);
        assert!(f.rotate_toward(Facing(0)));
        assert_eq!(f, Facing(0));

        let mut f = Facing(0);
        assert!(!f.rotate_toward(Facing(6)));
        assert_eq!(f, Facing(7), "should turn counter-clockwise");
        assert!(f.rotate_toward(Facing(6)));
    }

    #[test]
    fn test_facing_from_scenario_byte() {
        assert_eq!(Facing::from_byte(0), Facing(0));
        assert_eq!(Facing::from_byte(64), Facing(2));
        assert_eq!(Facing::from_byte(128), Facing(4));
        assert_eq!(Facing::from_byte(250), Facing(0));
    }

    // ---- Vocabulary ----

    #[test]
    fn test_house_parsing() {
        assert_eq!("Greece".parse::<House>(), Ok(House::Greece));
        assert_eq!("ussr".parse::<House>(), Ok(House::USSR));
        assert_eq!("2".parse::<House>(), Ok(House::USSR));
        assert!("Atlantis".parse::<House>().is_err());
        assert!("99".parse::<House>().is_err());
    }

    #[test]
    fn test_hostility() {
        assert!(House::USSR.is_hostile_to(House::Greece));
        assert!(!House::Greece.is_hostile_to(House::Greece));
        assert!(!House::Neutral.is_hostile_to(House::Greece));

        let player = House::Greece;
        assert!(House::USSR.is_enemy_of(House::Greece, player));
        assert!(House::Greece.is_enemy_of(House::BadGuy, player));
        assert!(!House::USSR.is_enemy_of(House::BadGuy, player), "non-player houses are allied");
        assert!(!House::Neutral.is_enemy_of(House::USSR, player));
    }

    #[test]
    fn test_unit_codes_round_trip() {
        for code in ["E1", "1TNK", "SS", "DD", "ANT1", "ANT3", "PBOX", "FACT"] {
            let kind: UnitKind = code.parse().unwrap();
            assert_eq!(UnitKind::from_code(kind.code()), Some(kind));
        }
        assert!("MIG".parse::<UnitKind>().is_err());
    }

    #[test]
    fn test_mission_names() {
        assert_eq!(Mission::from_name("Area Guard"), Mission::AreaGuard);
        assert_eq!(Mission::from_name("Hunt"), Mission::Hunt);
        assert_eq!(Mission::from_name("Unload"), Mission::Guard);
    }

    // ---- Effects, inputs, snapshots ----

    #[test]
    fn test_effect_expiry() {
        let mut e = EffectRecord::new(
            EffectKind::Crush,
            None,
            Vec2::ZERO,
            Vec2::ZERO,
            0,
        );
        assert_eq!(e.lifetime, 1, "zero lifetime is bumped to one tick");
        assert!(!e.is_expired());
        e.age = 1;
        assert!(e.is_expired());
    }

    #[test]
    fn test_input_event_tagged_json() {
        let ev = InputEvent::MoveTo {
            cell: CellCoord::new(4, 9),
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"type\":\"MoveTo\""), "got {json}");
        let back: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn test_default_snapshot_is_loading() {
        let snap = EngineSnapshot::default();
        assert_eq!(snap.state, EngineState::Loading);
        assert!(snap.units.is_empty());
        assert_eq!(snap.time.tick, 0);
    }

    #[test]
    fn test_time_unit_ticks() {
        assert_eq!(SCENARIO_TIME_UNIT_TICKS, 90);
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance();
        }
        assert_eq!(t.tick, 15);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }
}
