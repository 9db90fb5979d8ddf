#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::commands::PlayerCommand;
    use crate::config::{GameConfig, MissileTypeSpec, TargetPlacement};
    use crate::enums::*;
    use crate::error::{ConfigError, MissileError};
    use crate::events::GameEvent;
    use crate::missile::{ballistic_arc, Missile, MissileRegistry};
    use crate::state::SessionStatistics;
    use crate::target::{Target, TargetRegistry};
    use crate::types::{MissileId, NationId, Position, TargetId};

    fn city(defense_level: f64) -> Target {
        Target::new(
            "Test City",
            TargetKind::City,
            Position::new(10.0, 10.0),
            1_000_000,
            50,
            defense_level,
        )
    }

    fn spec(max_range: f64, speed: f64) -> Arc<MissileTypeSpec> {
        Arc::new(MissileTypeSpec {
            name: "Test Missile".into(),
            max_range,
            speed,
            warheads: 3,
            accuracy: 0.9,
            cost: 2,
        })
    }

    // ---- Configuration ----

    #[test]
    fn test_default_config_is_consistent() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.missile_types.len(), 3);
        assert_eq!(config.target_types.len(), 4);
        assert!(config.placements_for(&NationId::new("USA")).is_some());
        assert!(config.placements_for(&NationId::new("USSR")).is_some());
        assert_eq!(config.difficulty(Difficulty::Wopr).unwrap().accuracy, 0.95);
    }

    #[test]
    fn test_config_json_uses_table_names() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        assert!(json.contains("\"COMMAND_CENTER\""));
        assert!(json.contains("\"range\""));
        assert!(json.contains("\"wopr\""));

        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(back.missile_types["ICBM"].warheads, 10);
        assert_eq!(back.placements.len(), 4);
        assert_eq!(back.quotes.len(), GameConfig::default().quotes.len());
    }

    #[test]
    fn test_config_rejects_undefined_target_type() {
        let mut config = GameConfig::default();
        config.target_types.remove(&TargetKind::MissileSilo);
        match config.validate() {
            Err(ConfigError::UnknownTargetType { kind, .. }) => {
                assert_eq!(kind, TargetKind::MissileSilo)
            }
            other => panic!("expected UnknownTargetType, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_empty_catalog() {
        let mut config = GameConfig::default();
        config.missile_types.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyMissileCatalog)
        ));
    }

    #[test]
    fn test_config_rejects_non_finite_missile_figures() {
        for speed in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            let mut config = GameConfig::default();
            config.missile_types.get_mut("ICBM").unwrap().speed = speed;
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidSpeed(ref name)) if name == "ICBM"),
                "speed {speed} accepted"
            );
        }
        for max_range in [f64::NAN, f64::INFINITY, -5.0] {
            let mut config = GameConfig::default();
            config.missile_types.get_mut("SLBM").unwrap().max_range = max_range;
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidRange { ref name, .. }) if name == "SLBM"),
                "range {max_range} accepted"
            );
        }
    }

    #[test]
    fn test_empty_statistics_view() {
        let stats = SessionStatistics::default();
        assert_eq!(stats.player.nation, NationId::default());
        assert_eq!(stats.state, GameState::Menu);
        assert!(stats.opponent.is_none());
        let json = serde_json::to_string(&stats).unwrap();
        let back: SessionStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.player, stats.player);
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_target_placement_json_shape() {
        let placement: TargetPlacement =
            serde_json::from_str(r#"{"name":"Omaha","type":"MILITARY_BASE","x":14,"y":14}"#)
                .unwrap();
        assert_eq!(placement.kind, TargetKind::MilitaryBase);
        assert_eq!(placement.x, 14.0);
    }

    // ---- Damage resolution ----

    #[test]
    fn test_full_salvo_destroys_undefended_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut target = city(0.0);

        let report = target.take_damage(10, 1.0, &mut rng);

        assert_eq!(report.outcome, ImpactOutcome::Hit);
        assert_eq!(report.hits, 10);
        assert_eq!(report.intercepted, 0);
        assert_eq!(report.damage_level, 1.0);
        assert!(report.destroyed);
        assert_eq!(report.casualties, 800_000);
        assert_eq!(target.casualties(), 800_000);
        assert_eq!(target.status(), TargetStatus::Destroyed);
        assert_eq!(target.hit_count(), 10);
    }

    #[test]
    fn test_single_hit_follows_damage_curve() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut target = city(0.0);

        let report = target.take_damage(1, 1.0, &mut rng);

        assert_eq!(report.hits, 1);
        assert!((target.damage_level() - 0.3).abs() < 1e-12);
        assert!((239_999..=240_000).contains(&report.casualties));
        assert!(!report.destroyed);
        assert_eq!(target.status(), TargetStatus::Hit);
    }

    #[test]
    fn test_saturated_defense_always_intercepts() {
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut target = city(1.0);
            let warheads = (seed % 12) as u32 + 1;

            let report = target.take_damage(warheads, 1.0, &mut rng);

            assert_eq!(report.outcome, ImpactOutcome::FullyIntercepted);
            assert_eq!(report.intercepted, warheads);
            assert_eq!(target.damage_level(), 0.0);
            assert_eq!(target.casualties(), 0);
            assert!(!target.is_destroyed());
        }
    }

    #[test]
    fn test_zero_accuracy_always_misses() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut target = city(0.0);
        let report = target.take_damage(8, 0.0, &mut rng);
        assert_eq!(report.outcome, ImpactOutcome::AllMissed);
        assert!(!report.is_hit());
        assert_eq!(target.damage_level(), 0.0);
    }

    #[test]
    fn test_destroyed_target_ignores_further_attacks() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut target = city(0.0);
        target.take_damage(10, 1.0, &mut rng);
        let casualties = target.casualties();

        let report = target.take_damage(10, 1.0, &mut rng);

        assert_eq!(report.outcome, ImpactOutcome::AlreadyDestroyed);
        assert!(!report.destroyed);
        assert_eq!(report.casualties, 0);
        assert_eq!(target.casualties(), casualties);
    }

    #[test]
    fn test_three_salvos_of_three_destroy_city() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut target = city(0.0);

        for _ in 0..3 {
            target.take_damage(3, 1.0, &mut rng);
        }

        assert!(target.is_destroyed());
        assert!(target.casualties() > 0);
        assert!(target.casualties() <= target.population);
        assert_eq!(target.damage_level(), 1.0);
    }

    #[test]
    fn test_casualties_never_exceed_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut target = city(0.0);
        // A light hit first, then a saturating one.
        target.take_damage(1, 1.0, &mut rng);
        target.take_damage(10, 1.0, &mut rng);
        assert!(target.casualties() <= target.population);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_damage_is_monotonic(
                seed in 0u64..10_000,
                defense in 0.0f64..=1.0,
                attacks in proptest::collection::vec((0u32..12, 0.0f64..=1.0), 1..12),
            ) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut target = city(defense);
                let mut last_damage = 0.0;
                let mut last_casualties = 0;

                for (warheads, accuracy) in attacks {
                    target.take_damage(warheads, accuracy, &mut rng);
                    prop_assert!(target.damage_level() >= last_damage);
                    prop_assert!(target.casualties() >= last_casualties);
                    prop_assert!(target.casualties() <= target.population);
                    prop_assert_eq!(
                        target.is_destroyed(),
                        target.damage_level() >= crate::constants::DESTROYED_THRESHOLD
                    );
                    last_damage = target.damage_level();
                    last_casualties = target.casualties();
                }
            }

            #[test]
            fn prop_flight_time_is_fixed(
                x in -500.0f64..500.0,
                y in -500.0f64..500.0,
                steps in proptest::collection::vec(0.0f64..5.0, 1..40),
            ) {
                let mut missile = Missile::new(
                    "T",
                    spec(10_000.0, 7.0),
                    Position::new(0.0, 0.0),
                    Position::new(x, y),
                    NationId::new("USA"),
                ).unwrap();
                let total = missile.total_flight_time();
                missile.launch();
                let mut left_flight = false;
                for dt in steps {
                    let in_flight = missile.advance(dt);
                    prop_assert_eq!(missile.total_flight_time(), total);
                    if left_flight {
                        prop_assert!(!in_flight);
                        prop_assert_eq!(missile.phase(), MissilePhase::Detonated);
                    }
                    left_flight |= !in_flight;
                }
            }
        }
    }

    // ---- Target registry ----

    fn registry() -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        let usa = NationId::new("USA");
        let ussr = NationId::new("USSR");
        registry.add(
            usa.clone(),
            Target::new("A", TargetKind::City, Position::new(0.0, 0.0), 100, 50, 0.0),
        );
        registry.add(
            usa,
            Target::new("B", TargetKind::MissileSilo, Position::new(10.0, 0.0), 10, 150, 0.0),
        );
        registry.add(
            ussr,
            Target::new("C", TargetKind::CommandCenter, Position::new(0.0, 10.0), 1, 200, 0.0),
        );
        registry
    }

    #[test]
    fn test_registry_partitions_by_nation() {
        let mut registry = registry();
        let usa = NationId::new("USA");
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        registry
            .get_mut(TargetId(1))
            .unwrap()
            .take_damage(10, 1.0, &mut rng);

        assert_eq!(registry.intact(Some(&usa)), vec![TargetId(0)]);
        assert_eq!(registry.destroyed(Some(&usa)), vec![TargetId(1)]);
        assert_eq!(registry.destruction_percentage(Some(&usa)), 50.0);
        assert_eq!(registry.intact_count(None), 2);
        assert_eq!(registry.owner(TargetId(2)), Some(&NationId::new("USSR")));
        assert_eq!(registry.total_population(None), 111);
        assert_eq!(
            registry.high_value(None, None),
            vec![TargetId(2)],
            "destroyed silo is no longer a high value target"
        );
        assert!(registry.high_value(None, Some(1_000)).is_empty());
        assert_eq!(registry.find_by_name("C").map(|(id, _)| id), Some(TargetId(2)));
    }

    #[test]
    fn test_destruction_percentage_of_unknown_nation_is_zero() {
        let registry = registry();
        assert_eq!(
            registry.destruction_percentage(Some(&NationId::new("ATLANTIS"))),
            0.0
        );
    }

    #[test]
    fn test_nearest_breaks_ties_by_registration_order() {
        let registry = registry();
        // Equidistant from A (0,0) and B (10,0).
        let midpoint = Position::new(5.0, 0.0);
        assert_eq!(registry.nearest(&midpoint, None, false), Some(TargetId(0)));
    }

    #[test]
    fn test_nearest_intact_only_skips_destroyed() {
        let mut registry = registry();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        registry
            .get_mut(TargetId(0))
            .unwrap()
            .take_damage(10, 1.0, &mut rng);

        let origin = Position::new(0.0, 0.0);
        assert_eq!(registry.nearest(&origin, None, false), Some(TargetId(0)));
        assert_eq!(registry.nearest(&origin, None, true), Some(TargetId(1)));
    }

    // ---- Flight model ----

    #[test]
    fn test_missile_reaches_target_after_total_flight_time() {
        let mut missile = Missile::new(
            "T",
            spec(1_000.0, 10.0),
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            NationId::new("USA"),
        )
        .unwrap();
        assert_eq!(missile.total_flight_time(), 10.0);
        assert_eq!(missile.phase(), MissilePhase::NotLaunched);

        assert!(missile.launch());
        assert!(!missile.advance(10.0));
        assert_eq!(missile.phase(), MissilePhase::Detonated);
        assert_eq!(missile.position(), Position::new(100.0, 0.0));
        assert_eq!(missile.progress(), 1.0);
    }

    #[test]
    fn test_missile_follows_arc_midflight() {
        let mut missile = Missile::new(
            "T",
            spec(1_000.0, 10.0),
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            NationId::new("USA"),
        )
        .unwrap();
        missile.launch();

        assert!(missile.advance(5.0));
        let pos = missile.position();
        assert!((pos.x - 50.0).abs() < 1e-9);
        assert!((pos.y + 20.0).abs() < 1e-9, "apex should be 20% of distance");
    }

    #[test]
    fn test_trajectory_has_minimum_resolution() {
        let short = ballistic_arc(&Position::new(0.0, 0.0), &Position::new(3.0, 4.0));
        assert_eq!(short.len(), 11);
        assert_eq!(short[0], Position::new(0.0, 0.0));
        assert_eq!(*short.last().unwrap(), Position::new(3.0, 4.0));

        let long = ballistic_arc(&Position::new(0.0, 0.0), &Position::new(100.0, 0.0));
        assert_eq!(long.len(), 101);
    }

    #[test]
    fn test_range_exceeded_is_rejected() {
        let result = Missile::new(
            "T",
            spec(50.0, 10.0),
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            NationId::new("USA"),
        );
        assert!(matches!(
            result,
            Err(MissileError::RangeExceeded { max_range, .. }) if max_range == 50.0
        ));
    }

    #[test]
    fn test_lifecycle_probes_outside_flight_are_noops() {
        let mut missile = Missile::new(
            "T",
            spec(1_000.0, 10.0),
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            NationId::new("USA"),
        )
        .unwrap();
        assert!(!missile.advance(1.0));
        assert!(!missile.intercept());
        assert!(!missile.detonate());
        assert_eq!(missile.phase(), MissilePhase::NotLaunched);

        missile.launch();
        assert!(!missile.launch());
        assert!(missile.intercept());
        assert!(!missile.advance(100.0));
        assert!(!missile.detonate());
        assert_eq!(missile.phase(), MissilePhase::Intercepted);
    }

    // ---- Missile registry ----

    #[test]
    fn test_registry_advance_partitions_active_set() {
        let mut missiles = MissileRegistry::new();
        let usa = NationId::new("USA");
        let near = missiles
            .create("T", spec(1_000.0, 10.0), Position::new(0.0, 0.0), Position::new(10.0, 0.0), usa.clone())
            .unwrap();
        let far = missiles
            .create("T", spec(1_000.0, 10.0), Position::new(0.0, 0.0), Position::new(100.0, 0.0), usa)
            .unwrap();
        assert!(missiles.launch(near));
        assert!(missiles.launch(far));
        assert!(!missiles.launch(far), "second launch is a no-op");

        let outcome = missiles.advance_all(2.0);

        assert_eq!(outcome.detonated, vec![near]);
        assert_eq!(missiles.active(), &[far]);
        assert_eq!(missiles.detonated(), &[near]);
        let stats = missiles.statistics();
        assert_eq!(stats.total_launched, 2);
        assert_eq!(stats.in_flight, 1);
        assert_eq!(stats.detonated, 1);
    }

    #[test]
    fn test_registry_intercept_and_queries() {
        let mut missiles = MissileRegistry::new();
        let usa = NationId::new("USA");
        let ussr = NationId::new("USSR");
        let ours = missiles
            .create("T", spec(1_000.0, 10.0), Position::new(0.0, 0.0), Position::new(100.0, 0.0), usa.clone())
            .unwrap();
        let theirs = missiles
            .create("T", spec(1_000.0, 10.0), Position::new(100.0, 0.0), Position::new(0.0, 0.0), ussr)
            .unwrap();
        missiles.launch(ours);
        missiles.launch(theirs);

        assert_eq!(missiles.by_owner(&usa), vec![ours]);
        assert_eq!(missiles.incoming(&usa), vec![theirs]);
        assert_eq!(missiles.near(&Position::new(100.0, 0.0), 1.0), vec![theirs]);

        assert!(missiles.intercept(theirs));
        assert!(!missiles.intercept(theirs));
        assert_eq!(missiles.intercepted(), &[theirs]);
        assert!(missiles.incoming(&usa).is_empty());
        assert_eq!(missiles.get(theirs).unwrap().phase(), MissilePhase::Intercepted);
        assert_eq!(missiles.get(MissileId(9)).map(|m| m.phase()), None);
    }

    #[test]
    fn test_registry_create_out_of_range_registers_nothing() {
        let mut missiles = MissileRegistry::new();
        let result = missiles.create(
            "T",
            spec(5.0, 10.0),
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            NationId::new("USA"),
        );
        assert!(result.is_err());
        assert!(missiles.is_empty());
    }

    // ---- Wire shape ----

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Launch {
                missile_type: "ICBM".into(),
                target: TargetId(3),
            },
            PlayerCommand::Advance { dt: 0.5 },
            PlayerCommand::AiTurn,
            PlayerCommand::ProposePeace,
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::Quit,
            PlayerCommand::Statistics,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"Launch","missile_type":"SLBM","target":4}"#).unwrap();
        assert_eq!(
            parsed,
            PlayerCommand::Launch {
                missile_type: "SLBM".into(),
                target: TargetId(4)
            }
        );
    }

    #[test]
    fn test_event_levels() {
        let destroyed = GameEvent::TargetDestroyed {
            target: TargetId(0),
            name: "Moscow".into(),
            by: NationId::new("USA"),
        };
        assert_eq!(destroyed.level(), AlertLevel::Critical);
        let json = serde_json::to_string(&destroyed).unwrap();
        assert!(json.contains("\"type\":\"TargetDestroyed\""));
    }

    #[test]
    fn test_terminal_states() {
        assert!(GameState::GameOver.is_terminal());
        assert!(GameState::Peace.is_terminal());
        assert!(!GameState::Paused.is_terminal());
        assert!(MissilePhase::Intercepted.is_terminal());
        assert!(!MissilePhase::InFlight.is_terminal());
        assert!(Difficulty::Wopr.is_maximum());
    }
}
