use std::collections::BTreeMap;

use wopr_sim::core::commands::PlayerCommand;
use wopr_sim::core::config::*;
use wopr_sim::core::enums::*;
use wopr_sim::core::types::{NationId, TargetId};
use wopr_sim::GameSession;

/// Two targets per side on a line, one shot destroys anything undefended.
fn board(usa_defense: f64, ussr_defense: f64) -> GameConfig {
    let place = |name: &str, kind, x| TargetPlacement {
        name: name.into(),
        kind,
        x,
        y: 0.0,
    };
    let target_type = |name: &str, defense_level| TargetTypeSpec {
        name: name.into(),
        population: 1_000_000,
        strategic_value: 50,
        defense_level,
    };
    GameConfig {
        missile_types: BTreeMap::from([(
            "STRIKE".to_string(),
            MissileTypeSpec {
                name: "Strike".into(),
                max_range: 1_000.0,
                speed: 10.0,
                warheads: 10,
                accuracy: 1.0,
                cost: 1,
            },
        )]),
        target_types: BTreeMap::from([
            (TargetKind::CommandCenter, target_type("Command Center", usa_defense)),
            (TargetKind::City, target_type("City", ussr_defense)),
        ]),
        placements: vec![
            NationPlacements {
                nation: NationId::new("USA"),
                targets: vec![
                    place("Alpha", TargetKind::CommandCenter, 0.0),
                    place("Bravo", TargetKind::CommandCenter, 10.0),
                ],
            },
            NationPlacements {
                nation: NationId::new("USSR"),
                targets: vec![
                    place("Charlie", TargetKind::City, 100.0),
                    place("Delta", TargetKind::City, 110.0),
                ],
            },
        ],
        difficulties: GameConfig::default().difficulties,
        quotes: Vec::new(),
    }
}

fn tutorial(config: GameConfig) -> GameSession {
    GameSession::new(
        config,
        SessionConfig {
            mode: GameMode::Tutorial,
            ..Default::default()
        },
    )
    .unwrap()
}

fn strike_all(session: &mut GameSession, targets: &[u32]) {
    for id in targets {
        session.launch("STRIKE", TargetId(*id)).unwrap();
    }
}

#[test]
fn test_losing_every_target_is_defeat() {
    let mut s = tutorial(board(0.0, 0.0));
    strike_all(&mut s, &[0, 1]);

    s.advance(2.0);

    assert_eq!(s.state(), GameState::GameOver);
    assert_eq!(s.result(), Some(GameResult::Defeat));
    assert_eq!(s.result_message(), GameResult::Defeat.headline());
}

#[test]
fn test_destroying_every_enemy_target_is_victory() {
    let mut s = tutorial(board(0.0, 0.0));
    strike_all(&mut s, &[2, 3]);

    s.advance(5.0);
    assert_eq!(s.state(), GameState::Playing);
    s.advance(10.0);

    assert_eq!(s.result(), Some(GameResult::Victory));
    assert_eq!(s.player().score, 100);
    assert_eq!(s.statistics().targets.destroyed, 2);
}

#[test]
fn test_mutual_destruction_outranks_defeat_and_victory() {
    let mut s = tutorial(board(0.0, 0.0));
    strike_all(&mut s, &[0, 1, 2, 3]);

    // Every warhead lands in the same tick.
    s.advance(20.0);

    assert_eq!(s.result(), Some(GameResult::Mad));
    assert_eq!(s.state(), GameState::GameOver);
    assert_eq!(s.targets().intact_count(None), 0);
}

#[test]
fn test_terminal_state_is_final() {
    let mut s = tutorial(board(0.0, 0.0));
    strike_all(&mut s, &[0, 1]);
    s.advance(2.0);
    assert_eq!(s.result(), Some(GameResult::Defeat));

    s.resume();
    s.propose_peace();
    s.quit();
    s.advance(100.0);

    assert_eq!(s.state(), GameState::GameOver);
    assert_eq!(s.result(), Some(GameResult::Defeat));
    assert!(s.launch("STRIKE", TargetId(2)).is_err());
}

#[test]
fn test_peace_probe_waits_for_late_game() {
    // Neither side can hurt the other, so only the probe can end the war.
    let mut s = GameSession::new(board(1.0, 1.0), SessionConfig::default()).unwrap();

    for _ in 0..200 {
        s.take_ai_turn();
        s.advance(50.0);
        if s.state() == GameState::Peace {
            break;
        }
        assert_eq!(s.state(), GameState::Playing);
    }

    assert_eq!(s.state(), GameState::Peace);
    assert_eq!(s.result(), Some(GameResult::Peace));
    assert!(s.time().turn > 20, "peace came on turn {}", s.time().turn);
    assert!(s.missiles().active().is_empty());
}

fn scripted_war(seed: u64) -> (String, String) {
    let mut s = GameSession::new(
        GameConfig::default(),
        SessionConfig {
            seed,
            difficulty: Difficulty::Hard,
            ..Default::default()
        },
    )
    .unwrap();
    let enemy = NationId::new("USSR");

    for _ in 0..40 {
        if s.state() != GameState::Playing {
            break;
        }
        if let Some(target) = s.targets().intact(Some(&enemy)).first().copied() {
            s.handle_command(PlayerCommand::Launch {
                missile_type: "ICBM".into(),
                target,
            });
        }
        for _ in 0..4 {
            s.handle_command(PlayerCommand::Advance { dt: 2.5 });
        }
        s.handle_command(PlayerCommand::AiTurn);
    }

    let stats = serde_json::to_string(&s.statistics()).unwrap();
    let events = serde_json::to_string(&s.drain_events()).unwrap();
    (stats, events)
}

#[test]
fn test_same_seed_same_war() {
    let (stats_a, events_a) = scripted_war(12345);
    let (stats_b, events_b) = scripted_war(12345);
    assert_eq!(stats_a, stats_b, "statistics diverged with same seed");
    assert_eq!(events_a, events_b, "events diverged with same seed");
}

#[test]
fn test_different_seeds_diverge() {
    let (stats_a, events_a) = scripted_war(111);
    let (stats_b, events_b) = scripted_war(222);
    assert!(stats_a != stats_b || events_a != events_b);
}
