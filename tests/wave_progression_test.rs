//! Wave progression integration tests
//!
//! Drives complete runs through the public API: team drafting, the wave
//! state machine, scoring, and score persistence.

use gauntlet::catalog::{default_characters, default_monsters, EntityTemplate};
use gauntlet::combat::{CombatEntity, RoundOutcome};
use gauntlet::core::GameError;
use gauntlet::scores::{MemoryScoreStore, ScoreStore};
use gauntlet::team::{create_team, Team};
use gauntlet::wave::{WaveController, WaveEvent, WavePhase};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// Always answers 0, so every random pick lands on the first candidate.
fn first_pick_rng() -> StepRng {
    StepRng::new(0, 0)
}

fn team_of(stats: [(u32, u32, u32); 3]) -> Team {
    let members = stats
        .iter()
        .enumerate()
        .map(|(i, &(attack, defense, hp))| {
            CombatEntity::new(format!("Hero{}", i + 1), attack, defense, hp)
        })
        .collect();
    Team::from_members(members).unwrap()
}

fn controller_with(team: Team, monsters: Vec<EntityTemplate>) -> WaveController {
    let mut controller = WaveController::new("Tester", monsters).unwrap();
    controller.assign_team(team).unwrap();
    controller
}

// ============================================================================
// Deterministic full run
// ============================================================================

#[test]
fn test_deterministic_run_scores_four_waves() {
    // Every wave the monster survives the first volley at 1 hp, lands one hit
    // on the first living member, then dies. Heals of 10% keep Hero1 going
    // for two waves; the weaker members fall in wave 5.
    let team = team_of([(10, 0, 50), (10, 0, 30), (10, 0, 20)]);
    let monsters = vec![EntityTemplate::new("Brute", 20, 0, 31)];
    let mut controller = controller_with(team, monsters);
    let mut rng = first_pick_rng();

    let score = controller.run_to_end(&mut rng).unwrap();

    assert_eq!(score.player_name, "Tester");
    assert_eq!(score.waves, 4);
    assert_eq!(controller.wave(), 5);
    assert_eq!(controller.phase(), WavePhase::RunEnded);
    assert!(!controller.team().unwrap().is_alive());
}

#[test]
fn test_deterministic_run_heals_between_waves() {
    let team = team_of([(10, 0, 50), (10, 0, 30), (10, 0, 20)]);
    let monsters = vec![EntityTemplate::new("Brute", 20, 0, 31)];
    let mut controller = controller_with(team, monsters);
    let mut rng = first_pick_rng();

    // Wave 1: two rounds, Hero1 takes one hit (50 -> 30)
    controller.step(&mut rng).unwrap();
    controller.step(&mut rng).unwrap();
    controller.step(&mut rng).unwrap();
    assert_eq!(controller.phase(), WavePhase::WaveWon);

    let WaveEvent::NextWave {
        wave, recoveries, ..
    } = controller.step(&mut rng).unwrap()
    else {
        panic!("expected the next wave after a win");
    };
    assert_eq!(wave, 2);

    // Hero1 recovers 5 of 50, the untouched members recover nothing
    let restored: Vec<u32> = recoveries.iter().map(|r| r.restored).collect();
    assert_eq!(restored, vec![5, 0, 0]);
    assert_eq!(controller.team().unwrap().members()[0].hp(), 35);
}

// ============================================================================
// Score matches the observed wins
// ============================================================================

#[test]
fn test_score_equals_number_of_wave_won_transitions() {
    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let team = create_team(default_characters(), |available, _| {
            1 + (seed as usize % available.len())
        })
        .unwrap();
        let mut controller = controller_with(team, default_monsters());

        let mut wins = 0;
        let score = loop {
            match controller.step(&mut rng).unwrap() {
                WaveEvent::Round(report) if report.outcome == RoundOutcome::MonsterDefeated => {
                    wins += 1
                }
                WaveEvent::RunEnded(score) => break score,
                _ => {}
            }
        };

        assert_eq!(score.waves, wins, "seed {}", seed);
        assert_eq!(score.waves, controller.wave() - 1, "seed {}", seed);
    }
}

#[test]
fn test_no_retaliation_in_a_winning_round() {
    let mut rng = create_test_rng();
    let team = create_team(default_characters(), |_, _| 1).unwrap();
    let mut controller = controller_with(team, default_monsters());

    let mut checked = 0;
    while controller.phase() != WavePhase::RunEnded {
        if let WaveEvent::Round(report) = controller.step(&mut rng).unwrap() {
            if report.outcome == RoundOutcome::MonsterDefeated {
                assert!(report.retaliation.is_none());
                checked += 1;
            }
        }
    }
    assert_eq!(checked, controller.waves_won());
}

// ============================================================================
// Reanimation rule
// ============================================================================

#[test]
fn test_reanimation_rule_revives_the_fallen_member() {
    let monsters = vec![EntityTemplate::new("Brute", 20, 0, 31)];
    let mut controller = WaveController::new("Tester", monsters)
        .unwrap()
        .with_reanimation(Some(1));
    controller
        .assign_team(team_of([(10, 0, 50), (10, 0, 30), (10, 0, 20)]))
        .unwrap();
    let mut rng = first_pick_rng();

    // Hero1 absorbs every hit and falls in the first round of wave 3
    let mut revivals = Vec::new();
    while controller.waves_won() < 3 || controller.phase() != WavePhase::WaveWon {
        if let WaveEvent::NextWave { reanimated, .. } = controller.step(&mut rng).unwrap() {
            revivals.push(reanimated);
        }
    }
    assert_eq!(revivals, vec![None, None]);
    assert!(!controller.team().unwrap().members()[0].is_alive());

    let WaveEvent::NextWave { reanimated, .. } = controller.step(&mut rng).unwrap() else {
        panic!("expected the next wave after a win");
    };
    assert_eq!(reanimated.as_deref(), Some("Hero1"));
    assert_eq!(controller.team().unwrap().members()[0].hp(), 50);
}

// ============================================================================
// Persistence of the result
// ============================================================================

#[test]
fn test_finished_runs_rank_on_the_leaderboard() {
    let mut store = MemoryScoreStore::new();
    let monsters = vec![EntityTemplate::new("Brute", 20, 0, 31)];

    for (name, hp) in [("Weak", 20u32), ("Strong", 50), ("Middle", 30)] {
        let mut controller =
            WaveController::new(name, monsters.clone()).unwrap();
        controller
            .assign_team(team_of([(10, 0, hp), (10, 0, hp), (10, 0, hp)]))
            .unwrap();
        controller.run_to_end(&mut first_pick_rng()).unwrap();
        controller.record_score(&mut store).unwrap();
    }

    let top = store.top_scores(3).unwrap();
    let names: Vec<&str> = top.iter().map(|s| s.player_name.as_str()).collect();
    assert_eq!(names, vec!["Strong", "Middle", "Weak"]);
    assert!(top.windows(2).all(|w| w[0].waves >= w[1].waves));
}

#[test]
fn test_recording_before_the_end_is_rejected() {
    let mut store = MemoryScoreStore::new();
    let team = create_team(default_characters(), |_, _| 1).unwrap();
    let controller = controller_with(team, default_monsters());

    let err = controller.record_score(&mut store).unwrap_err();
    assert!(matches!(err, GameError::InvalidTransition { .. }));
    assert!(store.is_empty());
}
