//! Wave progression: the run's state machine from team assignment to score.
//!
//! ```text
//! Idle -> TeamReady -> WaveInProgress -> WaveWon  -> WaveInProgress ...
//!                                     -> Defeated -> RunEnded
//! ```
//!
//! Every transition happens inside [`WaveController::step`], one at a time,
//! so a frontend can pace and render each event as it comes.

use crate::catalog::{EntityTemplate, TemplateKind};
use crate::combat::{resolve_round, CombatEntity, RoundOutcome, RoundReport};
use crate::core::{GameError, Result, FIRST_WAVE};
use crate::scores::{Score, ScoreStore};
use crate::team::{heal_team, reanimate_random_dead, Recovery, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    Idle,
    TeamReady,
    WaveInProgress,
    WaveWon,
    Defeated,
    RunEnded,
}

/// What a single [`WaveController::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveEvent {
    /// The first monster of the run appeared.
    WaveStarted { wave: u32, monster: String },
    /// One round was fought; see the report's outcome for where it led.
    Round(RoundReport),
    /// The team rested and the next monster appeared.
    NextWave {
        wave: u32,
        monster: String,
        recoveries: Vec<Recovery>,
        reanimated: Option<String>,
    },
    /// The team fell; the run is over.
    RunEnded(Score),
}

pub struct WaveController {
    player_name: String,
    monsters: Vec<EntityTemplate>,
    team: Option<Team>,
    monster: Option<CombatEntity>,
    wave: u32,
    waves_won: u32,
    phase: WavePhase,
    reanimate_every: Option<u32>,
}

impl WaveController {
    /// New run for `player_name`, drawing monsters from `monsters`.
    pub fn new(player_name: impl Into<String>, monsters: Vec<EntityTemplate>) -> Result<Self> {
        if monsters.is_empty() {
            return Err(GameError::EmptyCatalog {
                kind: TemplateKind::Monster,
            });
        }
        Ok(Self {
            player_name: player_name.into(),
            monsters,
            team: None,
            monster: None,
            wave: 0,
            waves_won: 0,
            phase: WavePhase::Idle,
            reanimate_every: None,
        })
    }

    /// Revive one fallen member after every `every` waves won.
    /// `None` or `Some(0)` turns the rule off.
    pub fn with_reanimation(mut self, every: Option<u32>) -> Self {
        self.reanimate_every = every.filter(|&n| n > 0);
        self
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Current wave number, starting at 1 once the run begins.
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn waves_won(&self) -> u32 {
        self.waves_won
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn monster(&self) -> Option<&CombatEntity> {
        self.monster.as_ref()
    }

    /// `Idle -> TeamReady`.
    pub fn assign_team(&mut self, team: Team) -> Result<()> {
        self.expect_phase(WavePhase::Idle, "assign a team")?;
        self.team = Some(team);
        self.phase = WavePhase::TeamReady;
        Ok(())
    }

    /// Performs the next transition and reports it.
    pub fn step(&mut self, rng: &mut impl Rng) -> Result<WaveEvent> {
        match self.phase {
            WavePhase::TeamReady => self.start(rng),
            WavePhase::WaveInProgress => self.fight_round(rng),
            WavePhase::WaveWon => self.advance_wave(rng),
            WavePhase::Defeated => Ok(self.end_run()),
            WavePhase::Idle | WavePhase::RunEnded => Err(GameError::InvalidTransition {
                phase: self.phase,
                action: "step",
            }),
        }
    }

    /// Steps until the run ends and returns the final score.
    pub fn run_to_end(&mut self, rng: &mut impl Rng) -> Result<Score> {
        loop {
            if let WaveEvent::RunEnded(score) = self.step(rng)? {
                return Ok(score);
            }
        }
    }

    /// The run's result, available once it has ended.
    pub fn final_score(&self) -> Option<Score> {
        (self.phase == WavePhase::RunEnded)
            .then(|| Score::new(self.player_name.clone(), self.waves_won))
    }

    /// Persists the final score. On failure the score is still available
    /// from [`final_score`](Self::final_score).
    pub fn record_score<S: ScoreStore + ?Sized>(&self, store: &mut S) -> Result<Score> {
        let score = self.final_score().ok_or(GameError::InvalidTransition {
            phase: self.phase,
            action: "record the score",
        })?;
        store.append_score(&score)?;
        info!(player = %score.player_name, waves = score.waves, "score recorded");
        Ok(score)
    }

    fn expect_phase(&self, expected: WavePhase, action: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    fn draw_monster(&self, rng: &mut impl Rng) -> Result<CombatEntity> {
        self.monsters
            .choose(rng)
            .map(CombatEntity::from_template)
            .ok_or(GameError::EmptyCatalog {
                kind: TemplateKind::Monster,
            })
    }

    /// `TeamReady -> WaveInProgress`.
    fn start(&mut self, rng: &mut impl Rng) -> Result<WaveEvent> {
        let monster = self.draw_monster(rng)?;
        let name = monster.name.clone();
        self.wave = FIRST_WAVE;
        self.monster = Some(monster);
        self.phase = WavePhase::WaveInProgress;

        debug!(player = %self.player_name, wave = self.wave, monster = %name, "run started");
        Ok(WaveEvent::WaveStarted {
            wave: self.wave,
            monster: name,
        })
    }

    /// One round inside `WaveInProgress`.
    fn fight_round(&mut self, rng: &mut impl Rng) -> Result<WaveEvent> {
        let (Some(team), Some(monster)) = (self.team.as_mut(), self.monster.as_mut()) else {
            return Err(GameError::InvalidTransition {
                phase: self.phase,
                action: "fight without a team and a monster",
            });
        };

        let report = resolve_round(team, monster, rng)?;
        match report.outcome {
            RoundOutcome::Continue => {}
            RoundOutcome::MonsterDefeated => {
                self.waves_won += 1;
                self.phase = WavePhase::WaveWon;
                debug!(wave = self.wave, monster = %monster.name, "wave won");
            }
            RoundOutcome::TeamWiped => {
                self.phase = WavePhase::Defeated;
                debug!(wave = self.wave, monster = %monster.name, "team wiped");
            }
        }
        Ok(WaveEvent::Round(report))
    }

    /// `WaveWon -> WaveInProgress`: rest, count the wave, bring the next monster.
    fn advance_wave(&mut self, rng: &mut impl Rng) -> Result<WaveEvent> {
        let monster = self.draw_monster(rng)?;
        let reanimate_now = self
            .reanimate_every
            .is_some_and(|every| self.waves_won % every == 0);

        let Some(team) = self.team.as_mut() else {
            return Err(GameError::InvalidTransition {
                phase: self.phase,
                action: "advance without a team",
            });
        };

        let recoveries = heal_team(team);
        let reanimated = if reanimate_now {
            reanimate_random_dead(team, rng)
        } else {
            None
        };

        self.wave += 1;
        let name = monster.name.clone();
        self.monster = Some(monster);
        self.phase = WavePhase::WaveInProgress;

        debug!(wave = self.wave, monster = %name, healed = recoveries.len(), "next wave");
        Ok(WaveEvent::NextWave {
            wave: self.wave,
            monster: name,
            recoveries,
            reanimated,
        })
    }

    /// `Defeated -> RunEnded`. The score is the last wave fully cleared.
    fn end_run(&mut self) -> WaveEvent {
        debug_assert_eq!(self.waves_won, self.wave - FIRST_WAVE);
        self.phase = WavePhase::RunEnded;
        let score = Score::new(self.player_name.clone(), self.waves_won);
        debug!(player = %score.player_name, waves = score.waves, "run ended");
        WaveEvent::RunEnded(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::MemoryScoreStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::{Arc, Mutex};

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn team(attack: u32, defense: u32, hp: u32) -> Team {
        Team::from_members(
            (1..=3)
                .map(|i| CombatEntity::new(format!("Hero{}", i), attack, defense, hp))
                .collect(),
        )
        .unwrap()
    }

    fn ready_controller(monsters: Vec<EntityTemplate>, team: Team) -> WaveController {
        let mut controller = WaveController::new("Tester", monsters).unwrap();
        controller.assign_team(team).unwrap();
        controller
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_monster_catalog_is_rejected() {
        let result = WaveController::new("Tester", vec![]);
        assert!(matches!(
            result,
            Err(GameError::EmptyCatalog {
                kind: TemplateKind::Monster
            })
        ));
    }

    #[test]
    fn test_step_before_team_is_invalid() {
        let mut controller =
            WaveController::new("Tester", vec![EntityTemplate::new("Slime", 1, 0, 1)]).unwrap();
        let err = controller.step(&mut create_test_rng()).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTransition {
                phase: WavePhase::Idle,
                ..
            }
        ));
    }

    #[test]
    fn test_team_can_only_be_assigned_once() {
        let mut controller = ready_controller(vec![EntityTemplate::new("Slime", 1, 0, 1)], team(1, 0, 1));
        assert!(controller.assign_team(team(1, 0, 1)).is_err());
        assert_eq!(controller.phase(), WavePhase::TeamReady);
    }

    #[test]
    fn test_start_enters_wave_one() {
        let mut controller = ready_controller(vec![EntityTemplate::new("Slime", 1, 0, 50)], team(1, 0, 10));

        let event = controller.step(&mut create_test_rng()).unwrap();

        assert_eq!(
            event,
            WaveEvent::WaveStarted {
                wave: 1,
                monster: "Slime".to_string()
            }
        );
        assert_eq!(controller.phase(), WavePhase::WaveInProgress);
        assert_eq!(controller.monster().unwrap().hp(), 50);
    }

    #[test]
    fn test_won_wave_heals_and_draws_next_monster() {
        // Monster survives round one, retaliates, then dies in round two.
        let monsters = vec![EntityTemplate::new("Slime", 30, 0, 31)];
        let mut controller = ready_controller(monsters, team(10, 0, 100));
        let mut rng = create_test_rng();

        controller.step(&mut rng).unwrap();
        let first = controller.step(&mut rng).unwrap();
        assert!(matches!(first, WaveEvent::Round(ref r) if r.outcome == RoundOutcome::Continue));
        let second = controller.step(&mut rng).unwrap();
        assert!(matches!(second, WaveEvent::Round(ref r) if r.outcome == RoundOutcome::MonsterDefeated));
        assert_eq!(controller.phase(), WavePhase::WaveWon);
        assert_eq!(controller.waves_won(), 1);

        let next = controller.step(&mut rng).unwrap();
        let WaveEvent::NextWave { wave, recoveries, reanimated, .. } = next else {
            panic!("expected NextWave");
        };
        assert_eq!(wave, 2);
        assert_eq!(controller.wave(), 2);
        assert_eq!(reanimated, None);
        // The one wounded member went 100 -> 70 -> 80
        let wounded: Vec<&Recovery> = recoveries.iter().filter(|r| r.restored > 0).collect();
        assert_eq!(wounded.len(), 1);
        assert_eq!(wounded[0].restored, 10);
        assert_eq!(controller.monster().unwrap().hp(), 31);
        assert_eq!(controller.phase(), WavePhase::WaveInProgress);
    }

    #[test]
    fn test_defeat_ends_run_with_waves_won() {
        let monsters = vec![EntityTemplate::new("Behemoth", 1000, 0, 10_000)];
        let mut controller = ready_controller(monsters, team(1, 0, 10));
        let mut rng = create_test_rng();

        let score = controller.run_to_end(&mut rng).unwrap();

        assert_eq!(score, Score::new("Tester", 0));
        assert_eq!(controller.phase(), WavePhase::RunEnded);
        assert_eq!(controller.final_score(), Some(score));
        assert!(controller.step(&mut rng).is_err());
    }

    #[test]
    fn test_score_counts_every_won_wave() {
        let monsters = vec![
            EntityTemplate::new("Goblin", 18, 6, 150),
            EntityTemplate::new("Orc", 22, 8, 180),
            EntityTemplate::new("Dragon", 25, 12, 200),
        ];
        let mut controller = ready_controller(monsters, team(20, 5, 80));
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let mut waves_won_seen = 0;
        let score = loop {
            match controller.step(&mut rng).unwrap() {
                WaveEvent::Round(report) if report.outcome == RoundOutcome::MonsterDefeated => {
                    waves_won_seen += 1;
                }
                WaveEvent::RunEnded(score) => break score,
                _ => {}
            }
        };

        assert_eq!(score.waves, waves_won_seen);
        assert_eq!(controller.wave(), waves_won_seen + 1);
    }

    #[test]
    fn test_reanimation_rule_revives_after_won_wave() {
        // Round one: 30 damage, monster at 1 hp, one-shots a member.
        // Round two: a survivor finishes it.
        let monsters = vec![EntityTemplate::new("Reaper", 500, 0, 31)];
        let mut controller =
            ready_controller(monsters, team(10, 0, 50)).with_reanimation(Some(1));
        let mut rng = create_test_rng();

        controller.step(&mut rng).unwrap();
        controller.step(&mut rng).unwrap();
        controller.step(&mut rng).unwrap();
        assert_eq!(controller.team().unwrap().alive_count(), 2);

        let event = controller.step(&mut rng).unwrap();
        let WaveEvent::NextWave { reanimated, .. } = event else {
            panic!("expected NextWave");
        };
        assert!(reanimated.is_some());
        assert_eq!(controller.team().unwrap().alive_count(), 3);
    }

    #[test]
    fn test_reanimation_off_by_default_and_for_zero() {
        let monsters = vec![EntityTemplate::new("Reaper", 500, 0, 31)];
        let mut controller = ready_controller(monsters, team(10, 0, 50)).with_reanimation(Some(0));
        let mut rng = create_test_rng();

        for _ in 0..3 {
            controller.step(&mut rng).unwrap();
        }
        let WaveEvent::NextWave { reanimated, .. } = controller.step(&mut rng).unwrap() else {
            panic!("expected NextWave");
        };
        assert_eq!(reanimated, None);
        assert_eq!(controller.team().unwrap().alive_count(), 2);
    }

    #[test]
    fn test_whole_run_logs_a_single_info_line() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let monsters = vec![EntityTemplate::new("Brute", 20, 0, 31)];
            let mut controller = ready_controller(monsters, team(10, 0, 50));
            let mut store = MemoryScoreStore::new();
            controller.run_to_end(&mut create_test_rng()).unwrap();
            controller.record_score(&mut store).unwrap();
        });

        // Waves, wipes and the run end stay at debug; only the save is info
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1, "{output}");
        assert!(lines[0].contains("score recorded"));
    }

    #[test]
    fn test_record_score_only_after_run_end() {
        let monsters = vec![EntityTemplate::new("Behemoth", 1000, 0, 10_000)];
        let mut controller = ready_controller(monsters, team(1, 0, 10));
        let mut store = MemoryScoreStore::new();

        assert!(controller.record_score(&mut store).is_err());
        assert!(store.is_empty());

        controller.run_to_end(&mut create_test_rng()).unwrap();
        let saved = controller.record_score(&mut store).unwrap();

        assert_eq!(saved.waves, 0);
        assert_eq!(store.top_scores(3).unwrap(), vec![saved]);
    }
}
