//! Interactive terminal game: screen state machine and event loop.

use crate::ui::battle_scene::{draw_battle_scene, CombatLog};
use crate::ui::game_over::GameOverScreen;
use crate::ui::leaderboard::draw_leaderboard;
use crate::ui::main_menu::{MainMenuScreen, MenuChoice};
use crate::ui::name_entry::NameEntryScreen;
use crate::ui::team_select::TeamSelectScreen;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use gauntlet::catalog::EntityCatalog;
use gauntlet::core::{Result, LEADERBOARD_SIZE, TICK_INTERVAL_MS};
use gauntlet::scores::{Score, ScoreStore};
use gauntlet::team::Team;
use gauntlet::wave::{WaveController, WaveEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Options for an interactive session.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub round_delay: Duration,
    pub reanimate_every: Option<u32>,
    pub seed: Option<u64>,
}

enum Screen {
    MainMenu(MainMenuScreen),
    NameEntry(NameEntryScreen),
    TeamSelect(TeamSelectScreen),
    Battle {
        controller: WaveController,
        log: CombatLog,
        last_step: Instant,
    },
    GameOver(GameOverScreen),
    Leaderboard {
        scores: Vec<Score>,
        error: Option<String>,
    },
}

/// Owns the catalog, the score store and the rng for one session.
pub struct App<'a, C: EntityCatalog, S: ScoreStore> {
    catalog: &'a C,
    store: &'a mut S,
    options: PlayOptions,
    rng: ChaCha8Rng,
    screen: Screen,
    should_quit: bool,
}

impl<'a, C: EntityCatalog, S: ScoreStore> App<'a, C, S> {
    pub fn new(catalog: &'a C, store: &'a mut S, options: PlayOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            catalog,
            store,
            options,
            rng,
            screen: Screen::MainMenu(MainMenuScreen::new()),
            should_quit: false,
        }
    }

    /// Takes over the terminal until the player quits.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| {
                let area = f.size();
                match &self.screen {
                    Screen::MainMenu(menu) => menu.draw(f, area),
                    Screen::NameEntry(entry) => entry.draw(f, area),
                    Screen::TeamSelect(select) => select.draw(f, area),
                    Screen::Battle {
                        controller, log, ..
                    } => draw_battle_scene(f, area, controller, log),
                    Screen::GameOver(over) => over.draw(f, area),
                    Screen::Leaderboard { scores, error } => {
                        draw_leaderboard(f, area, scores, error.as_deref())
                    }
                }
            })?;

            if event::poll(Duration::from_millis(TICK_INTERVAL_MS))? {
                if let Event::Key(key_event) = event::read()? {
                    if key_event.kind == KeyEventKind::Press {
                        self.handle_key(key_event.code)?;
                    }
                }
            }

            self.advance_battle()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match &mut self.screen {
            Screen::MainMenu(menu) => match code {
                KeyCode::Up => menu.move_up(),
                KeyCode::Down => menu.move_down(),
                KeyCode::Char('1') => self.select_menu(MenuChoice::NewGame),
                KeyCode::Char('2') => self.select_menu(MenuChoice::Leaderboard),
                KeyCode::Char('3') | KeyCode::Char('q') | KeyCode::Esc => {
                    self.select_menu(MenuChoice::Quit)
                }
                KeyCode::Enter => {
                    let choice = menu.selected();
                    self.select_menu(choice);
                }
                _ => {}
            },

            Screen::NameEntry(entry) => match code {
                KeyCode::Char(c) => entry.handle_char_input(c),
                KeyCode::Backspace => entry.handle_backspace(),
                KeyCode::Enter => {
                    entry.validate();
                    if entry.is_valid() {
                        let name = entry.get_name();
                        match self
                            .catalog
                            .character_templates()
                            .and_then(|templates| TeamSelectScreen::new(name, templates))
                        {
                            Ok(select) => self.screen = Screen::TeamSelect(select),
                            Err(e) => {
                                warn!(error = %e, "cannot start team selection");
                                entry.validation_error = Some(e.to_string());
                            }
                        }
                    }
                }
                KeyCode::Esc => self.screen = Screen::MainMenu(MainMenuScreen::new()),
                _ => {}
            },

            Screen::TeamSelect(select) => match code {
                KeyCode::Up => select.move_up(),
                KeyCode::Down => select.move_down(),
                KeyCode::Enter => {
                    if let Some(team) = select.confirm()? {
                        let player_name = select.player_name.clone();
                        self.start_battle(player_name, team)?;
                    }
                }
                KeyCode::Esc => self.screen = Screen::MainMenu(MainMenuScreen::new()),
                _ => {}
            },

            Screen::Battle { controller, .. } => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    info!(
                        player = controller.player_name(),
                        wave = controller.wave(),
                        "run abandoned"
                    );
                    self.screen = Screen::MainMenu(MainMenuScreen::new());
                }
            }

            Screen::GameOver(_) | Screen::Leaderboard { .. } => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.screen = Screen::MainMenu(MainMenuScreen::new());
                }
            }
        }
        Ok(())
    }

    fn select_menu(&mut self, choice: MenuChoice) {
        match choice {
            MenuChoice::NewGame => self.screen = Screen::NameEntry(NameEntryScreen::new()),
            MenuChoice::Leaderboard => {
                let (scores, error) = match self.store.top_scores(LEADERBOARD_SIZE) {
                    Ok(scores) => (scores, None),
                    Err(e) => {
                        warn!(error = %e, "failed to load leaderboard");
                        (Vec::new(), Some(e.to_string()))
                    }
                };
                self.screen = Screen::Leaderboard { scores, error };
            }
            MenuChoice::Quit => self.should_quit = true,
        }
    }

    fn start_battle(&mut self, player_name: String, team: Team) -> Result<()> {
        let monsters = self.catalog.monster_templates()?;
        let mut controller = WaveController::new(player_name, monsters)?
            .with_reanimation(self.options.reanimate_every);
        controller.assign_team(team)?;

        // Backdate so the first monster shows up without waiting a full round
        let last_step = Instant::now()
            .checked_sub(self.options.round_delay)
            .unwrap_or_else(Instant::now);
        self.screen = Screen::Battle {
            controller,
            log: CombatLog::new(),
            last_step,
        };
        Ok(())
    }

    /// Plays one controller step per round interval.
    fn advance_battle(&mut self) -> Result<()> {
        let Screen::Battle {
            controller,
            log,
            last_step,
        } = &mut self.screen
        else {
            return Ok(());
        };
        if last_step.elapsed() < self.options.round_delay {
            return Ok(());
        }
        *last_step = Instant::now();

        let event = controller.step(&mut self.rng)?;
        log.record(&event);

        if let WaveEvent::RunEnded(score) = event {
            // A failed save is shown on the game over screen; the score survives
            let save_error = controller.record_score(&mut *self.store).err().map(|e| {
                warn!(error = %e, player = %score.player_name, waves = score.waves, "failed to save score");
                e.to_string()
            });
            self.show_game_over(score, save_error);
        }
        Ok(())
    }

    fn show_game_over(&mut self, score: Score, save_error: Option<String>) {
        let top_scores = self.store.top_scores(LEADERBOARD_SIZE).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load leaderboard");
            Vec::new()
        });

        self.screen = Screen::GameOver(GameOverScreen {
            score,
            save_error,
            top_scores,
        });
    }
}
