use super::{render_controls, render_title};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    Leaderboard,
    Quit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 3] = [MenuChoice::NewGame, MenuChoice::Leaderboard, MenuChoice::Quit];

    fn label(self) -> &'static str {
        match self {
            MenuChoice::NewGame => "Start a new game",
            MenuChoice::Leaderboard => "View high scores",
            MenuChoice::Quit => "Quit",
        }
    }
}

pub struct MainMenuScreen {
    pub selected_index: usize,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn selected(&self) -> MenuChoice {
        MenuChoice::ALL[self.selected_index.min(MenuChoice::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < MenuChoice::ALL.len() {
            self.selected_index += 1;
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(5), // Options
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        render_title(f, chunks[0], "⚔ GAUNTLET ⚔");

        let options: Vec<Line> = MenuChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                if i == self.selected_index {
                    Line::from(Span::styled(
                        format!("> {}. {}", i + 1, choice.label()),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}. {}", i + 1, choice.label()))
                }
            })
            .collect();

        let menu = Paragraph::new(options).block(Block::default().borders(Borders::ALL));
        f.render_widget(menu, chunks[2]);

        render_controls(f, chunks[4], "[↑↓] Navigate    [Enter] Select    [Q] Quit");
    }
}
