use super::{render_controls, render_title};
use gauntlet::catalog::EntityTemplate;
use gauntlet::combat::CombatEntity;
use gauntlet::core::{Result, TEAM_SIZE};
use gauntlet::team::{Team, TeamBuilder};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Picks the team one member at a time. Picked characters leave the list.
pub struct TeamSelectScreen {
    pub player_name: String,
    pub selected_index: usize,
    builder: TeamBuilder,
    pub last_joined: Option<String>,
}

impl TeamSelectScreen {
    pub fn new(player_name: String, templates: Vec<EntityTemplate>) -> Result<Self> {
        Ok(Self {
            player_name,
            selected_index: 0,
            builder: TeamBuilder::new(templates)?,
            last_joined: None,
        })
    }

    pub fn available(&self) -> &[EntityTemplate] {
        self.builder.available()
    }

    pub fn chosen(&self) -> &[CombatEntity] {
        self.builder.chosen()
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.available().len() {
            self.selected_index += 1;
        }
    }

    /// Adds the highlighted character. Returns the finished team once the
    /// last slot is filled.
    pub fn confirm(&mut self) -> Result<Option<Team>> {
        let joined = self.builder.pick(self.selected_index + 1)?.name.clone();
        self.last_joined = Some(joined);
        self.selected_index = self
            .selected_index
            .min(self.available().len().saturating_sub(1));

        if self.builder.is_complete() {
            return self.builder.clone().finish().map(Some);
        }
        Ok(None)
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Last pick
                Constraint::Length(3), // Controls
            ])
            .split(area);

        render_title(
            f,
            chunks[0],
            &format!(
                "{}: build your team ({}/{})",
                self.player_name,
                self.chosen().len(),
                TEAM_SIZE
            ),
        );

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Available characters
                Constraint::Percentage(40), // Team so far
            ])
            .split(chunks[1]);

        self.draw_available(f, main_chunks[0]);
        self.draw_team(f, main_chunks[1]);

        if let Some(name) = &self.last_joined {
            let joined = Paragraph::new(Line::from(Span::styled(
                format!("{} has joined your team!", name),
                Style::default().fg(Color::Green),
            )));
            f.render_widget(joined, chunks[2]);
        }

        render_controls(f, chunks[3], "[↑↓] Navigate    [Enter] Recruit    [Esc] Back");
    }

    fn draw_available(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .available()
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let text = format!("{:>2}. {}", i + 1, template);
                if i == self.selected_index {
                    Line::from(Span::styled(
                        format!("> {}", text),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", text))
                }
            })
            .collect();

        let list = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Available Characters"),
        );
        f.render_widget(list, area);
    }

    fn draw_team(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = self
            .chosen()
            .iter()
            .map(|member| {
                Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(Color::Green)),
                    Span::styled(
                        member.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        "  {}/{}/{}",
                        member.attack,
                        member.defense,
                        member.max_hp()
                    )),
                ])
            })
            .collect();
        for _ in self.chosen().len()..TEAM_SIZE {
            lines.push(Line::from(Span::styled(
                "· empty slot",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let team = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Your Team (ATK/DEF/HP)"),
        );
        f.render_widget(team, area);
    }
}
