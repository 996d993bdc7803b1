use super::{render_controls, render_title, score_lines};
use gauntlet::scores::Score;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// End-of-run summary. The score is shown even when saving it failed.
pub struct GameOverScreen {
    pub score: Score,
    pub save_error: Option<String>,
    pub top_scores: Vec<Score>,
}

impl GameOverScreen {
    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Final score
                Constraint::Length(1), // Save status
                Constraint::Length(1), // Spacer
                Constraint::Min(5),    // Top scores
                Constraint::Length(3), // Controls
            ])
            .split(area);

        render_title(f, chunks[0], "Game Over! Your team has been defeated!");

        let score = Paragraph::new(Line::from(vec![
            Span::raw(format!("{}, your final score: ", self.score.player_name)),
            Span::styled(
                format!("{} waves", self.score.waves),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(score, chunks[1]);

        let status = match &self.save_error {
            None => Line::from(Span::styled(
                "✓ Score saved",
                Style::default().fg(Color::Green),
            )),
            Some(error) => Line::from(Span::styled(
                format!("✗ Could not save score: {}", error),
                Style::default().fg(Color::Red),
            )),
        };
        f.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[2]);

        let board = Paragraph::new(score_lines(&self.top_scores))
            .block(Block::default().borders(Borders::ALL).title("Top Scores"));
        f.render_widget(board, chunks[4]);

        render_controls(f, chunks[5], "[Enter] Main Menu");
    }
}
