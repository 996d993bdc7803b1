use super::{render_controls, render_title, score_lines};
use gauntlet::scores::Score;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the high score table. `error` replaces the table when the store
/// could not be read.
pub fn draw_leaderboard(f: &mut Frame, area: Rect, scores: &[Score], error: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Table
            Constraint::Length(3), // Controls
        ])
        .split(area);

    render_title(f, chunks[0], "High Scores");

    let lines = match error {
        Some(error) => vec![Line::styled(
            format!("Could not load scores: {}", error),
            Style::default().fg(Color::Red),
        )],
        None => score_lines(scores),
    };
    let table =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Leaderboard"));
    f.render_widget(table, chunks[1]);

    render_controls(f, chunks[2], "[Enter/Esc] Main Menu");
}
