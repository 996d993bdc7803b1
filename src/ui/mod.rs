pub mod battle_scene;
pub mod game_over;
pub mod leaderboard;
pub mod main_menu;
pub mod name_entry;
pub mod team_select;

use gauntlet::scores::Score;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Green above two thirds, yellow above one third, red below.
pub fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Bold cyan centered heading used at the top of every screen.
pub fn render_title(frame: &mut Frame, area: Rect, text: &str) {
    let title = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

/// Gray centered key hints at the bottom of a screen.
pub fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, area);
}

/// Ranked score lines, or a placeholder when nobody has played yet.
pub fn score_lines(scores: &[Score]) -> Vec<Line<'static>> {
    if scores.is_empty() {
        return vec![Line::from(Span::styled(
            "No scores yet",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let medal_color = match i {
                0 => Color::Yellow,
                1 => Color::White,
                2 => Color::LightRed,
                _ => Color::Gray,
            };
            Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", i + 1),
                    Style::default().fg(medal_color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:<20}", score.player_name)),
                Span::styled(
                    format!("{:>4} waves", score.waves),
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_color_thresholds() {
        assert_eq!(hp_color(1.0), Color::Green);
        assert_eq!(hp_color(0.5), Color::Yellow);
        assert_eq!(hp_color(0.1), Color::Red);
        assert_eq!(hp_color(0.0), Color::Red);
    }

    #[test]
    fn test_score_lines_placeholder_when_empty() {
        assert_eq!(score_lines(&[]).len(), 1);
        let scores = vec![Score::new("Alice", 4), Score::new("Bob", 2)];
        assert_eq!(score_lines(&scores).len(), 2);
    }
}
