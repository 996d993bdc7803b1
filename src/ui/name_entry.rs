use super::{render_controls, render_title};
use gauntlet::core::{PLAYER_NAME_MAX_LEN, PLAYER_NAME_MIN_LEN};
use gauntlet::scores::validate_player_name;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct NameEntryScreen {
    pub name_input: String,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl NameEntryScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            cursor_position: 0,
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Input label + field
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Rules
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        render_title(f, chunks[0], "New Game");

        f.render_widget(Paragraph::new("Player Name:"), chunks[2]);

        let input_area = Rect {
            x: chunks[2].x,
            y: chunks[2].y + 1,
            width: chunks[2].width,
            height: 3,
        };

        let input_text = {
            let chars: Vec<char> = self.name_input.chars().collect();
            let before: String = chars[..self.cursor_position].iter().collect();
            let after: String = chars[self.cursor_position..].iter().collect();
            format!("{}_{}", before, after)
        };

        let input_widget = Paragraph::new(input_text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let rules = Paragraph::new(format!(
            "• {}-{} characters",
            PLAYER_NAME_MIN_LEN, PLAYER_NAME_MAX_LEN
        ))
        .style(Style::default().fg(Color::Gray));
        f.render_widget(rules, chunks[4]);

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.trim().is_empty() {
            Line::from(Span::styled(
                "✓ Name is valid",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation_text), chunks[5]);

        render_controls(f, chunks[7], "[Enter] Choose Team    [Esc] Back");
    }

    pub fn handle_char_input(&mut self, c: char) {
        let byte_index = self.byte_index();
        self.name_input.insert(byte_index, c);
        self.cursor_position += 1;
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_index = self.byte_index();
            self.name_input.remove(byte_index);
            self.validate();
        }
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_player_name(&self.name_input).err();
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error.is_none() && !self.name_input.trim().is_empty()
    }

    pub fn get_name(&self) -> String {
        self.name_input.trim().to_string()
    }

    fn byte_index(&self) -> usize {
        self.name_input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.name_input.len(), |(i, _)| i)
    }
}
