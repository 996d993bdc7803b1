use super::hp_color;
use gauntlet::combat::{CombatEntity, RoundOutcome, Strike};
use gauntlet::core::COMBAT_LOG_CAPACITY;
use gauntlet::wave::{WaveController, WaveEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::collections::VecDeque;

/// Rolling combat log; the oldest lines scroll off the top.
pub struct CombatLog {
    lines: VecDeque<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(COMBAT_LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == COMBAT_LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn record(&mut self, event: &WaveEvent) {
        for line in event_lines(event) {
            self.push(line);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }
}

fn strike_line(strike: &Strike) -> String {
    format!(
        "{} hits {} for {} damage",
        strike.attacker, strike.target, strike.damage
    )
}

/// Log lines describing one controller step.
pub fn event_lines(event: &WaveEvent) -> Vec<String> {
    match event {
        WaveEvent::WaveStarted { wave, monster } => {
            vec![format!("Wave {}: a wild {} appears!", wave, monster)]
        }
        WaveEvent::Round(report) => {
            let mut lines: Vec<String> = report.team_strikes.iter().map(strike_line).collect();
            if let Some(retaliation) = &report.retaliation {
                lines.push(strike_line(retaliation));
                if retaliation.was_lethal() {
                    lines.push(format!("{} has fallen!", retaliation.target));
                }
            }
            match report.outcome {
                RoundOutcome::MonsterDefeated => {
                    if let Some(last) = report.team_strikes.last() {
                        lines.push(format!("Victory! {} is defeated!", last.target));
                    }
                }
                RoundOutcome::TeamWiped => {
                    lines.push("Your team has been wiped out!".to_string());
                }
                RoundOutcome::Continue => {}
            }
            lines
        }
        WaveEvent::NextWave {
            wave,
            monster,
            recoveries,
            reanimated,
        } => {
            let mut lines: Vec<String> = recoveries
                .iter()
                .filter(|r| r.restored > 0)
                .map(|r| format!("{} recovers {} HP", r.name, r.restored))
                .collect();
            if let Some(name) = reanimated {
                lines.push(format!("{} has been reanimated!", name));
            }
            lines.push(format!("Wave {}: a wild {} appears!", wave, monster));
            lines
        }
        WaveEvent::RunEnded(score) => {
            vec![format!("Game over! {} waves survived", score.waves)]
        }
    }
}

/// Draws the battle: team gauges on the left, the monster and the log on the right.
pub fn draw_battle_scene(
    frame: &mut Frame,
    area: Rect,
    controller: &WaveController,
    log: &CombatLog,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Arena
            Constraint::Length(1), // Controls
        ])
        .split(area);

    draw_header(frame, chunks[0], controller);

    let arena = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_team(frame, arena[0], controller);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Monster gauge
            Constraint::Min(0),    // Combat log
        ])
        .split(arena[1]);

    draw_monster(frame, right[0], controller.monster());
    draw_log(frame, right[1], log);

    super::render_controls(frame, chunks[2], "[Q] Abandon run");
}

fn draw_header(frame: &mut Frame, area: Rect, controller: &WaveController) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            controller.player_name().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Wave {}", controller.wave()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  |  Waves cleared: {}", controller.waves_won())),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_team(frame: &mut Frame, area: Rect, controller: &WaveController) {
    let block = Block::default().borders(Borders::ALL).title("Team");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(team) = controller.team() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            team.members()
                .iter()
                .map(|_| Constraint::Length(3))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (member, row) in team.members().iter().zip(rows.iter()) {
        draw_entity_gauge(frame, *row, member, hp_color(member.hp_ratio()));
    }
}

fn draw_monster(frame: &mut Frame, area: Rect, monster: Option<&CombatEntity>) {
    match monster {
        Some(monster) => draw_entity_gauge(frame, area, monster, Color::Red),
        None => {
            let waiting = Paragraph::new(Line::from(Span::styled(
                "Waiting for a monster...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )))
            .block(Block::default().borders(Borders::ALL).title("Monster"))
            .alignment(Alignment::Center);
            frame.render_widget(waiting, area);
        }
    }
}

fn draw_entity_gauge(frame: &mut Frame, area: Rect, entity: &CombatEntity, color: Color) {
    let title = format!(
        "{}  ATK {} DEF {}",
        entity.name, entity.attack, entity.defense
    );
    let (label, style) = if entity.is_alive() {
        (
            format!("{}/{}", entity.hp(), entity.max_hp()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    } else {
        ("fallen".to_string(), Style::default().fg(Color::DarkGray))
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(style)
        .label(label)
        .ratio(entity.hp_ratio().clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn draw_log(frame: &mut Frame, area: Rect, log: &CombatLog) {
    let lines: Vec<Line> = log
        .lines()
        .map(|line| {
            let color = if line.starts_with("Wave") {
                Color::Yellow
            } else if line.contains("fallen") || line.contains("wiped") {
                Color::Red
            } else if line.contains("recovers") || line.contains("reanimated") {
                Color::Green
            } else {
                Color::White
            };
            Line::from(Span::styled(line.clone(), Style::default().fg(color)))
        })
        .collect();

    let log_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Combat Log"));
    frame.render_widget(log_widget, area);
}
