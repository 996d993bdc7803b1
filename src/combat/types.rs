use crate::catalog::EntityTemplate;
use crate::core::constants::MIN_DAMAGE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fighter in a run: one of the team's characters or the current monster.
///
/// `hp` only moves through [`take_damage`](Self::take_damage),
/// [`heal`](Self::heal) and [`reanimate`](Self::reanimate), which keeps it
/// inside `0..=max_hp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    hp: u32,
    max_hp: u32,
}

impl CombatEntity {
    pub fn new(name: impl Into<String>, attack: u32, defense: u32, max_hp: u32) -> Self {
        Self {
            name: name.into(),
            attack,
            defense,
            hp: max_hp,
            max_hp,
        }
    }

    /// Fresh fighter at full health; the template's hp becomes `max_hp`.
    pub fn from_template(template: &EntityTemplate) -> Self {
        Self::new(
            template.name.clone(),
            template.attack,
            template.defense,
            template.hp,
        )
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Fraction of health remaining, for gauges.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }

    /// Applies an incoming hit and returns the damage actually dealt.
    ///
    /// Defense is subtracted first, but a hit always lands for at least
    /// `MIN_DAMAGE`.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.saturating_sub(self.defense).max(MIN_DAMAGE);
        self.hp = self.hp.saturating_sub(actual);
        actual
    }

    /// Restores `floor(max_hp * fraction)` hp, capped at `max_hp`.
    /// Returns the hp actually restored. Does nothing for the dead.
    pub fn heal(&mut self, fraction: f64) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let amount = (self.max_hp as f64 * fraction).floor() as u32;
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Back to full health regardless of current state.
    pub fn reanimate(&mut self) {
        self.hp = self.max_hp;
    }
}

impl fmt::Display for CombatEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - ATK: {}, DEF: {}, HP: {}/{}",
            self.name, self.attack, self.defense, self.hp, self.max_hp
        )
    }
}
