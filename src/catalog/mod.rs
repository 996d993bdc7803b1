//! Character and monster templates.
//!
//! The catalog is read-only from the game's point of view: every call hands
//! out a fresh snapshot, and fighters are instantiated from those copies.

pub mod defaults;
pub mod json;

pub use defaults::{default_characters, default_monsters};
pub use json::JsonCatalog;

use crate::core::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which list a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Character,
    Monster,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Character => write!(f, "character"),
            TemplateKind::Monster => write!(f, "monster"),
        }
    }
}

/// Stat block as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, attack: u32, defense: u32, hp: u32) -> Self {
        Self {
            name: name.into(),
            attack,
            defense,
            hp,
        }
    }

    /// Rejects templates that could not produce a valid fighter.
    pub fn validate(&self, kind: TemplateKind) -> Result<()> {
        let reason = if self.name.trim().is_empty() {
            "name is empty"
        } else if self.attack == 0 {
            "attack must be at least 1"
        } else if self.hp == 0 {
            "hp must be at least 1"
        } else {
            return Ok(());
        };

        Err(GameError::InvalidTemplate {
            kind,
            name: self.name.clone(),
            reason,
        })
    }
}

impl fmt::Display for EntityTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - ATK: {}, DEF: {}, HP: {}",
            self.name, self.attack, self.defense, self.hp
        )
    }
}

/// Source of template snapshots.
pub trait EntityCatalog {
    fn character_templates(&self) -> Result<Vec<EntityTemplate>>;

    fn monster_templates(&self) -> Result<Vec<EntityTemplate>>;

    fn templates(&self, kind: TemplateKind) -> Result<Vec<EntityTemplate>> {
        match kind {
            TemplateKind::Character => self.character_templates(),
            TemplateKind::Monster => self.monster_templates(),
        }
    }
}

/// Catalog held entirely in memory. Used by tests and the simulator.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    characters: Vec<EntityTemplate>,
    monsters: Vec<EntityTemplate>,
}

impl MemoryCatalog {
    pub fn new(characters: Vec<EntityTemplate>, monsters: Vec<EntityTemplate>) -> Result<Self> {
        validate_all(&characters, TemplateKind::Character)?;
        validate_all(&monsters, TemplateKind::Monster)?;
        Ok(Self {
            characters,
            monsters,
        })
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self {
            characters: default_characters(),
            monsters: default_monsters(),
        }
    }
}

impl EntityCatalog for MemoryCatalog {
    fn character_templates(&self) -> Result<Vec<EntityTemplate>> {
        Ok(self.characters.clone())
    }

    fn monster_templates(&self) -> Result<Vec<EntityTemplate>> {
        Ok(self.monsters.clone())
    }
}

/// Validates every template in a list. An empty list is not an error here;
/// callers that draw from the list report that themselves.
pub fn validate_all(templates: &[EntityTemplate], kind: TemplateKind) -> Result<()> {
    templates.iter().try_for_each(|t| t.validate(kind))
}
