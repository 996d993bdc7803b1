//! File-backed catalog stored as two JSON arrays in the data directory.

use super::{
    default_characters, default_monsters, validate_all, EntityCatalog, EntityTemplate, TemplateKind,
};
use crate::core::{GameError, Result, CHARACTERS_FILE, MONSTERS_FILE};
use crate::utils::persistence::{read_json, write_json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Catalog reading `characters.json` and `monsters.json`.
///
/// Files are re-read on every call so edits made between runs are picked up
/// without restarting.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    dir: PathBuf,
}

impl JsonCatalog {
    /// Opens the catalog in `dir`, seeding the stock roster for any file that
    /// does not exist yet. Existing files are never overwritten.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let catalog = Self {
            dir: dir.to_path_buf(),
        };

        for kind in [TemplateKind::Character, TemplateKind::Monster] {
            let path = catalog.path_for(kind);
            if !path.exists() {
                let templates = match kind {
                    TemplateKind::Character => default_characters(),
                    TemplateKind::Monster => default_monsters(),
                };
                write_json(&path, &templates)?;
                info!(path = %path.display(), count = templates.len(), "seeded {} catalog", kind);
            }
        }

        Ok(catalog)
    }

    fn path_for(&self, kind: TemplateKind) -> PathBuf {
        match kind {
            TemplateKind::Character => self.dir.join(CHARACTERS_FILE),
            TemplateKind::Monster => self.dir.join(MONSTERS_FILE),
        }
    }

    fn load(&self, kind: TemplateKind) -> Result<Vec<EntityTemplate>> {
        let templates: Vec<EntityTemplate> = read_json(&self.path_for(kind))?;
        if templates.is_empty() {
            return Err(GameError::EmptyCatalog { kind });
        }
        validate_all(&templates, kind)?;
        Ok(templates)
    }
}

impl EntityCatalog for JsonCatalog {
    fn character_templates(&self) -> Result<Vec<EntityTemplate>> {
        self.load(TemplateKind::Character)
    }

    fn monster_templates(&self) -> Result<Vec<EntityTemplate>> {
        self.load(TemplateKind::Monster)
    }
}
