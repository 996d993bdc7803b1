//! Persistence integration tests
//!
//! A full session against a temporary data directory: catalog seeding,
//! hand-edited catalogs, and the score file across store reopenings.

use gauntlet::catalog::{EntityCatalog, EntityTemplate, JsonCatalog, TemplateKind};
use gauntlet::core::{GameError, CHARACTERS_FILE, MONSTERS_FILE, SCORES_FILE};
use gauntlet::scores::{JsonScoreStore, ScoreStore};
use gauntlet::team::create_team;
use gauntlet::wave::WaveController;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;

// ============================================================================
// Full session
// ============================================================================

#[test]
fn test_played_run_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = JsonCatalog::open(dir.path()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    let team = create_team(catalog.character_templates().unwrap(), |_, _| 1).unwrap();
    let mut controller = WaveController::new("Alice", catalog.monster_templates().unwrap()).unwrap();
    controller.assign_team(team).unwrap();
    let score = controller.run_to_end(&mut rng).unwrap();

    {
        let mut store = JsonScoreStore::open(dir.path()).unwrap();
        controller.record_score(&mut store).unwrap();
    }

    let reopened = JsonScoreStore::open(dir.path()).unwrap();
    assert_eq!(reopened.top_scores(3).unwrap(), vec![score]);
}

#[test]
fn test_scores_accumulate_without_dedup() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonScoreStore::open(dir.path()).unwrap();

    for waves in [2, 7, 7, 1] {
        store
            .append_score(&gauntlet::scores::Score::new("Bob", waves))
            .unwrap();
    }

    let content = fs::read_to_string(dir.path().join(SCORES_FILE)).unwrap();
    assert_eq!(content.lines().count(), 4);

    let top: Vec<u32> = store.top_scores(3).unwrap().iter().map(|s| s.waves).collect();
    assert_eq!(top, vec![7, 7, 2]);
}

// ============================================================================
// Catalog files
// ============================================================================

#[test]
fn test_hand_edited_catalog_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let custom = vec![
        EntityTemplate::new("Squire", 5, 1, 40),
        EntityTemplate::new("Mage", 9, 0, 25),
        EntityTemplate::new("Cleric", 4, 3, 50),
    ];
    fs::write(
        dir.path().join(CHARACTERS_FILE),
        serde_json::to_string_pretty(&custom).unwrap(),
    )
    .unwrap();

    let catalog = JsonCatalog::open(dir.path()).unwrap();

    assert_eq!(catalog.character_templates().unwrap(), custom);
    // The missing monster file gets the stock roster
    assert_eq!(catalog.monster_templates().unwrap().len(), 10);
}

#[test]
fn test_emptied_monster_catalog_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = JsonCatalog::open(dir.path()).unwrap();
    fs::write(dir.path().join(MONSTERS_FILE), "[]").unwrap();

    let err = catalog.monster_templates().unwrap_err();
    assert!(matches!(
        err,
        GameError::EmptyCatalog {
            kind: TemplateKind::Monster
        }
    ));
}

#[test]
fn test_invalid_template_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = JsonCatalog::open(dir.path()).unwrap();
    fs::write(
        dir.path().join(MONSTERS_FILE),
        r#"[{"name": "Ghost", "attack": 0, "defense": 5, "hp": 30}]"#,
    )
    .unwrap();

    let err = catalog.monster_templates().unwrap_err();
    assert!(matches!(err, GameError::InvalidTemplate { .. }));
}
