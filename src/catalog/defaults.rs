//! Stock roster written to a fresh data directory.

use super::EntityTemplate;

/// (name, attack, defense, hp)
const CHARACTERS: [(&str, u32, u32, u32); 10] = [
    ("Paladin", 20, 12, 120),
    ("Knight", 22, 10, 110),
    ("Berserker", 28, 6, 90),
    ("Archer", 25, 7, 85),
    ("Sorcerer", 30, 4, 75),
    ("Warrior", 24, 8, 100),
    ("Monk", 22, 9, 95),
    ("Thief", 27, 5, 80),
    ("Hunter", 23, 8, 90),
    ("Druid", 21, 9, 100),
];

const MONSTERS: [(&str, u32, u32, u32); 10] = [
    ("Goblin", 18, 6, 150),
    ("Orc", 22, 8, 180),
    ("Dragon", 25, 12, 200),
    ("Zombie", 20, 7, 160),
    ("Troll", 23, 10, 190),
    ("Spectre", 24, 6, 170),
    ("Golem", 21, 14, 210),
    ("Vampire", 26, 9, 175),
    ("Werewolf", 24, 8, 185),
    ("Skeleton", 19, 7, 155),
];

fn build(table: &[(&str, u32, u32, u32)]) -> Vec<EntityTemplate> {
    table
        .iter()
        .map(|&(name, attack, defense, hp)| EntityTemplate::new(name, attack, defense, hp))
        .collect()
}

pub fn default_characters() -> Vec<EntityTemplate> {
    build(&CHARACTERS)
}

pub fn default_monsters() -> Vec<EntityTemplate> {
    build(&MONSTERS)
}
