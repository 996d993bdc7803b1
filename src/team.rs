//! Team assembly and between-wave upkeep.

use crate::catalog::{EntityTemplate, TemplateKind};
use crate::combat::CombatEntity;
use crate::core::{GameError, Result, BETWEEN_WAVE_HEAL_FRACTION, TEAM_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// The player's three fighters. Membership and order are fixed once built;
/// only hp changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    members: Vec<CombatEntity>,
}

impl Team {
    pub fn from_members(members: Vec<CombatEntity>) -> Result<Self> {
        if members.len() != TEAM_SIZE {
            return Err(GameError::TeamSize {
                expected: TEAM_SIZE,
                actual: members.len(),
            });
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[CombatEntity] {
        &self.members
    }

    /// Mutable access to members. A slice, so nobody can add or drop one.
    pub fn members_mut(&mut self) -> &mut [CombatEntity] {
        &mut self.members
    }

    pub fn is_alive(&self) -> bool {
        self.members.iter().any(CombatEntity::is_alive)
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_alive()).count()
    }

    pub fn alive_indices(&self) -> Vec<usize> {
        self.indices_where(true)
    }

    pub fn dead_indices(&self) -> Vec<usize> {
        self.indices_where(false)
    }

    fn indices_where(&self, alive: bool) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_alive() == alive)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Step-by-step team selection.
///
/// Choices are 1-based positions into whatever is still available, and each
/// pick removes that template from the pool, so duplicates are impossible.
#[derive(Debug, Clone)]
pub struct TeamBuilder {
    available: Vec<EntityTemplate>,
    chosen: Vec<CombatEntity>,
}

impl TeamBuilder {
    pub fn new(templates: Vec<EntityTemplate>) -> Result<Self> {
        if templates.is_empty() {
            return Err(GameError::EmptyCatalog {
                kind: TemplateKind::Character,
            });
        }
        if templates.len() < TEAM_SIZE {
            return Err(GameError::CatalogTooSmall {
                kind: TemplateKind::Character,
                needed: TEAM_SIZE,
                available: templates.len(),
            });
        }
        Ok(Self {
            available: templates,
            chosen: Vec::with_capacity(TEAM_SIZE),
        })
    }

    pub fn available(&self) -> &[EntityTemplate] {
        &self.available
    }

    pub fn chosen(&self) -> &[CombatEntity] {
        &self.chosen
    }

    pub fn remaining_picks(&self) -> usize {
        TEAM_SIZE - self.chosen.len()
    }

    pub fn is_complete(&self) -> bool {
        self.chosen.len() == TEAM_SIZE
    }

    /// Moves the template at 1-based `choice` from the pool into the team.
    pub fn pick(&mut self, choice: usize) -> Result<&CombatEntity> {
        if self.is_complete() {
            return Err(GameError::TeamComplete);
        }
        if choice == 0 || choice > self.available.len() {
            return Err(GameError::SelectionOutOfRange {
                choice,
                available: self.available.len(),
            });
        }

        let template = self.available.remove(choice - 1);
        debug!(name = %template.name, slot = self.chosen.len() + 1, "character joined the team");
        self.chosen.push(CombatEntity::from_template(&template));
        Ok(&self.chosen[self.chosen.len() - 1])
    }

    pub fn finish(self) -> Result<Team> {
        Team::from_members(self.chosen)
    }
}

/// Builds a team by asking `choose` for each pick.
///
/// `choose` receives the remaining pool and the 1-based slot being filled,
/// and must answer with an in-range 1-based position.
pub fn create_team<F>(templates: Vec<EntityTemplate>, mut choose: F) -> Result<Team>
where
    F: FnMut(&[EntityTemplate], usize) -> usize,
{
    let mut builder = TeamBuilder::new(templates)?;
    while !builder.is_complete() {
        let slot = builder.chosen().len() + 1;
        let choice = choose(builder.available(), slot);
        builder.pick(choice)?;
    }
    builder.finish()
}

/// Hp restored to one member by [`heal_team`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub name: String,
    pub restored: u32,
}

/// Between-wave rest: every living member recovers a tenth of its max hp.
/// The dead stay dead.
pub fn heal_team(team: &mut Team) -> Vec<Recovery> {
    team.members_mut()
        .iter_mut()
        .filter(|m| m.is_alive())
        .map(|m| Recovery {
            restored: m.heal(BETWEEN_WAVE_HEAL_FRACTION),
            name: m.name.clone(),
        })
        .collect()
}

/// Brings one random fallen member back at full hp and returns its name.
/// `None` when nobody is dead; the team is left untouched in that case.
pub fn reanimate_random_dead(team: &mut Team, rng: &mut impl Rng) -> Option<String> {
    let dead = team.dead_indices();
    let &index = dead.choose(rng)?;

    let member = &mut team.members_mut()[index];
    member.reanimate();
    debug!(name = %member.name, hp = member.hp(), "team member reanimated");
    Some(member.name.clone())
}

/// Whether the team can still fight: at least one member has hp left.
/// Free-function form of [`Team::is_alive`], used by round resolution.
pub fn is_team_alive(team: &Team) -> bool {
    team.is_alive()
}
