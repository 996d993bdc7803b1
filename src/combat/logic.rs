use super::types::CombatEntity;
use crate::core::{GameError, Result};
use crate::team::{is_team_alive, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    MonsterDefeated,
    TeamWiped,
    Continue,
}

/// One landed hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    pub attacker: String,
    pub target: String,
    pub damage: u32,
    /// Target's hp after the hit.
    pub target_hp: u32,
}

impl Strike {
    pub fn was_lethal(&self) -> bool {
        self.target_hp == 0
    }
}

/// Everything that happened in one round, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub team_strikes: Vec<Strike>,
    pub retaliation: Option<Strike>,
    pub outcome: RoundOutcome,
}

fn strike(attacker: &CombatEntity, target: &mut CombatEntity) -> Strike {
    let damage = target.take_damage(attacker.attack);
    debug!(
        attacker = %attacker.name,
        target = %target.name,
        damage,
        target_hp = target.hp(),
        "strike"
    );
    Strike {
        attacker: attacker.name.clone(),
        target: target.name.clone(),
        damage,
        target_hp: target.hp(),
    }
}

/// Resolves one round between the team and a monster.
///
/// Living members attack in team order for as long as the monster stands.
/// If it survives all of them it hits back exactly once, at a living member
/// picked uniformly with `rng`. A monster killed mid-round never retaliates.
///
/// Returns an error instead of resolving if the team is already wiped or the
/// monster is already dead.
pub fn resolve_round(
    team: &mut Team,
    monster: &mut CombatEntity,
    rng: &mut impl Rng,
) -> Result<RoundReport> {
    if !is_team_alive(team) {
        return Err(GameError::TeamWiped);
    }
    if !monster.is_alive() {
        return Err(GameError::MonsterDefeated(monster.name.clone()));
    }

    let mut team_strikes = Vec::with_capacity(team.members().len());
    for member in team.members().iter().filter(|m| m.is_alive()) {
        if !monster.is_alive() {
            break;
        }
        team_strikes.push(strike(member, monster));
    }

    if !monster.is_alive() {
        return Ok(RoundReport {
            team_strikes,
            retaliation: None,
            outcome: RoundOutcome::MonsterDefeated,
        });
    }

    let alive = team.alive_indices();
    let &target = alive.choose(rng).ok_or(GameError::TeamWiped)?;
    let retaliation = strike(monster, &mut team.members_mut()[target]);

    let outcome = if is_team_alive(team) {
        RoundOutcome::Continue
    } else {
        RoundOutcome::TeamWiped
    };

    Ok(RoundReport {
        team_strikes,
        retaliation: Some(retaliation),
        outcome,
    })
}
