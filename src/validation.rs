use std::collections::HashSet;

use thiserror::Error;

use crate::models::{NewPlayer, NewPlayerSkill, PlayerPayload, Position, Skill};

pub const MIN_SKILL_VALUE: i64 = 1;
pub const MAX_SKILL_VALUE: i64 = 99;

/// First rule a create/update payload breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Player name cannot be null or empty")]
    EmptyName,

    #[error("Invalid value for position: {0}")]
    InvalidPosition(String),

    #[error("PlayerSkills must contain at least one PlayerSkill object")]
    NoSkills,

    #[error("Invalid skill: {0}")]
    InvalidSkill(String),

    #[error("Invalid value for player skill '{skill}': {value}")]
    InvalidSkillValue { skill: Skill, value: i64 },

    #[error("Player cannot have multiple skills of the same type: {0}")]
    DuplicateSkill(Skill),

    #[error("{0}")]
    MalformedBody(String),
}

/// Checks a payload rule by rule and stops at the first violation.
///
/// Skills are checked in input order; for each one the name is checked
/// before the value, and the value before the duplicate test.
pub fn validate_player(payload: &PlayerPayload) -> Result<NewPlayer, ValidationError> {
    let name = match payload.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ValidationError::EmptyName),
    };

    let raw_position = payload.position.as_deref().unwrap_or_default();
    let position: Position = raw_position
        .parse()
        .map_err(|_| ValidationError::InvalidPosition(raw_position.to_string()))?;

    let raw_skills = match payload.player_skills.as_deref() {
        Some(skills) if !skills.is_empty() => skills,
        _ => return Err(ValidationError::NoSkills),
    };

    let mut seen = HashSet::new();
    let mut skills = Vec::with_capacity(raw_skills.len());

    for raw in raw_skills {
        let raw_name = raw.skill.as_deref().unwrap_or_default();
        let skill: Skill = raw_name
            .parse()
            .map_err(|_| ValidationError::InvalidSkill(raw_name.to_string()))?;

        let value = raw.value.unwrap_or(0);
        if !(MIN_SKILL_VALUE..=MAX_SKILL_VALUE).contains(&value) {
            return Err(ValidationError::InvalidSkillValue { skill, value });
        }

        if !seen.insert(skill) {
            return Err(ValidationError::DuplicateSkill(skill));
        }

        skills.push(NewPlayerSkill { skill, value });
    }

    Ok(NewPlayer {
        name,
        position,
        skills,
    })
}
