use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A position or skill name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {name}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Field position a player is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Position {
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Defender, Position::Midfielder, Position::Forward];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Defender => "defender",
            Position::Midfielder => "midfielder",
            Position::Forward => "forward",
        }
    }
}

impl FromStr for Position {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| UnknownName { kind: "position", name: s.to_string() })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of rating a player can hold. Names are case-sensitive on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Skill {
    Defense,
    Attack,
    Speed,
    Strength,
    Stamina,
}

impl Skill {
    pub const ALL: [Skill; 5] = [
        Skill::Defense,
        Skill::Attack,
        Skill::Speed,
        Skill::Strength,
        Skill::Stamina,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Defense => "defense",
            Skill::Attack => "attack",
            Skill::Speed => "speed",
            Skill::Strength => "strength",
            Skill::Stamina => "stamina",
        }
    }
}

impl FromStr for Skill {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .into_iter()
            .find(|skill| skill.as_str() == s)
            .ok_or_else(|| UnknownName { kind: "skill", name: s.to_string() })
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored player, always returned with its full skill set.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: Position,
    #[sqlx(skip)]
    pub player_skills: Vec<PlayerSkill>,
}

/// Row from the player_skills table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PlayerSkill {
    #[serde(skip_serializing)]
    pub id: i64,
    #[serde(skip_serializing)]
    pub player_id: i64,
    pub skill: Skill,
    pub value: i64,
}

// Incoming request body for create and update. Everything is optional so that
// validation, not the JSON decoder, decides what a bad payload means.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub player_skills: Option<Vec<PlayerSkillPayload>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerSkillPayload {
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub value: Option<i64>,
}

/// A payload that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub position: Position,
    pub skills: Vec<NewPlayerSkill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPlayerSkill {
    pub skill: Skill,
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parses_only_lowercase_names() {
        assert_eq!("midfielder".parse::<Position>(), Ok(Position::Midfielder));
        assert!("Midfielder".parse::<Position>().is_err());

        let err = "goalkeeper".parse::<Position>().unwrap_err();
        assert_eq!(err.to_string(), "unknown position: goalkeeper");
    }

    #[test]
    fn unknown_skill_error_names_the_input() {
        let err = "dribble".parse::<Skill>().unwrap_err();
        assert_eq!(err, UnknownName { kind: "skill", name: "dribble".to_string() });
        assert_eq!(err.to_string(), "unknown skill: dribble");
    }

    #[test]
    fn as_str_matches_serde_names() {
        for position in Position::ALL {
            assert_eq!(serde_json::to_value(position).unwrap(), position.as_str());
        }
        for skill in Skill::ALL {
            assert_eq!(serde_json::to_value(skill).unwrap(), skill.as_str());
        }
    }

    #[test]
    fn skill_names_match_display() {
        for skill in Skill::ALL {
            assert_eq!(skill.to_string().parse::<Skill>(), Ok(skill));
        }
    }

    #[test]
    fn player_serializes_without_internal_ids() {
        let player = Player {
            id: 7,
            name: "Ada".to_string(),
            position: Position::Forward,
            player_skills: vec![PlayerSkill {
                id: 3,
                player_id: 7,
                skill: Skill::Speed,
                value: 80,
            }],
        };

        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Ada",
                "position": "forward",
                "playerSkills": [{ "skill": "speed", "value": 80 }]
            })
        );
    }

    #[test]
    fn payload_tolerates_missing_fields() {
        let payload: PlayerPayload =
            serde_json::from_str(r#"{ "playerSkills": [{ "skill": "attack" }] }"#).unwrap();

        assert!(payload.name.is_none());
        assert!(payload.position.is_none());
        let skills = payload.player_skills.unwrap();
        assert_eq!(skills[0].skill.as_deref(), Some("attack"));
        assert!(skills[0].value.is_none());
    }
}
