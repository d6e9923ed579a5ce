// Character system
//
// This module contains everything related to authored characters:
// - Character definitions owning their skills
// - The roster and its editing operations
// - Spawned instances, each driven by its own skill executor

pub mod character;
pub mod roster;
pub mod spawned;

// Re-export commonly used types
pub use character::{CharacterDefinition, CharacterId};
pub use roster::Roster;
pub use spawned::{SpawnError, SpawnedCharacters};

use crate::game::skills::SkillId;

/// Roster validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Character already exists: {0}")]
    DuplicateCharacter(String),

    #[error("Character {character} already has a skill named {skill}")]
    DuplicateSkill { character: String, skill: String },

    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Skill not found: {0}")]
    SkillNotFound(SkillId),

    #[error("Character {character} has no skill named {skill}")]
    SkillNameNotFound { character: String, skill: String },

    #[error("Invalid cooldown: {0} (must be finite and non-negative)")]
    InvalidCooldown(f32),
}
