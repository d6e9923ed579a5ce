// Character definitions

use std::fmt;

use crate::engine::assets::TemplateHandle;
use crate::game::skills::{SkillDefinition, SkillId};

/// Unique identifier for a character definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// An authored character and the skills it owns
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterDefinition {
    /// Unique identifier
    pub id: CharacterId,
    /// Display name, unique within the roster
    pub name: String,
    /// Visual template instances are spawned from
    pub template: Option<TemplateHandle>,
    /// Skills in authoring order
    pub(crate) skills: Vec<SkillDefinition>,
}

impl CharacterDefinition {
    pub(crate) fn new(id: CharacterId, name: &str, template: Option<TemplateHandle>) -> Self {
        Self {
            id,
            name: name.to_string(),
            template,
            skills: Vec::new(),
        }
    }

    /// Skills in authoring order
    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    /// Get a skill by ID
    pub fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub(crate) fn skill_mut(&mut self, id: SkillId) -> Option<&mut SkillDefinition> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    /// Get a skill by name
    pub fn skill_by_name(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Whether the character owns `id`
    pub fn has_skill(&self, id: SkillId) -> bool {
        self.skills.iter().any(|s| s.id == id)
    }

    /// Whether another skill than `except` already uses `name`
    pub(crate) fn skill_name_taken(&self, name: &str, except: Option<SkillId>) -> bool {
        self.skills
            .iter()
            .any(|s| s.name == name && Some(s.id) != except)
    }

    /// Number of skills
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}
