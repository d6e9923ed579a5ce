// Roster of authored characters and their skills

use log::info;

use crate::engine::assets::TemplateHandle;
use crate::game::config::{EditorConfig, BASE_CONFIG};
use crate::game::skills::{SkillDefinition, SkillEdit, SkillId};

use super::character::{CharacterDefinition, CharacterId};
use super::RosterError;

/// Every authored character, in authoring order
///
/// Names are unique within the roster and skill names are unique within their
/// character. IDs are never reused, so a stale ID can't silently point at a
/// newer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    characters: Vec<CharacterDefinition>,
    next_character_id: u32,
    next_skill_id: u32,
    skill_defaults: SkillDefaults,
}

/// Values given to freshly added skills
#[derive(Debug, Clone, PartialEq)]
struct SkillDefaults {
    cooldown: f32,
    damage: f32,
    description: String,
}

impl From<&EditorConfig> for SkillDefaults {
    fn from(config: &EditorConfig) -> Self {
        Self {
            cooldown: config.default_cooldown,
            damage: config.default_damage,
            description: config.default_description.to_string(),
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::with_config(&BASE_CONFIG)
    }

    /// Create an empty roster using the skill defaults from `config`
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            characters: Vec::new(),
            next_character_id: 0,
            next_skill_id: 0,
            skill_defaults: config.into(),
        }
    }

    /// Add a character
    pub fn add_character(
        &mut self,
        name: &str,
        template: Option<TemplateHandle>,
    ) -> Result<CharacterId, RosterError> {
        let name = validate_name(name)?;
        if self.find_character(name).is_some() {
            return Err(RosterError::DuplicateCharacter(name.to_string()));
        }

        let id = CharacterId(self.next_character_id);
        self.next_character_id += 1;

        self.characters
            .push(CharacterDefinition::new(id, name, template));
        info!("Added character '{}' ({})", name, id);

        Ok(id)
    }

    /// Remove a character together with all of its skills
    pub fn remove_character(&mut self, id: CharacterId) -> Result<CharacterDefinition, RosterError> {
        let pos = self
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or(RosterError::CharacterNotFound(id))?;

        let removed = self.characters.remove(pos);
        info!(
            "Removed character '{}' and {} skill(s)",
            removed.name,
            removed.skill_count()
        );
        Ok(removed)
    }

    /// Append a skill with default values to a character
    pub fn add_skill(&mut self, character: CharacterId, name: &str) -> Result<SkillId, RosterError> {
        let name = validate_name(name)?;
        let id = SkillId(self.next_skill_id);
        let defaults = &self.skill_defaults;

        let owner = self
            .characters
            .iter_mut()
            .find(|c| c.id == character)
            .ok_or(RosterError::CharacterNotFound(character))?;

        if owner.skill_name_taken(name, None) {
            return Err(RosterError::DuplicateSkill {
                character: owner.name.clone(),
                skill: name.to_string(),
            });
        }

        owner.skills.push(SkillDefinition::new(
            id,
            name,
            defaults.cooldown,
            defaults.damage,
            &defaults.description,
        ));
        self.next_skill_id += 1;
        info!("Added skill '{}' to '{}'", name, owner.name);

        Ok(id)
    }

    /// Remove a skill from a character
    pub fn remove_skill(
        &mut self,
        character: CharacterId,
        skill: SkillId,
    ) -> Result<SkillDefinition, RosterError> {
        let owner = self.character_mut(character)?;
        let pos = owner
            .skills
            .iter()
            .position(|s| s.id == skill)
            .ok_or(RosterError::SkillNotFound(skill))?;

        let removed = owner.skills.remove(pos);
        info!("Removed skill '{}' from '{}'", removed.name, owner.name);
        Ok(removed)
    }

    /// Update some of a skill's fields in place
    ///
    /// Nothing is written unless the whole edit is valid.
    pub fn edit_skill(&mut self, skill: SkillId, mut edit: SkillEdit) -> Result<(), RosterError> {
        let owner_id = self.owner_of(skill)?;
        let owner = self.character_mut(owner_id)?;

        if let Some(cooldown) = edit.cooldown {
            if !SkillDefinition::is_valid_cooldown(cooldown) {
                return Err(RosterError::InvalidCooldown(cooldown));
            }
        }
        if let Some(name) = edit.name.take() {
            let name = validate_name(&name)?.to_string();
            if owner.skill_name_taken(&name, Some(skill)) {
                return Err(RosterError::DuplicateSkill {
                    character: owner.name.clone(),
                    skill: name,
                });
            }
            edit.name = Some(name);
        }

        let target = owner
            .skill_mut(skill)
            .ok_or(RosterError::SkillNotFound(skill))?;
        edit.apply_to(target);
        log::debug!("Edited {} ('{}')", skill, target.name);

        Ok(())
    }

    /// Get a character by ID
    pub fn character(&self, id: CharacterId) -> Result<&CharacterDefinition, RosterError> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or(RosterError::CharacterNotFound(id))
    }

    /// Rename a character
    pub fn rename_character(&mut self, id: CharacterId, name: &str) -> Result<(), RosterError> {
        let name = validate_name(name)?;
        self.character(id)?;
        if self.characters.iter().any(|c| c.name == name && c.id != id) {
            return Err(RosterError::DuplicateCharacter(name.to_string()));
        }

        let character = self.character_mut(id)?;
        info!("Renamed '{}' to '{}'", character.name, name);
        character.name = name.to_string();
        Ok(())
    }

    /// Replace the visual template of a character
    pub fn set_template(
        &mut self,
        id: CharacterId,
        template: Option<TemplateHandle>,
    ) -> Result<(), RosterError> {
        self.character_mut(id)?.template = template;
        Ok(())
    }

    fn character_mut(
        &mut self,
        id: CharacterId,
    ) -> Result<&mut CharacterDefinition, RosterError> {
        self.characters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RosterError::CharacterNotFound(id))
    }

    /// Get a character by name
    pub fn find_character(&self, name: &str) -> Option<&CharacterDefinition> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Get a skill by ID, whichever character owns it
    pub fn skill(&self, id: SkillId) -> Result<&SkillDefinition, RosterError> {
        self.characters
            .iter()
            .find_map(|c| c.skill(id))
            .ok_or(RosterError::SkillNotFound(id))
    }

    /// Get a character's skill by name
    pub fn find_skill(
        &self,
        character: CharacterId,
        name: &str,
    ) -> Result<&SkillDefinition, RosterError> {
        let owner = self.character(character)?;
        owner
            .skill_by_name(name)
            .ok_or_else(|| RosterError::SkillNameNotFound {
                character: owner.name.clone(),
                skill: name.to_string(),
            })
    }

    /// Character owning a skill
    pub fn owner_of(&self, skill: SkillId) -> Result<CharacterId, RosterError> {
        self.characters
            .iter()
            .find(|c| c.has_skill(skill))
            .map(|c| c.id)
            .ok_or(RosterError::SkillNotFound(skill))
    }

    /// All characters in authoring order
    pub fn characters(&self) -> &[CharacterDefinition] {
        &self.characters
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

fn validate_name(name: &str) -> Result<&str, RosterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(RosterError::EmptyName)
    } else {
        Ok(trimmed)
    }
}
