// Skill definitions

use std::fmt;

use crate::engine::assets::{EffectHandle, IconHandle};

/// Unique identifier for a skill, allocated by the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillId(pub u32);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

/// A skill as authored for one character
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDefinition {
    /// Unique identifier
    pub id: SkillId,
    /// Display name, unique within the owning character
    pub name: String,
    /// Seconds before the skill can be used again
    pub cooldown: f32,
    /// Damage dealt on use
    pub damage: f32,
    /// Free-form description
    pub description: String,
    /// Icon shown by an authoring surface
    pub icon: Option<IconHandle>,
    /// Effect spawned at the caster when the skill fires
    pub effect: Option<EffectHandle>,
}

impl SkillDefinition {
    pub fn new(id: SkillId, name: &str, cooldown: f32, damage: f32, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            cooldown,
            damage,
            description: description.to_string(),
            icon: None,
            effect: None,
        }
    }

    /// Check a cooldown value before it is stored
    pub fn is_valid_cooldown(cooldown: f32) -> bool {
        cooldown.is_finite() && cooldown >= 0.0
    }
}

/// Partial update of a skill's fields
///
/// `None` leaves a field untouched. The asset fields are doubly optional so a
/// handle can be cleared with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillEdit {
    pub name: Option<String>,
    pub cooldown: Option<f32>,
    pub damage: Option<f32>,
    pub description: Option<String>,
    pub icon: Option<Option<IconHandle>>,
    pub effect: Option<Option<EffectHandle>>,
}

impl SkillEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    pub fn damage(mut self, damage: f32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: Option<IconHandle>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn effect(mut self, effect: Option<EffectHandle>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Whether the edit changes anything at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the edit into `skill`. Validation is the roster's job.
    pub(crate) fn apply_to(self, skill: &mut SkillDefinition) {
        if let Some(name) = self.name {
            skill.name = name;
        }
        if let Some(cooldown) = self.cooldown {
            skill.cooldown = cooldown;
        }
        if let Some(damage) = self.damage {
            skill.damage = damage;
        }
        if let Some(description) = self.description {
            skill.description = description;
        }
        if let Some(icon) = self.icon {
            skill.icon = icon;
        }
        if let Some(effect) = self.effect {
            skill.effect = effect;
        }
    }
}
