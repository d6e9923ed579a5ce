// Runtime skill execution for one spawned character

use log::info;

use crate::engine::scene::{InstanceId, SceneHost};
use crate::game::characters::CharacterId;
use crate::game::config::BASE_CONFIG;

use super::cooldown::{CooldownTracker, SkillCooldown};
use super::skill::{SkillDefinition, SkillId};

/// Result of asking an executor to use a skill
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UseOutcome {
    /// The skill fired and its cooldown started
    Activated,
    /// The skill is still cooling down; nothing changed
    OnCooldown { remaining: f32 },
}

impl UseOutcome {
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated)
    }
}

/// Gates and performs skill activations for exactly one spawned instance
///
/// Cooldowns only decay through [`SkillExecutor::tick`]; whoever owns the frame
/// clock is expected to call it.
#[derive(Debug, Clone)]
pub struct SkillExecutor {
    character: CharacterId,
    instance: InstanceId,
    cooldowns: CooldownTracker,
    effect_lifetime: f32,
}

impl SkillExecutor {
    /// Bind a new executor to a spawned instance of `character`
    pub fn new(character: CharacterId, instance: InstanceId) -> Self {
        Self {
            character,
            instance,
            cooldowns: CooldownTracker::new(),
            effect_lifetime: BASE_CONFIG.effect_lifetime,
        }
    }

    /// Override how long spawned effects stay alive
    pub fn with_effect_lifetime(mut self, seconds: f32) -> Self {
        self.effect_lifetime = seconds;
        self
    }

    /// Character definition this executor was spawned from
    pub fn character(&self) -> CharacterId {
        self.character
    }

    /// Scene instance this executor drives
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Try to use `skill`
    ///
    /// The caller must pass one of the bound character's skills.
    pub fn request_use(&mut self, skill: &SkillDefinition, scene: &mut dyn SceneHost) -> UseOutcome {
        if let SkillCooldown::OnCooldown { remaining } = self.cooldowns.state(skill.id) {
            info!("Skill {} on cooldown: {:.1}s", skill.name, remaining);
            return UseOutcome::OnCooldown { remaining };
        }

        info!(
            "Casting skill: {} (damage: {}, cooldown: {}s)",
            skill.name, skill.damage, skill.cooldown
        );

        if let Some(effect) = skill.effect {
            match scene.position(self.instance) {
                Some(position) => scene.spawn_effect(effect, position, self.effect_lifetime),
                None => log::warn!(
                    "{} is not in the scene, skipping effect for {}",
                    self.instance,
                    skill.name
                ),
            }
        }

        self.cooldowns.start(skill.id, skill.cooldown);
        UseOutcome::Activated
    }

    /// Decay all cooldowns by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.cooldowns.tick(dt);
    }

    pub fn state(&self, skill: SkillId) -> SkillCooldown {
        self.cooldowns.state(skill)
    }

    pub fn is_ready(&self, skill: SkillId) -> bool {
        self.cooldowns.is_ready(skill)
    }

    pub fn remaining(&self, skill: SkillId) -> f32 {
        self.cooldowns.remaining(skill)
    }

    /// Make every skill ready again
    pub fn reset(&mut self) {
        self.cooldowns.clear();
    }
}
