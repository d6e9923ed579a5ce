// Spawned character instances

use glam::Vec3;
use log::{info, warn};

use crate::engine::scene::{InstanceId, SceneHost};
use crate::game::config::BASE_CONFIG;
use crate::game::skills::{SkillExecutor, SkillId, UseOutcome};

use super::{CharacterId, Roster, RosterError};

/// Errors raised while spawning or driving instances
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("Character {0} has no template to spawn from")]
    MissingTemplate(String),

    #[error("Instance not found: {0}")]
    InstanceNotFound(InstanceId),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Every live instance and the executor attached to it
#[derive(Debug)]
pub struct SpawnedCharacters {
    executors: Vec<SkillExecutor>,
    effect_lifetime: f32,
}

impl Default for SpawnedCharacters {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnedCharacters {
    pub fn new() -> Self {
        Self::with_effect_lifetime(BASE_CONFIG.effect_lifetime)
    }

    /// Executors created here spawn effects living `seconds`
    pub fn with_effect_lifetime(seconds: f32) -> Self {
        Self {
            executors: Vec::new(),
            effect_lifetime: seconds,
        }
    }

    /// Instantiate a character and attach a fresh executor to it
    pub fn spawn(
        &mut self,
        roster: &Roster,
        character: CharacterId,
        position: Vec3,
        scene: &mut dyn SceneHost,
    ) -> Result<InstanceId, SpawnError> {
        let definition = roster.character(character)?;
        let Some(template) = definition.template else {
            warn!("Cannot spawn '{}': no template assigned", definition.name);
            return Err(SpawnError::MissingTemplate(definition.name.clone()));
        };

        let instance = scene.instantiate(template, position, &definition.name);
        self.executors.push(
            SkillExecutor::new(character, instance).with_effect_lifetime(self.effect_lifetime),
        );
        info!(
            "Character '{}' spawned as {} at {}",
            definition.name, instance, position
        );

        Ok(instance)
    }

    /// Destroy an instance and drop its cooldown state
    pub fn despawn(
        &mut self,
        instance: InstanceId,
        scene: &mut dyn SceneHost,
    ) -> Result<(), SpawnError> {
        let pos = self
            .executors
            .iter()
            .position(|e| e.instance() == instance)
            .ok_or(SpawnError::InstanceNotFound(instance))?;

        self.executors.remove(pos);
        if !scene.destroy(instance) {
            warn!("{} was already gone from the scene", instance);
        }
        Ok(())
    }

    /// Despawn every instance of `character`, returns how many were removed
    pub fn despawn_character(&mut self, character: CharacterId, scene: &mut dyn SceneHost) -> usize {
        let before = self.executors.len();
        self.executors.retain(|executor| {
            if executor.character() != character {
                return true;
            }
            if !scene.destroy(executor.instance()) {
                warn!("{} was already gone from the scene", executor.instance());
            }
            false
        });
        before - self.executors.len()
    }

    /// Ask an instance to use one of its character's skills
    pub fn use_skill(
        &mut self,
        instance: InstanceId,
        roster: &Roster,
        skill: SkillId,
        scene: &mut dyn SceneHost,
    ) -> Result<UseOutcome, SpawnError> {
        let executor = self
            .executors
            .iter_mut()
            .find(|e| e.instance() == instance)
            .ok_or(SpawnError::InstanceNotFound(instance))?;

        let definition = roster
            .character(executor.character())?
            .skill(skill)
            .ok_or(RosterError::SkillNotFound(skill))?;

        Ok(executor.request_use(definition, scene))
    }

    /// Decay the cooldowns of every instance
    pub fn tick(&mut self, dt: f32) {
        for executor in &mut self.executors {
            executor.tick(dt);
        }
    }

    /// Get the executor of an instance
    pub fn executor(&self, instance: InstanceId) -> Option<&SkillExecutor> {
        self.executors.iter().find(|e| e.instance() == instance)
    }

    /// Character an instance was spawned from
    pub fn character_of(&self, instance: InstanceId) -> Option<CharacterId> {
        self.executor(instance).map(|e| e.character())
    }

    /// All live instances of a character
    pub fn instances_of(&self, character: CharacterId) -> Vec<InstanceId> {
        self.executors
            .iter()
            .filter(|e| e.character() == character)
            .map(|e| e.instance())
            .collect()
    }

    /// Get the number of live instances
    pub fn count(&self) -> usize {
        self.executors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::TemplateHandle;
    use crate::engine::scene::HeadlessScene;
    use crate::game::skills::SkillEdit;
    use approx::assert_relative_eq;

    fn roster_with_two_mages() -> (Roster, CharacterId, CharacterId) {
        let mut roster = Roster::new();
        let a = roster
            .add_character("Mage A", Some(TemplateHandle::from_path("prefabs/mage")))
            .unwrap();
        let b = roster
            .add_character("Mage B", Some(TemplateHandle::from_path("prefabs/mage")))
            .unwrap();
        for character in [a, b] {
            let id = roster.add_skill(character, "Fireball").unwrap();
            roster
                .edit_skill(id, SkillEdit::new().cooldown(5.0).damage(20.0))
                .unwrap();
        }
        (roster, a, b)
    }

    #[test]
    fn test_spawn_requires_template() {
        let mut roster = Roster::new();
        let ghost = roster.add_character("Ghost", None).unwrap();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        assert_eq!(
            spawned.spawn(&roster, ghost, Vec3::ZERO, &mut scene),
            Err(SpawnError::MissingTemplate("Ghost".to_string()))
        );
        assert_eq!(scene.instance_count(), 0);
    }

    #[test]
    fn test_spawn_unknown_character() {
        let roster = Roster::new();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        assert!(matches!(
            spawned.spawn(&roster, CharacterId(9), Vec3::ZERO, &mut scene),
            Err(SpawnError::Roster(RosterError::CharacterNotFound(_)))
        ));
    }

    #[test]
    fn test_characters_have_independent_cooldowns() {
        let (roster, a, b) = roster_with_two_mages();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        let instance_a = spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        let instance_b = spawned.spawn(&roster, b, Vec3::X, &mut scene).unwrap();
        let fireball_a = roster.find_skill(a, "Fireball").unwrap().id;
        let fireball_b = roster.find_skill(b, "Fireball").unwrap().id;

        let outcome = spawned
            .use_skill(instance_a, &roster, fireball_a, &mut scene)
            .unwrap();
        assert_eq!(outcome, UseOutcome::Activated);

        let executor_b = spawned.executor(instance_b).unwrap();
        assert!(executor_b.is_ready(fireball_b));
        assert!(executor_b.is_ready(fireball_a));

        let outcome = spawned
            .use_skill(instance_b, &roster, fireball_b, &mut scene)
            .unwrap();
        assert_eq!(outcome, UseOutcome::Activated);
    }

    #[test]
    fn test_two_instances_of_same_character_are_independent() {
        let (roster, a, _) = roster_with_two_mages();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();
        let fireball = roster.find_skill(a, "Fireball").unwrap().id;

        let first = spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        let second = spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();

        spawned.use_skill(first, &roster, fireball, &mut scene).unwrap();
        assert!(spawned.executor(second).unwrap().is_ready(fireball));
        assert_eq!(spawned.instances_of(a), vec![first, second]);
    }

    #[test]
    fn test_use_skill_of_other_character_rejected() {
        let (roster, a, b) = roster_with_two_mages();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        let instance_a = spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        let fireball_b = roster.find_skill(b, "Fireball").unwrap().id;

        assert_eq!(
            spawned.use_skill(instance_a, &roster, fireball_b, &mut scene),
            Err(SpawnError::Roster(RosterError::SkillNotFound(fireball_b)))
        );
    }

    #[test]
    fn test_tick_decays_all_instances() {
        let (roster, a, b) = roster_with_two_mages();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        let instance_a = spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        let instance_b = spawned.spawn(&roster, b, Vec3::ZERO, &mut scene).unwrap();
        let fireball_a = roster.find_skill(a, "Fireball").unwrap().id;
        let fireball_b = roster.find_skill(b, "Fireball").unwrap().id;

        spawned.use_skill(instance_a, &roster, fireball_a, &mut scene).unwrap();
        spawned.use_skill(instance_b, &roster, fireball_b, &mut scene).unwrap();
        spawned.tick(2.0);

        assert_relative_eq!(spawned.executor(instance_a).unwrap().remaining(fireball_a), 3.0);
        assert_relative_eq!(spawned.executor(instance_b).unwrap().remaining(fireball_b), 3.0);
    }

    #[test]
    fn test_despawn() {
        let (roster, a, _) = roster_with_two_mages();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        let instance = spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        spawned.despawn(instance, &mut scene).unwrap();

        assert_eq!(spawned.count(), 0);
        assert_eq!(scene.instance_count(), 0);
        assert_eq!(
            spawned.despawn(instance, &mut scene),
            Err(SpawnError::InstanceNotFound(instance))
        );
    }

    #[test]
    fn test_despawn_character() {
        let (roster, a, b) = roster_with_two_mages();
        let mut scene = HeadlessScene::new();
        let mut spawned = SpawnedCharacters::new();

        spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        spawned.spawn(&roster, a, Vec3::ZERO, &mut scene).unwrap();
        let kept = spawned.spawn(&roster, b, Vec3::ZERO, &mut scene).unwrap();

        assert_eq!(spawned.despawn_character(a, &mut scene), 2);
        assert_eq!(spawned.count(), 1);
        assert_eq!(scene.instance_count(), 1);
        assert_eq!(spawned.despawn_character(a, &mut scene), 0);
        assert_eq!(spawned.character_of(kept), Some(b));
    }
}
