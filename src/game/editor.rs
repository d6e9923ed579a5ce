// Authoring session
//
// Everything a skill editor window does, minus the widgets: selection, roster
// edits followed by a save, spawning a preview instance and firing skills on
// it. A GUI only has to forward button presses here and render the state.

use std::time::Duration;

use glam::Vec3;
use log::info;

use crate::engine::assets::TemplateHandle;
use crate::engine::game_loop::GameLoop;
use crate::engine::scene::{InstanceId, SceneHost};

use super::characters::{
    CharacterDefinition, CharacterId, Roster, RosterError, SpawnError, SpawnedCharacters,
};
use super::config::EditorConfig;
use super::skills::{SkillDefinition, SkillEdit, SkillId, UseOutcome};
use super::storage::{RosterStore, StoreError};

/// Errors surfaced to the authoring surface
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("No character selected")]
    NoCharacterSelected,

    #[error("No skill selected")]
    NoSkillSelected,

    #[error("No character spawned in the scene")]
    NoActiveInstance,

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// State behind a skill editor window
///
/// Every successful edit is followed by a save. When the save fails the edit
/// stays in memory and the store error is returned.
pub struct EditorSession<S: RosterStore, H: SceneHost> {
    config: EditorConfig,
    store: S,
    scene: H,
    roster: Roster,
    spawned: SpawnedCharacters,
    clock: GameLoop,

    // Selection
    selected_character: Option<CharacterId>,
    selected_skill: Option<SkillId>,

    // Preview
    spawn_position: Vec3,
    active_instance: Option<InstanceId>,
}

impl<S: RosterStore, H: SceneHost> EditorSession<S, H> {
    /// Open a session, loading (or creating) the stored roster
    pub fn open(config: EditorConfig, store: S, scene: H) -> Result<Self, EditorError> {
        let mut session = Self {
            roster: Roster::with_config(&config),
            spawned: SpawnedCharacters::with_effect_lifetime(config.effect_lifetime),
            clock: GameLoop::with_timestep(config.fixed_timestep),
            config,
            store,
            scene,
            selected_character: None,
            selected_skill: None,
            spawn_position: Vec3::ZERO,
            active_instance: None,
        };
        session.load_config()?;
        Ok(session)
    }

    /// Reload the roster from the store, creating it when missing
    pub fn load_config(&mut self) -> Result<(), EditorError> {
        match self.store.load(self.config.config_path)? {
            Some(roster) => {
                info!(
                    "Loaded {} character(s) from {}",
                    roster.len(),
                    self.config.config_path
                );
                self.roster = roster;
            }
            None => {
                info!("No roster at {}, creating one", self.config.config_path);
                self.roster = Roster::with_config(&self.config);
                self.store.save(self.config.config_path, &self.roster)?;
            }
        }

        // Drop selections the loaded roster doesn't know about
        if let Some(id) = self.selected_character {
            if self.roster.character(id).is_err() {
                self.selected_character = None;
                self.selected_skill = None;
            }
        }
        if let Some(id) = self.selected_skill {
            if self.roster.skill(id).is_err() {
                self.selected_skill = None;
            }
        }
        Ok(())
    }

    /// Persist the roster
    pub fn save_config(&mut self) -> Result<(), EditorError> {
        self.store.save(self.config.config_path, &self.roster)?;
        info!("Skill config saved to {}", self.config.config_path);
        Ok(())
    }

    /// Drop selection and the preview instance, then reload unsaved changes away
    pub fn reset(&mut self) -> Result<(), EditorError> {
        self.selected_character = None;
        self.selected_skill = None;
        self.destroy_active();
        self.load_config()
    }

    /// Select a character, clearing the skill selection
    pub fn select_character(&mut self, id: CharacterId) -> Result<(), EditorError> {
        self.roster.character(id)?;
        self.selected_character = Some(id);
        self.selected_skill = None;
        Ok(())
    }

    /// Select one of the selected character's skills
    pub fn select_skill(&mut self, id: SkillId) -> Result<(), EditorError> {
        let character = self.selected_character_id()?;
        if !self.roster.character(character)?.has_skill(id) {
            return Err(RosterError::SkillNotFound(id).into());
        }
        self.selected_skill = Some(id);
        Ok(())
    }

    /// Create a character, select it and save
    pub fn add_character(
        &mut self,
        name: &str,
        template: Option<TemplateHandle>,
    ) -> Result<CharacterId, EditorError> {
        let id = self.roster.add_character(name, template)?;
        self.selected_character = Some(id);
        self.selected_skill = None;
        self.save_config()?;
        Ok(id)
    }

    /// Delete the selected character and its skills, then save
    ///
    /// Every instance spawned from that character is destroyed, the preview
    /// included.
    pub fn delete_selected_character(&mut self) -> Result<CharacterDefinition, EditorError> {
        let id = self.selected_character_id()?;
        let removed = self.roster.remove_character(id)?;

        let despawned = self.spawned.despawn_character(id, &mut self.scene);
        if despawned > 0 {
            info!("Destroyed {} instance(s) of '{}'", despawned, removed.name);
        }
        if self
            .active_instance
            .is_some_and(|instance| self.spawned.executor(instance).is_none())
        {
            self.active_instance = None;
        }

        self.selected_character = None;
        self.selected_skill = None;
        self.save_config()?;
        Ok(removed)
    }

    /// Add a skill to the selected character, select it and save
    pub fn add_skill(&mut self, name: &str) -> Result<SkillId, EditorError> {
        let character = self.selected_character_id()?;
        let id = self.roster.add_skill(character, name)?;
        self.selected_skill = Some(id);
        self.save_config()?;
        Ok(id)
    }

    /// Apply field changes to the selected skill and save
    pub fn edit_selected_skill(&mut self, edit: SkillEdit) -> Result<(), EditorError> {
        let skill = self.selected_skill_id()?;
        self.roster.edit_skill(skill, edit)?;
        self.save_config()
    }

    /// Delete the selected skill and save
    pub fn delete_selected_skill(&mut self) -> Result<SkillDefinition, EditorError> {
        let character = self.selected_character_id()?;
        let skill = self.selected_skill_id()?;

        let removed = self.roster.remove_skill(character, skill)?;
        self.selected_skill = None;
        self.save_config()?;
        Ok(removed)
    }

    pub fn set_spawn_position(&mut self, position: Vec3) {
        self.spawn_position = position;
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.spawn_position
    }

    /// Spawn the selected character, replacing the current preview
    pub fn spawn_selected(&mut self) -> Result<InstanceId, EditorError> {
        let id = self.selected_character_id()?;
        let character = self.roster.character(id)?;
        if character.template.is_none() {
            return Err(SpawnError::MissingTemplate(character.name.clone()).into());
        }

        self.destroy_active();
        let instance =
            self.spawned
                .spawn(&self.roster, id, self.spawn_position, &mut self.scene)?;
        self.active_instance = Some(instance);
        Ok(instance)
    }

    /// Destroy the preview instance, returns false when there was none
    pub fn destroy_active(&mut self) -> bool {
        let Some(instance) = self.active_instance.take() else {
            return false;
        };
        if let Err(err) = self.spawned.despawn(instance, &mut self.scene) {
            log::warn!("Destroying preview: {}", err);
        }
        true
    }

    /// Fire the selected skill on the preview instance
    pub fn test_selected_skill(&mut self) -> Result<UseOutcome, EditorError> {
        let instance = self.active_instance.ok_or(EditorError::NoActiveInstance)?;
        let skill = self.selected_skill_id()?;
        Ok(self
            .spawned
            .use_skill(instance, &self.roster, skill, &mut self.scene)?)
    }

    /// Label drawn above the preview instance
    pub fn status_label(&self) -> Option<String> {
        let instance = self.active_instance?;
        let character = self.spawned.character_of(instance)?;
        let definition = self.roster.character(character).ok()?;
        Some(format!(
            "{} (skills: {})",
            definition.name,
            definition.skill_count()
        ))
    }

    /// Feed one frame's duration, returns the number of ticks run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        let ticks = self.clock.advance(frame_time);
        let dt = self.clock.fixed_timestep();
        for _ in 0..ticks {
            self.tick(dt);
        }
        ticks
    }

    /// Run a single decay tick of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.spawned.tick(dt);
        self.scene.advance(dt);
    }

    pub fn selected_character(&self) -> Option<&CharacterDefinition> {
        self.selected_character
            .and_then(|id| self.roster.character(id).ok())
    }

    pub fn selected_skill(&self) -> Option<&SkillDefinition> {
        self.selected_skill.and_then(|id| self.roster.skill(id).ok())
    }

    pub fn active_instance(&self) -> Option<InstanceId> {
        self.active_instance
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn spawned(&self) -> &SpawnedCharacters {
        &self.spawned
    }

    pub fn scene(&self) -> &H {
        &self.scene
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn selected_character_id(&self) -> Result<CharacterId, EditorError> {
        self.selected_character
            .ok_or(EditorError::NoCharacterSelected)
    }

    fn selected_skill_id(&self) -> Result<SkillId, EditorError> {
        self.selected_skill.ok_or(EditorError::NoSkillSelected)
    }
}

/// Closing the session removes the preview from the scene
impl<S: RosterStore, H: SceneHost> Drop for EditorSession<S, H> {
    fn drop(&mut self) {
        if self.destroy_active() {
            info!("Preview destroyed on close");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::EffectHandle;
    use crate::engine::scene::HeadlessScene;
    use crate::game::storage::MemoryStore;
    use approx::assert_relative_eq;

    type Session = EditorSession<MemoryStore, HeadlessScene>;

    fn open() -> Session {
        EditorSession::open(EditorConfig::default(), MemoryStore::new(), HeadlessScene::new())
            .unwrap()
    }

    fn session_with_fireball() -> (Session, CharacterId, SkillId) {
        let mut session = open();
        let mage = session
            .add_character("Mage", Some(TemplateHandle::from_path("prefabs/mage")))
            .unwrap();
        let fireball = session.add_skill("Fireball").unwrap();
        session
            .edit_selected_skill(SkillEdit::new().cooldown(5.0).damage(20.0))
            .unwrap();
        (session, mage, fireball)
    }

    #[test]
    fn test_open_creates_missing_roster() {
        let session = open();
        assert!(session.roster().is_empty());
        assert_eq!(session.store().save_count(), 1);
    }

    #[test]
    fn test_open_loads_existing_roster() {
        let mut roster = Roster::new();
        roster.add_character("Knight", None).unwrap();
        let config = EditorConfig::default();
        let store = MemoryStore::with_roster(config.config_path, roster);

        let session = EditorSession::open(config, store, HeadlessScene::new()).unwrap();
        assert!(session.roster().find_character("Knight").is_some());
        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn test_every_edit_is_persisted() {
        let (session, _, _) = session_with_fireball();
        // create + add character + add skill + edit
        assert_eq!(session.store().save_count(), 4);

        let saved = session.store().snapshot().unwrap();
        let mage = saved.find_character("Mage").unwrap();
        assert_eq!(mage.skill_by_name("Fireball").unwrap().cooldown, 5.0);
    }

    #[test]
    fn test_add_selects_new_entries() {
        let (session, mage, fireball) = session_with_fireball();
        assert_eq!(session.selected_character().map(|c| c.id), Some(mage));
        assert_eq!(session.selected_skill().map(|s| s.id), Some(fireball));
    }

    #[test]
    fn test_selecting_character_clears_skill() {
        let (mut session, mage, _) = session_with_fireball();
        session.select_character(mage).unwrap();
        assert!(session.selected_skill().is_none());
    }

    #[test]
    fn test_add_skill_without_selection() {
        let mut session = open();
        assert_eq!(
            session.add_skill("Fireball"),
            Err(EditorError::NoCharacterSelected)
        );
    }

    #[test]
    fn test_select_skill_of_other_character() {
        let (mut session, _, fireball) = session_with_fireball();
        session.add_character("Knight", None).unwrap();
        assert_eq!(
            session.select_skill(fireball),
            Err(EditorError::Roster(RosterError::SkillNotFound(fireball)))
        );
    }

    #[test]
    fn test_spawn_and_test_skill() {
        let (mut session, _, fireball) = session_with_fireball();
        session.set_spawn_position(Vec3::new(0.0, 1.0, 0.0));
        let instance = session.spawn_selected().unwrap();

        assert_eq!(session.active_instance(), Some(instance));
        assert_eq!(session.status_label().as_deref(), Some("Mage (skills: 1)"));

        session.select_skill(fireball).unwrap();
        assert_eq!(session.test_selected_skill(), Ok(UseOutcome::Activated));
        match session.test_selected_skill() {
            Ok(UseOutcome::OnCooldown { remaining }) => assert_relative_eq!(remaining, 5.0),
            other => panic!("expected cooldown, got {:?}", other),
        }
    }

    #[test]
    fn test_advance_expires_cooldown_and_effects() {
        let (mut session, _, _) = session_with_fireball();
        session
            .edit_selected_skill(SkillEdit::new().effect(Some(EffectHandle::from_path("fx/fire"))))
            .unwrap();
        session.spawn_selected().unwrap();
        session.test_selected_skill().unwrap();
        assert_eq!(session.scene().active_effects().len(), 1);

        // 6 seconds of 50ms frames
        for _ in 0..120 {
            session.advance(Duration::from_millis(50));
        }

        assert!(session.scene().active_effects().is_empty());
        assert_eq!(session.test_selected_skill(), Ok(UseOutcome::Activated));
    }

    #[test]
    fn test_single_long_frame_expires_cooldown() {
        let (mut session, _, _) = session_with_fireball();
        session.spawn_selected().unwrap();
        session.test_selected_skill().unwrap();

        session.advance(Duration::from_secs(6));
        assert_eq!(session.test_selected_skill(), Ok(UseOutcome::Activated));
    }

    #[test]
    fn test_effect_expires_on_time_with_frame_ticks() {
        let (mut session, _, _) = session_with_fireball();
        session
            .edit_selected_skill(SkillEdit::new().effect(Some(EffectHandle::from_path("fx/fire"))))
            .unwrap();
        session.spawn_selected().unwrap();
        session.test_selected_skill().unwrap();

        for _ in 0..180 {
            session.tick(1.0 / 60.0);
        }
        assert!(session.scene().active_effects().is_empty());
    }

    #[test]
    fn test_dropping_session_destroys_preview() {
        let mut scene = HeadlessScene::new();
        {
            let mut session =
                EditorSession::open(EditorConfig::default(), MemoryStore::new(), &mut scene)
                    .unwrap();
            session
                .add_character("Mage", Some(TemplateHandle::from_path("prefabs/mage")))
                .unwrap();
            session.spawn_selected().unwrap();
            assert_eq!(session.scene().instance_count(), 1);
        }
        assert_eq!(scene.instance_count(), 0);
    }

    #[test]
    fn test_spawn_replaces_previous_instance() {
        let (mut session, _, _) = session_with_fireball();
        let first = session.spawn_selected().unwrap();
        let second = session.spawn_selected().unwrap();

        assert_ne!(first, second);
        assert_eq!(session.scene().instance_count(), 1);
        assert_eq!(session.spawned().count(), 1);
    }

    #[test]
    fn test_spawn_without_template_keeps_preview() {
        let (mut session, _, _) = session_with_fireball();
        let instance = session.spawn_selected().unwrap();

        session.add_character("Ghost", None).unwrap();
        assert_eq!(
            session.spawn_selected(),
            Err(EditorError::Spawn(SpawnError::MissingTemplate(
                "Ghost".to_string()
            )))
        );
        assert_eq!(session.active_instance(), Some(instance));
    }

    #[test]
    fn test_test_skill_requires_instance() {
        let (mut session, _, _) = session_with_fireball();
        assert_eq!(
            session.test_selected_skill(),
            Err(EditorError::NoActiveInstance)
        );
    }

    #[test]
    fn test_delete_character_destroys_its_preview() {
        let (mut session, mage, fireball) = session_with_fireball();
        session.spawn_selected().unwrap();
        session.select_character(mage).unwrap();

        let removed = session.delete_selected_character().unwrap();
        assert_eq!(removed.skill_count(), 1);
        assert!(session.active_instance().is_none());
        assert_eq!(session.scene().instance_count(), 0);
        assert_eq!(session.spawned().count(), 0);
        assert!(session.status_label().is_none());
        assert_eq!(
            session.roster().skill(fireball),
            Err(RosterError::SkillNotFound(fireball))
        );
    }

    #[test]
    fn test_delete_other_character_keeps_preview() {
        let (mut session, _, _) = session_with_fireball();
        let instance = session.spawn_selected().unwrap();
        session.add_character("Knight", None).unwrap();

        session.delete_selected_character().unwrap();
        assert_eq!(session.active_instance(), Some(instance));
    }

    #[test]
    fn test_delete_selected_skill() {
        let (mut session, mage, _) = session_with_fireball();
        session.delete_selected_skill().unwrap();

        assert!(session.selected_skill().is_none());
        assert_eq!(session.roster().character(mage).unwrap().skill_count(), 0);
        assert_eq!(
            session.delete_selected_skill(),
            Err(EditorError::NoSkillSelected)
        );
    }

    #[test]
    fn test_reset_discards_unsaved_changes() {
        let (mut session, mage, fireball) = session_with_fireball();
        session.spawn_selected().unwrap();

        session.store.set_offline(true);
        assert!(matches!(
            session.add_skill("Frostbolt"),
            Err(EditorError::Store(_))
        ));
        assert_eq!(session.roster().character(mage).unwrap().skill_count(), 2);

        session.store.set_offline(false);
        session.reset().unwrap();

        assert!(session.active_instance().is_none());
        assert!(session.selected_character().is_none());
        assert_eq!(session.roster().character(mage).unwrap().skill_count(), 1);
        assert!(session.roster().skill(fireball).is_ok());
    }
}
