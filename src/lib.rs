// Character and skill authoring with cooldown-gated skill execution
//
// - `engine`: asset handles, the fixed-step clock and the scene host boundary
// - `game`: roster, skills, executors and the authoring session

pub mod engine;
pub mod game;

// Re-export commonly used types
pub use engine::assets::{EffectHandle, IconHandle, TemplateHandle};
pub use engine::scene::{HeadlessScene, InstanceId, SceneHost};
pub use game::characters::{
    CharacterDefinition, CharacterId, Roster, RosterError, SpawnError, SpawnedCharacters,
};
pub use game::config::EditorConfig;
pub use game::editor::{EditorError, EditorSession};
pub use game::skills::{SkillCooldown, SkillDefinition, SkillEdit, SkillExecutor, SkillId, UseOutcome};
pub use game::storage::{MemoryStore, RosterStore, StoreError};
