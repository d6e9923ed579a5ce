// Skill system
//
// - Skill definitions and partial edits
// - Per-skill cooldown state machine
// - Executor gating skill use for one spawned character

pub mod cooldown;
pub mod executor;
pub mod skill;

// Re-export commonly used types
pub use cooldown::{CooldownTracker, SkillCooldown, COOLDOWN_EPSILON};
pub use executor::{SkillExecutor, UseOutcome};
pub use skill::{SkillDefinition, SkillEdit, SkillId};
