// Per-skill cooldown state machine

use std::collections::HashMap;

use crate::engine::game_loop::TIME_EPSILON;

use super::skill::SkillId;

/// Remaining cooldown below this counts as expired
pub const COOLDOWN_EPSILON: f32 = TIME_EPSILON;

/// Cooldown state of a single skill
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillCooldown {
    /// Can be used
    Ready,
    /// Recently used, `remaining` is always positive
    OnCooldown { remaining: f32 },
}

impl Default for SkillCooldown {
    fn default() -> Self {
        Self::Ready
    }
}

impl SkillCooldown {
    /// Enter the cooldown state for `duration` seconds
    pub fn started(duration: f32) -> Self {
        if duration > COOLDOWN_EPSILON {
            Self::OnCooldown {
                remaining: duration,
            }
        } else {
            Self::Ready
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Seconds left, zero when ready
    pub fn remaining(&self) -> f32 {
        match self {
            Self::Ready => 0.0,
            Self::OnCooldown { remaining } => *remaining,
        }
    }

    /// Decay by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if let Self::OnCooldown { remaining } = self {
            let left = *remaining - dt;
            *self = if left <= COOLDOWN_EPSILON {
                Self::Ready
            } else {
                Self::OnCooldown { remaining: left }
            };
        }
    }
}

/// Cooldowns of every skill one instance has used
#[derive(Debug, Default, Clone)]
pub struct CooldownTracker {
    entries: HashMap<SkillId, SkillCooldown>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a skill; skills never used are ready
    pub fn state(&self, skill: SkillId) -> SkillCooldown {
        self.entries.get(&skill).copied().unwrap_or_default()
    }

    pub fn is_ready(&self, skill: SkillId) -> bool {
        self.state(skill).is_ready()
    }

    pub fn remaining(&self, skill: SkillId) -> f32 {
        self.state(skill).remaining()
    }

    /// Put a skill on cooldown for `duration` seconds
    pub fn start(&mut self, skill: SkillId, duration: f32) {
        match SkillCooldown::started(duration) {
            SkillCooldown::Ready => {
                self.entries.remove(&skill);
            }
            state => {
                self.entries.insert(skill, state);
            }
        }
    }

    /// Decay every running cooldown by `dt` seconds
    ///
    /// Non-positive or NaN deltas are ignored. Expired entries are dropped so
    /// the map only ever holds skills that are actually cooling down.
    pub fn tick(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        for state in self.entries.values_mut() {
            state.tick(dt);
        }
        self.entries.retain(|_, state| !state.is_ready());
    }

    /// Number of skills currently cooling down
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Make every skill ready again
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
