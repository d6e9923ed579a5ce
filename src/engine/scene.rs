// Scene host abstraction
//
// Everything that would touch a real scene graph goes through `SceneHost`.
// `HeadlessScene` keeps the bookkeeping in memory so the demo binary and the
// tests can run without an engine.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;

use super::assets::{EffectHandle, TemplateHandle};
use super::game_loop::TIME_EPSILON;

/// Identifier of a live instance in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

/// Collaborator that owns visual representations
pub trait SceneHost {
    /// Instantiate `template` at `position` and return the new instance
    fn instantiate(&mut self, template: TemplateHandle, position: Vec3, name: &str) -> InstanceId;

    /// Destroy an instance, returns false when it was already gone
    fn destroy(&mut self, instance: InstanceId) -> bool;

    /// Current position of an instance
    fn position(&self, instance: InstanceId) -> Option<Vec3>;

    /// Spawn a transient effect that removes itself after `lifetime` seconds
    fn spawn_effect(&mut self, effect: EffectHandle, position: Vec3, lifetime: f32);

    /// Advance scene-owned timers such as effect lifetimes
    fn advance(&mut self, _dt: f32) {}
}

/// Lets a session drive a scene it doesn't own
impl<H: SceneHost + ?Sized> SceneHost for &mut H {
    fn instantiate(&mut self, template: TemplateHandle, position: Vec3, name: &str) -> InstanceId {
        (**self).instantiate(template, position, name)
    }

    fn destroy(&mut self, instance: InstanceId) -> bool {
        (**self).destroy(instance)
    }

    fn position(&self, instance: InstanceId) -> Option<Vec3> {
        (**self).position(instance)
    }

    fn spawn_effect(&mut self, effect: EffectHandle, position: Vec3, lifetime: f32) {
        (**self).spawn_effect(effect, position, lifetime)
    }

    fn advance(&mut self, dt: f32) {
        (**self).advance(dt)
    }
}

/// An instance living in a [`HeadlessScene`]
#[derive(Debug, Clone)]
pub struct SceneInstance {
    pub name: String,
    pub template: TemplateHandle,
    pub position: Vec3,
}

/// A transient effect waiting to expire
#[derive(Debug, Clone)]
pub struct ActiveEffect {
    pub effect: EffectHandle,
    pub position: Vec3,
    /// Seconds until removal
    pub remaining: f32,
}

/// In-memory scene used when no engine is attached
#[derive(Debug, Default)]
pub struct HeadlessScene {
    instances: HashMap<InstanceId, SceneInstance>,
    effects: Vec<ActiveEffect>,
    next_id: u32,
    effects_spawned: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance effect lifetimes, removing the ones that ran out
    pub fn update(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        let before = self.effects.len();
        for effect in &mut self.effects {
            effect.remaining -= dt;
        }
        self.effects.retain(|effect| effect.remaining > TIME_EPSILON);

        let expired = before - self.effects.len();
        if expired > 0 {
            log::debug!("{} effect(s) expired", expired);
        }
    }

    /// Look up an instance
    pub fn instance(&self, id: InstanceId) -> Option<&SceneInstance> {
        self.instances.get(&id)
    }

    /// Move an instance
    pub fn set_position(&mut self, id: InstanceId, position: Vec3) -> bool {
        match self.instances.get_mut(&id) {
            Some(instance) => {
                instance.position = position;
                true
            }
            None => false,
        }
    }

    /// Effects still alive
    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    /// Number of live instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Total effects ever spawned
    pub fn effects_spawned(&self) -> u64 {
        self.effects_spawned
    }
}

impl SceneHost for HeadlessScene {
    fn instantiate(&mut self, template: TemplateHandle, position: Vec3, name: &str) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;

        self.instances.insert(
            id,
            SceneInstance {
                name: name.to_string(),
                template,
                position,
            },
        );
        log::debug!("Instantiated '{}' as {} at {}", name, id, position);
        id
    }

    fn destroy(&mut self, instance: InstanceId) -> bool {
        self.instances.remove(&instance).is_some()
    }

    fn position(&self, instance: InstanceId) -> Option<Vec3> {
        self.instances.get(&instance).map(|i| i.position)
    }

    fn spawn_effect(&mut self, effect: EffectHandle, position: Vec3, lifetime: f32) {
        self.effects_spawned += 1;
        self.effects.push(ActiveEffect {
            effect,
            position,
            remaining: lifetime,
        });
    }

    fn advance(&mut self, dt: f32) {
        self.update(dt);
    }
}
