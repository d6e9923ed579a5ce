// Authoring and runtime defaults

/// Settings shared by the roster, the executors and the authoring session
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    // Runtime
    /// Seconds a spawned skill effect stays in the scene
    pub effect_lifetime: f32,
    /// Length of one cooldown decay tick (seconds)
    pub fixed_timestep: f32,

    // New skill defaults
    /// Cooldown given to freshly added skills (seconds)
    pub default_cooldown: f32,
    /// Damage given to freshly added skills
    pub default_damage: f32,
    /// Placeholder description for freshly added skills
    pub default_description: &'static str,

    // Persistence
    /// Key the roster is stored under
    pub config_path: &'static str,
}

/// Default authoring and runtime settings
pub const BASE_CONFIG: EditorConfig = EditorConfig {
    effect_lifetime: 3.0,
    fixed_timestep: 1.0 / 60.0,

    default_cooldown: 1.0,
    default_damage: 10.0,
    default_description: "New skill description",

    config_path: "Assets/SkillConfig.asset",
};

impl Default for EditorConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl EditorConfig {
    /// Override the effect lifetime
    pub fn with_effect_lifetime(mut self, seconds: f32) -> Self {
        self.effect_lifetime = seconds;
        self
    }

    /// Override the decay tick length
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }
}
