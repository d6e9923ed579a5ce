/// Fixed timestep clock driving cooldown decay
///
/// Callers report how long each frame took; the loop turns that into a whole
/// number of fixed-size ticks so decay is independent of frame rate. Every
/// reported second is consumed, a long frame simply yields more ticks.
use std::time::Duration;

/// Default tick rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Timers closer to zero than this count as expired, absorbing f32 drift from
/// summing many small ticks
pub const TIME_EPSILON: f32 = 1e-4;

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Length of one tick
    timestep: Duration,

    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,
}

impl GameLoop {
    /// Create a new game loop ticking at [`FIXED_TIMESTEP`]
    pub fn new() -> Self {
        Self::with_timestep(FIXED_TIMESTEP)
    }

    /// Create a game loop with a custom tick length in seconds
    pub fn with_timestep(seconds: f32) -> Self {
        let timestep = Duration::try_from_secs_f32(seconds)
            .ok()
            .filter(|step| !step.is_zero())
            .unwrap_or_else(|| {
                log::warn!("Invalid timestep {seconds}, falling back to {FIXED_TIMESTEP}");
                Duration::from_secs_f32(FIXED_TIMESTEP)
            });

        Self {
            timestep,
            accumulator: Duration::ZERO,
        }
    }

    /// Feed one frame's duration, returns the number of fixed ticks to run
    ///
    /// The remainder shorter than one tick carries into the next frame.
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(frame_time);

        let whole = self.accumulator.as_nanos() / self.timestep.as_nanos();
        let ticks = u32::try_from(whole).unwrap_or(u32::MAX);
        self.accumulator -= self.timestep * ticks;

        if ticks > 1 {
            log::trace!("Frame of {:?} ran {} ticks", frame_time, ticks);
        }
        ticks
    }

    /// Get the tick length in seconds
    pub fn fixed_timestep(&self) -> f32 {
        self.timestep.as_secs_f32()
    }

    /// Time fed but not yet consumed by a tick
    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
