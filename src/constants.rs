//! Default tuning for movement behaviour.
//!
//! These are the values [`crate::config::MovementConfig`] and
//! [`crate::config::SimulationSettings`] fall back to when a field is absent
//! from a settings file.

/// Move speed applied when an agent is initialised with a zero speed.
pub const DEFAULT_MOVE_SPEED: f32 = 1.0;
/// Fraction of a body radius covered per tick at unit speed.
pub const STEP_FACTOR: f32 = 0.02;
/// Seconds between refreshes of the cached nearest entity.
pub const CLOSEST_REFRESH_INTERVAL: f32 = 0.2;
/// Decision values below this threshold hold still for the wander cycle.
pub const HOLD_PROBABILITY: f32 = 0.4;
/// Bounds of a "hold still" wander cycle, in seconds.
pub const HOLD_DELAY_MIN: f32 = 0.5;
/// Upper bound of a "hold still" wander cycle, in seconds.
pub const HOLD_DELAY_MAX: f32 = 2.0;
/// Lower bound of a "walk" wander cycle, in seconds.
pub const WALK_DELAY_MIN: f32 = 0.5;
/// Upper bound of a "walk" wander cycle, in seconds.
pub const WALK_DELAY_MAX: f32 = 3.0;
/// Search radius increment for the nearest-entity locator, in body radii.
pub const SEARCH_GROWTH: f32 = 2.0;
/// Search radius beyond which the locator gives up, in body radii.
pub const SEARCH_LIMIT: f32 = 1000.0;
/// Seed used by headless runs unless overridden.
pub const DEFAULT_SEED: u64 = 42;
/// Global time multiplier applied to every agent.
pub const DEFAULT_SPEED_SCALE: f32 = 1.0;
/// Fixed simulation rate in ticks per second.
pub const DEFAULT_TICK_HZ: f64 = 60.0;
/// Search failures a scene keeps before dropping the oldest.
pub const FAULT_BACKLOG: usize = 256;
