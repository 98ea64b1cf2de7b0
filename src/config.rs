//! Runtime settings for agents and the simulation loop.
//!
//! Every field falls back to the matching value in [`crate::constants`], so a
//! settings file only needs the values it overrides:
//!
//! ```
//! use tether::config::Settings;
//! let settings = Settings::from_json_str(r#"{ "movement": { "move_speed": 2.5 } }"#)
//!     .expect("valid settings");
//! assert!((settings.movement.move_speed - 2.5).abs() < f32::EPSILON);
//! assert!((settings.movement.step_factor - 0.02).abs() < f32::EPSILON);
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CLOSEST_REFRESH_INTERVAL, DEFAULT_MOVE_SPEED, DEFAULT_SEED, DEFAULT_SPEED_SCALE,
    DEFAULT_TICK_HZ, HOLD_DELAY_MAX, HOLD_DELAY_MIN, HOLD_PROBABILITY, SEARCH_GROWTH,
    SEARCH_LIMIT, STEP_FACTOR, WALK_DELAY_MAX, WALK_DELAY_MIN,
};
use crate::error::ConfigError;

/// Closed interval of seconds a wander cycle may last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Shortest cycle.
    pub min: f32,
    /// Longest cycle.
    pub max: f32,
}

impl DelayRange {
    /// Creates a range from `min` to `max`.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min < 0.0 {
            return Err(ConfigError::invalid(field, "bounds must be finite and non-negative"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Tuning shared by every [`crate::Movement`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Speed used when an agent is initialised without one.
    pub move_speed: f32,
    /// Fraction of a body radius covered per tick at unit speed.
    pub step_factor: f32,
    /// Seconds between nearest-entity refreshes while seeking.
    pub closest_refresh_interval: f32,
    /// Probability that a wander cycle holds still.
    pub hold_probability: f32,
    /// Duration range of a holding cycle.
    pub hold_delay: DelayRange,
    /// Duration range of a walking cycle.
    pub walk_delay: DelayRange,
    /// Search radius increment, in body radii.
    pub search_growth: f32,
    /// Search radius bound, in body radii.
    pub search_limit: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            step_factor: STEP_FACTOR,
            closest_refresh_interval: CLOSEST_REFRESH_INTERVAL,
            hold_probability: HOLD_PROBABILITY,
            hold_delay: DelayRange::new(HOLD_DELAY_MIN, HOLD_DELAY_MAX),
            walk_delay: DelayRange::new(WALK_DELAY_MIN, WALK_DELAY_MAX),
            search_growth: SEARCH_GROWTH,
            search_limit: SEARCH_LIMIT,
        }
    }
}

impl MovementConfig {
    /// Checks every field against its domain.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err(ConfigError::invalid("movement.move_speed", "must be non-negative"));
        }
        positive("movement.step_factor", self.step_factor)?;
        positive(
            "movement.closest_refresh_interval",
            self.closest_refresh_interval,
        )?;
        if !(0.0..=1.0).contains(&self.hold_probability) {
            return Err(ConfigError::invalid(
                "movement.hold_probability",
                "must lie within [0, 1]",
            ));
        }
        self.hold_delay.validate("movement.hold_delay")?;
        self.walk_delay.validate("movement.walk_delay")?;
        positive("movement.search_growth", self.search_growth)?;
        positive("movement.search_limit", self.search_limit)?;
        Ok(())
    }
}

/// Settings for the simulation loop around the agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Seed for the scene's random source.
    pub seed: u64,
    /// Global time multiplier.
    pub speed_scale: f32,
    /// Fixed tick rate in Hz.
    pub tick_hz: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            speed_scale: DEFAULT_SPEED_SCALE,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl SimulationSettings {
    /// Length of one fixed tick.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for `simulation.tick_hz` when the
    /// rate is not positive or too large to yield a non-zero timestep.
    pub fn timestep(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.tick_hz.recip())
            .ok()
            .filter(|step| !step.is_zero())
            .ok_or_else(|| {
                ConfigError::invalid(
                    "simulation.tick_hz",
                    format!("{} Hz has no usable timestep", self.tick_hz),
                )
            })
    }

    /// Checks every field against its domain.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed_scale.is_finite() && self.speed_scale >= 0.0) {
            return Err(ConfigError::invalid(
                "simulation.speed_scale",
                "must be non-negative",
            ));
        }
        self.timestep().map(|_| ())
    }
}

/// Complete settings document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Agent tuning.
    pub movement: MovementConfig,
    /// Loop settings.
    pub simulation: SimulationSettings,
}

impl Settings {
    /// Parses and validates settings from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-domain values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a settings file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// as [`Settings::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Validates both sections.
    ///
    /// # Errors
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.simulation.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_document_uses_defaults() {
        let settings = Settings::from_json_str("{}").expect("defaults are valid");
        assert_eq!(settings, Settings::default());
    }

    #[rstest]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_json_str(
            r#"{ "simulation": { "seed": 7 }, "movement": { "hold_delay": { "min": 1.0, "max": 1.5 } } }"#,
        )
        .expect("valid settings");
        assert_eq!(settings.simulation.seed, 7);
        assert_eq!(settings.movement.hold_delay, DelayRange::new(1.0, 1.5));
        assert_eq!(settings.movement.walk_delay, DelayRange::new(0.5, 3.0));
    }

    #[rstest]
    #[case::negative_speed(r#"{ "movement": { "move_speed": -1.0 } }"#, "movement.move_speed")]
    #[case::zero_step(r#"{ "movement": { "step_factor": 0.0 } }"#, "movement.step_factor")]
    #[case::probability(r#"{ "movement": { "hold_probability": 1.5 } }"#, "movement.hold_probability")]
    #[case::inverted_delay(
        r#"{ "movement": { "walk_delay": { "min": 3.0, "max": 1.0 } } }"#,
        "movement.walk_delay"
    )]
    #[case::zero_growth(r#"{ "movement": { "search_growth": 0.0 } }"#, "movement.search_growth")]
    #[case::zero_rate(r#"{ "simulation": { "tick_hz": 0.0 } }"#, "simulation.tick_hz")]
    fn rejects_out_of_domain_values(#[case] text: &str, #[case] expected_field: &str) {
        match Settings::from_json_str(text) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    fn missing_file_is_an_io_error() {
        let result = Settings::load("/definitely/not/here/tether.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[rstest]
    fn timestep_inverts_rate() {
        let sim = SimulationSettings {
            tick_hz: 50.0,
            ..SimulationSettings::default()
        };
        let step = sim.timestep().expect("50 Hz is valid");
        assert!((step.as_secs_f64() - 0.02).abs() < 1e-9);
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-30.0)]
    #[case::infinite(f64::INFINITY)]
    #[case::nan(f64::NAN)]
    fn unusable_rates_have_no_timestep(#[case] tick_hz: f64) {
        let sim = SimulationSettings {
            tick_hz,
            ..SimulationSettings::default()
        };
        assert!(matches!(
            sim.timestep(),
            Err(ConfigError::Invalid {
                field: "simulation.tick_hz",
                ..
            })
        ));
        assert!(sim.validate().is_err());
    }
}
