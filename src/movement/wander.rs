//! Random wandering between nearby points.

use glam::Vec2;

use super::Movement;
use crate::host::{FrameStore, RandomSource, TickContext};

/// State of the current wander cycle.
///
/// A cycle either holds still or walks toward [`WanderState::noise_pos`];
/// the choice is only revisited once [`WanderState::random_delay`] seconds
/// of scaled time have passed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WanderState {
    /// Length of the current cycle in seconds.
    pub random_delay: f32,
    /// Decision value drawn at the start of the cycle, in `[0, 1)`.
    pub noise_action: f32,
    /// Point walked toward during a walking cycle.
    pub noise_pos: Vec2,
}

impl WanderState {
    /// Whether the cycle walks, given the hold probability.
    #[must_use]
    pub fn walks(&self, hold_probability: f32) -> bool {
        self.noise_action >= hold_probability
    }
}

impl Movement {
    /// Advances the wander cycle by one tick.
    ///
    /// When the cycle expires a new one is drawn: the decision value first,
    /// then its duration from the hold or walk range, then a target inside a
    /// box of half-width `radius * move_speed` around the current position,
    /// x before y. Otherwise a walking cycle steps toward its target.
    pub fn random_movement<F, R>(&mut self, frames: &mut F, rng: &mut R, tick: TickContext)
    where
        F: FrameStore + ?Sized,
        R: RandomSource + ?Sized,
    {
        self.delay_timer += tick.scaled_delta();
        if self.delay_timer > self.wander.random_delay {
            self.delay_timer = 0.0;
            self.draw_cycle(frames, rng);
        } else if self.wander.walks(self.config.hold_probability) {
            self.move_to_position(frames, self.wander.noise_pos, tick.speed_scale);
        }
    }

    fn draw_cycle<F, R>(&mut self, frames: &F, rng: &mut R)
    where
        F: FrameStore + ?Sized,
        R: RandomSource + ?Sized,
    {
        let noise_action = rng.value();
        let delay = if noise_action < self.config.hold_probability {
            self.config.hold_delay
        } else {
            self.config.walk_delay
        };
        let random_delay = rng.range(delay.min, delay.max);

        let frame = self.owner.frame;
        let position = frames.position(frame).unwrap_or(Vec2::ZERO);
        let half_width = frames.radius(frame).unwrap_or(0.0) * self.move_speed;
        let noise_pos = Vec2::new(
            rng.range(position.x - half_width, position.x + half_width),
            rng.range(position.y - half_width, position.y + half_width),
        );

        self.wander = WanderState {
            random_delay,
            noise_action,
            noise_pos,
        };
    }
}
