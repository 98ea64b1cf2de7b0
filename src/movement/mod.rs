//! Per-entity movement behaviour.
//!
//! A [`Movement`] is owned by one entity and driven once per tick. It walks
//! its entity's frame toward points, wanders between random nearby points,
//! seeks the nearest entity of a category and, once it touches an entity of
//! another category, binds its frame rigidly to that entity until detached.
//!
//! All world access goes through the traits in [`crate::host`]; the
//! behaviour mutates only its own state and its own frame.

mod attach;
mod locate;
mod wander;

use glam::Vec2;
use log::trace;

use crate::config::MovementConfig;
use crate::host::{EntityHandle, FrameId, FrameStore};
use crate::vector_math::step_toward;

pub use wander::WanderState;

/// Movement component attached to a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    owner: EntityHandle,
    move_speed: f32,
    config: MovementConfig,
    /// Accumulates scaled time for both the wander cycle and the seek refresh.
    delay_timer: f32,
    wander: WanderState,
    /// Frame of the entity this one is touching. `Some` exactly while attached.
    touching: Option<FrameId>,
    closest: Option<FrameId>,
}

impl Movement {
    /// Creates the component for `owner`.
    ///
    /// A non-zero `move_speed` is used as given; zero keeps the configured
    /// default speed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether::{Category, EntityHandle, EntityId, FrameId, Movement, MovementConfig};
    /// let owner = EntityHandle {
    ///     id: EntityId(1),
    ///     frame: FrameId(1),
    ///     category: Category::new("prey"),
    /// };
    /// let movement = Movement::initialise(owner.clone(), 0.0, MovementConfig::default());
    /// assert!((movement.move_speed() - 1.0).abs() < f32::EPSILON);
    ///
    /// let quick = Movement::initialise(owner, 3.0, MovementConfig::default());
    /// assert!((quick.move_speed() - 3.0).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn initialise(owner: EntityHandle, move_speed: f32, config: MovementConfig) -> Self {
        let speed = if move_speed == 0.0 {
            config.move_speed
        } else {
            move_speed
        };
        Self {
            owner,
            move_speed: speed,
            config,
            delay_timer: 0.0,
            wander: WanderState::default(),
            touching: None,
            closest: None,
        }
    }

    /// The entity this component belongs to.
    #[must_use]
    pub const fn owner(&self) -> &EntityHandle {
        &self.owner
    }

    /// Speed multiplier applied to every step.
    #[must_use]
    pub const fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Tuning this component was created with.
    #[must_use]
    pub const fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Scaled seconds accumulated since the last wander decision or seek
    /// refresh.
    #[must_use]
    pub const fn delay_timer(&self) -> f32 {
        self.delay_timer
    }

    /// Current wander cycle.
    #[must_use]
    pub const fn wander(&self) -> &WanderState {
        &self.wander
    }

    /// Cached nearest entity from the last seek refresh.
    #[must_use]
    pub const fn closest_entity(&self) -> Option<FrameId> {
        self.closest
    }

    /// Distance covered by one step at `speed_scale` for a body of `radius`.
    #[must_use]
    pub fn step_length(&self, radius: f32, speed_scale: f32) -> f32 {
        radius * self.config.step_factor * self.move_speed * speed_scale
    }

    /// Steps the owner's frame toward `target`.
    ///
    /// The frame advances by [`Movement::step_length`] along the direction to
    /// the target, unless it is already within one body radius, in which case
    /// nothing happens. Returns whether the frame moved.
    pub fn move_to_position<F>(&self, frames: &mut F, target: Vec2, speed_scale: f32) -> bool
    where
        F: FrameStore + ?Sized,
    {
        let frame = self.owner.frame;
        let (Some(position), Some(radius)) = (frames.position(frame), frames.radius(frame)) else {
            trace!("entity {} has no frame to move", self.owner.id);
            return false;
        };
        if position.distance(target) <= radius {
            return false;
        }
        frames.set_position(
            frame,
            step_toward(position, target, self.step_length(radius, speed_scale)),
        );
        true
    }
}
