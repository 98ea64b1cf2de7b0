#![cfg_attr(docsrs, feature(doc_cfg))]
//! Steering behaviours for 2D simulated entities.
//!
//! A [`Movement`] walks its entity toward points, wanders between random
//! nearby points, seeks the nearest entity of a category and attaches to the
//! first entity of another category it touches. Behaviours reach the world
//! only through the traits in [`host`]; [`scene::Scene`] implements them in
//! memory and [`plugin::MovementPlugin`] runs a scene inside Bevy.
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod logging;
pub mod movement;
pub mod plugin;
pub mod random;
pub mod scene;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use config::{DelayRange, MovementConfig, Settings, SimulationSettings};
pub use error::{ConfigError, MovementError};
pub use host::{
    Category, CategoryRegistry, Collider, EntityHandle, EntityId, FrameId, FrameStore,
    Neighbourhood, OwnerRegistry, RandomSource, SpatialQuery, TickContext,
};
pub use logging::init as init_logging;
pub use movement::{Movement, WanderState};
pub use plugin::{BodyFrame, MovementFault, MovementPlugin, SceneResource};
pub use random::SeededRandom;
pub use scene::{BodySpec, Scene, Steering};
pub use vector_math::{normalize_or_zero, step_toward};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tether::prelude::*;
    //! ```

    pub use crate::host::{FrameStore, RandomSource};
    pub use crate::BodySpec;
    pub use crate::Category;
    pub use crate::Movement;
    pub use crate::MovementPlugin;
    pub use crate::Scene;
    pub use crate::Settings;
    pub use crate::Steering;
    pub use glam::Vec2;
}
