//! Utility helpers for tests.
pub mod random;
pub mod vectors;

pub use random::ScriptedRandom;
pub use vectors::{assert_vec2_near, frame_position};
