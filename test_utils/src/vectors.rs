//! Assertions over planar positions.

use glam::Vec2;
use tether::{FrameId, FrameStore};

/// Assert that `actual` lies within `tolerance` of `expected`.
///
/// # Panics
/// Panics with both vectors and their distance when they differ by more
/// than `tolerance`.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::assert_vec2_near;
/// assert_vec2_near(Vec2::new(1.0, 2.0), Vec2::new(1.0, 2.000_001), 1e-4);
/// ```
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, tolerance: f32) {
    let distance = actual.distance(expected);
    assert!(
        distance <= tolerance,
        "expected {expected} but found {actual} (off by {distance})"
    );
}

/// Resolved position of `frame`.
///
/// # Panics
/// Panics when the store has no such frame.
pub fn frame_position<F: FrameStore + ?Sized>(frames: &F, frame: FrameId) -> Vec2 {
    frames
        .position(frame)
        .unwrap_or_else(|| panic!("{frame} has no position"))
}
