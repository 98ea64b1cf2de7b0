//! Identity types and the collaborator traits a host world provides.
//!
//! A [`crate::Movement`] never owns world state. Every read of another
//! entity's position, every spatial query and every random draw goes through
//! one of the traits below, so the same behaviour runs against the in-memory
//! [`crate::Scene`], a Bevy world, or a test double.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use glam::Vec2;

/// Identifier of a simulated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a position frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u32);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame:{}", self.0)
    }
}

/// Category tag partitioning entities into kinds.
///
/// Cloning is cheap; the label is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(Arc<str>);

impl Category {
    /// Creates a category from its label.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The owning entity a [`crate::Movement`] points back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityHandle {
    /// Entity identity, used in diagnostics.
    pub id: EntityId,
    /// Frame carrying the entity's position.
    pub frame: FrameId,
    /// The entity's own category.
    pub category: Category,
}

/// A collider reported by a spatial query or a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collider {
    /// Frame the collider is attached to.
    pub frame: FrameId,
    /// Category of the collider's entity.
    pub category: Category,
}

/// Per-tick timing handed to behaviour methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Seconds elapsed since the previous tick.
    pub delta_seconds: f32,
    /// Global time multiplier.
    pub speed_scale: f32,
}

impl TickContext {
    /// Creates a context for a tick of `delta_seconds` at `speed_scale`.
    #[must_use]
    pub const fn new(delta_seconds: f32, speed_scale: f32) -> Self {
        Self {
            delta_seconds,
            speed_scale,
        }
    }

    /// Elapsed time after applying the speed scale.
    #[must_use]
    pub fn scaled_delta(&self) -> f32 {
        self.delta_seconds * self.speed_scale
    }
}

/// Position frames: absolute positions, body radii and parent links.
pub trait FrameStore {
    /// Absolute position with any attachment chain resolved.
    fn position(&self, frame: FrameId) -> Option<Vec2>;

    /// Body radius (uniform scale) of the frame.
    fn radius(&self, frame: FrameId) -> Option<f32>;

    /// Moves the frame to an absolute position.
    ///
    /// A parented frame keeps its parent and takes the new position as its
    /// offset from the parent.
    fn set_position(&mut self, frame: FrameId, position: Vec2);

    /// Frame this frame is rigidly attached to, if any.
    fn parent(&self, frame: FrameId) -> Option<FrameId>;

    /// Attaches `frame` to `parent`, or detaches it when `parent` is `None`.
    ///
    /// Returns `false` when either frame is unknown or the link would form a
    /// cycle; the frame is left unchanged in that case.
    fn set_parent(&mut self, frame: FrameId, parent: Option<FrameId>) -> bool;
}

/// Circular overlap queries against every collider in the world.
pub trait SpatialQuery {
    /// Colliders overlapping the circle at `point`, in a stable order.
    fn query_within_radius(&self, point: Vec2, radius: f32) -> Vec<Collider>;
}

/// Counts of entities per category.
pub trait CategoryRegistry {
    /// Number of entities tagged `category` anywhere in the world.
    fn count_with_category(&self, category: &str) -> usize;
}

/// Maps frames to the entity whose Movement component owns them.
pub trait OwnerRegistry {
    /// Owning entity of `frame`, or `None` when the frame carries no
    /// Movement component.
    fn movement_owner(&self, frame: FrameId) -> Option<EntityId>;
}

/// Uniform random draws.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn value(&mut self) -> f32;

    /// Uniform value in `[low, high)`; an empty range yields `low`.
    fn range(&mut self, low: f32, high: f32) -> f32 {
        let unit = self.value();
        low + (high - low) * unit
    }
}

/// Everything a seeking agent needs from the world.
pub trait Neighbourhood: FrameStore + SpatialQuery + CategoryRegistry {}

impl<T: FrameStore + SpatialQuery + CategoryRegistry> Neighbourhood for T {}
