//! Contact-driven attachment and detachment.

use log::{debug, warn};

use super::Movement;
use crate::error::MovementError;
use crate::host::{Collider, EntityId, FrameId, FrameStore, OwnerRegistry};

impl Movement {
    /// Handles a sustained overlap with `other`.
    ///
    /// The first contact with an entity of a different category attaches the
    /// owner to it. Further contacts are ignored until [`Movement::detach`].
    /// Returns whether this contact attached.
    pub fn on_sustained_contact(&mut self, other: &Collider) -> bool {
        if self.touching.is_some()
            || other.frame == self.owner.frame
            || other.category == self.owner.category
        {
            return false;
        }
        debug!(
            "entity {} touching {} (`{}`)",
            self.owner.id, other.frame, other.category
        );
        self.touching = Some(other.frame);
        true
    }

    /// Releases the attachment.
    ///
    /// The owner's frame is unparented and pinned to the absolute position
    /// it had while attached, so it does not jump.
    pub fn detach<F>(&mut self, frames: &mut F)
    where
        F: FrameStore + ?Sized,
    {
        let frame = self.owner.frame;
        let current = frames.position(frame);
        frames.set_parent(frame, None);
        if let Some(position) = current {
            frames.set_position(frame, position);
        }
        if let Some(touched) = self.touching.take() {
            debug!("entity {} detached from {touched}", self.owner.id);
        }
    }

    /// Whether the owner is attached to another entity.
    #[must_use]
    pub const fn attached(&self) -> bool {
        self.touching.is_some()
    }

    /// Frame of the entity the owner is attached to.
    #[must_use]
    pub const fn touching_frame(&self) -> Option<FrameId> {
        self.touching
    }

    /// Entity the owner is attached to.
    ///
    /// The touched frame is resolved through its Movement component. A frame
    /// without one yields `None` and a logged
    /// [`MovementError::MissingComponent`].
    pub fn touching_entity<R>(&self, registry: &R) -> Option<EntityId>
    where
        R: OwnerRegistry + ?Sized,
    {
        let frame = self.touching?;
        let owner = registry.movement_owner(frame);
        if owner.is_none() {
            warn!(
                "{}",
                MovementError::MissingComponent {
                    entity: self.owner.id,
                    frame,
                }
            );
        }
        owner
    }
}
