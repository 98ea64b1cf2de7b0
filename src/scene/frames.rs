//! Frame table backing the scene.

use glam::Vec2;
use hashbrown::HashMap;

use crate::host::{
    Category, CategoryRegistry, Collider, EntityId, FrameId, FrameStore, OwnerRegistry,
    SpatialQuery,
};

#[derive(Debug, Clone)]
struct FrameSlot {
    category: Category,
    radius: f32,
    /// Absolute position when unparented, offset from the parent otherwise.
    local: Vec2,
    parent: Option<FrameId>,
    owner: Option<EntityId>,
}

/// Every frame in a scene, indexed by [`FrameId`] in spawn order.
///
/// Attachment is stored as an offset from the parent and resolved when a
/// position is read, so a bound frame follows its parent without any
/// per-tick bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct FrameTable {
    slots: Vec<FrameSlot>,
    counts: HashMap<Category, usize>,
}

impl FrameTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unparented frame and returns its id.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Scenes never approach u32::MAX frames."
    )]
    pub fn insert(&mut self, category: Category, position: Vec2, radius: f32) -> FrameId {
        let id = FrameId(self.slots.len() as u32);
        *self.counts.entry(category.clone()).or_insert(0) += 1;
        self.slots.push(FrameSlot {
            category,
            radius,
            local: position,
            parent: None,
            owner: None,
        });
        id
    }

    /// Records `owner` as the entity whose Movement drives `frame`.
    pub fn set_owner(&mut self, frame: FrameId, owner: EntityId) {
        if let Some(slot) = self.slot_mut(frame) {
            slot.owner = Some(owner);
        }
    }

    /// Category of `frame`.
    #[must_use]
    pub fn category(&self, frame: FrameId) -> Option<&Category> {
        self.slot(frame).map(|slot| &slot.category)
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ids of every frame in spawn order.
    pub fn ids(&self) -> impl Iterator<Item = FrameId> + '_ {
        (0..self.slots.len()).filter_map(|index| u32::try_from(index).ok().map(FrameId))
    }

    /// Frames whose bodies overlap `frame`'s body, excluding `frame`.
    #[must_use]
    pub fn contacts_of(&self, frame: FrameId) -> Vec<Collider> {
        let (Some(origin), Some(radius)) = (self.position(frame), self.radius(frame)) else {
            return Vec::new();
        };
        self.ids()
            .filter(|&other| other != frame)
            .filter_map(|other| {
                let slot = self.slot(other)?;
                let position = self.position(other)?;
                (origin.distance(position) < radius + slot.radius).then(|| Collider {
                    frame: other,
                    category: slot.category.clone(),
                })
            })
            .collect()
    }

    fn slot(&self, frame: FrameId) -> Option<&FrameSlot> {
        self.slots.get(usize::try_from(frame.0).ok()?)
    }

    fn slot_mut(&mut self, frame: FrameId) -> Option<&mut FrameSlot> {
        self.slots.get_mut(usize::try_from(frame.0).ok()?)
    }

    /// Whether `ancestor` appears in `frame`'s parent chain, `frame` included.
    fn chain_contains(&self, frame: FrameId, ancestor: FrameId) -> bool {
        let mut current = Some(frame);
        for _ in 0..=self.slots.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.slot(id).and_then(|slot| slot.parent),
                None => return false,
            }
        }
        false
    }
}

impl FrameStore for FrameTable {
    fn position(&self, frame: FrameId) -> Option<Vec2> {
        let slot = self.slot(frame)?;
        let mut position = slot.local;
        let mut parent = slot.parent;
        // Cycles are refused by `set_parent`; the bound only guards corrupt tables.
        for _ in 0..self.slots.len() {
            let Some(id) = parent else {
                return Some(position);
            };
            let parent_slot = self.slot(id)?;
            position += parent_slot.local;
            parent = parent_slot.parent;
        }
        parent.is_none().then_some(position)
    }

    fn radius(&self, frame: FrameId) -> Option<f32> {
        self.slot(frame).map(|slot| slot.radius)
    }

    fn set_position(&mut self, frame: FrameId, position: Vec2) {
        let Some(parent) = self.slot(frame).map(|slot| slot.parent) else {
            return;
        };
        let origin = parent
            .and_then(|id| self.position(id))
            .unwrap_or(Vec2::ZERO);
        if let Some(slot) = self.slot_mut(frame) {
            slot.local = position - origin;
        }
    }

    fn parent(&self, frame: FrameId) -> Option<FrameId> {
        self.slot(frame).and_then(|slot| slot.parent)
    }

    fn set_parent(&mut self, frame: FrameId, parent: Option<FrameId>) -> bool {
        let Some(absolute) = self.position(frame) else {
            return false;
        };
        if let Some(new_parent) = parent {
            if self.slot(new_parent).is_none() || self.chain_contains(new_parent, frame) {
                return false;
            }
        }
        if let Some(slot) = self.slot_mut(frame) {
            slot.parent = parent;
        }
        self.set_position(frame, absolute);
        true
    }
}

impl SpatialQuery for FrameTable {
    fn query_within_radius(&self, point: Vec2, radius: f32) -> Vec<Collider> {
        self.ids()
            .filter_map(|frame| {
                let slot = self.slot(frame)?;
                let position = self.position(frame)?;
                (point.distance(position) <= radius + slot.radius).then(|| Collider {
                    frame,
                    category: slot.category.clone(),
                })
            })
            .collect()
    }
}

impl CategoryRegistry for FrameTable {
    fn count_with_category(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or(0)
    }
}

impl OwnerRegistry for FrameTable {
    fn movement_owner(&self, frame: FrameId) -> Option<EntityId> {
        self.slot(frame).and_then(|slot| slot.owner)
    }
}
