//! Nearest-entity search and seeking.

use log::{debug, warn};

use super::Movement;
use crate::error::MovementError;
use crate::host::{Category, Collider, FrameId, FrameStore, Neighbourhood, TickContext};

impl Movement {
    /// Finds the nearest other entity tagged `category`.
    ///
    /// Returns `Ok(None)` straight away when no other entity carries the
    /// category. Otherwise searches circles of growing radius around the
    /// owner, starting at and growing by `search_growth` body radii, until
    /// one holds a match; several matches are resolved with
    /// [`Movement::find_closest_of_list`]. The owner never matches itself.
    ///
    /// # Errors
    /// Returns [`MovementError::SpatialSearchExhausted`] when the radius
    /// passes `search_limit` body radii without a match.
    pub fn find_nearest_entity<W>(
        &self,
        world: &W,
        category: &Category,
    ) -> Result<Option<FrameId>, MovementError>
    where
        W: Neighbourhood + ?Sized,
    {
        let mut expected = world.count_with_category(category.as_str());
        if self.owner.category == *category {
            expected = expected.saturating_sub(1);
        }
        if expected == 0 {
            return Ok(None);
        }

        let frame = self.owner.frame;
        let (Some(origin), Some(body_radius)) = (world.position(frame), world.radius(frame)) else {
            return Ok(None);
        };
        let step = self.config.search_growth * body_radius;
        let limit = self.config.search_limit * body_radius;
        let exhausted = |radius: f32| MovementError::SpatialSearchExhausted {
            entity: self.owner.id,
            category: category.clone(),
            radius,
            expected,
        };
        if !(step > 0.0 && limit.is_finite()) {
            return Err(exhausted(0.0));
        }

        let mut radius = step;
        loop {
            let candidates: Vec<Collider> = world
                .query_within_radius(origin, radius)
                .into_iter()
                .filter(|c| c.category == *category && c.frame != frame)
                .collect();
            match candidates.as_slice() {
                [] => {}
                [only] => return Ok(Some(only.frame)),
                _ => return Ok(self.find_closest_of_list(world, &candidates)),
            }
            if radius > limit {
                return Err(exhausted(radius));
            }
            radius += step;
        }
    }

    /// Picks the candidate nearest to the owner.
    ///
    /// Candidates are scanned in order with a strict comparison, so the
    /// first of several equally near candidates wins. Candidates whose frame
    /// has no position are skipped.
    pub fn find_closest_of_list<F>(&self, frames: &F, candidates: &[Collider]) -> Option<FrameId>
    where
        F: FrameStore + ?Sized,
    {
        let origin = frames.position(self.owner.frame)?;
        let mut best = f32::INFINITY;
        let mut closest = None;
        for candidate in candidates {
            let Some(position) = frames.position(candidate.frame) else {
                continue;
            };
            let distance = origin.distance(position);
            if distance < best {
                best = distance;
                closest = Some(candidate.frame);
            }
        }
        closest
    }

    /// Seeks the nearest entity tagged `category`.
    ///
    /// The cached nearest entity is refreshed whenever more than
    /// `closest_refresh_interval` seconds of scaled time have accumulated;
    /// every tick then calls [`Movement::move_to_entity`] with the cache.
    ///
    /// # Errors
    /// Returns the locator's error when a refresh fails. The failure is
    /// logged, the cache is cleared and the tick still completes.
    pub fn move_to_closest_entity<W>(
        &mut self,
        world: &mut W,
        category: &Category,
        tick: TickContext,
    ) -> Result<(), MovementError>
    where
        W: Neighbourhood + ?Sized,
    {
        let mut outcome = Ok(());
        self.delay_timer += tick.scaled_delta();
        if self.delay_timer > self.config.closest_refresh_interval {
            self.delay_timer = 0.0;
            self.closest = match self.find_nearest_entity(&*world, category) {
                Ok(found) => {
                    debug!("entity {} nearest `{category}`: {found:?}", self.owner.id);
                    found
                }
                Err(e) => {
                    warn!("{e}");
                    outcome = Err(e);
                    None
                }
            };
        }
        self.move_to_entity(world, self.closest, tick.speed_scale);
        outcome
    }

    /// Moves toward `target`, or binds to the touched entity once attached.
    ///
    /// Without a target nothing happens. While not attached the owner steps
    /// toward the target's position. While attached the owner's frame is
    /// parented to the touched frame, if it is not already.
    pub fn move_to_entity<F>(&self, frames: &mut F, target: Option<FrameId>, speed_scale: f32)
    where
        F: FrameStore + ?Sized,
    {
        let Some(target) = target else {
            return;
        };
        let frame = self.owner.frame;
        match self.touching {
            None => {
                if let Some(position) = frames.position(target) {
                    self.move_to_position(frames, position, speed_scale);
                }
            }
            Some(touched) if frames.parent(frame) != Some(touched) => {
                if frames.set_parent(frame, Some(touched)) {
                    debug!("entity {} bound to {touched}", self.owner.id);
                } else {
                    debug!("entity {} could not bind to {touched}", self.owner.id);
                }
            }
            Some(_) => {}
        }
    }
}
