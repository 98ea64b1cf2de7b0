//! In-memory host for running movement behaviours.
//!
//! A [`Scene`] owns every frame and every [`Movement`] and implements the
//! collaborator traits in [`crate::host`] over plain tables. Each
//! [`Scene::tick`] runs the behaviours in spawn order, then delivers the
//! contacts that result, so a binding made during one tick takes effect on
//! the next.

mod frames;

use std::collections::VecDeque;

use glam::Vec2;
use log::debug;

use crate::config::{MovementConfig, Settings};
use crate::constants::FAULT_BACKLOG;
use crate::error::MovementError;
use crate::host::{Category, EntityHandle, EntityId, FrameId, FrameStore, TickContext};
use crate::movement::Movement;
use crate::random::SeededRandom;

pub use frames::FrameTable;

/// Placement of a new body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    /// Category tag of the body.
    pub category: Category,
    /// Absolute starting position.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
}

impl BodySpec {
    /// Describes a body of `category` at `position` with `radius`.
    pub fn new(category: impl Into<Category>, position: Vec2, radius: f32) -> Self {
        Self {
            category: category.into(),
            position,
            radius,
        }
    }
}

/// Behaviour an agent runs each tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Steering {
    /// Do nothing.
    #[default]
    Hold,
    /// Wander between random nearby points.
    Wander,
    /// Seek the nearest entity of a category.
    Seek {
        /// Category sought.
        category: Category,
    },
}

/// A body driven by a [`Movement`].
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Movement state.
    pub movement: Movement,
    /// Behaviour run each tick.
    pub steering: Steering,
}

/// Frames, agents and the shared random stream.
#[derive(Debug, Clone)]
pub struct Scene {
    frames: FrameTable,
    agents: Vec<Agent>,
    rng: SeededRandom,
    config: MovementConfig,
    speed_scale: f32,
    faults: VecDeque<MovementError>,
    ticks: u64,
}

impl Scene {
    /// Creates an empty scene.
    ///
    /// `settings` are used as given; call [`Settings::validate`] first when
    /// they come from outside.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use tether::scene::{BodySpec, Scene, Steering};
    /// use tether::Settings;
    ///
    /// let mut scene = Scene::new(&Settings::default());
    /// scene.spawn_body(BodySpec::new("food", Vec2::new(5.0, 0.0), 0.5));
    /// let hunter = scene.spawn_agent(
    ///     BodySpec::new("hunter", Vec2::ZERO, 1.0),
    ///     1.0,
    ///     Steering::Seek { category: "food".into() },
    /// );
    /// scene.tick(0.5);
    /// let x = scene.position(hunter).map(|p| p.x).unwrap_or_default();
    /// assert!(x > 0.0);
    /// ```
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            frames: FrameTable::new(),
            agents: Vec::new(),
            rng: SeededRandom::new(settings.simulation.seed),
            config: settings.movement,
            speed_scale: settings.simulation.speed_scale,
            faults: VecDeque::new(),
            ticks: 0,
        }
    }

    /// Adds a body that no behaviour drives.
    pub fn spawn_body(&mut self, spec: BodySpec) -> FrameId {
        let BodySpec {
            category,
            position,
            radius,
        } = spec;
        let frame = self.frames.insert(category, position, radius);
        debug!("spawned body {frame} at {position}");
        frame
    }

    /// Adds a body driven by a new [`Movement`] running `steering`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Scenes never approach u32::MAX agents."
    )]
    pub fn spawn_agent(&mut self, spec: BodySpec, move_speed: f32, steering: Steering) -> EntityId {
        let id = EntityId(self.agents.len() as u32);
        let category = spec.category.clone();
        let frame = self.spawn_body(spec);
        self.frames.set_owner(frame, id);
        let owner = EntityHandle {
            id,
            frame,
            category,
        };
        debug!("agent {id} on {frame} runs {steering:?}");
        self.agents.push(Agent {
            movement: Movement::initialise(owner, move_speed, self.config),
            steering,
        });
        id
    }

    /// Advances every agent by `delta_seconds` of unscaled time.
    ///
    /// Behaviours run in spawn order against the live frame table, then every
    /// agent is told about the bodies it overlaps. Search failures are kept
    /// for [`Scene::drain_faults`].
    pub fn tick(&mut self, delta_seconds: f32) {
        let tick = TickContext::new(delta_seconds, self.speed_scale);
        for agent in &mut self.agents {
            match &agent.steering {
                Steering::Hold => {}
                Steering::Wander => {
                    agent
                        .movement
                        .random_movement(&mut self.frames, &mut self.rng, tick);
                }
                Steering::Seek { category } => {
                    if let Err(e) =
                        agent
                            .movement
                            .move_to_closest_entity(&mut self.frames, category, tick)
                    {
                        Self::record_fault(&mut self.faults, e);
                    }
                }
            }
        }
        self.deliver_contacts();
        self.ticks += 1;
    }

    fn record_fault(faults: &mut VecDeque<MovementError>, fault: MovementError) {
        if faults.len() >= FAULT_BACKLOG {
            if let Some(dropped) = faults.pop_front() {
                debug!("fault backlog full, dropping: {dropped}");
            }
        }
        faults.push_back(fault);
    }

    fn deliver_contacts(&mut self) {
        for agent in &mut self.agents {
            for contact in self.frames.contacts_of(agent.movement.owner().frame) {
                if agent.movement.on_sustained_contact(&contact) {
                    debug!(
                        "agent {} attached to {} (`{}`)",
                        agent.movement.owner().id,
                        contact.frame,
                        contact.category
                    );
                }
            }
        }
    }

    /// Releases `entity`'s attachment. Returns `false` for unknown entities.
    pub fn detach(&mut self, entity: EntityId) -> bool {
        let Some(agent) = Self::index(entity).and_then(|i| self.agents.get_mut(i)) else {
            return false;
        };
        agent.movement.detach(&mut self.frames);
        true
    }

    /// Whether `entity` is attached to another body.
    #[must_use]
    pub fn attached(&self, entity: EntityId) -> bool {
        self.agent(entity)
            .is_some_and(|agent| agent.movement.attached())
    }

    /// Agent that `entity` is attached to, if the touched body has one.
    #[must_use]
    pub fn touching_entity(&self, entity: EntityId) -> Option<EntityId> {
        self.agent(entity)?.movement.touching_entity(&self.frames)
    }

    /// Absolute position of `entity`'s body.
    #[must_use]
    pub fn position(&self, entity: EntityId) -> Option<Vec2> {
        self.frames.position(self.agent(entity)?.movement.owner().frame)
    }

    /// Absolute position of any frame.
    #[must_use]
    pub fn frame_position(&self, frame: FrameId) -> Option<Vec2> {
        self.frames.position(frame)
    }

    /// Moves a frame to an absolute position, as an outside system would.
    pub fn place(&mut self, frame: FrameId, position: Vec2) {
        self.frames.set_position(frame, position);
    }

    /// Agent with id `entity`.
    #[must_use]
    pub fn agent(&self, entity: EntityId) -> Option<&Agent> {
        self.agents.get(Self::index(entity)?)
    }

    /// Handle of `entity`.
    #[must_use]
    pub fn entity(&self, entity: EntityId) -> Option<&EntityHandle> {
        self.agent(entity).map(|agent| agent.movement.owner())
    }

    /// Movement component of `entity`.
    #[must_use]
    pub fn movement(&self, entity: EntityId) -> Option<&Movement> {
        self.agent(entity).map(|agent| &agent.movement)
    }

    /// Replaces `entity`'s behaviour. Returns `false` for unknown entities.
    pub fn set_steering(&mut self, entity: EntityId, steering: Steering) -> bool {
        match Self::index(entity).and_then(|i| self.agents.get_mut(i)) {
            Some(agent) => {
                agent.steering = steering;
                true
            }
            None => false,
        }
    }

    /// Every agent in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Frame table.
    #[must_use]
    pub const fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Global speed multiplier applied to every tick.
    #[must_use]
    pub const fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    /// Replaces the global speed multiplier.
    pub fn set_speed_scale(&mut self, speed_scale: f32) {
        self.speed_scale = speed_scale;
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Takes the search failures recorded since the last call.
    ///
    /// At most [`FAULT_BACKLOG`] failures are kept between calls; older
    /// ones are dropped first.
    pub fn drain_faults(&mut self) -> Vec<MovementError> {
        self.faults.drain(..).collect()
    }

    fn index(entity: EntityId) -> Option<usize> {
        usize::try_from(entity.0).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationSettings;
    use rstest::{fixture, rstest};

    #[fixture]
    fn scene() -> Scene {
        Scene::new(&Settings::default())
    }

    #[rstest]
    fn seeker_walks_toward_nearest_target(mut scene: Scene) {
        let near = scene.spawn_body(BodySpec::new("food", Vec2::new(6.0, 0.0), 0.5));
        scene.spawn_body(BodySpec::new("food", Vec2::new(-20.0, 0.0), 0.5));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );

        // The first refresh happens once more than 0.2s has accumulated.
        scene.tick(0.25);
        let movement = scene.movement(hunter).expect("agent exists");
        assert_eq!(movement.closest_entity(), Some(near));
        let position = scene.position(hunter).expect("agent has a body");
        assert!((position.x - 0.02).abs() < 1e-6);
        assert!(scene.drain_faults().is_empty());
    }

    #[rstest]
    fn seeker_attaches_on_contact_then_follows(mut scene: Scene) {
        let food = scene.spawn_body(BodySpec::new("food", Vec2::new(1.5, 0.0), 1.0));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );

        scene.tick(0.25);
        assert!(scene.attached(hunter));
        // Binding happens on the next tick's move.
        scene.tick(0.05);
        assert_eq!(scene.frames().parent(FrameId(1)), Some(food));

        scene.place(food, Vec2::new(11.5, 4.0));
        let position = scene.position(hunter).expect("agent has a body");
        // The hunter keeps the offset it had when it bound.
        assert!((position - Vec2::new(10.02, 4.0)).length() < 1e-4);
        assert_eq!(scene.touching_entity(hunter), None);
    }

    #[rstest]
    fn detach_keeps_position_and_clears_attachment(mut scene: Scene) {
        let food = scene.spawn_body(BodySpec::new("food", Vec2::new(1.5, 0.0), 1.0));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Hold,
        );
        scene.tick(0.1);
        assert!(scene.attached(hunter));
        assert!(scene.set_steering(
            hunter,
            Steering::Seek {
                category: "food".into()
            }
        ));
        scene.tick(0.25);
        assert_eq!(scene.frames().parent(FrameId(1)), Some(food));
        let before = scene.position(hunter).expect("agent has a body");

        assert!(scene.detach(hunter));
        assert!(!scene.attached(hunter));
        assert_eq!(scene.frames().parent(FrameId(1)), None);
        assert_eq!(scene.position(hunter), Some(before));
    }

    #[rstest]
    fn agents_resolve_each_other_as_touching(mut scene: Scene) {
        let prey = scene.spawn_agent(BodySpec::new("prey", Vec2::ZERO, 1.0), 1.0, Steering::Hold);
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::new(1.0, 0.0), 1.0),
            1.0,
            Steering::Hold,
        );
        scene.tick(0.1);
        assert_eq!(scene.touching_entity(hunter), Some(prey));
        assert_eq!(scene.touching_entity(prey), Some(hunter));
    }

    #[rstest]
    fn same_category_contact_is_ignored(mut scene: Scene) {
        let a = scene.spawn_agent(BodySpec::new("prey", Vec2::ZERO, 1.0), 1.0, Steering::Hold);
        scene.spawn_agent(
            BodySpec::new("prey", Vec2::new(0.5, 0.0), 1.0),
            1.0,
            Steering::Hold,
        );
        scene.tick(0.1);
        assert!(!scene.attached(a));
    }

    #[rstest]
    fn exhausted_search_is_recorded() {
        let mut settings = Settings::default();
        settings.movement.search_limit = 4.0;
        let mut scene = Scene::new(&settings);
        scene.spawn_body(BodySpec::new("food", Vec2::new(100.0, 0.0), 0.5));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );

        scene.tick(0.25);
        let faults = scene.drain_faults();
        assert_eq!(faults.len(), 1);
        assert!(matches!(
            faults.first(),
            Some(MovementError::SpatialSearchExhausted { entity, expected: 1, .. })
                if *entity == hunter
        ));
        assert_eq!(scene.position(hunter), Some(Vec2::ZERO));
        assert!(scene.drain_faults().is_empty());
    }

    #[rstest]
    fn undrained_faults_keep_only_the_newest() {
        let mut settings = Settings::default();
        settings.movement.search_limit = 4.0;
        let mut scene = Scene::new(&settings);
        scene.spawn_body(BodySpec::new("food", Vec2::new(100.0, 0.0), 0.5));
        scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );

        for _ in 0..FAULT_BACKLOG + 44 {
            scene.tick(0.25);
        }

        assert_eq!(scene.drain_faults().len(), FAULT_BACKLOG);
        scene.tick(0.25);
        assert_eq!(scene.drain_faults().len(), 1);
    }

    #[rstest]
    fn closest_entity_stays_stale_between_refreshes(mut scene: Scene) {
        let far = scene.spawn_body(BodySpec::new("food", Vec2::new(-30.0, 0.0), 0.5));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );
        let closest = |scene: &Scene| {
            scene
                .movement(hunter)
                .and_then(Movement::closest_entity)
        };

        scene.tick(0.25);
        assert_eq!(closest(&scene), Some(far));

        let near = scene.spawn_body(BodySpec::new("food", Vec2::new(5.0, 0.0), 0.5));
        scene.tick(0.1);
        assert_eq!(closest(&scene), Some(far));
        assert_eq!(far, FrameId(0));

        scene.tick(0.25);
        assert_eq!(closest(&scene), Some(near));
        assert_eq!(near, FrameId(2));
    }

    #[rstest]
    fn wandering_is_reproducible_per_seed() {
        let settings = Settings {
            simulation: SimulationSettings {
                seed: 7,
                ..SimulationSettings::default()
            },
            ..Settings::default()
        };
        let run = || {
            let mut scene = Scene::new(&settings);
            let id = scene.spawn_agent(
                BodySpec::new("prey", Vec2::ZERO, 1.0),
                1.0,
                Steering::Wander,
            );
            for _ in 0..200 {
                scene.tick(1.0 / 60.0);
            }
            scene.position(id)
        };
        assert_eq!(run(), run());
    }

    #[rstest]
    fn speed_scale_zero_freezes_seekers(mut scene: Scene) {
        scene.spawn_body(BodySpec::new("food", Vec2::new(6.0, 0.0), 0.5));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );
        scene.set_speed_scale(0.0);
        for _ in 0..10 {
            scene.tick(0.5);
        }
        assert_eq!(scene.position(hunter), Some(Vec2::ZERO));
        assert_eq!(scene.ticks(), 10);
    }

    #[rstest]
    fn unknown_entities_are_rejected(mut scene: Scene) {
        assert!(!scene.detach(EntityId(3)));
        assert!(!scene.attached(EntityId(3)));
        assert!(!scene.set_steering(EntityId(3), Steering::Wander));
        assert_eq!(scene.position(EntityId(3)), None);
    }
}
