//! Bevy plugin stepping a [`Scene`] on the fixed schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error, warn};
use thiserror::Error;

use crate::config::Settings;
use crate::error::MovementError;
use crate::host::{FrameId, FrameStore};
use crate::scene::Scene;

/// The scene every movement system reads and advances.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct SceneResource(pub Scene);

/// Links a Bevy entity to the scene frame whose position it displays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Deref)]
pub struct BodyFrame(pub FrameId);

/// Event raised for every recoverable fault the scene records.
#[derive(Event, Debug, Clone, Error)]
#[error(transparent)]
pub struct MovementFault(pub MovementError);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_movement_fault(event: On<MovementFault>) {
    debug!("movement fault raised: {}", event.event());
}

/// Advances the scene by one fixed timestep and raises its faults.
pub fn step_scene_system(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut scene: ResMut<SceneResource>,
) {
    scene.tick(time.timestep().as_secs_f32());
    for fault in scene.drain_faults() {
        commands.trigger(MovementFault(fault));
    }
}

/// Mirrors resolved frame positions and radii into `Transform`.
pub fn sync_transforms_system(
    scene: Res<SceneResource>,
    mut bodies: Query<(Entity, &BodyFrame, &mut Transform)>,
) {
    let frames = scene.frames();
    for (entity, frame, mut transform) in &mut bodies {
        let (Some(position), Some(radius)) = (frames.position(**frame), frames.radius(**frame))
        else {
            warn!("entity {entity:?} displays unknown {}", **frame);
            continue;
        };
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.scale = Vec3::splat(radius);
    }
}

/// Installs the scene, its fixed-step systems and the fault observer.
///
/// A [`SceneResource`] inserted before the plugin is kept, so callers can
/// hand over a pre-populated scene. Settings that fail
/// [`Settings::validate`] are logged and nothing but the observer is
/// installed.
#[derive(Debug, Clone, Default)]
pub struct MovementPlugin {
    settings: Settings,
}

impl MovementPlugin {
    /// Plugin configured with `settings`.
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_movement_fault);
        let timestep = match self
            .settings
            .validate()
            .and_then(|()| self.settings.simulation.timestep())
        {
            Ok(timestep) => timestep,
            Err(e) => {
                error!("movement plugin not installed: {e}");
                return;
            }
        };
        app.insert_resource(Time::<Fixed>::from_duration(timestep));
        if !app.world().contains_resource::<SceneResource>() {
            app.insert_resource(SceneResource(Scene::new(&self.settings)));
        }
        app.add_systems(
            FixedUpdate,
            (step_scene_system, sync_transforms_system).chain(),
        );
    }
}
