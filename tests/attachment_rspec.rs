//! Behaviour tests for contact attachment using rust-rspec.
//!
//! A hunter seeks a crumb of food that sits inside its reach. Touching the
//! crumb attaches the hunter, the next move binds it rigidly to the crumb
//! and detaching releases it where it stands.

use glam::Vec2;
use tether::{BodySpec, EntityId, FrameId, FrameStore, Scene, Settings, Steering};
use test_utils::assert_vec2_near;

#[derive(Debug, Clone)]
struct FeedingWorld {
    scene: Scene,
    hunter: EntityId,
    crumb: FrameId,
}

impl Default for FeedingWorld {
    fn default() -> Self {
        let mut scene = Scene::new(&Settings::default());
        let crumb = scene.spawn_body(BodySpec::new("food", Vec2::new(1.5, 0.0), 1.0));
        let hunter = scene.spawn_agent(
            BodySpec::new("hunter", Vec2::ZERO, 1.0),
            1.0,
            Steering::Seek {
                category: "food".into(),
            },
        );
        Self {
            scene,
            hunter,
            crumb,
        }
    }
}

impl FeedingWorld {
    fn hunter_frame(&self) -> FrameId {
        self.scene
            .entity(self.hunter)
            .map(|handle| handle.frame)
            .expect("hunter spawned")
    }

    fn hunter_position(&self) -> Vec2 {
        self.scene.position(self.hunter).expect("hunter has a body")
    }

    /// Touch, then bind on the following move.
    fn bind(&mut self) {
        if self.scene.frames().parent(self.hunter_frame()).is_some() {
            return;
        }
        self.scene.tick(0.25);
        self.scene.tick(0.05);
    }
}

#[test]
fn hunter_attaches_follows_and_detaches() {
    rspec::run(&rspec::given(
        "a hunter seeking food within reach",
        FeedingWorld::default(),
        |ctx| {
            ctx.then("it starts unattached", |world| {
                assert!(!world.scene.attached(world.hunter));
                assert_eq!(world.scene.touching_entity(world.hunter), None);
            });

            ctx.when("the scene ticks past the refresh interval", |ctx| {
                ctx.before_each(|world| {
                    if world.scene.ticks() == 0 {
                        world.scene.tick(0.25);
                    }
                });
                ctx.then("the hunter is attached but not yet bound", |world| {
                    assert!(world.scene.attached(world.hunter));
                    assert_eq!(world.scene.frames().parent(world.hunter_frame()), None);
                    // Food carries no Movement, so no owning entity resolves.
                    assert_eq!(world.scene.touching_entity(world.hunter), None);
                });
            });

            ctx.when("the crumb is carried away after binding", |ctx| {
                ctx.before_each(|world| {
                    world.bind();
                    world.scene.place(world.crumb, Vec2::new(11.5, 4.0));
                });
                ctx.then("the hunter keeps its offset from the crumb", |world| {
                    assert_eq!(
                        world.scene.frames().parent(world.hunter_frame()),
                        Some(world.crumb)
                    );
                    assert_vec2_near(world.hunter_position(), Vec2::new(10.02, 4.0), 1e-4);
                });
            });

            ctx.when("the hunter detaches", |ctx| {
                ctx.before_each(|world| {
                    world.bind();
                    world.scene.place(world.crumb, Vec2::new(-5.0, 0.0));
                    world.scene.detach(world.hunter);
                });
                ctx.then("it is released where it stood", |world| {
                    assert!(!world.scene.attached(world.hunter));
                    assert_eq!(world.scene.frames().parent(world.hunter_frame()), None);
                    assert_vec2_near(world.hunter_position(), Vec2::new(-6.48, 0.0), 1e-4);
                });
            });
        },
    ));
}
