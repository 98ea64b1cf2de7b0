//! Headless demo: wandering prey chased by seeking hunters.

use std::f32::consts::TAU;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use log::info;
use tether::{
    init_logging, BodyFrame, BodySpec, MovementPlugin, Scene, SceneResource, Settings, Steering,
};

const PREY: &str = "prey";
const HUNTER: &str = "hunter";
const PREY_RING: f32 = 8.0;
const HUNTER_RING: f32 = 2.0;

/// Runs a headless steering simulation and logs where everyone ended up
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Seed for the wander stream, overriding the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Number of fixed ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Number of wandering prey
    #[arg(long, default_value_t = 4)]
    wanderers: usize,
    /// Number of hunters seeking prey
    #[arg(long, default_value_t = 2)]
    seekers: usize,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.simulation.seed = seed;
    }
    Ok(settings)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Ring slots are small counts."
)]
fn ring(index: usize, count: usize, radius: f32) -> Vec2 {
    let angle = TAU * index as f32 / count.max(1) as f32;
    Vec2::new(angle.cos(), angle.sin()) * radius
}

fn populate(scene: &mut Scene, args: &Args) {
    for i in 0..args.wanderers {
        scene.spawn_agent(
            BodySpec::new(PREY, ring(i, args.wanderers, PREY_RING), 0.5),
            1.0,
            Steering::Wander,
        );
    }
    for i in 0..args.seekers {
        scene.spawn_agent(
            BodySpec::new(HUNTER, ring(i, args.seekers, HUNTER_RING), 0.5),
            2.0,
            Steering::Seek {
                category: PREY.into(),
            },
        );
    }
}

fn summarise(scene: &Scene) {
    info!("{} ticks simulated", scene.ticks());
    for agent in scene.agents() {
        let owner = agent.movement.owner();
        let position = scene.position(owner.id).unwrap_or_default();
        match scene.touching_entity(owner.id) {
            Some(other) => info!(
                "{} `{}` at ({:.2}, {:.2}) attached to {other}",
                owner.id, owner.category, position.x, position.y
            ),
            None => info!(
                "{} `{}` at ({:.2}, {:.2})",
                owner.id, owner.category, position.x, position.y
            ),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let settings = load_settings(&args)?;
    info!(
        "seed {}, {} wanderers, {} seekers, {} ticks",
        settings.simulation.seed, args.wanderers, args.seekers, args.ticks
    );

    let mut scene = Scene::new(&settings);
    populate(&mut scene, &args);
    let frames: Vec<_> = scene.frames().ids().collect();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SceneResource(scene))
        .add_plugins(MovementPlugin::new(settings));
    for frame in frames {
        app.world_mut()
            .spawn((BodyFrame(frame), Transform::default()));
    }

    for _ in 0..args.ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }

    summarise(app.world().resource::<SceneResource>());
    Ok(())
}
