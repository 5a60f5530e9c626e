use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::{Parser, ValueEnum};

use dragthrow::interaction::systems::{setup, DemoScene};
use dragthrow::interaction::types::{InteractionMode, InteractionSettings};
use dragthrow::interaction::InteractionPlugin;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Throw,
    Select,
}

impl From<ModeArg> for InteractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Throw => InteractionMode::Throw,
            ModeArg::Select => InteractionMode::Constrained,
        }
    }
}

#[derive(Parser)]
#[command(name = "dragthrow")]
#[command(
    author,
    version,
    about = "Grab, drag and throw physics objects with the mouse"
)]
struct Cli {
    /// Path to the interaction settings (RON or JSON)
    #[arg(short, long, default_value = "config/interaction.ron")]
    config: PathBuf,

    /// Controller that reacts to the mouse at startup (Tab switches)
    #[arg(short, long, value_enum, default_value = "throw")]
    mode: ModeArg,

    /// Number of draggable objects in the demo scene
    #[arg(short, long, default_value = "8")]
    objects: usize,

    /// Seed for object placement
    #[arg(long)]
    seed: Option<u64>,

    /// Render the scene into a UI panel and pick through it
    #[arg(long)]
    surface: bool,
}

fn main() {
    let cli = Cli::parse();

    // Logging isn't up until the app runs, so report load problems afterwards.
    let (settings, load_error) = match InteractionSettings::load(&cli.config) {
        Ok(settings) => (settings, None),
        Err(e) => (InteractionSettings::default(), Some(e)),
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Drag & Throw".to_string(),
                resolution: (1280u32, 720u32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        .add_plugins(InteractionPlugin {
            settings,
            mode: cli.mode.into(),
        })
        .insert_resource(DemoScene {
            objects: cli.objects,
            seed: cli.seed,
            surface: cli.surface,
        })
        .add_systems(Startup, setup)
        .add_systems(Startup, move || {
            if let Some(e) = &load_error {
                warn!("{}; using default settings", e);
            }
        })
        .run();
}
