//! Demo scene setup
//!
//! Spawns a walled floor, a handful of draggable shapes, the camera with its
//! preset views, and lighting. The camera can optionally render into an image
//! shown inside a UI panel.

use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
};
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::interaction::pointer::{fill_layout, ViewSurface};
use crate::interaction::types::*;

const FLOOR_HALF_EXTENT: f32 = 6.0;
const WALL_HEIGHT: f32 = 2.0;
const WALL_THICKNESS: f32 = 0.2;

/// Collision group of the floor and walls, kept out of the demo's pick mask.
pub const SCENERY_GROUP: Group = Group::GROUP_2;

const SURFACE_TEXTURE_SIZE: UVec2 = UVec2::new(1280, 720);
/// Panel showing the camera image, in window logical pixels.
const SURFACE_PANEL_ORIGIN: Vec2 = Vec2::new(40.0, 40.0);
const SURFACE_PANEL_SIZE: Vec2 = Vec2::new(640.0, 480.0);

/// What the demo scene should contain.
#[derive(Resource, Debug, Clone)]
pub struct DemoScene {
    pub objects: usize,
    /// Fixed seed for object placement; random when `None`.
    pub seed: Option<u64>,
    /// Render the camera into a UI panel instead of the window.
    pub surface: bool,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self {
            objects: 8,
            seed: None,
            surface: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum DemoShape {
    Cube,
    Ball,
    Capsule,
}

impl DemoShape {
    const ALL: [DemoShape; 3] = [DemoShape::Cube, DemoShape::Ball, DemoShape::Capsule];

    fn mesh(self) -> Mesh {
        match self {
            DemoShape::Cube => Cuboid::new(0.8, 0.8, 0.8).into(),
            DemoShape::Ball => Sphere::new(0.45).into(),
            DemoShape::Capsule => Capsule3d::new(0.3, 0.6).into(),
        }
    }

    fn collider(self) -> Collider {
        match self {
            DemoShape::Cube => Collider::cuboid(0.4, 0.4, 0.4),
            DemoShape::Ball => Collider::ball(0.45),
            DemoShape::Capsule => Collider::capsule_y(0.3, 0.3),
        }
    }

    fn label(self) -> &'static str {
        match self {
            DemoShape::Cube => "cube",
            DemoShape::Ball => "ball",
            DemoShape::Capsule => "capsule",
        }
    }
}

/// Preset camera poses bound to keys 1..9.
pub fn default_camera_views() -> CameraViews {
    CameraViews {
        views: vec![
            (
                "front".to_string(),
                Transform::from_xyz(0.0, 6.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
            ),
            (
                "top".to_string(),
                Transform::from_xyz(0.0, 16.0, 0.5).looking_at(Vec3::ZERO, Vec3::Y),
            ),
            (
                "side".to_string(),
                Transform::from_xyz(12.0, 4.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
            ),
        ],
    }
}

/// Texture the main camera renders into when the demo uses a view surface.
fn surface_texture() -> Image {
    let size = Extent3d {
        width: SURFACE_TEXTURE_SIZE.x,
        height: SURFACE_TEXTURE_SIZE.y,
        depth_or_array_layers: 1,
    };

    let mut image = Image {
        texture_descriptor: TextureDescriptor {
            label: Some("view_surface_render_target"),
            size,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            mip_level_count: 1,
            sample_count: 1,
            usage: TextureUsages::TEXTURE_BINDING
                | TextureUsages::COPY_DST
                | TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        },
        ..default()
    };
    image.resize(size);
    image
}

/// Show `image` in a clipped panel, scaled to fill it, and register the panel
/// as the pointer surface.
fn spawn_view_surface(commands: &mut Commands, image: Handle<Image>) {
    let surface = ViewSurface {
        rect: Rect::from_corners(SURFACE_PANEL_ORIGIN, SURFACE_PANEL_ORIGIN + SURFACE_PANEL_SIZE),
        camera_aspect: SURFACE_TEXTURE_SIZE.x as f32 / SURFACE_TEXTURE_SIZE.y as f32,
    };
    let (used, pad) = fill_layout(SURFACE_PANEL_SIZE, surface.camera_aspect);

    commands.spawn(Camera2d);
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(SURFACE_PANEL_ORIGIN.x),
                top: Val::Px(SURFACE_PANEL_ORIGIN.y),
                width: Val::Px(SURFACE_PANEL_SIZE.x),
                height: Val::Px(SURFACE_PANEL_SIZE.y),
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.05, 0.07)),
            Name::new("ViewSurfacePanel"),
        ))
        .with_children(|panel| {
            panel.spawn((
                ImageNode::new(image),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(pad.x),
                    top: Val::Px(pad.y),
                    width: Val::Px(used.x),
                    height: Val::Px(used.y),
                    ..default()
                },
            ));
        });

    info!("Camera shown in a {}x{} panel", SURFACE_PANEL_SIZE.x, SURFACE_PANEL_SIZE.y);
    commands.insert_resource(surface);
}

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    demo: Res<DemoScene>,
) {
    let views = default_camera_views();
    let start = views
        .get(0)
        .map(|(_, transform)| *transform)
        .unwrap_or_default();

    if demo.surface {
        let image = images.add(surface_texture());
        commands.spawn((
            Camera3d::default(),
            Camera {
                target: RenderTarget::Image(image.clone().into()),
                order: -1,
                ..default()
            },
            start,
            MainCamera,
        ));
        spawn_view_surface(&mut commands, image);
    } else {
        commands.spawn((Camera3d::default(), start, MainCamera));
    }
    commands.insert_resource(views);

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 40.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 8.0, 4.0),
    ));

    let ground = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.38, 0.42),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(FLOOR_HALF_EXTENT * 2.0, 0.2, FLOOR_HALF_EXTENT * 2.0))),
        MeshMaterial3d(ground.clone()),
        Transform::from_xyz(0.0, -0.1, 0.0),
        Collider::cuboid(FLOOR_HALF_EXTENT, 0.1, FLOOR_HALF_EXTENT),
        RigidBody::Fixed,
        Friction::coefficient(0.8),
        CollisionGroups::new(SCENERY_GROUP, Group::ALL),
    ));

    let span = FLOOR_HALF_EXTENT * 2.0 + WALL_THICKNESS * 2.0;
    for (pos, size) in [
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -FLOOR_HALF_EXTENT),
            Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, FLOOR_HALF_EXTENT),
            Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(-FLOOR_HALF_EXTENT, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FLOOR_HALF_EXTENT * 2.0),
        ),
        (
            Vec3::new(FLOOR_HALF_EXTENT, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, FLOOR_HALF_EXTENT * 2.0),
        ),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(ground.clone()),
            Transform::from_translation(pos),
            Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            RigidBody::Fixed,
            Restitution::coefficient(0.2),
            CollisionGroups::new(SCENERY_GROUP, Group::ALL),
        ));
    }

    let mut rng = match demo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let range = FLOOR_HALF_EXTENT - 1.0;

    for i in 0..demo.objects {
        let shape = DemoShape::ALL[i % DemoShape::ALL.len()];
        let position = Vec3::new(
            rng.gen_range(-range..range),
            rng.gen_range(1.0..4.0),
            rng.gen_range(-range..range),
        );
        // Each object owns its material so the drag tint stays local.
        let material = materials.add(StandardMaterial {
            base_color: Color::hsl(rng.gen_range(0.0..360.0), 0.6, 0.55),
            perceptual_roughness: 0.4,
            ..default()
        });

        commands.spawn((
            Mesh3d(meshes.add(shape.mesh())),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            shape.collider(),
            Velocity::default(),
            GravityScale(1.0),
            Damping {
                linear_damping: 0.05,
                angular_damping: 0.3,
            },
            Restitution::coefficient(0.3),
            Friction::coefficient(0.7),
            Draggable,
            DragHighlight::default(),
            Touchable::new(format!("{} #{}", shape.label(), i + 1)),
        ));
    }

    info!("Demo scene ready with {} objects", demo.objects);
}
