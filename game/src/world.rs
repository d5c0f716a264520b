//! Static test scene: a ground plane, one obstacle and a light.
//!
//! The render meshes and the physics colliders are generated from the same
//! definitions so what you see is what you collide with.

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::physics::{ColliderShapeDef, WorldStaticDef};

const OBSTACLE_POS: Vec3 = Vec3::new(5.0, 0.5, 0.0);
const OBSTACLE_HALF_EXTENT: f32 = 0.5;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

/// Collider definitions for the static scene, consumed by the physics
/// plugin at startup.
pub fn world_statics() -> Vec<WorldStaticDef> {
    vec![
        WorldStaticDef {
            id: 0,
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        },
        WorldStaticDef {
            id: 1,
            translation: Vector3::new(OBSTACLE_POS.x, OBSTACLE_POS.y, OBSTACLE_POS.z),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector3::repeat(OBSTACLE_HALF_EXTENT),
            },
        },
    ]
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground
    commands.spawn((
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50., 50.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    // Obstacle cube
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            OBSTACLE_HALF_EXTENT * 2.0,
            OBSTACLE_HALF_EXTENT * 2.0,
            OBSTACLE_HALF_EXTENT * 2.0,
        ))),
        MeshMaterial3d(materials.add(Color::srgb_u8(124, 144, 255))),
        Transform::from_translation(OBSTACLE_POS),
    ));

    // Light
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));
}
