//! Camera entity and pose application.
//!
//! The controller computes a `CameraPose` (eye + look target) each frame;
//! this module owns the `Camera3d` entity and writes that pose to its
//! transform in `PostUpdate`, after all gameplay systems have run.

use bevy::{prelude::*, transform::TransformSystems};
use controller::CameraPose;

use crate::convert::to_bevy_vec3;

/// Pose requested by the player controller for the current frame.
/// `None` until the first frame tick has run.
#[derive(Resource, Default)]
pub struct CameraPoseTarget(pub Option<CameraPose>);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<CameraPoseTarget>();
    app.add_systems(Startup, add_camera);
    app.add_systems(PostUpdate, apply_pose.before(TransformSystems::Propagate));
}

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 3.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn apply_pose(
    target: Res<CameraPoseTarget>,
    mut camera: Single<&mut Transform, With<Camera3d>>,
) {
    let Some(pose) = &target.0 else {
        return;
    };

    let eye = to_bevy_vec3(pose.eye);
    let look = to_bevy_vec3(pose.target);
    **camera = Transform::from_translation(eye).looking_at(look, Vec3::Y);
}
