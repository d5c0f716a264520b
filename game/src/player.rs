//! Player entity and the glue between the pure controller core and the
//! engine: per-frame input/camera/facing, fixed-tick physics requests,
//! contact feedback and animator publishing.

use bevy::{prelude::*, transform::TransformSystems};
use controller::{ControllerConfig, PlayerController};
use nalgebra::{UnitQuaternion, vector};

use crate::animation::AnimatorParams;
use crate::camera::CameraPoseTarget;
use crate::convert::{to_bevy_quat, to_bevy_vec3};
use crate::input::FrameInput;
use crate::physics::{GroundContact, PhysicsBody, PhysicsStepSet};
use crate::scene::Screen;

/// Interpolation decay rate for the render transform chasing the physics
/// position (higher is snappier).
const TRANSLATION_DECAY_RATE: f32 = 12.0;

const SPAWN_POS: Vec3 = Vec3::new(0.0, 1.1, 0.0);
const CAPSULE_RADIUS: f32 = 0.4;
const CAPSULE_HALF_HEIGHT: f32 = 0.5;

/// Controller state plus the authoritative body facing. The facing lives
/// here rather than on `Transform` because the render transform is
/// interpolated and must never feed back into simulation.
#[derive(Component)]
pub struct Player {
    pub controller: PlayerController,
    pub facing: UnitQuaternion<f32>,
}

/// Startup-selected controller tuning. Swap in `ControllerConfig::attached()`
/// for the head-look variant; everything downstream is mode-agnostic.
#[derive(Resource)]
pub struct ControllerSettings(pub ControllerConfig);

impl Default for ControllerSettings {
    fn default() -> Self {
        Self(ControllerConfig::orbit())
    }
}

/// Tracks which missing-collaborator warnings have already been logged, so
/// a misconfigured entity complains once instead of every frame.
#[derive(Resource, Default)]
struct WarnedMissing {
    physics: bool,
    animator: bool,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ControllerSettings>();
    app.init_resource::<WarnedMissing>();
    app.add_systems(Startup, spawn_player);

    app.add_systems(
        Update,
        frame_tick
            .after(crate::input::sample)
            .run_if(in_state(Screen::Gameplay)),
    );

    app.add_systems(
        FixedUpdate,
        apply_step
            .before(PhysicsStepSet)
            .run_if(in_state(Screen::Gameplay)),
    );
    app.add_systems(
        FixedUpdate,
        (read_contacts, publish_signals).chain().after(PhysicsStepSet),
    );

    app.add_systems(
        PostUpdate,
        sync_transform.before(TransformSystems::Propagate),
    );
}

fn spawn_player(
    mut commands: Commands,
    settings: Res<ControllerSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Player {
            controller: PlayerController::new(settings.0),
            facing: UnitQuaternion::identity(),
        },
        PhysicsBody::capsule(
            vector![SPAWN_POS.x, SPAWN_POS.y, SPAWN_POS.z],
            CAPSULE_RADIUS,
            CAPSULE_HALF_HEIGHT,
        ),
        AnimatorParams::default(),
        Mesh3d(meshes.add(Capsule3d::new(
            CAPSULE_RADIUS,
            CAPSULE_HALF_HEIGHT * 2.0,
        ))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.6, 0.4))),
        Transform::from_translation(SPAWN_POS),
    ));
}

/// Variable-rate tick: look, jump latching, locomotion. Caches the movement
/// request for the fixed loop and hands the camera its pose for this frame.
fn frame_tick(
    frame: Res<FrameInput>,
    time: Res<Time>,
    mut players: Query<(&mut Player, Option<&PhysicsBody>)>,
    mut camera_target: ResMut<CameraPoseTarget>,
    mut warned: ResMut<WarnedMissing>,
) {
    for (mut player, body) in &mut players {
        let Some(body) = body else {
            if !warned.physics {
                log::warn!("player entity has no physics body; controller is inert");
                warned.physics = true;
            }
            continue;
        };

        let player = &mut *player;
        let out =
            player
                .controller
                .frame_tick(&frame.0, body.translation, player.facing, time.delta_secs());
        if let Some(facing) = out.facing {
            player.facing = facing;
        }
        camera_target.0 = Some(out.camera_pose);
    }
}

/// Fixed-rate tick, before the physics step: queue the cached movement
/// request (scaled by the fixed timestep) and any jump impulse onto the
/// body.
fn apply_step(time: Res<Time>, mut players: Query<(&mut Player, &mut PhysicsBody)>) {
    for (mut player, mut body) in &mut players {
        let step = player.controller.fixed_tick(time.delta_secs());
        body.move_position(step.movement_delta);
        if let Some(impulse) = step.jump_impulse {
            body.apply_impulse(impulse);
        }
    }
}

/// Fixed-rate, after the physics step: feed fresh ground contacts back into
/// the controller.
fn read_contacts(
    mut contacts: MessageReader<GroundContact>,
    mut players: Query<&mut Player>,
) {
    for contact in contacts.read() {
        for mut player in &mut players {
            player.controller.on_contact(contact.normal);
        }
    }
}

/// Fixed-rate, last: push the current signals into the animator parameters.
fn publish_signals(
    mut players: Query<(&Player, Option<&mut AnimatorParams>)>,
    mut warned: ResMut<WarnedMissing>,
) {
    for (player, params) in &mut players {
        let Some(mut params) = params else {
            if !warned.animator {
                log::warn!("player entity has no animator parameters; signals are dropped");
                warned.animator = true;
            }
            continue;
        };
        player.controller.publish_signals(&mut *params);
    }
}

/// Render transform chases the physics position; the facing is written
/// directly since the controller already smooths it.
fn sync_transform(
    time: Res<Time>,
    mut players: Query<(&Player, &PhysicsBody, &mut Transform)>,
) {
    for (player, body, mut transform) in &mut players {
        let target = to_bevy_vec3(body.translation);
        transform
            .translation
            .smooth_nudge(&target, TRANSLATION_DECAY_RATE, time.delta_secs());
        transform.rotation = to_bevy_quat(player.facing);
    }
}
