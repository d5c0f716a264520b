//! Per-character orchestration of the camera rig, locomotion, jump and
//! animation signals.
//!
//! Tick contract
//! - `frame_tick` runs once per rendered frame: sample -> look -> jump latch
//!   -> locomotion, caching the movement request for the physics tick.
//! - `fixed_tick` runs at the fixed timestep (possibly 0..N times per frame)
//!   and consumes the cached request; it always observes the most recently
//!   produced frame values, never a half-updated set.
//! - `on_contact` may be called at any point between ticks with collision
//!   feedback from the physics body.

use crate::animation::{AnimationSignalBridge, AnimationSignals};
use crate::camera::{CameraConfig, CameraMode, CameraPose, CameraRig};
use crate::constants::DEFAULT_JUMP_IMPULSE;
use crate::ground::GroundContactTracker;
use crate::input::InputSample;
use crate::jump::JumpController;
use crate::locomotion::{self, LocomotionConfig, LocomotionState, LocomotionStep};
use crate::math::{Quat, Vec3, facing_from_planar};

/// Full controller configuration, fixed at activation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControllerConfig {
    pub camera: CameraConfig,
    pub locomotion: LocomotionConfig,
    /// Upward impulse magnitude applied when a jump request is honored.
    pub jump_impulse: f32,
}

impl ControllerConfig {
    pub fn orbit() -> Self {
        Self {
            camera: CameraConfig::orbit(),
            locomotion: LocomotionConfig::default(),
            jump_impulse: DEFAULT_JUMP_IMPULSE,
        }
    }

    pub fn attached() -> Self {
        Self {
            camera: CameraConfig::attached(),
            ..Self::orbit()
        }
    }
}

/// Result of a variable-rate frame tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput {
    /// Pose to hand to the renderer this frame.
    pub camera_pose: CameraPose,
    /// New body facing, if it should change this frame.
    pub facing: Option<Quat>,
}

/// Result of a fixed-rate physics tick: the requests to issue to the
/// physics body plus the animation signals to publish.
#[derive(Clone, Copy, Debug)]
pub struct FixedStep {
    /// Position delta to request via `move_position`: the cached velocity
    /// scaled by this tick's fixed timestep.
    pub movement_delta: Vec3,
    /// One-shot upward impulse, present exactly when a jump fires.
    pub jump_impulse: Option<Vec3>,
    /// Signals for the animation bridge, post-update.
    pub signals: AnimationSignals,
}

/// All controller state for one character. Created when the gameplay scene
/// activates and discarded when it unloads; nothing persists across scenes.
#[derive(Clone, Copy, Debug)]
pub struct PlayerController {
    config: ControllerConfig,
    rig: CameraRig,
    ground: GroundContactTracker,
    jump: JumpController,
    bridge: AnimationSignalBridge,
    cached: LocomotionStep,
}

impl PlayerController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            rig: CameraRig::default(),
            ground: GroundContactTracker::new(),
            jump: JumpController::new(),
            bridge: AnimationSignalBridge::new(),
            cached: LocomotionStep::default(),
        }
    }

    /// Variable-rate tick: consume this frame's input sample and produce the
    /// camera pose and facing, caching the movement request for the next
    /// fixed tick(s).
    ///
    /// `anchor` is the physics body's current position; `current_facing` is
    /// the body's current rotation (used for facing smoothing in orbit
    /// mode).
    pub fn frame_tick(
        &mut self,
        input: &InputSample,
        anchor: Vec3,
        current_facing: Quat,
        dt: f32,
    ) -> FrameOutput {
        let input = input.clamped();

        self.rig
            .apply_look(input.mouse_delta_x, input.mouse_delta_y, &self.config.camera);

        if input.jump_pressed {
            self.jump.request(self.ground.is_grounded());
        }

        let planar_forward = self.rig.planar_forward();
        self.cached = locomotion::tick(&self.config.locomotion, &input, planar_forward);

        let facing = match self.config.camera.mode {
            // Smoothly turn toward the camera heading, but only while the
            // player is actually steering.
            CameraMode::Orbit if self.cached.gait != LocomotionState::Idle => locomotion::smoothed_facing(
                current_facing,
                planar_forward,
                self.config.locomotion.turn_rate,
                dt,
            ),
            CameraMode::Orbit => None,
            // Attached: mouse yaw rotates the body itself, unsmoothed.
            CameraMode::Attached => facing_from_planar(planar_forward),
        };

        FrameOutput {
            camera_pose: self.rig.camera_pose(anchor, &self.config.camera),
            facing,
        }
    }

    /// Fixed-rate tick: emit the cached movement request scaled by the
    /// fixed timestep `dt`, fire a pending jump if still grounded, and
    /// refresh the animation signals.
    ///
    /// The cache holds a velocity, so running this 0..N times per rendered
    /// frame always covers ground at the configured speed regardless of the
    /// frame rate.
    pub fn fixed_tick(&mut self, dt: f32) -> FixedStep {
        let jump_impulse = if self.jump.take(self.ground.is_grounded()) {
            // Leaving the ground happens atomically with the impulse.
            self.ground.leave_ground();
            self.bridge.on_jump_applied();
            Some(Vec3::new(0.0, self.config.jump_impulse, 0.0))
        } else {
            None
        };

        let signals = self
            .bridge
            .refresh(self.cached.gait, self.ground.is_grounded());

        FixedStep {
            movement_delta: self.cached.velocity * dt.max(0.0),
            jump_impulse,
            signals,
        }
    }

    /// Collision feedback from the physics body, asynchronous relative to
    /// the tick loops.
    pub fn on_contact(&mut self, normal: Vec3) {
        if self.ground.note_contact(normal) {
            self.bridge.on_landed();
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded()
    }

    /// Current locomotion classification, with `Airborne` overriding gait
    /// whenever ground contact is lost.
    pub fn locomotion_state(&self) -> LocomotionState {
        if self.ground.is_grounded() {
            self.cached.gait
        } else {
            LocomotionState::Airborne
        }
    }

    #[inline]
    pub fn signals(&self) -> AnimationSignals {
        self.bridge.signals()
    }

    #[inline]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Publish the current signals through an animator sink.
    pub fn publish_signals<A: crate::animation::Animator>(&self, animator: &mut A) {
        self.bridge.publish(animator);
    }
}
