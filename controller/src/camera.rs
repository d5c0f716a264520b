//! Mouse-driven camera rig: yaw/pitch state plus pose computation.
//!
//! The two supported behaviors (orbiting third-person camera and attached
//! head-look) share one code path; they differ only in configuration. The
//! rig owns nothing but its two angles, and the renderer-facing pose is a
//! pure function of rig + anchor.

use nalgebra as na;

use crate::constants::{
    ATTACHED_MAX_PITCH_DEG, ATTACHED_MIN_PITCH_DEG, DEFAULT_ANCHOR_HEIGHT, DEFAULT_MOUSE_SENSITIVITY,
    DEFAULT_ORBIT_DISTANCE, DEFAULT_ORBIT_MAX_PITCH_DEG, DEFAULT_ORBIT_MIN_PITCH_DEG,
    INITIAL_PITCH_DEG,
};
use crate::math::{Quat, Vec3, flatten};

/// How the camera relates to the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Camera orbits an anchor above the character at a fixed radius.
    /// Locomotion is camera-relative and body facing is smoothed toward the
    /// camera's flattened forward.
    #[default]
    Orbit,
    /// Camera is rigidly attached at the head anchor. Yaw rotates the body
    /// itself, pitch only tilts the view, and locomotion is body-relative.
    Attached,
}

/// Camera configuration. One clamp mechanism serves both modes; presets
/// differ only in bounds and radius.
#[derive(Clone, Copy, Debug)]
pub struct CameraConfig {
    pub mode: CameraMode,
    /// Degrees of rotation per mouse count. Zero disables look.
    pub sensitivity: f32,
    /// Orbit radius (meters). Ignored in attached mode.
    pub distance: f32,
    /// Pitch clamp in degrees; positive pitch looks down.
    pub min_pitch_deg: f32,
    pub max_pitch_deg: f32,
    /// Height of the look anchor above the character origin (meters).
    pub anchor_height: f32,
}

impl CameraConfig {
    /// Orbiting third-person preset.
    pub fn orbit() -> Self {
        Self {
            mode: CameraMode::Orbit,
            sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            distance: DEFAULT_ORBIT_DISTANCE,
            min_pitch_deg: DEFAULT_ORBIT_MIN_PITCH_DEG,
            max_pitch_deg: DEFAULT_ORBIT_MAX_PITCH_DEG,
            anchor_height: DEFAULT_ANCHOR_HEIGHT,
        }
    }

    /// Attached head-look preset.
    pub fn attached() -> Self {
        Self {
            mode: CameraMode::Attached,
            distance: 0.0,
            min_pitch_deg: ATTACHED_MIN_PITCH_DEG,
            max_pitch_deg: ATTACHED_MAX_PITCH_DEG,
            ..Self::orbit()
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::orbit()
    }
}

/// World pose handed to the renderer each frame.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    /// Camera position (meters, world space).
    pub eye: Vec3,
    /// Point the camera looks at (meters, world space).
    pub target: Vec3,
}

/// Yaw/pitch state of the camera rig.
///
/// Yaw is wrapped to [0, 360) to avoid unbounded float growth; pitch is
/// clamped to the configured range on every update. Angles are degrees.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

impl CameraRig {
    /// Rig starting at the given body yaw with the default downward tilt.
    pub fn new(initial_yaw_deg: f32) -> Self {
        Self {
            yaw_deg: initial_yaw_deg.rem_euclid(360.0),
            pitch_deg: INITIAL_PITCH_DEG,
        }
    }

    /// Apply one frame of mouse input.
    ///
    /// `dx`/`dy` are raw mouse counts; window convention, so positive `dy`
    /// (mouse moved down) increases pitch (looks down).
    pub fn apply_look(&mut self, dx: f32, dy: f32, config: &CameraConfig) {
        self.yaw_deg = (self.yaw_deg + dx * config.sensitivity).rem_euclid(360.0);
        self.pitch_deg = (self.pitch_deg + dy * config.sensitivity)
            .clamp(config.min_pitch_deg, config.max_pitch_deg);
    }

    /// Full look rotation (yaw about +Y, then pitch about the local right).
    #[inline]
    pub fn rotation(&self) -> Quat {
        let yaw = Quat::from_axis_angle(&na::Vector3::y_axis(), self.yaw_deg.to_radians());
        let pitch = Quat::from_axis_angle(&na::Vector3::x_axis(), -self.pitch_deg.to_radians());
        yaw * pitch
    }

    /// View direction (unit vector).
    #[inline]
    pub fn look_dir(&self) -> Vec3 {
        self.rotation() * Vec3::new(0.0, 0.0, -1.0)
    }

    /// Flattened (planar, unit) forward used as the locomotion basis.
    ///
    /// Never degenerate: the pitch clamp keeps the view off the exact poles,
    /// but if it were degenerate we fall back to the yaw-only forward.
    #[inline]
    pub fn planar_forward(&self) -> Vec3 {
        flatten(self.look_dir())
            .unwrap_or_else(|| crate::math::forward_from_yaw(self.yaw_deg.to_radians()))
    }

    /// Compute the renderer pose for this frame.
    ///
    /// - Orbit: eye backed off from the raised anchor along the view
    ///   direction by `distance`, looking at the anchor.
    /// - Attached: eye at the raised anchor, looking along the view
    ///   direction.
    pub fn camera_pose(&self, anchor: Vec3, config: &CameraConfig) -> CameraPose {
        let focus = anchor + Vec3::new(0.0, config.anchor_height, 0.0);
        let dir = self.look_dir();
        match config.mode {
            CameraMode::Orbit => CameraPose {
                eye: focus - dir * config.distance,
                target: focus,
            },
            CameraMode::Attached => CameraPose {
                eye: focus,
                target: focus + dir,
            },
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(0.0)
    }
}
