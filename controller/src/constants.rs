/*!
Controller tuning constants and tolerances.

These centralize the parameters used by the camera rig, locomotion, jump
and ground-contact logic. Keeping them together makes tuning easier and
keeps the per-module code free of magic numbers.

Notes
- Distances are in meters, time in seconds, angles in degrees unless noted.
- Defaults match the reference character setup this controller was tuned
  against; override per-game through the config structs.
*/

/// Minimum raw intent magnitude below which movement input is treated as zero.
///
/// Applied to the unnormalized intent vector before normalization. This is a
/// hard constant rather than a config knob: gait classification and the
/// animation signals depend on it agreeing everywhere.
pub const DEAD_ZONE: f32 = 0.1;

/// Minimum upward (Y) component of a contact normal for the surface to count
/// as ground. Contacts at or below this (steep walls, ceilings) never clear
/// the airborne state.
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// Default walking speed (meters per second).
pub const DEFAULT_WALK_SPEED: f32 = 2.0;

/// Default running speed (meters per second).
pub const DEFAULT_RUN_SPEED: f32 = 5.0;

/// Default upward jump impulse magnitude.
pub const DEFAULT_JUMP_IMPULSE: f32 = 5.0;

/// Default exponential turn rate (per second) used to smooth the body's
/// facing toward the camera forward in orbit mode.
///
/// The per-frame blend factor is `1 - exp(-rate * dt)`, which is
/// frame-rate independent.
pub const DEFAULT_TURN_RATE: f32 = 10.0;

/// Default mouse-look sensitivity (degrees per mouse count).
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 3.0;

/// Default orbit radius between the camera and its anchor (meters).
pub const DEFAULT_ORBIT_DISTANCE: f32 = 5.0;

/// Default height of the camera anchor above the character origin (meters).
pub const DEFAULT_ANCHOR_HEIGHT: f32 = 1.5;

/// Default pitch clamp for the orbiting camera (degrees, positive looks down).
pub const DEFAULT_ORBIT_MIN_PITCH_DEG: f32 = -20.0;
pub const DEFAULT_ORBIT_MAX_PITCH_DEG: f32 = 60.0;

/// Pitch clamp for the attached (head-look) camera (degrees). Same clamp
/// mechanism as orbit mode, just wider symmetric bounds stopping short of
/// the poles.
pub const ATTACHED_MIN_PITCH_DEG: f32 = -89.0;
pub const ATTACHED_MAX_PITCH_DEG: f32 = 89.0;

/// Initial downward tilt applied when the rig is created (degrees).
pub const INITIAL_PITCH_DEG: f32 = 20.0;

/// Minimum squared planar length for a direction to produce a yaw (m^2 per
/// tick). Below this the previous facing is kept.
pub const YAW_EPS_SQ: f32 = 1.0e-12;
