//! Planar locomotion: input intent + camera basis -> velocity request.
//!
//! This layer is stateless; gait is recomputed from the current sample every
//! tick (no hysteresis). Ground state is deliberately not consulted here:
//! horizontal movement stays fully controllable while airborne, and only the
//! jump and animation paths care about ground contact.
//!
//! The output is a velocity, not a displacement: the fixed-rate consumer
//! scales it by its own timestep, so displacement per second never depends
//! on how often the variable-rate tick recomputes the intent.

use crate::constants::{DEAD_ZONE, DEFAULT_RUN_SPEED, DEFAULT_TURN_RATE, DEFAULT_WALK_SPEED};
use crate::input::InputSample;
use crate::math::{Quat, Vec3, facing_from_planar};

/// Locomotion classification for the current tick.
///
/// `Idle`/`Walking`/`Running` are a pure function of the input sample.
/// `Airborne` is derived from the ground flag by the orchestrating
/// controller; it is orthogonal to gait as far as the animator is concerned
/// (a character can be walking-in-the-air during a running jump).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LocomotionState {
    #[default]
    Idle,
    Walking,
    Running,
    Airborne,
}

/// Speed and turn tuning.
#[derive(Clone, Copy, Debug)]
pub struct LocomotionConfig {
    /// Walking speed (meters per second).
    pub walk_speed: f32,
    /// Running speed (meters per second).
    pub run_speed: f32,
    /// Exponential rate for facing smoothing in orbit mode (per second).
    pub turn_rate: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            run_speed: DEFAULT_RUN_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
        }
    }
}

/// Output of a single locomotion tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocomotionStep {
    /// Planar velocity to request from the physics body (meters per second).
    pub velocity: Vec3,
    /// Gait classification for this tick (never `Airborne` at this layer).
    pub gait: LocomotionState,
}

/// Compute this tick's velocity request from intent and the planar basis.
///
/// - `planar_forward` must be a unit XZ vector (camera-relative in orbit
///   mode, body-relative in attached mode); right is derived from it.
/// - Raw intent below [`DEAD_ZONE`] produces no movement and gait `Idle`.
/// - Running requires the run modifier AND forward intent (`move_vertical >
///   0`); strafing or backpedaling with the modifier held still walks.
pub fn tick(
    config: &LocomotionConfig,
    input: &InputSample,
    planar_forward: Vec3,
) -> LocomotionStep {
    let up = Vec3::new(0.0, 1.0, 0.0);
    let right = planar_forward.cross(&up);

    let raw = planar_forward * input.move_vertical + right * input.move_horizontal;
    let magnitude = raw.norm();
    if magnitude <= DEAD_ZONE {
        return LocomotionStep::default();
    }
    let direction = raw / magnitude;

    let running = input.run_held && input.move_vertical > 0.0;
    let speed = if running {
        config.run_speed
    } else {
        config.walk_speed
    };

    LocomotionStep {
        velocity: direction * speed,
        gait: if running {
            LocomotionState::Running
        } else {
            LocomotionState::Walking
        },
    }
}

/// Smooth the body facing toward `target_forward` (planar) with a
/// frame-rate-independent exponential factor `1 - exp(-turn_rate * dt)`.
///
/// Returns `None` when the target direction is degenerate; callers keep the
/// current rotation in that case.
#[inline]
pub fn smoothed_facing(current: Quat, target_forward: Vec3, turn_rate: f32, dt: f32) -> Option<Quat> {
    let target = facing_from_planar(target_forward)?;
    let t = 1.0 - (-turn_rate * dt.max(0.0)).exp();
    Some(current.slerp(&target, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::forward_from_yaw;

    fn forward_input(mv: f32, mh: f32) -> InputSample {
        InputSample {
            move_vertical: mv,
            move_horizontal: mh,
            ..InputSample::default()
        }
    }

    #[test]
    fn intent_below_dead_zone_is_idle() {
        let config = LocomotionConfig::default();
        let fwd = forward_from_yaw(0.0);
        for (mv, mh) in [(0.0, 0.0), (0.05, 0.05), (0.0, 0.1), (-0.1, 0.0)] {
            let step = tick(&config, &forward_input(mv, mh), fwd);
            assert_eq!(step.gait, LocomotionState::Idle, "mv={mv} mh={mh}");
            assert_eq!(step.velocity, Vec3::zeros());
        }
    }

    #[test]
    fn run_requires_modifier_and_forward_intent() {
        let config = LocomotionConfig::default();
        let fwd = forward_from_yaw(0.0);

        // Modifier + forward = running.
        let mut input = forward_input(1.0, 0.0);
        input.run_held = true;
        assert_eq!(tick(&config, &input, fwd).gait, LocomotionState::Running);

        // Modifier while backpedaling = walking.
        input.move_vertical = -1.0;
        assert_eq!(tick(&config, &input, fwd).gait, LocomotionState::Walking);

        // Modifier while pure strafing = walking.
        input.move_vertical = 0.0;
        input.move_horizontal = 1.0;
        assert_eq!(tick(&config, &input, fwd).gait, LocomotionState::Walking);

        // Forward without modifier = walking.
        input.run_held = false;
        input.move_vertical = 1.0;
        input.move_horizontal = 0.0;
        assert_eq!(tick(&config, &input, fwd).gait, LocomotionState::Walking);
    }

    #[test]
    fn velocity_matches_selected_speed() {
        let config = LocomotionConfig::default();
        let fwd = forward_from_yaw(0.0);

        let walk = tick(&config, &forward_input(1.0, 0.0), fwd);
        assert!((walk.velocity.norm() - config.walk_speed).abs() < 1.0e-5);

        let mut input = forward_input(1.0, 0.0);
        input.run_held = true;
        let run = tick(&config, &input, fwd);
        assert!((run.velocity.norm() - config.run_speed).abs() < 1.0e-5);
    }

    #[test]
    fn diagonal_intent_is_normalized() {
        let config = LocomotionConfig::default();
        let fwd = forward_from_yaw(0.0);

        let step = tick(&config, &forward_input(1.0, 1.0), fwd);
        // Full diagonal deflection still moves at exactly walk speed.
        assert!((step.velocity.norm() - config.walk_speed).abs() < 1.0e-5);
    }

    #[test]
    fn movement_is_relative_to_the_given_basis() {
        let config = LocomotionConfig::default();

        // Facing +X (yaw -90 degrees): forward input moves along +X.
        let fwd = forward_from_yaw(-90.0_f32.to_radians());
        let step = tick(&config, &forward_input(1.0, 0.0), fwd);
        let dir = step.velocity / step.velocity.norm();
        assert!((dir.x - 1.0).abs() < 1.0e-4, "dir = {dir:?}");
        assert!(dir.z.abs() < 1.0e-4);
    }

    #[test]
    fn smoothed_facing_converges_and_is_framerate_independent() {
        let fwd = Vec3::new(0.0, 0.0, -1.0);
        let target = Vec3::new(1.0, 0.0, 0.0);
        let start = facing_from_planar(fwd).unwrap();

        // One 0.2s step vs four 0.05s steps land in the same place.
        let coarse = smoothed_facing(start, target, 10.0, 0.2).unwrap();
        let mut fine = start;
        for _ in 0..4 {
            fine = smoothed_facing(fine, target, 10.0, 0.05).unwrap();
        }
        assert!(coarse.angle_to(&fine) < 0.02);

        // Long enough simulation converges onto the target heading.
        let mut facing = start;
        for _ in 0..300 {
            facing = smoothed_facing(facing, target, 10.0, 1.0 / 60.0).unwrap();
        }
        let goal = facing_from_planar(target).unwrap();
        assert!(facing.angle_to(&goal) < 1.0e-2);
    }

    #[test]
    fn degenerate_facing_target_keeps_current() {
        let start = facing_from_planar(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(smoothed_facing(start, Vec3::zeros(), 10.0, 0.016).is_none());
    }
}
