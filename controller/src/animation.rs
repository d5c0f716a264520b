//! Animation signal bridge: controller state -> named animator booleans.
//!
//! The consuming animator treats its parameters as independently toggled
//! layers, so the four flags are published separately rather than collapsed
//! into one enum. In particular `is_jumping` and `is_grounded` are both
//! false for the whole airborne arc between the impulse and the landing
//! contact; that is the expected steady state, not a glitch.

use crate::locomotion::LocomotionState;

/// Animator parameter names, kept identical to the animation graph they
/// drive.
pub const IS_WALKING: &str = "isWalking";
pub const IS_RUNNING: &str = "isRunning";
pub const IS_JUMPING: &str = "isJumping";
pub const IS_GROUNDED: &str = "isGrounded";

/// Anything that accepts named boolean animation parameters.
///
/// Fire-and-forget: implementations must not fail and the bridge never
/// reads back.
pub trait Animator {
    fn set_bool(&mut self, name: &'static str, value: bool);
}

/// The four independent boolean signals, as last published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationSignals {
    pub is_walking: bool,
    pub is_running: bool,
    pub is_jumping: bool,
    pub is_grounded: bool,
}

/// Maps gait + ground + jump state into [`AnimationSignals`] every fixed
/// tick.
///
/// `is_jumping` is edge-driven: set exactly when a jump impulse is applied,
/// cleared when ground contact is regained. The other three are level-driven
/// from the current tick's state.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationSignalBridge {
    signals: AnimationSignals,
}

impl AnimationSignalBridge {
    pub fn new() -> Self {
        Self {
            signals: AnimationSignals {
                is_grounded: true,
                ..AnimationSignals::default()
            },
        }
    }

    /// A jump impulse was applied this tick.
    #[inline]
    pub fn on_jump_applied(&mut self) {
        self.signals.is_jumping = true;
    }

    /// A qualifying ground contact landed the character.
    #[inline]
    pub fn on_landed(&mut self) {
        self.signals.is_jumping = false;
    }

    /// Recompute the level-driven signals for this fixed tick.
    ///
    /// Walking/running come from gait alone (orthogonal to the ground flag:
    /// a character steering mid-air still reports its gait), and are
    /// mutually exclusive by construction of [`LocomotionState`].
    pub fn refresh(&mut self, gait: LocomotionState, grounded: bool) -> AnimationSignals {
        self.signals.is_walking = gait == LocomotionState::Walking;
        self.signals.is_running = gait == LocomotionState::Running;
        self.signals.is_grounded = grounded;
        self.signals
    }

    #[inline]
    pub fn signals(&self) -> AnimationSignals {
        self.signals
    }

    /// Publish all four parameters to the animator.
    pub fn publish<A: Animator>(&self, animator: &mut A) {
        animator.set_bool(IS_WALKING, self.signals.is_walking);
        animator.set_bool(IS_RUNNING, self.signals.is_running);
        animator.set_bool(IS_JUMPING, self.signals.is_jumping);
        animator.set_bool(IS_GROUNDED, self.signals.is_grounded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAnimator {
        calls: Vec<(&'static str, bool)>,
    }

    impl Animator for RecordingAnimator {
        fn set_bool(&mut self, name: &'static str, value: bool) {
            self.calls.push((name, value));
        }
    }

    #[test]
    fn walking_and_running_are_mutually_exclusive() {
        let mut bridge = AnimationSignalBridge::new();
        for gait in [
            LocomotionState::Idle,
            LocomotionState::Walking,
            LocomotionState::Running,
        ] {
            let signals = bridge.refresh(gait, true);
            assert!(!(signals.is_walking && signals.is_running), "gait {gait:?}");
        }
    }

    #[test]
    fn jumping_flag_spans_impulse_to_landing() {
        let mut bridge = AnimationSignalBridge::new();

        bridge.on_jump_applied();
        let mid_air = bridge.refresh(LocomotionState::Idle, false);
        assert!(mid_air.is_jumping);
        assert!(!mid_air.is_grounded);

        bridge.on_landed();
        let landed = bridge.refresh(LocomotionState::Idle, true);
        assert!(!landed.is_jumping);
        assert!(landed.is_grounded);
    }

    #[test]
    fn jumping_and_grounded_may_both_be_false_mid_air() {
        let mut bridge = AnimationSignalBridge::new();
        // Walked off a ledge: never jumped, not grounded.
        let signals = bridge.refresh(LocomotionState::Walking, false);
        assert!(!signals.is_jumping);
        assert!(!signals.is_grounded);
        // Gait is still reported while airborne.
        assert!(signals.is_walking);
    }

    #[test]
    fn publish_emits_all_four_parameters() {
        let mut bridge = AnimationSignalBridge::new();
        bridge.refresh(LocomotionState::Running, true);

        let mut animator = RecordingAnimator::default();
        bridge.publish(&mut animator);

        assert_eq!(
            animator.calls,
            vec![
                (IS_WALKING, false),
                (IS_RUNNING, true),
                (IS_JUMPING, false),
                (IS_GROUNDED, true),
            ]
        );
    }
}
