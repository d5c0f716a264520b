//! Ground contact state, fed by collision feedback from the physics body.

use crate::constants::GROUND_NORMAL_MIN_Y;
use crate::math::Vec3;

/// Binary grounded/airborne state.
///
/// Starts grounded (the character is assumed to spawn on the floor). The
/// flag is cleared only by [`GroundContactTracker::leave_ground`] (called
/// atomically with the jump impulse) and set only by a qualifying contact
/// while airborne.
#[derive(Clone, Copy, Debug)]
pub struct GroundContactTracker {
    grounded: bool,
}

impl GroundContactTracker {
    pub fn new() -> Self {
        Self { grounded: true }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Mark the character airborne (a jump impulse was just applied).
    #[inline]
    pub fn leave_ground(&mut self) {
        self.grounded = false;
    }

    /// Feed one collision contact. Returns `true` if this contact landed the
    /// character (airborne -> grounded transition).
    ///
    /// Only the contact normal matters: a surface qualifies as ground when
    /// its normal points sufficiently upward (`y > 0.5`). Walls and ceilings
    /// never clear the airborne state, and contacts received while already
    /// grounded are ignored.
    pub fn note_contact(&mut self, normal: Vec3) -> bool {
        if !self.grounded && normal.y > GROUND_NORMAL_MIN_Y {
            self.grounded = true;
            return true;
        }
        false
    }
}

impl Default for GroundContactTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_grounded() {
        assert!(GroundContactTracker::new().is_grounded());
    }

    #[test]
    fn lands_only_on_upward_facing_contact() {
        let mut tracker = GroundContactTracker::new();
        tracker.leave_ground();

        // Wall contact: no landing.
        assert!(!tracker.note_contact(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!tracker.is_grounded());

        // Ceiling contact: no landing.
        assert!(!tracker.note_contact(Vec3::new(0.0, -1.0, 0.0)));
        assert!(!tracker.is_grounded());

        // Flat floor: lands.
        assert!(tracker.note_contact(Vec3::new(0.0, 1.0, 0.0)));
        assert!(tracker.is_grounded());
    }

    #[test]
    fn boundary_normal_does_not_qualify() {
        let mut tracker = GroundContactTracker::new();
        tracker.leave_ground();

        // y = 0.4 is a steep slope, below the threshold: unchanged.
        assert!(!tracker.note_contact(Vec3::new(0.917, 0.4, 0.0)));
        assert!(!tracker.is_grounded());

        // Exactly y = 0.5 is still too steep (strict inequality).
        assert!(!tracker.note_contact(Vec3::new(0.866, 0.5, 0.0)));
        assert!(!tracker.is_grounded());

        // Just above qualifies.
        assert!(tracker.note_contact(Vec3::new(0.86, 0.51, 0.0)));
        assert!(tracker.is_grounded());
    }

    #[test]
    fn contacts_while_grounded_are_ignored() {
        let mut tracker = GroundContactTracker::new();
        // Already grounded: no transition reported.
        assert!(!tracker.note_contact(Vec3::new(0.0, 1.0, 0.0)));
        assert!(tracker.is_grounded());
    }
}
