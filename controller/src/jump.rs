//! One-shot jump request latch.

/// Transient jump request, bridging the variable-rate input tick to the
/// fixed-rate physics tick.
///
/// Invariants
/// - At most one request is pending at a time; latching twice before a
///   fixed tick still produces a single impulse.
/// - A request is only ever satisfied once; the fixed tick that applies it
///   also clears it.
/// - Requests made while airborne are dropped silently. There is no queue:
///   a jump press only matters if the character is grounded at the time.
#[derive(Clone, Copy, Debug, Default)]
pub struct JumpController {
    requested: bool,
}

impl JumpController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a jump request from this frame's input. Ignored unless grounded.
    #[inline]
    pub fn request(&mut self, grounded: bool) {
        if grounded {
            self.requested = true;
        }
    }

    /// Consume the pending request at a fixed tick.
    ///
    /// Returns `true` exactly when an impulse should be applied this tick
    /// (pending request AND still grounded). The pending flag is cleared
    /// either way, which is what drops stale airborne requests.
    #[inline]
    pub fn take(&mut self, grounded: bool) -> bool {
        let fire = self.requested && grounded;
        self.requested = false;
        fire
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_request_fires_once() {
        let mut jump = JumpController::new();
        jump.request(true);
        assert!(jump.is_pending());
        assert!(jump.take(true));
        // Satisfied once; nothing left.
        assert!(!jump.take(true));
    }

    #[test]
    fn airborne_request_is_dropped() {
        let mut jump = JumpController::new();
        jump.request(false);
        assert!(!jump.is_pending());
        assert!(!jump.take(true));
    }

    #[test]
    fn pending_request_is_cleared_even_if_airborne_at_tick_time() {
        let mut jump = JumpController::new();
        jump.request(true);
        // Became airborne before the fixed tick: dropped, not deferred.
        assert!(!jump.take(false));
        assert!(!jump.is_pending());
        assert!(!jump.take(true));
    }

    #[test]
    fn repeated_presses_collapse_to_one_request() {
        let mut jump = JumpController::new();
        jump.request(true);
        jump.request(true);
        jump.request(true);
        assert!(jump.take(true));
        assert!(!jump.take(true));
    }
}
