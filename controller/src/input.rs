/// A per-frame snapshot of player intent.
///
/// Produced fresh every variable-rate tick by the input provider and never
/// persisted. Axis values are expected in [-1, 1]; mouse deltas are raw
/// counts for the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// Strafe axis: -1 = left, +1 = right.
    pub move_horizontal: f32,
    /// Forward axis: -1 = backward, +1 = forward.
    pub move_vertical: f32,
    /// Horizontal mouse delta for this frame (counts).
    pub mouse_delta_x: f32,
    /// Vertical mouse delta for this frame (counts, positive = down).
    pub mouse_delta_y: f32,
    /// Run modifier currently held.
    pub run_held: bool,
    /// Jump was pressed this frame (edge, not level).
    pub jump_pressed: bool,
}

impl InputSample {
    /// Defensive copy with out-of-range values repaired.
    ///
    /// Malformed axis values are clamped into [-1, 1] and non-finite values
    /// (including mouse deltas) collapse to zero. Bad input degrades to
    /// "no input", never to an error.
    #[inline]
    pub fn clamped(&self) -> Self {
        Self {
            move_horizontal: clamp_axis(self.move_horizontal),
            move_vertical: clamp_axis(self.move_vertical),
            mouse_delta_x: finite_or_zero(self.mouse_delta_x),
            mouse_delta_y: finite_or_zero(self.mouse_delta_y),
            run_held: self.run_held,
            jump_pressed: self.jump_pressed,
        }
    }
}

#[inline]
fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_sample_is_untouched() {
        let sample = InputSample {
            move_horizontal: -0.5,
            move_vertical: 1.0,
            mouse_delta_x: 12.5,
            mouse_delta_y: -3.0,
            run_held: true,
            jump_pressed: true,
        };
        assert_eq!(sample.clamped(), sample);
    }

    #[test]
    fn out_of_range_axes_are_clamped() {
        let sample = InputSample {
            move_horizontal: 4.0,
            move_vertical: -7.5,
            ..InputSample::default()
        };
        let fixed = sample.clamped();
        assert_eq!(fixed.move_horizontal, 1.0);
        assert_eq!(fixed.move_vertical, -1.0);
    }

    #[test]
    fn non_finite_values_collapse_to_zero() {
        let sample = InputSample {
            move_horizontal: f32::NAN,
            move_vertical: f32::INFINITY,
            mouse_delta_x: f32::NEG_INFINITY,
            mouse_delta_y: f32::NAN,
            ..InputSample::default()
        };
        let fixed = sample.clamped();
        assert_eq!(fixed.move_horizontal, 0.0);
        assert_eq!(fixed.move_vertical, 0.0);
        assert_eq!(fixed.mouse_delta_x, 0.0);
        assert_eq!(fixed.mouse_delta_y, 0.0);
    }
}
