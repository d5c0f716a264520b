//! Animator parameter store. This is the sink the controller's animation
//! signals are published into; a skinned-mesh setup would map these flags
//! onto animation graph transitions.

use bevy::{platform::collections::HashMap, prelude::*};
use controller::Animator;

/// Named boolean animator parameters attached to the player entity.
#[derive(Component, Default, Debug)]
pub struct AnimatorParams {
    flags: HashMap<&'static str, bool>,
}

impl AnimatorParams {
    pub fn get(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

impl Animator for AnimatorParams {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.flags.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use controller::{IS_GROUNDED, IS_WALKING};

    #[test]
    fn unset_params_read_false() {
        let params = AnimatorParams::default();
        assert!(!params.get(IS_WALKING));
    }

    #[test]
    fn set_bool_overwrites() {
        let mut params = AnimatorParams::default();
        params.set_bool(IS_GROUNDED, true);
        params.set_bool(IS_GROUNDED, false);
        assert!(!params.get(IS_GROUNDED));
    }
}
