pub mod animation;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod ground;
pub mod input;
pub mod jump;
pub mod locomotion;
pub mod math;

pub use animation::{
    AnimationSignalBridge, AnimationSignals, Animator, IS_GROUNDED, IS_JUMPING, IS_RUNNING,
    IS_WALKING,
};
pub use camera::{CameraConfig, CameraMode, CameraPose, CameraRig};
pub use constants::{DEAD_ZONE, GROUND_NORMAL_MIN_Y};
pub use controller::{ControllerConfig, FixedStep, FrameOutput, PlayerController};
pub use ground::GroundContactTracker;
pub use input::InputSample;
pub use jump::JumpController;
pub use locomotion::{LocomotionConfig, LocomotionState, LocomotionStep};
pub use math::{Quat, Vec3};
