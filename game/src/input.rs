//! Gathers the per-frame input sample fed to the player controller.
//!
//! Keyboard/gamepad bindings go through leafwing-input-manager; raw mouse
//! motion comes straight from `AccumulatedMouseMotion` so look input is not
//! filtered by any binding layer.

use bevy::{input::mouse::AccumulatedMouseMotion, prelude::*};
use controller::InputSample;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    #[actionlike(DualAxis)]
    Move,
    Run,
    Jump,
}

/// The input sample for the current frame, refreshed at the top of `Update`.
#[derive(Resource, Default)]
pub struct FrameInput(pub InputSample);

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<PlayerAction>::default());

    app.register_type::<PlayerAction>();

    let mut input_map = InputMap::<PlayerAction>::default();
    input_map.insert_dual_axis(PlayerAction::Move, VirtualDPad::wasd());
    input_map.insert_dual_axis(PlayerAction::Move, VirtualDPad::arrow_keys());
    input_map.insert(PlayerAction::Run, KeyCode::ShiftLeft);
    input_map.insert(PlayerAction::Jump, KeyCode::Space);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<PlayerAction>::default());

    app.init_resource::<FrameInput>();
    app.add_systems(Update, sample);
}

pub(crate) fn sample(
    actions: Res<ActionState<PlayerAction>>,
    mouse: Res<AccumulatedMouseMotion>,
    mut frame: ResMut<FrameInput>,
) {
    let axis = actions.axis_pair(&PlayerAction::Move);
    frame.0 = InputSample {
        move_horizontal: axis.x,
        move_vertical: axis.y,
        mouse_delta_x: mouse.delta.x,
        mouse_delta_y: mouse.delta.y,
        run_held: actions.pressed(&PlayerAction::Run),
        jump_pressed: actions.just_pressed(&PlayerAction::Jump),
    }
    .clamped();
}
