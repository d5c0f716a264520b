//! Minimal screen state. The menu flow proper lives outside the controller
//! core; all it contributes here is "is the gameplay scene active", which
//! gates the controller systems and drives the cursor policy.

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    Title,
    #[default]
    Gameplay,
}

pub(super) fn plugin(app: &mut App) {
    app.init_state::<Screen>();
    app.add_systems(Update, toggle_screen);
}

/// Escape toggles between the title screen and gameplay.
fn toggle_screen(
    keys: Res<ButtonInput<KeyCode>>,
    screen: Res<State<Screen>>,
    mut next: ResMut<NextState<Screen>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next.set(match screen.get() {
            Screen::Gameplay => Screen::Title,
            Screen::Title => Screen::Gameplay,
        });
    }
}
