//! Cursor grab policy: locked and hidden while the gameplay screen is
//! active, released on the title screen.

use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};

use crate::scene::Screen;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Gameplay), grab_cursor);
    app.add_systems(OnEnter(Screen::Title), release_cursor);

    // Re-apply on focus to avoid OS resets
    app.add_systems(Update, reapply_on_focus);
}

fn grab_cursor(mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>) {
    cursor.grab_mode = CursorGrabMode::Locked;
    cursor.visible = false;
}

fn release_cursor(mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>) {
    cursor.grab_mode = CursorGrabMode::None;
    cursor.visible = true;
}

fn reapply_on_focus(
    mut messages: MessageReader<WindowFocused>,
    screen: Res<State<Screen>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    for message in messages.read() {
        if message.focused && *screen.get() == Screen::Gameplay {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        }
    }
}
