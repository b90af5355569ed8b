//! Keyboard and window polling into [`InputState`].
//!
//! Left / right arrows move, space jumps, up attacks, enter confirms.
//! Escape or closing the window quits.

use raylib::prelude::*;

use zombieknight::resources::input::InputState;

pub fn poll_input(rl: &RaylibHandle, input: &mut InputState) {
    input.move_left.update(rl.is_key_down(KeyboardKey::KEY_LEFT));
    input.move_right.update(rl.is_key_down(KeyboardKey::KEY_RIGHT));
    input.jump.update(rl.is_key_down(KeyboardKey::KEY_SPACE));
    input.attack.update(rl.is_key_down(KeyboardKey::KEY_UP));
    input.confirm.update(rl.is_key_down(KeyboardKey::KEY_ENTER));
    input
        .quit
        .update(rl.is_key_down(KeyboardKey::KEY_ESCAPE) || rl.window_should_close());
}
