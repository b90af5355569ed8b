//! Per-frame input resource.
//!
//! Captures the subset of input the game cares about and exposes it to
//! systems via the [`InputState`] resource. The frontend fills it once per
//! frame from the keyboard and window; headless runs and tests drive it
//! directly.
//!
//! Default bindings: arrows move, space jumps, up attacks, enter confirms and
//! escape or closing the window quits.
use bevy_ecs::prelude::*;

/// Boolean key state with edge detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the raw "is down" level for this frame and derive the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }

    /// Press and hold.
    pub fn press(&mut self) {
        self.update(true);
    }

    pub fn release(&mut self) {
        self.update(false);
    }

    /// Drop this frame's edges but keep the held level, so a key that stays
    /// down does not read as a fresh press next frame.
    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
///
/// `move_left`/`move_right` are read as held levels; `jump`, `attack`,
/// `confirm` and `quit` are read as key-down edges.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub attack: BoolState,
    pub confirm: BoolState,
    /// Escape key or window close request.
    pub quit: BoolState,
}

impl InputState {
    /// Discard this frame's key-down and key-up edges. Used on pause
    /// overlays so keys pressed there do not leak into play.
    pub fn clear_edges(&mut self) {
        for key in [
            &mut self.move_left,
            &mut self.move_right,
            &mut self.jump,
            &mut self.attack,
            &mut self.confirm,
            &mut self.quit,
        ] {
            key.clear_edges();
        }
    }
}
