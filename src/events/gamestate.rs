//! State transition trigger and the observer that applies it.
//!
//! Whoever asks for a transition (round end, death, confirm, quit) has
//! already put the world in order; the observer only swaps the state and
//! writes the music cue for the pair of states involved.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::events::audio::{AudioCmd, MUSIC_LEVEL};
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};

/// Apply whatever [`NextGameState`] holds.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    next_game_state: Option<ResMut<NextGameState>>,
    game_state: Option<ResMut<GameState>>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    let (Some(mut next_game_state), Some(mut game_state)) = (next_game_state, game_state) else {
        warn!("State change requested without GameState/NextGameState resources");
        return;
    };
    let NextGameStates::Pending(new_state) = next_game_state.get().clone() else {
        debug!("No state change pending");
        return;
    };
    let old_state = game_state.get().clone();
    info!("State {:?} -> {:?}", old_state, new_state);
    game_state.set(new_state.clone());
    next_game_state.reset();
    if let Some(cmd) = music_cue(&old_state, &new_state) {
        audio_cmd_writer.write(cmd);
    }
}

/// Music command issued when moving from `old` to `new`.
///
/// Starting from the title or after a game over restarts the level music;
/// finishing a night pauses it and continuing resumes it; dying or quitting
/// stops it.
pub fn music_cue(old: &GameStates, new: &GameStates) -> Option<AudioCmd> {
    let id = MUSIC_LEVEL.to_string();
    match (old, new) {
        (GameStates::Title | GameStates::GameOver { .. }, GameStates::Playing) => {
            Some(AudioCmd::PlayMusic { id, looped: true })
        }
        (GameStates::RoundComplete, GameStates::Playing) => Some(AudioCmd::ResumeMusic { id }),
        (_, GameStates::RoundComplete) => Some(AudioCmd::PauseMusic { id }),
        (_, GameStates::GameOver { .. }) | (_, GameStates::Quitting) => {
            Some(AudioCmd::StopMusic { id })
        }
        _ => None,
    }
}
