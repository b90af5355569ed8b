//! Session overlay state and requested transitions.
//!
//! [`GameState`] is what the frame driver reads to decide whether the
//! simulation runs. Systems never write it directly: they put the target in
//! [`NextGameState`] and `check_pending_state` hands it to the transition
//! observer in `crate::events::gamestate`.

use bevy_ecs::prelude::Resource;

/// Only `Playing` advances the world; every other state is an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    Title,
    Playing,
    /// Night survived, next round already set up.
    RoundComplete,
    /// Knight died, session already reset.
    GameOver { final_score: u32 },
    Quitting,
}

impl GameStates {
    /// Overlays that wait for confirm.
    pub fn is_paused(&self) -> bool {
        matches!(
            self,
            GameStates::Title | GameStates::RoundComplete | GameStates::GameOver { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &GameStates {
        &self.current
    }

    /// Overwrite the state without a music cue. Tests and the observer only.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Queue `next`; a later request in the same frame replaces it.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
