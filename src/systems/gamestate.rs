//! Pause handling and state transition plumbing.
//!
//! Every frame, whatever the state:
//!
//! - [`handle_state_input`] turns quit into [`GameStates::Quitting`] and,
//!   on a pause overlay, confirm into [`GameStates::Playing`]. Other keys
//!   pressed while paused are discarded.
//! - [`check_pending_state`] fires [`GameStateChangedEvent`] when a
//!   transition is pending, so the observer applies it.
//!
//! [`state_is_playing`] gates the simulation systems.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;

pub fn handle_state_input(
    mut input: ResMut<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    if input.quit.just_pressed {
        info!("Quit requested");
        next_state.set(GameStates::Quitting);
        return;
    }
    if !state.get().is_paused() {
        return;
    }
    if input.confirm.just_pressed {
        next_state.set(GameStates::Playing);
    }
    // Keys pressed on an overlay never reach the simulation.
    input.clear_edges();
}

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::audio::AudioCmd;
    use crate::events::gamestate::observe_gamestate_change_event;

    fn setup(state: GameStates) -> (World, Schedule) {
        let mut world = World::new();
        let mut game_state = GameState::new();
        game_state.set(state);
        world.insert_resource(game_state);
        world.insert_resource(NextGameState::new());
        world.insert_resource(InputState::default());
        world.init_resource::<Messages<AudioCmd>>();
        world.add_observer(observe_gamestate_change_event);
        world.flush();
        let mut schedule = Schedule::default();
        schedule.add_systems((handle_state_input, check_pending_state).chain());
        (world, schedule)
    }

    fn current(world: &World) -> GameStates {
        world.resource::<GameState>().get().clone()
    }

    #[test]
    fn test_confirm_leaves_title() {
        let (mut world, mut schedule) = setup(GameStates::Title);
        world.resource_mut::<InputState>().confirm.press();
        schedule.run(&mut world);
        assert_eq!(current(&world), GameStates::Playing);
    }

    #[test]
    fn test_other_keys_are_discarded_while_paused() {
        let (mut world, mut schedule) = setup(GameStates::RoundComplete);
        {
            let mut input = world.resource_mut::<InputState>();
            input.jump.press();
            input.attack.press();
        }
        schedule.run(&mut world);
        assert_eq!(current(&world), GameStates::RoundComplete);
        let input = world.resource::<InputState>();
        assert!(!input.jump.just_pressed);
        assert!(!input.attack.just_pressed);
    }

    #[test]
    fn test_confirm_held_into_overlay_does_not_dismiss_it() {
        let (mut world, mut schedule) = setup(GameStates::Playing);
        world.resource_mut::<InputState>().confirm.press();
        schedule.run(&mut world);
        world.resource_mut::<GameState>().set(GameStates::RoundComplete);
        for _ in 0..5 {
            world.resource_mut::<InputState>().confirm.update(true);
            schedule.run(&mut world);
            assert_eq!(current(&world), GameStates::RoundComplete);
        }

        // Release and press again.
        world.resource_mut::<InputState>().confirm.update(false);
        schedule.run(&mut world);
        assert_eq!(current(&world), GameStates::RoundComplete);
        world.resource_mut::<InputState>().confirm.update(true);
        schedule.run(&mut world);
        assert_eq!(current(&world), GameStates::Playing);
    }

    #[test]
    fn test_quit_interrupts_pause() {
        let (mut world, mut schedule) = setup(GameStates::GameOver { final_score: 50 });
        world.resource_mut::<InputState>().quit.press();
        schedule.run(&mut world);
        assert_eq!(current(&world), GameStates::Quitting);
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        let (mut world, mut schedule) = setup(GameStates::Playing);
        world.resource_mut::<InputState>().confirm.press();
        schedule.run(&mut world);
        assert_eq!(current(&world), GameStates::Playing);
        assert!(world.resource::<InputState>().confirm.just_pressed);
    }
}
