use bevy::log::info;
use bevy::prelude::{NextState, State};
use bloom_helpers::{ArtistProfile, GameDuration, SessionResult, ShellMessageHandler};

use crate::core::GameState;
use crate::input::AvatarControl;
use crate::rounds::{RoundSession, RoundTimer, session_result};
use crate::scoring::ScoreLedger;
use crate::session::ArtistSession;

#[derive(Default, Clone, Copy)]
pub struct FlowerRush;

impl ShellMessageHandler for FlowerRush {
    fn restart(world: &mut bevy::prelude::World) {
        info!("Restarting Flower Rush");

        if let Some(mut ledger) = world.get_resource_mut::<ScoreLedger>() {
            *ledger = ScoreLedger::default();
        }
        if let Some(mut session) = world.get_resource_mut::<RoundSession>() {
            *session = RoundSession::default();
        }
        if let Some(mut timer) = world.get_resource_mut::<RoundTimer>() {
            timer.reset();
        }
        if let Some(mut control) = world.get_resource_mut::<AvatarControl>() {
            *control = AvatarControl::default();
        }

        // Return to welcome screen
        let mut next_state = world.resource_mut::<NextState<GameState>>();
        next_state.set(GameState::Welcome);
    }

    fn end(world: &mut bevy::prelude::World) -> SessionResult {
        info!("Ending Flower Rush");

        // A session that never left the welcome screen has no result.
        let result = if *world.resource::<State<GameState>>().get() == GameState::Welcome {
            SessionResult::Aborted
        } else {
            world
                .get_resource::<ScoreLedger>()
                .map_or(SessionResult::Aborted, session_result)
        };

        let mut next_state = world.resource_mut::<NextState<GameState>>();
        next_state.set(GameState::Terminated);

        result
    }

    fn duration(_world: &mut bevy::prelude::World) -> GameDuration {
        // The game runs its own round clock
        GameDuration::max_duration()
    }

    fn select_artist(world: &mut bevy::prelude::World, artist: ArtistProfile) {
        info!("Artist selected: {}", artist.name);

        if let Some(mut session) = world.get_resource_mut::<ArtistSession>() {
            session.artist = Some(artist);
        }
    }

    fn clear_artist(world: &mut bevy::prelude::World) {
        info!("Artist cleared");

        if let Some(mut session) = world.get_resource_mut::<ArtistSession>() {
            session.artist = None;
        }

        let mut next_state = world.resource_mut::<NextState<GameState>>();
        next_state.set(GameState::Welcome);
    }
}
