use bevy::prelude::*;
use bloom_helpers::floating_score::animate_floating_scores;
use bloom_helpers::sprites::{self, SheetValidation, SpriteSheetPlugin};
use bloom_helpers::welcome_screen::despawn_welcome_screen;
use shell::FlowerRush;

mod core;
mod hud;
mod input;
mod motion;
mod pause;
mod round_over;
mod rounds;
mod scoring;
mod session;
mod shell;
mod spawner;
mod welcome;

use core::{Avatar, GameState};

use hud::{cleanup_session, spawn_game_elements, update_hud};
use input::{
    AvatarControl, ControlScheme, TiltSignal, apply_tilt, handle_drag_input, read_tilt_keys,
    sync_avatar_transform,
};
use motion::{despawn_offscreen, move_objects, resolve_catches};
use pause::{
    cleanup_pause_overlay, handle_pause_button, handle_resume_input, spawn_pause_overlay,
};
use round_over::{cleanup_round_over, handle_round_over_buttons, spawn_round_over_screen};
use rounds::{RoundSession, RoundTimer, finalize_round, tick_round_clock};
use scoring::ScoreLedger;
use session::ArtistSession;
use spawner::{ObjectSequence, spawn_falling_objects};
use welcome::{handle_welcome_input, refresh_welcome, spawn_welcome};

/// Condition system that checks if the sprite sheet is ready
fn sheet_ready(validation: Res<SheetValidation>) -> bool {
    sprites::is_sheet_ready(&validation)
}

/// Entry point for the game
pub fn run() {
    let mut app = bloom_helpers::get_default_app::<FlowerRush>(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    app.add_plugins(SpriteSheetPlugin)
        // Initialize core resources
        .init_state::<GameState>()
        .init_resource::<ScoreLedger>()
        .init_resource::<RoundTimer>()
        .init_resource::<RoundSession>()
        .init_resource::<ArtistSession>()
        .init_resource::<AvatarControl>()
        .init_resource::<TiltSignal>()
        .init_resource::<ControlScheme>()
        .init_resource::<ObjectSequence>()
        // Falling and spawning run on a fixed cadence
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        // Add startup systems
        .add_systems(Startup, setup_camera)
        // Welcome state
        .add_systems(OnEnter(GameState::Welcome), spawn_welcome)
        .add_systems(
            Update,
            (
                handle_welcome_input.run_if(sheet_ready),
                refresh_welcome.run_if(resource_changed::<ArtistSession>),
            )
                .run_if(in_state(GameState::Welcome)),
        )
        .add_systems(OnExit(GameState::Welcome), despawn_welcome_screen)
        // Playing state. Spawning is skipped when the avatar survived a
        // pause or an extension.
        .add_systems(
            OnEnter(GameState::Playing),
            spawn_game_elements.run_if(not(any_with_component::<Avatar>)),
        )
        .add_systems(
            FixedUpdate,
            (
                apply_tilt.run_if(resource_equals(ControlScheme::Tilt)),
                spawn_falling_objects,
                move_objects,
                resolve_catches,
                despawn_offscreen,
            )
                .chain()
                .run_if(in_state(GameState::Playing))
                .run_if(sheet_ready),
        )
        .add_systems(
            Update,
            (
                handle_drag_input.run_if(resource_equals(ControlScheme::Drag)),
                read_tilt_keys.run_if(resource_equals(ControlScheme::Tilt)),
                sync_avatar_transform,
                tick_round_clock,
                update_hud,
                handle_pause_button,
                animate_floating_scores,
            )
                .run_if(in_state(GameState::Playing)),
        )
        // Paused state
        .add_systems(OnEnter(GameState::Paused), spawn_pause_overlay)
        .add_systems(
            Update,
            handle_resume_input.run_if(in_state(GameState::Paused)),
        )
        .add_systems(OnExit(GameState::Paused), cleanup_pause_overlay)
        // Round over state
        .add_systems(
            OnEnter(GameState::RoundOver),
            (finalize_round, spawn_round_over_screen).chain(),
        )
        .add_systems(
            Update,
            handle_round_over_buttons.run_if(in_state(GameState::RoundOver)),
        )
        .add_systems(OnExit(GameState::RoundOver), cleanup_round_over)
        // Terminated state hands control back to the shell
        .add_systems(OnEnter(GameState::Terminated), cleanup_session);

    app.run();
}

/// Sets up the main 2D camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
