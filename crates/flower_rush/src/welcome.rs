use bevy::prelude::*;
use bloom_helpers::FONT;
use bloom_helpers::welcome_screen::{WelcomeScreenElement, spawn_welcome_screen};

use crate::core::GameState;
use crate::session::ArtistSession;

fn spawn_contents(
    commands: &mut Commands,
    asset_server: &Res<AssetServer>,
    session: &ArtistSession,
) {
    if let Some(artist) = &session.artist {
        spawn_welcome_screen(
            commands,
            asset_server,
            "Flower Rush",
            &format!("Catch flowers for {}", artist.name),
        );

        commands.spawn((
            Text::new(format!("Beware of {}", session.fake_artist_label())),
            TextFont {
                font: asset_server.load(FONT),
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.4, 0.4)),
            TextLayout::new_with_justify(JustifyText::Center),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(42.0),
                width: Val::Percent(100.0),
                align_items: AlignItems::Center,
                ..default()
            },
            WelcomeScreenElement,
        ));
    } else {
        // Terminal display: nothing ticks until the shell hands over an
        // artist.
        spawn_welcome_screen(
            commands,
            asset_server,
            "Flower Rush",
            "Select an artist in Bloom to play",
        );
    }
}

pub fn spawn_welcome(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    session: Res<ArtistSession>,
) {
    spawn_contents(&mut commands, &asset_server, &session);
}

/// Redraws the welcome screen when the shell selects or clears the
/// artist while we are already sitting on it.
pub fn refresh_welcome(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    session: Res<ArtistSession>,
    elements: Query<Entity, With<WelcomeScreenElement>>,
) {
    for entity in &elements {
        commands.entity(entity).despawn_recursive();
    }
    spawn_contents(&mut commands, &asset_server, &session);
}

/// Starts the round on tap, but only once an artist is selected.
pub fn handle_welcome_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    session: Res<ArtistSession>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !session.is_ready() {
        return;
    }

    if mouse_input.just_pressed(MouseButton::Left) || touch_input.any_just_pressed() {
        next_state.set(GameState::Playing);
    }
}
