use bevy::prelude::*;
use bloom_helpers::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::core::Avatar;
use crate::core::config::{AVATAR_SIZE, AVATAR_Y, CATFISH_LIMIT, POINTS_PER_FLOWER};
use crate::pause::PauseButton;
use crate::rounds::{RoundSession, RoundTimer};
use crate::scoring::ScoreLedger;
use crate::session::ArtistSession;

/// Marker for everything spawned for a play session, cleaned up on
/// Terminated.
#[derive(Component)]
pub struct HudElement;

#[derive(Component)]
pub struct ScoreDisplay;

#[derive(Component)]
pub struct TimerDisplay;

#[derive(Component)]
pub struct CatfishDisplay;

#[derive(Component)]
pub struct RoundDisplay;

/// Spawns the avatar and the HUD. Guarded in the schedule so it only
/// runs for a fresh session, not when resuming from Paused or extending.
pub fn spawn_game_elements(mut commands: Commands, asset_server: Res<AssetServer>) {
    let avatar_texture = asset_server.load("avatar.png");

    const AVATAR_SPRITE_SIZE: f32 = 128.0;
    let avatar_scale = AVATAR_SIZE.x / AVATAR_SPRITE_SIZE;

    commands.spawn((
        Sprite {
            image: avatar_texture,
            ..default()
        },
        Transform::from_xyz(0.0, AVATAR_Y, 0.0).with_scale(Vec3::splat(avatar_scale)),
        Avatar,
        HudElement,
    ));

    commands.spawn((
        Text2d::new("Score: 0"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Left),
        Transform::from_xyz(-WINDOW_WIDTH / 2.0 + 60.0, WINDOW_HEIGHT / 2.0 - 30.0, 0.0),
        ScoreDisplay,
        HudElement,
    ));

    commands.spawn((
        Text2d::new("Time: 30"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Right),
        Transform::from_xyz(WINDOW_WIDTH / 2.0 - 60.0, WINDOW_HEIGHT / 2.0 - 30.0, 0.0),
        TimerDisplay,
        HudElement,
    ));

    commands.spawn((
        Text2d::new(format!("Catfish: 0/{CATFISH_LIMIT}")),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 18.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Left),
        Transform::from_xyz(-WINDOW_WIDTH / 2.0 + 60.0, WINDOW_HEIGHT / 2.0 - 56.0, 0.0),
        CatfishDisplay,
        HudElement,
    ));

    commands.spawn((
        Text2d::new("Round 1"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 18.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Right),
        Transform::from_xyz(WINDOW_WIDTH / 2.0 - 60.0, WINDOW_HEIGHT / 2.0 - 56.0, 0.0),
        RoundDisplay,
        HudElement,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Percent(46.0),
                width: Val::Px(30.0),
                height: Val::Px(30.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            Button,
            PauseButton,
            HudElement,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("II"),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn update_hud(
    ledger: Res<ScoreLedger>,
    timer: Res<RoundTimer>,
    round_session: Res<RoundSession>,
    artist_session: Res<ArtistSession>,
    mut score_query: Query<
        &mut Text2d,
        (
            With<ScoreDisplay>,
            Without<TimerDisplay>,
            Without<CatfishDisplay>,
            Without<RoundDisplay>,
        ),
    >,
    mut timer_query: Query<
        &mut Text2d,
        (
            With<TimerDisplay>,
            Without<ScoreDisplay>,
            Without<CatfishDisplay>,
            Without<RoundDisplay>,
        ),
    >,
    mut catfish_query: Query<
        &mut Text2d,
        (
            With<CatfishDisplay>,
            Without<ScoreDisplay>,
            Without<TimerDisplay>,
            Without<RoundDisplay>,
        ),
    >,
    mut round_query: Query<
        &mut Text2d,
        (
            With<RoundDisplay>,
            Without<ScoreDisplay>,
            Without<TimerDisplay>,
            Without<CatfishDisplay>,
        ),
    >,
) {
    if let Some(mut text) = score_query.iter_mut().next() {
        let points = ledger.flowers_to_real_artist() * POINTS_PER_FLOWER;
        *text = Text2d::new(format!("{}: {points}", artist_session.real_artist_label()));
    }

    if let Some(mut text) = timer_query.iter_mut().next() {
        *text = Text2d::new(format!("Time: {}", timer.clock.seconds_remaining()));
    }

    if let Some(mut text) = catfish_query.iter_mut().next() {
        *text = Text2d::new(format!(
            "Catfish: {}/{CATFISH_LIMIT}",
            ledger.catfish_caught
        ));
    }

    if let Some(mut text) = round_query.iter_mut().next() {
        *text = Text2d::new(format!("Round {}", round_session.round_number));
    }
}

/// Full teardown when the session ends and control goes back to the
/// shell.
pub fn cleanup_session(
    mut commands: Commands,
    query: Query<
        Entity,
        Or<(
            With<HudElement>,
            With<crate::core::FallingObject>,
            With<bloom_helpers::floating_score::FloatingScore>,
        )>,
    >,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
