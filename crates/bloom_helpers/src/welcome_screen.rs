use bevy::prelude::*;

use crate::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Component)]
pub struct WelcomeScreenElement;

/// Spawns the standard welcome layout: dark backdrop, a title, a short
/// subtitle and the tap prompt. Screens add their own decorations on top,
/// tagged with [`WelcomeScreenElement`] so teardown catches them too.
pub fn spawn_welcome_screen(
    commands: &mut Commands,
    asset_server: &Res<AssetServer>,
    title: &str,
    subtitle: &str,
) {
    // Background
    commands.spawn((
        Sprite::from_color(Color::BLACK, Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
        WelcomeScreenElement,
    ));

    commands.spawn((
        Text::new(title),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(20.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WelcomeScreenElement,
    ));

    commands.spawn((
        Text::new(subtitle),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(32.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WelcomeScreenElement,
    ));

    commands.spawn((
        Text::new("Tap to start"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 30.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Percent(25.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WelcomeScreenElement,
    ));
}

pub fn despawn_welcome_screen(
    mut commands: Commands,
    welcome_elements: Query<Entity, With<WelcomeScreenElement>>,
) {
    for entity in welcome_elements.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
