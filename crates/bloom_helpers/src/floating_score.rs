use core::time::Duration;

use bevy::prelude::*;

use crate::FONT;

const LIFETIME: Duration = Duration::from_secs(1);
const DRIFT: f32 = 50.0;

/// A short-lived score popup anchored where the catch happened.
#[derive(Component)]
pub struct FloatingScore {
    lifetime: Timer,
    anchor: Vec2,
}

/// Spawns a "+10" style popup in world space at the catch position. It
/// drifts upward and shrinks away over one second.
pub fn spawn_floating_score(
    commands: &mut Commands,
    position: Vec2,
    text: &str,
    color: Srgba,
    asset_server: &Res<AssetServer>,
) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::Srgba(color)),
        Transform::from_xyz(position.x, position.y, 5.0),
        FloatingScore {
            lifetime: Timer::new(LIFETIME, TimerMode::Once),
            anchor: position,
        },
    ));
}

pub fn animate_floating_scores(
    mut commands: Commands,
    time: Res<Time>,
    mut popups: Query<(Entity, &mut Transform, &mut FloatingScore)>,
) {
    for (entity, mut transform, mut popup) in &mut popups {
        if popup.lifetime.tick(time.delta()).finished() {
            commands.entity(entity).despawn();
            continue;
        }

        let progress = popup.lifetime.fraction();
        transform.translation.y = DRIFT.mul_add(progress, popup.anchor.y);
        transform.scale = Vec3::splat(1.0 - progress);
    }
}
