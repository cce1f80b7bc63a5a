use bevy::prelude::*;
use bloom_helpers::WINDOW_WIDTH;
use bloom_helpers::input::pressed_world_position;

use crate::core::Avatar;
use crate::core::config::AVATAR_SIZE;

/// How the avatar is steered. Chosen once at startup; the two schemes
/// are mutually exclusive.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlScheme {
    #[default]
    Drag,
    Tilt,
}

/// The authoritative avatar position. Input systems write it the moment
/// a sample arrives and collision reads it directly, so catch tests
/// never lag behind the finger. The avatar's `Transform` is only a
/// render mirror of this value.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct AvatarControl {
    pub x: f32,
}

/// Lateral tilt in `[-1, 1]`. Fed by arrow keys natively; the shell can
/// feed device-orientation samples on the web.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltSignal {
    pub lateral: f32,
}

// px per fixed tick at full tilt
const TILT_SPEED: f32 = 4.0;

pub fn clamp_avatar_x(x: f32) -> f32 {
    x.clamp(
        -WINDOW_WIDTH / 2.0 + AVATAR_SIZE.x / 2.0,
        WINDOW_WIDTH / 2.0 - AVATAR_SIZE.x / 2.0,
    )
}

pub fn integrate_tilt(x: f32, lateral: f32) -> f32 {
    clamp_avatar_x(lateral.mul_add(TILT_SPEED, x))
}

/// Drag scheme: follow the pressed pointer/touch position.
pub fn handle_drag_input(
    mut control: ResMut<AvatarControl>,
    windows: Query<&Window>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
) {
    if let Some(world_position) =
        pressed_world_position(&mouse_input, &touch_input, &windows, &camera_query)
    {
        control.x = clamp_avatar_x(world_position.x);
    }
}

/// Tilt scheme, native stand-in: arrow keys produce a full-strength
/// lateral signal.
pub fn read_tilt_keys(keyboard: Res<ButtonInput<KeyCode>>, mut signal: ResMut<TiltSignal>) {
    let mut lateral = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        lateral -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        lateral += 1.0;
    }
    signal.lateral = lateral;
}

/// Tilt scheme: integrate the lateral signal into a velocity, once per
/// fixed tick.
pub fn apply_tilt(mut control: ResMut<AvatarControl>, signal: Res<TiltSignal>) {
    control.x = integrate_tilt(control.x, signal.lateral);
}

/// Mirrors the authoritative position into the avatar's render
/// transform.
pub fn sync_avatar_transform(
    control: Res<AvatarControl>,
    mut avatars: Query<&mut Transform, With<Avatar>>,
) {
    for mut transform in &mut avatars {
        transform.translation.x = control.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT_EDGE: f32 = -WINDOW_WIDTH / 2.0 + AVATAR_SIZE.x / 2.0;
    const RIGHT_EDGE: f32 = WINDOW_WIDTH / 2.0 - AVATAR_SIZE.x / 2.0;

    #[test]
    fn drag_positions_clamp_at_both_edges() {
        assert!((clamp_avatar_x(-10_000.0) - LEFT_EDGE).abs() < f32::EPSILON);
        assert!((clamp_avatar_x(10_000.0) - RIGHT_EDGE).abs() < f32::EPSILON);
        assert!((clamp_avatar_x(12.0) - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tilt_integration_clamps_at_both_edges() {
        let mut x = 0.0;
        for _ in 0..1_000 {
            x = integrate_tilt(x, 1.0);
        }
        assert!((x - RIGHT_EDGE).abs() < f32::EPSILON);

        for _ in 0..2_000 {
            x = integrate_tilt(x, -1.0);
        }
        assert!((x - LEFT_EDGE).abs() < f32::EPSILON);
    }

    #[test]
    fn neutral_tilt_holds_position() {
        assert!((integrate_tilt(42.0, 0.0) - 42.0).abs() < f32::EPSILON);
    }
}
