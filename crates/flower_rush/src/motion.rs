use bevy::color::palettes::css::{GREEN, RED};
use bevy::prelude::*;
use bloom_helpers::WINDOW_HEIGHT;
use bloom_helpers::floating_score::spawn_floating_score;

use crate::core::config::{
    AVATAR_SIZE, AVATAR_Y, CATCH_DEPTH, CATFISH_LIMIT, OFFSCREEN_MARGIN, POINTS_PER_FLOWER,
    SIDE_TOLERANCE, TOP_TOLERANCE,
};
use crate::core::{FallingKind, FallingObject, GameState};
use crate::input::AvatarControl;
use crate::rounds::EndCause;
use crate::scoring::ScoreLedger;

/// Advances every falling object by its own speed. Runs on the fixed
/// 60 Hz schedule, so speed is in px/tick and needs no delta scaling.
pub fn move_objects(mut objects: Query<(&mut Transform, &FallingObject)>) {
    for (mut transform, object) in &mut objects {
        transform.translation.y -= object.speed;
    }
}

/// Axis-aligned catch test between an object and the avatar. Both boxes
/// get a tolerance margin on the sides, and the catch window reaches
/// below the avatar's top edge so fast objects cannot tunnel past.
pub fn is_catch(object_center: Vec2, object_size: f32, avatar_center: Vec2) -> bool {
    let half_object = object_size / 2.0;

    let horizontal = (object_center.x - avatar_center.x).abs()
        <= half_object + AVATAR_SIZE.x / 2.0 + SIDE_TOLERANCE;

    let avatar_top = avatar_center.y + AVATAR_SIZE.y / 2.0;
    let object_bottom = object_center.y - half_object;
    let vertical =
        object_bottom <= avatar_top + TOP_TOLERANCE && object_bottom >= avatar_top - CATCH_DEPTH;

    horizontal && vertical
}

/// Tests every object against the avatar and settles catches into the
/// ledger in the same tick the entity despawns, so an object can never
/// be consumed twice. Collision reads [`AvatarControl`] rather than the
/// avatar's `Transform`: the control value is written synchronously on
/// every input sample while the transform only mirrors it for rendering.
pub fn resolve_catches(
    mut commands: Commands,
    mut ledger: ResMut<ScoreLedger>,
    control: Res<AvatarControl>,
    objects: Query<(Entity, &Transform, &FallingObject)>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // A frame can run several fixed steps before the RoundOver switch
    // applies. Once the limit is reached nothing may touch the ledger.
    if ledger.catfish_caught >= CATFISH_LIMIT {
        return;
    }

    let avatar_center = Vec2::new(control.x, AVATAR_Y);

    for (entity, transform, object) in &objects {
        let position = transform.translation.truncate();
        if !is_catch(position, object.size, avatar_center) {
            continue;
        }

        commands.entity(entity).despawn();

        match object.kind {
            FallingKind::Flower(_) => {
                ledger.on_flower_caught();
                spawn_floating_score(
                    &mut commands,
                    position,
                    &format!("+{POINTS_PER_FLOWER}"),
                    GREEN,
                    &asset_server,
                );
            }
            FallingKind::Catfish => {
                let penalty = ledger.on_catfish_caught();
                let label = if penalty > 0 {
                    format!("-{penalty} stolen!")
                } else {
                    "Catfish!".to_string()
                };
                spawn_floating_score(&mut commands, position, &label, RED, &asset_server);

                if ledger.catfish_caught >= CATFISH_LIMIT {
                    commands.insert_resource(EndCause::CatfishLimit);
                    next_state.set(GameState::RoundOver);
                    // The round is over. Whatever else overlapped this
                    // tick no longer counts.
                    return;
                }
            }
        }
    }
}

/// Silently drops objects once they are fully below the playfield.
pub fn despawn_offscreen(
    mut commands: Commands,
    objects: Query<(Entity, &Transform, &FallingObject)>,
) {
    for (entity, transform, object) in &objects {
        if transform.translation.y < -WINDOW_HEIGHT / 2.0 - object.size - OFFSCREEN_MARGIN {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVATAR: Vec2 = Vec2::new(0.0, AVATAR_Y);
    const SIZE: f32 = 30.0;

    fn avatar_top() -> f32 {
        AVATAR_Y + AVATAR_SIZE.y / 2.0
    }

    #[test]
    fn object_over_the_avatar_is_caught() {
        let object = Vec2::new(0.0, avatar_top() + SIZE / 2.0);
        assert!(is_catch(object, SIZE, AVATAR));
    }

    #[test]
    fn side_tolerance_is_forgiving_but_bounded() {
        let y = avatar_top() + SIZE / 2.0;
        let just_touching = AVATAR_SIZE.x / 2.0 + SIZE / 2.0 + SIDE_TOLERANCE;
        assert!(is_catch(Vec2::new(just_touching - 1.0, y), SIZE, AVATAR));
        assert!(!is_catch(Vec2::new(just_touching + 1.0, y), SIZE, AVATAR));
    }

    #[test]
    fn object_far_above_is_not_caught_yet() {
        let object = Vec2::new(0.0, avatar_top() + TOP_TOLERANCE + SIZE / 2.0 + 1.0);
        assert!(!is_catch(object, SIZE, AVATAR));
    }

    #[test]
    fn catch_window_extends_below_the_avatar_top() {
        // Deep overlap still counts, until the object falls out of the
        // window entirely.
        let inside = Vec2::new(0.0, avatar_top() - CATCH_DEPTH + SIZE / 2.0 + 1.0);
        assert!(is_catch(inside, SIZE, AVATAR));

        let below = Vec2::new(0.0, avatar_top() - CATCH_DEPTH + SIZE / 2.0 - 1.0);
        assert!(!is_catch(below, SIZE, AVATAR));
    }
}
