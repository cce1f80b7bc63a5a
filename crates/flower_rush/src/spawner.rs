use bevy::prelude::*;
use bloom_helpers::sprites::{SheetValidation, SpriteSheet, spawn_sheet_sprite};
use bloom_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};
use strum::EnumCount;

use crate::core::config::{
    BASE_SPAWN_PROBABILITY, CATFISH_PROBABILITY, MAX_FALL_SPEED, MIN_FALL_SPEED, OBJECT_SIZE,
    SPAWN_PROBABILITY_PER_EXTENSION,
};
use crate::core::{FallingKind, FallingObject, FlowerVariant};
use crate::rounds::RoundSession;

/// Immutable description of a new falling object, produced here and
/// turned into an entity by [`spawn_falling_objects`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDescriptor {
    pub id: u64,
    pub kind: FallingKind,
    /// Left edge, in playfield coordinates (0 at the left border)
    pub x: f32,
    pub size: f32,
    pub speed: f32,
}

/// Allocates unique object ids for the session.
#[derive(Resource, Default)]
pub struct ObjectSequence(pub u64);

/// Per-tick chance of a new object appearing. Escalates with every
/// extension, independent of the speed scaling.
pub fn spawn_probability(extensions_used: u32) -> f32 {
    SPAWN_PROBABILITY_PER_EXTENSION.mul_add(extensions_used as f32, BASE_SPAWN_PROBABILITY)
}

/// Downward speed in px/tick: the random base plus a steep per-extension
/// ramp. Rounds 1-3 average roughly 4.5, 9.5 and 16.5 px/tick.
pub fn fall_speed(base: f32, extensions_used: u32) -> f32 {
    let e = extensions_used as f32;
    2.0f32.mul_add(e * e, 5.0f32.mul_add(e, base))
}

/// Left edge for a fresh spawn, uniform over the positions where the
/// whole object fits on screen.
pub fn spawn_x(roll: f32, playfield_width: f32, size: f32) -> f32 {
    roll * (playfield_width - size)
}

fn pick_kind() -> FallingKind {
    if fastrand::f32() < CATFISH_PROBABILITY {
        FallingKind::Catfish
    } else {
        let variant = FlowerVariant::from_repr(fastrand::usize(..FlowerVariant::COUNT))
            .unwrap_or(FlowerVariant::Rose);
        FallingKind::Flower(variant)
    }
}

pub fn create_object(sequence: &mut ObjectSequence, extensions_used: u32) -> ObjectDescriptor {
    let id = sequence.0;
    sequence.0 += 1;

    let base = fastrand::f32().mul_add(MAX_FALL_SPEED - MIN_FALL_SPEED, MIN_FALL_SPEED);

    ObjectDescriptor {
        id,
        kind: pick_kind(),
        x: spawn_x(fastrand::f32(), WINDOW_WIDTH, OBJECT_SIZE),
        size: OBJECT_SIZE,
        speed: fall_speed(base, extensions_used),
    }
}

// Sheet cells are authored at 128px
const SHEET_CELL_SIZE: f32 = 128.0;

/// Rolls the per-tick spawn chance and materializes one descriptor as a
/// sheet-sprite entity just above the visible playfield.
pub fn spawn_falling_objects(
    mut commands: Commands,
    sheet: Res<SpriteSheet>,
    validation: Res<SheetValidation>,
    mut sequence: ResMut<ObjectSequence>,
    session: Res<RoundSession>,
) {
    if fastrand::f32() >= spawn_probability(session.extensions_used) {
        return;
    }

    let descriptor = create_object(&mut sequence, session.extensions_used);

    // Playfield coordinates are top-left based, the world is centered.
    let position = Vec2::new(
        descriptor.x + descriptor.size / 2.0 - WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 + descriptor.size / 2.0,
    );

    if let Some(entity) = spawn_sheet_sprite(
        &mut commands,
        &sheet,
        &validation,
        descriptor.kind.sheet_index(),
        position,
        descriptor.size / SHEET_CELL_SIZE,
    ) {
        commands.entity(entity).insert(FallingObject {
            id: descriptor.id,
            kind: descriptor.kind,
            size: descriptor.size,
            speed: descriptor.speed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_x_stays_inside_the_playfield() {
        for roll in [0.0, 0.25, 0.999] {
            let x = spawn_x(roll, WINDOW_WIDTH, OBJECT_SIZE);
            assert!(x >= 0.0);
            assert!(x <= WINDOW_WIDTH - OBJECT_SIZE, "roll {roll} overflowed");
        }
    }

    #[test]
    fn fall_speed_ramps_per_extension() {
        assert!((fall_speed(4.5, 0) - 4.5).abs() < f32::EPSILON);
        assert!((fall_speed(4.5, 1) - 11.5).abs() < f32::EPSILON);
        assert!((fall_speed(4.5, 2) - 22.5).abs() < f32::EPSILON);
    }

    #[test]
    fn difficulty_scales_monotonically() {
        for e in 0..3 {
            assert!(spawn_probability(e + 1) > spawn_probability(e));
            assert!(fall_speed(MIN_FALL_SPEED, e + 1) > fall_speed(MIN_FALL_SPEED, e));
        }
    }

    #[test]
    fn descriptors_get_unique_increasing_ids() {
        let mut sequence = ObjectSequence::default();
        let first = create_object(&mut sequence, 0);
        let second = create_object(&mut sequence, 0);
        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn fresh_objects_use_the_base_speed_range() {
        let mut sequence = ObjectSequence::default();
        for _ in 0..50 {
            let descriptor = create_object(&mut sequence, 0);
            assert!(descriptor.speed >= MIN_FALL_SPEED);
            assert!(descriptor.speed < MAX_FALL_SPEED);
        }
    }
}
