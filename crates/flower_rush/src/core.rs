use bevy::prelude::*;
use strum::{EnumCount, FromRepr};

/// Game states that control the flow of the application
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    #[default]
    Welcome,
    Playing,
    Paused,
    RoundOver,
    Terminated,
}

/// Visual kinds a flower can fall as. Rendering choice only, no
/// gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount, FromRepr)]
pub enum FlowerVariant {
    Rose,
    Sunflower,
    Tulip,
    Daisy,
    CherryBlossom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallingKind {
    Flower(FlowerVariant),
    Catfish,
}

impl FallingKind {
    /// Cell index on the Bloom sheet. Flowers occupy the first five
    /// cells in variant order, the catfish sits in the last one.
    pub const fn sheet_index(self) -> usize {
        match self {
            Self::Flower(variant) => variant as usize,
            Self::Catfish => FlowerVariant::COUNT,
        }
    }
}

/// Component for falling flower/catfish entities
#[derive(Component)]
pub struct FallingObject {
    /// Unique sequence number, never reused within a session
    pub id: u64,
    pub kind: FallingKind,
    /// Edge length of the square bounding box
    pub size: f32,
    /// Downward speed in pixels per fixed tick
    pub speed: f32,
}

/// Component for the player's avatar
#[derive(Component)]
pub struct Avatar;

/// Game configuration constants
pub mod config {
    use bevy::prelude::Vec2;
    use bloom_helpers::WINDOW_HEIGHT;

    // Avatar configuration
    pub const AVATAR_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const AVATAR_BOTTOM_OFFSET: f32 = 100.0;
    pub const AVATAR_Y: f32 = -WINDOW_HEIGHT / 2.0 + AVATAR_BOTTOM_OFFSET + AVATAR_SIZE.y / 2.0;

    // Falling object configuration
    pub const OBJECT_SIZE: f32 = 30.0;
    pub const MIN_FALL_SPEED: f32 = 3.0;
    pub const MAX_FALL_SPEED: f32 = 6.0;
    pub const CATFISH_PROBABILITY: f32 = 0.15;
    pub const OFFSCREEN_MARGIN: f32 = 40.0;

    // Catch box tolerances
    pub const SIDE_TOLERANCE: f32 = 10.0;
    pub const TOP_TOLERANCE: f32 = 10.0;
    /// How far below the avatar's top edge an object still counts as
    /// caught. Catches stay forgiving even at high fall speeds.
    pub const CATCH_DEPTH: f32 = AVATAR_SIZE.y + TOP_TOLERANCE;

    // Round configuration
    pub const ROUND_SECONDS: u32 = 30;
    pub const CATFISH_LIMIT: u32 = 3;
    pub const MAX_EXTENSIONS: u32 = 3;

    // Difficulty scaling per extension
    pub const BASE_SPAWN_PROBABILITY: f32 = 0.02;
    pub const SPAWN_PROBABILITY_PER_EXTENSION: f32 = 0.015;

    // Display
    pub const POINTS_PER_FLOWER: u32 = 10;
}

#[cfg(test)]
mod tests {
    use strum::EnumCount;

    use super::{FallingKind, FlowerVariant};

    #[test]
    fn sheet_indices_cover_the_full_sheet() {
        let mut indices: Vec<usize> = (0..FlowerVariant::COUNT)
            .filter_map(FlowerVariant::from_repr)
            .map(|variant| FallingKind::Flower(variant).sheet_index())
            .collect();
        indices.push(FallingKind::Catfish.sheet_index());

        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5], "one cell per kind");
    }
}
