use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;
use bevy::utils::default;
use thiserror::Error;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
enum SheetSystemSet {
    Analyze,
    Validate,
}

pub struct SpriteSheetPlugin;

impl Plugin for SpriteSheetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SheetValidation>()
            .configure_sets(
                Update,
                (
                    SheetSystemSet::Analyze,
                    SheetSystemSet::Validate.after(SheetSystemSet::Analyze),
                ),
            )
            .add_systems(Startup, setup_sprite_sheet)
            .add_systems(Update, analyze_sprite_sheet.in_set(SheetSystemSet::Analyze))
            .add_systems(
                Update,
                validate_sprite_sheet.in_set(SheetSystemSet::Validate),
            );
    }
}

// The Bloom sheet is a 3x2 grid: five flower cells and one catfish cell.
const SHEET_SIZE: UVec2 = UVec2::new(384, 256);
const CELL_SIZE: UVec2 = UVec2::new(128, 128);
const SHEET_PATH: &str = "BloomSheet.png";

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet dimensions mismatch - expected {expected:?}, got {actual:?}")]
    DimensionMismatch { expected: UVec2, actual: UVec2 },

    #[error("Sheet cell {0} is fully transparent")]
    EmptyCell(usize),

    #[error("Invalid texture format: {0:?}")]
    InvalidFormat(TextureFormat),
}

#[derive(Resource)]
pub struct SpriteSheet {
    texture: Handle<Image>,
    layout: Handle<TextureAtlasLayout>,
}

#[derive(Component)]
pub struct SheetSprite;

#[derive(Resource, Default)]
pub struct SheetValidation {
    is_analyzed: bool,
    is_loaded: bool,
    cell_count: usize,
}

pub const fn sheet_columns() -> u32 {
    SHEET_SIZE.x / CELL_SIZE.x
}

pub const fn sheet_rows() -> u32 {
    SHEET_SIZE.y / CELL_SIZE.y
}

fn setup_sprite_sheet(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut texture_atlas_layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let texture_handle = asset_server.load(SHEET_PATH);
    let layout =
        TextureAtlasLayout::from_grid(CELL_SIZE, sheet_columns(), sheet_rows(), None, None);
    let layout_handle = texture_atlas_layouts.add(layout);

    commands.insert_resource(SpriteSheet {
        texture: texture_handle,
        layout: layout_handle,
    });
}

fn bytes_per_pixel(format: TextureFormat) -> Result<u32, SheetError> {
    match format {
        TextureFormat::Rgba8UnormSrgb
        | TextureFormat::Rgba8Unorm
        | TextureFormat::Bgra8UnormSrgb => Ok(4),
        format => Err(SheetError::InvalidFormat(format)),
    }
}

fn analyze_sprite_sheet(
    sheet: Res<SpriteSheet>,
    mut validation: ResMut<SheetValidation>,
    images: Res<Assets<Image>>,
) {
    if validation.is_analyzed {
        return;
    }

    let Some(texture) = images.get(&sheet.texture) else {
        return;
    };

    let bytes_per_pixel = match bytes_per_pixel(texture.texture_descriptor.format) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    let is_cell_visible = |image: &Image, cell_x: u32, cell_y: u32| -> bool {
        for y in 0..CELL_SIZE.y {
            for x in 0..CELL_SIZE.x {
                let pixel_x = cell_x * CELL_SIZE.x + x;
                let pixel_y = cell_y * CELL_SIZE.y + y;

                if pixel_x >= image.width() || pixel_y >= image.height() {
                    continue;
                }

                let idx = ((pixel_y * image.width() + pixel_x) * bytes_per_pixel) as usize;
                let pixel: Option<&[u8]> = image.data.get(idx..idx + 4);

                if let Some(&[r, g, b, a]) =
                    pixel.and_then(|window| <&[u8] as TryInto<&[u8; 4]>>::try_into(window).ok())
                {
                    if a > 0 || r > 0 || g > 0 || b > 0 {
                        return true;
                    }
                }
            }
        }
        false
    };

    let mut cell_count = 0;
    for row in 0..sheet_rows() {
        for col in 0..sheet_columns() {
            let index = (row * sheet_columns() + col) as usize;
            if is_cell_visible(texture, col, row) {
                cell_count += 1;
            } else {
                error!("{}", SheetError::EmptyCell(index));
                return;
            }
        }
    }

    validation.cell_count = cell_count;
    validation.is_analyzed = true;
    info!("Sheet analyzed: {cell_count} cells visible");
}

fn validate_sprite_sheet(
    sheet: Res<SpriteSheet>,
    mut validation: ResMut<SheetValidation>,
    images: Res<Assets<Image>>,
) {
    if validation.is_loaded {
        return;
    }

    let Some(texture) = images.get(&sheet.texture) else {
        return;
    };

    if texture.width() != SHEET_SIZE.x || texture.height() != SHEET_SIZE.y {
        error!(
            "{}",
            SheetError::DimensionMismatch {
                expected: SHEET_SIZE,
                actual: UVec2::new(texture.width(), texture.height()),
            }
        );
        return;
    }

    if !validation.is_analyzed {
        return;
    }

    validation.is_loaded = true;
    info!("Sprite sheet validated, {} cells", validation.cell_count);
}

/// Creates a new sheet sprite entity showing the given cell.
pub fn spawn_sheet_sprite(
    commands: &mut Commands,
    sheet: &Res<SpriteSheet>,
    validation: &Res<SheetValidation>,
    index: usize,
    position: Vec2,
    scale: f32,
) -> Option<Entity> {
    if !validation.is_loaded || index >= validation.cell_count {
        return None;
    }

    Some(
        commands
            .spawn((
                Sprite {
                    image: sheet.texture.clone(),
                    texture_atlas: Some(TextureAtlas {
                        layout: sheet.layout.clone(),
                        index,
                    }),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 0.0).with_scale(Vec3::splat(scale)),
                Visibility::Visible,
                SheetSprite,
            ))
            .id(),
    )
}

/// Returns whether the sheet is loaded and every cell checked.
#[must_use]
pub fn is_sheet_ready(validation: &Res<SheetValidation>) -> bool {
    validation.is_loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_grid_holds_six_cells() {
        assert_eq!(
            sheet_columns() * sheet_rows(),
            6,
            "five flowers plus one catfish"
        );
    }
}
