#![allow(
    clippy::allow_attributes,
    reason = "allow attributes are needed for wasm"
)]

use bevy::asset::{AssetMetaCheck, AssetMode, AssetPlugin};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{
    Backends, PowerPreference, RenderCreation, WgpuSettings, WgpuSettingsPriority,
};
use bevy::window::{PresentMode, WindowMode, WindowResolution};

use crate::ShellMessageHandler;
#[cfg(target_arch = "wasm32")]
use crate::ShellPlugin;
#[cfg(target_arch = "wasm32")]
use crate::window_resizing::handle_browser_resize;

#[cfg(not(target_arch = "wasm32"))]
pub const FONT: &str = "../../bloom_helpers/assets/fonts/FiraSans-Bold.ttf";
#[cfg(target_arch = "wasm32")]
pub const FONT: &str = concat!(
    "../../bloom_helpers-",
    env!("CARGO_PKG_VERSION"),
    "/assets/fonts/FiraSans-Bold.ttf"
);

// typical smartphone screen ratio (9:16)
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

// The playfield background of the Bloom app
const PLAYFIELD_CLEAR: Color = Color::Srgba(Srgba {
    red: 0x00 as f32 / 255.0,
    green: 0x11 as f32 / 255.0,
    blue: 0x22 as f32 / 255.0,
    alpha: 1.0,
});

/// Creates a Bevy app with the settings the Bloom shell expects. Every
/// game boots through here so window, asset and render configuration
/// stays in one place.
#[allow(unused_variables, reason = "app_version is only read on wasm")]
#[allow(
    clippy::extra_unused_type_parameters,
    reason = "the handler type is only plugged in on wasm"
)]
pub fn get_default_app<T: ShellMessageHandler>(app_name: &str, app_version: &str) -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(AssetPlugin {
                mode: AssetMode::Unprocessed,
                #[cfg(not(target_arch = "wasm32"))]
                file_path: "assets".to_string(),
                // The shell serves each game's assets under a versioned prefix
                #[cfg(target_arch = "wasm32")]
                file_path: format!("bloom/{app_name}-{app_version}/assets"),
                processed_file_path: "imported_assets/Default".to_string(),
                watch_for_changes_override: None,
                meta_check: AssetMetaCheck::Never,
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: app_name.to_string(),
                    present_mode: PresentMode::Fifo,
                    resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                    canvas: Some("#bloom".into()),
                    fit_canvas_to_parent: true,
                    mode: WindowMode::Windowed,
                    // Leave browser shortcuts like F5 and Ctrl+R alone
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings {
                    backends: Some(Backends::BROWSER_WEBGPU | Backends::GL),
                    power_preference: PowerPreference::HighPerformance,
                    priority: WgpuSettingsPriority::Functionality,
                    ..Default::default()
                }),
                ..Default::default()
            }),
    );

    // This plugin is useful to preserve battery life on mobile.
    // https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(PLAYFIELD_CLEAR));

    #[cfg(target_arch = "wasm32")]
    {
        app.add_plugins(ShellPlugin::<T>::default());
        app.add_systems(PreUpdate, handle_browser_resize);
    }

    app
}
