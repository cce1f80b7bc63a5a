#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(
    mut primary_query: bevy::ecs::system::Query<
        &mut bevy::window::Window,
        bevy::ecs::query::With<bevy::window::PrimaryWindow>,
    >,
) {
    // Some mobile GPUs reject surfaces larger than 2048 in either
    // dimension, so the canvas is clamped before wgpu configures it.
    const MAX_SURFACE_DIM: f32 = 2048.0;

    let Some(wasm_window) = web_sys::window() else {
        return;
    };
    let Some(target_width) = wasm_window.inner_width().ok().and_then(|w| w.as_f64()) else {
        return;
    };
    let Some(target_height) = wasm_window.inner_height().ok().and_then(|h| h.as_f64()) else {
        return;
    };
    let target_width = target_width as f32;
    let target_height = target_height as f32;

    for mut window in &mut primary_query {
        if (window.resolution.width() - target_width).abs() > f32::EPSILON
            || (window.resolution.height() - target_height).abs() > f32::EPSILON
        {
            window.resolution.set(
                target_width.min(MAX_SURFACE_DIM),
                target_height.min(MAX_SURFACE_DIM),
            );
        }
    }
}
