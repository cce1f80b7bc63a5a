// This crate is meant to run a single game inside the Bloom shell

use wasm_bindgen::prelude::JsValue;
use web_sys::console;

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    console::log_1(&"Starting Flower Rush".into());
    flower_rush::run();
    Ok(())
}
