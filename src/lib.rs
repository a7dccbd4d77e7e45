#![recursion_limit = "1024"]

mod app;
pub mod config;
pub mod error;
pub mod gemini;
pub mod preview;
pub mod split;
pub mod state;
pub mod upload;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    yew::start_app::<app::Model>();
}
