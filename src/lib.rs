//! Frog Feast core crate.
//!
//! A WASM matching game: each frog on the ring craves exactly one dish, the
//! tray reveals a dish drawn from the hungry frogs' cravings, and the player
//! has sixty seconds to feed everyone. Round rules live in [`session`] and
//! run natively under `cargo test`; the browser wiring (DOM lookups, CSS
//! animation classes, countdown interval, music toggle) lives in the private
//! `dom` module behind the [`session::Stage`] boundary.

use wasm_bindgen::prelude::*;

pub mod session;

mod dom;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire the game to the host page. Call once after the DOM is ready; rounds
/// start from the page's start button.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    dom::mount()
}
