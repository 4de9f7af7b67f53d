// Browser smoke tests, run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use frog_feast::session::roster::{FOODS, FROGS, OPENING_FOOD};
use frog_feast::session::Session;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_begins_on_wasm() {
    let mut session = Session::new(FROGS, FOODS, OPENING_FOOD);
    assert!(session.begin());
    assert!(session.is_running());
    assert_eq!(session.fed_count(), 0);
}
