// Browser smoke tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_fails_cleanly_without_the_letter_markup() {
    let err = be_my_valentine::start_proposal().expect_err("test page has no envelope");
    let msg = err.as_string().unwrap_or_default();
    assert!(msg.contains("required page element"), "{msg}");
}

#[wasm_bindgen_test]
fn stopping_before_start_is_a_no_op() {
    be_my_valentine::stop_celebration();
}
