//! Be My Valentine core crate.
//!
//! A proposal letter with a Yes button and a No button that runs away. Each
//! escape attempt escalates the taunts (phrases, sounds, visual effects) across
//! four phases until Yes is clicked, which plays the celebration.
//!
//! The escalation engine (`pool`, `content`, `escalation`, `evasion`, `audio`,
//! `success`, `session`) is plain Rust with injected randomness and is tested
//! natively. `page` binds it to the DOM and is only exercised in the browser.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod content;
pub mod error;
pub mod escalation;
pub mod evasion;
mod page;
pub mod pool;
pub mod session;
pub mod success;

pub use config::ProposalConfig;
pub use error::ProposalError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // A second init (e.g. module re-instantiated) keeps the existing logger.
    console_log::init_with_level(level).ok();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Binds the letter on the current document with the default configuration.
#[wasm_bindgen]
pub fn start_proposal() -> Result<(), JsValue> {
    page::start(ProposalConfig::default())?;
    Ok(())
}

/// Like [`start_proposal`], with a JSON object overriding any config fields.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_proposal_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = ProposalConfig::from_json(json)?;
    page::start(cfg)?;
    Ok(())
}

/// Stops the heart rain, the music fade and the typewriter (page teardown).
#[wasm_bindgen]
pub fn stop_celebration() {
    page::stop();
}
