//! Court Glide: scroll-driven page enhancements compiled to WASM.
//!
//! The page calls `enhance_page()` (or `enhance_page_with_config(json)`) once
//! after loading the module. From then on a single page session reacts to
//! scroll and click signals: it highlights the nav link of the current section,
//! flips the navbar into its scrolled style, reveals cards, loads deferred
//! images, tracks scroll progress and ramps the stat counters once.
//!
//! All element access goes through the [`page::Page`] trait; [`dom::DomPage`]
//! backs it with `web-sys` and [`memory::MemoryPage`] with plain data, so every
//! component runs natively under `cargo test`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod counter;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod logging;
pub mod memory;
pub mod nav;
pub mod page;
pub mod progress;
pub mod reveal;
pub mod session;
mod wiring;

pub use config::EnhanceConfig;
pub use error::EnhanceError;
pub use page::{Page, Rect};
pub use session::PageSession;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Enhances the current page with the stock configuration.
#[wasm_bindgen]
pub fn enhance_page() -> Result<(), JsValue> {
    start(EnhanceConfig::default()).map_err(Into::into)
}

/// Enhances the current page; `json` overrides any subset of the defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn enhance_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = EnhanceConfig::from_json(json)?;
    start(config).map_err(Into::into)
}

pub fn start(config: EnhanceConfig) -> Result<(), EnhanceError> {
    config.validate()?;
    logging::init(config.level_filter());
    wiring::install(config)
}
