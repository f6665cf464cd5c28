//! Image-target AR page: a video plane on every tracked target, with
//! chromatic aberration and glow passes driven by `media.json`.
//!
//! Everything outside [`wasm`] is target independent and unit tested on the
//! host; [`wasm`] binds it to MindAR and three.js in the browser.

pub mod binding;
pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod effects;
pub mod error;
pub mod manifest;
pub mod plane;

pub use error::{Error, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    #[cfg(feature = "page")]
    use wasm_bindgen::prelude::*;

    #[cfg(feature = "page")]
    use crate::bootstrap;

    pub mod fetch;
    pub mod mindar;
    pub mod render;
    pub mod session;
    pub mod three;
    pub mod video;

    #[cfg(feature = "page")]
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        // The logger filters on its own level, so open it fully and narrow
        // with the global max once the page config is known.
        console_log::init_with_level(log::Level::Trace).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = session::page_config(&document);
        log::set_max_level(config.log_level.to_level_filter());

        wasm_bindgen_futures::spawn_local(async move {
            let source = fetch::HttpManifestSource::new(window);
            let runtime = session::MindArRuntime::new(document);
            if bootstrap::run(&config, &source, &runtime, bootstrap::log_failure).await.is_some() {
                log::info!("AR experience running");
            }
        });
        Ok(())
    }
}
