//! AI data-center field guide
//!
//! Interactive widgets for reading about large training clusters:
//! - Background particle mesh
//! - Cluster catalog with search, filter and sort
//! - Training compute calculator, power timeline
//! - Topology explorer, network visibility map, concept checks
//!
//! The `core` module is platform-agnostic and shared with the CLI. The egui
//! app is built with the `wasm` feature and mounts onto a page canvas.

pub mod core;

#[cfg(feature = "wasm")]
mod app;
#[cfg(feature = "wasm")]
mod theme;

#[cfg(feature = "wasm")]
pub use app::GuideApp;

/// Why the app could not attach to the page
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    NoCanvas(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("failed to start eframe: {0}")]
    Start(String),
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use tracing::{info, warn};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::GuideApp;
    use crate::core::GuideConfig;
    use crate::MountError;

    /// Page-provided config from `window.__guide_config`, object or JSON string
    fn page_config() -> GuideConfig {
        let value = match js_sys::eval("window.__guide_config") {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => return GuideConfig::default(),
        };
        let json = value.as_string().or_else(|| {
            js_sys::JSON::stringify(&value)
                .ok()
                .map(String::from)
        });
        match json {
            Some(json) => GuideConfig::from_json_or_default(&json),
            None => {
                warn!("Unreadable window.__guide_config, using defaults");
                GuideConfig::default()
            }
        }
    }

    fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement, MountError> {
        web_sys::window()
            .ok_or(MountError::NoWindow)?
            .document()
            .ok_or(MountError::NoDocument)?
            .get_element_by_id(id)
            .ok_or_else(|| MountError::NoCanvas(id.to_string()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| MountError::NotACanvas(id.to_string()))
    }

    async fn mount(config: GuideConfig) -> Result<(), MountError> {
        let canvas = find_canvas(&config.canvas_id)?;
        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(GuideApp::new(cc, config)))),
            )
            .await
            .map_err(|e| MountError::Start(format!("{:?}", e)))
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        // Browser console logging
        tracing_wasm::set_as_global_default();

        let config = page_config();
        wasm_bindgen_futures::spawn_local(async move {
            match mount(config).await {
                Ok(()) => info!("Field guide mounted"),
                // No surface on this page: skip the app
                Err(e) => warn!(error = %e, "Field guide not mounted"),
            }
        });
    }
}
