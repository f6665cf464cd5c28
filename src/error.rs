//! Error type shared by the loader, the session bootstrap and the wasm glue.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch manifest {path}: {reason}")]
    ManifestFetch { path: String, reason: String },

    #[error("manifest {path} returned HTTP {status}")]
    ManifestStatus { path: String, status: u16 },

    #[error("malformed manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("container element {0} not found")]
    ContainerNotFound(String),

    #[error("failed to start AR session: {0}")]
    SessionStart(String),

    #[error("descriptor defines {targets} targets but manifest lists {entries} media entries")]
    TargetCountMismatch { targets: usize, entries: usize },

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Js(describe_js(&value))
    }
}

/// Best-effort human readable text for a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
