use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::bootstrap::ManifestSource;
use crate::error::{describe_js, Error, Result};

/// Fetches the manifest relative to the page URL.
pub struct HttpManifestSource {
    window: Window,
}

impl HttpManifestSource {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ManifestSource for HttpManifestSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let fail = |e: JsValue| Error::ManifestFetch { path: path.to_string(), reason: describe_js(&e) };

        let response: Response = JsFuture::from(self.window.fetch_with_str(path))
            .await
            .map_err(fail)?
            .dyn_into()
            .map_err(fail)?;
        if !response.ok() {
            return Err(Error::ManifestStatus { path: path.to_string(), status: response.status() });
        }

        let body = JsFuture::from(response.text().map_err(fail)?).await.map_err(fail)?;
        body.as_string().ok_or_else(|| Error::ManifestFetch {
            path: path.to_string(),
            reason: "response body is not text".into(),
        })
    }
}
