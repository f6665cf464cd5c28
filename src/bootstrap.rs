//! Startup sequence: manifest, then AR session, then scene wiring.
//!
//! Both awaits are terminal on failure. Nothing after a failed step runs and
//! the error is handed to the caller's handler exactly once.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::manifest::Manifest;

/// Where the manifest text comes from (HTTP in the browser).
#[allow(async_fn_in_trait)]
pub trait ManifestSource {
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// The tracking engine plus everything hung off it once it is running.
#[allow(async_fn_in_trait)]
pub trait ArRuntime {
    type Session;
    type Running;

    /// Acquires the camera and starts tracking `manifest.mind_file`.
    async fn start(&self, config: &AppConfig, manifest: &Manifest) -> Result<Self::Session>;

    /// Builds planes, passes and bindings and starts the frame loop.
    fn attach(&self, config: &AppConfig, session: Self::Session, manifest: Manifest) -> Result<Self::Running>;
}

pub async fn load_manifest<S: ManifestSource>(source: &S, path: &str) -> Result<Manifest> {
    let text = source.fetch_text(path).await?;
    let manifest = Manifest::from_json(&text)?;
    log::info!("loaded {path}: {} media entries", manifest.media.len());
    Ok(manifest)
}

pub async fn launch<S, R>(config: &AppConfig, source: &S, runtime: &R) -> Result<R::Running>
where
    S: ManifestSource,
    R: ArRuntime,
{
    let manifest = load_manifest(source, &config.manifest_path).await?;
    let session = runtime.start(config, &manifest).await?;
    log::info!("AR session started with {}", manifest.mind_file);
    runtime.attach(config, session, manifest)
}

/// Runs [`launch`], routing any failure to `on_error`.
pub async fn run<S, R>(
    config: &AppConfig,
    source: &S,
    runtime: &R,
    on_error: impl FnOnce(Error),
) -> Option<R::Running>
where
    S: ManifestSource,
    R: ArRuntime,
{
    match launch(config, source, runtime).await {
        Ok(running) => Some(running),
        Err(err) => {
            on_error(err);
            None
        }
    }
}

/// Default handler: report to the console and leave the page inert.
pub fn log_failure(err: Error) {
    log::error!("{err}");
}
