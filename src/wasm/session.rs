use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

use super::mindar::{self, Anchor, MindARThree};
use super::render::{self, Passes};
use super::three::{AmbientLight, PointLight};
use super::video::{self, VideoHandle};
use crate::binding::{bind_targets, TargetBinding};
use crate::bootstrap::ArRuntime;
use crate::config::AppConfig;
use crate::effects::EffectPipeline;
use crate::error::{describe_js, Error, Result};
use crate::manifest::Manifest;
use crate::plane::PlaneSpec;

pub struct MindArRuntime {
    document: Document,
}

pub struct Session {
    mindar: MindARThree,
}

impl MindArRuntime {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ArRuntime for MindArRuntime {
    type Session = Session;
    type Running = ();

    async fn start(&self, config: &AppConfig, manifest: &Manifest) -> Result<Session> {
        let container = self
            .document
            .query_selector(&config.container_selector)?
            .ok_or_else(|| Error::ContainerNotFound(config.container_selector.clone()))?;

        let options = Object::new();
        Reflect::set(&options, &"container".into(), &container)?;
        Reflect::set(&options, &"imageTargetSrc".into(), &manifest.mind_file.as_str().into())?;

        let mindar = MindARThree::new(&options).map_err(|e| Error::SessionStart(describe_js(&e)))?;
        JsFuture::from(mindar.start())
            .await
            .map_err(|e| Error::SessionStart(describe_js(&e)))?;
        Ok(Session { mindar })
    }

    fn attach(&self, config: &AppConfig, session: Session, manifest: Manifest) -> Result<()> {
        let mindar = session.mindar;
        let renderer = mindar.renderer();
        let scene = mindar.scene();
        renderer.set_clear_color(config.clear_color, config.clear_alpha);

        scene.add(&AmbientLight::new(config.ambient.color, config.ambient.intensity));
        let point = PointLight::new(config.point.light.color, config.point.light.intensity, config.point.distance);
        let [x, y, z] = config.point.position;
        point.position().set(x, y, z);
        scene.add(&point);

        let pipeline = EffectPipeline::shared(config.pipeline);
        let passes = Passes::build(&renderer, &scene, &mindar.camera(), &pipeline.borrow())?;

        if let Some(targets) = mindar::descriptor_target_count(&mindar) {
            if targets != manifest.media.len() {
                log::warn!("{}", Error::TargetCountMismatch { targets, entries: manifest.media.len() });
            }
        }

        let mut anchors = Vec::with_capacity(manifest.media.len());
        let bindings = bind_targets(&manifest, &pipeline, |index, entry| {
            let anchor = mindar.add_anchor(index.0 as u32);
            let spec = PlaneSpec::new(manifest.video_url(entry), entry.width, entry.height, entry.opacity);
            let plane = video::create_video_plane(&self.document, &spec)?;
            anchor.group().add(&plane.mesh);
            anchors.push(anchor);
            Ok::<_, JsValue>(VideoHandle(plane.video))
        })?;

        for (anchor, binding) in anchors.iter().zip(bindings) {
            install_callbacks(anchor, Rc::new(binding));
        }
        log::info!("bound {} targets", anchors.len());

        render::start(passes, pipeline)?;
        Ok(())
    }
}

fn install_callbacks(anchor: &Anchor, binding: Rc<TargetBinding<VideoHandle>>) {
    let found = {
        let binding = binding.clone();
        Closure::wrap(Box::new(move || binding.on_found()) as Box<dyn FnMut()>)
    };
    let lost = Closure::wrap(Box::new(move || binding.on_lost()) as Box<dyn FnMut()>);

    anchor.set_on_target_found(found.as_ref().unchecked_ref());
    anchor.set_on_target_lost(lost.as_ref().unchecked_ref());
    // Anchors live as long as the page.
    found.forget();
    lost.forget();
}

/// Startup config, with overrides read from the container's `data-*` attributes.
pub fn page_config(document: &Document) -> AppConfig {
    let config = AppConfig::default();
    match document.query_selector(&config.container_selector) {
        Ok(Some(container)) => config.with_overrides(|key| container.get_attribute(&format!("data-{key}"))),
        _ => config,
    }
}
