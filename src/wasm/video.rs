use js_sys::{Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlVideoElement};

use super::three::{Mesh, MeshBasicMaterial, PlaneGeometry, VideoTexture};
use crate::binding::Playback;
use crate::plane::{PlaneSpec, VideoAttributes};

/// A textured plane and the `<video>` feeding its texture.
pub struct VideoPlane {
    pub mesh: Mesh,
    pub video: HtmlVideoElement,
}

/// Playback handle given to a target binding.
pub struct VideoHandle(pub HtmlVideoElement);

impl Playback for VideoHandle {
    fn play(&self) {
        // Rejections (e.g. not enough data yet) surface on the returned promise.
        if let Err(e) = self.0.play() {
            log::warn!("play() threw for {}: {e:?}", self.0.src());
        }
    }

    fn pause(&self) {
        if let Err(e) = self.0.pause() {
            log::warn!("pause() threw for {}: {e:?}", self.0.src());
        }
    }
}

pub fn create_video_element(
    document: &Document,
    url: &str,
    attrs: &VideoAttributes,
) -> Result<HtmlVideoElement, JsValue> {
    let video: HtmlVideoElement = document.create_element("video")?.dyn_into()?;
    video.set_src(url);
    video.set_loop(attrs.looping);
    video.set_muted(attrs.muted);
    Reflect::set(&video, &"playsInline".into(), &JsValue::from_bool(attrs.plays_inline))?;
    video.set_cross_origin(Some(attrs.cross_origin));
    video.load();

    let on_canplay = {
        let video = video.clone();
        Closure::wrap(Box::new(move || {
            let _ = video.play();
        }) as Box<dyn FnMut()>)
    };
    video.add_event_listener_with_callback("canplay", on_canplay.as_ref().unchecked_ref())?;
    on_canplay.forget();

    Ok(video)
}

pub fn create_video_plane(document: &Document, spec: &PlaneSpec) -> Result<VideoPlane, JsValue> {
    let video = create_video_element(document, &spec.url, &VideoAttributes::default())?;
    let texture = VideoTexture::new(&video);
    let geometry = PlaneGeometry::new(spec.size.width, spec.size.height);

    let params = Object::new();
    Reflect::set(&params, &"map".into(), &texture)?;
    Reflect::set(&params, &"transparent".into(), &JsValue::from_bool(spec.transparent))?;
    Reflect::set(&params, &"opacity".into(), &JsValue::from_f64(spec.opacity))?;
    let material = MeshBasicMaterial::new(&params);

    log::debug!(
        "plane {} at {}x{} opacity {}",
        spec.url,
        spec.size.width,
        spec.size.height,
        spec.opacity
    );
    Ok(VideoPlane { mesh: Mesh::new(&geometry, &material), video })
}
