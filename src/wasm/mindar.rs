//! MindAR image tracking (`mindar-image-three`).

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::three::{Camera, Object3D, Scene, WebGLRenderer};

#[wasm_bindgen(module = "mindar-image-three")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type MindARThree;

    /// `options` carries `container` and `imageTargetSrc`.
    #[wasm_bindgen(constructor, catch)]
    pub fn new(options: &Object) -> Result<MindARThree, JsValue>;

    /// Resolves once the camera is live and the descriptor is loaded.
    #[wasm_bindgen(method)]
    pub fn start(this: &MindARThree) -> Promise;

    /// Index must follow the target order of the compiled descriptor.
    #[wasm_bindgen(method, js_name = addAnchor)]
    pub fn add_anchor(this: &MindARThree, index: u32) -> Anchor;

    #[wasm_bindgen(method, getter)]
    pub fn renderer(this: &MindARThree) -> WebGLRenderer;

    #[wasm_bindgen(method, getter)]
    pub fn scene(this: &MindARThree) -> Scene;

    #[wasm_bindgen(method, getter)]
    pub fn camera(this: &MindARThree) -> Camera;

    #[wasm_bindgen(method, getter)]
    pub fn controller(this: &MindARThree) -> JsValue;

    #[derive(Debug, Clone)]
    pub type Anchor;

    #[wasm_bindgen(method, getter)]
    pub fn group(this: &Anchor) -> Object3D;

    #[wasm_bindgen(method, setter = onTargetFound)]
    pub fn set_on_target_found(this: &Anchor, callback: &Function);

    #[wasm_bindgen(method, setter = onTargetLost)]
    pub fn set_on_target_lost(this: &Anchor, callback: &Function);
}

/// Targets in the loaded descriptor, when the controller exposes them.
pub fn descriptor_target_count(mindar: &MindARThree) -> Option<usize> {
    controller_target_count(&mindar.controller())
}

/// The controller keeps one `[width, height]` pair per target in
/// `markerDimensions` once `addImageTargets` has run.
pub fn controller_target_count(controller: &JsValue) -> Option<usize> {
    if controller.is_undefined() || controller.is_null() {
        return None;
    }
    let dims = Reflect::get(controller, &"markerDimensions".into()).ok()?;
    dims.dyn_ref::<Array>().map(|a| a.length() as usize)
}
