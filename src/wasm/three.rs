//! Bindings for the slice of three.js the page touches: scene objects,
//! lights, the video plane, and the post-processing composer.
//!
//! Bare module specifiers are resolved by the import map in `index.html`.

use js_sys::Object;
use wasm_bindgen::prelude::*;
use web_sys::HtmlVideoElement;

#[wasm_bindgen(module = "three")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Object3D;

    #[wasm_bindgen(method)]
    pub fn add(this: &Object3D, child: &Object3D);

    #[wasm_bindgen(method, getter)]
    pub fn position(this: &Object3D) -> Vector3;

    #[derive(Debug, Clone)]
    pub type Vector3;

    #[wasm_bindgen(method)]
    pub fn set(this: &Vector3, x: f64, y: f64, z: f64);

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type Scene;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type Camera;

    #[derive(Debug, Clone)]
    pub type WebGLRenderer;

    #[wasm_bindgen(method, js_name = setClearColor)]
    pub fn set_clear_color(this: &WebGLRenderer, color: u32, alpha: f64);
}

#[wasm_bindgen(module = "three")]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type AmbientLight;

    #[wasm_bindgen(constructor)]
    pub fn new(color: u32, intensity: f64) -> AmbientLight;
}

#[wasm_bindgen(module = "three")]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type PointLight;

    #[wasm_bindgen(constructor)]
    pub fn new(color: u32, intensity: f64, distance: f64) -> PointLight;
}

#[wasm_bindgen(module = "three")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type VideoTexture;

    #[wasm_bindgen(constructor)]
    pub fn new(video: &HtmlVideoElement) -> VideoTexture;
}

#[wasm_bindgen(module = "three")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type PlaneGeometry;

    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> PlaneGeometry;
}

#[wasm_bindgen(module = "three")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type MeshBasicMaterial;

    #[wasm_bindgen(constructor)]
    pub fn new(parameters: &Object) -> MeshBasicMaterial;
}

#[wasm_bindgen(module = "three")]
extern "C" {
    #[wasm_bindgen(extends = Object3D)]
    #[derive(Debug, Clone)]
    pub type Mesh;

    #[wasm_bindgen(constructor)]
    pub fn new(geometry: &PlaneGeometry, material: &MeshBasicMaterial) -> Mesh;
}

#[wasm_bindgen(module = "three/addons/postprocessing/EffectComposer.js")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type EffectComposer;

    #[wasm_bindgen(constructor)]
    pub fn new(renderer: &WebGLRenderer) -> EffectComposer;

    #[wasm_bindgen(method, js_name = addPass)]
    pub fn add_pass(this: &EffectComposer, pass: &JsValue);

    #[wasm_bindgen(method)]
    pub fn render(this: &EffectComposer);
}

#[wasm_bindgen(module = "three/addons/postprocessing/RenderPass.js")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type RenderPass;

    #[wasm_bindgen(constructor)]
    pub fn new(scene: &Scene, camera: &Camera) -> RenderPass;
}

#[wasm_bindgen(module = "three/addons/postprocessing/ShaderPass.js")]
extern "C" {
    #[derive(Debug, Clone)]
    pub type ShaderPass;

    /// `shader` is `{ uniforms, vertexShader, fragmentShader }`; the pass
    /// clones the uniforms, so later writes must go through `uniforms()`.
    #[wasm_bindgen(constructor)]
    pub fn new(shader: &Object) -> ShaderPass;

    #[wasm_bindgen(method, getter)]
    pub fn uniforms(this: &ShaderPass) -> Object;
}

/// `{ value }` wrapper three.js expects for each uniform.
pub fn uniform(value: &JsValue) -> Result<Object, JsValue> {
    let slot = Object::new();
    js_sys::Reflect::set(&slot, &"value".into(), value)?;
    Ok(slot)
}
