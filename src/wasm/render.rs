use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

use super::three::{self, Camera, EffectComposer, RenderPass, Scene, ShaderPass, WebGLRenderer};
use crate::clock::FrameClock;
use crate::effects::{EffectPipeline, ShaderStage, SharedPipeline};

/// The composer and the shader passes it owns, in render order.
pub struct Passes {
    composer: EffectComposer,
    shader_passes: Vec<(ShaderStage, ShaderPass)>,
}

impl Passes {
    /// Scene render followed by one `ShaderPass` per pipeline stage.
    pub fn build(
        renderer: &WebGLRenderer,
        scene: &Scene,
        camera: &Camera,
        pipeline: &EffectPipeline,
    ) -> Result<Self, JsValue> {
        let composer = EffectComposer::new(renderer);
        composer.add_pass(&RenderPass::new(scene, camera));

        let mut shader_passes = Vec::new();
        for stage in pipeline.stages() {
            let pass = ShaderPass::new(&shader_definition(stage, pipeline)?);
            composer.add_pass(&pass);
            log::debug!("added {} pass", stage.name());
            shader_passes.push((stage, pass));
        }
        Ok(Self { composer, shader_passes })
    }

    /// Copies the current uniform values into every pass.
    pub fn sync(&self, pipeline: &EffectPipeline) -> Result<(), JsValue> {
        for (stage, pass) in &self.shader_passes {
            let uniforms = pass.uniforms();
            for (name, value) in pipeline.uniforms(*stage) {
                let slot = Reflect::get(&uniforms, &name.into())?;
                Reflect::set(&slot, &"value".into(), &JsValue::from_f64(value.into()))?;
            }
        }
        Ok(())
    }
}

fn shader_definition(stage: ShaderStage, pipeline: &EffectPipeline) -> Result<Object, JsValue> {
    let uniforms = Object::new();
    Reflect::set(&uniforms, &"tDiffuse".into(), &three::uniform(&JsValue::NULL)?)?;
    for (name, value) in pipeline.uniforms(stage) {
        Reflect::set(&uniforms, &name.into(), &three::uniform(&JsValue::from_f64(value.into()))?)?;
    }

    let shader = Object::new();
    Reflect::set(&shader, &"uniforms".into(), &uniforms)?;
    Reflect::set(&shader, &"vertexShader".into(), &stage.vertex_source().into())?;
    Reflect::set(&shader, &"fragmentShader".into(), &stage.fragment_source().into())?;
    Ok(shader)
}

/// Start the render loop. It runs until the page goes away.
pub fn start(passes: Passes, pipeline: SharedPipeline) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut clock = FrameClock::new();
    let mut warned = false;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        clock.advance(now, &mut pipeline.borrow_mut());
        if let Err(e) = passes.sync(&pipeline.borrow()) {
            if !warned {
                log::warn!("uniform update failed: {e:?}");
                warned = true;
            }
        }
        passes.composer.render();

        // schedule next
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    let window = window().ok_or("no window")?;
    if let Some(cb) = g.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }

    Ok(())
}
