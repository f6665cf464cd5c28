//! Found/lost callbacks against the shared effect pipeline.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use arfx_wasm::binding::{bind_targets, Playback, TargetBinding};
use arfx_wasm::effects::{EffectPipeline, IntensityPolicy, PipelineConfig, SharedPipeline};
use arfx_wasm::manifest::Manifest;

#[derive(Clone, Default)]
struct FakeVideo {
    playing: Rc<Cell<bool>>,
}

impl Playback for FakeVideo {
    fn play(&self) {
        self.playing.set(true);
    }
    fn pause(&self) {
        self.playing.set(false);
    }
}

const MANIFEST: &str = r#"{
    "mindFile": "./targets.mind",
    "videoRoot": "./videos/",
    "media": [
        { "video": "one.mp4", "width": 1280, "height": 720, "opacity": 0.8,
          "rgbShiftIntensity": 0.015, "glowIntensity": 1.4 },
        { "video": "two.mp4", "width": 1280, "height": 720, "opacity": 1,
          "rgbShiftIntensity": 0.04, "glowIntensity": 0.7, "glitchAmount": 0.3 },
        { "video": "three.mp4", "width": 640, "height": 480, "opacity": 1 }
    ]
}"#;

fn setup(config: PipelineConfig) -> (SharedPipeline, Vec<TargetBinding<FakeVideo>>) {
    let manifest = Manifest::from_json(MANIFEST).unwrap();
    let pipeline = EffectPipeline::shared(config);
    let bindings = bind_targets(&manifest, &pipeline, |_, _| Ok::<_, Infallible>(FakeVideo::default())).unwrap();
    (pipeline, bindings)
}

fn intensities(pipeline: &SharedPipeline) -> (f32, f32) {
    let p = pipeline.borrow();
    (p.chromatic().amount, p.glow().glow_intensity)
}

#[test]
fn bindings_follow_manifest_order() {
    let (_, bindings) = setup(PipelineConfig::default());
    let indices: Vec<usize> = bindings.iter().map(|b| b.index().0).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(bindings[1].effects().glitch, 0.3);
    assert_eq!(bindings[2].effects().rgb_shift, 0.0);
}

#[test]
fn found_sets_entry_values_regardless_of_prior_state() {
    let (pipeline, bindings) = setup(PipelineConfig::default());

    bindings[1].on_found();
    bindings[0].on_found();
    assert_eq!(intensities(&pipeline), (0.015, 1.4));

    bindings[1].on_found();
    assert_eq!(intensities(&pipeline), (0.04, 0.7));

    bindings[2].on_found();
    assert_eq!(intensities(&pipeline), (0.0, 0.0));
}

#[test]
fn lost_zeroes_regardless_of_prior_state() {
    let (pipeline, bindings) = setup(PipelineConfig::default());

    bindings[0].on_found();
    bindings[1].on_lost();
    assert_eq!(intensities(&pipeline), (0.0, 0.0));
    assert!(bindings[0].video().playing.get());
    assert!(!bindings[1].video().playing.get());
}

#[test]
fn found_twice_equals_found_once() {
    let (pipeline, bindings) = setup(PipelineConfig::default());

    bindings[1].on_found();
    let once = (intensities(&pipeline), pipeline.borrow().chromatic().time);
    bindings[1].on_found();
    let twice = (intensities(&pipeline), pipeline.borrow().chromatic().time);

    assert_eq!(once, twice);
    assert!(bindings[1].video().playing.get());
}

#[test]
fn glitch_uniforms_untouched_by_events() {
    let (pipeline, bindings) = setup(PipelineConfig::default());
    bindings[1].on_found();
    bindings[1].on_lost();
    let p = pipeline.borrow();
    assert_eq!(p.chromatic().glitch_amount, 0.0);
    assert_eq!(p.glow().glitch_amount, 0.0);
}

#[test]
fn strongest_policy_keeps_visible_targets() {
    let (pipeline, bindings) = setup(PipelineConfig {
        policy: IntensityPolicy::Strongest,
        ..Default::default()
    });

    bindings[0].on_found();
    bindings[1].on_found();
    bindings[2].on_found();
    assert_eq!(intensities(&pipeline), (0.04, 1.4));

    bindings[1].on_lost();
    assert_eq!(intensities(&pipeline), (0.015, 1.4));
}

#[test]
fn video_factory_error_stops_binding() {
    let manifest = Manifest::from_json(MANIFEST).unwrap();
    let pipeline = EffectPipeline::shared(PipelineConfig::default());
    let mut calls = 0;
    let result = bind_targets(&manifest, &pipeline, |index, _| {
        calls += 1;
        if index.0 == 1 {
            Err("no video")
        } else {
            Ok(FakeVideo::default())
        }
    });
    assert_eq!(result.err(), Some("no video"));
    assert_eq!(calls, 2);
}
