//! Startup sequencing with in-memory manifest sources and a fake tracker.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;

use arfx_wasm::binding::{bind_targets, Playback};
use arfx_wasm::bootstrap::{load_manifest, run, ArRuntime, ManifestSource};
use arfx_wasm::clock::FrameClock;
use arfx_wasm::config::AppConfig;
use arfx_wasm::effects::EffectPipeline;
use arfx_wasm::manifest::Manifest;
use arfx_wasm::{Error, Result};
use futures::executor::block_on;

struct StaticSource(&'static str);

impl ManifestSource for StaticSource {
    async fn fetch_text(&self, _path: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct OfflineSource {
    requested: RefCell<Vec<String>>,
}

impl ManifestSource for OfflineSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.requested.borrow_mut().push(path.to_string());
        Err(Error::ManifestFetch { path: path.to_string(), reason: "network down".into() })
    }
}

struct NoVideo;

impl Playback for NoVideo {
    fn play(&self) {}
    fn pause(&self) {}
}

/// Counts planes and renders a few frames instead of looping forever.
#[derive(Default)]
struct FakeTracker {
    starts: Cell<u32>,
    refuse_camera: bool,
}

struct Running {
    planes: usize,
    frames: u32,
    last_time: f32,
}

impl ArRuntime for FakeTracker {
    type Session = ();
    type Running = Running;

    async fn start(&self, _config: &AppConfig, _manifest: &Manifest) -> Result<()> {
        self.starts.set(self.starts.get() + 1);
        if self.refuse_camera {
            return Err(Error::SessionStart("NotAllowedError: Permission denied".into()));
        }
        Ok(())
    }

    fn attach(&self, config: &AppConfig, _session: (), manifest: Manifest) -> Result<Running> {
        let pipeline = EffectPipeline::shared(config.pipeline);
        let bindings = bind_targets(&manifest, &pipeline, |_, _| Ok::<_, Infallible>(NoVideo)).unwrap();

        let mut clock = FrameClock::new();
        let mut last_time = 0.0;
        for frame in 0..3 {
            last_time = clock.advance(1000.0 + 16.0 * frame as f64, &mut pipeline.borrow_mut());
        }
        Ok(Running { planes: bindings.len(), frames: 3, last_time })
    }
}

#[test]
fn empty_media_still_starts_and_renders() {
    let source = StaticSource(r#"{ "mindFile": "t.mind", "videoRoot": "", "media": [] }"#);
    let tracker = FakeTracker::default();
    let running = block_on(run(&AppConfig::default(), &source, &tracker, |e| panic!("unexpected: {e}"))).unwrap();

    assert_eq!(tracker.starts.get(), 1);
    assert_eq!(running.planes, 0);
    assert_eq!(running.frames, 3);
    assert!((running.last_time - 0.032).abs() < 1e-6);
}

#[test]
fn fetch_failure_reaches_handler_once_and_skips_session() {
    let source = OfflineSource { requested: RefCell::new(Vec::new()) };
    let tracker = FakeTracker::default();
    let errors = RefCell::new(Vec::new());

    let running = block_on(run(&AppConfig::default(), &source, &tracker, |e| errors.borrow_mut().push(e)));

    assert!(running.is_none());
    assert_eq!(tracker.starts.get(), 0);
    assert_eq!(*source.requested.borrow(), vec!["media.json".to_string()]);
    let errors = errors.into_inner();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::ManifestFetch { .. }));
}

#[test]
fn malformed_manifest_is_terminal() {
    let source = StaticSource("{ not json");
    let tracker = FakeTracker::default();
    let calls = Cell::new(0);

    let running = block_on(run(&AppConfig::default(), &source, &tracker, |e| {
        assert!(matches!(e, Error::ManifestParse(_)));
        calls.set(calls.get() + 1);
    }));

    assert!(running.is_none());
    assert_eq!(calls.get(), 1);
    assert_eq!(tracker.starts.get(), 0);
}

#[test]
fn session_failure_is_terminal() {
    let source = StaticSource(r#"{ "mindFile": "t.mind", "videoRoot": "", "media": [] }"#);
    let tracker = FakeTracker { refuse_camera: true, ..Default::default() };
    let calls = Cell::new(0);

    let running = block_on(run(&AppConfig::default(), &source, &tracker, |e| {
        assert!(matches!(e, Error::SessionStart(_)));
        calls.set(calls.get() + 1);
    }));

    assert!(running.is_none());
    assert_eq!(calls.get(), 1);
    assert_eq!(tracker.starts.get(), 1);
}

#[test]
fn configured_manifest_path_is_used() {
    let source = OfflineSource { requested: RefCell::new(Vec::new()) };
    let config = AppConfig { manifest_path: "demo/media.json".into(), ..Default::default() };
    let _ = block_on(load_manifest(&source, &config.manifest_path));
    assert_eq!(*source.requested.borrow(), vec!["demo/media.json".to_string()]);
}

#[test]
fn bundled_manifest_parses() {
    let manifest = Manifest::from_json(include_str!("../static/media.json")).unwrap();
    assert!(!manifest.media.is_empty());
    assert!(manifest.mind_file.ends_with(".mind"));
}

#[test]
fn entry_missing_fields_does_not_block_other_targets() {
    let source = StaticSource(
        r#"{ "mindFile": "t.mind", "videoRoot": "", "media": [
            { "video": "a.mp4", "width": 1280, "height": 720, "opacity": 0.8 },
            { "video": "b.mp4", "width": 640 } ] }"#,
    );
    let tracker = FakeTracker::default();
    let running = block_on(run(&AppConfig::default(), &source, &tracker, |e| panic!("unexpected: {e}"))).unwrap();

    assert_eq!(tracker.starts.get(), 1);
    assert_eq!(running.planes, 2);
}
