//! Ties each tracked target's visibility events to its video and the shared
//! effect pipeline.

use crate::effects::{EffectSettings, SharedPipeline};
use crate::manifest::{Manifest, MediaEntry, TargetIndex};

/// Playback control of a target's video.
pub trait Playback {
    fn play(&self);
    fn pause(&self);
}

pub struct TargetBinding<P> {
    index: TargetIndex,
    effects: EffectSettings,
    video: P,
    pipeline: SharedPipeline,
}

impl<P: Playback> TargetBinding<P> {
    pub fn new(index: TargetIndex, entry: &MediaEntry, video: P, pipeline: SharedPipeline) -> Self {
        Self { index, effects: entry.effects(), video, pipeline }
    }

    pub fn index(&self) -> TargetIndex {
        self.index
    }

    pub fn effects(&self) -> EffectSettings {
        self.effects
    }

    pub fn video(&self) -> &P {
        &self.video
    }

    pub fn on_found(&self) {
        log::debug!("target {} found", self.index.0);
        self.video.play();
        self.pipeline.borrow_mut().target_found(self.index, self.effects);
    }

    pub fn on_lost(&self) {
        log::debug!("target {} lost", self.index.0);
        self.video.pause();
        self.pipeline.borrow_mut().target_lost(self.index);
    }
}

/// Creates one binding per manifest entry, in descriptor order. `make_video`
/// is called once per entry and is where the caller builds and attaches the
/// plane; the first error stops the loop.
pub fn bind_targets<P, E, F>(
    manifest: &Manifest,
    pipeline: &SharedPipeline,
    mut make_video: F,
) -> Result<Vec<TargetBinding<P>>, E>
where
    P: Playback,
    F: FnMut(TargetIndex, &MediaEntry) -> Result<P, E>,
{
    manifest
        .targets()
        .map(|(index, entry)| {
            let video = make_video(index, entry)?;
            Ok(TargetBinding::new(index, entry, video, pipeline.clone()))
        })
        .collect()
}
