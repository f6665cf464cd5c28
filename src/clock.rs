//! Elapsed-time source for the animation loop.

use crate::effects::EffectPipeline;

/// Starts on its first reading, so the first frame sees `0.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    start_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the first call, given a millisecond timestamp such as
    /// `performance.now()` or the requestAnimationFrame argument.
    pub fn elapsed(&mut self, now_ms: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(now_ms);
        ((now_ms - start) / 1000.0) as f32
    }

    /// One frame's worth of uniform updates; returns the elapsed seconds.
    pub fn advance(&mut self, now_ms: f64, pipeline: &mut EffectPipeline) -> f32 {
        let t = self.elapsed(now_ms);
        pipeline.set_time(t);
        t
    }
}
