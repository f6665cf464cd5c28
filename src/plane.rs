//! Geometry and media-element settings for a video plane.

/// Plane width in scene units; height follows the video's aspect ratio.
pub const PLANE_WIDTH: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSize {
    pub width: f64,
    pub height: f64,
}

impl PlaneSize {
    /// Unit-width plane with the aspect ratio of a `width`×`height` video.
    pub fn for_video(width: f64, height: f64) -> Self {
        let aspect = width / height;
        Self { width: PLANE_WIDTH, height: PLANE_WIDTH / aspect }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSpec {
    pub url: String,
    pub size: PlaneSize,
    pub opacity: f64,
    pub transparent: bool,
}

impl PlaneSpec {
    pub fn new(url: impl Into<String>, width: f64, height: f64, opacity: f64) -> Self {
        Self {
            url: url.into(),
            size: PlaneSize::for_video(width, height),
            opacity,
            transparent: true,
        }
    }
}

/// Attributes applied to every backing `<video>` element. Muted playback is
/// what lets the browser autoplay without a user gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoAttributes {
    pub looping: bool,
    pub muted: bool,
    pub plays_inline: bool,
    pub cross_origin: &'static str,
}

impl Default for VideoAttributes {
    fn default() -> Self {
        Self { looping: true, muted: true, plays_inline: true, cross_origin: "anonymous" }
    }
}
