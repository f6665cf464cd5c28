//! `media.json`: which descriptor to track and which video goes on each target.

use serde::{Deserialize, Serialize};

use crate::effects::EffectSettings;
use crate::error::Result;

/// Zero-based index of a target inside the compiled descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetIndex(pub usize);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Path of the compiled `.mind` target descriptor.
    pub mind_file: String,
    /// Prefix prepended verbatim to every `MediaEntry::video`.
    pub video_root: String,
    pub media: Vec<MediaEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub video: String,
    /// Missing dimensions come through as NaN, as they would in the browser.
    #[serde(default = "unknown_dimension")]
    pub width: f64,
    #[serde(default = "unknown_dimension")]
    pub height: f64,
    /// three.js materials are opaque when no opacity is given.
    #[serde(default = "opaque")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb_shift_intensity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_intensity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glitch_amount: Option<f32>,
}

fn unknown_dimension() -> f64 {
    f64::NAN
}

fn opaque() -> f64 {
    1.0
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Entries paired with the descriptor target they are bound to.
    pub fn targets(&self) -> impl Iterator<Item = (TargetIndex, &MediaEntry)> {
        self.media.iter().enumerate().map(|(i, e)| (TargetIndex(i), e))
    }

    pub fn video_url(&self, entry: &MediaEntry) -> String {
        format!("{}{}", self.video_root, entry.video)
    }
}

impl MediaEntry {
    /// Effect intensities with absent fields resolved to zero.
    pub fn effects(&self) -> EffectSettings {
        EffectSettings {
            rgb_shift: self.rgb_shift_intensity.unwrap_or(0.0),
            glow: self.glow_intensity.unwrap_or(0.0),
            glitch: self.glitch_amount.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "mindFile": "./targets.mind",
        "videoRoot": "./videos/",
        "media": [
            { "video": "a.mp4", "width": 1280, "height": 720, "opacity": 0.8,
              "rgbShiftIntensity": 0.01, "glowIntensity": 1.5, "glitchAmount": 0.2 },
            { "video": "b.mp4", "width": 720, "height": 1280, "opacity": 1 }
        ]
    }"#;

    #[test]
    fn parses_camel_case_fields() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.mind_file, "./targets.mind");
        assert_eq!(manifest.media.len(), 2);
        assert_eq!(manifest.media[0].rgb_shift_intensity, Some(0.01));
        assert_eq!(manifest.media[0].glitch_amount, Some(0.2));
    }

    #[test]
    fn missing_effects_default_to_zero() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        let fx = manifest.media[1].effects();
        assert_eq!(fx, EffectSettings::default());
        assert_eq!(fx.rgb_shift, 0.0);
        assert_eq!(fx.glow, 0.0);
        assert_eq!(fx.glitch, 0.0);
    }

    #[test]
    fn video_url_is_plain_concatenation() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.video_url(&manifest.media[1]), "./videos/b.mp4");
    }

    #[test]
    fn targets_follow_manifest_order() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        let pairs: Vec<_> = manifest.targets().map(|(i, e)| (i.0, e.video.as_str())).collect();
        assert_eq!(pairs, vec![(0, "a.mp4"), (1, "b.mp4")]);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let bad = r#"{ "mindFile": "t.mind", "videoRoot": "", "media": [
            { "video": "a.mp4", "width": "wide", "height": 720, "opacity": 1 } ] }"#;
        assert!(Manifest::from_json(bad).is_err());
    }

    #[test]
    fn entry_missing_size_and_opacity_still_loads() {
        let partial = r#"{ "mindFile": "t.mind", "videoRoot": "", "media": [
            { "video": "a.mp4", "width": 1280, "height": 720, "opacity": 0.8 },
            { "video": "b.mp4" } ] }"#;
        let manifest = Manifest::from_json(partial).unwrap();
        assert_eq!(manifest.media.len(), 2);
        assert_eq!(manifest.media[0].opacity, 0.8);

        let bare = &manifest.media[1];
        assert!(bare.width.is_nan());
        assert!(bare.height.is_nan());
        assert_eq!(bare.opacity, 1.0);
        assert_eq!(bare.effects(), EffectSettings::default());
    }

    #[test]
    fn out_of_range_opacity_is_not_validated() {
        let odd = r#"{ "mindFile": "t.mind", "videoRoot": "", "media": [
            { "video": "a.mp4", "width": 1, "height": 1, "opacity": 3.5 } ] }"#;
        assert_eq!(Manifest::from_json(odd).unwrap().media[0].opacity, 3.5);
    }
}
