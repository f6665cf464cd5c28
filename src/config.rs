//! Startup configuration. Defaults reproduce the stock page; the host page
//! may override individual keys through `data-*` attributes on the container.

use crate::effects::{IntensityPolicy, PipelineConfig};

pub const MANIFEST_PATH: &str = "media.json";
pub const CONTAINER_SELECTOR: &str = "#mindar-container";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: u32,
    pub intensity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub light: Light,
    pub distance: f64,
    pub position: [f64; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub manifest_path: String,
    pub container_selector: String,
    pub log_level: log::Level,
    /// Renderer clear colour; alpha 0 lets the camera feed show through.
    pub clear_color: u32,
    pub clear_alpha: f64,
    pub ambient: Light,
    pub point: PointLight,
    pub pipeline: PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest_path: MANIFEST_PATH.to_string(),
            container_selector: CONTAINER_SELECTOR.to_string(),
            log_level: log::Level::Info,
            clear_color: 0x000000,
            clear_alpha: 0.0,
            ambient: Light { color: 0xffffff, intensity: 2.0 },
            point: PointLight {
                light: Light { color: 0xffffff, intensity: 1.0 },
                distance: 100.0,
                position: [5.0, 5.0, 5.0],
            },
            pipeline: PipelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Applies the recognised keys found by `lookup`. Keys are the attribute
    /// names without the `data-` prefix; bad values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("manifest") {
            self.manifest_path = path;
        }
        if let Some(level) = lookup("log-level") {
            match level.parse() {
                Ok(level) => self.log_level = level,
                Err(_) => log::warn!("ignoring data-log-level={level:?}"),
            }
        }
        if let Some(policy) = lookup("intensity-policy") {
            match IntensityPolicy::from_id(&policy) {
                Some(policy) => self.pipeline.policy = policy,
                None => log::warn!("ignoring data-intensity-policy={policy:?}"),
            }
        }
        if let Some(flag) = lookup("glitch-pass") {
            apply_flag(&mut self.pipeline.glitch_pass, "glitch-pass", &flag);
        }
        if let Some(flag) = lookup("drive-glow-time") {
            apply_flag(&mut self.pipeline.drive_glow_time, "drive-glow-time", &flag);
        }
        self
    }
}

fn apply_flag(slot: &mut bool, key: &str, value: &str) {
    match value.trim().to_lowercase().as_str() {
        "" | "true" | "1" | "on" => *slot = true,
        "false" | "0" | "off" => *slot = false,
        _ => log::warn!("ignoring data-{key}={value:?}"),
    }
}
