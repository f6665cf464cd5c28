//! Post-processing state: the ordered shader stages and the uniform values
//! the frame loop pushes into them.
//!
//! One `EffectPipeline` exists per session. Target callbacks write into it and
//! the renderer reads from it; nothing is queued, so with the default
//! [`IntensityPolicy::LastEventWins`] the most recent found/lost event decides
//! the intensities for every visible target.

pub mod shaders;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::manifest::TargetIndex;
use shaders::{ChromaticAberrationUniforms, GlitchUniforms, GlowUniforms};

/// Shared handle held by the frame loop and every target binding.
pub type SharedPipeline = Rc<RefCell<EffectPipeline>>;

/// Per-target effect intensities, resolved from a `MediaEntry`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectSettings {
    pub rgb_shift: f32,
    pub glow: f32,
    pub glitch: f32,
}

/// How found/lost events from several targets combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntensityPolicy {
    /// Every event overwrites the shared uniforms.
    #[default]
    LastEventWins,
    /// Each visible target keeps its own record; uniforms take the per-field
    /// maximum over visible targets and drop to zero once none remain.
    Strongest,
}

impl IntensityPolicy {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "last-event-wins" => Some(IntensityPolicy::LastEventWins),
            "strongest" => Some(IntensityPolicy::Strongest),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            IntensityPolicy::LastEventWins => "last-event-wins",
            IntensityPolicy::Strongest => "strongest",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub policy: IntensityPolicy,
    /// Append the fragment-discarding glitch pass after glow.
    pub glitch_pass: bool,
    /// Feed elapsed time to the glow pass as well as chromatic aberration.
    pub drive_glow_time: bool,
}

/// A full-screen shader pass following the scene render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    ChromaticAberration,
    Glow,
    Glitch,
}

impl ShaderStage {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::ChromaticAberration => "Chromatic Aberration",
            ShaderStage::Glow => "Glow",
            ShaderStage::Glitch => "Glitch",
        }
    }

    pub fn fragment_source(&self) -> &'static str {
        match self {
            ShaderStage::ChromaticAberration => shaders::CHROMATIC_ABERRATION_FRAGMENT,
            ShaderStage::Glow => shaders::GLOW_FRAGMENT,
            ShaderStage::Glitch => shaders::GLITCH_FRAGMENT,
        }
    }

    pub fn vertex_source(&self) -> &'static str {
        shaders::VERTEX_SHADER
    }
}

#[derive(Debug)]
pub struct EffectPipeline {
    config: PipelineConfig,
    chromatic: ChromaticAberrationUniforms,
    glow: GlowUniforms,
    glitch: GlitchUniforms,
    visible: BTreeMap<TargetIndex, EffectSettings>,
}

impl EffectPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            chromatic: ChromaticAberrationUniforms::default(),
            glow: GlowUniforms::default(),
            glitch: GlitchUniforms::default(),
            visible: BTreeMap::new(),
        }
    }

    pub fn shared(config: PipelineConfig) -> SharedPipeline {
        Rc::new(RefCell::new(Self::new(config)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Shader passes in composition order (the scene render pass precedes them).
    pub fn stages(&self) -> Vec<ShaderStage> {
        let mut stages = vec![ShaderStage::ChromaticAberration, ShaderStage::Glow];
        if self.config.glitch_pass {
            stages.push(ShaderStage::Glitch);
        }
        stages
    }

    pub fn chromatic(&self) -> &ChromaticAberrationUniforms {
        &self.chromatic
    }

    pub fn glow(&self) -> &GlowUniforms {
        &self.glow
    }

    pub fn glitch(&self) -> &GlitchUniforms {
        &self.glitch
    }

    /// Target `index` became visible. Glitch amounts are left untouched.
    pub fn target_found(&mut self, index: TargetIndex, settings: EffectSettings) {
        self.visible.insert(index, settings);
        match self.config.policy {
            IntensityPolicy::LastEventWins => self.set_intensities(settings.rgb_shift, settings.glow),
            IntensityPolicy::Strongest => self.recombine(),
        }
    }

    pub fn target_lost(&mut self, index: TargetIndex) {
        self.visible.remove(&index);
        match self.config.policy {
            IntensityPolicy::LastEventWins => self.set_intensities(0.0, 0.0),
            IntensityPolicy::Strongest => self.recombine(),
        }
    }

    /// Writes elapsed seconds into the time uniforms the loop drives.
    pub fn set_time(&mut self, seconds: f32) {
        self.chromatic.time = seconds;
        self.glitch.time = seconds;
        if self.config.drive_glow_time {
            self.glow.time = seconds;
        }
    }

    /// Uniform name/value pairs for `stage`, as named in its GLSL source.
    pub fn uniforms(&self, stage: ShaderStage) -> Vec<(&'static str, f32)> {
        match stage {
            ShaderStage::ChromaticAberration => vec![
                ("amount", self.chromatic.amount),
                ("glitchAmount", self.chromatic.glitch_amount),
                ("time", self.chromatic.time),
            ],
            ShaderStage::Glow => vec![
                ("glowIntensity", self.glow.glow_intensity),
                ("glitchAmount", self.glow.glitch_amount),
                ("time", self.glow.time),
            ],
            ShaderStage::Glitch => vec![
                ("glitchAmount", self.glitch.glitch_amount),
                ("time", self.glitch.time),
            ],
        }
    }

    fn set_intensities(&mut self, rgb_shift: f32, glow: f32) {
        self.chromatic.amount = rgb_shift;
        self.glow.glow_intensity = glow;
    }

    fn recombine(&mut self) {
        let (rgb_shift, glow) = self
            .visible
            .values()
            .fold((0.0_f32, 0.0_f32), |(r, g), s| (r.max(s.rgb_shift), g.max(s.glow)));
        self.set_intensities(rgb_shift, glow);
    }
}

impl Default for EffectPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
