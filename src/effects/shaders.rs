//! GLSL sources for the post-processing passes, their uniform blocks, and a
//! CPU evaluation of each fragment program.
//!
//! The CPU functions follow the GLSL line for line so the passes can be
//! checked without a GPU. Both sides hash with the same `random`, so a given
//! `(uv, time)` always picks the same glitched fragments.

/// Shared by every pass; three.js supplies `uv`, `position` and the matrices.
pub const VERTEX_SHADER: &str = r#"
varying vec2 vUv;
void main() {
  vUv = uv;
  gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

pub const CHROMATIC_ABERRATION_FRAGMENT: &str = r#"
uniform sampler2D tDiffuse;
uniform float amount;
uniform float glitchAmount;
uniform float time;
varying vec2 vUv;

float random(vec2 co) {
  return fract(sin(dot(co.xy, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
  vec2 redOffset = amount * vec2(sin(time * 2.0), cos(time * 2.0));
  vec2 blueOffset = amount * vec2(sin(time + 4.0), cos(time + 4.0));

  vec2 glitchOffset = vec2(0.0);
  if (random(vUv + time) < glitchAmount) {
    glitchOffset = vec2(random(vUv) * 0.05, random(vUv) * 0.05);
  }

  vec4 cr = texture2D(tDiffuse, vUv + redOffset + glitchOffset);
  vec4 cg = texture2D(tDiffuse, vUv + glitchOffset);
  vec4 cb = texture2D(tDiffuse, vUv - blueOffset + glitchOffset);

  gl_FragColor = vec4(cr.r, cg.g, cb.b, cg.a);
}
"#;

pub const GLOW_FRAGMENT: &str = r#"
uniform sampler2D tDiffuse;
uniform float glowIntensity;
uniform float glitchAmount;
uniform float time;
varying vec2 vUv;

float random(vec2 co) {
  return fract(sin(dot(co.xy, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
  vec4 color = texture2D(tDiffuse, vUv);

  if (random(vUv + time) < glitchAmount) {
    color.rgb *= 0.5;
  }

  gl_FragColor = vec4(color.rgb * glowIntensity, color.a);
}
"#;

pub const GLITCH_FRAGMENT: &str = r#"
uniform sampler2D tDiffuse;
uniform float glitchAmount;
uniform float time;
varying vec2 vUv;

float random(vec2 co) {
  return fract(sin(dot(co.xy, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
  if (random(vUv + time) * glitchAmount < 0.3) {
    discard;
  }
  gl_FragColor = texture2D(tDiffuse, vUv);
}
"#;

pub type Uv = [f32; 2];
pub type Rgba = [f32; 4];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChromaticAberrationUniforms {
    pub amount: f32,
    pub glitch_amount: f32,
    pub time: f32,
}

impl Default for ChromaticAberrationUniforms {
    fn default() -> Self {
        Self { amount: 0.02, glitch_amount: 0.0, time: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowUniforms {
    pub glow_intensity: f32,
    pub glitch_amount: f32,
    pub time: f32,
}

impl Default for GlowUniforms {
    fn default() -> Self {
        Self { glow_intensity: 1.0, glitch_amount: 0.0, time: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchUniforms {
    pub glitch_amount: f32,
    pub time: f32,
}

impl Default for GlitchUniforms {
    fn default() -> Self {
        Self { glitch_amount: 0.1, time: 0.0 }
    }
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn offset(uv: Uv, by: f32) -> Uv {
    [uv[0] + by, uv[1] + by]
}

/// `fract(sin(dot(co, (12.9898, 78.233))) * 43758.5453)`, in `[0, 1)`.
pub fn random(co: Uv) -> f32 {
    fract((co[0] * 12.9898 + co[1] * 78.233).sin() * 43758.5453)
}

pub fn chromatic_aberration(
    sample: impl Fn(Uv) -> Rgba,
    uv: Uv,
    u: &ChromaticAberrationUniforms,
) -> Rgba {
    let red = [u.amount * (u.time * 2.0).sin(), u.amount * (u.time * 2.0).cos()];
    let blue = [u.amount * (u.time + 4.0).sin(), u.amount * (u.time + 4.0).cos()];

    let glitch = if random(offset(uv, u.time)) < u.glitch_amount {
        let d = random(uv) * 0.05;
        [d, d]
    } else {
        [0.0, 0.0]
    };

    let cr = sample([uv[0] + red[0] + glitch[0], uv[1] + red[1] + glitch[1]]);
    let cg = sample([uv[0] + glitch[0], uv[1] + glitch[1]]);
    let cb = sample([uv[0] - blue[0] + glitch[0], uv[1] - blue[1] + glitch[1]]);

    [cr[0], cg[1], cb[2], cg[3]]
}

pub fn glow(color: Rgba, uv: Uv, u: &GlowUniforms) -> Rgba {
    let dim = if random(offset(uv, u.time)) < u.glitch_amount { 0.5 } else { 1.0 };
    let k = dim * u.glow_intensity;
    [color[0] * k, color[1] * k, color[2] * k, color[3]]
}

/// `None` when the fragment is discarded.
pub fn glitch(color: Rgba, uv: Uv, u: &GlitchUniforms) -> Option<Rgba> {
    if random(offset(uv, u.time)) * u.glitch_amount < 0.3 {
        None
    } else {
        Some(color)
    }
}
