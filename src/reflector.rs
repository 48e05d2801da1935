//! The animated planar reflection driver.
//!
//! A [`ReflectorSurface`] owns the uniform block the mirror shader consumes:
//! base tint, transmission, wave strength, wave speed and an animation-time
//! scalar. Time is a frame counter advanced once per scheduled frame, not
//! wall time — the wave phase is frame-rate dependent on purpose, for visual
//! parity with the shipped scene.

use crate::data_structures::{Rgb, TextureRef};

/// Public wave-speed values are divided by this before reaching the uniform
/// block, keeping the panel's control range human-scaled.
pub const WAVE_SPEED_SCALE: f32 = 1000.0;

/// Time value the shipped scene starts at.
pub const INITIAL_TIME: f32 = 4.0;

/// Shader-facing values, updated immediately by the setters and effective on
/// the next rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectorUniforms {
    pub color: Rgb,
    pub transmission: f32,
    pub wave_strength: f32,
    pub wave_speed: f32,
    pub time: f32,
}

/// Planar mirror surface state.
///
/// Setters tolerate any numeric input: non-finite values are dropped and
/// declared ranges are clamped, since panel bounds are advisory only.
#[derive(Clone, Debug)]
pub struct ReflectorSurface {
    distortion: TextureRef,
    clip_bias: f32,
    /// Width and height of the ground plane the mirror covers.
    extent: (f32, f32),
    uniforms: ReflectorUniforms,
}

impl ReflectorSurface {
    pub fn new(
        color: Rgb,
        transmission: f32,
        wave_strength: f32,
        wave_speed: f32,
        distortion: TextureRef,
    ) -> Self {
        let mut surface = Self {
            distortion,
            clip_bias: 0.1,
            extent: (700.0, 700.0),
            uniforms: ReflectorUniforms {
                color,
                transmission: 0.0,
                wave_strength: 0.0,
                wave_speed: 0.0,
                time: INITIAL_TIME,
            },
        };
        surface.set_transmission(transmission);
        surface.set_wave_strength(wave_strength);
        surface.set_wave_speed(wave_speed);
        surface
    }

    pub fn uniforms(&self) -> &ReflectorUniforms {
        &self.uniforms
    }

    /// The repeat-wrapped noise texture distorting the reflection.
    pub fn distortion(&self) -> &TextureRef {
        &self.distortion
    }

    pub fn clip_bias(&self) -> f32 {
        self.clip_bias
    }

    pub fn extent(&self) -> (f32, f32) {
        self.extent
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.uniforms.color = color;
    }

    pub fn set_transmission(&mut self, transmission: f32) {
        if transmission.is_finite() {
            self.uniforms.transmission = transmission.clamp(0.0, 1.0);
        }
    }

    pub fn set_wave_strength(&mut self, strength: f32) {
        if strength.is_finite() {
            self.uniforms.wave_strength = strength.max(0.0);
        }
    }

    /// Accepts the panel-scale speed; the uniform stores `speed / 1000`.
    pub fn set_wave_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.uniforms.wave_speed = speed / WAVE_SPEED_SCALE;
        }
    }

    /// Advances the animation-time scalar by one frame.
    pub fn advance_frame(&mut self) {
        self.uniforms.time += 1.0;
    }
}
