use crate::FoveEye;
use euclid::default::Point2D;

/// Where a distortion stage writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub enum FoveOutputMode {
    /// Blit into an owned offscreen target, composited into half of the
    /// screen by a later GUI pass. Works anywhere in a post-process chain.
    ToTexture,
    /// Render straight into half of the screen. Cheaper, but the stage has
    /// to be the last effect on its camera.
    ToViewport,
}

/// A shader reference, resolved by the host graphics backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveShader {
    pub name: String,
}

impl FoveShader {
    pub const BARREL_SHADER_NAME: &'static str = "Hidden/FOVE/BarrelDistortion";

    pub fn new<S: Into<String>>(name: S) -> FoveShader {
        FoveShader { name: name.into() }
    }

    pub fn barrel() -> FoveShader {
        FoveShader::new(FoveShader::BARREL_SHADER_NAME)
    }
}

// Lens and color correction inputs of the barrel shader.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveDistortionParams {
    // The offsets are large to be sane, the shader multiplies them by 0.001.
    pub blue_offset: f32,
    pub red_offset: f32,
    pub factor: f32,
    pub gamma_mod: f32,

    // Lens center in normalized texture coordinates.
    pub center: Point2D<f32>,

    // The eye this stage draws.
    pub eye: FoveEye,

    pub output_mode: FoveOutputMode,
}

impl Default for FoveDistortionParams {
    fn default() -> FoveDistortionParams {
        FoveDistortionParams {
            blue_offset: 8.0,
            red_offset: -6.6,
            factor: 1.4,
            gamma_mod: 1.0,
            center: Point2D::new(0.5, 0.5),
            eye: FoveEye::Left,
            output_mode: FoveOutputMode::ToTexture,
        }
    }
}

impl FoveDistortionParams {
    /// Uniform names and values, in upload order.
    pub fn uniforms(&self) -> [(&'static str, f32); 6] {
        [
            ("_blueOffset", self.blue_offset),
            ("_redOffset", self.red_offset),
            ("_Factor", self.factor),
            ("_xCenter", self.center.x),
            ("_yCenter", self.center.y),
            ("_gammaMod", self.gamma_mod),
        ]
    }
}

/// Everything needed to attach a distortion stage to a camera.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveDistortionConfig {
    pub params: FoveDistortionParams,

    pub shader: Option<FoveShader>,

    // Enables the live tuning hotkeys.
    pub editable: bool,
}

impl Default for FoveDistortionConfig {
    fn default() -> FoveDistortionConfig {
        FoveDistortionConfig {
            params: FoveDistortionParams::default(),
            shader: Some(FoveShader::barrel()),
            editable: false,
        }
    }
}
