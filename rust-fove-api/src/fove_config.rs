use crate::FoveShader;

/// Rig geometry, tunable at runtime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct FoveConfig {
    /// Separation between pupils in meters. Average for people is 0.065.
    pub interpupillary_distance: f32,

    /// Height (up-down) from the base of the head to the eyes.
    pub eye_height: f32,

    /// Depth (front-to-back) from the base of the head to the eyes.
    pub eye_forward: f32,

    /// Shader given to the distortion stages of synthesized eye cameras.
    pub barrel_shader: Option<FoveShader>,
}

impl Default for FoveConfig {
    fn default() -> FoveConfig {
        FoveConfig {
            interpupillary_distance: 0.06,
            eye_height: 0.08,
            eye_forward: 0.04,
            barrel_shader: Some(FoveShader::barrel()),
        }
    }
}
