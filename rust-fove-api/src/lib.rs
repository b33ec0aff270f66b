pub mod utils;

pub mod fove_camera;
pub mod fove_collider;
pub mod fove_config;
pub mod fove_distortion_params;
pub mod fove_error;
pub mod fove_eye;
pub mod fove_graphics;
pub mod fove_input;
pub mod fove_pose;
pub mod fove_pose_source;
pub mod fove_ray;
pub mod fove_viewport;
pub mod hmd;

pub use fove_camera::{FoveCamera, FoveEyeInstance, FoveEyePrototype, FoveRigAnchor};
pub use fove_collider::FoveCollider;
pub use fove_config::FoveConfig;
pub use fove_distortion_params::{FoveDistortionConfig, FoveDistortionParams, FoveOutputMode, FoveShader};
pub use fove_error::{FoveError, FoveResult};
pub use fove_eye::FoveEye;
pub use fove_graphics::{FoveFilterMode, FoveGraphics, FoveMaterialId, FoveRenderTarget,
                        FoveRenderTextureDesc, FoveTextureFormat, FoveTextureId};
pub use fove_input::{FoveButton, FoveInput, FoveKey};
pub use fove_pose::FovePose;
pub use fove_pose_source::FovePoseSource;
pub use fove_ray::{FoveEyeRays, FoveRay, FoveRaycastHit};
pub use fove_viewport::{FovePixelRect, FoveViewport};
pub use hmd::FoveHmdControlMsg;
