extern crate rust_fove_api;
#[macro_use]
extern crate log;

pub mod api;
pub mod distortion;
pub mod frame_cache;
pub mod gaze;
pub mod rig;
mod session;

pub use rust_fove_api::*;
pub use distortion::{DistortionStage, DistortionState};
pub use frame_cache::{FoveFrame, FrameCache};
pub use rig::{FoveEyeCamera, FoveEyes, StereoRigBuilder};
pub use session::FoveSession;
