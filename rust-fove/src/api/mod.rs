#[cfg(feature = "emulated")]
mod emulated;
#[cfg(feature = "emulated")]
pub use self::emulated::EmulatedMouseSource;

#[cfg(feature = "hmd")]
mod hmd;
#[cfg(feature = "hmd")]
pub use self::hmd::FoveHmdSource;

#[cfg(feature = "software")]
mod software;
#[cfg(feature = "software")]
pub use self::software::*;

#[cfg(feature = "emulated")]
use rust_fove_api::{FoveInput, FovePoseSource};
#[cfg(feature = "emulated")]
use std::rc::Rc;

// Picks the pose backend for a new session. No headset runtime is linked,
// so this always falls back to mouse emulation.
#[cfg(feature = "emulated")]
pub fn default_pose_source(input: Rc<dyn FoveInput>) -> Box<dyn FovePoseSource> {
    info!("No HMD detected, falling back to software emulation...");
    Box::new(EmulatedMouseSource::new(input))
}
