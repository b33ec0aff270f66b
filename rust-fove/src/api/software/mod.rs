mod camera;
mod collider;
mod graphics;
mod input;

pub use self::camera::{SoftwareCamera, SoftwareEyePrototype, SoftwareRigAnchor};
pub use self::collider::{BoxCollider, SphereCollider};
pub use self::graphics::{Pixel, SoftwareGraphics, SoftwareTexture};
pub use self::input::SoftwareInput;
