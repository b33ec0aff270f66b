use crate::{FoveDistortionConfig, FoveRay, FoveTextureId, FoveViewport};
use euclid::default::{Point2D, Point3D, Rotation3D, Vector3D};

/// A host camera used to render one eye.
pub trait FoveCamera {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    /// Position relative to the parent transform, if any.
    fn local_position(&self) -> Vector3D<f32>;

    fn set_local_position(&mut self, position: Vector3D<f32>);

    fn local_rotation(&self) -> Rotation3D<f32>;

    fn set_local_rotation(&mut self, rotation: Rotation3D<f32>);

    /// Vertical field of view in degrees.
    fn field_of_view(&self) -> f32;

    fn set_field_of_view(&mut self, degrees: f32);

    fn hdr(&self) -> bool;

    fn set_hdr(&mut self, hdr: bool);

    /// Clear color as RGBA.
    fn background_color(&self) -> [f32; 4];

    fn set_background_color(&mut self, color: [f32; 4]);

    /// Offscreen texture the camera renders into, `None` for the screen.
    fn target_texture(&self) -> Option<FoveTextureId>;

    fn set_target_texture(&mut self, texture: Option<FoveTextureId>);

    /// Portion of the output the camera renders into.
    fn rect(&self) -> FoveViewport;

    fn set_rect(&mut self, rect: FoveViewport);

    /// Returns a world space ray going from the camera through a normalized
    /// viewport point.
    fn viewport_point_to_ray(&self, point: Point2D<f32>) -> FoveRay;

    /// Projects a world space point into normalized viewport space. The z
    /// component is the distance in front of the camera.
    fn world_to_viewport_point(&self, point: Point3D<f32>) -> Point3D<f32>;
}

/// The transform the head pose is applied to. Eye cameras created through
/// it are its children and follow its pose.
pub trait FoveRigAnchor {
    fn set_local_pose(&mut self, position: Vector3D<f32>, rotation: Rotation3D<f32>);

    fn local_position(&self) -> Vector3D<f32>;

    fn local_rotation(&self) -> Rotation3D<f32>;

    /// Creates a bare camera parented under the anchor.
    fn create_eye_camera(&mut self) -> Box<dyn FoveCamera>;
}

/// An eye camera created from a prototype, with the distortion settings the
/// prototype carries.
pub struct FoveEyeInstance {
    pub camera: Box<dyn FoveCamera>,
    pub distortion: FoveDistortionConfig,
}

/// A template for eye cameras, for callers that need their own effects or
/// settings on the created cameras.
pub trait FoveEyePrototype {
    /// Clones the prototype under `anchor`.
    fn instantiate(&self, anchor: &mut dyn FoveRigAnchor) -> FoveEyeInstance;

    /// Whether the prototype itself is live in the scene.
    fn is_active_in_hierarchy(&self) -> bool;

    fn set_active(&mut self, active: bool);
}
