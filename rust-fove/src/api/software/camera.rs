use euclid::default::{Point2D, Point3D, Rotation3D, Vector3D};
use rust_fove_api::{FoveCamera, FoveDistortionConfig, FoveEyeInstance, FoveEyePrototype, FoveRay,
                    FoveRenderTextureDesc, FoveRigAnchor, FoveTextureId, FoveViewport};
use std::cell::RefCell;
use std::rc::Rc;

const DEFAULT_FIELD_OF_VIEW: f32 = 60.0;

#[derive(Debug, Clone, Copy)]
struct AnchorPose {
    position: Vector3D<f32>,
    rotation: Rotation3D<f32>,
}

type AnchorPosePtr = Rc<RefCell<AnchorPose>>;

// Rig anchor of the software backend. Cameras it creates keep a handle to
// its pose, so moving the anchor moves them.
pub struct SoftwareRigAnchor {
    pose: AnchorPosePtr,
}

impl SoftwareRigAnchor {
    pub fn new() -> SoftwareRigAnchor {
        SoftwareRigAnchor {
            pose: Rc::new(RefCell::new(AnchorPose {
                position: Vector3D::zero(),
                rotation: Rotation3D::identity(),
            })),
        }
    }

    /// A concrete camera parented under this anchor, for callers building
    /// their own eye overrides.
    pub fn create_camera(&self) -> SoftwareCamera {
        let mut camera = SoftwareCamera::new("Camera");
        camera.parent = Some(self.pose.clone());
        camera
    }
}

impl FoveRigAnchor for SoftwareRigAnchor {
    fn set_local_pose(&mut self, position: Vector3D<f32>, rotation: Rotation3D<f32>) {
        let mut pose = self.pose.borrow_mut();
        pose.position = position;
        pose.rotation = rotation;
    }

    fn local_position(&self) -> Vector3D<f32> {
        self.pose.borrow().position
    }

    fn local_rotation(&self) -> Rotation3D<f32> {
        self.pose.borrow().rotation
    }

    fn create_eye_camera(&mut self) -> Box<dyn FoveCamera> {
        Box::new(self.create_camera())
    }
}

/// A pinhole camera looking down +z with +y up.
pub struct SoftwareCamera {
    name: String,
    parent: Option<AnchorPosePtr>,
    local_position: Vector3D<f32>,
    local_rotation: Rotation3D<f32>,
    field_of_view: f32,
    aspect: f32,
    hdr: bool,
    background_color: [f32; 4],
    target_texture: Option<FoveTextureId>,
    rect: FoveViewport,
}

impl SoftwareCamera {
    /// A camera without a parent: its local transform is its world transform.
    pub fn new(name: &str) -> SoftwareCamera {
        let target = FoveRenderTextureDesc::eye_target();
        SoftwareCamera {
            name: name.into(),
            parent: None,
            local_position: Vector3D::zero(),
            local_rotation: Rotation3D::identity(),
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            aspect: target.width as f32 / target.height as f32,
            hdr: false,
            background_color: [0.0, 0.0, 0.0, 1.0],
            target_texture: None,
            rect: FoveViewport::FULL,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn world_position(&self) -> Vector3D<f32> {
        match self.parent {
            Some(ref parent) => {
                let parent = parent.borrow();
                parent.position + parent.rotation.transform_vector3d(self.local_position)
            }
            None => self.local_position,
        }
    }

    pub fn world_rotation(&self) -> Rotation3D<f32> {
        match self.parent {
            Some(ref parent) => self.local_rotation.then(&parent.borrow().rotation),
            None => self.local_rotation,
        }
    }

    fn tan_half_fov(&self) -> f32 {
        (self.field_of_view * 0.5).to_radians().tan()
    }
}

impl FoveCamera for SoftwareCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.into();
    }

    fn local_position(&self) -> Vector3D<f32> {
        self.local_position
    }

    fn set_local_position(&mut self, position: Vector3D<f32>) {
        self.local_position = position;
    }

    fn local_rotation(&self) -> Rotation3D<f32> {
        self.local_rotation
    }

    fn set_local_rotation(&mut self, rotation: Rotation3D<f32>) {
        self.local_rotation = rotation;
    }

    fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees;
    }

    fn hdr(&self) -> bool {
        self.hdr
    }

    fn set_hdr(&mut self, hdr: bool) {
        self.hdr = hdr;
    }

    fn background_color(&self) -> [f32; 4] {
        self.background_color
    }

    fn set_background_color(&mut self, color: [f32; 4]) {
        self.background_color = color;
    }

    fn target_texture(&self) -> Option<FoveTextureId> {
        self.target_texture
    }

    fn set_target_texture(&mut self, texture: Option<FoveTextureId>) {
        self.target_texture = texture;
    }

    fn rect(&self) -> FoveViewport {
        self.rect
    }

    fn set_rect(&mut self, rect: FoveViewport) {
        self.rect = rect;
    }

    fn viewport_point_to_ray(&self, point: Point2D<f32>) -> FoveRay {
        let tan_half = self.tan_half_fov();
        let local = Vector3D::new(
            (2.0 * point.x - 1.0) * tan_half * self.aspect,
            (2.0 * point.y - 1.0) * tan_half,
            1.0,
        );
        let direction = self.world_rotation().transform_vector3d(local.normalize());
        FoveRay::new(self.world_position().to_point(), direction)
    }

    fn world_to_viewport_point(&self, point: Point3D<f32>) -> Point3D<f32> {
        let relative = point.to_vector() - self.world_position();
        let local = self.world_rotation().inverse().transform_vector3d(relative);
        if local.z == 0.0 {
            return Point3D::new(0.5, 0.5, 0.0);
        }

        let tan_half = self.tan_half_fov();
        let x = local.x / (local.z * tan_half * self.aspect);
        let y = local.y / (local.z * tan_half);
        Point3D::new((x + 1.0) * 0.5, (y + 1.0) * 0.5, local.z)
    }
}

// Eye camera template: every instance gets the same lens, color and
// distortion settings.
pub struct SoftwareEyePrototype {
    pub field_of_view: f32,
    pub hdr: bool,
    pub background_color: [f32; 4],
    pub distortion: FoveDistortionConfig,
    active: bool,
}

impl SoftwareEyePrototype {
    pub fn new(distortion: FoveDistortionConfig) -> SoftwareEyePrototype {
        SoftwareEyePrototype {
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            hdr: false,
            background_color: [0.0, 0.0, 0.0, 1.0],
            distortion: distortion,
            active: true,
        }
    }
}

impl FoveEyePrototype for SoftwareEyePrototype {
    fn instantiate(&self, anchor: &mut dyn FoveRigAnchor) -> FoveEyeInstance {
        let mut camera = anchor.create_eye_camera();
        camera.set_field_of_view(self.field_of_view);
        camera.set_hdr(self.hdr);
        camera.set_background_color(self.background_color);
        FoveEyeInstance {
            camera: camera,
            distortion: self.distortion.clone(),
        }
    }

    fn is_active_in_hierarchy(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
