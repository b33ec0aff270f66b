use crate::distortion::DistortionStage;
use euclid::default::{Rotation3D, Vector3D};
use rust_fove_api::{FoveCamera, FoveConfig, FoveDistortionConfig, FoveEye, FoveEyePrototype, FoveRigAnchor};

const EYE_FIELD_OF_VIEW: f32 = 85.0;
const EYE_BACKGROUND_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// One eye of the stereo rig.
pub struct FoveEyeCamera {
    eye: FoveEye,
    camera: Box<dyn FoveCamera>,
    distortion: Option<DistortionStage>,
    overridden: bool,
}

impl FoveEyeCamera {
    pub fn eye(&self) -> FoveEye {
        self.eye
    }

    pub fn camera(&self) -> &dyn FoveCamera {
        &*self.camera
    }

    pub fn camera_mut(&mut self) -> &mut dyn FoveCamera {
        &mut *self.camera
    }

    /// The distortion stage the rig attached. Override cameras have none.
    pub fn distortion(&self) -> Option<&DistortionStage> {
        self.distortion.as_ref()
    }

    pub fn distortion_mut(&mut self) -> Option<&mut DistortionStage> {
        self.distortion.as_mut()
    }

    /// Camera and stage borrowed together, for the render hooks.
    pub fn split_mut(&mut self) -> (&mut dyn FoveCamera, Option<&mut DistortionStage>) {
        (&mut *self.camera, self.distortion.as_mut())
    }

    /// Whether the camera was supplied by the caller instead of built by
    /// the rig.
    pub fn is_overridden(&self) -> bool {
        self.overridden
    }
}

pub struct FoveEyes {
    pub left: FoveEyeCamera,
    pub right: FoveEyeCamera,
}

impl FoveEyes {
    pub fn get(&self, eye: FoveEye) -> &FoveEyeCamera {
        match eye {
            FoveEye::Left => &self.left,
            FoveEye::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, eye: FoveEye) -> &mut FoveEyeCamera {
        match eye {
            FoveEye::Left => &mut self.left,
            FoveEye::Right => &mut self.right,
        }
    }
}

/// Builds the two eye cameras of a session under its rig anchor.
///
/// Without a prototype, plain cameras are created through the anchor and a
/// distortion stage using the configured barrel shader is attached. With a
/// prototype, each eye is a clone of it and keeps the prototype's
/// distortion settings; a prototype that is live in the scene is
/// deactivated afterwards so it does not render as an extra view.
///
/// Cameras passed as overrides are used as they are: no renaming, no
/// repositioning and no distortion stage. If they should turn with the
/// head, the caller has to parent them under the anchor.
pub struct StereoRigBuilder<'a> {
    config: FoveConfig,
    prototype: Option<&'a mut dyn FoveEyePrototype>,
    left_override: Option<Box<dyn FoveCamera>>,
    right_override: Option<Box<dyn FoveCamera>>,
}

impl<'a> StereoRigBuilder<'a> {
    pub fn new(config: FoveConfig) -> StereoRigBuilder<'a> {
        StereoRigBuilder {
            config: config,
            prototype: None,
            left_override: None,
            right_override: None,
        }
    }

    pub fn prototype(mut self, prototype: &'a mut dyn FoveEyePrototype) -> StereoRigBuilder<'a> {
        self.prototype = Some(prototype);
        self
    }

    pub fn left_override(mut self, camera: Box<dyn FoveCamera>) -> StereoRigBuilder<'a> {
        self.left_override = Some(camera);
        self
    }

    pub fn right_override(mut self, camera: Box<dyn FoveCamera>) -> StereoRigBuilder<'a> {
        self.right_override = Some(camera);
        self
    }

    pub fn build(mut self, anchor: &mut dyn FoveRigAnchor) -> FoveEyes {
        let left = self.setup_eye(FoveEye::Left, anchor);
        let right = self.setup_eye(FoveEye::Right, anchor);

        if let Some(prototype) = self.prototype {
            if prototype.is_active_in_hierarchy() {
                prototype.set_active(false);
            }
        }

        FoveEyes {
            left: left,
            right: right,
        }
    }

    fn setup_eye(&mut self, eye: FoveEye, anchor: &mut dyn FoveRigAnchor) -> FoveEyeCamera {
        let camera_override = match eye {
            FoveEye::Left => self.left_override.take(),
            FoveEye::Right => self.right_override.take(),
        };
        if let Some(camera) = camera_override {
            debug!("Using override camera {:?} for the {} eye", camera.name(), eye.name());
            return FoveEyeCamera {
                eye: eye,
                camera: camera,
                distortion: None,
                overridden: true,
            };
        }

        let (mut camera, distortion) = match self.prototype {
            Some(ref prototype) => {
                let instance = prototype.instantiate(anchor);
                (instance.camera, instance.distortion)
            }
            None => {
                let mut camera = anchor.create_eye_camera();
                camera.set_background_color(EYE_BACKGROUND_COLOR);
                camera.set_field_of_view(EYE_FIELD_OF_VIEW);
                camera.set_hdr(true);
                let distortion = FoveDistortionConfig {
                    shader: self.config.barrel_shader.clone(),
                    ..FoveDistortionConfig::default()
                };
                (camera, distortion)
            }
        };

        camera.set_name(&format!("FOVE Eye ({})", eye.name()));
        camera.set_local_position(eye_offset(&self.config, eye));
        camera.set_local_rotation(Rotation3D::identity());

        let mut stage = DistortionStage::new(distortion);
        stage.params_mut().eye = eye;

        debug!("Created {} with offset {:?}", camera.name(), camera.local_position());
        FoveEyeCamera {
            eye: eye,
            camera: camera,
            distortion: Some(stage),
            overridden: false,
        }
    }
}

/// Position of an eye relative to the rig anchor. Only the lateral axis
/// differs between the eyes.
pub fn eye_offset(config: &FoveConfig, eye: FoveEye) -> Vector3D<f32> {
    Vector3D::new(eye.lateral_sign() * config.interpupillary_distance * 0.5,
                  config.eye_height,
                  config.eye_forward)
}
