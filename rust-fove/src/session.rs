use crate::distortion::DistortionStage;
use crate::frame_cache::{FoveFrame, FrameCache};
use crate::rig::{eye_offset, FoveEyeCamera, FoveEyes, StereoRigBuilder};
use euclid::default::{Rotation3D, Vector3D};
use rust_fove_api::{FoveConfig, FoveEye, FoveEyeRays, FoveGraphics, FoveInput, FovePose, FovePoseSource,
                    FoveRenderTarget, FoveResult, FoveRigAnchor, FoveTextureId};
use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// Single entry point of the headset layer.
///
/// A session owns the rig anchor, the frame cache wrapping the pose source
/// and, once `awake` ran, the two eye cameras. The host drives it from its
/// lifecycle callbacks:
///
/// * `awake` once, to build the eye cameras;
/// * `update` every tick, which samples the pose and moves the anchor;
/// * `prepare_eye` / `render_eye` around each eye camera's render;
/// * `composite` from the GUI pass;
/// * `late_update` at the end of the tick.
pub struct FoveSession {
    config: FoveConfig,
    anchor: Box<dyn FoveRigAnchor>,
    cache: FrameCache,
    eyes: Option<FoveEyes>,
}

impl Drop for FoveSession {
    fn drop(&mut self) {
        LIVE_SESSIONS.fetch_sub(1, Ordering::SeqCst);
        debug!("FOVE session dropped");
    }
}

impl FoveSession {
    pub fn new(config: FoveConfig,
               anchor: Box<dyn FoveRigAnchor>,
               source: Box<dyn FovePoseSource>) -> FoveSession {
        if LIVE_SESSIONS.fetch_add(1, Ordering::SeqCst) > 0 {
            warn!("Another FOVE session is already alive, both will drive their own rig");
        }
        FoveSession {
            config: config,
            anchor: anchor,
            cache: FrameCache::new(source),
            eyes: None,
        }
    }

    /// A session on the default pose backend for this build.
    #[cfg(feature = "emulated")]
    pub fn with_default_source(config: FoveConfig,
                               anchor: Box<dyn FoveRigAnchor>,
                               input: std::rc::Rc<dyn FoveInput>) -> FoveSession {
        FoveSession::new(config, anchor, crate::api::default_pose_source(input))
    }

    pub fn config(&self) -> &FoveConfig {
        &self.config
    }

    /// Replaces the rig geometry. Eye cameras built by the rig move to the
    /// new offsets right away; override cameras are left alone.
    pub fn set_config(&mut self, config: FoveConfig) {
        if let Some(ref mut eyes) = self.eyes {
            for eye in &[FoveEye::Left, FoveEye::Right] {
                let eye_camera = eyes.get_mut(*eye);
                if !eye_camera.is_overridden() {
                    eye_camera.camera_mut().set_local_position(eye_offset(&config, *eye));
                }
            }
        }
        self.config = config;
    }

    /// Builds the eye cameras. Calling it again replaces them.
    pub fn awake(&mut self, builder: StereoRigBuilder) {
        if self.eyes.is_some() {
            debug!("Rebuilding the FOVE eye cameras");
        }
        self.eyes = Some(builder.build(&mut *self.anchor));
    }

    /// `awake` with synthesized eye cameras.
    pub fn awake_default(&mut self) {
        let builder = StereoRigBuilder::new(self.config.clone());
        self.awake(builder);
    }

    /// Whether the eye cameras exist, i.e. gaze rays can be derived.
    pub fn is_ready(&self) -> bool {
        self.eyes.is_some()
    }

    /// Starts a new tick: the next read samples the pose source again.
    pub fn begin_frame(&mut self) {
        self.cache.begin_frame();
    }

    /// The frame of the current tick, computed on first use.
    pub fn sample(&mut self) -> &FoveFrame {
        self.cache.sample(&mut *self.anchor, self.eyes.as_ref())
    }

    /// Per-tick update hook. Samples the pose so the anchor is moved before
    /// any eye camera renders.
    pub fn update(&mut self) {
        self.sample();
    }

    /// End of tick hook.
    pub fn late_update(&mut self) {
        match self.cache.current() {
            Some(frame) => {
                if let Ok(ref rays) = frame.eye_rays {
                    trace!("Left eye ray at tick {}: {:?} -> {:?}",
                           frame.tick, rays.left.origin, rays.left.point_at(crate::gaze::CURSOR_DISTANCE));
                }
            }
            None => warn!("FOVE data was not updated this frame (tick {})", self.cache.tick()),
        }
        self.cache.begin_frame();
    }

    pub fn pose(&mut self) -> FovePose {
        self.sample().pose
    }

    /// Gaze rays of the current tick, `FoveError::NotReady` before `awake`.
    pub fn eye_rays(&mut self) -> FoveResult<FoveEyeRays> {
        self.sample().eye_rays.clone()
    }

    pub fn hmd_rotation(&mut self) -> Rotation3D<f32> {
        self.sample().pose.orientation
    }

    /// Always zero, no pose source tracks position.
    pub fn hmd_position(&mut self) -> Vector3D<f32> {
        self.sample().pose.position
    }

    pub fn tick(&self) -> u64 {
        self.cache.tick()
    }

    /// Number of pose source queries so far.
    pub fn source_queries(&self) -> u64 {
        self.cache.source_queries()
    }

    pub fn anchor(&self) -> &dyn FoveRigAnchor {
        &*self.anchor
    }

    pub fn eyes(&self) -> Option<&FoveEyes> {
        self.eyes.as_ref()
    }

    pub fn eyes_mut(&mut self) -> Option<&mut FoveEyes> {
        self.eyes.as_mut()
    }

    pub fn eye_camera(&self, eye: FoveEye) -> Option<&FoveEyeCamera> {
        self.eyes.as_ref().map(|eyes| eyes.get(eye))
    }

    pub fn distortion(&self, eye: FoveEye) -> Option<&DistortionStage> {
        self.eye_camera(eye).and_then(|eye_camera| eye_camera.distortion())
    }

    /// Pre-render hook of an eye camera: routes it to its target.
    pub fn prepare_eye(&mut self, eye: FoveEye, graphics: &mut dyn FoveGraphics) {
        if let Some(ref mut eyes) = self.eyes {
            let (camera, stage) = eyes.get_mut(eye).split_mut();
            if let Some(stage) = stage {
                stage.prepare(camera, graphics);
            }
        }
    }

    /// Post-render hook of an eye camera. Eyes without a distortion stage
    /// are copied through.
    pub fn render_eye(&mut self,
                      eye: FoveEye,
                      graphics: &mut dyn FoveGraphics,
                      source: FoveTextureId,
                      destination: FoveRenderTarget) -> FoveRenderTarget {
        let stage = self.eyes.as_mut().and_then(|eyes| eyes.get_mut(eye).distortion_mut());
        match stage {
            Some(stage) => stage.render(graphics, source, destination),
            None => {
                graphics.blit(source, destination, None);
                destination
            }
        }
    }

    /// GUI hook: draws offscreen eye targets to the screen.
    pub fn composite(&self, graphics: &mut dyn FoveGraphics) {
        if let Some(ref eyes) = self.eyes {
            for eye_camera in &[&eyes.left, &eyes.right] {
                if let Some(stage) = eye_camera.distortion() {
                    stage.composite(graphics);
                }
            }
        }
    }

    /// Forwards input to the tuning hotkeys of editable stages.
    pub fn handle_input(&mut self, input: &dyn FoveInput) {
        if let Some(ref mut eyes) = self.eyes {
            for eye in &[FoveEye::Left, FoveEye::Right] {
                if let Some(stage) = eyes.get_mut(*eye).distortion_mut() {
                    stage.handle_input(input);
                }
            }
        }
    }
}

#[cfg(all(test, feature = "software", feature = "hmd"))]
mod tests {
    use super::*;
    use crate::api::{BoxCollider, FoveHmdSource, SoftwareCamera, SoftwareGraphics, SoftwareInput, SoftwareRigAnchor,
                     SoftwareTexture, SphereCollider};
    use crate::distortion::DistortionState;
    use euclid::default::{Point2D, Point3D, Size2D};
    use rust_fove_api::utils::approx_eq;
    use rust_fove_api::FoveButton;
    use euclid::Angle;
    use rust_fove_api::{FoveError, FoveHmdControlMsg, FoveRenderTextureDesc, FoveViewport};
    use std::sync::mpsc::Sender;

    fn session() -> (FoveSession, Sender<FoveHmdControlMsg>) {
        let (source, remote) = FoveHmdSource::new_with_remote();
        let session = FoveSession::new(FoveConfig::default(),
                                       Box::new(SoftwareRigAnchor::new()),
                                       Box::new(source));
        (session, remote)
    }

    #[test]
    fn rays_are_stable_within_a_tick() {
        let (mut session, remote) = session();
        session.awake_default();
        session.update();
        let first = session.eye_rays().unwrap();

        remote.send(FoveHmdControlMsg::SetOrientation(Rotation3D::around_y(Angle::degrees(30.0)))).unwrap();
        remote.send(FoveHmdControlMsg::SetGaze(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8))).unwrap();
        assert_eq!(session.eye_rays().unwrap(), first);
        assert_eq!(session.hmd_rotation(), Rotation3D::identity());
        assert_eq!(session.source_queries(), 1);

        session.late_update();
        session.update();
        let next = session.eye_rays().unwrap();
        assert_ne!(next.left, first.left);
        assert_ne!(next.right, first.right);
        assert_eq!(session.hmd_rotation(), Rotation3D::around_y(Angle::degrees(30.0)));
        assert_eq!(session.hmd_position(), Vector3D::zero());
    }

    #[test]
    fn head_pose_works_before_awake() {
        let (mut session, remote) = session();
        remote.send(FoveHmdControlMsg::SetOrientation(Rotation3D::around_x(Angle::degrees(10.0)))).unwrap();

        assert!(!session.is_ready());
        assert_eq!(session.eye_rays(), Err(FoveError::NotReady));
        assert_eq!(session.hmd_rotation(), Rotation3D::around_x(Angle::degrees(10.0)));
        assert_eq!(session.anchor().local_rotation(), Rotation3D::around_x(Angle::degrees(10.0)));
    }

    #[test]
    fn late_update_without_sample_starts_next_tick() {
        let (mut session, _remote) = session();
        session.late_update();
        session.late_update();
        assert_eq!(session.tick(), 2);
        assert_eq!(session.source_queries(), 0);
    }

    #[test]
    fn set_config_moves_rig_eyes_only() {
        let (mut session, _remote) = session();
        let custom = SoftwareCamera::new("Custom Right");
        session.awake(StereoRigBuilder::new(FoveConfig::default()).right_override(Box::new(custom)));

        let config = FoveConfig {
            interpupillary_distance: 0.07,
            ..FoveConfig::default()
        };
        session.set_config(config.clone());

        let left = session.eye_camera(FoveEye::Left).unwrap().camera().local_position();
        assert_eq!(left, eye_offset(&config, FoveEye::Left));
        let right = session.eye_camera(FoveEye::Right).unwrap().camera().local_position();
        assert_eq!(right, Vector3D::zero());
    }

    #[test]
    fn render_hooks_drive_the_stages() {
        let (mut session, _remote) = session();
        session.awake_default();
        let small = FoveRenderTextureDesc {
            width: 4,
            height: 4,
            ..FoveRenderTextureDesc::eye_target()
        };
        session.eyes_mut().unwrap().left.distortion_mut().unwrap().set_target_desc(small);
        let mut graphics = SoftwareGraphics::new(Size2D::new(8, 4));
        let source = graphics.upload_texture(SoftwareTexture::filled(4, 4, [1.0, 1.0, 1.0, 1.0]));

        session.prepare_eye(FoveEye::Left, &mut graphics);
        let target = session.distortion(FoveEye::Left).unwrap().render_target();
        assert!(target.is_some());
        assert_eq!(session.eye_camera(FoveEye::Left).unwrap().camera().target_texture(), target);
        assert_eq!(session.eye_camera(FoveEye::Left).unwrap().camera().rect(), FoveViewport::FULL);

        let output = session.render_eye(FoveEye::Left, &mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(output, FoveRenderTarget::Texture(target.unwrap()));
        assert_eq!(session.distortion(FoveEye::Left).unwrap().state(), DistortionState::Supported);
        // The right eye has not rendered yet.
        assert_eq!(session.distortion(FoveEye::Right).unwrap().state(), DistortionState::Uninitialized);
    }

    #[test]
    fn override_eyes_pass_frames_through() {
        let (mut session, _remote) = session();
        let custom = SoftwareCamera::new("Custom Left");
        session.awake(StereoRigBuilder::new(FoveConfig::default()).left_override(Box::new(custom)));
        let mut graphics = SoftwareGraphics::new(Size2D::new(4, 4));
        let source = graphics.upload_texture(SoftwareTexture::filled(4, 4, [0.0, 1.0, 0.0, 1.0]));

        session.prepare_eye(FoveEye::Left, &mut graphics);
        let output = session.render_eye(FoveEye::Left, &mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(output, FoveRenderTarget::Screen);
        assert_eq!(graphics.screen(), graphics.texture(source).unwrap());
    }

    #[cfg(feature = "emulated")]
    fn emulated_session(screen: Size2D<u32>) -> (std::rc::Rc<SoftwareInput>, FoveSession) {
        let input = std::rc::Rc::new(SoftwareInput::new(screen));
        let session = FoveSession::with_default_source(FoveConfig::default(),
                                                       Box::new(SoftwareRigAnchor::new()),
                                                       input.clone());
        (input, session)
    }

    #[cfg(feature = "emulated")]
    #[test]
    fn default_source_turns_the_anchor_on_drag() {
        let (input, mut session) = emulated_session(Size2D::new(1000, 500));
        session.awake_default();

        input.set_pointer(Point2D::new(100.0, 100.0));
        input.press(FoveButton::Secondary);
        session.update();
        input.end_tick();
        session.late_update();
        assert_eq!(session.anchor().local_rotation(), Rotation3D::identity());

        input.set_pointer(Point2D::new(190.0, 100.0));
        session.update();
        let forward = session.anchor().local_rotation().transform_vector3d(Vector3D::new(0.0, 0.0, 1.0));
        assert!(approx_eq(forward.x.abs(), 1.0, 1e-5));
        assert!(approx_eq(forward.z, 0.0, 1e-5));
    }

    #[cfg(feature = "emulated")]
    #[test]
    fn empty_screen_gaze_hits_nothing() {
        let (_input, mut session) = emulated_session(Size2D::new(0, 0));
        session.awake_default();
        session.update();

        let ray = session.eye_rays().unwrap().left;
        assert!(ray.is_finite());
        let behind = SphereCollider::new(Point3D::new(0.0, 0.0, -500.0), 1.0);
        let far_away = BoxCollider::new(Point3D::new(100.0, 100.0, 100.0), Point3D::new(101.0, 101.0, 101.0));
        assert!(!crate::gaze::is_looking_at(&mut session, &behind));
        assert!(!crate::gaze::is_looking_at(&mut session, &far_away));
    }
}
