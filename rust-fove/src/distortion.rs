use rust_fove_api::{FoveCamera, FoveDistortionConfig, FoveDistortionParams, FoveError, FoveGraphics, FoveInput,
                    FoveKey, FoveMaterialId, FoveOutputMode, FovePixelRect, FoveRenderTarget,
                    FoveRenderTextureDesc, FoveResult, FoveShader, FoveTextureId, FoveViewport};

/// Lifecycle of a distortion stage between two enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistortionState {
    /// No capability check has run since the stage was enabled.
    Uninitialized,
    /// The platform and shader work, frames go through the barrel material.
    Supported,
    /// The check failed, frames are copied through untouched.
    Disabled,
}

enum StageState {
    Uninitialized,
    Supported(FoveMaterialId),
    Disabled(FoveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageOutput {
    Texture,
    Viewport,
}

/// Barrel distortion and chromatic correction for one eye camera.
///
/// The first `render` after the stage is enabled checks that the platform
/// supports image effects and render textures and that the barrel shader
/// is present and supported. A failed check is logged once and leaves the
/// stage disabled: every later frame is copied from source to destination
/// unchanged, with no further checks, until `enable` is called again.
///
/// In `ToTexture` mode the distorted frame goes to an owned offscreen
/// target which `composite` draws into the eye's half of the screen. In
/// `ToViewport` mode the camera renders straight into its half of the
/// screen; the stage then has to be the last effect on the camera.
pub struct DistortionStage {
    params: FoveDistortionParams,
    shader: Option<FoveShader>,
    editable: bool,
    state: StageState,
    target_desc: FoveRenderTextureDesc,
    target: Option<FoveTextureId>,
}

impl DistortionStage {
    pub fn new(config: FoveDistortionConfig) -> DistortionStage {
        DistortionStage {
            params: config.params,
            shader: config.shader,
            editable: config.editable,
            state: StageState::Uninitialized,
            target_desc: FoveRenderTextureDesc::eye_target(),
            target: None,
        }
    }

    /// Overrides the offscreen target attributes. Takes effect the next time
    /// the target is created.
    pub fn with_target_desc(mut self, desc: FoveRenderTextureDesc) -> DistortionStage {
        self.target_desc = desc;
        self
    }

    pub fn set_target_desc(&mut self, desc: FoveRenderTextureDesc) {
        self.target_desc = desc;
    }

    pub fn params(&self) -> &FoveDistortionParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FoveDistortionParams {
        &mut self.params
    }

    pub fn shader(&self) -> Option<&FoveShader> {
        self.shader.as_ref()
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// (Re-)enables the stage. The capability check runs again on the next
    /// render.
    pub fn enable(&mut self) {
        self.state = StageState::Uninitialized;
    }

    pub fn state(&self) -> DistortionState {
        match self.state {
            StageState::Uninitialized => DistortionState::Uninitialized,
            StageState::Supported(_) => DistortionState::Supported,
            StageState::Disabled(_) => DistortionState::Disabled,
        }
    }

    /// Why the stage disabled itself, if it did.
    pub fn error(&self) -> Option<&FoveError> {
        match self.state {
            StageState::Disabled(ref error) => Some(error),
            _ => None,
        }
    }

    /// The offscreen target, once created.
    pub fn render_target(&self) -> Option<FoveTextureId> {
        self.target
    }

    // The single place deciding where frames go. A disabled stage renders
    // like a viewport stage so its pass-through copy lands on screen.
    fn output(&self) -> StageOutput {
        if let StageState::Disabled(_) = self.state {
            return StageOutput::Viewport;
        }
        match self.params.output_mode {
            FoveOutputMode::ToTexture => StageOutput::Texture,
            FoveOutputMode::ToViewport => StageOutput::Viewport,
        }
    }

    /// Routes the camera before the scene renders: to the offscreen target
    /// with a full rect, or to the screen with the eye's half rect.
    pub fn prepare(&mut self, camera: &mut dyn FoveCamera, graphics: &mut dyn FoveGraphics) {
        match self.output() {
            StageOutput::Texture => {
                let target = self.ensure_target(graphics);
                camera.set_target_texture(Some(target));
                camera.set_rect(FoveViewport::FULL);
            }
            StageOutput::Viewport => {
                camera.set_target_texture(None);
                camera.set_rect(FoveViewport::half_for(self.params.eye));
            }
        }
    }

    /// Applies the effect to `source` and returns where the result was
    /// written.
    pub fn render(&mut self,
                  graphics: &mut dyn FoveGraphics,
                  source: FoveTextureId,
                  destination: FoveRenderTarget) -> FoveRenderTarget {
        let material = match self.check_resources(graphics) {
            Some(material) => material,
            None => {
                graphics.blit(source, destination, None);
                return destination;
            }
        };

        for &(name, value) in self.params.uniforms().iter() {
            graphics.set_material_float(material, name, value);
        }

        match self.output() {
            StageOutput::Texture => {
                let target = FoveRenderTarget::Texture(self.ensure_target(graphics));
                graphics.blit(source, target, Some(material));
                target
            }
            StageOutput::Viewport => {
                graphics.blit(source, destination, Some(material));
                destination
            }
        }
    }

    /// Draws the offscreen target into the eye's half of the screen. Does
    /// nothing unless the stage renders to a texture that exists.
    pub fn composite(&self, graphics: &mut dyn FoveGraphics) {
        if self.output() != StageOutput::Texture {
            return;
        }
        let target = match self.target {
            Some(target) if graphics.is_render_texture_valid(target) => target,
            _ => return,
        };
        let screen = graphics.screen_size();
        let rect = FovePixelRect::half_for(self.params.eye, screen.width, screen.height);
        graphics.draw_texture(rect, target);
    }

    /// Live tuning hotkeys, active only on editable stages. Holding left
    /// shift makes every step ten times finer.
    pub fn handle_input(&mut self, input: &dyn FoveInput) {
        if !self.editable {
            return;
        }

        let fine = input.key_held(FoveKey::LeftShift);
        let (offset_step, factor_step) = if fine { (0.0001, 0.001) } else { (0.001, 0.01) };

        let params = &mut self.params;
        if input.key_down(FoveKey::A) {
            params.blue_offset += offset_step;
        }
        if input.key_down(FoveKey::Z) {
            params.blue_offset -= offset_step;
        }
        if input.key_down(FoveKey::S) {
            params.red_offset += offset_step;
        }
        if input.key_down(FoveKey::X) {
            params.red_offset -= offset_step;
        }
        if input.key_down(FoveKey::D) {
            params.factor += factor_step;
        }
        if input.key_down(FoveKey::C) {
            params.factor -= factor_step;
        }
        if input.key_down(FoveKey::Return) {
            info!("Current shader values:\n--- BLUE OFFSET: {}\n--- RED  OFFSET: {}\n--- FACTOR: {}",
                  params.blue_offset, params.red_offset, params.factor);
        }
    }

    fn ensure_target(&mut self, graphics: &mut dyn FoveGraphics) -> FoveTextureId {
        if let Some(target) = self.target {
            if graphics.is_render_texture_valid(target) {
                return target;
            }
            debug!("Distortion target {:?} was invalidated, recreating it", target);
        }
        let target = graphics.create_render_texture(&self.target_desc);
        self.target = Some(target);
        target
    }

    fn check_resources(&mut self, graphics: &mut dyn FoveGraphics) -> Option<FoveMaterialId> {
        match self.state {
            StageState::Supported(material) => return Some(material),
            StageState::Disabled(_) => return None,
            StageState::Uninitialized => {}
        }

        match self.check_support(graphics) {
            Ok(material) => {
                self.state = StageState::Supported(material);
                Some(material)
            }
            Err(error) => {
                match error {
                    FoveError::MissingResource(_) => warn!("Barrel distortion ({:?} eye): {}", self.params.eye, error),
                    _ => error!("Barrel distortion ({:?} eye): {}", self.params.eye, error),
                }
                warn!("Barrel distortion ({:?} eye) has been disabled", self.params.eye);
                self.state = StageState::Disabled(error);
                None
            }
        }
    }

    fn check_support(&self, graphics: &mut dyn FoveGraphics) -> FoveResult<FoveMaterialId> {
        if !graphics.supports_image_effects() || !graphics.supports_render_textures() {
            return Err(FoveError::PlatformUnsupported("image effects or render textures".into()));
        }

        let shader = self.shader.as_ref()
            .ok_or_else(|| FoveError::MissingResource("barrel shader".into()))?;
        if !graphics.is_shader_supported(shader) {
            return Err(FoveError::PlatformUnsupported(format!("shader {}", shader.name)));
        }

        graphics.create_material(shader)
            .ok_or_else(|| FoveError::PlatformUnsupported(format!("material for shader {}", shader.name)))
    }
}

#[cfg(all(test, feature = "software"))]
mod tests {
    use super::*;
    use crate::api::{SoftwareCamera, SoftwareGraphics, SoftwareInput, SoftwareTexture};
    use euclid::default::Size2D;
    use rust_fove_api::FoveEye;

    const SCREEN: (u32, u32) = (16, 8);

    fn small_target() -> FoveRenderTextureDesc {
        FoveRenderTextureDesc {
            width: 8,
            height: 8,
            ..FoveRenderTextureDesc::eye_target()
        }
    }

    fn stage(eye: FoveEye, mode: FoveOutputMode) -> DistortionStage {
        let mut config = FoveDistortionConfig::default();
        config.params.eye = eye;
        config.params.output_mode = mode;
        DistortionStage::new(config).with_target_desc(small_target())
    }

    fn graphics() -> SoftwareGraphics {
        SoftwareGraphics::new(Size2D::new(SCREEN.0, SCREEN.1))
    }

    fn frame(graphics: &mut SoftwareGraphics) -> FoveTextureId {
        let mut texture = SoftwareTexture::new(SCREEN.0, SCREEN.1);
        for (i, pixel) in texture.pixels.iter_mut().enumerate() {
            *pixel = [i as f32 / 128.0, 0.5, 1.0 - i as f32 / 128.0, 1.0];
        }
        graphics.upload_texture(texture)
    }

    #[test]
    fn viewport_mode_uses_the_eye_half() {
        let mut graphics = graphics();
        let mut camera = SoftwareCamera::new("eye");

        stage(FoveEye::Left, FoveOutputMode::ToViewport).prepare(&mut camera, &mut graphics);
        assert_eq!(camera.rect(), FoveViewport::new(0.0, 0.0, 0.5, 1.0));
        assert_eq!(camera.target_texture(), None);

        stage(FoveEye::Right, FoveOutputMode::ToViewport).prepare(&mut camera, &mut graphics);
        assert_eq!(camera.rect(), FoveViewport::new(0.5, 0.0, 0.5, 1.0));
    }

    #[test]
    fn texture_mode_binds_the_offscreen_target() {
        let mut graphics = graphics();
        let mut camera = SoftwareCamera::new("eye");
        let mut stage = stage(FoveEye::Right, FoveOutputMode::ToTexture);

        stage.prepare(&mut camera, &mut graphics);
        let target = stage.render_target().unwrap();
        assert_eq!(camera.target_texture(), Some(target));
        assert_eq!(camera.rect(), FoveViewport::FULL);

        let source = frame(&mut graphics);
        let output = stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(output, FoveRenderTarget::Texture(target));
        assert_eq!(stage.state(), DistortionState::Supported);
        assert_eq!(stage.render_target(), Some(target));
    }

    #[test]
    fn offscreen_target_is_recreated_only_when_invalidated() {
        let mut graphics = graphics();
        let mut stage = stage(FoveEye::Left, FoveOutputMode::ToTexture);
        let source = frame(&mut graphics);

        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        let first = stage.render_target().unwrap();
        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(stage.render_target(), Some(first));

        graphics.invalidate_texture(first);
        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        let second = stage.render_target().unwrap();
        assert_ne!(first, second);
        assert!(graphics.is_render_texture_valid(second));
    }

    #[test]
    fn uniforms_are_uploaded_every_frame() {
        let mut graphics = graphics();
        let mut stage = stage(FoveEye::Left, FoveOutputMode::ToViewport);
        let source = frame(&mut graphics);

        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        stage.params_mut().factor = 1.9;
        stage.render(&mut graphics, source, FoveRenderTarget::Screen);

        let material = match stage.state {
            StageState::Supported(material) => material,
            _ => panic!("stage should be supported"),
        };
        assert_eq!(graphics.material_float(material, "_Factor"), Some(1.9));
        assert_eq!(graphics.material_float(material, "_blueOffset"), Some(8.0));
        assert_eq!(graphics.material_float(material, "_xCenter"), Some(0.5));
    }

    #[test]
    fn failed_check_passes_frames_through_without_rechecking() {
        let mut graphics = graphics();
        graphics.set_image_effects_supported(false);
        let mut stage = stage(FoveEye::Left, FoveOutputMode::ToTexture);
        let source = frame(&mut graphics);

        let output = stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(output, FoveRenderTarget::Screen);
        assert_eq!(stage.state(), DistortionState::Disabled);
        match stage.error() {
            Some(&FoveError::PlatformUnsupported(_)) => {}
            other => panic!("unexpected error {:?}", other),
        }
        let queries = graphics.capability_queries();

        // Support coming back does not matter until the stage is re-enabled.
        graphics.set_image_effects_supported(true);
        for _ in 0..3 {
            let output = stage.render(&mut graphics, source, FoveRenderTarget::Screen);
            assert_eq!(output, FoveRenderTarget::Screen);
            assert_eq!(graphics.screen(), graphics.texture(source).unwrap());
        }
        assert_eq!(graphics.capability_queries(), queries);
        assert_eq!(stage.render_target(), None);

        stage.enable();
        assert_eq!(stage.state(), DistortionState::Uninitialized);
        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(stage.state(), DistortionState::Supported);
        assert!(graphics.capability_queries() > queries);
    }

    #[test]
    fn disabled_stage_routes_camera_to_screen() {
        let mut graphics = graphics();
        graphics.set_render_textures_supported(false);
        let mut camera = SoftwareCamera::new("eye");
        let mut stage = stage(FoveEye::Right, FoveOutputMode::ToTexture);
        let source = frame(&mut graphics);

        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        stage.prepare(&mut camera, &mut graphics);
        assert_eq!(camera.target_texture(), None);
        assert_eq!(camera.rect(), FoveViewport::RIGHT_HALF);
    }

    #[test]
    fn missing_shader_disables_the_stage() {
        let mut graphics = graphics();
        let mut config = FoveDistortionConfig::default();
        config.shader = None;
        let mut stage = DistortionStage::new(config);
        let source = frame(&mut graphics);

        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(stage.error(), Some(&FoveError::MissingResource("barrel shader".into())));
        assert_eq!(graphics.screen(), graphics.texture(source).unwrap());
    }

    #[test]
    fn unsupported_shader_disables_the_stage() {
        let mut graphics = graphics();
        graphics.set_shader_supported(&FoveShader::barrel(), false);
        let mut stage = stage(FoveEye::Left, FoveOutputMode::ToViewport);
        let source = frame(&mut graphics);

        stage.render(&mut graphics, source, FoveRenderTarget::Screen);
        assert_eq!(stage.state(), DistortionState::Disabled);
    }

    #[test]
    fn composite_draws_into_the_eye_half() {
        let mut graphics = graphics();
        let mut stage = stage(FoveEye::Right, FoveOutputMode::ToTexture);
        let source = frame(&mut graphics);
        stage.render(&mut graphics, source, FoveRenderTarget::Screen);

        let before = graphics.screen().clone();
        stage.composite(&mut graphics);
        let after = graphics.screen();
        assert_eq!(after.pixel(0, 4), before.pixel(0, 4));
        let target = graphics.texture(stage.render_target().unwrap()).unwrap().clone();
        assert_eq!(after.pixel(SCREEN.0 / 2, 0), target.pixel(0, 0));
    }

    #[test]
    fn tuning_keys_adjust_params() {
        let input = SoftwareInput::new(Size2D::new(SCREEN.0, SCREEN.1));
        let mut config = FoveDistortionConfig::default();
        config.editable = true;
        let mut stage = DistortionStage::new(config);

        input.press_key(FoveKey::D);
        stage.handle_input(&input);
        input.end_tick();
        // Held, not pressed again: no change.
        stage.handle_input(&input);
        assert!((stage.params().factor - 1.41).abs() < 1e-6);

        input.release_key(FoveKey::D);
        input.press_key(FoveKey::LeftShift);
        input.press_key(FoveKey::Z);
        stage.handle_input(&input);
        assert!((stage.params().blue_offset - 7.9999).abs() < 1e-5);

        stage.set_editable(false);
        input.end_tick();
        input.release_key(FoveKey::Z);
        input.press_key(FoveKey::Z);
        stage.handle_input(&input);
        assert!((stage.params().blue_offset - 7.9999).abs() < 1e-5);
    }
}
