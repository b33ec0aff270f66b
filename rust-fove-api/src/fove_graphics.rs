use crate::{FovePixelRect, FoveShader};
use euclid::default::Size2D;

/// Handle to a host texture or render texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoveTextureId(pub u32);

/// Handle to a host material instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoveMaterialId(pub u32);

/// Destination of a blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoveRenderTarget {
    /// Whatever the camera renders to when no texture is bound.
    Screen,
    Texture(FoveTextureId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoveTextureFormat {
    ARGB32,
    ARGBHalf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoveFilterMode {
    Point,
    Bilinear,
    Trilinear,
}

/// Attributes of an offscreen render texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoveRenderTextureDesc {
    pub width: u32,
    pub height: u32,
    pub depth_bits: u32,
    pub format: FoveTextureFormat,
    pub filter_mode: FoveFilterMode,
    pub use_mip_map: bool,
    pub aniso_level: u32,
}

impl FoveRenderTextureDesc {
    /// The per-eye target of the distortion stage.
    pub fn eye_target() -> FoveRenderTextureDesc {
        FoveRenderTextureDesc {
            width: 1792,
            height: 2016,
            depth_bits: 0,
            format: FoveTextureFormat::ARGBHalf,
            filter_mode: FoveFilterMode::Trilinear,
            use_mip_map: false,
            aniso_level: 0,
        }
    }
}

/// GPU capabilities and resources of the host.
pub trait FoveGraphics {
    fn supports_image_effects(&self) -> bool;

    fn supports_render_textures(&self) -> bool;

    /// Whether `shader` compiles on this platform.
    fn is_shader_supported(&self, shader: &FoveShader) -> bool;

    fn create_render_texture(&mut self, desc: &FoveRenderTextureDesc) -> FoveTextureId;

    /// False once the host destroyed or resized the texture behind the
    /// handle.
    fn is_render_texture_valid(&self, texture: FoveTextureId) -> bool;

    /// Returns `None` if the host could not build a material.
    fn create_material(&mut self, shader: &FoveShader) -> Option<FoveMaterialId>;

    fn set_material_float(&mut self, material: FoveMaterialId, name: &str, value: f32);

    /// Copies `source` into `destination`, through `material` if given.
    fn blit(&mut self, source: FoveTextureId, destination: FoveRenderTarget, material: Option<FoveMaterialId>);

    /// Draws `texture` scaled and cropped into `rect` on screen.
    fn draw_texture(&mut self, rect: FovePixelRect, texture: FoveTextureId);

    fn screen_size(&self) -> Size2D<u32>;
}
