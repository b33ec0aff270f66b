use euclid::default::{Point2D, Size2D};
use rust_fove_api::utils;
use rust_fove_api::{FoveGraphics, FoveMaterialId, FovePixelRect, FoveRenderTarget, FoveRenderTextureDesc,
                    FoveShader, FoveTextureId};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

pub type Pixel = [f32; 4];

const TRANSPARENT_BLACK: Pixel = [0.0, 0.0, 0.0, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl SoftwareTexture {
    pub fn new(width: u32, height: u32) -> SoftwareTexture {
        SoftwareTexture::filled(width, height, TRANSPARENT_BLACK)
    }

    pub fn filled(width: u32, height: u32, pixel: Pixel) -> SoftwareTexture {
        SoftwareTexture {
            width: width,
            height: height,
            pixels: vec![pixel; (width as usize) * (height as usize)],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = pixel;
    }

    // Nearest neighbour lookup in normalized coordinates, transparent
    // black outside the texture.
    fn sample(&self, uv: Point2D<f32>) -> Pixel {
        if uv.x < 0.0 || uv.y < 0.0 || uv.x >= 1.0 || uv.y >= 1.0 || self.pixels.is_empty() {
            return TRANSPARENT_BLACK;
        }
        let x = ((uv.x * self.width as f32) as u32).min(self.width - 1);
        let y = ((uv.y * self.height as f32) as u32).min(self.height - 1);
        self.pixel(x, y)
    }

    // Copies `source` scaled into `rect`. Same sized copies are exact.
    fn draw(&mut self, source: &SoftwareTexture, rect: FovePixelRect) {
        for y in 0..rect.height {
            for x in 0..rect.width {
                let (dx, dy) = (rect.x + x, rect.y + y);
                if dx >= self.width || dy >= self.height {
                    continue;
                }
                let pixel = if rect.width == source.width && rect.height == source.height {
                    source.pixel(x, y)
                } else {
                    let uv = Point2D::new((x as f32 + 0.5) / rect.width as f32,
                                          (y as f32 + 0.5) / rect.height as f32);
                    source.sample(uv)
                };
                self.set_pixel(dx, dy, pixel);
            }
        }
    }

    fn full_rect(&self) -> FovePixelRect {
        FovePixelRect::new(0, 0, self.width, self.height)
    }
}

struct SoftwareMaterial {
    shader: String,
    floats: HashMap<String, f32>,
}

impl SoftwareMaterial {
    fn float(&self, name: &str, default: f32) -> f32 {
        self.floats.get(name).cloned().unwrap_or(default)
    }
}

// Reference implementation of the barrel shader.
//
// Each output texel samples the source further out along its radius from
// the lens center, by `1 + factor * r²`. Red and blue sample at a scaled
// radius (offsets are in thousandths) to cancel the lens' chromatic
// aberration. `gamma_mod` is applied to the color channels last.
fn barrel_distort(source: &SoftwareTexture, material: &SoftwareMaterial) -> SoftwareTexture {
    let factor = material.float("_Factor", 0.0);
    let red = 1.0 + material.float("_redOffset", 0.0) * 0.001;
    let blue = 1.0 + material.float("_blueOffset", 0.0) * 0.001;
    let gamma = material.float("_gammaMod", 1.0);
    let center = Point2D::new(material.float("_xCenter", 0.5), material.float("_yCenter", 0.5));

    let mut output = SoftwareTexture::new(source.width, source.height);
    for y in 0..source.height {
        for x in 0..source.width {
            let uv = Point2D::new((x as f32 + 0.5) / source.width as f32,
                                  (y as f32 + 0.5) / source.height as f32);
            let offset = uv - center;
            let warped = offset * (1.0 + factor * offset.square_length());

            let g = source.sample(center + warped);
            let r = source.sample(center + warped * red);
            let b = source.sample(center + warped * blue);
            let pixel = [r[0].powf(gamma), g[1].powf(gamma), b[2].powf(gamma), g[3]];
            output.set_pixel(x, y, pixel);
        }
    }
    output
}

/// CPU graphics backend. Textures live in memory and blits run on the CPU,
/// including the barrel shader; capabilities can be switched off to exercise
/// fallback paths.
pub struct SoftwareGraphics {
    screen: SoftwareTexture,
    textures: HashMap<u32, SoftwareTexture>,
    materials: HashMap<u32, SoftwareMaterial>,
    supported_shaders: HashSet<String>,
    image_effects: bool,
    render_textures: bool,
    capability_queries: Cell<u32>,
    blit_count: u32,
}

impl SoftwareGraphics {
    pub fn new(screen_size: Size2D<u32>) -> SoftwareGraphics {
        let mut supported_shaders = HashSet::new();
        supported_shaders.insert(FoveShader::BARREL_SHADER_NAME.to_owned());
        SoftwareGraphics {
            screen: SoftwareTexture::new(screen_size.width, screen_size.height),
            textures: HashMap::new(),
            materials: HashMap::new(),
            supported_shaders: supported_shaders,
            image_effects: true,
            render_textures: true,
            capability_queries: Cell::new(0),
            blit_count: 0,
        }
    }

    pub fn set_image_effects_supported(&mut self, supported: bool) {
        self.image_effects = supported;
    }

    pub fn set_render_textures_supported(&mut self, supported: bool) {
        self.render_textures = supported;
    }

    pub fn set_shader_supported(&mut self, shader: &FoveShader, supported: bool) {
        if supported {
            self.supported_shaders.insert(shader.name.clone());
        } else {
            self.supported_shaders.remove(&shader.name);
        }
    }

    /// Uploads a texture, typically a camera's rendered frame.
    pub fn upload_texture(&mut self, texture: SoftwareTexture) -> FoveTextureId {
        let id = utils::new_id();
        self.textures.insert(id, texture);
        FoveTextureId(id)
    }

    pub fn texture(&self, texture: FoveTextureId) -> Option<&SoftwareTexture> {
        self.textures.get(&texture.0)
    }

    /// Destroys a texture behind the owner's back, like a host would on a
    /// device reset.
    pub fn invalidate_texture(&mut self, texture: FoveTextureId) {
        self.textures.remove(&texture.0);
    }

    pub fn screen(&self) -> &SoftwareTexture {
        &self.screen
    }

    pub fn material_float(&self, material: FoveMaterialId, name: &str) -> Option<f32> {
        self.materials.get(&material.0).and_then(|m| m.floats.get(name).cloned())
    }

    pub fn material_shader(&self, material: FoveMaterialId) -> Option<&str> {
        self.materials.get(&material.0).map(|m| m.shader.as_str())
    }

    /// Number of platform capability queries answered so far.
    pub fn capability_queries(&self) -> u32 {
        self.capability_queries.get()
    }

    pub fn blit_count(&self) -> u32 {
        self.blit_count
    }

    fn target_mut(&mut self, target: FoveRenderTarget) -> Option<&mut SoftwareTexture> {
        match target {
            FoveRenderTarget::Screen => Some(&mut self.screen),
            FoveRenderTarget::Texture(id) => self.textures.get_mut(&id.0),
        }
    }
}

impl FoveGraphics for SoftwareGraphics {
    fn supports_image_effects(&self) -> bool {
        self.capability_queries.set(self.capability_queries.get() + 1);
        self.image_effects
    }

    fn supports_render_textures(&self) -> bool {
        self.capability_queries.set(self.capability_queries.get() + 1);
        self.render_textures
    }

    fn is_shader_supported(&self, shader: &FoveShader) -> bool {
        self.capability_queries.set(self.capability_queries.get() + 1);
        self.supported_shaders.contains(&shader.name)
    }

    fn create_render_texture(&mut self, desc: &FoveRenderTextureDesc) -> FoveTextureId {
        self.upload_texture(SoftwareTexture::new(desc.width, desc.height))
    }

    fn is_render_texture_valid(&self, texture: FoveTextureId) -> bool {
        self.textures.contains_key(&texture.0)
    }

    fn create_material(&mut self, shader: &FoveShader) -> Option<FoveMaterialId> {
        if !self.supported_shaders.contains(&shader.name) {
            return None;
        }
        let id = utils::new_id();
        self.materials.insert(id, SoftwareMaterial {
            shader: shader.name.clone(),
            floats: HashMap::new(),
        });
        Some(FoveMaterialId(id))
    }

    fn set_material_float(&mut self, material: FoveMaterialId, name: &str, value: f32) {
        if let Some(material) = self.materials.get_mut(&material.0) {
            material.floats.insert(name.to_owned(), value);
        }
    }

    fn blit(&mut self, source: FoveTextureId, destination: FoveRenderTarget, material: Option<FoveMaterialId>) {
        let output = match self.textures.get(&source.0) {
            Some(texture) => match material.and_then(|m| self.materials.get(&m.0)) {
                Some(material) => barrel_distort(texture, material),
                None => texture.clone(),
            },
            None => {
                warn!("Blit from unknown texture {:?}", source);
                return;
            }
        };
        self.blit_count += 1;
        match self.target_mut(destination) {
            Some(target) => {
                let rect = target.full_rect();
                target.draw(&output, rect);
            }
            None => warn!("Blit into unknown target {:?}", destination),
        }
    }

    fn draw_texture(&mut self, rect: FovePixelRect, texture: FoveTextureId) {
        let source = match self.textures.get(&texture.0) {
            Some(source) => source.clone(),
            None => return,
        };
        self.screen.draw(&source, rect);
    }

    fn screen_size(&self) -> Size2D<u32> {
        Size2D::new(self.screen.width, self.screen.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Pixel = [1.0, 0.0, 0.0, 1.0];

    fn gradient(width: u32, height: u32) -> SoftwareTexture {
        let mut texture = SoftwareTexture::new(width, height);
        for y in 0..height {
            for x in 0..width {
                texture.set_pixel(x, y, [x as f32 / width as f32, y as f32 / height as f32, 0.25, 1.0]);
            }
        }
        texture
    }

    #[test]
    fn plain_blit_is_an_exact_copy() {
        let mut graphics = SoftwareGraphics::new(Size2D::new(8, 4));
        let source = graphics.upload_texture(gradient(8, 4));
        graphics.blit(source, FoveRenderTarget::Screen, None);
        assert_eq!(graphics.screen(), graphics.texture(source).unwrap());
        assert_eq!(graphics.blit_count(), 1);
    }

    #[test]
    fn barrel_material_keeps_center_and_darkens_corners() {
        let mut graphics = SoftwareGraphics::new(Size2D::new(16, 16));
        let source = graphics.upload_texture(SoftwareTexture::filled(16, 16, RED));
        let material = graphics.create_material(&FoveShader::barrel()).unwrap();
        assert_eq!(graphics.material_shader(material), Some(FoveShader::BARREL_SHADER_NAME));
        graphics.set_material_float(material, "_Factor", 1.4);

        graphics.blit(source, FoveRenderTarget::Screen, Some(material));
        assert_eq!(graphics.screen().pixel(8, 8), RED);
        assert_eq!(graphics.screen().pixel(0, 0), TRANSPARENT_BLACK);
    }

    #[test]
    fn unsupported_shader_has_no_material() {
        let mut graphics = SoftwareGraphics::new(Size2D::new(4, 4));
        let shader = FoveShader::new("Custom/Unknown");
        assert!(!graphics.is_shader_supported(&shader));
        assert!(graphics.create_material(&shader).is_none());
    }

    #[test]
    fn draw_texture_fills_only_its_rect() {
        let mut graphics = SoftwareGraphics::new(Size2D::new(8, 4));
        let texture = graphics.upload_texture(SoftwareTexture::filled(2, 2, RED));
        graphics.draw_texture(FovePixelRect::new(4, 0, 4, 4), texture);
        assert_eq!(graphics.screen().pixel(3, 2), TRANSPARENT_BLACK);
        assert_eq!(graphics.screen().pixel(4, 2), RED);
        assert_eq!(graphics.screen().pixel(7, 3), RED);
    }
}
