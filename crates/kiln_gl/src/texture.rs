use std::fs;
use std::path::Path;

use glow::HasContext;

/// Decoded RGBA8 pixels, bottom row first (GL texture origin).
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {e}"))?
            .flipv()
            .to_rgba8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        })
    }

    pub fn read(path: &Path) -> Result<Self, String> {
        let bytes =
            fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::decode(&bytes).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Uploads into a new linearly filtered 2D texture, left bound.
    pub fn upload(&self, gl: &glow::Context) -> Result<glow::Texture, String> {
        unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| format!("Failed to create texture: {e}"))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                self.width as i32,
                self.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&self.pixels)),
            );
            Ok(texture)
        }
    }
}

/// Reads, flips and uploads an image file as a 2D texture.
pub fn load_texture(gl: &glow::Context, path: &Path) -> Result<glow::Texture, String> {
    let image = TextureImage::read(path)?;
    let texture = image.upload(gl)?;
    log::info!(
        "Loaded texture {} ({}x{})",
        path.display(),
        image.width,
        image.height
    );
    Ok(texture)
}
