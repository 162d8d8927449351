//! Textures and the texture store
//!
//! Samples are floats in [0, 1] stored as (B, G, R, A), the same channel
//! order as the framebuffer. Slots in the store are append-only: a handle
//! is never handed out twice, even after its texture is destroyed.

use super::error::{RenderError, Result};

/// Opaque 1-based texture handle. `TextureHandle::NONE` (0) means unbound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const NONE: TextureHandle = TextureHandle(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Decoded texture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    /// Row-major, top row first, 4 samples per texel (B, G, R, A)
    samples: Vec<f32>,
}

impl Texture {
    /// Build from 8-bit (B, G, R, A) texels
    pub fn from_bgra8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(RenderError::TextureSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples: bytes.iter().map(|&b| b as f32 / 255.0).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Destroyed or never filled
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Nearest-texel lookup with wrap-around addressing.
    ///
    /// `v = 0` is the bottom row. Returns `None` for an empty texture.
    pub fn sample(&self, u: f32, v: f32) -> Option<[f32; 4]> {
        if self.is_empty() {
            return None;
        }

        let u = wrap_unit(u);
        let v = wrap_unit(v);

        // Clamp covers wrap_unit rounding up to exactly 1.0 and v == 0 mapping to `height`
        let tx = ((self.width as f32 * u).floor() as u32).min(self.width - 1);
        let ty = ((self.height as f32 * (1.0 - v)).floor() as u32).min(self.height - 1);

        let idx = (ty as usize * self.width as usize + tx as usize) * 4;
        match self.samples.get(idx..idx + 4)? {
            &[b, g, r, a] => Some([b, g, r, a]),
            _ => None,
        }
    }
}

/// Wrap a texture coordinate into [0, 1)
fn wrap_unit(c: f32) -> f32 {
    if !c.is_finite() {
        return 0.0;
    }
    let mut w = c % 1.0;
    if w < 0.0 {
        w += 1.0;
    }
    w
}

/// Append-only texture slots addressed by 1-based handles
#[derive(Debug, Default)]
pub struct TextureStore {
    slots: Vec<Texture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty slot and return its handle
    pub fn create(&mut self) -> TextureHandle {
        self.slots.push(Texture::default());
        TextureHandle(self.slots.len() as u32)
    }

    /// Replace a slot's dimensions and contents
    pub fn update(&mut self, handle: TextureHandle, width: u32, height: u32, bgra8: &[u8]) -> Result<()> {
        let texture = Texture::from_bgra8(width, height, bgra8)?;
        *self.slot_mut(handle)? = texture;
        Ok(())
    }

    /// Reset a slot to empty; the handle is retired, not recycled
    pub fn destroy(&mut self, handle: TextureHandle) -> Result<()> {
        *self.slot_mut(handle)? = Texture::default();
        Ok(())
    }

    /// Look up a live handle. `NONE` and out-of-range handles are errors.
    pub fn get(&self, handle: TextureHandle) -> Result<&Texture> {
        if handle.is_none() {
            return Err(RenderError::InvalidTextureHandle(handle.0));
        }
        self.slots
            .get(handle.0 as usize - 1)
            .ok_or(RenderError::InvalidTextureHandle(handle.0))
    }

    /// Whether `handle` names an allocated slot (empty or not)
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.get(handle).is_ok()
    }

    fn slot_mut(&mut self, handle: TextureHandle) -> Result<&mut Texture> {
        if handle.is_none() {
            return Err(RenderError::InvalidTextureHandle(handle.0));
        }
        self.slots
            .get_mut(handle.0 as usize - 1)
            .ok_or(RenderError::InvalidTextureHandle(handle.0))
    }
}

/// Decode PNG/JPEG/BMP bytes into (width, height, BGRA8 texels)
pub fn decode_texture_bytes(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    use image::GenericImageView;

    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();

    let mut bgra = Vec::with_capacity(width as usize * height as usize * 4);
    for p in rgba.pixels() {
        bgra.extend_from_slice(&[p[2], p[1], p[0], p[3]]);
    }

    Ok((width, height, bgra))
}

/// Checkerboard test texture in BGRA8, 4x4-texel cells
pub fn checkerboard_bgra(width: u32, height: u32, color1: [u8; 4], color2: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let checker = ((x / 4) + (y / 4)) % 2 == 0;
            bytes.extend_from_slice(if checker { &color1 } else { &color2 });
        }
    }
    bytes
}
