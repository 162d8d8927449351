//! Framebuffer and the renderer context
//!
//! `Renderer` owns every buffer the pipeline touches and exposes the
//! per-frame API: clear, set matrices, manage and bind textures, submit
//! triangle lists.

use super::clip::Clipper;
use super::config::RendererConfig;
use super::error::{RenderError, Result};
use super::math::{mat4_identity, Mat4, Vec3};
use super::raster::rasterize_triangle;
use super::texture::{Texture, TextureHandle, TextureStore};
use super::transform::{combined_transform, transform_vertices};
use super::types::{ClipVertex, Color, DrawStats, RasterSettings, Vertex};
use super::viewport::triangle_to_screen;

/// Color and depth targets for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // BGRA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer, +inf when cleared
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::INFINITY; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bgra();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f32::INFINITY);
    }

    /// Store a unit-range RGB color at pixel index `idx` (truncating, opaque)
    pub fn write_color(&mut self, idx: usize, color: Vec3) {
        let i = idx * 4;
        self.pixels[i] = (color.z * 255.0) as u8;
        self.pixels[i + 1] = (color.y * 255.0) as u8;
        self.pixels[i + 2] = (color.x * 255.0) as u8;
        self.pixels[i + 3] = 0xff;
    }
}

/// Fixed-function software renderer
pub struct Renderer {
    fb: Framebuffer,
    textures: TextureStore,
    projection: Mat4,
    view_model: Mat4,
    bound_texture: TextureHandle,
    settings: RasterSettings,
    frame_stats: DrawStats,

    // Per-draw scratch, kept to avoid reallocating every call
    clip_input: Vec<ClipVertex>,
    clipper: Clipper,
}

impl Renderer {
    /// Frame size is fixed for the renderer's lifetime
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            fb: Framebuffer::new(width, height),
            textures: TextureStore::new(),
            projection: mat4_identity(),
            view_model: mat4_identity(),
            bound_texture: TextureHandle::NONE,
            settings: RasterSettings::default(),
            frame_stats: DrawStats::default(),
            clip_input: Vec::new(),
            clipper: Clipper::new(),
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        let mut renderer = Self::new(config.width as usize, config.height as usize);
        renderer.settings = config.settings;
        renderer
    }

    pub fn width(&self) -> usize {
        self.fb.width
    }

    pub fn height(&self) -> usize {
        self.fb.height
    }

    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RasterSettings) {
        self.settings = settings;
    }

    /// Fill the color buffer (alpha forced to 255), reset depth to +inf
    /// and start a new set of frame statistics
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        self.fb.clear(Color::new(r, g, b));
        self.frame_stats = DrawStats::default();
    }

    pub fn set_projection_matrix(&mut self, matrix: Mat4) {
        self.projection = matrix;
    }

    pub fn set_view_model_matrix(&mut self, matrix: Mat4) {
        self.view_model = matrix;
    }

    /// Allocate a new, empty texture slot
    pub fn create_texture(&mut self) -> TextureHandle {
        let handle = self.textures.create();
        log::debug!("created texture {}", handle.0);
        handle
    }

    /// Replace a texture's size and contents; `bgra8` holds 4 bytes per texel
    pub fn update_texture(&mut self, handle: TextureHandle, width: u32, height: u32, bgra8: &[u8]) -> Result<()> {
        self.textures.update(handle, width, height, bgra8)?;
        log::debug!("updated texture {} ({}x{})", handle.0, width, height);
        Ok(())
    }

    /// Free a texture's samples. The handle is retired, never reissued.
    pub fn destroy_texture(&mut self, handle: TextureHandle) -> Result<()> {
        self.textures.destroy(handle)?;
        log::debug!("destroyed texture {}", handle.0);
        Ok(())
    }

    /// Bind a texture for subsequent draws; `TextureHandle::NONE` unbinds
    pub fn use_texture(&mut self, handle: TextureHandle) -> Result<()> {
        if !handle.is_none() && !self.textures.contains(handle) {
            return Err(RenderError::InvalidTextureHandle(handle.0));
        }
        self.bound_texture = handle;
        Ok(())
    }

    pub fn bound_texture(&self) -> TextureHandle {
        self.bound_texture
    }

    pub fn texture(&self, handle: TextureHandle) -> Result<&Texture> {
        self.textures.get(handle)
    }

    /// Run the full pipeline over a triangle list.
    ///
    /// The list length must be a multiple of 3; otherwise nothing is drawn.
    pub fn draw_triangle_list(&mut self, vertices: &[Vertex]) -> Result<DrawStats> {
        if vertices.len() % 3 != 0 {
            return Err(RenderError::IncompleteTriangleList { len: vertices.len() });
        }

        let mut stats = DrawStats {
            triangles_submitted: vertices.len() / 3,
            ..Default::default()
        };

        let transform = combined_transform(&self.projection, &self.view_model);
        transform_vertices(&transform, vertices, &mut self.clip_input);
        stats.negative_w_intersections = self.clipper.clip(&self.clip_input);

        // A destroyed texture stays bindable but samples as unbound
        let texture = if self.bound_texture.is_none() {
            None
        } else {
            self.textures.get(self.bound_texture).ok().filter(|t| !t.is_empty())
        };

        let (width, height) = (self.fb.width, self.fb.height);
        for tri in self.clipper.output().chunks_exact(3) {
            stats.triangles_clipped += 1;
            match triangle_to_screen(tri, width, height) {
                Some(screen) => rasterize_triangle(&mut self.fb, &screen, texture, &self.settings, &mut stats),
                None => stats.triangles_degenerate += 1,
            }
        }

        log::trace!(
            "draw: {} submitted, {} after clip, {} culled, {} fragments",
            stats.triangles_submitted,
            stats.triangles_clipped,
            stats.triangles_culled,
            stats.fragments_written
        );

        self.frame_stats += stats;
        Ok(stats)
    }

    /// Color buffer, (B, G, R, A) per pixel, top row first
    pub fn framebuffer(&self) -> &[u8] {
        &self.fb.pixels
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.fb.zbuffer
    }

    /// Totals since the last `clear`
    pub fn frame_stats(&self) -> DrawStats {
        self.frame_stats
    }
}
