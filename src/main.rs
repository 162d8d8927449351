//! Bonnie Raster demo: two spinning cubes drawn by the software renderer
//!
//! Usage: `bonnie-raster [texture.png]`. Reads `bonnie-raster.ron` from the
//! working directory when present. Escape or Q quits.

use std::f32::consts::PI;
use std::path::Path;

use bonnie_raster::rasterizer as raster;
use bonnie_raster::VERSION;
use macroquad::prelude::*;
use raster::{Renderer, RendererConfig, TextureHandle};

const CONFIG_PATH: &str = "bonnie-raster.ron";
const DISPLAY_SCALE: f32 = 3.0;

/// Window size for a frame of the configured resolution
fn window_size(config: &RendererConfig) -> (i32, i32) {
    (
        (config.width as f32 * DISPLAY_SCALE) as i32,
        (config.height as f32 * DISPLAY_SCALE) as i32,
    )
}

fn window_conf() -> Conf {
    // Errors are reported once the app starts; the window just falls back to defaults
    let config = raster::load_config(CONFIG_PATH).unwrap_or_default();
    let (window_width, window_height) = window_size(&config);
    Conf {
        window_title: format!("Bonnie Raster v{}", VERSION),
        window_width,
        window_height,
        window_resizable: true,
        ..Default::default()
    }
}

/// Push two clockwise triangles for a quad listed clockwise as seen from outside
fn push_face(mesh: &mut Vec<raster::Vertex>, corners: [raster::Vec3; 4], color: raster::Vec3) {
    let uvs = [
        raster::Vec2::new(0.0, 1.0),
        raster::Vec2::new(1.0, 1.0),
        raster::Vec2::new(1.0, 0.0),
        raster::Vec2::new(0.0, 0.0),
    ];
    for i in [0, 1, 2, 0, 2, 3] {
        mesh.push(raster::Vertex::new(corners[i], color, uvs[i]));
    }
}

/// Unit cube (-1..1), one color per face
fn make_cube() -> Vec<raster::Vertex> {
    let v = raster::Vec3::new;
    let mut mesh = Vec::with_capacity(36);

    // Corners: top-left, top-right, bottom-right, bottom-left, viewed from outside
    push_face(&mut mesh, [v(-1.0, 1.0, -1.0), v(1.0, 1.0, -1.0), v(1.0, 1.0, 1.0), v(-1.0, 1.0, 1.0)], v(1.0, 0.0, 0.0));
    push_face(&mut mesh, [v(-1.0, -1.0, 1.0), v(1.0, -1.0, 1.0), v(1.0, -1.0, -1.0), v(-1.0, -1.0, -1.0)], v(0.0, 1.0, 1.0));
    push_face(&mut mesh, [v(1.0, 1.0, 1.0), v(1.0, 1.0, -1.0), v(1.0, -1.0, -1.0), v(1.0, -1.0, 1.0)], v(0.0, 1.0, 0.0));
    push_face(&mut mesh, [v(-1.0, 1.0, -1.0), v(-1.0, 1.0, 1.0), v(-1.0, -1.0, 1.0), v(-1.0, -1.0, -1.0)], v(1.0, 0.0, 1.0));
    push_face(&mut mesh, [v(1.0, 1.0, -1.0), v(-1.0, 1.0, -1.0), v(-1.0, -1.0, -1.0), v(1.0, -1.0, -1.0)], v(0.0, 0.0, 1.0));
    push_face(&mut mesh, [v(-1.0, 1.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, -1.0, 1.0), v(-1.0, -1.0, 1.0)], v(1.0, 1.0, 0.0));

    mesh
}

fn load_config() -> RendererConfig {
    if !Path::new(CONFIG_PATH).exists() {
        return RendererConfig::default();
    }
    match raster::load_config(CONFIG_PATH) {
        Ok(config) => {
            println!("Loaded {}: {}x{}", CONFIG_PATH, config.width, config.height);
            config
        }
        Err(e) => {
            println!("Failed to load {}: {}, using defaults", CONFIG_PATH, e);
            RendererConfig::default()
        }
    }
}

/// Texture from the first CLI argument, or a checkerboard
fn load_texture(renderer: &mut Renderer) -> raster::Result<TextureHandle> {
    let (width, height, bytes) = match std::env::args().nth(1) {
        Some(path) => {
            let data = std::fs::read(&path).map_err(image::ImageError::IoError)?;
            let decoded = raster::decode_texture_bytes(&data)?;
            println!("Loaded texture: {} ({}x{})", path, decoded.0, decoded.1);
            decoded
        }
        None => (32, 32, raster::checkerboard_bgra(32, 32, [255, 255, 255, 255], [40, 40, 40, 255])),
    };

    let handle = renderer.create_texture();
    renderer.update_texture(handle, width, height, &bytes)?;
    Ok(handle)
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = load_config();
    let mut renderer = Renderer::from_config(&config);

    let texture = match load_texture(&mut renderer) {
        Ok(handle) => handle,
        Err(e) => {
            println!("Texture setup failed: {}, drawing untextured", e);
            TextureHandle::NONE
        }
    };

    let cube1 = make_cube();
    let cube2 = make_cube();

    let aspect = renderer.width() as f32 / renderer.height() as f32;
    let projection = raster::mat4_perspective(45f32.to_radians(), aspect, 5.0, 20.0);

    let camera_radius = 12.0;
    let camera_angle = 45f32.to_radians();
    let eye = raster::Vec3::new(0.0, camera_radius * camera_angle.sin(), camera_radius * camera_angle.cos());
    let view = raster::mat4_look_at(eye, raster::Vec3::ZERO, raster::Vec3::UP);

    let mut rgba = vec![0u8; renderer.framebuffer().len()];
    let mut t = 0.0f32;

    println!("=== Bonnie Raster ===");

    loop {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }

        let spin = raster::mat4_rotation_y(PI * t);
        let model1 = raster::mat4_mul(&raster::mat4_scale(raster::Vec3::new(3.0, 3.0, 3.0)), &spin);
        let model2 = raster::mat4_mul(
            &raster::mat4_mul(&spin, &raster::mat4_translation(raster::Vec3::new(5.0, 0.0, 0.0))),
            &raster::mat4_rotation_y(PI),
        );

        let clear = config.clear_color;
        renderer.clear(clear.r, clear.g, clear.b);
        renderer.set_projection_matrix(projection);

        let draws = [(&cube1, model1, texture), (&cube2, model2, TextureHandle::NONE)];
        for (mesh, model, tex) in draws {
            renderer.set_view_model_matrix(raster::mat4_mul(&view, &model));
            let drawn = renderer
                .use_texture(tex)
                .and_then(|_| renderer.draw_triangle_list(mesh));
            if let Err(e) = drawn {
                println!("Draw failed: {}", e);
            }
        }

        // BGRA -> RGBA for upload
        for (dst, src) in rgba.chunks_exact_mut(4).zip(renderer.framebuffer().chunks_exact(4)) {
            dst.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
        }
        let frame = Texture2D::from_rgba8(renderer.width() as u16, renderer.height() as u16, &rgba);
        frame.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &frame,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        let stats = renderer.frame_stats();
        draw_text(
            &format!(
                "tris {} -> {} | culled {} | fragments {}",
                stats.triangles_submitted, stats.triangles_clipped, stats.triangles_culled, stats.fragments_written
            ),
            8.0,
            20.0,
            20.0,
            WHITE,
        );

        t += get_frame_time();
        next_frame().await;
    }
}
