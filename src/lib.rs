//! Bonnie Raster: fixed-function software rasterizer
//!
//! Renders triangle lists into a BGRA framebuffer and a depth buffer on the
//! CPU, with homogeneous clipping, perspective-correct interpolation, nearest
//! texture sampling and alpha testing. Windowing and presentation are left to
//! the caller (see the demo binary).

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;

pub use rasterizer::*;
