//! Fixed-function software rasterizer
//!
//! Pipeline, per triangle list:
//! - Transform to homogeneous clip space (projection x view-model)
//! - Clip against the six planes `-w <= x, y, z <= w`, re-triangulating
//! - Perspective divide and viewport mapping (attributes kept as value / w)
//! - Edge-function scan conversion with perspective-correct interpolation,
//!   depth test, nearest texture sampling, alpha test and BGRA pixel write

mod clip;
mod config;
mod error;
mod math;
mod raster;
mod render;
mod texture;
mod transform;
mod types;
mod viewport;

pub use clip::*;
pub use config::*;
pub use error::*;
pub use math::*;
pub use raster::*;
pub use render::*;
pub use texture::*;
pub use transform::*;
pub use types::*;
pub use viewport::*;

/// Default frame dimensions (authentic PS1 resolution)
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
