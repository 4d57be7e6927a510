//! Camera, visible bounds, chunk rasterization and frame composition.

pub mod camera;
pub mod compositor;
pub mod error;
pub mod palette;
pub mod rasterizer;
pub mod surface;
pub mod texture_cache;
pub mod viewport;

pub use camera::{Camera, DragController};
pub use compositor::{compose, FrameStats};
pub use error::RenderError;
pub use rasterizer::{draw_texture, ChunkRasterizer};
pub use surface::Surface;
pub use texture_cache::{ChunkTexture, TextureCache, TextureCacheStats};
pub use viewport::{Viewport, ViewportConfig};
