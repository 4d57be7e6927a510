//! Visible chunk bounds for a camera and a pixel viewport.

use outland_world::{ChunkBounds, GeneratorConfig};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Pixels per block side at zoom 1.
    pub block_size: u32,
    /// Preload margin in chunks around the visible rectangle.
    pub view_distance: i32,
    /// Extra chunks kept resident beyond the preload margin.
    pub eviction_buffer: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            block_size: 2,
            view_distance: 1,
            eviction_buffer: 4,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.block_size == 0 {
            return Err(RenderError::InvalidViewport("block_size must be positive".into()));
        }
        if self.view_distance < 0 {
            return Err(RenderError::InvalidViewport(
                "view_distance must not be negative".into(),
            ));
        }
        if self.eviction_buffer <= self.view_distance {
            return Err(RenderError::InvalidViewport(format!(
                "eviction_buffer ({}) must exceed view_distance ({})",
                self.eviction_buffer, self.view_distance
            )));
        }
        Ok(())
    }
}

/// Pixel geometry derived from the generator and viewport configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    config: ViewportConfig,
    tile_px: u32,
    chunk_px: u32,
}

impl Viewport {
    pub fn new(config: ViewportConfig, generator: &GeneratorConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let tile_px = (generator.blocks_per_tile as u32)
            .checked_mul(config.block_size)
            .ok_or_else(|| RenderError::InvalidViewport("tile pixel size overflows".into()))?;
        let chunk_px = (generator.chunk_size as u32)
            .checked_mul(tile_px)
            .ok_or_else(|| RenderError::InvalidViewport("chunk pixel size overflows".into()))?;
        Ok(Self {
            config,
            tile_px,
            chunk_px,
        })
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn block_size(&self) -> u32 {
        self.config.block_size
    }

    pub fn tile_pixel_size(&self) -> u32 {
        self.tile_px
    }

    /// Chunk side in pixels at zoom 1.
    pub fn chunk_pixel_size(&self) -> u32 {
        self.chunk_px
    }

    /// Chunks intersecting the pixel rectangle, without preload margin.
    pub fn visible_chunks(&self, camera: &Camera, width_px: u32, height_px: u32) -> ChunkBounds {
        let chunk_px = self.chunk_px as f64 * camera.zoom;
        let span = |offset: f64, extent: u32| -> (i32, i32) {
            let lo = -offset / chunk_px;
            let hi = (extent as f64 - offset) / chunk_px;
            (lo.floor() as i32, hi.ceil() as i32 - 1)
        };
        let (min_x, max_x) = span(camera.x, width_px);
        let (min_y, max_y) = span(camera.y, height_px);
        ChunkBounds::new(min_x, min_y, max_x, max_y)
    }

    /// Visible chunks expanded by the preload margin.
    pub fn compute_visible_bounds(
        &self,
        camera: &Camera,
        width_px: u32,
        height_px: u32,
    ) -> ChunkBounds {
        self.visible_chunks(camera, width_px, height_px)
            .expand(self.config.view_distance)
    }

    /// Top-left screen pixel of a chunk.
    pub fn chunk_screen_origin(&self, camera: &Camera, x: i32, y: i32) -> (f64, f64) {
        self.chunk_edge(camera, x as f64, y as f64)
    }

    /// Top-left and bottom-right screen corners of a chunk. The bottom-right
    /// corner is bit-identical to the origin of the diagonal neighbour.
    pub fn chunk_screen_rect(&self, camera: &Camera, x: i32, y: i32) -> ((f64, f64), (f64, f64)) {
        let (x, y) = (x as f64, y as f64);
        (self.chunk_edge(camera, x, y), self.chunk_edge(camera, x + 1.0, y + 1.0))
    }

    fn chunk_edge(&self, camera: &Camera, x: f64, y: f64) -> (f64, f64) {
        let chunk_px = self.chunk_px as f64 * camera.zoom;
        (x * chunk_px + camera.x, y * chunk_px + camera.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        let generator = GeneratorConfig {
            chunk_size: 4,
            blocks_per_tile: 4,
            ..GeneratorConfig::default()
        };
        Viewport::new(ViewportConfig::default(), &generator).unwrap()
    }

    #[test]
    fn pixel_sizes_follow_config() {
        let v = viewport();
        assert_eq!(v.tile_pixel_size(), 8);
        assert_eq!(v.chunk_pixel_size(), 32);

        let default = Viewport::new(ViewportConfig::default(), &GeneratorConfig::default()).unwrap();
        assert_eq!(default.chunk_pixel_size(), 12 * 16 * 2);
    }

    #[test]
    fn rejects_thrashing_buffer() {
        let config = ViewportConfig {
            view_distance: 3,
            eviction_buffer: 3,
            ..ViewportConfig::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidViewport(_))));
        let zero = ViewportConfig {
            block_size: 0,
            ..ViewportConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn exact_fit_covers_whole_chunks() {
        let v = viewport();
        let bounds = v.visible_chunks(&Camera::default(), 64, 32);
        assert_eq!(bounds, ChunkBounds::new(0, 0, 1, 0));
        let bounds = v.visible_chunks(&Camera::default(), 65, 33);
        assert_eq!(bounds, ChunkBounds::new(0, 0, 2, 1));
    }

    #[test]
    fn preload_margin_expands_bounds() {
        let v = viewport();
        let bounds = v.compute_visible_bounds(&Camera::default(), 64, 32);
        assert_eq!(bounds, ChunkBounds::new(-1, -1, 2, 1));
    }

    #[test]
    fn growing_viewport_never_shrinks_bounds() {
        let v = viewport();
        let camera = Camera::new(-13.0, 7.5);
        let mut previous = v.compute_visible_bounds(&camera, 1, 1);
        for size in 2..300 {
            let bounds = v.compute_visible_bounds(&camera, size, size);
            assert_eq!(bounds.min_x, previous.min_x);
            assert_eq!(bounds.min_y, previous.min_y);
            assert!(bounds.max_x >= previous.max_x, "width {size}");
            assert!(bounds.max_y >= previous.max_y, "height {size}");
            previous = bounds;
        }
    }

    #[test]
    fn panning_one_chunk_shifts_by_one() {
        let v = viewport();
        let step = v.chunk_pixel_size() as f64;
        for start in [0.0, -5.0, 17.0, -100.0] {
            let before = v.compute_visible_bounds(&Camera::new(start, start), 100, 70);
            let after = v.compute_visible_bounds(&Camera::new(start - step, start), 100, 70);
            assert_eq!(after.min_x, before.min_x + 1);
            assert_eq!(after.max_x, before.max_x + 1);
            assert_eq!((after.min_y, after.max_y), (before.min_y, before.max_y));
        }
    }

    #[test]
    fn zoom_scales_chunk_size() {
        let v = viewport();
        let camera = Camera {
            zoom: 2.0,
            ..Camera::default()
        };
        assert_eq!(v.visible_chunks(&camera, 64, 64), ChunkBounds::new(0, 0, 0, 0));
        assert_eq!(v.chunk_screen_origin(&camera, 1, -1), (64.0, -64.0));
    }

    #[test]
    fn neighbouring_rects_share_edges() {
        let v = viewport();
        let camera = Camera {
            x: 13.7,
            y: -5.3,
            zoom: 1.37,
        };
        for x in -5..5 {
            for y in -5..5 {
                let (_, bottom_right) = v.chunk_screen_rect(&camera, x, y);
                assert_eq!(bottom_right, v.chunk_screen_origin(&camera, x + 1, y + 1));
            }
        }
    }
}
