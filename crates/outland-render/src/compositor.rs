//! Per-frame composition of cached chunk textures.
//!
//! Composition only blits; a chunk without a clean cached texture is
//! counted as missing and left as background.

use outland_world::ChunkBounds;
use serde::Serialize;

use crate::camera::Camera;
use crate::rasterizer::draw_texture;
use crate::surface::{Surface, BACKGROUND};
use crate::texture_cache::TextureCache;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    pub missing: usize,
}

/// Draw every chunk in `bounds` that intersects the surface.
pub fn compose(
    surface: &mut Surface,
    camera: &Camera,
    viewport: &Viewport,
    cache: &mut TextureCache,
    bounds: &ChunkBounds,
) -> FrameStats {
    surface.clear(BACKGROUND);
    let mut stats = FrameStats::default();
    let (width, height) = (surface.width() as f64, surface.height() as f64);

    for coord in bounds.iter() {
        let (top_left, bottom_right) = viewport.chunk_screen_rect(camera, coord.x, coord.y);
        let ((left, top), (right, bottom)) = (top_left, bottom_right);
        if right <= 0.0 || bottom <= 0.0 || left >= width || top >= height {
            stats.culled += 1;
            continue;
        }
        let Some(texture) = cache.get(coord) else {
            stats.missing += 1;
            continue;
        };
        if draw_texture(surface.image_mut(), texture, top_left, bottom_right) {
            stats.drawn += 1;
        } else {
            stats.culled += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::ChunkRasterizer;
    use crate::viewport::ViewportConfig;
    use image::{Rgba, RgbaImage};
    use outland_world::{ChunkCoord, GeneratorConfig, WorldGenerator};

    fn setup() -> (WorldGenerator, Viewport) {
        let config = GeneratorConfig {
            chunk_size: 2,
            blocks_per_tile: 2,
            ..GeneratorConfig::default()
        };
        let viewport = Viewport::new(ViewportConfig::default(), &config).unwrap();
        (WorldGenerator::new("compose", config).unwrap(), viewport)
    }

    #[test]
    fn draws_cached_and_culls_offscreen() {
        let (generator, viewport) = setup();
        let raster = ChunkRasterizer::new(viewport.block_size());
        let mut cache = TextureCache::new(16);
        let origin = ChunkCoord::new(0, 0);
        let texture = raster.render_chunk(&generator.generate_chunk(origin));
        cache.set(origin, texture.clone());

        let mut surface = Surface::new(8, 8).unwrap();
        let camera = Camera::default();
        let bounds = viewport.compute_visible_bounds(&camera, 8, 8);
        let stats = compose(&mut surface, &camera, &viewport, &mut cache, &bounds);

        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.missing, 0);
        assert_eq!(stats.culled, bounds.len() - 1);
        assert_eq!(surface.image().as_raw(), texture.as_raw());
    }

    #[test]
    fn missing_textures_are_not_rasterized() {
        let (_, viewport) = setup();
        let mut cache = TextureCache::new(4);
        let mut surface = Surface::new(16, 8).unwrap();
        let camera = Camera::default();
        let bounds = viewport.visible_chunks(&camera, 16, 8);
        let stats = compose(&mut surface, &camera, &viewport, &mut cache, &bounds);
        assert_eq!(stats, FrameStats { drawn: 0, culled: 0, missing: 2 });
        assert!(cache.is_empty());
        assert!(surface.image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn offset_camera_shifts_pixels() {
        let (generator, viewport) = setup();
        let raster = ChunkRasterizer::new(viewport.block_size());
        let mut cache = TextureCache::new(16);
        let coord = ChunkCoord::new(0, 0);
        let texture = raster.render_chunk(&generator.generate_chunk(coord));
        cache.set(coord, texture.clone());

        let mut surface = Surface::new(8, 8).unwrap();
        let camera = Camera::new(3.0, 2.0);
        let bounds = ChunkBounds::new(0, 0, 0, 0);
        compose(&mut surface, &camera, &viewport, &mut cache, &bounds);
        assert_eq!(surface.image().get_pixel(3, 2), texture.get_pixel(0, 0));
        assert_eq!(surface.image().get_pixel(7, 7), texture.get_pixel(4, 5));
        assert_eq!(*surface.image().get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn fractional_zoom_leaves_no_seams() {
        let config = GeneratorConfig {
            chunk_size: 4,
            blocks_per_tile: 4,
            ..GeneratorConfig::default()
        };
        let viewport = Viewport::new(ViewportConfig::default(), &config).unwrap();
        assert_eq!(viewport.chunk_pixel_size(), 32);

        let mut cache = TextureCache::new(8);
        for x in 0..6 {
            let shade = 40 + x as u8 * 30;
            let texture = RgbaImage::from_pixel(32, 32, Rgba([shade, 0, 0, 255]));
            cache.set(ChunkCoord::new(x, 0), texture);
        }

        let mut surface = Surface::new(200, 8).unwrap();
        let camera = Camera {
            zoom: 1.2,
            ..Camera::default()
        };
        let bounds = ChunkBounds::new(0, 0, 5, 0);
        let stats = compose(&mut surface, &camera, &viewport, &mut cache, &bounds);
        assert_eq!(stats.drawn, 6);

        let gaps: Vec<u32> = (0..200)
            .filter(|&x| *surface.image().get_pixel(x, 0) == BACKGROUND)
            .collect();
        assert!(gaps.is_empty(), "background visible at columns {gaps:?}");
        // 38.4 px per chunk, so chunk 1 starts at column 38
        assert_eq!(surface.image().get_pixel(37, 0).0[0], 40);
        assert_eq!(surface.image().get_pixel(38, 0).0[0], 70);
    }
}
