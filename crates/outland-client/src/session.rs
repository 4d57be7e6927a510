//! One running world: camera, chunk residency, texture cache and surface.
//!
//! Pointer moves pan the camera immediately and schedule a debounced load
//! pass. A frame runs the pass when the debounce fires or when the camera
//! has outrun the preloaded region, rasterizes visible chunks that lack a
//! clean texture, then composites.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use image::RgbaImage;
use outland_render::{
    compose, Camera, ChunkRasterizer, DragController, FrameStats, RenderError, Surface,
    TextureCache, Viewport, ViewportConfig,
};
use outland_world::{
    Biome, BiomeStats, ChunkBounds, ChunkCoord, ChunkManager, GeneratorConfig, WorldData,
    WorldGenerator,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::debounce::LoadDebouncer;
use crate::error::SessionError;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub generator: GeneratorConfig,
    pub viewport: ViewportConfig,
    pub texture_cache_capacity: usize,
    pub debounce: Duration,
    pub width: u32,
    pub height: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            viewport: ViewportConfig::default(),
            texture_cache_capacity: 64,
            debounce: Duration::from_millis(50),
            width: 800,
            height: 600,
        }
    }
}

/// Values shown by the position/biome overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub camera_x: f64,
    pub camera_y: f64,
    pub zoom: f64,
    pub center_block: (i64, i64),
    pub center_chunk: ChunkCoord,
    pub center_biome: Biome,
    pub resident_chunks: usize,
    pub cached_textures: usize,
}

pub struct WorldSession {
    world: WorldData,
    chunks: ChunkManager,
    viewport: Viewport,
    camera: Camera,
    drag: DragController,
    rasterizer: ChunkRasterizer,
    textures: TextureCache,
    surface: Surface,
    debounce: LoadDebouncer,
    bounds: ChunkBounds,
    last_frame: FrameStats,
}

impl WorldSession {
    /// Build the generator and drawing surface, then load the initial view.
    pub fn new(world: WorldData, settings: SessionSettings) -> Result<Self, SessionError> {
        let generator = WorldGenerator::for_world(&world, settings.generator)?;
        let viewport = Viewport::new(settings.viewport, generator.config())?;
        let surface = Surface::new(settings.width, settings.height)?;

        let camera = Camera::default();
        let bounds = viewport.compute_visible_bounds(&camera, settings.width, settings.height);
        if settings.texture_cache_capacity < bounds.len() {
            warn!(
                capacity = settings.texture_cache_capacity,
                preload = bounds.len(),
                "texture cache smaller than preload area; textures will churn"
            );
        }

        info!(
            world = world.name(),
            difficulty = %world.difficulty(),
            width = settings.width,
            height = settings.height,
            "world session started"
        );

        let mut session = Self {
            world,
            chunks: ChunkManager::new(generator),
            rasterizer: ChunkRasterizer::new(viewport.block_size()),
            viewport,
            camera,
            drag: DragController::new(),
            textures: TextureCache::new(settings.texture_cache_capacity),
            surface,
            debounce: LoadDebouncer::new(settings.debounce),
            bounds,
            last_frame: FrameStats::default(),
        };
        session.load_chunks();
        Ok(session)
    }

    pub fn world(&self) -> &WorldData {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Preload bounds of the last load pass.
    pub fn bounds(&self) -> ChunkBounds {
        self.bounds
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn pointer_down(&mut self, px: f64, py: f64) {
        self.drag.start_drag(&self.camera, px, py);
    }

    /// Returns the new camera offset while dragging.
    pub fn pointer_move(&mut self, px: f64, py: f64, now: Instant) -> Option<(f64, f64)> {
        let offset = self.drag.update_drag(&mut self.camera, px, py)?;
        self.debounce.schedule(now);
        Some(offset)
    }

    pub fn pointer_up(&mut self) {
        self.drag.end_drag();
    }

    pub fn set_zoom(&mut self, zoom: f64, now: Instant) -> Result<(), SessionError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            let reason = format!("zoom must be positive, got {zoom}");
            return Err(RenderError::InvalidViewport(reason).into());
        }
        self.camera.zoom = zoom;
        self.debounce.schedule(now);
        Ok(())
    }

    /// Resize the surface, reload bounds immediately and force re-rendering.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        self.surface.resize(width, height)?;
        self.textures.mark_all_dirty();
        self.load_chunks();
        Ok(())
    }

    /// Advance one frame: load if due, rasterize what is missing, composite.
    pub fn frame(&mut self, now: Instant) -> FrameStats {
        let due = self.debounce.poll(now);
        let on_screen = self.on_screen_chunks();
        let outran = !on_screen.iter().all(|&c| self.bounds.contains(c));
        if due || outran {
            self.load_chunks();
        }
        self.rasterize(&on_screen);
        self.last_frame = compose(
            &mut self.surface,
            &self.camera,
            &self.viewport,
            &mut self.textures,
            &self.bounds,
        );
        self.last_frame
    }

    pub fn hud(&self) -> Hud {
        let block_size = self.viewport.block_size() as f64;
        let (wx, wy) = self.camera.screen_to_world(
            self.surface.width() as f64 / 2.0,
            self.surface.height() as f64 / 2.0,
            block_size,
        );
        let (bx, by) = (wx.floor() as i64, wy.floor() as i64);
        let generator = self.chunks.generator();
        let center_biome = self
            .chunks
            .block_at(bx, by)
            .map(|block| block.biome)
            .unwrap_or_else(|| generator.biome_at(bx, by));
        Hud {
            camera_x: self.camera.x,
            camera_y: self.camera.y,
            zoom: self.camera.zoom,
            center_block: (bx, by),
            center_chunk: generator.chunk_of_block(bx, by),
            center_biome,
            resident_chunks: self.chunks.len(),
            cached_textures: self.textures.len(),
        }
    }

    /// Tile counts per biome over resident chunks.
    pub fn biome_counts(&self) -> &BiomeStats {
        self.chunks.stats()
    }

    /// Clean cached textures keyed by `"x,y"`.
    pub fn rendered_chunks(&self) -> HashMap<String, &RgbaImage> {
        self.textures
            .keys()
            .filter_map(|coord| {
                let texture = self.textures.peek(coord)?;
                (!texture.dirty).then(|| (coord.to_string(), &texture.image))
            })
            .collect()
    }

    /// Release every chunk and texture.
    pub fn teardown(&mut self) {
        self.drag.end_drag();
        self.debounce.cancel();
        self.chunks.clear();
        self.textures.clear();
        self.chunks.generator().noise().clear_cache();
        info!(world = self.world.name(), "world session torn down");
    }

    fn on_screen_chunks(&self) -> Vec<ChunkCoord> {
        self.viewport
            .visible_chunks(&self.camera, self.surface.width(), self.surface.height())
            .iter()
            .collect()
    }

    fn load_chunks(&mut self) {
        self.debounce.cancel();
        self.bounds = self.viewport.compute_visible_bounds(
            &self.camera,
            self.surface.width(),
            self.surface.height(),
        );
        let update = self
            .chunks
            .update(&self.bounds, self.viewport.config().eviction_buffer);

        let resident: HashSet<ChunkCoord> = self.chunks.coords().collect();
        let dropped = self.textures.cleanup(&resident);

        let pending: Vec<ChunkCoord> = self.bounds.iter().collect();
        let rendered = self.rasterize(&pending);
        debug!(
            bounds = ?self.bounds,
            generated = update.generated.len(),
            evicted = update.evicted.len(),
            textures_dropped = dropped.len(),
            rendered,
            "load pass"
        );
    }

    /// Render resident chunks among `coords` that lack a clean texture.
    fn rasterize(&mut self, coords: &[ChunkCoord]) -> usize {
        let mut rendered = 0;
        for &coord in coords {
            if self.textures.is_fresh(coord) {
                continue;
            }
            if let Some(chunk) = self.chunks.get(coord) {
                let image = self.rasterizer.render_chunk(chunk);
                self.textures.set(coord, image);
                rendered += 1;
            }
        }
        rendered
    }
}
