//! Tile and chunk generator.
//!
//! A tile's dominant biome is classified once from climate sampled at the
//! tile's origin block. Each block is then reclassified from the same
//! climate plus a high-frequency elevation detail layer, and blended
//! against the dominant biome near thresholds. Minority blocks inside a
//! tile are allowed.

use tracing::trace;

use crate::biome::Biome;
use crate::blend::{blend_block, blend_factor};
use crate::chunk::{Block, Chunk, ChunkCoord, Tile};
use crate::classifier::{BiomeClassifier, Climate};
use crate::config::GeneratorConfig;
use crate::error::WorldError;
use crate::noise::{Channel, NoiseSource};
use crate::world_data::WorldData;

/// Deterministic generator for one world seed.
pub struct WorldGenerator {
    config: GeneratorConfig,
    noise: NoiseSource,
    classifier: BiomeClassifier,
}

impl WorldGenerator {
    /// Validate the configuration and build a generator for `seed`.
    pub fn new(seed: &str, config: GeneratorConfig) -> Result<Self, WorldError> {
        if seed.trim().is_empty() {
            return Err(WorldError::EmptySeed);
        }
        config.validate()?;
        let noise = NoiseSource::new(seed, config.noise_cache_capacity);
        let classifier = BiomeClassifier::new(&config);
        Ok(Self {
            config,
            noise,
            classifier,
        })
    }

    pub fn for_world(world: &WorldData, config: GeneratorConfig) -> Result<Self, WorldError> {
        Self::new(world.seed(), config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn noise(&self) -> &NoiseSource {
        &self.noise
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Tile-scale climate at a world block position.
    pub fn climate_at(&self, block_x: f64, block_y: f64) -> Climate {
        let c = &self.config.climate;
        let sample = |frequency: f64, channel: Channel| {
            self.noise
                .fbm(block_x * frequency, block_y * frequency, channel, &c.octaves)
        };
        Climate {
            temperature: sample(c.temperature_frequency, Channel::Temperature),
            moisture: sample(c.moisture_frequency, Channel::Moisture),
            elevation: sample(c.elevation_frequency, Channel::Elevation),
            weirdness: sample(c.weirdness_frequency, Channel::Weirdness),
        }
    }

    /// Block-scale climate: tile-scale climate with the detail layer folded into elevation.
    pub fn block_climate_at(&self, block_x: f64, block_y: f64) -> Climate {
        let mut climate = self.climate_at(block_x, block_y);
        let detail = self.config.climate.detail;
        let extra = self.noise.noise(
            block_x * detail.frequency,
            block_y * detail.frequency,
            Channel::Detail,
        );
        climate.elevation = (climate.elevation + extra * detail.amplitude) / (1.0 + detail.amplitude);
        climate
    }

    /// Dominant biome of a tile, classified from its origin block.
    fn dominant_biome(&self, tile_x: i64, tile_y: i64) -> (Biome, Climate) {
        let n = self.config.blocks_per_tile as i64;
        let (bx, by) = ((tile_x * n) as f64, (tile_y * n) as f64);
        let climate = self.climate_at(bx, by);
        (self.classifier.classify(&self.noise, climate, bx, by), climate)
    }

    fn generate_block(&self, block_x: i64, block_y: i64, dominant: Biome) -> Block {
        let (fx, fy) = (block_x as f64, block_y as f64);
        let climate = self.block_climate_at(fx, fy);
        let local = self.classifier.classify(&self.noise, climate, fx, fy);
        let blend = blend_factor(
            &climate,
            self.classifier.thresholds(),
            self.config.blend.scale,
        );
        Block {
            biome: blend_block(local, dominant, blend, &self.config.blend),
            x: block_x,
            y: block_y,
            blend: blend as f32,
            elevation: climate.elevation as f32,
        }
    }

    /// Generate one tile at world tile coordinates.
    pub fn generate_tile(&self, tile_x: i64, tile_y: i64) -> Tile {
        let (biome, climate) = self.dominant_biome(tile_x, tile_y);
        let n = self.config.blocks_per_tile as usize;
        let origin_x = tile_x * n as i64;
        let origin_y = tile_y * n as i64;

        let mut blocks = Vec::with_capacity(n * n);
        for ly in 0..n {
            for lx in 0..n {
                blocks.push(self.generate_block(origin_x + lx as i64, origin_y + ly as i64, biome));
            }
        }

        let variant = self.noise.lattice_hash(tile_x, tile_y, Channel::Variant) % biome.variant_count();
        Tile {
            biome,
            x: tile_x,
            y: tile_y,
            variant,
            elevation: climate.elevation as f32,
            size: n,
            blocks,
        }
    }

    /// Generate a chunk. Identical inputs always yield identical chunks.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let size = self.config.chunk_size as usize;
        let origin_x = coord.x as i64 * size as i64;
        let origin_y = coord.y as i64 * size as i64;

        let mut tiles = Vec::with_capacity(size * size);
        for ly in 0..size {
            for lx in 0..size {
                tiles.push(self.generate_tile(origin_x + lx as i64, origin_y + ly as i64));
            }
        }
        trace!(chunk = %coord, tiles = tiles.len(), "chunk generated");
        Chunk { coord, size, tiles }
    }

    /// Biome of a single block, computed without generating its chunk.
    pub fn biome_at(&self, block_x: i64, block_y: i64) -> Biome {
        let (tile_x, tile_y) = self.tile_of_block(block_x, block_y);
        let (dominant, _) = self.dominant_biome(tile_x, tile_y);
        self.generate_block(block_x, block_y, dominant).biome
    }

    /// Tile coordinates containing a world block.
    pub fn tile_of_block(&self, block_x: i64, block_y: i64) -> (i64, i64) {
        let n = self.config.blocks_per_tile as i64;
        (block_x.div_euclid(n), block_y.div_euclid(n))
    }

    /// Chunk containing a world block.
    pub fn chunk_of_block(&self, block_x: i64, block_y: i64) -> ChunkCoord {
        let n = self.config.blocks_per_chunk() as i64;
        ChunkCoord::new(
            block_x.div_euclid(n) as i32,
            block_y.div_euclid(n) as i32,
        )
    }
}
