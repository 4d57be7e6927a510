//! Registry of resident chunks.
//!
//! Chunks are generated on first request and dropped once they drift more
//! than a buffer away from the requested bounds. Generation is synchronous;
//! a chunk is either absent or resident.

use std::collections::HashMap;

use tracing::debug;

use crate::chunk::{Block, Chunk, ChunkBounds, ChunkCoord};
use crate::generator::WorldGenerator;
use crate::stats::BiomeStats;

/// Outcome of one load pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamUpdate {
    pub generated: Vec<ChunkCoord>,
    pub evicted: Vec<ChunkCoord>,
}

pub struct ChunkManager {
    generator: WorldGenerator,
    chunks: HashMap<ChunkCoord, Chunk>,
    stats: BiomeStats,
}

impl ChunkManager {
    pub fn new(generator: WorldGenerator) -> Self {
        Self {
            generator,
            chunks: HashMap::new(),
            stats: BiomeStats::new(),
        }
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    /// Return the resident chunk, generating it first if needed.
    pub fn get_or_generate(&mut self, coord: ChunkCoord) -> &Chunk {
        let generator = &self.generator;
        let stats = &mut self.stats;
        self.chunks.entry(coord).or_insert_with(|| {
            let chunk = generator.generate_chunk(coord);
            stats.add_chunk(&chunk);
            chunk
        })
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn stats(&self) -> &BiomeStats {
        &self.stats
    }

    /// Generate every missing chunk inside `bounds`. Returns the new coordinates.
    pub fn ensure_loaded(&mut self, bounds: &ChunkBounds) -> Vec<ChunkCoord> {
        let mut generated = Vec::new();
        for coord in bounds.iter() {
            if !self.chunks.contains_key(&coord) {
                self.get_or_generate(coord);
                generated.push(coord);
            }
        }
        generated
    }

    /// Drop chunks whose Chebyshev distance to `bounds` exceeds `buffer`.
    pub fn evict_far_chunks(&mut self, bounds: &ChunkBounds, buffer: i32) -> Vec<ChunkCoord> {
        let buffer = buffer.max(0) as i64;
        let far: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|&coord| bounds.chebyshev_distance(coord) > buffer)
            .collect();
        for coord in &far {
            if let Some(chunk) = self.chunks.remove(coord) {
                self.stats.remove_chunk(&chunk);
            }
        }
        far
    }

    /// One load pass: fill `bounds`, then evict beyond `buffer`.
    pub fn update(&mut self, bounds: &ChunkBounds, buffer: i32) -> StreamUpdate {
        let generated = self.ensure_loaded(bounds);
        let evicted = self.evict_far_chunks(bounds, buffer);
        if !generated.is_empty() || !evicted.is_empty() {
            debug!(
                generated = generated.len(),
                evicted = evicted.len(),
                resident = self.chunks.len(),
                "chunk load pass"
            );
        }
        StreamUpdate { generated, evicted }
    }

    /// Resident block at world block coordinates.
    pub fn block_at(&self, block_x: i64, block_y: i64) -> Option<&Block> {
        let coord = self.generator.chunk_of_block(block_x, block_y);
        let chunk = self.chunks.get(&coord)?;
        let n = self.generator.config().blocks_per_chunk() as i64;
        let local_x = block_x.rem_euclid(n) as usize;
        let local_y = block_y.rem_euclid(n) as usize;
        Some(chunk.block(local_x, local_y))
    }

    /// Drop every resident chunk and reset the statistics.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.stats.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn manager() -> ChunkManager {
        let config = GeneratorConfig {
            chunk_size: 2,
            blocks_per_tile: 2,
            ..GeneratorConfig::default()
        };
        ChunkManager::new(WorldGenerator::new("manager", config).unwrap())
    }

    fn total_tiles(manager: &ChunkManager) -> u64 {
        manager.chunks().map(|c| c.tiles.len() as u64).sum()
    }

    #[test]
    fn get_or_generate_is_idempotent() {
        let mut m = manager();
        let first = m.get_or_generate(ChunkCoord::new(1, 1)).clone();
        let second = m.get_or_generate(ChunkCoord::new(1, 1)).clone();
        assert_eq!(first, second);
        assert_eq!(m.len(), 1);
        assert_eq!(m.stats().total(), 4);
    }

    #[test]
    fn ensure_loaded_reports_only_new_chunks() {
        let mut m = manager();
        let bounds = ChunkBounds::new(0, 0, 1, 1);
        assert_eq!(m.ensure_loaded(&bounds).len(), 4);
        assert!(m.ensure_loaded(&bounds).is_empty());
        let wider = ChunkBounds::new(0, 0, 2, 1);
        assert_eq!(
            m.ensure_loaded(&wider),
            vec![ChunkCoord::new(2, 0), ChunkCoord::new(2, 1)]
        );
    }

    #[test]
    fn eviction_respects_buffer() {
        let mut m = manager();
        m.ensure_loaded(&ChunkBounds::new(-5, 0, 5, 0));
        let evicted = m.evict_far_chunks(&ChunkBounds::new(0, 0, 0, 0), 2);
        assert_eq!(evicted.len(), 6);
        assert!(m.contains(ChunkCoord::new(-2, 0)));
        assert!(m.contains(ChunkCoord::new(2, 0)));
        assert!(!m.contains(ChunkCoord::new(3, 0)));
        assert_eq!(m.stats().total(), total_tiles(&m));
    }

    #[test]
    fn visible_chunks_survive_every_pan() {
        let mut m = manager();
        let mut bounds = ChunkBounds::new(0, 0, 2, 2);
        let pans = [(1, 0), (5, 0), (0, -3), (-7, 2), (0, 0), (12, 12)];
        for (dx, dy) in pans {
            bounds = ChunkBounds::new(
                bounds.min_x + dx,
                bounds.min_y + dy,
                bounds.max_x + dx,
                bounds.max_y + dy,
            );
            m.update(&bounds, 4);
            for coord in bounds.iter() {
                assert!(m.contains(coord), "{coord} missing after pan");
            }
            assert!(m.coords().all(|c| bounds.chebyshev_distance(c) <= 4));
            assert_eq!(m.stats().total(), total_tiles(&m));
        }
    }

    #[test]
    fn stats_track_generation_and_eviction() {
        let mut m = manager();
        m.ensure_loaded(&ChunkBounds::new(0, 0, 1, 0));
        let mut expected = BiomeStats::new();
        for chunk in m.chunks() {
            expected.add_chunk(chunk);
        }
        assert_eq!(m.stats(), &expected);

        m.evict_far_chunks(&ChunkBounds::new(10, 10, 10, 10), 0);
        assert!(m.is_empty());
        assert_eq!(m.stats().total(), 0);
        assert_eq!(m.stats().iter().count(), 0);
    }

    #[test]
    fn block_lookup_reads_resident_chunks() {
        let mut m = manager();
        assert!(m.block_at(-1, -1).is_none());
        m.get_or_generate(ChunkCoord::new(-1, -1));
        let block = m.block_at(-1, -1).unwrap();
        assert_eq!((block.x, block.y), (-1, -1));
        assert_eq!(block.biome, m.generator().biome_at(-1, -1));
    }

    #[test]
    fn clear_empties_registry() {
        let mut m = manager();
        m.ensure_loaded(&ChunkBounds::new(0, 0, 2, 2));
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.stats(), &BiomeStats::new());
    }
}
