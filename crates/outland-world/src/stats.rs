//! Running tile counts per dominant biome over the resident chunks.

use crate::biome::Biome;
use crate::chunk::Chunk;

/// Updated as chunks enter and leave the registry; never rescans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomeStats {
    counts: [u64; Biome::COUNT],
    total: u64,
}

impl Default for BiomeStats {
    fn default() -> Self {
        Self {
            counts: [0; Biome::COUNT],
            total: 0,
        }
    }
}

impl BiomeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chunk(&mut self, chunk: &Chunk) {
        for (slot, n) in self.counts.iter_mut().zip(chunk.biome_counts()) {
            *slot += n;
            self.total += n;
        }
    }

    pub fn remove_chunk(&mut self, chunk: &Chunk) {
        for (slot, n) in self.counts.iter_mut().zip(chunk.biome_counts()) {
            debug_assert!(*slot >= n, "biome stats underflow");
            *slot = slot.saturating_sub(n);
            self.total = self.total.saturating_sub(n);
        }
    }

    pub fn count(&self, biome: Biome) -> u64 {
        self.counts[biome.index()]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Biomes with at least one resident tile.
    pub fn iter(&self) -> impl Iterator<Item = (Biome, u64)> + '_ {
        Biome::ALL
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, &n)| n > 0)
            .map(|(&b, &n)| (b, n))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
