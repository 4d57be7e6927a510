//! Least-recently-used cache of rasterized chunks.
//!
//! Sized and evicted independently of the chunk registry: the registry
//! drops chunks by distance, this cache drops textures by access order.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::Instant;

use image::RgbaImage;
use lru::LruCache;
use outland_world::ChunkCoord;
use serde::Serialize;
use tracing::trace;

pub struct ChunkTexture {
    pub image: RgbaImage,
    pub dirty: bool,
    pub last_accessed: Instant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextureCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

pub struct TextureCache {
    entries: LruCache<ChunkCoord, ChunkTexture>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl TextureCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Clean texture for `coord`, refreshing its recency. Dirty entries miss.
    pub fn get(&mut self, coord: ChunkCoord) -> Option<&RgbaImage> {
        match self.entries.get_mut(&coord) {
            Some(entry) if !entry.dirty => {
                entry.last_accessed = Instant::now();
                self.hits += 1;
                Some(&entry.image)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up without touching recency or counters.
    pub fn peek(&self, coord: ChunkCoord) -> Option<&ChunkTexture> {
        self.entries.peek(&coord)
    }

    /// `true` when a clean texture is cached.
    pub fn is_fresh(&self, coord: ChunkCoord) -> bool {
        self.entries.peek(&coord).is_some_and(|e| !e.dirty)
    }

    /// Store a texture. Returns the key evicted to make room, if any.
    pub fn set(&mut self, coord: ChunkCoord, image: RgbaImage) -> Option<ChunkCoord> {
        let entry = ChunkTexture {
            image,
            dirty: false,
            last_accessed: Instant::now(),
        };
        match self.entries.push(coord, entry) {
            Some((evicted, _)) if evicted != coord => {
                self.evictions += 1;
                trace!(chunk = %evicted, "texture evicted");
                Some(evicted)
            }
            _ => None,
        }
    }

    /// Drop textures whose chunk is not in `keys_to_keep`.
    pub fn cleanup(&mut self, keys_to_keep: &HashSet<ChunkCoord>) -> Vec<ChunkCoord> {
        let stale: Vec<ChunkCoord> = self
            .entries
            .iter()
            .map(|(coord, _)| *coord)
            .filter(|coord| !keys_to_keep.contains(coord))
            .collect();
        for coord in &stale {
            self.entries.pop(coord);
        }
        stale
    }

    pub fn mark_dirty(&mut self, coord: ChunkCoord) -> bool {
        match self.entries.peek_mut(&coord) {
            Some(entry) => {
                entry.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_dirty(&mut self) {
        for (_, entry) in self.entries.iter_mut() {
            entry.dirty = true;
        }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.entries.iter().map(|(coord, _)| *coord)
    }

    pub fn stats(&self) -> TextureCacheStats {
        TextureCacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            len: self.entries.len(),
            capacity: self.capacity(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
