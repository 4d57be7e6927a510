//! Chunk, tile and block data structures.
//!
//! Tiles and blocks are stored row-major in flat vectors: index `y * n + x`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::WorldError;

/// Canonical chunk identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// `"x,y"`, the string key used at storage-map boundaries.
impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for ChunkCoord {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorldError::InvalidChunkKey(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            x: x.trim().parse().map_err(|_| invalid())?,
            y: y.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Inclusive rectangle of chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ChunkBounds {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && (self.min_y..=self.max_y).contains(&coord.y)
    }

    /// Chebyshev distance from `coord` to the rectangle. Zero inside.
    pub fn chebyshev_distance(&self, coord: ChunkCoord) -> i64 {
        let axis = |v: i32, lo: i32, hi: i32| -> i64 {
            let (v, lo, hi) = (v as i64, lo as i64, hi as i64);
            if v < lo {
                lo - v
            } else if v > hi {
                v - hi
            } else {
                0
            }
        };
        axis(coord.x, self.min_x, self.max_x).max(axis(coord.y, self.min_y, self.max_y))
    }

    /// Grow by `margin` chunks on all sides.
    pub fn expand(&self, margin: i32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(margin),
            min_y: self.min_y.saturating_sub(margin),
            max_x: self.max_x.saturating_add(margin),
            max_y: self.max_y.saturating_add(margin),
        }
    }

    pub fn width(&self) -> i64 {
        (self.max_x as i64 - self.min_x as i64 + 1).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.max_y as i64 - self.min_y as i64 + 1).max(0)
    }

    pub fn len(&self) -> usize {
        (self.width() * self.height()) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..=self.max_y)
            .flat_map(move |y| (min_x..=max_x).map(move |x| ChunkCoord::new(x, y)))
    }
}

/// Finest terrain unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub biome: Biome,
    /// World block coordinates.
    pub x: i64,
    pub y: i64,
    /// Proximity to a classification boundary in `[0, 1]`; low means close.
    pub blend: f32,
    pub elevation: f32,
}

/// Mid-level terrain unit: a dominant biome over an `n x n` block grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub biome: Biome,
    /// World tile coordinates.
    pub x: i64,
    pub y: i64,
    pub variant: u32,
    pub elevation: f32,
    /// Blocks per side.
    pub size: usize,
    pub blocks: Vec<Block>,
}

impl Tile {
    /// Block at tile-local coordinates.
    pub fn block(&self, lx: usize, ly: usize) -> &Block {
        debug_assert!(lx < self.size && ly < self.size);
        &self.blocks[ly * self.size + lx]
    }

    /// Biome held by the most blocks. Ties go to the earliest biome in [`Biome::ALL`].
    pub fn majority_biome(&self) -> Biome {
        let mut counts = [0usize; Biome::COUNT];
        for block in &self.blocks {
            counts[block.biome.index()] += 1;
        }
        let mut best = 0;
        for (i, &count) in counts.iter().enumerate() {
            if count > counts[best] {
                best = i;
            }
        }
        Biome::ALL[best]
    }
}

/// Unit of generation, caching and eviction: `size x size` tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub coord: ChunkCoord,
    /// Tiles per side.
    pub size: usize,
    pub tiles: Vec<Tile>,
}

impl Chunk {
    /// Tile at chunk-local coordinates.
    pub fn tile(&self, lx: usize, ly: usize) -> &Tile {
        debug_assert!(lx < self.size && ly < self.size);
        &self.tiles[ly * self.size + lx]
    }

    /// Block at chunk-local block coordinates.
    pub fn block(&self, local_bx: usize, local_by: usize) -> &Block {
        let blocks_per_tile = self.tiles.first().map_or(1, |t| t.size);
        self.tile(local_bx / blocks_per_tile, local_by / blocks_per_tile)
            .block(local_bx % blocks_per_tile, local_by % blocks_per_tile)
    }

    /// Number of tiles per dominant biome, indexed by [`Biome::index`].
    pub fn biome_counts(&self) -> [u64; Biome::COUNT] {
        let mut counts = [0u64; Biome::COUNT];
        for tile in &self.tiles {
            counts[tile.biome.index()] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_key_round_trip() {
        let coord = ChunkCoord::new(-3, 17);
        assert_eq!(coord.to_string(), "-3,17");
        assert_eq!("-3,17".parse::<ChunkCoord>().unwrap(), coord);
        assert_eq!(" 4 , -5 ".parse::<ChunkCoord>().unwrap(), ChunkCoord::new(4, -5));
    }

    #[test]
    fn malformed_chunk_keys() {
        for bad in ["", "1", "1;2", "a,b", "1,2,3"] {
            assert!(
                matches!(bad.parse::<ChunkCoord>(), Err(WorldError::InvalidChunkKey(_))),
                "{bad:?} parsed"
            );
        }
    }

    #[test]
    fn bounds_iteration_covers_rectangle() {
        let bounds = ChunkBounds::new(-1, 0, 1, 1);
        let coords: Vec<_> = bounds.iter().collect();
        assert_eq!(coords.len(), bounds.len());
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], ChunkCoord::new(-1, 0));
        assert_eq!(coords[5], ChunkCoord::new(1, 1));
        assert!(coords.iter().all(|&c| bounds.contains(c)));
    }

    #[test]
    fn chebyshev_distance_to_rectangle() {
        let bounds = ChunkBounds::new(0, 0, 3, 2);
        assert_eq!(bounds.chebyshev_distance(ChunkCoord::new(1, 1)), 0);
        assert_eq!(bounds.chebyshev_distance(ChunkCoord::new(5, 1)), 2);
        assert_eq!(bounds.chebyshev_distance(ChunkCoord::new(-1, -4)), 4);
        assert_eq!(bounds.chebyshev_distance(ChunkCoord::new(7, 5)), 4);
    }

    #[test]
    fn expand_grows_every_side() {
        let bounds = ChunkBounds::new(0, 0, 1, 1).expand(2);
        assert_eq!(bounds, ChunkBounds::new(-2, -2, 3, 3));
        assert_eq!(bounds.len(), 36);
    }

    #[test]
    fn majority_prefers_most_common_biome() {
        let block = |biome| Block {
            biome,
            x: 0,
            y: 0,
            blend: 1.0,
            elevation: 0.0,
        };
        let tile = Tile {
            biome: Biome::Plains,
            x: 0,
            y: 0,
            variant: 0,
            elevation: 0.0,
            size: 2,
            blocks: vec![
                block(Biome::Ocean),
                block(Biome::Forest),
                block(Biome::Forest),
                block(Biome::Plains),
            ],
        };
        assert_eq!(tile.majority_biome(), Biome::Forest);
        assert_eq!(tile.block(1, 0).biome, Biome::Forest);
        assert_eq!(tile.block(1, 1).biome, Biome::Plains);
    }
}
