//! Procedural world: noise, biome classification, chunk generation and residency.

pub mod biome;
pub mod blend;
pub mod chunk;
pub mod chunk_manager;
pub mod classifier;
pub mod config;
pub mod error;
pub mod generator;
pub mod noise;
pub mod stats;
pub mod world_data;

pub use biome::{Biome, BiomeDef, Rarity, Threat};
pub use chunk::{Block, Chunk, ChunkBounds, ChunkCoord, Tile};
pub use chunk_manager::{ChunkManager, StreamUpdate};
pub use classifier::{BiomeClassifier, Climate};
pub use config::GeneratorConfig;
pub use error::WorldError;
pub use generator::WorldGenerator;
pub use stats::BiomeStats;
pub use world_data::{Difficulty, WorldData};
