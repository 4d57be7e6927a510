use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use outland_render::ViewportConfig;
use outland_world::{Difficulty, GeneratorConfig, WorldData, WorldError};

use crate::error::SessionError;
use crate::session::SessionSettings;

#[derive(Debug, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub generation: GeneratorConfig,
    #[serde(default)]
    pub view: ViewSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub viewer: ViewerSection,
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_world_name")]
    pub name: String,
    /// Random when absent.
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_world_name() -> String {
    "Outland".into()
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: None,
            difficulty: Difficulty::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewSection {
    #[serde(flatten)]
    pub viewport: ViewportConfig,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_texture_cache_capacity")]
    pub texture_cache_capacity: usize,
    /// Load-pass debounce in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_texture_cache_capacity() -> usize {
    64
}

fn default_debounce_ms() -> u64 {
    50
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            width: default_width(),
            height: default_height(),
            texture_cache_capacity: default_texture_cache_capacity(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Scripted run of the headless viewer.
#[derive(Debug, Deserialize)]
pub struct ViewerSection {
    /// Pointer positions replayed as one drag, starting at the first point.
    #[serde(default)]
    pub drag_path: Vec<[f64; 2]>,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,
    #[serde(default = "default_report")]
    pub report: PathBuf,
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_zoom() -> f64 {
    1.0
}

fn default_snapshot() -> PathBuf {
    "outland.png".into()
}

fn default_report() -> PathBuf {
    "outland-stats.json".into()
}

impl Default for ViewerSection {
    fn default() -> Self {
        Self {
            drag_path: Vec::new(),
            frame_interval_ms: default_frame_interval_ms(),
            zoom: default_zoom(),
            snapshot: default_snapshot(),
            report: default_report(),
        }
    }
}

impl ClientConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// World descriptor, drawing a random seed when none is configured.
    pub fn world_data(&self) -> Result<WorldData, WorldError> {
        let seed = match &self.world.seed {
            Some(seed) => seed.clone(),
            None => WorldData::random_seed(),
        };
        WorldData::new(self.world.name.clone(), seed, self.world.difficulty)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            generator: self.generation.clone(),
            viewport: self.view.viewport.clone(),
            texture_cache_capacity: self.view.texture_cache_capacity,
            debounce: Duration::from_millis(self.view.debounce_ms),
            width: self.view.width,
            height: self.view.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml_str = r#"
            [world]
            name = "Frontier"
            seed = "12345"
            difficulty = "hard"

            [generation]
            chunk_size = 8
            blocks_per_tile = 4

            [generation.thresholds]
            spawn_safe_radius = 2000.0
            rare_distance = 2000.0

            [view]
            block_size = 3
            view_distance = 2
            eviction_buffer = 5
            width = 640
            debounce_ms = 30

            [logging]
            level = "debug"

            [viewer]
            drag_path = [[0.0, 0.0], [-120.0, 40.0]]
        "#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.world.name, "Frontier");
        assert_eq!(config.world.seed.as_deref(), Some("12345"));
        assert_eq!(config.world.difficulty, Difficulty::Hard);
        assert_eq!(config.generation.chunk_size, 8);
        assert_eq!(config.generation.blocks_per_tile, 4);
        assert_eq!(config.generation.thresholds.spawn_safe_radius, 2000.0);
        assert_eq!(config.generation.thresholds.epic_distance, 2500.0); // default
        assert_eq!(config.view.viewport.block_size, 3);
        assert_eq!(config.view.viewport.view_distance, 2);
        assert_eq!(config.view.viewport.eviction_buffer, 5);
        assert_eq!(config.view.width, 640);
        assert_eq!(config.view.height, 600); // default
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.viewer.drag_path.len(), 2);
        assert_eq!(config.viewer.snapshot, PathBuf::from("outland.png"));

        let settings = config.session_settings();
        assert_eq!(settings.debounce, Duration::from_millis(30));
        assert_eq!(settings.texture_cache_capacity, 64);
        assert!(settings.generator.validate().is_ok());
        assert!(settings.viewport.validate().is_ok());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.world.name, "Outland");
        assert!(config.world.seed.is_none());
        assert_eq!(config.world.difficulty, Difficulty::Normal);
        assert_eq!(config.generation.chunk_size, 12);
        assert_eq!(config.generation.blocks_per_tile, 16);
        assert_eq!(config.view.viewport, ViewportConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.viewer.drag_path.is_empty());

        let world = config.world_data().unwrap();
        assert_eq!(world.seed().len(), 12);
    }

    #[test]
    fn blank_seed_is_rejected() {
        let config: ClientConfig = toml::from_str("[world]\nseed = \"  \"\n").unwrap();
        assert_eq!(config.world_data(), Err(WorldError::EmptySeed));
    }

    #[test]
    fn unknown_difficulty_fails_to_parse() {
        let result: Result<ClientConfig, _> = toml::from_str("[world]\ndifficulty = \"nightmare\"\n");
        assert!(result.is_err());
    }
}
