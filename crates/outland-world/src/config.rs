//! Generator configuration.
//!
//! Numeric thresholds are tunables, not contracts. `validate` only enforces
//! the orderings the classifier relies on (spawn radius below every tier
//! floor, bands sorted, sizes positive).

use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::noise::Octave;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Tiles per chunk side.
    pub chunk_size: i32,
    /// Blocks per tile side.
    pub blocks_per_tile: i32,
    pub climate: ClimateConfig,
    pub thresholds: ClassifierThresholds,
    pub blend: BlendConfig,
    /// Entries per noise memo table.
    pub noise_cache_capacity: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 12,
            blocks_per_tile: 16,
            climate: ClimateConfig::default(),
            thresholds: ClassifierThresholds::default(),
            blend: BlendConfig::default(),
            noise_cache_capacity: 1 << 16,
        }
    }
}

/// Base frequencies (per world block) and octave layout of the climate channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    pub temperature_frequency: f64,
    pub moisture_frequency: f64,
    pub elevation_frequency: f64,
    pub weirdness_frequency: f64,
    pub rarity_frequency: f64,
    /// Frequency of the secondary gates that keep tiered biomes patchy.
    pub gate_frequency: f64,
    /// Octaves relative to each channel's base frequency.
    pub octaves: Vec<Octave>,
    /// Extra high-frequency layer mixed into block-level samples only.
    pub detail: Octave,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            temperature_frequency: 1.0 / 1100.0,
            moisture_frequency: 1.0 / 800.0,
            elevation_frequency: 1.0 / 550.0,
            weirdness_frequency: 1.0 / 700.0,
            rarity_frequency: 1.0 / 450.0,
            gate_frequency: 1.0 / 160.0,
            octaves: vec![
                Octave::new(1.0, 1.0),
                Octave::new(2.0, 0.5),
                Octave::new(4.0, 0.25),
            ],
            detail: Octave::new(1.0 / 24.0, 0.12),
        }
    }
}

/// Cut-offs used by the classifier rules and the blend-factor computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub deep_water: f64,
    pub shallow_water: f64,
    pub river: f64,
    pub mountain: f64,
    pub peak: f64,

    pub cold: f64,
    pub hot: f64,

    pub dry: f64,
    pub moist: f64,
    pub wet: f64,

    pub rare_rarity: f64,
    pub rare_gate: f64,
    pub epic_rarity: f64,
    pub epic_weirdness: f64,
    pub epic_gate: f64,
    pub legendary_rarity: f64,
    pub legendary_weirdness: f64,
    pub legendary_gate: f64,

    /// No rare-or-higher biome is ever emitted closer than this to the origin (in blocks).
    pub spawn_safe_radius: f64,
    pub rare_distance: f64,
    pub epic_distance: f64,
    pub legendary_distance: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            deep_water: -0.45,
            shallow_water: -0.28,
            river: -0.22,
            mountain: 0.38,
            peak: 0.52,
            cold: -0.25,
            hot: 0.25,
            dry: -0.15,
            moist: 0.1,
            wet: 0.3,
            rare_rarity: 0.35,
            rare_gate: 0.25,
            epic_rarity: 0.45,
            epic_weirdness: 0.3,
            epic_gate: 0.3,
            legendary_rarity: 0.55,
            legendary_weirdness: 0.45,
            legendary_gate: 0.4,
            spawn_safe_radius: 1200.0,
            rare_distance: 1200.0,
            epic_distance: 2500.0,
            legendary_distance: 5000.0,
        }
    }
}

impl ClassifierThresholds {
    /// Elevation cut-offs that produce visible biome boundaries.
    pub fn elevation_bounds(&self) -> [f64; 5] {
        [
            self.deep_water,
            self.shallow_water,
            self.river,
            self.mountain,
            self.peak,
        ]
    }

    pub fn temperature_bounds(&self) -> [f64; 2] {
        [self.cold, self.hot]
    }

    pub fn moisture_bounds(&self) -> [f64; 3] {
        [self.dry, self.moist, self.wet]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// Multiplier applied to the distance from the nearest threshold.
    pub scale: f64,
    /// Blocks whose blend factor falls below this use a transition biome.
    pub transition_threshold: f64,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            scale: 8.0,
            transition_threshold: 0.25,
        }
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), WorldError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WorldError::config(field, format!("must be positive, got {value}")))
    }
}

fn ensure_ascending(field: &'static str, values: &[f64]) -> Result<(), WorldError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(WorldError::config(field, "must be finite"));
    }
    if values.windows(2).all(|w| w[0] < w[1]) {
        Ok(())
    } else {
        Err(WorldError::config(
            field,
            format!("must be strictly ascending, got {values:?}"),
        ))
    }
}

impl GeneratorConfig {
    /// Check the configuration before any generation happens.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.chunk_size <= 0 {
            return Err(WorldError::config(
                "chunk_size",
                format!("must be positive, got {}", self.chunk_size),
            ));
        }
        if self.blocks_per_tile <= 0 {
            return Err(WorldError::config(
                "blocks_per_tile",
                format!("must be positive, got {}", self.blocks_per_tile),
            ));
        }
        if self.noise_cache_capacity < 2 {
            return Err(WorldError::config(
                "noise_cache_capacity",
                "must hold at least two entries",
            ));
        }

        let c = &self.climate;
        ensure_positive("climate.temperature_frequency", c.temperature_frequency)?;
        ensure_positive("climate.moisture_frequency", c.moisture_frequency)?;
        ensure_positive("climate.elevation_frequency", c.elevation_frequency)?;
        ensure_positive("climate.weirdness_frequency", c.weirdness_frequency)?;
        ensure_positive("climate.rarity_frequency", c.rarity_frequency)?;
        ensure_positive("climate.gate_frequency", c.gate_frequency)?;
        if c.octaves.is_empty() {
            return Err(WorldError::config("climate.octaves", "must not be empty"));
        }
        for octave in &c.octaves {
            ensure_positive("climate.octaves.frequency", octave.frequency)?;
            ensure_positive("climate.octaves.amplitude", octave.amplitude)?;
        }
        ensure_positive("climate.detail.frequency", c.detail.frequency)?;
        if !(c.detail.amplitude.is_finite() && c.detail.amplitude >= 0.0) {
            return Err(WorldError::config(
                "climate.detail.amplitude",
                "must be finite and non-negative",
            ));
        }

        let t = &self.thresholds;
        ensure_ascending("thresholds.elevation", &t.elevation_bounds())?;
        ensure_ascending("thresholds.temperature", &t.temperature_bounds())?;
        ensure_ascending("thresholds.moisture", &t.moisture_bounds())?;
        for (field, bar) in [
            ("thresholds.rare_rarity", t.rare_rarity),
            ("thresholds.rare_gate", t.rare_gate),
            ("thresholds.epic_rarity", t.epic_rarity),
            ("thresholds.epic_weirdness", t.epic_weirdness),
            ("thresholds.epic_gate", t.epic_gate),
            ("thresholds.legendary_rarity", t.legendary_rarity),
            ("thresholds.legendary_weirdness", t.legendary_weirdness),
            ("thresholds.legendary_gate", t.legendary_gate),
        ] {
            if !bar.is_finite() {
                return Err(WorldError::config(field, "must be finite"));
            }
        }
        if !(t.rare_rarity <= t.epic_rarity && t.epic_rarity <= t.legendary_rarity) {
            return Err(WorldError::config(
                "thresholds.rarity",
                "tier bars must not decrease from rare to legendary",
            ));
        }
        if !(t.rare_gate <= t.epic_gate && t.epic_gate <= t.legendary_gate) {
            return Err(WorldError::config(
                "thresholds.gate",
                "tier gates must not decrease from rare to legendary",
            ));
        }
        if t.epic_weirdness > t.legendary_weirdness {
            return Err(WorldError::config(
                "thresholds.weirdness",
                "epic bar must not exceed legendary bar",
            ));
        }
        if !(t.spawn_safe_radius.is_finite() && t.spawn_safe_radius >= 0.0) {
            return Err(WorldError::config(
                "thresholds.spawn_safe_radius",
                "must be finite and non-negative",
            ));
        }
        if !(t.spawn_safe_radius <= t.rare_distance
            && t.rare_distance <= t.epic_distance
            && t.epic_distance <= t.legendary_distance)
            || !t.legendary_distance.is_finite()
        {
            return Err(WorldError::config(
                "thresholds.distance",
                "must satisfy spawn_safe_radius <= rare <= epic <= legendary",
            ));
        }

        ensure_positive("blend.scale", self.blend.scale)?;
        if !(0.0..=1.0).contains(&self.blend.transition_threshold) {
            return Err(WorldError::config(
                "blend.transition_threshold",
                "must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Blocks per chunk side.
    pub fn blocks_per_chunk(&self) -> i32 {
        self.chunk_size * self.blocks_per_tile
    }
}
