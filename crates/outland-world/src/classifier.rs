//! Biome classification.
//!
//! Rules are evaluated top to bottom and the first match wins: legendary,
//! epic, rare, then the common elevation/temperature/moisture bands. If
//! nothing matches, the classifier falls back to [`Biome::Plains`].
//! Every tier above common is floored by a distance from spawn.

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::config::{ClassifierThresholds, GeneratorConfig};
use crate::noise::{Channel, NoiseSource};

/// Biome returned when no rule matches.
pub const DEFAULT_BIOME: Biome = Biome::Plains;

/// Name reported by [`BiomeClassifier::classify_with_rule`] for the fallback.
pub const DEFAULT_RULE: &str = "default";

/// Climate channels sampled at one position, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Climate {
    pub temperature: f64,
    pub moisture: f64,
    pub elevation: f64,
    pub weirdness: f64,
}

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub climate: Climate,
    pub distance: f64,
    pub rarity: f64,
    pub thresholds: &'a ClassifierThresholds,
    world_x: f64,
    world_y: f64,
    gate_frequency: f64,
    noise: &'a NoiseSource,
}

/// Gate channel indices. Every tiered rule owns one, so the gates are independent.
const EPIC_GATES: [u8; 3] = [0, 1, 2];
const LEGENDARY_GATES: [u8; 4] = [3, 4, 5, 6];
const RARE_GATES: [u8; 3] = [7, 8, 9];

impl RuleContext<'_> {
    /// `true` when gate channel `index` exceeds `bar` at this position. Sampled lazily.
    pub fn gate(&self, index: u8, bar: f64) -> bool {
        let f = self.gate_frequency;
        self.noise
            .noise(self.world_x * f, self.world_y * f, Channel::Gate(index))
            > bar
    }

    fn legendary(&self, slot: usize) -> bool {
        let t = self.thresholds;
        self.distance >= t.legendary_distance
            && self.climate.weirdness > t.legendary_weirdness
            && self.rarity > t.legendary_rarity
            && self.gate(LEGENDARY_GATES[slot], t.legendary_gate)
    }

    fn epic(&self, slot: usize) -> bool {
        let t = self.thresholds;
        self.distance >= t.epic_distance
            && self.climate.weirdness > t.epic_weirdness
            && self.rarity > t.epic_rarity
            && self.gate(EPIC_GATES[slot], t.epic_gate)
    }

    fn rare(&self, slot: usize) -> bool {
        let t = self.thresholds;
        self.distance >= t.rare_distance
            && self.rarity > t.rare_rarity
            && self.gate(RARE_GATES[slot], t.rare_gate)
    }
}

/// One `(predicate, result)` entry of the ordered rule list.
pub struct Rule {
    pub name: &'static str,
    pub biome: Biome,
    predicate: fn(&RuleContext<'_>) -> bool,
}

impl Rule {
    const fn new(name: &'static str, biome: Biome, predicate: fn(&RuleContext<'_>) -> bool) -> Self {
        Self {
            name,
            biome,
            predicate,
        }
    }

    pub fn matches(&self, ctx: &RuleContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

fn default_rules() -> Vec<Rule> {
    vec![
        // Legendary: picked by the signs of temperature and elevation.
        Rule::new("legendary_inferno", Biome::Inferno, |c| {
            c.climate.temperature >= 0.0 && c.climate.elevation >= 0.0 && c.legendary(0)
        }),
        Rule::new("legendary_sunken_ruins", Biome::SunkenRuins, |c| {
            c.climate.temperature >= 0.0 && c.climate.elevation < 0.0 && c.legendary(1)
        }),
        Rule::new("legendary_crystal_spires", Biome::CrystalSpires, |c| {
            c.climate.temperature < 0.0 && c.climate.elevation >= 0.0 && c.legendary(2)
        }),
        Rule::new("legendary_void_expanse", Biome::VoidExpanse, |c| {
            c.climate.temperature < 0.0 && c.climate.elevation < 0.0 && c.legendary(3)
        }),
        // Epic
        Rule::new("epic_volcano", Biome::Volcano, |c| {
            c.climate.temperature > 0.0 && c.climate.elevation > 0.15 && c.epic(0)
        }),
        Rule::new("epic_ancient_forest", Biome::AncientForest, |c| {
            c.climate.moisture > c.thresholds.moist
                && c.climate.elevation > c.thresholds.river
                && c.epic(1)
        }),
        Rule::new("epic_corrupted_lands", Biome::CorruptedLands, |c| {
            c.climate.elevation > c.thresholds.river && c.epic(2)
        }),
        // Rare
        Rule::new("rare_mushroom_fields", Biome::MushroomFields, |c| {
            c.climate.elevation > c.thresholds.shallow_water
                && c.climate.elevation < 0.0
                && c.climate.moisture > c.thresholds.moist
                && c.rare(0)
        }),
        Rule::new("rare_crystal_tundra", Biome::CrystalTundra, |c| {
            c.climate.temperature < c.thresholds.cold
                && c.climate.elevation > c.thresholds.river
                && c.rare(1)
        }),
        Rule::new("rare_oasis", Biome::Oasis, |c| {
            c.climate.temperature > c.thresholds.hot
                && c.climate.moisture < c.thresholds.dry
                && c.climate.elevation > c.thresholds.river
                && c.climate.elevation < c.thresholds.mountain
                && c.rare(2)
        }),
        // Common: elevation bands first.
        Rule::new("deep_ocean", Biome::DeepOcean, |c| {
            c.climate.elevation < c.thresholds.deep_water
        }),
        Rule::new("ocean", Biome::Ocean, |c| {
            c.climate.elevation < c.thresholds.shallow_water
        }),
        Rule::new("river", Biome::River, |c| c.climate.elevation < c.thresholds.river),
        Rule::new("snowy_peaks", Biome::SnowyPeaks, |c| {
            c.climate.elevation >= c.thresholds.peak && c.climate.temperature < c.thresholds.cold
        }),
        Rule::new("mountains", Biome::Mountains, |c| {
            c.climate.elevation >= c.thresholds.mountain
        }),
        // Hot branch
        Rule::new("badlands", Biome::Badlands, |c| {
            c.climate.temperature > c.thresholds.hot + 0.15 && c.climate.moisture < c.thresholds.dry
        }),
        Rule::new("desert", Biome::Desert, |c| {
            c.climate.temperature > c.thresholds.hot && c.climate.moisture < c.thresholds.dry
        }),
        Rule::new("jungle", Biome::Jungle, |c| {
            c.climate.temperature > c.thresholds.hot && c.climate.moisture > c.thresholds.wet
        }),
        Rule::new("savanna", Biome::Savanna, |c| {
            c.climate.temperature > c.thresholds.hot
        }),
        // Cold branch
        Rule::new("tundra", Biome::Tundra, |c| {
            c.climate.temperature < c.thresholds.cold && c.climate.moisture < c.thresholds.moist
        }),
        Rule::new("taiga", Biome::Taiga, |c| {
            c.climate.temperature < c.thresholds.cold
        }),
        // Temperate moisture branch
        Rule::new("swamp", Biome::Swamp, |c| c.climate.moisture > c.thresholds.wet),
        Rule::new("forest", Biome::Forest, |c| c.climate.moisture > c.thresholds.moist),
    ]
}

/// Ordered rule list plus the parameters needed to build a [`RuleContext`].
pub struct BiomeClassifier {
    rules: Vec<Rule>,
    thresholds: ClassifierThresholds,
    rarity_frequency: f64,
    gate_frequency: f64,
}

impl BiomeClassifier {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            rules: default_rules(),
            thresholds: config.thresholds.clone(),
            rarity_frequency: config.climate.rarity_frequency,
            gate_frequency: config.climate.gate_frequency,
        }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Build the rule context for a world position. Samples the rarity channel once.
    pub fn context<'a>(
        &'a self,
        noise: &'a NoiseSource,
        climate: Climate,
        world_x: f64,
        world_y: f64,
    ) -> RuleContext<'a> {
        let f = self.rarity_frequency;
        RuleContext {
            climate,
            distance: world_x.hypot(world_y),
            rarity: noise.noise(world_x * f, world_y * f, Channel::Rarity),
            thresholds: &self.thresholds,
            world_x,
            world_y,
            gate_frequency: self.gate_frequency,
            noise,
        }
    }

    /// Classify a position. Total: always returns a biome.
    pub fn classify(&self, noise: &NoiseSource, climate: Climate, world_x: f64, world_y: f64) -> Biome {
        self.classify_with_rule(noise, climate, world_x, world_y).0
    }

    /// Classify a position and report which rule fired.
    pub fn classify_with_rule(
        &self,
        noise: &NoiseSource,
        climate: Climate,
        world_x: f64,
        world_y: f64,
    ) -> (Biome, &'static str) {
        let ctx = self.context(noise, climate, world_x, world_y);
        self.evaluate(&ctx)
    }

    /// First matching rule for a prepared context.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> (Biome, &'static str) {
        self.rules
            .iter()
            .find(|rule| rule.matches(ctx))
            .map(|rule| (rule.biome, rule.name))
            .unwrap_or((DEFAULT_BIOME, DEFAULT_RULE))
    }
}
