//! Soft edges between biomes.
//!
//! The blend factor measures how close a climate sample sits to any
//! classification threshold. Blocks with a low factor look up an
//! intermediate biome for the pair (block biome, tile biome).

use crate::biome::Biome;
use crate::classifier::Climate;
use crate::config::{BlendConfig, ClassifierThresholds};

/// `min(1, min_i |value_i - boundary_i| * scale)` over every elevation,
/// temperature and moisture threshold.
pub fn blend_factor(climate: &Climate, thresholds: &ClassifierThresholds, scale: f64) -> f64 {
    let elevation = thresholds
        .elevation_bounds()
        .into_iter()
        .map(|b| (climate.elevation - b).abs());
    let temperature = thresholds
        .temperature_bounds()
        .into_iter()
        .map(|b| (climate.temperature - b).abs());
    let moisture = thresholds
        .moisture_bounds()
        .into_iter()
        .map(|b| (climate.moisture - b).abs());

    let nearest = elevation
        .chain(temperature)
        .chain(moisture)
        .fold(f64::INFINITY, f64::min);
    (nearest * scale).min(1.0)
}

fn is_highland(biome: Biome) -> bool {
    matches!(biome, Biome::Mountains | Biome::SnowyPeaks)
}

fn is_arid(biome: Biome) -> bool {
    matches!(biome, Biome::Desert | Biome::Badlands)
}

fn is_lowland(biome: Biome) -> bool {
    matches!(
        biome,
        Biome::Plains
            | Biome::Forest
            | Biome::Swamp
            | Biome::Taiga
            | Biome::Tundra
            | Biome::Savanna
            | Biome::Jungle
    )
}

/// Intermediate biome for a pair of adjacent biomes, if one exists. Symmetric.
pub fn transition(a: Biome, b: Biome) -> Option<Biome> {
    if a == b {
        return None;
    }
    let either = |p: fn(Biome) -> bool, q: fn(Biome) -> bool| (p(a) && q(b)) || (q(a) && p(b));

    if either(Biome::is_water, |x| is_lowland(x) || is_arid(x)) {
        Some(Biome::Beach)
    } else if either(is_highland, is_lowland) {
        Some(Biome::Foothills)
    } else if either(is_arid, |x| {
        matches!(x, Biome::Plains | Biome::Savanna | Biome::Forest)
    }) {
        Some(Biome::Scrubland)
    } else {
        None
    }
}

/// Resolve the biome of one block given its own classification and the tile's dominant biome.
pub fn blend_block(local: Biome, dominant: Biome, blend: f64, config: &BlendConfig) -> Biome {
    if blend >= config.transition_threshold {
        return local;
    }
    transition(local, dominant).unwrap_or(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Rarity;

    fn thresholds() -> ClassifierThresholds {
        ClassifierThresholds::default()
    }

    #[test]
    fn blend_is_zero_on_a_boundary() {
        let t = thresholds();
        let climate = Climate {
            elevation: t.river,
            temperature: 0.0,
            moisture: 0.0,
            weirdness: 0.0,
        };
        assert_eq!(blend_factor(&climate, &t, 8.0), 0.0);
    }

    #[test]
    fn blend_saturates_far_from_boundaries() {
        let t = thresholds();
        let climate = Climate {
            elevation: 0.0,
            temperature: 0.0,
            moisture: -0.5,
            weirdness: 0.0,
        };
        assert_eq!(blend_factor(&climate, &t, 100.0), 1.0);
    }

    #[test]
    fn blend_uses_nearest_threshold() {
        let t = thresholds();
        let climate = Climate {
            elevation: t.mountain - 0.02,
            temperature: 0.0,
            moisture: -0.5,
            weirdness: 0.0,
        };
        let blend = blend_factor(&climate, &t, 10.0);
        assert!((blend - 0.2).abs() < 1e-9, "blend = {blend}");
    }

    #[test]
    fn transitions_are_symmetric() {
        for a in Biome::ALL {
            for b in Biome::ALL {
                assert_eq!(transition(a, b), transition(b, a), "{a:?}/{b:?}");
            }
        }
    }

    #[test]
    fn transitions_only_produce_common_biomes() {
        for a in Biome::ALL {
            for b in Biome::ALL {
                if let Some(t) = transition(a, b) {
                    assert_eq!(t.rarity(), Rarity::Common, "{a:?}/{b:?} -> {t:?}");
                }
            }
        }
    }

    #[test]
    fn water_meets_grass_as_sand() {
        assert_eq!(transition(Biome::Ocean, Biome::Plains), Some(Biome::Beach));
        assert_eq!(transition(Biome::Desert, Biome::SunkenRuins), Some(Biome::Beach));
        assert_eq!(transition(Biome::Mountains, Biome::Forest), Some(Biome::Foothills));
        assert_eq!(transition(Biome::Desert, Biome::Savanna), Some(Biome::Scrubland));
        assert_eq!(transition(Biome::Ocean, Biome::DeepOcean), None);
    }

    #[test]
    fn blend_block_respects_threshold() {
        let config = BlendConfig::default();
        assert_eq!(
            blend_block(Biome::Ocean, Biome::Plains, 0.1, &config),
            Biome::Beach
        );
        assert_eq!(
            blend_block(Biome::Ocean, Biome::Plains, 0.9, &config),
            Biome::Ocean
        );
        assert_eq!(
            blend_block(Biome::Plains, Biome::Plains, 0.0, &config),
            Biome::Plains
        );
    }
}
