//! Biome tags and their static metadata.
//!
//! Every biome has exactly one definition; the lookup is an exhaustive
//! `match`, so adding a variant without metadata fails to compile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal rarity class. Higher tiers are gated by more noise thresholds and by distance from spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// How hostile a biome is for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Threat {
    Safe,
    Low,
    Moderate,
    High,
    Extreme,
}

/// Static definition of a biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiomeDef {
    /// Human-readable name for HUD display.
    pub name: &'static str,
    pub rarity: Rarity,
    pub threat: Threat,
    /// Number of visual variants a tile of this biome can pick from.
    pub variant_count: u32,
}

const fn def(name: &'static str, rarity: Rarity, threat: Threat, variant_count: u32) -> BiomeDef {
    BiomeDef {
        name,
        rarity,
        threat,
        variant_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Biome {
    // Water and shores
    DeepOcean,
    Ocean,
    River,
    Beach,
    // Temperate and climate bands
    Plains,
    Forest,
    Swamp,
    Taiga,
    Tundra,
    Desert,
    Savanna,
    Scrubland,
    Foothills,
    Mountains,
    // Uncommon
    Jungle,
    Badlands,
    SnowyPeaks,
    // Rare
    MushroomFields,
    CrystalTundra,
    Oasis,
    // Epic
    AncientForest,
    Volcano,
    CorruptedLands,
    // Legendary
    Inferno,
    SunkenRuins,
    CrystalSpires,
    VoidExpanse,
}

impl Biome {
    pub const COUNT: usize = 27;

    pub const ALL: [Biome; Self::COUNT] = [
        Biome::DeepOcean,
        Biome::Ocean,
        Biome::River,
        Biome::Beach,
        Biome::Plains,
        Biome::Forest,
        Biome::Swamp,
        Biome::Taiga,
        Biome::Tundra,
        Biome::Desert,
        Biome::Savanna,
        Biome::Scrubland,
        Biome::Foothills,
        Biome::Mountains,
        Biome::Jungle,
        Biome::Badlands,
        Biome::SnowyPeaks,
        Biome::MushroomFields,
        Biome::CrystalTundra,
        Biome::Oasis,
        Biome::AncientForest,
        Biome::Volcano,
        Biome::CorruptedLands,
        Biome::Inferno,
        Biome::SunkenRuins,
        Biome::CrystalSpires,
        Biome::VoidExpanse,
    ];

    pub const fn def(self) -> BiomeDef {
        use Rarity::*;
        use Threat::*;
        match self {
            Biome::DeepOcean => def("Deep Ocean", Common, Moderate, 2),
            Biome::Ocean => def("Ocean", Common, Low, 3),
            Biome::River => def("River", Common, Safe, 2),
            Biome::Beach => def("Beach", Common, Safe, 3),
            Biome::Plains => def("Plains", Common, Safe, 4),
            Biome::Forest => def("Forest", Common, Low, 4),
            Biome::Swamp => def("Swamp", Common, Moderate, 3),
            Biome::Taiga => def("Taiga", Common, Low, 3),
            Biome::Tundra => def("Tundra", Common, Moderate, 3),
            Biome::Desert => def("Desert", Common, Moderate, 3),
            Biome::Savanna => def("Savanna", Common, Low, 3),
            Biome::Scrubland => def("Scrubland", Common, Low, 2),
            Biome::Foothills => def("Foothills", Common, Low, 3),
            Biome::Mountains => def("Mountains", Common, Moderate, 3),
            Biome::Jungle => def("Jungle", Uncommon, Moderate, 4),
            Biome::Badlands => def("Badlands", Uncommon, High, 3),
            Biome::SnowyPeaks => def("Snowy Peaks", Uncommon, High, 2),
            Biome::MushroomFields => def("Mushroom Fields", Rare, Safe, 3),
            Biome::CrystalTundra => def("Crystal Tundra", Rare, Moderate, 2),
            Biome::Oasis => def("Oasis", Rare, Safe, 2),
            Biome::AncientForest => def("Ancient Forest", Epic, High, 3),
            Biome::Volcano => def("Volcano", Epic, Extreme, 2),
            Biome::CorruptedLands => def("Corrupted Lands", Epic, Extreme, 3),
            Biome::Inferno => def("Inferno", Legendary, Extreme, 2),
            Biome::SunkenRuins => def("Sunken Ruins", Legendary, High, 2),
            Biome::CrystalSpires => def("Crystal Spires", Legendary, High, 3),
            Biome::VoidExpanse => def("Void Expanse", Legendary, Extreme, 2),
        }
    }

    pub const fn rarity(self) -> Rarity {
        self.def().rarity
    }

    pub const fn threat(self) -> Threat {
        self.def().threat
    }

    pub const fn variant_count(self) -> u32 {
        self.def().variant_count
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Position of this biome in [`Biome::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_water(self) -> bool {
        matches!(
            self,
            Biome::DeepOcean | Biome::Ocean | Biome::River | Biome::SunkenRuins
        )
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_biome_in_declaration_order() {
        for (i, biome) in Biome::ALL.iter().enumerate() {
            assert_eq!(biome.index(), i, "{biome:?} out of order");
        }
    }

    #[test]
    fn every_biome_has_variants_and_a_name() {
        for biome in Biome::ALL {
            assert!(biome.variant_count() > 0, "{biome:?} has no variants");
            assert!(!biome.name().is_empty());
        }
    }

    #[test]
    fn each_tier_is_populated() {
        for tier in [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ] {
            assert!(
                Biome::ALL.iter().any(|b| b.rarity() == tier),
                "no biome in tier {tier:?}"
            );
        }
    }

    #[test]
    fn water_biomes() {
        let water: Vec<Biome> = Biome::ALL.into_iter().filter(|b| b.is_water()).collect();
        assert_eq!(
            water,
            vec![Biome::DeepOcean, Biome::Ocean, Biome::River, Biome::SunkenRuins]
        );
        assert!(!Biome::Beach.is_water());
        assert!(!Biome::Swamp.is_water());
    }

    #[test]
    fn rarity_is_ordered() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert_eq!(Biome::Inferno.rarity(), Rarity::Legendary);
        assert_eq!(Biome::Plains.threat(), Threat::Safe);
    }
}
