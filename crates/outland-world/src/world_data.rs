//! World session descriptor handed over by the world-creation screen.

use std::fmt;
use std::str::FromStr;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Length of seeds produced by [`WorldData::random_seed`].
const RANDOM_SEED_LEN: usize = 12;

/// Difficulty setting. Carried along with the world but never read by terrain generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl FromStr for Difficulty {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "peaceful" => Ok(Self::Peaceful),
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            _ => Err(WorldError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Peaceful => "peaceful",
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Immutable description of a world session.
///
/// Only `seed` feeds generation; `name` and `difficulty` are passed through
/// for the UI layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorldData")]
pub struct WorldData {
    name: String,
    seed: String,
    difficulty: Difficulty,
}

/// Unchecked wire form; deserialization goes through [`WorldData::new`].
#[derive(Deserialize)]
struct RawWorldData {
    name: String,
    seed: String,
    #[serde(default)]
    difficulty: Difficulty,
}

impl TryFrom<RawWorldData> for WorldData {
    type Error = WorldError;

    fn try_from(raw: RawWorldData) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.seed, raw.difficulty)
    }
}

impl WorldData {
    /// Create a world descriptor. Blank seeds are rejected.
    pub fn new(
        name: impl Into<String>,
        seed: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, WorldError> {
        let seed = seed.into();
        if seed.trim().is_empty() {
            return Err(WorldError::EmptySeed);
        }
        Ok(Self {
            name: name.into(),
            seed,
            difficulty,
        })
    }

    /// Generate a random alphanumeric seed for callers that leave the seed blank.
    pub fn random_seed() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SEED_LEN)
            .map(char::from)
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_seed() {
        assert_eq!(
            WorldData::new("w", "   ", Difficulty::Easy),
            Err(WorldError::EmptySeed)
        );
    }

    #[test]
    fn deserialize_checks_the_seed() {
        let world: WorldData =
            serde_json::from_str(r#"{ "name": "w", "seed": "12345", "difficulty": "hard" }"#).unwrap();
        assert_eq!(world.seed(), "12345");
        assert_eq!(world.difficulty(), Difficulty::Hard);

        let blank = serde_json::from_str::<WorldData>(r#"{ "name": "w", "seed": "  " }"#);
        assert!(blank.unwrap_err().to_string().contains("seed"));
    }

    #[test]
    fn difficulty_parse_is_case_insensitive() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" peaceful ".parse::<Difficulty>().unwrap(), Difficulty::Peaceful);
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(WorldError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn random_seed_is_usable() {
        let seed = WorldData::random_seed();
        assert_eq!(seed.len(), RANDOM_SEED_LEN);
        let world = WorldData::new("random", seed.clone(), Difficulty::Normal).unwrap();
        assert_eq!(world.seed(), seed);
    }
}
