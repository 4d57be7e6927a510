//! Seeded lattice value noise for terrain generation.
//!
//! Lattice corners are hashed from `(x, y, channel, seed)` into values in
//! `[-1, 1]` and blended with the quintic fade on both axes. Independent
//! channels let the same coordinate drive temperature, moisture, elevation
//! and the rarity gates without correlation.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Octave index stride inside the channel id space.
const OCTAVE_STRIDE: u32 = 0x1_0000;

/// Offset of the first secondary gate channel.
const GATE_BASE: u32 = 64;

/// Improved Perlin fade function: 6t^5 - 15t^4 + 10t^3.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation.
#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Stable 32-bit polynomial rolling hash of a seed string.
pub fn hash_seed(seed: &str) -> u32 {
    seed.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}

/// Mix integer lattice coordinates, a channel id and a seed into 32 well-spread bits.
#[inline]
pub fn mix(x: i64, y: i64, channel: u32, seed: u32) -> u32 {
    let mut h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (channel as u64).wrapping_mul(0x1656_67B1_9E37_79F9)
        ^ (seed as u64).wrapping_mul(0x85EB_CA77_C2B2_AE63);
    // splitmix64 finalizer
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 31;
    (h >> 32) as u32
}

/// Named noise channels. Each maps to a distinct id in the hash input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Temperature,
    Moisture,
    Elevation,
    Weirdness,
    Rarity,
    Variant,
    Detail,
    /// Secondary gates that keep tiered biomes patchy. Each index is independent.
    Gate(u8),
}

impl Channel {
    pub const fn id(self) -> u32 {
        match self {
            Self::Temperature => 0,
            Self::Moisture => 1,
            Self::Elevation => 2,
            Self::Weirdness => 3,
            Self::Rarity => 4,
            Self::Variant => 5,
            Self::Detail => 6,
            Self::Gate(n) => GATE_BASE + n as u32,
        }
    }
}

/// One layer of a multi-octave sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Octave {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Hit/miss counters for the memoization caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
}

/// Bounded memo table. When full, the oldest half is dropped in one batch.
struct MemoCache<K, V> {
    values: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
    hits: Cell<u64>,
    misses: Cell<u64>,
    evictions: u64,
}

impl<K: Copy + Eq + Hash, V: Copy> MemoCache<K, V> {
    fn new(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity.min(4096)),
            order: VecDeque::new(),
            capacity: capacity.max(2),
            hits: Cell::new(0),
            misses: Cell::new(0),
            evictions: 0,
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        let found = self.values.get(key).copied();
        match found {
            Some(_) => self.hits.set(self.hits.get() + 1),
            None => self.misses.set(self.misses.get() + 1),
        }
        found
    }

    fn insert(&mut self, key: K, value: V) {
        if self.values.len() >= self.capacity {
            let drop_count = self.order.len() / 2;
            for old in self.order.drain(..drop_count) {
                self.values.remove(&old);
            }
            self.evictions += drop_count as u64;
        }
        if self.values.insert(key, value).is_none() {
            self.order.push_back(key);
        }
    }

    fn clear(&mut self) {
        self.values.clear();
        self.order.clear();
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            evictions: self.evictions,
            len: self.values.len(),
        }
    }
}

/// Per-world noise state: the hashed seed plus memoized lattice values and samples.
///
/// The caches never change results; they only skip recomputation. Interior
/// mutability keeps every sampling method on `&self`, which matches the
/// single-threaded session model.
pub struct NoiseSource {
    seed_hash: u32,
    lattice: RefCell<MemoCache<(i64, i64, u32), f64>>,
    samples: RefCell<MemoCache<(u64, u64, u32), f64>>,
}

impl NoiseSource {
    /// Build a noise source from the world seed string.
    pub fn new(seed: &str, cache_capacity: usize) -> Self {
        Self::from_hash(hash_seed(seed), cache_capacity)
    }

    pub fn from_hash(seed_hash: u32, cache_capacity: usize) -> Self {
        Self {
            seed_hash,
            lattice: RefCell::new(MemoCache::new(cache_capacity)),
            samples: RefCell::new(MemoCache::new(cache_capacity)),
        }
    }

    pub fn seed_hash(&self) -> u32 {
        self.seed_hash
    }

    /// Raw 32-bit hash of an integer coordinate on a channel.
    #[inline]
    pub fn lattice_hash(&self, x: i64, y: i64, channel: Channel) -> u32 {
        mix(x, y, channel.id(), self.seed_hash)
    }

    /// Continuous noise at `(x, y)` on `channel`. Returns a value in `[-1, 1]`.
    pub fn noise(&self, x: f64, y: f64, channel: Channel) -> f64 {
        self.sample(x, y, channel.id())
    }

    /// Multi-octave sample normalized by the total amplitude, so the result stays in `[-1, 1]`.
    pub fn fbm(&self, x: f64, y: f64, channel: Channel, octaves: &[Octave]) -> f64 {
        let mut value = 0.0;
        let mut total = 0.0;
        for (i, octave) in octaves.iter().enumerate() {
            let id = channel.id() + OCTAVE_STRIDE * i as u32;
            value += self.sample(x * octave.frequency, y * octave.frequency, id) * octave.amplitude;
            total += octave.amplitude;
        }
        if total > 0.0 {
            value / total
        } else {
            0.0
        }
    }

    /// Lattice statistics, then interpolated-sample statistics.
    pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
        (self.lattice.borrow().stats(), self.samples.borrow().stats())
    }

    /// Drop all memoized values.
    pub fn clear_cache(&self) {
        self.lattice.borrow_mut().clear();
        self.samples.borrow_mut().clear();
    }

    fn sample(&self, x: f64, y: f64, id: u32) -> f64 {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite noise input");
        let key = (x.to_bits(), y.to_bits(), id);
        if let Some(v) = self.samples.borrow().get(&key) {
            return v;
        }

        let x0 = x.floor();
        let y0 = y.floor();
        let xi = x0 as i64;
        let yi = y0 as i64;
        let u = fade(x - x0);
        let v = fade(y - y0);

        let c00 = self.lattice_value(xi, yi, id);
        let c10 = self.lattice_value(xi.wrapping_add(1), yi, id);
        let c01 = self.lattice_value(xi, yi.wrapping_add(1), id);
        let c11 = self.lattice_value(xi.wrapping_add(1), yi.wrapping_add(1), id);

        let value = lerp(v, lerp(u, c00, c10), lerp(u, c01, c11));
        self.samples.borrow_mut().insert(key, value);
        value
    }

    fn lattice_value(&self, x: i64, y: i64, id: u32) -> f64 {
        let key = (x, y, id);
        if let Some(v) = self.lattice.borrow().get(&key) {
            return v;
        }
        let value = mix(x, y, id, self.seed_hash) as f64 / u32::MAX as f64 * 2.0 - 1.0;
        self.lattice.borrow_mut().insert(key, value);
        value
    }
}
