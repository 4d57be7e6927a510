//! Biome colours.
//!
//! Every biome has three shades. The shade is picked from the tile variant
//! and a coordinate hash; a small per-block jitter is added on top. Both
//! depend only on block coordinates and biome, never on render order.

use image::Rgba;
use outland_world::noise::mix;
use outland_world::Biome;

const SHADE_CHANNEL: u32 = 0x5000;
const JITTER_CHANNEL: u32 = 0x5001;

/// Maximum per-channel colour offset.
pub const JITTER: i32 = 6;

pub type Shades = [[u8; 3]; 3];

pub const fn shades(biome: Biome) -> Shades {
    match biome {
        Biome::DeepOcean => [[16, 42, 92], [18, 46, 98], [14, 38, 86]],
        Biome::Ocean => [[32, 82, 156], [36, 88, 164], [28, 76, 148]],
        Biome::River => [[58, 120, 190], [62, 126, 196], [52, 112, 182]],
        Biome::Beach => [[222, 206, 150], [214, 198, 140], [230, 214, 160]],
        Biome::Plains => [[112, 170, 72], [120, 178, 78], [104, 162, 66]],
        Biome::Forest => [[48, 118, 52], [42, 108, 46], [56, 126, 58]],
        Biome::Swamp => [[70, 92, 58], [64, 86, 54], [78, 100, 64]],
        Biome::Taiga => [[54, 96, 78], [48, 90, 72], [60, 104, 84]],
        Biome::Tundra => [[190, 204, 200], [182, 196, 192], [198, 210, 206]],
        Biome::Desert => [[226, 192, 118], [218, 184, 110], [232, 200, 126]],
        Biome::Savanna => [[176, 170, 88], [168, 162, 80], [184, 178, 96]],
        Biome::Scrubland => [[164, 150, 96], [156, 142, 90], [172, 158, 104]],
        Biome::Foothills => [[118, 124, 96], [110, 116, 90], [126, 132, 104]],
        Biome::Mountains => [[122, 116, 110], [112, 106, 100], [132, 126, 120]],
        Biome::Jungle => [[30, 132, 44], [24, 122, 38], [38, 142, 52]],
        Biome::Badlands => [[184, 98, 56], [172, 88, 48], [196, 110, 64]],
        Biome::SnowyPeaks => [[236, 240, 246], [226, 232, 240], [244, 246, 250]],
        Biome::MushroomFields => [[152, 104, 150], [142, 96, 140], [162, 112, 160]],
        Biome::CrystalTundra => [[160, 214, 232], [150, 206, 226], [170, 222, 238]],
        Biome::Oasis => [[64, 172, 140], [56, 162, 130], [72, 182, 150]],
        Biome::AncientForest => [[26, 78, 40], [20, 70, 34], [32, 86, 46]],
        Biome::Volcano => [[74, 42, 36], [92, 46, 34], [64, 36, 32]],
        Biome::CorruptedLands => [[86, 54, 104], [78, 48, 96], [94, 60, 112]],
        Biome::Inferno => [[178, 44, 22], [200, 62, 24], [156, 34, 18]],
        Biome::SunkenRuins => [[40, 104, 120], [34, 96, 112], [46, 112, 128]],
        Biome::CrystalSpires => [[196, 150, 236], [186, 140, 228], [206, 160, 244]],
        Biome::VoidExpanse => [[20, 14, 32], [26, 18, 40], [14, 10, 24]],
    }
}

fn jitter(channel: u8, hash: u32, shift: u32) -> u8 {
    let span = (2 * JITTER + 1) as u32;
    let offset = ((hash >> shift) & 0xff) % span;
    (channel as i32 + offset as i32 - JITTER).clamp(0, 255) as u8
}

/// Colour of one block. Pure in `(x, y, biome, variant)`.
pub fn block_color(biome: Biome, variant: u32, x: i64, y: i64) -> Rgba<u8> {
    let tag = biome.index() as u32;
    let pick = variant.wrapping_add(mix(x, y, SHADE_CHANNEL, tag) >> 16) % 3;
    let [r, g, b] = shades(biome)[pick as usize];
    let h = mix(x, y, JITTER_CHANNEL, tag);
    Rgba([jitter(r, h, 0), jitter(g, h, 8), jitter(b, h, 16), 255])
}
