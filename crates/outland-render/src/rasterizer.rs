//! Chunk rasterization and texture blitting.

use image::RgbaImage;
use outland_world::Chunk;

use crate::palette::block_color;

/// Draws each block of a chunk as a `block_size` square.
#[derive(Debug, Clone, Copy)]
pub struct ChunkRasterizer {
    block_size: u32,
}

impl ChunkRasterizer {
    pub fn new(block_size: u32) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Side length in pixels of the texture for `chunk`.
    pub fn texture_size(&self, chunk: &Chunk) -> u32 {
        let blocks_per_tile = chunk.tiles.first().map_or(0, |t| t.size);
        (chunk.size * blocks_per_tile) as u32 * self.block_size
    }

    /// Rasterize a chunk. Output depends only on chunk content.
    pub fn render_chunk(&self, chunk: &Chunk) -> RgbaImage {
        let side = self.texture_size(chunk);
        let mut image = RgbaImage::new(side, side);
        let bs = self.block_size;

        for ty in 0..chunk.size {
            for tx in 0..chunk.size {
                let tile = chunk.tile(tx, ty);
                for by in 0..tile.size {
                    for bx in 0..tile.size {
                        let block = tile.block(bx, by);
                        let color = block_color(block.biome, tile.variant, block.x, block.y);
                        let px = (tx * tile.size + bx) as u32 * bs;
                        let py = (ty * tile.size + by) as u32 * bs;
                        for dy in 0..bs {
                            for dx in 0..bs {
                                image.put_pixel(px + dx, py + dy, color);
                            }
                        }
                    }
                }
            }
        }
        image
    }
}

/// Copy `texture` onto `target`, stretched over the screen rectangle from
/// `top_left` to `bottom_right` with nearest-neighbour sampling.
///
/// The rectangle covers pixels `floor(left)..floor(right)` on each axis, so
/// two textures sharing an edge coordinate meet without a gap or overlap.
/// Clips to the target. Returns `false` when nothing was drawn.
pub fn draw_texture(
    target: &mut RgbaImage,
    texture: &RgbaImage,
    top_left: (f64, f64),
    bottom_right: (f64, f64),
) -> bool {
    let (tex_w, tex_h) = (texture.width() as i64, texture.height() as i64);
    if tex_w == 0 || tex_h == 0 {
        return false;
    }
    let left = top_left.0.floor() as i64;
    let top = top_left.1.floor() as i64;
    let right = bottom_right.0.floor() as i64;
    let bottom = bottom_right.1.floor() as i64;
    let (dest_w, dest_h) = (right - left, bottom - top);
    if dest_w <= 0 || dest_h <= 0 {
        return false;
    }

    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = right.min(target.width() as i64);
    let y1 = bottom.min(target.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return false;
    }

    for y in y0..y1 {
        let v = ((y - top) * tex_h / dest_h).min(tex_h - 1) as u32;
        for x in x0..x1 {
            let u = ((x - left) * tex_w / dest_w).min(tex_w - 1) as u32;
            target.put_pixel(x as u32, y as u32, *texture.get_pixel(u, v));
        }
    }
    true
}
