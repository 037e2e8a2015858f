use thiserror::Error;

use crate::world::{TileCatalog, TileCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteError {
    #[error("sprite {width}x{height} needs {expected} palette indices, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("palette index {index} at pixel {pixel} is outside a palette of {palette_len} colors")]
    PaletteIndexOutOfRange {
        index: u8,
        pixel: usize,
        palette_len: usize,
    },
}

/// An RGBA bitmap. Pixels with zero alpha are skipped when blitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Sprite {
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut rgba = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            rgba.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Builds a sprite from row-major palette indices.
    pub fn from_palette_indices(
        width: u32,
        height: u32,
        indices: &[u8],
        palette: &[[u8; 4]],
    ) -> Result<Self, SpriteError> {
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(SpriteError::SizeMismatch {
                width,
                height,
                expected,
                actual: indices.len(),
            });
        }

        let mut rgba = Vec::with_capacity(expected * 4);
        for (pixel, &index) in indices.iter().enumerate() {
            let color = palette.get(index as usize).ok_or_else(|| {
                SpriteError::PaletteIndexOutOfRange {
                    index,
                    pixel,
                    palette_len: palette.len(),
                }
            })?;
            rgba.extend_from_slice(color);
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0; 4];
        color.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(color)
    }
}

/// Tile sprites indexed directly by tile code, plus the player sprite.
#[derive(Debug, Clone)]
pub struct SpriteTable {
    tiles: Vec<Option<Sprite>>,
    player: Sprite,
    tile_size: u32,
}

impl SpriteTable {
    /// One solid square per catalog entry, colored from the tile definition.
    pub fn from_catalog(catalog: &TileCatalog, tile_size: u32, player: Sprite) -> Self {
        let mut tiles = Vec::new();
        for def in catalog.iter() {
            let slot = def.code as usize;
            if tiles.len() <= slot {
                tiles.resize(slot + 1, None);
            }
            tiles[slot] = Some(Sprite::solid(tile_size, tile_size, def.color));
        }
        Self {
            tiles,
            player,
            tile_size,
        }
    }

    pub fn tile(&self, code: TileCode) -> Option<&Sprite> {
        self.tiles.get(code as usize).and_then(Option::as_ref)
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}
