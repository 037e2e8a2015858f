use overworld_engine::{Sprite, SpriteError, SpriteTable, TileCatalog};

pub(crate) const PLAYER_SPRITE_SIZE: u32 = 16;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
const BROWN: [u8; 4] = [139, 69, 19, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

/// Index 0 is transparent. Only body and cap colors are used by the player.
pub(crate) const PLAYER_PALETTE: [[u8; 4]; 3] = [TRANSPARENT, BROWN, RED];

#[rustfmt::skip]
const PLAYER_PIXELS: [u8; 256] = [
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,2,2,2,2,2,2,2,2,0,0,0,0,
    0,0,0,2,2,2,2,2,2,2,2,2,2,0,0,0,
    0,0,0,2,2,2,2,2,2,2,2,2,2,0,0,0,
    0,0,0,2,2,2,2,2,2,2,2,2,2,0,0,0,
    0,0,0,0,2,2,2,2,2,2,2,2,0,0,0,0,
    0,0,0,0,0,1,1,1,1,1,1,0,0,0,0,0,
    0,0,0,0,0,1,1,1,1,1,1,0,0,0,0,0,
    0,0,0,0,0,1,1,1,1,1,1,0,0,0,0,0,
    0,0,0,0,0,1,1,1,1,1,1,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
];

pub(crate) fn player_sprite() -> Result<Sprite, SpriteError> {
    Sprite::from_palette_indices(
        PLAYER_SPRITE_SIZE,
        PLAYER_SPRITE_SIZE,
        &PLAYER_PIXELS,
        &PLAYER_PALETTE,
    )
}

/// Solid tiles from the catalog colors plus the procedural player.
pub(crate) fn sprite_table(
    catalog: &TileCatalog,
    tile_size: i32,
) -> Result<SpriteTable, SpriteError> {
    let tile_size = tile_size.max(1) as u32;
    Ok(SpriteTable::from_catalog(catalog, tile_size, player_sprite()?))
}
