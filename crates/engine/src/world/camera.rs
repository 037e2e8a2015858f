use std::ops::Range;

use super::map::MapGrid;
use super::movement::PixelPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Half-open tile index ranges that intersect the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileWindow {
    pub columns: Range<u32>,
    pub rows: Range<u32>,
}

impl TileWindow {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.columns.len() * self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraView {
    /// Top-left corner of the viewport in map pixels.
    pub offset: PixelPos,
    pub tiles: TileWindow,
}

impl CameraView {
    pub fn for_grid(player: PixelPos, grid: &MapGrid, viewport: Viewport, tile_size: i32) -> Self {
        compute(
            player,
            grid.pixel_width(tile_size),
            grid.pixel_height(tile_size),
            viewport,
            tile_size,
        )
    }

    pub fn world_to_screen(&self, world: PixelPos) -> PixelPos {
        PixelPos {
            x: world.x - self.offset.x,
            y: world.y - self.offset.y,
        }
    }
}

/// Centers the viewport on the player, clamped so it never shows past the
/// map edge. Maps smaller than the viewport pin to 0 on that axis.
pub fn compute(
    player: PixelPos,
    map_pixel_width: i32,
    map_pixel_height: i32,
    viewport: Viewport,
    tile_size: i32,
) -> CameraView {
    let viewport_w = viewport.width as i32;
    let viewport_h = viewport.height as i32;
    let cam_x = clamp_axis(player.x - viewport_w / 2, map_pixel_width, viewport_w);
    let cam_y = clamp_axis(player.y - viewport_h / 2, map_pixel_height, viewport_h);

    CameraView {
        offset: PixelPos { x: cam_x, y: cam_y },
        tiles: TileWindow {
            columns: visible_span(cam_x, viewport_w, map_pixel_width / tile_size, tile_size),
            rows: visible_span(cam_y, viewport_h, map_pixel_height / tile_size, tile_size),
        },
    }
}

fn clamp_axis(desired: i32, map_extent: i32, viewport_extent: i32) -> i32 {
    // Lower bound wins when the map is smaller than the viewport.
    desired.min(map_extent - viewport_extent).max(0)
}

fn visible_span(cam: i32, viewport_extent: i32, map_tiles: i32, tile_size: i32) -> Range<u32> {
    let start = cam.div_euclid(tile_size).clamp(0, map_tiles);
    let end = ((cam + viewport_extent).div_euclid(tile_size) + 1).clamp(0, map_tiles);
    start.min(end) as u32..end as u32
}
