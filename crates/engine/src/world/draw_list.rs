use super::camera::CameraView;
use super::map::MapGrid;
use super::movement::PixelPos;
use super::tiles::TileCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Tile { code: TileCode, screen: PixelPos },
    Player { screen: PixelPos },
}

pub fn build_draw_list(
    grid: &MapGrid,
    camera: &CameraView,
    player: PixelPos,
    tile_size: i32,
) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(camera.tiles.cell_count() + 1);
    fill_draw_list(&mut out, grid, camera, player, tile_size);
    out
}

/// Visible tiles in row-major order, then the player on top.
pub fn fill_draw_list(
    out: &mut Vec<DrawCommand>,
    grid: &MapGrid,
    camera: &CameraView,
    player: PixelPos,
    tile_size: i32,
) {
    out.clear();
    for ty in camera.tiles.rows.clone() {
        for tx in camera.tiles.columns.clone() {
            let Some(code) = grid.tile_at(tx, ty) else {
                continue;
            };
            let tile_origin = PixelPos {
                x: tx as i32 * tile_size,
                y: ty as i32 * tile_size,
            };
            out.push(DrawCommand::Tile {
                code,
                screen: camera.world_to_screen(tile_origin),
            });
        }
    }
    out.push(DrawCommand::Player {
        screen: camera.world_to_screen(player),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::camera::{compute, Viewport};

    const TILE: i32 = 16;

    #[test]
    fn tiles_are_row_major_and_player_is_last() {
        let grid = MapGrid::from_rows("m", vec![vec![0, 1], vec![2, 3]]).expect("grid");
        let camera = CameraView::for_grid(
            PixelPos::new(16, 16),
            &grid,
            Viewport {
                width: 600,
                height: 400,
            },
            TILE,
        );
        let list = build_draw_list(&grid, &camera, PixelPos::new(16, 16), TILE);
        assert_eq!(
            list,
            vec![
                DrawCommand::Tile {
                    code: 0,
                    screen: PixelPos::new(0, 0)
                },
                DrawCommand::Tile {
                    code: 1,
                    screen: PixelPos::new(16, 0)
                },
                DrawCommand::Tile {
                    code: 2,
                    screen: PixelPos::new(0, 16)
                },
                DrawCommand::Tile {
                    code: 3,
                    screen: PixelPos::new(16, 16)
                },
                DrawCommand::Player {
                    screen: PixelPos::new(16, 16)
                },
            ]
        );
    }

    #[test]
    fn scrolled_camera_offsets_screen_positions() {
        let grid = MapGrid::from_rows("m", vec![vec![0; 100]; 4]).expect("grid");
        let viewport = Viewport {
            width: 64,
            height: 64,
        };
        let camera = compute(PixelPos::new(808, 0), 1600, 64, viewport, TILE);
        assert_eq!(camera.offset, PixelPos::new(776, 0));

        let list = build_draw_list(&grid, &camera, PixelPos::new(808, 0), TILE);
        let first = list.first().copied().expect("first tile");
        assert_eq!(
            first,
            DrawCommand::Tile {
                code: 0,
                screen: PixelPos::new(48 * TILE - 776, 0)
            }
        );
        assert_eq!(
            list.last().copied(),
            Some(DrawCommand::Player {
                screen: PixelPos::new(32, 0)
            })
        );
        assert_eq!(list.len(), camera.tiles.cell_count() + 1);
    }

    #[test]
    fn fill_reuses_buffer() {
        let grid = MapGrid::from_rows("m", vec![vec![0]]).expect("grid");
        let camera = CameraView::for_grid(
            PixelPos::new(0, 0),
            &grid,
            Viewport {
                width: 32,
                height: 32,
            },
            TILE,
        );
        let mut out = vec![DrawCommand::Player {
            screen: PixelPos::new(9, 9),
        }];
        fill_draw_list(&mut out, &grid, &camera, PixelPos::new(0, 0), TILE);
        assert_eq!(out.len(), 2);
    }
}
