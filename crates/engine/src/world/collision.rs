use super::map::MapGrid;
use super::tiles::TileCatalog;

/// Inclusive range of tiles covered by a span of `size` pixels starting at `start`.
pub(crate) fn covered_tiles(start: i32, size: i32, tile_size: i32) -> (i32, i32) {
    let first = start.div_euclid(tile_size);
    let last = (start + size - 1).div_euclid(tile_size);
    (first, last)
}

/// Returns true when the square box at (`x`, `y`) overlaps a solid tile.
///
/// Cells outside the grid are skipped; map edges are the movement engine's
/// concern, not the resolver's.
pub fn overlaps(
    x: i32,
    y: i32,
    box_size: i32,
    grid: &MapGrid,
    catalog: &TileCatalog,
    tile_size: i32,
) -> bool {
    let (left, right) = covered_tiles(x, box_size, tile_size);
    let (top, bottom) = covered_tiles(y, box_size, tile_size);

    for ty in top..=bottom {
        for tx in left..=right {
            let Some(code) = grid.tile_at_signed(tx, ty) else {
                continue;
            };
            if !catalog.is_walkable(code) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tiles::{TileCode, TileDef};

    const TILE: i32 = 16;

    fn catalog() -> TileCatalog {
        TileCatalog::new(vec![
            TileDef {
                code: 0,
                name: "grass".to_string(),
                walkable: true,
                color: [0, 255, 0, 255],
            },
            TileDef {
                code: 1,
                name: "rock".to_string(),
                walkable: false,
                color: [90, 90, 90, 255],
            },
        ])
        .expect("catalog")
    }

    fn grid(rows: Vec<Vec<TileCode>>) -> MapGrid {
        MapGrid::from_rows("test", rows).expect("grid")
    }

    #[test]
    fn covered_tiles_uses_floor_division() {
        assert_eq!(covered_tiles(0, 16, TILE), (0, 0));
        assert_eq!(covered_tiles(1, 16, TILE), (0, 1));
        assert_eq!(covered_tiles(15, 16, TILE), (0, 1));
        assert_eq!(covered_tiles(16, 16, TILE), (1, 1));
        assert_eq!(covered_tiles(-1, 16, TILE), (-1, 0));
        assert_eq!(covered_tiles(-16, 16, TILE), (-1, -1));
    }

    #[test]
    fn box_inside_walkable_run_is_clear() {
        let grid = grid(vec![vec![0, 0, 0], vec![0, 0, 0], vec![1, 1, 1]]);
        let catalog = catalog();
        for x in 0..=(2 * TILE) {
            for y in 0..=TILE {
                assert!(!overlaps(x, y, TILE, &grid, &catalog, TILE), "x={x} y={y}");
            }
        }
    }

    #[test]
    fn any_covered_solid_cell_collides() {
        let grid = grid(vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
        let catalog = catalog();
        // Every placement touching cell (1,1) must collide.
        for x in 1..=(2 * TILE - 1) {
            for y in 1..=(2 * TILE - 1) {
                assert!(overlaps(x, y, TILE, &grid, &catalog, TILE), "x={x} y={y}");
            }
        }
        assert!(!overlaps(0, 0, TILE, &grid, &catalog, TILE));
        assert!(!overlaps(2 * TILE, 2 * TILE, TILE, &grid, &catalog, TILE));
    }

    #[test]
    fn off_grid_cells_are_passable() {
        let grid = grid(vec![vec![0, 0], vec![0, 0]]);
        let catalog = catalog();
        assert!(!overlaps(-8, -8, TILE, &grid, &catalog, TILE));
        assert!(!overlaps(100, 100, TILE, &grid, &catalog, TILE));
        assert!(!overlaps(-40, 0, TILE, &grid, &catalog, TILE));
    }

    #[test]
    fn off_grid_part_does_not_hide_on_grid_solid() {
        let grid = grid(vec![vec![1, 0], vec![0, 0]]);
        let catalog = catalog();
        assert!(overlaps(-8, -8, TILE, &grid, &catalog, TILE));
    }

    #[test]
    fn unknown_codes_collide() {
        let grid = grid(vec![vec![0, 9]]);
        let catalog = catalog();
        assert!(overlaps(TILE, 0, TILE, &grid, &catalog, TILE));
        assert!(!overlaps(0, 0, TILE, &grid, &catalog, TILE));
    }
}
