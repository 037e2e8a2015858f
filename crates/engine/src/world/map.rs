use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::tiles::{TileCatalog, TileCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

const DIRECTION_COUNT: usize = 4;

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapConfigError {
    #[error("map '{map}' has no tiles; width and height must both be at least 1")]
    EmptyGrid { map: String },
    #[error("map '{map}' row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        map: String,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("map '{map}' is defined more than once")]
    DuplicateMap { map: String },
    #[error("tile code {code} is defined more than once")]
    DuplicateTileCode { code: TileCode },
    #[error("map '{map}' uses unknown tile code {code} at row {row}, column {column}")]
    UnknownTileCode {
        map: String,
        row: u32,
        column: u32,
        code: TileCode,
    },
    #[error("connection declared for unknown map '{map}'")]
    ConnectionFromUnknownMap { map: String },
    #[error("map '{map}' connects {direction} to unknown map '{target}'")]
    DanglingConnection {
        map: String,
        direction: Direction,
        target: String,
    },
    #[error("map '{map}' declares more than one {direction} connection")]
    DuplicateConnection { map: String, direction: Direction },
    #[error("spawn map '{map}' does not exist")]
    UnknownSpawnMap { map: String },
    #[error("spawn tile ({tile_x}, {tile_y}) is outside map '{map}'")]
    SpawnOutOfBounds { map: String, tile_x: u32, tile_y: u32 },
    #[error("spawn tile ({tile_x}, {tile_y}) on map '{map}' is not walkable")]
    SpawnBlocked { map: String, tile_x: u32, tile_y: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapLookupError {
    #[error("map '{name}' not found")]
    NotFound { name: String },
}

/// Rectangular, row-major tile grid.
///
/// Tile (0,0) is the top-left cell; rows grow downward, matching screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGrid {
    name: String,
    width: u32,
    height: u32,
    tiles: Vec<TileCode>,
}

impl MapGrid {
    pub fn from_rows(
        name: impl Into<String>,
        rows: Vec<Vec<TileCode>>,
    ) -> Result<Self, MapConfigError> {
        let name = name.into();
        let width = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || width == 0 {
            return Err(MapConfigError::EmptyGrid { map: name });
        }
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(MapConfigError::RaggedRow {
                    map: name,
                    row: row_index,
                    expected: width,
                    actual: row.len(),
                });
            }
            tiles.extend(row);
        }
        Ok(Self {
            name,
            width: width as u32,
            height: height as u32,
            tiles,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_width(&self, tile_size: i32) -> i32 {
        self.width as i32 * tile_size
    }

    pub fn pixel_height(&self, tile_size: i32) -> i32 {
        self.height as i32 * tile_size
    }

    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<TileCode> {
        self.index_of(x, y)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Signed lookup for callers working in possibly off-grid tile space.
    pub fn tile_at_signed(&self, x: i32, y: i32) -> Option<TileCode> {
        if x < 0 || y < 0 {
            return None;
        }
        self.tile_at(x as u32, y as u32)
    }

    fn cells(&self) -> impl Iterator<Item = (u32, u32, TileCode)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, code)| (index as u32 % width, index as u32 / width, *code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapConnection {
    pub from: String,
    pub direction: Direction,
    pub to: String,
}

type DirectionLinks = [Option<String>; DIRECTION_COUNT];

/// Named maps plus their directed edge connections.
///
/// Built once at startup; every referenced tile code and neighbor name is
/// checked during construction so lookups afterwards cannot dangle.
#[derive(Debug, Clone, Default)]
pub struct MapRegistry {
    grids: HashMap<String, MapGrid>,
    links: HashMap<String, DirectionLinks>,
}

impl MapRegistry {
    pub fn new(
        catalog: &TileCatalog,
        grids: Vec<MapGrid>,
        connections: Vec<MapConnection>,
    ) -> Result<Self, MapConfigError> {
        let mut by_name = HashMap::with_capacity(grids.len());
        for grid in grids {
            let unknown = grid.cells().find(|(_, _, code)| !catalog.contains(*code));
            if let Some((x, y, code)) = unknown {
                return Err(MapConfigError::UnknownTileCode {
                    map: grid.name,
                    row: y,
                    column: x,
                    code,
                });
            }
            if by_name.contains_key(grid.name()) {
                return Err(MapConfigError::DuplicateMap { map: grid.name });
            }
            by_name.insert(grid.name.clone(), grid);
        }

        let mut links: HashMap<String, DirectionLinks> = HashMap::new();
        for connection in connections {
            if !by_name.contains_key(&connection.from) {
                return Err(MapConfigError::ConnectionFromUnknownMap {
                    map: connection.from,
                });
            }
            if !by_name.contains_key(&connection.to) {
                return Err(MapConfigError::DanglingConnection {
                    map: connection.from,
                    direction: connection.direction,
                    target: connection.to,
                });
            }
            let slot = &mut links.entry(connection.from.clone()).or_default()
                [connection.direction.index()];
            if slot.is_some() {
                return Err(MapConfigError::DuplicateConnection {
                    map: connection.from,
                    direction: connection.direction,
                });
            }
            *slot = Some(connection.to);
        }

        Ok(Self {
            grids: by_name,
            links,
        })
    }

    pub fn grid(&self, name: &str) -> Result<&MapGrid, MapLookupError> {
        self.grids.get(name).ok_or_else(|| MapLookupError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn neighbor(&self, name: &str, direction: Direction) -> Option<&str> {
        self.links
            .get(name)
            .and_then(|links| links[direction.index()].as_deref())
    }

    pub fn map_count(&self) -> usize {
        self.grids.len()
    }

    pub fn connection_count(&self) -> usize {
        self.links
            .values()
            .map(|links| links.iter().filter(|link| link.is_some()).count())
            .sum()
    }

    /// Map names in sorted order, for stable logging.
    pub fn map_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tiles::TileDef;

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
                name: "wall".to_string(),
                walkable: false,
                color: [255, 0, 0, 255],
            },
        ])
        .expect("catalog")
    }

    fn grid(name: &str, width: usize, height: usize) -> MapGrid {
        MapGrid::from_rows(name, vec![vec![0; width]; height]).expect("grid")
    }

    fn link(from: &str, direction: Direction, to: &str) -> MapConnection {
        MapConnection {
            from: from.to_string(),
            direction,
            to: to.to_string(),
        }
    }

    #[test]
    fn from_rows_is_row_major() {
        let grid = MapGrid::from_rows("m", vec![vec![0, 1, 0], vec![1, 0, 1]]).expect("grid");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile_at(1, 0), Some(1));
        assert_eq!(grid.tile_at(0, 1), Some(1));
        assert_eq!(grid.tile_at(1, 1), Some(0));
        assert_eq!(grid.tile_at(3, 0), None);
        assert_eq!(grid.tile_at(0, 2), None);
        assert_eq!(grid.tile_at_signed(-1, 0), None);
    }

    #[test]
    fn pixel_extent_scales_with_tile_size() {
        let grid = grid("m", 10, 7);
        assert_eq!(grid.pixel_width(16), 160);
        assert_eq!(grid.pixel_height(16), 112);
    }

    #[test]
    fn empty_grids_are_rejected() {
        assert_eq!(
            MapGrid::from_rows("m", Vec::new()).expect_err("no rows"),
            MapConfigError::EmptyGrid {
                map: "m".to_string()
            }
        );
        assert_eq!(
            MapGrid::from_rows("m", vec![Vec::new()]).expect_err("no columns"),
            MapConfigError::EmptyGrid {
                map: "m".to_string()
            }
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = MapGrid::from_rows("m", vec![vec![0, 0], vec![0]]).expect_err("ragged");
        assert_eq!(
            err,
            MapConfigError::RaggedRow {
                map: "m".to_string(),
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn registry_resolves_grids_and_neighbors() {
        let registry = MapRegistry::new(
            &catalog(),
            vec![grid("a", 2, 2), grid("b", 3, 3)],
            vec![link("a", Direction::North, "b")],
        )
        .expect("registry");

        assert_eq!(registry.grid("b").expect("b").width(), 3);
        assert_eq!(registry.neighbor("a", Direction::North), Some("b"));
        assert_eq!(registry.neighbor("a", Direction::South), None);
        assert_eq!(registry.neighbor("b", Direction::South), None);
        assert_eq!(registry.map_count(), 2);
        assert_eq!(registry.connection_count(), 1);
        assert_eq!(registry.map_names(), vec!["a", "b"]);
    }

    #[test]
    fn missing_grid_is_not_found() {
        let registry =
            MapRegistry::new(&catalog(), vec![grid("a", 1, 1)], Vec::new()).expect("registry");
        assert_eq!(
            registry.grid("nowhere").expect_err("missing"),
            MapLookupError::NotFound {
                name: "nowhere".to_string()
            }
        );
    }

    #[test]
    fn unknown_tile_code_reports_location() {
        let bad = MapGrid::from_rows("a", vec![vec![0, 0], vec![0, 7]]).expect("grid");
        let err = MapRegistry::new(&catalog(), vec![bad], Vec::new()).expect_err("unknown code");
        assert_eq!(
            err,
            MapConfigError::UnknownTileCode {
                map: "a".to_string(),
                row: 1,
                column: 1,
                code: 7,
            }
        );
    }

    #[test]
    fn dangling_connection_is_a_config_error() {
        let err = MapRegistry::new(
            &catalog(),
            vec![grid("a", 1, 1)],
            vec![link("a", Direction::East, "ghost")],
        )
        .expect_err("dangling");
        assert_eq!(
            err,
            MapConfigError::DanglingConnection {
                map: "a".to_string(),
                direction: Direction::East,
                target: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn connection_from_unknown_map_is_rejected() {
        let err = MapRegistry::new(
            &catalog(),
            vec![grid("a", 1, 1)],
            vec![link("ghost", Direction::East, "a")],
        )
        .expect_err("unknown source");
        assert_eq!(
            err,
            MapConfigError::ConnectionFromUnknownMap {
                map: "ghost".to_string()
            }
        );
    }

    #[test]
    fn duplicate_maps_and_connections_are_rejected() {
        let err = MapRegistry::new(&catalog(), vec![grid("a", 1, 1), grid("a", 2, 2)], Vec::new())
            .expect_err("duplicate map");
        assert_eq!(
            err,
            MapConfigError::DuplicateMap {
                map: "a".to_string()
            }
        );

        let err = MapRegistry::new(
            &catalog(),
            vec![grid("a", 1, 1), grid("b", 1, 1)],
            vec![
                link("a", Direction::West, "b"),
                link("a", Direction::West, "a"),
            ],
        )
        .expect_err("duplicate connection");
        assert_eq!(
            err,
            MapConfigError::DuplicateConnection {
                map: "a".to_string(),
                direction: Direction::West,
            }
        );
    }

    #[test]
    fn connections_need_not_be_symmetric() {
        let registry = MapRegistry::new(
            &catalog(),
            vec![grid("a", 1, 1), grid("b", 1, 1)],
            vec![link("a", Direction::East, "b")],
        )
        .expect("registry");
        assert_eq!(registry.neighbor("a", Direction::East), Some("b"));
        assert_eq!(registry.neighbor("b", Direction::West), None);
    }

    #[test]
    fn directions_display_lowercase() {
        assert_eq!(Direction::North.to_string(), "north");
        assert_eq!(Direction::West.as_str(), "west");
    }
}
