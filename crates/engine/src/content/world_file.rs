use serde::Deserialize;

use crate::world::{
    Direction, MapConnection, MapGrid, MapRegistry, Spawn, TileCatalog, TileCode, TileDef,
};

use super::ContentError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WorldFile {
    tiles: Vec<TileEntry>,
    maps: Vec<MapEntry>,
    spawn: SpawnEntry,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TileEntry {
    code: TileCode,
    name: String,
    walkable: bool,
    color: [u8; 3],
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapEntry {
    name: String,
    rows: Vec<Vec<TileCode>>,
    #[serde(default)]
    connections: ConnectionsEntry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectionsEntry {
    north: Option<String>,
    south: Option<String>,
    east: Option<String>,
    west: Option<String>,
}

impl ConnectionsEntry {
    fn into_links(self, from: &str) -> impl Iterator<Item = MapConnection> + '_ {
        [
            (Direction::North, self.north),
            (Direction::South, self.south),
            (Direction::East, self.east),
            (Direction::West, self.west),
        ]
        .into_iter()
        .filter_map(move |(direction, target)| {
            target.map(|to| MapConnection {
                from: from.to_string(),
                direction,
                to,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpawnEntry {
    map: String,
    tile_x: u32,
    tile_y: u32,
}

pub(crate) fn parse_world_file(origin: &str, raw: &str) -> Result<WorldFile, ContentError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, WorldFile>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        ContentError::Parse {
            origin: origin.to_string(),
            path: if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            },
            source: error.into_inner(),
        }
    })
}

impl WorldFile {
    pub(crate) fn into_parts(
        self,
        origin: &str,
    ) -> Result<(TileCatalog, MapRegistry, Spawn), ContentError> {
        let config_err = |source| ContentError::Config {
            origin: origin.to_string(),
            source,
        };

        let catalog = TileCatalog::new(
            self.tiles
                .into_iter()
                .map(|entry| TileDef {
                    code: entry.code,
                    name: entry.name,
                    walkable: entry.walkable,
                    color: [entry.color[0], entry.color[1], entry.color[2], 255],
                })
                .collect(),
        )
        .map_err(config_err)?;

        let mut grids = Vec::with_capacity(self.maps.len());
        let mut connections = Vec::new();
        for entry in self.maps {
            connections.extend(entry.connections.into_links(&entry.name));
            grids.push(MapGrid::from_rows(entry.name, entry.rows).map_err(config_err)?);
        }
        let registry = MapRegistry::new(&catalog, grids, connections).map_err(config_err)?;

        let spawn = Spawn {
            map: self.spawn.map,
            tile_x: self.spawn.tile_x,
            tile_y: self.spawn.tile_y,
        };
        Ok((catalog, registry, spawn))
    }
}
