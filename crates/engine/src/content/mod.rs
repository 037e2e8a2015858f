mod world_file;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::world::{MapConfigError, MapRegistry, Overworld, Spawn, TileCatalog, WorldConfig};

use world_file::parse_world_file;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read world file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse world data {origin} at {path}: {source}")]
    Parse {
        origin: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid world data {origin}: {source}")]
    Config {
        origin: String,
        #[source]
        source: MapConfigError,
    },
}

/// Validated level data, ready to become an [`Overworld`].
#[derive(Debug, Clone)]
pub struct WorldContent {
    pub catalog: TileCatalog,
    pub registry: MapRegistry,
    pub spawn: Spawn,
    origin: String,
}

impl WorldContent {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn into_overworld(self, config: WorldConfig) -> Result<Overworld, ContentError> {
        let origin = self.origin;
        Overworld::new(self.catalog, self.registry, &self.spawn, config)
            .map_err(|source| ContentError::Config { origin, source })
    }
}

/// Parses and validates a JSON world document. `origin` names it in errors.
pub fn parse_world(origin: &str, raw: &str) -> Result<WorldContent, ContentError> {
    let file = parse_world_file(origin, raw)?;
    let (catalog, registry, spawn) = file.into_parts(origin)?;
    info!(
        origin,
        tile_count = catalog.len(),
        map_count = registry.map_count(),
        connection_count = registry.connection_count(),
        spawn_map = %spawn.map,
        "content_loaded"
    );
    Ok(WorldContent {
        catalog,
        registry,
        spawn,
        origin: origin.to_string(),
    })
}

pub fn load_world_file(path: &Path) -> Result<WorldContent, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_world(&path.display().to_string(), &raw)
}
