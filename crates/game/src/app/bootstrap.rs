use overworld_engine::{
    parse_world, ContentError, LoopConfig, Scene, SpriteError, SpriteTable, WorldConfig,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::overworld::{self, OverworldScene};

#[derive(Debug, Error)]
pub(crate) enum StartupError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("failed to build sprites: {0}")]
    Sprites(#[from] SpriteError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
    pub(crate) sprites: SpriteTable,
}

pub(crate) fn build_app() -> Result<AppWiring, StartupError> {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "startup");

    let world_config = WorldConfig::default();
    let content = parse_world(overworld::KANTO_ORIGIN, overworld::KANTO_WORLD)?;
    let sprites = overworld::sprite_table(&content.catalog, world_config.tile_size)?;
    let scene = OverworldScene::from_content(content, world_config)?;

    let config = LoopConfig {
        window_title: overworld::WINDOW_TITLE.to_string(),
        viewport: world_config.viewport,
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        config,
        scene: Box::new(scene),
        sprites,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
