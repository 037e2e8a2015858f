pub mod app;
pub mod content;
pub mod world;

pub use app::{
    run_app, AppError, InputAction, InputSnapshot, LoopConfig, LoopMetricsSnapshot, Renderer,
    Scene, SceneCommand, Sprite, SpriteError, SpriteTable,
};
pub use content::{load_world_file, parse_world, ContentError, WorldContent};
pub use world::{
    build_draw_list, compute_camera, overlaps, step, step_with_outcome, CameraView, Direction,
    DrawCommand, HeldDirections, MapConfigError, MapConnection, MapGrid, MapLookupError,
    MapRegistry, MapTransition, MoveDelta, Overworld, PixelPos, PlayerState, Spawn, StepOutcome,
    TileCatalog, TileCode, TileDef, TileWindow, Viewport, WorldConfig, DEFAULT_PLAYER_SPEED,
    DEFAULT_TILE_SIZE, DEFAULT_VIEWPORT,
};
