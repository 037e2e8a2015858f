mod camera;
mod collision;
mod draw_list;
mod map;
mod movement;
mod tiles;

pub use camera::{compute as compute_camera, CameraView, TileWindow, Viewport};
pub use collision::overlaps;
pub use draw_list::{build_draw_list, fill_draw_list, DrawCommand};
pub use map::{Direction, MapConfigError, MapConnection, MapGrid, MapLookupError, MapRegistry};
pub use movement::{
    step, step_with_outcome, HeldDirections, MapTransition, MoveDelta, PixelPos, PlayerState,
    StepOutcome,
};
pub use tiles::{TileCatalog, TileCode, TileDef};

pub const DEFAULT_TILE_SIZE: i32 = 16;
pub const DEFAULT_PLAYER_SPEED: i32 = 2;
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 600,
    height: 400,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    pub tile_size: i32,
    pub player_speed: i32,
    pub viewport: Viewport,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            player_speed: DEFAULT_PLAYER_SPEED,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub map: String,
    pub tile_x: u32,
    pub tile_y: u32,
}

/// Static level data plus the one piece of mutable state, the player.
#[derive(Debug, Clone)]
pub struct Overworld {
    catalog: TileCatalog,
    registry: MapRegistry,
    config: WorldConfig,
    player: PlayerState,
}

impl Overworld {
    pub fn new(
        catalog: TileCatalog,
        registry: MapRegistry,
        spawn: &Spawn,
        config: WorldConfig,
    ) -> Result<Self, MapConfigError> {
        let grid = registry
            .grid(&spawn.map)
            .map_err(|_| MapConfigError::UnknownSpawnMap {
                map: spawn.map.clone(),
            })?;
        if spawn.tile_x >= grid.width() || spawn.tile_y >= grid.height() {
            return Err(MapConfigError::SpawnOutOfBounds {
                map: spawn.map.clone(),
                tile_x: spawn.tile_x,
                tile_y: spawn.tile_y,
            });
        }
        let position = PixelPos {
            x: spawn.tile_x as i32 * config.tile_size,
            y: spawn.tile_y as i32 * config.tile_size,
        };
        if overlaps(
            position.x,
            position.y,
            config.tile_size,
            grid,
            &catalog,
            config.tile_size,
        ) {
            return Err(MapConfigError::SpawnBlocked {
                map: spawn.map.clone(),
                tile_x: spawn.tile_x,
                tile_y: spawn.tile_y,
            });
        }

        Ok(Self {
            catalog,
            registry,
            config,
            player: PlayerState::new(spawn.map.clone(), position),
        })
    }

    pub fn tick(&mut self, held: HeldDirections) -> StepOutcome {
        self.apply_delta(held.to_delta(self.config.player_speed))
    }

    pub fn apply_delta(&mut self, delta: MoveDelta) -> StepOutcome {
        let (next, outcome) = step_with_outcome(
            &self.player,
            &self.registry,
            &self.catalog,
            self.config.tile_size,
            delta,
        );
        self.player = next;
        outcome
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn registry(&self) -> &MapRegistry {
        &self.registry
    }

    pub fn current_grid(&self) -> Result<&MapGrid, MapLookupError> {
        self.registry.grid(&self.player.map)
    }

    pub fn camera(&self) -> Result<CameraView, MapLookupError> {
        let grid = self.current_grid()?;
        Ok(CameraView::for_grid(
            self.player.position,
            grid,
            self.config.viewport,
            self.config.tile_size,
        ))
    }

    pub fn draw_list(&self) -> Result<Vec<DrawCommand>, MapLookupError> {
        let mut out = Vec::new();
        self.fill_draw_list(&mut out)?;
        Ok(out)
    }

    pub fn fill_draw_list(&self, out: &mut Vec<DrawCommand>) -> Result<(), MapLookupError> {
        let grid = self.current_grid()?;
        let camera = CameraView::for_grid(
            self.player.position,
            grid,
            self.config.viewport,
            self.config.tile_size,
        );
        fill_draw_list(
            out,
            grid,
            &camera,
            self.player.position,
            self.config.tile_size,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
                name: "water".to_string(),
                walkable: false,
                color: [0, 0, 255, 255],
            },
        ])
        .expect("catalog")
    }

    fn build(spawn: Spawn) -> Result<Overworld, MapConfigError> {
        let catalog = catalog();
        let grid = MapGrid::from_rows("home", vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]])
            .expect("grid");
        let registry = MapRegistry::new(&catalog, vec![grid], Vec::new()).expect("registry");
        Overworld::new(catalog, registry, &spawn, WorldConfig::default())
    }

    fn spawn(map: &str, tile_x: u32, tile_y: u32) -> Spawn {
        Spawn {
            map: map.to_string(),
            tile_x,
            tile_y,
        }
    }

    #[test]
    fn spawn_converts_tiles_to_pixels() {
        let world = build(spawn("home", 1, 1)).expect("world");
        assert_eq!(world.player().map, "home");
        assert_eq!(world.player().position, PixelPos::new(16, 16));
    }

    #[test]
    fn spawn_validation_errors() {
        assert_eq!(
            build(spawn("away", 1, 1)).expect_err("unknown map"),
            MapConfigError::UnknownSpawnMap {
                map: "away".to_string()
            }
        );
        assert_eq!(
            build(spawn("home", 3, 1)).expect_err("out of bounds"),
            MapConfigError::SpawnOutOfBounds {
                map: "home".to_string(),
                tile_x: 3,
                tile_y: 1,
            }
        );
        assert_eq!(
            build(spawn("home", 0, 0)).expect_err("blocked"),
            MapConfigError::SpawnBlocked {
                map: "home".to_string(),
                tile_x: 0,
                tile_y: 0,
            }
        );
    }

    #[test]
    fn enclosed_player_cannot_move() {
        let mut world = build(spawn("home", 1, 1)).expect("world");
        for held in [
            HeldDirections {
                left: true,
                ..HeldDirections::default()
            },
            HeldDirections {
                down: true,
                right: true,
                ..HeldDirections::default()
            },
        ] {
            let outcome = world.tick(held);
            assert!(!outcome.moved);
        }
        assert_eq!(world.player().position, PixelPos::new(16, 16));
    }

    #[test]
    fn draw_list_covers_whole_small_map() {
        let world = build(spawn("home", 1, 1)).expect("world");
        let camera = world.camera().expect("camera");
        assert_eq!(camera.offset, PixelPos::new(0, 0));
        let list = world.draw_list().expect("draw list");
        assert_eq!(list.len(), 9 + 1);
        assert_eq!(
            list.last().copied(),
            Some(DrawCommand::Player {
                screen: PixelPos::new(16, 16)
            })
        );
    }
}
