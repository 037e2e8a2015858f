use super::collision::overlaps;
use super::map::{Direction, MapGrid, MapRegistry};
use super::tiles::TileCatalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveDelta {
    pub dx: i32,
    pub dy: i32,
}

impl MoveDelta {
    pub const ZERO: MoveDelta = MoveDelta { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Directional keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    /// Left wins over right and up over down when both are held.
    pub fn to_delta(self, speed: i32) -> MoveDelta {
        let dx = if self.left {
            -speed
        } else if self.right {
            speed
        } else {
            0
        };
        let dy = if self.up {
            -speed
        } else if self.down {
            speed
        } else {
            0
        };
        MoveDelta { dx, dy }
    }
}

/// Where the player is. The bounding box is always one tile square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub map: String,
    pub position: PixelPos,
}

impl PlayerState {
    pub fn new(map: impl Into<String>, position: PixelPos) -> Self {
        Self {
            map: map.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTransition {
    pub from: String,
    pub to: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub moved: bool,
    pub blocked_horizontal: bool,
    pub blocked_vertical: bool,
    pub transitions: Vec<MapTransition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn component(self, pos: PixelPos) -> i32 {
        match self {
            Axis::Horizontal => pos.x,
            Axis::Vertical => pos.y,
        }
    }

    fn with_component(self, pos: PixelPos, value: i32) -> PixelPos {
        match self {
            Axis::Horizontal => PixelPos { x: value, ..pos },
            Axis::Vertical => PixelPos { y: value, ..pos },
        }
    }

    fn extent(self, grid: &MapGrid, tile_size: i32) -> i32 {
        match self {
            Axis::Horizontal => grid.pixel_width(tile_size),
            Axis::Vertical => grid.pixel_height(tile_size),
        }
    }

    fn orthogonal(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    fn edge_direction(self, delta: i32) -> Direction {
        match (self, delta > 0) {
            (Axis::Horizontal, true) => Direction::East,
            (Axis::Horizontal, false) => Direction::West,
            (Axis::Vertical, true) => Direction::South,
            (Axis::Vertical, false) => Direction::North,
        }
    }
}

enum AxisResult {
    Unchanged,
    Blocked,
    Moved(PixelPos),
    Transitioned { map: String, position: PixelPos },
}

/// Advances the player by `delta`, horizontal axis first, then vertical.
///
/// Each axis is resolved against the position left by the previous one, so a
/// diagonal push into a wall slides along it. Rejected axes leave their
/// coordinate untouched; nothing here is an error.
pub fn step(
    player: &PlayerState,
    registry: &MapRegistry,
    catalog: &TileCatalog,
    tile_size: i32,
    delta: MoveDelta,
) -> PlayerState {
    step_with_outcome(player, registry, catalog, tile_size, delta).0
}

pub fn step_with_outcome(
    player: &PlayerState,
    registry: &MapRegistry,
    catalog: &TileCatalog,
    tile_size: i32,
    delta: MoveDelta,
) -> (PlayerState, StepOutcome) {
    let mut next = player.clone();
    let mut outcome = StepOutcome::default();

    for (axis, axis_delta) in [(Axis::Horizontal, delta.dx), (Axis::Vertical, delta.dy)] {
        match resolve_axis(&next, registry, catalog, tile_size, axis, axis_delta) {
            AxisResult::Unchanged => {}
            AxisResult::Blocked => match axis {
                Axis::Horizontal => outcome.blocked_horizontal = true,
                Axis::Vertical => outcome.blocked_vertical = true,
            },
            AxisResult::Moved(position) => {
                next.position = position;
                outcome.moved = true;
            }
            AxisResult::Transitioned { map, position } => {
                outcome.transitions.push(MapTransition {
                    from: std::mem::replace(&mut next.map, map.clone()),
                    to: map,
                    direction: axis.edge_direction(axis_delta),
                });
                next.position = position;
                outcome.moved = true;
            }
        }
    }

    (next, outcome)
}

fn resolve_axis(
    player: &PlayerState,
    registry: &MapRegistry,
    catalog: &TileCatalog,
    tile_size: i32,
    axis: Axis,
    delta: i32,
) -> AxisResult {
    if delta == 0 {
        return AxisResult::Unchanged;
    }
    let Ok(grid) = registry.grid(&player.map) else {
        return AxisResult::Blocked;
    };
    let box_size = tile_size;
    let extent = axis.extent(grid, tile_size);
    // Deltas too large for i32 pixel space are refused rather than wrapped.
    let Some(candidate) = axis.component(player.position).checked_add(delta) else {
        return AxisResult::Blocked;
    };
    let overflow = if delta > 0 {
        candidate.checked_add(box_size - extent)
    } else {
        candidate.checked_neg()
    };
    let Some(overflow) = overflow else {
        return AxisResult::Blocked;
    };

    if overflow <= 0 {
        let position = axis.with_component(player.position, candidate);
        if overlaps(position.x, position.y, box_size, grid, catalog, tile_size) {
            return AxisResult::Blocked;
        }
        return AxisResult::Moved(position);
    }

    let direction = axis.edge_direction(delta);
    let Some(neighbor_name) = registry.neighbor(&player.map, direction) else {
        return AxisResult::Blocked;
    };
    let Ok(neighbor) = registry.grid(neighbor_name) else {
        return AxisResult::Blocked;
    };

    let max_entered = axis.extent(neighbor, tile_size) - box_size;
    let entered = if delta > 0 {
        Some(overflow)
    } else {
        max_entered.checked_sub(overflow)
    };
    let Some(entered) = entered.filter(|value| (0..=max_entered).contains(value)) else {
        return AxisResult::Blocked;
    };

    // The orthogonal coordinate carries over; it must still fit the neighbor.
    let orthogonal = axis.orthogonal();
    let carried = orthogonal.component(player.position);
    if carried.saturating_add(box_size) > orthogonal.extent(neighbor, tile_size) {
        return AxisResult::Blocked;
    }

    let position = axis.with_component(player.position, entered);
    if overlaps(position.x, position.y, box_size, neighbor, catalog, tile_size) {
        return AxisResult::Blocked;
    }
    AxisResult::Transitioned {
        map: neighbor_name.to_string(),
        position,
    }
}
