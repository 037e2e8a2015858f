mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Renderer, Sprite, SpriteError, SpriteTable};
pub use scene::{Scene, SceneCommand};
