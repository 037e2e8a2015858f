mod renderer;
mod sprite;

pub use renderer::Renderer;
pub use sprite::{Sprite, SpriteError, SpriteTable};
