use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use winit::window::Window;

use crate::world::{DrawCommand, PixelPos, Viewport};

use super::sprite::{Sprite, SpriteTable};

const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];
const UNKNOWN_TILE_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Rasterizes a draw list into a viewport-sized buffer that pixels scales
/// to the window.
pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
    sprites: SpriteTable,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        viewport: Viewport,
        sprites: SpriteTable,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(viewport.width, viewport.height, surface)?;
        Ok(Self {
            pixels,
            viewport,
            sprites,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub fn render(&mut self, commands: &[DrawCommand]) -> Result<(), Error> {
        rasterize(
            self.pixels.frame_mut(),
            self.viewport,
            commands,
            &self.sprites,
        );
        self.pixels.render()
    }
}

/// Clears `frame` and draws `commands` in order. Off-screen pixels are clipped.
pub(crate) fn rasterize(
    frame: &mut [u8],
    viewport: Viewport,
    commands: &[DrawCommand],
    sprites: &SpriteTable,
) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&CLEAR_COLOR);
    }
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    for command in commands {
        match *command {
            DrawCommand::Tile { code, screen } => match sprites.tile(code) {
                Some(sprite) => blit_sprite(frame, viewport, screen, sprite),
                None => fill_rect(
                    frame,
                    viewport,
                    screen,
                    sprites.tile_size(),
                    UNKNOWN_TILE_COLOR,
                ),
            },
            DrawCommand::Player { screen } => {
                blit_sprite(frame, viewport, screen, sprites.player())
            }
        }
    }
}

fn blit_sprite(frame: &mut [u8], viewport: Viewport, origin: PixelPos, sprite: &Sprite) {
    for sy in 0..sprite.height() {
        for sx in 0..sprite.width() {
            let Some(color) = sprite.pixel(sx, sy) else {
                continue;
            };
            if color[3] == 0 {
                continue;
            }
            write_pixel_rgba_clipped(
                frame,
                viewport,
                origin.x + sx as i32,
                origin.y + sy as i32,
                color,
            );
        }
    }
}

fn fill_rect(frame: &mut [u8], viewport: Viewport, origin: PixelPos, size: u32, color: [u8; 4]) {
    for dy in 0..size as i32 {
        for dx in 0..size as i32 {
            write_pixel_rgba_clipped(frame, viewport, origin.x + dx, origin.y + dy, color);
        }
    }
}

fn write_pixel_rgba_clipped(frame: &mut [u8], viewport: Viewport, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= viewport.width as i32 || y >= viewport.height as i32 {
        return;
    }
    let offset = (y as usize * viewport.width as usize + x as usize) * 4;
    let Some(pixel) = frame.get_mut(offset..offset + 4) else {
        return;
    };
    pixel.copy_from_slice(&color);
}
