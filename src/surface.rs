use anyhow::{Context, Result, anyhow};
use log::debug;
use raylib::prelude::*;
use crate::constants::*;
use crate::driver::Viewport;
use crate::state::{BounceState, Content, Point, Size};

// Horizontal shift of the second pass that fakes a bold face
const BOLD_OFFSET: i32 = 1;

/// The window area below the menu bar, as seen by the animation driver.
pub struct WindowViewport<'a> {
    rl: &'a RaylibHandle,
}

impl<'a> WindowViewport<'a> {
    pub fn new(rl: &'a RaylibHandle) -> Self {
        Self { rl }
    }
}

impl Viewport for WindowViewport<'_> {
    fn bounds(&self) -> Size {
        Size::new(
            self.rl.get_screen_width(),
            (self.rl.get_screen_height() - MENU_BAR_HEIGHT).max(0),
        )
    }

    fn measure_text(&self, text: &str, font_size: i32) -> i32 {
        bold_width(self.rl.measure_text(text, font_size))
    }
}

fn bold_width(measured: i32) -> i32 {
    measured + BOLD_OFFSET
}

/// Text positions name the left end of the baseline; raylib wants the top-left.
fn text_top_left(position: Point) -> Point {
    Point::new(position.x, position.y - TEXT_SIZE)
}

/// Paints the bouncing content. Holds the GPU copy of the current bitmap.
#[derive(Default)]
pub struct RenderSurface {
    texture: Option<(u64, Texture2D)>,
}

impl RenderSurface {
    /// Uploads the bitmap when it changed since the last frame and releases
    /// the texture once the content is back to text.
    pub fn sync_texture(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, state: &BounceState) -> Result<()> {
        let Some(bitmap) = state.bitmap() else {
            self.texture = None;
            return Ok(());
        };

        if matches!(&self.texture, Some((generation, _)) if *generation == bitmap.generation()) {
            return Ok(());
        }

        let png = bitmap.encode_png().context("Failed to encode bitmap for upload")?;
        let image = Image::load_image_from_mem(".png", &png)
            .map_err(|e| anyhow!("Failed to hand bitmap to raylib: {}", e))?;
        let texture = rl.load_texture_from_image(thread, &image)
            .map_err(|e| anyhow!("Failed to create texture: {}", e))?;

        debug!("Uploaded {}x{} texture (generation {})", bitmap.width(), bitmap.height(), bitmap.generation());
        self.texture = Some((bitmap.generation(), texture));
        Ok(())
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, state: &BounceState) {
        d.clear_background(state.background);

        let x = state.position.x;
        let y = state.position.y + MENU_BAR_HEIGHT;

        match (&state.content, &self.texture) {
            (Content::Bitmap(bitmap), Some((_, texture))) => {
                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                    Rectangle::new(x as f32, y as f32, bitmap.width() as f32, bitmap.height() as f32),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
            }
            (Content::Bitmap(_), None) => {}
            (Content::Text(text), _) => {
                let top_left = text_top_left(state.position);
                let y = top_left.y + MENU_BAR_HEIGHT;
                // Bold by overdraw; the default font has no bold face
                d.draw_text(text, top_left.x, y, TEXT_SIZE, Color::WHITE);
                d.draw_text(text, top_left.x + BOLD_OFFSET, y, TEXT_SIZE, Color::WHITE);
            }
        }
    }
}
