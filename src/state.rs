use raylib::prelude::Color;
use crate::bitmap::Bitmap;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// What is bouncing around. A loaded bitmap always wins over the text.
#[derive(Debug, Clone)]
pub enum Content {
    Text(String),
    Bitmap(Bitmap),
}

pub struct BounceState {
    pub position: Point,
    pub velocity: Point,
    pub content: Content,
    pub bounds: Size,
    pub party_mode: bool,
    pub background: Color,
}

impl BounceState {
    pub fn new(text: impl Into<String>, party_mode: bool) -> Self {
        Self {
            position: Point::new(START_X, START_Y),
            velocity: Point::new(TEXT_SPEED, TEXT_SPEED),
            content: Content::Text(text.into()),
            bounds: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            party_mode,
            background: Color::BLACK,
        }
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        match &self.content {
            Content::Bitmap(bitmap) => Some(bitmap),
            Content::Text(_) => None,
        }
    }

    /// Replaces whatever is showing with `bitmap`, scaled to `size`.
    pub fn load_bitmap(&mut self, bitmap: Bitmap, size: Size) {
        self.content = Content::Bitmap(bitmap.resized(size.width, size.height));
    }

    /// Rescales the loaded bitmap. Text content is left alone.
    pub fn resize(&mut self, width: i32, height: i32) {
        if let Content::Bitmap(bitmap) = &self.content {
            self.content = Content::Bitmap(bitmap.resized(width, height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn starts_with_default_text_at_start_position() {
        let state = BounceState::new(DEFAULT_TEXT, false);

        assert_eq!(state.position, Point::new(0, 50));
        assert_eq!(state.velocity, Point::new(2, 2));
        assert!(matches!(&state.content, Content::Text(t) if t == "DVD Logo"));
        assert_eq!(state.background, Color::BLACK);
    }

    #[test]
    fn resize_without_bitmap_is_a_no_op() {
        let mut state = BounceState::new("hello", false);
        state.resize(320, 240);

        assert!(matches!(&state.content, Content::Text(t) if t == "hello"));
    }

    #[test]
    fn loading_bitmap_replaces_text_at_requested_size() {
        let mut state = BounceState::new("hello", false);
        state.load_bitmap(Bitmap::new(RgbaImage::new(10, 10)), Size::new(640, 480));

        let bitmap = state.bitmap().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (640, 480));
    }

    #[test]
    fn applying_same_size_twice_is_idempotent() {
        let mut state = BounceState::new("hello", false);
        state.load_bitmap(Bitmap::new(RgbaImage::new(33, 21)), Size::new(640, 480));

        state.resize(800, 600);
        let once = state.bitmap().map(|b| (b.width(), b.height()));
        state.resize(800, 600);
        let twice = state.bitmap().map(|b| (b.width(), b.height()));

        assert_eq!(once, Some((800, 600)));
        assert_eq!(once, twice);
    }
}
